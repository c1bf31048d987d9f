//! XML to JSON tree conversion for the document viewer.
//!
//! Every element becomes `{"tag", "attributes", "text", "children"}`. `text` is the text
//! that precedes the element's first child, stripped of surrounding whitespace, or `null`
//! when there is none. Text following a child element is not kept.
//!
//! Namespaces are not resolved: element and attribute names keep their `prefix:local` form
//! and `xmlns`/`xmlns:*` declarations appear in `attributes` like any other attribute.
//! Python's ElementTree would write `{uri}local` and drop the declarations instead.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use quick_xml::escape::{unescape, EscapeError};
use quick_xml::events::attributes::AttrError;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),
    #[error("invalid attribute: {0}")]
    Attribute(#[from] AttrError),
    #[error("invalid escape sequence: {0}")]
    Escape(#[from] EscapeError),
    #[error("invalid UTF-8 in document: {0}")]
    Utf8(#[from] std::str::Utf8Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unbalanced document: {0}")]
    UnbalancedDocument(String),
    #[error("document has no root element")]
    EmptyDocument,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct XmlNode {
    pub tag: String,
    pub attributes: Map<String, Value>,
    pub text: Option<String>,
    pub children: Vec<XmlNode>,
}

struct OpenElement {
    tag: String,
    attributes: Map<String, Value>,
    text: Option<String>,
    children: Vec<XmlNode>,
}

impl OpenElement {
    fn from_start(start: &BytesStart<'_>) -> Result<Self, ConvertError> {
        let tag = std::str::from_utf8(start.name().as_ref())?.to_string();
        let mut attributes = Map::new();
        for attr in start.attributes() {
            let attr = attr?;
            let key = std::str::from_utf8(attr.key.as_ref())?.to_string();
            let raw = std::str::from_utf8(&attr.value)?;
            attributes.insert(key, Value::String(unescape(raw)?.into_owned()));
        }
        Ok(Self {
            tag,
            attributes,
            text: None,
            children: Vec::new(),
        })
    }

    fn push_text(&mut self, text: &str) {
        if !self.children.is_empty() {
            return;
        }
        self.text.get_or_insert_with(String::new).push_str(text);
    }

    fn close(self) -> XmlNode {
        XmlNode {
            tag: self.tag,
            attributes: self.attributes,
            text: self.text.map(|text| text.trim().to_string()),
            children: self.children,
        }
    }
}

fn attach(
    stack: &mut [OpenElement],
    root: &mut Option<XmlNode>,
    node: XmlNode,
) -> Result<(), ConvertError> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(node),
        None if root.is_none() => *root = Some(node),
        None => {
            return Err(ConvertError::UnbalancedDocument(format!(
                "second root element <{}>",
                node.tag
            )))
        }
    }
    Ok(())
}

pub fn parse_xml(xml: &str) -> Result<XmlNode, ConvertError> {
    let mut reader = Reader::from_str(xml);
    let mut stack: Vec<OpenElement> = Vec::new();
    let mut root: Option<XmlNode> = None;

    loop {
        match reader.read_event()? {
            Event::Start(start) => stack.push(OpenElement::from_start(&start)?),
            Event::Empty(start) => {
                let node = OpenElement::from_start(&start)?.close();
                attach(&mut stack, &mut root, node)?;
            }
            Event::End(end) => {
                let open = stack.pop().ok_or_else(|| {
                    ConvertError::UnbalancedDocument(format!(
                        "unexpected closing tag </{}>",
                        String::from_utf8_lossy(end.name().as_ref())
                    ))
                })?;
                attach(&mut stack, &mut root, open.close())?;
            }
            Event::Text(text) => {
                if let Some(open) = stack.last_mut() {
                    let raw = std::str::from_utf8(&text)?;
                    open.push_text(&unescape(raw)?);
                }
            }
            Event::CData(data) => {
                if let Some(open) = stack.last_mut() {
                    open.push_text(std::str::from_utf8(&data)?);
                }
            }
            Event::GeneralRef(reference) => {
                if let Some(open) = stack.last_mut() {
                    let name = std::str::from_utf8(&reference)?;
                    open.push_text(&unescape(&format!("&{name};"))?);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(ConvertError::UnbalancedDocument(format!(
            "element <{}> is never closed",
            open.tag
        )));
    }
    root.ok_or(ConvertError::EmptyDocument)
}

/// Pretty JSON with a four-space indent; non-ASCII text is written as-is.
pub fn write_json<W: Write>(node: &XmlNode, writer: W) -> Result<(), ConvertError> {
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(writer, formatter);
    node.serialize(&mut serializer)?;
    Ok(())
}

pub fn convert_file(input: &Path, output: &Path) -> Result<XmlNode, ConvertError> {
    let xml = std::fs::read_to_string(input)?;
    let root = parse_xml(&xml)?;
    let mut writer = BufWriter::new(File::create(output)?);
    write_json(&root, &mut writer)?;
    writer.flush()?;
    Ok(root)
}

pub fn count_nodes(node: &XmlNode) -> usize {
    1 + node.children.iter().map(count_nodes).sum::<usize>()
}
