use serde::Deserialize;
use serde_json::Value;

pub const TAG_DOCUMENT_METADATA: &str = "documentMetadata";
pub const TAG_BLOCK: &str = "block";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MetadataAttributes {
    pub year: Option<String>,
    pub expedition_date: Option<String>,
    pub publish_date: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChildText {
    pub text: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BlockContent {
    pub guid: Option<String>,
    pub valid_date: Option<String>,
    pub children: Vec<ChildText>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeKind {
    DocumentMetadata(MetadataAttributes),
    Block(BlockContent),
    Unknown { tag: Option<String> },
}

/// One top-level entry of the fetched tree. `raw` is the node exactly as received and is
/// what full-text search runs against.
#[derive(Clone, Debug, PartialEq)]
pub struct DocumentNode {
    pub kind: NodeKind,
    pub raw: Value,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct RawMetadata {
    year: Value,
    #[serde(rename = "expeditionDate")]
    expedition_date: Value,
    #[serde(rename = "publishDate")]
    publish_date: Value,
    name: Value,
    description: Value,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct RawBlock {
    #[serde(rename = "GUID")]
    guid: Value,
    #[serde(rename = "validDate")]
    valid_date: Value,
    attributes: Value,
    children: Option<Vec<Value>>,
}

impl DocumentNode {
    pub fn from_value(raw: Value) -> Self {
        let tag = raw.get("tag").and_then(Value::as_str).map(str::to_string);
        let kind = match tag.as_deref() {
            Some(TAG_DOCUMENT_METADATA) => metadata_kind(&raw),
            Some(TAG_BLOCK) => block_kind(&raw),
            _ => None,
        }
        .unwrap_or(NodeKind::Unknown { tag });
        Self { kind, raw }
    }

    pub fn tag(&self) -> &str {
        self.raw.get("tag").and_then(Value::as_str).unwrap_or_default()
    }

    /// Compact JSON form of the whole node, nested fields included.
    pub fn serialized(&self) -> String {
        self.raw.to_string()
    }
}

fn metadata_kind(raw: &Value) -> Option<NodeKind> {
    let attributes = match raw.get("attributes") {
        Some(v) if v.is_object() => RawMetadata::deserialize(v).ok()?,
        _ => RawMetadata::default(),
    };
    Some(NodeKind::DocumentMetadata(MetadataAttributes {
        year: display_value(&attributes.year),
        expedition_date: display_value(&attributes.expedition_date),
        publish_date: display_value(&attributes.publish_date),
        name: display_value(&attributes.name),
        description: display_value(&attributes.description),
    }))
}

fn block_kind(raw: &Value) -> Option<NodeKind> {
    let block = RawBlock::deserialize(raw).ok()?;
    let from_attributes = |key: &str| block.attributes.get(key).and_then(display_value);
    Some(NodeKind::Block(BlockContent {
        guid: display_value(&block.guid).or_else(|| from_attributes("GUID")),
        valid_date: display_value(&block.valid_date).or_else(|| from_attributes("validDate")),
        children: block
            .children
            .unwrap_or_default()
            .into_iter()
            .map(|child| ChildText {
                text: child.get("text").and_then(display_value),
            })
            .collect(),
    }))
}

/// Treats a JSON value as present only when it is truthy: non-empty strings, non-zero
/// numbers and `true`.
pub fn display_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        Value::Bool(true) => Some("true".to_string()),
        _ => None,
    }
}

/// Extracts the top-level node list from a response body. A body without a `children`
/// array yields an empty list; only a body that is not JSON, or is `null`, is an error.
pub fn parse_document(body: &str) -> Result<Vec<DocumentNode>, serde_json::Error> {
    let value: Value = serde_json::from_str(body)?;
    if value.is_null() {
        return Err(serde::de::Error::custom("document body is null"));
    }
    let nodes = match value.get("children") {
        Some(Value::Array(children)) => children
            .iter()
            .cloned()
            .map(DocumentNode::from_value)
            .collect(),
        _ => Vec::new(),
    };
    Ok(nodes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_metadata_and_block_nodes() {
        let body = json!({
            "tag": "root",
            "children": [
                {"tag": "documentMetadata", "attributes": {"year": "2020", "name": "Ley 1"}},
                {"tag": "block", "GUID": "abc", "validDate": "2021-01-01",
                 "children": [{"text": "A"}, {"text": "B"}]},
                {"tag": "annex"}
            ]
        })
        .to_string();

        let nodes = parse_document(&body).unwrap();
        assert_eq!(nodes.len(), 3);
        assert_eq!(
            nodes[0].kind,
            NodeKind::DocumentMetadata(MetadataAttributes {
                year: Some("2020".into()),
                name: Some("Ley 1".into()),
                ..Default::default()
            })
        );
        let NodeKind::Block(block) = &nodes[1].kind else {
            panic!("expected block");
        };
        assert_eq!(block.guid.as_deref(), Some("abc"));
        assert_eq!(block.valid_date.as_deref(), Some("2021-01-01"));
        assert_eq!(block.children.len(), 2);
        assert_eq!(
            nodes[2].kind,
            NodeKind::Unknown {
                tag: Some("annex".into())
            }
        );
    }

    #[test]
    fn missing_children_is_empty_document() {
        assert!(parse_document(r#"{"tag":"root"}"#).unwrap().is_empty());
        assert!(parse_document(r#"{"children":null}"#).unwrap().is_empty());
        assert!(parse_document(r#"{"children":{"tag":"block"}}"#).unwrap().is_empty());
        assert!(parse_document("[]").unwrap().is_empty());
    }

    #[test]
    fn malformed_body_is_an_error() {
        assert!(parse_document("<html>").is_err());
        assert!(parse_document("null").is_err());
    }

    #[test]
    fn falsy_fields_are_absent() {
        let node = DocumentNode::from_value(json!({
            "tag": "documentMetadata",
            "attributes": {"year": 1991, "name": "", "description": null, "publishDate": 0}
        }));
        assert_eq!(
            node.kind,
            NodeKind::DocumentMetadata(MetadataAttributes {
                year: Some("1991".into()),
                ..Default::default()
            })
        );
    }

    #[test]
    fn metadata_without_attributes_has_no_fields() {
        let node = DocumentNode::from_value(json!({"tag": "documentMetadata"}));
        assert_eq!(
            node.kind,
            NodeKind::DocumentMetadata(MetadataAttributes::default())
        );
    }

    #[test]
    fn block_reads_converter_attributes() {
        let node = DocumentNode::from_value(json!({
            "tag": "block",
            "attributes": {"GUID": "g-1", "validDate": "2019"},
            "text": null,
            "children": [{"tag": "p", "attributes": {}, "text": null, "children": []}]
        }));
        let NodeKind::Block(block) = node.kind else {
            panic!("expected block");
        };
        assert_eq!(block.guid.as_deref(), Some("g-1"));
        assert_eq!(block.valid_date.as_deref(), Some("2019"));
        assert_eq!(block.children, vec![ChildText { text: None }]);
    }

    #[test]
    fn non_object_children_keep_their_block() {
        let node = DocumentNode::from_value(json!({
            "tag": "block",
            "GUID": "g-9",
            "validDate": "2022",
            "children": [{"text": "A"}, null, "x", 5, {"text": "B"}]
        }));
        let NodeKind::Block(block) = node.kind else {
            panic!("expected block");
        };
        assert_eq!(block.guid.as_deref(), Some("g-9"));
        assert_eq!(block.valid_date.as_deref(), Some("2022"));
        let texts: Vec<_> = block.children.iter().map(|c| c.text.as_deref()).collect();
        assert_eq!(texts, [Some("A"), None, None, None, Some("B")]);
    }

    #[test]
    fn malformed_block_degrades_to_unknown() {
        let node = DocumentNode::from_value(json!({"tag": "block", "children": "oops"}));
        assert_eq!(
            node.kind,
            NodeKind::Unknown {
                tag: Some("block".into())
            }
        );
        assert_eq!(node.tag(), "block");
    }
}
