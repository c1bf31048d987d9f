use crate::document::{BlockContent, DocumentNode, MetadataAttributes, NodeKind};
use crate::highlight::{Fragment, Highlighter};

pub const METADATA_TITLE: &str = "Metadata del Documento";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedLine {
    pub key: String,
    pub label: Option<&'static str>,
    pub fragments: Vec<Fragment>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ItemKind {
    Metadata,
    Block,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedItem {
    pub key: String,
    pub kind: ItemKind,
    pub lines: Vec<RenderedLine>,
    /// Child texts of a block, shown below the labeled lines.
    pub children: Vec<RenderedLine>,
}

fn labeled(
    label: &'static str,
    value: Option<&str>,
    highlighter: &Highlighter,
) -> Option<RenderedLine> {
    value.map(|value| RenderedLine {
        key: label.to_string(),
        label: Some(label),
        fragments: highlighter.highlight(value),
    })
}

fn render_metadata(
    key: String,
    metadata: &MetadataAttributes,
    highlighter: &Highlighter,
) -> RenderedItem {
    let fields = [
        ("Año", metadata.year.as_deref()),
        ("Fecha de Expedición", metadata.expedition_date.as_deref()),
        ("Fecha de Publicación", metadata.publish_date.as_deref()),
        ("Nombre", metadata.name.as_deref()),
        ("Descripción", metadata.description.as_deref()),
    ];
    RenderedItem {
        key,
        kind: ItemKind::Metadata,
        lines: fields
            .into_iter()
            .filter_map(|(label, value)| labeled(label, value, highlighter))
            .collect(),
        children: Vec::new(),
    }
}

fn render_block(key: String, block: &BlockContent, highlighter: &Highlighter) -> RenderedItem {
    let lines = [
        labeled("GUID", block.guid.as_deref(), highlighter),
        labeled("Fecha Válida", block.valid_date.as_deref(), highlighter),
    ]
    .into_iter()
    .flatten()
    .collect();

    let children = block
        .children
        .iter()
        .enumerate()
        .map(|(idx, child)| {
            let text = child.text.as_deref().unwrap_or_default();
            RenderedLine {
                key: format!("{text}{idx}"),
                label: None,
                fragments: highlighter.highlight(text),
            }
        })
        .collect();

    RenderedItem {
        key,
        kind: ItemKind::Block,
        lines,
        children,
    }
}

/// Renders one page of nodes. Nodes with an unrecognised tag produce no item; keys are the
/// tag followed by the node's position on the page.
pub fn render_page(nodes: &[&DocumentNode], highlighter: &Highlighter) -> Vec<RenderedItem> {
    nodes
        .iter()
        .enumerate()
        .filter_map(|(index, node)| {
            let key = format!("{}{index}", node.tag());
            match &node.kind {
                NodeKind::DocumentMetadata(metadata) => {
                    Some(render_metadata(key, metadata, highlighter))
                }
                NodeKind::Block(block) => Some(render_block(key, block, highlighter)),
                NodeKind::Unknown { .. } => None,
            }
        })
        .collect()
}
