use crate::document::DocumentNode;

/// Case-insensitive containment over the node's full serialized form.
pub fn node_matches(node: &DocumentNode, needle_lower: &str) -> bool {
    node.serialized().to_lowercase().contains(needle_lower)
}

/// Nodes whose serialization contains `term`, in input order. An empty term keeps every node.
pub fn filter_nodes<'a>(nodes: &'a [DocumentNode], term: &str) -> Vec<&'a DocumentNode> {
    if term.is_empty() {
        return nodes.iter().collect();
    }
    let needle = term.to_lowercase();
    nodes
        .iter()
        .filter(|node| node_matches(node, &needle))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Vec<DocumentNode> {
        vec![
            json!({"tag": "documentMetadata", "attributes": {"name": "Decreto Único", "year": "2015"}}),
            json!({"tag": "block", "GUID": "AB-12", "children": [{"text": "Artículo primero"}]}),
            json!({"tag": "block", "GUID": "cd-34", "children": [{"text": "Vigencia en BOGOTÁ"}]}),
            json!({"tag": "note", "body": "(pendiente)"}),
        ]
        .into_iter()
        .map(DocumentNode::from_value)
        .collect()
    }

    #[test]
    fn empty_term_is_identity() {
        let nodes = sample();
        let filtered = filter_nodes(&nodes, "");
        assert_eq!(filtered.len(), nodes.len());
        for (kept, original) in filtered.iter().zip(&nodes) {
            assert!(std::ptr::eq(*kept, original));
        }
    }

    #[test]
    fn matches_nested_fields_case_insensitively() {
        let nodes = sample();
        let filtered = filter_nodes(&nodes, "ARTÍCULO");
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].raw["GUID"], "AB-12");

        let filtered = filter_nodes(&nodes, "bogotá");
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].raw["GUID"], "cd-34");
    }

    #[test]
    fn kept_and_excluded_partition_by_containment() {
        let nodes = sample();
        for term in ["block", "2015", "ab-", "xyz", "tag"] {
            let needle = term.to_lowercase();
            let filtered = filter_nodes(&nodes, term);
            for node in &nodes {
                let kept = filtered.iter().any(|n| std::ptr::eq(*n, node));
                assert_eq!(kept, node_matches(node, &needle), "term {term:?}");
            }
        }
    }

    #[test]
    fn matches_tag_and_unknown_nodes() {
        let nodes = sample();
        assert_eq!(filter_nodes(&nodes, "documentmetadata").len(), 1);
        assert_eq!(filter_nodes(&nodes, "(pend").len(), 1);
    }

    #[test]
    fn term_is_not_trimmed() {
        let nodes = sample();
        assert!(filter_nodes(&nodes, " primero ").is_empty());
        assert_eq!(filter_nodes(&nodes, " primero").len(), 1);
    }
}
