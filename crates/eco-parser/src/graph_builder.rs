use eco_core::{Diagnostic, GraphDocument};
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::{ParseResult, expand::PendingNode, reconcile::reconcile_links};

/// Order-preserving node table keyed by player ID.
///
/// Positions are fixed by the first declaration of an ID; a later declaration
/// replaces the node in that slot wholesale.
pub(crate) struct GraphBuilder {
    nodes: Vec<PendingNode>,
    index_by_id: FxHashMap<String, usize>,
    diagnostics: Vec<Diagnostic>,
}

impl GraphBuilder {
    pub(crate) fn new(diagnostics: Vec<Diagnostic>) -> Self {
        Self {
            nodes: Vec::new(),
            index_by_id: FxHashMap::default(),
            diagnostics,
        }
    }

    pub(crate) fn insert(&mut self, pending: PendingNode) {
        if let Some(index) = self.index_by_id.get(&pending.node.id).copied() {
            if let Some(slot) = self.nodes.get_mut(index) {
                debug!(id = %pending.node.id, "duplicate player declaration replaces earlier one");
                *slot = pending;
            }
            return;
        }

        self.index_by_id
            .insert(pending.node.id.clone(), self.nodes.len());
        self.nodes.push(pending);
    }

    pub(crate) fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Recompute inbound sets from outbound declarations and emit the document.
    pub(crate) fn finish(mut self) -> ParseResult {
        for pending in &mut self.nodes {
            pending.node.inbound.clear();
        }

        let links = reconcile_links(&mut self.nodes, &self.index_by_id, &mut self.diagnostics);

        ParseResult {
            document: GraphDocument {
                nodes: self.nodes.into_iter().map(|pending| pending.node).collect(),
                links,
            },
            diagnostics: self.diagnostics,
        }
    }
}

#[cfg(test)]
mod tests {
    use eco_core::Node;

    use super::GraphBuilder;
    use crate::expand::PendingNode;

    fn pending(id: &str, name: &str) -> PendingNode {
        PendingNode {
            node: Node::new(id, name),
            outbound_span: None,
        }
    }

    #[test]
    fn duplicate_ids_keep_first_position_and_last_attributes() {
        let mut builder = GraphBuilder::new(Vec::new());
        builder.insert(pending("P001", "First"));
        builder.insert(pending("P002", "Other"));
        let mut replacement = pending("P001", "Second");
        replacement.node.segment = "Airlines".to_string();
        builder.insert(replacement);

        assert_eq!(builder.node_count(), 2);
        let parsed = builder.finish();
        let nodes = &parsed.document.nodes;
        assert_eq!(nodes[0].id, "P001");
        assert_eq!(nodes[0].name, "Second");
        assert_eq!(nodes[0].segment, "Airlines");
        assert_eq!(nodes[1].id, "P002");
    }

    #[test]
    fn replacement_does_not_merge_attributes() {
        let mut builder = GraphBuilder::new(Vec::new());
        let mut original = pending("P001", "First");
        original.node.description = "kept?".to_string();
        original.node.outbound = vec!["P001".to_string()];
        builder.insert(original);
        builder.insert(pending("P001", "Second"));

        let parsed = builder.finish();
        let node = &parsed.document.nodes[0];
        assert!(node.description.is_empty());
        assert!(node.outbound.is_empty());
        assert!(parsed.document.links.is_empty());
    }

    #[test]
    fn declared_inbound_is_discarded() {
        let mut builder = GraphBuilder::new(Vec::new());
        let mut node = pending("P001", "A");
        node.node.inbound = vec!["P002".to_string()];
        builder.insert(node);
        builder.insert(pending("P002", "B"));

        let parsed = builder.finish();
        assert!(parsed.document.nodes.iter().all(|n| n.inbound.is_empty()));
    }
}
