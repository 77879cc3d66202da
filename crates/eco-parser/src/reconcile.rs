use eco_core::{Diagnostic, DiagnosticCategory, Link};
use rustc_hash::FxHashMap;

use crate::expand::PendingNode;

/// Derive links from outbound declarations.
///
/// Walks nodes in table order and each node's targets in declaration order.
/// Resolved targets stay in `outbound`, gain the source in `inbound` (once),
/// and produce a link. Unresolved targets are dropped with a warning.
pub(crate) fn reconcile_links(
    nodes: &mut [PendingNode],
    index_by_id: &FxHashMap<String, usize>,
    diagnostics: &mut Vec<Diagnostic>,
) -> Vec<Link> {
    let mut links = Vec::new();

    for source_index in 0..nodes.len() {
        let source = &mut nodes[source_index];
        let declared = std::mem::take(&mut source.node.outbound);
        let source_id = source.node.id.clone();
        let outbound_span = source.outbound_span;
        let mut resolved = Vec::with_capacity(declared.len());

        for target_id in declared {
            let Some(&target_index) = index_by_id.get(&target_id) else {
                let mut warning = Diagnostic::warning(format!(
                    "Node {source_id} points to non-existent target {target_id}"
                ))
                .with_category(DiagnosticCategory::Semantic);
                if let Some(span) = outbound_span {
                    warning = warning.with_span(span);
                }
                diagnostics.push(warning);
                continue;
            };

            let inbound = &mut nodes[target_index].node.inbound;
            if !inbound.contains(&source_id) {
                inbound.push(source_id.clone());
            }
            links.push(Link::outbound(source_id.as_str(), target_id.as_str()));
            resolved.push(target_id);
        }

        nodes[source_index].node.outbound = resolved;
    }

    links
}

#[cfg(test)]
mod tests {
    use eco_core::{LinkKind, Node};
    use rustc_hash::FxHashMap;

    use super::reconcile_links;
    use crate::expand::PendingNode;

    /// Each entry is an ID plus its whitespace-separated outbound targets.
    fn table(specs: &[(&str, &str)]) -> (Vec<PendingNode>, FxHashMap<String, usize>) {
        let mut nodes = Vec::new();
        let mut index = FxHashMap::default();
        for (id, outbound) in specs {
            let mut node = Node::new(*id, *id);
            node.outbound = outbound.split_whitespace().map(str::to_string).collect();
            index.insert((*id).to_string(), nodes.len());
            nodes.push(PendingNode {
                node,
                outbound_span: None,
            });
        }
        (nodes, index)
    }

    #[test]
    fn resolved_targets_produce_links_and_inbound() {
        let (mut nodes, index) =
            table(&[("P001", "P002 P003"), ("P002", "P003"), ("P003", "")]);
        let mut diagnostics = Vec::new();
        let links = reconcile_links(&mut nodes, &index, &mut diagnostics);

        let pairs: Vec<_> = links
            .iter()
            .map(|l| (l.source.as_str(), l.target.as_str()))
            .collect();
        assert_eq!(pairs, [("P001", "P002"), ("P001", "P003"), ("P002", "P003")]);
        assert!(links.iter().all(|l| l.kind == LinkKind::Outbound));
        assert_eq!(nodes[2].node.inbound, vec!["P001", "P002"]);
        assert_eq!(nodes[1].node.inbound, vec!["P001"]);
        assert!(nodes[0].node.inbound.is_empty());
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn dangling_target_is_dropped_with_one_warning() {
        let (mut nodes, index) = table(&[("P001", "P002 P999"), ("P002", "")]);
        let mut diagnostics = Vec::new();
        let links = reconcile_links(&mut nodes, &index, &mut diagnostics);

        assert_eq!(nodes[0].node.outbound, vec!["P002"]);
        assert_eq!(links.len(), 1);
        assert!(links.iter().all(|l| l.target != "P999"));
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].is_warning());
        assert_eq!(
            diagnostics[0].message,
            "Node P001 points to non-existent target P999"
        );
    }

    #[test]
    fn repeated_target_links_twice_but_inbound_once() {
        let (mut nodes, index) = table(&[("P001", "P002 P002"), ("P002", "")]);
        let mut diagnostics = Vec::new();
        let links = reconcile_links(&mut nodes, &index, &mut diagnostics);

        assert_eq!(links.len(), 2);
        assert_eq!(nodes[0].node.outbound, vec!["P002", "P002"]);
        assert_eq!(nodes[1].node.inbound, vec!["P001"]);
    }

    #[test]
    fn self_reference_is_a_valid_link() {
        let (mut nodes, index) = table(&[("P001", "P001")]);
        let mut diagnostics = Vec::new();
        let links = reconcile_links(&mut nodes, &index, &mut diagnostics);

        assert_eq!(links.len(), 1);
        assert_eq!(nodes[0].node.outbound, vec!["P001"]);
        assert_eq!(nodes[0].node.inbound, vec!["P001"]);
    }
}
