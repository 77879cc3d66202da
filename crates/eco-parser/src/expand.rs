use eco_core::{Diagnostic, DiagnosticCategory, Node, Span, format_node_id};
use tracing::debug;

use crate::records::{Record, RecordKind};

/// Ranges wider than this still expand, with a warning.
const LARGE_RANGE_IDS: u64 = 10_000;

/// A concrete node on its way into the graph, with the source location of its
/// outbound declaration for later diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PendingNode {
    pub(crate) node: Node,
    pub(crate) outbound_span: Option<Span>,
}

/// Replace every range record with one node per ID in its bounds.
pub(crate) fn expand_records(
    records: Vec<Record>,
    diagnostics: &mut Vec<Diagnostic>,
) -> Vec<PendingNode> {
    let mut expanded = Vec::with_capacity(records.len());

    for record in records {
        match record.kind {
            RecordKind::Single => expanded.push(PendingNode {
                node: record.node,
                outbound_span: record.outbound_span,
            }),
            RecordKind::OversizedRange => {
                diagnostics.push(empty_range_warning(
                    &record,
                    "keep range IDs within P0-P4294967295",
                ));
            }
            RecordKind::Range { start, end } if start > end => {
                diagnostics.push(empty_range_warning(&record, "list the lower ID first"));
            }
            RecordKind::Range { start, end } => {
                let count = u64::from(end - start) + 1;
                if count > LARGE_RANGE_IDS {
                    diagnostics.push(
                        Diagnostic::warning(format!(
                            "Range {} creates {count} players",
                            record.node.id
                        ))
                        .with_category(DiagnosticCategory::Semantic)
                        .with_span(record.header_span),
                    );
                }

                debug!(range = %record.node.id, count, "expanding range");
                for number in start..=end {
                    let mut node = record.node.clone();
                    node.id = format_node_id(number);
                    node.name = format!("{} {number}", record.node.name);
                    expanded.push(PendingNode {
                        node,
                        outbound_span: record.outbound_span,
                    });
                }
            }
        }
    }

    expanded
}

fn empty_range_warning(record: &Record, suggestion: &str) -> Diagnostic {
    Diagnostic::warning(format!(
        "Range {} is empty; no players created",
        record.node.id
    ))
    .with_category(DiagnosticCategory::Semantic)
    .with_span(record.header_span)
    .with_suggestion(suggestion)
}
