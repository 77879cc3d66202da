use std::sync::LazyLock;

use eco_core::{Archetype, Diagnostic, Node, Span, format_node_id};
use regex::Regex;
use tracing::trace;

static RANGE_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^P([0-9]+)-P([0-9]+): (.+)").expect("range header pattern is valid")
});

static SINGLE_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(P[0-9]+): (.+)").expect("player header pattern is valid"));

static NODE_REFERENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"P[0-9]+").expect("node reference pattern is valid"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RecordKind {
    Single,
    /// Inclusive numeric bounds taken from a `Pstart-Pend` header.
    Range { start: u32, end: u32 },
    /// A range header whose bounds overflow `u32`; it closes the previous
    /// record but creates no nodes.
    OversizedRange,
}

/// A header plus everything its attribute lines set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Record {
    pub(crate) kind: RecordKind,
    /// For ranges this is the attribute template; `id` is only a label.
    pub(crate) node: Node,
    pub(crate) header_span: Span,
    pub(crate) outbound_span: Option<Span>,
}

#[derive(Debug, Default)]
pub(crate) struct RecordSplit {
    pub(crate) records: Vec<Record>,
    pub(crate) diagnostics: Vec<Diagnostic>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Header<'a> {
    Single { id: &'a str, name: &'a str },
    Range { start: u32, end: u32, name: &'a str },
    OversizedRange { label: &'a str, name: &'a str },
}

impl Header<'_> {
    fn into_record(self, header_span: Span) -> Record {
        let (kind, node) = match self {
            Self::Single { id, name } => (RecordKind::Single, Node::new(id, name)),
            Self::Range { start, end, name } => {
                let label = format!("{}-{}", format_node_id(start), format_node_id(end));
                (RecordKind::Range { start, end }, Node::new(label, name))
            }
            Self::OversizedRange { label, name } => {
                (RecordKind::OversizedRange, Node::new(label, name))
            }
        };
        Record {
            kind,
            node,
            header_span,
            outbound_span: None,
        }
    }
}

/// Group trimmed, non-blank lines into records.
///
/// A header closes the record in progress and opens a fresh one with default
/// attributes; every other line is an attribute of the open record.
pub(crate) fn split_records(input: &str) -> RecordSplit {
    let mut split = RecordSplit::default();
    let mut current: Option<Record> = None;

    for (index, raw_line) in input.lines().enumerate() {
        let line_number = index + 1;
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }
        let span = span_for(line_number, line);

        if let Some(header) = match_header(line) {
            if let Some(finished) = current.take() {
                trace!(id = %finished.node.id, "record finalized");
                split.records.push(finished);
            }
            current = Some(header.into_record(span));
            continue;
        }

        let Some(record) = current.as_mut() else {
            split.diagnostics.push(
                Diagnostic::hint(format!("Ignored text before the first player header: {line}"))
                    .with_span(span),
            );
            continue;
        };

        if !apply_attribute(record, line, span) {
            split.diagnostics.push(
                Diagnostic::hint(format!(
                    "Ignored unrecognized line in {}: {line}",
                    record.node.id
                ))
                .with_span(span),
            );
        }
    }

    if let Some(finished) = current {
        trace!(id = %finished.node.id, "record finalized");
        split.records.push(finished);
    }

    split
}

/// The range form wins when both forms could match.
fn match_header(line: &str) -> Option<Header<'_>> {
    if let Some(captures) = RANGE_HEADER.captures(line) {
        let name = captures.get(3)?.as_str();
        let start = captures.get(1)?.as_str().parse::<u32>();
        let end = captures.get(2)?.as_str().parse::<u32>();
        return Some(match (start, end) {
            (Ok(start), Ok(end)) => Header::Range { start, end, name },
            _ => Header::OversizedRange {
                label: line.split_once(": ").map_or(line, |(label, _)| label),
                name,
            },
        });
    }

    let captures = SINGLE_HEADER.captures(line)?;
    Some(Header::Single {
        id: captures.get(1)?.as_str(),
        name: captures.get(2)?.as_str(),
    })
}

/// Returns `false` when the line has no recognized prefix.
fn apply_attribute(record: &mut Record, line: &str, span: Span) -> bool {
    let node = &mut record.node;

    if let Some(value) = attribute_value(line, "- Segment:") {
        node.segment = value.to_string();
    } else if let Some(value) = attribute_value(line, "- Archetype:") {
        node.set_archetypes(Archetype::scan(value));
    } else if let Some(value) = attribute_value(line, "- Description:") {
        node.description = value.to_string();
    } else if let Some(value) = attribute_value(line, "- Market Size:") {
        node.market_size = value.to_string();
    } else if let Some(value) = attribute_value(line, "- Business Model:") {
        node.business_model = value.to_string();
    } else if let Some(value) = attribute_value(line, "- Outbound Connections:")
        .or_else(|| attribute_value(line, "- Connections:"))
    {
        node.outbound = node_references(value);
        record.outbound_span = Some(span);
    } else if let Some(value) = attribute_value(line, "- Inbound Connections:") {
        // Kept on the record for completeness; the deduplicator clears it.
        node.inbound = node_references(value);
    } else {
        return false;
    }

    true
}

fn attribute_value<'a>(line: &'a str, prefix: &str) -> Option<&'a str> {
    line.strip_prefix(prefix).map(str::trim)
}

/// Every `P<digits>` token in order of appearance.
pub(crate) fn node_references(text: &str) -> Vec<String> {
    NODE_REFERENCE
        .find_iter(text)
        .map(|found| found.as_str().to_string())
        .collect()
}

fn span_for(line_number: usize, line: &str) -> Span {
    Span::at_line(line_number, line.chars().count())
}
