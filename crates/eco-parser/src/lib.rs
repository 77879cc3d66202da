#![forbid(unsafe_code)]

//! Player catalogue parser.
//!
//! Turns the line-oriented catalogue text into a [`GraphDocument`]:
//!
//! 1. split lines into header-led records
//! 2. expand `Pstart-Pend` range records into one node per ID
//! 3. collapse repeated IDs, last declaration wins
//! 4. derive links and inbound sets from outbound declarations

mod convert;
mod expand;
mod graph_builder;
mod reconcile;
mod records;

use eco_core::{Diagnostic, DiagnosticCounts, GraphDocument};
use serde::Serialize;
use serde_json::json;
use tracing::debug;

pub use convert::{ConvertReport, convert_file};

use crate::graph_builder::GraphBuilder;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseResult {
    pub document: GraphDocument,
    pub diagnostics: Vec<Diagnostic>,
}

impl ParseResult {
    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.is_warning())
    }
}

/// Parse a whole catalogue. Never fails; recoverable problems become diagnostics.
#[must_use]
pub fn parse(input: &str) -> ParseResult {
    let split = records::split_records(input);
    let mut diagnostics = split.diagnostics;
    let expanded = expand::expand_records(split.records, &mut diagnostics);
    if expanded.is_empty() {
        diagnostics.push(Diagnostic::info(
            "Catalogue produced no players; emitting an empty graph",
        ));
    }

    let mut builder = GraphBuilder::new(diagnostics);
    for pending in expanded {
        builder.insert(pending);
    }
    debug!(nodes = builder.node_count(), "deduplicated player table");

    builder.finish()
}

#[must_use]
pub fn summary_json(parsed: &ParseResult) -> String {
    let counts = DiagnosticCounts::tally(&parsed.diagnostics);
    json!({
        "node_count": parsed.document.nodes.len(),
        "link_count": parsed.document.links.len(),
        "warning_count": counts.warnings,
        "hint_count": counts.hints,
        "diagnostic_count": counts.total(),
        "warnings": parsed.warnings().map(ToString::to_string).collect::<Vec<_>>(),
    })
    .to_string()
}
