#![forbid(unsafe_code)]

//! ecomap CLI - convert the player catalogue into a force-graph JSON document.
//!
//! Running with no arguments reads `raw_data.txt` from the working directory
//! and writes `src/data.json`. The only flags control log verbosity.

use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use eco_core::{ConvertConfig, Diagnostic, DiagnosticSeverity};
use eco_parser::convert_file;
use tracing::{debug, info, warn};

/// ecomap CLI - convert the player catalogue into a force-graph JSON document.
#[derive(Debug, Parser)]
#[command(
    name = "eco-cli",
    version,
    about = "Convert the player catalogue into a force-graph JSON document",
    long_about = "Reads raw_data.txt, expands ID ranges, collapses duplicate players,\n\
        reconciles outbound/inbound references and writes src/data.json."
)]
struct Cli {
    /// Enable verbose logging (can be repeated for more detail: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all output except errors and the summary line
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose, cli.quiet);

    cmd_convert(&ConvertConfig::default())
}

fn init_tracing(verbose: u8, quiet: bool) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(log_filter(verbose, quiet))
        .without_time()
        .try_init();
}

fn log_filter(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

fn cmd_convert(config: &ConvertConfig) -> Result<()> {
    let start = Instant::now();

    let report = convert_file(config).with_context(|| {
        format!(
            "Failed to convert {} into {}",
            config.input.display(),
            config.output.display()
        )
    })?;

    for diagnostic in &report.diagnostics {
        log_diagnostic(diagnostic);
    }
    info!("Wrote graph document to: {}", report.output.display());

    debug!(
        "Converted in {:.2}ms",
        start.elapsed().as_secs_f64() * 1000.0
    );
    println!(
        "Parsed {} nodes and {} links.",
        report.node_count, report.link_count
    );

    Ok(())
}

fn log_diagnostic(diagnostic: &Diagnostic) {
    let category = diagnostic.category.as_str();
    match diagnostic.severity {
        DiagnosticSeverity::Warning => warn!(category, "Warning: {diagnostic}"),
        DiagnosticSeverity::Info => info!(category, "{diagnostic}"),
        DiagnosticSeverity::Hint => debug!(category, "{diagnostic}"),
    }
}
