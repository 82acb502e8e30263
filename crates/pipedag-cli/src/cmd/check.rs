//! Implementation of `pipedag check <file>`.
//!
//! Parses a pipeline submission and prints the same summary the HTTP
//! endpoint returns:
//! - node count (valid, de-duplicated ids)
//! - edge count (every submitted edge record)
//! - DAG status
//!
//! With `--verbose`, normalization diagnostics follow: records that were
//! dropped and how many nodes Kahn's algorithm could not process.
//!
//! Exit codes: 0 = success, 1 = cycle found under `--require-dag`,
//! 2 = parse failure.
use pipedag_core::{PipelineReport, analyze_detailed, parse_submission};
use serde_json::json;

use crate::OutputFormat;
use crate::error::CliError;

/// Runs the `check` command.
///
/// # Errors
///
/// Returns [`CliError::ParseFailed`] (exit code 2) if `content` is not a
/// valid submission, or [`CliError::NotADag`] (exit code 1) if
/// `require_dag` is set and the pipeline has a cycle.
pub fn run(
    content: &str,
    format: &OutputFormat,
    verbose: bool,
    require_dag: bool,
) -> Result<(), CliError> {
    let submission = parse_submission(content).map_err(|e| CliError::ParseFailed {
        detail: format!("line {}, column {}: {}", e.line, e.column, e.source),
    })?;

    let report = analyze_detailed(&submission);
    tracing::debug!(
        num_nodes = report.summary.num_nodes,
        num_edges = report.summary.num_edges,
        is_dag = report.summary.is_dag,
        "checked pipeline"
    );

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match format {
        OutputFormat::Human => print_human(&mut out, &report, verbose),
        OutputFormat::Json => print_json(&mut out, &report, verbose),
    }
    .map_err(|e| CliError::IoError {
        source: "stdout".to_owned(),
        detail: e.to_string(),
    })?;

    if require_dag && !report.summary.is_dag {
        return Err(CliError::NotADag);
    }
    Ok(())
}

/// Writes the summary as aligned key/value lines.
fn print_human<W: std::io::Write>(
    w: &mut W,
    report: &PipelineReport,
    verbose: bool,
) -> std::io::Result<()> {
    let summary = &report.summary;
    writeln!(w, "nodes:   {}", summary.num_nodes)?;
    writeln!(w, "edges:   {}", summary.num_edges)?;
    writeln!(w, "is_dag:  {}", if summary.is_dag { "yes" } else { "no" })?;

    if verbose {
        let stats = &report.stats;
        writeln!(w, "diagnostics:")?;
        writeln!(w, "  nodes_missing_id:        {}", stats.nodes_missing_id)?;
        writeln!(w, "  duplicate_node_ids:      {}", stats.duplicate_node_ids)?;
        writeln!(w, "  edges_missing_endpoint:  {}", stats.edges_missing_endpoint)?;
        writeln!(w, "  dangling_edges:          {}", stats.dangling_edges)?;
        writeln!(w, "  admissible_edges:        {}", report.admissible_edges)?;
        writeln!(
            w,
            "  unprocessed_nodes:       {}",
            report.outcome.unprocessed_count()
        )?;
    }
    Ok(())
}

/// Writes the summary as a single JSON object.
fn print_json<W: std::io::Write>(
    w: &mut W,
    report: &PipelineReport,
    verbose: bool,
) -> std::io::Result<()> {
    let summary = &report.summary;
    let mut value = json!({
        "num_nodes": summary.num_nodes,
        "num_edges": summary.num_edges,
        "is_dag": summary.is_dag,
    });

    if verbose {
        let mut diagnostics = serde_json::to_value(report.stats).map_err(std::io::Error::other)?;
        diagnostics["admissible_edges"] = json!(report.admissible_edges);
        diagnostics["unprocessed_nodes"] = json!(report.outcome.unprocessed_count());
        value["diagnostics"] = diagnostics;
    }

    let json = serde_json::to_string_pretty(&value).map_err(std::io::Error::other)?;
    writeln!(w, "{json}")
}
