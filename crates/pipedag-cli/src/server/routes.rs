//! Route handlers.
use axum::Json;
use axum::extract::rejection::JsonRejection;
use pipedag_core::{PipelineSubmission, PipelineSummary, analyze_detailed};
use serde_json::{Value, json};

use super::error::ApiError;

/// `GET /` liveness check.
pub async fn ping() -> Json<Value> {
    Json(json!({ "Ping": "Pong" }))
}

/// `POST /pipelines/parse`: counts nodes and edges and reports DAG status.
///
/// Dangling and half-drawn edges are ignored for the DAG verdict but still
/// counted in `num_edges`.
pub async fn parse_pipeline(
    payload: Result<Json<PipelineSubmission>, JsonRejection>,
) -> Result<Json<PipelineSummary>, ApiError> {
    let Json(submission) = payload?;
    let report = analyze_detailed(&submission);

    tracing::info!(
        num_nodes = report.summary.num_nodes,
        num_edges = report.summary.num_edges,
        admissible_edges = report.admissible_edges,
        is_dag = report.summary.is_dag,
        "parsed pipeline"
    );
    if !report.stats.is_clean() {
        tracing::debug!(stats = ?report.stats, "ignored part of the submission");
    }

    Ok(Json(report.summary))
}
