//! Proposal handlers

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::Value;

use crate::{AppError, AppState};
use marketeer_core::render_markdown;

/// Query parameters for proposal generation
#[derive(Debug, Deserialize)]
pub struct ProposalQuery {
    /// `json` (default) or `markdown`
    pub format: Option<String>,
}

/// POST /api/proposals - Analyse an intake payload and assemble a proposal
///
/// With `?format=markdown` the rendered document is returned as text.
pub async fn create_proposal(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ProposalQuery>,
    Json(raw): Json<Value>,
) -> Result<Response, AppError> {
    let format = params.format.as_deref().unwrap_or("json");
    if !matches!(format, "json" | "markdown") {
        return Err(AppError::bad_request(&format!(
            "Unknown format: {}. Available: json, markdown",
            format
        )));
    }

    let profile = marketeer_core::build_profile(&raw).map_err(AppError::from_core)?;
    let analysis = state.engine.analyze(&profile);
    let proposal = state.proposals.generate_proposal(&profile, &analysis);

    if format == "markdown" {
        let markdown = render_markdown(&proposal);
        return Ok((
            [(header::CONTENT_TYPE, "text/markdown; charset=utf-8")],
            markdown,
        )
            .into_response());
    }

    Ok(Json(proposal).into_response())
}
