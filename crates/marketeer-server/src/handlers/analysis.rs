//! Client profile and analysis handlers

use std::sync::Arc;

use axum::{extract::State, Json};
use serde_json::Value;
use tracing::debug;

use crate::{AppError, AppState};
use marketeer_core::{ClientAnalysis, ClientProfile};

/// POST /api/profile - Normalise an intake payload into a client profile
pub async fn build_profile(Json(raw): Json<Value>) -> Result<Json<ClientProfile>, AppError> {
    let profile = marketeer_core::build_profile(&raw).map_err(AppError::from_core)?;
    Ok(Json(profile))
}

/// POST /api/analyze - Full analysis of an intake payload
///
/// Accepts the same payload as `/api/profile`.
pub async fn analyze(
    State(state): State<Arc<AppState>>,
    Json(raw): Json<Value>,
) -> Result<Json<ClientAnalysis>, AppError> {
    let profile = marketeer_core::build_profile(&raw).map_err(AppError::from_core)?;
    let analysis = state.engine.analyze(&profile);

    debug!(
        client = %profile.name,
        insights = analysis.insights.len(),
        "Analysis served"
    );
    Ok(Json(analysis))
}
