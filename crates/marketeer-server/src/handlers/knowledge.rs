//! Health and knowledge base handlers

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;
use marketeer_core::KnowledgeBase;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// GET /api/health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// GET /api/knowledge - The reference data used by the insight generators
pub async fn get_knowledge(State(state): State<Arc<AppState>>) -> Json<KnowledgeBase> {
    Json(state.engine.knowledge().clone())
}
