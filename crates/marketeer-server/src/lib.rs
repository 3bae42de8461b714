//! Marketeer Web Server
//!
//! Axum-based JSON API over the Marketeer core:
//! - Intake payload → client profile
//! - Client analysis and proposal generation
//! - Descriptive statistics, outliers, correlation and reports for CSV datasets
//!
//! The core is synchronous and request-scoped, so handlers call it directly
//! and share nothing but the read-only engine.

use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info};

use marketeer_core::{AnalysisConfig, MarketingAnalysisEngine, ProposalGenerator};

mod handlers;

/// Maximum accepted request body (CSV uploads are sent inline)
pub const MAX_BODY_SIZE: usize = 10 * 1024 * 1024;

/// Server configuration
#[derive(Clone, Default)]
pub struct ServerConfig {
    /// Allowed CORS origins (empty = same-origin only)
    pub allowed_origins: Vec<String>,
}

/// Shared application state
pub struct AppState {
    pub engine: MarketingAnalysisEngine,
    pub proposals: ProposalGenerator,
    pub analysis: AnalysisConfig,
}

impl AppState {
    pub fn new(analysis: AnalysisConfig) -> Self {
        Self {
            engine: MarketingAnalysisEngine::new(),
            proposals: ProposalGenerator::new(analysis.proposal.clone()),
            analysis,
        }
    }
}

/// Create the application router
pub fn create_router(analysis: AnalysisConfig, config: ServerConfig) -> Router {
    let state = Arc::new(AppState::new(analysis));

    let api_routes = Router::new()
        .route("/health", get(handlers::health))
        .route("/knowledge", get(handlers::get_knowledge))
        // Client workflow
        .route("/profile", post(handlers::build_profile))
        .route("/analyze", post(handlers::analyze))
        .route("/proposals", post(handlers::create_proposal))
        // Dataset statistics
        .route("/stats/descriptive", post(handlers::descriptive))
        .route("/stats/outliers", post(handlers::outliers))
        .route("/stats/correlation", post(handlers::correlation))
        .route("/stats/categorical", post(handlers::categorical))
        .route("/stats/report", post(handlers::dataset_report));

    let cors = if config.allowed_origins.is_empty() {
        CorsLayer::new()
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE])
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE])
    };

    Router::new()
        .nest("/api", api_routes)
        .with_state(state)
        .layer(axum::extract::DefaultBodyLimit::max(MAX_BODY_SIZE))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Start the server
pub async fn serve(host: &str, port: u16, analysis: AnalysisConfig) -> anyhow::Result<()> {
    serve_with_config(host, port, analysis, ServerConfig::default()).await
}

/// Start the server with custom configuration
pub async fn serve_with_config(
    host: &str,
    port: u16,
    analysis: AnalysisConfig,
    config: ServerConfig,
) -> anyhow::Result<()> {
    let app = create_router(analysis, config);
    let addr = format!("{}:{}", host, port);

    info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// ============================================================================
// Error Handling
// ============================================================================

/// Application error type with proper HTTP status codes
pub struct AppError {
    status: StatusCode,
    message: String,
    internal: Option<anyhow::Error>,
}

impl AppError {
    pub fn bad_request(msg: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.to_string(),
            internal: None,
        }
    }

    /// Map a core error: bad input is the caller's fault, everything else is ours
    pub fn from_core(err: marketeer_core::Error) -> Self {
        use marketeer_core::Error;

        match err {
            Error::Csv(_)
            | Error::Json(_)
            | Error::InvalidData(_)
            | Error::MissingDataset(_)
            | Error::UnknownMethod(_) => Self::bad_request(&err.to_string()),
            Error::Io(_) | Error::Config(_) => err.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log the full internal error if present
        if let Some(err) = &self.internal {
            error!(error = %err, "Internal error");
        }

        let body = Json(serde_json::json!({
            "error": self.message
        }));

        (self.status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        let err = err.into();
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            // Return generic message to client
            message: "An internal error occurred".to_string(),
            // Keep full error for logging
            internal: Some(err),
        }
    }
}

#[cfg(test)]
mod tests;
