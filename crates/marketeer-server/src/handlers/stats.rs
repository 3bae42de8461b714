//! Dataset statistics handlers
//!
//! Every request carries the dataset inline as CSV text. A fresh analyzer is
//! built per request, so its cache never outlives the call.

use std::sync::Arc;

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::{AppError, AppState};
use marketeer_core::stats::{
    CategoricalSummary, ColumnOutliers, ColumnStats, CorrelationResult, DataQuality,
};
use marketeer_core::{CorrelationMethod, Dataset, DatasetAnalyzer, OutlierMethod};

/// Request body shared by the statistics endpoints
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DatasetRequest {
    /// CSV text with a header row
    pub csv: Option<String>,
    /// Restrict descriptive/categorical output to these columns
    pub columns: Option<Vec<String>>,
    /// Outlier (`iqr`, `zscore`, `modified_zscore`) or correlation
    /// (`pearson`, `spearman`, `kendall`) method
    pub method: Option<String>,
    /// Score threshold for the z-score outlier methods
    pub threshold: Option<f64>,
    /// Report title
    pub title: Option<String>,
}

impl DatasetRequest {
    fn analyzer(&self, state: &AppState) -> Result<DatasetAnalyzer, AppError> {
        let csv = self
            .csv
            .as_deref()
            .filter(|c| !c.trim().is_empty())
            .ok_or_else(|| AppError::bad_request("Missing 'csv' field with dataset contents"))?;

        let dataset = Dataset::from_csv_str(csv).map_err(AppError::from_core)?;
        Ok(DatasetAnalyzer::with_data(
            state.analysis.statistics.clone(),
            dataset,
        ))
    }
}

#[derive(Debug, Serialize)]
pub struct DescriptiveResponse {
    pub quality: DataQuality,
    pub statistics: Vec<ColumnStats>,
}

#[derive(Debug, Serialize)]
pub struct OutliersResponse {
    pub method: OutlierMethod,
    pub columns: Vec<ColumnOutliers>,
}

/// POST /api/stats/descriptive - Summary statistics for numeric columns
pub async fn descriptive(
    State(state): State<Arc<AppState>>,
    Json(req): Json<DatasetRequest>,
) -> Result<Json<DescriptiveResponse>, AppError> {
    let mut analyzer = req.analyzer(&state)?;
    let statistics = analyzer
        .descriptive_statistics(req.columns.as_deref())
        .map_err(AppError::from_core)?;
    let quality = analyzer.data_quality().map_err(AppError::from_core)?;

    Ok(Json(DescriptiveResponse {
        quality,
        statistics,
    }))
}

/// POST /api/stats/outliers - Outlier row indices per numeric column
pub async fn outliers(
    State(state): State<Arc<AppState>>,
    Json(req): Json<DatasetRequest>,
) -> Result<Json<OutliersResponse>, AppError> {
    let method = match req.method.as_deref() {
        Some(m) => m.parse::<OutlierMethod>().map_err(AppError::from_core)?,
        None => state.analysis.statistics.default_outlier_method,
    };

    let mut analyzer = req.analyzer(&state)?;
    let columns = analyzer
        .detect_outliers(Some(method), req.threshold)
        .map_err(AppError::from_core)?;

    Ok(Json(OutliersResponse { method, columns }))
}

/// POST /api/stats/correlation - Correlation matrix and strong pairs
pub async fn correlation(
    State(state): State<Arc<AppState>>,
    Json(req): Json<DatasetRequest>,
) -> Result<Json<CorrelationResult>, AppError> {
    let method = match req.method.as_deref() {
        Some(m) => m.parse::<CorrelationMethod>().map_err(AppError::from_core)?,
        None => CorrelationMethod::default(),
    };

    let mut analyzer = req.analyzer(&state)?;
    let result = analyzer
        .correlation_analysis(method)
        .map_err(AppError::from_core)?;
    Ok(Json(result))
}

/// POST /api/stats/categorical - Frequency summaries for text columns
pub async fn categorical(
    State(state): State<Arc<AppState>>,
    Json(req): Json<DatasetRequest>,
) -> Result<Json<Vec<CategoricalSummary>>, AppError> {
    let mut analyzer = req.analyzer(&state)?;
    let summaries = analyzer
        .categorical_analysis(req.columns.as_deref())
        .map_err(AppError::from_core)?;
    Ok(Json(summaries))
}

/// POST /api/stats/report - Markdown report over the dataset
pub async fn dataset_report(
    State(state): State<Arc<AppState>>,
    Json(req): Json<DatasetRequest>,
) -> Result<Response, AppError> {
    let title = req.title.as_deref().unwrap_or("Dataset Report");
    let mut analyzer = req.analyzer(&state)?;
    let report = analyzer.report(title).map_err(AppError::from_core)?;

    Ok((
        [(header::CONTENT_TYPE, "text/markdown; charset=utf-8")],
        report,
    )
        .into_response())
}
