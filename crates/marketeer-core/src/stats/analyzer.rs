//! Dataset analyzer with a caller-owned result cache

use std::collections::HashMap;

use tracing::{debug, info};

use super::categorical::{categorical_analysis, CategoricalSummary};
use super::correlation::{correlation_analysis, CorrelationMethod, CorrelationResult};
use super::dataset::Dataset;
use super::descriptive::{descriptive_statistics, ColumnStats};
use super::outliers::{detect_outliers, ColumnOutliers, OutlierMethod};
use super::quality::{data_quality, dataset_insights, DataQuality};
use super::report::render_dataset_report;
use crate::config::StatisticsConfig;
use crate::error::{Error, Result};

#[derive(Debug, Clone)]
enum CachedAnalysis {
    Descriptive(Vec<ColumnStats>),
    Categorical(Vec<CategoricalSummary>),
    Correlation(CorrelationResult),
    Outliers(Vec<ColumnOutliers>),
}

/// Results keyed by analysis name and stringified arguments
///
/// Only valid for the dataset it was filled from; [`DatasetAnalyzer::set_data`]
/// clears it.
#[derive(Debug, Clone, Default)]
pub struct AnalysisCache {
    entries: HashMap<String, CachedAnalysis>,
}

impl AnalysisCache {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    fn get(&self, key: &str) -> Option<&CachedAnalysis> {
        let hit = self.entries.get(key);
        if hit.is_some() {
            debug!(key, "Analysis cache hit");
        }
        hit
    }

    fn insert(&mut self, key: String, value: CachedAnalysis) {
        self.entries.insert(key, value);
    }
}

/// One dataset plus the statistics thresholds and cache used to analyse it
#[derive(Debug, Clone, Default)]
pub struct DatasetAnalyzer {
    data: Option<Dataset>,
    config: StatisticsConfig,
    cache: AnalysisCache,
}

impl DatasetAnalyzer {
    pub fn new(config: StatisticsConfig) -> Self {
        Self {
            data: None,
            config,
            cache: AnalysisCache::default(),
        }
    }

    pub fn with_data(config: StatisticsConfig, data: Dataset) -> Self {
        let mut analyzer = Self::new(config);
        analyzer.set_data(data);
        analyzer
    }

    /// Replace the dataset and drop cached results
    pub fn set_data(&mut self, data: Dataset) {
        info!(
            rows = data.row_count(),
            columns = data.column_count(),
            "Dataset set for analysis"
        );
        self.data = Some(data);
        self.cache.clear();
    }

    pub fn config(&self) -> &StatisticsConfig {
        &self.config
    }

    pub fn cache(&self) -> &AnalysisCache {
        &self.cache
    }

    pub fn data(&self) -> Result<&Dataset> {
        self.data
            .as_ref()
            .ok_or_else(|| Error::MissingDataset("load a dataset before analysing".into()))
    }

    pub fn descriptive_statistics(&mut self, columns: Option<&[String]>) -> Result<Vec<ColumnStats>> {
        let key = format!("descriptive_{:?}", columns);
        if let Some(CachedAnalysis::Descriptive(stats)) = self.cache.get(&key) {
            return Ok(stats.clone());
        }

        let stats = descriptive_statistics(self.data()?, columns)?;
        self.cache.insert(key, CachedAnalysis::Descriptive(stats.clone()));
        Ok(stats)
    }

    pub fn categorical_analysis(
        &mut self,
        columns: Option<&[String]>,
    ) -> Result<Vec<CategoricalSummary>> {
        let key = format!("categorical_{:?}", columns);
        if let Some(CachedAnalysis::Categorical(summaries)) = self.cache.get(&key) {
            return Ok(summaries.clone());
        }

        let summaries = categorical_analysis(self.data()?, columns)?;
        self.cache
            .insert(key, CachedAnalysis::Categorical(summaries.clone()));
        Ok(summaries)
    }

    pub fn correlation_analysis(&mut self, method: CorrelationMethod) -> Result<CorrelationResult> {
        let key = format!("correlation_{}", method);
        if let Some(CachedAnalysis::Correlation(result)) = self.cache.get(&key) {
            return Ok(result.clone());
        }

        let result = correlation_analysis(self.data()?, method, self.config.correlation_threshold);
        self.cache
            .insert(key, CachedAnalysis::Correlation(result.clone()));
        Ok(result)
    }

    /// Outliers per numeric column; `None` uses the configured method and threshold
    pub fn detect_outliers(
        &mut self,
        method: Option<OutlierMethod>,
        threshold: Option<f64>,
    ) -> Result<Vec<ColumnOutliers>> {
        let method = method.unwrap_or(self.config.default_outlier_method);
        let threshold = threshold.unwrap_or_else(|| self.config.threshold_for(method));
        let key = format!("outliers_{}_{}", method, threshold);
        if let Some(CachedAnalysis::Outliers(result)) = self.cache.get(&key) {
            return Ok(result.clone());
        }

        let result = detect_outliers(self.data()?, method, Some(threshold));
        self.cache.insert(key, CachedAnalysis::Outliers(result.clone()));
        Ok(result)
    }

    pub fn data_quality(&self) -> Result<DataQuality> {
        Ok(data_quality(self.data()?))
    }

    pub fn insights(&self) -> Result<Vec<String>> {
        Ok(dataset_insights(self.data()?, &self.config))
    }

    /// Markdown report over the loaded dataset
    pub fn report(&mut self, title: &str) -> Result<String> {
        let stats = self.descriptive_statistics(None)?;
        let categorical = self.categorical_analysis(None)?;
        let correlations = self.correlation_analysis(CorrelationMethod::Pearson)?;
        let quality = self.data_quality()?;
        let insights = self.insights()?;
        Ok(render_dataset_report(
            title,
            &quality,
            &stats,
            &categorical,
            &correlations,
            &insights,
        ))
    }
}
