//! Analysis session
//!
//! Ties the API client to the aggregation and highlighting logic: fetches the
//! model list once, picks a model, and turns one request into a report.

use serde::Serialize;
use tracing::{info, warn};

use crate::client::{ApiClient, ModelDescription};
use crate::config::Config;
use crate::error::{AnalyzeError, Result};
use crate::highlight::{self, HighlightMode, HighlightSpan};
use crate::sentiment::{self, Aggregate, TokenSentiment};

/// Everything produced by one analysis request
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub model: ModelDescription,
    /// The text as sent to the server
    pub text: String,
    pub tokens: Vec<TokenSentiment>,
    pub overall: Aggregate,
    pub highlights: Vec<HighlightSpan>,
}

/// A connected session with a fixed model list
pub struct Analyzer {
    client: ApiClient,
    models: Vec<ModelDescription>,
    mode: HighlightMode,
}

impl Analyzer {
    /// Connect to the configured server and load its models
    pub async fn connect(config: &Config) -> Result<Self> {
        let client = ApiClient::new(config)?;
        let models = client.fetch_models().await?;
        if models.is_empty() {
            warn!("{} lists no models", client.server_url());
        }
        Ok(Self::with_models(client, models, config.highlight_mode))
    }

    pub fn with_models(client: ApiClient, models: Vec<ModelDescription>, mode: HighlightMode) -> Self {
        Self { client, models, mode }
    }

    pub fn models(&self) -> &[ModelDescription] {
        &self.models
    }

    pub fn set_mode(&mut self, mode: HighlightMode) {
        self.mode = mode;
    }

    /// Pick a model by name (case-insensitive), or the first listed model
    pub fn select_model(&self, name: Option<&str>) -> Result<&ModelDescription> {
        match name {
            Some(name) => self
                .models
                .iter()
                .find(|m| m.name.eq_ignore_ascii_case(name))
                .ok_or_else(|| AnalyzeError::UnknownModel(name.to_string())),
            None => self.models.first().ok_or(AnalyzeError::NoModels),
        }
    }

    /// Score `text` with `model`, aggregate it and plan highlights
    pub async fn analyze(&self, model: &ModelDescription, text: &str) -> Result<AnalysisReport> {
        let text = text.trim();
        if text.is_empty() {
            return Err(AnalyzeError::EmptyText);
        }

        let tokens = self.client.analyze(model, text).await?;
        let overall = sentiment::aggregate(&tokens)?;
        let highlights = highlight::plan(text, &tokens, self.mode);

        info!(
            "Overall sentiment {} ({}), {} highlights",
            overall.score,
            overall.bucket,
            highlights.len()
        );

        Ok(AnalysisReport {
            model: model.clone(),
            text: text.to_string(),
            tokens,
            overall,
            highlights,
        })
    }
}
