//! Sentiment API client
//!
//! Thin wrapper over `reqwest` for the two endpoints the service exposes:
//! the model list and the per-model analysis endpoint.

use std::time::Duration;

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::Config;
use crate::error::{AnalyzeError, Result};
use crate::sentiment::TokenSentiment;

/// A model offered by the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelDescription {
    #[serde(rename = "Name", alias = "name")]
    pub name: String,
    /// Path relative to the server URL
    #[serde(rename = "Url", alias = "url")]
    pub url: String,
}

#[derive(Serialize)]
struct AnalyzeRequest<'a> {
    text: &'a str,
}

/// HTTP client bound to one server
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    server_url: String,
    models_path: String,
    timeout_secs: u64,
}

impl ApiClient {
    /// Build a client from the configured server and timeout
    pub fn new(config: &Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(AnalyzeError::Client)?;

        Ok(Self {
            http,
            server_url: config.server_url.trim_end_matches('/').to_string(),
            models_path: config.models_path.clone(),
            timeout_secs: config.timeout_secs,
        })
    }

    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    /// Fetch the list of models the server offers
    pub async fn fetch_models(&self) -> Result<Vec<ModelDescription>> {
        let url = self.endpoint(&self.models_path);
        info!("Fetching models from {}", url);

        let request = self.http.get(&url).header(reqwest::header::ACCEPT, "application/json");
        let models: Vec<ModelDescription> = self.send_json(&url, request).await?;

        debug!("Server offers {} models", models.len());
        Ok(models)
    }

    /// Submit `text` to `model` and return the per-token scores
    pub async fn analyze(&self, model: &ModelDescription, text: &str) -> Result<Vec<TokenSentiment>> {
        let url = self.endpoint(&model.url);
        info!("Analyzing {} chars with model {}", text.chars().count(), model.name);

        let request = self.http.post(&url).json(&AnalyzeRequest { text });
        let tokens: Vec<TokenSentiment> = self.send_json(&url, request).await?;

        debug!("Received {} scored tokens", tokens.len());
        Ok(tokens)
    }

    fn endpoint(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.server_url, path)
        } else {
            format!("{}/{}", self.server_url, path)
        }
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        url: &str,
        request: reqwest::RequestBuilder,
    ) -> Result<T> {
        let response = request.send().await.map_err(|e| self.transport_error(url, e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| self.transport_error(url, e))?;

        if status != StatusCode::OK {
            return Err(AnalyzeError::Status {
                url: url.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|e| AnalyzeError::MalformedResponse {
            url: url.to_string(),
            source: e,
        })
    }

    fn transport_error(&self, url: &str, error: reqwest::Error) -> AnalyzeError {
        if error.is_timeout() {
            AnalyzeError::Timeout {
                url: url.to_string(),
                secs: self.timeout_secs,
            }
        } else {
            AnalyzeError::Unreachable {
                url: url.to_string(),
                source: error,
            }
        }
    }
}
