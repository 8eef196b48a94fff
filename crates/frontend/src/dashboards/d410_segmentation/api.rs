use super::sync::query_key::{AnalysisId, CustomerKey};
use crate::shared::api_utils::{api_base, join_url};
use async_trait::async_trait;
use contracts::dashboards::d410_segmentation::{CustomerRow, ErrorResponse, Marketing, Overview};
use gloo_net::http::Request;
use serde::de::DeserializeOwned;
use thiserror::Error;

const API_PREFIX: &str = "/api/analysis";

/// Ошибки обращения к сервису анализа
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("HTTP error {status}: {detail}")]
    Http { status: u16, detail: String },

    #[error("Request failed: {0}")]
    Network(String),

    #[error("Failed to parse response: {0}")]
    Decode(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

/// Read contract of the remote analysis service
#[async_trait(?Send)]
pub trait AnalysisApi {
    async fn overview(&self, analysis_id: &AnalysisId) -> Result<Overview, ApiError>;

    async fn marketing(&self, analysis_id: &AnalysisId) -> Result<Marketing, ApiError>;

    /// One page of customers; an empty list when the filter matches nothing
    async fn customers(&self, key: &CustomerKey) -> Result<Vec<CustomerRow>, ApiError>;
}

/// [`AnalysisApi`] over HTTP (gloo-net / browser fetch)
#[derive(Debug, Clone)]
pub struct HttpAnalysisApi {
    base_url: String,
}

impl HttpAnalysisApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Base URL from the loaded config
    pub fn from_config() -> Self {
        Self::new(api_base())
    }

    fn analysis_url(&self, analysis_id: &AnalysisId, resource: &str) -> String {
        let path = format!(
            "{}/{}/{}",
            API_PREFIX,
            urlencoding::encode(analysis_id.as_str()),
            resource
        );
        join_url(&self.base_url, &path)
    }

    fn customers_url(&self, key: &CustomerKey) -> Result<String, ApiError> {
        let query = serde_qs::to_string(&key.to_query())
            .map_err(|e| ApiError::InvalidRequest(e.to_string()))?;
        Ok(format!(
            "{}?{}",
            self.analysis_url(&key.analysis_id, "customers"),
            query
        ))
    }
}

#[async_trait(?Send)]
impl AnalysisApi for HttpAnalysisApi {
    async fn overview(&self, analysis_id: &AnalysisId) -> Result<Overview, ApiError> {
        get_json(&self.analysis_url(analysis_id, "overview")).await
    }

    async fn marketing(&self, analysis_id: &AnalysisId) -> Result<Marketing, ApiError> {
        get_json(&self.analysis_url(analysis_id, "marketing")).await
    }

    async fn customers(&self, key: &CustomerKey) -> Result<Vec<CustomerRow>, ApiError> {
        let url = self.customers_url(key)?;
        get_json(&url).await
    }
}

async fn get_json<T: DeserializeOwned>(url: &str) -> Result<T, ApiError> {
    let response = Request::get(url)
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;

    if !response.ok() {
        let status = response.status();
        let detail = response
            .json::<ErrorResponse>()
            .await
            .ok()
            .and_then(|body| body.detail)
            .unwrap_or_else(|| format!("Errore {}", status));
        return Err(status_error(status, detail));
    }

    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

fn status_error(status: u16, detail: String) -> ApiError {
    if status == 404 {
        ApiError::NotFound(detail)
    } else {
        ApiError::Http { status, detail }
    }
}
