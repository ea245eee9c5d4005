//! Error types for the advisor service
//!
//! Every market-data lookup goes through [`FetchResult`]; everything that can
//! fail while serving a request ends up as an [`AdvisorError`].

use async_openai::error::OpenAIError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::NaiveDate;
use serde_json::json;
use thiserror::Error;

/// Market-data provider errors, shared by the quote and history fetchers
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("No market data found for {ticker}")]
    NotFound { ticker: String },

    #[error("Field {field} missing from market data for {ticker}")]
    MissingField { ticker: String, field: &'static str },

    #[error("Invalid date range: {start} is after {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    #[error("Invalid market data URL: {0}")]
    InvalidUrl(String),

    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Deserialization error: {0}")]
    Deserialization(#[from] serde_json::Error),
}

pub type FetchResult<T> = Result<T, FetchError>;

/// Top-level service errors
#[derive(Error, Debug)]
pub enum AdvisorError {
    #[error("LLM error: {0}")]
    Llm(#[from] OpenAIError),

    #[error("LLM returned no choices")]
    EmptyCompletion,

    #[error("LLM requested unknown tool: {name}")]
    UnknownTool { name: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl AdvisorError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AdvisorError::Llm(_)
            | AdvisorError::EmptyCompletion
            | AdvisorError::UnknownTool { .. } => StatusCode::BAD_GATEWAY,
            AdvisorError::Config(_) | AdvisorError::Io(_) | AdvisorError::Yaml(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AdvisorError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}
