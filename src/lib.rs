//! Stock Advisor - LLM-backed stock price and buy/sell/hold advice service
//!
//! This library resolves company names to tickers, fetches quotes and price
//! history, and runs a tool-calling advice agent behind a small HTTP API.

pub mod agents;
pub mod api;
pub mod config;
pub mod constants;
pub mod error;
pub mod llm;
pub mod market;
pub mod tools;

// Re-export commonly used types
pub use api::{router, AppState};
pub use config::AppConfig;
pub use error::{AdvisorError, FetchError, FetchResult};

#[cfg(test)]
mod config_tests;
#[cfg(test)]
mod test_support;
