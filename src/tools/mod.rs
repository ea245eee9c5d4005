//! Market-data tools the advice agent can call.


use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::{info, warn};

use crate::error::{AdvisorError, FetchError};
use crate::llm::{ToolCall, ToolDefinition};
use crate::market::types::deserialize_optional_date;
use crate::market::{DateRange, MarketData};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToolKind {
    GetPrice,
    GetPriceHistory,
}

impl ToolKind {
    pub const ALL: [ToolKind; 2] = [ToolKind::GetPrice, ToolKind::GetPriceHistory];

    pub fn name(&self) -> &'static str {
        match self {
            ToolKind::GetPrice => "get_price",
            ToolKind::GetPriceHistory => "get_price_history",
        }
    }

    /// Case-insensitive lookup; models sometimes capitalize function names.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.to_lowercase();
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    pub fn definition(&self) -> ToolDefinition {
        let (description, parameters) = match self {
            ToolKind::GetPrice => (
                "Get the price of the stock from the ticker",
                json!({
                    "type": "object",
                    "properties": {
                        "ticker": {
                            "type": "string",
                            "description": "Exchange ticker, e.g. AAPL or RELIANCE.NS"
                        }
                    },
                    "required": ["ticker"]
                }),
            ),
            ToolKind::GetPriceHistory => (
                "Get the price history of the stock from the ticker",
                json!({
                    "type": "object",
                    "properties": {
                        "ticker": {
                            "type": "string",
                            "description": "Exchange ticker, e.g. AAPL or RELIANCE.NS"
                        },
                        "start_date": {
                            "type": "string",
                            "description": "First day of the window, YYYY-MM-DD"
                        },
                        "end_date": {
                            "type": "string",
                            "description": "Day after the last day of the window, YYYY-MM-DD"
                        }
                    },
                    "required": ["ticker"]
                }),
            ),
        };

        ToolDefinition {
            name: self.name().to_string(),
            description: description.to_string(),
            parameters,
        }
    }
}

#[derive(Debug, Deserialize)]
struct PriceArgs {
    ticker: String,
}

#[derive(Debug, Deserialize)]
struct HistoryArgs {
    ticker: String,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    start_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    end_date: Option<NaiveDate>,
}

#[derive(Clone)]
pub struct Toolbox {
    market: Arc<dyn MarketData>,
}

impl Toolbox {
    pub fn new(market: Arc<dyn MarketData>) -> Self {
        Self { market }
    }

    pub fn definitions(&self) -> Vec<ToolDefinition> {
        ToolKind::ALL.iter().map(ToolKind::definition).collect()
    }

    /// Run one tool call and render its output for the transcript.
    ///
    /// Bad arguments and provider failures are reported back to the model as
    /// `{"error": ...}`; only an unknown tool name is an error for the caller.
    pub async fn invoke(&self, call: &ToolCall) -> Result<String, AdvisorError> {
        let kind = ToolKind::from_name(&call.name).ok_or_else(|| AdvisorError::UnknownTool {
            name: call.name.clone(),
        })?;

        info!("🔧 [TOOL] {} ({}) args={}", kind.name(), call.id, call.arguments);

        let output = match kind {
            ToolKind::GetPrice => self.get_price(&call.arguments).await,
            ToolKind::GetPriceHistory => self.get_price_history(&call.arguments).await,
        };

        Ok(output.unwrap_or_else(|e| {
            warn!("⚠️ [TOOL] {} failed: {}", kind.name(), e);
            json!({ "error": e.to_string() }).to_string()
        }))
    }

    async fn get_price(&self, arguments: &str) -> Result<String, ToolFailure> {
        let args: PriceArgs = parse_arguments(arguments)?;
        let quote = self.market.quote(&args.ticker).await?;
        Ok(serde_json::to_string(&quote)?)
    }

    async fn get_price_history(&self, arguments: &str) -> Result<String, ToolFailure> {
        let args: HistoryArgs = parse_arguments(arguments)?;
        let range = DateRange::with_defaults(args.start_date, args.end_date)?;
        let history = self.market.history(&args.ticker, range).await?;
        Ok(serde_json::to_string(&history)?)
    }
}

/// Failures that are reported back to the model instead of aborting the request
#[derive(thiserror::Error, Debug)]
enum ToolFailure {
    #[error("invalid arguments: {0}")]
    Arguments(serde_json::Error),

    #[error("could not encode output: {0}")]
    Encode(#[from] serde_json::Error),

    #[error(transparent)]
    Fetch(#[from] FetchError),
}

fn parse_arguments<T: for<'de> Deserialize<'de>>(arguments: &str) -> Result<T, ToolFailure> {
    // Some models send an empty string instead of `{}`
    let arguments = if arguments.trim().is_empty() { "{}" } else { arguments };
    serde_json::from_str::<T>(arguments).map_err(ToolFailure::Arguments)
}
