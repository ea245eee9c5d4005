//! In-process stand-ins for the chat model and the market-data provider.

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use crate::error::{AdvisorError, FetchError, FetchResult};
use crate::llm::{AssistantTurn, ChatModel, ConversationMessage, ToolCall, ToolDefinition};
use crate::market::{DateRange, MarketData, PriceHistory, PricePoint, Quote};

/// Replays queued turns and records every transcript it was sent.
#[derive(Default)]
pub struct ScriptedModel {
    turns: Mutex<VecDeque<Result<AssistantTurn, AdvisorError>>>,
    pub calls: Mutex<Vec<(Vec<ConversationMessage>, Vec<ToolDefinition>)>>,
}

impl ScriptedModel {
    pub fn new(turns: Vec<AssistantTurn>) -> Self {
        Self {
            turns: Mutex::new(turns.into_iter().map(Ok).collect()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: AdvisorError) -> Self {
        Self {
            turns: Mutex::new(VecDeque::from([Err(error)])),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn transcript(&self, index: usize) -> Vec<ConversationMessage> {
        self.calls.lock().unwrap()[index].0.clone()
    }

    pub fn tools(&self, index: usize) -> Vec<ToolDefinition> {
        self.calls.lock().unwrap()[index].1.clone()
    }
}

#[async_trait]
impl ChatModel for ScriptedModel {
    fn model(&self) -> &str {
        "scripted"
    }

    async fn complete(
        &self,
        transcript: &[ConversationMessage],
        tools: &[ToolDefinition],
    ) -> Result<AssistantTurn, AdvisorError> {
        self.calls
            .lock()
            .unwrap()
            .push((transcript.to_vec(), tools.to_vec()));
        self.turns
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(AdvisorError::EmptyCompletion))
    }
}

/// Serves fixed quotes and histories; unknown tickers are `NotFound`.
#[derive(Default)]
pub struct FakeMarket {
    pub quotes: HashMap<String, Quote>,
    pub histories: HashMap<String, Vec<PricePoint>>,
    pub requested_ranges: Mutex<Vec<(String, DateRange)>>,
}

impl FakeMarket {
    pub fn with_quote(mut self, ticker: &str, price: f64, currency: &str) -> Self {
        self.quotes.insert(
            ticker.to_string(),
            Quote {
                ticker: ticker.to_string(),
                price,
                currency: currency.to_string(),
            },
        );
        self
    }

    pub fn with_history(mut self, ticker: &str, points: Vec<PricePoint>) -> Self {
        self.histories.insert(ticker.to_string(), points);
        self
    }
}

#[async_trait]
impl MarketData for FakeMarket {
    fn name(&self) -> &'static str {
        "fake"
    }

    async fn quote(&self, ticker: &str) -> FetchResult<Quote> {
        self.quotes.get(ticker).cloned().ok_or(FetchError::NotFound {
            ticker: ticker.to_string(),
        })
    }

    async fn history(&self, ticker: &str, range: DateRange) -> FetchResult<PriceHistory> {
        self.requested_ranges
            .lock()
            .unwrap()
            .push((ticker.to_string(), range));
        let points = self.histories.get(ticker).ok_or(FetchError::NotFound {
            ticker: ticker.to_string(),
        })?;
        Ok(PriceHistory::new(
            ticker,
            points
                .iter()
                .filter(|p| p.date >= range.start && p.date < range.end)
                .cloned()
                .collect(),
        ))
    }
}

pub fn tool_call(id: &str, name: &str, arguments: &str) -> ToolCall {
    ToolCall {
        id: id.to_string(),
        name: name.to_string(),
        arguments: arguments.to_string(),
    }
}
