//! Yahoo Finance chart API client
//!
//! Both lookups use the public v8 chart endpoint: the quote comes from the
//! chart metadata, the history from the daily bars.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveTime};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

use super::{DateRange, MarketData, PriceHistory, PricePoint, Quote};
use crate::config::MarketConfig;
use crate::error::{FetchError, FetchResult};

#[derive(Clone)]
pub struct YahooFinanceClient {
    client: Client,
    base_url: Url,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChartResponse {
    pub chart: Chart,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Chart {
    pub result: Option<Vec<ChartResult>>,
    pub error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChartError {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChartResult {
    pub meta: ChartMeta,
    #[serde(default)]
    pub timestamp: Vec<i64>,
    #[serde(default)]
    pub indicators: Indicators,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ChartMeta {
    pub currency: Option<String>,
    pub regular_market_price: Option<f64>,
    /// Exchange offset from UTC in seconds
    #[serde(default)]
    pub gmtoffset: i64,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Indicators {
    #[serde(default)]
    pub quote: Vec<IndicatorQuote>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct IndicatorQuote {
    #[serde(default)]
    pub close: Vec<Option<f64>>,
}

impl YahooFinanceClient {
    pub fn new(config: &MarketConfig) -> FetchResult<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| FetchError::InvalidUrl(format!("{}: {}", config.base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(FetchError::InvalidUrl(config.base_url.clone()));
        }

        Ok(Self { client, base_url })
    }

    /// `{base}/v8/finance/chart/{ticker}`, the ticker always a single encoded segment
    pub(crate) fn chart_url(&self, ticker: &str) -> FetchResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| FetchError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(["v8", "finance", "chart", ticker]);
        Ok(url)
    }

    async fn fetch_chart(&self, ticker: &str, query: &[(&str, String)]) -> FetchResult<ChartResponse> {
        let url = self.chart_url(ticker)?;
        debug!("📈 [MARKET] GET {} {:?}", url, query);

        let resp = self.client.get(url).query(query).send().await?;
        let status = resp.status();
        let body = resp.text().await?;

        if status == StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound {
                ticker: ticker.to_string(),
            });
        }
        if !status.is_success() {
            return Err(FetchError::Http {
                status: status.as_u16(),
                body,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl MarketData for YahooFinanceClient {
    fn name(&self) -> &'static str {
        "yahoo"
    }

    async fn quote(&self, ticker: &str) -> FetchResult<Quote> {
        info!("📈 [MARKET] Fetching quote for {}", ticker);
        let chart = self
            .fetch_chart(
                ticker,
                &[("interval", "1d".to_string()), ("range", "1d".to_string())],
            )
            .await?;
        quote_from_chart(ticker, chart)
    }

    async fn history(&self, ticker: &str, range: DateRange) -> FetchResult<PriceHistory> {
        info!(
            "📈 [MARKET] Fetching history for {} ({} to {})",
            ticker, range.start, range.end
        );
        let chart = self
            .fetch_chart(
                ticker,
                &[
                    ("interval", "1d".to_string()),
                    ("period1", unix_midnight(range.start).to_string()),
                    ("period2", unix_midnight(range.end).to_string()),
                ],
            )
            .await?;
        history_from_chart(ticker, chart)
    }
}

fn unix_midnight(date: NaiveDate) -> i64 {
    date.and_time(NaiveTime::MIN).and_utc().timestamp()
}

fn first_result(ticker: &str, response: ChartResponse) -> FetchResult<ChartResult> {
    let not_found = || FetchError::NotFound {
        ticker: ticker.to_string(),
    };

    if let Some(error) = response.chart.error {
        debug!(
            "📈 [MARKET] Chart error for {}: {} {}",
            ticker, error.code, error.description
        );
        return Err(not_found());
    }

    response
        .chart
        .result
        .and_then(|results| results.into_iter().next())
        .ok_or_else(not_found)
}

pub(crate) fn quote_from_chart(ticker: &str, response: ChartResponse) -> FetchResult<Quote> {
    let meta = first_result(ticker, response)?.meta;

    let price = meta.regular_market_price.ok_or_else(|| FetchError::MissingField {
        ticker: ticker.to_string(),
        field: "regularMarketPrice",
    })?;
    let currency = meta.currency.ok_or_else(|| FetchError::MissingField {
        ticker: ticker.to_string(),
        field: "currency",
    })?;

    Ok(Quote {
        ticker: ticker.to_string(),
        price,
        currency,
    })
}

pub(crate) fn history_from_chart(ticker: &str, response: ChartResponse) -> FetchResult<PriceHistory> {
    let result = first_result(ticker, response)?;
    let offset = result.meta.gmtoffset;

    let closes = result
        .indicators
        .quote
        .into_iter()
        .next()
        .map(|q| q.close)
        .unwrap_or_default();

    // Null closes are market holidays or halted sessions
    let points = result
        .timestamp
        .iter()
        .zip(closes)
        .filter_map(|(ts, close)| {
            let close = close?;
            let date = DateTime::from_timestamp(ts + offset, 0)?.date_naive();
            Some(PricePoint { date, close })
        })
        .collect();

    Ok(PriceHistory::new(ticker, points))
}
