pub mod types;
pub mod yahoo;


use async_trait::async_trait;

use crate::error::FetchResult;

pub use types::{DateRange, PriceHistory, PricePoint, Quote};
pub use yahoo::YahooFinanceClient;

#[async_trait]
pub trait MarketData: Send + Sync {
    fn name(&self) -> &'static str;

    async fn quote(&self, ticker: &str) -> FetchResult<Quote>;

    async fn history(&self, ticker: &str, range: DateRange) -> FetchResult<PriceHistory>;
}
