use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use stock_advisor::llm::LLMClient;
use stock_advisor::market::{MarketData, YahooFinanceClient};
use stock_advisor::{api::run_server, AppConfig, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    dotenvy::dotenv().ok();

    // Setup Logging
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting Stock Advisor...");

    // Load Configuration
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            error!("❌ {}", e);
            return Err(e.into());
        }
    };
    info!(
        "Loaded Configuration: server={:?} market={:?} advisor={:?}",
        config.server, config.market, config.advisor
    );

    // Initialize Clients
    info!("Initializing AI Client...");
    let api_key = config.llm.api_key.clone().unwrap_or_default();
    let base_url = config.llm.base_url.clone();
    if let Some(url) = &base_url {
        info!("Using OpenAI-compatible Base URL: {}", url);
    }

    let model = config.llm.model.clone();
    info!("Using LLM Model: {}", model);

    let llm = LLMClient::new(api_key, base_url, model);
    let market = YahooFinanceClient::new(&config.market)?;
    info!("Using market data provider: {}", market.name());

    let app_state = Arc::new(AppState {
        llm: Arc::new(llm),
        market: Arc::new(market),
        config,
    });

    // Start API Server
    info!("Initializing API Server...");
    run_server(app_state).await?;

    Ok(())
}
