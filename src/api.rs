use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::agents::{AdvisorAgent, TickerAgent};
use crate::config::AppConfig;
use crate::constants::{dates, messages};
use crate::error::AdvisorError;
use crate::llm::ChatModel;
use crate::market::types::deserialize_optional_date;
use crate::market::MarketData;
use crate::tools::Toolbox;

/// Read-only dependencies shared by every request
pub struct AppState {
    pub llm: Arc<dyn ChatModel>,
    pub market: Arc<dyn MarketData>,
    pub config: AppConfig,
}

#[derive(Clone, Debug, Deserialize)]
pub struct AdviceRequest {
    pub user_prompt: String,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub end_date: Option<NaiveDate>,
}

impl AdviceRequest {
    /// The user's prompt with the date window the model should consider.
    pub fn prompt(&self, today: NaiveDate) -> String {
        let start = self
            .start_date
            .map(|d| d.to_string())
            .unwrap_or_else(|| dates::DEFAULT_START_LABEL.to_string());
        let end = self.end_date.unwrap_or(today);
        format!("{}\nConsider data from {} to {}", self.user_prompt, start, end)
    }
}

#[derive(Debug, Serialize)]
pub struct AdviceResponse {
    pub advice: Option<String>,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/price/{share}", get(get_share_price))
        .route("/advice", post(get_advice))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run_server(state: Arc<AppState>) -> Result<(), AdvisorError> {
    let addr = state.config.server.bind_addr();
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("🌐 [API] Server listening on {}", addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("🌐 [API] Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("⚠️ Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("🌐 [API] Shutdown signal received");
}

/// Render a price the way it is quoted: raw value, never fewer than one decimal.
pub fn format_price(price: f64, currency: &str) -> String {
    if price.is_finite() && price.fract() == 0.0 {
        format!("{:.1} {}", price, currency)
    } else {
        format!("{} {}", price, currency)
    }
}

async fn get_share_price(
    State(state): State<Arc<AppState>>,
    Path(share): Path<String>,
) -> Result<Response, AdvisorError> {
    info!("🌐 [API] GET /price/{}", share);

    let Some(ticker) = TickerAgent.resolve(state.llm.as_ref(), &share).await? else {
        warn!("⚠️ [API] Ticker not found for '{}'", share);
        return Ok((StatusCode::NOT_FOUND, messages::TICKER_NOT_FOUND).into_response());
    };

    match state.market.quote(&ticker).await {
        Ok(quote) => Ok(format_price(quote.price, &quote.currency).into_response()),
        Err(e) => {
            warn!("⚠️ [API] Quote lookup failed for {}: {}", ticker, e);
            Ok(messages::INSUFFICIENT_INFORMATION.into_response())
        }
    }
}

async fn get_advice(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AdviceRequest>,
) -> Result<Json<AdviceResponse>, AdvisorError> {
    info!("🌐 [API] POST /advice");

    let prompt = request.prompt(Local::now().date_naive());
    let advisor = AdvisorAgent::new(
        state.llm.clone(),
        Toolbox::new(state.market.clone()),
        state.config.advisor.max_tool_rounds,
    );

    let advice = advisor.advise(&prompt).await?;
    Ok(Json(AdviceResponse {
        advice: advice.text().map(str::to_string),
    }))
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}
