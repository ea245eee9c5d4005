use tracing::info;

use crate::agents::Agent;
use crate::constants::TICKER_NOT_FOUND_SENTINEL;
use crate::error::AdvisorError;
use crate::llm::ChatModel;

pub struct TickerAgent;

impl Agent for TickerAgent {
    fn name(&self) -> &str {
        "Ticker-Resolver"
    }

    fn system_prompt(&self) -> &str {
        r#"You are a well informed stock market analyst who knows the stocks listed on every exchange in the world.
Your job is to return only the ticker of the stock name asked for by the user.

RULES:
1. Output ONLY the ticker code used on the exchange. No name, no explanation, no supporting text.
2. The ticker must be usable directly with the Yahoo Finance API.
3. If there are several listings, return the most reliable and most used one.
4. Keep regional exchange suffixes, e.g. RELIANCE.NS or SHOP.TO.
5. If the name is weird, non existent or no ticker can be found, return None.
"#
    }
}

impl TickerAgent {
    /// Ask the model for the ticker of `share`. `None` when the model gives up.
    ///
    /// The reply is not validated beyond trimming: whatever the model answers
    /// is used as the ticker.
    pub async fn resolve(&self, llm: &dyn ChatModel, share: &str) -> Result<Option<String>, AdvisorError> {
        info!("🤖 [AGENT] {} resolving '{}' (Model: {})", self.name(), share, llm.model());

        let transcript = self.transcript(&format!("What is the ticker of {}", share));
        let turn = llm.complete(&transcript, &[]).await?;

        let ticker = parse_ticker_reply(turn.content.as_deref().unwrap_or_default());
        info!("🤖 [AGENT] {} -> {:?}", share, ticker);
        Ok(ticker)
    }
}

pub(crate) fn parse_ticker_reply(reply: &str) -> Option<String> {
    let ticker = reply.trim();
    if ticker.is_empty() || ticker.eq_ignore_ascii_case(TICKER_NOT_FOUND_SENTINEL) {
        None
    } else {
        Some(ticker.to_string())
    }
}
