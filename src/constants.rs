//! Application-wide constants
//!
//! Defaults, environment variable names and the fixed user-facing strings.

/// Environment variable names
pub mod env {
    pub const LLM_API_KEY: &str = "GROQ_API_KEY";
    pub const CONFIG_PATH: &str = "ADVISOR_CONFIG";
}

/// Configuration defaults
pub mod defaults {
    pub const CONFIG_PATH: &str = "config.yaml";

    pub const SERVER_HOST: &str = "0.0.0.0";
    pub const SERVER_PORT: u16 = 8080;

    /// Groq's OpenAI-compatible endpoint
    pub const LLM_BASE_URL: &str = "https://api.groq.com/openai/v1";
    pub const LLM_MODEL: &str = "llama-3.3-70b-versatile";

    pub const MARKET_BASE_URL: &str = "https://query1.finance.yahoo.com";
    pub const MARKET_USER_AGENT: &str = "Mozilla/5.0 (compatible; StockAdvisor/0.1)";
    pub const MARKET_TIMEOUT_SECS: u64 = 10;

    pub const MAX_TOOL_ROUNDS: usize = 4;
}

/// Date handling for advice requests and price history
pub mod dates {
    use chrono::NaiveDate;

    /// Earliest date the history tool falls back to (1900-01-01)
    pub fn earliest() -> NaiveDate {
        NaiveDate::from_ymd_opt(1900, 1, 1).unwrap_or(NaiveDate::MIN)
    }

    /// How a missing start date is rendered in the advice prompt
    pub const DEFAULT_START_LABEL: &str = "1900-1-1";
}

/// Plain-text responses of the price endpoint
pub mod messages {
    pub const INSUFFICIENT_INFORMATION: &str = "Insufficient Information found for the stock";
    pub const TICKER_NOT_FOUND: &str = "Ticker not found for the stock";
}

/// Sentinel the ticker prompt asks the model to return when nothing matches
pub const TICKER_NOT_FOUND_SENTINEL: &str = "None";
