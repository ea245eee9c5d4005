#[cfg(test)]
mod ticker_tests {
    use crate::agents::ticker::parse_ticker_reply;
    use crate::agents::TickerAgent;
    use crate::error::AdvisorError;
    use crate::llm::{AssistantTurn, ConversationMessage};
    use crate::test_support::ScriptedModel;

    #[test]
    fn test_parse_plain_ticker() {
        assert_eq!(parse_ticker_reply("AAPL"), Some("AAPL".to_string()));
        assert_eq!(parse_ticker_reply("  MSFT\n"), Some("MSFT".to_string()));
    }

    #[test]
    fn test_parse_keeps_regional_suffix() {
        assert_eq!(
            parse_ticker_reply("RELIANCE.NS"),
            Some("RELIANCE.NS".to_string())
        );
    }

    #[test]
    fn test_parse_sentinel() {
        assert_eq!(parse_ticker_reply("None"), None);
        assert_eq!(parse_ticker_reply("none\n"), None);
        assert_eq!(parse_ticker_reply(""), None);
    }

    #[test]
    fn test_parse_passes_through_unvalidated_text() {
        // Not a ticker shape, but the reply is used as-is
        assert_eq!(
            parse_ticker_reply("The ticker is AAPL"),
            Some("The ticker is AAPL".to_string())
        );
    }

    #[tokio::test]
    async fn test_resolve_sends_one_system_and_one_human_message() {
        let llm = ScriptedModel::new(vec![AssistantTurn::text("AAPL")]);

        let ticker = TickerAgent.resolve(&llm, "Apple").await.unwrap();
        assert_eq!(ticker.as_deref(), Some("AAPL"));

        assert_eq!(llm.call_count(), 1);
        let transcript = llm.transcript(0);
        assert_eq!(transcript.len(), 2);
        assert!(matches!(transcript[0], ConversationMessage::System { .. }));
        assert_eq!(
            transcript[1],
            ConversationMessage::human("What is the ticker of Apple")
        );
        assert!(llm.tools(0).is_empty());
    }

    #[tokio::test]
    async fn test_resolve_unknown_share() {
        let llm = ScriptedModel::new(vec![AssistantTurn::text("None")]);

        let ticker = TickerAgent.resolve(&llm, "Qwertyzzz Holdings").await.unwrap();
        assert_eq!(ticker, None);
    }

    #[tokio::test]
    async fn test_resolve_propagates_llm_errors() {
        let llm = ScriptedModel::failing(AdvisorError::EmptyCompletion);

        let err = TickerAgent.resolve(&llm, "Apple").await.unwrap_err();
        assert!(matches!(err, AdvisorError::EmptyCompletion));
    }
}
