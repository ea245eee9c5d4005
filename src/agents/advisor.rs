use std::sync::Arc;
use tracing::{info, warn};

use crate::agents::Agent;
use crate::error::AdvisorError;
use crate::llm::{ChatModel, ConversationMessage};
use crate::tools::Toolbox;

/// Result of one advice request
#[derive(Clone, Debug, PartialEq)]
pub enum Advice {
    Answer(String),
    Unanswered(UnansweredReason),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnansweredReason {
    /// The model stopped calling tools but produced no text
    EmptyReply,
    /// The model was still asking for tools after the last allowed round
    RoundLimit,
}

impl Advice {
    pub fn text(&self) -> Option<&str> {
        match self {
            Advice::Answer(text) => Some(text.as_str()),
            Advice::Unanswered(_) => None,
        }
    }
}

pub struct AdvisorAgent {
    llm: Arc<dyn ChatModel>,
    toolbox: Toolbox,
    max_tool_rounds: usize,
}

impl Agent for AdvisorAgent {
    fn name(&self) -> &str {
        "Advisor-Agent"
    }

    fn system_prompt(&self) -> &str {
        r#"You are a smart stock analyst who guides people over stock market decisions.
Your job is to decide what would be the best move for the user: BUY, SELL or HOLD.

Use the tools provided to look up the current price and the price history of the stocks involved.
Base your decision on that data.

In your answer:
- State the decision clearly (buy / sell / hold).
- Give the facts and figures that support it.
- Explain the reasoning that led you to the decision.
"#
    }
}

impl AdvisorAgent {
    pub fn new(llm: Arc<dyn ChatModel>, toolbox: Toolbox, max_tool_rounds: usize) -> Self {
        Self {
            llm,
            toolbox,
            max_tool_rounds,
        }
    }

    /// Let the model call tools until it answers in plain text.
    ///
    /// Every tool call of a turn is serviced before the model is asked again.
    /// At most `max_tool_rounds` rounds of tool calls are executed.
    pub async fn advise(&self, prompt: &str) -> Result<Advice, AdvisorError> {
        let mut transcript = self.transcript(prompt);
        let tools = self.toolbox.definitions();
        let mut rounds = 0;
        info!(
            "🤖 [AGENT] {} advising with {} (max tool rounds: {})",
            self.name(),
            self.llm.model(),
            self.max_tool_rounds
        );

        loop {
            let turn = self.llm.complete(&transcript, &tools).await?;

            if !turn.requests_tools() {
                let text = turn.content.unwrap_or_default();
                if text.trim().is_empty() {
                    warn!("⚠️ [AGENT] {} returned an empty reply", self.name());
                    return Ok(Advice::Unanswered(UnansweredReason::EmptyReply));
                }
                info!("🤖 [AGENT] {} answered after {} tool rounds", self.name(), rounds);
                return Ok(Advice::Answer(text));
            }

            if rounds == self.max_tool_rounds {
                warn!(
                    "⚠️ [AGENT] {} still requesting tools after {} rounds, giving up",
                    self.name(),
                    rounds
                );
                return Ok(Advice::Unanswered(UnansweredReason::RoundLimit));
            }
            rounds += 1;

            let calls = turn.tool_calls.clone();
            transcript.push(ConversationMessage::Ai(turn));

            for call in &calls {
                let output = self.toolbox.invoke(call).await?;
                transcript.push(ConversationMessage::tool_result(call.id.as_str(), output));
            }
        }
    }
}
