pub mod advisor;
pub mod ticker;

#[cfg(test)]
mod ticker_tests;

use crate::llm::ConversationMessage;

pub use advisor::{Advice, AdvisorAgent, UnansweredReason};
pub use ticker::TickerAgent;

pub trait Agent {
    fn name(&self) -> &str;
    fn system_prompt(&self) -> &str;

    /// Opening transcript: the agent's instructions followed by the user's query
    fn transcript(&self, query: &str) -> Vec<ConversationMessage> {
        vec![
            ConversationMessage::system(self.system_prompt()),
            ConversationMessage::human(query),
        ]
    }
}
