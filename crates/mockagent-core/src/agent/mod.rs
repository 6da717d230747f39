//! Deterministic reply engine.
//!
//! `generate_agent_reply` classifies the input, extracts a subject, composes
//! Markdown fragments and assembles them into one assistant message. Nothing
//! here reads the clock or a random source.

pub mod compose;
pub mod delay;
pub mod reply;
pub mod rules;

use serde::{Deserialize, Serialize};

use crate::options::AgentOptions;
use crate::state::ChatRole;

pub use compose::{compose_reply, ReplyFragments};
pub use delay::{compute_typing_delay, typing_delay};
pub use reply::generate_agent_reply;
pub use rules::{detect_reply_type, extract_subject};

/// Shape of a generated reply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentReplyType {
    Summary,
    Bullets,
    Steps,
    Quip,
    Definition,
    Qa,
}

impl AgentReplyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AgentReplyType::Summary => "summary",
            AgentReplyType::Bullets => "bullets",
            AgentReplyType::Steps => "steps",
            AgentReplyType::Quip => "quip",
            AgentReplyType::Definition => "definition",
            AgentReplyType::Qa => "qa",
        }
    }
}

impl std::fmt::Display for AgentReplyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A reply before the message store stamps an id and timestamp on it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedAgentMessage {
    pub role: ChatRole,
    pub content: String,
    pub reply_type: AgentReplyType,
    pub options_snapshot: AgentOptions,
}

/// Length in UTF-16 code units; seeds and delays are defined over this count.
pub(crate) fn utf16_len(text: &str) -> usize {
    text.encode_utf16().count()
}
