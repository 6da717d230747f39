//! UI-agnostic chat state types
//!
//! Shared by the terminal UI and the `reply` command; nothing here depends on
//! a UI framework.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::agent::{AgentReplyType, GeneratedAgentMessage};
use crate::attachments::AttachmentMeta;
use crate::options::AgentOptions;

/// A chat message in the conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: String,
    pub role: ChatRole,
    pub content: String,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<AttachmentMeta>,
    /// Set on assistant messages only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_type: Option<AgentReplyType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options_snapshot: Option<AgentOptions>,
}

/// The role of a chat message sender
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

impl ChatMessage {
    pub fn user(
        id: String,
        content: impl Into<String>,
        attachments: Vec<AttachmentMeta>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            role: ChatRole::User,
            content: content.into(),
            created_at,
            attachments,
            reply_type: None,
            options_snapshot: None,
        }
    }

    pub fn assistant(id: String, generated: GeneratedAgentMessage, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            role: generated.role,
            content: generated.content,
            created_at,
            attachments: Vec::new(),
            reply_type: Some(generated.reply_type),
            options_snapshot: Some(generated.options_snapshot),
        }
    }
}

/// Monotonic `msg_N` ids, owned by the message store
#[derive(Debug, Default)]
pub struct MessageIds {
    counter: u64,
}

impl MessageIds {
    pub fn next_id(&mut self) -> String {
        self.counter += 1;
        format!("msg_{}", self.counter)
    }

    pub fn reset(&mut self) {
        self.counter = 0;
    }
}
