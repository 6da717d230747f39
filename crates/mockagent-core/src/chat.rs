//! Message store.
//!
//! Appends the user's message immediately and the assistant's reply once the
//! synthetic typing delay has elapsed. At most one reply is pending; sending
//! again delivers it if its delay already ran out and drops it otherwise, so
//! two replies never race.

use std::time::Duration;

use chrono::Utc;
use tokio::time::Instant;

use crate::agent::{compute_typing_delay, generate_agent_reply, GeneratedAgentMessage};
use crate::attachments::AttachmentMeta;
use crate::options::AgentOptions;
use crate::state::{ChatMessage, MessageIds};

/// A generated reply waiting for its typing delay to run out
#[derive(Debug)]
struct PendingReply {
    reply: GeneratedAgentMessage,
    ready_at: Instant,
}

impl PendingReply {
    fn is_due(&self) -> bool {
        Instant::now() >= self.ready_at
    }
}

#[derive(Debug, Default)]
pub struct ChatStore {
    messages: Vec<ChatMessage>,
    ids: MessageIds,
    pending: Option<PendingReply>,
}

impl ChatStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn is_typing(&self) -> bool {
        self.pending.is_some()
    }

    /// Record a user turn and schedule the reply.
    ///
    /// Returns the typing delay, or `None` when `text` is blank.
    pub fn send_message(
        &mut self,
        text: &str,
        attachments: Vec<AttachmentMeta>,
        options: &AgentOptions,
    ) -> Option<Duration> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return None;
        }

        self.settle_pending();

        let delay_ms = compute_typing_delay(trimmed, options, &attachments);
        let reply = generate_agent_reply(trimmed, options, &attachments);

        let id = self.ids.next_id();
        self.messages
            .push(ChatMessage::user(id, trimmed, attachments, Utc::now()));

        tracing::info!(
            reply_type = %reply.reply_type,
            delay_ms,
            "scheduled assistant reply"
        );

        let delay = Duration::from_millis(delay_ms);
        self.pending = Some(PendingReply {
            reply,
            ready_at: Instant::now() + delay,
        });

        Some(delay)
    }

    /// Append the pending reply if its delay has elapsed.
    pub fn poll_reply(&mut self) -> Option<&ChatMessage> {
        if !self.pending.as_ref().is_some_and(PendingReply::is_due) {
            return None;
        }
        let pending = self.pending.take()?;
        self.append_assistant_message(pending.reply);
        self.messages.last()
    }

    /// Wait out the pending reply's delay (if any) and append it.
    pub async fn wait_for_reply(&mut self) -> Option<&ChatMessage> {
        let ready_at = self.pending.as_ref()?.ready_at;
        tokio::time::sleep_until(ready_at).await;
        self.poll_reply()
    }

    pub fn append_assistant_message(&mut self, generated: GeneratedAgentMessage) {
        let id = self.ids.next_id();
        self.messages
            .push(ChatMessage::assistant(id, generated, Utc::now()));
    }

    /// Drop every message, cancel a pending reply and restart ids.
    pub fn clear(&mut self) {
        self.cancel_pending();
        self.messages.clear();
        self.ids.reset();
    }

    /// Deliver a reply whose delay already ran out; cancel one still typing.
    fn settle_pending(&mut self) {
        if self.poll_reply().is_none() {
            self.cancel_pending();
        }
    }

    fn cancel_pending(&mut self) {
        if self.pending.take().is_some() {
            tracing::debug!("cancelled stale pending reply");
        }
    }
}
