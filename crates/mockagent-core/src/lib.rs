pub mod agent;
pub mod attachments;
pub mod chat;
pub mod config;
pub mod format;
pub mod hashing;
pub mod options;
pub mod state;

// Re-export main types for convenience
pub use agent::{
    compute_typing_delay, generate_agent_reply, typing_delay, AgentReplyType,
    GeneratedAgentMessage,
};
pub use attachments::{validate_attachments, AttachmentError, AttachmentIds, AttachmentMeta};
pub use chat::ChatStore;
pub use config::{Config, Theme};
pub use hashing::{variant_index, VariantError};
pub use options::{AgentOptions, Focus, ModelChoice, OptionField, ResponseLength, Tone};
pub use state::{ChatMessage, ChatRole};
