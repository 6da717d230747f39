//! Synthetic "typing" delay shown before an assistant reply appears.

use std::time::Duration;

use super::utf16_len;
use crate::attachments::AttachmentMeta;
use crate::options::{AgentOptions, Focus, ResponseLength};

pub const MIN_TYPING_DELAY_MS: u64 = 300;
pub const MAX_TYPING_DELAY_MS: u64 = 800;

const BASE_DELAY_MS: i64 = 320;
const PER_CHAR_MS: i64 = 7;
const TEXT_CAP_MS: i64 = 300;
const PER_ATTACHMENT_MS: i64 = 35;

/// Delay in milliseconds, always within
/// `[MIN_TYPING_DELAY_MS, MAX_TYPING_DELAY_MS]`.
pub fn compute_typing_delay(text: &str, options: &AgentOptions, attachments: &[AttachmentMeta]) -> u64 {
    let text_len = i64::try_from(utf16_len(text)).unwrap_or(i64::MAX);
    let length_factor = text_len.saturating_mul(PER_CHAR_MS).min(TEXT_CAP_MS);

    let response_adjustment = match options.response_length {
        ResponseLength::Short => -40,
        ResponseLength::Medium => 80,
        ResponseLength::Long => 180,
    };

    let attachment_count = i64::try_from(attachments.len()).unwrap_or(i64::MAX);
    let attachment_adjustment = attachment_count.saturating_mul(PER_ATTACHMENT_MS);

    let focus_adjustment = match options.focus {
        Focus::Overview => 0,
        Focus::Technical => 40,
        Focus::Actionable => 60,
    };

    let total = BASE_DELAY_MS
        .saturating_add(length_factor)
        .saturating_add(response_adjustment)
        .saturating_add(attachment_adjustment)
        .saturating_add(focus_adjustment);

    total.clamp(MIN_TYPING_DELAY_MS as i64, MAX_TYPING_DELAY_MS as i64) as u64
}

pub fn typing_delay(text: &str, options: &AgentOptions, attachments: &[AttachmentMeta]) -> Duration {
    Duration::from_millis(compute_typing_delay(text, options, attachments))
}
