//! Intent classification and subject extraction.

use lazy_static::lazy_static;
use regex::Regex;

use super::AgentReplyType;
use crate::options::{AgentOptions, Focus};

const SUBJECT_FALLBACK: &str = "your request";

const IMPERATIVE_VERBS: [&str; 7] = ["build", "create", "design", "draft", "write", "plan", "explain"];

lazy_static! {
    static ref TRAILING_QUESTION_MARKS: Regex = Regex::new(r"\?+$").expect("valid regex");
    static ref LEADING_PROMPT: Regex =
        Regex::new(r"(?i)^(how to|how do i|what is|define|explain)\s+").expect("valid regex");
}

fn normalise(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Only the first whitespace-delimited token is considered.
fn is_imperative_start(lowered: &str) -> bool {
    lowered
        .split_whitespace()
        .next()
        .is_some_and(|first| IMPERATIVE_VERBS.contains(&first))
}

/// Pick the reply shape for `text`. First matching rule wins.
pub fn detect_reply_type(text: &str, options: &AgentOptions) -> AgentReplyType {
    let lowered = normalise(text);

    if lowered.is_empty() {
        return AgentReplyType::Summary;
    }

    if lowered.starts_with("what is")
        || lowered.contains("define ")
        || lowered.contains("definition")
        || options.focus == Focus::Technical
    {
        return AgentReplyType::Definition;
    }

    if lowered.starts_with("how to")
        || lowered.starts_with("how do i")
        || lowered.contains(" step ")
        || lowered.contains("guide")
        || options.focus == Focus::Actionable
        || is_imperative_start(&lowered)
    {
        return AgentReplyType::Steps;
    }

    // Checked ahead of the question mark so "List any questions?" stays a list
    if lowered.contains("list") || lowered.contains("ideas") {
        return AgentReplyType::Bullets;
    }

    if lowered.contains('?') {
        return AgentReplyType::Qa;
    }

    if lowered.split_whitespace().count() <= 4 {
        return AgentReplyType::Quip;
    }

    AgentReplyType::Summary
}

/// Display-ready subject phrase for `text`; never empty.
pub fn extract_subject(text: &str) -> String {
    let cleaned = TRAILING_QUESTION_MARKS.replace(text, "");
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return SUBJECT_FALLBACK.to_string();
    }

    let without_lead = LEADING_PROMPT.replace(cleaned, "");
    let without_lead = without_lead.trim();

    let mut chars = without_lead.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => SUBJECT_FALLBACK.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::ModelChoice;

    fn options() -> AgentOptions {
        AgentOptions::default()
    }

    fn with_focus(focus: Focus) -> AgentOptions {
        AgentOptions {
            focus,
            ..AgentOptions::default()
        }
    }

    #[test]
    fn test_empty_and_whitespace_are_summary() {
        assert_eq!(detect_reply_type("", &options()), AgentReplyType::Summary);
        assert_eq!(detect_reply_type("   \n\t ", &options()), AgentReplyType::Summary);
    }

    #[test]
    fn test_definition_rules() {
        assert_eq!(
            detect_reply_type("What is a sprint retrospective?", &options()),
            AgentReplyType::Definition
        );
        assert_eq!(
            detect_reply_type("please define velocity for me", &options()),
            AgentReplyType::Definition
        );
        assert_eq!(
            detect_reply_type("I need the definition of done", &options()),
            AgentReplyType::Definition
        );
        // Technical focus overrides everything except empty input
        assert_eq!(
            detect_reply_type("Thanks!", &with_focus(Focus::Technical)),
            AgentReplyType::Definition
        );
    }

    #[test]
    fn test_step_rules() {
        for input in [
            "How to launch the onboarding flow?",
            "how do I reset the board",
            "walk me through it step by step",
            "Any guide for interviews",
            "Draft a release note",
            "  EXPLAIN caching to me",
        ] {
            assert_eq!(detect_reply_type(input, &options()), AgentReplyType::Steps, "{input}");
        }
        assert_eq!(
            detect_reply_type("Thanks!", &with_focus(Focus::Actionable)),
            AgentReplyType::Steps
        );
    }

    #[test]
    fn test_imperative_only_checks_first_word() {
        assert_eq!(
            detect_reply_type("we should build a shed this summer somehow", &options()),
            AgentReplyType::Summary
        );
        assert_eq!(detect_reply_type("builder", &options()), AgentReplyType::Quip);
    }

    #[test]
    fn test_bullets_beat_questions_and_quips() {
        assert_eq!(
            detect_reply_type("List ideas for the launch checklist", &options()),
            AgentReplyType::Bullets
        );
        assert_eq!(detect_reply_type("List any questions?", &options()), AgentReplyType::Bullets);
        assert_eq!(detect_reply_type("ideas", &options()), AgentReplyType::Bullets);
    }

    #[test]
    fn test_question_quip_and_summary() {
        assert_eq!(
            detect_reply_type("Is the roadmap ready for handoff?", &options()),
            AgentReplyType::Qa
        );
        assert_eq!(detect_reply_type("Thanks!", &options()), AgentReplyType::Quip);
        assert_eq!(detect_reply_type("one two three four", &options()), AgentReplyType::Quip);
        assert_eq!(
            detect_reply_type("Share guidance on leading a remote workshop", &options()),
            AgentReplyType::Summary
        );
    }

    #[test]
    fn test_model_and_tone_do_not_affect_classification() {
        let mut opts = options();
        opts.model = ModelChoice::GptTutor;
        assert_eq!(detect_reply_type("Thanks!", &opts), AgentReplyType::Quip);
    }

    #[test]
    fn test_unicode_and_punctuation_do_not_panic() {
        for input in ["¿¡!!?", "🚀🚀", "ÇA VA?", "...", "ǅ"] {
            let _ = detect_reply_type(input, &options());
            assert!(!extract_subject(input).is_empty());
        }
    }

    #[test]
    fn test_extract_subject() {
        assert_eq!(extract_subject("How to launch the onboarding flow?"), "Launch the onboarding flow");
        assert_eq!(extract_subject("what is a sprint retrospective???"), "A sprint retrospective");
        assert_eq!(extract_subject("DEFINE   latency"), "Latency");
        assert_eq!(extract_subject("Thanks!"), "Thanks!");
        assert_eq!(extract_subject("ünicode first"), "Ünicode first");
    }

    #[test]
    fn test_extract_subject_fallback() {
        assert_eq!(extract_subject(""), "your request");
        assert_eq!(extract_subject("   ???"), "your request");
        // A bare prefix has no trailing whitespace left after trimming
        assert_eq!(extract_subject("how to "), "How to");
        assert_eq!(extract_subject("explain"), "Explain");
    }
}
