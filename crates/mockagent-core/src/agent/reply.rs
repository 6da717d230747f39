use super::compose::compose_reply;
use super::rules::{detect_reply_type, extract_subject};
use super::GeneratedAgentMessage;
use crate::attachments::AttachmentMeta;
use crate::options::AgentOptions;
use crate::state::ChatRole;

/// Generate the assistant reply for one user turn.
///
/// Sections are joined by blank lines in a fixed order: greeting, body,
/// attachment note, learning tip (as a quote), closing, model signature.
pub fn generate_agent_reply(
    input: &str,
    options: &AgentOptions,
    attachments: &[AttachmentMeta],
) -> GeneratedAgentMessage {
    let reply_type = detect_reply_type(input, options);
    let subject = extract_subject(input);
    let fragments = compose_reply(reply_type, &subject, input, options, attachments);

    tracing::debug!(%reply_type, subject = %subject, attachments = attachments.len(), "composed reply");

    let learning_tip = fragments.learning_tip.map(|tip| format!("> {tip}"));

    let sections: Vec<String> = [
        fragments.header,
        Some(fragments.body),
        fragments.attachment_note,
        learning_tip,
        fragments.footer,
        Some(fragments.model_signature),
    ]
    .into_iter()
    .flatten()
    .filter(|section| !section.is_empty())
    .collect();

    GeneratedAgentMessage {
        role: ChatRole::Assistant,
        content: sections.join("\n\n").trim().to_string(),
        reply_type,
        options_snapshot: *options,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::AgentReplyType;
    use crate::options::{ModelChoice, ResponseLength, Tone};

    #[test]
    fn test_section_order() {
        let options = AgentOptions {
            model: ModelChoice::GptTutor,
            tone: Tone::Formal,
            ..AgentOptions::default()
        };
        let attachments = vec![AttachmentMeta::new("a1", "notes.txt", 12)];
        let reply = generate_agent_reply("Is the roadmap ready for handoff?", &options, &attachments);

        let content = &reply.content;
        let q = content.find("**Q:**").unwrap();
        let note = content.find("> I noticed 1 attachment (txt).").unwrap();
        let tip = content.find("> Learning tip:").unwrap();
        let signature = content.find("_Model gpt-tutor").unwrap();
        assert!(q < note && note < tip && tip < signature);
        assert!(content.ends_with("_Model gpt-tutor highlights learning cues for you._"));
        assert_eq!(reply.role, ChatRole::Assistant);
    }

    #[test]
    fn test_snapshot_is_a_copy() {
        let mut options = AgentOptions {
            response_length: ResponseLength::Long,
            ..AgentOptions::default()
        };
        let reply = generate_agent_reply("How to launch the onboarding flow?", &options, &[]);
        options.response_length = ResponseLength::Short;
        assert_eq!(reply.options_snapshot.response_length, ResponseLength::Long);
        assert_eq!(reply.reply_type, AgentReplyType::Steps);
    }

    #[test]
    fn test_blank_input_still_replies() {
        let reply = generate_agent_reply("   ", &AgentOptions::default(), &[]);
        assert_eq!(reply.reply_type, AgentReplyType::Summary);
        assert!(reply.content.contains("your request"));
        assert!(!reply.content.starts_with('\n'));
    }
}
