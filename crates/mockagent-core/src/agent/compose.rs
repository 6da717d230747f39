//! Markdown fragment builders, one per reply type.
//!
//! Every phrase pool is a fixed, ordered list. Selection goes through
//! [`pick_variant`] so identical inputs always produce identical text.

use lazy_static::lazy_static;
use regex::Regex;

use super::{utf16_len, AgentReplyType};
use crate::attachments::AttachmentMeta;
use crate::hashing::pick_variant;
use crate::options::{AgentOptions, Focus, ModelChoice, ResponseLength, Tone};

const FRIENDLY_GREETINGS: [&str; 3] = ["Hey there!", "Hi! Great question.", "Hello! Happy to help."];

const FRIENDLY_CLOSINGS: [&str; 3] = [
    "Let me know what else you need.",
    "I’m here if you want to dig deeper.",
    "Feel free to ask for more detail anytime.",
];

const FORMAL_GREETINGS: [&str; 3] = ["Greetings.", "Hello.", "Good day."];

const FORMAL_CLOSINGS: [&str; 3] = [
    "Please advise if further detail is required.",
    "Do not hesitate to follow up for clarification.",
    "I remain available for any additional questions.",
];

const LEARNING_TIPS: [&str; 3] = [
    "Learning tip: try summarising the answer in your own words to refine understanding.",
    "Learning tip: teach this concept to someone else—it cements the knowledge.",
    "Learning tip: jot the key steps on a sticky note for quick recall later.",
];

const BULLET_POOL: [&str; 6] = [
    "- Context: note the audience and constraints.",
    "- Signals: establish what success should look like.",
    "- Risks: list known blockers and mitigation tactics.",
    "- Next checkpoint: schedule a review to adjust course.",
    "- Resource hint: prep a quick reference doc.",
    "- Reflection: capture lessons learned for reuse.",
];

const STEP_POOL: [&str; 6] = [
    "Break the work into manageable milestones.",
    "Assign ownership and deadlines for each milestone.",
    "Validate early progress with a quick review.",
    "Document insights in a lightweight tracker.",
    "Plan a retrospective to capture improvements.",
    "Share the outcome with stakeholders succinctly.",
];

lazy_static! {
    static ref FILLER_WORDS: Regex = Regex::new(r"(?i)\b(and|that)\b").expect("valid regex");
    static ref SPACE_RUNS: Regex = Regex::new(r" {2,}").expect("valid regex");
    static ref BLANK_RUNS: Regex = Regex::new(r"\n{3,}").expect("valid regex");
    static ref SENTENCE_GAPS: Regex = Regex::new(r"([.!?])[ \t]{2,}").expect("valid regex");
}

/// Pieces of one reply before assembly
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyFragments {
    pub header: Option<String>,
    pub body: String,
    pub footer: Option<String>,
    pub attachment_note: Option<String>,
    pub model_signature: String,
    pub learning_tip: Option<String>,
}

fn transition(model: ModelChoice) -> &'static str {
    match model {
        ModelChoice::GptMini => "Here is the concise breakdown:",
        ModelChoice::GptProse => "Here’s a cohesive walkthrough:",
        ModelChoice::GptTutor => "Let’s unpack this together:",
    }
}

fn model_signature(model: ModelChoice) -> &'static str {
    match model {
        ModelChoice::GptMini => "_Model gpt-mini prioritises succinct, direct guidance._",
        ModelChoice::GptProse => "_Model gpt-prose leans into smooth narrative phrasing._",
        ModelChoice::GptTutor => "_Model gpt-tutor highlights learning cues for you._",
    }
}

fn summary_detail_count(length: ResponseLength) -> usize {
    match length {
        ResponseLength::Short => 2,
        ResponseLength::Medium => 4,
        ResponseLength::Long => 6,
    }
}

/// Number of bullet or step items kept from a pool, including the lead item
fn list_limit(length: ResponseLength) -> usize {
    match length {
        ResponseLength::Short => 3,
        ResponseLength::Medium => 5,
        ResponseLength::Long => 7,
    }
}

fn pick(options: &AgentOptions, pool: &[&'static str], seed: &str) -> &'static str {
    let seed = format!("{seed}-{}-{}", options.model.as_str(), options.tone.as_str());
    pick_variant(pool, &seed)
}

fn greeting(options: &AgentOptions, seed: &str) -> Option<String> {
    let pool: &[&'static str] = match options.tone {
        Tone::Friendly => &FRIENDLY_GREETINGS,
        Tone::Formal => &FORMAL_GREETINGS,
        Tone::Neutral => return None,
    };
    Some(pick(options, pool, &format!("greet-{seed}")).to_string())
}

fn closing(options: &AgentOptions, seed: &str) -> Option<String> {
    let pool: &[&'static str] = match options.tone {
        Tone::Friendly => &FRIENDLY_CLOSINGS,
        Tone::Formal => &FORMAL_CLOSINGS,
        Tone::Neutral => return None,
    };
    Some(pick(options, pool, &format!("close-{seed}")).to_string())
}

fn learning_tip(options: &AgentOptions, seed: &str) -> Option<String> {
    if options.model != ModelChoice::GptTutor {
        return None;
    }
    Some(pick(options, &LEARNING_TIPS, &format!("tip-{seed}")).to_string())
}

fn focus_line(focus: Focus, length: ResponseLength) -> String {
    let emphasis = if length == ResponseLength::Long {
        "Detailed focus"
    } else {
        "Focus"
    };
    let detail = match focus {
        Focus::Overview => "a clear overview you can skim quickly.",
        Focus::Technical => "technical nuance so implementation is safer.",
        Focus::Actionable => "concrete moves you can take next.",
    };
    format!("{emphasis}: {detail}")
}

/// `> I noticed 2 attachments (pdf, png). I'll keep them in mind.`
pub fn attachment_line(attachments: &[AttachmentMeta]) -> Option<String> {
    if attachments.is_empty() {
        return None;
    }

    let mut extensions: Vec<String> = Vec::new();
    for attachment in attachments {
        let ext = attachment.extension.to_lowercase();
        if !ext.is_empty() && !extensions.contains(&ext) {
            extensions.push(ext);
        }
    }

    let noun = if attachments.len() == 1 {
        "attachment"
    } else {
        "attachments"
    };
    let suffix = if extensions.is_empty() {
        String::new()
    } else {
        format!(" ({})", extensions.join(", "))
    };

    Some(format!(
        "> I noticed {} {noun}{suffix}. I'll keep them in mind.",
        attachments.len()
    ))
}

/// Per-model post-processing of the body text.
///
/// gpt-mini drops the filler words "and"/"that", gpt-tutor tightens the gap
/// after sentence endings, gpt-prose is left as written.
fn apply_model_voice(model: ModelChoice, body: String) -> String {
    match model {
        ModelChoice::GptMini => {
            let condensed = body
                .split('\n')
                .map(|line| {
                    let stripped = FILLER_WORDS.replace_all(line, "");
                    SPACE_RUNS.replace_all(&stripped, " ").trim().to_string()
                })
                .collect::<Vec<_>>()
                .join("\n");
            BLANK_RUNS.replace_all(&condensed, "\n\n").into_owned()
        }
        ModelChoice::GptTutor => SENTENCE_GAPS.replace_all(&body, "$1 ").into_owned(),
        ModelChoice::GptProse => body,
    }
}

fn build_summary(subject: &str, options: &AgentOptions, transition: &str, focus_line: &str) -> String {
    let length = options.response_length;
    let highlight = if length == ResponseLength::Long {
        "Key takeaways"
    } else {
        "Highlights"
    };

    let mut segments = vec![
        format!("**{highlight} on {subject}:**"),
        format!(
            "{transition} {subject} boils down to {} essentials you can act on swiftly.",
            summary_detail_count(length)
        ),
    ];

    // One sentence for short, two for medium, three for long
    match length {
        ResponseLength::Short => {}
        ResponseLength::Medium => {
            segments.push("Anchor the first move on the outcome that matters most.".to_string());
        }
        ResponseLength::Long => {
            segments.push("Anchor the first move on the outcome that matters most.".to_string());
            segments.push("Revisit the plan once real signals start coming in.".to_string());
        }
    }

    segments.push(focus_line.to_string());

    if length != ResponseLength::Short {
        let (follow_through, cadence) = if length == ResponseLength::Long {
            ("a structured follow-through", "few days")
        } else {
            ("a focused session", "week")
        };
        segments.push(format!("• Impact: expect measurable outcomes after {follow_through}."));
        segments.push(format!("• Watch-outs: track progress at least once every {cadence}."));
    }

    segments.join("\n\n")
}

fn build_bullets(subject: &str, options: &AgentOptions, transition: &str, focus_line: &str) -> String {
    let limit = list_limit(options.response_length);

    let mut sections = vec![
        format!("{transition} Here’s a quick-hit list for {subject}:"),
        format!("- {focus_line}"),
        format!("- Core idea: clarify the objective of {subject}."),
    ];
    sections.extend(BULLET_POOL.iter().take(limit - 1).map(|line| line.to_string()));

    sections.join("\n")
}

fn build_steps(subject: &str, options: &AgentOptions, transition: &str, focus_line: &str) -> String {
    let limit = list_limit(options.response_length);

    let first = format!("Gather context about {subject} and confirm the goal.");
    let steps = std::iter::once(first.as_str())
        .chain(STEP_POOL.iter().copied())
        .take(limit);

    let mut sections = vec![
        format!("{transition} Follow these steps for {subject}:"),
        format!("_{focus_line}_"),
    ];
    sections.extend(
        steps
            .enumerate()
            .map(|(index, step)| format!("{}. {step}", index + 1)),
    );

    sections.join("\n")
}

fn build_quip(subject: &str, options: &AgentOptions) -> String {
    let flavour = if options.tone == Tone::Friendly {
        format!("Looks like {subject} just asked for a high-five.")
    } else {
        format!("Consider {subject} handled with minimal fuss.")
    };
    let sign_off = if options.model == ModelChoice::GptMini {
        "Done and dusted."
    } else {
        "All set on my end."
    };
    format!("{flavour} {sign_off}")
}

fn build_definition(subject: &str, options: &AgentOptions, transition: &str, focus_line: &str) -> String {
    let example_intro = if options.response_length == ResponseLength::Long {
        "Illustrative scenario"
    } else {
        "Quick example"
    };

    let mut lines = vec![
        format!("{transition} Let’s pin down {subject}."),
        format!(
            "**Definition:** {subject} refers to the essential mechanics that keep your process reliable and predictable."
        ),
        format!(
            "**{example_intro}:** imagine applying it during a sprint review—everyone knows the checklist, the signals, and the standards."
        ),
        format!("**Focus note:** {focus_line}"),
    ];

    if options.response_length == ResponseLength::Long {
        lines.push("- When it shines: aligning new collaborators fast.".to_string());
        lines.push("- When to adapt: if constraints change mid-project.".to_string());
    }

    lines.join("\n\n")
}

fn build_qa(
    subject: &str,
    original_input: &str,
    options: &AgentOptions,
    transition: &str,
    focus_line: &str,
) -> String {
    let length = options.response_length;

    let mut lines = vec![
        format!("**Q:** {}", original_input.trim()),
        format!(
            "**A:** {transition} {subject} depends on aligning intent, constraints, and measurement in one place."
        ),
        format!("**Focus reminder:** {focus_line}"),
    ];

    let answer_intro = match length {
        ResponseLength::Short => None,
        ResponseLength::Medium => Some("Detailed answer"),
        ResponseLength::Long => Some("Expanded answer"),
    };
    if let Some(intro) = answer_intro {
        lines.push(format!(
            "**{intro}:** carve out time to draft, review, and iterate with clear checkpoints."
        ));
    }

    if length == ResponseLength::Long {
        lines.push("- Follow-up: collect feedback after first implementation.".to_string());
        lines.push("- Signal: stick with a single metric to gauge success.".to_string());
    }

    lines.join("\n\n")
}

/// Build every fragment of a reply of `reply_type` about `subject`.
pub fn compose_reply(
    reply_type: AgentReplyType,
    subject: &str,
    original_input: &str,
    options: &AgentOptions,
    attachments: &[AttachmentMeta],
) -> ReplyFragments {
    let seed = format!("{reply_type}-{subject}-{}", utf16_len(original_input));
    let transition = transition(options.model);
    let focus_line = focus_line(options.focus, options.response_length);

    let raw_body = match reply_type {
        AgentReplyType::Summary => build_summary(subject, options, transition, &focus_line),
        AgentReplyType::Bullets => build_bullets(subject, options, transition, &focus_line),
        AgentReplyType::Steps => build_steps(subject, options, transition, &focus_line),
        AgentReplyType::Quip => build_quip(subject, options),
        AgentReplyType::Definition => build_definition(subject, options, transition, &focus_line),
        AgentReplyType::Qa => build_qa(subject, original_input, options, transition, &focus_line),
    };

    ReplyFragments {
        header: greeting(options, &seed),
        body: apply_model_voice(options.model, raw_body),
        footer: closing(options, &seed),
        attachment_note: attachment_line(attachments),
        model_signature: model_signature(options.model).to_string(),
        learning_tip: learning_tip(options, &seed),
    }
}
