use mockagent_core::agent::delay::{MAX_TYPING_DELAY_MS, MIN_TYPING_DELAY_MS};
use mockagent_core::{
    compute_typing_delay, generate_agent_reply, variant_index, AgentOptions, AgentReplyType,
    AttachmentMeta, Focus, ModelChoice, ResponseLength, Tone, VariantError,
};

fn options(length: ResponseLength, model: ModelChoice, tone: Tone) -> AgentOptions {
    AgentOptions {
        response_length: length,
        model,
        tone,
        focus: Focus::Overview,
    }
}

fn two_attachments() -> Vec<AttachmentMeta> {
    vec![
        AttachmentMeta::new("a1", "brief.pdf", 1024),
        AttachmentMeta::new("a2", "mock.png", 2048),
    ]
}

fn list_items(content: &str, reply_type: AgentReplyType) -> usize {
    content
        .lines()
        .filter(|line| match reply_type {
            AgentReplyType::Steps => line
                .split_once(". ")
                .is_some_and(|(n, _)| n.parse::<u32>().is_ok()),
            _ => line.starts_with("- ") && !line.starts_with("- Focus") && !line.starts_with("- Detailed focus"),
        })
        .count()
}

#[test]
fn how_to_prompt_becomes_numbered_steps() {
    let reply = generate_agent_reply(
        "How to launch the onboarding flow?",
        &options(ResponseLength::Long, ModelChoice::GptProse, Tone::Neutral),
        &[],
    );
    assert_eq!(reply.reply_type, AgentReplyType::Steps);
    assert!(reply.content.lines().any(|line| line.starts_with("1.")));
    assert!(reply.content.contains("Follow these steps for Launch the onboarding flow:"));
    assert_eq!(reply.options_snapshot.response_length, ResponseLength::Long);
}

#[test]
fn what_is_prompt_becomes_definition() {
    let reply = generate_agent_reply(
        "What is a sprint retrospective?",
        &AgentOptions::default(),
        &[],
    );
    assert_eq!(reply.reply_type, AgentReplyType::Definition);
    assert!(reply.content.contains("**Definition:** A sprint retrospective refers to"));
    assert!(reply.content.contains("**Quick example:**"));
}

#[test]
fn list_prompt_becomes_bullets() {
    let reply = generate_agent_reply(
        "List ideas for the launch checklist",
        &options(ResponseLength::Short, ModelChoice::GptProse, Tone::Neutral),
        &[],
    );
    assert_eq!(reply.reply_type, AgentReplyType::Bullets);
    assert!(reply.content.lines().any(|line| line.starts_with('-')));
}

#[test]
fn general_prompt_with_attachments_is_summary_with_note() {
    let reply = generate_agent_reply(
        "Share guidance on leading a remote workshop",
        &options(ResponseLength::Medium, ModelChoice::GptMini, Tone::Neutral),
        &two_attachments(),
    );
    assert_eq!(reply.reply_type, AgentReplyType::Summary);
    assert!(reply
        .content
        .contains("> I noticed 2 attachments (pdf, png). I'll keep them in mind."));
    assert!(reply.content.contains("Model gpt-mini"));
}

#[test]
fn short_thanks_is_a_quip() {
    let reply = generate_agent_reply("Thanks!", &AgentOptions::default(), &[]);
    assert_eq!(reply.reply_type, AgentReplyType::Quip);
    assert!(reply.content.to_lowercase().contains("handled"));
}

#[test]
fn tutor_question_gets_qa_and_learning_tip() {
    let reply = generate_agent_reply(
        "Is the roadmap ready for handoff?",
        &options(ResponseLength::Medium, ModelChoice::GptTutor, Tone::Friendly),
        &[],
    );
    assert_eq!(reply.reply_type, AgentReplyType::Qa);
    assert!(reply.content.contains("**Q:**"));
    assert!(reply.content.lines().any(|line| line.starts_with("> Learning tip")));
}

#[test]
fn tutor_question_exact_content() {
    let reply = generate_agent_reply(
        "Is the roadmap ready for handoff?",
        &options(ResponseLength::Medium, ModelChoice::GptTutor, Tone::Friendly),
        &[],
    );
    let expected = "Hi! Great question.\n\n\
        **Q:** Is the roadmap ready for handoff?\n\n\
        **A:** Let’s unpack this together: Is the roadmap ready for handoff depends on aligning intent, constraints, and measurement in one place.\n\n\
        **Focus reminder:** Focus: a clear overview you can skim quickly.\n\n\
        **Detailed answer:** carve out time to draft, review, and iterate with clear checkpoints.\n\n\
        > Learning tip: teach this concept to someone else—it cements the knowledge.\n\n\
        Let me know what else you need.\n\n\
        _Model gpt-tutor highlights learning cues for you._";
    assert_eq!(reply.content, expected);
}

#[test]
fn friendly_quip_exact_content() {
    let reply = generate_agent_reply(
        "Thanks!",
        &options(ResponseLength::Medium, ModelChoice::GptProse, Tone::Friendly),
        &[],
    );
    assert_eq!(
        reply.content,
        "Hi! Great question.\n\n\
         Looks like Thanks! just asked for a high-five. All set on my end.\n\n\
         Feel free to ask for more detail anytime.\n\n\
         _Model gpt-prose leans into smooth narrative phrasing._"
    );
}

#[test]
fn formal_phrases_for_known_seeds() {
    let reply = generate_agent_reply(
        "Share guidance on leading a remote workshop",
        &options(ResponseLength::Medium, ModelChoice::GptProse, Tone::Formal),
        &[],
    );
    assert!(reply.content.starts_with("Good day.\n\n"));
    assert!(reply.content.contains("\n\nPlease advise if further detail is required.\n\n"));

    let reply = generate_agent_reply(
        "What is a sprint retrospective?",
        &options(ResponseLength::Medium, ModelChoice::GptTutor, Tone::Formal),
        &[],
    );
    assert!(reply.content.starts_with("Greetings.\n\n"));
    assert!(reply.content.contains(
        "> Learning tip: try summarising the answer in your own words to refine understanding."
    ));
    assert!(reply.content.contains("I remain available for any additional questions."));
}

#[test]
fn generation_is_deterministic() {
    let inputs = [
        "How to launch the onboarding flow?",
        "List ideas for the launch checklist",
        "Thanks!",
        "",
        "🚀 ship it?",
    ];
    for input in inputs {
        for model in ModelChoice::all() {
            for tone in Tone::all() {
                let opts = options(ResponseLength::Long, model, tone);
                let first = generate_agent_reply(input, &opts, &two_attachments());
                let second = generate_agent_reply(input, &opts, &two_attachments());
                assert_eq!(first, second);
            }
        }
    }
}

#[test]
fn list_length_is_monotonic() {
    for (input, reply_type) in [
        ("How to launch the onboarding flow?", AgentReplyType::Steps),
        ("List ideas for the launch checklist", AgentReplyType::Bullets),
    ] {
        for model in ModelChoice::all() {
            let counts: Vec<usize> = ResponseLength::all()
                .into_iter()
                .map(|length| {
                    let reply = generate_agent_reply(input, &options(length, model, Tone::Neutral), &[]);
                    assert_eq!(reply.reply_type, reply_type);
                    list_items(&reply.content, reply_type)
                })
                .collect();
            assert!(counts[0] <= counts[1] && counts[1] <= counts[2], "{input}: {counts:?}");
            assert_eq!(counts, vec![3, 5, 7]);
        }
    }
}

#[test]
fn no_attachments_means_no_note() {
    for input in ["Thanks!", "What is latency?", "List ideas", "How to cook?", "Ready?", ""] {
        let reply = generate_agent_reply(input, &AgentOptions::default(), &[]);
        assert!(!reply.content.contains("> I noticed"), "{input}");
    }
}

#[test]
fn delay_stays_in_bounds() {
    let long_input = "word ".repeat(400);
    let attachments: Vec<AttachmentMeta> = (0..5)
        .map(|i| AttachmentMeta::new(format!("a{i}"), format!("f{i}.txt"), 10))
        .collect();

    for length in ResponseLength::all() {
        for focus in Focus::all() {
            let opts = AgentOptions {
                response_length: length,
                focus,
                ..AgentOptions::default()
            };
            for input in ["", "hi", long_input.as_str()] {
                for count in 0..=attachments.len() {
                    let delay = compute_typing_delay(input, &opts, &attachments[..count]);
                    assert!((MIN_TYPING_DELAY_MS..=MAX_TYPING_DELAY_MS).contains(&delay));
                }
            }
        }
    }
}

#[test]
fn selector_is_stable_and_bounded() {
    for n in 1..50 {
        let first = variant_index("tip-qa-Roadmap-8-gpt-tutor-friendly", n).unwrap();
        assert_eq!(variant_index("tip-qa-Roadmap-8-gpt-tutor-friendly", n).unwrap(), first);
        assert!(first < n);
    }
    assert_eq!(variant_index("seed", 0), Err(VariantError::NonPositiveModulo));
}
