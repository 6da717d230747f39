use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use clap::{Args, Parser, Subcommand};
use colored::*;
use mockagent_core::{
    compute_typing_delay, generate_agent_reply, validate_attachments, AgentOptions,
    AttachmentIds, AttachmentMeta, Config, Focus, GeneratedAgentMessage, ModelChoice, OptionField,
    ResponseLength, Tone,
};

mod app;
mod handler;
mod logging;
mod markdown;
mod tui;
mod ui;

use app::App;
use tui::{EventHandler, Tui};

#[derive(Parser)]
#[command(name = "mockagent", version)]
#[command(about = "Terminal chat with a deterministic, rule-based assistant")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive chat (default)
    Chat,
    /// Print the assistant's reply to a single message
    Reply(ReplyArgs),
    /// Show saved reply options
    Options {
        /// Restore the default options
        #[arg(long)]
        reset: bool,
    },
}

#[derive(Args)]
struct ReplyArgs {
    /// Message to reply to
    input: String,
    /// Response length: short, medium or long
    #[arg(short, long, value_parser = parse_length)]
    length: Option<ResponseLength>,
    /// Model voice: gpt-mini, gpt-prose or gpt-tutor
    #[arg(short, long, value_parser = parse_model)]
    model: Option<ModelChoice>,
    /// Tone: friendly, neutral or formal
    #[arg(short, long, value_parser = parse_tone)]
    tone: Option<Tone>,
    /// Focus: overview, technical or actionable
    #[arg(short, long, value_parser = parse_focus)]
    focus: Option<Focus>,
    /// Attach a file (repeatable, up to 5)
    #[arg(short, long = "attach", value_name = "PATH")]
    attach: Vec<PathBuf>,
    /// Print the reply and typing delay as JSON
    #[arg(long)]
    json: bool,
}

impl ReplyArgs {
    /// Saved options with the command-line overrides applied
    fn merged_options(&self, mut options: AgentOptions) -> AgentOptions {
        if let Some(length) = self.length {
            options.response_length = length;
        }
        if let Some(model) = self.model {
            options.model = model;
        }
        if let Some(tone) = self.tone {
            options.tone = tone;
        }
        if let Some(focus) = self.focus {
            options.focus = focus;
        }
        options
    }
}

fn unknown_value(value: &str, valid: impl Iterator<Item = &'static str>) -> String {
    format!(
        "unknown value '{}' (expected one of: {})",
        value,
        valid.collect::<Vec<_>>().join(", ")
    )
}

fn parse_length(s: &str) -> Result<ResponseLength, String> {
    ResponseLength::from_str(s)
        .ok_or_else(|| unknown_value(s, ResponseLength::all().iter().map(|v| v.as_str())))
}

fn parse_model(s: &str) -> Result<ModelChoice, String> {
    ModelChoice::from_str(s)
        .ok_or_else(|| unknown_value(s, ModelChoice::all().iter().map(|v| v.as_str())))
}

fn parse_tone(s: &str) -> Result<Tone, String> {
    Tone::from_str(s).ok_or_else(|| unknown_value(s, Tone::all().iter().map(|v| v.as_str())))
}

fn parse_focus(s: &str) -> Result<Focus, String> {
    Focus::from_str(s).ok_or_else(|| unknown_value(s, Focus::all().iter().map(|v| v.as_str())))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Chat) {
        Commands::Chat => run_chat().await?,
        Commands::Reply(args) => {
            logging::init_stderr()?;
            print_reply(args)?
        }
        Commands::Options { reset } => {
            logging::init_stderr()?;
            show_options(reset)?
        }
    }

    Ok(())
}

/// Saved config, falling back to defaults when the file is unreadable.
///
/// The second value is a notice for the user when the fallback was taken.
fn load_config(path: &Path) -> (Config, Option<String>) {
    match Config::load_from(path) {
        Ok(config) => (config, None),
        Err(err) => {
            tracing::warn!("{:#}; using default settings", err);
            let notice = format!(
                "Could not read settings at {}; using defaults. Changing an option will overwrite it.",
                path.display()
            );
            (Config::new(), Some(notice))
        }
    }
}

/// Status line shown when the chat opens
fn startup_status(notices: Vec<String>) -> Option<String> {
    if notices.is_empty() {
        None
    } else {
        Some(notices.join(" "))
    }
}

async fn run_chat() -> Result<()> {
    let mut notices = Vec::new();

    // Without a log file the chat still runs, just with no subscriber installed
    match logging::init_file() {
        Ok(log_path) => tracing::info!(log = %log_path.display(), "starting chat"),
        Err(err) => notices.push(format!("Logging disabled: {:#}.", err)),
    }

    let config_path = Config::get_config_path()?;
    let (config, config_notice) = load_config(&config_path);
    notices.extend(config_notice);

    tui::install_panic_hook();
    let mut terminal = tui::init()?;
    let mut app = App::new(config, config_path);
    app.status = startup_status(notices);
    let mut events = EventHandler::new();

    let result = run_loop(&mut terminal, &mut app, &mut events).await;

    tui::restore()?;
    tracing::info!(messages = app.chat.messages().len(), "chat closed");
    result
}

async fn run_loop(terminal: &mut Tui, app: &mut App, events: &mut EventHandler) -> Result<()> {
    while !app.should_quit {
        terminal.draw(|frame| ui::render(app, frame))?;

        match events.next().await {
            Some(event) => handler::handle_event(app, event),
            None => break,
        }
    }
    Ok(())
}

/// Read and validate `--attach` files.
///
/// Returns the accepted files and one warning per skipped file or limit hit.
fn collect_attachments(paths: &[PathBuf]) -> (Vec<AttachmentMeta>, Vec<String>) {
    let mut ids = AttachmentIds::default();
    let mut found = Vec::new();
    let mut warnings = Vec::new();
    for path in paths {
        match AttachmentMeta::from_path(path, &mut ids) {
            Ok(meta) => found.push(meta),
            Err(err) => warnings.push(err.to_string()),
        }
    }

    let validation = validate_attachments(found, 0);
    warnings.extend(validation.errors.iter().map(ToString::to_string));
    (validation.accepted, warnings)
}

fn reply_payload(
    reply: &GeneratedAgentMessage,
    delay_ms: u64,
    attachments: &[AttachmentMeta],
) -> serde_json::Value {
    serde_json::json!({
        "reply": reply,
        "typingDelayMs": delay_ms,
        "attachments": attachments,
    })
}

fn print_reply(args: ReplyArgs) -> Result<()> {
    let input = args.input.trim();
    if input.is_empty() {
        bail!("Message is empty");
    }

    let config_path = Config::get_config_path()?;
    let (config, _) = load_config(&config_path);
    let options = args.merged_options(config.options);

    let (attachments, warnings) = collect_attachments(&args.attach);
    for warning in &warnings {
        eprintln!("{} {}", "warning:".yellow().bold(), warning);
    }
    let delay_ms = compute_typing_delay(input, &options, &attachments);
    let reply = generate_agent_reply(input, &options, &attachments);

    if args.json {
        let payload = reply_payload(&reply, delay_ms, &attachments);
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    println!(
        "{} {}",
        "Assistant".yellow().bold(),
        format!("[{}] {} · {} ms", reply.reply_type, options.summary(), delay_ms).dimmed()
    );
    println!();
    println!("{}", reply.content);

    Ok(())
}

fn show_options(reset: bool) -> Result<()> {
    let config_path = Config::get_config_path()?;
    let (mut config, _) = load_config(&config_path);

    if reset {
        config.reset_options();
        config.save_to(&config_path)?;
        println!("{}", "Options reset to defaults".green());
    }

    println!("\n{}", "Reply options".bold().blue());
    for field in OptionField::all() {
        println!(
            "  {} {}",
            format!("{:<16}", field.label()).dimmed(),
            config.options.value_label(field)
        );
    }
    println!("  {} {}", format!("{:<16}", "Theme").dimmed(), config.theme.as_str());
    println!("\n{} {}", "Config:".dimmed(), config_path.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockagent_core::AgentReplyType;

    fn reply_args(argv: &[&str]) -> ReplyArgs {
        let mut full = vec!["mockagent", "reply"];
        full.extend_from_slice(argv);
        match Cli::try_parse_from(full).unwrap().command {
            Some(Commands::Reply(args)) => args,
            _ => panic!("expected the reply subcommand"),
        }
    }

    fn write_file(dir: &tempfile::TempDir, name: &str, bytes: usize) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, vec![b'x'; bytes]).unwrap();
        path
    }

    #[test]
    fn test_overrides_replace_only_given_options() {
        let saved = AgentOptions {
            response_length: ResponseLength::Short,
            model: ModelChoice::GptTutor,
            tone: Tone::Formal,
            focus: Focus::Technical,
        };

        let args = reply_args(&["Thanks!", "--tone", "friendly", "-l", "long"]);
        let merged = args.merged_options(saved);
        assert_eq!(merged.response_length, ResponseLength::Long);
        assert_eq!(merged.tone, Tone::Friendly);
        assert_eq!(merged.model, ModelChoice::GptTutor);
        assert_eq!(merged.focus, Focus::Technical);

        let untouched = reply_args(&["Thanks!"]).merged_options(saved);
        assert_eq!(untouched, saved);
    }

    #[test]
    fn test_unknown_option_value_is_rejected() {
        let result = Cli::try_parse_from(["mockagent", "reply", "hi", "--model", "gpt-9"]);
        let err = result.err().unwrap().to_string();
        assert!(err.contains("gpt-mini, gpt-prose, gpt-tutor"), "{err}");
    }

    #[test]
    fn test_missing_and_excess_attachments_are_skipped_with_warnings() {
        let dir = tempfile::tempdir().unwrap();
        let mut paths = vec![dir.path().join("missing.txt")];
        for i in 0..6 {
            paths.push(write_file(&dir, &format!("note{i}.txt"), 10));
        }

        let (accepted, warnings) = collect_attachments(&paths);
        let names: Vec<&str> = accepted.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, ["note0.txt", "note1.txt", "note2.txt", "note3.txt", "note4.txt"]);
        assert_eq!(warnings.len(), 2);
        assert!(warnings[0].contains("missing.txt"), "{}", warnings[0]);
        assert!(warnings[1].contains("up to 5 files"), "{}", warnings[1]);
    }

    #[test]
    fn test_directory_attachment_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let file = write_file(&dir, "brief.pdf", 2048);

        let (accepted, warnings) = collect_attachments(&[dir.path().to_path_buf(), file]);
        assert_eq!(accepted.len(), 1);
        assert_eq!(accepted[0].id, "attachment_1");
        assert_eq!(accepted[0].size, 2048);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("is not a file"), "{}", warnings[0]);
    }

    #[test]
    fn test_json_payload_shape() {
        let dir = tempfile::tempdir().unwrap();
        let (attachments, _) = collect_attachments(&[write_file(&dir, "brief.pdf", 2048)]);
        let options = AgentOptions::default();
        let input = "List ideas for the launch";
        let delay_ms = compute_typing_delay(input, &options, &attachments);
        let reply = generate_agent_reply(input, &options, &attachments);
        assert_eq!(reply.reply_type, AgentReplyType::Bullets);

        let payload = reply_payload(&reply, delay_ms, &attachments);
        assert_eq!(payload["reply"]["role"], "assistant");
        assert_eq!(payload["reply"]["replyType"], "bullets");
        assert_eq!(payload["reply"]["content"], reply.content.as_str());
        assert_eq!(payload["reply"]["optionsSnapshot"]["model"], "gpt-prose");
        assert_eq!(payload["typingDelayMs"], delay_ms);
        assert_eq!(payload["attachments"][0]["name"], "brief.pdf");
        assert_eq!(payload["attachments"][0]["size"], 2048);
        assert_eq!(payload["attachments"][0]["extension"], "pdf");
    }

    #[test]
    fn test_corrupt_config_falls_back_with_notice() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        let (config, notice) = load_config(&path);
        assert_eq!(config, Config::new());
        let notice = notice.unwrap();
        assert!(notice.contains("using defaults"), "{notice}");

        let (_, missing) = load_config(&dir.path().join("absent.json"));
        assert!(missing.is_none());
    }

    #[test]
    fn test_startup_status_joins_notices() {
        assert_eq!(startup_status(Vec::new()), None);

        let status = startup_status(vec![
            "Logging disabled: no data directory.".to_string(),
            "Could not read settings.".to_string(),
        ]);
        assert_eq!(
            status.as_deref(),
            Some("Logging disabled: no data directory. Could not read settings.")
        );
    }
}
