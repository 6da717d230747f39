use std::path::PathBuf;

use mockagent_core::hashing::pick_variant;
use mockagent_core::{
    validate_attachments, AgentOptions, AttachmentIds, AttachmentMeta, ChatStore, Config,
    OptionField,
};
use ratatui::widgets::ListState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Editing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Popup {
    Options,
    Attach,
}

const PLACEHOLDERS: [&str; 4] = [
    "Ask for a plan, a definition, or a quick list...",
    "Try \"How to run a design review?\"",
    "Try \"What is a sprint retrospective?\"",
    "Try \"List ideas for a team offsite\"",
];

/// Convert a character index to a byte index for UTF-8 safe string operations
fn char_to_byte_index(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

/// Single-line text field with a character-based cursor
#[derive(Debug, Default, Clone)]
pub struct InputBuffer {
    pub text: String,
    pub cursor: usize,
}

impl InputBuffer {
    pub fn insert_char(&mut self, c: char) {
        let byte_idx = char_to_byte_index(&self.text, self.cursor);
        self.text.insert(byte_idx, c);
        self.cursor += 1;
    }

    /// Insert pasted text, folding line breaks into spaces
    pub fn insert_str(&mut self, s: &str) {
        let cleaned: String = s
            .chars()
            .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
            .collect();
        let byte_idx = char_to_byte_index(&self.text, self.cursor);
        self.text.insert_str(byte_idx, &cleaned);
        self.cursor += cleaned.chars().count();
    }

    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let byte_idx = char_to_byte_index(&self.text, self.cursor);
            self.text.remove(byte_idx);
        }
    }

    pub fn delete(&mut self) {
        if self.cursor < self.text.chars().count() {
            let byte_idx = char_to_byte_index(&self.text, self.cursor);
            self.text.remove(byte_idx);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.text.chars().count());
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.text.chars().count();
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

pub struct App {
    // Core state
    pub should_quit: bool,
    pub input_mode: InputMode,
    pub popup: Option<Popup>,
    pub status: Option<String>,

    // Conversation
    pub chat: ChatStore,
    pub config: Config,
    config_path: PathBuf,

    // Composer
    pub composer: InputBuffer,
    pub draft_attachments: Vec<AttachmentMeta>,
    attachment_ids: AttachmentIds,

    // Attach popup
    pub attach_input: InputBuffer,
    pub attach_errors: Vec<String>,

    // Options popup
    pub options_state: ListState,

    // Chat viewport, sizes updated during render
    pub chat_scroll: u16,
    pub max_chat_scroll: u16,
    pub chat_height: u16,
    pub follow_output: bool,

    // Animation state
    pub animation_frame: u8, // 0-2 for the typing dots
}

impl App {
    pub fn new(config: Config, config_path: PathBuf) -> Self {
        Self {
            should_quit: false,
            input_mode: InputMode::Editing,
            popup: None,
            status: None,
            chat: ChatStore::new(),
            config,
            config_path,
            composer: InputBuffer::default(),
            draft_attachments: Vec::new(),
            attachment_ids: AttachmentIds::default(),
            attach_input: InputBuffer::default(),
            attach_errors: Vec::new(),
            options_state: ListState::default(),
            chat_scroll: 0,
            max_chat_scroll: 0,
            chat_height: 0,
            follow_output: true,
            animation_frame: 0,
        }
    }

    pub fn options(&self) -> AgentOptions {
        self.config.options
    }

    /// Composer hint, rotated by conversation length
    pub fn placeholder(&self) -> &'static str {
        let seed = format!("placeholder-{}", self.chat.messages().len());
        pick_variant(&PLACEHOLDERS, &seed)
    }

    /// Send the composer text and any drafted attachments.
    pub fn send_message(&mut self) {
        if self.composer.is_blank() {
            self.status = Some("Type a message before sending.".to_string());
            return;
        }

        let attachments = std::mem::take(&mut self.draft_attachments);
        let options = self.options();
        if let Some(delay) = self
            .chat
            .send_message(&self.composer.text, attachments, &options)
        {
            tracing::debug!(delay_ms = delay.as_millis() as u64, "message sent");
            self.composer.clear();
            self.status = None;
            self.follow_output = true;
        }
    }

    /// Append the assistant reply once its typing delay has elapsed
    pub fn poll_reply(&mut self) {
        if self.chat.poll_reply().is_some() {
            self.animation_frame = 0;
            self.follow_output = true;
        }
    }

    pub fn tick_animation(&mut self) {
        if self.chat.is_typing() {
            self.animation_frame = (self.animation_frame + 1) % 3;
        }
    }

    pub fn clear_chat(&mut self) {
        self.chat.clear();
        self.chat_scroll = 0;
        self.follow_output = true;
        self.status = Some("Conversation cleared.".to_string());
    }

    // Attachments

    pub fn open_attach_popup(&mut self) {
        self.attach_input.clear();
        self.attach_errors.clear();
        self.popup = Some(Popup::Attach);
    }

    /// Attach the file named in the attach popup. Returns whether it was added.
    pub fn attach_from_input(&mut self) -> bool {
        let raw = self.attach_input.text.trim();
        if raw.is_empty() {
            self.attach_errors = vec!["Enter a file path.".to_string()];
            return false;
        }
        let path = expand_path(raw);

        let meta = match AttachmentMeta::from_path(&path, &mut self.attachment_ids) {
            Ok(meta) => meta,
            Err(err) => {
                self.attach_errors = vec![err.to_string()];
                return false;
            }
        };

        let validation = validate_attachments(vec![meta], self.draft_attachments.len());
        self.attach_errors = validation.errors.iter().map(ToString::to_string).collect();
        if validation.accepted.is_empty() {
            return false;
        }

        for meta in &validation.accepted {
            tracing::info!(name = %meta.name, size = meta.size, "attached file");
        }
        self.draft_attachments.extend(validation.accepted);
        self.attach_input.clear();
        self.popup = None;
        true
    }

    pub fn remove_last_attachment(&mut self) {
        if let Some(removed) = self.draft_attachments.pop() {
            self.status = Some(format!("Removed {}", removed.name));
        }
    }

    // Options

    pub fn open_options_popup(&mut self) {
        if self.options_state.selected().is_none() {
            self.options_state.select(Some(0));
        }
        self.popup = Some(Popup::Options);
    }

    pub fn selected_option_field(&self) -> OptionField {
        let fields = OptionField::all();
        let idx = self.options_state.selected().unwrap_or(0).min(fields.len() - 1);
        fields[idx]
    }

    pub fn options_next(&mut self) {
        let len = OptionField::all().len();
        let i = self.options_state.selected().map_or(0, |i| (i + 1) % len);
        self.options_state.select(Some(i));
    }

    pub fn options_prev(&mut self) {
        let len = OptionField::all().len();
        let i = self
            .options_state
            .selected()
            .map_or(0, |i| if i == 0 { len - 1 } else { i - 1 });
        self.options_state.select(Some(i));
    }

    pub fn cycle_selected_option(&mut self, forward: bool) {
        let field = self.selected_option_field();
        self.config.options.cycle(field, forward);
        tracing::info!(field = field.label(), value = self.config.options.value_label(field), "option changed");
        self.persist_config();
    }

    pub fn reset_options(&mut self) {
        self.config.reset_options();
        self.persist_config();
        self.status = Some("Options reset to defaults.".to_string());
    }

    pub fn toggle_theme(&mut self) {
        self.config.theme = self.config.theme.toggled();
        self.persist_config();
    }

    fn persist_config(&mut self) {
        if let Err(err) = self.config.save_to(&self.config_path) {
            tracing::warn!("failed to save settings: {:#}", err);
            self.status = Some(format!("Could not save settings: {}", err));
        }
    }

    // Scrolling

    pub fn scroll_up(&mut self, amount: u16) {
        self.chat_scroll = self.chat_scroll.saturating_sub(amount);
        self.follow_output = false;
    }

    pub fn scroll_down(&mut self, amount: u16) {
        self.chat_scroll = self
            .chat_scroll
            .saturating_add(amount)
            .min(self.max_chat_scroll);
        self.follow_output = self.chat_scroll >= self.max_chat_scroll;
    }

    pub fn scroll_half_page_up(&mut self) {
        self.scroll_up((self.chat_height / 2).max(1));
    }

    pub fn scroll_half_page_down(&mut self) {
        self.scroll_down((self.chat_height / 2).max(1));
    }

    pub fn scroll_to_top(&mut self) {
        self.chat_scroll = 0;
        self.follow_output = false;
    }

    pub fn scroll_to_bottom(&mut self) {
        self.chat_scroll = self.max_chat_scroll;
        self.follow_output = true;
    }
}

/// Strip surrounding quotes (as terminals add on drag and drop) and expand `~/`
fn expand_path(raw: &str) -> PathBuf {
    let unquoted = raw
        .strip_prefix('\'')
        .and_then(|s| s.strip_suffix('\''))
        .or_else(|| raw.strip_prefix('"').and_then(|s| s.strip_suffix('"')))
        .unwrap_or(raw);

    match (unquoted.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(unquoted),
    }
}
