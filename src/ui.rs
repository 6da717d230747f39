use mockagent_core::attachments::{MAX_FILE_COUNT, MAX_FILE_SIZE_BYTES};
use mockagent_core::format::{format_bytes, format_timestamp};
use mockagent_core::{ChatRole, OptionField, Theme};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, InputBuffer, InputMode, Popup};
use crate::markdown::render_markdown;

#[derive(Debug, Clone, Copy)]
struct Palette {
    text: Color,
    muted: Color,
    accent: Color,
    user: Color,
    assistant: Color,
    border: Color,
    error: Color,
    bar_bg: Color,
    key_bg: Color,
}

impl Palette {
    fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self {
                text: Color::White,
                muted: Color::DarkGray,
                accent: Color::Cyan,
                user: Color::Cyan,
                assistant: Color::Yellow,
                border: Color::DarkGray,
                error: Color::LightRed,
                bar_bg: Color::Black,
                key_bg: Color::DarkGray,
            },
            Theme::Light => Self {
                text: Color::Black,
                muted: Color::Gray,
                accent: Color::Blue,
                user: Color::Blue,
                assistant: Color::Magenta,
                border: Color::Gray,
                error: Color::Red,
                bar_bg: Color::White,
                key_bg: Color::Gray,
            },
        }
    }
}

pub fn render(app: &mut App, frame: &mut Frame) {
    let palette = Palette::for_theme(app.config.theme);
    let area = frame.area();
    let chips_height = if app.draft_attachments.is_empty() { 0 } else { 1 };

    let [header_area, chat_area, chips_area, composer_area, footer_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(chips_height),
        Constraint::Length(3),
        Constraint::Length(1),
    ])
    .areas(area);

    render_header(app, frame, header_area, palette);
    render_chat(app, frame, chat_area, palette);
    if chips_height > 0 {
        render_attachment_chips(app, frame, chips_area, palette);
    }
    render_composer(app, frame, composer_area, palette);
    render_footer(app, frame, footer_area, palette);

    match app.popup {
        Some(Popup::Options) => render_options_popup(app, frame, area, palette),
        Some(Popup::Attach) => render_attach_popup(app, frame, area, palette),
        None => {}
    }
}

fn render_header(app: &App, frame: &mut Frame, area: Rect, palette: Palette) {
    let title = Line::from(vec![
        Span::styled(
            " mockagent ",
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("v{} ", env!("CARGO_PKG_VERSION")),
            Style::default().fg(palette.muted),
        ),
        Span::styled(
            format!(" {} ", app.options().summary()),
            Style::default().fg(palette.text),
        ),
    ]);

    frame.render_widget(Paragraph::new(title), area);
}

fn render_chat(app: &mut App, frame: &mut Frame, area: Rect, palette: Palette) {
    let focused = app.input_mode == InputMode::Normal && app.popup.is_none();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if focused { palette.accent } else { palette.border }))
        .title(" Conversation ");

    // Inner size minus borders, used for scroll calculations
    let inner_width = area.width.saturating_sub(2);
    let inner_height = area.height.saturating_sub(2);
    app.chat_height = inner_height;

    if app.chat.messages().is_empty() && !app.chat.is_typing() {
        app.chat_scroll = 0;
        app.max_chat_scroll = 0;
        let empty = Paragraph::new(empty_state_lines(palette))
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(empty, area);
        return;
    }

    let lines = conversation_lines(app, palette);
    app.max_chat_scroll = wrapped_height(&lines, inner_width).saturating_sub(inner_height);
    if app.follow_output || app.chat_scroll > app.max_chat_scroll {
        app.chat_scroll = app.max_chat_scroll;
    }

    let chat = Paragraph::new(Text::from(lines))
        .style(Style::default().fg(palette.text))
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((app.chat_scroll, 0));

    frame.render_widget(chat, area);
}

fn empty_state_lines(palette: Palette) -> Vec<Line<'static>> {
    let muted = Style::default().fg(palette.muted);
    vec![
        Line::default(),
        Line::from(Span::styled(
            "Start a conversation",
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        )),
        Line::default(),
        Line::from(Span::styled(
            "Replies are composed locally by a rule-based assistant.",
            muted,
        )),
        Line::from(Span::styled(
            "Ask \"How to...\" for steps, \"What is...\" for a definition, or \"List...\" for bullets.",
            muted,
        )),
    ]
}

fn conversation_lines(app: &App, palette: Palette) -> Vec<Line<'static>> {
    let muted = Style::default().fg(palette.muted);
    let mut lines: Vec<Line<'static>> = Vec::new();

    for msg in app.chat.messages() {
        let time = format!("  {}", format_timestamp(msg.created_at));
        match msg.role {
            ChatRole::User => {
                lines.push(Line::from(vec![
                    Span::styled(
                        "You",
                        Style::default().fg(palette.user).add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(time, muted),
                ]));
                for line in msg.content.lines() {
                    lines.push(Line::from(line.to_string()));
                }
                for attachment in &msg.attachments {
                    lines.push(Line::from(Span::styled(
                        format!("📎 {} ({})", attachment.name, format_bytes(attachment.size)),
                        muted,
                    )));
                }
            }
            ChatRole::Assistant => {
                let mut header = vec![
                    Span::styled(
                        "Assistant",
                        Style::default()
                            .fg(palette.assistant)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(time, muted),
                ];
                if let Some(reply_type) = msg.reply_type {
                    header.push(Span::styled(format!("  [{}]", reply_type), muted));
                }
                lines.push(Line::from(header));
                lines.extend(render_markdown(&msg.content, palette.muted));
            }
        }
        lines.push(Line::default());
    }

    if app.chat.is_typing() {
        lines.push(Line::from(Span::styled(
            "Assistant",
            Style::default()
                .fg(palette.assistant)
                .add_modifier(Modifier::BOLD),
        )));
        // Animated ellipsis: cycles through ".", "..", "..."
        let dots = ".".repeat(app.animation_frame as usize + 1);
        lines.push(Line::from(Span::styled(
            format!("is typing{}", dots),
            muted.add_modifier(Modifier::ITALIC),
        )));
    }

    lines
}

/// Rows `lines` occupy once wrapped to `width` columns
fn wrapped_height(lines: &[Line], width: u16) -> u16 {
    if width == 0 {
        return lines.len().min(u16::MAX as usize) as u16;
    }
    let width = width as usize;
    let total: usize = lines
        .iter()
        .map(|line| line.width().div_ceil(width).max(1))
        .sum();
    total.min(u16::MAX as usize) as u16
}

fn render_attachment_chips(app: &App, frame: &mut Frame, area: Rect, palette: Palette) {
    let chip_style = Style::default().bg(palette.key_bg).fg(palette.text);
    let mut spans = vec![Span::styled(
        format!(" {}/{} ", app.draft_attachments.len(), MAX_FILE_COUNT),
        Style::default().fg(palette.muted),
    )];
    for attachment in &app.draft_attachments {
        spans.push(Span::styled(
            format!(" {} · {} ", attachment.name, format_bytes(attachment.size)),
            chip_style,
        ));
        spans.push(Span::raw(" "));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Visible slice of `input` and the cursor column, scrolled to keep the cursor in view
fn visible_input(input: &InputBuffer, width: usize) -> (String, u16) {
    let scroll_offset = if width == 0 || input.cursor < width {
        0
    } else {
        input.cursor - width + 1
    };
    let visible: String = input.text.chars().skip(scroll_offset).take(width).collect();
    (visible, (input.cursor - scroll_offset) as u16)
}

fn render_composer(app: &App, frame: &mut Frame, area: Rect, palette: Palette) {
    let editing = app.input_mode == InputMode::Editing && app.popup.is_none();
    let title = if app.chat.is_typing() {
        " Message (assistant is typing) "
    } else {
        " Message "
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if editing { palette.assistant } else { palette.border }))
        .title(title);

    let inner_width = area.width.saturating_sub(2) as usize;
    let (visible_text, cursor_x) = visible_input(&app.composer, inner_width);

    let content = if app.composer.text.is_empty() {
        Line::from(Span::styled(
            app.placeholder(),
            Style::default().fg(palette.muted),
        ))
    } else {
        Line::from(Span::styled(visible_text, Style::default().fg(palette.user)))
    };

    frame.render_widget(Paragraph::new(content).block(block), area);

    if editing {
        frame.set_cursor_position((area.x + cursor_x + 1, area.y + 1));
    }
}

fn hint_spans(pairs: &[(&str, &str)], key_style: Style, label_style: Style) -> Vec<Span<'static>> {
    pairs
        .iter()
        .flat_map(|(key, label)| {
            [
                Span::styled(format!(" {} ", key), key_style),
                Span::styled(format!(" {} ", label), label_style),
            ]
        })
        .collect()
}

fn render_footer(app: &App, frame: &mut Frame, area: Rect, palette: Palette) {
    let (mode_text, mode_style) = match (app.popup, app.input_mode) {
        (Some(Popup::Options), _) => (" OPTIONS ", Style::default().bg(Color::Magenta).fg(Color::White)),
        (Some(Popup::Attach), _) => (" ATTACH ", Style::default().bg(Color::Green).fg(Color::Black)),
        (None, InputMode::Normal) => (" NORMAL ", Style::default().bg(Color::Blue).fg(Color::White)),
        (None, InputMode::Editing) => (" INSERT ", Style::default().bg(Color::Yellow).fg(Color::Black)),
    };

    let key_style = Style::default().bg(palette.key_bg).fg(palette.text);
    let label_style = Style::default().bg(palette.bar_bg).fg(palette.text);

    let pairs: Vec<(&str, &str)> = match (app.popup, app.input_mode) {
        (Some(Popup::Options), _) => vec![
            ("j/k", "field"),
            ("h/l", "change"),
            ("r", "reset"),
            ("Esc", "close"),
        ],
        (Some(Popup::Attach), _) => vec![("Enter", "attach"), ("Esc", "cancel")],
        (None, InputMode::Normal) => {
            let mut pairs = vec![("i", "type"), ("j/k", "scroll"), ("o", "options"), ("a", "attach")];
            if !app.draft_attachments.is_empty() {
                pairs.push(("x", "drop file"));
            }
            pairs.extend([("C", "clear"), ("t", "theme"), ("q", "quit")]);
            pairs
        }
        (None, InputMode::Editing) => vec![
            ("Enter", "send"),
            ("^O", "options"),
            ("^A", "attach"),
            ("Esc", "normal"),
        ],
    };

    let mut spans = vec![
        Span::styled(mode_text, mode_style),
        Span::styled(" ", label_style),
    ];
    spans.extend(hint_spans(&pairs, key_style, label_style));
    if let Some(status) = &app.status {
        spans.push(Span::styled(
            format!("  {}", status),
            Style::default().bg(palette.bar_bg).fg(palette.accent),
        ));
    }

    let footer = Paragraph::new(Line::from(spans)).style(Style::default().bg(palette.bar_bg));
    frame.render_widget(footer, area);
}

/// Centered popup area clamped to the frame
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width.saturating_sub(4));
    let height = height.min(area.height.saturating_sub(2));
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width, height)
}

fn render_options_popup(app: &mut App, frame: &mut Frame, area: Rect, palette: Palette) {
    let popup_area = centered_rect(56, 10, area);
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.accent))
        .title(" Reply options ");
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let [list_area, help_area] =
        Layout::vertical([Constraint::Length(4), Constraint::Min(0)]).areas(inner);

    let options = app.options();
    let items: Vec<ListItem> = OptionField::all()
        .into_iter()
        .map(|field| {
            ListItem::new(Line::from(vec![
                Span::styled(format!("{:<16}", field.label()), Style::default().fg(palette.muted)),
                Span::styled(
                    format!("‹ {} ›", options.value_label(field)),
                    Style::default().fg(palette.text).add_modifier(Modifier::BOLD),
                ),
            ]))
        })
        .collect();

    let list = List::new(items)
        .highlight_style(
            Style::default()
                .bg(Color::Blue)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");
    frame.render_stateful_widget(list, list_area, &mut app.options_state);

    let help = Paragraph::new(vec![
        Line::default(),
        Line::from(Span::styled(
            app.selected_option_field().help(),
            Style::default()
                .fg(palette.muted)
                .add_modifier(Modifier::ITALIC),
        )),
    ])
    .wrap(Wrap { trim: true });
    frame.render_widget(help, help_area);
}

fn render_attach_popup(app: &App, frame: &mut Frame, area: Rect, palette: Palette) {
    let height = 6 + app.attach_errors.len() as u16;
    let popup_area = centered_rect(64, height, area);
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.accent))
        .title(" Attach a file ");
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let [input_area, info_area] =
        Layout::vertical([Constraint::Length(3), Constraint::Min(0)]).areas(inner);

    let input_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.assistant))
        .title(" Path ");
    let (visible_text, cursor_x) =
        visible_input(&app.attach_input, input_area.width.saturating_sub(2) as usize);
    frame.render_widget(
        Paragraph::new(visible_text)
            .style(Style::default().fg(palette.user))
            .block(input_block),
        input_area,
    );
    frame.set_cursor_position((input_area.x + cursor_x + 1, input_area.y + 1));

    let mut info: Vec<Line> = app
        .attach_errors
        .iter()
        .map(|err| Line::from(Span::styled(err.clone(), Style::default().fg(palette.error))))
        .collect();
    info.push(Line::from(Span::styled(
        format!(
            "Up to {} files, {} each. {} attached.",
            MAX_FILE_COUNT,
            format_bytes(MAX_FILE_SIZE_BYTES),
            app.draft_attachments.len()
        ),
        Style::default().fg(palette.muted),
    )));
    frame.render_widget(Paragraph::new(info).wrap(Wrap { trim: true }), info_area);
}
