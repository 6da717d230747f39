//! Renders the small markdown dialect assistant replies use: `**bold**` runs,
//! `_italic_` lines, `> ` quotes, `- ` bullets and `1. ` numbered steps.

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

pub fn render_markdown(content: &str, muted: Color) -> Vec<Line<'static>> {
    content.lines().map(|line| render_line(line, muted)).collect()
}

pub fn render_line(text: &str, muted: Color) -> Line<'static> {
    if let Some(rest) = text.strip_prefix("> ") {
        let quote = Style::default().fg(muted).add_modifier(Modifier::ITALIC);
        let mut spans = vec![Span::styled("│ ", Style::default().fg(muted))];
        spans.extend(parse_inline(rest, quote));
        return Line::from(spans);
    }

    if is_italic_line(text) {
        return Line::from(Span::styled(
            text[1..text.len() - 1].to_string(),
            Style::default().fg(muted).add_modifier(Modifier::ITALIC),
        ));
    }

    if let Some(rest) = text.strip_prefix("- ").or_else(|| text.strip_prefix("• ")) {
        let mut spans = vec![Span::raw("  • ")];
        spans.extend(parse_inline(rest, Style::default()));
        return Line::from(spans);
    }

    if let Some((number, rest)) = numbered_item(text) {
        let mut spans = vec![Span::styled(
            format!("  {}. ", number),
            Style::default().add_modifier(Modifier::BOLD),
        )];
        spans.extend(parse_inline(rest, Style::default()));
        return Line::from(spans);
    }

    let spans = parse_inline(text, Style::default());
    if spans.is_empty() {
        Line::default()
    } else {
        Line::from(spans)
    }
}

fn is_italic_line(text: &str) -> bool {
    text.len() > 2 && text.starts_with('_') && text.ends_with('_')
}

/// `"3. Ship it"` -> `Some(("3", "Ship it"))`
fn numbered_item(text: &str) -> Option<(&str, &str)> {
    let (number, rest) = text.split_once(". ")?;
    let is_number = !number.is_empty() && number.chars().all(|c| c.is_ascii_digit());
    is_number.then_some((number, rest))
}

/// Split `text` into spans, bolding `**...**` runs on top of `base`.
fn parse_inline(text: &str, base: Style) -> Vec<Span<'static>> {
    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut chars = text.chars().peekable();
    let mut current_text = String::new();

    while let Some(c) = chars.next() {
        if c != '*' || chars.peek() != Some(&'*') {
            current_text.push(c);
            continue;
        }
        chars.next();

        let mut bold_text = String::new();
        let mut found_close = false;
        while let Some(c) = chars.next() {
            if c == '*' && chars.peek() == Some(&'*') {
                chars.next();
                found_close = true;
                break;
            }
            bold_text.push(c);
        }

        if found_close && !bold_text.is_empty() {
            if !current_text.is_empty() {
                spans.push(Span::styled(std::mem::take(&mut current_text), base));
            }
            spans.push(Span::styled(bold_text, base.add_modifier(Modifier::BOLD)));
        } else {
            // Unclosed marker stays literal
            current_text.push_str("**");
            current_text.push_str(&bold_text);
            if found_close {
                current_text.push_str("**");
            }
        }
    }

    if !current_text.is_empty() {
        spans.push(Span::styled(current_text, base));
    }

    spans
}
