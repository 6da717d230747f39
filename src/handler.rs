use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};

use crate::app::{App, InputBuffer, InputMode, Popup};
use crate::tui::AppEvent;

const MOUSE_SCROLL_LINES: u16 = 3;

pub fn handle_event(app: &mut App, event: AppEvent) {
    match event {
        AppEvent::Key(key) => handle_key(app, key),
        AppEvent::Mouse(mouse) => handle_mouse(app, mouse),
        AppEvent::Paste(text) => handle_paste(app, &text),
        AppEvent::Resize => {}
        AppEvent::Tick => {
            app.tick_animation();
            app.poll_reply();
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    // Global keys that work in any mode
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    match app.popup {
        Some(Popup::Options) => return handle_options_popup(app, key),
        Some(Popup::Attach) => return handle_attach_popup(app, key),
        None => {}
    }

    match app.input_mode {
        InputMode::Normal => handle_normal_mode(app, key),
        InputMode::Editing => handle_editing_mode(app, key),
    }
}

fn handle_normal_mode(app: &mut App, key: KeyEvent) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,

        // Back to the composer
        KeyCode::Char('i') | KeyCode::Enter | KeyCode::Tab => {
            app.input_mode = InputMode::Editing;
        }

        // Conversation scrolling
        KeyCode::Char('d') if ctrl => app.scroll_half_page_down(),
        KeyCode::Char('u') if ctrl => app.scroll_half_page_up(),
        KeyCode::Char('j') | KeyCode::Down => app.scroll_down(1),
        KeyCode::Char('k') | KeyCode::Up => app.scroll_up(1),
        KeyCode::PageDown => app.scroll_half_page_down(),
        KeyCode::PageUp => app.scroll_half_page_up(),
        KeyCode::Char('g') | KeyCode::Home => app.scroll_to_top(),
        KeyCode::Char('G') | KeyCode::End => app.scroll_to_bottom(),

        // Panels and actions
        KeyCode::Char('o') => app.open_options_popup(),
        KeyCode::Char('a') => app.open_attach_popup(),
        KeyCode::Char('x') => app.remove_last_attachment(),
        KeyCode::Char('C') => app.clear_chat(),
        KeyCode::Char('t') => app.toggle_theme(),
        KeyCode::Esc => app.status = None,

        _ => {}
    }
}

fn handle_editing_mode(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.input_mode = InputMode::Normal,
        KeyCode::Enter => app.send_message(),
        // Ctrl+O / Ctrl+A reach the panels without leaving the composer
        KeyCode::Char('o') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.open_options_popup()
        }
        KeyCode::Char('a') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.open_attach_popup()
        }
        _ => edit_buffer(&mut app.composer, key),
    }
}

fn handle_options_popup(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('o') | KeyCode::Char('q') => app.popup = None,
        KeyCode::Char('j') | KeyCode::Down | KeyCode::Tab => app.options_next(),
        KeyCode::Char('k') | KeyCode::Up | KeyCode::BackTab => app.options_prev(),
        KeyCode::Char('l') | KeyCode::Right | KeyCode::Enter | KeyCode::Char(' ') => {
            app.cycle_selected_option(true)
        }
        KeyCode::Char('h') | KeyCode::Left => app.cycle_selected_option(false),
        KeyCode::Char('r') => app.reset_options(),
        _ => {}
    }
}

fn handle_attach_popup(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.popup = None;
            app.attach_errors.clear();
        }
        KeyCode::Enter => {
            app.attach_from_input();
        }
        _ => edit_buffer(&mut app.attach_input, key),
    }
}

/// Cursor movement and character entry shared by every text field
fn edit_buffer(input: &mut InputBuffer, key: KeyEvent) {
    match key.code {
        KeyCode::Backspace => input.backspace(),
        KeyCode::Delete => input.delete(),
        KeyCode::Left => input.move_left(),
        KeyCode::Right => input.move_right(),
        KeyCode::Home => input.move_home(),
        KeyCode::End => input.move_end(),
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => input.clear(),
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            input.insert_char(c)
        }
        _ => {}
    }
}

fn handle_paste(app: &mut App, text: &str) {
    match (app.popup, app.input_mode) {
        (Some(Popup::Attach), _) => app.attach_input.insert_str(text.trim()),
        (None, InputMode::Editing) => app.composer.insert_str(text),
        _ => {}
    }
}

fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    if app.popup.is_some() {
        return;
    }
    match mouse.kind {
        MouseEventKind::ScrollUp => app.scroll_up(MOUSE_SCROLL_LINES),
        MouseEventKind::ScrollDown => app.scroll_down(MOUSE_SCROLL_LINES),
        _ => {}
    }
}
