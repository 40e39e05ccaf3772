use crate::api::ContentGenerator;
use crate::app::{App, AppState, Command};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::time::Instant;

/// Handles a key press on the main screen.
pub fn handle_form_input<G: ContentGenerator + 'static>(
    key: KeyEvent,
    app: &mut App<G>,
    now: Instant,
) -> Option<Command> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('c') | KeyCode::Char('q') => app.state = AppState::QuitConfirm,
            KeyCode::Char('r') => app.reset_form(),
            KeyCode::Char('y') => app.copy_result(now),
            KeyCode::Char('u') => app.scroll_up(),
            KeyCode::Char('d') => app.scroll_down(),
            _ => {}
        }
        return None;
    }

    match key.code {
        KeyCode::Esc => app.state = AppState::QuitConfirm,
        KeyCode::Enter => return app.submit(),
        KeyCode::Tab | KeyCode::Down => app.form.focus_next(),
        KeyCode::BackTab | KeyCode::Up => app.form.focus_prev(),
        KeyCode::Left => app.form.cycle_selection(false),
        KeyCode::Right => app.form.cycle_selection(true),
        KeyCode::PageUp => app.scroll_up(),
        KeyCode::PageDown => app.scroll_down(),
        KeyCode::Backspace => app.form.delete_char(),
        KeyCode::Char(c) => {
            if app.form.focus.is_text() {
                app.form.input_char(c);
            } else if c == ' ' {
                app.form.cycle_selection(true);
            }
        }
        _ => {}
    }
    None
}

pub fn handle_quit_confirm_input<G: ContentGenerator + 'static>(key: KeyEvent, app: &mut App<G>) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Enter => {
            app.state = AppState::Quit;
        }
        KeyCode::Char('n') | KeyCode::Esc => {
            app.state = AppState::Form;
        }
        _ => {}
    }
}
