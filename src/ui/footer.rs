use crate::api::ContentGenerator;
use crate::app::{App, AppState};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    widgets::Paragraph,
    Frame,
};

/// Draws the footer with dynamic instructions
pub fn draw_footer<G: ContentGenerator + 'static>(f: &mut Frame<'_>, area: Rect, app: &App<G>) {
    let instructions = match app.state {
        AppState::QuitConfirm => "Press 'y' to confirm quit or 'n' to cancel.",
        _ if app.is_busy() => "Generating... PgUp/PgDn scroll, Esc to quit.",
        _ => "Tab/↑↓ move, ←→ change, Enter generate, Ctrl+R reset, Ctrl+Y copy, PgUp/PgDn scroll, Esc quit.",
    };

    let footer = Paragraph::new(instructions)
        .style(Style::default().fg(Color::LightCyan))
        .alignment(Alignment::Center);

    f.render_widget(footer, area);
}
