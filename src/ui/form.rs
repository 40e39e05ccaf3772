use crate::api::ContentGenerator;
use crate::app::App;
use crate::form::FormField;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

const TOPIC_PLACEHOLDER: &str = "e.g., The future of AI in healthcare";
const AUDIENCE_PLACEHOLDER: &str = "e.g., Small business owners";

pub fn draw_form<G: ContentGenerator + 'static>(f: &mut Frame<'_>, area: Rect, app: &App<G>) {
    let busy = app.is_busy();
    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(
            " ✨ Content Engine ",
            Style::default()
                .fg(Color::LightMagenta)
                .add_modifier(Modifier::BOLD),
        ))
        .border_style(Style::default().fg(Color::Magenta));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Topic
            Constraint::Length(3), // Platform
            Constraint::Length(3), // Tone
            Constraint::Length(3), // Audience
            Constraint::Length(2), // Buttons
            Constraint::Min(0),
        ])
        .split(inner);

    let form = &app.form;
    draw_text_field(
        f,
        chunks[0],
        "Topic",
        &form.topic,
        TOPIC_PLACEHOLDER,
        form.focus == FormField::Topic,
        busy,
    );
    draw_selector(
        f,
        chunks[1],
        "Platform",
        format!("{} {}", form.platform.icon(), form.platform.label()),
        form.focus == FormField::Platform,
        busy,
    );
    draw_selector(
        f,
        chunks[2],
        "Tone",
        form.tone.to_string(),
        form.focus == FormField::Tone,
        busy,
    );
    draw_text_field(
        f,
        chunks[3],
        "Target Audience",
        &form.audience,
        AUDIENCE_PLACEHOLDER,
        form.focus == FormField::Audience,
        busy,
    );
    draw_buttons(f, chunks[4], busy, form.can_submit());
}

fn field_block(title: &str, focused: bool, busy: bool) -> Block<'static> {
    let color = if busy {
        Color::DarkGray
    } else if focused {
        Color::LightMagenta
    } else {
        Color::Gray
    };
    Block::default()
        .borders(Borders::ALL)
        .title(title.to_string())
        .border_style(Style::default().fg(color))
}

fn draw_text_field(
    f: &mut Frame<'_>,
    area: Rect,
    title: &str,
    value: &str,
    placeholder: &str,
    focused: bool,
    busy: bool,
) {
    let content = if value.is_empty() {
        Span::styled(placeholder.to_string(), Style::default().fg(Color::DarkGray))
    } else {
        Span::styled(value.to_string(), Style::default().fg(Color::White))
    };
    f.render_widget(
        Paragraph::new(Line::from(content)).block(field_block(title, focused, busy)),
        area,
    );

    if focused && !busy {
        let max_x = area.x + area.width.saturating_sub(2);
        let x = (area.x + 1 + value.width() as u16).min(max_x);
        f.set_cursor_position((x, area.y + 1));
    }
}

fn draw_selector(f: &mut Frame<'_>, area: Rect, title: &str, value: String, focused: bool, busy: bool) {
    let arrow = Style::default().fg(if focused && !busy {
        Color::LightMagenta
    } else {
        Color::DarkGray
    });
    let line = Line::from(vec![
        Span::styled("◀ ", arrow),
        Span::styled(value, Style::default().fg(Color::White)),
        Span::styled(" ▶", arrow),
    ]);
    f.render_widget(
        Paragraph::new(line).block(field_block(title, focused, busy)),
        area,
    );
}

fn draw_buttons(f: &mut Frame<'_>, area: Rect, busy: bool, ready: bool) {
    let disabled = Style::default()
        .fg(Color::DarkGray)
        .add_modifier(Modifier::DIM);

    let reset = if busy {
        Span::styled("[ Reset ^R ]", disabled)
    } else {
        Span::styled("[ Reset ^R ]", Style::default().fg(Color::Gray))
    };

    let generate = if busy {
        Span::styled("[ Processing... ]", disabled)
    } else if ready {
        Span::styled(
            "[ Generate ⏎ ]",
            Style::default()
                .fg(Color::Black)
                .bg(Color::LightMagenta)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        Span::styled("[ Generate ⏎ ]", Style::default().fg(Color::Gray))
    };

    let line = Line::from(vec![Span::raw(" "), reset, Span::raw("  "), generate]);
    f.render_widget(Paragraph::new(vec![Line::from(""), line]), area);
}
