use crate::api::ContentGenerator;
use crate::app::App;
use crate::models::GenerationState;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use std::time::Instant;

pub fn draw_output<G: ContentGenerator + 'static>(
    f: &mut Frame<'_>,
    area: Rect,
    app: &App<G>,
    now: Instant,
) {
    match app.generation() {
        GenerationState::Idle => draw_empty(f, area),
        GenerationState::Loading => draw_loading(f, area, app.status_indicator.spinner_frame()),
        GenerationState::Failed(message) => draw_error(f, area, message),
        GenerationState::Succeeded(_) => draw_result(f, area, app, now),
    }
}

fn draw_empty(f: &mut Frame<'_>, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let text = vec![
        Line::from(""),
        Line::from(""),
        Line::from("🚀"),
        Line::from(""),
        Line::from(Span::styled(
            "Ready to Takeoff?",
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Configure your strategy on the left and watch the AI magic happen right here.",
            Style::default().fg(Color::Gray),
        )),
    ];

    f.render_widget(
        Paragraph::new(text)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        area,
    );
}

fn draw_loading(f: &mut Frame<'_>, area: Rect, spinner: &str) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Magenta));

    let text = vec![
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled(
            spinner.to_string(),
            Style::default().fg(Color::LightMagenta),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Crafting your strategy...",
            Style::default().fg(Color::Gray),
        )),
    ];

    f.render_widget(
        Paragraph::new(text).block(block).alignment(Alignment::Center),
        area,
    );
}

fn draw_error(f: &mut Frame<'_>, area: Rect, message: &str) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(
            " ⚠ Generation Failed ",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ))
        .border_style(Style::default().fg(Color::Red));

    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            message.to_string(),
            Style::default().fg(Color::LightRed),
        )),
    ];

    f.render_widget(
        Paragraph::new(text).block(block).wrap(Wrap { trim: true }),
        area,
    );
}

fn draw_result<G: ContentGenerator + 'static>(
    f: &mut Frame<'_>,
    area: Rect,
    app: &App<G>,
    now: Instant,
) {
    let copy_label = if app.is_copied(now) {
        Span::styled(
            " ✓ Copied ",
            Style::default()
                .fg(Color::Black)
                .bg(Color::LightGreen)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        Span::styled(" Copy ^Y ", Style::default().fg(Color::Gray))
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(
            " ✨ Strategy Blueprint ",
            Style::default()
                .fg(Color::LightMagenta)
                .add_modifier(Modifier::BOLD),
        ))
        .title_top(Line::from(copy_label).right_aligned())
        .border_style(Style::default().fg(Color::Magenta));

    let inner = block.inner(area);
    app.output_view.set((inner.width, inner.height));
    let scroll = app.scroll.min(app.max_scroll());

    f.render_widget(
        Paragraph::new(app.rendered.clone())
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((scroll, 0)),
        area,
    );
}
