// src/ui.rs

pub mod footer;
pub mod form;
pub mod header;
pub mod output;
pub mod quit_confirm;

use crate::api::ContentGenerator;
use crate::app::{App, AppState, Command};
use crate::errors::{ContentError, ContentResult};
use crate::key_handlers::{handle_form_input, handle_quit_confirm_input};
use crate::orchestrator::{run_generation, Ticket};
use crossterm::{
    event::{self, Event as CEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout, Rect},
    widgets::Clear,
    Frame, Terminal,
};
use std::{
    io, thread,
    time::{Duration, Instant},
};
use tokio::sync::mpsc;

/// Enum for different types of events.
enum Event {
    Input(CEvent),
    Tick,
}

type Outcome = (Ticket, ContentResult<String>);

/// Runs the terminal UI until the user quits.
pub async fn run_ui<G: ContentGenerator + 'static>(
    app: App<G>,
    tick_rate: Duration,
) -> ContentResult<()> {
    enable_raw_mode()?;
    let mut terminal = enter_terminal(io::stdout(), || {
        if let Err(e) = disable_raw_mode() {
            log::error!("Failed to leave raw mode: {}", e);
        }
        if let Err(e) = execute!(io::stdout(), LeaveAlternateScreen) {
            log::error!("Failed to leave the alternate screen: {}", e);
        }
    })?;

    let res = run_app(&mut terminal, app, tick_rate).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

/// Switches `out` to the alternate screen. Raw mode is already on at this
/// point, so `restore` runs before any error is returned.
fn enter_terminal<W: io::Write>(
    mut out: W,
    restore: impl FnOnce(),
) -> ContentResult<Terminal<CrosstermBackend<W>>> {
    if let Err(e) = execute!(out, EnterAlternateScreen) {
        restore();
        return Err(ContentError::from(e));
    }
    match Terminal::new(CrosstermBackend::new(out)) {
        Ok(terminal) => Ok(terminal),
        Err(e) => {
            restore();
            Err(ContentError::from(e))
        }
    }
}

/// Main loop of the application.
async fn run_app<B: Backend, G: ContentGenerator + 'static>(
    terminal: &mut Terminal<B>,
    mut app: App<G>,
    tick_rate: Duration,
) -> ContentResult<()> {
    let (tx, mut rx) = mpsc::channel::<Event>(100);
    let (done_tx, mut done_rx) = mpsc::unbounded_channel::<Outcome>();

    // Terminal input is blocking, so it gets its own thread.
    thread::spawn(move || loop {
        let event = match event::poll(tick_rate) {
            Ok(true) => match event::read() {
                Ok(ev) => Event::Input(ev),
                Err(_) => continue,
            },
            Ok(false) => Event::Tick,
            Err(_) => return,
        };
        if tx.blocking_send(event).is_err() {
            return;
        }
    });

    loop {
        let now = Instant::now();
        terminal.draw(|f| draw(f, &app, now))?;

        tokio::select! {
            Some(event) = rx.recv() => match event {
                Event::Input(CEvent::Key(key)) if key.kind == KeyEventKind::Press => {
                    match app.state {
                        AppState::Form => {
                            if let Some(command) = handle_form_input(key, &mut app, Instant::now()) {
                                spawn_generation(&app, command, done_tx.clone());
                            }
                        }
                        AppState::QuitConfirm => handle_quit_confirm_input(key, &mut app),
                        AppState::Quit => {}
                    }
                }
                Event::Input(_) => {}
                Event::Tick => app.on_tick(Instant::now()),
            },
            Some((ticket, outcome)) = done_rx.recv() => {
                app.on_generation_complete(ticket, outcome);
            }
            else => break,
        }

        if app.state == AppState::Quit {
            break;
        }
    }

    Ok(())
}

/// Runs the generation on its own task; the outcome comes back through `done`.
fn spawn_generation<G: ContentGenerator + 'static>(
    app: &App<G>,
    command: Command,
    done: mpsc::UnboundedSender<Outcome>,
) {
    let Command::Generate(ticket, request) = command;
    let generator = app.orchestrator.generator();
    let settings = app.orchestrator.settings().clone();

    tokio::spawn(async move {
        let outcome = run_generation(generator.as_ref(), &settings, &request).await;
        if done.send((ticket, outcome)).is_err() {
            log::warn!("Generation finished after the UI closed");
        }
    });
}

/// Renders the whole screen.
pub fn draw<G: ContentGenerator + 'static>(f: &mut Frame, app: &App<G>, now: Instant) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(10),   // Body
            Constraint::Length(1), // Status
            Constraint::Length(1), // Footer
        ])
        .split(f.area());

    header::draw_header(f, rows[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(rows[1]);

    form::draw_form(f, columns[0], app);
    output::draw_output(f, columns[1], app, now);
    app.status_indicator.render(f, rows[2]);
    footer::draw_footer(f, rows[3], app);

    if app.state == AppState::QuitConfirm {
        let area = centered_rect(50, 30, f.area());
        f.render_widget(Clear, area);
        quit_confirm::draw_quit_confirm(f, area);
    }
}

/// A rectangle of the given percentage size centred in `r`.
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
