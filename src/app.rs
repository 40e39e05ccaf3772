use crate::api::ContentGenerator;
use crate::clipboard::{ClipboardSink, CopyAction};
use crate::form::RequestForm;
use crate::models::{ContentRequest, GenerationState};
use crate::orchestrator::{GenerationOrchestrator, GenerationSettings, Ticket};
use crate::prompt::missing_sections;
use crate::renderer::render_lines;
use crate::status_indicator::StatusIndicator;
use crate::errors::ContentResult;
use ratatui::{
    text::Line,
    widgets::{Paragraph, Wrap},
};
use std::{cell::Cell, time::Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Form,
    QuitConfirm,
    Quit,
}

/// Work the event loop has to carry out for the app.
#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    Generate(Ticket, ContentRequest),
}

pub struct App<G: ContentGenerator> {
    pub state: AppState,
    pub form: RequestForm,
    pub orchestrator: GenerationOrchestrator<G>,
    pub rendered: Vec<Line<'static>>,
    pub copy: CopyAction,
    pub clipboard: Box<dyn ClipboardSink>,
    pub status_indicator: StatusIndicator,
    pub scroll: u16,
    /// Inner width and height of the result pane as of the last draw.
    pub output_view: Cell<(u16, u16)>,
}

impl<G: ContentGenerator + 'static> App<G> {
    pub fn new(
        generator: G,
        settings: GenerationSettings,
        clipboard: Box<dyn ClipboardSink>,
    ) -> App<G> {
        App {
            state: AppState::Form,
            form: RequestForm::new(),
            orchestrator: GenerationOrchestrator::new(generator, settings),
            rendered: Vec::new(),
            copy: CopyAction::new(),
            clipboard,
            status_indicator: StatusIndicator::new(),
            scroll: 0,
            output_view: Cell::new((0, 0)),
        }
    }

    pub fn generation(&self) -> &GenerationState {
        self.orchestrator.state()
    }

    pub fn is_busy(&self) -> bool {
        self.generation().is_loading()
    }

    /// Starts a generation from the form. Returns `None` when the form is
    /// incomplete or a generation is already running.
    pub fn submit(&mut self) -> Option<Command> {
        let request = self.form.submit(self.is_busy())?;
        let ticket = self.orchestrator.begin(&request);
        self.rendered.clear();
        self.copy.clear();
        self.scroll = 0;
        self.status_indicator.set_thinking(true);
        self.status_indicator.clear_status();
        Some(Command::Generate(ticket, request))
    }

    pub fn reset_form(&mut self) {
        if self.form.reset(self.is_busy()) {
            self.status_indicator.set_status("Form reset");
        }
    }

    /// Applies the outcome of a generation started by [`App::submit`].
    pub fn on_generation_complete(&mut self, ticket: Ticket, outcome: ContentResult<String>) {
        if !self.orchestrator.complete(ticket, outcome) {
            return;
        }
        self.status_indicator.set_thinking(false);

        match self.orchestrator.state() {
            GenerationState::Succeeded(text) => {
                self.rendered = render_lines(text);
                let missing = missing_sections(text);
                if missing.is_empty() {
                    self.status_indicator.set_status("Strategy ready");
                } else {
                    log::warn!("Generated content is missing sections: {:?}", missing);
                    self.status_indicator.set_status(format!(
                        "Strategy ready ({} section(s) missing)",
                        missing.len()
                    ));
                }
            }
            GenerationState::Failed(_) => self.status_indicator.set_status("Generation failed"),
            _ => {}
        }
    }

    /// Copies the raw Markdown of the current result, if any.
    pub fn copy_result(&mut self, now: Instant) {
        if let GenerationState::Succeeded(text) = self.orchestrator.state() {
            let text = text.clone();
            self.copy.copy(self.clipboard.as_mut(), &text, now);
        }
    }

    pub fn is_copied(&self, now: Instant) -> bool {
        self.copy.is_acknowledged(now)
    }

    pub fn on_tick(&mut self, now: Instant) {
        self.copy.expire(now);
        if self.is_busy() {
            self.status_indicator.update_spinner();
        }
    }

    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        if self.scroll < self.max_scroll() {
            self.scroll += 1;
        }
    }

    /// Largest scroll offset that still fills the result pane, counted in
    /// wrapped rows at the pane's last drawn width.
    pub fn max_scroll(&self) -> u16 {
        let (width, height) = self.output_view.get();
        let rows = if width == 0 {
            self.rendered.len()
        } else {
            Paragraph::new(self.rendered.clone())
                .wrap(Wrap { trim: false })
                .line_count(width)
        };
        u16::try_from(rows).unwrap_or(u16::MAX).saturating_sub(height)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::clipboard::tests::MemoryClipboard;
    use crate::errors::ContentError;
    use crate::models::{GenerationPhase, Platform, Tone};
    use crate::orchestrator::tests::{settings, FakeGenerator};
    use std::time::Duration;

    pub(crate) fn app_with(outcome: fn() -> ContentResult<String>) -> App<FakeGenerator> {
        App::new(
            FakeGenerator::new(outcome),
            settings(),
            Box::new(MemoryClipboard::default()),
        )
    }

    fn fill(app: &mut App<FakeGenerator>) {
        app.form.topic = "AI in healthcare".into();
        app.form.audience = "Clinicians".into();
    }

    #[test]
    fn test_blank_form_never_transitions() {
        let mut app = app_with(|| Ok("x".into()));
        app.form.topic = "AI".into();
        assert!(app.submit().is_none());
        assert_eq!(app.generation(), &GenerationState::Idle);
    }

    #[test]
    fn test_submit_moves_to_loading_and_blocks_repeats() {
        let mut app = app_with(|| Ok("x".into()));
        fill(&mut app);

        let cmd = app.submit().expect("generation should start");
        let Command::Generate(_, request) = cmd;
        assert_eq!(request.topic(), "AI in healthcare");
        assert_eq!(request.platform(), Platform::LinkedIn);
        assert_eq!(request.tone(), Tone::Professional);
        assert!(app.is_busy());

        assert!(app.submit().is_none());
        app.reset_form();
        assert_eq!(app.form.topic, "AI in healthcare");
        assert!(app.is_busy());
    }

    #[test]
    fn test_success_renders_result() {
        let mut app = app_with(|| Ok("x".into()));
        fill(&mut app);
        let Some(Command::Generate(ticket, _)) = app.submit() else {
            panic!("expected generation");
        };

        app.on_generation_complete(ticket, Ok("## Hook\n- x".into()));
        assert_eq!(app.generation().phase(), GenerationPhase::Succeeded);
        assert!(!app.rendered.is_empty());
        assert!(!app.is_busy());
    }

    #[test]
    fn test_failure_sets_error_only() {
        let mut app = app_with(|| Ok("x".into()));
        fill(&mut app);
        let Some(Command::Generate(ticket, _)) = app.submit() else {
            panic!("expected generation");
        };

        app.on_generation_complete(ticket, Err(ContentError::EmptyResponse));
        assert_eq!(app.generation().error(), Some("No content generated from the model."));
        assert_eq!(app.generation().result(), None);
        assert!(app.rendered.is_empty());
    }

    #[test]
    fn test_reset_after_success_keeps_phase() {
        let mut app = app_with(|| Ok("x".into()));
        fill(&mut app);
        app.form.platform = Platform::Blog;
        let Some(Command::Generate(ticket, _)) = app.submit() else {
            panic!("expected generation");
        };
        app.on_generation_complete(ticket, Ok("## Hook".into()));

        app.reset_form();
        assert!(app.form.topic.is_empty());
        assert!(app.form.audience.is_empty());
        assert_eq!(app.form.platform, Platform::LinkedIn);
        assert_eq!(app.generation().phase(), GenerationPhase::Succeeded);
    }

    #[test]
    fn test_copy_acknowledgment_expires_on_tick() {
        let mut app = app_with(|| Ok("x".into()));
        fill(&mut app);
        let Some(Command::Generate(ticket, _)) = app.submit() else {
            panic!("expected generation");
        };
        app.on_generation_complete(ticket, Ok("## Hook\n- x".into()));

        let t0 = Instant::now();
        app.copy_result(t0);
        assert!(app.is_copied(t0 + Duration::from_millis(1000)));

        app.on_tick(t0 + Duration::from_millis(2000));
        assert!(!app.is_copied(t0 + Duration::from_millis(2000)));
    }

    #[test]
    fn test_scroll_counts_wrapped_rows() {
        let mut app = app_with(|| Ok("x".into()));
        fill(&mut app);
        let Some(Command::Generate(ticket, _)) = app.submit() else {
            panic!("expected generation");
        };
        let paragraph = "word ".repeat(40);
        app.on_generation_complete(ticket, Ok(format!("{}\n\nlast", paragraph.trim_end())));

        // The first paragraph alone wraps to ten rows at width 20.
        app.output_view.set((20, 4));
        for _ in 0..50 {
            app.scroll_down();
        }
        assert!(app.scroll >= 10 - 4);
        assert!(usize::from(app.scroll) > app.rendered.len());
        assert_eq!(app.scroll, app.max_scroll());

        app.scroll_up();
        assert_eq!(app.scroll, app.max_scroll() - 1);
    }

    #[test]
    fn test_copy_without_result_does_nothing() {
        let mut app = app_with(|| Ok("x".into()));
        let now = Instant::now();
        app.copy_result(now);
        assert!(!app.is_copied(now));
    }
}
