//! Owns the single generation slot and maps outcomes onto it.

use crate::{
    api::{ContentGenerator, GenerationInput},
    config::SamplingParams,
    constants::SYSTEM_INSTRUCTION,
    errors::{ContentError, ContentResult},
    models::{ContentRequest, GenerationState},
    prompt::build_prompt,
};
use std::sync::Arc;

/// Identifies one generation started by [`GenerationOrchestrator::begin`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// Model and sampling settings shared by every call.
#[derive(Debug, Clone)]
pub struct GenerationSettings {
    pub model: String,
    pub sampling: SamplingParams,
}

pub struct GenerationOrchestrator<G: ContentGenerator> {
    generator: Arc<G>,
    settings: GenerationSettings,
    state: GenerationState,
    latest: u64,
}

impl<G: ContentGenerator + 'static> GenerationOrchestrator<G> {
    pub fn new(generator: G, settings: GenerationSettings) -> Self {
        Self {
            generator: Arc::new(generator),
            settings,
            state: GenerationState::Idle,
            latest: 0,
        }
    }

    pub fn state(&self) -> &GenerationState {
        &self.state
    }

    pub fn generator(&self) -> Arc<G> {
        Arc::clone(&self.generator)
    }

    pub fn settings(&self) -> &GenerationSettings {
        &self.settings
    }

    /// Moves to `Loading`, discarding any previous outcome, and returns the
    /// ticket the outcome must be delivered with.
    pub fn begin(&mut self, request: &ContentRequest) -> Ticket {
        self.latest += 1;
        self.state = GenerationState::Loading;
        log::info!(
            "Generation #{} started: platform={} tone={}",
            self.latest,
            request.platform(),
            request.tone()
        );
        Ticket(self.latest)
    }

    /// Settles the generation identified by `ticket`. Outcomes for superseded
    /// tickets are dropped and `false` is returned.
    pub fn complete(&mut self, ticket: Ticket, outcome: ContentResult<String>) -> bool {
        if ticket.0 != self.latest || !self.state.is_loading() {
            log::warn!(
                "Ignoring stale generation #{} (latest is #{})",
                ticket.0,
                self.latest
            );
            return false;
        }

        self.state = match outcome {
            Ok(text) => {
                log::info!("Generation #{} succeeded ({} bytes)", ticket.0, text.len());
                GenerationState::Succeeded(text)
            }
            Err(err) => {
                log::error!("Generation #{} failed: {}", ticket.0, err);
                GenerationState::Failed(err.user_message())
            }
        };
        true
    }

    /// Runs one request to completion and returns the settled state.
    pub async fn generate(&mut self, request: ContentRequest) -> GenerationState {
        let ticket = self.begin(&request);
        let outcome = run_generation(self.generator.as_ref(), &self.settings, &request).await;
        self.complete(ticket, outcome);
        self.state.clone()
    }
}

/// Calls the generator for `request` and turns empty text into
/// [`ContentError::EmptyResponse`].
pub async fn run_generation<G: ContentGenerator + ?Sized>(
    generator: &G,
    settings: &GenerationSettings,
    request: &ContentRequest,
) -> ContentResult<String> {
    let prompt = build_prompt(request);
    let text = generator
        .generate_content(GenerationInput {
            model: &settings.model,
            prompt: &prompt,
            system_instruction: SYSTEM_INSTRUCTION,
            sampling: settings.sampling,
        })
        .await?;

    if text.trim().is_empty() {
        return Err(ContentError::EmptyResponse);
    }
    Ok(text)
}
