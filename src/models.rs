// src/models.rs

use crate::errors::{ContentError, ContentResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Target platform for the generated content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Platform {
    #[default]
    LinkedIn,
    Instagram,
    Twitter,
    YouTube,
    Blog,
}

impl Platform {
    pub const ALL: [Platform; 5] = [
        Platform::LinkedIn,
        Platform::Instagram,
        Platform::Twitter,
        Platform::YouTube,
        Platform::Blog,
    ];

    /// Value sent to the model.
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::LinkedIn => "LinkedIn",
            Platform::Instagram => "Instagram",
            Platform::Twitter => "Twitter",
            Platform::YouTube => "YouTube",
            Platform::Blog => "Blog",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Platform::LinkedIn => "LinkedIn",
            Platform::Instagram => "Instagram",
            Platform::Twitter => "Twitter (X)",
            Platform::YouTube => "YouTube Description",
            Platform::Blog => "Blog Post Outline",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Platform::LinkedIn => "💼",
            Platform::Instagram => "📸",
            Platform::Twitter => "🐦",
            Platform::YouTube => "🎥",
            Platform::Blog => "📝",
        }
    }

    pub fn next(self) -> Self {
        cycle(&Self::ALL, self, 1)
    }

    pub fn prev(self) -> Self {
        cycle(&Self::ALL, self, Self::ALL.len() - 1)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown platform '{}'", s))
    }
}

/// Voice the content is written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Tone {
    #[default]
    Professional,
    Casual,
    Storytelling,
    Informative,
    Witty,
    Urgent,
}

impl Tone {
    pub const ALL: [Tone; 6] = [
        Tone::Professional,
        Tone::Casual,
        Tone::Storytelling,
        Tone::Informative,
        Tone::Witty,
        Tone::Urgent,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Professional => "Professional",
            Tone::Casual => "Casual",
            Tone::Storytelling => "Storytelling",
            Tone::Informative => "Informative",
            Tone::Witty => "Witty",
            Tone::Urgent => "Urgent",
        }
    }

    pub fn next(self) -> Self {
        cycle(&Self::ALL, self, 1)
    }

    pub fn prev(self) -> Self {
        cycle(&Self::ALL, self, Self::ALL.len() - 1)
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tone {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown tone '{}'", s))
    }
}

fn cycle<T: Copy + PartialEq>(all: &[T], current: T, step: usize) -> T {
    let idx = all.iter().position(|v| *v == current).unwrap_or(0);
    all[(idx + step) % all.len()]
}

/// A validated snapshot of the form, built fresh per submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentRequest {
    topic: String,
    platform: Platform,
    audience: String,
    tone: Tone,
}

impl ContentRequest {
    pub fn new(
        topic: impl Into<String>,
        platform: Platform,
        audience: impl Into<String>,
        tone: Tone,
    ) -> ContentResult<Self> {
        let topic = topic.into();
        let audience = audience.into();

        if topic.trim().is_empty() {
            return Err(ContentError::InvalidRequest("Topic"));
        }
        if audience.trim().is_empty() {
            return Err(ContentError::InvalidRequest("Target Audience"));
        }

        Ok(Self {
            topic,
            platform,
            audience,
            tone,
        })
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn audience(&self) -> &str {
        &self.audience
    }

    pub fn tone(&self) -> Tone {
        self.tone
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationPhase {
    Idle,
    Loading,
    Succeeded,
    Failed,
}

/// State of the single generation slot. The result and error live inside the
/// variants, so a phase always carries exactly the field it implies.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum GenerationState {
    #[default]
    Idle,
    Loading,
    Succeeded(String),
    Failed(String),
}

impl GenerationState {
    pub fn phase(&self) -> GenerationPhase {
        match self {
            GenerationState::Idle => GenerationPhase::Idle,
            GenerationState::Loading => GenerationPhase::Loading,
            GenerationState::Succeeded(_) => GenerationPhase::Succeeded,
            GenerationState::Failed(_) => GenerationPhase::Failed,
        }
    }

    pub fn result(&self) -> Option<&str> {
        match self {
            GenerationState::Succeeded(text) => Some(text),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            GenerationState::Failed(msg) => Some(msg),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, GenerationState::Loading)
    }
}

/// Logs details of each API call.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiCallLog {
    pub timestamp: DateTime<Utc>,
    pub endpoint: String,
    pub request_summary: String,
    pub response_status: u16,
    pub response_time_ms: u128,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        assert_eq!(Platform::default(), Platform::LinkedIn);
        assert_eq!(Tone::default(), Tone::Professional);
        assert_eq!(GenerationState::default().phase(), GenerationPhase::Idle);
    }

    #[test]
    fn test_cycling_wraps() {
        assert_eq!(Platform::Blog.next(), Platform::LinkedIn);
        assert_eq!(Platform::LinkedIn.prev(), Platform::Blog);
        assert_eq!(Tone::Urgent.next(), Tone::Professional);
        assert_eq!(Tone::Professional.prev(), Tone::Urgent);
        assert_eq!(Tone::Casual.next(), Tone::Storytelling);
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("youtube".parse::<Platform>(), Ok(Platform::YouTube));
        assert_eq!("WITTY".parse::<Tone>(), Ok(Tone::Witty));
        assert!("tiktok".parse::<Platform>().is_err());
    }

    #[test]
    fn test_request_requires_topic_and_audience() {
        assert!(matches!(
            ContentRequest::new("  ", Platform::Blog, "devs", Tone::Casual),
            Err(ContentError::InvalidRequest("Topic"))
        ));
        assert!(matches!(
            ContentRequest::new("Rust", Platform::Blog, "", Tone::Casual),
            Err(ContentError::InvalidRequest("Target Audience"))
        ));
    }

    #[test]
    fn test_request_keeps_fields_verbatim() {
        let req = ContentRequest::new(" Rust ", Platform::Twitter, "devs", Tone::Witty).unwrap();
        assert_eq!(req.topic(), " Rust ");
        assert_eq!(req.platform(), Platform::Twitter);
        assert_eq!(req.audience(), "devs");
        assert_eq!(req.tone(), Tone::Witty);
    }

    #[test]
    fn test_state_fields_follow_phase() {
        let ok = GenerationState::Succeeded("## Hook".into());
        assert_eq!(ok.result(), Some("## Hook"));
        assert_eq!(ok.error(), None);

        let failed = GenerationState::Failed("boom".into());
        assert_eq!(failed.result(), None);
        assert_eq!(failed.error(), Some("boom"));

        assert!(GenerationState::Loading.is_loading());
        assert_eq!(GenerationState::Loading.result(), None);
        assert_eq!(GenerationState::Loading.error(), None);
    }
}
