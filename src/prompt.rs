// src/prompt.rs

use crate::constants::REQUIRED_SECTIONS;
use crate::models::ContentRequest;
use pulldown_cmark::{Event, HeadingLevel, Parser, Tag, TagEnd};

/// Builds the user prompt for a request. Field values are embedded verbatim.
pub fn build_prompt(request: &ContentRequest) -> String {
    format!(
        "Topic: {}\nPlatform: {}\nTarget Audience: {}\nTone: {}\n\nCreate optimized content based on these parameters.",
        request.topic(),
        request.platform(),
        request.audience(),
        request.tone()
    )
}

/// Returns the required `##` sections that do not appear in `markdown`.
pub fn missing_sections(markdown: &str) -> Vec<&'static str> {
    let mut found: Vec<String> = Vec::new();
    let mut current: Option<String> = None;

    for event in Parser::new(markdown) {
        match event {
            Event::Start(Tag::Heading {
                level: HeadingLevel::H2,
                ..
            }) => current = Some(String::new()),
            Event::Text(text) | Event::Code(text) => {
                if let Some(buf) = current.as_mut() {
                    buf.push_str(&text);
                }
            }
            Event::End(TagEnd::Heading(HeadingLevel::H2)) => {
                if let Some(title) = current.take() {
                    found.push(title.trim().to_lowercase());
                }
            }
            _ => {}
        }
    }

    REQUIRED_SECTIONS
        .into_iter()
        .filter(|section| !found.iter().any(|title| title == &section.to_lowercase()))
        .collect()
}
