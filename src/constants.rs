// API Constants
pub const GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";
pub const API_KEY_ENV_VAR: &str = "API_KEY";
pub const API_KEY_HEADER: &str = "x-goog-api-key";

// Sampling defaults
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_TOP_K: u32 = 40;
pub const DEFAULT_TOP_P: f32 = 0.95;

// UI Constants
pub const COPY_ACK_MILLIS: u64 = 2000;
pub const DEFAULT_TICK_RATE_MS: u64 = 100;

/// Section headers every generation must contain, in order.
pub const REQUIRED_SECTIONS: [&str; 7] = [
    "Hook",
    "Main Content",
    "Hashtags",
    "Call To Action",
    "SEO Keywords",
    "Best Posting Strategy",
    "Repurpose Suggestions",
];

pub const SYSTEM_INSTRUCTION: &str = "You are an expert digital marketing strategist and content optimization specialist.
Generate highly engaging, platform-optimized content with strong hooks,
clear structure, and high engagement potential.

Your output must be strictly formatted in Markdown.
Ensure you include the following sections exactly as headers:

## Hook
## Main Content
## Hashtags
## Call To Action
## SEO Keywords
## Best Posting Strategy
## Repurpose Suggestions
";
