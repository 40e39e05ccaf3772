use crate::{
    constants::{
        API_KEY_ENV_VAR, DEFAULT_MODEL, DEFAULT_TEMPERATURE, DEFAULT_TICK_RATE_MS, DEFAULT_TOP_K,
        DEFAULT_TOP_P, GEMINI_API_URL,
    },
    errors::{ContentError, ContentResult},
};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub model: String,
    pub api_base_url: String,
    pub api_key_var: String,
    pub temperature: f32,
    pub top_k: u32,
    pub top_p: f32,
    pub log_level: String,
    pub tick_rate_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            api_base_url: GEMINI_API_URL.to_string(),
            api_key_var: API_KEY_ENV_VAR.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            top_k: DEFAULT_TOP_K,
            top_p: DEFAULT_TOP_P,
            log_level: "info".to_string(),
            tick_rate_ms: DEFAULT_TICK_RATE_MS,
        }
    }
}

/// Sampling parameters sent with every generation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplingParams {
    pub temperature: f32,
    pub top_k: u32,
    pub top_p: f32,
}

impl Default for SamplingParams {
    fn default() -> Self {
        Self {
            temperature: DEFAULT_TEMPERATURE,
            top_k: DEFAULT_TOP_K,
            top_p: DEFAULT_TOP_P,
        }
    }
}

impl Config {
    pub fn sampling(&self) -> SamplingParams {
        SamplingParams {
            temperature: self.temperature,
            top_k: self.top_k,
            top_p: self.top_p,
        }
    }
}

/// Loads the config from `path`, or from the default location when `None`.
/// A missing file yields the defaults.
pub fn load_config(path: Option<&Path>) -> ContentResult<Config> {
    let config_path = match path {
        Some(p) => p.to_path_buf(),
        None => get_config_path()?,
    };

    if !config_path.exists() {
        return Ok(Config::default());
    }

    let config_str = fs::read_to_string(&config_path)
        .map_err(|e| ContentError::config_error(format!("Failed to read config file: {}", e)))?;

    let config: Config = serde_json::from_str(&config_str)
        .map_err(|e| ContentError::config_error(format!("Failed to parse config: {}", e)))?;

    validate_config(&config)?;
    Ok(config)
}

pub fn get_config_path() -> ContentResult<PathBuf> {
    let config_dir = dirs::config_dir()
        .ok_or_else(|| ContentError::config_error("Could not determine config directory"))?;

    Ok(config_dir.join("drcontent").join("config.json"))
}

pub fn validate_config(config: &Config) -> ContentResult<()> {
    if config.model.trim().is_empty() {
        return Err(ContentError::config_error("Model name is required"));
    }

    if config.api_base_url.trim().is_empty() {
        return Err(ContentError::config_error("API base URL is required"));
    }

    if config.api_key_var.trim().is_empty() {
        return Err(ContentError::config_error("api_key_var must name an environment variable"));
    }

    if !(0.0..=2.0).contains(&config.temperature) {
        return Err(ContentError::config_error("Temperature must be between 0.0 and 2.0"));
    }

    if !(0.0..=1.0).contains(&config.top_p) {
        return Err(ContentError::config_error("top_p must be between 0.0 and 1.0"));
    }

    if config.top_k == 0 {
        return Err(ContentError::config_error("top_k must be greater than 0"));
    }

    if config.tick_rate_ms == 0 {
        return Err(ContentError::config_error("tick_rate_ms must be greater than 0"));
    }

    Ok(())
}
