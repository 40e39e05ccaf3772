// src/lib.rs

pub mod api;
pub mod app;
pub mod clipboard;
pub mod config;
pub mod constants;
pub mod errors;
pub mod form;
pub mod key_handlers;
pub mod logging;
pub mod models;
pub mod orchestrator;
pub mod prompt;
pub mod renderer;
pub mod status_indicator;
pub mod ui;
