use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use drcontent::{
    api::GeminiClient,
    app::App,
    clipboard::{CopyAction, SystemClipboard},
    config::load_config,
    logging::init_logging,
    models::{ContentRequest, GenerationState, Platform, Tone},
    orchestrator::{GenerationOrchestrator, GenerationSettings},
    prompt::missing_sections,
    renderer::html_document,
    ui::run_ui,
};
use std::{
    fs,
    path::PathBuf,
    process::ExitCode,
    time::{Duration, Instant},
};

#[derive(Parser)]
#[command(name = "drcontent")]
#[command(author, version, about = "Platform-optimized content strategies from your terminal")]
struct Cli {
    /// Path to the config file (defaults to the user config directory)
    #[arg(long, global = true, env = "DRCONTENT_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive form (the default)
    Tui,

    /// Generate one strategy and print its Markdown
    Generate {
        /// What the content is about
        #[arg(long)]
        topic: String,

        /// Who the content is for
        #[arg(long)]
        audience: String,

        /// LinkedIn, Instagram, Twitter, YouTube or Blog
        #[arg(long, default_value = "LinkedIn")]
        platform: Platform,

        /// Professional, Casual, Storytelling, Informative, Witty or Urgent
        #[arg(long, default_value = "Professional")]
        tone: Tone,

        /// Also write the result as an HTML page
        #[arg(long)]
        html: Option<PathBuf>,

        /// Copy the Markdown to the clipboard. On X11 and Wayland the copy
        /// only outlives drcontent if a clipboard manager takes it over; use
        /// Ctrl+Y in the interactive form there instead.
        #[arg(long)]
        copy: bool,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv().ok();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let config = load_config(cli.config.as_deref()).context("Failed to load configuration")?;
    let _logger = init_logging(&config.log_level)?;
    log::info!("Starting drcontent with model {}", config.model);

    let client = GeminiClient::new(&config);
    let settings = GenerationSettings {
        model: config.model.clone(),
        sampling: config.sampling(),
    };

    match cli.command.unwrap_or(Commands::Tui) {
        Commands::Tui => {
            let app = App::new(client, settings, Box::new(SystemClipboard::new()));
            run_ui(app, Duration::from_millis(config.tick_rate_ms))
                .await
                .context("Terminal UI failed")?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Generate {
            topic,
            audience,
            platform,
            tone,
            html,
            copy,
        } => {
            let request = ContentRequest::new(topic, platform, audience, tone)?;
            let title = format!("{} · {}", request.topic(), request.platform().label());

            let mut orchestrator = GenerationOrchestrator::new(client, settings);
            match orchestrator.generate(request).await {
                GenerationState::Succeeded(text) => {
                    println!("{}", text);

                    let missing = missing_sections(&text);
                    if !missing.is_empty() {
                        eprintln!("Warning: missing sections: {}", missing.join(", "));
                    }

                    if let Some(path) = html {
                        fs::write(&path, html_document(&title, &text))
                            .with_context(|| format!("Failed to write {}", path.display()))?;
                        eprintln!("Wrote {}", path.display());
                    }

                    if copy && CopyAction::new().copy(&mut SystemClipboard::new(), &text, Instant::now()) {
                        eprintln!("Copied to clipboard.");
                        if cfg!(all(unix, not(target_os = "macos"))) {
                            eprintln!(
                                "Note: the copy is lost when drcontent exits unless a clipboard manager keeps it."
                            );
                        }
                    }
                    Ok(ExitCode::SUCCESS)
                }
                GenerationState::Failed(message) => {
                    eprintln!("Generation Failed: {}", message);
                    Ok(ExitCode::FAILURE)
                }
                other => {
                    log::error!("Generation ended in unexpected phase {:?}", other.phase());
                    Ok(ExitCode::FAILURE)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_copy_help_explains_clipboard_lifetime() {
        let cmd = Cli::command();
        let generate = cmd.find_subcommand("generate").expect("generate subcommand");
        let copy = generate
            .get_arguments()
            .find(|arg| arg.get_id() == "copy")
            .expect("--copy flag");
        let help = copy
            .get_long_help()
            .or_else(|| copy.get_help())
            .expect("help text")
            .to_string();
        assert!(help.contains("clipboard manager"));
    }

    #[test]
    fn test_generate_parses_platform_and_tone() {
        let cli = Cli::try_parse_from([
            "drcontent", "generate", "--topic", "AI", "--audience", "Clinicians", "--platform",
            "youtube", "--tone", "witty", "--copy",
        ])
        .expect("valid arguments");
        let Some(Commands::Generate { platform, tone, copy, .. }) = cli.command else {
            panic!("expected generate");
        };
        assert_eq!(platform, Platform::YouTube);
        assert_eq!(tone, Tone::Witty);
        assert!(copy);
    }
}
