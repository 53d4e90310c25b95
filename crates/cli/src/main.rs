//! metaprompt CLI — the main entry point.
//!
//! Commands:
//! - `generate` — Interactive wizard → draft → optional AI enhancement (default)
//! - `palette`  — Derive the secondary color for a primary hex color
//! - `models`   — Show the model priority list
//! - `onboard`  — Initialize config & starter template
//! - `doctor`   — Diagnose setup problems

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

mod commands;
mod wizard;

#[derive(Parser)]
#[command(
    name = "metaprompt",
    about = "metaprompt — generate meta-prompts for AI coding assistants",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use this config file instead of ~/.metaprompt/config.toml
    #[arg(long, global = true, env = "METAPROMPT_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Answer a few questions and generate a meta-prompt
    Generate {
        /// Override the base template path
        #[arg(short, long)]
        template: Option<PathBuf>,

        /// Override the output directory
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Enhance with Gemini without asking
        #[arg(long, conflicts_with = "no_enhance")]
        enhance: bool,

        /// Skip the enhancement step without asking
        #[arg(long)]
        no_enhance: bool,
    },

    /// Derive the secondary color for a primary hex color
    Palette {
        /// Primary color, e.g. #3B82F6 or abc
        color: String,

        /// Hue rotation in degrees (defaults to the configured rotation)
        #[arg(short, long, allow_negative_numbers = true)]
        degrees: Option<f64>,
    },

    /// Show the model priority list used for enhancement
    Models,

    /// Initialize configuration and the starter template
    Onboard,

    /// Diagnose configuration, template and API access
    Doctor,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing; stdout is reserved for prompt text
    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let config_path = cli.config.as_deref();
    let result = match cli.command.unwrap_or(Commands::Generate {
        template: None,
        output_dir: None,
        enhance: false,
        no_enhance: false,
    }) {
        Commands::Generate {
            template,
            output_dir,
            enhance,
            no_enhance,
        } => {
            let args = commands::generate::GenerateArgs {
                template,
                output_dir,
                enhance: match (enhance, no_enhance) {
                    (true, _) => Some(true),
                    (_, true) => Some(false),
                    _ => None,
                },
            };
            commands::generate::run(config_path, args).await
        }
        Commands::Palette { color, degrees } => commands::palette::run(config_path, &color, degrees),
        Commands::Models => commands::models::run(config_path),
        Commands::Onboard => commands::onboard::run(),
        Commands::Doctor => commands::doctor::run(config_path).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if is_cancelled(&*e) => {
            println!("\nOperation cancelled.");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "Command failed");
            eprintln!("❌ {e}");
            ExitCode::FAILURE
        }
    }
}

/// Whether a command failed only because the user backed out of a prompt.
fn is_cancelled(err: &(dyn std::error::Error + 'static)) -> bool {
    err.downcast_ref::<metaprompt_core::Error>()
        .is_some_and(metaprompt_core::Error::is_cancellation)
}
