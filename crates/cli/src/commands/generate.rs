//! `metaprompt generate` — wizard → draft → optional AI enhancement.

use chrono::{DateTime, Utc};
use indicatif::{ProgressBar, ProgressStyle};
use metaprompt_core::error::PipelineError;
use metaprompt_core::output::read_template;
use metaprompt_core::{Answers, ColorPair, Error, OutputWriter, PromptAssembler};
use metaprompt_providers::{
    Enhanced, EnhancementPipeline, build_provider, settings_from_config,
};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

use crate::wizard;

/// Per-run overrides from the command line.
#[derive(Debug, Default)]
pub struct GenerateArgs {
    pub template: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    /// `Some` skips the confirmation prompt
    pub enhance: Option<bool>,
}

/// A draft that has been assembled and saved.
#[derive(Debug)]
pub struct Draft {
    pub text: String,
    pub path: PathBuf,
    pub palette: Option<ColorPair>,
}

/// How the run ended after the enhancement step.
#[derive(Debug)]
pub enum Delivery {
    /// Enhanced text was written next to the draft.
    Enhanced { path: PathBuf, model: String },
    /// Every model failed; the draft is the final artifact.
    DraftOnly { reason: PipelineError },
}

pub async fn run(
    config_path: Option<&Path>,
    args: GenerateArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = super::load_config(config_path)?;

    let template_path = args.template.unwrap_or_else(|| config.template_path.clone());
    let template = read_template(&template_path)?;
    let writer = OutputWriter::new(
        args.output_dir
            .unwrap_or_else(|| config.target_dir.clone()),
    );
    debug!(template = %template_path.display(), target = %writer.target_dir().display(), "Generate: ready");

    println!("Welcome to metaprompt!");
    println!("Answer a few questions to customize your Next.js app prompt.\n");

    let answers = wizard::collect_answers()?;

    let assembler = PromptAssembler::new(config.palette.rotation_degrees);
    let draft = prepare_draft(&assembler, &template, &answers, &writer, Utc::now())?;

    if let Some(palette) = &draft.palette {
        println!(
            "\n🎨 Palette: {} | {}",
            palette.primary, palette.secondary
        );
    }
    println!("📄 Basic prompt saved to: {}", draft.path.display());

    let wants_enhancement = match args.enhance {
        Some(choice) => choice,
        None => wizard::confirm_enhance()?,
    };
    if !wants_enhancement {
        println!("\n✅ Done.");
        return Ok(());
    }

    let Some(provider) = build_provider(&config)? else {
        eprintln!(
            "\n⚠️  No API key found. Set METAPROMPT_API_KEY or GEMINI_API_KEY to enable enhancement."
        );
        eprintln!("   Your basic prompt is still available at {}", draft.path.display());
        return Ok(());
    };

    let pipeline = EnhancementPipeline::new(provider, settings_from_config(&config));
    match enhance_draft(&pipeline, &config.generation.models, &writer, &draft).await? {
        Delivery::Enhanced { path, model } => {
            println!("\n⚡ Generated using model: {model}");
            println!("📄 Saved to: {}", path.display());
        }
        Delivery::DraftOnly { reason } => {
            eprintln!("\n⚠️  Enhancement failed: {reason}");
            println!("\nHere is your basic prompt (un-enhanced):\n");
            println!("{}", draft.text);
        }
    }

    Ok(())
}

/// Assemble the draft for `answers` and save it under `writer`.
pub fn prepare_draft(
    assembler: &PromptAssembler,
    template: &str,
    answers: &Answers,
    writer: &OutputWriter,
    now: DateTime<Utc>,
) -> Result<Draft, Error> {
    let palette = assembler.palette(answers);
    let text = metaprompt_core::assembler::assemble(template, answers, palette.as_ref());
    let path = writer.write_draft(answers.project_name(), &text, now)?;

    info!(
        project = %answers.project_name(),
        style = %answers.style(),
        path = %path.display(),
        "Draft saved"
    );

    Ok(Draft {
        text,
        path,
        palette,
    })
}

/// Run the model fallback chain over the saved draft and write the result.
pub async fn enhance_draft(
    pipeline: &EnhancementPipeline,
    models: &[String],
    writer: &OutputWriter,
    draft: &Draft,
) -> Result<Delivery, Error> {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(format!(
        "Enhancing with {} ({} models)...",
        pipeline.provider_name(),
        models.len()
    ));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let outcome = pipeline.enhance(&draft.text, models).await;
    spinner.finish_and_clear();

    deliver(writer, draft, outcome)
}

/// Persist a successful enhancement; an exhausted chain keeps the draft.
pub fn deliver(
    writer: &OutputWriter,
    draft: &Draft,
    outcome: Result<Enhanced, PipelineError>,
) -> Result<Delivery, Error> {
    match outcome {
        Ok(enhanced) => {
            let path = writer.write_enhanced(&draft.path, &enhanced.text)?;
            Ok(Delivery::Enhanced {
                path,
                model: enhanced.used_model,
            })
        }
        Err(reason) => Ok(Delivery::DraftOnly { reason }),
    }
}
