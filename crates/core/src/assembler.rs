//! Draft assembly: turns the wizard answers and the base template into the
//! meta-prompt handed to an AI coding assistant.
//!
//! The draft is built from four sections, in order:
//!
//! 1. **Base template** — the technical requirements file, fenced by `---`
//! 2. **Project details** — name, description, style label and style guide
//! 3. **Color palette** — the primary/secondary pair, or a "choose one" line
//! 4. **Instructions** — what the receiving AI should do with the above
//!
//! # Determinism
//!
//! Identical inputs always produce identical drafts. The only time-dependent
//! value, the file-name timestamp, is passed in by the caller.

use chrono::{DateTime, Utc};

use crate::answers::Answers;
use crate::color::{ColorPair, GOLDEN_ANGLE_DEGREES};

/// Used when the user skipped the brand color.
pub const AUTONOMOUS_PALETTE_INSTRUCTION: &str =
    "Decide on a professional color palette fitting the design style.";

/// Timestamp layout used in draft file names (ISO-8601 with `:` replaced).
const FILE_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H-%M-%S";

/// Builds drafts with a fixed hue rotation for derived secondary colors.
#[derive(Debug, Clone)]
pub struct PromptAssembler {
    rotation_degrees: f64,
}

impl Default for PromptAssembler {
    fn default() -> Self {
        Self::new(GOLDEN_ANGLE_DEGREES)
    }
}

impl PromptAssembler {
    pub fn new(rotation_degrees: f64) -> Self {
        Self { rotation_degrees }
    }

    pub fn rotation_degrees(&self) -> f64 {
        self.rotation_degrees
    }

    /// The color pair for these answers, if a primary color was given.
    pub fn palette(&self, answers: &Answers) -> Option<ColorPair> {
        answers
            .primary_color()
            .cloned()
            .map(|primary| ColorPair::from_primary(primary, self.rotation_degrees))
    }

    /// Derive the palette and assemble the draft in one step.
    pub fn draft(&self, template: &str, answers: &Answers) -> String {
        let palette = self.palette(answers);
        assemble(template, answers, palette.as_ref())
    }
}

/// Assemble the draft document.
pub fn assemble(template: &str, answers: &Answers, colors: Option<&ColorPair>) -> String {
    let style = answers.style();
    let color_instructions = match colors {
        Some(pair) => format!(
            "- **Primary Color**: {}\n\
             - **Secondary Color**: {} (Calculated via Golden Angle)\n\
             - **Requirement**: Define these as CSS variables and map them in the Tailwind v4 theme configuration.",
            pair.primary, pair.secondary
        ),
        None => AUTONOMOUS_PALETTE_INSTRUCTION.to_string(),
    };

    let draft = format!(
        "I want to build a Next.js application.\n\
         \n\
         Here is the base technical requirement:\n\
         ---\n\
         {template}\n\
         ---\n\
         \n\
         Specific Project Details:\n\
         - **Project Name**: {name}\n\
         - **Description**: {description}\n\
         - **Design Style**: {style_label}\n\
         - **Style Guide**: {style_guide}\n\
         \n\
         ## Color Palette\n\
         {color_instructions}\n\
         \n\
         INSTRUCTIONS FOR THE AI:\n\
         Please act as an expert software architect. Rewrite the above into a comprehensive System Prompt for an AI Coding Assistant.\n\
         1. Integrate project details.\n\
         2. Expand on styling with Tailwind v4 best practices.\n\
         3. Keep technical constraints (Next.js 15, TypeScript).\n",
        template = template.trim(),
        name = answers.project_name(),
        description = answers.description(),
        style_label = style.label(),
        style_guide = style.guide(),
    );

    draft.trim().to_string()
}

/// Lower-case, collapse every run outside `[a-z0-9]` into `-`, strip the ends.
pub fn sanitize_filename(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut pending_dash = false;

    for c in name.to_lowercase().chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_dash && !out.is_empty() {
                out.push('-');
            }
            pending_dash = false;
            out.push(c);
        } else {
            pending_dash = true;
        }
    }

    out
}

/// `<sanitized-name>-<YYYY-MM-DDTHH-MM-SS>.md`
pub fn draft_file_name(project_name: &str, timestamp: DateTime<Utc>) -> String {
    format!(
        "{}-{}.md",
        sanitize_filename(project_name),
        timestamp.format(FILE_TIMESTAMP_FORMAT)
    )
}

/// The enhanced sibling of a draft: `x.md` → `x-enhanced.md`.
pub fn enhanced_file_name(draft_name: &str) -> String {
    match draft_name.strip_suffix(".md") {
        Some(stem) => format!("{stem}-enhanced.md"),
        None => format!("{draft_name}-enhanced.md"),
    }
}
