//! # metaprompt core
//!
//! Domain types, traits, and error definitions for the metaprompt generator.
//! This crate performs no network I/O; it defines the domain model that the
//! provider and CLI crates build on.
//!
//! ## Components
//!
//! - [`color`] — deterministic secondary-color derivation (golden-angle hue rotation)
//! - [`answers`] / [`style`] — the validated wizard answers and the style-guide library
//! - [`assembler`] — turns answers + template into the draft meta-prompt
//! - [`provider`] — the text-generation capability injected into the enhancement pipeline
//! - [`output`] — template reading and draft/enhanced file writing

pub mod error;
pub mod provider;
pub mod color;
pub mod style;
pub mod answers;
pub mod assembler;
pub mod output;

// Re-export key types at crate root for ergonomics
pub use error::{Error, Result};
pub use provider::{GenerationRequest, GenerationResponse, ModelAttempt, AttemptOutcome, Provider};
pub use color::{ColorPair, HexColor, GOLDEN_ANGLE_DEGREES};
pub use style::DesignStyle;
pub use answers::Answers;
pub use assembler::PromptAssembler;
pub use output::OutputWriter;
