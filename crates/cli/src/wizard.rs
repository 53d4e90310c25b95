//! Interactive question flow for `metaprompt generate`.
//!
//! An interrupted prompt (Ctrl+C) surfaces as `Error::Cancelled`, which
//! `main` turns into a clean exit.

use dialoguer::{Confirm, Error as DialoguerError, Input, Select};
use metaprompt_core::answers::{validate_optional_color, validate_required};
use metaprompt_core::{Answers, DesignStyle, Error};
use std::io::ErrorKind;

/// Ask the four project questions and build validated answers.
pub fn collect_answers() -> Result<Answers, Error> {
    let project_name = prompt_required("What is the name of your project?", "Project name")?;
    let description = prompt_required("Provide a short description", "Description")?;
    let style = prompt_style()?;
    let color = prompt_color()?;

    Answers::new(project_name, description, style, Some(&color))
}

/// Ask whether the draft should be sent for AI enhancement.
pub fn confirm_enhance() -> Result<bool, Error> {
    read_prompt(
        Confirm::new()
            .with_prompt("Would you like to enhance this metaprompt using Gemini AI?")
            .default(true)
            .interact(),
        "enhancement choice",
    )
}

fn prompt_required(prompt: &str, field: &'static str) -> Result<String, Error> {
    read_prompt(
        Input::<String>::new()
            .with_prompt(prompt)
            .validate_with(|input: &String| -> Result<(), String> {
                validate_required(field, input).map_err(|e| e.to_string())
            })
            .interact_text(),
        field,
    )
}

fn prompt_style() -> Result<DesignStyle, Error> {
    let labels = DesignStyle::menu_labels();
    let index = read_prompt(
        Select::new()
            .with_prompt("Choose a design style")
            .items(&labels)
            .default(0)
            .interact(),
        "design style",
    )?;

    if let Some(preset) = DesignStyle::PRESETS.get(index) {
        return Ok(preset.clone());
    }

    let custom = prompt_required("Please describe the \"Other\" style", "Style description")?;
    Ok(DesignStyle::Other(custom))
}

fn prompt_color() -> Result<String, Error> {
    read_prompt(
        Input::<String>::new()
            .with_prompt("Enter a primary hex color (e.g. #3B82F6) or press Enter to skip")
            .allow_empty(true)
            .validate_with(|input: &String| -> Result<(), String> {
                validate_optional_color(input).map_err(|e| e.to_string())
            })
            .interact_text(),
        "primary color",
    )
}

fn read_prompt<T>(result: dialoguer::Result<T>, what: &str) -> Result<T, Error> {
    match result {
        Ok(value) => Ok(value),
        Err(DialoguerError::IO(err)) if err.kind() == ErrorKind::Interrupted => {
            Err(Error::Cancelled)
        }
        Err(err) => Err(Error::Internal(format!("Failed to read {what}: {err}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interrupted_prompt_is_cancellation() {
        let result: dialoguer::Result<String> =
            Err(DialoguerError::IO(std::io::Error::from(ErrorKind::Interrupted)));
        let err = read_prompt(result, "name").unwrap_err();
        assert!(err.is_cancellation());
    }

    #[test]
    fn other_io_errors_propagate() {
        let result: dialoguer::Result<String> =
            Err(DialoguerError::IO(std::io::Error::from(ErrorKind::BrokenPipe)));
        let err = read_prompt(result, "name").unwrap_err();
        assert!(!err.is_cancellation());
        assert!(err.to_string().contains("Failed to read name"));
    }

    #[test]
    fn answered_prompt_passes_through() {
        let result: dialoguer::Result<bool> = Ok(true);
        assert!(read_prompt(result, "choice").unwrap());
    }
}
