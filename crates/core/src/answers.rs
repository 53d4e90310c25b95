//! The answers collected by the wizard.
//!
//! Construction goes through [`Answers::new`], which enforces the same rules
//! the interactive prompts do, so an `Answers` value is always valid.

use serde::Serialize;

use crate::color::HexColor;
use crate::error::{Error, Result};
use crate::style::DesignStyle;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Answers {
    project_name: String,
    description: String,
    style: DesignStyle,
    primary_color: Option<HexColor>,
}

impl Answers {
    /// Validate and build an answer set.
    ///
    /// `primary_color` may be empty, meaning "no brand color".
    pub fn new(
        project_name: impl Into<String>,
        description: impl Into<String>,
        style: DesignStyle,
        primary_color: Option<&str>,
    ) -> Result<Self> {
        let project_name = project_name.into();
        let description = description.into();

        validate_required("Project name", &project_name)?;
        validate_required("Description", &description)?;
        if let DesignStyle::Other(text) = &style {
            validate_required("Style description", text)?;
        }

        let primary_color = match primary_color.map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(HexColor::parse(raw)?),
        };

        Ok(Self {
            project_name,
            description,
            style,
            primary_color,
        })
    }

    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn style(&self) -> &DesignStyle {
        &self.style
    }

    pub fn primary_color(&self) -> Option<&HexColor> {
        self.primary_color.as_ref()
    }
}

/// Rejects empty input. Used by the wizard prompts as well.
pub fn validate_required(field: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(Error::Validation(format!("{field} cannot be empty.")));
    }
    Ok(())
}

/// Accepts an empty string (skip) or a valid hex color.
pub fn validate_optional_color(value: &str) -> Result<()> {
    let value = value.trim();
    if value.is_empty() || HexColor::is_valid(value) {
        Ok(())
    } else {
        Err(Error::Validation("Invalid Hex color".into()))
    }
}
