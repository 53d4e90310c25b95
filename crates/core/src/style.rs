//! Style-guide library: the design aesthetics offered by the wizard and the
//! guidance text each one contributes to the meta-prompt.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A named design aesthetic, or a free-form one described by the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DesignStyle {
    Minimalist,
    NeoBrutalism,
    Glassmorphism,
    Luxury,
    Playful,
    /// User-described style; the description doubles as the guide text.
    Other(String),
}

/// Label shown for the free-form entry in menus.
pub const OTHER_LABEL: &str = "Other";

impl DesignStyle {
    /// Preset styles in menu order.
    pub const PRESETS: [DesignStyle; 5] = [
        DesignStyle::Minimalist,
        DesignStyle::NeoBrutalism,
        DesignStyle::Glassmorphism,
        DesignStyle::Luxury,
        DesignStyle::Playful,
    ];

    pub fn label(&self) -> &str {
        match self {
            DesignStyle::Minimalist => "Minimalist",
            DesignStyle::NeoBrutalism => "Neo-Brutalism",
            DesignStyle::Glassmorphism => "Glassmorphism",
            DesignStyle::Luxury => "Luxury",
            DesignStyle::Playful => "Playful",
            DesignStyle::Other(description) => description,
        }
    }

    /// Guidance text embedded verbatim in the draft.
    pub fn guide(&self) -> &str {
        match self {
            DesignStyle::Minimalist => {
                "Design should be clean and professional. Use \"Inter\" font, slate/gray color palette, subtle borders, and small border-radius. Focus on high whitespace and readability."
            }
            DesignStyle::NeoBrutalism => {
                "Design should use \"Neo-Brutalism\" trends. Use hard black borders (border-2 border-black), brutalist shadows (shadow-[4px_4px_0px_0px_rgba(0,0,0,1)]), bold typography, and high-saturation accent colors. No gradients."
            }
            DesignStyle::Glassmorphism => {
                "Design should use \"Glassmorphism\". Dark mode background with deep gradients. UI components should use semi-transparent white backgrounds with backdrop-blur-md and thin white borders."
            }
            DesignStyle::Luxury => {
                "Design should be elegant. Use a Serif font for headings (e.g., Playfair Display). Palette: Black, Charcoal, Gold/Cream. Sharp corners (rounded-none), generous padding, minimalist borders."
            }
            DesignStyle::Playful => {
                "Design should be friendly and approachable. Use rounded-2xl or rounded-3xl for cards/buttons. Pastel color palette. Soft, diffuse shadows. Sans-serif rounded fonts."
            }
            DesignStyle::Other(description) => description,
        }
    }

    /// Match a preset label, ignoring case. "Other" is not a preset.
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::PRESETS
            .into_iter()
            .find(|style| style.label().eq_ignore_ascii_case(label))
    }

    pub fn is_other(&self) -> bool {
        matches!(self, DesignStyle::Other(_))
    }

    /// Menu entries: every preset label followed by [`OTHER_LABEL`].
    pub fn menu_labels() -> Vec<String> {
        Self::PRESETS
            .iter()
            .map(|style| style.label().to_string())
            .chain(std::iter::once(OTHER_LABEL.to_string()))
            .collect()
    }
}

impl fmt::Display for DesignStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_matches_presets() {
        let labels = DesignStyle::menu_labels();
        assert_eq!(labels.len(), DesignStyle::PRESETS.len() + 1);
        for (label, preset) in labels.iter().zip(DesignStyle::PRESETS.iter()) {
            assert_eq!(label, preset.label());
        }
        assert_eq!(labels.last().map(String::as_str), Some(OTHER_LABEL));
    }

    #[test]
    fn from_label_is_case_insensitive() {
        assert_eq!(DesignStyle::from_label("neo-brutalism"), Some(DesignStyle::NeoBrutalism));
        assert_eq!(DesignStyle::from_label(" LUXURY "), Some(DesignStyle::Luxury));
        assert_eq!(DesignStyle::from_label("Other"), None);
        assert_eq!(DesignStyle::from_label("Vaporwave"), None);
    }

    #[test]
    fn other_style_uses_description_as_guide() {
        let style = DesignStyle::Other("Retro terminal, green on black".into());
        assert!(style.is_other());
        assert_eq!(style.guide(), "Retro terminal, green on black");
        assert_eq!(style.to_string(), "Retro terminal, green on black");
    }

    #[test]
    fn presets_have_guides() {
        for preset in DesignStyle::PRESETS {
            assert!(preset.guide().starts_with("Design should"));
            assert!(!preset.is_other());
        }
    }
}
