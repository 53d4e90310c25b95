//! Secondary-color derivation.
//!
//! A primary brand color is converted to HSL, its hue rotated (by default
//! by the golden angle, 137.5°) and converted back. Repeated rotations from
//! any starting hue spread over the color wheel without clustering.
//!
//! Achromatic inputs (black, white, grays) have saturation 0, so the rotated
//! hue has no effect and the output stays achromatic.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ColorError;

/// Default hue rotation in degrees (≈ the golden angle).
pub const GOLDEN_ANGLE_DEGREES: f64 = 137.5;

/// A validated color, stored as 6 lowercase hex digits.
///
/// Displays with a leading `#`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor(String);

impl HexColor {
    /// Parse `#rgb`, `rgb`, `#rrggbb` or `rrggbb` (any case).
    pub fn parse(input: &str) -> Result<Self, ColorError> {
        let trimmed = input.trim();
        let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);

        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorError::InvalidHex(input.to_string()));
        }

        let normalized = match digits.len() {
            3 => digits
                .chars()
                .flat_map(|c| [c, c])
                .collect::<String>()
                .to_ascii_lowercase(),
            6 => digits.to_ascii_lowercase(),
            _ => return Err(ColorError::InvalidHex(input.to_string())),
        };

        Ok(Self(normalized))
    }

    /// Whether `input` is acceptable to [`HexColor::parse`].
    pub fn is_valid(input: &str) -> bool {
        Self::parse(input).is_ok()
    }

    /// The six lowercase digits, without `#`.
    pub fn digits(&self) -> &str {
        &self.0
    }

    pub fn to_rgb(&self) -> [u8; 3] {
        let channel = |i: usize| u8::from_str_radix(&self.0[i..i + 2], 16).unwrap_or(0);
        [channel(0), channel(2), channel(4)]
    }

    pub fn from_rgb([r, g, b]: [u8; 3]) -> Self {
        Self(format!("{r:02x}{g:02x}{b:02x}"))
    }

    /// Whether all three channels are equal (black, white, grays).
    pub fn is_achromatic(&self) -> bool {
        let [r, g, b] = self.to_rgb();
        r == g && g == b
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl FromStr for HexColor {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for HexColor {
    type Error = ColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<HexColor> for String {
    fn from(color: HexColor) -> Self {
        color.to_string()
    }
}

/// A primary color and the secondary derived from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorPair {
    pub primary: HexColor,
    pub secondary: HexColor,
}

impl ColorPair {
    pub fn from_primary(primary: HexColor, rotation_degrees: f64) -> Self {
        let secondary = derive_secondary(&primary, rotation_degrees);
        Self { primary, secondary }
    }
}

/// Rotate the hue of `primary` by `rotation_degrees` (mod 360).
pub fn derive_secondary(primary: &HexColor, rotation_degrees: f64) -> HexColor {
    let [r, g, b] = primary.to_rgb().map(|c| f64::from(c) / 255.0);
    let (hue, saturation, lightness) = rgb_to_hsl(r, g, b);

    let rotated = (hue * 360.0 + rotation_degrees).rem_euclid(360.0) / 360.0;
    let rgb = hsl_to_rgb(rotated, saturation, lightness);

    HexColor::from_rgb(rgb.map(to_channel))
}

/// String-level convenience over [`derive_secondary`]; returns `#rrggbb`.
pub fn derive_secondary_hex(primary: &str, rotation_degrees: f64) -> Result<String, ColorError> {
    let color = HexColor::parse(primary)?;
    Ok(derive_secondary(&color, rotation_degrees).to_string())
}

/// Returns (h, s, l), each in [0, 1].
fn rgb_to_hsl(r: f64, g: f64, b: f64) -> (f64, f64, f64) {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;

    if max == min {
        return (0.0, 0.0, l);
    }

    let d = max - min;
    let s = if l > 0.5 { d / (2.0 - max - min) } else { d / (max + min) };
    let h = if max == r {
        (g - b) / d + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };

    (h / 6.0, s, l)
}

fn hsl_to_rgb(h: f64, s: f64, l: f64) -> [f64; 3] {
    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;
    [
        hue_to_rgb(p, q, h + 1.0 / 3.0),
        hue_to_rgb(p, q, h),
        hue_to_rgb(p, q, h - 1.0 / 3.0),
    ]
}

fn hue_to_rgb(p: f64, q: f64, mut t: f64) -> f64 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 1.0 / 2.0 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

fn to_channel(value: f64) -> u8 {
    (value * 255.0).round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hex(s: &str) -> HexColor {
        HexColor::parse(s).unwrap()
    }

    fn within_one(a: &HexColor, b: &HexColor) -> bool {
        a.to_rgb()
            .iter()
            .zip(b.to_rgb().iter())
            .all(|(x, y)| (i16::from(*x) - i16::from(*y)).abs() <= 1)
    }

    #[test]
    fn parse_normalizes_case_and_prefix() {
        assert_eq!(hex("#3B82F6").digits(), "3b82f6");
        assert_eq!(hex("3b82f6").to_string(), "#3b82f6");
        assert_eq!(hex("  #ABC ").digits(), "aabbcc");
    }

    #[test]
    fn parse_rejects_malformed_input() {
        for bad in ["", "#", "12", "1234", "#12345", "#1234567", "ggg", "#12345z", "##abc"] {
            assert!(HexColor::parse(bad).is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn golden_angle_reference_values() {
        assert_eq!(derive_secondary(&hex("#3b82f6"), GOLDEN_ANGLE_DEGREES).to_string(), "#f63b4b");
        assert_eq!(derive_secondary(&hex("#ff0000"), GOLDEN_ANGLE_DEGREES).to_string(), "#00ff4a");
        assert_eq!(derive_secondary(&hex("#123456"), GOLDEN_ANGLE_DEGREES).to_string(), "#561220");
    }

    #[test]
    fn other_rotations() {
        assert_eq!(derive_secondary(&hex("#ff0000"), 180.0).to_string(), "#00ffff");
        assert_eq!(derive_secondary(&hex("#0000ff"), 180.0).to_string(), "#ffff00");
        assert_eq!(derive_secondary(&hex("#3b82f6"), 90.0).to_string(), "#f63bdf");
    }

    #[test]
    fn negative_rotation_wraps() {
        let forward = derive_secondary(&hex("#ff0000"), 180.0);
        let backward = derive_secondary(&hex("#ff0000"), -180.0);
        assert_eq!(forward, backward);
    }

    #[test]
    fn output_is_six_lowercase_digits() {
        for input in ["#000000", "#ffffff", "#3B82F6", "#F0A", "#7f3fbf", "#c7fecb", "#00ff00"] {
            let out = derive_secondary(&hex(input), GOLDEN_ANGLE_DEGREES);
            assert_eq!(out.digits().len(), 6);
            assert!(out
                .digits()
                .chars()
                .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
        }
    }

    #[test]
    fn three_digit_expansion_matches_six_digit() {
        assert_eq!(
            derive_secondary_hex("abc", GOLDEN_ANGLE_DEGREES).unwrap(),
            derive_secondary_hex("aabbcc", GOLDEN_ANGLE_DEGREES).unwrap()
        );
        assert_eq!(derive_secondary_hex("abc", GOLDEN_ANGLE_DEGREES).unwrap(), "#ccaab1");
    }

    #[test]
    fn achromatic_inputs_stay_achromatic() {
        for input in ["#000000", "#ffffff", "#808080", "#333", "#c0c0c0"] {
            for degrees in [0.0, 45.0, 90.0, GOLDEN_ANGLE_DEGREES, 180.0, 300.0, -60.0] {
                let out = derive_secondary(&hex(input), degrees);
                assert!(out.is_achromatic(), "{input} rotated by {degrees} gave {out}");
                assert_eq!(out, hex(input));
            }
        }
    }

    #[test]
    fn rotating_back_restores_the_primary() {
        let samples = [
            "#3b82f6", "#ff0000", "#00ff00", "#123456", "#ff8800", "#abcdef", "#7f3fbf",
            "#c7fecb", "#0f0f10", "#fe01a2",
        ];
        for input in samples {
            for degrees in [GOLDEN_ANGLE_DEGREES, 90.0, 45.0, 200.0] {
                let original = hex(input);
                let there = derive_secondary(&original, degrees);
                let back = derive_secondary(&there, 360.0 - degrees);
                assert!(
                    within_one(&original, &back),
                    "{input} by {degrees}: came back as {back}"
                );
            }
        }
    }

    #[test]
    fn derivation_is_deterministic() {
        let a = derive_secondary(&hex("#3b82f6"), GOLDEN_ANGLE_DEGREES);
        let b = derive_secondary(&hex("#3b82f6"), GOLDEN_ANGLE_DEGREES);
        assert_eq!(a, b);
    }

    #[test]
    fn color_pair_from_primary() {
        let pair = ColorPair::from_primary(hex("#3B82F6"), GOLDEN_ANGLE_DEGREES);
        assert_eq!(pair.primary.to_string(), "#3b82f6");
        assert_eq!(pair.secondary.to_string(), "#f63b4b");
    }

    #[test]
    fn serde_uses_hash_prefixed_string() {
        let color = hex("ABC");
        let json = serde_json::to_string(&color).unwrap();
        assert_eq!(json, "\"#aabbcc\"");
        let parsed: HexColor = serde_json::from_str("\"#3B82F6\"").unwrap();
        assert_eq!(parsed.digits(), "3b82f6");
        assert!(serde_json::from_str::<HexColor>("\"blue\"").is_err());
    }
}
