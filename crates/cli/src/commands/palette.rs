//! `metaprompt palette` — Derive a secondary color without running the wizard.

use metaprompt_core::{ColorPair, HexColor};
use std::path::Path;

pub fn run(
    config_path: Option<&Path>,
    color: &str,
    degrees: Option<f64>,
) -> Result<(), Box<dyn std::error::Error>> {
    let rotation = match degrees {
        Some(degrees) => degrees,
        None => super::load_config(config_path)?.palette.rotation_degrees,
    };

    let pair = derive(color, rotation)?;
    println!("Primary:   {}", pair.primary);
    println!("Secondary: {}  (hue +{rotation}°)", pair.secondary);
    Ok(())
}

fn derive(color: &str, rotation: f64) -> Result<ColorPair, Box<dyn std::error::Error>> {
    if !rotation.is_finite() {
        return Err(format!("rotation must be a finite number, got {rotation}").into());
    }
    let primary = HexColor::parse(color)?;
    Ok(ColorPair::from_primary(primary, rotation))
}
