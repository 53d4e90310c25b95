//! `metaprompt onboard` — First-time setup.

use metaprompt_config::{AppConfig, TEMPLATE_FILE_NAME};
use std::path::Path;

/// Starter base template written on first run.
pub const STARTER_TEMPLATE: &str = include_str!("../../templates/NextJs.startup.md");

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config_dir = AppConfig::config_dir();

    println!("🚀 metaprompt — First-Time Setup");
    println!("================================\n");

    let report = initialize(&config_dir)?;

    if report.created_dir {
        println!("✅ Created config directory: {}", config_dir.display());
    } else {
        println!("  Config directory exists: {}", config_dir.display());
    }

    let template_path = config_dir.join(TEMPLATE_FILE_NAME);
    if report.created_template {
        println!("✅ Created starter template: {}", template_path.display());
    } else {
        println!("  Template exists: {}", template_path.display());
    }

    let config_path = config_dir.join("config.toml");
    if report.created_config {
        println!("✅ Created config.toml at: {}", config_path.display());
        println!("\n📝 Next steps:");
        println!("   1. Export GEMINI_API_KEY (or add api_key to {})", config_path.display());
        println!("   2. Tailor {} to your stack", template_path.display());
        println!("   3. Run: metaprompt\n");
    } else {
        println!("\n⚠️  Config already exists at: {}", config_path.display());
        println!("   Edit it manually or delete and re-run onboard.\n");
    }

    println!("🎉 Setup complete!\n");
    Ok(())
}

/// What [`initialize`] created; existing files are never overwritten.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct OnboardReport {
    pub created_dir: bool,
    pub created_config: bool,
    pub created_template: bool,
}

pub fn initialize(config_dir: &Path) -> std::io::Result<OnboardReport> {
    let mut report = OnboardReport::default();

    if !config_dir.exists() {
        std::fs::create_dir_all(config_dir)?;
        report.created_dir = true;
    }

    let template_path = config_dir.join(TEMPLATE_FILE_NAME);
    if !template_path.exists() {
        std::fs::write(&template_path, STARTER_TEMPLATE)?;
        report.created_template = true;
    }

    let config_path = config_dir.join("config.toml");
    if !config_path.exists() {
        std::fs::write(&config_path, AppConfig::default_toml())?;
        report.created_config = true;
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initialize_creates_everything_once() {
        let dir = tempfile::tempdir().unwrap();
        let config_dir = dir.path().join(".metaprompt");

        let first = initialize(&config_dir).unwrap();
        assert_eq!(
            first,
            OnboardReport {
                created_dir: true,
                created_config: true,
                created_template: true,
            }
        );
        assert_eq!(
            std::fs::read_to_string(config_dir.join(TEMPLATE_FILE_NAME)).unwrap(),
            STARTER_TEMPLATE
        );

        let written = AppConfig::load_from(&config_dir.join("config.toml")).unwrap();
        assert_eq!(written.generation.models.len(), 5);

        let second = initialize(&config_dir).unwrap();
        assert_eq!(second, OnboardReport::default());
    }

    #[test]
    fn initialize_keeps_user_template() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(TEMPLATE_FILE_NAME), "mine").unwrap();

        let report = initialize(dir.path()).unwrap();
        assert!(!report.created_template);
        assert_eq!(
            std::fs::read_to_string(dir.path().join(TEMPLATE_FILE_NAME)).unwrap(),
            "mine"
        );
    }

    #[test]
    fn starter_template_mentions_stack() {
        assert!(STARTER_TEMPLATE.contains("Next.js 15"));
        assert!(STARTER_TEMPLATE.contains("TypeScript"));
    }
}
