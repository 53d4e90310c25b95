//! `metaprompt doctor` — Diagnose setup problems.

use metaprompt_config::AppConfig;
use metaprompt_providers::build_provider;
use std::path::Path;

pub async fn run(config_path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    println!("🩺 metaprompt Doctor — Setup Diagnostics");
    println!("========================================\n");

    let mut issues = 0;

    let file = config_path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| AppConfig::config_dir().join("config.toml"));
    if !file.exists() {
        println!("  ⚠️  No config file at {} — using defaults (run `metaprompt onboard`)", file.display());
    }

    let config = match super::load_config(config_path) {
        Ok(config) => {
            println!("  ✅ Config valid");
            config
        }
        Err(e) => {
            println!("  ❌ {e}");
            println!("\n  ⚠️  Fix the config file and re-run doctor.");
            return Ok(());
        }
    };

    // Template
    if config.template_path.is_file() {
        println!("  ✅ Template found: {}", config.template_path.display());
    } else {
        println!(
            "  ❌ Template missing: {} — run `metaprompt onboard` or set METAPROMPT_TEMPLATE",
            config.template_path.display()
        );
        issues += 1;
    }

    // Output directory
    if config.target_dir.is_dir() {
        println!("  ✅ Output directory exists: {}", config.target_dir.display());
    } else {
        println!(
            "  ✅ Output directory will be created: {}",
            config.target_dir.display()
        );
    }

    // Models
    if config.generation.models.is_empty() {
        println!("  ⚠️  No enhancement models configured");
        issues += 1;
    } else {
        println!("  ✅ {} enhancement model(s) configured", config.generation.models.len());
    }

    // API key + reachability
    match build_provider(&config) {
        Ok(Some(provider)) => {
            println!("  ✅ API key configured");
            match provider.health_check().await {
                Ok(true) => println!("  ✅ {} API reachable", provider.name()),
                Ok(false) => {
                    println!("  ⚠️  {} API responded but reported unhealthy", provider.name());
                    issues += 1;
                }
                Err(e) => {
                    println!("  ❌ {} API check failed: {e}", provider.name());
                    issues += 1;
                }
            }
        }
        Ok(None) => {
            println!("  ⚠️  No API key — set METAPROMPT_API_KEY or GEMINI_API_KEY to enable enhancement");
            issues += 1;
        }
        Err(e) => {
            println!("  ❌ Could not build provider: {e}");
            issues += 1;
        }
    }

    println!();
    if issues == 0 {
        println!("  🎉 All checks passed!");
    } else {
        println!("  ⚠️  {issues} issue(s) found. See above for details.");
    }

    Ok(())
}
