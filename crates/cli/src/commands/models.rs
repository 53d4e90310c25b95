//! `metaprompt models` — Show the enhancement model priority list.

use std::path::Path;

pub fn run(config_path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let config = super::load_config(config_path)?;
    let generation = &config.generation;

    println!("🤖 Enhancement models (tried in order)");
    println!("======================================\n");

    if generation.models.is_empty() {
        println!("  ⚠️  No models configured — enhancement will always fall back to the draft");
    }
    for (i, model) in generation.models.iter().enumerate() {
        println!("  {}. {model}", i + 1);
    }

    println!();
    println!("  Endpoint:    {}", generation.base_url);
    println!("  Temperature: {}", generation.temperature);
    println!("  Max tokens:  {}", generation.max_output_tokens);
    println!("  Timeout:     {}s per model", generation.request_timeout_secs);
    println!(
        "  API key:     {}",
        if config.has_api_key() { "configured" } else { "missing" }
    );

    Ok(())
}
