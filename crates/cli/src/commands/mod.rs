pub mod doctor;
pub mod generate;
pub mod models;
pub mod onboard;
pub mod palette;

use metaprompt_config::AppConfig;
use metaprompt_core::Error;
use std::path::Path;

/// Load configuration from `path` (or the default location) with
/// environment overrides applied.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, Error> {
    let loaded = match path {
        Some(path) => AppConfig::load_with_env(path),
        None => AppConfig::load(),
    };
    loaded.map_err(|e| Error::Config {
        message: e.to_string(),
    })
}
