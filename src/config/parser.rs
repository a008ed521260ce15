use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use std::path::{Path, PathBuf};

/// Loads and parses a configuration file from the given path
///
/// The file is parsed, environment overrides are applied, and the result is
/// validated.
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let mut config = parse_config(&content)?;
    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    validate(&config)?;
    Ok(config)
}

/// Loads the configuration at `path`, or the built-in defaults when no path
/// is given
///
/// Environment overrides and validation apply in both cases.
pub fn load_config_or_default(path: Option<&Path>) -> Result<Config, ConfigError> {
    match path {
        Some(path) => load_config(path),
        None => {
            let mut config = Config::default();
            apply_env_overrides(&mut config, |key| std::env::var(key).ok());
            validate(&config)?;
            Ok(config)
        }
    }
}

/// Parses TOML content into a configuration without validating it
pub fn parse_config(content: &str) -> Result<Config, ConfigError> {
    Ok(toml::from_str(content)?)
}

/// Applies `CRAWLER_*` environment overrides to a configuration
///
/// Recognized variables:
///
/// | Variable | Effect |
/// |----------|--------|
/// | `CRAWLER_DATA_DIR` | Replaces `output.data-dir` |
/// | `CRAWLER_EXPORT_DIR` | Replaces `output.export-dir` |
/// | `CRAWLER_AUTO_LOOP` | `0`, `false`, `False` disable auto-loop; anything else enables it |
/// | `CRAWLER_LOOP_INTERVAL` | Replaces `scheduler.loop-interval`; ignored if not an integer |
///
/// # Arguments
///
/// * `config` - The configuration to update
/// * `lookup` - Variable lookup, normally `std::env::var`
pub fn apply_env_overrides<F>(config: &mut Config, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(dir) = lookup("CRAWLER_DATA_DIR").filter(|v| !v.is_empty()) {
        config.output.data_dir = PathBuf::from(dir);
    }

    if let Some(dir) = lookup("CRAWLER_EXPORT_DIR").filter(|v| !v.is_empty()) {
        config.output.export_dir = PathBuf::from(dir);
    }

    if let Some(flag) = lookup("CRAWLER_AUTO_LOOP") {
        config.scheduler.auto_loop = !matches!(flag.as_str(), "0" | "false" | "False");
    }

    if let Some(interval) = lookup("CRAWLER_LOOP_INTERVAL") {
        match interval.trim().parse::<u64>() {
            Ok(secs) => config.scheduler.loop_interval = secs,
            Err(_) => tracing::warn!("Ignoring invalid CRAWLER_LOOP_INTERVAL: {}", interval),
        }
    }
}
