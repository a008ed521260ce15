use crate::config::types::{
    Config, CrawlerConfig, OutputConfig, SchedulerConfig, SearchConfig, UserAgentConfig,
};
use crate::search::KNOWN_ENGINES;
use crate::ConfigError;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_search_config(&config.search)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_output_config(&config.output)?;
    validate_scheduler_config(&config.scheduler)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.global_concurrency < 1 || config.global_concurrency > 100 {
        return Err(ConfigError::Validation(format!(
            "global_concurrency must be between 1 and 100, got {}",
            config.global_concurrency
        )));
    }

    if !(config.per_host_rate_limit > 0.0) || !config.per_host_rate_limit.is_finite() {
        return Err(ConfigError::Validation(format!(
            "per_host_rate_limit must be a positive number, got {}",
            config.per_host_rate_limit
        )));
    }

    if config.request_timeout == 0 || config.connect_timeout == 0 {
        return Err(ConfigError::Validation(
            "request_timeout and connect_timeout must be at least 1 second".to_string(),
        ));
    }

    if config
        .default_region
        .parse::<phonenumber::country::Id>()
        .is_err()
    {
        return Err(ConfigError::Validation(format!(
            "default_region must be a two-letter region code, got '{}'",
            config.default_region
        )));
    }

    Ok(())
}

/// Validates seed discovery configuration
fn validate_search_config(config: &SearchConfig) -> Result<(), ConfigError> {
    if config.max_results_per_engine == 0 || config.max_pages == 0 {
        return Err(ConfigError::Validation(
            "max_results_per_engine and max_pages must be at least 1".to_string(),
        ));
    }

    if config.redirect_timeout == 0 {
        return Err(ConfigError::Validation(
            "redirect_timeout must be at least 1 second".to_string(),
        ));
    }

    for engine in &config.engines {
        let name = engine.trim().to_ascii_lowercase();
        if !KNOWN_ENGINES.contains(&name.as_str()) {
            return Err(ConfigError::Validation(format!(
                "Unknown search engine '{}', expected one of: {}",
                engine,
                KNOWN_ENGINES.join(", ")
            )));
        }
    }

    Ok(())
}

/// Validates the user agent pool
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    if config.agents.is_empty() {
        return Err(ConfigError::Validation(
            "user-agent.agents must contain at least one entry".to_string(),
        ));
    }

    if config.agents.iter().any(|a| a.trim().is_empty()) {
        return Err(ConfigError::Validation(
            "user-agent.agents cannot contain empty strings".to_string(),
        ));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.data_dir.as_os_str().is_empty() {
        return Err(ConfigError::InvalidPath(
            "data_dir cannot be empty".to_string(),
        ));
    }

    if config.export_dir.as_os_str().is_empty() {
        return Err(ConfigError::InvalidPath(
            "export_dir cannot be empty".to_string(),
        ));
    }

    Ok(())
}

fn validate_scheduler_config(config: &SchedulerConfig) -> Result<(), ConfigError> {
    if config.pause_poll_ms == 0 || config.idle_wait_ms == 0 {
        return Err(ConfigError::Validation(
            "pause_poll_ms and idle_wait_ms must be at least 1ms".to_string(),
        ));
    }

    Ok(())
}
