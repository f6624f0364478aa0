use crate::config::types::{ApiConfig, Config, OutputConfig, RosterConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_api_config(&config.api)?;
    validate_roster_config(&config.roster)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates API configuration
fn validate_api_config(config: &ApiConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base-url: {}", e)))?;

    if url.cannot_be_a_base() {
        return Err(ConfigError::InvalidUrl(format!(
            "base-url must be an absolute http(s) URL, got '{}'",
            config.base_url
        )));
    }

    // The search endpoint accepts 10 to 500 results per call
    if config.results_per_call < 10 || config.results_per_call > 500 {
        return Err(ConfigError::Validation(format!(
            "results-per-call must be between 10 and 500, got {}",
            config.results_per_call
        )));
    }

    if config.max_tweets_per_user < 1 {
        return Err(ConfigError::Validation(format!(
            "max-tweets-per-user must be >= 1, got {}",
            config.max_tweets_per_user
        )));
    }

    Ok(())
}

/// Validates roster configuration
fn validate_roster_config(config: &RosterConfig) -> Result<(), ConfigError> {
    if config.path.is_empty() {
        return Err(ConfigError::Validation(
            "roster path cannot be empty".to_string(),
        ));
    }

    if config.handle_column.is_empty() {
        return Err(ConfigError::Validation(
            "handle-column cannot be empty".to_string(),
        ));
    }

    if config.tag_column_prefix.is_empty() {
        return Err(ConfigError::Validation(
            "tag-column-prefix cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.folder.is_empty() {
        return Err(ConfigError::Validation(
            "output folder cannot be empty".to_string(),
        ));
    }

    if config.rows_per_file < 1 {
        return Err(ConfigError::Validation(format!(
            "rows-per-file must be >= 1, got {}",
            config.rows_per_file
        )));
    }

    Ok(())
}
