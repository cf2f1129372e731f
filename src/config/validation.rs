use crate::config::types::{
    Config, CrawlerConfig, ExtractConfig, OutputConfig, SiteConfig, UserAgentConfig,
};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_site_config(&config.site)?;
    validate_crawler_config(&config.crawler)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_output_config(&config.output)?;
    validate_extract_config(&config.extract)?;
    Ok(())
}

/// Validates the harvested site description
fn validate_site_config(config: &SiteConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base_url: {}", e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "base_url must use http or https, got '{}'",
            config.base_url
        )));
    }

    if config.article_prefix.len() < 2
        || !config.article_prefix.starts_with('/')
        || !config.article_prefix.ends_with('/')
    {
        return Err(ConfigError::Validation(format!(
            "article_prefix must start and end with '/', got '{}'",
            config.article_prefix
        )));
    }

    if config.excluded_patterns.iter().any(|p| p.is_empty()) {
        return Err(ConfigError::Validation(
            "excluded_patterns cannot contain empty patterns".to_string(),
        ));
    }

    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.seeds_path.as_os_str().is_empty() {
        return Err(ConfigError::Validation(
            "seeds_path cannot be empty".to_string(),
        ));
    }

    if config.article_target < 1 {
        return Err(ConfigError::Validation(format!(
            "article_target must be >= 1, got {}",
            config.article_target
        )));
    }

    if !(0.0..=1.0).contains(&config.frontier_slack) {
        return Err(ConfigError::Validation(format!(
            "frontier_slack must be between 0 and 1, got {}",
            config.frontier_slack
        )));
    }

    if config.max_retries > 100 {
        return Err(ConfigError::Validation(format!(
            "max_retries must be <= 100, got {}",
            config.max_retries
        )));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler_name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler_name must contain only alphanumeric characters and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    Url::parse(&config.contact_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact_url: {}", e)))?;

    validate_email(&config.contact_email)?;

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.repository_path.as_os_str().is_empty() {
        return Err(ConfigError::Validation(
            "repository_path cannot be empty".to_string(),
        ));
    }

    if config.corpus_path.as_os_str().is_empty() {
        return Err(ConfigError::Validation(
            "corpus_path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates extraction configuration
fn validate_extract_config(config: &ExtractConfig) -> Result<(), ConfigError> {
    if config.summary_max_chars < 16 {
        return Err(ConfigError::Validation(format!(
            "summary_max_chars must be >= 16, got {}",
            config.summary_max_chars
        )));
    }

    if config.summary_min_sentence_chars >= config.summary_max_chars {
        return Err(ConfigError::Validation(format!(
            "summary_min_sentence_chars ({}) must be smaller than summary_max_chars ({})",
            config.summary_min_sentence_chars, config.summary_max_chars
        )));
    }

    Ok(())
}

/// Basic email validation
fn validate_email(email: &str) -> Result<(), ConfigError> {
    if email.is_empty() {
        return Err(ConfigError::Validation(
            "contact_email cannot be empty".to_string(),
        ));
    }

    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2 || parts[0].is_empty() || parts[1].is_empty() {
        return Err(ConfigError::Validation(format!(
            "Invalid email format: '{}'",
            email
        )));
    }

    if !parts[1].contains('.') {
        return Err(ConfigError::Validation(format!(
            "Invalid email domain: '{}'",
            email
        )));
    }

    Ok(())
}
