use crate::config::types::{Config, CrawlerConfig, FormRuleEntry, OutputConfig, UserAgentConfig};
use crate::ConfigError;
use scraper::Selector;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_output_config(&config.output)?;
    validate_form_rules(&config.form_rules)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.batch_size < 1 || config.batch_size > 100 {
        return Err(ConfigError::Validation(format!(
            "batch_size must be between 1 and 100, got {}",
            config.batch_size
        )));
    }

    if config.max_pages < 1 {
        return Err(ConfigError::Validation(format!(
            "max_pages must be >= 1, got {}",
            config.max_pages
        )));
    }

    if config.timeout_minutes < 1 {
        return Err(ConfigError::Validation(format!(
            "timeout_minutes must be >= 1, got {}",
            config.timeout_minutes
        )));
    }

    if config.request_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "request_timeout_secs must be >= 1, got {}",
            config.request_timeout_secs
        )));
    }

    Ok(())
}

fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    if config.value.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.csv_path.is_empty() {
        return Err(ConfigError::Validation(
            "csv_path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates form rules, including that every selector parses
fn validate_form_rules(rules: &[FormRuleEntry]) -> Result<(), ConfigError> {
    for rule in rules {
        if rule.path.is_empty() {
            return Err(ConfigError::Validation(format!(
                "Form rule '{}' must have a non-empty path",
                rule.name
            )));
        }

        if rule.name.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "Form rule for path '{}' must have a name",
                rule.path
            )));
        }

        if rule.selectors.is_empty() {
            return Err(ConfigError::Validation(format!(
                "Form rule '{}' must have at least one selector",
                rule.name
            )));
        }

        for selector in &rule.selectors {
            if Selector::parse(selector).is_err() {
                return Err(ConfigError::InvalidSelector {
                    rule: rule.name.clone(),
                    selector: selector.clone(),
                });
            }
        }
    }

    Ok(())
}
