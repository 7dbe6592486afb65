//! Configuration validation.
//!
//! Validates configuration at startup to catch common errors early.

use super::Config;
use std::collections::HashSet;
use thiserror::Error;

/// Validation errors for configuration.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("console.suggestion_limit must be at least 1")]
    ZeroSuggestionLimit,
    #[error("console.name is required")]
    MissingSourceName,
    #[error("alias name '{0}' must be a single non-empty word")]
    InvalidAliasName(String),
    #[error("alias '{0}' has an empty target")]
    EmptyAliasTarget(String),
    #[error("alias '{0}' is defined more than once")]
    DuplicateAlias(String),
}

/// Validate a configuration, returning all errors found.
pub fn validate(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.console.suggestion_limit == 0 {
        errors.push(ValidationError::ZeroSuggestionLimit);
    }
    if config.console.name.trim().is_empty() {
        errors.push(ValidationError::MissingSourceName);
    }

    let mut seen = HashSet::new();
    for alias in &config.alias {
        if alias.name.is_empty() || alias.name.contains(char::is_whitespace) {
            errors.push(ValidationError::InvalidAliasName(alias.name.clone()));
        }
        if alias.target_path().next().is_none() {
            errors.push(ValidationError::EmptyAliasTarget(alias.name.clone()));
        }
        if !seen.insert(alias.name.as_str()) {
            errors.push(ValidationError::DuplicateAlias(alias.name.clone()));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
