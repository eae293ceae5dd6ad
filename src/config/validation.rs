//! Configuration validation for mixfile-tools.

use super::types::{AppConfig, NormalizeConfig, OutputConfig, ProviderConfig};

// ============================================================================
// Configuration Error
// ============================================================================

/// Error type for configuration validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    /// The field that failed validation
    pub field: String,
    /// Description of the validation error
    pub message: String,
}

impl ConfigError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Validation Trait
// ============================================================================

/// Trait for validatable configuration types.
pub trait Validatable {
    /// Validate the configuration, returning any errors found.
    fn validate(&self) -> Vec<ConfigError>;

    /// Check if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

// ============================================================================
// Validation Implementations
// ============================================================================

impl Validatable for AppConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        errors.extend(self.provider.validate());
        errors.extend(self.output.validate());
        errors.extend(self.normalize.validate());
        errors
    }
}

impl Validatable for ProviderConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        // A disabled provider is never run, so its settings do not matter.
        if !self.enabled {
            return errors;
        }
        if self.command.trim().is_empty() {
            errors.push(ConfigError::new("provider.command", "Command must not be empty"));
        }
        if self.timeout_secs == 0 {
            errors.push(ConfigError::new(
                "provider.timeout_secs",
                "Timeout must be at least 1 second",
            ));
        }
        errors
    }
}

impl Validatable for OutputConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if let Some(parent) = self.file.as_ref().and_then(|file| file.parent()) {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                errors.push(ConfigError::new(
                    "output.file",
                    format!("Parent directory does not exist: {}", parent.display()),
                ));
            }
        }
        errors
    }
}

impl Validatable for NormalizeConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if self.max_passes == Some(0) {
            errors.push(ConfigError::new(
                "normalize.max_passes",
                "At least one pass is required",
            ));
        }
        errors
    }
}
