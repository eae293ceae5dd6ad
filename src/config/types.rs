//! Configuration types for mixfile-tools operations.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::defaults::{DEFAULT_PROVIDER_ARGS, DEFAULT_PROVIDER_COMMAND, DEFAULT_PROVIDER_TIMEOUT};

// ============================================================================
// Unified Application Configuration
// ============================================================================

/// Unified application configuration that can be loaded from CLI args or config files.
///
/// CLI arguments are layered over file settings with [`AppConfig::merge`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppConfig {
    /// Structure identifier generator
    pub provider: ProviderConfig,
    /// Output configuration (format, file)
    pub output: OutputConfig,
    /// Concentration normalization
    pub normalize: NormalizeConfig,
}

impl AppConfig {
    /// Create a new `AppConfig` with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an `AppConfig` builder.
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }
}

// ============================================================================
// Builder for AppConfig
// ============================================================================

/// Builder for constructing `AppConfig` with fluent API.
#[derive(Debug, Default)]
#[must_use]
pub struct AppConfigBuilder {
    config: AppConfig,
}

impl AppConfigBuilder {
    /// Set the InChI generator executable.
    pub fn provider_command(mut self, command: impl Into<String>) -> Self {
        self.config.provider.command = command.into();
        self
    }

    /// Set the arguments passed to the generator.
    pub fn provider_args(mut self, args: Vec<String>) -> Self {
        self.config.provider.args = args;
        self
    }

    /// Set the per-structure generator timeout.
    pub const fn provider_timeout(mut self, secs: u64) -> Self {
        self.config.provider.timeout_secs = secs;
        self
    }

    /// Enable or disable identifier generation.
    pub const fn provider_enabled(mut self, enabled: bool) -> Self {
        self.config.provider.enabled = enabled;
        self
    }

    /// Set the output format.
    pub const fn output_format(mut self, format: OutputFormat) -> Self {
        self.config.output.format = format;
        self
    }

    /// Set the output file.
    pub fn output_file(mut self, file: Option<PathBuf>) -> Self {
        self.config.output.file = file;
        self
    }

    /// Pretty-print JSON output.
    pub const fn pretty(mut self, pretty: bool) -> Self {
        self.config.output.pretty = pretty;
        self
    }

    /// Override the normalizer's pass cap.
    pub const fn max_passes(mut self, max_passes: Option<usize>) -> Self {
        self.config.normalize.max_passes = max_passes;
        self
    }

    /// Build the `AppConfig`.
    #[must_use]
    pub fn build(self) -> AppConfig {
        self.config
    }
}

// ============================================================================
// Sections
// ============================================================================

/// External InChI generator used to fill in missing structure identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ProviderConfig {
    /// Run the generator at all
    pub enabled: bool,
    /// Executable name or path
    pub command: String,
    /// Arguments; the molfile is written to stdin
    pub args: Vec<String>,
    /// Seconds allowed per structure
    pub timeout_secs: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            command: DEFAULT_PROVIDER_COMMAND.to_string(),
            args: DEFAULT_PROVIDER_ARGS.iter().map(ToString::to_string).collect(),
            timeout_secs: DEFAULT_PROVIDER_TIMEOUT,
        }
    }
}

/// Output format for CLI results.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Text,
    /// JSON, one document per input file
    Json,
}

/// Output configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format
    pub format: OutputFormat,
    /// Output file path (None for stdout)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
    /// Indent JSON output
    pub pretty: bool,
}

/// Concentration normalization settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct NormalizeConfig {
    /// Upper bound on propagation passes; defaults to the component count plus one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_passes: Option<usize>,
}
