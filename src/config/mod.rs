//! Configuration module for mixfile-tools.
//!
//! This module provides:
//! - Type-safe configuration structures
//! - Validation for all configuration values
//! - Named presets
//! - YAML config file loading and discovery
//! - CLI argument merging
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use mixfile_tools::config::{AppConfig, ConfigPreset, OutputFormat};
//!
//! let config = AppConfig::from_preset(ConfigPreset::Offline);
//!
//! let config = AppConfig::builder()
//!     .provider_command("/opt/inchi/inchi-1")
//!     .output_format(OutputFormat::Json)
//!     .build();
//!
//! use mixfile_tools::config::file::load_or_default;
//! let (config, loaded_from) = load_or_default(None);
//! ```
//!
//! # Configuration File
//!
//! Place a `.mixfile-tools.yaml` file in your project root or `~/.config/mixfile-tools/`:
//!
//! ```yaml
//! provider:
//!   command: inchi-1
//!   timeout_secs: 10
//! output:
//!   format: json
//! ```

mod defaults;
pub mod file;
mod types;
mod validation;

pub use defaults::{
    ConfigPreset, DEFAULT_PROVIDER_ARGS, DEFAULT_PROVIDER_COMMAND, DEFAULT_PROVIDER_TIMEOUT,
};
pub use types::{
    AppConfig, AppConfigBuilder, NormalizeConfig, OutputConfig, OutputFormat, ProviderConfig,
};
pub use validation::{ConfigError, Validatable};

pub use file::{
    discover_config_file, generate_example_config, load_config_file, load_or_default,
    ConfigFileError,
};

/// Generate a JSON Schema for the `AppConfig` configuration format.
///
/// This schema documents all configuration options that can be set in
/// `.mixfile-tools.yaml` config files. It can be used by editors for
/// validation and autocompletion.
#[must_use]
pub fn generate_json_schema() -> String {
    let schema = schemars::schema_for!(AppConfig);
    serde_json::to_string_pretty(&schema).unwrap_or_default()
}
