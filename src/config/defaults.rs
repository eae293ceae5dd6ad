//! Default configurations and presets for mixfile-tools.

use super::types::{AppConfig, OutputConfig, OutputFormat, ProviderConfig};

/// Reference InChI executable
pub const DEFAULT_PROVIDER_COMMAND: &str = "inchi-1";

/// Read a molfile on stdin, print the InChI and key without extra output
pub const DEFAULT_PROVIDER_ARGS: &[&str] = &["-STDIO", "-Key", "-AuxNone", "-NoLabels"];

/// Seconds allowed per structure
pub const DEFAULT_PROVIDER_TIMEOUT: u64 = 30;

// ============================================================================
// Configuration Presets
// ============================================================================

/// Named configuration presets for common use cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigPreset {
    /// Text output, generator enabled
    Default,
    /// Never run the external generator
    Offline,
    /// Compact JSON output for pipelines
    Ci,
}

impl ConfigPreset {
    /// Get the preset name as a string.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Offline => "offline",
            Self::Ci => "ci",
        }
    }

    /// Parse a preset from a string name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "default" => Some(Self::Default),
            "offline" | "no-provider" => Some(Self::Offline),
            "ci" | "ci-cd" | "pipeline" => Some(Self::Ci),
            _ => None,
        }
    }

    /// Get a description of this preset.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Default => "Text output with structure identifiers generated on demand",
            Self::Offline => "Use only identifiers already present in the mixture",
            Self::Ci => "Machine-readable JSON output",
        }
    }

    /// Get all available presets.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Default, Self::Offline, Self::Ci]
    }
}

impl std::fmt::Display for ConfigPreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl AppConfig {
    /// Create an `AppConfig` from a named preset.
    #[must_use]
    pub fn from_preset(preset: ConfigPreset) -> Self {
        match preset {
            ConfigPreset::Default => Self::default(),
            ConfigPreset::Offline => Self {
                provider: ProviderConfig {
                    enabled: false,
                    ..ProviderConfig::default()
                },
                ..Self::default()
            },
            ConfigPreset::Ci => Self {
                output: OutputConfig {
                    format: OutputFormat::Json,
                    ..OutputConfig::default()
                },
                ..Self::default()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_names_round_trip() {
        for preset in ConfigPreset::all() {
            assert_eq!(ConfigPreset::from_name(preset.name()), Some(*preset));
        }
        assert_eq!(ConfigPreset::from_name("nope"), None);
    }

    #[test]
    fn test_offline_preset() {
        let config = AppConfig::from_preset(ConfigPreset::Offline);
        assert!(!config.provider.enabled);
        assert_eq!(config.output, OutputConfig::default());
    }

    #[test]
    fn test_ci_preset() {
        let config = AppConfig::from_preset(ConfigPreset::Ci);
        assert_eq!(config.output.format, OutputFormat::Json);
        assert!(config.provider.enabled);
    }
}
