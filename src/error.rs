//! Unified error types for mixfile-tools.
//!
//! This module provides the error hierarchy for the library, with chained
//! context strings so a failure deep inside a tree operation still says which
//! file and which component it came from.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for mixfile-tools operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum MixfileError {
    /// Errors while reading a Mixfile document
    #[error("Failed to parse mixfile: {context}")]
    Parse {
        context: String,
        #[source]
        source: ParseErrorKind,
    },

    /// Errors addressing a component by origin vector
    #[error("Invalid component origin: {context}")]
    Origin {
        context: String,
        #[source]
        source: OriginErrorKind,
    },

    /// Errors reported by a structure identifier provider
    #[error("Structure identifier provider failed: {context}")]
    Provider {
        context: String,
        #[source]
        source: ProviderErrorKind,
    },

    /// IO errors with context
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration errors
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Validation errors
    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Specific parse error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ParseErrorKind {
    #[error("Invalid JSON structure: {0}")]
    InvalidJson(String),

    #[error("Missing required field: {field} in {context}")]
    MissingField { field: String, context: String },

    #[error("Invalid field value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

/// Specific origin error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum OriginErrorKind {
    #[error("Origin {origin:?} does not address a component")]
    NotFound { origin: Vec<usize> },

    #[error("Operation is not permitted on the root component")]
    RootNotAllowed,
}

/// Specific provider error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ProviderErrorKind {
    #[error("Provider unavailable: {0}")]
    Unavailable(String),

    #[error("Generator process failed: {0}")]
    ProcessFailed(String),

    #[error("Timed out after {0} seconds")]
    Timeout(u64),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

// ============================================================================
// Result type alias
// ============================================================================

/// Convenient Result type for mixfile-tools operations
pub type Result<T> = std::result::Result<T, MixfileError>;

// ============================================================================
// Error construction helpers
// ============================================================================

impl MixfileError {
    /// Create a parse error with context
    pub fn parse(context: impl Into<String>, source: ParseErrorKind) -> Self {
        Self::Parse {
            context: context.into(),
            source,
        }
    }

    /// Create a parse error for a missing field
    pub fn missing_field(field: impl Into<String>, context: impl Into<String>) -> Self {
        Self::parse(
            "missing required field",
            ParseErrorKind::MissingField {
                field: field.into(),
                context: context.into(),
            },
        )
    }

    /// Create an error for an origin that addresses nothing
    pub fn origin_not_found(origin: &[usize]) -> Self {
        Self::Origin {
            context: String::new(),
            source: OriginErrorKind::NotFound {
                origin: origin.to_vec(),
            },
        }
    }

    /// Create an error for an operation that cannot target the root
    pub fn root_not_allowed(operation: impl Into<String>) -> Self {
        Self::Origin {
            context: operation.into(),
            source: OriginErrorKind::RootNotAllowed,
        }
    }

    /// Create a provider error
    pub fn provider(context: impl Into<String>, source: ProviderErrorKind) -> Self {
        Self::Provider {
            context: context.into(),
            source,
        }
    }

    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        let message = format!("{source}");
        Self::Io {
            path: Some(path),
            message,
            source,
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

// ============================================================================
// Conversions from existing error types
// ============================================================================

impl From<std::io::Error> for MixfileError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: format!("{err}"),
            source: err,
        }
    }
}

impl From<serde_json::Error> for MixfileError {
    fn from(err: serde_json::Error) -> Self {
        Self::parse(
            "JSON deserialization",
            ParseErrorKind::InvalidJson(err.to_string()),
        )
    }
}

// ============================================================================
// Error context extension trait
// ============================================================================

/// Extension trait for adding context to errors.
///
/// Context strings are chained, outermost first, so the final message reads
/// like a path through the code:
///
/// ```ignore
/// use mixfile_tools::error::ErrorContext;
///
/// let mixture = Mixture::from_json(&text)
///     .with_context(|| format!("loading {}", path.display()))?;
/// ```
pub trait ErrorContext<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context from a closure (only evaluated on error).
    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: Into<MixfileError>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        let ctx: String = context.into();
        self.map_err(|e| add_context_to_error(e.into(), &ctx))
    }

    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| {
            let ctx: String = f().into();
            add_context_to_error(e.into(), &ctx)
        })
    }
}

/// Add context to an error, chaining with any existing context.
fn add_context_to_error(err: MixfileError, new_ctx: &str) -> MixfileError {
    match err {
        MixfileError::Parse {
            context: existing,
            source,
        } => MixfileError::Parse {
            context: chain_context(new_ctx, &existing),
            source,
        },
        MixfileError::Origin {
            context: existing,
            source,
        } => MixfileError::Origin {
            context: chain_context(new_ctx, &existing),
            source,
        },
        MixfileError::Provider {
            context: existing,
            source,
        } => MixfileError::Provider {
            context: chain_context(new_ctx, &existing),
            source,
        },
        MixfileError::Io {
            path,
            message,
            source,
        } => MixfileError::Io {
            path,
            message: chain_context(new_ctx, &message),
            source,
        },
        MixfileError::Config(msg) => MixfileError::Config(chain_context(new_ctx, &msg)),
        MixfileError::Validation(msg) => MixfileError::Validation(chain_context(new_ctx, &msg)),
    }
}

/// Chain two context strings together as "`new`: `existing`".
fn chain_context(new: &str, existing: &str) -> String {
    if existing.is_empty() {
        new.to_string()
    } else {
        format!("{new}: {existing}")
    }
}

/// Extension trait for Option types to convert to errors with context.
pub trait OptionContext<T> {
    /// Convert None to an error with the given context.
    fn context_none(self, context: impl Into<String>) -> Result<T>;

    /// Convert None to an error with context from a closure.
    fn with_context_none<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T> OptionContext<T> for Option<T> {
    fn context_none(self, context: impl Into<String>) -> Result<T> {
        self.ok_or_else(|| MixfileError::Validation(context.into()))
    }

    fn with_context_none<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.ok_or_else(|| MixfileError::Validation(f().into()))
    }
}
