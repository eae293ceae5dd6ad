//! Structure identifier providers.
//!
//! The core never computes structure identifiers itself. It asks a
//! [`StructureIdentifierProvider`] for each structure that lacks one.

use crate::config::ProviderConfig;
use crate::error::{MixfileError, ProviderErrorKind, Result};
use async_trait::async_trait;
use regex::Regex;
use std::path::Path;
use std::process::Stdio;
use std::sync::LazyLock;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// Canonical identifier and hash for one structure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructureIdentity {
    pub inchi: String,
    pub inchi_key: Option<String>,
}

/// Source of canonical structure identifiers.
///
/// Implementations must not depend on call order; each call is independent.
#[async_trait]
pub trait StructureIdentifierProvider: Send + Sync {
    /// Generate the identifier for a structure blob
    async fn generate(&self, molfile: &str) -> Result<StructureIdentity>;

    /// Name of this provider, for logs
    fn name(&self) -> &'static str;

    /// Whether the provider can be used at all
    fn is_available(&self) -> bool;
}

/// A provider that never produces anything.
///
/// Use this when identifier generation is disabled; fill-in skips it
/// entirely because it reports itself unavailable.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpProvider;

#[async_trait]
impl StructureIdentifierProvider for NoOpProvider {
    async fn generate(&self, _molfile: &str) -> Result<StructureIdentity> {
        Err(MixfileError::provider(
            "NoOp",
            ProviderErrorKind::Unavailable("identifier generation is disabled".to_string()),
        ))
    }

    fn name(&self) -> &'static str {
        "NoOp"
    }

    fn is_available(&self) -> bool {
        false
    }
}

static INCHI_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^(InChI=1S?/\S*)\s*$").expect("static regex"));
static INCHI_KEY_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^(?:InChIKey=)?([A-Z]{14}-[A-Z]{10}-[A-Z])\s*$").expect("static regex")
});

/// Runs an external InChI generator, passing the molfile on stdin.
///
/// The executable is expected to print an `InChI=` line and, optionally, an
/// `InChIKey=` line (the reference `inchi-1 -STDIO -Key` behaves this way).
#[derive(Debug, Clone)]
pub struct CommandProvider {
    command: String,
    args: Vec<String>,
    timeout: Duration,
}

impl CommandProvider {
    #[must_use]
    pub fn new(command: impl Into<String>, args: Vec<String>, timeout: Duration) -> Self {
        Self {
            command: command.into(),
            args,
            timeout,
        }
    }

    /// Build from the `provider` configuration section
    #[must_use]
    pub fn from_config(config: &ProviderConfig) -> Self {
        Self::new(
            config.command.clone(),
            config.args.clone(),
            Duration::from_secs(config.timeout_secs),
        )
    }

    fn failure(&self, message: impl Into<String>) -> MixfileError {
        MixfileError::provider(
            self.command.clone(),
            ProviderErrorKind::ProcessFailed(message.into()),
        )
    }

    async fn run(&self, molfile: &str) -> Result<String> {
        let mut child = Command::new(&self.command)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| self.failure(format!("spawn: {e}")))?;

        // Feed stdin while stdout drains, so neither pipe can stall the other.
        let mut stdin = child.stdin.take();
        let feed = async move {
            match stdin.as_mut() {
                Some(stdin) => stdin.write_all(molfile.as_bytes()).await,
                None => Ok(()),
            }
            // stdin drops here, closing the pipe
        };
        let exchange = async { tokio::join!(feed, child.wait_with_output()) };

        let (written, output) = tokio::time::timeout(self.timeout, exchange)
            .await
            .map_err(|_| {
                MixfileError::provider(
                    self.command.clone(),
                    ProviderErrorKind::Timeout(self.timeout.as_secs()),
                )
            })?;
        let output = output.map_err(|e| self.failure(format!("wait: {e}")))?;
        written.map_err(|e| self.failure(format!("write stdin: {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(self.failure(format!("{}: {}", output.status, stderr.trim())));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Pull the identifier and key out of generator output
pub fn parse_generator_output(output: &str) -> Result<StructureIdentity> {
    let inchi = INCHI_LINE
        .captures(output)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| {
            MixfileError::provider(
                "parsing generator output",
                ProviderErrorKind::InvalidResponse("no InChI line found".to_string()),
            )
        })?;
    let inchi_key = INCHI_KEY_LINE
        .captures(output)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string());
    Ok(StructureIdentity { inchi, inchi_key })
}

#[async_trait]
impl StructureIdentifierProvider for CommandProvider {
    async fn generate(&self, molfile: &str) -> Result<StructureIdentity> {
        let output = self.run(molfile).await?;
        parse_generator_output(&output)
    }

    fn name(&self) -> &'static str {
        "command"
    }

    fn is_available(&self) -> bool {
        let command = Path::new(&self.command);
        if command.components().count() > 1 {
            return command.is_file();
        }
        std::env::var_os("PATH").is_some_and(|paths| {
            std::env::split_paths(&paths).any(|dir| dir.join(command).is_file())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_generator_output() {
        let output = "Structure: 1\nInChI=1S/H2O/h1H2\nInChIKey=XLYOFNOQVPJJNP-UHFFFAOYSA-N\n";
        let identity = parse_generator_output(output).unwrap();
        assert_eq!(identity.inchi, "InChI=1S/H2O/h1H2");
        assert_eq!(
            identity.inchi_key.as_deref(),
            Some("XLYOFNOQVPJJNP-UHFFFAOYSA-N")
        );
    }

    #[test]
    fn test_parse_output_without_key() {
        let identity = parse_generator_output("InChI=1S/CH4/h1H4\n").unwrap();
        assert_eq!(identity.inchi_key, None);
    }

    #[test]
    fn test_parse_output_without_inchi() {
        assert!(matches!(
            parse_generator_output("Error: bad molfile\n"),
            Err(MixfileError::Provider { .. })
        ));
    }

    #[tokio::test]
    async fn test_noop_provider() {
        let provider = NoOpProvider;
        assert!(!provider.is_available());
        assert_eq!(provider.name(), "NoOp");
        assert!(provider.generate("").await.is_err());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_timeout_covers_blocked_stdin() {
        // sleep never reads stdin, so a large molfile fills the pipe
        let provider =
            CommandProvider::new("sleep", vec!["5".to_string()], Duration::from_secs(1));
        let molfile = "X".repeat(4 * 1024 * 1024);
        let started = std::time::Instant::now();
        let result = provider.generate(&molfile).await;
        assert!(started.elapsed() < Duration::from_secs(4));
        assert!(matches!(
            result,
            Err(MixfileError::Provider {
                source: ProviderErrorKind::Timeout(1),
                ..
            })
        ));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_generator_output_is_read() {
        let provider = CommandProvider::new(
            "sh",
            vec!["-c".to_string(), "cat >/dev/null; echo InChI=1S/H2O/h1H2".to_string()],
            Duration::from_secs(5),
        );
        let identity = provider.generate("water molfile\n").await.unwrap();
        assert_eq!(identity.inchi, "InChI=1S/H2O/h1H2");
        assert_eq!(identity.inchi_key, None);
    }

    #[test]
    fn test_missing_command_is_unavailable() {
        let provider = CommandProvider::new(
            "definitely-not-an-inchi-binary",
            Vec::new(),
            Duration::from_secs(1),
        );
        assert!(!provider.is_available());
    }
}
