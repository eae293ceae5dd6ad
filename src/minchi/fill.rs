//! Filling in missing structure identifiers from a provider.

use super::provider::{StructureIdentifierProvider, StructureIdentity};
use crate::model::{Mixture, Origin};
use std::collections::HashMap;

/// A component whose identifier could not be generated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FillInFailure {
    pub origin: Origin,
    pub reason: String,
}

/// Outcome of a fill-in pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FillInReport {
    /// Components that received an identifier
    pub filled: usize,
    /// Provider calls made; identical structures share one call
    pub provider_calls: usize,
    pub failures: Vec<FillInFailure>,
}

impl FillInReport {
    /// True if any component was modified
    #[must_use]
    pub const fn changed(&self) -> bool {
        self.filled > 0
    }
}

/// The error and all of its causes on one line
fn error_chain(error: &dyn std::error::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

/// Ask `provider` for the identifier of every structure that lacks one.
///
/// Components that already have an `inchi` are left alone, even if it does
/// not match the structure. A failure only affects its own component.
pub async fn fill_in_chi(
    mixture: &mut Mixture,
    provider: &dyn StructureIdentifierProvider,
) -> FillInReport {
    let mut report = FillInReport::default();
    if !provider.is_available() {
        tracing::debug!(provider = provider.name(), "provider unavailable, skipping fill-in");
        return report;
    }

    let pending: Vec<(Origin, String)> = mixture
        .get_origins()
        .into_iter()
        .filter_map(|origin| {
            let comp = mixture.get_component(&origin)?;
            let molfile = comp.molfile.as_deref().filter(|m| !m.trim().is_empty())?;
            let has_inchi = comp.inchi.as_deref().is_some_and(|i| !i.is_empty());
            (!has_inchi).then(|| (origin, molfile.to_string()))
        })
        .collect();

    let mut generated: HashMap<String, Result<StructureIdentity, String>> = HashMap::new();
    for (origin, molfile) in pending {
        if !generated.contains_key(&molfile) {
            report.provider_calls += 1;
            let outcome = provider
                .generate(&molfile)
                .await
                .map_err(|e| error_chain(&e));
            generated.insert(molfile.clone(), outcome);
        }

        match &generated[&molfile] {
            Ok(identity) => {
                if let Some(comp) = mixture.get_component_mut(&origin) {
                    comp.inchi = Some(identity.inchi.clone());
                    comp.inchi_key.clone_from(&identity.inchi_key);
                    report.filled += 1;
                }
            }
            Err(reason) => {
                tracing::warn!(
                    provider = provider.name(),
                    ?origin,
                    "structure identifier generation failed: {reason}"
                );
                report.failures.push(FillInFailure {
                    origin,
                    reason: reason.clone(),
                });
            }
        }
    }

    tracing::debug!(
        filled = report.filled,
        calls = report.provider_calls,
        failed = report.failures.len(),
        "fill-in complete"
    );
    report
}
