//! Validate command handler.
//!
//! Implements the `validate` subcommand: check each mixture for values the
//! normalizer and identifier builder would silently ignore.

use crate::config::{AppConfig, OutputFormat};
use crate::minchi::INCHI_PREFIX;
use crate::model::{Amount, MixfileComponent, Mixture, Origin};
use crate::pipeline::{exit_codes, load_mixture, render_json, write_output, OutputTarget};
use crate::units::UnitCatalog;
use anyhow::Result;
use rayon::prelude::*;
use serde::Serialize;
use std::fmt::{self, Write as _};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueSeverity {
    Warning,
    Error,
}

impl fmt::Display for IssueSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Warning => f.write_str("warning"),
            Self::Error => f.write_str("error"),
        }
    }
}

/// One problem found in a mixture
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    pub origin: Origin,
    pub severity: IssueSeverity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component: Option<String>,
    pub message: String,
}

/// Issues for one input file
#[derive(Debug, Clone, Serialize)]
struct FileValidation {
    file: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    load_error: Option<String>,
    issues: Vec<ValidationIssue>,
}

/// Check every component of `mixture`, in pre-order
#[must_use]
pub fn validate_mixture(mixture: &Mixture, catalog: &UnitCatalog) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    for origin in mixture.get_origins() {
        let Some(comp) = mixture.get_component(&origin) else {
            continue;
        };
        issues.extend(
            check_component(comp, catalog)
                .into_iter()
                .map(|(severity, message)| ValidationIssue {
                    origin: origin.clone(),
                    severity,
                    component: comp.name.clone(),
                    message,
                }),
        );
    }
    issues
}

fn check_component(comp: &MixfileComponent, catalog: &UnitCatalog) -> Vec<(IssueSeverity, String)> {
    let mut found = Vec::new();

    if let Some(ratio) = &comp.ratio {
        if comp.ratio_pair().is_none() {
            found.push((
                IssueSeverity::Error,
                format!("ratio {ratio:?} must be two finite numbers with a positive denominator"),
            ));
        }
    }

    if let Some(quantity) = &comp.quantity {
        match quantity.amount() {
            None => found.push((
                IssueSeverity::Error,
                format!("quantity {quantity:?} must be a number or a [low, high] pair"),
            )),
            Some(amount) => {
                if let Amount::Range(low, high) = amount {
                    if low > high {
                        found.push((
                            IssueSeverity::Warning,
                            format!("quantity range {low}..{high} is reversed"),
                        ));
                    }
                }
                if comp.units.is_none() {
                    found.push((IssueSeverity::Warning, "quantity has no units".to_string()));
                }
            }
        }
    }

    if let Some(units) = comp.units.as_deref() {
        if catalog.resolve(units).is_none() {
            let message = match catalog.suggest(units) {
                Some(suggestion) => format!("unknown units '{units}' (did you mean '{suggestion}'?)"),
                None => format!("unknown units '{units}'"),
            };
            found.push((IssueSeverity::Error, message));
        }
    }

    if let Some(inchi) = comp.inchi.as_deref() {
        if !inchi.is_empty() && !inchi.starts_with(INCHI_PREFIX) {
            found.push((
                IssueSeverity::Warning,
                format!("identifier does not start with '{INCHI_PREFIX}' and will be ignored"),
            ));
        }
    }

    found
}

/// Run the validate command
pub fn run_validate(files: &[PathBuf], config: &AppConfig) -> Result<i32> {
    let catalog = UnitCatalog::global();
    let results: Vec<FileValidation> = files
        .par_iter()
        .map(|path| match load_mixture(path) {
            Ok(loaded) => FileValidation {
                file: loaded.display_name(),
                load_error: None,
                issues: validate_mixture(&loaded.mixture, catalog),
            },
            Err(e) => FileValidation {
                file: path.display().to_string(),
                load_error: Some(format!("{e:#}")),
                issues: Vec::new(),
            },
        })
        .collect();

    let content = match config.output.format {
        OutputFormat::Json => render_json(&results, config.output.pretty)?,
        OutputFormat::Text => render_text(&results),
    };
    write_output(&content, &OutputTarget::from_option(config.output.file.clone()))?;

    let exit_code = if results.iter().any(|r| r.load_error.is_some()) {
        exit_codes::ERROR
    } else if results
        .iter()
        .flat_map(|r| &r.issues)
        .any(|issue| issue.severity == IssueSeverity::Error)
    {
        exit_codes::INVALID
    } else {
        exit_codes::SUCCESS
    };
    Ok(exit_code)
}

fn render_text(results: &[FileValidation]) -> String {
    let mut out = String::new();
    for result in results {
        if let Some(error) = &result.load_error {
            let _ = writeln!(out, "{}: error: {error}", result.file);
            continue;
        }
        if result.issues.is_empty() {
            let _ = writeln!(out, "{}: ok", result.file);
            continue;
        }
        for issue in &result.issues {
            let _ = writeln!(
                out,
                "{}: {} at {:?} ({}): {}",
                result.file,
                issue.severity,
                issue.origin,
                issue.component.as_deref().unwrap_or("unnamed"),
                issue.message
            );
        }
    }
    out.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn messages(mixture: &Mixture) -> Vec<(IssueSeverity, String)> {
        validate_mixture(mixture, UnitCatalog::global())
            .into_iter()
            .map(|issue| (issue.severity, issue.message))
            .collect()
    }

    #[test]
    fn test_clean_mixture() {
        let mixture = Mixture::from_root(
            MixfileComponent::named("mix")
                .with_child(MixfileComponent::named("a").with_quantity(10.0, "%"))
                .with_child(MixfileComponent::named("b").with_ratio(1.0, 2.0)),
        );
        assert!(messages(&mixture).is_empty());
    }

    #[test]
    fn test_invalid_ratio() {
        let mut bad = MixfileComponent::named("bad");
        bad.ratio = Some(vec![1.0, 0.0]);
        let issues = validate_mixture(
            &Mixture::from_root(MixfileComponent::named("mix").with_child(bad)),
            UnitCatalog::global(),
        );
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].origin, vec![0]);
        assert_eq!(issues[0].severity, IssueSeverity::Error);
        assert_eq!(issues[0].component.as_deref(), Some("bad"));
    }

    #[test]
    fn test_unknown_units_suggest() {
        let mixture = Mixture::from_root(MixfileComponent::named("x").with_quantity(1.0, "mg/ml"));
        let found = messages(&mixture);
        assert_eq!(found.len(), 1);
        assert!(found[0].1.contains("did you mean 'mg/mL'"), "{}", found[0].1);
    }

    #[test]
    fn test_warnings() {
        let mut comp = MixfileComponent::named("x").with_quantity([5.0, 1.0], "g");
        comp.inchi = Some("InChI=1/H2O/h1H2".to_string());
        let found = messages(&Mixture::from_root(comp));
        assert_eq!(found.len(), 2);
        assert!(found.iter().all(|(severity, _)| *severity == IssueSeverity::Warning));
    }

    #[test]
    fn test_malformed_quantity() {
        let comp = MixfileComponent {
            quantity: Some(crate::model::Quantity::List(vec![1.0, 2.0, 3.0])),
            units: Some("g".to_string()),
            ..Default::default()
        };
        let found = messages(&Mixture::from_root(comp));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].0, IssueSeverity::Error);
    }
}
