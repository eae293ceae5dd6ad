//! Normalize command handler.
//!
//! Implements the `normalize` subcommand: infer absolute amounts and
//! concentrations for each input mixture and print them.

use super::describe_amount;
use crate::config::{AppConfig, OutputFormat};
use crate::model::Mixture;
use crate::normalize::{AbsType, MixtureNormalizer, NormalizationNote};
use crate::pipeline::{exit_codes, load_mixtures, render_json, write_output, OutputTarget};
use crate::units::UnitCatalog;
use anyhow::Result;
use serde::Serialize;
use std::fmt::Write as _;
use std::path::PathBuf;

/// Notes for one input file
#[derive(Debug, Clone, Serialize)]
pub struct NormalizeReport {
    pub file: String,
    #[serde(skip)]
    pub mixture: Mixture,
    pub notes: Vec<NormalizationNote>,
}

/// Run the normalize command
pub fn run_normalize(files: &[PathBuf], config: &AppConfig) -> Result<i32> {
    let normalizer = MixtureNormalizer::new().with_max_passes(config.normalize.max_passes);
    let mut exit_code = exit_codes::SUCCESS;
    let mut reports = Vec::with_capacity(files.len());

    for loaded in load_mixtures(files) {
        match loaded {
            Ok(loaded) => reports.push(NormalizeReport {
                file: loaded.display_name(),
                notes: normalizer.analyse(&loaded.mixture),
                mixture: loaded.mixture,
            }),
            Err(e) => {
                tracing::error!("{e:#}");
                exit_code = exit_codes::ERROR;
            }
        }
    }

    let content = match config.output.format {
        OutputFormat::Json => render_json(&reports, config.output.pretty)?,
        OutputFormat::Text => reports.iter().map(render_text).collect::<Vec<_>>().join("\n"),
    };
    write_output(&content, &OutputTarget::from_option(config.output.file.clone()))?;
    Ok(exit_code)
}

fn render_text(report: &NormalizeReport) -> String {
    let catalog = UnitCatalog::global();
    let mut out = format!("{}\n", report.file);

    for note in &report.notes {
        let depth = note.origin.len();
        let name = report
            .mixture
            .get_component(&note.origin)
            .and_then(|comp| comp.name.as_deref())
            .unwrap_or("(unnamed)");
        let _ = write!(out, "{:indent$}{name}", "", indent = 2 + 2 * depth);

        if let Some(abs) = &note.absolute {
            let unit = match abs.abs_type {
                AbsType::Mass => "g",
                AbsType::Volume => "L",
                AbsType::Moles => "mol",
                AbsType::None => "",
            };
            let _ = write!(out, "  [{} {unit}]", describe_amount(abs.amount));
        }
        if let (Some(amount), Some(uri)) = (
            note.conc_quantity.as_ref().and_then(crate::model::Quantity::amount),
            note.conc_units.as_deref(),
        ) {
            let units = catalog.uri_to_name(uri).unwrap_or(uri);
            let relation = note
                .conc_relation
                .filter(|r| *r != crate::model::Relation::Equal)
                .map_or("", |r| r.symbol());
            let _ = write!(out, "  => {relation}{} {units}", describe_amount(amount));
        }
        out.push('\n');
    }
    out
}
