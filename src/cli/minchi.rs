//! MInChI command handler.
//!
//! Implements the `minchi` subcommand: fill in missing structure identifiers
//! through the configured generator, then print the canonical identifier and
//! keys for each input mixture.

use crate::config::{AppConfig, OutputFormat};
use crate::minchi::{
    CommandProvider, FillInFailure, MInChIBuilder, MInChIResult, NoOpProvider,
    StructureIdentifierProvider,
};
use crate::pipeline::{exit_codes, load_mixtures, render_json, write_output, OutputTarget};
use anyhow::{Context, Result};
use rayon::prelude::*;
use serde::Serialize;
use std::fmt::Write as _;
use std::path::PathBuf;

/// Identifier for one input file
#[derive(Debug, Clone, Serialize)]
pub struct MInChIReport {
    pub file: String,
    #[serde(flatten)]
    pub result: MInChIResult,
    /// Components that received a generated identifier
    pub filled: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<String>,
}

fn select_provider(config: &AppConfig, fill: bool) -> Box<dyn StructureIdentifierProvider> {
    if !fill || !config.provider.enabled {
        return Box::new(NoOpProvider);
    }
    let provider = CommandProvider::from_config(&config.provider);
    if !provider.is_available() {
        tracing::warn!(
            "InChI generator '{}' not found; using existing identifiers only",
            config.provider.command
        );
    }
    Box::new(provider)
}

fn describe_failure(failure: &FillInFailure) -> String {
    format!("{:?}: {}", failure.origin, failure.reason)
}

/// Run the minchi command
pub fn run_minchi(files: &[PathBuf], config: &AppConfig, fill: bool) -> Result<i32> {
    let provider = select_provider(config, fill);
    let builder = MInChIBuilder::new();
    let mut exit_code = exit_codes::SUCCESS;

    let mut loaded = Vec::with_capacity(files.len());
    for result in load_mixtures(files) {
        match result {
            Ok(mixture) => loaded.push(mixture),
            Err(e) => {
                tracing::error!("{e:#}");
                exit_code = exit_codes::ERROR;
            }
        }
    }

    // Fill-in mutates, so each file gets its own working copy.
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;
    let filled: Vec<_> = runtime.block_on(async {
        let mut filled = Vec::with_capacity(loaded.len());
        for entry in &loaded {
            let mut working = entry.mixture.clone();
            let report = builder.fill_in_chi(&mut working, provider.as_ref()).await;
            filled.push((entry.display_name(), working, report));
        }
        filled
    });

    let reports: Vec<MInChIReport> = filled
        .into_par_iter()
        .map(|(file, mixture, fill_report)| MInChIReport {
            file,
            result: builder.formulate(&mixture),
            filled: fill_report.filled,
            failures: fill_report.failures.iter().map(describe_failure).collect(),
        })
        .collect();

    let content = match config.output.format {
        OutputFormat::Json => render_json(&reports, config.output.pretty)?,
        OutputFormat::Text => render_text(&reports),
    };
    write_output(&content, &OutputTarget::from_option(config.output.file.clone()))?;
    Ok(exit_code)
}

fn render_text(reports: &[MInChIReport]) -> String {
    let mut out = String::new();
    for report in reports {
        let _ = writeln!(out, "{}", report.file);
        let _ = writeln!(out, "  {}", report.result.minchi);
        let _ = writeln!(out, "  key:   {}", report.result.keys.long);
        let _ = writeln!(out, "  short: {}", report.result.keys.short);
        for failure in &report.failures {
            let _ = writeln!(out, "  warning: no identifier for {failure}");
        }
    }
    out.trim_end().to_string()
}
