//! mixfile-tools: mixture normalization and MInChI identifiers
//!
//! Command-line front end for the `mixfile_tools` library.

use anyhow::{bail, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use mixfile_tools::{
    cli,
    config::{self, AppConfig, OutputFormat, Validatable},
};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "mixfile-tools")]
#[command(version)]
#[command(about = "Mixture normalization and canonical MInChI identifiers", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  Success
    1  Validation problems found
    2  An input could not be processed

EXAMPLES:
    # Print the MInChI and keys for a mixture
    mixfile-tools minchi vodka.mixfile

    # Use only identifiers already in the file
    mixfile-tools minchi --no-fill vodka.mixfile

    # Infer concentrations, as JSON
    mixfile-tools normalize -o json brine.mixfile")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Output options shared by the processing subcommands
#[derive(Parser)]
struct OutputArgs {
    /// Output format (defaults to the configured format)
    #[arg(short, long)]
    output: Option<OutputFormat>,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,

    /// Indent JSON output
    #[arg(long)]
    pretty: bool,
}

impl OutputArgs {
    /// Layer these flags over the loaded configuration
    fn apply(self, config: &mut AppConfig) {
        if let Some(format) = self.output {
            config.output.format = format;
        }
        if self.output_file.is_some() {
            config.output.file = self.output_file;
        }
        if self.pretty {
            config.output.pretty = true;
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Infer absolute amounts and concentrations
    Normalize {
        /// Mixfile documents
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Maximum propagation passes
        #[arg(long)]
        max_passes: Option<usize>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Build the canonical MInChI identifier and keys
    Minchi {
        /// Mixfile documents
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Do not run the InChI generator for structures lacking an identifier
        #[arg(long)]
        no_fill: bool,

        /// InChI generator executable (overrides the configured command)
        #[arg(long, env = "MIXFILE_INCHI")]
        inchi: Option<String>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Check mixtures for malformed quantities, ratios and units
    Validate {
        /// Mixfile documents
        #[arg(required = true)]
        files: Vec<PathBuf>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Print the JSON schema of the configuration file
    ConfigSchema,

    /// Print an example configuration file
    ConfigExample,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();

    let (mut app_config, loaded_from) = config::load_or_default(cli.config.as_deref());
    if let Some(path) = &loaded_from {
        tracing::debug!("Loaded config from {}", path.display());
    }

    let exit_code = match cli.command {
        Commands::Normalize {
            files,
            max_passes,
            output,
        } => {
            output.apply(&mut app_config);
            app_config.merge(&AppConfig::builder().max_passes(max_passes).build());
            check_config(&app_config)?;
            cli::run_normalize(&files, &app_config)?
        }
        Commands::Minchi {
            files,
            no_fill,
            inchi,
            output,
        } => {
            output.apply(&mut app_config);
            if let Some(command) = inchi {
                app_config.provider.command = command;
            }
            check_config(&app_config)?;
            cli::run_minchi(&files, &app_config, !no_fill)?
        }
        Commands::Validate { files, output } => {
            output.apply(&mut app_config);
            check_config(&app_config)?;
            cli::run_validate(&files, &app_config)?
        }
        Commands::ConfigSchema => {
            println!("{}", config::generate_json_schema());
            0
        }
        Commands::ConfigExample => {
            println!("{}", config::generate_example_config());
            0
        }
        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "mixfile-tools", &mut io::stdout());
            0
        }
    };

    if exit_code != 0 {
        std::process::exit(exit_code);
    }
    Ok(())
}

fn check_config(config: &AppConfig) -> Result<()> {
    let errors = config.validate();
    if errors.is_empty() {
        return Ok(());
    }
    for error in &errors {
        tracing::error!("{error}");
    }
    bail!("invalid configuration ({} problems)", errors.len())
}
