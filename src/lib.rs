//! **A library for working with Mixfile mixture descriptions.**
//!
//! A Mixfile describes a mixture as a tree: each component may carry a
//! structure, a quantity with units or a ratio, and contents of its own.
//! `mixfile-tools` loads and edits these trees, infers concentrations from
//! whatever absolute amounts are stated, and assembles the canonical MInChI
//! identifier with its hash keys.
//!
//! ## Core Concepts & Modules
//!
//! - **[`model`]**: [`Mixture`] and [`MixfileComponent`]. Components are
//!   addressed by their *origin*, the list of child indices from the root.
//! - **[`units`]**: [`UnitCatalog`], the lookup table between unit names,
//!   ontology URIs and MInChI mnemonics.
//! - **[`normalize`]**: [`MixtureNormalizer`], which propagates absolute
//!   masses, volumes and moles up and down the tree and derives concentrations.
//! - **[`minchi`]**: [`MInChIBuilder`], which fills in missing structure
//!   identifiers through a [`StructureIdentifierProvider`] and formulates the
//!   identifier.
//! - **[`config`]** and **[`pipeline`]**: configuration and file handling
//!   shared by the command-line tool.
//!
//! ## Getting Started
//!
//! ```
//! use mixfile_tools::{MInChIBuilder, Mixture, MixtureNormalizer};
//!
//! let json = r#"{
//!     "mixfileVersion": 0.01,
//!     "name": "saline",
//!     "quantity": 100, "units": "mL",
//!     "contents": [
//!         {"name": "sodium chloride", "inchi": "InChI=1S/ClH.Na/h1H;/q;+1/p-1",
//!          "quantity": 0.9, "units": "w/v%"},
//!         {"name": "water", "inchi": "InChI=1S/H2O/h1H2"}
//!     ]
//! }"#;
//! let mixture = Mixture::from_json(json)?;
//!
//! let notes = MixtureNormalizer::new().analyse(&mixture);
//! assert_eq!(notes.len(), 3);
//!
//! let result = MInChIBuilder::new().formulate(&mixture);
//! assert!(result.minchi.starts_with("MInChI=0.00.1S/"));
//! assert_eq!(result.keys.short.len(), 14);
//! # Ok::<(), mixfile_tools::MixfileError>(())
//! ```
//!
//! ## Command-Line Interface (CLI)
//!
//! This documentation is for the library crate. The `mixfile-tools` binary
//! wraps it with `normalize`, `minchi` and `validate` subcommands.

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
#![allow(
    // Values and indices are bounded in practice
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_possible_wrap,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::unused_self,
    clippy::similar_names
)]

pub mod cli;
pub mod config;
pub mod error;
pub mod minchi;
pub mod model;
pub mod normalize;
pub mod pipeline;
pub mod units;
pub mod utils;

pub use config::{AppConfig, AppConfigBuilder, ConfigPreset, OutputFormat};
pub use config::{ConfigError, Validatable};
pub use error::{ErrorContext, MixfileError, OptionContext, Result};
pub use minchi::{
    CommandProvider, FillInReport, MInChIBuilder, MInChIKeys, MInChIResult, NoOpProvider,
    StructureIdentifierProvider, StructureIdentity,
};
pub use model::{
    Amount, Mixfile, MixfileComponent, Mixture, Origin, Quantity, Relation, MIXFILE_VERSION,
};
pub use normalize::{AbsType, AbsoluteQuantity, MixtureNormalizer, NormalizationNote};
pub use units::{UnitCatalog, UnitEntry};
