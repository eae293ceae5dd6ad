//! Canonical mixture identifiers (MInChI).
//!
//! Building an identifier happens in two phases:
//!
//! 1. [`MInChIBuilder::fill_in_chi`] asks a [`StructureIdentifierProvider`]
//!    for the identifier of every structure that does not have one yet.
//!    This mutates the mixture, so callers usually work on a copy.
//! 2. [`MInChIBuilder::formulate`] sorts a private copy of the tree and
//!    assembles the molecules, hierarchy and concentration layers, plus
//!    the hash keys.
//!
//! The result depends only on the mixture's content, never on the order
//! sibling components were written in.

mod builder;
mod fill;
mod format;
mod keys;
mod provider;

pub use builder::{MInChIBuilder, MInChIResult, INCHI_PREFIX, MINCHI_PREFIX};
pub use fill::{fill_in_chi, FillInFailure, FillInReport};
pub use format::{concentration_token, format_number};
pub use keys::{MInChIKeys, SHORT_KEY_LENGTH};
pub use provider::{
    parse_generator_output, CommandProvider, NoOpProvider, StructureIdentifierProvider,
    StructureIdentity,
};
