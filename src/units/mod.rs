//! Unit catalog.
//!
//! Maps unit URIs to display names and MInChI concentration mnemonics. The
//! table is built once per process and then shared read-only:
//!
//! ```ignore
//! use mixfile_tools::units::UnitCatalog;
//!
//! let catalog = UnitCatalog::global();
//! let uri = catalog.name_to_uri("mmol/L").unwrap();
//! let (mnemonic, values) = catalog.convert_to_minchi(uri, &[2.5]).unwrap();
//! assert_eq!(mnemonic, "mr");
//! ```

mod catalog;

pub use catalog::{UnitCatalog, UnitEntry};
