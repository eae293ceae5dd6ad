//! Pipeline orchestration for mixture files.
//!
//! Shared load → process → output logic used by the CLI command handlers.

mod output;
mod parse;

pub use output::{render_json, write_output, OutputTarget};
pub use parse::{load_mixture, load_mixtures, LoadedMixture};

/// Exit codes for CI/CD integration
pub mod exit_codes {
    /// Everything processed and valid
    pub const SUCCESS: i32 = 0;
    /// At least one input has validation problems
    pub const INVALID: i32 = 1;
    /// An input could not be processed at all
    pub const ERROR: i32 = 2;
}
