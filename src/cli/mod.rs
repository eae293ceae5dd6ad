//! CLI command handlers.
//!
//! This module provides testable command handlers that are invoked by main.rs.
//! Each handler returns the process exit code instead of exiting itself.

mod minchi;
mod normalize;
mod validate;

pub use minchi::{run_minchi, MInChIReport};
pub use normalize::{run_normalize, NormalizeReport};
pub use validate::{run_validate, validate_mixture, IssueSeverity, ValidationIssue};

use crate::minchi::format_number;
use crate::model::Amount;

/// `value` or `low..high`
fn describe_amount(amount: Amount) -> String {
    match amount {
        Amount::Value(value) => format_number(value),
        Amount::Range(low, high) => format!("{}..{}", format_number(low), format_number(high)),
    }
}
