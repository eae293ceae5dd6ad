//! Concentration normalization.
//!
//! Given a mixture with scattered absolute quantities (grams, litres, moles),
//! the normalizer resolves as many components as it can to an absolute amount
//! and derives concentrations from child/parent pairs:
//!
//! 1. Each component with convertible units gets an [`AbsType`] and amount.
//! 2. Until nothing changes: unresolved branches take the sum of uniformly
//!    typed children, and a resolved branch with exactly one unresolved child
//!    gives that child the remainder.
//! 3. Each resolved child of a resolved parent gets a concentration, where a
//!    pairing rule exists (w/w%, w/v%, v/v%, mol/L, mol%).

mod absolute;
mod concentration;
mod normalizer;

pub use absolute::{to_absolute_units, AbsType, AbsoluteQuantity};
pub use concentration::{derive_concentration, InferredConcentration};
pub use normalizer::{MixtureNormalizer, NormalizationNote};
