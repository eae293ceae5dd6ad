//! Reduction of component quantities to absolute amounts.

use crate::model::{Amount, MixfileComponent, Relation};
use crate::units::UnitCatalog;
use serde::Serialize;

/// Physical dimension of a resolved absolute quantity.
///
/// Amounts are held on a fixed internal scale: grams, litres and moles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AbsType {
    #[default]
    None,
    Mass,
    Volume,
    Moles,
}

/// An amount in grams, litres or moles
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AbsoluteQuantity {
    pub abs_type: AbsType,
    pub amount: Amount,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<f64>,
    #[serde(skip)]
    pub relation: Relation,
}

impl AbsoluteQuantity {
    /// Scalar amount, or `None` if this is a range
    #[must_use]
    pub const fn scalar(&self) -> Option<f64> {
        self.amount.scalar()
    }
}

/// Convert a component's own quantity to an absolute amount.
///
/// Needs both units and a well-formed quantity, with the units being a mass,
/// volume or amount of substance. Anything else yields `None`.
#[must_use]
pub fn to_absolute_units(comp: &MixfileComponent) -> Option<AbsoluteQuantity> {
    let units = comp.units.as_deref()?;
    let amount = comp.amount()?;
    let (abs_type, scale) = UnitCatalog::global().resolve(units)?.absolute?;

    Some(AbsoluteQuantity {
        abs_type,
        amount: amount.scale(scale),
        error: comp.error.filter(|e| e.is_finite()).map(|e| e * scale),
        relation: comp.relation_or_default(),
    })
}
