//! Concentration pairing rules between a child and its parent amount.

use super::absolute::{AbsType, AbsoluteQuantity};
use crate::model::{Amount, Relation};
use crate::units::UnitCatalog;

/// A concentration inferred from absolute amounts
#[derive(Debug, Clone, PartialEq)]
pub struct InferredConcentration {
    pub quantity: Amount,
    /// Unit URI
    pub units: String,
    pub error: Option<f64>,
    pub relation: Relation,
}

/// Target unit and scale factor for a child/parent dimension pairing.
///
/// Mass against moles (and anything else needing a density or molecular
/// weight) has no rule.
fn pairing(child: AbsType, parent: AbsType) -> Option<(&'static str, f64)> {
    match (child, parent) {
        (AbsType::Mass, AbsType::Mass) => Some(("w/w%", 100.0)),
        // grams per 100 mL, with the parent in litres
        (AbsType::Mass, AbsType::Volume) => Some(("w/v%", 0.1)),
        (AbsType::Volume, AbsType::Volume) => Some(("v/v%", 100.0)),
        (AbsType::Moles, AbsType::Volume) => Some(("mol/L", 1.0)),
        (AbsType::Moles, AbsType::Moles) => Some(("mol%", 100.0)),
        _ => None,
    }
}

/// Concentration of `child` within `parent`, if a pairing rule applies.
///
/// The parent must be a positive scalar; a ranged child scales both ends.
#[must_use]
pub fn derive_concentration(
    child: &AbsoluteQuantity,
    parent: &AbsoluteQuantity,
) -> Option<InferredConcentration> {
    let (unit_name, multiplier) = pairing(child.abs_type, parent.abs_type)?;
    let denominator = parent.scalar().filter(|p| *p > 0.0)?;
    let factor = multiplier / denominator;
    let units = UnitCatalog::global().name_to_uri(unit_name)?.to_string();

    let error = match child.amount {
        Amount::Value(_) => child.error.map(|e| e * factor),
        Amount::Range(..) => None,
    };
    let relation = match (child.relation, parent.relation) {
        (Relation::Equal, Relation::Equal) => Relation::Equal,
        (Relation::Equal, _) => Relation::Approximate,
        (own, _) => own,
    };

    Some(InferredConcentration {
        quantity: child.amount.scale(factor),
        units,
        error,
        relation,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn abs(abs_type: AbsType, amount: Amount) -> AbsoluteQuantity {
        AbsoluteQuantity {
            abs_type,
            amount,
            error: None,
            relation: Relation::Equal,
        }
    }

    fn uri(name: &str) -> String {
        UnitCatalog::global().name_to_uri(name).unwrap().to_string()
    }

    #[test]
    fn test_weight_weight() {
        let conc = derive_concentration(
            &abs(AbsType::Mass, Amount::Value(25.0)),
            &abs(AbsType::Mass, Amount::Value(100.0)),
        )
        .unwrap();
        assert_eq!(conc.quantity, Amount::Value(25.0));
        assert_eq!(conc.units, uri("w/w%"));
    }

    #[test]
    fn test_weight_volume() {
        // 5 g in 0.5 L is 1 g per 100 mL
        let conc = derive_concentration(
            &abs(AbsType::Mass, Amount::Value(5.0)),
            &abs(AbsType::Volume, Amount::Value(0.5)),
        )
        .unwrap();
        assert_eq!(conc.units, uri("w/v%"));
        assert!((conc.quantity.scalar().unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_molarity_and_mole_percent() {
        let molar = derive_concentration(
            &abs(AbsType::Moles, Amount::Value(0.2)),
            &abs(AbsType::Volume, Amount::Value(2.0)),
        )
        .unwrap();
        assert_eq!(molar.units, uri("mol/L"));
        assert!((molar.quantity.scalar().unwrap() - 0.1).abs() < 1e-12);

        let fraction = derive_concentration(
            &abs(AbsType::Moles, Amount::Value(1.0)),
            &abs(AbsType::Moles, Amount::Value(4.0)),
        )
        .unwrap();
        assert_eq!(fraction.units, uri("mol%"));
        assert_eq!(fraction.quantity, Amount::Value(25.0));
    }

    #[test]
    fn test_undefined_pairings() {
        let mass = abs(AbsType::Mass, Amount::Value(1.0));
        let moles = abs(AbsType::Moles, Amount::Value(1.0));
        let volume = abs(AbsType::Volume, Amount::Value(1.0));
        assert!(derive_concentration(&mass, &moles).is_none());
        assert!(derive_concentration(&moles, &mass).is_none());
        assert!(derive_concentration(&volume, &mass).is_none());
    }

    #[test]
    fn test_range_child_and_error() {
        let ranged = derive_concentration(
            &abs(AbsType::Volume, Amount::Range(1.0, 2.0)),
            &abs(AbsType::Volume, Amount::Value(10.0)),
        )
        .unwrap();
        assert_eq!(ranged.quantity, Amount::Range(10.0, 20.0));
        assert_eq!(ranged.error, None);

        let mut child = abs(AbsType::Mass, Amount::Value(10.0));
        child.error = Some(1.0);
        let with_error =
            derive_concentration(&child, &abs(AbsType::Mass, Amount::Value(50.0))).unwrap();
        assert_eq!(with_error.error, Some(2.0));
    }

    #[test]
    fn test_parent_must_be_positive_scalar() {
        let child = abs(AbsType::Mass, Amount::Value(1.0));
        assert!(derive_concentration(&child, &abs(AbsType::Mass, Amount::Value(0.0))).is_none());
        assert!(
            derive_concentration(&child, &abs(AbsType::Mass, Amount::Range(1.0, 2.0))).is_none()
        );
    }

    #[test]
    fn test_relation_carries() {
        let mut child = abs(AbsType::Mass, Amount::Value(1.0));
        child.relation = Relation::LessThan;
        let parent = abs(AbsType::Mass, Amount::Value(10.0));
        assert_eq!(
            derive_concentration(&child, &parent).unwrap().relation,
            Relation::LessThan
        );

        let mut approx_parent = parent;
        approx_parent.relation = Relation::Approximate;
        let plain = abs(AbsType::Mass, Amount::Value(1.0));
        assert_eq!(
            derive_concentration(&plain, &approx_parent).unwrap().relation,
            Relation::Approximate
        );
    }
}
