//! Number and concentration token formatting for the MInChI layers.

use crate::model::{Amount, MixfileComponent, Relation};
use crate::units::UnitCatalog;

/// Significant digits kept when printing values; trims float noise such as
/// `0.07 * 0.01 = 0.0007000000000000001`.
const SIGNIFICANT_DIGITS: i32 = 10;

/// Format a value with no trailing zeros and no exponent.
#[must_use]
pub fn format_number(value: f64) -> String {
    if value == 0.0 || !value.is_finite() {
        return "0".to_string();
    }
    let magnitude = value.abs().log10().floor() as i32;
    let decimals = (SIGNIFICANT_DIGITS - 1 - magnitude).max(0) as usize;
    let mut text = format!("{value:.decimals$}");
    if text.contains('.') {
        let trimmed = text.trim_end_matches('0').trim_end_matches('.').len();
        text.truncate(trimmed);
    }
    if text == "-0" {
        text = "0".to_string();
    }
    text
}

/// Concentration token for one component, or `None` if it has no usable
/// concentration.
///
/// A valid ratio wins and is written as a percentage (`pp`). Otherwise the
/// quantity is converted through the unit catalog: `[relation]value[..high]mnemonic`,
/// with `=` left implicit.
#[must_use]
pub fn concentration_token(comp: &MixfileComponent, catalog: &UnitCatalog) -> Option<String> {
    if let Some((numerator, denominator)) = comp.ratio_pair() {
        return Some(format!("{}pp", format_number(100.0 * numerator / denominator)));
    }

    let amount = comp.amount()?;
    let entry = catalog.resolve(comp.units.as_deref()?)?;
    let (mnemonic, values) = entry.to_minchi(&amount.values())?;

    let mut token = String::new();
    let relation = comp.relation_or_default();
    if relation != Relation::Equal {
        token.push_str(relation.symbol());
    }
    match (amount, values.as_slice()) {
        (Amount::Range(..), [low, high]) => {
            token.push_str(&format_number(*low));
            token.push_str("..");
            token.push_str(&format_number(*high));
        }
        (_, [value, ..]) => token.push_str(&format_number(*value)),
        _ => return None,
    }
    token.push_str(mnemonic);
    Some(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(25.0), "25");
        assert_eq!(format_number(0.5), "0.5");
        assert_eq!(format_number(0.07 * 0.01), "0.0007");
        assert_eq!(format_number(100.0 / 3.0), "33.33333333");
        assert_eq!(format_number(-2.5), "-2.5");
        assert_eq!(format_number(1e-12), "0.000000000001");
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(-0.0), "0");
    }

    #[test]
    fn test_ratio_token() {
        let comp = MixfileComponent::default().with_ratio(1.0, 4.0);
        assert_eq!(
            concentration_token(&comp, UnitCatalog::global()).as_deref(),
            Some("25pp")
        );
    }

    #[test]
    fn test_invalid_ratio_falls_back_to_quantity() {
        let mut comp = MixfileComponent::default().with_quantity(3.0, "%");
        comp.ratio = Some(vec![1.0, 0.0]);
        assert_eq!(
            concentration_token(&comp, UnitCatalog::global()).as_deref(),
            Some("3pp")
        );
    }

    #[test]
    fn test_quantity_tokens() {
        let catalog = UnitCatalog::global();
        let molar = MixfileComponent::default().with_quantity(2.5, "mM");
        assert_eq!(concentration_token(&molar, catalog).as_deref(), Some("0.0025mr"));

        let mut ranged = MixfileComponent::default().with_quantity([10.0, 20.0], "w/w%");
        ranged.relation = Some(Relation::Approximate);
        assert_eq!(concentration_token(&ranged, catalog).as_deref(), Some("~0.1..0.2wf"));

        let mut bounded = MixfileComponent::default().with_quantity(5.0, "%");
        bounded.relation = Some(Relation::LessOrEqual);
        assert_eq!(concentration_token(&bounded, catalog).as_deref(), Some("<=5pp"));
    }

    #[test]
    fn test_no_token() {
        let catalog = UnitCatalog::global();
        assert_eq!(concentration_token(&MixfileComponent::default(), catalog), None);
        let grams = MixfileComponent::default().with_quantity(5.0, "g");
        assert_eq!(concentration_token(&grams, catalog), None);
        let unitless = MixfileComponent {
            quantity: Some(5.0.into()),
            ..Default::default()
        };
        assert_eq!(concentration_token(&unitless, catalog), None);
    }
}
