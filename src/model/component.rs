//! Mixfile component data structures.
//!
//! A [`MixfileComponent`] is one node of a mixture tree. The serde layout
//! follows the Mixfile JSON exchange format: camelCase keys, absent optional
//! fields are omitted, and empty collections are treated the same as absent.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Format version written to new documents.
pub const MIXFILE_VERSION: f64 = 1.0;

/// A single node in a mixture hierarchy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MixfileComponent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub synonyms: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formula: Option<String>,
    /// Opaque molecular structure blob (typically an MDL Molfile)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub molfile: Option<String>,
    /// Precomputed structure identifier, authoritative when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inchi: Option<String>,
    /// Hash of the structure identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inchi_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub smiles: Option<String>,
    /// `[numerator, denominator]` relative to siblings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ratio: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<Quantity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<f64>,
    /// Unit display name or URI
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub units: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relation: Option<Relation>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub identifiers: IndexMap<String, IdentifierValue>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub links: IndexMap<String, IdentifierValue>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub contents: Vec<MixfileComponent>,
}

impl MixfileComponent {
    /// Create a component with only a name set
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    /// Builder-style: set quantity and units
    #[must_use]
    pub fn with_quantity(mut self, quantity: impl Into<Quantity>, units: impl Into<String>) -> Self {
        self.quantity = Some(quantity.into());
        self.units = Some(units.into());
        self
    }

    /// Builder-style: set a sibling ratio
    #[must_use]
    pub fn with_ratio(mut self, numerator: f64, denominator: f64) -> Self {
        self.ratio = Some(vec![numerator, denominator]);
        self
    }

    /// Builder-style: set the structure identifier and its key
    #[must_use]
    pub fn with_inchi(mut self, inchi: impl Into<String>, inchi_key: Option<String>) -> Self {
        self.inchi = Some(inchi.into());
        self.inchi_key = inchi_key;
        self
    }

    /// Builder-style: append a child component
    #[must_use]
    pub fn with_child(mut self, child: Self) -> Self {
        self.contents.push(child);
        self
    }

    /// True when the node carries a structure blob or identifier
    #[must_use]
    pub fn has_structure(&self) -> bool {
        self.molfile.as_deref().is_some_and(|m| !m.trim().is_empty())
            || self.inchi.as_deref().is_some_and(|i| !i.is_empty())
    }

    /// Ratio as `(numerator, denominator)`, if it is well formed.
    ///
    /// A ratio needs exactly two finite entries and a positive denominator.
    #[must_use]
    pub fn ratio_pair(&self) -> Option<(f64, f64)> {
        match self.ratio.as_deref() {
            Some(&[numerator, denominator])
                if numerator.is_finite() && denominator.is_finite() && denominator > 0.0 =>
            {
                Some((numerator, denominator))
            }
            _ => None,
        }
    }

    /// The quantity as a usable amount, if it is well formed
    #[must_use]
    pub fn amount(&self) -> Option<Amount> {
        self.quantity.as_ref().and_then(Quantity::amount)
    }

    /// Relation, with `=` assumed when absent
    #[must_use]
    pub fn relation_or_default(&self) -> Relation {
        self.relation.unwrap_or_default()
    }
}

/// Quantity as written in the document: a single number or a list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Quantity {
    Value(f64),
    List(Vec<f64>),
}

impl Quantity {
    /// Interpret the raw quantity.
    ///
    /// Lists of exactly two entries are ranges; any other list length is
    /// treated as no quantity.
    #[must_use]
    pub fn amount(&self) -> Option<Amount> {
        match self {
            Self::Value(value) if value.is_finite() => Some(Amount::Value(*value)),
            Self::List(values) => match values.as_slice() {
                &[low, high] if low.is_finite() && high.is_finite() => {
                    Some(Amount::Range(low, high))
                }
                _ => None,
            },
            Self::Value(_) => None,
        }
    }
}

impl From<f64> for Quantity {
    fn from(value: f64) -> Self {
        Self::Value(value)
    }
}

impl From<[f64; 2]> for Quantity {
    fn from(range: [f64; 2]) -> Self {
        Self::List(range.to_vec())
    }
}

/// A well-formed quantity: a scalar or a closed range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Amount {
    Value(f64),
    Range(f64, f64),
}

impl Amount {
    /// Multiply every endpoint by `factor`
    #[must_use]
    pub fn scale(self, factor: f64) -> Self {
        match self {
            Self::Value(v) => Self::Value(v * factor),
            Self::Range(low, high) => Self::Range(low * factor, high * factor),
        }
    }

    /// Scalar value, or `None` for ranges
    #[must_use]
    pub const fn scalar(self) -> Option<f64> {
        match self {
            Self::Value(v) => Some(v),
            Self::Range(..) => None,
        }
    }

    #[must_use]
    pub const fn is_range(self) -> bool {
        matches!(self, Self::Range(..))
    }

    /// Endpoints as a list (one entry for scalars)
    #[must_use]
    pub fn values(self) -> Vec<f64> {
        match self {
            Self::Value(v) => vec![v],
            Self::Range(low, high) => vec![low, high],
        }
    }
}

impl From<Amount> for Quantity {
    fn from(amount: Amount) -> Self {
        match amount {
            Amount::Value(v) => Self::Value(v),
            Amount::Range(low, high) => Self::List(vec![low, high]),
        }
    }
}

/// Qualifier on a quantity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Relation {
    #[default]
    #[serde(rename = "=")]
    Equal,
    #[serde(rename = "~")]
    Approximate,
    #[serde(rename = "<")]
    LessThan,
    #[serde(rename = "<=")]
    LessOrEqual,
    #[serde(rename = ">")]
    GreaterThan,
    #[serde(rename = ">=")]
    GreaterOrEqual,
}

impl Relation {
    /// The symbol as it appears in documents and identifiers
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Equal => "=",
            Self::Approximate => "~",
            Self::LessThan => "<",
            Self::LessOrEqual => "<=",
            Self::GreaterThan => ">",
            Self::GreaterOrEqual => ">=",
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Value in an `identifiers` or `links` map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IdentifierValue {
    Single(String),
    List(Vec<String>),
}

impl IdentifierValue {
    /// All values, in order
    #[must_use]
    pub fn values(&self) -> Vec<&str> {
        match self {
            Self::Single(v) => vec![v.as_str()],
            Self::List(list) => list.iter().map(String::as_str).collect(),
        }
    }
}

/// A complete Mixfile document: the root component plus its format version.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mixfile {
    pub mixfile_version: f64,
    #[serde(flatten)]
    pub root: MixfileComponent,
}

impl Default for Mixfile {
    fn default() -> Self {
        Self {
            mixfile_version: MIXFILE_VERSION,
            root: MixfileComponent::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantity_amounts() {
        assert_eq!(Quantity::Value(5.0).amount(), Some(Amount::Value(5.0)));
        assert_eq!(
            Quantity::List(vec![1.0, 2.0]).amount(),
            Some(Amount::Range(1.0, 2.0))
        );
        assert_eq!(Quantity::List(vec![1.0]).amount(), None);
        assert_eq!(Quantity::List(vec![]).amount(), None);
        assert_eq!(Quantity::List(vec![1.0, 2.0, 3.0]).amount(), None);
        assert_eq!(Quantity::Value(f64::NAN).amount(), None);
    }

    #[test]
    fn test_ratio_pair_rejects_bad_denominators() {
        let comp = MixfileComponent::default().with_ratio(1.0, 4.0);
        assert_eq!(comp.ratio_pair(), Some((1.0, 4.0)));

        let zero = MixfileComponent::default().with_ratio(1.0, 0.0);
        assert_eq!(zero.ratio_pair(), None);

        let negative = MixfileComponent::default().with_ratio(1.0, -2.0);
        assert_eq!(negative.ratio_pair(), None);

        let short = MixfileComponent {
            ratio: Some(vec![3.0]),
            ..Default::default()
        };
        assert_eq!(short.ratio_pair(), None);
    }

    #[test]
    fn test_relation_serde() {
        let comp: MixfileComponent =
            serde_json::from_str(r#"{"quantity": 5, "relation": ">="}"#).unwrap();
        assert_eq!(comp.relation, Some(Relation::GreaterOrEqual));
        assert_eq!(comp.relation_or_default().symbol(), ">=");

        let json = serde_json::to_string(&comp).unwrap();
        assert!(json.contains(r#""relation":">=""#));
    }

    #[test]
    fn test_identifier_values() {
        let comp: MixfileComponent = serde_json::from_str(
            r#"{"identifiers": {"CASRN": "64-17-5", "PubChem": ["702", "6342"]}}"#,
        )
        .unwrap();
        let keys: Vec<_> = comp.identifiers.keys().cloned().collect();
        assert_eq!(keys, vec!["CASRN", "PubChem"]);
        assert_eq!(comp.identifiers["PubChem"].values(), vec!["702", "6342"]);
        assert_eq!(comp.identifiers["CASRN"].values(), vec!["64-17-5"]);
    }

    #[test]
    fn test_empty_collections_are_omitted() {
        let comp = MixfileComponent::named("water");
        let json = serde_json::to_string(&comp).unwrap();
        assert_eq!(json, r#"{"name":"water"}"#);
    }

    #[test]
    fn test_amount_scale() {
        assert_eq!(Amount::Value(2.0).scale(0.5), Amount::Value(1.0));
        assert_eq!(Amount::Range(2.0, 4.0).scale(0.5), Amount::Range(1.0, 2.0));
        assert!(Amount::Range(1.0, 2.0).is_range());
        assert_eq!(Amount::Range(1.0, 2.0).scalar(), None);
    }
}
