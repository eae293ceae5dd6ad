//! Static unit table.
//!
//! Units are identified by URI (mostly from the OBO Units Ontology). Each URI
//! has one or more display names, the first of which is preferred, and may
//! map onto a MInChI concentration mnemonic with a scale factor: a value in
//! the unit multiplied by the scale gives the MInChI-encoded value. Masses,
//! volumes and amounts of substance also carry their scale to grams, litres
//! or moles.

use crate::normalize::AbsType;
use indexmap::IndexMap;
use std::sync::LazyLock;

const UO: &str = "http://purl.obolibrary.org/obo/UO_";

/// One unit in the catalog
#[derive(Debug, Clone, PartialEq)]
pub struct UnitEntry {
    pub uri: String,
    /// Display names; the first is preferred
    pub names: Vec<&'static str>,
    /// MInChI mnemonic and the scale from this unit to it
    pub minchi: Option<(&'static str, f64)>,
    /// Dimension and the scale from this unit to grams, litres or moles
    pub absolute: Option<(AbsType, f64)>,
}

impl UnitEntry {
    /// Preferred display name
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.names[0]
    }

    /// Scale values into MInChI units, if this unit has a mnemonic
    #[must_use]
    pub fn to_minchi(&self, values: &[f64]) -> Option<(&'static str, Vec<f64>)> {
        let (mnemonic, scale) = self.minchi?;
        Some((mnemonic, values.iter().map(|v| v * scale).collect()))
    }

    /// Inverse of [`UnitEntry::to_minchi`]
    #[must_use]
    pub fn from_minchi(&self, values: &[f64]) -> Option<Vec<f64>> {
        let (_, scale) = self.minchi?;
        Some(values.iter().map(|v| v / scale).collect())
    }

    /// Scale values into the internal unit of this unit's dimension
    #[must_use]
    pub fn to_absolute(&self, values: &[f64]) -> Option<(AbsType, Vec<f64>)> {
        let (abs_type, scale) = self.absolute?;
        Some((abs_type, values.iter().map(|v| v * scale).collect()))
    }
}

/// (UO suffix, names, MInChI mapping, absolute dimension)
type UnitRow = (
    &'static str,
    &'static [&'static str],
    Option<(&'static str, f64)>,
    Option<(AbsType, f64)>,
);

const MASS: AbsType = AbsType::Mass;
const VOLUME: AbsType = AbsType::Volume;
const MOLES: AbsType = AbsType::Moles;

const UNIT_ROWS: &[UnitRow] = &[
    // Relative concentrations
    ("0000187", &["%", "percent"], Some(("pp", 1.0)), None),
    ("0000163", &["w/w%", "wt%", "mass percent"], Some(("wf", 0.01)), None),
    ("0000164", &["w/v%", "mass/volume percent"], Some(("wv", 0.01)), None),
    ("0000205", &["v/v%", "vol%", "volume percent"], Some(("vf", 0.01)), None),
    ("0000191", &["mol%", "mole percent"], Some(("mf", 0.01)), None),
    ("0000169", &["ppm", "parts per million"], Some(("pp", 1e-4)), None),
    ("0000170", &["ppb", "parts per billion"], Some(("pp", 1e-7)), None),
    ("0000190", &["ratio"], None, None),
    // Molar concentrations
    ("0000062", &["mol/L", "M", "molar"], Some(("mr", 1.0)), None),
    ("0000063", &["mmol/L", "mM", "millimolar"], Some(("mr", 1e-3)), None),
    ("0000064", &["µmol/L", "umol/L", "µM", "uM", "micromolar"], Some(("mr", 1e-6)), None),
    ("0000065", &["nmol/L", "nM", "nanomolar"], Some(("mr", 1e-9)), None),
    ("0000066", &["pmol/L", "pM", "picomolar"], Some(("mr", 1e-12)), None),
    ("0000068", &["mol/kg", "molal"], Some(("mb", 1.0)), None),
    // Mass concentrations
    ("0000175", &["g/L", "gram per litre"], Some(("gl", 1.0)), None),
    ("0000176", &["mg/mL", "milligram per millilitre"], Some(("gl", 1.0)), None),
    ("0000273", &["mg/L", "milligram per litre"], Some(("gl", 1e-3)), None),
    // Mass
    ("0000021", &["g", "gram"], None, Some((MASS, 1.0))),
    ("0000022", &["mg", "milligram"], None, Some((MASS, 1e-3))),
    ("0000023", &["µg", "ug", "microgram"], None, Some((MASS, 1e-6))),
    ("0000024", &["ng", "nanogram"], None, Some((MASS, 1e-9))),
    ("0000009", &["kg", "kilogram"], None, Some((MASS, 1e3))),
    // Volume
    ("0000099", &["L", "l", "litre", "liter"], None, Some((VOLUME, 1.0))),
    ("0000098", &["mL", "ml", "millilitre", "milliliter"], None, Some((VOLUME, 1e-3))),
    ("0000101", &["µL", "uL", "microlitre", "microliter"], None, Some((VOLUME, 1e-6))),
    ("0000102", &["nL", "nanolitre", "nanoliter"], None, Some((VOLUME, 1e-9))),
    // Amount
    ("0000013", &["mol", "mole"], None, Some((MOLES, 1.0))),
    ("0000040", &["mmol", "millimole"], None, Some((MOLES, 1e-3))),
    ("0000039", &["µmol", "umol", "micromole"], None, Some((MOLES, 1e-6))),
    ("0000041", &["nmol", "nanomole"], None, Some((MOLES, 1e-9))),
];

static CATALOG: LazyLock<UnitCatalog> = LazyLock::new(UnitCatalog::build);

/// Read-only lookup table between unit names, URIs and MInChI mnemonics.
#[derive(Debug)]
pub struct UnitCatalog {
    entries: Vec<UnitEntry>,
    by_name: IndexMap<&'static str, usize>,
    by_uri: IndexMap<String, usize>,
}

impl UnitCatalog {
    /// The process-wide catalog, built on first use
    pub fn global() -> &'static Self {
        &CATALOG
    }

    fn build() -> Self {
        let entries: Vec<UnitEntry> = UNIT_ROWS
            .iter()
            .map(|(suffix, names, minchi, absolute)| UnitEntry {
                uri: format!("{UO}{suffix}"),
                names: names.to_vec(),
                minchi: *minchi,
                absolute: *absolute,
            })
            .collect();

        let mut by_name = IndexMap::new();
        let mut by_uri = IndexMap::new();
        for (index, entry) in entries.iter().enumerate() {
            by_uri.insert(entry.uri.clone(), index);
            for name in &entry.names {
                by_name.entry(*name).or_insert(index);
            }
        }
        tracing::debug!(units = entries.len(), "unit catalog initialized");

        Self {
            entries,
            by_name,
            by_uri,
        }
    }

    /// URI for a display name (any alias)
    #[must_use]
    pub fn name_to_uri(&self, name: &str) -> Option<&str> {
        self.by_name
            .get(name)
            .map(|&index| self.entries[index].uri.as_str())
    }

    /// Preferred display name for a URI
    #[must_use]
    pub fn uri_to_name(&self, uri: &str) -> Option<&'static str> {
        self.by_uri.get(uri).map(|&index| self.entries[index].name())
    }

    /// Look up a unit given either its URI or one of its names
    #[must_use]
    pub fn resolve(&self, units: &str) -> Option<&UnitEntry> {
        self.by_uri
            .get(units)
            .or_else(|| self.by_name.get(units))
            .map(|&index| &self.entries[index])
    }

    /// Convert values in the unit `uri` to MInChI units.
    ///
    /// Returns `None` if the URI is unknown or has no MInChI mapping.
    #[must_use]
    pub fn convert_to_minchi(&self, uri: &str, values: &[f64]) -> Option<(&'static str, Vec<f64>)> {
        self.by_uri
            .get(uri)
            .and_then(|&index| self.entries[index].to_minchi(values))
    }

    /// Convert MInChI-encoded values back into the first unit registered for
    /// the mnemonic, returning that unit's URI alongside the values.
    #[must_use]
    pub fn convert_from_minchi(&self, mnemonic: &str, values: &[f64]) -> Option<(&str, Vec<f64>)> {
        let entry = self
            .entries
            .iter()
            .find(|entry| entry.minchi.is_some_and(|(m, _)| m == mnemonic))?;
        Some((entry.uri.as_str(), entry.from_minchi(values)?))
    }

    /// Closest known unit name to `name`, for "did you mean" hints
    #[must_use]
    pub fn suggest(&self, name: &str) -> Option<&'static str> {
        self.by_name
            .keys()
            .map(|candidate| (*candidate, strsim::jaro_winkler(name, candidate)))
            .filter(|(_, score)| *score >= 0.8)
            .max_by(|a, b| a.1.total_cmp(&b.1).then_with(|| b.0.cmp(a.0)))
            .map(|(candidate, _)| candidate)
    }

    /// All entries in table order
    pub fn entries(&self) -> impl Iterator<Item = &UnitEntry> {
        self.entries.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_uri_roundtrip() {
        let catalog = UnitCatalog::global();
        let uri = catalog.name_to_uri("mM").unwrap();
        assert_eq!(uri, "http://purl.obolibrary.org/obo/UO_0000063");
        assert_eq!(catalog.uri_to_name(uri), Some("mmol/L"));
    }

    #[test]
    fn test_names_are_case_sensitive() {
        let catalog = UnitCatalog::global();
        assert_ne!(catalog.name_to_uri("mM"), catalog.name_to_uri("MM"));
        assert!(catalog.name_to_uri("MM").is_none());
    }

    #[test]
    fn test_resolve_accepts_uri_or_name() {
        let catalog = UnitCatalog::global();
        let by_name = catalog.resolve("g").unwrap();
        let by_uri = catalog.resolve(&by_name.uri).unwrap();
        assert_eq!(by_name, by_uri);
        assert!(catalog.resolve("furlongs").is_none());
    }

    #[test]
    fn test_convert_to_minchi() {
        let catalog = UnitCatalog::global();
        let uri = catalog.name_to_uri("w/w%").unwrap();
        let (mnemonic, values) = catalog.convert_to_minchi(uri, &[50.0]).unwrap();
        assert_eq!(mnemonic, "wf");
        assert!((values[0] - 0.5).abs() < 1e-12);

        let grams = catalog.name_to_uri("g").unwrap();
        assert!(catalog.convert_to_minchi(grams, &[1.0]).is_none());
    }

    #[test]
    fn test_convert_from_minchi() {
        let catalog = UnitCatalog::global();
        let (uri, values) = catalog.convert_from_minchi("mr", &[0.25]).unwrap();
        assert_eq!(catalog.uri_to_name(uri), Some("mol/L"));
        assert_eq!(values, vec![0.25]);
        assert!(catalog.convert_from_minchi("zz", &[1.0]).is_none());
    }

    #[test]
    fn test_suggest() {
        let catalog = UnitCatalog::global();
        assert_eq!(catalog.suggest("mol/l"), Some("mol/L"));
        assert_eq!(catalog.suggest("qqqqqqqq"), None);
    }

    #[test]
    fn test_absolute_dimensions() {
        let catalog = UnitCatalog::global();
        let milligram = catalog.resolve("milligram").unwrap();
        let (abs_type, values) = milligram.to_absolute(&[250.0]).unwrap();
        assert_eq!(abs_type, AbsType::Mass);
        assert!((values[0] - 0.25).abs() < 1e-12);
        assert_eq!(catalog.resolve("ml").unwrap().absolute, Some((AbsType::Volume, 1e-3)));
        assert_eq!(catalog.resolve("umol").unwrap().absolute, Some((AbsType::Moles, 1e-6)));
        assert!(catalog.resolve("w/w%").unwrap().absolute.is_none());
    }

    #[test]
    fn test_every_alias_shares_the_dimension() {
        for entry in UnitCatalog::global().entries() {
            for name in &entry.names {
                let resolved = UnitCatalog::global().resolve(name).unwrap();
                assert_eq!(resolved.absolute, entry.absolute, "{name}");
            }
        }
    }

    #[test]
    fn test_global_is_shared() {
        assert!(std::ptr::eq(UnitCatalog::global(), UnitCatalog::global()));
        assert!(!UnitCatalog::global().is_empty());
    }
}
