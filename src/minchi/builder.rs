//! Canonical assembly of the MInChI string.

use super::fill::{fill_in_chi, FillInReport};
use super::format::concentration_token;
use super::keys::MInChIKeys;
use super::provider::StructureIdentifierProvider;
use crate::model::{MixfileComponent, Mixture};
use crate::units::UnitCatalog;
use serde::Serialize;
use std::fmt;

/// Version header of the identifier
pub const MINCHI_PREFIX: &str = "MInChI=0.00.1S/";

/// Prefix a structure identifier needs to be used; it is stripped in output
pub const INCHI_PREFIX: &str = "InChI=1S/";

/// The assembled identifier and its parts
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MInChIResult {
    pub minchi: String,
    pub molecules: String,
    pub hierarchy: String,
    pub concentrations: String,
    pub keys: MInChIKeys,
}

impl fmt::Display for MInChIResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.minchi)
    }
}

/// Builds canonical MInChI identifiers for mixtures.
///
/// ```ignore
/// let builder = MInChIBuilder::new();
/// let mut working = mixture.clone();
/// builder.fill_in_chi(&mut working, &provider).await;
/// let result = builder.formulate(&working);
/// println!("{} {}", result.minchi, result.keys.short);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct MInChIBuilder {
    catalog: &'static UnitCatalog,
}

impl Default for MInChIBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Running state of the layer walk
struct Walk {
    counter: usize,
    molecules: Vec<String>,
}

impl MInChIBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            catalog: UnitCatalog::global(),
        }
    }

    /// Fill in missing structure identifiers; see [`fill_in_chi`]
    pub async fn fill_in_chi(
        &self,
        mixture: &mut Mixture,
        provider: &dyn StructureIdentifierProvider,
    ) -> FillInReport {
        fill_in_chi(mixture, provider).await
    }

    /// Assemble the canonical identifier. The mixture itself is not touched.
    #[must_use]
    pub fn formulate(&self, mixture: &Mixture) -> MInChIResult {
        let mut root = mixture.root().clone();
        self.sort_contents(&mut root);

        // A root that only groups its children does not appear in the layers.
        let top_level = if self.contributes(&root) {
            std::slice::from_ref(&root)
        } else {
            root.contents.as_slice()
        };

        let mut walk = Walk {
            counter: 0,
            molecules: Vec::new(),
        };
        let (hierarchy, concentrations) = self.assemble(top_level, &mut walk);
        let molecules = walk.molecules.join("&");

        let minchi = format!("{MINCHI_PREFIX}{molecules}/n{{{hierarchy}}}/g{{{concentrations}}}");
        let keys = MInChIKeys::derive(&molecules);
        tracing::debug!(components = walk.counter, %minchi, "formulated identifier");

        MInChIResult {
            minchi,
            molecules,
            hierarchy,
            concentrations,
            keys,
        }
    }

    /// True if the component puts anything into the molecules or
    /// concentration layers
    fn contributes(&self, comp: &MixfileComponent) -> bool {
        !structure_segment(comp).is_empty() || concentration_token(comp, self.catalog).is_some()
    }

    /// Sort every sibling list, deepest first.
    ///
    /// The primary key is the identifier (or `?`) and name separated by a tab.
    /// Ties fall back to the subtree's own layers so that siblings sharing a
    /// key still land in the same order whatever order they were written in.
    fn sort_contents(&self, comp: &mut MixfileComponent) {
        for child in &mut comp.contents {
            self.sort_contents(child);
        }
        comp.contents
            .sort_by_cached_key(|child| (sort_key(child), self.fragment(child)));
    }

    /// Layers of a single, already sorted, subtree
    fn fragment(&self, comp: &MixfileComponent) -> String {
        let mut walk = Walk {
            counter: 0,
            molecules: Vec::new(),
        };
        let (hierarchy, concentrations) = self.assemble(std::slice::from_ref(comp), &mut walk);
        format!("{}/{hierarchy}/{concentrations}", walk.molecules.join("&"))
    }

    /// Walk sibling lists, numbering components in pre-order. Returns the
    /// hierarchy and concentration layers; molecules accumulate in `walk`.
    fn assemble(&self, siblings: &[MixfileComponent], walk: &mut Walk) -> (String, String) {
        let mut hierarchy = Vec::with_capacity(siblings.len());
        let mut concentrations = Vec::with_capacity(siblings.len());

        for comp in siblings {
            walk.counter += 1;
            walk.molecules.push(structure_segment(comp).to_string());

            let mut hier = walk.counter.to_string();
            let mut conc = concentration_token(comp, self.catalog).unwrap_or_default();
            if !comp.contents.is_empty() {
                let (sub_hier, sub_conc) = self.assemble(&comp.contents, walk);
                hier.push('{');
                hier.push_str(&sub_hier);
                hier.push('}');
                conc.push('{');
                conc.push_str(&sub_conc);
                conc.push('}');
            }
            hierarchy.push(hier);
            concentrations.push(conc);
        }

        (hierarchy.join("&"), concentrations.join("&"))
    }
}

/// Sibling sort key: identifier (or `?`), tab, name
fn sort_key(comp: &MixfileComponent) -> String {
    format!(
        "{}\t{}",
        comp.inchi.as_deref().unwrap_or("?"),
        comp.name.as_deref().unwrap_or("")
    )
}

/// The identifier without its prefix, or empty if it lacks the prefix
fn structure_segment(comp: &MixfileComponent) -> &str {
    comp.inchi
        .as_deref()
        .and_then(|inchi| inchi.strip_prefix(INCHI_PREFIX))
        .unwrap_or("")
}
