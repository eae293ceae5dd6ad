//! The addressable mixture tree.

use super::component::{Mixfile, MixfileComponent};
use super::origin::{child_origin, split_origin, Origin};
use crate::error::{ErrorContext, MixfileError, Result};
use crate::utils::content_hash;
use serde_json::{Map, Value};

/// A Mixfile document with origin-addressed navigation and mutation.
///
/// Each component exclusively owns its children, so the only way to change
/// the tree is through the methods here. Callers that need to keep the
/// original should `clone()` first; nothing is shared between clones.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mixture {
    mixfile: Mixfile,
}

impl Mixture {
    /// Create a mixture from an already-parsed document
    #[must_use]
    pub const fn new(mixfile: Mixfile) -> Self {
        Self { mixfile }
    }

    /// Create a mixture around a root component, with the current format version
    #[must_use]
    pub fn from_root(root: MixfileComponent) -> Self {
        Self {
            mixfile: Mixfile {
                root,
                ..Mixfile::default()
            },
        }
    }

    /// Parse a Mixfile JSON document.
    ///
    /// Fails when the document is not an object or lacks a numeric
    /// `mixfileVersion`.
    pub fn from_json(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(value)
    }

    /// Build from a JSON value, with the same checks as [`Mixture::from_json`]
    pub fn from_value(value: Value) -> Result<Self> {
        match value.get("mixfileVersion") {
            Some(version) if version.is_number() => {}
            Some(_) => {
                return Err(MixfileError::parse(
                    "root component",
                    crate::error::ParseErrorKind::InvalidValue {
                        field: "mixfileVersion".to_string(),
                        message: "must be a number".to_string(),
                    },
                ))
            }
            None => return Err(MixfileError::missing_field("mixfileVersion", "root component")),
        }
        let mixfile: Mixfile = serde_json::from_value(value).context("reading mixfile")?;
        Ok(Self { mixfile })
    }

    /// Serialize to compact JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.mixfile)?)
    }

    /// Serialize to indented JSON
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.mixfile)?)
    }

    #[must_use]
    pub const fn mixfile(&self) -> &Mixfile {
        &self.mixfile
    }

    #[must_use]
    pub fn into_mixfile(self) -> Mixfile {
        self.mixfile
    }

    #[must_use]
    pub const fn root(&self) -> &MixfileComponent {
        &self.mixfile.root
    }

    #[must_use]
    pub const fn version(&self) -> f64 {
        self.mixfile.mixfile_version
    }

    /// Content hash for quick equality checks between documents
    #[must_use]
    pub fn content_hash(&self) -> u64 {
        serde_json::to_vec(&self.mixfile).map_or(0, |bytes| content_hash(&bytes))
    }

    // ------------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------------

    /// Component at `origin`, or `None` if any index is out of range
    #[must_use]
    pub fn get_component(&self, origin: &[usize]) -> Option<&MixfileComponent> {
        let mut comp = &self.mixfile.root;
        for &index in origin {
            comp = comp.contents.get(index)?;
        }
        Some(comp)
    }

    /// Mutable access to the component at `origin`
    pub fn get_component_mut(&mut self, origin: &[usize]) -> Option<&mut MixfileComponent> {
        let mut comp = &mut self.mixfile.root;
        for &index in origin {
            comp = comp.contents.get_mut(index)?;
        }
        Some(comp)
    }

    /// Parent of the component at `origin`; `None` for the root
    #[must_use]
    pub fn get_parent_component(&self, origin: &[usize]) -> Option<&MixfileComponent> {
        let (parent, _) = split_origin(origin);
        self.get_component(&parent?)
    }

    /// Every origin in the tree, pre-order: parents before children,
    /// siblings in list order.
    #[must_use]
    pub fn get_origins(&self) -> Vec<Origin> {
        fn walk(comp: &MixfileComponent, origin: &[usize], origins: &mut Vec<Origin>) {
            for (index, child) in comp.contents.iter().enumerate() {
                let sub = child_origin(origin, index);
                origins.push(sub.clone());
                walk(child, &sub, origins);
            }
        }

        let mut origins = vec![Vec::new()];
        walk(&self.mixfile.root, &[], &mut origins);
        origins
    }

    /// See [`split_origin`]
    #[must_use]
    pub fn split_origin(origin: &[usize]) -> (Option<Origin>, Option<usize>) {
        split_origin(origin)
    }

    // ------------------------------------------------------------------------
    // Mutation
    // ------------------------------------------------------------------------

    /// Merge `patch` into the component at `origin`.
    ///
    /// Keys use the Mixfile JSON names. A `null` value deletes the field;
    /// any other value replaces it. Returns whether the component changed.
    pub fn set_component(&mut self, origin: &[usize], patch: &Map<String, Value>) -> Result<bool> {
        let comp = self
            .get_component_mut(origin)
            .ok_or_else(|| MixfileError::origin_not_found(origin))?;

        let mut fields = match serde_json::to_value(&*comp)? {
            Value::Object(fields) => fields,
            _ => return Err(MixfileError::validation("component did not serialize to an object")),
        };
        for (key, value) in patch {
            if key == "mixfileVersion" {
                continue;
            }
            if value.is_null() {
                fields.remove(key);
            } else {
                fields.insert(key.clone(), value.clone());
            }
        }

        let updated: MixfileComponent = serde_json::from_value(Value::Object(fields))
            .with_context(|| format!("applying patch at {origin:?}"))?;
        if updated == *comp {
            return Ok(false);
        }
        *comp = updated;
        Ok(true)
    }

    /// Remove the component at `origin`, splicing its children into its place.
    ///
    /// The root cannot be deleted; that returns `Ok(false)`.
    pub fn delete_component(&mut self, origin: &[usize]) -> Result<bool> {
        let (Some(parent_origin), Some(index)) = split_origin(origin) else {
            tracing::debug!("refusing to delete the root component");
            return Ok(false);
        };
        let parent = self
            .get_component_mut(&parent_origin)
            .filter(|parent| index < parent.contents.len())
            .ok_or_else(|| MixfileError::origin_not_found(origin))?;

        let removed = parent.contents.remove(index);
        parent.contents.splice(index..index, removed.contents);
        Ok(true)
    }

    /// Wrap the component at `origin` as the sole child of `component`.
    ///
    /// For the root, the old root (everything but the format version) moves
    /// into the new root's first child.
    pub fn prepend_before(&mut self, origin: &[usize], component: MixfileComponent) -> Result<()> {
        let slot = self
            .get_component_mut(origin)
            .ok_or_else(|| MixfileError::origin_not_found(origin))?;
        let existing = std::mem::take(slot);
        let mut wrapper = component;
        wrapper.contents = vec![existing];
        *slot = wrapper;
        Ok(())
    }

    /// Append `component` to the children at `origin`, returning its origin
    pub fn append_child(&mut self, origin: &[usize], component: MixfileComponent) -> Result<Origin> {
        let parent = self
            .get_component_mut(origin)
            .ok_or_else(|| MixfileError::origin_not_found(origin))?;
        parent.contents.push(component);
        Ok(child_origin(origin, parent.contents.len() - 1))
    }

    /// Move a component `delta` places among its siblings (clamped to the
    /// ends of the list). Returns the new origin, or `None` if nothing moved.
    pub fn move_component(&mut self, origin: &[usize], delta: isize) -> Result<Option<Origin>> {
        let (Some(parent_origin), Some(index)) = split_origin(origin) else {
            return Err(MixfileError::root_not_allowed("move"));
        };
        let parent = self
            .get_component_mut(&parent_origin)
            .filter(|parent| index < parent.contents.len())
            .ok_or_else(|| MixfileError::origin_not_found(origin))?;

        let last = parent.contents.len() - 1;
        let target = index.saturating_add_signed(delta).min(last);
        if target == index {
            return Ok(None);
        }
        let comp = parent.contents.remove(index);
        parent.contents.insert(target, comp);
        Ok(Some(child_origin(&parent_origin, target)))
    }

    /// Remove placeholder children recursively; returns the number removed
    pub fn strip_empty(&mut self) -> usize {
        fn strip(comp: &mut MixfileComponent) -> usize {
            let mut removed = 0;
            for child in &mut comp.contents {
                removed += strip(child);
            }
            let before = comp.contents.len();
            comp.contents.retain(|child| !is_component_empty(child));
            removed + before - comp.contents.len()
        }
        strip(&mut self.mixfile.root)
    }

    /// True when the root carries nothing at all
    #[must_use]
    pub fn is_empty(&self) -> bool {
        is_component_empty(&self.mixfile.root)
    }
}

impl From<Mixfile> for Mixture {
    fn from(mixfile: Mixfile) -> Self {
        Self::new(mixfile)
    }
}

/// True iff the component has no identifying field and no children.
#[must_use]
pub fn is_component_empty(comp: &MixfileComponent) -> bool {
    let text_set = |field: &Option<String>| field.as_deref().is_some_and(|s| !s.is_empty());

    !(text_set(&comp.name)
        || text_set(&comp.description)
        || text_set(&comp.formula)
        || text_set(&comp.molfile)
        || text_set(&comp.inchi)
        || text_set(&comp.inchi_key)
        || text_set(&comp.smiles)
        || text_set(&comp.units)
        || !comp.synonyms.is_empty()
        || comp.ratio.is_some()
        || comp.quantity.is_some()
        || comp.error.is_some()
        || comp.relation.is_some()
        || !comp.identifiers.is_empty()
        || !comp.links.is_empty()
        || !comp.contents.is_empty())
}
