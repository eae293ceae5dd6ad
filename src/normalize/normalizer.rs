//! Fixed-point inference of absolute amounts and concentrations.

use super::absolute::{to_absolute_units, AbsType, AbsoluteQuantity};
use super::concentration::derive_concentration;
use crate::model::{Amount, Mixture, Origin, Quantity, Relation};
use serde::Serialize;
use std::collections::HashMap;

/// What the normalizer learned about one component.
///
/// Notes are returned in [`Mixture::get_origins`] order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizationNote {
    pub origin: Origin,
    /// Resolved absolute amount, whether stated or inferred
    #[serde(skip_serializing_if = "Option::is_none")]
    pub absolute: Option<AbsoluteQuantity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conc_quantity: Option<Quantity>,
    /// Unit URI of `conc_quantity`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conc_units: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conc_error: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conc_relation: Option<Relation>,
}

impl NormalizationNote {
    /// Dimension of the resolved amount, `AbsType::None` if unresolved
    #[must_use]
    pub fn abs_type(&self) -> AbsType {
        self.absolute.map_or(AbsType::None, |abs| abs.abs_type)
    }

    /// True when a concentration was inferred
    #[must_use]
    pub const fn has_concentration(&self) -> bool {
        self.conc_quantity.is_some()
    }
}

/// Flattened node used during inference
#[derive(Debug)]
struct Node {
    children: Vec<usize>,
    absolute: Option<AbsoluteQuantity>,
}

/// Infers concentrations from scattered absolute quantities.
///
/// ```ignore
/// let notes = MixtureNormalizer::new().analyse(&mixture);
/// for note in notes.iter().filter(|n| n.has_concentration()) {
///     println!("{:?}: {:?}", note.origin, note.conc_quantity);
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct MixtureNormalizer {
    max_passes: Option<usize>,
}

impl MixtureNormalizer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the pass cap (defaults to the node count plus one)
    #[must_use]
    pub const fn with_max_passes(mut self, max_passes: Option<usize>) -> Self {
        self.max_passes = max_passes;
        self
    }

    /// Run inference over `mixture`, returning one note per component.
    #[must_use]
    pub fn analyse(&self, mixture: &Mixture) -> Vec<NormalizationNote> {
        let origins = mixture.get_origins();
        let mut nodes = flatten(mixture, &origins);

        // Each productive pass resolves at least one node, so the node count
        // bounds the loop; the cap only guards against a logic error.
        let cap = self.max_passes.unwrap_or(nodes.len() + 1);
        let mut passes = 0;
        loop {
            let summed = sum_bottom_up(&mut nodes);
            let completed = complete_top_down(&mut nodes);
            passes += 1;
            if !(summed || completed) {
                break;
            }
            if passes >= cap {
                tracing::warn!(passes, "normalization stopped at pass cap");
                break;
            }
        }
        tracing::debug!(
            passes,
            resolved = nodes.iter().filter(|n| n.absolute.is_some()).count(),
            total = nodes.len(),
            "normalization converged"
        );

        let mut notes: Vec<NormalizationNote> = origins
            .into_iter()
            .zip(&nodes)
            .map(|(origin, node)| NormalizationNote {
                origin,
                absolute: node.absolute,
                conc_quantity: None,
                conc_units: None,
                conc_error: None,
                conc_relation: None,
            })
            .collect();

        for node in &nodes {
            let Some(parent) = node.absolute else { continue };
            for &child_index in &node.children {
                let Some(child) = nodes[child_index].absolute else { continue };
                if let Some(conc) = derive_concentration(&child, &parent) {
                    let note = &mut notes[child_index];
                    note.conc_quantity = Some(conc.quantity.into());
                    note.conc_units = Some(conc.units);
                    note.conc_error = conc.error;
                    note.conc_relation = Some(conc.relation).filter(|r| *r != Relation::Equal);
                }
            }
        }
        notes
    }
}

/// Build the node table, aligned with `origins`
fn flatten(mixture: &Mixture, origins: &[Origin]) -> Vec<Node> {
    let positions: HashMap<&[usize], usize> = origins
        .iter()
        .enumerate()
        .map(|(index, origin)| (origin.as_slice(), index))
        .collect();

    let mut nodes: Vec<Node> = origins
        .iter()
        .map(|origin| Node {
            children: Vec::new(),
            absolute: mixture.get_component(origin).and_then(to_absolute_units),
        })
        .collect();

    for (index, origin) in origins.iter().enumerate().skip(1) {
        if let Some(&parent) = positions.get(&origin[..origin.len() - 1]) {
            nodes[parent].children.push(index);
        }
    }
    nodes
}

/// Resolve unresolved branches whose children all share one scalar dimension.
///
/// Walks in reverse pre-order so sums cascade upward within a single pass.
fn sum_bottom_up(nodes: &mut [Node]) -> bool {
    let mut changed = false;
    for index in (0..nodes.len()).rev() {
        if nodes[index].absolute.is_some() || nodes[index].children.is_empty() {
            continue;
        }
        let children: Vec<AbsoluteQuantity> = nodes[index]
            .children
            .iter()
            .filter_map(|&c| nodes[c].absolute)
            .collect();
        if children.len() != nodes[index].children.len() {
            continue;
        }
        let abs_type = children[0].abs_type;
        if abs_type == AbsType::None || children.iter().any(|c| c.abs_type != abs_type) {
            continue;
        }
        let Some(total) = children.iter().map(AbsoluteQuantity::scalar).sum::<Option<f64>>() else {
            continue;
        };
        let error = children.iter().map(|c| c.error).sum::<Option<f64>>();
        let relation = if children.iter().all(|c| c.relation == Relation::Equal) {
            Relation::Equal
        } else {
            Relation::Approximate
        };

        nodes[index].absolute = Some(AbsoluteQuantity {
            abs_type,
            amount: Amount::Value(total),
            error,
            relation,
        });
        changed = true;
    }
    changed
}

/// Fill in the one missing child of a resolved branch by subtraction.
fn complete_top_down(nodes: &mut [Node]) -> bool {
    let mut changed = false;
    for index in 0..nodes.len() {
        let Some(parent) = nodes[index].absolute else { continue };
        let Some(parent_amount) = parent.scalar() else { continue };
        let children = &nodes[index].children;
        if children.len() < 2 {
            continue;
        }

        let mut missing = None;
        let mut sibling_total = 0.0;
        let mut usable = true;
        for &child in children {
            match nodes[child].absolute {
                None if missing.is_none() => missing = Some(child),
                None => {
                    usable = false;
                    break;
                }
                Some(abs) => match abs.scalar() {
                    Some(amount) if abs.abs_type == parent.abs_type => sibling_total += amount,
                    _ => {
                        usable = false;
                        break;
                    }
                },
            }
        }
        let Some(missing) = missing.filter(|_| usable) else { continue };

        let remainder = parent_amount - sibling_total;
        if remainder < 0.0 {
            tracing::debug!(node = index, remainder, "children exceed parent amount");
            continue;
        }
        nodes[missing].absolute = Some(AbsoluteQuantity {
            abs_type: parent.abs_type,
            amount: Amount::Value(remainder),
            error: None,
            relation: Relation::Equal,
        });
        changed = true;
    }
    changed
}
