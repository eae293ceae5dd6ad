//! Origin vectors: addresses of components within a mixture tree.
//!
//! An origin is the list of zero-based child indices walked from the root.
//! `[]` is the root itself, `[1, 2]` the third child of the second child.
//! Origins are only valid until the next structural mutation.

/// Address of a component within a mixture tree
pub type Origin = Vec<usize>;

/// Split an origin into its parent origin and the index within that parent.
///
/// The root has neither, so it splits to `(None, None)`.
#[must_use]
pub fn split_origin(origin: &[usize]) -> (Option<Origin>, Option<usize>) {
    match origin.split_last() {
        Some((&index, parent)) => (Some(parent.to_vec()), Some(index)),
        None => (None, None),
    }
}

/// True if `origin` lies strictly below `ancestor`
#[must_use]
pub fn origin_is_descendent(ancestor: &[usize], origin: &[usize]) -> bool {
    origin.len() > ancestor.len() && origin.starts_with(ancestor)
}

/// Origin of the `index`th child of `parent`
#[must_use]
pub fn child_origin(parent: &[usize], index: usize) -> Origin {
    let mut origin = Vec::with_capacity(parent.len() + 1);
    origin.extend_from_slice(parent);
    origin.push(index);
    origin
}
