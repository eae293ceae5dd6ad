//! Mixture data model.
//!
//! This module defines the Mixfile component tree and the [`Mixture`]
//! wrapper that addresses components by origin vector:
//!
//! ```ignore
//! let mut mixture = Mixture::from_json(&text)?;
//! for origin in mixture.get_origins() {
//!     let comp = mixture.get_component(&origin).expect("origin from this tree");
//!     println!("{origin:?} {}", comp.name.as_deref().unwrap_or("?"));
//! }
//! mixture.delete_component(&[0])?;
//! ```

mod component;
mod mixture;
mod origin;

pub use component::*;
pub use mixture::*;
pub use origin::*;
