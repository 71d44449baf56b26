//! Area tree produced by layout.
//!
//! Areas are the positioned boxes a painting backend consumes. The tree is
//! append-only: a parent receives finished children by value.

mod boxes;
mod ids;
mod page;

pub use boxes::{Area, AreaKind, BlockGeometry, GeneratedBy};
pub use ids::{IdReferences, IdTarget};
pub use page::{AreaTree, PageArea};
