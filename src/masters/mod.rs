//! Page-master registry and per-sequence master selection.

mod registry;
mod selector;

pub use registry::{LayoutMasterSet, MasterReference, MasterSetBuilder};
pub use selector::PageMasterSelector;
