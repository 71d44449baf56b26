//! Resumable, paginating layout.
//!
//! Every node kind follows the same contract: `layout_node` is called with a
//! target area, places whatever fits, and reports a [`Status`]. A node that
//! could not finish records where it stopped in [`LayoutState`] and is called
//! again with a fresh area on the next page. Nothing already placed is laid
//! out twice, and styles are read once per node.
//!
//! The page-sequence driver ([`SequenceLayout`]) and [`layout_document`] sit
//! on top and turn non-terminal statuses into new pages.

mod block;
mod document;
mod driver;
mod lines;
mod list;
mod options;
mod sequence;
mod state;
mod status;
mod tree;

pub use document::layout_document;
pub use driver::{layout_node, FlowLayout, LayoutContext};
pub use options::{ErrorMode, LayoutOptions};
pub use sequence::{SequenceLayout, SequenceOutput};
pub use state::{LayoutProps, LayoutState, Progress};
pub use status::Status;
pub use tree::{ContentNode, ContentTree, NodeId};
