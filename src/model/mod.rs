//! Input model types for layout.
//!
//! This module defines the already-resolved representation handed to the
//! layout core by upstream parsing and property resolution: page templates,
//! sequence masters, page sequences, and the content node tree.

mod document;
mod geometry;
mod location;
mod master;
mod node;
mod style;

pub use document::{Declaration, FoDocument, ForcePageCount, PageSequence, StaticContent};
pub use geometry::{Margins, Rect};
pub use location::SourceLocation;
pub use master::{
    BlankOrNotBlank, ConditionalReference, OddOrEven, PagePosition, PageTemplate, Region,
    RegionClass, SequenceMaster, SubSequence,
};
pub use node::{FoNode, Line, Marker, NodeKind};
pub use style::{BreakKind, BreakValue, Color, ResolvedStyle, TextAlign};
