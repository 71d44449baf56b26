//! # folayout
//!
//! Resumable, paginating layout of formatting-object trees.
//!
//! This library takes a document whose styles are already resolved to final
//! numbers, picks a page template for every page from the declared page
//! masters, and pours the content into pages. Layout stops mid-subtree when a
//! page is full and resumes on the next page exactly where it stopped.
//!
//! ## Quick Start
//!
//! ```
//! use folayout::model::{FoDocument, FoNode, PageSequence, PageTemplate};
//! use folayout::{layout_document, LayoutOptions};
//!
//! fn main() -> folayout::Result<()> {
//!     let mut doc = FoDocument::new();
//!     doc.add_template(PageTemplate::letter("page"));
//!     doc.add_page_sequence(PageSequence::new(
//!         "page",
//!         FoNode::flow(vec![FoNode::text(14.4, ["Hello, pages."])]),
//!     ));
//!
//!     let tree = layout_document(&doc, &LayoutOptions::default())?;
//!     assert_eq!(tree.page_count(), 1);
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Page masters**: simple page masters and page-sequence masters with
//!   repeatable and conditional sub-sequences
//! - **Resumable layout**: blocks, lists and pre-measured lines split across pages
//! - **Forced breaks**: page, odd-page and even-page breaks with blank pages
//! - **Static content**: headers and footers laid out on every page
//! - **Parallel processing**: independent page sequences on the rayon pool
//! - **Output**: JSON and a plain-text outline of the area tree

pub mod area;
pub mod error;
pub mod layout;
pub mod masters;
pub mod model;
pub mod render;
pub mod source;

// Re-export commonly used types
pub use area::{Area, AreaTree, PageArea};
pub use error::{Diagnostic, Error, Result};
pub use layout::{layout_document, ErrorMode, LayoutOptions, Status};
pub use masters::{LayoutMasterSet, MasterSetBuilder, PageMasterSelector};
pub use model::{FoDocument, FoNode, PageSequence, PageTemplate, SequenceMaster};
pub use render::{JsonFormat, LayoutStats, PageSelection, RenderOptions};

use std::io::Read;
use std::path::Path;

/// Load a JSON document from a file and lay it out.
///
/// # Example
///
/// ```no_run
/// use folayout::layout_file;
///
/// let tree = layout_file("document.json").unwrap();
/// println!("Pages: {}", tree.page_count());
/// ```
pub fn layout_file<P: AsRef<Path>>(path: P) -> Result<AreaTree> {
    layout_file_with_options(path, &LayoutOptions::default())
}

/// Load a JSON document from a file and lay it out with custom options.
///
/// # Example
///
/// ```no_run
/// use folayout::{layout_file_with_options, LayoutOptions};
///
/// let options = LayoutOptions::new().strict().sequential();
/// let tree = layout_file_with_options("document.json", &options).unwrap();
/// ```
pub fn layout_file_with_options<P: AsRef<Path>>(
    path: P,
    options: &LayoutOptions,
) -> Result<AreaTree> {
    let doc = source::load_file(path)?;
    layout_document(&doc, options)
}

/// Lay out a JSON document held in memory.
pub fn layout_bytes(data: &[u8]) -> Result<AreaTree> {
    let doc = source::load_bytes(data)?;
    layout_document(&doc, &LayoutOptions::default())
}

/// Lay out a JSON document read from `reader`.
pub fn layout_reader<R: Read>(reader: R) -> Result<AreaTree> {
    let doc = source::load_reader(reader)?;
    layout_document(&doc, &LayoutOptions::default())
}

/// Lay out a JSON document file and return the area tree as JSON.
///
/// # Example
///
/// ```no_run
/// use folayout::{to_json, JsonFormat};
///
/// let json = to_json("document.json", JsonFormat::Pretty).unwrap();
/// std::fs::write("areas.json", json).unwrap();
/// ```
pub fn to_json<P: AsRef<Path>>(path: P, format: JsonFormat) -> Result<String> {
    let tree = layout_file(path)?;
    render::to_json(&tree, format)
}

/// Lay out a JSON document file and return a text outline of the pages.
pub fn to_text<P: AsRef<Path>>(path: P, options: &RenderOptions) -> Result<String> {
    let tree = layout_file(path)?;
    render::to_text(&tree, options)
}

/// Builder for laying out and rendering documents.
///
/// # Example
///
/// ```no_run
/// use folayout::{Formatter, JsonFormat};
///
/// let json = Formatter::new()
///     .strict()
///     .sequential()
///     .with_max_pages(500)
///     .layout_file("document.json")?
///     .to_json(JsonFormat::Compact)?;
/// # Ok::<(), folayout::Error>(())
/// ```
pub struct Formatter {
    layout_options: LayoutOptions,
    render_options: RenderOptions,
}

impl Formatter {
    /// Create a new Formatter builder.
    pub fn new() -> Self {
        Self {
            layout_options: LayoutOptions::default(),
            render_options: RenderOptions::default(),
        }
    }

    /// Fail on content-model violations.
    pub fn strict(mut self) -> Self {
        self.layout_options = self.layout_options.strict();
        self
    }

    /// Drop offending content and report diagnostics.
    pub fn lenient(mut self) -> Self {
        self.layout_options = self.layout_options.lenient();
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.layout_options = self.layout_options.sequential();
        self
    }

    /// Set the per-sequence page cap.
    pub fn with_max_pages(mut self, max_pages: u32) -> Self {
        self.layout_options = self.layout_options.with_max_pages(max_pages);
        self
    }

    /// Skip static content.
    pub fn without_static_content(mut self) -> Self {
        self.layout_options = self.layout_options.with_static_content(false);
        self
    }

    /// Set page selection for output.
    pub fn with_pages(mut self, pages: PageSelection) -> Self {
        self.render_options = self.render_options.with_pages(pages);
        self
    }

    /// Show area geometry in text output.
    pub fn with_geometry(mut self) -> Self {
        self.render_options = self.render_options.with_geometry(true);
        self
    }

    /// Lay out a document.
    pub fn layout(self, doc: &FoDocument) -> Result<Formatted> {
        let tree = layout_document(doc, &self.layout_options)?;
        Ok(Formatted {
            tree,
            render_options: self.render_options,
        })
    }

    /// Load a JSON document file and lay it out.
    pub fn layout_file<P: AsRef<Path>>(self, path: P) -> Result<Formatted> {
        let doc = source::load_file(path)?;
        self.layout(&doc)
    }

    /// Lay out a JSON document held in memory.
    pub fn layout_bytes(self, data: &[u8]) -> Result<Formatted> {
        let doc = source::load_bytes(data)?;
        self.layout(&doc)
    }
}

impl Default for Formatter {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of laying out a document.
pub struct Formatted {
    /// The laid-out pages
    pub tree: AreaTree,
    /// Render options to use
    render_options: RenderOptions,
}

impl Formatted {
    /// Convert the selected pages to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.render_options.select(&self.tree), format)
    }

    /// Convert the selected pages to a text outline.
    pub fn to_text(&self) -> Result<String> {
        render::to_text(&self.tree, &self.render_options)
    }

    /// Layout statistics.
    pub fn stats(&self) -> LayoutStats {
        LayoutStats::from_tree(&self.tree)
    }

    /// Get the area tree.
    pub fn tree(&self) -> &AreaTree {
        &self.tree
    }
}
