//! Error types for folayout library.

use serde::{Deserialize, Serialize};
use std::io;
use thiserror::Error;

use crate::model::SourceLocation;

/// Result type alias for folayout operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while building masters or laying out pages.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input document could not be deserialized.
    #[error("Malformed source document: {0}")]
    Source(String),

    /// A master name was declared twice, in either pool.
    #[error(
        "'master-name' ({name}) must be unique across page-masters and page-sequence-masters{}",
        at(.location)
    )]
    DuplicateName {
        /// The reused master name
        name: String,
        /// Where the second declaration was made
        location: Option<SourceLocation>,
    },

    /// A region name is mapped to two different region classes.
    #[error(
        "Region-name ({region_name}) is being mapped to multiple region-classes ({class_a} and {class_b}){}",
        at(.location)
    )]
    NameConflict {
        /// The user-visible region name
        region_name: String,
        /// The class seen first
        class_a: String,
        /// The conflicting class
        class_b: String,
        /// Location of the template carrying the conflicting region
        location: Option<SourceLocation>,
    },

    /// An id was registered twice in the same document.
    #[error("Duplicate id '{id}' (first used on page {first_page}){}", at(.location))]
    DuplicateId {
        /// The reused id
        id: String,
        /// Page number holding the first registration
        first_page: u32,
        /// Location of the node carrying the duplicate
        location: Option<SourceLocation>,
    },

    /// A child node is not permitted by its parent's content model.
    #[error("Children of {parent} must be {expected}, found {found}{}", at(.location))]
    Structural {
        /// Parent node name
        parent: String,
        /// Description of the permitted content
        expected: String,
        /// Offending child node name
        found: String,
        /// Location of the offending child
        location: Option<SourceLocation>,
    },

    /// A master reference names neither a page template nor a sequence master.
    #[error("No page master or page sequence master named '{name}'{}", at(.location))]
    UnknownMaster {
        /// The unresolved reference
        name: String,
        /// Where the reference was made
        location: Option<SourceLocation>,
    },

    /// A flow targets a region name no page template defines.
    #[error("Flow name '{flow_name}' does not match any region name{}", at(.location))]
    UnknownRegion {
        /// The unresolved flow name
        flow_name: String,
        /// Where the flow was declared
        location: Option<SourceLocation>,
    },

    /// No conditional alternative applies to a page.
    #[error("Sequence master '{master}' has no applicable page master for page {page_index}")]
    NoMatchingMaster {
        /// Sequence master name
        master: String,
        /// 1-based page index within the sequence
        page_index: u32,
    },

    /// The declarations contained no master at all.
    #[error("Layout master set must contain at least one simple-page-master or page-sequence-master")]
    EmptyMasterSet,

    /// A page template is internally inconsistent.
    #[error("Invalid page template '{name}': {reason}")]
    InvalidTemplate {
        /// Template name
        name: String,
        /// What is wrong with it
        reason: String,
    },

    /// Generic layout-time failure.
    #[error("Layout error: {0}")]
    Layout(String),

    /// Error while producing output (JSON, text).
    #[error("Rendering error: {0}")]
    Render(String),
}

impl Error {
    /// Whether this error comes from the master declarations rather than page layout.
    pub fn is_declaration_error(&self) -> bool {
        matches!(
            self,
            Error::DuplicateName { .. }
                | Error::NameConflict { .. }
                | Error::UnknownMaster { .. }
                | Error::EmptyMasterSet
                | Error::InvalidTemplate { .. }
        )
    }

    /// Source location attached to this error, if any.
    pub fn location(&self) -> Option<&SourceLocation> {
        match self {
            Error::DuplicateName { location, .. }
            | Error::NameConflict { location, .. }
            | Error::DuplicateId { location, .. }
            | Error::Structural { location, .. }
            | Error::UnknownMaster { location, .. }
            | Error::UnknownRegion { location, .. } => location.as_ref(),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Source(err.to_string())
    }
}

/// A recoverable problem reported during layout.
///
/// Diagnostics do not stop the layout pass; they are collected on the
/// resulting area tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Human-readable message
    pub message: String,

    /// Location of the offending construct
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<SourceLocation>,

    /// Page number being filled when the problem was found
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_number: Option<u32>,
}

impl Diagnostic {
    /// Report an error that was recovered from.
    pub fn from_error(err: &Error, page_number: Option<u32>) -> Self {
        Self {
            message: err.to_string(),
            location: err.location().cloned(),
            page_number,
        }
    }
}

fn at(location: &Option<SourceLocation>) -> String {
    match location {
        Some(loc) => format!(" (at {})", loc),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::EmptyMasterSet;
        assert!(err.to_string().contains("at least one"));

        let err = Error::DuplicateName {
            name: "odd".to_string(),
            location: Some(SourceLocation::new(12, 4)),
        };
        assert_eq!(
            err.to_string(),
            "'master-name' (odd) must be unique across page-masters and page-sequence-masters (at 12:4)"
        );
    }

    #[test]
    fn test_name_conflict_display() {
        let err = Error::NameConflict {
            region_name: "body".to_string(),
            class_a: "xsl-region-body".to_string(),
            class_b: "xsl-region-before".to_string(),
            location: None,
        };
        assert_eq!(
            err.to_string(),
            "Region-name (body) is being mapped to multiple region-classes (xsl-region-body and xsl-region-before)"
        );
        assert!(err.is_declaration_error());
    }

    #[test]
    fn test_location_accessor() {
        let err = Error::DuplicateId {
            id: "intro".to_string(),
            first_page: 1,
            location: Some(SourceLocation::new(3, 1)),
        };
        assert_eq!(err.location().map(|l| l.line), Some(3));
        assert!(!err.is_declaration_error());
    }

    #[test]
    fn test_diagnostic_from_error() {
        let err = Error::Structural {
            parent: "fo:list-block".to_string(),
            expected: "list-items".to_string(),
            found: "fo:block".to_string(),
            location: Some(SourceLocation::new(8, 3)),
        };
        let diagnostic = Diagnostic::from_error(&err, Some(2));
        assert_eq!(
            diagnostic.message,
            "Children of fo:list-block must be list-items, found fo:block (at 8:3)"
        );
        assert_eq!(diagnostic.location, Some(SourceLocation::new(8, 3)));
        assert_eq!(diagnostic.page_number, Some(2));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
