//! Source location tokens carried through for diagnostics.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Position of a declaration or node in the original source document.
///
/// The layout core never interprets these; they only end up in error
/// messages and diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct SourceLocation {
    /// Source file or URI, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_id: Option<String>,

    /// 1-based line number
    pub line: u32,

    /// 1-based column number
    pub column: u32,
}

impl SourceLocation {
    /// Create a location without a system id.
    pub fn new(line: u32, column: u32) -> Self {
        Self {
            system_id: None,
            line,
            column,
        }
    }

    /// Attach the source file or URI.
    pub fn with_system_id(mut self, system_id: impl Into<String>) -> Self {
        self.system_id = Some(system_id.into());
        self
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.system_id {
            Some(ref id) => write!(f, "{}:{}:{}", id, self.line, self.column),
            None => write!(f, "{}:{}", self.line, self.column),
        }
    }
}
