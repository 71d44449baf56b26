//! Layout options and configuration.

/// Options for a layout pass.
#[derive(Debug, Clone)]
pub struct LayoutOptions {
    /// What to do with content-model violations
    pub error_mode: ErrorMode,

    /// Lay out independent page sequences on the rayon pool
    pub parallel: bool,

    /// Upper bound on pages per page sequence
    pub max_pages: u32,

    /// Lay out static content into side regions
    pub static_content: bool,
}

impl LayoutOptions {
    /// Create new layout options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Fail the pass on content-model violations.
    pub fn strict(mut self) -> Self {
        self.error_mode = ErrorMode::Strict;
        self
    }

    /// Truncate offending nodes and report a diagnostic.
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }

    /// Enable or disable parallel processing.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Set the per-sequence page cap.
    pub fn with_max_pages(mut self, max_pages: u32) -> Self {
        self.max_pages = max_pages;
        self
    }

    /// Enable or disable static content.
    pub fn with_static_content(mut self, enabled: bool) -> Self {
        self.static_content = enabled;
        self
    }
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            error_mode: ErrorMode::Lenient,
            parallel: true,
            max_pages: 10_000,
            static_content: true,
        }
    }
}

/// Handling of children a node's content model does not permit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Fail the layout pass
    Strict,
    /// Drop the remaining children, keep what was placed, record a diagnostic
    #[default]
    Lenient,
}
