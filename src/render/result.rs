//! Layout statistics.

use serde::{Deserialize, Serialize};

use crate::area::{AreaKind, AreaTree};

/// Counts describing a finished area tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutStats {
    /// Total number of pages
    pub page_count: u32,

    /// Pages inserted blank
    pub blank_page_count: u32,

    /// Page sequences that produced pages
    pub sequence_count: u32,

    /// Areas of every kind, regions included
    pub area_count: u32,

    /// Line areas
    pub line_count: u32,

    /// Registered ids
    pub id_count: u32,

    /// Diagnostics collected during layout
    pub diagnostic_count: u32,
}

impl LayoutStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect statistics from an area tree.
    pub fn from_tree(tree: &AreaTree) -> Self {
        let mut stats = Self::new();
        let mut last_sequence = None;

        for page in &tree.pages {
            stats.page_count += 1;
            if page.blank {
                stats.blank_page_count += 1;
            }
            if last_sequence != Some(page.sequence) {
                stats.sequence_count += 1;
                last_sequence = Some(page.sequence);
            }
            for region in &page.regions {
                region.walk(&mut |area, _| {
                    stats.area_count += 1;
                    if matches!(area.kind(), AreaKind::Line) {
                        stats.line_count += 1;
                    }
                });
            }
        }

        stats.id_count = tree.ids.len() as u32;
        stats.diagnostic_count = tree.diagnostics.len() as u32;
        stats
    }

    /// Merge another stats instance into this one.
    pub fn merge(&mut self, other: &LayoutStats) {
        self.page_count += other.page_count;
        self.blank_page_count += other.blank_page_count;
        self.sequence_count += other.sequence_count;
        self.area_count += other.area_count;
        self.line_count += other.line_count;
        self.id_count += other.id_count;
        self.diagnostic_count += other.diagnostic_count;
    }
}
