//! Pages and the finished area tree.

use serde::{Deserialize, Serialize};

use super::{Area, AreaKind, IdReferences};
use crate::error::Diagnostic;
use crate::model::{PageTemplate, RegionClass};

/// One laid-out page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageArea {
    /// Page number (as printed; may restart per sequence)
    pub number: u32,

    /// 0-based index of the page sequence that produced the page
    pub sequence: usize,

    /// 1-based index of the page within its sequence
    pub index_in_sequence: u32,

    /// Name of the page template used
    pub template: String,

    /// Whether the page was inserted only to satisfy a parity constraint
    pub blank: bool,

    /// Page width in points
    pub width: f32,

    /// Page height in points
    pub height: f32,

    /// Region areas, one per region of the template
    pub regions: Vec<Area>,
}

impl PageArea {
    /// Materialize a blank page from a template.
    pub fn from_template(
        template: &PageTemplate,
        number: u32,
        sequence: usize,
        index_in_sequence: u32,
        blank: bool,
    ) -> Self {
        let regions = template
            .regions
            .iter()
            .map(|region| {
                let mut area = Area::region(region.class, region.name(), template.region_rect(region));
                area.set_background_color(region.background_color);
                area
            })
            .collect();

        Self {
            number,
            sequence,
            index_in_sequence,
            template: template.name.clone(),
            blank,
            width: template.page_width,
            height: template.page_height,
            regions,
        }
    }

    /// The region area exposed under `name`.
    pub fn region(&self, name: &str) -> Option<&Area> {
        self.regions.iter().find(|area| match area.kind() {
            AreaKind::Region { name: n, .. } => n == name,
            _ => false,
        })
    }

    /// Mutable access to a region, used while the page is being filled.
    pub(crate) fn region_mut(&mut self, name: &str) -> Option<&mut Area> {
        self.regions.iter_mut().find(|area| match area.kind() {
            AreaKind::Region { name: n, .. } => n == name,
            _ => false,
        })
    }

    /// The body region.
    pub fn body(&self) -> Option<&Area> {
        self.regions.iter().find(|area| {
            matches!(
                area.kind(),
                AreaKind::Region {
                    class: RegionClass::Body,
                    ..
                }
            )
        })
    }

    /// Text of the body's lines, in order.
    pub fn body_texts(&self) -> Vec<&str> {
        self.body().map(Area::line_texts).unwrap_or_default()
    }

    /// Whether no region holds any content.
    pub fn is_empty(&self) -> bool {
        self.regions.iter().all(Area::is_empty)
    }

    /// Number of areas on the page, regions included.
    pub fn area_count(&self) -> usize {
        self.regions.iter().map(Area::area_count).sum()
    }
}

/// The result of a layout pass: pages in page order plus cross-reference data.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AreaTree {
    /// Finished pages
    pub pages: Vec<PageArea>,

    /// Registered ids and where they landed
    pub ids: IdReferences,

    /// Recoverable problems reported during layout
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<Diagnostic>,
}

impl AreaTree {
    /// Create an empty area tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of pages.
    pub fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    /// Page by position (1-indexed, independent of printed numbers).
    pub fn get_page(&self, position: u32) -> Option<&PageArea> {
        if position == 0 {
            return None;
        }
        self.pages.get((position - 1) as usize)
    }

    /// Pages produced by one page sequence.
    pub fn sequence_pages(&self, sequence: usize) -> impl Iterator<Item = &PageArea> {
        self.pages.iter().filter(move |p| p.sequence == sequence)
    }

    /// The page an id was registered on.
    pub fn page_of_id(&self, id: &str) -> Option<&PageArea> {
        let number = self.ids.page_of(id)?;
        let target = self.ids.get(id)?;
        self.pages
            .iter()
            .find(|p| p.number == number && p.regions.iter().any(|r| r.find_id(id).is_some()))
            .or_else(|| {
                log::debug!("id '{}' registered at {:?} but not found on a page", id, target);
                None
            })
    }

    /// Whether the tree holds no pages.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Append a page.
    pub fn add_page(&mut self, page: PageArea) {
        self.pages.push(page);
    }
}
