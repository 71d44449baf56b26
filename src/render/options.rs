//! Output options and configuration.

use std::ops::RangeInclusive;

use crate::area::AreaTree;

/// Options for rendering an area tree.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Which pages to include (by page number)
    pub page_selection: PageSelection,

    /// Include blank pages inserted for parity or page-count constraints
    pub include_blank_pages: bool,

    /// Print positions and sizes next to each area
    pub show_geometry: bool,

    /// Print registered ids and markers
    pub show_ids: bool,

    /// Spaces per nesting level in the text outline
    pub indent_width: usize,

    /// Append the diagnostics collected during layout
    pub include_diagnostics: bool,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set page selection.
    pub fn with_pages(mut self, selection: PageSelection) -> Self {
        self.page_selection = selection;
        self
    }

    /// Set a specific page range.
    pub fn with_page_range(mut self, range: RangeInclusive<u32>) -> Self {
        self.page_selection = PageSelection::Range(range);
        self
    }

    /// Include or skip blank pages.
    pub fn with_blank_pages(mut self, include: bool) -> Self {
        self.include_blank_pages = include;
        self
    }

    /// Show or hide area geometry.
    pub fn with_geometry(mut self, show: bool) -> Self {
        self.show_geometry = show;
        self
    }

    /// Show or hide ids and markers.
    pub fn with_ids(mut self, show: bool) -> Self {
        self.show_ids = show;
        self
    }

    /// Set the outline indent width.
    pub fn with_indent(mut self, width: usize) -> Self {
        self.indent_width = width.clamp(1, 8);
        self
    }

    /// Include or skip diagnostics.
    pub fn with_diagnostics(mut self, include: bool) -> Self {
        self.include_diagnostics = include;
        self
    }

    /// Whether a page makes it into the output.
    pub fn includes_page(&self, number: u32, blank: bool) -> bool {
        (self.include_blank_pages || !blank) && self.page_selection.includes(number)
    }

    /// Copy of `tree` holding only the selected pages.
    pub fn select(&self, tree: &AreaTree) -> AreaTree {
        AreaTree {
            pages: tree
                .pages
                .iter()
                .filter(|p| self.includes_page(p.number, p.blank))
                .cloned()
                .collect(),
            ids: tree.ids.clone(),
            diagnostics: tree.diagnostics.clone(),
        }
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            page_selection: PageSelection::All,
            include_blank_pages: true,
            show_geometry: false,
            show_ids: true,
            indent_width: 2,
            include_diagnostics: true,
        }
    }
}

/// Page selection for output.
#[derive(Debug, Clone, Default)]
pub enum PageSelection {
    /// Every page
    #[default]
    All,
    /// A range of page numbers (inclusive)
    Range(RangeInclusive<u32>),
    /// Specific page numbers
    Pages(Vec<u32>),
    /// Several ranges of page numbers (inclusive), sorted and disjoint
    Ranges(Vec<RangeInclusive<u32>>),
}

impl PageSelection {
    /// Check if a page number is selected.
    pub fn includes(&self, page: u32) -> bool {
        match self {
            PageSelection::All => true,
            PageSelection::Range(range) => range.contains(&page),
            PageSelection::Pages(pages) => pages.contains(&page),
            PageSelection::Ranges(ranges) => ranges.iter().any(|r| r.contains(&page)),
        }
    }

    /// Parse a selection such as `all`, `3-7` or `1,4,9-12`.
    pub fn parse(s: &str) -> Result<Self, String> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("all") {
            return Ok(PageSelection::All);
        }

        let number = |text: &str| {
            text.trim()
                .parse::<u32>()
                .map_err(|_| format!("Invalid page number '{}'", text.trim()))
        };
        let span = |part: &str| -> Result<RangeInclusive<u32>, String> {
            match part.split_once('-') {
                Some((start, end)) => {
                    let (start, end) = (number(start)?, number(end)?);
                    if start > end {
                        return Err(format!("Empty page range '{}'", part.trim()));
                    }
                    Ok(start..=end)
                }
                None => {
                    let page = number(part)?;
                    Ok(page..=page)
                }
            }
        };

        if !s.contains(',') {
            let range = span(s)?;
            return Ok(PageSelection::Range(range));
        }

        let mut spans = s.split(',').map(span).collect::<Result<Vec<_>, _>>()?;
        spans.sort_unstable_by_key(|r| *r.start());

        let mut ranges: Vec<RangeInclusive<u32>> = Vec::with_capacity(spans.len());
        for next in spans {
            match ranges.last_mut() {
                Some(last) if *next.start() <= last.end().saturating_add(1) => {
                    if next.end() > last.end() {
                        *last = *last.start()..=*next.end();
                    }
                }
                _ => ranges.push(next),
            }
        }
        Ok(PageSelection::Ranges(ranges))
    }
}
