//! Output boxes.

use serde::{Deserialize, Serialize};

use crate::layout::NodeId;
use crate::model::{Color, Marker, NodeKind, Rect, RegionClass};

/// What an area represents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AreaKind {
    /// A page region (body, header, footer, sides)
    Region {
        /// Region class
        class: RegionClass,
        /// User-visible region name
        name: String,
    },
    /// A block-level box
    Block,
    /// One pre-measured line
    Line,
}

/// Back-reference from an area to the node that generated it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedBy {
    /// Node in its content tree
    pub node: NodeId,
    /// Node kind
    pub kind: NodeKind,
    /// 1-based count of areas this node had generated when this one was made
    pub generation: u32,
}

/// Allocation rectangle of a new block area.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BlockGeometry {
    /// Width allotted by the parent
    pub allocation_width: f32,
    /// Height still available in the parent
    pub max_height: f32,
    /// Offset of the content box from the start edge
    pub start_indent: f32,
    /// Offset of the content box from the end edge
    pub end_indent: f32,
    /// Distance from the top of the region to the area's top edge
    pub absolute_height: f32,
}

/// A positioned, sized box in the area tree.
///
/// Areas are built bottom-up: a child is filled while it is exclusively owned
/// by the layout call that created it, then moved into its parent with
/// [`Area::add_child`]. Appended areas are only reachable through shared
/// references, so output placed on a page is never altered afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Area {
    kind: AreaKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    generated_by: Option<GeneratedBy>,
    x: f32,
    y: f32,
    allocation_width: f32,
    start_indent: f32,
    end_indent: f32,
    height: f32,
    max_height: f32,
    absolute_height: f32,
    #[serde(default)]
    is_first: bool,
    #[serde(default)]
    is_last: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    markers: Vec<Marker>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    background_color: Option<Color>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    children: Vec<Area>,
}

impl Area {
    fn empty(kind: AreaKind) -> Self {
        Self {
            kind,
            generated_by: None,
            x: 0.0,
            y: 0.0,
            allocation_width: 0.0,
            start_indent: 0.0,
            end_indent: 0.0,
            height: 0.0,
            max_height: 0.0,
            absolute_height: 0.0,
            is_first: false,
            is_last: false,
            markers: Vec::new(),
            background_color: None,
            ids: Vec::new(),
            text: None,
            children: Vec::new(),
        }
    }

    /// A region area covering `rect` on the page.
    pub fn region(class: RegionClass, name: impl Into<String>, rect: Rect) -> Self {
        let mut area = Self::empty(AreaKind::Region {
            class,
            name: name.into(),
        });
        area.x = rect.x;
        area.y = rect.y;
        area.allocation_width = rect.width;
        area.max_height = rect.height;
        area
    }

    /// A fresh block area scoped to the given allocation.
    pub fn block(geometry: BlockGeometry) -> Self {
        let mut area = Self::empty(AreaKind::Block);
        area.allocation_width = geometry.allocation_width;
        area.max_height = geometry.max_height.max(0.0);
        area.start_indent = geometry.start_indent;
        area.end_indent = geometry.end_indent;
        area.absolute_height = geometry.absolute_height;
        area
    }

    /// A line area of fixed height.
    pub fn line(width: f32, height: f32, text: Option<String>) -> Self {
        let mut area = Self::empty(AreaKind::Line);
        area.allocation_width = width;
        area.height = height;
        area.max_height = height;
        area.text = text;
        area
    }

    /// Append a finished child below the current content.
    ///
    /// The child is positioned at the parent's content start and current
    /// height; the parent's height is not changed (see
    /// [`Area::increase_height`]).
    pub fn add_child(&mut self, mut child: Area) {
        child.x = self.start_indent;
        child.y = self.height;
        self.children.push(child);
    }

    /// Grow the accumulated height (and absolute height) by `amount`.
    pub fn increase_height(&mut self, amount: f32) {
        self.height += amount;
        self.absolute_height += amount;
    }

    /// Add vertical display space (space-before/after).
    pub fn add_display_space(&mut self, amount: f32) {
        if amount > 0.0 {
            self.increase_height(amount);
        }
    }

    /// Set the distance from the region top to the current position.
    pub fn set_absolute_height(&mut self, absolute_height: f32) {
        self.absolute_height = absolute_height;
    }

    /// Attach markers to this area.
    pub fn attach_markers(&mut self, markers: &[Marker]) {
        self.markers.extend_from_slice(markers);
    }

    /// Record an id registered on this area.
    pub fn add_id(&mut self, id: impl Into<String>) {
        self.ids.push(id.into());
    }

    /// Set the generating node.
    pub fn set_generated_by(&mut self, generated_by: GeneratedBy) {
        self.generated_by = Some(generated_by);
    }

    /// Mark as the first area of its node.
    pub fn set_first(&mut self, is_first: bool) {
        self.is_first = is_first;
    }

    /// Mark as the last area of its node.
    pub fn set_last(&mut self, is_last: bool) {
        self.is_last = is_last;
    }

    /// Set the background fill.
    pub fn set_background_color(&mut self, color: Option<Color>) {
        self.background_color = color;
    }

    /// Area kind.
    pub fn kind(&self) -> &AreaKind {
        &self.kind
    }

    /// Generating node, if any.
    pub fn generated_by(&self) -> Option<&GeneratedBy> {
        self.generated_by.as_ref()
    }

    /// Horizontal offset within the parent (absolute for regions).
    pub fn x(&self) -> f32 {
        self.x
    }

    /// Vertical offset within the parent (absolute for regions).
    pub fn y(&self) -> f32 {
        self.y
    }

    /// Width allotted by the parent.
    pub fn allocation_width(&self) -> f32 {
        self.allocation_width
    }

    /// Width of the content box.
    pub fn content_width(&self) -> f32 {
        (self.allocation_width - self.start_indent - self.end_indent).max(0.0)
    }

    /// Start indent of the content box.
    pub fn start_indent(&self) -> f32 {
        self.start_indent
    }

    /// End indent of the content box.
    pub fn end_indent(&self) -> f32 {
        self.end_indent
    }

    /// Accumulated content height.
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Height available when the area was created.
    pub fn max_height(&self) -> f32 {
        self.max_height
    }

    /// Remaining vertical space.
    pub fn space_left(&self) -> f32 {
        self.max_height - self.height
    }

    /// Distance from the region top to the current position.
    pub fn absolute_height(&self) -> f32 {
        self.absolute_height
    }

    /// Whether this is the first area of its node.
    pub fn is_first(&self) -> bool {
        self.is_first
    }

    /// Whether this is the last area of its node.
    pub fn is_last(&self) -> bool {
        self.is_last
    }

    /// Attached markers.
    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    /// Background fill.
    pub fn background_color(&self) -> Option<Color> {
        self.background_color
    }

    /// Ids registered on this area.
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    /// Line text, for line areas.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Child areas in order.
    pub fn children(&self) -> &[Area] {
        &self.children
    }

    /// Whether nothing has been placed in the area.
    pub fn is_empty(&self) -> bool {
        self.children.is_empty() && self.height == 0.0
    }

    /// Number of areas in this subtree, including this one.
    pub fn area_count(&self) -> usize {
        1 + self.children.iter().map(Area::area_count).sum::<usize>()
    }

    /// Visit this area and its descendants depth-first with their depth.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Area, usize)) {
        self.walk_at(0, visit);
    }

    fn walk_at<'a>(&'a self, depth: usize, visit: &mut impl FnMut(&'a Area, usize)) {
        visit(self, depth);
        for child in &self.children {
            child.walk_at(depth + 1, visit);
        }
    }

    /// Text of every line area in this subtree, in document order.
    pub fn line_texts(&self) -> Vec<&str> {
        let mut texts = Vec::new();
        self.walk(&mut |area, _| {
            if let Some(text) = area.text() {
                texts.push(text);
            }
        });
        texts
    }

    /// Number of line areas in this subtree.
    pub fn line_count(&self) -> usize {
        let mut count = 0;
        self.walk(&mut |area, _| {
            if matches!(area.kind, AreaKind::Line) {
                count += 1;
            }
        });
        count
    }

    /// First area in this subtree carrying `id`.
    pub fn find_id(&self, id: &str) -> Option<&Area> {
        if self.ids.iter().any(|i| i == id) {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find_id(id))
    }
}
