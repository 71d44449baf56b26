//! Formatting-object content nodes.

use serde::{Deserialize, Serialize};

use super::{ResolvedStyle, SourceLocation};

/// A node of the style-resolved content tree handed to layout.
///
/// This is the owned, nested form produced upstream (or deserialized from
/// JSON). Layout flattens it into a [`crate::layout::ContentTree`] and never
/// mutates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoNode {
    /// Formatting-object kind
    pub kind: NodeKind,

    /// Document-global id, registered on the node's first area
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Resolved style values
    #[serde(default)]
    pub style: ResolvedStyle,

    /// Markers attached to every area the node generates
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub markers: Vec<Marker>,

    /// Pre-measured lines (only meaningful for [`NodeKind::Lines`])
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub lines: Vec<Line>,

    /// Child nodes in document order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<FoNode>,

    /// Where the node was declared
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<SourceLocation>,
}

impl FoNode {
    /// Create an empty node of the given kind.
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            id: None,
            style: ResolvedStyle::default(),
            markers: Vec::new(),
            lines: Vec::new(),
            children: Vec::new(),
            location: None,
        }
    }

    /// A flow holding block-level children.
    pub fn flow(children: Vec<FoNode>) -> Self {
        Self::new(NodeKind::Flow).with_children(children)
    }

    /// A block holding block-level children.
    pub fn block(children: Vec<FoNode>) -> Self {
        Self::new(NodeKind::Block).with_children(children)
    }

    /// A list block holding list items.
    pub fn list_block(items: Vec<FoNode>) -> Self {
        Self::new(NodeKind::ListBlock).with_children(items)
    }

    /// A list item made of a label and a body.
    pub fn list_item(label: FoNode, body: FoNode) -> Self {
        Self::new(NodeKind::ListItem).with_children(vec![label, body])
    }

    /// A list item label.
    pub fn label(children: Vec<FoNode>) -> Self {
        Self::new(NodeKind::ListItemLabel).with_children(children)
    }

    /// A list item body.
    pub fn body(children: Vec<FoNode>) -> Self {
        Self::new(NodeKind::ListItemBody).with_children(children)
    }

    /// A leaf of pre-measured lines with the given heights.
    pub fn lines(heights: &[f32]) -> Self {
        let mut node = Self::new(NodeKind::Lines);
        node.lines = heights.iter().map(|&h| Line::new(h)).collect();
        node
    }

    /// A leaf of text lines sharing one line height.
    pub fn text<S: Into<String>>(line_height: f32, lines: impl IntoIterator<Item = S>) -> Self {
        let mut node = Self::new(NodeKind::Lines);
        node.style.line_height = line_height;
        node.lines = lines
            .into_iter()
            .map(|text| Line::with_text(line_height, text))
            .collect();
        node
    }

    /// Set the children.
    pub fn with_children(mut self, children: Vec<FoNode>) -> Self {
        self.children = children;
        self
    }

    /// Append a child.
    pub fn add_child(&mut self, child: FoNode) {
        self.children.push(child);
    }

    /// Set the id.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the resolved style.
    pub fn with_style(mut self, style: ResolvedStyle) -> Self {
        self.style = style;
        self
    }

    /// Attach a marker.
    pub fn with_marker(mut self, marker: Marker) -> Self {
        self.markers.push(marker);
        self
    }

    /// Set the source location.
    pub fn with_location(mut self, location: SourceLocation) -> Self {
        self.location = Some(location);
        self
    }

    /// Total number of nodes in this subtree, including this one.
    pub fn subtree_len(&self) -> usize {
        1 + self.children.iter().map(FoNode::subtree_len).sum::<usize>()
    }

    /// Total height of the lines in this subtree, ignoring spacing.
    pub fn content_height(&self) -> f32 {
        let own: f32 = self.lines.iter().map(|l| l.height).sum();
        own + self
            .children
            .iter()
            .map(FoNode::content_height)
            .sum::<f32>()
    }
}

/// Closed set of formatting-object kinds understood by layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NodeKind {
    /// `fo:flow`
    Flow,
    /// `fo:block`
    Block,
    /// `fo:list-block`
    ListBlock,
    /// `fo:list-item`
    ListItem,
    /// `fo:list-item-label`
    ListItemLabel,
    /// `fo:list-item-body`
    ListItemBody,
    /// Pre-measured line content
    Lines,
}

impl NodeKind {
    /// Formatting-object name used in messages.
    pub fn name(self) -> &'static str {
        match self {
            NodeKind::Flow => "fo:flow",
            NodeKind::Block => "fo:block",
            NodeKind::ListBlock => "fo:list-block",
            NodeKind::ListItem => "fo:list-item",
            NodeKind::ListItemLabel => "fo:list-item-label",
            NodeKind::ListItemBody => "fo:list-item-body",
            NodeKind::Lines => "lines",
        }
    }

    /// Whether nodes of this kind are block-level content.
    pub fn is_block_level(self) -> bool {
        matches!(self, NodeKind::Block | NodeKind::ListBlock | NodeKind::Lines)
    }

    /// Whether `child` may appear among this kind's children.
    pub fn permits(self, child: NodeKind) -> bool {
        match self {
            NodeKind::Flow | NodeKind::Block | NodeKind::ListItemLabel | NodeKind::ListItemBody => {
                child.is_block_level()
            }
            NodeKind::ListBlock => child == NodeKind::ListItem,
            NodeKind::ListItem => {
                matches!(child, NodeKind::ListItemLabel | NodeKind::ListItemBody)
            }
            NodeKind::Lines => false,
        }
    }

    /// Human-readable description of the permitted children.
    pub fn content_model(self) -> &'static str {
        match self {
            NodeKind::Flow | NodeKind::Block | NodeKind::ListItemLabel | NodeKind::ListItemBody => {
                "block-level content"
            }
            NodeKind::ListBlock => "list-items",
            NodeKind::ListItem => "a list-item-label followed by a list-item-body",
            NodeKind::Lines => "empty",
        }
    }
}

/// One pre-measured line of content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    /// Line height in points
    pub height: f32,

    /// Text carried through to the output, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl Line {
    /// A line with no text.
    pub fn new(height: f32) -> Self {
        Self { height, text: None }
    }

    /// A line carrying text.
    pub fn with_text(height: f32, text: impl Into<String>) -> Self {
        Self {
            height,
            text: Some(text.into()),
        }
    }
}

/// A marker attached to generated areas, for retrieval by page headers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Marker {
    /// `marker-class-name`
    pub class_name: String,

    /// Marker content
    #[serde(default)]
    pub content: String,
}

impl Marker {
    /// Create a marker.
    pub fn new(class_name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            content: content.into(),
        }
    }
}
