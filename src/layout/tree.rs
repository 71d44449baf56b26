//! Immutable content tree indexed by node id.

use serde::{Deserialize, Serialize};

use crate::model::{FoNode, Line, Marker, NodeKind, ResolvedStyle, SourceLocation};

/// Index of a node in its [`ContentTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The root node of every tree.
    pub const ROOT: NodeId = NodeId(0);

    /// Arena index.
    pub fn index(self) -> usize {
        self.0
    }
}

/// One flattened node.
#[derive(Debug, Clone)]
pub struct ContentNode {
    /// Formatting-object kind
    pub kind: NodeKind,
    /// Document-global id
    pub id: Option<String>,
    /// Resolved style values
    pub style: ResolvedStyle,
    /// Markers attached to generated areas
    pub markers: Vec<Marker>,
    /// Pre-measured lines (leaves only)
    pub lines: Vec<Line>,
    /// Children, in document order
    pub children: Vec<NodeId>,
    /// Parent node
    pub parent: Option<NodeId>,
    /// Source location
    pub location: Option<SourceLocation>,
}

/// Arena of content nodes built from a nested [`FoNode`].
///
/// The tree is read-only during layout; per-node progress lives in
/// [`super::LayoutState`].
#[derive(Debug, Clone)]
pub struct ContentTree {
    nodes: Vec<ContentNode>,
}

impl ContentTree {
    /// Flatten `root` in pre-order; the root gets [`NodeId::ROOT`].
    pub fn build(root: &FoNode) -> Self {
        let mut nodes = Vec::with_capacity(root.subtree_len());
        Self::push(&mut nodes, root, None);
        Self { nodes }
    }

    fn push(nodes: &mut Vec<ContentNode>, node: &FoNode, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(nodes.len());
        nodes.push(ContentNode {
            kind: node.kind,
            id: node.id.clone(),
            style: node.style.clone(),
            markers: node.markers.clone(),
            lines: node.lines.clone(),
            children: Vec::with_capacity(node.children.len()),
            parent,
            location: node.location.clone(),
        });
        for child in &node.children {
            let child_id = Self::push(nodes, child, Some(id));
            nodes[id.0].children.push(child_id);
        }
        id
    }

    /// The root node id.
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Node by id.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not belong to this tree.
    pub fn node(&self, id: NodeId) -> &ContentNode {
        &self.nodes[id.0]
    }

    /// Node by id, if it exists.
    pub fn get(&self, id: NodeId) -> Option<&ContentNode> {
        self.nodes.get(id.0)
    }

    /// Children of a node.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree is empty (never true for a built tree).
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All node ids in pre-order.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> {
        (0..self.nodes.len()).map(NodeId)
    }
}
