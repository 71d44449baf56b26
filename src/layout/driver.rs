//! Dispatch of the resumable layout algorithm over node kinds.

use crate::area::{Area, IdReferences};
use crate::error::{Diagnostic, Error, Result};
use crate::model::{FoNode, NodeKind};

use super::{block, lines, list, ContentTree, LayoutOptions, LayoutState, NodeId, Progress, Status};
use super::options::ErrorMode;

/// Everything a layout call reads or updates besides its target area.
pub struct LayoutContext<'a> {
    pub(crate) tree: &'a ContentTree,
    pub(crate) state: &'a mut LayoutState,
    pub(crate) ids: &'a mut IdReferences,
    pub(crate) diagnostics: &'a mut Vec<Diagnostic>,
    pub(crate) options: &'a LayoutOptions,
    pub(crate) page_number: u32,
    pub(crate) page_has_content: bool,
    pub(crate) register_ids: bool,
}

impl<'a> LayoutContext<'a> {
    /// Context for filling one page.
    pub fn new(
        tree: &'a ContentTree,
        state: &'a mut LayoutState,
        ids: &'a mut IdReferences,
        diagnostics: &'a mut Vec<Diagnostic>,
        options: &'a LayoutOptions,
        page_number: u32,
    ) -> Self {
        Self {
            tree,
            state,
            ids,
            diagnostics,
            options,
            page_number,
            page_has_content: false,
            register_ids: true,
        }
    }

    /// Whether anything has been placed on the current page.
    pub fn page_has_content(&self) -> bool {
        self.page_has_content
    }

    /// Register the node's id on `area`, which is its first area.
    pub(crate) fn register_id(&mut self, node: NodeId, area: &mut Area) -> Result<()> {
        if !self.register_ids {
            return Ok(());
        }
        let content = self.tree.node(node);
        if let Some(id) = &content.id {
            self.ids
                .register(id, self.page_number, content.location.as_ref())?;
            area.add_id(id.clone());
        }
        Ok(())
    }

    /// Apply the error mode to a content-model violation.
    ///
    /// Returns `Ok(())` when layout may continue with the offending content
    /// dropped.
    pub(crate) fn structural(&mut self, parent: NodeId, child: Option<NodeId>) -> Result<()> {
        let parent_node = self.tree.node(parent);
        let (found, location) = match child {
            Some(c) => {
                let node = self.tree.node(c);
                (node.kind.name().to_string(), node.location.clone())
            }
            None => ("nothing".to_string(), parent_node.location.clone()),
        };
        let err = Error::Structural {
            parent: parent_node.kind.name().to_string(),
            expected: parent_node.kind.content_model().to_string(),
            found,
            location,
        };

        match self.options.error_mode {
            ErrorMode::Strict => Err(err),
            ErrorMode::Lenient => {
                log::warn!("{}; remaining content dropped", err);
                self.diagnostics
                    .push(Diagnostic::from_error(&err, Some(self.page_number)));
                Ok(())
            }
        }
    }
}

/// Lay out `node` into `target`, resuming where the previous call stopped.
pub fn layout_node(ctx: &mut LayoutContext<'_>, node: NodeId, target: &mut Area) -> Result<Status> {
    match ctx.tree.node(node).kind {
        NodeKind::Flow
        | NodeKind::Block
        | NodeKind::ListBlock
        | NodeKind::ListItemLabel
        | NodeKind::ListItemBody => block::layout_container(ctx, node, target),
        NodeKind::ListItem => list::layout_list_item(ctx, node, target),
        NodeKind::Lines => lines::layout_lines(ctx, node, target),
    }
}

/// A content tree together with its layout state, filled page by page.
///
/// # Example
///
/// ```
/// use folayout::area::{Area, IdReferences};
/// use folayout::layout::{FlowLayout, LayoutOptions, Status};
/// use folayout::model::{FoNode, RegionClass, Rect};
///
/// let flow = FoNode::flow(vec![FoNode::lines(&[40.0, 40.0, 40.0])]);
/// let mut layout = FlowLayout::new(&flow, LayoutOptions::default());
/// let mut ids = IdReferences::new();
///
/// let mut page = Area::region(RegionClass::Body, "xsl-region-body", Rect::new(0.0, 0.0, 100.0, 100.0));
/// assert_eq!(layout.layout_page(&mut page, 1, &mut ids).unwrap(), Status::SomeProduced);
///
/// let mut next = Area::region(RegionClass::Body, "xsl-region-body", Rect::new(0.0, 0.0, 100.0, 100.0));
/// assert_eq!(layout.layout_page(&mut next, 2, &mut ids).unwrap(), Status::Complete);
/// ```
#[derive(Debug, Clone)]
pub struct FlowLayout {
    tree: ContentTree,
    state: LayoutState,
    options: LayoutOptions,
    diagnostics: Vec<Diagnostic>,
    diagnostics_at_page_start: usize,
    register_ids: bool,
}

impl FlowLayout {
    /// Prepare `root` for layout.
    pub fn new(root: &FoNode, options: LayoutOptions) -> Self {
        let tree = ContentTree::build(root);
        let state = LayoutState::new(tree.len());
        Self {
            tree,
            state,
            options,
            diagnostics: Vec::new(),
            diagnostics_at_page_start: 0,
            register_ids: true,
        }
    }

    /// Do not register ids (static content repeats on every page).
    pub(crate) fn without_ids(mut self) -> Self {
        self.register_ids = false;
        self
    }

    /// Fill `target` with as much remaining content as fits.
    pub fn layout_page(
        &mut self,
        target: &mut Area,
        page_number: u32,
        ids: &mut IdReferences,
    ) -> Result<Status> {
        self.state.begin_page();
        self.diagnostics_at_page_start = self.diagnostics.len();
        let mut ctx = LayoutContext::new(
            &self.tree,
            &mut self.state,
            ids,
            &mut self.diagnostics,
            &self.options,
            page_number,
        );
        ctx.register_ids = self.register_ids;
        let root = self.tree.root();
        layout_node(&mut ctx, root, target)
    }

    /// Undo the last [`FlowLayout::layout_page`] call.
    ///
    /// Used when that call placed nothing and its page is thrown away, so
    /// the next page starts from the same point.
    pub(crate) fn rewind_page(&mut self) {
        self.state.rewind_page();
        self.diagnostics.truncate(self.diagnostics_at_page_start);
    }

    /// The flattened content tree.
    pub fn tree(&self) -> &ContentTree {
        &self.tree
    }

    /// Progress of a node.
    pub fn progress(&self, node: NodeId) -> Progress {
        self.state.progress(node)
    }

    /// Resumption marker of a node.
    pub fn marker(&self, node: NodeId) -> usize {
        let node_ref = self.tree.node(node);
        let count = if node_ref.kind == NodeKind::Lines {
            node_ref.lines.len()
        } else {
            node_ref.children.len()
        };
        self.state.marker(node, count)
    }

    /// Whether all content has been placed.
    pub fn is_done(&self) -> bool {
        self.state.is_done(self.tree.root())
    }

    /// Whether anything is left that would produce output.
    ///
    /// Unfinished nodes carrying an id count as content, since laying them
    /// out registers the id.
    pub fn has_pending_content(&self) -> bool {
        self.pending(self.tree.root())
    }

    fn pending(&self, node: NodeId) -> bool {
        if self.state.is_done(node) {
            return false;
        }
        let content = self.tree.node(node);
        if content.id.is_some() {
            return true;
        }
        match content.kind {
            NodeKind::Lines => self.marker(node) < content.lines.len(),
            _ => content.children[self.marker(node)..]
                .iter()
                .any(|&child| self.pending(child)),
        }
    }

    /// Layout state.
    pub fn state(&self) -> &LayoutState {
        &self.state
    }

    /// Diagnostics recorded so far.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Take the recorded diagnostics.
    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }
}
