//! Per-node layout progress, kept outside the content tree.

use serde::{Deserialize, Serialize};

use super::NodeId;
use crate::model::{BreakValue, Color, ResolvedStyle};

/// How far layout has got through a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Progress {
    /// Never laid out.
    #[default]
    NotStarted,
    /// Partially placed; layout resumes at `next_child` (a line index for leaves).
    InProgress {
        /// First child (or line) not yet completely placed
        next_child: usize,
    },
    /// Everything placed.
    Done,
}

/// Style values a node needs on every page, captured on its first layout call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutProps {
    /// Start indent of generated areas
    pub start_indent: f32,
    /// End indent of generated areas
    pub end_indent: f32,
    /// Space before the first area
    pub space_before: f32,
    /// Space after the last area
    pub space_after: f32,
    /// Background of generated areas
    pub background_color: Option<Color>,
    /// Forced break before
    pub break_before: BreakValue,
    /// Forced break after
    pub break_after: BreakValue,
    /// List items: end of the label column
    pub label_end: f32,
    /// List items: start of the body column
    pub body_start: f32,
}

impl LayoutProps {
    /// Capture the layout-relevant part of a resolved style.
    pub fn from_style(style: &ResolvedStyle) -> Self {
        let body_start = style.provisional_distance_between_starts.max(0.0);
        Self {
            start_indent: style.start_indent,
            end_indent: style.end_indent,
            space_before: style.space_before,
            space_after: style.space_after,
            background_color: style.background_color,
            break_before: style.break_before,
            break_after: style.break_after,
            label_end: (body_start - style.provisional_label_separation).max(0.0),
            body_start,
        }
    }
}

#[derive(Debug, Clone, Default)]
struct NodeState {
    progress: Progress,
    props: Option<LayoutProps>,
    areas_generated: u32,
    break_honoured: bool,
}

/// Mutable layout state for every node of one content tree.
///
/// Only the layout driver advances progress. It moves backwards only when a
/// page that placed nothing is discarded (see [`LayoutState::rewind_page`]).
#[derive(Debug, Clone)]
pub struct LayoutState {
    nodes: Vec<NodeState>,
    /// Prior state of every node changed since the current page began
    journal: Vec<(NodeId, NodeState)>,
}

impl LayoutState {
    /// Fresh state for a tree of `len` nodes.
    pub fn new(len: usize) -> Self {
        Self {
            nodes: vec![NodeState::default(); len],
            journal: Vec::new(),
        }
    }

    /// Current progress of a node.
    pub fn progress(&self, node: NodeId) -> Progress {
        self.nodes[node.0].progress
    }

    /// Resumption marker: index of the first child still to be placed.
    pub fn marker(&self, node: NodeId, child_count: usize) -> usize {
        match self.progress(node) {
            Progress::NotStarted => 0,
            Progress::InProgress { next_child } => next_child,
            Progress::Done => child_count,
        }
    }

    /// Whether the node has been completely placed.
    pub fn is_done(&self, node: NodeId) -> bool {
        self.progress(node) == Progress::Done
    }

    /// Number of areas the node has generated so far.
    pub fn areas_generated(&self, node: NodeId) -> u32 {
        self.nodes[node.0].areas_generated
    }

    /// Style captured on the first layout call.
    pub fn props(&self, node: NodeId) -> Option<&LayoutProps> {
        self.nodes[node.0].props.as_ref()
    }

    /// Forget the changes recorded for the previous page.
    pub(crate) fn begin_page(&mut self) {
        self.journal.clear();
    }

    /// Undo every change made since [`LayoutState::begin_page`].
    ///
    /// Only valid when nothing was placed on the page: placed content is
    /// not tracked.
    pub(crate) fn rewind_page(&mut self) {
        while let Some((node, prior)) = self.journal.pop() {
            self.nodes[node.0] = prior;
        }
    }

    fn remember(&mut self, node: NodeId) {
        self.journal.push((node, self.nodes[node.0].clone()));
    }

    pub(crate) fn start(&mut self, node: NodeId, props: LayoutProps) {
        self.remember(node);
        let state = &mut self.nodes[node.0];
        state.props = Some(props);
        state.progress = Progress::InProgress { next_child: 0 };
    }

    pub(crate) fn resume_at(&mut self, node: NodeId, next_child: usize) {
        self.remember(node);
        self.nodes[node.0].progress = Progress::InProgress { next_child };
    }

    pub(crate) fn finish(&mut self, node: NodeId) {
        self.remember(node);
        self.nodes[node.0].progress = Progress::Done;
    }

    pub(crate) fn record_area(&mut self, node: NodeId) -> u32 {
        let state = &mut self.nodes[node.0];
        state.areas_generated += 1;
        state.areas_generated
    }

    pub(crate) fn break_honoured(&self, node: NodeId) -> bool {
        self.nodes[node.0].break_honoured
    }

    pub(crate) fn honour_break(&mut self, node: NodeId) {
        self.remember(node);
        self.nodes[node.0].break_honoured = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_follows_progress() {
        let mut state = LayoutState::new(2);
        let node = NodeId(1);
        assert_eq!(state.marker(node, 3), 0);

        state.start(node, LayoutProps::from_style(&ResolvedStyle::default()));
        state.resume_at(node, 2);
        assert_eq!(state.marker(node, 3), 2);

        state.finish(node);
        assert_eq!(state.marker(node, 3), 3);
        assert!(state.is_done(node));
    }

    #[test]
    fn test_rewind_page_restores_prior_progress() {
        let mut state = LayoutState::new(3);
        let props = LayoutProps::from_style(&ResolvedStyle::default());
        state.start(NodeId(0), props);
        state.resume_at(NodeId(0), 1);

        state.begin_page();
        state.resume_at(NodeId(0), 1);
        state.start(NodeId(2), props);
        state.honour_break(NodeId(2));
        state.rewind_page();

        assert_eq!(state.progress(NodeId(0)), Progress::InProgress { next_child: 1 });
        assert_eq!(state.progress(NodeId(2)), Progress::NotStarted);
        assert!(!state.break_honoured(NodeId(2)));
        assert!(state.props(NodeId(2)).is_none());
    }

    #[test]
    fn test_list_geometry_props() {
        let style = ResolvedStyle::new().with_list_geometry(36.0, 6.0);
        let props = LayoutProps::from_style(&style);
        assert_eq!(props.label_end, 30.0);
        assert_eq!(props.body_start, 36.0);
    }

    #[test]
    fn test_record_area_counts() {
        let mut state = LayoutState::new(1);
        assert_eq!(state.record_area(NodeId(0)), 1);
        assert_eq!(state.record_area(NodeId(0)), 2);
        assert_eq!(state.areas_generated(NodeId(0)), 2);
    }
}
