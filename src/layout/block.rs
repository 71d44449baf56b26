//! Block-level containers: flow, block, list-block, label and body.

use crate::area::{Area, BlockGeometry, GeneratedBy};
use crate::error::Result;
use crate::model::BreakKind;

use super::driver::{layout_node, LayoutContext};
use super::state::LayoutProps;
use super::{NodeId, Progress, Status};

/// Outcome of the entry step shared by every node kind.
pub(super) enum Entry {
    /// Lay out from this resumption marker.
    Resume(LayoutProps),
    /// A break-before must be taken before anything is placed.
    Break(BreakKind),
    /// The node was finished on an earlier page.
    Finished,
}

/// First-call bookkeeping: cache style, honour break-before, emit space-before.
pub(super) fn enter(ctx: &mut LayoutContext<'_>, node: NodeId, target: &mut Area) -> Entry {
    match ctx.state.progress(node) {
        Progress::Done => return Entry::Finished,
        Progress::InProgress { .. } => {
            if let Some(props) = ctx.state.props(node) {
                return Entry::Resume(*props);
            }
        }
        Progress::NotStarted => {}
    }

    let props = LayoutProps::from_style(&ctx.tree.node(node).style);
    if let Some(kind) = props.break_before.forced() {
        let satisfied = !ctx.page_has_content && kind.accepts(ctx.page_number);
        if !satisfied && !ctx.state.break_honoured(node) {
            ctx.state.honour_break(node);
            return Entry::Break(kind);
        }
    }

    target.add_display_space(props.space_before);
    ctx.state.start(node, props);
    Entry::Resume(props)
}

/// A fresh area for `node` sized to what is left of `target`.
pub(super) fn open_area(
    ctx: &LayoutContext<'_>,
    node: NodeId,
    props: &LayoutProps,
    target: &Area,
) -> Area {
    let mut area = Area::block(BlockGeometry {
        allocation_width: target.content_width(),
        max_height: target.space_left(),
        start_indent: props.start_indent,
        end_indent: props.end_indent,
        absolute_height: target.absolute_height(),
    });
    let content = ctx.tree.node(node);
    area.set_generated_by(GeneratedBy {
        node,
        kind: content.kind,
        generation: ctx.state.areas_generated(node) + 1,
    });
    area.set_first(ctx.state.areas_generated(node) == 0);
    area.attach_markers(&content.markers);
    area.set_background_color(props.background_color);
    area
}

/// Append `area` to `target`, registering the node's id on its first area.
///
/// Areas of unfinished nodes that hold no child areas are dropped, even if
/// display space was added to them, so the node's first area is the first
/// one that holds content.
pub(super) fn close_area(
    ctx: &mut LayoutContext<'_>,
    node: NodeId,
    mut area: Area,
    target: &mut Area,
    finished: bool,
) -> Result<()> {
    if !finished && area.children().is_empty() {
        return Ok(());
    }
    if ctx.state.record_area(node) == 1 {
        ctx.register_id(node, &mut area)?;
    }
    if finished {
        area.set_last(true);
    }
    let height = area.height();
    target.add_child(area);
    target.increase_height(height);
    Ok(())
}

/// Final step: close the last area, emit space-after, mark the node done.
pub(super) fn finish(
    ctx: &mut LayoutContext<'_>,
    node: NodeId,
    props: &LayoutProps,
    area: Area,
    target: &mut Area,
) -> Result<Status> {
    close_area(ctx, node, area, target, true)?;
    target.add_display_space(props.space_after);
    ctx.state.finish(node);

    Ok(match props.break_after.forced() {
        Some(kind) => Status::ForcedBreak(kind),
        None => Status::Complete,
    })
}

/// Resumable layout of a container whose children stack vertically.
pub(super) fn layout_container(
    ctx: &mut LayoutContext<'_>,
    node: NodeId,
    target: &mut Area,
) -> Result<Status> {
    let props = match enter(ctx, node, target) {
        Entry::Resume(props) => props,
        Entry::Break(kind) => return Ok(Status::ForcedBreak(kind)),
        Entry::Finished => return Ok(Status::Complete),
    };

    let tree = ctx.tree;
    let content = tree.node(node);
    let children = &content.children;
    let marker_at_entry = ctx.state.marker(node, children.len());
    let mut area = open_area(ctx, node, &props, target);

    for (index, &child) in children.iter().enumerate().skip(marker_at_entry) {
        if !content.kind.permits(tree.node(child).kind) {
            ctx.structural(node, Some(child))?;
            break;
        }

        let status = layout_node(ctx, child, &mut area)?;
        if status.is_incomplete() {
            ctx.state.resume_at(node, index);
            close_area(ctx, node, area, target, false)?;
            return Ok(Status::combine(index > marker_at_entry, status));
        }
    }

    finish(ctx, node, &props, area, target)
}
