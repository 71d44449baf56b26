//! Leaf content: pre-measured lines.

use crate::area::Area;
use crate::error::Result;

use super::block::{close_area, enter, finish, open_area, Entry};
use super::driver::LayoutContext;
use super::{NodeId, Status};

/// Place lines while they fit; the resumption marker is the next line index.
///
/// A line taller than the space left is still placed when nothing else is on
/// the page, otherwise the same line would be offered to every new page.
pub(super) fn layout_lines(
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
    let lines = &tree.node(node).lines;
    let marker_at_entry = ctx.state.marker(node, lines.len());
    let mut area = open_area(ctx, node, &props, target);
    let width = area.content_width();

    for (index, line) in lines.iter().enumerate().skip(marker_at_entry) {
        if line.height > area.space_left() {
            if ctx.page_has_content {
                ctx.state.resume_at(node, index);
                close_area(ctx, node, area, target, false)?;
                return Ok(if index > marker_at_entry {
                    Status::SomeProduced
                } else {
                    Status::NoneProduced
                });
            }
            log::warn!(
                "Line {} of {} is {}pt tall but only {}pt are available on page {}; placing it anyway",
                index + 1,
                tree.node(node).kind.name(),
                line.height,
                area.space_left().max(0.0),
                ctx.page_number
            );
        }

        area.add_child(Area::line(width, line.height, line.text.clone()));
        area.increase_height(line.height);
        ctx.page_has_content = true;
    }

    finish(ctx, node, &props, area, target)
}
