//! List items: a label column beside a body column.

use crate::area::{Area, BlockGeometry};
use crate::error::Result;
use crate::model::NodeKind;

use super::block::{close_area, enter, finish, open_area, Entry};
use super::driver::{layout_node, LayoutContext};
use super::state::LayoutProps;
use super::{NodeId, Status};

const LABEL: usize = 0;
const BODY: usize = 1;

fn column(area: &Area, start: f32, end: f32) -> Area {
    let width = area.content_width();
    Area::block(BlockGeometry {
        allocation_width: width,
        max_height: area.space_left(),
        start_indent: start,
        end_indent: (width - end).max(0.0),
        absolute_height: area.absolute_height(),
    })
}

/// Lay out a list item.
///
/// Label and body are laid out side by side and resume independently, so a
/// label taller than the space left continues on the next page. An item
/// whose label cannot start moves to the next page as a whole. The item
/// grows by the taller of the two columns.
pub(super) fn layout_list_item(
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
    let children = &tree.node(node).children;
    let well_formed = children.len() == 2
        && tree.node(children[LABEL]).kind == NodeKind::ListItemLabel
        && tree.node(children[BODY]).kind == NodeKind::ListItemBody;
    let mut area = open_area(ctx, node, &props, target);

    if !well_formed {
        let offending = children
            .iter()
            .copied()
            .enumerate()
            .find(|&(i, c)| {
                let expected = if i == LABEL {
                    NodeKind::ListItemLabel
                } else {
                    NodeKind::ListItemBody
                };
                i > BODY || tree.node(c).kind != expected
            })
            .map(|(_, c)| c);
        ctx.structural(node, offending)?;
        return finish(ctx, node, &props, area, target);
    }

    let geometry = list_geometry(ctx, node, &props);
    let label_started = ctx.state.marker(node, children.len()) == BODY;

    let mut label_column = column(&area, 0.0, geometry.label_end);
    let label_status = layout_node(ctx, children[LABEL], &mut label_column)?;
    if label_status == Status::NoneProduced && !label_started {
        ctx.state.resume_at(node, LABEL);
        return Ok(Status::NoneProduced);
    }
    ctx.state.resume_at(node, BODY);

    let mut body_column = column(&area, geometry.body_start, area.content_width());
    let body_status = layout_node(ctx, children[BODY], &mut body_column)?;

    let produced = !label_column.children().is_empty() || !body_column.children().is_empty();
    place_columns(&mut area, label_column, body_column);

    if label_status.is_incomplete() || body_status.is_incomplete() {
        close_area(ctx, node, area, target, false)?;
        if let Some(kind) = body_status.forced_break().or(label_status.forced_break()) {
            return Ok(Status::ForcedBreak(kind));
        }
        return Ok(if produced {
            Status::SomeProduced
        } else {
            Status::NoneProduced
        });
    }

    finish(ctx, node, &props, area, target)
}

/// Label and body geometry come from the enclosing list block.
fn list_geometry(ctx: &LayoutContext<'_>, node: NodeId, own: &LayoutProps) -> LayoutProps {
    ctx.tree
        .node(node)
        .parent
        .filter(|&p| ctx.tree.node(p).kind == NodeKind::ListBlock)
        .and_then(|p| ctx.state.props(p).copied())
        .unwrap_or(*own)
}

fn place_columns(area: &mut Area, label: Area, body: Area) {
    let height = label.height().max(body.height());
    if !label.children().is_empty() {
        area.add_child(label);
    }
    if !body.children().is_empty() {
        area.add_child(body);
    }
    area.increase_height(height);
}

#[cfg(test)]
mod tests {
    use crate::area::{Area, IdReferences};
    use crate::layout::{FlowLayout, LayoutOptions, Status};
    use crate::model::{FoNode, Rect, RegionClass, ResolvedStyle};

    fn body(height: f32) -> Area {
        Area::region(
            RegionClass::Body,
            "xsl-region-body",
            Rect::new(0.0, 0.0, 300.0, height),
        )
    }

    fn item(label: &str, body_lines: &[&str]) -> FoNode {
        FoNode::list_item(
            FoNode::label(vec![FoNode::text(20.0, [label])]),
            FoNode::body(vec![FoNode::text(20.0, body_lines.iter().copied())]),
        )
    }

    #[test]
    fn test_label_and_body_columns() {
        let list = FoNode::list_block(vec![item("1.", &["one", "more"])])
            .with_style(ResolvedStyle::new().with_list_geometry(36.0, 6.0));
        let flow = FoNode::flow(vec![list]);
        let mut layout = FlowLayout::new(&flow, LayoutOptions::default());

        let mut page = body(200.0);
        let status = layout
            .layout_page(&mut page, 1, &mut IdReferences::new())
            .unwrap();
        assert_eq!(status, Status::Complete);

        let list_area = &page.children()[0].children()[0];
        let item_area = &list_area.children()[0];
        assert_eq!(item_area.height(), 40.0);

        let columns = item_area.children();
        assert_eq!(columns.len(), 2);
        assert_eq!(columns[0].content_width(), 30.0);
        assert_eq!(columns[1].start_indent(), 36.0);
        assert_eq!(columns[1].content_width(), 264.0);
        assert_eq!(columns[0].y(), columns[1].y());
        assert_eq!(item_area.line_texts(), vec!["1.", "one", "more"]);
    }

    #[test]
    fn test_body_resumes_without_label() {
        let flow = FoNode::flow(vec![FoNode::list_block(vec![item(
            "*",
            &["a", "b", "c", "d"],
        )])]);
        let mut layout = FlowLayout::new(&flow, LayoutOptions::default());
        let mut ids = IdReferences::new();

        let mut first = body(50.0);
        assert_eq!(
            layout.layout_page(&mut first, 1, &mut ids).unwrap(),
            Status::SomeProduced
        );
        assert_eq!(first.line_texts(), vec!["*", "a", "b"]);

        let mut second = body(50.0);
        assert_eq!(
            layout.layout_page(&mut second, 2, &mut ids).unwrap(),
            Status::Complete
        );
        assert_eq!(second.line_texts(), vec!["c", "d"]);
    }

    #[test]
    fn test_malformed_item_is_truncated() {
        let bad = FoNode::new(crate::model::NodeKind::ListItem)
            .with_children(vec![FoNode::body(vec![FoNode::lines(&[10.0])])]);
        let flow = FoNode::flow(vec![FoNode::list_block(vec![bad])]);
        let mut layout = FlowLayout::new(&flow, LayoutOptions::default());

        let mut page = body(100.0);
        let status = layout
            .layout_page(&mut page, 1, &mut IdReferences::new())
            .unwrap();
        assert_eq!(status, Status::Complete);
        assert_eq!(page.line_count(), 0);
        assert_eq!(layout.diagnostics().len(), 1);
    }

    #[test]
    fn test_tall_label_resumes_on_next_page() {
        let tall = FoNode::list_item(
            FoNode::label(vec![FoNode::text(20.0, ["L1", "L2", "L3"])]),
            FoNode::body(vec![FoNode::text(20.0, ["B1"])]),
        );
        let flow = FoNode::flow(vec![FoNode::lines(&[60.0]), FoNode::list_block(vec![tall])]);
        let mut layout = FlowLayout::new(&flow, LayoutOptions::default());
        let mut ids = IdReferences::new();

        let mut first = body(100.0);
        assert_eq!(
            layout.layout_page(&mut first, 1, &mut ids).unwrap(),
            Status::SomeProduced
        );
        assert_eq!(first.line_texts(), vec!["L1", "L2", "B1"]);

        let mut second = body(100.0);
        assert_eq!(
            layout.layout_page(&mut second, 2, &mut ids).unwrap(),
            Status::Complete
        );
        assert_eq!(second.line_texts(), vec!["L3"]);
        assert!(layout.is_done());
    }

    #[test]
    fn test_item_moves_when_label_cannot_start() {
        let flow = FoNode::flow(vec![
            FoNode::lines(&[90.0]),
            FoNode::list_block(vec![item("1.", &["one"])]),
        ]);
        let mut layout = FlowLayout::new(&flow, LayoutOptions::default());
        let mut ids = IdReferences::new();

        let mut first = body(100.0);
        assert_eq!(
            layout.layout_page(&mut first, 1, &mut ids).unwrap(),
            Status::SomeProduced
        );
        assert_eq!(first.line_count(), 1);

        let mut second = body(100.0);
        assert_eq!(
            layout.layout_page(&mut second, 2, &mut ids).unwrap(),
            Status::Complete
        );
        assert_eq!(second.line_texts(), vec!["1.", "one"]);
    }
}
