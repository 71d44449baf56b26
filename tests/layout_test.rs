//! Integration tests for the resumable layout driver.

use folayout::area::{Area, IdReferences};
use folayout::layout::{FlowLayout, NodeId, Progress};
use folayout::model::{
    FoDocument, FoNode, PageSequence, PageTemplate, Rect, RegionClass, ResolvedStyle,
    SequenceMaster, SubSequence,
};
use folayout::{layout_document, Error, LayoutMasterSet, LayoutOptions, PageMasterSelector, Status};

fn body(height: f32) -> Area {
    Area::region(
        RegionClass::Body,
        "xsl-region-body",
        Rect::new(0.0, 0.0, 400.0, height),
    )
}

fn labelled(label: &str, height: f32) -> FoNode {
    FoNode::block(vec![FoNode::text(height, [label])])
}

#[test]
fn test_each_child_placed_once_in_order() {
    let children: Vec<FoNode> = (0..12).map(|i| labelled(&format!("c{}", i), 30.0)).collect();
    let flow = FoNode::flow(children);
    let mut layout = FlowLayout::new(&flow, LayoutOptions::default());
    let mut ids = IdReferences::new();

    let mut placed = Vec::new();
    let mut pages = 0;
    loop {
        let mut page = body(100.0);
        pages += 1;
        let status = layout.layout_page(&mut page, pages, &mut ids).unwrap();
        placed.extend(page.line_texts().into_iter().map(str::to_string));
        if status == Status::Complete {
            break;
        }
        assert!(pages < 20, "layout did not terminate");
    }

    let expected: Vec<String> = (0..12).map(|i| format!("c{}", i)).collect();
    assert_eq!(placed, expected);
    assert_eq!(pages, 4);
    assert_eq!(layout.marker(NodeId::ROOT), 12);
    assert_eq!(layout.progress(NodeId::ROOT), Progress::Done);
    assert!(layout.is_done());
}

#[test]
fn test_upgrade_rule_after_progress() {
    // A fills most of the page; B cannot start, yet the flow made progress.
    let flow = FoNode::flow(vec![labelled("A", 80.0), labelled("B", 50.0)]);
    let mut layout = FlowLayout::new(&flow, LayoutOptions::default());

    let mut page = body(100.0);
    let status = layout
        .layout_page(&mut page, 1, &mut IdReferences::new())
        .unwrap();
    assert_eq!(status, Status::SomeProduced);
    assert_eq!(layout.marker(NodeId::ROOT), 1);
}

#[test]
fn test_nested_block_resumes_inside_child() {
    // Nested: the inner block resumes at B and B still does not fit.
    let inner = FoNode::block(vec![labelled("A", 80.0), labelled("B", 50.0)]);
    let flow = FoNode::flow(vec![FoNode::lines(&[30.0]), inner]);
    let mut layout = FlowLayout::new(&flow, LayoutOptions::default());
    let mut ids = IdReferences::new();

    let mut first = body(100.0);
    assert_eq!(
        layout.layout_page(&mut first, 1, &mut ids).unwrap(),
        Status::SomeProduced
    );
    // A does not fit under the 30pt leaf, so page 1 holds only the leaf.
    assert_eq!(first.line_count(), 1);

    let mut second = body(100.0);
    assert_eq!(
        layout.layout_page(&mut second, 2, &mut ids).unwrap(),
        Status::SomeProduced
    );
    assert_eq!(second.line_texts(), vec!["A"]);

    let mut third = body(100.0);
    assert_eq!(
        layout.layout_page(&mut third, 3, &mut ids).unwrap(),
        Status::Complete
    );
    assert_eq!(third.line_texts(), vec!["B"]);
}

#[test]
fn test_first_and_sequence_templates_end_to_end() {
    let mut doc = FoDocument::new();
    doc.add_template(PageTemplate::new("P1", 400.0, 100.0));
    doc.add_template(PageTemplate::new("P2", 400.0, 200.0));
    doc.add_sequence_master(SequenceMaster::new(
        "S",
        vec![
            SubSequence::single("P1"),
            SubSequence::repeatable("P2", None),
        ],
    ));
    let flow = FoNode::flow(vec![
        labelled("one", 60.0),
        labelled("two", 60.0),
        labelled("three", 60.0),
    ]);
    doc.add_page_sequence(PageSequence::new("S", flow.clone()));

    // Driver level: page 1 on P1, page 2 on P2.
    let masters = LayoutMasterSet::from_declarations(&doc.declarations).unwrap();
    let mut selector = PageMasterSelector::for_reference(&masters, "S", 1).unwrap();
    let mut layout = FlowLayout::new(&flow, LayoutOptions::default());
    let mut ids = IdReferences::new();

    let first = masters
        .template(selector.next_template_name(1, false).unwrap())
        .unwrap();
    assert_eq!(first.name, "P1");
    let mut page = body(first.content_rect().height);
    assert_eq!(
        layout.layout_page(&mut page, 1, &mut ids).unwrap(),
        Status::SomeProduced
    );
    assert_eq!(layout.marker(NodeId::ROOT), 1);
    assert_eq!(page.line_texts(), vec!["one"]);

    let second = masters
        .template(selector.next_template_name(2, false).unwrap())
        .unwrap();
    assert_eq!(second.name, "P2");
    let mut page = body(second.content_rect().height);
    assert_eq!(
        layout.layout_page(&mut page, 2, &mut ids).unwrap(),
        Status::Complete
    );
    assert_eq!(page.line_texts(), vec!["two", "three"]);

    // Document level gives the same pagination.
    let tree = layout_document(&doc, &LayoutOptions::default()).unwrap();
    let templates: Vec<&str> = tree.pages.iter().map(|p| p.template.as_str()).collect();
    assert_eq!(templates, vec!["P1", "P2"]);
    assert_eq!(tree.pages[1].body_texts(), vec!["two", "three"]);
}

#[test]
fn test_ids_registered_on_first_area() {
    let flow = FoNode::flow(vec![
        labelled("intro", 90.0).with_id("intro"),
        FoNode::block(vec![FoNode::text(40.0, ["x", "y", "z"])]).with_id("body"),
    ]);
    let mut layout = FlowLayout::new(&flow, LayoutOptions::default());
    let mut ids = IdReferences::new();

    let mut first = body(100.0);
    layout.layout_page(&mut first, 1, &mut ids).unwrap();
    let mut second = body(100.0);
    layout.layout_page(&mut second, 2, &mut ids).unwrap();
    let mut third = body(100.0);
    layout.layout_page(&mut third, 3, &mut ids).unwrap();

    assert_eq!(ids.page_of("intro"), Some(1));
    // "body" could not start on page 1, so its first area is on page 2.
    assert_eq!(ids.page_of("body"), Some(2));
    assert!(second.find_id("body").is_some());
    assert!(third.find_id("body").is_none());
}

#[test]
fn test_has_pending_content() {
    let flow = FoNode::flow(vec![FoNode::lines(&[60.0, 60.0])]);
    let mut layout = FlowLayout::new(&flow, LayoutOptions::default());
    assert!(layout.has_pending_content());

    let mut ids = IdReferences::new();
    layout.layout_page(&mut body(100.0), 1, &mut ids).unwrap();
    assert!(layout.has_pending_content());
    layout.layout_page(&mut body(100.0), 2, &mut ids).unwrap();
    assert!(!layout.has_pending_content());
}

fn list(items: Vec<FoNode>) -> FoNode {
    FoNode::list_block(items).with_style(ResolvedStyle::new().with_list_geometry(30.0, 6.0))
}

fn item(label: &str, lines: &[&str]) -> FoNode {
    FoNode::list_item(
        FoNode::label(vec![FoNode::text(20.0, [label])]),
        FoNode::body(vec![FoNode::text(20.0, lines.iter().copied())]),
    )
}

#[test]
fn test_list_label_placed_once() {
    let flow = FoNode::flow(vec![list(vec![
        item("1.", &["a", "b", "c"]),
        item("2.", &["d"]),
    ])]);
    let mut layout = FlowLayout::new(&flow, LayoutOptions::default());
    let mut ids = IdReferences::new();

    let mut first = body(50.0);
    assert_eq!(
        layout.layout_page(&mut first, 1, &mut ids).unwrap(),
        Status::SomeProduced
    );
    assert_eq!(first.line_texts(), vec!["1.", "a", "b"]);

    let mut second = body(50.0);
    assert_eq!(
        layout.layout_page(&mut second, 2, &mut ids).unwrap(),
        Status::Complete
    );
    assert_eq!(second.line_texts(), vec!["c", "2.", "d"]);
}

#[test]
fn test_list_label_taller_than_space_left() {
    let flow = FoNode::flow(vec![
        FoNode::lines(&[60.0]),
        list(vec![FoNode::list_item(
            FoNode::label(vec![FoNode::text(20.0, ["L1", "L2", "L3"])]),
            FoNode::body(vec![FoNode::text(20.0, ["B1"])]),
        )]),
        labelled("after", 20.0),
    ]);
    let mut layout = FlowLayout::new(&flow, LayoutOptions::default());
    let mut ids = IdReferences::new();

    let mut placed = Vec::new();
    let mut pages = 0;
    loop {
        let mut page = body(100.0);
        pages += 1;
        let status = layout.layout_page(&mut page, pages, &mut ids).unwrap();
        placed.extend(page.line_texts().into_iter().map(str::to_string));
        if status == Status::Complete {
            break;
        }
        assert!(pages < 5, "layout did not terminate");
    }

    assert_eq!(pages, 2);
    assert_eq!(placed, vec!["L1", "L2", "B1", "L3", "after"]);
}

fn malformed() -> FoNode {
    FoNode::flow(vec![
        FoNode::text(10.0, ["before"]),
        FoNode::list_block(vec![item("1.", &["x"]), FoNode::text(10.0, ["stray"])]),
        FoNode::text(10.0, ["after"]),
    ])
}

#[test]
fn test_lenient_drops_invalid_child() {
    let mut layout = FlowLayout::new(&malformed(), LayoutOptions::new().lenient());
    let mut page = body(200.0);
    let status = layout
        .layout_page(&mut page, 1, &mut IdReferences::new())
        .unwrap();

    assert_eq!(status, Status::Complete);
    assert_eq!(page.line_texts(), vec!["before", "1.", "x", "after"]);
    assert_eq!(layout.diagnostics().len(), 1);
    assert_eq!(layout.diagnostics()[0].page_number, Some(1));
}

#[test]
fn test_strict_rejects_invalid_child() {
    let mut layout = FlowLayout::new(&malformed(), LayoutOptions::new().strict());
    let mut page = body(200.0);
    let err = layout
        .layout_page(&mut page, 1, &mut IdReferences::new())
        .unwrap_err();
    assert!(matches!(err, Error::Structural { .. }));
}
