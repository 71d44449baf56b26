//! Plain-text outline of an area tree.

use std::fmt::Write;

use crate::area::{Area, AreaKind, AreaTree, PageArea};
use crate::error::Result;

use super::RenderOptions;

/// Render an indented outline of the selected pages.
pub fn to_text(tree: &AreaTree, options: &RenderOptions) -> Result<String> {
    let mut output = String::new();

    for page in &tree.pages {
        if !options.includes_page(page.number, page.blank) {
            continue;
        }
        write_page(&mut output, page, options);
    }

    if options.include_diagnostics && !tree.diagnostics.is_empty() {
        output.push_str("Diagnostics:\n");
        for diagnostic in &tree.diagnostics {
            match diagnostic.page_number {
                Some(page) => {
                    let _ = writeln!(output, "  page {}: {}", page, diagnostic.message);
                }
                None => {
                    let _ = writeln!(output, "  {}", diagnostic.message);
                }
            }
        }
    }

    Ok(output.trim_end().to_string())
}

fn write_page(output: &mut String, page: &PageArea, options: &RenderOptions) {
    let _ = write!(output, "Page {} [{}", page.number, page.template);
    if page.blank {
        output.push_str(", blank");
    }
    output.push(']');
    if options.show_geometry {
        let _ = write!(output, " {}x{}", page.width, page.height);
    }
    output.push('\n');

    for region in &page.regions {
        region.walk(&mut |area, depth| write_area(output, area, depth + 1, options));
    }
}

fn write_area(output: &mut String, area: &Area, depth: usize, options: &RenderOptions) {
    let indent = " ".repeat(depth * options.indent_width);
    output.push_str(&indent);

    match area.kind() {
        AreaKind::Region { name, .. } => {
            let _ = write!(output, "region {}", name);
        }
        AreaKind::Block => {
            let label = area
                .generated_by()
                .map(|g| g.kind.name())
                .unwrap_or("block");
            output.push_str(label);
        }
        AreaKind::Line => match area.text() {
            Some(text) => {
                let _ = write!(output, "line {:?}", text);
            }
            None => output.push_str("line"),
        },
    }

    if options.show_geometry {
        let _ = write!(
            output,
            " @({}, {}) w={} h={}",
            area.x(),
            area.y(),
            area.content_width(),
            area.height()
        );
    }

    if options.show_ids {
        for id in area.ids() {
            let _ = write!(output, " #{}", id);
        }
        for marker in area.markers() {
            let _ = write!(output, " [{}: {}]", marker.class_name, marker.content);
        }
    }

    output.push('\n');
}
