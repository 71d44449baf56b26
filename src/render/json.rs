//! JSON rendering for area trees.

use crate::area::AreaTree;
use crate::error::{Error, Result};

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert an area tree to JSON.
pub fn to_json(tree: &AreaTree, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(tree),
        JsonFormat::Compact => serde_json::to_string(tree),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::area::PageArea;
    use crate::model::PageTemplate;

    fn tree() -> AreaTree {
        let mut tree = AreaTree::new();
        tree.add_page(PageArea::from_template(
            &PageTemplate::letter("letter"),
            1,
            0,
            1,
            false,
        ));
        tree
    }

    #[test]
    fn test_to_json_pretty() {
        let json = to_json(&tree(), JsonFormat::Pretty).unwrap();
        assert!(json.contains("\"template\": \"letter\""));
        assert!(json.contains("xsl-region-body"));
        assert!(json.contains('\n'));
    }

    #[test]
    fn test_to_json_compact_round_trip() {
        let json = to_json(&tree(), JsonFormat::Compact).unwrap();
        assert!(!json.contains('\n'));
        let back: AreaTree = serde_json::from_str(&json).unwrap();
        assert_eq!(back.pages, tree().pages);
    }
}
