//! Rectangles and edge sizes, in points.

use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle; `y` grows downward from the page top.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge
    pub x: f32,
    /// Top edge
    pub y: f32,
    /// Width
    pub width: f32,
    /// Height
    pub height: f32,
}

impl Rect {
    /// Create a rectangle.
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Shrink the rectangle by the given edge sizes, clamping at zero size.
    pub fn inset(&self, edges: &Margins) -> Rect {
        Rect {
            x: self.x + edges.left,
            y: self.y + edges.top,
            width: (self.width - edges.left - edges.right).max(0.0),
            height: (self.height - edges.top - edges.bottom).max(0.0),
        }
    }
}

/// Edge sizes (margins) on the four sides of a rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Margins {
    /// Top edge
    pub top: f32,
    /// Right edge
    pub right: f32,
    /// Bottom edge
    pub bottom: f32,
    /// Left edge
    pub left: f32,
}

impl Margins {
    /// Same size on all four sides.
    pub fn uniform(size: f32) -> Self {
        Self {
            top: size,
            right: size,
            bottom: size,
            left: size,
        }
    }

    /// Explicit sizes, in CSS order.
    pub fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inset() {
        let page = Rect::new(0.0, 0.0, 200.0, 300.0);
        let content = page.inset(&Margins::new(10.0, 20.0, 30.0, 40.0));
        assert_eq!(content, Rect::new(40.0, 10.0, 140.0, 260.0));

        let collapsed = page.inset(&Margins::uniform(500.0));
        assert_eq!(collapsed.width, 0.0);
        assert_eq!(collapsed.height, 0.0);
    }
}
