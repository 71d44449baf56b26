//! Resolved style values consumed by layout.
//!
//! Every length is already a final number in points (1/72 inch); the layout
//! core never sees percentages, inherited keywords, or font-relative units.

use serde::{Deserialize, Serialize};

/// Layout-relevant properties of a formatting node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolvedStyle {
    /// Horizontal alignment of lines
    pub text_align: TextAlign,

    /// Alignment of the last line
    pub text_align_last: TextAlign,

    /// Line height in points
    pub line_height: f32,

    /// Distance from the start edge of the containing area
    pub start_indent: f32,

    /// Distance from the end edge of the containing area
    pub end_indent: f32,

    /// Space before the node's first area
    pub space_before: f32,

    /// Space after the node's last area
    pub space_after: f32,

    /// Background fill
    pub background_color: Option<Color>,

    /// Forced break before the node
    pub break_before: BreakValue,

    /// Forced break after the node
    pub break_after: BreakValue,

    /// List blocks: distance from the label start to the body start
    pub provisional_distance_between_starts: f32,

    /// List blocks: gap between the label end and the body start
    pub provisional_label_separation: f32,
}

impl ResolvedStyle {
    /// Create a style with all defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set space before and after.
    pub fn with_spacing(mut self, before: f32, after: f32) -> Self {
        self.space_before = before;
        self.space_after = after;
        self
    }

    /// Set start and end indents.
    pub fn with_indents(mut self, start: f32, end: f32) -> Self {
        self.start_indent = start;
        self.end_indent = end;
        self
    }

    /// Set the background color.
    pub fn with_background(mut self, color: Color) -> Self {
        self.background_color = Some(color);
        self
    }

    /// Set the break before the node.
    pub fn with_break_before(mut self, value: BreakValue) -> Self {
        self.break_before = value;
        self
    }

    /// Set the break after the node.
    pub fn with_break_after(mut self, value: BreakValue) -> Self {
        self.break_after = value;
        self
    }

    /// Set the text alignment.
    pub fn with_text_align(mut self, align: TextAlign) -> Self {
        self.text_align = align;
        self
    }

    /// Set list label/body geometry.
    pub fn with_list_geometry(mut self, distance_between_starts: f32, label_separation: f32) -> Self {
        self.provisional_distance_between_starts = distance_between_starts;
        self.provisional_label_separation = label_separation;
        self
    }
}

impl Default for ResolvedStyle {
    fn default() -> Self {
        Self {
            text_align: TextAlign::Start,
            text_align_last: TextAlign::Relative,
            line_height: 14.4,
            start_indent: 0.0,
            end_indent: 0.0,
            space_before: 0.0,
            space_after: 0.0,
            background_color: None,
            break_before: BreakValue::Auto,
            break_after: BreakValue::Auto,
            provisional_distance_between_starts: 24.0,
            provisional_label_separation: 6.0,
        }
    }
}

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TextAlign {
    /// Align to the start edge
    #[default]
    Start,
    /// Centered
    Center,
    /// Align to the end edge
    End,
    /// Justified
    Justify,
    /// Same as `text_align` (only meaningful for the last line)
    Relative,
}

/// Value of `break-before` / `break-after`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BreakValue {
    /// No forced break
    #[default]
    Auto,
    /// Break to a new page
    Page,
    /// Break to the next odd-numbered page
    OddPage,
    /// Break to the next even-numbered page
    EvenPage,
}

impl BreakValue {
    /// The forced break this value requests, if any.
    pub fn forced(self) -> Option<BreakKind> {
        match self {
            BreakValue::Auto => None,
            BreakValue::Page => Some(BreakKind::Page),
            BreakValue::OddPage => Some(BreakKind::OddPage),
            BreakValue::EvenPage => Some(BreakKind::EvenPage),
        }
    }
}

/// A forced page break request travelling up to the page driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BreakKind {
    /// Any new page
    Page,
    /// A new page with an odd page number
    OddPage,
    /// A new page with an even page number
    EvenPage,
}

impl BreakKind {
    /// Whether a page with `page_number` satisfies this break.
    pub fn accepts(self, page_number: u32) -> bool {
        match self {
            BreakKind::Page => true,
            BreakKind::OddPage => page_number % 2 == 1,
            BreakKind::EvenPage => page_number % 2 == 0,
        }
    }
}

/// An RGBA color with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
    /// Alpha channel (255 = opaque)
    #[serde(default = "opaque")]
    pub a: u8,
}

fn opaque() -> u8 {
    255
}

impl Color {
    /// Create an opaque color.
    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Whether the color is fully transparent.
    pub fn is_transparent(&self) -> bool {
        self.a == 0
    }

    /// Hex representation (`#rrggbb` or `#rrggbbaa`).
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}
