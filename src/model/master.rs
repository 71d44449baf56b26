//! Page templates (simple page masters) and sequence masters.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::{Color, Margins, Rect, SourceLocation};
use crate::error::{Error, Result};

/// A named page geometry: size, margins, and regions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageTemplate {
    /// `master-name`
    pub name: String,

    /// Page width in points
    pub page_width: f32,

    /// Page height in points
    pub page_height: f32,

    /// Page margins
    #[serde(default)]
    pub margins: Margins,

    /// Regions of the page
    pub regions: Vec<Region>,

    /// Where the template was declared
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<SourceLocation>,
}

impl PageTemplate {
    /// A template with only a body region covering the page content box.
    pub fn new(name: impl Into<String>, page_width: f32, page_height: f32) -> Self {
        Self {
            name: name.into(),
            page_width,
            page_height,
            margins: Margins::default(),
            regions: vec![Region::body()],
            location: None,
        }
    }

    /// US Letter (612 x 792 pt) with one-inch margins.
    pub fn letter(name: impl Into<String>) -> Self {
        Self::new(name, 612.0, 792.0).with_margins(Margins::uniform(72.0))
    }

    /// A4 (595 x 842 pt) with 20 mm margins.
    pub fn a4(name: impl Into<String>) -> Self {
        Self::new(name, 595.0, 842.0).with_margins(Margins::uniform(56.7))
    }

    /// Set page margins.
    pub fn with_margins(mut self, margins: Margins) -> Self {
        self.margins = margins;
        self
    }

    /// Add a region, replacing any existing region of the same class.
    pub fn with_region(mut self, region: Region) -> Self {
        self.regions.retain(|r| r.class != region.class);
        self.regions.push(region);
        self
    }

    /// Set the source location.
    pub fn with_location(mut self, location: SourceLocation) -> Self {
        self.location = Some(location);
        self
    }

    /// Region of the given class, if defined.
    pub fn region(&self, class: RegionClass) -> Option<&Region> {
        self.regions.iter().find(|r| r.class == class)
    }

    /// Region exposed under the given user-visible name.
    pub fn region_named(&self, name: &str) -> Option<&Region> {
        self.regions.iter().find(|r| r.name() == name)
    }

    /// Whether any region of this template is exposed under `name`.
    pub fn region_name_exists(&self, name: &str) -> bool {
        self.region_named(name).is_some()
    }

    /// Page rectangle minus page margins.
    pub fn content_rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.page_width, self.page_height).inset(&self.margins)
    }

    /// Absolute rectangle of a region on the page.
    pub fn region_rect(&self, region: &Region) -> Rect {
        let content = self.content_rect();
        let extent_of = |class| self.region(class).map(|r| r.extent).unwrap_or(0.0);
        let before = extent_of(RegionClass::Before);
        let after = extent_of(RegionClass::After);
        let side_height = (content.height - before - after).max(0.0);

        match region.class {
            RegionClass::Body => content.inset(&region.margins),
            RegionClass::Before => Rect::new(content.x, content.y, content.width, region.extent),
            RegionClass::After => Rect::new(
                content.x,
                content.y + content.height - region.extent,
                content.width,
                region.extent,
            ),
            RegionClass::Start => {
                Rect::new(content.x, content.y + before, region.extent, side_height)
            }
            RegionClass::End => Rect::new(
                content.x + content.width - region.extent,
                content.y + before,
                region.extent,
                side_height,
            ),
        }
    }

    /// Check internal consistency of the template.
    pub fn validate(&self) -> Result<()> {
        let invalid = |reason: String| Error::InvalidTemplate {
            name: self.name.clone(),
            reason,
        };

        if self.name.trim().is_empty() {
            return Err(invalid("master-name must not be empty".to_string()));
        }
        if self.page_width <= 0.0 || self.page_height <= 0.0 {
            return Err(invalid(format!(
                "page size {}x{} must be positive",
                self.page_width, self.page_height
            )));
        }

        let mut classes = HashSet::new();
        let mut names = HashSet::new();
        for region in &self.regions {
            if !classes.insert(region.class) {
                return Err(invalid(format!(
                    "region class {} is defined more than once",
                    region.class.default_name()
                )));
            }
            if !names.insert(region.name()) {
                return Err(invalid(format!(
                    "region-name ({}) is used by more than one region",
                    region.name()
                )));
            }
            if region.extent < 0.0 {
                return Err(invalid(format!(
                    "region {} has a negative extent",
                    region.name()
                )));
            }
        }

        if !classes.contains(&RegionClass::Body) {
            return Err(invalid("a region-body is required".to_string()));
        }

        Ok(())
    }
}

/// One of the five page regions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    /// Region class
    pub class: RegionClass,

    /// User-visible region name; defaults to the class's default name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region_name: Option<String>,

    /// Thickness of side regions (before, after, start, end)
    #[serde(default)]
    pub extent: f32,

    /// Margins of the body region inside the page content box
    #[serde(default)]
    pub margins: Margins,

    /// Region background
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<Color>,
}

impl Region {
    /// A region of the given class with default naming.
    pub fn new(class: RegionClass) -> Self {
        Self {
            class,
            region_name: None,
            extent: 0.0,
            margins: Margins::default(),
            background_color: None,
        }
    }

    /// A body region.
    pub fn body() -> Self {
        Self::new(RegionClass::Body)
    }

    /// A side region of the given thickness.
    pub fn side(class: RegionClass, extent: f32) -> Self {
        Self {
            extent,
            ..Self::new(class)
        }
    }

    /// Expose the region under a custom name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.region_name = Some(name.into());
        self
    }

    /// Set body margins.
    pub fn with_margins(mut self, margins: Margins) -> Self {
        self.margins = margins;
        self
    }

    /// User-visible region name.
    pub fn name(&self) -> &str {
        self.region_name
            .as_deref()
            .unwrap_or_else(|| self.class.default_name())
    }

    /// Tag of the region class this name is bound to.
    pub fn default_region_class(&self) -> &'static str {
        self.class.default_name()
    }
}

/// Region classes of a simple page master.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RegionClass {
    /// `fo:region-body`
    Body,
    /// `fo:region-before` (header)
    Before,
    /// `fo:region-after` (footer)
    After,
    /// `fo:region-start`
    Start,
    /// `fo:region-end`
    End,
}

impl RegionClass {
    /// The default region name of the class.
    pub fn default_name(self) -> &'static str {
        match self {
            RegionClass::Body => "xsl-region-body",
            RegionClass::Before => "xsl-region-before",
            RegionClass::After => "xsl-region-after",
            RegionClass::Start => "xsl-region-start",
            RegionClass::End => "xsl-region-end",
        }
    }
}

/// A named rule mapping page indices to page template names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SequenceMaster {
    /// `master-name`
    pub name: String,

    /// Sub-sequence specifiers, consumed in order
    pub sub_sequences: Vec<SubSequence>,

    /// Where the master was declared
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<SourceLocation>,
}

impl SequenceMaster {
    /// Create a sequence master.
    pub fn new(name: impl Into<String>, sub_sequences: Vec<SubSequence>) -> Self {
        Self {
            name: name.into(),
            sub_sequences,
            location: None,
        }
    }

    /// Set the source location.
    pub fn with_location(mut self, location: SourceLocation) -> Self {
        self.location = Some(location);
        self
    }

    /// Every page template name referenced by this master.
    pub fn master_references(&self) -> impl Iterator<Item = &str> {
        self.sub_sequences
            .iter()
            .flat_map(|sub| sub.master_references())
    }
}

/// A group of pages within a sequence master.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum SubSequence {
    /// `fo:single-page-master-reference`: exactly one page
    Single {
        /// Template name
        master_reference: String,
    },

    /// `fo:repeatable-page-master-reference`
    Repeatable {
        /// Template name
        master_reference: String,
        /// Page limit (`None` = no limit)
        #[serde(default)]
        maximum_repeats: Option<u32>,
    },

    /// `fo:repeatable-page-master-alternatives`
    Alternatives {
        /// Page limit (`None` = no limit)
        #[serde(default)]
        maximum_repeats: Option<u32>,
        /// Candidates, tried in order
        alternatives: Vec<ConditionalReference>,
    },
}

impl SubSequence {
    /// A single-page group.
    pub fn single(master_reference: impl Into<String>) -> Self {
        SubSequence::Single {
            master_reference: master_reference.into(),
        }
    }

    /// A repeating group, bounded or not.
    pub fn repeatable(master_reference: impl Into<String>, maximum_repeats: Option<u32>) -> Self {
        SubSequence::Repeatable {
            master_reference: master_reference.into(),
            maximum_repeats,
        }
    }

    /// A group of conditional alternatives, bounded or not.
    pub fn alternatives(
        maximum_repeats: Option<u32>,
        alternatives: Vec<ConditionalReference>,
    ) -> Self {
        SubSequence::Alternatives {
            maximum_repeats,
            alternatives,
        }
    }

    /// How many pages the group governs (`None` = unbounded).
    pub fn capacity(&self) -> Option<u32> {
        match self {
            SubSequence::Single { .. } => Some(1),
            SubSequence::Repeatable {
                maximum_repeats, ..
            }
            | SubSequence::Alternatives {
                maximum_repeats, ..
            } => *maximum_repeats,
        }
    }

    /// Page template names referenced by the group.
    pub fn master_references(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        match self {
            SubSequence::Single { master_reference }
            | SubSequence::Repeatable {
                master_reference, ..
            } => Box::new(std::iter::once(master_reference.as_str())),
            SubSequence::Alternatives { alternatives, .. } => {
                Box::new(alternatives.iter().map(|a| a.master_reference.as_str()))
            }
        }
    }
}

/// `fo:conditional-page-master-reference`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionalReference {
    /// Template name
    pub master_reference: String,

    /// Position condition
    #[serde(default)]
    pub page_position: PagePosition,

    /// Parity condition
    #[serde(default)]
    pub odd_or_even: OddOrEven,

    /// Blank-page condition
    #[serde(default)]
    pub blank_or_not_blank: BlankOrNotBlank,
}

impl ConditionalReference {
    /// An unconditional reference.
    pub fn new(master_reference: impl Into<String>) -> Self {
        Self {
            master_reference: master_reference.into(),
            page_position: PagePosition::Any,
            odd_or_even: OddOrEven::Any,
            blank_or_not_blank: BlankOrNotBlank::Any,
        }
    }

    /// Restrict by page position.
    pub fn with_position(mut self, position: PagePosition) -> Self {
        self.page_position = position;
        self
    }

    /// Restrict by parity.
    pub fn with_parity(mut self, parity: OddOrEven) -> Self {
        self.odd_or_even = parity;
        self
    }

    /// Restrict by blankness.
    pub fn with_blank(mut self, blank: BlankOrNotBlank) -> Self {
        self.blank_or_not_blank = blank;
        self
    }

    /// Whether this reference applies to the described page.
    pub fn matches(&self, is_first: bool, page_number: u32, is_blank: bool) -> bool {
        let position = match self.page_position {
            PagePosition::Any => true,
            PagePosition::First => is_first,
            PagePosition::Rest => !is_first,
        };
        let parity = match self.odd_or_even {
            OddOrEven::Any => true,
            OddOrEven::Odd => page_number % 2 == 1,
            OddOrEven::Even => page_number % 2 == 0,
        };
        let blank = match self.blank_or_not_blank {
            BlankOrNotBlank::Any => true,
            BlankOrNotBlank::Blank => is_blank,
            BlankOrNotBlank::NotBlank => !is_blank,
        };
        position && parity && blank
    }
}

/// `page-position` condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PagePosition {
    /// Any page
    #[default]
    Any,
    /// The first page of the sequence
    First,
    /// Any page but the first
    Rest,
}

/// `odd-or-even` condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OddOrEven {
    /// Any page
    #[default]
    Any,
    /// Odd page numbers
    Odd,
    /// Even page numbers
    Even,
}

/// `blank-or-not-blank` condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlankOrNotBlank {
    /// Any page
    #[default]
    Any,
    /// Pages generated only to satisfy a parity or page-count constraint
    Blank,
    /// Pages with flow content
    NotBlank,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_names() {
        let region = Region::body();
        assert_eq!(region.name(), "xsl-region-body");
        assert_eq!(region.default_region_class(), "xsl-region-body");

        let named = Region::side(RegionClass::Before, 36.0).with_name("header");
        assert_eq!(named.name(), "header");
        assert_eq!(named.default_region_class(), "xsl-region-before");
    }

    #[test]
    fn test_region_rects() {
        let template = PageTemplate::new("p", 200.0, 300.0)
            .with_margins(Margins::uniform(10.0))
            .with_region(Region::body().with_margins(Margins::new(30.0, 0.0, 20.0, 0.0)))
            .with_region(Region::side(RegionClass::Before, 25.0))
            .with_region(Region::side(RegionClass::After, 15.0))
            .with_region(Region::side(RegionClass::Start, 12.0));

        let body = template.region(RegionClass::Body).unwrap();
        assert_eq!(template.region_rect(body), Rect::new(10.0, 40.0, 180.0, 230.0));

        let after = template.region(RegionClass::After).unwrap();
        assert_eq!(template.region_rect(after), Rect::new(10.0, 275.0, 180.0, 15.0));

        let start = template.region(RegionClass::Start).unwrap();
        assert_eq!(template.region_rect(start), Rect::new(10.0, 35.0, 12.0, 240.0));
    }

    #[test]
    fn test_template_validation() {
        assert!(PageTemplate::letter("ok").validate().is_ok());

        let mut no_body = PageTemplate::new("nobody", 100.0, 100.0);
        no_body.regions = vec![Region::side(RegionClass::Before, 10.0)];
        assert!(matches!(
            no_body.validate(),
            Err(Error::InvalidTemplate { .. })
        ));

        let mut twice = PageTemplate::new("twice", 100.0, 100.0);
        twice.regions.push(Region::body().with_name("other"));
        assert!(twice.validate().is_err());

        let clash = PageTemplate::new("clash", 100.0, 100.0)
            .with_region(Region::side(RegionClass::Before, 10.0).with_name("xsl-region-body"));
        assert!(clash.validate().is_err());

        assert!(PageTemplate::new("flat", 100.0, 0.0).validate().is_err());
    }

    #[test]
    fn test_conditional_matching() {
        let first_odd = ConditionalReference::new("first")
            .with_position(PagePosition::First)
            .with_parity(OddOrEven::Odd);
        assert!(first_odd.matches(true, 1, false));
        assert!(!first_odd.matches(false, 3, false));
        assert!(!first_odd.matches(true, 2, false));

        let blank = ConditionalReference::new("blank").with_blank(BlankOrNotBlank::Blank);
        assert!(blank.matches(false, 4, true));
        assert!(!blank.matches(false, 4, false));
    }

    #[test]
    fn test_sub_sequence_capacity() {
        assert_eq!(SubSequence::single("a").capacity(), Some(1));
        assert_eq!(SubSequence::repeatable("a", Some(3)).capacity(), Some(3));
        assert_eq!(SubSequence::repeatable("a", None).capacity(), None);

        let master = SequenceMaster::new(
            "s",
            vec![
                SubSequence::single("first"),
                SubSequence::alternatives(
                    None,
                    vec![ConditionalReference::new("odd"), ConditionalReference::new("even")],
                ),
            ],
        );
        let refs: Vec<_> = master.master_references().collect();
        assert_eq!(refs, vec!["first", "odd", "even"]);
    }

    #[test]
    fn test_sub_sequence_json() {
        let json = r#"{"type": "repeatable", "master_reference": "body", "maximum_repeats": 2}"#;
        let sub: SubSequence = serde_json::from_str(json).unwrap();
        assert_eq!(sub.capacity(), Some(2));
    }
}
