//! Document-level input types.

use serde::{Deserialize, Serialize};

use super::{FoNode, NodeKind, PageTemplate, RegionClass, SequenceMaster, SourceLocation};

/// A style-resolved formatting-object document, ready for layout.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FoDocument {
    /// Layout-master declarations, in document order
    pub declarations: Vec<Declaration>,

    /// Page sequences, in document order
    pub page_sequences: Vec<PageSequence>,
}

impl FoDocument {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a page template.
    pub fn add_template(&mut self, template: PageTemplate) {
        self.declarations
            .push(Declaration::SimplePageMaster(template));
    }

    /// Declare a sequence master.
    pub fn add_sequence_master(&mut self, master: SequenceMaster) {
        self.declarations
            .push(Declaration::PageSequenceMaster(master));
    }

    /// Append a page sequence.
    pub fn add_page_sequence(&mut self, sequence: PageSequence) {
        self.page_sequences.push(sequence);
    }

    /// Total number of content nodes across all flows.
    pub fn node_count(&self) -> usize {
        self.page_sequences
            .iter()
            .map(|s| {
                s.flow.subtree_len()
                    + s.static_contents
                        .iter()
                        .map(|sc| sc.content.subtree_len())
                        .sum::<usize>()
            })
            .sum()
    }
}

/// One entry of the layout-master-set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Declaration {
    /// A page template
    SimplePageMaster(PageTemplate),
    /// A page-sequence selector
    PageSequenceMaster(SequenceMaster),
}

impl Declaration {
    /// Declared master name.
    pub fn name(&self) -> &str {
        match self {
            Declaration::SimplePageMaster(t) => &t.name,
            Declaration::PageSequenceMaster(m) => &m.name,
        }
    }

    /// Declared source location.
    pub fn location(&self) -> Option<&SourceLocation> {
        match self {
            Declaration::SimplePageMaster(t) => t.location.as_ref(),
            Declaration::PageSequenceMaster(m) => m.location.as_ref(),
        }
    }
}

/// `fo:page-sequence`: a flow plus the master that paginates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageSequence {
    /// Name of a page template or sequence master
    pub master_reference: String,

    /// Region name the flow is poured into
    #[serde(default = "default_flow_name")]
    pub flow_name: String,

    /// The flow content (an [`NodeKind::Flow`] node)
    pub flow: FoNode,

    /// Content repeated on every page in side regions
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub static_contents: Vec<StaticContent>,

    /// Page number of the first page (`None` = continue from the previous sequence)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_page_number: Option<u32>,

    /// Constraint on the sequence's page count
    #[serde(default)]
    pub force_page_count: ForcePageCount,

    /// Where the sequence was declared
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<SourceLocation>,
}

fn default_flow_name() -> String {
    RegionClass::Body.default_name().to_string()
}

impl PageSequence {
    /// A sequence pouring `flow` into the body region.
    pub fn new(master_reference: impl Into<String>, flow: FoNode) -> Self {
        Self {
            master_reference: master_reference.into(),
            flow_name: default_flow_name(),
            flow,
            static_contents: Vec::new(),
            initial_page_number: None,
            force_page_count: ForcePageCount::Auto,
            location: None,
        }
    }

    /// Restart page numbering at `number`.
    pub fn with_initial_page_number(mut self, number: u32) -> Self {
        self.initial_page_number = Some(number);
        self
    }

    /// Set the page-count constraint.
    pub fn with_force_page_count(mut self, force: ForcePageCount) -> Self {
        self.force_page_count = force;
        self
    }

    /// Pour the flow into a differently named region.
    pub fn with_flow_name(mut self, flow_name: impl Into<String>) -> Self {
        self.flow_name = flow_name.into();
        self
    }

    /// Add static content for a side region.
    pub fn with_static_content(mut self, content: StaticContent) -> Self {
        self.static_contents.push(content);
        self
    }

    /// Set the source location.
    pub fn with_location(mut self, location: SourceLocation) -> Self {
        self.location = Some(location);
        self
    }
}

/// `fo:static-content`: laid out afresh on every page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaticContent {
    /// Region name the content targets
    pub flow_name: String,

    /// The content (an [`NodeKind::Flow`] node)
    pub content: FoNode,
}

impl StaticContent {
    /// Create static content for a region.
    pub fn new(flow_name: impl Into<String>, blocks: Vec<FoNode>) -> Self {
        Self {
            flow_name: flow_name.into(),
            content: FoNode::new(NodeKind::Flow).with_children(blocks),
        }
    }
}

/// `force-page-count`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ForcePageCount {
    /// No constraint
    #[default]
    Auto,
    /// Even number of pages
    Even,
    /// Odd number of pages
    Odd,
    /// Last page number is even
    EndOnEven,
    /// Last page number is odd
    EndOnOdd,
    /// No constraint
    NoForce,
}

impl ForcePageCount {
    /// Whether a trailing blank page is needed, given the sequence's page
    /// count and last page number.
    pub fn needs_blank_page(self, page_count: u32, last_page_number: u32) -> bool {
        match self {
            ForcePageCount::Auto | ForcePageCount::NoForce => false,
            ForcePageCount::Even => page_count % 2 == 1,
            ForcePageCount::Odd => page_count % 2 == 0,
            ForcePageCount::EndOnEven => last_page_number % 2 == 1,
            ForcePageCount::EndOnOdd => last_page_number % 2 == 0,
        }
    }
}
