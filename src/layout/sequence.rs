//! Page-sequence driver: allocates pages and pours a flow into them.

use crate::area::{IdReferences, PageArea};
use crate::error::{Diagnostic, Error, Result};
use crate::masters::{LayoutMasterSet, PageMasterSelector};
use crate::model::{BreakKind, PageSequence};

use super::{FlowLayout, LayoutOptions, Status};

/// Pages and diagnostics produced by one page sequence.
#[derive(Debug, Clone, Default)]
pub struct SequenceOutput {
    /// Pages in order
    pub pages: Vec<PageArea>,

    /// Recoverable problems
    pub diagnostics: Vec<Diagnostic>,
}

impl SequenceOutput {
    /// Page number of the last page, if any page was produced.
    pub fn last_page_number(&self) -> Option<u32> {
        self.pages.last().map(|p| p.number)
    }
}

/// Lays out one page sequence against a sealed master set.
pub struct SequenceLayout<'a> {
    masters: &'a LayoutMasterSet,
    sequence: &'a PageSequence,
    sequence_index: usize,
    options: &'a LayoutOptions,
    statics: Vec<(&'a str, FlowLayout)>,
}

impl<'a> SequenceLayout<'a> {
    /// Prepare a sequence for layout.
    pub fn new(
        masters: &'a LayoutMasterSet,
        sequence: &'a PageSequence,
        sequence_index: usize,
        options: &'a LayoutOptions,
    ) -> Self {
        let statics = if options.static_content {
            sequence
                .static_contents
                .iter()
                .map(|sc| {
                    (
                        sc.flow_name.as_str(),
                        FlowLayout::new(&sc.content, options.clone()).without_ids(),
                    )
                })
                .collect()
        } else {
            Vec::new()
        };

        Self {
            masters,
            sequence,
            sequence_index,
            options,
            statics,
        }
    }

    /// Lay out every page, numbering from `first_page_number`.
    pub fn run(&self, first_page_number: u32, ids: &mut IdReferences) -> Result<SequenceOutput> {
        let mut selector =
            PageMasterSelector::for_reference(self.masters, &self.sequence.master_reference, first_page_number)
                .map_err(|err| match err {
                    Error::UnknownMaster { name, .. } => Error::UnknownMaster {
                        name,
                        location: self.sequence.location.clone(),
                    },
                    other => other,
                })?;

        let mut flow = FlowLayout::new(&self.sequence.flow, self.options.clone());
        let mut output = SequenceOutput::default();
        let mut index = 1u32;
        let mut number = first_page_number;
        let mut pending_break: Option<BreakKind> = None;

        loop {
            if index > self.options.max_pages {
                return Err(Error::Layout(format!(
                    "page sequence {} exceeded the limit of {} pages",
                    self.sequence_index + 1,
                    self.options.max_pages
                )));
            }

            if let Some(kind) = pending_break.take() {
                if !kind.accepts(number) {
                    log::debug!("Inserting blank page {} before a {:?} break", number, kind);
                    let blank = self.new_page(&mut selector, index, number, true, &mut output)?;
                    output.pages.push(blank);
                    index += 1;
                    number = self.next_number(number)?;
                    continue;
                }
            }

            let mut page = self.allocate_page(&mut selector, index, number, false)?;
            let region = page
                .region_mut(&self.sequence.flow_name)
                .ok_or_else(|| Error::UnknownRegion {
                    flow_name: self.sequence.flow_name.clone(),
                    location: self.sequence.location.clone(),
                })?;
            let status = flow.layout_page(region, number, ids)?;
            let placed = !region.children().is_empty();
            log::debug!(
                "Page {} ({}) of sequence {}: {:?}",
                number,
                page.template,
                self.sequence_index + 1,
                status
            );

            match status {
                Status::Complete => {
                    if placed || output.pages.is_empty() {
                        self.fill_static(&mut page, &mut output)?;
                        output.pages.push(page);
                    }
                    break;
                }
                Status::ForcedBreak(kind) if !placed => {
                    // Wrong parity on a fresh page: it becomes the blank page,
                    // and the flow starts over on the next one.
                    flow.rewind_page();
                    let blank = self.new_page(&mut selector, index, number, true, &mut output)?;
                    output.pages.push(blank);
                    log::debug!("Page {} left blank for a {:?} break", number, kind);
                }
                Status::ForcedBreak(kind) => {
                    self.fill_static(&mut page, &mut output)?;
                    output.pages.push(page);
                    if !flow.has_pending_content() {
                        break;
                    }
                    pending_break = Some(kind);
                }
                Status::NoneProduced if !placed => {
                    return Err(Error::Layout(format!(
                        "no content could be placed on page {} of sequence {}",
                        number,
                        self.sequence_index + 1
                    )));
                }
                Status::SomeProduced | Status::NoneProduced => {
                    self.fill_static(&mut page, &mut output)?;
                    output.pages.push(page);
                }
            }

            index += 1;
            number = self.next_number(number)?;
        }

        output.diagnostics.extend(flow.take_diagnostics());
        self.force_page_count(&mut selector, &mut output)?;
        Ok(output)
    }

    fn force_page_count(
        &self,
        selector: &mut PageMasterSelector<'a>,
        output: &mut SequenceOutput,
    ) -> Result<()> {
        let (Some(last), count) = (output.last_page_number(), output.pages.len() as u32) else {
            return Ok(());
        };
        if self.sequence.force_page_count.needs_blank_page(count, last) {
            let number = self.next_number(last)?;
            log::debug!(
                "Adding blank page {} for force-page-count {:?}",
                number,
                self.sequence.force_page_count
            );
            let page = self.new_page(selector, count + 1, number, true, output)?;
            output.pages.push(page);
        }
        Ok(())
    }

    fn next_number(&self, number: u32) -> Result<u32> {
        number.checked_add(1).ok_or_else(|| {
            Error::Layout(format!(
                "page numbers of sequence {} run past {}",
                self.sequence_index + 1,
                u32::MAX
            ))
        })
    }

    /// A page with static content, for pages that carry no flow content.
    fn new_page(
        &self,
        selector: &mut PageMasterSelector<'a>,
        index: u32,
        number: u32,
        blank: bool,
        output: &mut SequenceOutput,
    ) -> Result<PageArea> {
        let mut page = self.allocate_page(selector, index, number, blank)?;
        self.fill_static(&mut page, output)?;
        Ok(page)
    }

    fn allocate_page(
        &self,
        selector: &mut PageMasterSelector<'a>,
        index: u32,
        number: u32,
        blank: bool,
    ) -> Result<PageArea> {
        let name = selector.next_template_name(index, blank)?;
        let template = self.masters.template(name).ok_or_else(|| Error::UnknownMaster {
            name: name.to_string(),
            location: None,
        })?;
        Ok(PageArea::from_template(template, number, self.sequence_index, index, blank))
    }

    /// Lay out static content afresh into the regions of a page being kept.
    fn fill_static(&self, page: &mut PageArea, output: &mut SequenceOutput) -> Result<()> {
        let number = page.number;
        for (flow_name, layout) in &self.statics {
            let Some(region) = page.region_mut(flow_name) else {
                continue;
            };
            let mut fresh = layout.clone();
            let mut scratch = IdReferences::new();
            let status = fresh.layout_page(region, number, &mut scratch)?;
            if status.is_incomplete() {
                log::debug!(
                    "Static content for '{}' truncated on page {}",
                    flow_name,
                    number
                );
            }
            output.diagnostics.extend(fresh.take_diagnostics());
        }
        Ok(())
    }
}
