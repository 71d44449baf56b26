//! Per-sequence page master selection.
//!
//! A [`PageMasterSelector`] walks the sub-sequence specifiers of a sequence
//! master as pages are produced. A finite group that runs out hands over to
//! the next group; once the last group is exhausted it keeps governing every
//! further page.

use crate::error::{Error, Result};
use crate::model::{SequenceMaster, SubSequence};

use super::{LayoutMasterSet, MasterReference};

#[derive(Debug, Clone, Copy)]
enum Source<'a> {
    Template(&'a str),
    Sequence(&'a SequenceMaster),
}

/// Picks the page template name governing each page of one page sequence.
#[derive(Debug, Clone)]
pub struct PageMasterSelector<'a> {
    source: Source<'a>,
    initial_page_number: u32,
    group: usize,
    used_in_group: u32,
    last_index: u32,
    last_choice: Option<&'a str>,
}

impl<'a> PageMasterSelector<'a> {
    /// Selector for a resolved master reference.
    pub fn new(reference: MasterReference<'a>, initial_page_number: u32) -> Self {
        let source = match reference {
            MasterReference::Template(t) => Source::Template(&t.name),
            MasterReference::Sequence(m) => Source::Sequence(m),
        };
        let mut selector = Self {
            source,
            initial_page_number,
            group: 0,
            used_in_group: 0,
            last_index: 0,
            last_choice: None,
        };
        selector.reset();
        selector
    }

    /// Selector for a page sequence's `master-reference`.
    pub fn for_reference(
        masters: &'a LayoutMasterSet,
        master_reference: &str,
        initial_page_number: u32,
    ) -> Result<Self> {
        let reference = masters
            .resolve(master_reference)
            .ok_or_else(|| Error::UnknownMaster {
                name: master_reference.to_string(),
                location: None,
            })?;
        Ok(Self::new(reference, initial_page_number))
    }

    /// Forget all progress; the next page is page 1 of a new sequence.
    pub fn reset(&mut self) {
        self.group = 0;
        self.used_in_group = 0;
        self.last_index = 0;
        self.last_choice = None;
        self.skip_exhausted_groups();
    }

    /// The template chosen for the most recent page.
    pub fn last_choice(&self) -> Option<&'a str> {
        self.last_choice
    }

    /// Index of the active sub-sequence group.
    pub fn active_group(&self) -> usize {
        self.group
    }

    /// Resolve the template name for a 1-based page index.
    ///
    /// Indices are expected to increase by one per call; any other index
    /// repositions the selector from the start of the sequence, so the result
    /// only depends on the master and the index.
    pub fn next_template_name(&mut self, page_index: u32, is_blank: bool) -> Result<&'a str> {
        if page_index == 0 {
            return Err(Error::Layout("page indices start at 1".to_string()));
        }

        let master = match self.source {
            Source::Template(name) => {
                self.last_index = page_index;
                self.last_choice = Some(name);
                return Ok(name);
            }
            Source::Sequence(master) => master,
        };

        if self.last_index.checked_add(1) == Some(page_index) {
            if self.last_index > 0 {
                self.used_in_group += 1;
                self.skip_exhausted_groups();
            }
        } else {
            self.reset();
            for _ in 1..page_index {
                self.used_in_group += 1;
                self.skip_exhausted_groups();
            }
        }

        let sub = &master.sub_sequences[self.group];
        let name = self.pick(master, sub, page_index, is_blank)?;
        self.last_index = page_index;
        self.last_choice = Some(name);
        Ok(name)
    }

    fn pick(
        &self,
        master: &'a SequenceMaster,
        sub: &'a SubSequence,
        page_index: u32,
        is_blank: bool,
    ) -> Result<&'a str> {
        match sub {
            SubSequence::Single { master_reference }
            | SubSequence::Repeatable {
                master_reference, ..
            } => Ok(master_reference.as_str()),
            SubSequence::Alternatives { alternatives, .. } => {
                let is_first = page_index == 1;
                let page_number = self
                    .initial_page_number
                    .checked_add(page_index - 1)
                    .ok_or_else(|| {
                        Error::Layout(format!(
                            "page index {} of '{}' has no valid page number",
                            page_index, master.name
                        ))
                    })?;
                let find = |blank: bool| {
                    alternatives
                        .iter()
                        .find(|alt| alt.matches(is_first, page_number, blank))
                };

                let chosen = find(is_blank).or_else(|| {
                    if is_blank {
                        log::debug!(
                            "No blank alternative in '{}' for page {}, using a regular one",
                            master.name,
                            page_number
                        );
                        find(false)
                    } else {
                        None
                    }
                });

                chosen
                    .map(|alt| alt.master_reference.as_str())
                    .ok_or_else(|| Error::NoMatchingMaster {
                        master: master.name.clone(),
                        page_index,
                    })
            }
        }
    }

    fn skip_exhausted_groups(&mut self) {
        let Source::Sequence(master) = self.source else {
            return;
        };
        let groups = master.sub_sequences.len();
        while self.group + 1 < groups {
            match master.sub_sequences[self.group].capacity() {
                Some(capacity) if self.used_in_group >= capacity => {
                    self.group += 1;
                    self.used_in_group = 0;
                }
                _ => break,
            }
        }
    }
}
