//! Whole-document layout.

use rayon::prelude::*;

use crate::area::{AreaTree, IdReferences};
use crate::error::{Error, Result};
use crate::masters::LayoutMasterSet;
use crate::model::FoDocument;

use super::sequence::{SequenceLayout, SequenceOutput};
use super::LayoutOptions;

/// Lay out every page sequence of `doc`.
///
/// The master set is built and sealed first, so declaration errors abort the
/// pass before any page exists. Flow names are then checked against the
/// region names the templates define.
pub fn layout_document(doc: &FoDocument, options: &LayoutOptions) -> Result<AreaTree> {
    let masters = LayoutMasterSet::from_declarations(&doc.declarations)?;
    validate_flow_names(doc, &masters)?;

    let explicit_numbers = doc
        .page_sequences
        .iter()
        .all(|s| s.initial_page_number.is_some());

    let tree = if options.parallel && explicit_numbers && doc.page_sequences.len() > 1 {
        layout_parallel(doc, &masters, options)?
    } else {
        layout_sequential(doc, &masters, options)?
    };

    log::debug!(
        "Laid out {} page sequence(s) into {} page(s)",
        doc.page_sequences.len(),
        tree.page_count()
    );
    Ok(tree)
}

fn validate_flow_names(doc: &FoDocument, masters: &LayoutMasterSet) -> Result<()> {
    for sequence in &doc.page_sequences {
        let names = std::iter::once(sequence.flow_name.as_str())
            .chain(sequence.static_contents.iter().map(|sc| sc.flow_name.as_str()));
        for name in names {
            if !masters.region_name_exists(name) {
                return Err(Error::UnknownRegion {
                    flow_name: name.to_string(),
                    location: sequence.location.clone(),
                });
            }
        }
    }
    Ok(())
}

fn layout_sequential(
    doc: &FoDocument,
    masters: &LayoutMasterSet,
    options: &LayoutOptions,
) -> Result<AreaTree> {
    let mut tree = AreaTree::new();
    let mut last_number: Option<u32> = None;

    for (index, sequence) in doc.page_sequences.iter().enumerate() {
        let first = match (sequence.initial_page_number, last_number) {
            (Some(number), _) => number,
            (None, None) => 1,
            (None, Some(last)) => last.checked_add(1).ok_or_else(|| {
                Error::Layout(format!(
                    "page sequence {} would start past page {}",
                    index + 1,
                    u32::MAX
                ))
            })?,
        };
        let output = SequenceLayout::new(masters, sequence, index, options).run(first, &mut tree.ids)?;
        last_number = output.last_page_number().or(last_number);
        append(&mut tree, output);
    }

    Ok(tree)
}

fn layout_parallel(
    doc: &FoDocument,
    masters: &LayoutMasterSet,
    options: &LayoutOptions,
) -> Result<AreaTree> {
    let outputs: Vec<Result<(SequenceOutput, IdReferences)>> = doc
        .page_sequences
        .par_iter()
        .enumerate()
        .map(|(index, sequence)| {
            let mut ids = IdReferences::new();
            let first = sequence.initial_page_number.unwrap_or(1);
            let output = SequenceLayout::new(masters, sequence, index, options).run(first, &mut ids)?;
            Ok((output, ids))
        })
        .collect();

    let mut tree = AreaTree::new();
    for result in outputs {
        let (output, ids) = result?;
        tree.ids.merge(ids)?;
        append(&mut tree, output);
    }
    Ok(tree)
}

fn append(tree: &mut AreaTree, output: SequenceOutput) {
    tree.pages.extend(output.pages);
    tree.diagnostics.extend(output.diagnostics);
}
