use crate::page_range::PageSelection;
use crate::pdf::{self, PdfDocument};
use anyhow::Result;
use std::path::Path;
use tracing::debug;

pub fn run<P: AsRef<Path>, Q: AsRef<Path>>(input: P, pages: &str, output: Q) -> Result<()> {
    let doc = PdfDocument::open(&input)?;
    let total = doc.page_count();

    let selection = PageSelection::parse(pages, total)?;
    let indices = selection.indices(total);
    debug!(file = %input.as_ref().display(), pages = indices.len(), "extracting pages");

    let mut new_doc = doc.select(&indices)?;
    pdf::document::save_atomic(&mut new_doc, &output)?;

    println!(
        "Extracted {} page(s) to {}",
        indices.len(),
        output.as_ref().display()
    );

    Ok(())
}
