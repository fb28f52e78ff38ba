use crate::page_range::PageSelection;
use crate::pdf::{self, PdfDocument};
use anyhow::Result;
use lopdf::Document;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Load each input, apply its page selection and combine the results.
/// An empty or missing expression selects the whole file. Returns the
/// merged document and the total number of selected pages.
pub fn merge_files(inputs: &[(PathBuf, String)]) -> Result<(Document, usize)> {
    if inputs.is_empty() {
        anyhow::bail!("No input files specified");
    }

    let mut parts = Vec::with_capacity(inputs.len());
    let mut total_pages = 0usize;

    for (path, expr) in inputs {
        let doc = PdfDocument::open(path)?;
        let page_count = doc.page_count();

        let selection = PageSelection::parse(expr, page_count)
            .map_err(|e| anyhow::anyhow!("{} (File: {})", e, path.display()))?;
        let selected = selection.len(page_count);
        total_pages += selected;
        debug!(file = %path.display(), pages = selected, "selected pages for merge");

        let part = if selection.is_all() {
            doc.doc
        } else {
            doc.select(&selection.indices(page_count))?
        };
        parts.push(part);
    }

    let merged = pdf::merge::merge_documents(parts)?;
    Ok((merged, total_pages))
}

pub fn run<P: AsRef<Path>, Q: AsRef<Path>>(
    inputs: &[P],
    pages: &[String],
    output: Q,
) -> Result<()> {
    if pages.len() > inputs.len() {
        anyhow::bail!(
            "Got {} page selections for {} input file(s)",
            pages.len(),
            inputs.len()
        );
    }

    let inputs: Vec<(PathBuf, String)> = inputs
        .iter()
        .enumerate()
        .map(|(i, path)| {
            let expr = pages.get(i).cloned().unwrap_or_default();
            (path.as_ref().to_path_buf(), expr)
        })
        .collect();

    let (mut merged, total_pages) = merge_files(&inputs)?;
    pdf::document::save_atomic(&mut merged, &output)?;

    println!(
        "Merged {} file(s) ({} pages) into {}",
        inputs.len(),
        total_pages,
        output.as_ref().display()
    );

    Ok(())
}
