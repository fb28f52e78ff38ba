use crate::pdf::{self, PdfDocument};
use anyhow::{Context, Result};
use std::path::Path;
use tracing::debug;

pub fn run<P: AsRef<Path>, Q: AsRef<Path>>(input: P, output: Q) -> Result<()> {
    let input = input.as_ref();
    let output = output.as_ref();

    let size_before = std::fs::metadata(input)
        .with_context(|| format!("Failed to stat {}", input.display()))?
        .len();

    let mut doc = PdfDocument::open(input)?.doc;
    doc.compress();
    pdf::document::save_atomic(&mut doc, output)?;

    let size_after = std::fs::metadata(output)
        .with_context(|| format!("Failed to stat {}", output.display()))?
        .len();
    debug!(before = size_before, after = size_after, "compressed");

    println!(
        "Compressed {} ({} -> {} bytes) into {}",
        input.display(),
        size_before,
        size_after,
        output.display()
    );

    Ok(())
}
