use crate::pdf;
use anyhow::Result;
use std::path::Path;

pub fn run<P: AsRef<Path>, Q: AsRef<Path>>(inputs: &[P], output: Q) -> Result<()> {
    let paths: Vec<&Path> = inputs.iter().map(|p| p.as_ref()).collect();

    let mut doc = pdf::images::images_to_document(&paths)?;
    pdf::document::save_atomic(&mut doc, &output)?;

    println!(
        "Converted {} image(s) into {}",
        paths.len(),
        output.as_ref().display()
    );

    Ok(())
}
