use crate::pdf::PdfDocument;
use anyhow::Result;
use std::path::Path;

pub fn run<P: AsRef<Path>>(path: P) -> Result<()> {
    let doc = PdfDocument::open(&path)?;
    let meta = doc.metadata();

    println!("File: {}", path.as_ref().display());
    println!("Pages: {}", meta.page_count);

    if let Some(title) = &meta.title {
        println!("Title: {}", title);
    }
    if let Some(author) = &meta.author {
        println!("Author: {}", author);
    }
    if let Some(producer) = &meta.producer {
        println!("Producer: {}", producer);
    }

    Ok(())
}
