use anyhow::{Context, Result};
use lopdf::{Document, Object};
use std::path::Path;

use crate::scratch::ScratchFile;

pub struct PdfDocument {
    pub doc: Document,
    pub path: String,
}

impl PdfDocument {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_str = path.as_ref().display().to_string();
        let doc =
            Document::load(&path).with_context(|| format!("Failed to open PDF: {}", path_str))?;
        Ok(PdfDocument {
            doc,
            path: path_str,
        })
    }

    pub fn page_count(&self) -> u32 {
        self.doc.get_pages().len() as u32
    }

    /// Basic metadata from the document info dictionary.
    pub fn metadata(&self) -> PdfMetadata {
        let mut meta = PdfMetadata {
            page_count: self.page_count(),
            ..Default::default()
        };

        if let Ok(Object::Reference(info_ref)) = self.doc.trailer.get(b"Info") {
            if let Ok(Object::Dictionary(dict)) = self.doc.get_object(*info_ref) {
                meta.title = get_string_from_dict(dict, b"Title");
                meta.author = get_string_from_dict(dict, b"Author");
                meta.producer = get_string_from_dict(dict, b"Producer");
            }
        }

        meta
    }

    /// Build a new document containing only the pages at the given
    /// zero-based indices. Indices must be ascending and in bounds (the
    /// page-range parser guarantees both).
    pub fn select(&self, indices: &[u32]) -> Result<Document> {
        let total = self.page_count();
        for &idx in indices {
            if idx >= total {
                anyhow::bail!("Page index {} is out of range (0-{})", idx, total - 1);
            }
        }

        let mut new_doc = self.doc.clone();

        // lopdf numbers pages from 1; drop everything not selected.
        let to_delete: Vec<u32> = (1..=total)
            .filter(|page| !indices.contains(&(page - 1)))
            .collect();
        if !to_delete.is_empty() {
            new_doc.delete_pages(&to_delete);
        }

        Ok(new_doc)
    }
}

/// Save through a scratch file so an interrupted write never leaves a
/// truncated PDF at the destination.
pub fn save_atomic<P: AsRef<Path>>(doc: &mut Document, path: P) -> Result<()> {
    let path = path.as_ref();
    let scratch = ScratchFile::for_output(path)?;
    doc.save(scratch.path())
        .with_context(|| format!("Failed to save PDF: {}", path.display()))?;
    scratch.persist()
}

#[derive(Debug, Default, Clone)]
pub struct PdfMetadata {
    pub title: Option<String>,
    pub author: Option<String>,
    pub producer: Option<String>,
    pub page_count: u32,
}

fn get_string_from_dict(dict: &lopdf::Dictionary, key: &[u8]) -> Option<String> {
    dict.get(key).ok().and_then(|obj| match obj {
        Object::String(bytes, _) => decode_pdf_string(bytes),
        _ => None,
    })
}

fn decode_pdf_string(bytes: &[u8]) -> Option<String> {
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        // UTF-16 BE with BOM
        let u16_chars: Vec<u16> = bytes[2..]
            .chunks_exact(2)
            .map(|chunk| u16::from_be_bytes([chunk[0], chunk[1]]))
            .collect();
        String::from_utf16(&u16_chars).ok()
    } else {
        // Latin-1 / PDFDocEncoding (simplified)
        Some(bytes.iter().map(|&b| b as char).collect())
    }
}
