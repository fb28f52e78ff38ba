pub mod document;
pub mod images;
pub mod merge;
#[cfg(test)]
pub mod testutil;

pub use document::PdfDocument;
