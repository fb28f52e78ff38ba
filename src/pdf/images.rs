use anyhow::{Context, Result};
use image::codecs::jpeg::JpegEncoder;
use image::{ExtendedColorType, GenericImageView};
use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, Stream};
use std::path::Path;

const JPEG_QUALITY: u8 = 85;

/// Build a PDF with one page per image.
///
/// Each image is decoded, flattened to RGB, re-encoded as JPEG and embedded
/// as a DCTDecode XObject. Pages are sized one point per pixel, so the image
/// fills the page exactly.
pub fn images_to_document<P: AsRef<Path>>(paths: &[P]) -> Result<Document> {
    if paths.is_empty() {
        anyhow::bail!("No images to convert");
    }

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let mut kids: Vec<Object> = Vec::new();

    for path in paths {
        let path = path.as_ref();
        let img = image::open(path)
            .with_context(|| format!("Failed to read image: {}", path.display()))?;
        let (width, height) = img.dimensions();

        let rgb = img.to_rgb8();
        let mut jpeg = Vec::new();
        JpegEncoder::new_with_quality(&mut jpeg, JPEG_QUALITY)
            .encode(rgb.as_raw(), width, height, ExtendedColorType::Rgb8)
            .with_context(|| format!("Failed to encode image: {}", path.display()))?;

        let mut image_dict = Dictionary::new();
        image_dict.set(b"Type".to_vec(), Object::Name(b"XObject".to_vec()));
        image_dict.set(b"Subtype".to_vec(), Object::Name(b"Image".to_vec()));
        image_dict.set(b"Width".to_vec(), Object::Integer(width as i64));
        image_dict.set(b"Height".to_vec(), Object::Integer(height as i64));
        image_dict.set(b"ColorSpace".to_vec(), Object::Name(b"DeviceRGB".to_vec()));
        image_dict.set(b"BitsPerComponent".to_vec(), Object::Integer(8));
        image_dict.set(b"Filter".to_vec(), Object::Name(b"DCTDecode".to_vec()));
        let image_id = doc.add_object(Stream::new(image_dict, jpeg));

        // Scale the unit image square up to the page size.
        let content = Content {
            operations: vec![
                Operation::new("q", vec![]),
                Operation::new(
                    "cm",
                    vec![
                        Object::Real(width as f32),
                        Object::Integer(0),
                        Object::Integer(0),
                        Object::Real(height as f32),
                        Object::Integer(0),
                        Object::Integer(0),
                    ],
                ),
                Operation::new("Do", vec![Object::Name(b"Im0".to_vec())]),
                Operation::new("Q", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(Dictionary::new(), content.encode()?));

        let mut xobjects = Dictionary::new();
        xobjects.set(b"Im0".to_vec(), Object::Reference(image_id));
        let mut resources = Dictionary::new();
        resources.set(b"XObject".to_vec(), Object::Dictionary(xobjects));

        let mut page = Dictionary::new();
        page.set(b"Type".to_vec(), Object::Name(b"Page".to_vec()));
        page.set(b"Parent".to_vec(), Object::Reference(pages_id));
        page.set(
            b"MediaBox".to_vec(),
            Object::Array(vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Integer(width as i64),
                Object::Integer(height as i64),
            ]),
        );
        page.set(b"Contents".to_vec(), Object::Reference(content_id));
        page.set(b"Resources".to_vec(), Object::Dictionary(resources));
        kids.push(Object::Reference(doc.add_object(page)));
    }

    let mut pages_dict = Dictionary::new();
    pages_dict.set(b"Type".to_vec(), Object::Name(b"Pages".to_vec()));
    pages_dict.set(b"Count".to_vec(), Object::Integer(kids.len() as i64));
    pages_dict.set(b"Kids".to_vec(), Object::Array(kids));
    doc.objects
        .insert(pages_id, Object::Dictionary(pages_dict));

    let mut catalog = Dictionary::new();
    catalog.set(b"Type".to_vec(), Object::Name(b"Catalog".to_vec()));
    catalog.set(b"Pages".to_vec(), Object::Reference(pages_id));
    let catalog_id = doc.add_object(catalog);

    doc.trailer.set("Root", Object::Reference(catalog_id));
    doc
        .trailer
        .set("Size", Object::Integer(doc.max_id as i64 + 1));

    Ok(doc)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_test_png(dir: &Path, name: &str, w: u32, h: u32) -> std::path::PathBuf {
        let path = dir.join(name);
        let img = image::RgbImage::from_pixel(w, h, image::Rgb([200, 40, 40]));
        img.save(&path).unwrap();
        path
    }

    #[test]
    fn test_one_page_per_image() {
        let dir = tempfile::tempdir().unwrap();
        let a = write_test_png(dir.path(), "a.png", 4, 3);
        let b = write_test_png(dir.path(), "b.png", 2, 2);

        let doc = images_to_document(&[a, b]).unwrap();
        assert_eq!(doc.get_pages().len(), 2);
    }

    #[test]
    fn test_output_survives_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let png = write_test_png(dir.path(), "page.png", 3, 5);
        let out = dir.path().join("images.pdf");

        let mut doc = images_to_document(&[png]).unwrap();
        doc.save(&out).unwrap();

        let reloaded = Document::load(&out).unwrap();
        assert_eq!(reloaded.get_pages().len(), 1);
    }

    #[test]
    fn test_no_images_is_an_error() {
        assert!(images_to_document::<&Path>(&[]).is_err());
    }

    #[test]
    fn test_unreadable_image_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let bogus = dir.path().join("not-an-image.png");
        std::fs::write(&bogus, b"plain text").unwrap();
        assert!(images_to_document(&[bogus]).is_err());
    }
}
