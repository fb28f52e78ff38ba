use lopdf::{Dictionary, Document, Object, Stream};

/// Build an in-memory document with `pages` empty pages and a proper
/// Catalog/Pages/Kids tree, for tests that need a real page structure
/// without a fixture file.
pub fn blank_document(pages: u32) -> Document {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let mut kids: Vec<Object> = Vec::new();
    for _ in 0..pages {
        let content_id = doc.add_object(Stream::new(Dictionary::new(), Vec::new()));

        let mut page = Dictionary::new();
        page.set(b"Type".to_vec(), Object::Name(b"Page".to_vec()));
        page.set(b"Parent".to_vec(), Object::Reference(pages_id));
        page.set(
            b"MediaBox".to_vec(),
            Object::Array(vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Integer(612),
                Object::Integer(792),
            ]),
        );
        page.set(b"Contents".to_vec(), Object::Reference(content_id));
        kids.push(Object::Reference(doc.add_object(page)));
    }

    let mut pages_dict = Dictionary::new();
    pages_dict.set(b"Type".to_vec(), Object::Name(b"Pages".to_vec()));
    pages_dict.set(b"Kids".to_vec(), Object::Array(kids));
    pages_dict.set(b"Count".to_vec(), Object::Integer(pages as i64));
    doc.objects
        .insert(pages_id, Object::Dictionary(pages_dict));

    let mut catalog = Dictionary::new();
    catalog.set(b"Type".to_vec(), Object::Name(b"Catalog".to_vec()));
    catalog.set(b"Pages".to_vec(), Object::Reference(pages_id));
    let catalog_id = doc.add_object(catalog);

    doc.trailer.set("Root", Object::Reference(catalog_id));
    doc
}
