use anyhow::Result;
use lopdf::{Dictionary, Document, Object, ObjectId};
use std::collections::HashMap;

/// Combine documents into one, in input order.
///
/// Every object of every part is copied with its ids remapped past
/// `max_id`, then a fresh page tree is built over the collected pages and
/// the old catalogs are simply left unreferenced.
pub fn merge_documents(parts: Vec<Document>) -> Result<Document> {
    if parts.is_empty() {
        anyhow::bail!("No documents to merge");
    }

    let mut merged = Document::with_version("1.5");
    let mut page_ids: Vec<ObjectId> = Vec::new();

    for doc in parts {
        if doc.get_pages().is_empty() {
            anyhow::bail!("Cannot merge a PDF with no pages");
        }

        let mut id_map: HashMap<ObjectId, ObjectId> = HashMap::new();
        let mut next_id = merged.max_id + 1;
        for &old_id in doc.objects.keys() {
            id_map.insert(old_id, (next_id, 0));
            next_id += 1;
        }
        merged.max_id = next_id - 1;

        for (&old_id, obj) in doc.objects.iter() {
            let mut cloned = obj.clone();
            remap_references(&mut cloned, &id_map);
            merged.objects.insert(id_map[&old_id], cloned);
        }

        // get_pages is keyed by 1-based page number, so iteration order is
        // document order.
        for (_, page_id) in doc.get_pages() {
            if let Some(&new_id) = id_map.get(&page_id) {
                page_ids.push(new_id);
            }
        }
    }

    let page_refs: Vec<Object> = page_ids.iter().map(|&id| Object::Reference(id)).collect();

    let mut pages_dict = Dictionary::new();
    pages_dict.set(b"Type".to_vec(), Object::Name(b"Pages".to_vec()));
    pages_dict.set(b"Kids".to_vec(), Object::Array(page_refs));
    pages_dict.set(b"Count".to_vec(), Object::Integer(page_ids.len() as i64));
    let pages_id = merged.add_object(pages_dict);

    for &page_id in &page_ids {
        if let Ok(page_dict) = merged.get_dictionary_mut(page_id) {
            page_dict.set(b"Parent".to_vec(), Object::Reference(pages_id));
        }
    }

    let mut catalog = Dictionary::new();
    catalog.set(b"Type".to_vec(), Object::Name(b"Catalog".to_vec()));
    catalog.set(b"Pages".to_vec(), Object::Reference(pages_id));
    let catalog_id = merged.add_object(catalog);

    merged.trailer.set("Root", Object::Reference(catalog_id));
    merged
        .trailer
        .set("Size", Object::Integer(merged.max_id as i64 + 1));

    Ok(merged)
}

fn remap_references(obj: &mut Object, id_map: &HashMap<ObjectId, ObjectId>) {
    match obj {
        Object::Reference(id) => {
            if let Some(&new_id) = id_map.get(id) {
                *id = new_id;
            }
        }
        Object::Array(items) => {
            for item in items {
                remap_references(item, id_map);
            }
        }
        Object::Dictionary(dict) => {
            let keys: Vec<_> = dict.iter().map(|(k, _)| k.clone()).collect();
            for key in keys {
                if let Ok(val) = dict.get_mut(&key) {
                    remap_references(val, id_map);
                }
            }
        }
        Object::Stream(stream) => {
            let keys: Vec<_> = stream.dict.iter().map(|(k, _)| k.clone()).collect();
            for key in keys {
                if let Ok(val) = stream.dict.get_mut(&key) {
                    remap_references(val, id_map);
                }
            }
        }
        _ => {}
    }
}
