//! PDF composition for the consolidated report.
//!
//! Each section is rendered to its own document; this crate concatenates
//! them page by page and adds one bookmark per section:
//! - Deep object copying with cycle detection
//! - Appending the pages of one document to another
//! - A flat outline pointing at the first page of each part

mod error;

pub use error::ComposerError;

use lopdf::{dictionary, Document, Object, ObjectId, StringFormat};
use std::collections::HashMap;

/// A titled document to be concatenated.
#[derive(Debug)]
pub struct TitledDocument {
    pub title: String,
    pub document: Document,
}

impl TitledDocument {
    pub fn new(title: impl Into<String>, document: Document) -> Self {
        Self {
            title: title.into(),
            document,
        }
    }
}

/// Copies objects from one document into another, following references.
struct ObjectCopier<'a> {
    source_doc: &'a Document,
    target_doc: &'a mut Document,
    id_map: HashMap<ObjectId, ObjectId>,
}

impl<'a> ObjectCopier<'a> {
    fn new(source_doc: &'a Document, target_doc: &'a mut Document) -> Self {
        Self {
            source_doc,
            target_doc,
            id_map: HashMap::new(),
        }
    }

    /// Copies `source_id` and everything it references, each object once.
    fn copy_object(&mut self, source_id: ObjectId) -> Result<ObjectId, lopdf::Error> {
        if let Some(target_id) = self.id_map.get(&source_id) {
            return Ok(*target_id);
        }

        // Reserve the id before recursing so reference cycles terminate.
        let new_id = self.target_doc.add_object(Object::Null);
        self.id_map.insert(source_id, new_id);

        let obj = self.source_doc.get_object(source_id)?.clone();
        let new_obj = self.remap_references(obj)?;
        match self.target_doc.objects.get_mut(&new_id) {
            Some(slot) => *slot = new_obj,
            None => return Err(lopdf::Error::ObjectNotFound(new_id)),
        }
        Ok(new_id)
    }

    /// Copies a page dictionary without its `Parent`, which would drag the
    /// source page tree along.
    fn copy_page(&mut self, page_id: ObjectId) -> Result<ObjectId, lopdf::Error> {
        let mut page = self.source_doc.get_dictionary(page_id)?.clone();
        page.remove(b"Parent");
        let new_obj = self.remap_references(Object::Dictionary(page))?;
        let new_id = self.target_doc.add_object(new_obj);
        self.id_map.insert(page_id, new_id);
        Ok(new_id)
    }

    fn remap_references(&mut self, obj: Object) -> Result<Object, lopdf::Error> {
        match obj {
            Object::Reference(id) => Ok(Object::Reference(self.copy_object(id)?)),
            Object::Array(arr) => {
                let new_arr = arr
                    .into_iter()
                    .map(|o| self.remap_references(o))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Object::Array(new_arr))
            }
            Object::Dictionary(mut dict) => {
                for (_, value) in dict.iter_mut() {
                    *value = self.remap_references(value.clone())?;
                }
                Ok(Object::Dictionary(dict))
            }
            Object::Stream(mut stream) => {
                for (_, value) in stream.dict.iter_mut() {
                    *value = self.remap_references(value.clone())?;
                }
                Ok(Object::Stream(stream))
            }
            _ => Ok(obj),
        }
    }
}

fn pages_root(doc: &Document) -> Result<ObjectId, lopdf::Error> {
    let root_id = doc.trailer.get(b"Root")?.as_reference()?;
    doc.get_dictionary(root_id)?.get(b"Pages")?.as_reference()
}

/// Appends every page of `source` to the end of `target`.
///
/// Returns the ids of the copied pages in `target`, in order.
pub fn append_document(target: &mut Document, source: &Document) -> Result<Vec<ObjectId>, ComposerError> {
    let source_pages = source.get_pages();
    if source_pages.is_empty() {
        return Ok(Vec::new());
    }

    let mut copier = ObjectCopier::new(source, target);
    let mut copied = Vec::with_capacity(source_pages.len());
    // get_pages is keyed by page number, so iteration is already in page order.
    for page_id in source_pages.values() {
        copied.push(copier.copy_page(*page_id)?);
    }

    let pages_id = pages_root(target)?;
    for page_id in &copied {
        target
            .get_object_mut(*page_id)?
            .as_dict_mut()?
            .set("Parent", Object::Reference(pages_id));
    }

    let pages_dict = target.get_object_mut(pages_id)?.as_dict_mut()?;
    let mut kids = pages_dict.get(b"Kids")?.as_array()?.clone();
    let count = pages_dict.get(b"Count")?.as_i64()?;
    kids.extend(copied.iter().map(|id| Object::Reference(*id)));
    pages_dict.set("Kids", Object::Array(kids));
    pages_dict.set("Count", count + copied.len() as i64);

    Ok(copied)
}

/// Concatenates `parts` in order and bookmarks the first page of each.
///
/// The first document becomes the base; its objects are kept as they are.
pub fn concat_documents(parts: Vec<TitledDocument>) -> Result<Document, ComposerError> {
    let mut parts = parts.into_iter();
    let first = parts.next().ok_or(ComposerError::Empty)?;
    let mut target = first.document;

    let mut bookmarks = Vec::new();
    if let Some(first_page) = target.get_pages().values().next() {
        bookmarks.push((first.title, *first_page));
    }
    for part in parts {
        let copied = append_document(&mut target, &part.document)?;
        match copied.first() {
            Some(first_page) => bookmarks.push((part.title, *first_page)),
            None => log::debug!("Part '{}' has no pages; nothing appended", part.title),
        }
    }

    add_outline(&mut target, &bookmarks)?;
    log::debug!(
        "Concatenated {} parts into {} pages",
        bookmarks.len(),
        target.get_pages().len()
    );
    Ok(target)
}

/// Encodes an outline title: literal for ASCII, UTF-16BE with a byte-order mark otherwise.
fn text_string(s: &str) -> Object {
    if s.is_ascii() {
        return Object::String(s.as_bytes().to_vec(), StringFormat::Literal);
    }
    let mut bytes = vec![0xFE, 0xFF];
    for unit in s.encode_utf16() {
        bytes.extend_from_slice(&unit.to_be_bytes());
    }
    Object::String(bytes, StringFormat::Hexadecimal)
}

/// Writes a flat outline with one entry per `(title, page)` and links it from the catalog.
fn add_outline(doc: &mut Document, entries: &[(String, ObjectId)]) -> Result<(), ComposerError> {
    if entries.is_empty() {
        return Ok(());
    }
    let outlines_id = doc.new_object_id();
    let item_ids: Vec<ObjectId> = entries.iter().map(|_| doc.new_object_id()).collect();

    for (i, (title, page_id)) in entries.iter().enumerate() {
        let mut item = dictionary! {
            "Title" => text_string(title),
            "Parent" => outlines_id,
            "Dest" => vec![Object::Reference(*page_id), "Fit".into()],
        };
        if i > 0 {
            item.set("Prev", item_ids[i - 1]);
        }
        if let Some(next) = item_ids.get(i + 1) {
            item.set("Next", *next);
        }
        doc.objects.insert(item_ids[i], Object::Dictionary(item));
    }

    doc.objects.insert(
        outlines_id,
        Object::Dictionary(dictionary! {
            "Type" => "Outlines",
            "First" => item_ids[0],
            "Last" => item_ids[item_ids.len() - 1],
            "Count" => item_ids.len() as i64,
        }),
    );

    let root_id = doc.trailer.get(b"Root")?.as_reference()?;
    let catalog = doc.get_object_mut(root_id)?.as_dict_mut()?;
    catalog.set("Outlines", outlines_id);
    catalog.set("PageMode", "UseOutlines");
    Ok(())
}
