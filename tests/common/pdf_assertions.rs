use lopdf::{Document as LopdfDocument, Object};

/// Operations of a page's content stream, in order.
fn page_operations(doc: &LopdfDocument, page_num: u32) -> Vec<lopdf::content::Operation> {
    let pages = doc.get_pages();
    let Some(page_id) = pages.get(&page_num) else {
        return Vec::new();
    };
    doc.get_and_decode_page_content(*page_id)
        .map(|content| content.operations)
        .unwrap_or_default()
}

/// Every string shown with `Tj` on a page, decoded lossily.
pub fn page_strings(doc: &LopdfDocument, page_num: u32) -> Vec<String> {
    page_operations(doc, page_num)
        .into_iter()
        .filter(|op| op.operator == "Tj")
        .filter_map(|op| match op.operands.first() {
            Some(Object::String(bytes, _)) => Some(String::from_utf8_lossy(bytes).into_owned()),
            _ => None,
        })
        .collect()
}

/// How many XObjects a page paints with `Do`.
pub fn drawn_images(doc: &LopdfDocument, page_num: u32) -> usize {
    page_operations(doc, page_num)
        .iter()
        .filter(|op| op.operator == "Do")
        .count()
}

/// Titles of the top-level outline entries, in order.
pub fn outline_titles(doc: &LopdfDocument) -> Vec<String> {
    let mut titles = Vec::new();
    let Ok(catalog) = doc.catalog() else {
        return titles;
    };
    let first = catalog
        .get(b"Outlines")
        .and_then(Object::as_reference)
        .and_then(|id| doc.get_dictionary(id))
        .and_then(|outlines| outlines.get(b"First"))
        .and_then(Object::as_reference);

    let mut next = first.ok();
    while let Some(id) = next {
        let Ok(item) = doc.get_dictionary(id) else { break };
        if let Ok(Object::String(bytes, _)) = item.get(b"Title") {
            titles.push(decode_text_string(bytes));
        }
        next = item.get(b"Next").and_then(Object::as_reference).ok();
    }
    titles
}

fn decode_text_string(bytes: &[u8]) -> String {
    match bytes.strip_prefix(&[0xFE, 0xFF]) {
        Some(utf16) => {
            let units: Vec<u16> = utf16.chunks(2).map(|c| u16::from_be_bytes([c[0], *c.get(1).unwrap_or(&0)])).collect();
            String::from_utf16_lossy(&units)
        }
        None => String::from_utf8_lossy(bytes).into_owned(),
    }
}

pub fn assert_page_count(doc: &LopdfDocument, expected: usize) {
    assert_eq!(doc.get_pages().len(), expected, "unexpected page count");
}
