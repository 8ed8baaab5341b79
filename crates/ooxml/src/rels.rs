use crate::error::OoxmlError;
use crate::xml::XmlBuilder;

const RELATIONSHIPS_NS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";

/// Relationship type URIs.
pub mod rel_types {
    pub const OFFICE_DOCUMENT: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
    pub const SLIDE: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide";
    pub const SLIDE_LAYOUT: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout";
    pub const SLIDE_MASTER: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster";
    pub const THEME: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme";
    pub const IMAGE: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/image";
    pub const STYLES: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles";
    pub const CORE_PROPERTIES: &str =
        "http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties";
}

/// The contents of one `.rels` part. Ids are assigned in insertion order: `rId1`, `rId2`, ...
#[derive(Debug, Clone, Default)]
pub struct Relationships {
    entries: Vec<(String, String)>,
}

impl Relationships {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a relationship and returns its id.
    pub fn add(&mut self, rel_type: &str, target: &str) -> String {
        self.entries.push((rel_type.to_string(), target.to_string()));
        format!("rId{}", self.entries.len())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn to_xml(&self) -> Result<Vec<u8>, OoxmlError> {
        let mut xml = XmlBuilder::new();
        xml.start("Relationships", &[("xmlns", RELATIONSHIPS_NS)]);
        for (i, (rel_type, target)) in self.entries.iter().enumerate() {
            let id = format!("rId{}", i + 1);
            xml.empty(
                "Relationship",
                &[("Id", id.as_str()), ("Type", rel_type.as_str()), ("Target", target.as_str())],
            );
        }
        xml.end("Relationships");
        xml.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_follow_insertion_order() {
        let mut rels = Relationships::new();
        assert_eq!(rels.add(rel_types::SLIDE_LAYOUT, "../slideLayouts/slideLayout1.xml"), "rId1");
        assert_eq!(rels.add(rel_types::IMAGE, "../media/image1.png"), "rId2");

        let xml = String::from_utf8(rels.to_xml().unwrap()).unwrap();
        assert!(xml.contains(r#"<Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/image" Target="../media/image1.png"/>"#));
    }
}
