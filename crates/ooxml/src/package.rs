use crate::error::OoxmlError;
use crate::xml::XmlBuilder;
use std::collections::{BTreeMap, HashSet};
use std::io::{Cursor, Write};
use zip::write::{SimpleFileOptions, ZipWriter};
use zip::CompressionMethod;

const CONTENT_TYPES_NS: &str = "http://schemas.openxmlformats.org/package/2006/content-types";

/// Content types of the parts the writers emit.
pub mod content_types {
    pub const RELATIONSHIPS: &str = "application/vnd.openxmlformats-package.relationships+xml";
    pub const XML: &str = "application/xml";
    pub const PNG: &str = "image/png";
    pub const WORD_DOCUMENT: &str =
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml";
    pub const WORD_STYLES: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml";
    pub const PRESENTATION: &str =
        "application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml";
    pub const SLIDE: &str = "application/vnd.openxmlformats-officedocument.presentationml.slide+xml";
    pub const SLIDE_LAYOUT: &str = "application/vnd.openxmlformats-officedocument.presentationml.slideLayout+xml";
    pub const SLIDE_MASTER: &str = "application/vnd.openxmlformats-officedocument.presentationml.slideMaster+xml";
    pub const THEME: &str = "application/vnd.openxmlformats-officedocument.theme+xml";
    pub const CORE_PROPERTIES: &str = "application/vnd.openxmlformats-package.core-properties+xml";
}

/// Collects parts and writes them as a zip package with a generated
/// `[Content_Types].xml` as the first entry.
#[derive(Debug)]
pub struct PackageWriter {
    parts: Vec<(String, Vec<u8>)>,
    names: HashSet<String>,
    defaults: BTreeMap<String, String>,
    overrides: Vec<(String, String)>,
}

impl Default for PackageWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl PackageWriter {
    pub fn new() -> Self {
        let mut defaults = BTreeMap::new();
        defaults.insert("rels".to_string(), content_types::RELATIONSHIPS.to_string());
        defaults.insert("xml".to_string(), content_types::XML.to_string());
        Self {
            parts: Vec::new(),
            names: HashSet::new(),
            defaults,
            overrides: Vec::new(),
        }
    }

    /// Registers a content type for every part with `extension`.
    pub fn add_default(&mut self, extension: &str, content_type: &str) {
        self.defaults.insert(extension.to_string(), content_type.to_string());
    }

    /// Adds a part. `content_type` becomes an override; `None` relies on the extension default.
    pub fn add_part(&mut self, name: &str, content_type: Option<&str>, bytes: Vec<u8>) -> Result<(), OoxmlError> {
        let name = name.trim_start_matches('/');
        if !self.names.insert(name.to_string()) {
            return Err(OoxmlError::DuplicatePart(name.to_string()));
        }
        if let Some(content_type) = content_type {
            self.overrides.push((format!("/{}", name), content_type.to_string()));
        }
        self.parts.push((name.to_string(), bytes));
        Ok(())
    }

    pub fn part_names(&self) -> impl Iterator<Item = &str> {
        self.parts.iter().map(|(name, _)| name.as_str())
    }

    fn content_types_xml(&self) -> Result<Vec<u8>, OoxmlError> {
        let mut xml = XmlBuilder::new();
        xml.start("Types", &[("xmlns", CONTENT_TYPES_NS)]);
        for (extension, content_type) in &self.defaults {
            xml.empty("Default", &[("Extension", extension.as_str()), ("ContentType", content_type.as_str())]);
        }
        for (part, content_type) in &self.overrides {
            xml.empty("Override", &[("PartName", part.as_str()), ("ContentType", content_type.as_str())]);
        }
        xml.end("Types");
        xml.finish()
    }

    pub fn finish(self) -> Result<Vec<u8>, OoxmlError> {
        let content_types = self.content_types_xml()?;
        let mut buffer = Cursor::new(Vec::new());
        {
            let mut zip = ZipWriter::new(&mut buffer);
            let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

            zip.start_file("[Content_Types].xml", options)?;
            zip.write_all(&content_types)?;
            for (name, bytes) in &self.parts {
                zip.start_file(name.as_str(), options)?;
                zip.write_all(bytes)?;
            }
            zip.finish()?;
        }
        let bytes = buffer.into_inner();
        log::debug!("Wrote OOXML package: {} parts, {} bytes", self.parts.len() + 1, bytes.len());
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use zip::ZipArchive;

    #[test]
    fn content_types_come_first_and_list_overrides() {
        let mut package = PackageWriter::new();
        package.add_default("png", content_types::PNG);
        package
            .add_part("/word/document.xml", Some(content_types::WORD_DOCUMENT), b"<w:document/>".to_vec())
            .unwrap();
        package.add_part("media/image1.png", None, vec![1, 2, 3]).unwrap();
        let bytes = package.finish().unwrap();

        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        assert_eq!(archive.len(), 3);
        assert_eq!(archive.by_index(0).unwrap().name(), "[Content_Types].xml");

        let mut types = String::new();
        archive.by_name("[Content_Types].xml").unwrap().read_to_string(&mut types).unwrap();
        assert!(types.contains(r#"<Default Extension="png" ContentType="image/png"/>"#));
        assert!(types.contains(r#"PartName="/word/document.xml""#));
        assert!(!types.contains(r#"PartName="/media/image1.png""#));
    }

    #[test]
    fn duplicate_parts_are_rejected() {
        let mut package = PackageWriter::new();
        package.add_part("a.xml", None, vec![]).unwrap();
        assert!(matches!(package.add_part("/a.xml", None, vec![]), Err(OoxmlError::DuplicatePart(_))));
    }
}
