//! Writing Office Open XML packages.
//!
//! An OOXML file is a zip archive of XML parts tied together by
//! `[Content_Types].xml` and `_rels/*.rels` relationship parts. This crate
//! knows nothing about documents or slides; it assembles parts produced by
//! the DOCX and PPTX writers.

mod error;
mod package;
mod rels;
mod xml;

pub use error::OoxmlError;
pub use package::{content_types, PackageWriter};
pub use rels::{rel_types, Relationships};
pub use xml::{xml_safe, XmlBuilder};
