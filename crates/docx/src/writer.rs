use crate::error::DocxError;
use crate::model::{Align, NarrativeDocument, Paragraph, Run};
use powerdeck_ooxml::{content_types, rel_types, PackageWriter, Relationships, XmlBuilder};

pub const DOCX_MIME: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

const WORDPROCESSING_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
const RELATIONSHIPS_NS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

// A4 portrait in twentieths of a point, 1" margins.
const PAGE_WIDTH: &str = "11906";
const PAGE_HEIGHT: &str = "16838";
const PAGE_MARGIN: &str = "1440";

/// Serializes `document` as a `.docx` package.
pub fn write_docx(document: &NarrativeDocument) -> Result<Vec<u8>, DocxError> {
    let mut root_rels = Relationships::new();
    root_rels.add(rel_types::OFFICE_DOCUMENT, "word/document.xml");

    let mut document_rels = Relationships::new();
    document_rels.add(rel_types::STYLES, "styles.xml");

    let mut package = PackageWriter::new();
    package.add_part("_rels/.rels", None, root_rels.to_xml()?)?;
    package.add_part(
        "word/document.xml",
        Some(content_types::WORD_DOCUMENT),
        document_xml(document)?,
    )?;
    package.add_part("word/_rels/document.xml.rels", None, document_rels.to_xml()?)?;
    package.add_part("word/styles.xml", Some(content_types::WORD_STYLES), styles_xml()?)?;

    log::debug!("Writing DOCX with {} paragraphs", document.paragraphs.len());
    Ok(package.finish()?)
}

fn document_xml(document: &NarrativeDocument) -> Result<Vec<u8>, DocxError> {
    let mut xml = XmlBuilder::new();
    xml.start("w:document", &[("xmlns:w", WORDPROCESSING_NS), ("xmlns:r", RELATIONSHIPS_NS)])
        .start("w:body", &[]);
    for paragraph in &document.paragraphs {
        write_paragraph(&mut xml, paragraph);
    }
    xml.start("w:sectPr", &[])
        .empty("w:pgSz", &[("w:w", PAGE_WIDTH), ("w:h", PAGE_HEIGHT)])
        .empty(
            "w:pgMar",
            &[
                ("w:top", PAGE_MARGIN),
                ("w:right", PAGE_MARGIN),
                ("w:bottom", PAGE_MARGIN),
                ("w:left", PAGE_MARGIN),
                ("w:header", "708"),
                ("w:footer", "708"),
                ("w:gutter", "0"),
            ],
        )
        .end("w:sectPr")
        .end("w:body")
        .end("w:document");
    Ok(xml.finish()?)
}

fn write_paragraph(xml: &mut XmlBuilder, paragraph: &Paragraph) {
    xml.start("w:p", &[]);
    if paragraph.align != Align::Left || paragraph.space_after.is_some() {
        xml.start("w:pPr", &[]);
        if let Some(points) = paragraph.space_after {
            let twips = ((points * 20.0).round() as u32).to_string();
            xml.empty("w:spacing", &[("w:after", twips.as_str())]);
        }
        if paragraph.align == Align::Center {
            xml.empty("w:jc", &[("w:val", "center")]);
        }
        xml.end("w:pPr");
    }
    for run in &paragraph.runs {
        write_run(xml, run);
    }
    xml.end("w:p");
}

fn write_run(xml: &mut XmlBuilder, run: &Run) {
    xml.start("w:r", &[]);
    if run.bold || run.size.is_some() {
        xml.start("w:rPr", &[]);
        if run.bold {
            xml.empty("w:b", &[]);
        }
        if let Some(size) = run.size {
            let half_points = ((size * 2.0).round() as u32).to_string();
            xml.empty("w:sz", &[("w:val", half_points.as_str())]);
        }
        xml.end("w:rPr");
    }
    for (i, line) in run.text.split('\n').enumerate() {
        if i > 0 {
            xml.empty("w:br", &[]);
        }
        if !line.is_empty() {
            xml.element("w:t", &[("xml:space", "preserve")], line);
        }
    }
    xml.end("w:r");
}

fn styles_xml() -> Result<Vec<u8>, DocxError> {
    let mut xml = XmlBuilder::new();
    xml.start("w:styles", &[("xmlns:w", WORDPROCESSING_NS)])
        .start("w:docDefaults", &[])
        .start("w:rPrDefault", &[])
        .start("w:rPr", &[])
        .empty("w:rFonts", &[("w:ascii", "Calibri"), ("w:hAnsi", "Calibri"), ("w:cs", "Calibri")])
        .empty("w:sz", &[("w:val", "22")])
        .end("w:rPr")
        .end("w:rPrDefault")
        .start("w:pPrDefault", &[])
        .start("w:pPr", &[])
        .empty("w:spacing", &[("w:after", "120"), ("w:line", "264"), ("w:lineRule", "auto")])
        .end("w:pPr")
        .end("w:pPrDefault")
        .end("w:docDefaults")
        .start("w:style", &[("w:type", "paragraph"), ("w:default", "1"), ("w:styleId", "Normal")])
        .empty("w:name", &[("w:val", "Normal")])
        .end("w:style")
        .end("w:styles");
    Ok(xml.finish()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Read};
    use zip::ZipArchive;

    fn read_part(bytes: &[u8], name: &str) -> String {
        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut out = String::new();
        archive.by_name(name).unwrap().read_to_string(&mut out).unwrap();
        out
    }

    #[test]
    fn package_contains_the_word_parts() {
        let mut doc = NarrativeDocument::default();
        doc.push(Paragraph::text("Hello"));
        let bytes = write_docx(&doc).unwrap();

        let archive = ZipArchive::new(Cursor::new(bytes.as_slice())).unwrap();
        let names: Vec<&str> = archive.file_names().collect();
        for part in [
            "[Content_Types].xml",
            "_rels/.rels",
            "word/document.xml",
            "word/_rels/document.xml.rels",
            "word/styles.xml",
        ] {
            assert!(names.contains(&part), "missing {}", part);
        }
        assert!(read_part(&bytes, "_rels/.rels").contains(r#"Target="word/document.xml""#));
        assert!(read_part(&bytes, "[Content_Types].xml").contains(r#"PartName="/word/document.xml""#));
    }

    #[test]
    fn runs_carry_formatting_and_line_breaks() {
        let mut doc = NarrativeDocument::default();
        doc.push(Paragraph::new(vec![Run::bold("Solar & Gas").sized(16.0)]).centered());
        doc.push(Paragraph::text("Regards,\nTeam").space_after(8.0));
        let bytes = write_docx(&doc).unwrap();
        let body = read_part(&bytes, "word/document.xml");

        assert!(body.contains(r#"<w:jc w:val="center"/>"#));
        assert!(body.contains(r#"<w:rPr><w:b/><w:sz w:val="32"/></w:rPr>"#));
        assert!(body.contains("Solar &amp; Gas"));
        assert!(body.contains(r#"<w:spacing w:after="160"/>"#));
        assert!(body.contains(
            r#"<w:t xml:space="preserve">Regards,</w:t><w:br/><w:t xml:space="preserve">Team</w:t>"#
        ));
        assert!(body.contains("<w:sectPr>"));
    }

    #[test]
    fn control_characters_in_chart_text_keep_the_part_well_formed() {
        let mut doc = NarrativeDocument::default();
        doc.push(Paragraph::new(vec![Run::bold("1. Solar\u{1}\u{b} kWh")]));
        let bytes = write_docx(&doc).unwrap();
        let body = read_part(&bytes, "word/document.xml");

        assert!(!body.chars().any(|c| c < ' ' && !matches!(c, '\t' | '\n' | '\r')));
        assert!(body.contains("1. Solar kWh"));

        let mut reader = quick_xml::Reader::from_str(&body);
        loop {
            match reader.read_event() {
                Ok(quick_xml::events::Event::Eof) => break,
                Ok(_) => {}
                Err(e) => panic!("document.xml is malformed: {}", e),
            }
        }
    }
}
