//! DrawingML shapes for one slide's shape tree.

use crate::geometry::Frame;
use powerdeck_ooxml::{OoxmlError, XmlBuilder};
use powerdeck_types::Color;

pub(crate) const DRAWING_NS: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
pub(crate) const PRESENTATION_NS: &str = "http://schemas.openxmlformats.org/presentationml/2006/main";
pub(crate) const RELATIONSHIPS_NS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

pub(crate) fn namespaces() -> [(&'static str, &'static str); 3] {
    [
        ("xmlns:a", DRAWING_NS),
        ("xmlns:r", RELATIONSHIPS_NS),
        ("xmlns:p", PRESENTATION_NS),
    ]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TextAlign {
    Left,
    Center,
    Right,
}

impl TextAlign {
    fn attr(self) -> &'static str {
        match self {
            TextAlign::Left => "l",
            TextAlign::Center => "ctr",
            TextAlign::Right => "r",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct TextStyle {
    /// Points.
    pub size: u32,
    pub bold: bool,
    pub color: Color,
    pub align: TextAlign,
}

/// Writes the empty group header every shape tree starts with.
pub(crate) fn group_header(xml: &mut XmlBuilder) {
    xml.start("p:nvGrpSpPr", &[])
        .empty("p:cNvPr", &[("id", "1"), ("name", "")])
        .empty("p:cNvGrpSpPr", &[])
        .empty("p:nvPr", &[])
        .end("p:nvGrpSpPr")
        .start("p:grpSpPr", &[])
        .start("a:xfrm", &[])
        .empty("a:off", &[("x", "0"), ("y", "0")])
        .empty("a:ext", &[("cx", "0"), ("cy", "0")])
        .empty("a:chOff", &[("x", "0"), ("y", "0")])
        .empty("a:chExt", &[("cx", "0"), ("cy", "0")])
        .end("a:xfrm")
        .end("p:grpSpPr");
}

fn transform(xml: &mut XmlBuilder, frame: &Frame) {
    let (x, y, cx, cy) = (
        frame.x.to_string(),
        frame.y.to_string(),
        frame.cx.to_string(),
        frame.cy.to_string(),
    );
    xml.start("a:xfrm", &[])
        .empty("a:off", &[("x", x.as_str()), ("y", y.as_str())])
        .empty("a:ext", &[("cx", cx.as_str()), ("cy", cy.as_str())])
        .end("a:xfrm")
        .start("a:prstGeom", &[("prst", "rect")])
        .empty("a:avLst", &[])
        .end("a:prstGeom");
}

fn solid_fill(xml: &mut XmlBuilder, color: Color) {
    let hex = color.hex();
    xml.start("a:solidFill", &[])
        .empty("a:srgbClr", &[("val", hex.as_str())])
        .end("a:solidFill");
}

/// Builds `ppt/slides/slideN.xml`. Shape ids are assigned in drawing order.
pub(crate) struct SlideXml {
    xml: XmlBuilder,
    next_id: u32,
}

impl SlideXml {
    pub fn new() -> Self {
        let mut xml = XmlBuilder::new();
        xml.start("p:sld", &namespaces()).start("p:cSld", &[]).start("p:spTree", &[]);
        group_header(&mut xml);
        Self { xml, next_id: 2 }
    }

    fn non_visual(&mut self, kind: &str) -> (String, String) {
        let id = self.next_id;
        self.next_id += 1;
        (id.to_string(), format!("{} {}", kind, id - 1))
    }

    pub fn rect(&mut self, frame: &Frame, fill: Color) {
        let (id, name) = self.non_visual("Rectangle");
        let xml = &mut self.xml;
        xml.start("p:sp", &[])
            .start("p:nvSpPr", &[])
            .empty("p:cNvPr", &[("id", id.as_str()), ("name", name.as_str())])
            .empty("p:cNvSpPr", &[])
            .empty("p:nvPr", &[])
            .end("p:nvSpPr")
            .start("p:spPr", &[]);
        transform(xml, frame);
        solid_fill(xml, fill);
        xml.start("a:ln", &[]).empty("a:noFill", &[]).end("a:ln").end("p:spPr").end("p:sp");
    }

    /// A text box with one paragraph per line, all in `style`. Blank lines are skipped.
    pub fn text_box<S: AsRef<str>>(&mut self, frame: &Frame, lines: &[S], style: TextStyle) {
        let (id, name) = self.non_visual("TextBox");
        let size = (style.size * 100).to_string();
        let xml = &mut self.xml;
        xml.start("p:sp", &[])
            .start("p:nvSpPr", &[])
            .empty("p:cNvPr", &[("id", id.as_str()), ("name", name.as_str())])
            .empty("p:cNvSpPr", &[("txBox", "1")])
            .empty("p:nvPr", &[])
            .end("p:nvSpPr")
            .start("p:spPr", &[]);
        transform(xml, frame);
        xml.empty("a:noFill", &[]).end("p:spPr");

        xml.start("p:txBody", &[])
            .start("a:bodyPr", &[("wrap", "square"), ("rtlCol", "0")])
            .empty("a:normAutofit", &[])
            .end("a:bodyPr")
            .empty("a:lstStyle", &[]);
        let mut wrote = false;
        for line in lines.iter().map(|l| -> &str { l.as_ref() }).filter(|l| !l.trim().is_empty()) {
            let mut attrs = vec![("lang", "en-US"), ("sz", size.as_str())];
            if style.bold {
                attrs.push(("b", "1"));
            }
            xml.start("a:p", &[])
                .empty("a:pPr", &[("algn", style.align.attr())])
                .start("a:r", &[])
                .start("a:rPr", &attrs);
            solid_fill(xml, style.color);
            xml.end("a:rPr").element("a:t", &[], line).end("a:r").end("a:p");
            wrote = true;
        }
        if !wrote {
            // A text body needs at least one paragraph.
            xml.start("a:p", &[]).empty("a:endParaRPr", &[("lang", "en-US")]).end("a:p");
        }
        xml.end("p:txBody").end("p:sp");
    }

    /// Places the image behind relationship `rel_id`.
    pub fn picture(&mut self, frame: &Frame, rel_id: &str) {
        let (id, name) = self.non_visual("Picture");
        let xml = &mut self.xml;
        xml.start("p:pic", &[])
            .start("p:nvPicPr", &[])
            .empty("p:cNvPr", &[("id", id.as_str()), ("name", name.as_str())])
            .start("p:cNvPicPr", &[])
            .empty("a:picLocks", &[("noChangeAspect", "1")])
            .end("p:cNvPicPr")
            .empty("p:nvPr", &[])
            .end("p:nvPicPr")
            .start("p:blipFill", &[])
            .empty("a:blip", &[("r:embed", rel_id)])
            .start("a:stretch", &[])
            .empty("a:fillRect", &[])
            .end("a:stretch")
            .end("p:blipFill")
            .start("p:spPr", &[]);
        transform(xml, frame);
        xml.end("p:spPr").end("p:pic");
    }

    pub fn finish(mut self) -> Result<Vec<u8>, OoxmlError> {
        self.xml
            .end("p:spTree")
            .end("p:cSld")
            .start("p:clrMapOvr", &[])
            .empty("a:masterClrMapping", &[])
            .end("p:clrMapOvr")
            .end("p:sld");
        self.xml.finish()
    }
}
