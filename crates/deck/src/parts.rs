//! Package parts shared by every deck: presentation, master, layout and theme.

use crate::geometry::{SLIDE_HEIGHT, SLIDE_WIDTH};
use crate::shapes::{group_header, namespaces, DRAWING_NS};
use powerdeck_ooxml::{OoxmlError, XmlBuilder};
use powerdeck_types::Color;

// Slide ids start at 256; master and layout ids at 2^31.
const FIRST_SLIDE_ID: u32 = 256;
const MASTER_ID: &str = "2147483648";
const LAYOUT_ID: &str = "2147483649";

/// `ppt/presentation.xml`. `slide_rel_ids` are the presentation part's
/// relationship ids of the slides, in order.
pub(crate) fn presentation_xml(master_rel_id: &str, slide_rel_ids: &[String]) -> Result<Vec<u8>, OoxmlError> {
    let (cx, cy) = (SLIDE_WIDTH.to_string(), SLIDE_HEIGHT.to_string());
    let mut xml = XmlBuilder::new();
    let mut attrs = namespaces().to_vec();
    attrs.push(("saveSubsetFonts", "1"));
    xml.start("p:presentation", &attrs)
        .start("p:sldMasterIdLst", &[])
        .empty("p:sldMasterId", &[("id", MASTER_ID), ("r:id", master_rel_id)])
        .end("p:sldMasterIdLst");
    if !slide_rel_ids.is_empty() {
        xml.start("p:sldIdLst", &[]);
        for (i, rel_id) in slide_rel_ids.iter().enumerate() {
            let id = (FIRST_SLIDE_ID + i as u32).to_string();
            xml.empty("p:sldId", &[("id", id.as_str()), ("r:id", rel_id.as_str())]);
        }
        xml.end("p:sldIdLst");
    }
    xml.empty("p:sldSz", &[("cx", cx.as_str()), ("cy", cy.as_str())])
        .empty("p:notesSz", &[("cx", "6858000"), ("cy", "9144000")])
        .end("p:presentation");
    xml.finish()
}

/// `ppt/slideMasters/slideMaster1.xml` with a single blank layout (`rId1`).
pub(crate) fn slide_master_xml() -> Result<Vec<u8>, OoxmlError> {
    let mut xml = XmlBuilder::new();
    xml.start("p:sldMaster", &namespaces())
        .start("p:cSld", &[])
        .start("p:bg", &[])
        .start("p:bgRef", &[("idx", "1001")])
        .empty("a:schemeClr", &[("val", "bg1")])
        .end("p:bgRef")
        .end("p:bg")
        .start("p:spTree", &[]);
    group_header(&mut xml);
    xml.end("p:spTree")
        .end("p:cSld")
        .empty(
            "p:clrMap",
            &[
                ("bg1", "lt1"),
                ("tx1", "dk1"),
                ("bg2", "lt2"),
                ("tx2", "dk2"),
                ("accent1", "accent1"),
                ("accent2", "accent2"),
                ("accent3", "accent3"),
                ("accent4", "accent4"),
                ("accent5", "accent5"),
                ("accent6", "accent6"),
                ("hlink", "hlink"),
                ("folHlink", "folHlink"),
            ],
        )
        .start("p:sldLayoutIdLst", &[])
        .empty("p:sldLayoutId", &[("id", LAYOUT_ID), ("r:id", "rId1")])
        .end("p:sldLayoutIdLst")
        .end("p:sldMaster");
    xml.finish()
}

pub(crate) fn slide_layout_xml() -> Result<Vec<u8>, OoxmlError> {
    let mut xml = XmlBuilder::new();
    let mut attrs = namespaces().to_vec();
    attrs.extend([("type", "blank"), ("preserve", "1")]);
    xml.start("p:sldLayout", &attrs).start("p:cSld", &[("name", "Blank")]).start("p:spTree", &[]);
    group_header(&mut xml);
    xml.end("p:spTree")
        .end("p:cSld")
        .start("p:clrMapOvr", &[])
        .empty("a:masterClrMapping", &[])
        .end("p:clrMapOvr")
        .end("p:sldLayout");
    xml.finish()
}

/// `ppt/theme/theme1.xml`. The accents start with the two brand colors.
pub(crate) fn theme_xml(primary: Color, secondary: Color) -> Result<Vec<u8>, OoxmlError> {
    let scheme: [(&str, String); 12] = [
        ("a:dk1", "000000".to_string()),
        ("a:lt1", "FFFFFF".to_string()),
        ("a:dk2", "1E293B".to_string()),
        ("a:lt2", "F1F5F9".to_string()),
        ("a:accent1", primary.hex()),
        ("a:accent2", secondary.hex()),
        ("a:accent3", "F59E0B".to_string()),
        ("a:accent4", "0EA5A7".to_string()),
        ("a:accent5", "E11D48".to_string()),
        ("a:accent6", "22C55E".to_string()),
        ("a:hlink", secondary.hex()),
        ("a:folHlink", "8B5CF6".to_string()),
    ];

    let mut xml = XmlBuilder::new();
    xml.start("a:theme", &[("xmlns:a", DRAWING_NS), ("name", "Powerdeck")])
        .start("a:themeElements", &[])
        .start("a:clrScheme", &[("name", "Powerdeck")]);
    for (slot, hex) in &scheme {
        xml.start(slot, &[]).empty("a:srgbClr", &[("val", hex.as_str())]).end(slot);
    }
    xml.end("a:clrScheme").start("a:fontScheme", &[("name", "Powerdeck")]);
    for group in ["a:majorFont", "a:minorFont"] {
        xml.start(group, &[])
            .empty("a:latin", &[("typeface", "Calibri")])
            .empty("a:ea", &[("typeface", "")])
            .empty("a:cs", &[("typeface", "")])
            .end(group);
    }
    xml.end("a:fontScheme").start("a:fmtScheme", &[("name", "Powerdeck")]);

    // Each style list needs exactly three entries.
    xml.start("a:fillStyleLst", &[]);
    for _ in 0..3 {
        phantom_fill(&mut xml);
    }
    xml.end("a:fillStyleLst").start("a:lnStyleLst", &[]);
    for width in ["6350", "12700", "19050"] {
        xml.start("a:ln", &[("w", width)]);
        phantom_fill(&mut xml);
        xml.end("a:ln");
    }
    xml.end("a:lnStyleLst").start("a:effectStyleLst", &[]);
    for _ in 0..3 {
        xml.start("a:effectStyle", &[]).empty("a:effectLst", &[]).end("a:effectStyle");
    }
    xml.end("a:effectStyleLst").start("a:bgFillStyleLst", &[]);
    for _ in 0..3 {
        phantom_fill(&mut xml);
    }
    xml.end("a:bgFillStyleLst").end("a:fmtScheme").end("a:themeElements").end("a:theme");
    xml.finish()
}

fn phantom_fill(xml: &mut XmlBuilder) {
    xml.start("a:solidFill", &[])
        .empty("a:schemeClr", &[("val", "phClr")])
        .end("a:solidFill");
}
