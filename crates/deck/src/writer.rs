use crate::deck::{Deck, Picture, Slide, SlideContent};
use crate::error::DeckError;
use crate::geometry::SlideLayout;
use crate::parts::{presentation_xml, slide_layout_xml, slide_master_xml, theme_xml};
use crate::shapes::{SlideXml, TextAlign, TextStyle};
use powerdeck_ooxml::{content_types, rel_types, PackageWriter, Relationships};
use powerdeck_types::Color;

pub const PPTX_MIME: &str = "application/vnd.openxmlformats-officedocument.presentationml.presentation";

pub const IMAGE_UNAVAILABLE: &str = "Chart image unavailable for this figure.";

const SLATE_800: Color = Color::rgb(30, 41, 59);
const SLATE_600: Color = Color::rgb(71, 85, 105);
const SLATE_500: Color = Color::rgb(100, 116, 139);

/// Media parts written once and shared by every slide that shows them.
struct SharedMedia {
    left_logo: Option<String>,
    right_logo: Option<String>,
}

/// Serializes `deck` as a `.pptx` package.
pub fn write_pptx(deck: &Deck) -> Result<Vec<u8>, DeckError> {
    let layout = SlideLayout::default();
    let mut package = PackageWriter::new();
    package.add_default("png", content_types::PNG);

    let mut media_count = 0;
    let mut add_media = |package: &mut PackageWriter, picture: &Picture| -> Result<String, DeckError> {
        media_count += 1;
        let name = format!("image{}.png", media_count);
        package.add_part(&format!("ppt/media/{}", name), None, picture.png.clone())?;
        Ok(name)
    };

    let media = SharedMedia {
        left_logo: deck.brand.left_logo.as_ref().map(|p| add_media(&mut package, p)).transpose()?,
        right_logo: deck.brand.right_logo.as_ref().map(|p| add_media(&mut package, p)).transpose()?,
    };

    let mut presentation_rels = Relationships::new();
    let master_rel = presentation_rels.add(rel_types::SLIDE_MASTER, "slideMasters/slideMaster1.xml");
    presentation_rels.add(rel_types::THEME, "theme/theme1.xml");

    let mut slide_rel_ids = Vec::with_capacity(deck.slides.len());
    for slide in &deck.slides {
        let n = slide.index;
        let mut rels = Relationships::new();
        rels.add(rel_types::SLIDE_LAYOUT, "../slideLayouts/slideLayout1.xml");

        let chart_media = match &slide.content {
            SlideContent::Chart { image: Some(picture), .. } => Some(add_media(&mut package, picture)?),
            _ => None,
        };
        let xml = slide_xml(slide, deck, &layout, &media, chart_media.as_deref(), &mut rels)?;

        package.add_part(&format!("ppt/slides/slide{}.xml", n), Some(content_types::SLIDE), xml)?;
        package.add_part(&format!("ppt/slides/_rels/slide{}.xml.rels", n), None, rels.to_xml()?)?;
        slide_rel_ids.push(presentation_rels.add(rel_types::SLIDE, &format!("slides/slide{}.xml", n)));
    }

    let mut root_rels = Relationships::new();
    root_rels.add(rel_types::OFFICE_DOCUMENT, "ppt/presentation.xml");
    package.add_part("_rels/.rels", None, root_rels.to_xml()?)?;
    package.add_part(
        "ppt/presentation.xml",
        Some(content_types::PRESENTATION),
        presentation_xml(&master_rel, &slide_rel_ids)?,
    )?;
    package.add_part("ppt/_rels/presentation.xml.rels", None, presentation_rels.to_xml()?)?;

    let mut master_rels = Relationships::new();
    master_rels.add(rel_types::SLIDE_LAYOUT, "../slideLayouts/slideLayout1.xml");
    master_rels.add(rel_types::THEME, "../theme/theme1.xml");
    package.add_part(
        "ppt/slideMasters/slideMaster1.xml",
        Some(content_types::SLIDE_MASTER),
        slide_master_xml()?,
    )?;
    package.add_part("ppt/slideMasters/_rels/slideMaster1.xml.rels", None, master_rels.to_xml()?)?;

    let mut layout_rels = Relationships::new();
    layout_rels.add(rel_types::SLIDE_MASTER, "../slideMasters/slideMaster1.xml");
    package.add_part(
        "ppt/slideLayouts/slideLayout1.xml",
        Some(content_types::SLIDE_LAYOUT),
        slide_layout_xml()?,
    )?;
    package.add_part("ppt/slideLayouts/_rels/slideLayout1.xml.rels", None, layout_rels.to_xml()?)?;

    package.add_part(
        "ppt/theme/theme1.xml",
        Some(content_types::THEME),
        theme_xml(deck.brand.left_band, deck.brand.right_band)?,
    )?;

    log::debug!("Writing deck '{}': {} slides", deck.title, deck.slides.len());
    Ok(package.finish()?)
}

fn slide_xml(
    slide: &Slide,
    deck: &Deck,
    layout: &SlideLayout,
    media: &SharedMedia,
    chart_media: Option<&str>,
    rels: &mut Relationships,
) -> Result<Vec<u8>, DeckError> {
    let mut xml = SlideXml::new();

    xml.rect(&layout.left_band(), deck.brand.left_band);
    xml.rect(&layout.right_band(), deck.brand.right_band);
    if let Some(caption) = slide.header_caption() {
        xml.text_box(
            &layout.header_caption(),
            &[caption],
            TextStyle {
                size: 26,
                bold: true,
                color: Color::WHITE,
                align: TextAlign::Center,
            },
        );
    }
    for (logo, target, right) in [
        (&deck.brand.left_logo, &media.left_logo, false),
        (&deck.brand.right_logo, &media.right_logo, true),
    ] {
        if let (Some(picture), Some(name)) = (logo, target) {
            let rel = rels.add(rel_types::IMAGE, &format!("../media/{}", name));
            xml.picture(&layout.logo(picture.width, picture.height, right), &rel);
        }
    }

    let body = TextStyle {
        size: 18,
        bold: false,
        color: SLATE_800,
        align: TextAlign::Left,
    };
    match &slide.content {
        SlideContent::Title { title, subtitle } => {
            xml.text_box(
                &layout.hero_title(),
                &[title],
                TextStyle {
                    size: 40,
                    bold: true,
                    color: SLATE_800,
                    align: TextAlign::Center,
                },
            );
            xml.text_box(
                &layout.hero_subtitle(),
                &[subtitle],
                TextStyle {
                    size: 20,
                    bold: false,
                    color: SLATE_600,
                    align: TextAlign::Center,
                },
            );
        }
        SlideContent::Chart { image, .. } => match (image, chart_media) {
            (Some(picture), Some(name)) => {
                let rel = rels.add(rel_types::IMAGE, &format!("../media/{}", name));
                xml.picture(&layout.chart_area().fit(picture.width, picture.height), &rel);
            }
            _ => xml.text_box(&layout.body(), &[IMAGE_UNAVAILABLE], body),
        },
        SlideContent::Explanation { bullets, .. } | SlideContent::Conclusion { bullets } => {
            let lines: Vec<String> = bullets.iter().map(|b| format!("\u{2022} {}", b)).collect();
            xml.text_box(&layout.body(), &lines, body);
        }
    }

    xml.text_box(
        &layout.slide_number(),
        &[slide.footer()],
        TextStyle {
            size: 11,
            bold: false,
            color: SLATE_500,
            align: TextAlign::Right,
        },
    );
    Ok(xml.finish()?)
}
