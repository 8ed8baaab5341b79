use crate::error::OoxmlError;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::borrow::Cow;

/// Whether `c` may appear in an XML 1.0 document.
fn is_xml_char(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\r' | '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}' | '\u{10000}'..='\u{10FFFF}')
}

/// Drops characters XML 1.0 cannot carry, such as C0 controls other than tab and line breaks.
pub fn xml_safe(s: &str) -> Cow<'_, str> {
    if s.chars().all(is_xml_char) {
        Cow::Borrowed(s)
    } else {
        Cow::Owned(s.chars().filter(|&c| is_xml_char(c)).collect())
    }
}

/// Streaming XML writer for package parts.
///
/// Calls chain; the first write error is kept and reported by [`XmlBuilder::finish`].
pub struct XmlBuilder {
    writer: Writer<Vec<u8>>,
    error: Option<OoxmlError>,
}

impl Default for XmlBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl XmlBuilder {
    /// Starts a standalone UTF-8 part.
    pub fn new() -> Self {
        let mut builder = Self {
            writer: Writer::new(Vec::new()),
            error: None,
        };
        builder.write(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))));
        builder
    }

    fn write(&mut self, event: Event<'_>) {
        if self.error.is_some() {
            return;
        }
        if let Err(e) = self.writer.write_event(event) {
            self.error = Some(OoxmlError::Xml(e.to_string()));
        }
    }

    pub fn start(&mut self, name: &str, attrs: &[(&str, &str)]) -> &mut Self {
        self.write(Event::Start(tag(name, attrs)));
        self
    }

    pub fn end(&mut self, name: &str) -> &mut Self {
        self.write(Event::End(BytesEnd::new(name)));
        self
    }

    pub fn empty(&mut self, name: &str, attrs: &[(&str, &str)]) -> &mut Self {
        self.write(Event::Empty(tag(name, attrs)));
        self
    }

    /// Escaped character data. Characters XML cannot carry are dropped.
    pub fn text(&mut self, text: &str) -> &mut Self {
        let text = xml_safe(text);
        self.write(Event::Text(BytesText::new(&text)));
        self
    }

    /// `<name attrs>text</name>`
    pub fn element(&mut self, name: &str, attrs: &[(&str, &str)], text: &str) -> &mut Self {
        self.start(name, attrs).text(text).end(name)
    }

    pub fn finish(self) -> Result<Vec<u8>, OoxmlError> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.writer.into_inner()),
        }
    }
}

fn tag<'a>(name: &'a str, attrs: &[(&str, &str)]) -> BytesStart<'a> {
    let mut tag = BytesStart::new(name);
    for (key, value) in attrs {
        tag.push_attribute((*key, xml_safe(value).as_ref()));
    }
    tag
}
