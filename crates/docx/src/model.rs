#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Align {
    #[default]
    Left,
    Center,
}

/// A run of uniformly formatted text. `\n` inside `text` is a line break.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Run {
    pub text: String,
    pub bold: bool,
    /// Font size in points; `None` keeps the document default.
    pub size: Option<f32>,
}

impl Run {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn bold(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: true,
            size: None,
        }
    }

    pub fn sized(mut self, size: f32) -> Self {
        self.size = Some(size);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Paragraph {
    pub runs: Vec<Run>,
    pub align: Align,
    /// Extra space below the paragraph, in points.
    pub space_after: Option<f32>,
}

impl Paragraph {
    pub fn new(runs: Vec<Run>) -> Self {
        Self {
            runs,
            ..Default::default()
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self::new(vec![Run::plain(text)])
    }

    pub fn centered(mut self) -> Self {
        self.align = Align::Center;
        self
    }

    pub fn space_after(mut self, points: f32) -> Self {
        self.space_after = Some(points);
        self
    }

    /// The concatenated text of every run.
    pub fn plain_text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }
}

/// An ordered list of paragraphs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NarrativeDocument {
    pub paragraphs: Vec<Paragraph>,
}

impl NarrativeDocument {
    pub fn push(&mut self, paragraph: Paragraph) {
        self.paragraphs.push(paragraph);
    }

    pub fn plain_lines(&self) -> Vec<String> {
        self.paragraphs.iter().map(Paragraph::plain_text).collect()
    }
}
