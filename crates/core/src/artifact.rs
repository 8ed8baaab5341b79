use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const PDF_MIME: &str = "application/pdf";
pub const DOCX_MIME: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub const PPTX_MIME: &str = "application/vnd.openxmlformats-officedocument.presentationml.presentation";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Pdf,
    Docx,
    Pptx,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 3] = [ExportFormat::Pdf, ExportFormat::Docx, ExportFormat::Pptx];

    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Pdf => "pdf",
            ExportFormat::Docx => "docx",
            ExportFormat::Pptx => "pptx",
        }
    }

    pub fn mime(self) -> &'static str {
        match self {
            ExportFormat::Pdf => PDF_MIME,
            ExportFormat::Docx => DOCX_MIME,
            ExportFormat::Pptx => PPTX_MIME,
        }
    }

    /// Whether this build can produce the format.
    pub fn is_available(self) -> bool {
        match self {
            ExportFormat::Pdf => true,
            ExportFormat::Docx => cfg!(feature = "docx"),
            ExportFormat::Pptx => cfg!(feature = "pptx"),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ExportFormat::Pdf => "PDF",
            ExportFormat::Docx => "DOCX",
            ExportFormat::Pptx => "PPTX",
        })
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pdf" => Ok(ExportFormat::Pdf),
            "docx" | "word" => Ok(ExportFormat::Docx),
            "pptx" | "ppt" => Ok(ExportFormat::Pptx),
            other => Err(format!("unknown export format '{}'", other)),
        }
    }
}

/// A finished export, ready to be written or downloaded.
#[derive(Debug, Clone)]
pub struct ExportArtifact {
    pub format: ExportFormat,
    pub file_name: String,
    pub mime: &'static str,
    pub bytes: Vec<u8>,
}

impl ExportArtifact {
    /// Names the file after a slug of `title`.
    pub fn new(format: ExportFormat, title: &str, bytes: Vec<u8>) -> Self {
        let mut stem = slug::slugify(title);
        if stem.is_empty() {
            stem = "export".to_string();
        }
        Self {
            format,
            file_name: format!("{}.{}", stem, format.extension()),
            mime: format.mime(),
            bytes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_names_are_slugged() {
        let artifact = ExportArtifact::new(ExportFormat::Pptx, "Solar Savings \u{2014} Powerhouse Dashboard", vec![]);
        assert_eq!(artifact.file_name, "solar-savings-powerhouse-dashboard.pptx");
        assert_eq!(artifact.mime, PPTX_MIME);
        assert_eq!(ExportArtifact::new(ExportFormat::Pdf, "\u{2014}", vec![]).file_name, "export.pdf");
    }

    #[test]
    fn formats_parse_case_insensitively() {
        assert_eq!("PDF".parse::<ExportFormat>(), Ok(ExportFormat::Pdf));
        assert_eq!("ppt".parse::<ExportFormat>(), Ok(ExportFormat::Pptx));
        assert!("xlsx".parse::<ExportFormat>().is_err());
        assert!(ExportFormat::Pdf.is_available());
    }
}
