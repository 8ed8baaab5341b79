//! Narrative documents: a letter-style DOCX that walks through every chart
//! of a section (or of the consolidated report) in plain sentences.
//!
//! The document is first built as a small block model ([`NarrativeDocument`])
//! and then serialized by [`write_docx`].

mod build;
mod error;
mod model;
mod writer;

pub use build::{ChartSection, DocumentVoice};
pub use error::DocxError;
pub use model::{Align, NarrativeDocument, Paragraph, Run};
pub use writer::{write_docx, DOCX_MIME};
