use thiserror::Error;

#[derive(Error, Debug)]
pub enum ComposerError {
    #[error("PDF error while merging pages: {0}")]
    Pdf(#[from] lopdf::Error),

    /// `concat_documents` was given no parts.
    #[error("no documents to concatenate")]
    Empty,
}
