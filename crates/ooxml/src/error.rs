use thiserror::Error;

#[derive(Error, Debug)]
pub enum OoxmlError {
    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("XML error: {0}")]
    Xml(String),
    #[error("duplicate part '{0}'")]
    DuplicatePart(String),
}
