use powerdeck_ooxml::OoxmlError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DocxError {
    #[error("package error: {0}")]
    Package(#[from] OoxmlError),
}
