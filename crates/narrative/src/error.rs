use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum NarrativeError {
    #[error("statistics for '{0}' are not finite")]
    NonFinite(String),
}
