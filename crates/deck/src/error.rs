use powerdeck_ooxml::OoxmlError;
use powerdeck_raster::RasterError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeckError {
    #[error("package error: {0}")]
    Package(#[from] OoxmlError),

    #[error("image error: {0}")]
    Image(#[from] RasterError),
}
