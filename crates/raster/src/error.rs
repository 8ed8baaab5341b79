use thiserror::Error;

#[derive(Error, Debug)]
pub enum RasterError {
    #[error("preset '{preset}' needs {pixels} pixels, above the limit of {limit}")]
    TooLarge {
        preset: String,
        pixels: u64,
        limit: u64,
    },
    #[error("invalid preset '{0}': width, height and scale must be positive")]
    InvalidPreset(String),
    #[error("drawing failed: {0}")]
    Draw(String),
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("bitmap buffer holds {actual} bytes, expected {expected}")]
    BufferSize { expected: usize, actual: usize },
    #[error("no preset could rasterize chart '{chart}' ({attempts} attempts)")]
    Exhausted { chart: String, attempts: usize },
}
