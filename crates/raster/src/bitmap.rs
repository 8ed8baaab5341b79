use crate::error::RasterError;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};
use powerdeck_types::Size;

/// An 8-bit RGB raster, row-major, no padding.
#[derive(Debug, Clone, PartialEq)]
pub struct Bitmap {
    pub width: u32,
    pub height: u32,
    pub rgb: Vec<u8>,
}

impl Bitmap {
    pub fn new(width: u32, height: u32, rgb: Vec<u8>) -> Result<Self, RasterError> {
        let expected = width as usize * height as usize * 3;
        if rgb.len() != expected {
            return Err(RasterError::BufferSize {
                expected,
                actual: rgb.len(),
            });
        }
        Ok(Self { width, height, rgb })
    }

    /// A white canvas.
    pub fn blank(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            rgb: vec![255; width as usize * height as usize * 3],
        }
    }

    /// Decodes PNG/JPEG/GIF bytes. Transparent pixels are composited onto white.
    pub fn decode(bytes: &[u8]) -> Result<Self, RasterError> {
        let rgba = image::load_from_memory(bytes)?.to_rgba8();
        let (width, height) = rgba.dimensions();
        let mut rgb = Vec::with_capacity(width as usize * height as usize * 3);
        for px in rgba.pixels() {
            let [r, g, b, a] = px.0;
            let alpha = a as u16;
            for c in [r, g, b] {
                let blended = (c as u16 * alpha + 255 * (255 - alpha)) / 255;
                rgb.push(blended as u8);
            }
        }
        Ok(Self { width, height, rgb })
    }

    pub fn to_png(&self) -> Result<Vec<u8>, RasterError> {
        let mut out = Vec::new();
        PngEncoder::new(&mut out).write_image(&self.rgb, self.width, self.height, ExtendedColorType::Rgb8)?;
        Ok(out)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width as f32, self.height as f32)
    }
}
