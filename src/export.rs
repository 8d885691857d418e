use std::path::Path;

use image::{ImageBuffer, Rgb, RgbImage, RgbaImage};

use crate::color::over_black;
use crate::error::ExportError;
use crate::raster::PixelBuffer;

/// Convert a rendered frame to an RGBA image, keeping the alpha channel as rendered.
pub fn frame_to_rgba_image(pixels: &PixelBuffer) -> Result<RgbaImage, ExportError> {
    let width = pixels.width() as u32;
    let height = pixels.height() as u32;
    let bytes = pixels.to_rgba_bytes();
    let len = bytes.len();

    RgbaImage::from_raw(width, height, bytes).ok_or(ExportError::BufferSize { width, height, len })
}

/// Convert a rendered frame to what a viewer shows: every pixel composited over black.
pub fn frame_to_rgb_image(pixels: &PixelBuffer) -> RgbImage {
    let mut img: RgbImage = ImageBuffer::new(pixels.width() as u32, pixels.height() as u32);

    for (i, &color) in pixels.as_slice().iter().enumerate() {
        let x = (i % pixels.width()) as u32;
        let y = (i / pixels.width()) as u32;
        let [_, r, g, b] = over_black(color).to_be_bytes();
        img.put_pixel(x, y, Rgb([r, g, b]));
    }

    img
}

/// Export a rendered frame as a PNG with its alpha channel.
pub fn export_frame(pixels: &PixelBuffer, path: impl AsRef<Path>) -> Result<(), ExportError> {
    frame_to_rgba_image(pixels)?.save(path)?;
    Ok(())
}

/// Export a rendered frame as an opaque PNG, composited over black.
pub fn export_frame_flattened(
    pixels: &PixelBuffer,
    path: impl AsRef<Path>,
) -> Result<(), ExportError> {
    frame_to_rgb_image(pixels).save(path)?;
    Ok(())
}
