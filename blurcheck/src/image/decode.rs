//! Image decoding

use std::io::Cursor;

use imageproc::image::{DynamicImage, GrayImage, ImageError, ImageReader, Limits, Luma, RgbImage};

use crate::error::BlurError;

/// Decode image from memory into an 8-bit grayscale raster
///
/// The container format is sniffed from the buffer's magic bytes, so the
/// caller never has to declare a content type. The decoder may allocate at
/// most `max_alloc` bytes.
pub fn decode(data: &[u8], max_alloc: u64) -> Result<GrayImage, BlurError> {
    let mut limits = Limits::default();
    limits.max_alloc = Some(max_alloc);

    let mut reader = ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(ImageError::IoError)?;
    reader.limits(limits);
    let img = reader.decode()?;

    log::trace!(
        "Decoded {}x{} {:?} image",
        img.width(),
        img.height(),
        img.color()
    );

    Ok(match img {
        DynamicImage::ImageLuma8(gray) => gray,
        other => bt601_luma(&other.to_rgb8()),
    })
}

/// Fixed-point BT.601 luma: `(R*4899 + G*9617 + B*1868 + 8192) >> 14`
///
/// Same integer weights OpenCV uses when loading as grayscale. Gray pixels
/// map to themselves since the weights sum to `1 << 14`.
pub(super) fn bt601_luma(rgb: &RgbImage) -> GrayImage {
    let (width, height) = rgb.dimensions();
    GrayImage::from_fn(width, height, |x, y| {
        let [r, g, b] = rgb.get_pixel(x, y).0.map(u32::from);
        Luma([((r * 4899 + g * 9617 + b * 1868 + 8192) >> 14) as u8])
    })
}
