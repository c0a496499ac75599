//! Shared test utilities: synthetic images encoded in memory.
//!
//! # Usage
//!
//! ```text
//! use crate::test_helpers::*;
//!
//! let bytes = jpeg_bytes(200, 150);
//! let file = SelectedFile::new("photo.jpg", "image/jpeg", bytes);
//! ```

use image::{ExtendedColorType, ImageEncoder, RgbImage, RgbaImage};

/// A gradient, so encoders have something non-trivial to chew on.
fn gradient(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    })
}

/// Encode a `width`×`height` JPEG.
pub fn jpeg_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = gradient(width, height);
    let mut out = Vec::new();
    image::codecs::jpeg::JpegEncoder::new(&mut out)
        .write_image(img.as_raw(), width, height, ExtendedColorType::Rgb8)
        .unwrap();
    out
}

/// Encode a `width`×`height` RGB PNG.
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = gradient(width, height);
    let mut out = Vec::new();
    image::codecs::png::PngEncoder::new(&mut out)
        .write_image(img.as_raw(), width, height, ExtendedColorType::Rgb8)
        .unwrap();
    out
}

/// Encode a `width`×`height` PNG with a half-transparent alpha channel.
pub fn rgba_png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = RgbaImage::from_fn(width, height, |x, y| {
        image::Rgba([(x % 256) as u8, (y % 256) as u8, 200, 128])
    });
    let mut out = Vec::new();
    image::codecs::png::PngEncoder::new(&mut out)
        .write_image(img.as_raw(), width, height, ExtendedColorType::Rgba8)
        .unwrap();
    out
}

#[test]
fn helpers_produce_decodable_images() {
    for bytes in [jpeg_bytes(4, 3), png_bytes(4, 3), rgba_png_bytes(4, 3)] {
        let img = image::load_from_memory(&bytes).unwrap();
        assert_eq!((img.width(), img.height()), (4, 3));
    }
}
