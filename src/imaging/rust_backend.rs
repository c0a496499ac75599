//! Pure Rust image processing backend built on the `image` crate.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Identify | `image::ImageReader::into_dimensions` (header only) |
//! | Decode (JPEG, PNG, GIF, WebP) | `image::ImageReader::decode`, format sniffed from content |
//! | Resize | `image::DynamicImage::resize_exact` with `Lanczos3` filter |
//! | Encode → JPEG | `image::codecs::jpeg::JpegEncoder` |

use super::backend::{BackendError, DecodedImage, Dimensions, ImageBackend};
use super::params::EncodeParams;
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat, ImageReader};
use std::io::Cursor;
use std::sync::LazyLock;

/// MIME types the upload form accepts, paired with the decoder that reads them.
///
/// `image/jpg` is not a registered type but some browsers report it.
const MIME_CANDIDATES: &[(&str, ImageFormat)] = &[
    ("image/jpeg", ImageFormat::Jpeg),
    ("image/jpg", ImageFormat::Jpeg),
    ("image/png", ImageFormat::Png),
    ("image/gif", ImageFormat::Gif),
    ("image/webp", ImageFormat::WebP),
];

static DECODABLE_MIME_TYPES: LazyLock<Vec<&'static str>> = LazyLock::new(|| {
    MIME_CANDIDATES
        .iter()
        .filter(|(_, fmt)| fmt.reading_enabled())
        .map(|(mime, _)| *mime)
        .collect()
});

/// Returns the MIME types that have working decoders compiled in.
pub fn decodable_mime_types() -> &'static [&'static str] {
    &DECODABLE_MIME_TYPES
}

/// Pure Rust backend using the `image` crate ecosystem.
///
/// See the [module docs](self) for the crate-to-operation mapping.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Wrap a buffer in a reader that sniffs the format from magic bytes.
///
/// The declared MIME type is not trusted here: a PNG saved as `.jpg` still
/// previews, the same way a browser would render it.
fn reader(bytes: &[u8]) -> Result<ImageReader<Cursor<&[u8]>>, BackendError> {
    Ok(ImageReader::new(Cursor::new(bytes)).with_guessed_format()?)
}

fn load_image(bytes: &[u8]) -> Result<DynamicImage, BackendError> {
    reader(bytes)?
        .decode()
        .map_err(|e| BackendError::Decode(e.to_string()))
}

/// Encode as baseline JPEG. Alpha and palette images are flattened to RGB.
fn encode_jpeg(img: &DynamicImage, quality: u32) -> Result<Vec<u8>, BackendError> {
    let rgb = DynamicImage::ImageRgb8(img.to_rgb8());
    let mut out = Vec::new();
    let encoder =
        image::codecs::jpeg::JpegEncoder::new_with_quality(&mut out, quality.clamp(1, 100) as u8);
    rgb.write_with_encoder(encoder)
        .map_err(|e| BackendError::ProcessingFailed(format!("JPEG encode failed: {}", e)))?;
    Ok(out)
}

impl ImageBackend for RustBackend {
    fn identify(&self, bytes: &[u8]) -> Result<Dimensions, BackendError> {
        let (width, height) = reader(bytes)?
            .into_dimensions()
            .map_err(|e| BackendError::Decode(format!("Failed to read dimensions: {}", e)))?;
        Ok(Dimensions { width, height })
    }

    fn decode(&self, bytes: &[u8]) -> Result<DecodedImage, BackendError> {
        load_image(bytes).map(DecodedImage::new)
    }

    fn encode(&self, image: &DecodedImage, params: &EncodeParams) -> Result<Vec<u8>, BackendError> {
        let source = image.pixels();
        if source.width() == params.width && source.height() == params.height {
            return encode_jpeg(source, params.quality.value());
        }
        let resized = source.resize_exact(params.width, params.height, FilterType::Lanczos3);
        encode_jpeg(&resized, params.quality.value())
    }
}
