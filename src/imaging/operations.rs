//! High-level image operations.
//!
//! These functions combine calculations with backend execution.
//! They take options, compute parameters, and call the backend.

use super::backend::{BackendError, DecodedImage, ImageBackend};
use super::calculations::calculate_constrained_dimensions;
use super::params::{EncodeParams, OptimizeOptions, Quality};
use serde::Serialize;

/// Result type for image operations.
pub type Result<T> = std::result::Result<T, BackendError>;

/// MIME type of everything [`optimize`] produces.
pub const OPTIMIZED_MIME_TYPE: &str = "image/jpeg";

/// Get image dimensions using the backend.
pub fn get_dimensions(backend: &(impl ImageBackend + ?Sized), bytes: &[u8]) -> Result<(u32, u32)> {
    let dims = backend.identify(bytes)?;
    Ok((dims.width, dims.height))
}

/// A re-encoded image ready for upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EncodedImage {
    #[serde(skip)]
    pub bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub mime_type: &'static str,
}

impl EncodedImage {
    pub fn size_bytes(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// Plan an encode without executing it.
///
/// Useful for testing parameter generation.
pub fn plan_optimize(source: (u32, u32), options: &OptimizeOptions) -> EncodeParams {
    let (width, height) =
        calculate_constrained_dimensions(source, (options.max_width, options.max_height));
    EncodeParams {
        width,
        height,
        quality: Quality::from_fraction(options.quality),
    }
}

/// Downscale and re-encode an already decoded image.
pub fn optimize_decoded(
    backend: &(impl ImageBackend + ?Sized),
    image: &DecodedImage,
    options: &OptimizeOptions,
) -> Result<EncodedImage> {
    let dims = image.dimensions();
    let params = plan_optimize((dims.width, dims.height), options);
    let bytes = backend.encode(image, &params)?;

    Ok(EncodedImage {
        bytes,
        width: params.width,
        height: params.height,
        mime_type: OPTIMIZED_MIME_TYPE,
    })
}

/// Decode, constrain the longer side, and re-encode as JPEG.
///
/// Independent of validation and preview: callers decide when to run it.
pub fn optimize(
    backend: &(impl ImageBackend + ?Sized),
    bytes: &[u8],
    options: &OptimizeOptions,
) -> Result<EncodedImage> {
    let image = backend.decode(bytes)?;
    optimize_decoded(backend, &image, options)
}
