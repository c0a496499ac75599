//! Image processing backend trait and shared types.
//!
//! The [`ImageBackend`] trait defines the three operations every backend must
//! support: identify, decode, and encode.
//!
//! Uploads arrive as in-memory buffers, so every operation works on bytes
//! rather than paths. The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend).

use super::params::EncodeParams;
use image::DynamicImage;
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Could not decode image: {0}")]
    Decode(String),
    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
}

/// Result of an identify operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// A decoded image, cheap to clone and safe to hand across threads.
///
/// This is the "displayable image reference" a preview holds on to. The pixel
/// buffer is shared, never copied.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    pixels: Arc<DynamicImage>,
}

impl DecodedImage {
    pub fn new(image: DynamicImage) -> Self {
        Self {
            pixels: Arc::new(image),
        }
    }

    pub fn dimensions(&self) -> Dimensions {
        Dimensions {
            width: self.pixels.width(),
            height: self.pixels.height(),
        }
    }

    pub fn pixels(&self) -> &DynamicImage {
        &self.pixels
    }
}

impl PartialEq for DecodedImage {
    /// Two handles are equal when they point at the same pixel buffer.
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.pixels, &other.pixels)
    }
}

/// Trait for image processing backends.
///
/// `Send + Sync` because decodes run on worker threads while the owning
/// component keeps handling events.
pub trait ImageBackend: Send + Sync {
    /// Read image dimensions from the header without a full decode.
    fn identify(&self, bytes: &[u8]) -> Result<Dimensions, BackendError>;

    /// Decode the full image.
    fn decode(&self, bytes: &[u8]) -> Result<DecodedImage, BackendError>;

    /// Resize (when the target differs from the source) and re-encode as JPEG.
    fn encode(&self, image: &DecodedImage, params: &EncodeParams) -> Result<Vec<u8>, BackendError>;
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::sync::mpsc::Receiver;

    /// Mock backend that records operations without touching real codecs.
    ///
    /// Dimensions are keyed by the exact input bytes, so tests can tell files
    /// apart regardless of which worker thread decodes them. Unknown bytes
    /// fail to decode, which doubles as the corrupt-file case.
    #[derive(Default)]
    pub struct MockBackend {
        pub known: Mutex<HashMap<Vec<u8>, Dimensions>>,
        pub gates: Mutex<HashMap<Vec<u8>, Receiver<()>>>,
        pub operations: Mutex<Vec<RecordedOp>>,
    }

    #[derive(Debug, Clone, PartialEq)]
    pub enum RecordedOp {
        Identify(Vec<u8>),
        Decode(Vec<u8>),
        Encode {
            width: u32,
            height: u32,
            quality: u32,
        },
    }

    impl MockBackend {
        pub fn new() -> Self {
            Self::default()
        }

        /// Register `bytes` as a decodable image of the given size.
        pub fn with_image(self, bytes: &[u8], width: u32, height: u32) -> Self {
            self.known
                .lock()
                .unwrap()
                .insert(bytes.to_vec(), Dimensions { width, height });
            self
        }

        /// Make the decode of `bytes` block until the paired sender fires.
        pub fn with_gate(self, bytes: &[u8], gate: Receiver<()>) -> Self {
            self.gates.lock().unwrap().insert(bytes.to_vec(), gate);
            self
        }

        pub fn get_operations(&self) -> Vec<RecordedOp> {
            self.operations.lock().unwrap().clone()
        }

        fn lookup(&self, bytes: &[u8]) -> Result<Dimensions, BackendError> {
            self.known
                .lock()
                .unwrap()
                .get(bytes)
                .copied()
                .ok_or_else(|| BackendError::Decode("unrecognised mock bytes".to_string()))
        }
    }

    impl ImageBackend for MockBackend {
        fn identify(&self, bytes: &[u8]) -> Result<Dimensions, BackendError> {
            self.operations
                .lock()
                .unwrap()
                .push(RecordedOp::Identify(bytes.to_vec()));
            self.lookup(bytes)
        }

        fn decode(&self, bytes: &[u8]) -> Result<DecodedImage, BackendError> {
            self.operations
                .lock()
                .unwrap()
                .push(RecordedOp::Decode(bytes.to_vec()));

            let gate = self.gates.lock().unwrap().remove(bytes);
            if let Some(gate) = gate {
                // A dropped sender also releases the gate.
                let _ = gate.recv();
            }

            let dims = self.lookup(bytes)?;
            Ok(DecodedImage::new(DynamicImage::new_rgb8(
                dims.width,
                dims.height,
            )))
        }

        fn encode(
            &self,
            _image: &DecodedImage,
            params: &EncodeParams,
        ) -> Result<Vec<u8>, BackendError> {
            self.operations.lock().unwrap().push(RecordedOp::Encode {
                width: params.width,
                height: params.height,
                quality: params.quality.value(),
            });
            Ok(vec![0xFF, 0xD8, 0xFF, 0xD9])
        }
    }

    #[test]
    fn mock_records_identify() {
        let backend = MockBackend::new().with_image(b"photo", 800, 600);

        let result = backend.identify(b"photo").unwrap();
        assert_eq!(result.width, 800);
        assert_eq!(result.height, 600);

        let ops = backend.get_operations();
        assert_eq!(ops.len(), 1);
        assert!(matches!(&ops[0], RecordedOp::Identify(b) if b == b"photo"));
    }

    #[test]
    fn mock_unknown_bytes_fail_to_decode() {
        let backend = MockBackend::new();
        let result = backend.decode(b"garbage");
        assert!(matches!(result, Err(BackendError::Decode(_))));
    }

    #[test]
    fn mock_decode_produces_requested_dimensions() {
        let backend = MockBackend::new().with_image(b"wide", 40, 10);
        let decoded = backend.decode(b"wide").unwrap();
        assert_eq!(
            decoded.dimensions(),
            Dimensions {
                width: 40,
                height: 10
            }
        );
    }

    #[test]
    fn decoded_image_clones_share_pixels() {
        let a = DecodedImage::new(DynamicImage::new_rgb8(2, 2));
        let b = a.clone();
        let c = DecodedImage::new(DynamicImage::new_rgb8(2, 2));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
