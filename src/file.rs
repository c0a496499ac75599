//! The file a user picked or dropped, before validation.

use sha2::{Digest, Sha256};
use std::path::Path;
use std::sync::Arc;

/// Extension → MIME type, the way a browser labels a picked file.
///
/// Anything not listed gets `application/octet-stream`, which the upload
/// policy then rejects as an unsupported type.
const EXTENSION_MIME_TYPES: &[(&str, &str)] = &[
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("png", "image/png"),
    ("gif", "image/gif"),
    ("webp", "image/webp"),
    ("bmp", "image/bmp"),
    ("tif", "image/tiff"),
    ("tiff", "image/tiff"),
    ("svg", "image/svg+xml"),
    ("pdf", "application/pdf"),
    ("txt", "text/plain"),
];

const FALLBACK_MIME_TYPE: &str = "application/octet-stream";

/// A candidate upload.
///
/// `size_bytes` is the size the picker reported, which normally equals
/// `bytes().len()`. Content is shared, so cloning is cheap and handing a copy
/// to a decode worker never copies pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub size_bytes: u64,
    pub mime_type: String,
    bytes: Arc<[u8]>,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            size_bytes: bytes.len() as u64,
            mime_type: mime_type.into(),
            bytes: bytes.into(),
        }
    }

    /// Read a file from disk, deriving its MIME type from the extension.
    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let bytes = std::fs::read(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self::new(name, mime_type_for_path(path), bytes))
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// SHA-256 of the content, hex encoded.
    pub fn fingerprint(&self) -> String {
        let digest = Sha256::digest(self.bytes());
        digest.iter().map(|b| format!("{:02x}", b)).collect()
    }
}

/// Guess the MIME type a browser would report for this path.
pub fn mime_type_for_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    EXTENSION_MIME_TYPES
        .iter()
        .find(|(candidate, _)| *candidate == ext)
        .map(|(_, mime)| *mime)
        .unwrap_or(FALLBACK_MIME_TYPE)
}
