//! Upload validation: declared MIME type against an allow-list, then size
//! against a ceiling.
//!
//! Validation is a pure function of the file and the policy. It looks at the
//! declared type and reported size only; whether the bytes actually decode is
//! the preview stage's problem.

use crate::file::SelectedFile;
use crate::format::format_file_size;
use serde::{Deserialize, Serialize};

/// 16 MiB, the largest upload accepted (inclusive).
pub const MAX_UPLOAD_BYTES: u64 = 16 * 1024 * 1024;

/// MIME types accepted by default.
pub const ALLOWED_MIME_TYPES: &[&str] = &[
    "image/jpeg",
    "image/jpg",
    "image/png",
    "image/gif",
    "image/webp",
];

/// Why a file was turned away before preview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    UnsupportedType,
    TooLarge,
}

/// Outcome of [`validate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationResult {
    Accepted,
    Rejected(RejectReason),
}

impl ValidationResult {
    pub fn is_accepted(self) -> bool {
        matches!(self, ValidationResult::Accepted)
    }
}

/// What the upload control will accept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UploadPolicy {
    /// Largest accepted file, in bytes. A file of exactly this size passes.
    pub max_bytes: u64,
    /// Exact, case-sensitive MIME types.
    pub allowed_types: Vec<String>,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self {
            max_bytes: MAX_UPLOAD_BYTES,
            allowed_types: ALLOWED_MIME_TYPES.iter().map(|t| t.to_string()).collect(),
        }
    }
}

impl UploadPolicy {
    pub fn allows_type(&self, mime_type: &str) -> bool {
        self.allowed_types.iter().any(|t| t == mime_type)
    }

    /// User-facing explanation for a rejection under this policy.
    pub fn rejection_message(&self, reason: RejectReason) -> String {
        match reason {
            RejectReason::UnsupportedType => {
                "Please select a valid image file (JPG, PNG, GIF, WebP).".to_string()
            }
            RejectReason::TooLarge => format!(
                "File size must be less than {}.",
                format_file_size(self.max_bytes).replace(' ', "")
            ),
        }
    }
}

/// Check a file against the policy. Type is checked before size.
pub fn validate(file: &SelectedFile, policy: &UploadPolicy) -> ValidationResult {
    if !policy.allows_type(&file.mime_type) {
        return ValidationResult::Rejected(RejectReason::UnsupportedType);
    }
    if file.size_bytes > policy.max_bytes {
        return ValidationResult::Rejected(RejectReason::TooLarge);
    }
    ValidationResult::Accepted
}
