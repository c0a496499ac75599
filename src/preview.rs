//! Preview construction and the pane a preview renders into.
//!
//! [`build_preview`] turns an accepted [`SelectedFile`] into a
//! [`PreviewState`]; [`PreviewPane`] is the on-screen container that shows
//! it. The pane only ever holds one preview: rendering replaces, clearing
//! drops everything and restores the placeholder labels.

use crate::file::SelectedFile;
use crate::format::{size_label, type_label};
use crate::imaging::{BackendError, DecodedImage, ImageBackend};
use serde::{Deserialize, Serialize};

/// View model for an accepted file.
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewState {
    pub display_name: String,
    /// e.g. `"2.50MB"`
    pub display_size_label: String,
    /// e.g. `"JPEG"`
    pub type_label: String,
    pub image: DecodedImage,
    /// Content digest of the file the preview was built from.
    pub fingerprint: String,
}

impl PreviewState {
    /// Text for the detail line under the filename.
    pub fn detail_label(&self) -> String {
        format!(
            "Size: {} | Type: {}",
            self.display_size_label, self.type_label
        )
    }
}

/// Decode `file` and derive its display labels.
///
/// Callers must have validated the file first. Unreadable content comes back
/// as [`BackendError::Decode`].
pub fn build_preview(
    backend: &(impl ImageBackend + ?Sized),
    file: &SelectedFile,
) -> Result<PreviewState, BackendError> {
    let image = backend.decode(file.bytes())?;
    Ok(PreviewState {
        display_name: file.name.clone(),
        display_size_label: size_label(file.size_bytes),
        type_label: type_label(&file.mime_type),
        image,
        fingerprint: file.fingerprint(),
    })
}

/// Labels a pane shows while it has no image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Placeholders {
    pub title: String,
    pub hint: String,
}

impl Default for Placeholders {
    fn default() -> Self {
        Self {
            title: "Click to upload or drag and drop".to_string(),
            hint: "PNG, JPG, GIF, WebP up to 16MB".to_string(),
        }
    }
}

/// The preview container bound to one upload control.
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewPane {
    image: Option<DecodedImage>,
    filename_label: String,
    detail_label: String,
    placeholders: Placeholders,
}

impl PreviewPane {
    pub fn new(placeholders: Placeholders) -> Self {
        Self {
            image: None,
            filename_label: placeholders.title.clone(),
            detail_label: placeholders.hint.clone(),
            placeholders,
        }
    }

    /// Replace whatever is showing with `preview`.
    pub fn render(&mut self, preview: &PreviewState) {
        self.image = Some(preview.image.clone());
        self.filename_label = preview.display_name.clone();
        self.detail_label = preview.detail_label();
    }

    /// Remove the image and restore the placeholder labels.
    pub fn clear(&mut self) {
        self.image = None;
        self.filename_label = self.placeholders.title.clone();
        self.detail_label = self.placeholders.hint.clone();
    }

    pub fn has_image(&self) -> bool {
        self.image.is_some()
    }

    pub fn image(&self) -> Option<&DecodedImage> {
        self.image.as_ref()
    }

    pub fn filename_label(&self) -> &str {
        &self.filename_label
    }

    pub fn detail_label(&self) -> &str {
        &self.detail_label
    }
}

impl Default for PreviewPane {
    fn default() -> Self {
        Self::new(Placeholders::default())
    }
}
