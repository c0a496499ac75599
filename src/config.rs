//! Intake configuration module.
//!
//! Handles loading, validating, and merging `intake.toml`. Stock defaults are
//! overridden by whatever the user file specifies; everything else keeps its
//! default.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [upload]
//! max_bytes = 16777216      # 16 MiB, inclusive
//! allowed_types = ["image/jpeg", "image/jpg", "image/png", "image/gif", "image/webp"]
//!
//! [optimize]
//! max_width = 1200          # Longer-side bound for landscape/square images
//! max_height = 1200         # Longer-side bound for portrait images
//! quality = 0.8             # JPEG quality, 0.0-1.0
//!
//! [notifications]
//! dismiss_after_secs = 5    # Toast lifetime
//!
//! [preview]
//! title = "Click to upload or drag and drop"
//! hint = "PNG, JPG, GIF, WebP up to 16MB"
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse. Override just the values you want:
//!
//! ```toml
//! [optimize]
//! quality = 0.9
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::imaging::OptimizeOptions;
use crate::notify::DEFAULT_DISMISS_AFTER;
use crate::preview::Placeholders;
use crate::validation::UploadPolicy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// File name looked up in a config directory.
pub const CONFIG_FILENAME: &str = "intake.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    TomlSer(#[from] toml::ser::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Intake configuration loaded from `intake.toml`.
///
/// All fields have sensible defaults. User config files need only specify
/// the values they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IntakeConfig {
    /// Which files the upload control accepts.
    pub upload: UploadPolicy,
    /// Defaults for pre-upload optimization.
    pub optimize: OptimizeOptions,
    /// Toast behaviour.
    pub notifications: NotificationsConfig,
    /// Labels shown by an empty preview pane.
    pub preview: Placeholders,
}

impl IntakeConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.upload.max_bytes == 0 {
            return Err(ConfigError::Validation(
                "upload.max_bytes must be greater than zero".into(),
            ));
        }
        if self.upload.allowed_types.is_empty() {
            return Err(ConfigError::Validation(
                "upload.allowed_types must not be empty".into(),
            ));
        }
        if let Some(bad) = self
            .upload
            .allowed_types
            .iter()
            .find(|t| !t.starts_with("image/"))
        {
            return Err(ConfigError::Validation(format!(
                "upload.allowed_types entry {bad:?} is not an image type"
            )));
        }
        if self.optimize.max_width == 0 || self.optimize.max_height == 0 {
            return Err(ConfigError::Validation(
                "optimize.max_width and optimize.max_height must be non-zero".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.optimize.quality) {
            return Err(ConfigError::Validation(
                "optimize.quality must be 0.0-1.0".into(),
            ));
        }
        if self.notifications.dismiss_after_secs == 0 {
            return Err(ConfigError::Validation(
                "notifications.dismiss_after_secs must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}

/// Toast settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NotificationsConfig {
    /// Seconds a toast stays up before dismissing itself.
    pub dismiss_after_secs: u64,
}

impl NotificationsConfig {
    pub fn dismiss_after(&self) -> Duration {
        Duration::from_secs(self.dismiss_after_secs)
    }
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            dismiss_after_secs: DEFAULT_DISMISS_AFTER.as_secs(),
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the canonical representation of all default values, used as the
/// base layer for merging user overrides on top.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    Ok(toml::Value::try_from(IntakeConfig::default())?)
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a config file as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
/// Returns `Err` if the file exists but contains invalid TOML.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto the stock defaults, then deserialize and
/// validate.
pub fn resolve_config(overlay: Option<toml::Value>) -> Result<IntakeConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: IntakeConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from a file path. A missing file yields the defaults.
pub fn load_config(path: &Path) -> Result<IntakeConfig, ConfigError> {
    let overlay = load_raw_config(path)?;
    resolve_config(overlay)
}

/// Returns a fully-commented stock `intake.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Image Intake Configuration
# ==========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Upload validation
# ---------------------------------------------------------------------------
[upload]
# Largest accepted file in bytes. A file of exactly this size is accepted.
max_bytes = 16777216

# Declared MIME types accepted by the picker and the drop zone.
# Matching is exact and case-sensitive.
allowed_types = ["image/jpeg", "image/jpg", "image/png", "image/gif", "image/webp"]

# ---------------------------------------------------------------------------
# Pre-upload optimization
# ---------------------------------------------------------------------------
[optimize]
# Landscape and square images are capped at max_width, portrait images at
# max_height. The other side follows proportionally. Never upscales.
max_width = 1200
max_height = 1200

# JPEG quality, 0.0 (worst) to 1.0 (best).
quality = 0.8

# ---------------------------------------------------------------------------
# Notifications
# ---------------------------------------------------------------------------
[notifications]
# Seconds before a toast dismisses itself.
dismiss_after_secs = 5

# ---------------------------------------------------------------------------
# Preview pane
# ---------------------------------------------------------------------------
[preview]
# Labels shown while no image is selected.
title = "Click to upload or drag and drop"
hint = "PNG, JPG, GIF, WebP up to 16MB"
"##
}
