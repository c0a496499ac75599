//! Parameter types for image operations.
//!
//! These structs describe *what* to do, not *how* to do it. They are the
//! interface between the high-level [`operations`](super::operations) module
//! (which decides the output size) and the [`backend`](super::backend)
//! (which does the actual pixel work).
//!
//! ## Types
//!
//! - [`Quality`]: Lossy encoding quality (1–100, default 80). Clamped on construction.
//! - [`OptimizeOptions`]: Caller-facing bounds and quality for `optimize`.
//! - [`EncodeParams`]: Resolved target dimensions and quality for one encode.

use serde::{Deserialize, Serialize};

/// Quality setting for lossy image encoding (1-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(pub u32);

impl Quality {
    pub fn new(value: u32) -> Self {
        Self(value.clamp(1, 100))
    }

    /// Build from the 0.0–1.0 scale used by upload forms.
    pub fn from_fraction(fraction: f32) -> Self {
        let scaled = (fraction.clamp(0.0, 1.0) * 100.0).round() as u32;
        Self::new(scaled)
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(80)
    }
}

/// Bounds and quality for [`optimize`](super::operations::optimize).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OptimizeOptions {
    pub max_width: u32,
    pub max_height: u32,
    /// Lossy quality on a 0.0–1.0 scale.
    pub quality: f32,
}

impl Default for OptimizeOptions {
    fn default() -> Self {
        Self {
            max_width: 1200,
            max_height: 1200,
            quality: 0.8,
        }
    }
}

/// Parameters for a single encode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeParams {
    pub width: u32,
    pub height: u32,
    pub quality: Quality,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quality_clamps_to_valid_range() {
        assert_eq!(Quality::new(0).value(), 1);
        assert_eq!(Quality::new(50).value(), 50);
        assert_eq!(Quality::new(150).value(), 100);
    }

    #[test]
    fn quality_from_fraction() {
        assert_eq!(Quality::from_fraction(0.8).value(), 80);
        assert_eq!(Quality::from_fraction(1.0).value(), 100);
        assert_eq!(Quality::from_fraction(0.0).value(), 1);
        assert_eq!(Quality::from_fraction(2.5).value(), 100);
    }

    #[test]
    fn quality_default_matches_optimize_default() {
        let opts = OptimizeOptions::default();
        assert_eq!(Quality::from_fraction(opts.quality), Quality::default());
    }

    #[test]
    fn optimize_defaults() {
        let opts = OptimizeOptions::default();
        assert_eq!(opts.max_width, 1200);
        assert_eq!(opts.max_height, 1200);
        assert_eq!(opts.quality, 0.8);
    }
}
