//! Image processing in pure Rust, no system libraries.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Identify** | `ImageReader::into_dimensions` |
//! | **Decode** | `ImageReader::decode` (JPEG, PNG, GIF, WebP) |
//! | **Optimize** | Lanczos3 resize + JPEG encoder |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for dimension math (unit testable)
//! - **Parameters**: Data structures describing image operations
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Operations**: High-level functions combining calculations + backend

pub mod backend;
mod calculations;
pub mod operations;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, DecodedImage, Dimensions, ImageBackend};
pub use calculations::calculate_constrained_dimensions;
pub use operations::{EncodedImage, get_dimensions, optimize, optimize_decoded, plan_optimize};
pub use params::{EncodeParams, OptimizeOptions, Quality};
pub use rust_backend::RustBackend;
