//! Pure calculation functions for image dimensions.
//!
//! All functions here are pure and testable without any I/O or images.

/// Calculate the output dimensions for pre-upload optimization.
///
/// Only the longer side is ever constrained. When `width >= height` the width
/// is capped at `max.0` and the height follows proportionally; otherwise the
/// height is capped at `max.1` and the width follows. The two branches are
/// mutually exclusive, so a landscape image taller than `max.1` but narrower
/// than `max.0` passes through untouched.
///
/// Never upscales. Fractional results are truncated, with a floor of one
/// pixel so extreme aspect ratios still produce a valid image.
///
/// # Examples
/// ```
/// # use image_intake::imaging::calculate_constrained_dimensions;
/// assert_eq!(calculate_constrained_dimensions((2000, 1000), (1200, 1200)), (1200, 600));
/// assert_eq!(calculate_constrained_dimensions((1000, 2000), (1200, 1200)), (600, 1200));
/// assert_eq!(calculate_constrained_dimensions((100, 100), (1200, 1200)), (100, 100));
/// ```
pub fn calculate_constrained_dimensions(source: (u32, u32), max: (u32, u32)) -> (u32, u32) {
    let (src_w, src_h) = source;
    let (max_w, max_h) = max;

    if src_w >= src_h {
        // Landscape or square: width is the bound
        if src_w > max_w {
            let h = (src_h as f64 * max_w as f64 / src_w as f64) as u32;
            return (max_w, h.max(1));
        }
    } else if src_h > max_h {
        // Portrait: height is the bound
        let w = (src_w as f64 * max_h as f64 / src_h as f64) as u32;
        return (w.max(1), max_h);
    }

    (src_w, src_h)
}
