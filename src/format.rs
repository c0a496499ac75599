//! Human-readable labels for file sizes and types.

const UNITS: &[&str] = &["Bytes", "KB", "MB", "GB"];

/// Format a byte count with the largest fitting binary unit.
///
/// Up to two decimals, trailing zeros dropped: `1536` → `"1.5 KB"`,
/// `1048576` → `"1 MB"`. Zero is `"0 Bytes"`. Sizes past a terabyte stay in GB.
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let rounded = format!("{:.2}", value);
    let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", trimmed, UNITS[unit])
}

/// Size as shown under a preview: megabytes, always two decimals.
pub fn size_label(bytes: u64) -> String {
    format!("{:.2}MB", bytes as f64 / 1024.0 / 1024.0)
}

/// Short type label: the MIME subtype, upper-cased (`image/webp` → `WEBP`).
pub fn type_label(mime_type: &str) -> String {
    mime_type
        .split_once('/')
        .map(|(_, subtype)| subtype)
        .unwrap_or(mime_type)
        .to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_bytes() {
        assert_eq!(format_file_size(0), "0 Bytes");
    }

    #[test]
    fn small_sizes_stay_in_bytes() {
        assert_eq!(format_file_size(1), "1 Bytes");
        assert_eq!(format_file_size(1023), "1023 Bytes");
    }

    #[test]
    fn unit_boundaries() {
        assert_eq!(format_file_size(1024), "1 KB");
        assert_eq!(format_file_size(1024 * 1024), "1 MB");
        assert_eq!(format_file_size(16 * 1024 * 1024), "16 MB");
        assert_eq!(format_file_size(1024 * 1024 * 1024), "1 GB");
    }

    #[test]
    fn fractional_values_drop_trailing_zeros() {
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(1_234_567), "1.18 MB");
    }

    #[test]
    fn beyond_gigabytes_stays_in_gb() {
        assert_eq!(format_file_size(2 * 1024 * 1024 * 1024 * 1024), "2048 GB");
    }

    #[test]
    fn size_label_always_has_two_decimals() {
        assert_eq!(size_label(0), "0.00MB");
        assert_eq!(size_label(1024 * 1024), "1.00MB");
        assert_eq!(size_label(2_621_440), "2.50MB");
        assert_eq!(size_label(16 * 1024 * 1024), "16.00MB");
    }

    #[test]
    fn type_label_uses_subtype() {
        assert_eq!(type_label("image/jpeg"), "JPEG");
        assert_eq!(type_label("image/webp"), "WEBP");
        assert_eq!(type_label("png"), "PNG");
    }
}
