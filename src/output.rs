//! CLI output formatting.
//!
//! # Information-First Display
//!
//! Each checked file is listed by positional index and display name, the way
//! the preview pane would title it. The path on disk is secondary context on
//! an indented `Source:` line.
//!
//! # Output Format
//!
//! ## Check
//!
//! ```text
//! 001 sunset.jpg
//!     Source: photos/sunset.jpg
//!     Size: 2.41MB | Type: JPEG
//!     Dimensions: 4000x3000
//! 002 (doc.pdf)
//!     Rejected: Please select a valid image file (JPG, PNG, GIF, WebP).
//!
//! 1 previewed, 1 rejected
//! ```
//!
//! ## Optimize
//!
//! ```text
//! sunset.jpg → sunset.optimized.jpg
//!     4000x3000 → 1200x900
//!     2.4 MB → 310.5 KB (image/jpeg)
//!
//! 1 optimized
//! ```
//!
//! # Architecture
//!
//! Every command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure.

use crate::batch::OptimizeReport;
use crate::check::{CheckOutcome, CheckReport};
use crate::format::format_file_size;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Previewed files show their display name; everything else shows the
/// filename in parens since there is no preview to name.
///
/// ```text
/// 001 sunset.jpg
/// 002 (doc.pdf)
/// ```
fn file_line(index: usize, report: &CheckReport) -> String {
    let filename = report
        .path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| report.path.display().to_string());
    match &report.outcome {
        CheckOutcome::Previewed { name, .. } => format!("{} {}", format_index(index), name),
        _ => format!("{} ({})", format_index(index), filename),
    }
}

fn plural(n: usize, word: &str) -> String {
    format!("{} {}", n, word)
}

pub fn format_check_report(reports: &[CheckReport]) -> Vec<String> {
    let mut lines = Vec::new();
    let mut previewed = 0;
    let mut rejected = 0;
    let mut failed = 0;

    for (i, report) in reports.iter().enumerate() {
        lines.push(file_line(i + 1, report));
        match &report.outcome {
            CheckOutcome::Previewed {
                size_label,
                type_label,
                width,
                height,
                ..
            } => {
                previewed += 1;
                lines.push(format!("{}Source: {}", indent(1), report.path.display()));
                lines.push(format!(
                    "{}Size: {} | Type: {}",
                    indent(1),
                    size_label,
                    type_label
                ));
                lines.push(format!("{}Dimensions: {}x{}", indent(1), width, height));
            }
            CheckOutcome::Rejected { message, .. } => {
                rejected += 1;
                lines.push(format!("{}Rejected: {}", indent(1), message));
            }
            CheckOutcome::Undecodable { message } => {
                failed += 1;
                lines.push(format!("{}Failed: {}", indent(1), message));
            }
            CheckOutcome::Unreadable { error } => {
                failed += 1;
                lines.push(format!("{}Unreadable: {}", indent(1), error));
            }
        }
    }

    if !reports.is_empty() {
        lines.push(String::new());
    }
    let mut summary = vec![
        plural(previewed, "previewed"),
        plural(rejected, "rejected"),
    ];
    if failed > 0 {
        summary.push(plural(failed, "failed"));
    }
    lines.push(summary.join(", "));
    lines
}

pub fn print_check_report(reports: &[CheckReport]) {
    for line in format_check_report(reports) {
        println!("{}", line);
    }
}

/// Format one line group per optimized file, then a summary.
pub fn format_optimize_output(reports: &[OptimizeReport]) -> Vec<String> {
    let mut lines = Vec::new();
    let mut failed = 0;

    for report in reports {
        match &report.result {
            Ok(done) => {
                lines.push(format!(
                    "{} → {}",
                    report.source.display(),
                    done.output.display()
                ));
                lines.push(format!(
                    "{}{}x{} → {}x{}",
                    indent(1),
                    done.source_dims.0,
                    done.source_dims.1,
                    done.encoded.width,
                    done.encoded.height
                ));
                lines.push(format!(
                    "{}{} → {} ({})",
                    indent(1),
                    format_file_size(done.source_size),
                    format_file_size(done.encoded.size_bytes()),
                    done.encoded.mime_type
                ));
            }
            Err(e) => {
                failed += 1;
                lines.push(report.source.display().to_string());
                lines.push(format!("{}Failed: {}", indent(1), e));
            }
        }
    }

    if !reports.is_empty() {
        lines.push(String::new());
    }
    let mut summary = plural(reports.len() - failed, "optimized");
    if failed > 0 {
        summary = format!("{}, {}", summary, plural(failed, "failed"));
    }
    lines.push(summary);
    lines
}

pub fn print_optimize_output(reports: &[OptimizeReport]) {
    for line in format_optimize_output(reports) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::{BatchError, Optimized};
    use crate::imaging::EncodedImage;
    use crate::validation::RejectReason;
    use std::path::PathBuf;

    fn previewed(path: &str) -> CheckReport {
        CheckReport {
            path: PathBuf::from(path),
            outcome: CheckOutcome::Previewed {
                name: "sunset.jpg".to_string(),
                size_label: "2.41MB".to_string(),
                type_label: "JPEG".to_string(),
                width: 4000,
                height: 3000,
                fingerprint: "abc".to_string(),
            },
        }
    }

    fn rejected(path: &str, message: &str) -> CheckReport {
        CheckReport {
            path: PathBuf::from(path),
            outcome: CheckOutcome::Rejected {
                reason: RejectReason::UnsupportedType,
                message: message.to_string(),
            },
        }
    }

    #[test]
    fn format_index_pads() {
        assert_eq!(format_index(1), "001");
        assert_eq!(format_index(42), "042");
        assert_eq!(format_index(100), "100");
    }

    #[test]
    fn previewed_file_shows_details() {
        let lines = format_check_report(&[previewed("photos/sunset.jpg")]);
        assert_eq!(lines[0], "001 sunset.jpg");
        assert_eq!(lines[1], "    Source: photos/sunset.jpg");
        assert_eq!(lines[2], "    Size: 2.41MB | Type: JPEG");
        assert_eq!(lines[3], "    Dimensions: 4000x3000");
        assert_eq!(lines.last().unwrap(), "1 previewed, 0 rejected");
    }

    #[test]
    fn rejected_file_uses_filename_in_parens() {
        let lines = format_check_report(&[rejected("docs/doc.pdf", "Bad type.")]);
        assert_eq!(lines[0], "001 (doc.pdf)");
        assert_eq!(lines[1], "    Rejected: Bad type.");
    }

    #[test]
    fn summary_counts_failures_only_when_present() {
        let reports = vec![
            previewed("a.jpg"),
            rejected("b.pdf", "x"),
            CheckReport {
                path: PathBuf::from("c.png"),
                outcome: CheckOutcome::Unreadable {
                    error: "not found".to_string(),
                },
            },
        ];
        let lines = format_check_report(&reports);
        assert_eq!(lines.last().unwrap(), "1 previewed, 1 rejected, 1 failed");
        assert!(lines.contains(&"    Unreadable: not found".to_string()));
    }

    #[test]
    fn empty_report_is_just_summary() {
        assert_eq!(format_check_report(&[]), vec!["0 previewed, 0 rejected"]);
    }

    #[test]
    fn optimize_output_lines() {
        let reports = vec![
            OptimizeReport {
                source: PathBuf::from("sunset.jpg"),
                result: Ok(Optimized {
                    output: PathBuf::from("sunset.optimized.jpg"),
                    source_dims: (4000, 3000),
                    source_size: 2 * 1024 * 1024,
                    encoded: EncodedImage {
                        bytes: vec![0; 2048],
                        width: 1200,
                        height: 900,
                        mime_type: "image/jpeg",
                    },
                }),
            },
            OptimizeReport {
                source: PathBuf::from("broken.png"),
                result: Err(BatchError::BadPath(PathBuf::from("broken.png"))),
            },
        ];
        let lines = format_optimize_output(&reports);
        assert_eq!(lines[0], "sunset.jpg → sunset.optimized.jpg");
        assert_eq!(lines[1], "    4000x3000 → 1200x900");
        assert_eq!(lines[2], "    2 MB → 2 KB (image/jpeg)");
        assert_eq!(lines[3], "broken.png");
        assert!(lines[4].starts_with("    Failed: "));
        assert_eq!(lines.last().unwrap(), "1 optimized, 1 failed");
    }
}
