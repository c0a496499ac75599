//! Batch pre-upload optimization of files on disk.
//!
//! Each file is read, measured, downscaled and re-encoded as JPEG. Files are
//! independent, so they run in parallel on the rayon pool. One failing file
//! never stops the others; its error lands in its own [`OptimizeReport`].
//!
//! Output goes to `<stem>.optimized.jpg`, next to the source unless an output
//! directory is given.

use crate::imaging::{BackendError, EncodedImage, ImageBackend, OptimizeOptions, get_dimensions, optimize};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Suffix appended to the source stem.
pub const OPTIMIZED_SUFFIX: &str = "optimized.jpg";

#[derive(Error, Debug)]
pub enum BatchError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image processing failed: {0}")]
    Imaging(#[from] BackendError),
    #[error("Not a file name: {0}")]
    BadPath(PathBuf),
}

/// Result of optimizing one file.
#[derive(Debug)]
pub struct OptimizeReport {
    pub source: PathBuf,
    pub result: Result<Optimized, BatchError>,
}

#[derive(Debug)]
pub struct Optimized {
    pub output: PathBuf,
    pub source_dims: (u32, u32),
    pub source_size: u64,
    pub encoded: EncodedImage,
}

/// Where the optimized copy of `source` is written.
pub fn output_path(source: &Path, out_dir: Option<&Path>) -> Result<PathBuf, BatchError> {
    let stem = source
        .file_stem()
        .ok_or_else(|| BatchError::BadPath(source.to_path_buf()))?;
    let name = format!("{}.{}", stem.to_string_lossy(), OPTIMIZED_SUFFIX);
    let dir = match out_dir {
        Some(dir) => dir,
        None => source.parent().unwrap_or(Path::new("")),
    };
    Ok(dir.join(name))
}

/// Optimize every file in `sources`. Reports come back in input order.
pub fn optimize_files(
    backend: &(impl ImageBackend + ?Sized),
    sources: &[PathBuf],
    out_dir: Option<&Path>,
    options: &OptimizeOptions,
) -> Vec<OptimizeReport> {
    if let Some(dir) = out_dir {
        if let Err(e) = std::fs::create_dir_all(dir) {
            tracing::warn!(dir = %dir.display(), error = %e, "could not create output directory");
        }
    }

    sources
        .par_iter()
        .map(|source| OptimizeReport {
            source: source.clone(),
            result: optimize_file(backend, source, out_dir, options),
        })
        .collect()
}

fn optimize_file(
    backend: &(impl ImageBackend + ?Sized),
    source: &Path,
    out_dir: Option<&Path>,
    options: &OptimizeOptions,
) -> Result<Optimized, BatchError> {
    let output = output_path(source, out_dir)?;
    let bytes = std::fs::read(source)?;
    let source_dims = get_dimensions(backend, &bytes)?;
    let encoded = optimize(backend, &bytes, options)?;
    std::fs::write(&output, &encoded.bytes)?;

    tracing::debug!(
        source = %source.display(),
        output = %output.display(),
        width = encoded.width,
        height = encoded.height,
        "optimized"
    );

    Ok(Optimized {
        output,
        source_dims,
        source_size: bytes.len() as u64,
        encoded,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::RustBackend;
    use crate::imaging::backend::tests::{MockBackend, RecordedOp};
    use crate::test_helpers::{jpeg_bytes, png_bytes};
    use tempfile::TempDir;

    #[test]
    fn output_path_next_to_source() {
        let path = output_path(Path::new("photos/sunset.png"), None).unwrap();
        assert_eq!(path, PathBuf::from("photos/sunset.optimized.jpg"));
    }

    #[test]
    fn output_path_in_out_dir() {
        let path = output_path(Path::new("photos/sunset.png"), Some(Path::new("out"))).unwrap();
        assert_eq!(path, PathBuf::from("out/sunset.optimized.jpg"));
    }

    #[test]
    fn output_path_bare_filename() {
        let path = output_path(Path::new("sunset.png"), None).unwrap();
        assert_eq!(path, PathBuf::from("sunset.optimized.jpg"));
    }

    #[test]
    fn output_path_rejects_root() {
        assert!(matches!(
            output_path(Path::new("/"), None),
            Err(BatchError::BadPath(_))
        ));
    }

    #[test]
    fn optimizes_real_files_in_order() {
        let tmp = TempDir::new().unwrap();
        let wide = tmp.path().join("wide.png");
        let tall = tmp.path().join("tall.jpg");
        std::fs::write(&wide, png_bytes(2400, 1200)).unwrap();
        std::fs::write(&tall, jpeg_bytes(300, 600)).unwrap();
        let out = tmp.path().join("out");

        let reports = optimize_files(
            &RustBackend::new(),
            &[wide.clone(), tall.clone()],
            Some(&out),
            &OptimizeOptions::default(),
        );

        assert_eq!(reports[0].source, wide);
        let first = reports[0].result.as_ref().unwrap();
        assert_eq!(first.source_dims, (2400, 1200));
        assert_eq!((first.encoded.width, first.encoded.height), (1200, 600));
        assert_eq!(first.output, out.join("wide.optimized.jpg"));
        let written = image::open(&first.output).unwrap();
        assert_eq!((written.width(), written.height()), (1200, 600));

        let second = reports[1].result.as_ref().unwrap();
        assert_eq!((second.encoded.width, second.encoded.height), (300, 600));
    }

    #[test]
    fn failure_is_per_file() {
        let tmp = TempDir::new().unwrap();
        let good = tmp.path().join("good.png");
        let missing = tmp.path().join("missing.png");
        std::fs::write(&good, b"good").unwrap();
        let backend = MockBackend::new().with_image(b"good", 100, 50);

        let reports = optimize_files(
            &backend,
            &[missing, good],
            None,
            &OptimizeOptions::default(),
        );

        assert!(matches!(reports[0].result, Err(BatchError::Io(_))));
        let ok = reports[1].result.as_ref().unwrap();
        assert_eq!(ok.output, tmp.path().join("good.optimized.jpg"));
        assert!(backend.get_operations().contains(&RecordedOp::Encode {
            width: 100,
            height: 50,
            quality: 80,
        }));
    }

    #[test]
    fn undecodable_file_reports_imaging_error() {
        let tmp = TempDir::new().unwrap();
        let junk = tmp.path().join("junk.png");
        std::fs::write(&junk, b"not an image").unwrap();

        let reports = optimize_files(
            &MockBackend::new(),
            &[junk.clone()],
            None,
            &OptimizeOptions::default(),
        );

        assert!(matches!(reports[0].result, Err(BatchError::Imaging(_))));
        assert!(!tmp.path().join("junk.optimized.jpg").exists());
    }
}
