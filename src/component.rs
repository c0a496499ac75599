//! One upload control: file input, preview pane and drop zone.
//!
//! # Event model
//!
//! Every public `&mut self` method is one UI event handled to completion.
//! Decoding is the only slow step, so it runs on a worker thread and reports
//! back over a channel:
//!
//! ```text
//! select/drop ──► validate ──► Rejected ──► notify(error), clear input ──► Empty
//!                    │
//!                    └── Accepted ──► spawn decode(generation N) ──► Validating
//!                                                │
//!             pump()/wait_idle() ◄── DecodeOutcome(generation N)
//!                    │
//!                    ├── N != current generation ──► dropped as stale
//!                    ├── Ok(preview) ──► render, notify(success) ──► Previewing
//!                    └── Err(decode) ──► notify(error), clear input ──► Empty
//! ```
//!
//! Each selection bumps the generation and tears down the previous preview
//! before validating, so a slow decode of an earlier file can never reach the
//! pane. No cancellation is needed: stale results are simply ignored.

use crate::file::SelectedFile;
use crate::imaging::{BackendError, EncodedImage, ImageBackend, OptimizeOptions, optimize_decoded};
use crate::notify::{Level, Notifier};
use crate::preview::{Placeholders, PreviewPane, PreviewState, build_preview};
use crate::validation::{RejectReason, UploadPolicy, ValidationResult, validate};
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};
use thiserror::Error;

pub const SELECTED_MESSAGE: &str = "Image selected successfully!";
pub const DECODE_FAILED_MESSAGE: &str =
    "Could not preview this image. Please choose another file.";

/// Everything that can go wrong between picking a file and seeing it.
///
/// All variants are recoverable by the user picking another file; none of
/// them leave the component.
#[derive(Error, Debug)]
pub enum IntakeError {
    #[error("Unsupported file type: {0}")]
    UnsupportedType(String),
    #[error("File is {size} bytes, limit is {limit}")]
    TooLarge { size: u64, limit: u64 },
    #[error("Image could not be decoded: {0}")]
    Decode(#[source] BackendError),
}

impl IntakeError {
    fn rejected(reason: RejectReason, file: &SelectedFile, policy: &UploadPolicy) -> Self {
        match reason {
            RejectReason::UnsupportedType => IntakeError::UnsupportedType(file.mime_type.clone()),
            RejectReason::TooLarge => IntakeError::TooLarge {
                size: file.size_bytes,
                limit: policy.max_bytes,
            },
        }
    }

    /// Text for the error toast.
    pub fn user_message(&self, policy: &UploadPolicy) -> String {
        match self {
            IntakeError::UnsupportedType(_) => {
                policy.rejection_message(RejectReason::UnsupportedType)
            }
            IntakeError::TooLarge { .. } => policy.rejection_message(RejectReason::TooLarge),
            IntakeError::Decode(_) => DECODE_FAILED_MESSAGE.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntakeState {
    /// No file, or the last one was turned away.
    Empty,
    /// Accepted by validation, decode in flight.
    Validating,
    /// Preview on screen.
    Previewing,
}

/// The `<input type="file">` value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileInput {
    value: Option<SelectedFile>,
}

impl FileInput {
    pub fn value(&self) -> Option<&SelectedFile> {
        self.value.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_none()
    }

    fn set(&mut self, file: SelectedFile) {
        self.value = Some(file);
    }

    fn clear(&mut self) {
        self.value = None;
    }
}

/// Drag target wrapped around the preview pane.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DropZone {
    highlighted: bool,
}

impl DropZone {
    pub fn is_highlighted(&self) -> bool {
        self.highlighted
    }
}

/// Completion message from a decode worker.
#[derive(Debug)]
pub(crate) struct DecodeOutcome {
    generation: u64,
    result: Result<PreviewState, BackendError>,
}

pub struct UploadComponent {
    name: String,
    policy: UploadPolicy,
    backend: Arc<dyn ImageBackend>,
    notifier: Arc<dyn Notifier>,
    input: FileInput,
    pane: PreviewPane,
    drop_zone: DropZone,
    state: IntakeState,
    preview: Option<PreviewState>,
    generation: u64,
    stale_discarded: u64,
    tx: Sender<DecodeOutcome>,
    rx: Receiver<DecodeOutcome>,
}

impl UploadComponent {
    pub fn new(
        name: impl Into<String>,
        policy: UploadPolicy,
        placeholders: Placeholders,
        backend: Arc<dyn ImageBackend>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            name: name.into(),
            policy,
            backend,
            notifier,
            input: FileInput::default(),
            pane: PreviewPane::new(placeholders),
            drop_zone: DropZone::default(),
            state: IntakeState::Empty,
            preview: None,
            generation: 0,
            stale_discarded: 0,
            tx,
            rx,
        }
    }

    /// The file picker changed. Only the first file is used; an empty
    /// selection (picker cancelled) changes nothing.
    pub fn select(&mut self, files: Vec<SelectedFile>) -> Option<ValidationResult> {
        let file = files.into_iter().next()?;
        Some(self.ingest(file))
    }

    pub fn drag_over(&mut self) {
        self.drop_zone.highlighted = true;
    }

    pub fn drag_leave(&mut self) {
        self.drop_zone.highlighted = false;
    }

    /// Files dropped on the zone. Routed exactly like a picker selection.
    pub fn drop_files(&mut self, files: Vec<SelectedFile>) -> Option<ValidationResult> {
        self.drop_zone.highlighted = false;
        if files.len() > 1 {
            tracing::debug!(
                input = %self.name,
                dropped = files.len(),
                "multiple files dropped, using the first"
            );
        }
        self.select(files)
    }

    /// Discard the current file, e.g. after the form was submitted.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.input.clear();
        self.tear_down();
        self.state = IntakeState::Empty;
    }

    /// Apply every decode result that has arrived, without blocking.
    /// Returns how many messages were handled (stale ones included).
    pub fn pump(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(outcome) = self.rx.try_recv() {
            self.apply(outcome);
            handled += 1;
        }
        handled
    }

    /// Block until the in-flight decode (if any) has been applied.
    pub fn wait_idle(&mut self) {
        while self.state == IntakeState::Validating {
            match self.rx.recv() {
                Ok(outcome) => self.apply(outcome),
                Err(_) => break,
            }
        }
    }

    /// Block for the next decode message and apply it, stale or not.
    pub fn wait_next(&mut self) {
        if let Ok(outcome) = self.rx.recv() {
            self.apply(outcome);
        }
    }

    /// Re-encode the file currently on screen for upload.
    ///
    /// Returns `None` when nothing is being previewed.
    pub fn optimize_current(
        &self,
        options: &OptimizeOptions,
    ) -> Option<Result<EncodedImage, BackendError>> {
        let preview = self.preview.as_ref()?;
        Some(optimize_decoded(self.backend.as_ref(), &preview.image, options))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn policy(&self) -> &UploadPolicy {
        &self.policy
    }

    pub fn state(&self) -> IntakeState {
        self.state
    }

    pub fn preview(&self) -> Option<&PreviewState> {
        self.preview.as_ref()
    }

    pub fn pane(&self) -> &PreviewPane {
        &self.pane
    }

    pub fn input(&self) -> &FileInput {
        &self.input
    }

    pub fn drop_zone(&self) -> DropZone {
        self.drop_zone
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Decode results thrown away because a newer file had been chosen.
    pub fn stale_discarded(&self) -> u64 {
        self.stale_discarded
    }

    fn ingest(&mut self, file: SelectedFile) -> ValidationResult {
        self.generation += 1;
        self.tear_down();
        self.state = IntakeState::Validating;

        tracing::debug!(
            input = %self.name,
            file = %file.name,
            mime = %file.mime_type,
            size = file.size_bytes,
            generation = self.generation,
            "file selected"
        );

        let verdict = validate(&file, &self.policy);
        match verdict {
            ValidationResult::Accepted => {
                self.input.set(file.clone());
                self.spawn_decode(file);
            }
            ValidationResult::Rejected(reason) => {
                let err = IntakeError::rejected(reason, &file, &self.policy);
                self.fail(err);
            }
        }
        verdict
    }

    fn spawn_decode(&mut self, file: SelectedFile) {
        let generation = self.generation;
        let backend = Arc::clone(&self.backend);
        let tx = self.tx.clone();
        let worker_file = file.clone();

        let spawned = std::thread::Builder::new()
            .name(format!("decode-{}", self.name))
            .spawn(move || {
                let result = decode_guarded(backend.as_ref(), &worker_file);
                // Send fails only once the component has been dropped.
                let _ = tx.send(DecodeOutcome { generation, result });
            });

        if let Err(e) = spawned {
            tracing::warn!(input = %self.name, error = %e, "decode thread unavailable, decoding inline");
            let result = decode_guarded(self.backend.as_ref(), &file);
            self.apply(DecodeOutcome { generation, result });
        }
    }

    pub(crate) fn apply(&mut self, outcome: DecodeOutcome) {
        if outcome.generation != self.generation || self.state != IntakeState::Validating {
            self.stale_discarded += 1;
            tracing::debug!(
                input = %self.name,
                stale = outcome.generation,
                current = self.generation,
                "discarding stale decode"
            );
            return;
        }

        match outcome.result {
            Ok(preview) => {
                self.pane.render(&preview);
                tracing::info!(
                    input = %self.name,
                    file = %preview.display_name,
                    width = preview.image.dimensions().width,
                    height = preview.image.dimensions().height,
                    "preview ready"
                );
                self.preview = Some(preview);
                self.state = IntakeState::Previewing;
                self.notifier.notify(SELECTED_MESSAGE, Level::Success);
            }
            Err(e) => self.fail(IntakeError::Decode(e)),
        }
    }

    fn fail(&mut self, err: IntakeError) {
        tracing::warn!(input = %self.name, error = %err, "upload rejected");
        self.notifier
            .notify(&err.user_message(&self.policy), Level::Error);
        self.input.clear();
        self.tear_down();
        self.state = IntakeState::Empty;
    }

    fn tear_down(&mut self) {
        self.preview = None;
        self.pane.clear();
    }
}

/// Decode, turning a decoder panic into an ordinary error so the component
/// always hears back.
fn decode_guarded(
    backend: &dyn ImageBackend,
    file: &SelectedFile,
) -> Result<PreviewState, BackendError> {
    catch_unwind(AssertUnwindSafe(|| build_preview(backend, file))).unwrap_or_else(|_| {
        Err(BackendError::Decode(format!(
            "decoder panicked on {}",
            file.name
        )))
    })
}
