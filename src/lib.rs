//! # Image Intake
//!
//! The client-side half of an image upload: a file arrives from a picker or a
//! drop, is validated, previewed, and optionally shrunk before it is sent
//! anywhere.
//!
//! # Architecture: One Component per Input
//!
//! Each upload control on a page is an independent [`component::UploadComponent`]
//! driven by events (select, drag over, drag leave, drop, reset):
//!
//! ```text
//! SelectedFile ──▶ validate ──▶ decode (background) ──▶ preview pane
//!                     │               │
//!                     ▼               ▼
//!               error toast     error toast
//! ```
//!
//! Decodes run off the event thread. A later selection always wins: every
//! selection bumps the component's generation, and a decode that finishes for
//! an older generation is dropped instead of rendered.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`validation`] | Type allow-list and size limit; the accept/reject decision |
//! | [`preview`] | Decoded preview, labels, and the preview pane surface |
//! | [`component`] | The upload control state machine and latest-wins decoding |
//! | [`page`] | Every upload control on a page, addressed by [`page::ComponentId`] |
//! | [`notify`] | Toast notifications: the [`notify::Notifier`] seam and an in-memory center |
//! | [`imaging`] | Pure-Rust decode, downscale, and JPEG encode behind [`imaging::ImageBackend`] |
//! | [`file`] | [`file::SelectedFile`]: name, size, type, and shared bytes |
//! | [`format`] | Human-readable size and type labels |
//! | [`config`] | `intake.toml` loading, validation, and merging |
//! | [`check`] | Run files from disk through a component (CLI `check`) |
//! | [`batch`] | Parallel optimization of files on disk (CLI `optimize`) |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Type Before Size
//!
//! An oversized PDF is reported as the wrong type, not as too large. The
//! type check is cheaper to act on for the user: no amount of resizing turns
//! a PDF into an image.
//!
//! ## Generations, Not Cancellation
//!
//! Decoders are not interruptible, so an outdated decode is left to finish and
//! its result discarded. This keeps the backend trait a plain synchronous
//! interface and lets the mock backend in tests block on a gate to force any
//! completion order.
//!
//! ## JPEG-Only Optimization
//!
//! [`imaging::optimize`] always emits JPEG. Uploads are photographs in
//! practice, and a single output format keeps server-side handling trivial.
//! Transparency is flattened.

pub mod batch;
pub mod check;
pub mod component;
pub mod config;
pub mod file;
pub mod format;
pub mod imaging;
pub mod notify;
pub mod output;
pub mod page;
pub mod preview;
pub mod validation;

#[cfg(test)]
pub(crate) mod test_helpers;
