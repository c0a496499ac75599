//! Run files from disk through an upload control and collect what the user
//! would have seen. Backs the `check` CLI command.

use crate::component::IntakeState;
use crate::file::SelectedFile;
use crate::notify::NotificationCenter;
use crate::page::{ComponentId, Page};
use crate::validation::{RejectReason, ValidationResult};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// What happened to one file.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CheckOutcome {
    Previewed {
        name: String,
        size_label: String,
        type_label: String,
        width: u32,
        height: u32,
        fingerprint: String,
    },
    Rejected {
        reason: RejectReason,
        message: String,
    },
    Undecodable {
        message: String,
    },
    Unreadable {
        error: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckReport {
    pub path: PathBuf,
    #[serde(flatten)]
    pub outcome: CheckOutcome,
}

impl CheckReport {
    pub fn is_accepted(&self) -> bool {
        matches!(self.outcome, CheckOutcome::Previewed { .. })
    }
}

/// Feed each path, in order, into the component `id` as a picker selection.
///
/// `notes` must be the notifier the page was built with; rejection messages
/// are read back from it.
pub fn check_files(
    page: &mut Page,
    id: ComponentId,
    notes: &NotificationCenter,
    paths: &[PathBuf],
) -> Vec<CheckReport> {
    paths
        .iter()
        .map(|path| CheckReport {
            path: path.clone(),
            outcome: check_one(page, id, notes, path),
        })
        .collect()
}

fn check_one(page: &mut Page, id: ComponentId, notes: &NotificationCenter, path: &Path) -> CheckOutcome {
    let file = match SelectedFile::from_path(path) {
        Ok(file) => file,
        Err(e) => {
            return CheckOutcome::Unreadable {
                error: e.to_string(),
            };
        }
    };

    let Some(component) = page.component_mut(id) else {
        return CheckOutcome::Unreadable {
            error: "no upload control attached".to_string(),
        };
    };

    let verdict = component.select(vec![file]);
    component.wait_idle();
    let last_message = notes.latest().map(|t| t.message).unwrap_or_default();

    match (verdict, component.state(), component.preview()) {
        (Some(ValidationResult::Accepted), IntakeState::Previewing, Some(preview)) => {
            let dims = preview.image.dimensions();
            CheckOutcome::Previewed {
                name: preview.display_name.clone(),
                size_label: preview.display_size_label.clone(),
                type_label: preview.type_label.clone(),
                width: dims.width,
                height: dims.height,
                fingerprint: preview.fingerprint.clone(),
            }
        }
        (Some(ValidationResult::Rejected(reason)), _, _) => CheckOutcome::Rejected {
            reason,
            message: last_message,
        },
        _ => CheckOutcome::Undecodable {
            message: last_message,
        },
    }
}
