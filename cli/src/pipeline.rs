//! Sequential processing of patch requests.
//!
//! Requests run one at a time against a shared [`Workspace`]. A failed
//! request is logged and recorded in the report; later requests still run.

use crate::report::{PatchReport, ReportEntry};
use crate::workspace::Workspace;
use camino::Utf8Path;
use log::{debug, error, info};
use scala_suffix::{PatchOutcome, PatchRequest, ZipWriteParams, patch_archive};

/// Applies the manifest patch to one archive.
#[cfg_attr(test, mockall::automock)]
pub trait ManifestPatcher {
    /// Patch `request.archive`, staging files under `scratch_dir`.
    fn patch(&self, request: &PatchRequest, scratch_dir: &Utf8Path) -> PatchOutcome;
}

/// [`ManifestPatcher`] backed by the zip archive patch.
#[derive(Debug, Clone)]
pub struct ZipManifestPatcher {
    params: ZipWriteParams,
}

impl ZipManifestPatcher {
    /// Patch archives using `params` for the rewritten entry.
    #[must_use]
    pub const fn new(params: ZipWriteParams) -> Self {
        Self { params }
    }
}

impl Default for ZipManifestPatcher {
    fn default() -> Self {
        Self::new(ZipWriteParams::default())
    }
}

impl ManifestPatcher for ZipManifestPatcher {
    fn patch(&self, request: &PatchRequest, scratch_dir: &Utf8Path) -> PatchOutcome {
        patch_archive(request, scratch_dir, &self.params)
    }
}

/// Run every request in order and collect the outcomes.
///
/// The workspace is emptied before and after each request.
pub fn run_requests(
    requests: &[PatchRequest],
    workspace: &mut Workspace,
    patcher: &dyn ManifestPatcher,
) -> PatchReport {
    let mut report = PatchReport::default();
    for request in requests {
        let outcome = {
            let scope = workspace.scope();
            patcher.patch(request, scope.path())
        };
        log_outcome(request, &outcome);
        report.push(ReportEntry::from_outcome(request, &outcome));
    }
    report
}

fn log_outcome(request: &PatchRequest, outcome: &PatchOutcome) {
    match outcome {
        PatchOutcome::Patched => info!(
            "added Automatic-Module-Name: {} to {}",
            request.library, request.archive
        ),
        PatchOutcome::NoOp => debug!(
            "{} already declares an automatic module name",
            request.archive
        ),
        PatchOutcome::Failed(err) => {
            let archive = err.archive().map_or_else(
                || absolute_display(&request.archive),
                ToString::to_string,
            );
            error!("failed to patch {archive}: {err}");
        }
    }
}

fn absolute_display(path: &Utf8Path) -> String {
    std::path::absolute(path.as_std_path())
        .map_or_else(|_| path.to_string(), |abs| abs.display().to_string())
}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod tests;
