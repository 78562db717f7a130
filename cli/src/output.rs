//! Output helpers for the runner.

use crate::error::{Result, RunnerError};
use crate::report::PatchReport;
use scala_suffix::PatchRequest;
use std::fmt::Display;
use std::io::Write;

/// Write a line to stderr, ignoring failures.
pub fn write_stderr_line(stderr: &mut dyn Write, message: impl Display) {
    if writeln!(stderr, "{message}").is_err() {
        // Best-effort logging; ignore write failures.
    }
}

/// Write a line to `out`.
///
/// # Errors
///
/// Returns [`RunnerError::WriteFailed`] if the write fails.
pub fn write_line(out: &mut dyn Write, message: impl Display) -> Result<()> {
    writeln!(out, "{message}").map_err(|source| RunnerError::WriteFailed { source })
}

/// Describe the requests a dry run would process.
///
/// # Examples
///
/// ```
/// use scala_suffix::{LibraryName, PatchRequest};
/// use scala_suffix_cli::output::format_plan;
///
/// let requests = [PatchRequest::new(
///     "/jars/foo.jar",
///     LibraryName::try_from("foo").unwrap(),
/// )];
/// let plan = format_plan(&requests);
/// assert!(plan.contains("foo -> /jars/foo.jar"));
/// ```
#[must_use]
pub fn format_plan(requests: &[PatchRequest]) -> String {
    let mut output = String::from("Dry run - no archives will be modified\n");
    if requests.is_empty() {
        output.push_str("\nNo libraries matched a dependency.");
        return output;
    }

    output.push_str("\nArchives to patch:");
    for request in requests {
        output.push_str(&format!("\n  - {} -> {}", request.library, request.archive));
    }
    output
}

/// Render `report` for the terminal or, with `json`, for scripts.
#[must_use]
pub fn format_report(report: &PatchReport, json: bool) -> String {
    if json {
        report.to_json()
    } else {
        report.summary_line()
    }
}
