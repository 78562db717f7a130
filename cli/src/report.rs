//! Per-run summary of patch outcomes.
//!
//! The report is rendered either as a one-line summary for humans or as
//! JSON for scripting (`--json`).

use camino::Utf8PathBuf;
use scala_suffix::{PatchOutcome, PatchRequest};
use serde::Serialize;

/// What happened to one archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryStatus {
    /// The declaration was added.
    Patched,
    /// The archive already declared a module name.
    Unchanged,
    /// The patch failed.
    Failed,
}

/// One line of the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportEntry {
    /// Library name that was declared or requested.
    pub library: String,
    /// Archive the request targeted.
    pub archive: Utf8PathBuf,
    /// Outcome classification.
    pub status: EntryStatus,
    /// Failure description for [`EntryStatus::Failed`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ReportEntry {
    /// Summarise the outcome of `request`.
    #[must_use]
    pub fn from_outcome(request: &PatchRequest, outcome: &PatchOutcome) -> Self {
        let (status, error) = match outcome {
            PatchOutcome::Patched => (EntryStatus::Patched, None),
            PatchOutcome::NoOp => (EntryStatus::Unchanged, None),
            PatchOutcome::Failed(err) => (EntryStatus::Failed, Some(err.to_string())),
        };
        Self {
            library: request.library.as_str().to_owned(),
            archive: request.archive.clone(),
            status,
            error,
        }
    }
}

/// Outcomes of every request in a run, in processing order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatchReport {
    entries: Vec<ReportEntry>,
}

#[derive(Serialize)]
struct ReportJson<'a> {
    patched: usize,
    unchanged: usize,
    failed: usize,
    entries: &'a [ReportEntry],
}

impl PatchReport {
    /// Append an entry.
    pub fn push(&mut self, entry: ReportEntry) {
        self.entries.push(entry);
    }

    /// All entries.
    #[must_use]
    pub fn entries(&self) -> &[ReportEntry] {
        &self.entries
    }

    /// Number of archives that were patched.
    #[must_use]
    pub fn patched(&self) -> usize {
        self.count(EntryStatus::Patched)
    }

    /// Number of archives left unchanged.
    #[must_use]
    pub fn unchanged(&self) -> usize {
        self.count(EntryStatus::Unchanged)
    }

    /// Number of failed requests.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.count(EntryStatus::Failed)
    }

    fn count(&self, status: EntryStatus) -> usize {
        self.entries.iter().filter(|e| e.status == status).count()
    }

    /// Human-readable summary.
    ///
    /// # Examples
    ///
    /// ```
    /// use scala_suffix_cli::report::PatchReport;
    ///
    /// let report = PatchReport::default();
    /// assert_eq!(report.summary_line(), "Patched 0, unchanged 0, failed 0");
    /// ```
    #[must_use]
    pub fn summary_line(&self) -> String {
        format!(
            "Patched {}, unchanged {}, failed {}",
            self.patched(),
            self.unchanged(),
            self.failed()
        )
    }

    /// The report as pretty-printed JSON.
    #[must_use]
    pub fn to_json(&self) -> String {
        let json = ReportJson {
            patched: self.patched(),
            unchanged: self.unchanged(),
            failed: self.failed(),
            entries: &self.entries,
        };
        serde_json::to_string_pretty(&json).unwrap_or_else(|_| "{}".to_owned())
    }
}
