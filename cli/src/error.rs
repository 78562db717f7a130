//! Error types for the scala-suffix runner.
//!
//! These errors abort a run before any archive is touched. Failures of
//! individual archives are not errors at this level; they are reported as
//! [`scala_suffix::PatchOutcome::Failed`] and the run moves on.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that stop a run.
#[derive(Debug, Error)]
pub enum RunnerError {
    /// An explicitly requested configuration file does not exist.
    #[error("configuration file {path} not found")]
    ConfigNotFound {
        /// Path that was requested.
        path: Utf8PathBuf,
    },

    /// The configuration file could not be read or parsed.
    #[error("invalid configuration {path}: {reason}")]
    InvalidConfig {
        /// Path of the configuration file.
        path: Utf8PathBuf,
        /// Description of the problem.
        reason: String,
    },

    /// A `--jar` argument or configured dependency is malformed.
    #[error("invalid dependency \"{value}\": {reason}")]
    InvalidDependency {
        /// The rejected value.
        value: String,
        /// Description of the problem.
        reason: String,
    },

    /// Neither the configuration nor the command line named a library.
    #[error("no libraries to patch; pass --library or list them in the configuration")]
    NoLibraries,

    /// The local repository location could not be determined.
    #[error("local repository not found: {reason}")]
    RepositoryNotFound {
        /// Description of why the repository could not be located.
        reason: String,
    },

    /// The scratch workspace could not be created.
    #[error("failed to create the scratch workspace")]
    WorkspaceCreation {
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to write output.
    #[error("failed to write output")]
    WriteFailed {
        /// The underlying error that caused the write to fail.
        #[source]
        source: std::io::Error,
    },

    /// An I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using [`RunnerError`].
pub type Result<T> = std::result::Result<T, RunnerError>;
