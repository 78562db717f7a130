//! Error types for the archive patcher.
//!
//! Every variant that concerns an archive carries the archive's absolute
//! path so callers can report failures without extra context.

use camino::{Utf8Path, Utf8PathBuf};
use thiserror::Error;

/// Errors that can occur while patching a single archive.
#[derive(Debug, Error)]
pub enum PatchError {
    /// The archive could not be opened or the manifest entry could not be
    /// extracted from it.
    #[error("cannot read archive {archive}: {reason}")]
    ArchiveRead {
        /// Absolute path of the archive.
        archive: Utf8PathBuf,
        /// Description of the read failure.
        reason: String,
    },

    /// The extracted manifest file disappeared from the scratch directory
    /// before the patch ran.
    #[error("no file {path} found")]
    MissingEntryFile {
        /// Absolute path where the extracted entry was expected.
        path: Utf8PathBuf,
    },

    /// The archive failed structural validation after the rewrite.
    #[error("after the operation the zip file is INVALID: {archive}")]
    ArchiveCorruption {
        /// Absolute path of the archive.
        archive: Utf8PathBuf,
    },

    /// Rebuilding the archive or replacing it on disk failed.
    #[error("cannot write archive {archive}: {reason}")]
    ArchiveWrite {
        /// Absolute path of the archive.
        archive: Utf8PathBuf,
        /// Description of the write failure.
        reason: String,
    },

    /// The extracted manifest file could not be read or rewritten.
    #[error("cannot access manifest file {path}")]
    ManifestRead {
        /// Path of the extracted manifest file.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A library name was rejected.
    #[error("invalid library name: {reason}")]
    InvalidLibraryName {
        /// Description of the validation failure.
        reason: String,
    },

    /// An entry name would escape the extraction directory.
    #[error("path traversal detected: {path}")]
    PathTraversal {
        /// The offending entry name.
        path: String,
    },
}

impl PatchError {
    pub(crate) fn archive_read(archive: &Utf8Path, reason: impl ToString) -> Self {
        Self::ArchiveRead {
            archive: absolute(archive),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn archive_write(archive: &Utf8Path, reason: impl ToString) -> Self {
        Self::ArchiveWrite {
            archive: absolute(archive),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn corruption(archive: &Utf8Path) -> Self {
        Self::ArchiveCorruption {
            archive: absolute(archive),
        }
    }

    /// Returns the archive this error refers to, when it names one.
    #[must_use]
    pub fn archive(&self) -> Option<&Utf8Path> {
        match self {
            Self::ArchiveRead { archive, .. }
            | Self::ArchiveCorruption { archive }
            | Self::ArchiveWrite { archive, .. } => Some(archive),
            Self::MissingEntryFile { .. }
            | Self::ManifestRead { .. }
            | Self::InvalidLibraryName { .. }
            | Self::PathTraversal { .. } => None,
        }
    }
}

/// Resolves `path` against the current directory without touching the
/// filesystem, falling back to the path as given.
pub(crate) fn absolute(path: &Utf8Path) -> Utf8PathBuf {
    std::path::absolute(path)
        .ok()
        .and_then(|resolved| Utf8PathBuf::try_from(resolved).ok())
        .unwrap_or_else(|| path.to_owned())
}

/// Result type alias using [`PatchError`].
pub type Result<T> = std::result::Result<T, PatchError>;
