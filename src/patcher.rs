//! The manifest patch for one archive.
//!
//! [`ArchivePatcher`] extracts the manifest into a scratch directory when it
//! is opened, and [`ArchivePatcher::patch`] decides whether the archive
//! needs an `Automatic-Module-Name` line and writes it back if so.
//! [`patch_archive`] wraps both steps and folds the result into a
//! [`PatchOutcome`].

use crate::archive::{extract_entry, write_entry};
use crate::error::{PatchError, Result, absolute};
use crate::library_name::LibraryName;
use crate::manifest::ManifestLines;
use crate::zip_params::ZipWriteParams;
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;

/// One unit of work: an archive and the library name to declare in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchRequest {
    /// Path of the archive to patch.
    pub archive: Utf8PathBuf,
    /// Name written as the `Automatic-Module-Name` value.
    pub library: LibraryName,
}

impl PatchRequest {
    /// Create a request for `archive`.
    #[must_use]
    pub fn new(archive: impl Into<Utf8PathBuf>, library: LibraryName) -> Self {
        Self {
            archive: archive.into(),
            library,
        }
    }
}

/// Result of patching one archive.
#[derive(Debug)]
pub enum PatchOutcome {
    /// The manifest already declared a module name; nothing was written.
    NoOp,
    /// The declaration was added and the archive validated.
    Patched,
    /// The patch failed; the archive may or may not have been touched,
    /// depending on the failure.
    Failed(PatchError),
}

impl PatchOutcome {
    /// Returns `true` for [`PatchOutcome::Patched`].
    #[must_use]
    pub const fn is_patched(&self) -> bool {
        matches!(self, Self::Patched)
    }

    /// Returns `true` for [`PatchOutcome::Failed`].
    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    /// The failure, if any.
    #[must_use]
    pub const fn error(&self) -> Option<&PatchError> {
        match self {
            Self::Failed(err) => Some(err),
            Self::NoOp | Self::Patched => None,
        }
    }
}

impl From<Result<bool>> for PatchOutcome {
    fn from(result: Result<bool>) -> Self {
        match result {
            Ok(true) => Self::Patched,
            Ok(false) => Self::NoOp,
            Err(err) => Self::Failed(err),
        }
    }
}

/// An archive whose manifest has been extracted and is ready to patch.
///
/// # Examples
///
/// ```no_run
/// use camino::Utf8Path;
/// use scala_suffix::library_name::LibraryName;
/// use scala_suffix::patcher::ArchivePatcher;
/// use scala_suffix::zip_params::ZipWriteParams;
///
/// let params = ZipWriteParams::default();
/// let patcher = ArchivePatcher::open(
///     Utf8Path::new("lib/scala-library-2.13.12.jar"),
///     Utf8Path::new("/tmp/scala-suffix-scratch"),
///     &params,
/// )?;
/// let patched = patcher.patch(&LibraryName::try_from("scala-library")?)?;
/// println!("patched: {patched}");
/// # Ok::<(), scala_suffix::error::PatchError>(())
/// ```
#[derive(Debug)]
pub struct ArchivePatcher {
    archive: Utf8PathBuf,
    manifest_file: Utf8PathBuf,
    params: ZipWriteParams,
}

impl ArchivePatcher {
    /// Open `archive` and extract its manifest into `scratch_dir`.
    ///
    /// # Errors
    ///
    /// Returns [`PatchError::ArchiveRead`] if the archive cannot be opened or
    /// has no entry at the configured path.
    pub fn open(archive: &Utf8Path, scratch_dir: &Utf8Path, params: &ZipWriteParams) -> Result<Self> {
        let manifest_file = extract_entry(archive, params.entry_path(), scratch_dir)?;
        Ok(Self {
            archive: archive.to_owned(),
            manifest_file,
            params: params.clone(),
        })
    }

    /// The archive being patched.
    #[must_use]
    pub fn archive(&self) -> &Utf8Path {
        &self.archive
    }

    /// The extracted manifest inside the scratch directory.
    #[must_use]
    pub fn manifest_file(&self) -> &Utf8Path {
        &self.manifest_file
    }

    /// Add `Automatic-Module-Name: <library>` unless the manifest already
    /// mentions the key.
    ///
    /// Returns `false` when nothing was written and `true` when the archive
    /// was rewritten and validated.
    ///
    /// # Errors
    ///
    /// Returns [`PatchError::MissingEntryFile`] if the extracted manifest no
    /// longer exists, [`PatchError::ManifestRead`] if it cannot be read or
    /// rewritten, and any error of [`write_entry`].
    pub fn patch(self, library: &LibraryName) -> Result<bool> {
        if !self.manifest_file.is_file() {
            return Err(PatchError::MissingEntryFile {
                path: absolute(&self.manifest_file),
            });
        }

        let bytes = fs::read(&self.manifest_file).map_err(|err| self.manifest_error(err))?;
        let manifest = ManifestLines::parse(&bytes);
        if manifest.declares_module_name() {
            return Ok(false);
        }

        let patched = manifest.with_module_name(library);
        fs::write(&self.manifest_file, patched.render()).map_err(|err| self.manifest_error(err))?;
        write_entry(&self.archive, &self.manifest_file, &self.params)?;
        Ok(true)
    }

    fn manifest_error(&self, source: std::io::Error) -> PatchError {
        PatchError::ManifestRead {
            path: absolute(&self.manifest_file),
            source,
        }
    }
}

/// Patch the archive named by `request`, staging the manifest in
/// `scratch_dir`.
///
/// # Examples
///
/// ```no_run
/// use camino::Utf8Path;
/// use scala_suffix::library_name::LibraryName;
/// use scala_suffix::patcher::{PatchOutcome, PatchRequest, patch_archive};
/// use scala_suffix::zip_params::ZipWriteParams;
///
/// let request = PatchRequest::new(
///     "lib/cats-core_2.13-2.10.0.jar",
///     LibraryName::try_from("cats-core_2.13").unwrap(),
/// );
/// match patch_archive(&request, Utf8Path::new("/tmp/scratch"), &ZipWriteParams::default()) {
///     PatchOutcome::Patched => println!("patched"),
///     PatchOutcome::NoOp => println!("already named"),
///     PatchOutcome::Failed(err) => eprintln!("{err}"),
/// }
/// ```
#[must_use]
pub fn patch_archive(
    request: &PatchRequest,
    scratch_dir: &Utf8Path,
    params: &ZipWriteParams,
) -> PatchOutcome {
    ArchivePatcher::open(&request.archive, scratch_dir, params)
        .and_then(|patcher| patcher.patch(&request.library))
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::patched(Ok(true), true, false)]
    #[case::no_op(Ok(false), false, false)]
    #[case::failed(
        Err(PatchError::MissingEntryFile { path: Utf8PathBuf::from("/tmp/MANIFEST.MF") }),
        false,
        true
    )]
    fn outcome_folds_patch_results(
        #[case] result: Result<bool>,
        #[case] patched: bool,
        #[case] failed: bool,
    ) {
        let outcome = PatchOutcome::from(result);
        assert_eq!(outcome.is_patched(), patched);
        assert_eq!(outcome.is_failed(), failed);
        assert_eq!(outcome.error().is_some(), failed);
    }

    #[test]
    fn request_keeps_archive_and_name() {
        let library = LibraryName::try_from("foo").expect("valid name");
        let request = PatchRequest::new("/jars/foo-1.0.jar", library.clone());
        assert_eq!(request.archive, Utf8PathBuf::from("/jars/foo-1.0.jar"));
        assert_eq!(request.library, library);
    }
}
