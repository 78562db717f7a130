//! Write parameters for re-inserting an entry into an archive.

use crate::manifest::MANIFEST_PATH;
use zip::CompressionMethod;

/// Immutable settings describing how a rewritten entry is stored.
///
/// Built once at startup and passed to every patch.
///
/// # Examples
///
/// ```
/// use scala_suffix::zip_params::ZipWriteParams;
///
/// let params = ZipWriteParams::default();
/// assert_eq!(params.entry_path(), "META-INF/MANIFEST.MF");
/// assert_eq!(params.entry_name_in_zip(), "META-INF/MANIFEST.MF");
///
/// let flat = params.with_include_root_folder(false);
/// assert_eq!(flat.entry_name_in_zip(), "MANIFEST.MF");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZipWriteParams {
    entry_path: String,
    include_root_folder: bool,
    override_existing: bool,
    compression: CompressionMethod,
}

impl ZipWriteParams {
    /// Parameters for an arbitrary entry path, with the manifest defaults
    /// for every other setting.
    #[must_use]
    pub fn for_entry(entry_path: impl Into<String>) -> Self {
        Self {
            entry_path: entry_path.into(),
            include_root_folder: true,
            override_existing: true,
            compression: CompressionMethod::Deflated,
        }
    }

    /// Set whether the entry keeps its directory prefix inside the archive.
    #[must_use]
    pub fn with_include_root_folder(mut self, include: bool) -> Self {
        self.include_root_folder = include;
        self
    }

    /// Set whether an existing entry at the same path may be replaced.
    #[must_use]
    pub fn with_override_existing(mut self, override_existing: bool) -> Self {
        self.override_existing = override_existing;
        self
    }

    /// Set the compression method of the rewritten entry.
    #[must_use]
    pub fn with_compression(mut self, compression: CompressionMethod) -> Self {
        self.compression = compression;
        self
    }

    /// Path of the entry to extract, relative to the archive root.
    #[must_use]
    pub fn entry_path(&self) -> &str {
        &self.entry_path
    }

    /// Name the rewritten entry is stored under.
    ///
    /// Without the root folder only the final path component is kept.
    #[must_use]
    pub fn entry_name_in_zip(&self) -> &str {
        if self.include_root_folder {
            return &self.entry_path;
        }
        self.entry_path
            .rsplit('/')
            .next()
            .unwrap_or(&self.entry_path)
    }

    /// Whether the rewritten entry keeps its directory prefix.
    #[must_use]
    pub const fn include_root_folder(&self) -> bool {
        self.include_root_folder
    }

    /// Whether an existing entry may be replaced.
    #[must_use]
    pub const fn override_existing(&self) -> bool {
        self.override_existing
    }

    /// Compression method of the rewritten entry.
    #[must_use]
    pub const fn compression(&self) -> CompressionMethod {
        self.compression
    }
}

impl Default for ZipWriteParams {
    /// Manifest entry, root folder included, existing entry overridden,
    /// deflate compression.
    fn default() -> Self {
        Self::for_entry(MANIFEST_PATH)
    }
}
