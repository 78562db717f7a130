//! Single-entry zip I/O: extraction, replacement, and validation.
//!
//! Replacing an entry rebuilds the archive into a sibling temporary file,
//! raw-copying every other entry, and only renames it over the original
//! once the rebuilt file validates. A failed rebuild leaves the original
//! archive untouched. Bytes in front of the first entry (the launcher
//! script of a self-executing JAR) and the archive comment are carried
//! over to the rebuilt file.

use crate::error::{PatchError, Result, absolute};
use crate::zip_params::ZipWriteParams;
use camino::{Utf8Component, Utf8Path, Utf8PathBuf};
use std::fs::{self, File};
use std::io::{self, Read, Seek, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use zip::result::{ZipError, ZipResult};
use zip::write::SimpleFileOptions;
use zip::{ZipArchive, ZipWriter};

/// Extract `entry_path` from `archive` into `dest_dir`, keeping the
/// entry's directory structure.
///
/// Returns the path of the extracted file.
///
/// # Errors
///
/// Returns [`PatchError::PathTraversal`] if the entry name would escape
/// `dest_dir`, or [`PatchError::ArchiveRead`] if the archive cannot be
/// opened, the entry does not exist, or the file cannot be written.
pub fn extract_entry(
    archive: &Utf8Path,
    entry_path: &str,
    dest_dir: &Utf8Path,
) -> Result<Utf8PathBuf> {
    validate_entry_path(entry_path)?;
    let dest = dest_dir.join(entry_path);

    let mut zip = open_archive(archive)?;
    let mut entry = zip.by_name(entry_path).map_err(|err| match err {
        ZipError::FileNotFound => PatchError::archive_read(
            archive,
            format!(
                "entry {entry_path} not found, no file {} extracted",
                absolute(&dest)
            ),
        ),
        other => PatchError::archive_read(archive, other),
    })?;

    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent).map_err(|err| {
            PatchError::archive_read(archive, format!("cannot create {parent}: {err}"))
        })?;
    }
    let mut out = File::create(&dest)
        .map_err(|err| PatchError::archive_read(archive, format!("cannot create {dest}: {err}")))?;
    io::copy(&mut entry, &mut out).map_err(|err| PatchError::archive_read(archive, err))?;

    Ok(dest)
}

/// Read the raw contents of one entry.
///
/// # Errors
///
/// Returns [`PatchError::ArchiveRead`] if the archive or entry cannot be
/// read.
pub fn read_entry(archive: &Utf8Path, entry_path: &str) -> Result<Vec<u8>> {
    let mut zip = open_archive(archive)?;
    let mut entry = zip
        .by_name(entry_path)
        .map_err(|err| PatchError::archive_read(archive, format!("{entry_path}: {err}")))?;
    let mut contents = Vec::new();
    entry
        .read_to_end(&mut contents)
        .map_err(|err| PatchError::archive_read(archive, err))?;
    Ok(contents)
}

/// Store the contents of `source` in `archive` as configured by `params`.
///
/// # Errors
///
/// Returns [`PatchError::ManifestRead`] if `source` cannot be read,
/// [`PatchError::ArchiveWrite`] if the rebuild or the final rename fails or
/// the entry exists while overriding is disabled, and
/// [`PatchError::ArchiveCorruption`] if the rebuilt archive fails
/// validation.
pub fn write_entry(archive: &Utf8Path, source: &Utf8Path, params: &ZipWriteParams) -> Result<()> {
    write_entry_checked(archive, source, params, check_archive)
}

/// [`write_entry`] with the structural check supplied by the caller.
fn write_entry_checked(
    archive: &Utf8Path,
    source: &Utf8Path,
    params: &ZipWriteParams,
    check: fn(&Path, Option<&str>) -> bool,
) -> Result<()> {
    let contents = fs::read(source).map_err(|err| PatchError::ManifestRead {
        path: source.to_owned(),
        source: err,
    })?;
    let entry_name = params.entry_name_in_zip();

    let staged = stage_rebuild(archive, &contents, params)?;
    if !check(staged.path(), Some(entry_name)) {
        return Err(PatchError::corruption(archive));
    }

    let permissions = fs::metadata(archive)
        .map_err(|err| PatchError::archive_write(archive, err))?
        .permissions();
    staged
        .as_file()
        .set_permissions(permissions)
        .map_err(|err| PatchError::archive_write(archive, err))?;
    staged
        .persist(archive)
        .map_err(|err| PatchError::archive_write(archive, err.error))?;

    if !check(archive.as_std_path(), Some(entry_name)) {
        return Err(PatchError::corruption(archive));
    }
    Ok(())
}

/// Returns `true` when `archive` is a structurally valid zip: the central
/// directory parses and every local header it points at is readable.
#[must_use]
pub fn validate_archive(archive: &Utf8Path) -> bool {
    check_archive(archive.as_std_path(), None)
}

fn open_archive(archive: &Utf8Path) -> Result<ZipArchive<File>> {
    let file = File::open(archive).map_err(|err| PatchError::archive_read(archive, err))?;
    ZipArchive::new(file).map_err(|err| PatchError::archive_read(archive, err))
}

/// Rebuild `archive` into a temporary file next to it, with `contents`
/// stored under the configured entry name.
fn stage_rebuild(
    archive: &Utf8Path,
    contents: &[u8],
    params: &ZipWriteParams,
) -> Result<NamedTempFile> {
    let parent = archive
        .parent()
        .filter(|dir| !dir.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."));
    let mut staged =
        NamedTempFile::new_in(parent).map_err(|err| PatchError::archive_write(archive, err))?;
    let mut source = open_archive(archive)?;
    let prefix = prefix_len(&mut source).map_err(|err| PatchError::archive_read(archive, err))?;
    copy_prefix(archive, prefix, staged.as_file_mut())?;

    let entry_name = params.entry_name_in_zip();
    let options = SimpleFileOptions::default().compression_method(params.compression());
    // The writer records absolute offsets, so entries land after the prefix.
    let mut writer = ZipWriter::new(staged.as_file_mut());
    writer.set_raw_comment(source.comment().into());
    let mut written = false;

    for index in 0..source.len() {
        let entry = source
            .by_index_raw(index)
            .map_err(|err| PatchError::archive_read(archive, err))?;
        if entry.name() != entry_name {
            writer
                .raw_copy_file(entry)
                .map_err(|err| PatchError::archive_write(archive, err))?;
            continue;
        }
        if !params.override_existing() {
            return Err(PatchError::archive_write(
                archive,
                format!("entry {entry_name} already exists"),
            ));
        }
        // Duplicate entries with the replaced name are dropped.
        if !written {
            store_entry(&mut writer, entry_name, options, contents)
                .map_err(|err| PatchError::archive_write(archive, err))?;
            written = true;
        }
    }
    if !written {
        store_entry(&mut writer, entry_name, options, contents)
            .map_err(|err| PatchError::archive_write(archive, err))?;
    }

    writer
        .finish()
        .map_err(|err| PatchError::archive_write(archive, err))?;
    Ok(staged)
}

/// Number of bytes in front of the first local header, such as the shell
/// stub of a self-executing JAR.
fn prefix_len(source: &mut ZipArchive<File>) -> ZipResult<u64> {
    let mut start = source.central_directory_start();
    for index in 0..source.len() {
        start = start.min(source.by_index_raw(index)?.header_start());
    }
    Ok(start)
}

fn copy_prefix(archive: &Utf8Path, len: u64, staged: &mut File) -> Result<()> {
    if len == 0 {
        return Ok(());
    }
    let original = File::open(archive).map_err(|err| PatchError::archive_read(archive, err))?;
    let copied = io::copy(&mut original.take(len), staged)
        .map_err(|err| PatchError::archive_write(archive, err))?;
    if copied != len {
        return Err(PatchError::archive_write(
            archive,
            format!("expected {len} leading bytes, copied {copied}"),
        ));
    }
    Ok(())
}

fn store_entry<W: Write + Seek>(
    writer: &mut ZipWriter<W>,
    name: &str,
    options: SimpleFileOptions,
    contents: &[u8],
) -> ZipResult<()> {
    writer.start_file(name, options)?;
    writer.write_all(contents)?;
    Ok(())
}

/// Structural check used before and after an archive is replaced.
///
/// When `entry` is given, that entry is also read in full so its CRC is
/// verified.
fn check_archive(path: &Path, entry: Option<&str>) -> bool {
    let Ok(file) = File::open(path) else {
        return false;
    };
    let Ok(mut zip) = ZipArchive::new(file) else {
        return false;
    };
    if (0..zip.len()).any(|index| zip.by_index_raw(index).is_err()) {
        return false;
    }
    let Some(name) = entry else {
        return true;
    };
    match zip.by_name(name) {
        Ok(mut stored) => io::copy(&mut stored, &mut io::sink()).is_ok(),
        Err(_) => false,
    }
}

/// Reject entry names that are absolute or climb out of the destination.
fn validate_entry_path(entry_path: &str) -> Result<()> {
    let path = Utf8Path::new(entry_path);
    let escapes = path.is_absolute()
        || path.components().any(|component| {
            matches!(
                component,
                Utf8Component::ParentDir | Utf8Component::RootDir | Utf8Component::Prefix(_)
            )
        });
    if escapes {
        return Err(PatchError::PathTraversal {
            path: entry_path.to_owned(),
        });
    }
    Ok(())
}
