//! Scratch workspace shared by the requests of one run.
//!
//! The directory lives for the whole run. Each request borrows it through a
//! [`ScratchScope`], which empties the directory when created and again when
//! dropped, so no request sees another's extracted files.

use crate::error::{Result, RunnerError};
use camino::{Utf8Path, Utf8PathBuf};
use log::error;
use std::fs;
use std::io;
use tempfile::TempDir;

/// Prefix of the temporary workspace directory.
pub const WORKSPACE_PREFIX: &str = "scala-suffix-";

/// A temporary directory removed when the workspace is dropped.
#[derive(Debug)]
pub struct Workspace {
    dir: TempDir,
    path: Utf8PathBuf,
}

impl Workspace {
    /// Create a workspace in the system temporary directory.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::WorkspaceCreation`] if the directory cannot be
    /// created or its path is not valid UTF-8.
    pub fn create() -> Result<Self> {
        Self::from_builder_result(tempfile::Builder::new().prefix(WORKSPACE_PREFIX).tempdir())
    }

    /// Create a workspace inside `parent`.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::WorkspaceCreation`] on the same conditions as
    /// [`Self::create`].
    pub fn create_in(parent: &Utf8Path) -> Result<Self> {
        Self::from_builder_result(
            tempfile::Builder::new()
                .prefix(WORKSPACE_PREFIX)
                .tempdir_in(parent),
        )
    }

    fn from_builder_result(dir: io::Result<TempDir>) -> Result<Self> {
        let dir = dir.map_err(|source| RunnerError::WorkspaceCreation { source })?;
        let path = Utf8PathBuf::try_from(dir.path().to_owned()).map_err(|e| {
            RunnerError::WorkspaceCreation {
                source: e.into_io_error(),
            }
        })?;
        Ok(Self { dir, path })
    }

    /// The workspace directory.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Remove everything inside the workspace, keeping the directory.
    ///
    /// # Errors
    ///
    /// Returns the first I/O error encountered.
    pub fn clean(&self) -> io::Result<()> {
        for entry in fs::read_dir(&self.path)? {
            let entry = entry?;
            if entry.file_type()?.is_dir() {
                fs::remove_dir_all(entry.path())?;
            } else {
                fs::remove_file(entry.path())?;
            }
        }
        Ok(())
    }

    /// Borrow the workspace for one request.
    ///
    /// The directory is emptied now and again when the scope is dropped.
    /// Cleaning failures are logged and otherwise ignored.
    pub fn scope(&mut self) -> ScratchScope<'_> {
        clean_logged(self);
        ScratchScope { workspace: self }
    }

    /// Remove the workspace directory.
    ///
    /// # Errors
    ///
    /// Returns the I/O error from removing the directory.
    pub fn close(self) -> io::Result<()> {
        self.dir.close()
    }
}

/// Exclusive use of the workspace for one request.
#[derive(Debug)]
pub struct ScratchScope<'a> {
    workspace: &'a Workspace,
}

impl ScratchScope<'_> {
    /// The scratch directory.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        self.workspace.path()
    }
}

impl Drop for ScratchScope<'_> {
    fn drop(&mut self) {
        clean_logged(self.workspace);
    }
}

fn clean_logged(workspace: &Workspace) {
    if let Err(err) = workspace.clean() {
        error!("failed to clean workspace {}: {err}", workspace.path());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn workspace() -> Workspace {
        Workspace::create().expect("workspace")
    }

    fn populate(path: &Utf8Path) {
        fs::create_dir_all(path.join("META-INF")).expect("create dir");
        fs::write(path.join("META-INF/MANIFEST.MF"), "Manifest-Version: 1.0\n")
            .expect("write file");
        fs::write(path.join("stray.txt"), "x").expect("write file");
    }

    fn is_empty(path: &Utf8Path) -> bool {
        fs::read_dir(path).expect("read dir").next().is_none()
    }

    #[rstest]
    fn directory_name_carries_prefix(workspace: Workspace) {
        let name = workspace.path().file_name().expect("directory name");
        assert!(name.starts_with(WORKSPACE_PREFIX), "unexpected name {name}");
    }

    #[rstest]
    fn clean_removes_files_and_directories(workspace: Workspace) {
        populate(workspace.path());
        workspace.clean().expect("clean");
        assert!(workspace.path().is_dir());
        assert!(is_empty(workspace.path()));
    }

    #[rstest]
    fn scope_starts_empty_and_is_emptied_on_drop(mut workspace: Workspace) {
        populate(workspace.path());
        {
            let scope = workspace.scope();
            assert!(is_empty(scope.path()));
            populate(scope.path());
        }
        assert!(is_empty(workspace.path()));
    }

    #[rstest]
    fn close_removes_the_directory(workspace: Workspace) {
        let path = workspace.path().to_owned();
        workspace.close().expect("close");
        assert!(!path.exists());
    }

    #[test]
    fn create_in_uses_the_parent() {
        let parent = tempfile::tempdir().expect("parent");
        let parent_path = Utf8Path::from_path(parent.path()).expect("UTF-8 path");
        let workspace = Workspace::create_in(parent_path).expect("workspace");
        assert_eq!(workspace.path().parent(), Some(parent_path));
    }
}
