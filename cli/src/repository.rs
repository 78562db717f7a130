//! Local Maven repository layout.
//!
//! Dependencies configured without an explicit archive path are looked up
//! under `<repo>/<group as path>/<artifact>/<version>/<artifact>-<version>.jar`.

use crate::error::{Result, RunnerError};
use camino::{Utf8Path, Utf8PathBuf};
use directories_next::BaseDirs;

/// A local repository root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalRepository {
    root: Utf8PathBuf,
}

impl LocalRepository {
    /// Use `root` as the repository.
    #[must_use]
    pub fn new(root: impl Into<Utf8PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The user's `~/.m2/repository`.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::RepositoryNotFound`] if the home directory
    /// cannot be determined or is not valid UTF-8.
    pub fn user_default() -> Result<Self> {
        let base = BaseDirs::new().ok_or_else(|| RunnerError::RepositoryNotFound {
            reason: "could not determine the home directory".to_owned(),
        })?;
        let home = Utf8PathBuf::try_from(base.home_dir().to_owned()).map_err(|e| {
            RunnerError::RepositoryNotFound {
                reason: format!("home directory is not valid UTF-8: {e}"),
            }
        })?;
        Ok(Self::new(home.join(".m2").join("repository")))
    }

    /// The repository root.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Location of the JAR for the given coordinates.
    ///
    /// # Examples
    ///
    /// ```
    /// use scala_suffix_cli::repository::LocalRepository;
    ///
    /// let repo = LocalRepository::new("/home/me/.m2/repository");
    /// let jar = repo.artifact_path("org.scala-lang", "scala-library", "2.13.12");
    /// assert_eq!(
    ///     jar,
    ///     "/home/me/.m2/repository/org/scala-lang/scala-library/2.13.12/scala-library-2.13.12.jar"
    /// );
    /// ```
    #[must_use]
    pub fn artifact_path(&self, group_id: &str, artifact_id: &str, version: &str) -> Utf8PathBuf {
        let mut path = self.root.clone();
        for segment in group_id.split('.').filter(|s| !s.is_empty()) {
            path.push(segment);
        }
        path.push(artifact_id);
        path.push(version);
        path.push(format!("{artifact_id}-{version}.jar"));
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::dotted_group("org.typelevel", "cats-core_2.13", "2.10.0", "org/typelevel/cats-core_2.13/2.10.0/cats-core_2.13-2.10.0.jar")]
    #[case::single_segment("junit", "junit", "4.13.2", "junit/junit/4.13.2/junit-4.13.2.jar")]
    fn builds_maven_layout_paths(
        #[case] group_id: &str,
        #[case] artifact_id: &str,
        #[case] version: &str,
        #[case] relative: &str,
    ) {
        let repo = LocalRepository::new("/repo");
        assert_eq!(
            repo.artifact_path(group_id, artifact_id, version),
            Utf8Path::new("/repo").join(relative)
        );
    }

    #[cfg(unix)]
    #[test]
    fn user_default_lives_under_home() {
        let home = tempfile::tempdir().expect("temp home");
        let home_path = home.path().to_str().expect("UTF-8 temp path").to_owned();

        let repo = temp_env::with_var("HOME", Some(&home_path), LocalRepository::user_default)
            .expect("repository resolves");

        assert_eq!(
            repo.root(),
            Utf8Path::new(&home_path).join(".m2").join("repository")
        );
    }
}
