//! Run configuration loaded from `scala-suffix.toml`.
//!
//! The file names the libraries to patch and the dependencies they resolve
//! against. Relative paths inside the file are interpreted relative to the
//! directory containing it, so a configuration checked into a project works
//! regardless of the directory the runner is started from.

use crate::dependency::ResolvedDependency;
use crate::error::{Result, RunnerError};
use crate::repository::LocalRepository;
use camino::{Utf8Path, Utf8PathBuf};
use serde::Deserialize;
use std::io::ErrorKind;

/// File name looked up in the current directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "scala-suffix.toml";

/// Contents of the configuration file.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    /// Library identifiers, either `artifact` or `group:artifact`.
    pub libraries: Vec<String>,
    /// Local repository used for dependencies without a `file`.
    pub local_repository: Option<Utf8PathBuf>,
    /// Dependencies identifiers are matched against.
    pub dependencies: Vec<DependencyConfig>,
}

/// A `[[dependencies]]` table.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct DependencyConfig {
    /// Maven group id.
    pub group_id: String,
    /// Maven artifact id.
    pub artifact_id: String,
    /// Version used to locate the archive in the local repository.
    #[serde(default)]
    pub version: Option<String>,
    /// Explicit archive path; takes precedence over the repository lookup.
    #[serde(default)]
    pub file: Option<Utf8PathBuf>,
}

impl RunConfig {
    /// Parse configuration text read from `path`.
    ///
    /// Paths are returned as written; see [`Self::load`] for rebasing.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::InvalidConfig`] when the text is not valid TOML
    /// or contains unknown keys.
    ///
    /// # Examples
    ///
    /// ```
    /// use camino::Utf8Path;
    /// use scala_suffix_cli::config::RunConfig;
    ///
    /// let config = RunConfig::parse(
    ///     r#"libraries = ["scala-library"]"#,
    ///     Utf8Path::new("scala-suffix.toml"),
    /// )
    /// .unwrap();
    /// assert_eq!(config.libraries, ["scala-library"]);
    /// assert!(config.dependencies.is_empty());
    /// ```
    pub fn parse(text: &str, path: &Utf8Path) -> Result<Self> {
        toml::from_str(text).map_err(|e| RunnerError::InvalidConfig {
            path: path.to_owned(),
            reason: e.message().to_owned(),
        })
    }

    /// Read and parse the file at `path`, resolving relative paths against
    /// its directory.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::ConfigNotFound`] when the file does not exist
    /// and [`RunnerError::InvalidConfig`] when it cannot be read or parsed.
    pub fn load(path: &Utf8Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => RunnerError::ConfigNotFound {
                path: path.to_owned(),
            },
            _ => RunnerError::InvalidConfig {
                path: path.to_owned(),
                reason: e.to_string(),
            },
        })?;

        let config = Self::parse(&text, path)?;
        let base_dir = path.parent().unwrap_or_else(|| Utf8Path::new(""));
        Ok(config.rebased(base_dir))
    }

    /// Load `explicit` when given, otherwise [`DEFAULT_CONFIG_FILE`] in
    /// `cwd` if it exists.
    ///
    /// # Errors
    ///
    /// Propagates [`Self::load`] failures. A missing default file is not an
    /// error and yields an empty configuration.
    pub fn discover(explicit: Option<&Utf8Path>, cwd: &Utf8Path) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        let default_path = cwd.join(DEFAULT_CONFIG_FILE);
        if default_path.is_file() {
            Self::load(&default_path)
        } else {
            Ok(Self::default())
        }
    }

    fn rebased(mut self, base_dir: &Utf8Path) -> Self {
        self.local_repository = self
            .local_repository
            .map(|repo| rebase(repo, base_dir));
        for dependency in &mut self.dependencies {
            dependency.file = dependency.file.take().map(|file| rebase(file, base_dir));
        }
        self
    }
}

impl DependencyConfig {
    /// Locate the archive for this dependency.
    ///
    /// An explicit `file` wins; otherwise the archive is looked up in
    /// `repository` using the version.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::InvalidDependency`] when neither `file` nor
    /// `version` is set.
    pub fn resolve(&self, repository: &LocalRepository) -> Result<ResolvedDependency> {
        let file = match (&self.file, &self.version) {
            (Some(file), _) => file.clone(),
            (None, Some(version)) => {
                repository.artifact_path(&self.group_id, &self.artifact_id, version)
            }
            (None, None) => {
                return Err(RunnerError::InvalidDependency {
                    value: format!("{}:{}", self.group_id, self.artifact_id),
                    reason: "set either `file` or `version`".to_owned(),
                });
            }
        };

        Ok(ResolvedDependency {
            group_id: self.group_id.clone(),
            artifact_id: self.artifact_id.clone(),
            version: self.version.clone(),
            file,
        })
    }
}

fn rebase(path: Utf8PathBuf, base_dir: &Utf8Path) -> Utf8PathBuf {
    if path.is_relative() {
        base_dir.join(path)
    } else {
        path
    }
}
