//! Resolved dependencies: coordinates plus the archive on disk.

use crate::error::{Result, RunnerError};
use camino::Utf8PathBuf;
use std::str::FromStr;

/// A dependency whose archive location is known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedDependency {
    /// Maven group id.
    pub group_id: String,
    /// Maven artifact id.
    pub artifact_id: String,
    /// Version, when known.
    pub version: Option<String>,
    /// Path of the archive.
    pub file: Utf8PathBuf,
}

impl ResolvedDependency {
    /// Create a dependency without a version.
    #[must_use]
    pub fn new(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        file: impl Into<Utf8PathBuf>,
    ) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            version: None,
            file: file.into(),
        }
    }

    /// `group:artifact[:version]` for log messages.
    #[must_use]
    pub fn coordinates(&self) -> String {
        match &self.version {
            Some(version) => format!("{}:{}:{version}", self.group_id, self.artifact_id),
            None => format!("{}:{}", self.group_id, self.artifact_id),
        }
    }
}

/// Parses the `--jar GROUP:ARTIFACT[:VERSION]=PATH` form.
///
/// # Examples
///
/// ```
/// use scala_suffix_cli::dependency::ResolvedDependency;
///
/// let dep: ResolvedDependency = "org.scala-lang:scala-library:2.13.12=lib/scala-library.jar"
///     .parse()
///     .unwrap();
/// assert_eq!(dep.artifact_id, "scala-library");
/// assert_eq!(dep.version.as_deref(), Some("2.13.12"));
/// assert_eq!(dep.file, "lib/scala-library.jar");
/// ```
impl FromStr for ResolvedDependency {
    type Err = RunnerError;

    fn from_str(value: &str) -> Result<Self> {
        let invalid = |reason: &str| RunnerError::InvalidDependency {
            value: value.to_owned(),
            reason: reason.to_owned(),
        };

        let (coordinates, file) = value
            .split_once('=')
            .ok_or_else(|| invalid("expected GROUP:ARTIFACT[:VERSION]=PATH"))?;
        let file = file.trim();
        if file.is_empty() {
            return Err(invalid("archive path is empty"));
        }

        let fields: Vec<&str> = coordinates.split(':').map(str::trim).collect();
        let (group_id, artifact_id, version) = match fields.as_slice() {
            [group_id, artifact_id] => (*group_id, *artifact_id, None),
            [group_id, artifact_id, version] => (*group_id, *artifact_id, Some(*version)),
            _ => return Err(invalid("expected GROUP:ARTIFACT or GROUP:ARTIFACT:VERSION")),
        };
        if group_id.is_empty() || artifact_id.is_empty() {
            return Err(invalid("group and artifact ids must not be empty"));
        }

        Ok(Self {
            group_id: group_id.to_owned(),
            artifact_id: artifact_id.to_owned(),
            version: version.filter(|v| !v.is_empty()).map(str::to_owned),
            file: Utf8PathBuf::from(file),
        })
    }
}
