//! Library identifiers as written in the configuration.
//!
//! An identifier is either a bare artifact id (`scala-library`) or a
//! `group:artifact` pair (`org.typelevel:cats-core_2.13`).

use std::fmt;
use thiserror::Error;

/// Errors arising from unusable identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoordinateError {
    /// A `:`-qualified identifier is missing its artifact part.
    #[error("cannot resolve \"{identifier}\": expected GROUP:ARTIFACT")]
    Incomplete {
        /// The rejected identifier.
        identifier: String,
    },
}

/// A parsed library identifier.
///
/// # Examples
///
/// ```
/// use scala_suffix_cli::coordinates::LibraryId;
///
/// let bare = LibraryId::parse("scala-library").unwrap();
/// assert!(bare.matches("org.scala-lang", "scala-library"));
///
/// let qualified = LibraryId::parse("org.example:bar").unwrap();
/// assert!(qualified.matches("org.example", "bar"));
/// assert!(!qualified.matches("org.other", "bar"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LibraryId {
    /// Matches any dependency with this artifact id.
    Artifact(String),
    /// Matches only the dependency with both ids.
    Qualified {
        /// Expected group id.
        group_id: String,
        /// Expected artifact id.
        artifact_id: String,
    },
}

impl LibraryId {
    /// Parse an identifier.
    ///
    /// A `:`-qualified identifier is split on `:` with trailing empty
    /// fields discarded; the first two remaining fields, trimmed, become the
    /// group and artifact ids and any further fields are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`CoordinateError::Incomplete`] when fewer than two fields
    /// remain, as in `foo:`.
    pub fn parse(identifier: &str) -> Result<Self, CoordinateError> {
        if !identifier.contains(':') {
            return Ok(Self::Artifact(identifier.to_owned()));
        }

        let mut fields: Vec<&str> = identifier.split(':').collect();
        while fields.last().is_some_and(|field| field.is_empty()) {
            fields.pop();
        }
        match fields.as_slice() {
            [group_id, artifact_id, ..] => Ok(Self::Qualified {
                group_id: group_id.trim().to_owned(),
                artifact_id: artifact_id.trim().to_owned(),
            }),
            _ => Err(CoordinateError::Incomplete {
                identifier: identifier.to_owned(),
            }),
        }
    }

    /// Returns `true` when a dependency with these ids satisfies the
    /// identifier.
    ///
    /// Bare identifiers compare against the trimmed artifact id; qualified
    /// identifiers require both ids to be equal.
    #[must_use]
    pub fn matches(&self, group_id: &str, artifact_id: &str) -> bool {
        match self {
            Self::Artifact(expected) => artifact_id.trim() == expected,
            Self::Qualified {
                group_id: expected_group,
                artifact_id: expected_artifact,
            } => group_id == expected_group && artifact_id == expected_artifact,
        }
    }
}

impl fmt::Display for LibraryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Artifact(artifact_id) => write!(f, "{artifact_id}"),
            Self::Qualified {
                group_id,
                artifact_id,
            } => write!(f, "{group_id}:{artifact_id}"),
        }
    }
}
