//! Semantic wrapper for the library name written into a manifest.
//!
//! The name is used verbatim as the value of the `Automatic-Module-Name`
//! declaration. Only blank names are rejected; callers are expected to pass
//! names they have already resolved.

use crate::error::{PatchError, Result};
use std::fmt;

/// A non-blank logical library name.
///
/// # Examples
///
/// ```
/// use scala_suffix::library_name::LibraryName;
///
/// let name = LibraryName::try_from("scala-library_2.13").unwrap();
/// assert_eq!(name.as_str(), "scala-library_2.13");
/// assert!(LibraryName::try_from("   ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LibraryName(String);

impl LibraryName {
    /// Get the library name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for LibraryName {
    type Error = PatchError;

    fn try_from(value: &str) -> Result<Self> {
        validate_library_name(value)?;
        Ok(Self(value.to_owned()))
    }
}

impl TryFrom<String> for LibraryName {
    type Error = PatchError;

    fn try_from(value: String) -> Result<Self> {
        validate_library_name(&value)?;
        Ok(Self(value))
    }
}

impl AsRef<str> for LibraryName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LibraryName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn validate_library_name(value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(PatchError::InvalidLibraryName {
            reason: "library name must not be blank".to_owned(),
        });
    }
    Ok(())
}
