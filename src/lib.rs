//! Adds `Automatic-Module-Name` declarations to JAR manifests.
//!
//! Scala libraries are published with the Scala version in their artefact
//! name (`cats-core_2.13`) and usually without a module name in their
//! manifest, which leaves the Java module system to derive one it cannot
//! use. This crate rewrites `META-INF/MANIFEST.MF` inside such archives so
//! they declare an explicit automatic module name.
//!
//! # Modules
//!
//! - [`archive`] - Single-entry zip extraction, replacement, and validation
//! - [`error`] - Error types for a single patch
//! - [`library_name`] - Semantic wrapper for the declared name
//! - [`manifest`] - Line-oriented manifest view and declaration check
//! - [`patcher`] - The patch operation and its outcome
//! - [`zip_params`] - Write parameters for the rewritten entry

pub mod archive;
pub mod error;
pub mod library_name;
pub mod manifest;
pub mod patcher;
pub mod zip_params;

pub use error::{PatchError, Result};
pub use library_name::LibraryName;
pub use patcher::{ArchivePatcher, PatchOutcome, PatchRequest, patch_archive};
pub use zip_params::ZipWriteParams;
