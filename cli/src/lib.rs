//! scala-suffix runner library.
//!
//! This crate turns a configuration file and command-line flags into a list
//! of archives to patch, runs the `scala-suffix` core patch on each of them
//! in turn, and reports the outcomes. It is used by the `scala-suffix`
//! binary and can be consumed programmatically for testing.
//!
//! # Modules
//!
//! - [`cli`] - Command-line argument definitions
//! - [`config`] - `scala-suffix.toml` loading and path rebasing
//! - [`coordinates`] - Library identifier parsing and matching
//! - [`dependency`] - Dependencies with a known archive location
//! - [`error`] - Errors that stop a run
//! - [`output`] - Plan and report rendering
//! - [`patch_flow`] - End-to-end run orchestration
//! - [`pipeline`] - Sequential request processing
//! - [`report`] - Per-run outcome summary
//! - [`repository`] - Local Maven repository layout
//! - [`resolution`] - Identifier to archive resolution
//! - [`workspace`] - Scratch directory lifecycle

pub mod cli;
pub mod config;
pub mod coordinates;
pub mod dependency;
pub mod error;
pub mod output;
pub mod patch_flow;
pub mod pipeline;
pub mod report;
pub mod repository;
pub mod resolution;
pub mod workspace;
