//! End-to-end run: configuration, resolution, patching, and reporting.
//!
//! The binary parses arguments and sets up logging; everything after that
//! happens here so it can be driven from tests with a mocked patcher.

use crate::cli::Cli;
use crate::config::RunConfig;
use crate::dependency::ResolvedDependency;
use crate::error::{Result, RunnerError};
use crate::output::{format_plan, format_report, write_line};
use crate::pipeline::{ManifestPatcher, run_requests};
use crate::repository::LocalRepository;
use crate::resolution::resolve_requests;
use crate::workspace::Workspace;
use camino::{Utf8Path, Utf8PathBuf};
use log::{error, info};
use scala_suffix::PatchRequest;
use std::io::Write;

/// Configured libraries followed by those given with `--library`.
///
/// # Errors
///
/// Returns [`RunnerError::NoLibraries`] when both are empty.
pub fn collect_libraries(config: &RunConfig, cli: &Cli) -> Result<Vec<String>> {
    let libraries: Vec<String> = config
        .libraries
        .iter()
        .chain(&cli.libraries)
        .cloned()
        .collect();
    if libraries.is_empty() {
        return Err(RunnerError::NoLibraries);
    }
    Ok(libraries)
}

/// Dependencies from `--jar` followed by the configured ones.
///
/// `--jar` entries come first so they win when both sources match an
/// identifier.
///
/// # Errors
///
/// Returns [`RunnerError::RepositoryNotFound`] when a dependency needs the
/// default repository and the home directory is unknown, and
/// [`RunnerError::InvalidDependency`] for dependencies without a file or
/// version.
pub fn resolve_dependencies(config: &RunConfig, cli: &Cli) -> Result<Vec<ResolvedDependency>> {
    let mut dependencies = cli.jars.clone();
    if config.dependencies.is_empty() {
        return Ok(dependencies);
    }

    let configured = cli
        .local_repository
        .clone()
        .or_else(|| config.local_repository.clone());
    let repository = match configured {
        Some(root) => LocalRepository::new(root),
        None if config.dependencies.iter().any(|d| d.file.is_none()) => {
            LocalRepository::user_default()?
        }
        // Not consulted: every dependency names its file.
        None => LocalRepository::new(Utf8PathBuf::new()),
    };

    for dependency in &config.dependencies {
        dependencies.push(dependency.resolve(&repository)?);
    }
    Ok(dependencies)
}

/// Load the configuration and turn it into patch requests.
///
/// # Errors
///
/// Propagates configuration, library, and dependency errors.
pub fn plan_requests(cli: &Cli, cwd: &Utf8Path) -> Result<Vec<PatchRequest>> {
    let config = RunConfig::discover(cli.config.as_deref(), cwd)?;
    let libraries = collect_libraries(&config, cli)?;
    let dependencies = resolve_dependencies(&config, cli)?;
    Ok(resolve_requests(&libraries, &dependencies))
}

/// Run the patcher as configured by `cli`, writing the report to `out`.
///
/// Failures of individual archives are logged and counted in the report;
/// they do not make the run fail.
///
/// # Errors
///
/// Returns an error when the configuration is unusable, the workspace
/// cannot be created, or `out` cannot be written.
pub fn execute(
    cli: &Cli,
    cwd: &Utf8Path,
    patcher: &dyn ManifestPatcher,
    out: &mut dyn Write,
) -> Result<()> {
    let requests = plan_requests(cli, cwd)?;

    if cli.dry_run {
        return write_line(out, format_plan(&requests));
    }

    if requests.is_empty() {
        info!("no configured library matched a dependency");
    }

    let mut workspace = Workspace::create()?;
    let report = run_requests(&requests, &mut workspace, patcher);
    let workspace_path = workspace.path().to_owned();
    if let Err(err) = workspace.close() {
        error!("failed to remove workspace {workspace_path}: {err}");
    }

    if cli.json || !cli.quiet {
        write_line(out, format_report(&report, cli.json))?;
    }
    Ok(())
}
