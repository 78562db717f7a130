//! CLI argument definitions for the scala-suffix runner.
//!
//! This module defines the command-line interface using clap. It is separated
//! from the main entrypoint to keep the binary small and focused on
//! orchestration.

use crate::dependency::ResolvedDependency;
use camino::Utf8PathBuf;
use clap::Parser;
use log::LevelFilter;

/// Add `Automatic-Module-Name` entries to Scala library JARs.
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "scala-suffix")]
#[command(version, about)]
#[command(long_about = concat!(
    "Add `Automatic-Module-Name` entries to Scala library JARs.\n\n",
    "Scala libraries carry the Scala version in their artifact id and rarely ",
    "declare a module name, so the Java module system cannot name them. This ",
    "tool rewrites META-INF/MANIFEST.MF inside each selected archive and ",
    "appends an explicit declaration, leaving archives that already declare one ",
    "untouched.\n\n",
    "Libraries are selected with -l/--library or the `libraries` key of the ",
    "configuration file and matched against the configured dependencies by ",
    "artifact id or GROUP:ARTIFACT.",
))]
#[command(after_help = concat!(
    "EXAMPLES:\n",
    "  Patch the libraries listed in ./scala-suffix.toml:\n",
    "    $ scala-suffix\n\n",
    "  Patch one archive directly:\n",
    "    $ scala-suffix -l scala-library -j org.scala-lang:scala-library=lib/scala-library.jar\n\n",
    "  Preview without touching any archive:\n",
    "    $ scala-suffix --dry-run\n\n",
    "  Machine-readable report:\n",
    "    $ scala-suffix --json",
))]
pub struct Cli {
    /// Configuration file [default: scala-suffix.toml if present].
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<Utf8PathBuf>,

    /// Library to patch, as ARTIFACT or GROUP:ARTIFACT (can be repeated).
    #[arg(short = 'l', long = "library", value_name = "ID")]
    pub libraries: Vec<String>,

    /// Dependency archive given directly (can be repeated).
    #[arg(short = 'j', long = "jar", value_name = "GROUP:ARTIFACT[:VERSION]=PATH")]
    pub jars: Vec<ResolvedDependency>,

    /// Local Maven repository [default: ~/.m2/repository].
    #[arg(long, value_name = "DIR")]
    pub local_repository: Option<Utf8PathBuf>,

    /// Show the archives that would be patched and exit.
    #[arg(long)]
    pub dry_run: bool,

    /// Print the report as JSON.
    #[arg(long)]
    pub json: bool,

    /// Increase log verbosity (repeatable: -v, -vv).
    #[arg(
        short,
        long = "verbose",
        action = clap::ArgAction::Count,
        conflicts_with = "quiet"
    )]
    pub verbosity: u8,

    /// Only log errors.
    #[arg(short, long, conflicts_with = "verbosity")]
    pub quiet: bool,
}

impl Cli {
    /// Log level selected by `-q` and `-v`.
    ///
    /// # Examples
    ///
    /// ```
    /// use log::LevelFilter;
    /// use scala_suffix_cli::cli::Cli;
    ///
    /// assert_eq!(Cli::default().log_level(), LevelFilter::Info);
    /// let verbose = Cli { verbosity: 1, ..Cli::default() };
    /// assert_eq!(verbose.log_level(), LevelFilter::Debug);
    /// ```
    #[must_use]
    pub const fn log_level(&self) -> LevelFilter {
        if self.quiet {
            return LevelFilter::Error;
        }
        match self.verbosity {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
