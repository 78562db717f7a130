//! scala-suffix CLI entrypoint.
//!
//! This binary adds `Automatic-Module-Name` declarations to the manifests of
//! the configured dependency JARs and prints a summary of what changed.

use camino::Utf8PathBuf;
use clap::Parser;
use scala_suffix_cli::cli::Cli;
use scala_suffix_cli::error::{Result, RunnerError};
use scala_suffix_cli::output::write_stderr_line;
use scala_suffix_cli::patch_flow::execute;
use scala_suffix_cli::pipeline::ZipManifestPatcher;
use std::io::Write;

fn main() {
    let cli = Cli::parse();
    init_logging(&cli);
    let mut stderr = std::io::stderr();
    let run_result = run(&cli);
    let exit_code = exit_code_for_run_result(run_result, &mut stderr);
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}

fn init_logging(cli: &Cli) {
    env_logger::Builder::new()
        .filter_level(cli.log_level())
        .parse_default_env()
        .format_timestamp(None)
        .format_target(false)
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    let cwd = current_dir_utf8()?;
    let patcher = ZipManifestPatcher::default();
    let mut stdout = std::io::stdout().lock();
    execute(cli, &cwd, &patcher, &mut stdout)
}

/// Gets the current directory as a UTF-8 path.
fn current_dir_utf8() -> Result<Utf8PathBuf> {
    let cwd = std::env::current_dir()?;
    Utf8PathBuf::try_from(cwd).map_err(|e| RunnerError::Io(e.into_io_error()))
}

fn exit_code_for_run_result(result: Result<()>, stderr: &mut dyn Write) -> i32 {
    match result {
        Ok(()) => 0,
        Err(err) => {
            write_stderr_line(stderr, format!("error: {err}"));
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_code_for_run_result_returns_zero_on_success() {
        let mut stderr = Vec::new();
        let exit_code = exit_code_for_run_result(Ok(()), &mut stderr);
        assert_eq!(exit_code, 0);
        assert!(stderr.is_empty());
    }

    #[test]
    fn exit_code_for_run_result_prints_error_and_returns_one() {
        let err = RunnerError::ConfigNotFound {
            path: Utf8PathBuf::from("/project/missing.toml"),
        };

        let mut stderr = Vec::new();
        let exit_code = exit_code_for_run_result(Err(err), &mut stderr);
        assert_eq!(exit_code, 1);

        let stderr_text = String::from_utf8(stderr).expect("stderr was not UTF-8");
        assert!(stderr_text.contains("configuration file /project/missing.toml not found"));
    }

    #[test]
    fn current_dir_is_available() {
        let cwd = current_dir_utf8().expect("current directory");
        assert!(cwd.is_absolute());
    }
}
