//! `statetest` subcommand: runs a state test file and prints one result per subtest.

mod report;
mod runner;

pub use report::{write_report, StatetestResult};
pub use runner::{run_subtest, run_suite, RunnerConfig, TestErrorKind};

use clap::{ArgAction, Parser};
use engine::StepTracerConfig;
use statetest_types::TestSuite;
use std::path::PathBuf;
use thiserror::Error;
use tracing::info;

/// Fixture level failures. Subtest failures are reported, not returned.
#[derive(Debug, Error)]
pub enum Error {
    /// The fixture file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// Fixture path.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },
    /// The fixture is not a valid state test file.
    #[error(transparent)]
    SerdeDeserialize(#[from] serde_json::Error),
    /// The report could not be written to stdout.
    #[error("failed to write report: {0}")]
    Report(#[source] std::io::Error),
}

/// `statetest` subcommand
#[derive(Parser, Debug)]
pub struct Cmd {
    /// Path to the state test file
    path: PathBuf,
    /// Exclude memory from the step trace
    #[arg(long, action = ArgAction::Set, default_value_t = true, num_args = 0..=1, default_missing_value = "true")]
    nomemory: bool,
    /// Exclude the stack from the step trace
    #[arg(long, action = ArgAction::Set, default_value_t = true, num_args = 0..=1, default_missing_value = "true")]
    nostack: bool,
    /// Exclude storage from the step trace
    #[arg(long, action = ArgAction::Set, default_value_t = true, num_args = 0..=1, default_missing_value = "true")]
    nostorage: bool,
    /// Exclude return data from the step trace
    #[arg(long, action = ArgAction::Set, default_value_t = true, num_args = 0..=1, default_missing_value = "true")]
    noreturndata: bool,
}

impl Cmd {
    /// Runs `statetest` command.
    pub fn run(&self) -> Result<(), Error> {
        let content = std::fs::read_to_string(&self.path).map_err(|source| Error::Io {
            path: self.path.clone(),
            source,
        })?;
        let suite: TestSuite = serde_json::from_str(&content)?;
        info!(path = %self.path.display(), tests = suite.0.len(), "loaded state test file");

        let results = run_suite(&suite, &self.runner_config());
        write_report(std::io::stdout().lock(), &results).map_err(Error::Report)
    }

    fn runner_config(&self) -> RunnerConfig {
        RunnerConfig {
            trace: Some(StepTracerConfig {
                disable_memory: self.nomemory,
                disable_stack: self.nostack,
                disable_storage: self.nostorage,
                disable_return_data: self.noreturndata,
            }),
            dump_state_on_failure: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Cmd, clap::Error> {
        Cmd::try_parse_from(std::iter::once("statetest").chain(args.iter().copied()))
    }

    #[test]
    fn trace_categories_are_excluded_by_default() {
        let cmd = parse(&["test.json"]).unwrap();
        assert_eq!(cmd.path, PathBuf::from("test.json"));
        assert_eq!(cmd.runner_config().trace, Some(StepTracerConfig::default()));
        assert!(!cmd.runner_config().dump_state_on_failure);
    }

    #[test]
    fn toggles_accept_explicit_values() {
        let cmd = parse(&[
            "test.json",
            "--nomemory=false",
            "--nostack",
            "--nostorage=false",
            "--noreturndata",
            "false",
        ])
        .unwrap();
        let trace = cmd.runner_config().trace.unwrap();
        assert!(!trace.disable_memory);
        assert!(trace.disable_stack);
        assert!(!trace.disable_storage);
        assert!(!trace.disable_return_data);
    }

    #[test]
    fn exactly_one_path() {
        assert!(parse(&[]).is_err());
        assert!(parse(&["a.json", "b.json"]).is_err());
        assert!(parse(&["a.json", "--nomemory=maybe"]).is_err());
    }

    #[test]
    fn unreadable_file_is_an_error() {
        let cmd = parse(&["/nonexistent/stvm/fixture.json"]).unwrap();
        assert!(matches!(cmd.run(), Err(Error::Io { .. })));
    }
}
