//! Command line interface.

pub mod statetest;

use clap::Parser;

/// `stvm` subcommands.
#[derive(Parser, Debug)]
#[command(infer_subcommands = true)]
pub enum MainCmd {
    /// Execute a state test file and print the results as JSON
    Statetest(statetest::Cmd),
}

/// Errors returned by [`MainCmd::run`].
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// `statetest` failed before producing a report.
    #[error(transparent)]
    Statetest(#[from] statetest::Error),
}

impl MainCmd {
    /// Runs the selected subcommand.
    pub fn run(&self) -> Result<(), Error> {
        match self {
            Self::Statetest(cmd) => cmd.run().map_err(Into::into),
        }
    }
}
