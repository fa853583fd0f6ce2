use crate::{ExecutionContext, ForkRules, Message};
use revm::primitives::{Bytes, Log};
use store::StateStore;
use thiserror::Error;

/// How a message that was included ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExecutionStatus {
    /// Execution finished normally.
    Success,
    /// Execution hit `REVERT`.
    Revert,
    /// Execution halted exceptionally, consuming all gas.
    Halt,
}

/// Outcome of a message that was included in the state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApplyOutcome {
    /// How execution ended.
    pub status: ExecutionStatus,
    /// Gas charged to the sender, after refunds.
    pub gas_used: u64,
    /// Return data, or the deployed code for creations.
    pub output: Bytes,
    /// Logs emitted. Empty unless the status is [`ExecutionStatus::Success`].
    pub logs: Vec<Log>,
}

impl ApplyOutcome {
    /// Returns true if execution finished normally.
    pub fn is_success(&self) -> bool {
        self.status == ExecutionStatus::Success
    }
}

/// Reasons a message could not be applied.
///
/// When `apply` fails nothing was committed to the store by the engine.
#[derive(Debug, Error)]
pub enum ApplyError {
    /// The message is not valid against the current state, e.g. wrong nonce
    /// or insufficient balance for gas.
    #[error("invalid transaction: {0}")]
    InvalidTransaction(String),
    /// The block environment was rejected.
    #[error("invalid block header: {0}")]
    InvalidHeader(String),
    /// Any other engine failure.
    #[error("{0}")]
    Other(String),
}

/// Applies a single message to a [`StateStore`].
pub trait ExecutionEngine {
    /// Executes `message` in `context` under `rules`, writing the resulting
    /// state changes into `store`.
    ///
    /// Account finalization is left to the caller through [`StateStore::commit`].
    fn apply<S: StateStore>(
        &mut self,
        store: &mut S,
        message: &Message,
        context: &ExecutionContext,
        rules: ForkRules,
    ) -> Result<ApplyOutcome, ApplyError>;
}
