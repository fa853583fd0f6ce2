use super::report::StatetestResult;
use engine::{ExecutionEngine, RevmEngine, StepTracerConfig};
use revm::primitives::{B256, U256};
use statetest_types::{ForkError, MessageError, SpecName, Subtest, TestSuite, TestUnit};
use store::{log_rlp_hash, InMemoryStore, StateStore};
use thiserror::Error;
use tracing::debug;

/// Why a single subtest failed.
#[derive(Debug, Error)]
pub enum TestErrorKind {
    /// Fork name did not resolve.
    #[error(transparent)]
    UnsupportedFork(#[from] ForkError),
    /// Message could not be built from the transaction template.
    #[error(transparent)]
    Message(#[from] MessageError),
    /// Computed state root differs from the expected one.
    #[error("post state root mismatch: got {got}, want {expected}")]
    StateRootMismatch {
        /// Computed root.
        got: B256,
        /// Root from the fixture.
        expected: B256,
    },
    /// Computed logs hash differs from the expected one.
    #[error("post state logs hash mismatch: got {got}, want {expected}")]
    LogsHashMismatch {
        /// Computed hash.
        got: B256,
        /// Hash from the fixture.
        expected: B256,
    },
}

/// Runner settings.
#[derive(Clone, Copy, Debug, Default)]
pub struct RunnerConfig {
    /// Step trace written to stderr, `None` disables tracing.
    pub trace: Option<StepTracerConfig>,
    /// Attach the post-state dump to failed results.
    pub dump_state_on_failure: bool,
}

/// Runs every subtest of every unit in `suite`, in order, each against a
/// fresh store.
pub fn run_suite(suite: &TestSuite, config: &RunnerConfig) -> Vec<StatetestResult> {
    let mut engine = match config.trace {
        Some(trace) => RevmEngine::with_tracer(trace),
        None => RevmEngine::new(),
    };

    let mut results = Vec::new();
    for (name, unit) in &suite.0 {
        for subtest in unit.subtests() {
            let mut store = InMemoryStore::new();
            let outcome = run_subtest(&mut engine, &mut store, unit, &subtest);
            if let Err(err) = &outcome {
                debug!(name = %name, fork = subtest.fork, index = subtest.index, %err, "subtest failed");
            }

            let state = (outcome.is_err() && config.dump_state_on_failure).then(|| store.dump());
            results.push(StatetestResult {
                name: name.clone(),
                pass: outcome.is_ok(),
                fork: subtest.fork.to_string(),
                error: outcome.err().map(|err| err.to_string()),
                state,
            });
        }
    }
    results
}

/// Executes one subtest of `unit` against `store`, which must be empty.
///
/// Resolves the fork, loads the pre-state, applies the selected message and
/// compares the resulting state root and logs hash with the expected ones.
/// A message the engine rejects is not a failure: its changes are reverted
/// and verification runs against the unchanged state.
pub fn run_subtest<E, S>(
    engine: &mut E,
    store: &mut S,
    unit: &TestUnit,
    subtest: &Subtest<'_>,
) -> Result<(), TestErrorKind>
where
    E: ExecutionEngine,
    S: StateStore,
{
    debug!(fork = subtest.fork, index = subtest.index, "running subtest");

    let spec: SpecName = subtest.fork.parse()?;
    let rules = spec.rules(unit.env.number(), unit.env.timestamp());
    let context = unit.env.context();

    unit.load_pre_state(store);
    let message = unit.transaction.to_message(&subtest.test.indexes)?;

    let snapshot = store.snapshot();
    let logs = match engine.apply(store, &message, &context, rules) {
        Ok(outcome) => {
            debug!(status = ?outcome.status, gas_used = outcome.gas_used, "message applied");
            outcome.logs
        }
        Err(err) => {
            debug!(%err, "message rejected");
            store.revert_to_snapshot(snapshot);
            Vec::new()
        }
    };

    store.commit(rules.delete_empty_objects);
    // The coinbase is touched after commit, so it exists even when the
    // message was rejected or it self-destructed, unless it gets pruned.
    store.add_balance(context.coinbase, U256::ZERO);

    let root = store.intermediate_root(rules.delete_empty_objects);
    debug!(%root, "computed post state root");
    if root != subtest.test.hash {
        return Err(TestErrorKind::StateRootMismatch {
            got: root,
            expected: subtest.test.hash,
        });
    }

    let logs_hash = log_rlp_hash(&logs);
    if logs_hash != subtest.test.logs {
        return Err(TestErrorKind::LogsHashMismatch {
            got: logs_hash,
            expected: subtest.test.logs,
        });
    }

    Ok(())
}
