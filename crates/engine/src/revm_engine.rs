use crate::{
    ApplyError, ApplyOutcome, ExecutionContext, ExecutionEngine, ExecutionStatus, ForkRules,
    Message, StepTracer, StepTracerConfig, StoreDatabase,
};
use core::convert::Infallible;
use revm::{
    context::{block::BlockEnv, cfg::CfgEnv, tx::TxEnv},
    context_interface::result::{EVMError, ExecutionResult, HaltReason, InvalidTransaction},
    inspector::InspectCommitEvm,
    primitives::{TxKind, U256},
    Context, ExecuteCommitEvm, MainBuilder, MainContext,
};
use store::StateStore;
use tracing::trace;

/// Chain id every message is executed with.
const CHAIN_ID: u64 = 1;

/// [`ExecutionEngine`] running messages on revm's mainnet EVM.
#[derive(Clone, Copy, Debug, Default)]
pub struct RevmEngine {
    tracer: Option<StepTracerConfig>,
}

impl RevmEngine {
    /// Engine without tracing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine writing a [`StepTracer`] trace to stderr for every message.
    pub fn with_tracer(config: StepTracerConfig) -> Self {
        Self {
            tracer: Some(config),
        }
    }
}

impl ExecutionEngine for RevmEngine {
    fn apply<S: StateStore>(
        &mut self,
        store: &mut S,
        message: &Message,
        context: &ExecutionContext,
        rules: ForkRules,
    ) -> Result<ApplyOutcome, ApplyError> {
        let mut cfg = CfgEnv::default();
        cfg.spec = rules.spec;
        cfg.chain_id = CHAIN_ID;
        cfg.disable_nonce_check = !message.enforce_checks;

        let block = block_env(context);
        let tx = tx_env(message);
        trace!(target: "engine", ?tx, spec = ?rules.spec, "applying message");

        let evm_context = Context::mainnet()
            .with_block(block)
            .with_cfg(cfg)
            .with_db(StoreDatabase::new(store, context.block_hash));

        let result = match self.tracer {
            Some(config) => evm_context
                .build_mainnet_with_inspector(StepTracer::stderr(config))
                .inspect_tx_commit(tx),
            None => evm_context.build_mainnet().transact_commit(tx),
        };

        result.map(outcome).map_err(apply_error)
    }
}

fn block_env(context: &ExecutionContext) -> BlockEnv {
    BlockEnv {
        number: U256::from(context.number),
        beneficiary: context.coinbase,
        timestamp: U256::from(context.timestamp),
        gas_limit: context.gas_limit,
        basefee: context.base_fee,
        difficulty: context.difficulty,
        prevrandao: context.prevrandao,
        ..Default::default()
    }
}

fn tx_env(message: &Message) -> TxEnv {
    let is_dynamic_fee = message.gas_priority_fee.is_some();
    TxEnv {
        tx_type: if is_dynamic_fee { 2 } else { 0 },
        caller: message.caller,
        gas_limit: message.gas_limit,
        gas_price: message.gas_price.saturating_to::<u128>(),
        kind: match message.to {
            Some(to) => TxKind::Call(to),
            None => TxKind::Create,
        },
        value: message.value,
        data: message.data.clone(),
        nonce: message.nonce,
        chain_id: is_dynamic_fee.then_some(CHAIN_ID),
        gas_priority_fee: message
            .gas_priority_fee
            .map(|fee| fee.saturating_to::<u128>()),
        ..Default::default()
    }
}

fn outcome(result: ExecutionResult<HaltReason>) -> ApplyOutcome {
    let status = match &result {
        ExecutionResult::Success { .. } => ExecutionStatus::Success,
        ExecutionResult::Revert { .. } => ExecutionStatus::Revert,
        ExecutionResult::Halt { .. } => ExecutionStatus::Halt,
    };
    ApplyOutcome {
        status,
        gas_used: result.gas_used(),
        output: result.output().cloned().unwrap_or_default(),
        logs: result.logs().to_vec(),
    }
}

fn apply_error(err: EVMError<Infallible, InvalidTransaction>) -> ApplyError {
    match err {
        EVMError::Transaction(err) => ApplyError::InvalidTransaction(err.to_string()),
        EVMError::Header(err) => ApplyError::InvalidHeader(err.to_string()),
        err => ApplyError::Other(err.to_string()),
    }
}
