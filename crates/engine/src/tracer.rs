//! Per-step JSON tracer.
//!
//! Emits one JSON object per executed instruction followed by a summary
//! line once the outermost call or create returns. Stack, memory, storage
//! and return data are each optional since they dominate the output size.

use revm::{
    bytecode::opcode::{self, OpCode},
    context_interface::{ContextTr, JournalTr, Transaction},
    inspector::Inspector,
    interpreter::{
        interpreter::EthInterpreter,
        interpreter_types::{InputsTr, Jumps, MemoryTr, ReturnData},
        CallInputs, CallOutcome, CreateInputs, CreateOutcome, Interpreter, InterpreterResult,
    },
    primitives::{hex, Address, HashMap, B256, U256},
};
use serde::Serialize;
use std::{collections::BTreeMap, io::Write};

/// Selects what [`StepTracer`] leaves out of every step.
///
/// Everything optional is excluded by default.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StepTracerConfig {
    /// Leave out the memory contents.
    pub disable_memory: bool,
    /// Leave out the stack.
    pub disable_stack: bool,
    /// Leave out the storage seen on `SLOAD` and `SSTORE` steps.
    pub disable_storage: bool,
    /// Leave out the return data of the last call.
    pub disable_return_data: bool,
}

impl Default for StepTracerConfig {
    fn default() -> Self {
        Self {
            disable_memory: true,
            disable_stack: true,
            disable_storage: true,
            disable_return_data: true,
        }
    }
}

impl StepTracerConfig {
    /// Configuration that records everything.
    pub fn full() -> Self {
        Self {
            disable_memory: false,
            disable_stack: false,
            disable_storage: false,
            disable_return_data: false,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Step<'a> {
    pc: u64,
    op: u8,
    /// Gas left before executing this operation
    #[serde(serialize_with = "serde_hex_u64")]
    gas: u64,
    #[serde(serialize_with = "serde_hex_u64")]
    gas_cost: u64,
    mem_size: u64,
    depth: u64,
    refund: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    op_name: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stack: Option<&'a [U256]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    memory: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    storage: Option<&'a BTreeMap<B256, B256>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    return_data: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Summary {
    output: String,
    #[serde(serialize_with = "serde_hex_u64")]
    gas_used: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// [`Inspector`] writing a JSON line per VM step.
pub struct StepTracer {
    output: Box<dyn Write>,
    config: StepTracerConfig,
    /// Storage seen so far, per contract.
    storage: HashMap<Address, BTreeMap<B256, B256>>,
    /// Slot read by the current `SLOAD`, resolved once the step finished.
    pending_sload: Option<(Address, B256)>,
    address: Address,
    stack: Vec<U256>,
    pc: u64,
    opcode: u8,
    gas: u64,
    refunded: i64,
    mem_size: usize,
    memory: Option<String>,
    return_data: Option<String>,
}

impl core::fmt::Debug for StepTracer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("StepTracer")
            .field("config", &self.config)
            .field("storage", &self.storage)
            .field("pc", &self.pc)
            .field("opcode", &self.opcode)
            .field("gas", &self.gas)
            .finish_non_exhaustive()
    }
}

impl StepTracer {
    /// Creates a tracer writing to `output`.
    pub fn new(config: StepTracerConfig, output: Box<dyn Write>) -> Self {
        Self {
            output,
            config,
            storage: HashMap::default(),
            pending_sload: None,
            address: Address::ZERO,
            stack: Vec::new(),
            pc: 0,
            opcode: 0,
            gas: 0,
            refunded: 0,
            mem_size: 0,
            memory: None,
            return_data: None,
        }
    }

    /// Creates a tracer writing to a buffered stderr.
    pub fn stderr(config: StepTracerConfig) -> Self {
        Self::new(config, Box::new(std::io::BufWriter::new(std::io::stderr())))
    }

    fn record_slot(&mut self, address: Address, key: B256, value: B256) {
        self.storage.entry(address).or_default().insert(key, value);
    }

    fn print_summary(&mut self, result: &InterpreterResult, context: &mut impl ContextTr) {
        let gas_limit = context.tx().gas_limit();
        let value = Summary {
            output: result.output.to_string(),
            gas_used: gas_limit.saturating_sub(result.gas.remaining()),
            error: (!result.is_ok()).then(|| format!("{:?}", result.result)),
        };
        let _ = write_value(&mut *self.output, &value);
        let _ = self.output.flush();
    }

    /// Clears per transaction state once the outermost frame returns.
    fn clear(&mut self) {
        self.storage.clear();
        self.pending_sload = None;
        self.stack.clear();
        self.memory = None;
        self.return_data = None;
    }
}

impl<CTX: ContextTr> Inspector<CTX, EthInterpreter> for StepTracer {
    fn step(&mut self, interp: &mut Interpreter<EthInterpreter>, _: &mut CTX) {
        self.pc = interp.bytecode.pc() as u64;
        self.opcode = interp.bytecode.opcode();
        self.gas = interp.gas.remaining();
        self.refunded = interp.gas.refunded();
        self.mem_size = interp.memory.size();
        self.address = interp.input.target_address();

        self.stack.clear();
        if !self.config.disable_stack {
            self.stack.extend_from_slice(interp.stack.data());
        }
        self.memory = (!self.config.disable_memory).then(|| {
            hex::encode_prefixed::<&[u8]>(interp.memory.slice(0..self.mem_size).as_ref())
        });
        self.return_data = (!self.config.disable_return_data)
            .then(|| hex::encode_prefixed(interp.return_data.buffer()));

        if self.config.disable_storage {
            return;
        }
        let data = interp.stack.data();
        let top = |n: usize| data.len().checked_sub(n + 1).map(|i| B256::from(data[i]));
        match self.opcode {
            opcode::SSTORE => {
                if let (Some(key), Some(value)) = (top(0), top(1)) {
                    self.record_slot(self.address, key, value);
                }
            }
            opcode::SLOAD => self.pending_sload = top(0).map(|key| (self.address, key)),
            _ => {}
        }
    }

    fn step_end(&mut self, interp: &mut Interpreter<EthInterpreter>, context: &mut CTX) {
        if let Some((address, key)) = self.pending_sload.take() {
            if let Some(value) = interp.stack.data().last() {
                self.record_slot(address, key, B256::from(*value));
            }
        }

        let memory = self.memory.take();
        let return_data = self.return_data.take();
        let storage = (!self.config.disable_storage
            && matches!(self.opcode, opcode::SLOAD | opcode::SSTORE))
        .then(|| self.storage.get(&self.address))
        .flatten();
        let value = Step {
            pc: self.pc,
            op: self.opcode,
            gas: self.gas,
            gas_cost: self.gas.saturating_sub(interp.gas.remaining()),
            mem_size: self.mem_size as u64,
            depth: context.journal_mut().depth() as u64,
            refund: step_refund(self.refunded),
            op_name: OpCode::new(self.opcode).map(|op| op.as_str()),
            stack: (!self.config.disable_stack).then_some(self.stack.as_slice()),
            memory,
            storage,
            return_data,
        };
        let _ = write_value(&mut *self.output, &value);
    }

    fn call_end(&mut self, context: &mut CTX, _: &CallInputs, outcome: &mut CallOutcome) {
        if context.journal_mut().depth() == 0 {
            self.print_summary(&outcome.result, context);
            self.clear();
        }
    }

    fn create_end(&mut self, context: &mut CTX, _: &CreateInputs, outcome: &mut CreateOutcome) {
        if context.journal_mut().depth() == 0 {
            self.print_summary(&outcome.result, context);
            self.clear();
        }
    }
}

fn write_value(output: &mut dyn Write, value: &impl Serialize) -> std::io::Result<()> {
    serde_json::to_writer(&mut *output, value)?;
    output.write_all(b"\n")
}

/// Refund counter as reported per step. revm's running counter dips below
/// zero when a refund granted earlier in the transaction is taken back.
fn step_refund(refunded: i64) -> u64 {
    refunded.max(0) as u64
}

fn serde_hex_u64<S: serde::Serializer>(n: &u64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format!("{:#x}", *n))
}
