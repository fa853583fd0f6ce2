//! Message execution against a [`StateStore`](store::StateStore).
//!
//! [`ExecutionEngine`] is the seam between the state test runner and the
//! virtual machine. [`RevmEngine`] implements it on top of `revm`, optionally
//! emitting a per-step JSON trace through [`StepTracer`].
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod context;
mod database;
mod engine;
mod message;
mod revm_engine;
mod rules;
pub mod tracer;

pub use context::{vm_test_block_hash, BlockHashFn, ExecutionContext};
pub use database::StoreDatabase;
pub use engine::{ApplyError, ApplyOutcome, ExecutionEngine, ExecutionStatus};
pub use message::Message;
pub use revm_engine::RevmEngine;
pub use rules::ForkRules;
pub use tracer::{StepTracer, StepTracerConfig};

pub use revm::primitives::hardfork::SpecId;
