//! Typed model of the Ethereum state test JSON format.
//!
//! A [`TestSuite`] maps test names to [`TestUnit`]s. Each unit describes a
//! pre-state, a transaction template and, per fork, the expected post-state
//! roots of every transaction variant.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod account_info;
mod deserializer;
mod env;
mod error;
mod spec;
mod test_suite;
mod test_unit;
mod transaction;
pub mod utils;

pub use account_info::*;
pub use deserializer::*;
pub use env::*;
pub use error::*;
pub use spec::*;
pub use test::*;
pub use test_suite::*;
pub use test_unit::*;
pub use transaction::*;
