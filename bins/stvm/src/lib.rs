//! `stvm` runs Ethereum state test fixtures and reports per subtest results.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

pub mod cmd;

// Used by the binary only.
use color_eyre as _;
use tracing_subscriber as _;
