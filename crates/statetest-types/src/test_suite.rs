use serde::Deserialize;
use std::collections::BTreeMap;

use crate::TestUnit;

/// Content of a state test file, test units by name.
#[derive(Debug, PartialEq, Eq, Deserialize)]
pub struct TestSuite(pub BTreeMap<String, TestUnit>);
