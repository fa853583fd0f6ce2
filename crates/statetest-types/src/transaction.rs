use engine::Message;
use revm::primitives::{hex, Address, Bytes, U256};
use serde::Deserialize;

use crate::{utils::recover_address, MessageError};

/// Transaction template of a test unit.
///
/// `data`, `gasLimit` and `value` hold every variant, a post entry selects
/// one of each through its [`TxPartIndices`]. Sender key, recipient, data
/// and value are kept as raw strings and validated per subtest by
/// [`TransactionParts::to_message`].
#[derive(Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionParts {
    /// Call data variants, hex encoded.
    pub data: Vec<String>,
    /// Gas limit variants.
    pub gas_limit: Vec<U256>,
    /// Legacy gas price. Absent for EIP-1559 templates.
    pub gas_price: Option<U256>,
    /// Sender nonce.
    pub nonce: U256,
    /// Sender private key. Absent or empty means the zero address sends.
    #[serde(default)]
    pub secret_key: Option<String>,
    /// Recipient. Empty for contract creation.
    #[serde(default)]
    pub to: String,
    /// Value variants, hex encoded. `"0x"` means zero.
    pub value: Vec<String>,
    /// EIP-1559 fee cap.
    pub max_fee_per_gas: Option<U256>,
    /// EIP-1559 priority fee.
    pub max_priority_fee_per_gas: Option<U256>,
}

/// Transaction part indices.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TxPartIndices {
    /// Index into [`TransactionParts::data`].
    pub data: usize,
    /// Index into [`TransactionParts::gas_limit`].
    pub gas: usize,
    /// Index into [`TransactionParts::value`].
    pub value: usize,
}

impl TransactionParts {
    /// Builds the message selected by `indexes`.
    ///
    /// Fails without side effects if the key or recipient is malformed, an
    /// index is out of range, or the selected value or data cannot be parsed.
    pub fn to_message(&self, indexes: &TxPartIndices) -> Result<Message, MessageError> {
        let caller = self.caller()?;

        let to = if self.to.is_empty() {
            None
        } else {
            Some(
                self.to
                    .parse::<Address>()
                    .map_err(|_| MessageError::InvalidTo)?,
            )
        };

        let data = self
            .data
            .get(indexes.data)
            .ok_or(MessageError::DataIndexOutOfBounds(indexes.data))?;
        let value = self
            .value
            .get(indexes.value)
            .ok_or(MessageError::ValueIndexOutOfBounds(indexes.value))?;
        let gas_limit = self
            .gas_limit
            .get(indexes.gas)
            .ok_or(MessageError::GasLimitIndexOutOfBounds(indexes.gas))?;

        Ok(Message {
            caller,
            to,
            nonce: self.nonce.saturating_to(),
            value: parse_value(value)?,
            gas_limit: gas_limit.saturating_to(),
            gas_price: self
                .gas_price
                .or(self.max_fee_per_gas)
                .unwrap_or_default(),
            gas_priority_fee: self.max_priority_fee_per_gas,
            data: parse_data(data)?,
            enforce_checks: true,
        })
    }

    fn caller(&self) -> Result<Address, MessageError> {
        let key = match self.secret_key.as_deref() {
            None | Some("") => return Ok(Address::ZERO),
            Some(key) => key,
        };
        hex::decode(key)
            .ok()
            .and_then(|key| recover_address(&key))
            .ok_or(MessageError::InvalidPrivateKey)
    }
}

/// `""` and `"0x"` are zero, otherwise `0x` prefixed hex or decimal.
fn parse_value(value: &str) -> Result<U256, MessageError> {
    if value.is_empty() || value == "0x" {
        return Ok(U256::ZERO);
    }
    let parsed = match value.strip_prefix("0x") {
        Some(hex) => U256::from_str_radix(hex, 16),
        None => U256::from_str_radix(value, 10),
    };
    parsed.map_err(|_| MessageError::InvalidValue(value.to_string()))
}

fn parse_data(data: &str) -> Result<Bytes, MessageError> {
    let stripped = data.strip_prefix("0x").unwrap_or(data);
    hex::decode(stripped)
        .map(Bytes::from)
        .map_err(|_| MessageError::InvalidData(data.to_string()))
}
