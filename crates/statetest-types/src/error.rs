use thiserror::Error;

/// Errors building a [`Message`](engine::Message) from a transaction template.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessageError {
    /// Secret key is not a valid secp256k1 key.
    #[error("invalid private key")]
    InvalidPrivateKey,
    /// Recipient is neither empty nor a 20 byte address.
    #[error("invalid to address")]
    InvalidTo,
    /// Data index past the end of the data variants.
    #[error("tx data index {0} out of bounds")]
    DataIndexOutOfBounds(usize),
    /// Value index past the end of the value variants.
    #[error("tx value index {0} out of bounds")]
    ValueIndexOutOfBounds(usize),
    /// Gas index past the end of the gas limit variants.
    #[error("tx gas limit index {0} out of bounds")]
    GasLimitIndexOutOfBounds(usize),
    /// Selected value is not a hex encoded 256-bit integer.
    #[error("invalid tx value {0:?}")]
    InvalidValue(String),
    /// Selected data is not valid hex.
    #[error("invalid tx data {0:?}")]
    InvalidData(String),
}

/// Fork name that does not resolve to a known hardfork.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ForkError {
    /// Unknown fork name.
    #[error("unsupported fork {0:?}")]
    Unsupported(String),
}
