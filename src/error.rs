//! Error types for ledger access and transaction construction

use thiserror::Error;

use crate::types::OutPoint;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SettlementError {
    #[error("UTXO not found: {0}")]
    UtxoNotFound(OutPoint),

    #[error("Invalid signature: {0}")]
    InvalidSignature(String),

    #[error("Input index out of range: {0}")]
    InputIndexOutOfRange(usize),

    #[error("Value overflow while summing outputs")]
    ValueOverflow,
}

pub type Result<T> = std::result::Result<T, SettlementError>;
