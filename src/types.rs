//! Core ledger types for transaction settlement

use serde::{Deserialize, Serialize};
use secp256k1::PublicKey;
use std::fmt;

use crate::serialization;

/// Hash type: 256-bit hash
pub type Hash = [u8; 32];

/// Byte string type
pub type ByteString = Vec<u8>;

/// Monetary value. Signed so that negative outputs can be represented and rejected.
pub type Integer = i64;

/// Position of an output inside its transaction
pub type OutputIndex = u32;

/// OutPoint: (producing transaction hash, output index)
///
/// Identifies one unspent output. Equality and hashing are structural, so an
/// outpoint can be rebuilt from an input and used as a ledger key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OutPoint {
    pub hash: Hash,
    pub index: OutputIndex,
}

impl OutPoint {
    pub fn new(hash: Hash, index: OutputIndex) -> Self {
        Self { hash, index }
    }
}

impl fmt::Display for OutPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.hash {
            write!(f, "{:02x}", byte)?;
        }
        write!(f, ":{}", self.index)
    }
}

/// Transaction Input: spent outpoint plus a DER signature over the signable content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionInput {
    pub prevout: OutPoint,
    pub signature: ByteString,
}

/// Transaction Output: value locked to a recipient key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionOutput {
    pub value: Integer,
    pub address: PublicKey,
}

/// A finalized, immutable transaction.
///
/// The hash is computed once by [`crate::builder::TransactionBuilder::finalize`]
/// from the raw transaction bytes and never changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub(crate) inputs: Vec<TransactionInput>,
    pub(crate) outputs: Vec<TransactionOutput>,
    pub(crate) hash: Hash,
}

impl Transaction {
    pub fn hash(&self) -> Hash {
        self.hash
    }

    pub fn inputs(&self) -> &[TransactionInput] {
        &self.inputs
    }

    pub fn outputs(&self) -> &[TransactionOutput] {
        &self.outputs
    }

    pub fn input(&self, index: usize) -> Option<&TransactionInput> {
        self.inputs.get(index)
    }

    pub fn output(&self, index: usize) -> Option<&TransactionOutput> {
        self.outputs.get(index)
    }

    /// Bytes the signature of input `index` was computed over.
    ///
    /// Returns `None` when `index` is not an input position.
    pub fn raw_data_to_sign(&self, index: usize) -> Option<ByteString> {
        serialization::raw_data_to_sign(&self.inputs, &self.outputs, index)
    }

    /// Full serialization including signatures; the preimage of [`Transaction::hash`].
    pub fn raw_tx(&self) -> ByteString {
        serialization::raw_tx(&self.inputs, &self.outputs)
    }

    /// Outpoint created by output `index` of this transaction
    pub fn outpoint(&self, index: OutputIndex) -> OutPoint {
        OutPoint::new(self.hash, index)
    }
}

/// Validation result
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    Valid,
    Invalid(String),
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid)
    }
}
