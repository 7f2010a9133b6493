//! Transaction construction
//!
//! Producers add inputs and outputs, sign each input over its signable content,
//! then finalize. Finalizing fixes the transaction hash.

use secp256k1::{PublicKey, SecretKey};

use crate::crypto::{sign_message, transaction_id};
use crate::error::{Result, SettlementError};
use crate::serialization;
use crate::types::*;

#[derive(Debug, Clone, Default)]
pub struct TransactionBuilder {
    inputs: Vec<TransactionInput>,
    outputs: Vec<TransactionOutput>,
}

impl TransactionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spend output `index` of transaction `prev_hash`. The input starts unsigned.
    pub fn add_input(&mut self, prev_hash: Hash, index: OutputIndex) -> &mut Self {
        self.inputs.push(TransactionInput {
            prevout: OutPoint::new(prev_hash, index),
            signature: Vec::new(),
        });
        self
    }

    pub fn add_output(&mut self, value: Integer, address: PublicKey) -> &mut Self {
        self.outputs.push(TransactionOutput { value, address });
        self
    }

    pub fn remove_input(&mut self, index: usize) -> Result<TransactionInput> {
        if index >= self.inputs.len() {
            return Err(SettlementError::InputIndexOutOfRange(index));
        }
        Ok(self.inputs.remove(index))
    }

    /// Remove the first input spending `outpoint`
    pub fn remove_input_by_outpoint(&mut self, outpoint: &OutPoint) -> Option<TransactionInput> {
        let position = self.inputs.iter().position(|i| &i.prevout == outpoint)?;
        Some(self.inputs.remove(position))
    }

    pub fn raw_data_to_sign(&self, index: usize) -> Option<ByteString> {
        serialization::raw_data_to_sign(&self.inputs, &self.outputs, index)
    }

    pub fn add_signature(&mut self, signature: ByteString, index: usize) -> Result<&mut Self> {
        let input = self
            .inputs
            .get_mut(index)
            .ok_or(SettlementError::InputIndexOutOfRange(index))?;
        input.signature = signature;
        Ok(self)
    }

    /// Sign input `index` with `secret_key`.
    ///
    /// Outputs must be final before signing: the signable content covers all of them.
    pub fn sign_input(&mut self, index: usize, secret_key: &SecretKey) -> Result<&mut Self> {
        let message = self
            .raw_data_to_sign(index)
            .ok_or(SettlementError::InputIndexOutOfRange(index))?;
        let signature = sign_message(secret_key, &message)?;
        self.add_signature(signature, index)
    }

    pub fn finalize(self) -> Transaction {
        let hash = transaction_id(&serialization::raw_tx(&self.inputs, &self.outputs));
        Transaction {
            inputs: self.inputs,
            outputs: self.outputs,
            hash,
        }
    }
}

impl Transaction {
    pub fn builder() -> TransactionBuilder {
        TransactionBuilder::new()
    }
}
