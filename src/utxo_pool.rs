//! UTXO pool: the set of unspent outputs, keyed by outpoint
//!
//! UtxoPool: 𝒪 → 𝒯. Holds no business logic. Every key is an output that has
//! been produced and not yet spent; only the epoch commit step mutates it.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{Result, SettlementError};
use crate::types::*;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<UtxoEntry>", into = "Vec<UtxoEntry>")]
pub struct UtxoPool {
    utxos: HashMap<OutPoint, TransactionOutput>,
}

/// One snapshot entry, as written to JSON
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UtxoEntry {
    pub outpoint: OutPoint,
    pub output: TransactionOutput,
}

impl UtxoPool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, outpoint: &OutPoint) -> bool {
        self.utxos.contains_key(outpoint)
    }

    pub fn get(&self, outpoint: &OutPoint) -> Result<&TransactionOutput> {
        self.utxos
            .get(outpoint)
            .ok_or(SettlementError::UtxoNotFound(*outpoint))
    }

    /// Add an unspent output. An existing entry under the same outpoint is replaced.
    pub fn insert(&mut self, outpoint: OutPoint, output: TransactionOutput) {
        self.utxos.insert(outpoint, output);
    }

    pub fn remove(&mut self, outpoint: &OutPoint) -> Result<TransactionOutput> {
        self.utxos
            .remove(outpoint)
            .ok_or(SettlementError::UtxoNotFound(*outpoint))
    }

    /// Every unspent outpoint, in no particular order
    pub fn all_utxos(&self) -> Vec<OutPoint> {
        self.utxos.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.utxos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.utxos.is_empty()
    }

    /// Sum of all unspent values
    pub fn total_value(&self) -> Result<Integer> {
        self.utxos
            .values()
            .try_fold(0 as Integer, |acc, o| acc.checked_add(o.value))
            .ok_or(SettlementError::ValueOverflow)
    }
}

impl From<&UtxoPool> for UtxoPool {
    fn from(other: &UtxoPool) -> Self {
        other.clone()
    }
}

impl FromIterator<(OutPoint, TransactionOutput)> for UtxoPool {
    fn from_iter<I: IntoIterator<Item = (OutPoint, TransactionOutput)>>(iter: I) -> Self {
        Self {
            utxos: iter.into_iter().collect(),
        }
    }
}

impl From<Vec<UtxoEntry>> for UtxoPool {
    fn from(entries: Vec<UtxoEntry>) -> Self {
        entries.into_iter().map(|e| (e.outpoint, e.output)).collect()
    }
}

impl From<UtxoPool> for Vec<UtxoEntry> {
    fn from(pool: UtxoPool) -> Self {
        let mut entries: Vec<UtxoEntry> = pool
            .utxos
            .into_iter()
            .map(|(outpoint, output)| UtxoEntry { outpoint, output })
            .collect();
        entries.sort_by(|a, b| a.outpoint.cmp(&b.outpoint));
        entries
    }
}
