//! Epoch resolution: greedy, single-pass acceptance of a transaction batch
//!
//! HandleTxs: 𝒰𝒮 × 𝒯𝒳* → 𝒰𝒮 × 𝒯𝒳*
//!
//! For batch txs = [tx₀, …, txₙ] and pool us:
//! 1. For k = 0..n in the given order:
//!    - if IsValidTx(us, txₖ): accepted ← accepted ‖ txₖ; us ← ApplyTransaction(txₖ, us)
//!    - otherwise txₖ is dropped for this epoch and never re-checked
//! 2. Return (us, accepted)
//!
//! Later transactions may spend outputs created by earlier accepted ones in the
//! same batch, so the batch order is observable and is never changed.

use tracing::{debug, trace};

use crate::error::{Result, SettlementError};
use crate::transaction::check_transaction;
use crate::types::*;
use crate::utxo_pool::UtxoPool;

/// Accept every transaction that is valid against the pool at the moment it is
/// reached, committing each one before the next is checked.
pub fn handle_txs(utxo_pool: &mut UtxoPool, possible_txs: &[Transaction]) -> Vec<Transaction> {
    let mut accepted = Vec::new();

    for (position, tx) in possible_txs.iter().enumerate() {
        match check_transaction(utxo_pool, tx) {
            ValidationResult::Valid => {
                if let Err(e) = apply_transaction(utxo_pool, tx) {
                    debug!(position, tx = %TxId(&tx.hash()), error = %e, "commit failed");
                    continue;
                }
                trace!(position, tx = %TxId(&tx.hash()), "transaction accepted");
                accepted.push(tx.clone());
            }
            ValidationResult::Invalid(reason) => {
                debug!(position, tx = %TxId(&tx.hash()), %reason, "transaction rejected");
            }
        }
    }

    debug!(
        candidates = possible_txs.len(),
        accepted = accepted.len(),
        rejected = possible_txs.len() - accepted.len(),
        utxos = utxo_pool.len(),
        "epoch resolved"
    );

    accepted
}

/// ApplyTransaction: 𝒯𝒳 × 𝒰𝒮 → 𝒰𝒮
///
/// us' = (us \ {i.prevout : i ∈ tx.inputs}) ∪ {(tx.id, j) ↦ tx.outputs[j]}
///
/// The pool is left untouched if any spent outpoint is missing.
pub fn apply_transaction(utxo_pool: &mut UtxoPool, tx: &Transaction) -> Result<()> {
    if let Some(missing) = tx.inputs().iter().find(|i| !utxo_pool.contains(&i.prevout)) {
        return Err(SettlementError::UtxoNotFound(missing.prevout));
    }

    for input in tx.inputs() {
        utxo_pool.remove(&input.prevout)?;
    }

    for (index, output) in (0..).zip(tx.outputs()) {
        utxo_pool.insert(tx.outpoint(index), output.clone());
    }

    Ok(())
}

/// Hex rendering of a transaction hash for log fields
struct TxId<'a>(&'a Hash);

impl std::fmt::Display for TxId<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for byte in self.0 {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::TransactionBuilder;
    use crate::crypto::public_key;
    use secp256k1::{PublicKey, SecretKey};

    fn secret(seed: u8) -> SecretKey {
        SecretKey::from_slice(&[seed; 32]).unwrap()
    }

    fn address(seed: u8) -> PublicKey {
        public_key(&secret(seed))
    }

    fn genesis_pool() -> UtxoPool {
        let mut pool = UtxoPool::new();
        pool.insert(OutPoint::new([0; 32], 0), TransactionOutput { value: 10, address: address(1) });
        pool
    }

    fn spend(prev: OutPoint, outputs: &[(Integer, PublicKey)], signer: &SecretKey) -> Transaction {
        let mut builder = TransactionBuilder::new();
        builder.add_input(prev.hash, prev.index);
        for (value, addr) in outputs {
            builder.add_output(*value, *addr);
        }
        builder.sign_input(0, signer).unwrap();
        builder.finalize()
    }

    #[test]
    fn test_apply_transaction() {
        let mut pool = genesis_pool();
        let tx = spend(OutPoint::new([0; 32], 0), &[(6, address(2)), (4, address(3))], &secret(1));

        apply_transaction(&mut pool, &tx).unwrap();

        assert!(!pool.contains(&OutPoint::new([0; 32], 0)));
        assert_eq!(pool.get(&tx.outpoint(0)).unwrap().value, 6);
        assert_eq!(pool.get(&tx.outpoint(1)).unwrap().address, address(3));
        assert_eq!(pool.len(), 2);
    }

    #[test]
    fn test_apply_transaction_missing_input_leaves_pool_unchanged() {
        let mut pool = genesis_pool();
        let before = pool.clone();

        let mut builder = TransactionBuilder::new();
        builder.add_input([0; 32], 0).add_input([8; 32], 0).add_output(1, address(2));
        let tx = builder.finalize();

        assert_eq!(
            apply_transaction(&mut pool, &tx),
            Err(SettlementError::UtxoNotFound(OutPoint::new([8; 32], 0)))
        );
        assert_eq!(pool, before);
    }

    #[test]
    fn test_handle_txs_chain_in_order() {
        let mut pool = genesis_pool();
        let a = spend(OutPoint::new([0; 32], 0), &[(10, address(2))], &secret(1));
        let b = spend(a.outpoint(0), &[(9, address(3))], &secret(2));

        let accepted = handle_txs(&mut pool, &[a.clone(), b.clone()]);

        assert_eq!(accepted, vec![a.clone(), b.clone()]);
        assert!(!pool.contains(&a.outpoint(0)));
        assert!(pool.contains(&b.outpoint(0)));
        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn test_handle_txs_chain_reversed() {
        let mut pool = genesis_pool();
        let a = spend(OutPoint::new([0; 32], 0), &[(10, address(2))], &secret(1));
        let b = spend(a.outpoint(0), &[(9, address(3))], &secret(2));

        let accepted = handle_txs(&mut pool, &[b.clone(), a.clone()]);

        // b is not retried once a has created its input
        assert_eq!(accepted, vec![a.clone()]);
        assert!(pool.contains(&a.outpoint(0)));
        assert!(!pool.contains(&b.outpoint(0)));
    }

    #[test]
    fn test_handle_txs_conflicting_spends() {
        let mut pool = genesis_pool();
        let first = spend(OutPoint::new([0; 32], 0), &[(10, address(2))], &secret(1));
        let second = spend(OutPoint::new([0; 32], 0), &[(10, address(3))], &secret(1));

        let accepted = handle_txs(&mut pool, &[first.clone(), second.clone()]);

        assert_eq!(accepted, vec![first.clone()]);
        assert!(pool.contains(&first.outpoint(0)));
        assert!(!pool.contains(&second.outpoint(0)));
    }

    #[test]
    fn test_handle_txs_same_transaction_twice() {
        let mut pool = genesis_pool();
        let tx = spend(OutPoint::new([0; 32], 0), &[(7, address(2))], &secret(1));

        let accepted = handle_txs(&mut pool, &[tx.clone(), tx.clone()]);

        assert_eq!(accepted.len(), 1);
        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn test_handle_txs_preserves_relative_order() {
        let mut pool = UtxoPool::new();
        for i in 0..4u8 {
            pool.insert(
                OutPoint::new([i; 32], 0),
                TransactionOutput { value: 1, address: address(1) },
            );
        }
        let txs: Vec<Transaction> = (0..4u8)
            .map(|i| {
                let value = if i == 1 { 2 } else { 1 };
                spend(OutPoint::new([i; 32], 0), &[(value, address(2))], &secret(1))
            })
            .collect();

        let accepted = handle_txs(&mut pool, &txs);

        assert_eq!(accepted, vec![txs[0].clone(), txs[2].clone(), txs[3].clone()]);
    }

    #[test]
    fn test_handle_txs_empty_batch() {
        let mut pool = genesis_pool();
        let before = pool.clone();

        assert!(handle_txs(&mut pool, &[]).is_empty());
        assert_eq!(pool, before);
    }

    #[test]
    fn test_tx_id_display() {
        let mut hash = [0u8; 32];
        hash[0] = 0x0f;
        let shown = TxId(&hash).to_string();
        assert_eq!(shown.len(), 64);
        assert!(shown.starts_with("0f00"));
    }
}
