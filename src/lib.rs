//! # UTXO-Settlement
//!
//! Transaction validation and epoch resolution over a ledger of unspent
//! transaction outputs.
//!
//! Given an unordered batch of proposed transactions, this crate decides which
//! of them are well-formed, authorized by the owners of the outputs they spend,
//! and non-conflicting, then advances the UTXO pool to reflect exactly the
//! accepted ones.
//!
//! ## Architecture
//!
//! - `utxo_pool`: the ledger, a map from outpoint to unspent output
//! - `transaction`: the validity predicate, a pure function of (pool, tx)
//! - `epoch`: greedy single-pass batch resolution that commits as it goes
//! - `builder`, `serialization`, `crypto`: how transactions are built, laid out
//!   as bytes, signed and hashed
//!
//! ## Design Principles
//!
//! 1. **Pure Validation**: checking a transaction never touches the pool
//! 2. **Forward-Only Resolution**: a batch is processed once, in the order given
//! 3. **Owned State**: each handler owns an independent copy of its pool
//! 4. **Exact Version Pinning**: signature and hashing dependencies are pinned
//!
//! ## Usage
//!
//! ```rust
//! use utxo_settlement::TxHandler;
//! use utxo_settlement::types::*;
//! use utxo_settlement::utxo_pool::UtxoPool;
//!
//! let handler = TxHandler::new(&UtxoPool::new());
//! let tx = Transaction::builder().finalize();
//! assert!(handler.is_valid_tx(&tx));
//! ```

pub mod types;
pub mod constants;
pub mod serialization;
pub mod crypto;
pub mod builder;
pub mod utxo_pool;
pub mod transaction;
pub mod epoch;
pub mod error;

// Re-export commonly used types
pub use types::*;
pub use builder::TransactionBuilder;
pub use utxo_pool::UtxoPool;
pub use error::{SettlementError, Result};
pub use secp256k1;

/// Validator and epoch resolver sharing one UTXO pool
///
/// # Examples
///
/// ```
/// use utxo_settlement::TxHandler;
/// use utxo_settlement::crypto::public_key;
/// use utxo_settlement::secp256k1::SecretKey;
/// use utxo_settlement::types::*;
/// use utxo_settlement::utxo_pool::UtxoPool;
///
/// let owner = SecretKey::from_slice(&[1; 32]).unwrap();
/// let recipient = public_key(&SecretKey::from_slice(&[2; 32]).unwrap());
///
/// let mut snapshot = UtxoPool::new();
/// let genesis = OutPoint::new([0; 32], 0);
/// snapshot.insert(genesis, TransactionOutput { value: 10, address: public_key(&owner) });
///
/// let mut builder = Transaction::builder();
/// builder.add_input(genesis.hash, genesis.index).add_output(10, recipient);
/// builder.sign_input(0, &owner).unwrap();
/// let tx = builder.finalize();
///
/// let mut handler = TxHandler::new(&snapshot);
/// assert!(handler.is_valid_tx(&tx));
///
/// let accepted = handler.handle_txs(&[tx.clone()]);
/// assert_eq!(accepted, vec![tx.clone()]);
/// assert!(handler.utxo_pool().contains(&tx.outpoint(0)));
///
/// // The snapshot is a separate copy
/// assert!(snapshot.contains(&genesis));
/// ```
#[derive(Debug, Clone)]
pub struct TxHandler {
    utxo_pool: UtxoPool,
}

impl TxHandler {
    /// Create a handler whose pool is an independent copy of `utxo_pool`
    pub fn new(utxo_pool: &UtxoPool) -> Self {
        Self {
            utxo_pool: UtxoPool::from(utxo_pool),
        }
    }

    /// Check a transaction against the current pool
    ///
    /// # Examples
    ///
    /// ```
    /// use utxo_settlement::TxHandler;
    /// use utxo_settlement::types::*;
    /// use utxo_settlement::utxo_pool::UtxoPool;
    ///
    /// let handler = TxHandler::new(&UtxoPool::new());
    ///
    /// let mut builder = Transaction::builder();
    /// builder.add_input([7; 32], 0);
    /// let tx = builder.finalize();
    ///
    /// // Spends an output the pool does not hold
    /// assert!(!handler.is_valid_tx(&tx));
    /// ```
    pub fn is_valid_tx(&self, tx: &Transaction) -> bool {
        transaction::is_valid_tx(&self.utxo_pool, tx)
    }

    /// Resolve one epoch: accept, in order, every transaction valid at the time it
    /// is reached and commit it to the pool. Returns the accepted transactions.
    pub fn handle_txs(&mut self, possible_txs: &[Transaction]) -> Vec<Transaction> {
        epoch::handle_txs(&mut self.utxo_pool, possible_txs)
    }

    pub fn utxo_pool(&self) -> &UtxoPool {
        &self.utxo_pool
    }
}
