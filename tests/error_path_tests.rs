//! Tests for error paths and edge cases

use utxo_settlement::crypto::public_key;
use utxo_settlement::epoch::apply_transaction;
use utxo_settlement::secp256k1::SecretKey;
use utxo_settlement::*;

#[test]
fn test_pool_get_missing_is_error() {
    let pool = UtxoPool::new();
    let outpoint = OutPoint::new([3; 32], 1);

    let err = pool.get(&outpoint).unwrap_err();
    assert_eq!(err, SettlementError::UtxoNotFound(outpoint));
    assert!(err.to_string().starts_with("UTXO not found: 0303"));
    assert!(err.to_string().ends_with(":1"));
}

#[test]
fn test_pool_remove_missing_is_error() {
    let mut pool = UtxoPool::new();
    assert!(pool.remove(&OutPoint::new([3; 32], 1)).is_err());
}

#[test]
fn test_apply_unvalidated_transaction_fails_cleanly() {
    let mut pool = UtxoPool::new();
    let mut builder = Transaction::builder();
    builder.add_input([4; 32], 0);
    let tx = builder.finalize();

    assert!(matches!(
        apply_transaction(&mut pool, &tx),
        Err(SettlementError::UtxoNotFound(_))
    ));
    assert!(pool.is_empty());
}

#[test]
fn test_builder_index_errors() {
    let key = SecretKey::from_slice(&[1; 32]).unwrap();
    let mut builder = Transaction::builder();
    builder.add_output(1, public_key(&key));

    assert_eq!(
        builder.sign_input(0, &key).unwrap_err(),
        SettlementError::InputIndexOutOfRange(0)
    );
    assert!(builder.raw_data_to_sign(0).is_none());
    assert!(builder.remove_input(0).is_err());
}

#[test]
fn test_garbage_signature_rejected_not_panicking() {
    let owner = SecretKey::from_slice(&[1; 32]).unwrap();
    let mut pool = UtxoPool::new();
    pool.insert(
        OutPoint::new([0; 32], 0),
        TransactionOutput { value: 10, address: public_key(&owner) },
    );

    let mut builder = Transaction::builder();
    builder.add_input([0; 32], 0).add_output(1, public_key(&owner));
    builder.add_signature(vec![0xff; 3], 0).unwrap();
    let tx = builder.finalize();

    let mut handler = TxHandler::new(&pool);
    assert!(!handler.is_valid_tx(&tx));
    assert!(handler.handle_txs(&[tx]).is_empty());
    assert_eq!(handler.utxo_pool(), &pool);
}

#[test]
fn test_raw_data_to_sign_out_of_range_on_transaction() {
    let tx = Transaction::builder().finalize();
    assert!(tx.raw_data_to_sign(0).is_none());
    assert!(tx.input(0).is_none());
    assert!(tx.output(0).is_none());
}
