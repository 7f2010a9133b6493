//! Transaction validation against the UTXO pool
//!
//! A transaction tx = (ins, outs) is valid against pool us if and only if:
//! 1. ∀i ∈ ins: i.prevout ∈ us
//! 2. ∀(k, i) ∈ enumerate(ins): Verify(us(i.prevout).address, SignableContent(tx, k), i.signature)
//! 3. |{i.prevout : i ∈ ins}| = |ins|
//! 4. ∀o ∈ outs: o.value ≥ 0
//! 5. Σᵢ us(i.prevout).value ≥ Σₒ o.value
//!
//! Validation never mutates the pool.

use secp256k1::Secp256k1;
use std::collections::HashSet;

use crate::crypto::verify_signature_with;
use crate::types::*;
use crate::utxo_pool::UtxoPool;

/// Validate `tx` against the current pool, reporting which rule failed
pub fn check_transaction(utxo_pool: &UtxoPool, tx: &Transaction) -> ValidationResult {
    // 1. Every claimed output must be unspent
    for (i, input) in tx.inputs().iter().enumerate() {
        if !utxo_pool.contains(&input.prevout) {
            return ValidationResult::Invalid(format!(
                "Input {} spends unknown output {}",
                i, input.prevout
            ));
        }
    }

    // 2. Signatures verify under the address of the claimed output
    let secp = Secp256k1::verification_only();
    let mut total_input_value: i128 = 0;
    for (i, input) in tx.inputs().iter().enumerate() {
        let utxo = match utxo_pool.get(&input.prevout) {
            Ok(utxo) => utxo,
            Err(e) => return ValidationResult::Invalid(e.to_string()),
        };
        let message = match tx.raw_data_to_sign(i) {
            Some(message) => message,
            None => return ValidationResult::Invalid(format!("No signable content for input {}", i)),
        };
        if !verify_signature_with(&secp, &utxo.address, &message, &input.signature) {
            return ValidationResult::Invalid(format!("Invalid signature on input {}", i));
        }
        total_input_value += i128::from(utxo.value);
    }

    // 3. No outpoint claimed twice
    let claimed: HashSet<&OutPoint> = tx.inputs().iter().map(|i| &i.prevout).collect();
    if claimed.len() != tx.inputs().len() {
        return ValidationResult::Invalid("Output claimed more than once".to_string());
    }

    // 4. Output values are non-negative
    for (i, output) in tx.outputs().iter().enumerate() {
        if output.value < 0 {
            return ValidationResult::Invalid(format!(
                "Negative output value {} at index {}",
                output.value, i
            ));
        }
    }

    // 5. Value is not created
    let total_output_value: i128 = tx.outputs().iter().map(|o| i128::from(o.value)).sum();
    if total_input_value < total_output_value {
        return ValidationResult::Invalid(format!(
            "Insufficient input value: {} < {}",
            total_input_value, total_output_value
        ));
    }

    ValidationResult::Valid
}

/// IsValidTx: 𝒰𝒮 × 𝒯𝒳 → {true, false}
pub fn is_valid_tx(utxo_pool: &UtxoPool, tx: &Transaction) -> bool {
    check_transaction(utxo_pool, tx).is_valid()
}

/// Fee paid by a transaction already known to be valid: Σ inputs − Σ outputs.
///
/// Returns `None` if an input is missing from the pool or the sums overflow.
pub fn calculate_fee(utxo_pool: &UtxoPool, tx: &Transaction) -> Option<Integer> {
    let total_in = tx.inputs().iter().try_fold(0 as Integer, |acc, input| {
        let utxo = utxo_pool.get(&input.prevout).ok()?;
        acc.checked_add(utxo.value)
    })?;
    let total_out = tx
        .outputs()
        .iter()
        .try_fold(0 as Integer, |acc, o| acc.checked_add(o.value))?;
    total_in.checked_sub(total_out)
}
