//! Signature and hashing primitives
//!
//! Signatures are ECDSA over secp256k1, DER encoded, computed over the SHA-256
//! digest of a message. Transaction ids are double SHA-256 of the raw transaction.

use bitcoin_hashes::{sha256d, Hash as BitcoinHash};
use secp256k1::{ecdsa::Signature, Message, PublicKey, Secp256k1, SecretKey, Signing, Verification};
use sha2::{Digest, Sha256};

use crate::error::{Result, SettlementError};
use crate::types::{ByteString, Hash};

/// SHA-256 digest of a message, the value actually signed
pub fn message_digest(message: &[u8]) -> Hash {
    let digest = Sha256::digest(message);
    let mut hash = [0u8; 32];
    hash.copy_from_slice(&digest);
    hash
}

/// Transaction id: SHA256(SHA256(raw_tx))
pub fn transaction_id(raw_tx: &[u8]) -> Hash {
    let result = sha256d::Hash::hash(raw_tx);
    let mut hash = [0u8; 32];
    hash.copy_from_slice(&result);
    hash
}

/// Public key for a secret key
pub fn public_key(secret_key: &SecretKey) -> PublicKey {
    let secp = Secp256k1::signing_only();
    PublicKey::from_secret_key(&secp, secret_key)
}

/// Sign `message` with `secret_key`, returning a DER encoded signature
pub fn sign_message(secret_key: &SecretKey, message: &[u8]) -> Result<ByteString> {
    let secp = Secp256k1::signing_only();
    sign_message_with(&secp, secret_key, message)
}

pub fn sign_message_with<C: Signing>(
    secp: &Secp256k1<C>,
    secret_key: &SecretKey,
    message: &[u8],
) -> Result<ByteString> {
    let message = Message::from_digest_slice(&message_digest(message))
        .map_err(|e| SettlementError::InvalidSignature(e.to_string()))?;
    Ok(secp.sign_ecdsa(&message, secret_key).serialize_der().to_vec())
}

/// Verify a DER signature over `message` under `pubkey`.
///
/// Malformed signatures verify as `false`.
pub fn verify_signature(pubkey: &PublicKey, message: &[u8], signature: &[u8]) -> bool {
    let secp = Secp256k1::verification_only();
    verify_signature_with(&secp, pubkey, message, signature)
}

/// Verify ECDSA signature using a caller-provided secp256k1 context
pub fn verify_signature_with<C: Verification>(
    secp: &Secp256k1<C>,
    pubkey: &PublicKey,
    message: &[u8],
    signature: &[u8],
) -> bool {
    let signature = match Signature::from_der(signature) {
        Ok(sig) => sig,
        Err(_) => return false,
    };

    let message = match Message::from_digest_slice(&message_digest(message)) {
        Ok(msg) => msg,
        Err(_) => return false,
    };

    secp.verify_ecdsa(&message, &signature, pubkey).is_ok()
}
