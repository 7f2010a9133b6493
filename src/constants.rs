//! Byte layout constants for signable content and raw transactions

/// Size of a transaction hash: 32 bytes
pub const HASH_SIZE: usize = 32;

/// Size of an output index inside an outpoint: big-endian u32
pub const OUTPUT_INDEX_SIZE: usize = 4;

/// Size of an output value: big-endian i64
pub const VALUE_SIZE: usize = 8;

/// Size of a compressed secp256k1 public key
pub const PUBLIC_KEY_SIZE: usize = 33;

/// Serialized outpoint: hash followed by output index
pub const OUTPOINT_SIZE: usize = HASH_SIZE + OUTPUT_INDEX_SIZE;

/// Serialized output: value followed by recipient address
pub const OUTPUT_SIZE: usize = VALUE_SIZE + PUBLIC_KEY_SIZE;
