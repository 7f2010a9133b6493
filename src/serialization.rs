//! Byte layout of signable content and raw transactions
//!
//! SignableContent(tx, i) = in_i.prevout.hash ‖ BE32(in_i.prevout.index) ‖ out_0 ‖ … ‖ out_n
//! RawTx(tx)              = ∀i: in_i.prevout.hash ‖ BE32(in_i.prevout.index) ‖ in_i.signature
//!                          ‖ out_0 ‖ … ‖ out_n
//! where out_j            = BE64(out_j.value) ‖ compressed(out_j.address)
//!
//! The signable content of an input never includes any signature bytes.

use crate::constants::*;
use crate::types::*;

/// Signable content for input `index`, or `None` if there is no such input
pub fn raw_data_to_sign(
    inputs: &[TransactionInput],
    outputs: &[TransactionOutput],
    index: usize,
) -> Option<ByteString> {
    let input = inputs.get(index)?;

    let mut data = Vec::with_capacity(OUTPOINT_SIZE + outputs.len() * OUTPUT_SIZE);
    write_outpoint(&mut data, &input.prevout);
    for output in outputs {
        write_output(&mut data, output);
    }
    Some(data)
}

/// Full transaction serialization, signatures included
pub fn raw_tx(inputs: &[TransactionInput], outputs: &[TransactionOutput]) -> ByteString {
    let signature_bytes: usize = inputs.iter().map(|i| i.signature.len()).sum();
    let mut data = Vec::with_capacity(
        inputs.len() * OUTPOINT_SIZE + signature_bytes + outputs.len() * OUTPUT_SIZE,
    );

    for input in inputs {
        write_outpoint(&mut data, &input.prevout);
        data.extend_from_slice(&input.signature);
    }
    for output in outputs {
        write_output(&mut data, output);
    }
    data
}

fn write_outpoint(data: &mut ByteString, outpoint: &OutPoint) {
    data.extend_from_slice(&outpoint.hash);
    data.extend_from_slice(&outpoint.index.to_be_bytes());
}

fn write_output(data: &mut ByteString, output: &TransactionOutput) {
    data.extend_from_slice(&output.value.to_be_bytes());
    data.extend_from_slice(&output.address.serialize());
}
