use crate::{placeholder_witness, SIGNATURE_SIZE};
use ckb_jsonrpc_types::JsonBytes;
use ckb_rosetta_error::{Error, ErrorKind};
use ckb_rosetta_types::{RosettaTransaction, Signature, SignatureType};
use ckb_types::{bytes::Bytes, prelude::*};

/// Writes `signatures` into the placeholder witnesses of `unsigned`, in witness order.
///
/// There must be exactly one signature per placeholder. The operation context of the
/// transaction is kept as is.
pub fn combine(
    unsigned: &RosettaTransaction,
    signatures: &[Signature],
) -> Result<RosettaTransaction, Error> {
    let placeholder = placeholder_witness();
    let slots: Vec<usize> = unsigned
        .witnesses
        .iter()
        .enumerate()
        .filter(|(_, witness)| witness.as_bytes() == placeholder.as_slice())
        .map(|(index, _)| index)
        .collect();
    if slots.len() != signatures.len() {
        return Err(ErrorKind::SignedTxBuildError.reason(format!(
            "{} signatures for {} lock groups",
            signatures.len(),
            slots.len()
        )));
    }

    let mut signed = unsigned.clone();
    for (slot, signature) in slots.into_iter().zip(signatures) {
        let lock = decode_signature(signature)?;
        let witness = placeholder.clone().as_builder().lock(Some(lock).pack()).build();
        signed.witnesses[slot] = JsonBytes::from_bytes(witness.as_bytes());
    }
    Ok(signed)
}

fn decode_signature(signature: &Signature) -> Result<Bytes, Error> {
    if signature.signature_type != SignatureType::EcdsaRecovery {
        return Err(ErrorKind::SignedTxBuildError.reason(format!(
            "unsupported signature type {:?}",
            signature.signature_type
        )));
    }
    let hex_bytes = signature.hex_bytes.trim_start_matches("0x");
    let raw = hex::decode(hex_bytes).map_err(|err| ErrorKind::SignedTxBuildError.reason(err))?;
    if raw.len() != SIGNATURE_SIZE {
        return Err(ErrorKind::SignedTxBuildError.reason(format!(
            "signature of {} bytes, expected {SIGNATURE_SIZE}",
            raw.len()
        )));
    }
    Ok(Bytes::from(raw))
}
