use crate::{placeholder_witness, InputOperation, LockGroup, SIGNATURE_SIZE};
use ckb_hash::new_blake2b;
use ckb_rosetta_error::{Error, ErrorKind};
use ckb_rosetta_types::{
    AccountIdentifier, AccountMetadata, LockType, SignatureType, SigningPayload,
};
use ckb_types::{bytes::Bytes, core::TransactionView, packed, prelude::*, H256};

/// The sighash-all digest a lock group signs.
///
/// The digest covers the transaction hash, the first witness of the group with its lock zeroed,
/// the other witnesses of the group and every witness past the inputs. Each witness is preceded
/// by its length as a little endian u64.
pub fn sighash_all_message(tx: &TransactionView, group: &LockGroup) -> Result<H256, Error> {
    let witnesses = tx.witnesses();
    let witness_at = |index: usize| {
        witnesses.get(index).ok_or_else(|| {
            ErrorKind::SignMessagesBuildError.reason(format!("missing witness #{index}"))
        })
    };

    let first = witness_at(group.first())?;
    let witness = packed::WitnessArgs::from_slice(&first.raw_data())
        .map_err(|err| ErrorKind::SignMessagesBuildError.reason(err))?;
    let zero_lock = Bytes::from(vec![0u8; SIGNATURE_SIZE]);
    let witness = witness.as_builder().lock(Some(zero_lock).pack()).build();
    if witness.as_slice() != placeholder_witness().as_slice() {
        return Err(ErrorKind::SignMessagesBuildError
            .reason(format!("witness #{} is not a signature witness", group.first())));
    }

    let tx_hash: H256 = tx.hash().unpack();
    let mut hasher = new_blake2b();
    hasher.update(tx_hash.as_bytes());
    let witness_len = witness.as_slice().len() as u64;
    hasher.update(&witness_len.to_le_bytes());
    hasher.update(witness.as_slice());
    let others = group.members[1..]
        .iter()
        .copied()
        .chain(tx.inputs().len()..witnesses.len());
    for index in others {
        let witness = witness_at(index)?.raw_data();
        let witness_len = witness.len() as u64;
        hasher.update(&witness_len.to_le_bytes());
        hasher.update(&witness);
    }
    let mut buf = [0u8; 32];
    hasher.finalize(&mut buf);
    Ok(H256::from(buf))
}

/// The account a group is signed by: the account of its first input, tagged with its lock type.
pub(crate) fn signer_account(input: &InputOperation) -> Result<AccountIdentifier, Error> {
    let mut account = input.account.clone();
    if account.metadata.is_none() {
        account.metadata = Some(AccountMetadata::new(LockType::Secp256k1Blake160).to_value()?);
    }
    Ok(account)
}

/// One payload per lock group, in group order.
pub fn build_signing_payloads(
    tx: &TransactionView,
    inputs: &[InputOperation],
    groups: &[LockGroup],
) -> Result<Vec<SigningPayload>, Error> {
    groups
        .iter()
        .map(|group| {
            let message = sighash_all_message(tx, group)?;
            let input = inputs.get(group.first()).ok_or_else(|| {
                ErrorKind::SignMessagesBuildError.reason(format!("missing input #{}", group.first()))
            })?;
            let account = signer_account(input)?;
            Ok(SigningPayload {
                address: Some(account.address.clone()),
                account_identifier: Some(account),
                hex_bytes: hex::encode(message.as_bytes()),
                signature_type: Some(SignatureType::EcdsaRecovery),
            })
        })
        .collect()
}
