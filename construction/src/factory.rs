//! The construction steps of each lock family, behind one trait per step.
//!
//! Only the single signature lock can originate transactions. The other configured families are
//! known lock types, but asking for their builders fails with `UnsupportedConstructionType`.
use crate::{
    build_signing_payloads, build_unsigned_tx, combine, estimate_tx_size, group_by_lock,
    signing::signer_account, to_rosetta_transaction, ConstructionContext, InputOperation,
    ValidatedOperations,
};
use ckb_rosetta_error::{Error, ErrorKind};
use ckb_rosetta_types::{LockType, RosettaTransaction, Signature, SigningPayload};
use ckb_types::core::TransactionView;

pub trait TxSizeEstimator {
    /// The size in a block of the transaction `operations` build.
    fn estimate_tx_size(&self, operations: &ValidatedOperations) -> u64;
}

pub trait UnsignedTxBuilder {
    /// Builds the unsigned transaction and attaches the operation context and signers to it.
    fn build_unsigned_tx(
        &self,
        operations: &ValidatedOperations,
    ) -> Result<RosettaTransaction, Error>;
}

pub trait SigningPayloadBuilder {
    fn build_signing_payloads(
        &self,
        tx: &TransactionView,
        inputs: &[InputOperation],
    ) -> Result<Vec<SigningPayload>, Error>;
}

pub trait SignedTxCombiner {
    fn combine(
        &self,
        unsigned: &RosettaTransaction,
        signatures: &[Signature],
    ) -> Result<RosettaTransaction, Error>;
}

/// The secp256k1 blake160 sighash-all lock.
pub struct Secp256k1Blake160<'a> {
    ctx: ConstructionContext<'a>,
}

impl<'a> Secp256k1Blake160<'a> {
    pub fn new(ctx: ConstructionContext<'a>) -> Self {
        Secp256k1Blake160 { ctx }
    }
}

impl TxSizeEstimator for Secp256k1Blake160<'_> {
    fn estimate_tx_size(&self, operations: &ValidatedOperations) -> u64 {
        estimate_tx_size(operations, &self.ctx)
    }
}

impl UnsignedTxBuilder for Secp256k1Blake160<'_> {
    fn build_unsigned_tx(
        &self,
        operations: &ValidatedOperations,
    ) -> Result<RosettaTransaction, Error> {
        let tx = build_unsigned_tx(operations, &self.ctx)?;
        let signers = group_by_lock(operations.inputs.iter().map(|input| &input.lock))
            .iter()
            .map(|group| signer_account(&operations.inputs[group.first()]))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(to_rosetta_transaction(&tx, operations, signers))
    }
}

impl SigningPayloadBuilder for Secp256k1Blake160<'_> {
    fn build_signing_payloads(
        &self,
        tx: &TransactionView,
        inputs: &[InputOperation],
    ) -> Result<Vec<SigningPayload>, Error> {
        let groups = group_by_lock(inputs.iter().map(|input| &input.lock));
        build_signing_payloads(tx, inputs, &groups)
    }
}

impl SignedTxCombiner for Secp256k1Blake160<'_> {
    fn combine(
        &self,
        unsigned: &RosettaTransaction,
        signatures: &[Signature],
    ) -> Result<RosettaTransaction, Error> {
        combine(unsigned, signatures)
    }
}

/// Fails with `UnsupportedConstructionType` unless transactions of `lock_type` can be built.
pub fn ensure_supported(lock_type: LockType) -> Result<(), Error> {
    match lock_type {
        LockType::Secp256k1Blake160 => Ok(()),
        other => Err(ErrorKind::UnsupportedConstructionType.reason(other)),
    }
}

fn secp256k1_blake160<'a>(
    lock_type: LockType,
    ctx: ConstructionContext<'a>,
) -> Result<Secp256k1Blake160<'a>, Error> {
    ensure_supported(lock_type)?;
    Ok(Secp256k1Blake160::new(ctx))
}

pub fn tx_size_estimator<'a>(
    lock_type: LockType,
    ctx: ConstructionContext<'a>,
) -> Result<Box<dyn TxSizeEstimator + 'a>, Error> {
    Ok(Box::new(secp256k1_blake160(lock_type, ctx)?))
}

pub fn unsigned_tx_builder<'a>(
    lock_type: LockType,
    ctx: ConstructionContext<'a>,
) -> Result<Box<dyn UnsignedTxBuilder + 'a>, Error> {
    Ok(Box::new(secp256k1_blake160(lock_type, ctx)?))
}

pub fn signing_payload_builder<'a>(
    lock_type: LockType,
    ctx: ConstructionContext<'a>,
) -> Result<Box<dyn SigningPayloadBuilder + 'a>, Error> {
    Ok(Box::new(secp256k1_blake160(lock_type, ctx)?))
}

pub fn signed_tx_combiner<'a>(
    lock_type: LockType,
    ctx: ConstructionContext<'a>,
) -> Result<Box<dyn SignedTxCombiner + 'a>, Error> {
    Ok(Box::new(secp256k1_blake160(lock_type, ctx)?))
}
