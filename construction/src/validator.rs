use crate::ConstructionContext;
use ckb_rosetta_address::Address;
use ckb_rosetta_error::{Error, ErrorKind};
use ckb_rosetta_logger::debug;
use ckb_rosetta_types::{
    constants::{INPUT_OPERATION_TYPE, OUTPUT_OPERATION_TYPE},
    parse_coin_identifier, AccountIdentifier, AccountMetadata, CoinAction, LockType, Operation,
    OperationMetadata,
};
use ckb_types::{bytes::Bytes, packed, prelude::*};

/// An `INPUT` operation spending a live cell.
#[derive(Clone, Debug)]
pub struct InputOperation<'a> {
    pub operation: &'a Operation,
    pub account: &'a AccountIdentifier,
    pub lock: packed::Script,
    pub out_point: packed::OutPoint,
    /// The absolute value of the amount.
    pub capacity: u64,
    pub cell_dep: Option<packed::CellDep>,
}

/// An `OUTPUT` operation creating a cell.
#[derive(Clone, Debug)]
pub struct OutputOperation<'a> {
    pub operation: &'a Operation,
    pub account: &'a AccountIdentifier,
    pub lock: packed::Script,
    pub capacity: u64,
    pub type_script: Option<packed::Script>,
    pub data: Bytes,
    pub cell_dep: Option<packed::CellDep>,
}

impl OutputOperation<'_> {
    pub fn cell_output(&self) -> packed::CellOutput {
        packed::CellOutput::new_builder()
            .capacity(self.capacity.pack())
            .lock(self.lock.clone())
            .type_(self.type_script.clone().pack())
            .build()
    }
}

/// An operation set which passed [`validate_operations`].
#[derive(Clone, Debug)]
pub struct ValidatedOperations<'a> {
    pub inputs: Vec<InputOperation<'a>>,
    pub outputs: Vec<OutputOperation<'a>>,
    pub input_total: u64,
    pub output_total: u64,
}

/// Splits `operations` into inputs and outputs and checks each of them.
///
/// The checks run in a fixed order so the same request always fails with the same error:
/// operation types, presence of both sides, every input, every output and finally the
/// conservation of capacity, `input_total > output_total`.
pub fn validate_operations<'a>(
    operations: &'a [Operation],
    ctx: &ConstructionContext,
) -> Result<ValidatedOperations<'a>, Error> {
    let mut input_operations = Vec::new();
    let mut output_operations = Vec::new();
    for operation in operations {
        match operation.type_.as_str() {
            INPUT_OPERATION_TYPE => input_operations.push(operation),
            OUTPUT_OPERATION_TYPE => output_operations.push(operation),
            other => return Err(ErrorKind::UnsupportedOperationType.reason(other)),
        }
    }
    if input_operations.is_empty() {
        return Err(ErrorKind::MissingInputOperations.into());
    }
    if output_operations.is_empty() {
        return Err(ErrorKind::MissingOutputOperations.into());
    }

    let mut input_total = 0u64;
    let mut inputs = Vec::with_capacity(input_operations.len());
    for operation in input_operations {
        let input = validate_input(operation, ctx)?;
        input_total = input_total
            .checked_add(input.capacity)
            .ok_or_else(|| ErrorKind::InvalidInputAmount.reason("total input amount overflows"))?;
        inputs.push(input);
    }

    let mut output_total = 0u64;
    let last = output_operations.len() - 1;
    let mut outputs = Vec::with_capacity(output_operations.len());
    for (position, operation) in output_operations.into_iter().enumerate() {
        let output = validate_output(operation, position == last, ctx)?;
        output_total = output_total
            .checked_add(output.capacity)
            .ok_or_else(|| ErrorKind::InvalidOutputAmount.reason("total output amount overflows"))?;
        outputs.push(output);
    }

    if input_total <= output_total {
        return Err(ErrorKind::CapacityNotEnough.reason(format!(
            "inputs {input_total} shannons, outputs {output_total} shannons"
        )));
    }
    debug!(
        "validated {} inputs and {} outputs, fee {} shannons",
        inputs.len(),
        outputs.len(),
        input_total - output_total
    );
    Ok(ValidatedOperations {
        inputs,
        outputs,
        input_total,
        output_total,
    })
}

fn amount_value(operation: &Operation) -> &str {
    operation
        .amount
        .as_ref()
        .map_or("missing amount", |amount| amount.value.as_str())
}

fn validate_input<'a>(
    operation: &'a Operation,
    ctx: &ConstructionContext,
) -> Result<InputOperation<'a>, Error> {
    let capacity = operation
        .amount
        .as_ref()
        .and_then(|amount| amount.value.parse::<i64>().ok())
        .filter(|value| *value < 0)
        .map(i64::unsigned_abs)
        .ok_or_else(|| ErrorKind::InvalidInputAmount.reason(amount_value(operation)))?;

    let coin_change = operation
        .coin_change
        .as_ref()
        .ok_or_else(|| ErrorKind::InvalidCoinChange.reason("missing coin change"))?;
    if coin_change.coin_action != CoinAction::CoinSpent {
        return Err(ErrorKind::InvalidCoinChange.reason("an input must spend its coin"));
    }
    let out_point = parse_coin_identifier(&coin_change.coin_identifier.identifier)?;

    let (account, lock) = parse_account(operation, ctx)?;
    // Only cells of the single signature lock can be spent.
    match ctx.scripts.lock_type_of(&lock) {
        Some(LockType::Secp256k1Blake160) => {}
        Some(other) => return Err(ErrorKind::UnsupportedLockType.reason(other)),
        None => return Err(ErrorKind::UnsupportedLockType.reason(&account.address)),
    }
    if let Some(metadata) = AccountMetadata::decode(account.metadata.as_ref())? {
        if metadata.lock_type != LockType::Secp256k1Blake160 {
            return Err(ErrorKind::UnsupportedLockType.reason(metadata.lock_type));
        }
    }

    let metadata = OperationMetadata::decode(operation.metadata.as_ref())?;
    if metadata.type_script.is_some() || metadata.output_data.is_some() {
        return Err(ErrorKind::InvalidOperationMetadata
            .reason("type_script and output_data only apply to outputs"));
    }
    Ok(InputOperation {
        operation,
        account,
        lock,
        out_point,
        capacity,
        cell_dep: metadata.cell_dep()?,
    })
}

fn validate_output<'a>(
    operation: &'a Operation,
    is_last: bool,
    ctx: &ConstructionContext,
) -> Result<OutputOperation<'a>, Error> {
    let capacity = operation
        .amount
        .as_ref()
        .and_then(|amount| amount.value.parse::<u64>().ok())
        .ok_or_else(|| ErrorKind::InvalidOutputAmount.reason(amount_value(operation)))?;

    let (account, lock) = parse_account(operation, ctx)?;
    AccountMetadata::decode(account.metadata.as_ref())?;
    // The last output may carry zero capacity, the change computed once the fee is known.
    let deferred_change = is_last && capacity == 0;
    if !deferred_change
        && ctx.scripts.lock_type_of(&lock) == Some(LockType::Secp256k1Blake160)
        && capacity < ctx.min_capacity
    {
        return Err(ErrorKind::LessThanMinCapacity.reason(format!(
            "{capacity} < {} shannons",
            ctx.min_capacity
        )));
    }

    let metadata = OperationMetadata::decode(operation.metadata.as_ref())?;
    Ok(OutputOperation {
        operation,
        account,
        lock,
        capacity,
        type_script: metadata.type_script()?,
        data: metadata.output_data()?.unwrap_or_default(),
        cell_dep: metadata.cell_dep()?,
    })
}

/// Parses the address of the operation account into its lock script.
pub(crate) fn parse_account<'a>(
    operation: &'a Operation,
    ctx: &ConstructionContext,
) -> Result<(&'a AccountIdentifier, packed::Script), Error> {
    let account = operation
        .account
        .as_ref()
        .ok_or_else(|| ErrorKind::AddressParseError.reason("missing account"))?;
    let address =
        Address::parse(&account.address).map_err(|err| ErrorKind::AddressParseError.reason(err))?;
    if address.network() != ctx.network {
        return Err(ErrorKind::AddressParseError.reason(format!(
            "{} is not an address of {}",
            account.address, ctx.network
        )));
    }
    Ok((account, address.into_script()))
}
