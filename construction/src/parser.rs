use crate::ValidatedOperations;
use ckb_rosetta_error::{Error, ErrorKind};
use ckb_rosetta_types::{
    constants::{INPUT_OPERATION_TYPE, OUTPUT_OPERATION_TYPE},
    format_coin_identifier, AccountIdentifier, CoinAction, CoinChange, CoinIdentifier, Operation,
    OperationIdentifier, OperationMetadata, RosettaTransaction,
};
use ckb_types::{core::TransactionView, packed};

/// Attaches the operation context to a built transaction, so it survives the round trip through
/// the caller.
pub fn to_rosetta_transaction(
    tx: &TransactionView,
    operations: &ValidatedOperations,
    signers: Vec<AccountIdentifier>,
) -> RosettaTransaction {
    let mut rosetta_tx = RosettaTransaction::from_view(tx);
    for input in &operations.inputs {
        rosetta_tx
            .input_amounts
            .extend(input.operation.amount.iter().cloned());
        rosetta_tx.input_accounts.push(input.account.clone());
        rosetta_tx
            .input_indices
            .push(input.operation.operation_identifier.index);
    }
    for output in &operations.outputs {
        rosetta_tx
            .output_amounts
            .extend(output.operation.amount.iter().cloned());
        rosetta_tx.output_accounts.push(output.account.clone());
        rosetta_tx
            .output_indices
            .push(output.operation.operation_identifier.index);
    }
    rosetta_tx.account_identifier_signers = signers;
    rosetta_tx
}

fn check_len(name: &str, len: usize, expected: usize) -> Result<(), Error> {
    if len != expected {
        return Err(ErrorKind::TransactionParseError
            .reason(format!("{len} {name} for {expected} cells")));
    }
    Ok(())
}

/// Recovers the operations a transaction was built from, and its signers when `signed`.
pub fn parse_transaction(
    tx: &RosettaTransaction,
    signed: bool,
) -> Result<(Vec<Operation>, Vec<AccountIdentifier>), Error> {
    let inputs = tx.inputs.len();
    let outputs = tx.outputs.len();
    check_len("input amounts", tx.input_amounts.len(), inputs)?;
    check_len("input accounts", tx.input_accounts.len(), inputs)?;
    check_len("output amounts", tx.output_amounts.len(), outputs)?;
    check_len("output accounts", tx.output_accounts.len(), outputs)?;
    check_len("outputs data", tx.outputs_data.len(), outputs)?;
    if !tx.input_indices.is_empty() {
        check_len("input indices", tx.input_indices.len(), inputs)?;
    }
    if !tx.output_indices.is_empty() {
        check_len("output indices", tx.output_indices.len(), outputs)?;
    }

    let mut operations = Vec::with_capacity(inputs + outputs);
    for (i, input) in tx.inputs.iter().enumerate() {
        let index = tx.input_indices.get(i).copied().unwrap_or(i as i64);
        let out_point = &input.previous_output;
        let index_in_tx: u32 = out_point.index.into();
        operations.push(Operation {
            operation_identifier: OperationIdentifier {
                index,
                network_index: None,
            },
            related_operations: Vec::new(),
            type_: INPUT_OPERATION_TYPE.to_owned(),
            status: None,
            account: Some(tx.input_accounts[i].clone()),
            amount: Some(tx.input_amounts[i].clone()),
            coin_change: Some(CoinChange {
                coin_identifier: CoinIdentifier {
                    identifier: format_coin_identifier(&out_point.tx_hash, index_in_tx),
                },
                coin_action: CoinAction::CoinSpent,
            }),
            metadata: None,
        });
    }
    for (i, output) in tx.outputs.iter().enumerate() {
        let index = tx
            .output_indices
            .get(i)
            .copied()
            .unwrap_or((inputs + i) as i64);
        let type_script = output.type_.clone().map(packed::Script::from);
        let metadata =
            OperationMetadata::from_output(type_script, tx.outputs_data[i].as_bytes())?;
        operations.push(Operation {
            operation_identifier: OperationIdentifier {
                index,
                network_index: None,
            },
            related_operations: Vec::new(),
            type_: OUTPUT_OPERATION_TYPE.to_owned(),
            status: None,
            account: Some(tx.output_accounts[i].clone()),
            amount: Some(tx.output_amounts[i].clone()),
            coin_change: None,
            metadata: metadata.to_value()?,
        });
    }

    let signers = if signed {
        tx.account_identifier_signers.clone()
    } else {
        Vec::new()
    };
    Ok((operations, signers))
}
