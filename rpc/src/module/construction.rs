use crate::module::check_network;
use async_trait::async_trait;
use ckb_rosetta_app_config::RosettaAppConfig;
use ckb_rosetta_client::ChainClient;
use ckb_rosetta_construction::{
    derive_account, estimate_fee,
    factory::{
        ensure_supported, signed_tx_combiner, signing_payload_builder, tx_size_estimator,
        unsigned_tx_builder,
    },
    parse_transaction, validate_operations, ConstructionContext,
};
use ckb_rosetta_error::{Error, ErrorKind};
use ckb_rosetta_logger::{debug, warn};
use ckb_rosetta_types::{
    constants::ckb_currency, AccountMetadata, Amount, ConstructionCombineRequest,
    ConstructionCombineResponse, ConstructionDeriveRequest, ConstructionDeriveResponse,
    ConstructionHashRequest, ConstructionMetadata, ConstructionMetadataRequest,
    ConstructionMetadataResponse, ConstructionParseRequest, ConstructionParseResponse,
    ConstructionPayloadsRequest, ConstructionPayloadsResponse, ConstructionPreprocessRequest,
    ConstructionPreprocessResponse, ConstructionSubmitRequest, LockType, PreprocessOptions,
    RosettaTransaction, TransactionIdentifier, TransactionIdentifierResponse,
};
use std::sync::Arc;

fn check_fee_multiplier(multiplier: Option<f64>) -> Result<(), Error> {
    match multiplier {
        Some(multiplier) if !(multiplier.is_finite() && multiplier > 0.0) => Err(
            ErrorKind::InvalidPreprocessOptions
                .reason(format!("suggested_fee_multiplier {multiplier}")),
        ),
        _ => Ok(()),
    }
}

/// The lock type requested through `ConstructionMetadata`, the single signature lock when unset.
fn requested_lock_type(metadata: Option<&serde_json::Value>) -> Result<LockType, Error> {
    Ok(ConstructionMetadata::decode(metadata)?
        .map_or(LockType::Secp256k1Blake160, |metadata| metadata.lock_type))
}

/// RPC Module Construction, the offline transaction construction flow and submission.
///
/// Only `submit` talks to the node, every other step is a pure function of the request and the
/// config.
#[async_trait]
pub trait ConstructionRpc {
    // curl -d '{"network_identifier": {"blockchain": "CKB", "network": "mainnet"}, "public_key": {"hex_bytes": "02...", "curve_type": "secp256k1"}}' -H 'content-type:application/json' 'http://localhost:8080/construction/derive'
    async fn construction_derive(
        &self,
        request: ConstructionDeriveRequest,
    ) -> Result<ConstructionDeriveResponse, Error>;

    async fn construction_preprocess(
        &self,
        request: ConstructionPreprocessRequest,
    ) -> Result<ConstructionPreprocessResponse, Error>;

    async fn construction_metadata(
        &self,
        request: ConstructionMetadataRequest,
    ) -> Result<ConstructionMetadataResponse, Error>;

    async fn construction_payloads(
        &self,
        request: ConstructionPayloadsRequest,
    ) -> Result<ConstructionPayloadsResponse, Error>;

    async fn construction_combine(
        &self,
        request: ConstructionCombineRequest,
    ) -> Result<ConstructionCombineResponse, Error>;

    async fn construction_parse(
        &self,
        request: ConstructionParseRequest,
    ) -> Result<ConstructionParseResponse, Error>;

    async fn construction_hash(
        &self,
        request: ConstructionHashRequest,
    ) -> Result<TransactionIdentifierResponse, Error>;

    async fn construction_submit(
        &self,
        request: ConstructionSubmitRequest,
    ) -> Result<TransactionIdentifierResponse, Error>;
}

pub struct ConstructionRpcImpl {
    pub config: Arc<RosettaAppConfig>,
    pub client: Arc<dyn ChainClient>,
}

rosetta_routes!(ConstructionRpcImpl {
    "/construction/derive" => construction_derive(ConstructionDeriveRequest),
    "/construction/preprocess" => construction_preprocess(ConstructionPreprocessRequest),
    "/construction/metadata" => construction_metadata(ConstructionMetadataRequest),
    "/construction/payloads" => construction_payloads(ConstructionPayloadsRequest),
    "/construction/combine" => construction_combine(ConstructionCombineRequest),
    "/construction/parse" => construction_parse(ConstructionParseRequest),
    "/construction/hash" => construction_hash(ConstructionHashRequest),
    "/construction/submit" => construction_submit(ConstructionSubmitRequest),
});

impl ConstructionRpcImpl {
    fn context(&self) -> ConstructionContext<'_> {
        ConstructionContext::new(&self.config)
    }
}

#[async_trait]
impl ConstructionRpc for ConstructionRpcImpl {
    async fn construction_derive(
        &self,
        request: ConstructionDeriveRequest,
    ) -> Result<ConstructionDeriveResponse, Error> {
        check_network(&request.network_identifier, &self.config)?;
        let ctx = self.context();
        let account = derive_account(&request.public_key, ctx.network, ctx.scripts)?;
        debug!("derived {}", account.address);
        Ok(ConstructionDeriveResponse {
            address: Some(account.address.clone()),
            account_identifier: Some(account),
            metadata: None,
        })
    }

    async fn construction_preprocess(
        &self,
        request: ConstructionPreprocessRequest,
    ) -> Result<ConstructionPreprocessResponse, Error> {
        check_network(&request.network_identifier, &self.config)?;
        check_fee_multiplier(request.suggested_fee_multiplier)?;
        let ctx = self.context();
        let lock_type = requested_lock_type(request.metadata.as_ref())?;
        let operations = validate_operations(&request.operations, &ctx)?;
        let estimated_tx_size =
            tx_size_estimator(lock_type, ctx)?.estimate_tx_size(&operations);
        debug!(
            "preprocess {} inputs {} outputs, estimated size {estimated_tx_size}",
            operations.inputs.len(),
            operations.outputs.len()
        );

        let options = PreprocessOptions {
            lock_type,
            estimated_tx_size,
            suggested_fee_multiplier: request.suggested_fee_multiplier,
        };
        Ok(ConstructionPreprocessResponse {
            options: Some(options.to_value()?),
            required_public_keys: Vec::new(),
        })
    }

    async fn construction_metadata(
        &self,
        request: ConstructionMetadataRequest,
    ) -> Result<ConstructionMetadataResponse, Error> {
        check_network(&request.network_identifier, &self.config)?;
        let options = PreprocessOptions::decode(request.options.as_ref())?;
        check_fee_multiplier(options.suggested_fee_multiplier)?;
        ensure_supported(options.lock_type)?;

        let fee = estimate_fee(
            self.config.construction.fee_rate,
            options.suggested_fee_multiplier.unwrap_or(1.0),
            options.estimated_tx_size,
        );
        debug!(
            "suggested fee {fee} for {} bytes",
            options.estimated_tx_size
        );
        Ok(ConstructionMetadataResponse {
            metadata: ConstructionMetadata {
                lock_type: options.lock_type,
            }
            .to_value()?,
            suggested_fee: vec![Amount {
                value: fee.to_string(),
                currency: ckb_currency(),
                metadata: None,
            }],
        })
    }

    async fn construction_payloads(
        &self,
        request: ConstructionPayloadsRequest,
    ) -> Result<ConstructionPayloadsResponse, Error> {
        check_network(&request.network_identifier, &self.config)?;
        let ctx = self.context();
        let lock_type = requested_lock_type(request.metadata.as_ref())?;
        let operations = validate_operations(&request.operations, &ctx)?;

        let unsigned = unsigned_tx_builder(lock_type, ctx)?.build_unsigned_tx(&operations)?;
        let payloads = signing_payload_builder(lock_type, ctx)?
            .build_signing_payloads(&unsigned.to_view(), &operations.inputs)?;
        debug!(
            "unsigned transaction {:#x} with {} payloads",
            unsigned.hash(),
            payloads.len()
        );
        Ok(ConstructionPayloadsResponse {
            unsigned_transaction: unsigned.encode()?,
            payloads,
        })
    }

    async fn construction_combine(
        &self,
        request: ConstructionCombineRequest,
    ) -> Result<ConstructionCombineResponse, Error> {
        check_network(&request.network_identifier, &self.config)?;
        let unsigned = RosettaTransaction::decode(
            &request.unsigned_transaction,
            ErrorKind::SignedTxBuildError,
        )?;
        // Every signer of a transaction shares the lock family of the first one.
        let lock_type = match unsigned.account_identifier_signers.first() {
            Some(signer) => AccountMetadata::decode(signer.metadata.as_ref())?
                .map_or(LockType::Secp256k1Blake160, |metadata| metadata.lock_type),
            None => LockType::Secp256k1Blake160,
        };
        let signed =
            signed_tx_combiner(lock_type, self.context())?.combine(&unsigned, &request.signatures)?;
        debug!("combined {} signatures", request.signatures.len());
        Ok(ConstructionCombineResponse {
            signed_transaction: signed.encode()?,
        })
    }

    async fn construction_parse(
        &self,
        request: ConstructionParseRequest,
    ) -> Result<ConstructionParseResponse, Error> {
        check_network(&request.network_identifier, &self.config)?;
        let tx = RosettaTransaction::decode(&request.transaction, ErrorKind::TransactionParseError)?;
        let (operations, account_identifier_signers) = parse_transaction(&tx, request.signed)?;
        debug!("parsed {} operations", operations.len());
        Ok(ConstructionParseResponse {
            operations,
            account_identifier_signers,
            metadata: None,
        })
    }

    async fn construction_hash(
        &self,
        request: ConstructionHashRequest,
    ) -> Result<TransactionIdentifierResponse, Error> {
        check_network(&request.network_identifier, &self.config)?;
        let tx = RosettaTransaction::decode(&request.signed_transaction, ErrorKind::ComputeHashError)?;
        Ok(TransactionIdentifierResponse {
            transaction_identifier: TransactionIdentifier {
                hash: format!("{:#x}", tx.hash()),
            },
            metadata: None,
        })
    }

    async fn construction_submit(
        &self,
        request: ConstructionSubmitRequest,
    ) -> Result<TransactionIdentifierResponse, Error> {
        check_network(&request.network_identifier, &self.config)?;
        let tx = RosettaTransaction::decode(&request.signed_transaction, ErrorKind::DataParseError)?;
        let hash = self
            .client
            .send_transaction(tx.to_json())
            .await
            .map_err(|err| {
                warn!("send_transaction {:#x} failed: {err}", tx.hash());
                ErrorKind::SubmitError.reason(err)
            })?;
        debug!("submitted {hash:#x}");
        Ok(TransactionIdentifierResponse {
            transaction_identifier: TransactionIdentifier {
                hash: format!("{hash:#x}"),
            },
            metadata: None,
        })
    }
}
