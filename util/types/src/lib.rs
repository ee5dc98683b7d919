//! Rosetta API data model for CKB.
//!
//! The request and response objects follow the Rosetta API 1.4 schema. Opaque fields such as
//! `metadata` stay as JSON values on the wire and are decoded through the closed types of
//! [`metadata`] at the point of use.
pub mod constants;
mod error;
pub mod metadata;
mod models;
mod request;
mod transaction;

#[cfg(test)]
mod tests;

pub use error::ErrorObject;
pub use metadata::{
    AccountMetadata, AmountMetadata, ConstructionMetadata, LockType, OperationMetadata,
    PreprocessOptions,
};
pub use models::{
    AccountIdentifier, Allow, Amount, Block, BlockIdentifier, CoinAction, CoinChange,
    CoinIdentifier, Coin, Currency, CurveType, NetworkIdentifier, Operation, OperationIdentifier,
    OperationStatus, PartialBlockIdentifier, Peer, PublicKey, Signature, SignatureType,
    SigningPayload, SubAccountIdentifier, SubNetworkIdentifier, Transaction,
    TransactionIdentifier, Version,
};
pub use request::{
    AccountBalanceRequest, AccountBalanceResponse, BlockRequest, BlockResponse,
    BlockTransactionRequest, BlockTransactionResponse, ConstructionCombineRequest,
    ConstructionCombineResponse, ConstructionDeriveRequest, ConstructionDeriveResponse,
    ConstructionHashRequest, ConstructionMetadataRequest, ConstructionMetadataResponse,
    ConstructionParseRequest, ConstructionParseResponse, ConstructionPayloadsRequest,
    ConstructionPayloadsResponse, ConstructionPreprocessRequest, ConstructionPreprocessResponse,
    ConstructionSubmitRequest, MetadataRequest, NetworkListResponse, NetworkOptionsResponse,
    NetworkRequest, NetworkStatusResponse, TransactionIdentifierResponse,
};
pub use transaction::{format_coin_identifier, parse_coin_identifier, RosettaTransaction};
