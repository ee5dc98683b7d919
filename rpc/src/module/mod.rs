/// Routes every `$path` to `$method` of the rpc impl, as a JSON `POST`.
macro_rules! rosetta_routes {
    ($rpc:ty { $($path:literal => $method:ident($request:ty),)+ }) => {
        impl $rpc {
            pub(crate) fn into_router(self) -> ::axum::Router {
                ::axum::Router::new()
                    $(
                        .route(
                            $path,
                            ::axum::routing::post(
                                |::axum::extract::State(rpc): ::axum::extract::State<::std::sync::Arc<$rpc>>,
                                 $crate::RosettaJson(request): $crate::RosettaJson<$request>| async move {
                                    rpc.$method(request)
                                        .await
                                        .map(::axum::Json)
                                        .map_err($crate::RpcError)
                                },
                            ),
                        )
                    )+
                    .with_state(::std::sync::Arc::new(self))
            }
        }
    };
}

mod account;
mod block;
mod construction;
mod network;

pub use self::account::{AccountRpc, AccountRpcImpl};
#[cfg(test)]
pub(crate) use self::account::parse_sudt_amount;
pub use self::block::{BlockRpc, BlockRpcImpl};
pub use self::construction::{ConstructionRpc, ConstructionRpcImpl};
pub use self::network::{NetworkRpc, NetworkRpcImpl};

use ckb_jsonrpc_types::HeaderView;
use ckb_rosetta_address::Address;
use ckb_rosetta_app_config::RosettaAppConfig;
use ckb_rosetta_error::{Error, ErrorKind};
use ckb_rosetta_types::{
    constants::BLOCKCHAIN, AccountIdentifier, AccountMetadata, BlockIdentifier, NetworkIdentifier,
};
use ckb_types::packed;

/// Rejects requests addressed to another chain or network.
pub(crate) fn check_network(
    network_identifier: &NetworkIdentifier,
    config: &RosettaAppConfig,
) -> Result<(), Error> {
    if network_identifier.blockchain != BLOCKCHAIN
        || network_identifier.network != config.network.as_str()
    {
        return Err(ErrorKind::UnsupportedNetwork.reason(format!(
            "{}/{}",
            network_identifier.blockchain, network_identifier.network
        )));
    }
    Ok(())
}

pub(crate) fn block_identifier(header: &HeaderView) -> BlockIdentifier {
    BlockIdentifier {
        index: header.inner.number.value() as i64,
        hash: format!("{:#x}", header.hash),
    }
}

/// The account of a lock, tagged with its lock type when the family is configured.
pub(crate) fn account_of(
    lock: &packed::Script,
    config: &RosettaAppConfig,
) -> Result<AccountIdentifier, Error> {
    let address = Address::new(config.network.address_network(), lock.clone())
        .encode()
        .map_err(|err| ErrorKind::AddressGenerationError.reason(err))?;
    let mut account = AccountIdentifier::new(address);
    if let Some(lock_type) = config.scripts.lock_type_of(lock) {
        account.metadata = Some(AccountMetadata::new(lock_type).to_value()?);
    }
    Ok(account)
}
