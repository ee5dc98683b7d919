use crate::error::node_error;
use crate::module::{block_identifier, check_network};
use async_trait::async_trait;
use ckb_jsonrpc_types as json;
use ckb_rosetta_address::Address;
use ckb_rosetta_app_config::RosettaAppConfig;
use ckb_rosetta_client::{Cell, ChainClient, Order, SearchKey, SEARCH_LIMIT};
use ckb_rosetta_error::{Error, ErrorKind};
use ckb_rosetta_logger::debug;
use ckb_rosetta_types::{
    constants::ckb_currency, format_coin_identifier, AccountBalanceRequest,
    AccountBalanceResponse, AccountMetadata, Amount, AmountMetadata, Coin, CoinIdentifier,
    Currency, LockType,
};
use ckb_types::{core::Capacity, packed};
use std::{collections::BTreeMap, sync::Arc};

/// The amount of an sUDT cell, the first 16 bytes of its data as a little endian `u128`.
pub(crate) fn parse_sudt_amount(data: &[u8]) -> Result<u128, Error> {
    let raw: [u8; 16] = data
        .get(..16)
        .and_then(|raw| raw.try_into().ok())
        .ok_or_else(|| ErrorKind::SudtAmountInvalid.reason(format!("{} bytes", data.len())))?;
    Ok(u128::from_le_bytes(raw))
}

/// RPC Module Account, balances of live cells.
#[async_trait]
pub trait AccountRpc {
    // curl -d '{"network_identifier": {"blockchain": "CKB", "network": "mainnet"}, "account_identifier": {"address": "ckb1..."}}' -H 'content-type:application/json' 'http://localhost:8080/account/balance'
    /// The CKB balance and the configured sUDT balances of an address at the tip.
    ///
    /// Only cells whose lock belongs to `account_identifier.metadata.lock_type` count, the single
    /// signature lock when unset.
    async fn account_balance(
        &self,
        request: AccountBalanceRequest,
    ) -> Result<AccountBalanceResponse, Error>;
}

pub struct AccountRpcImpl {
    pub config: Arc<RosettaAppConfig>,
    pub client: Arc<dyn ChainClient>,
}

rosetta_routes!(AccountRpcImpl {
    "/account/balance" => account_balance(AccountBalanceRequest),
});

#[derive(Default)]
struct Balance {
    capacity: u64,
    available: u64,
    coins: Vec<Coin>,
    // token args => amount
    tokens: BTreeMap<String, (Currency, u128)>,
}

impl AccountRpcImpl {
    async fn live_cells(&self, lock: json::Script) -> Result<Vec<Cell>, Error> {
        let mut cells = Vec::new();
        let mut after = None;
        loop {
            let page = self
                .client
                .get_cells(SearchKey::by_lock(lock.clone()), Order::Asc, SEARCH_LIMIT, after)
                .await
                .map_err(|err| node_error("get_cells", err))?;
            let last_page = page.objects.len() < SEARCH_LIMIT as usize || page.last_cursor.is_empty();
            cells.extend(page.objects);
            if last_page {
                break;
            }
            after = Some(page.last_cursor);
        }
        Ok(cells)
    }

    fn add_cell(&self, balance: &mut Balance, cell: Cell) -> Result<(), Error> {
        let output: packed::CellOutput = cell.output.clone().into();
        let data = cell
            .output_data
            .as_ref()
            .map(|data| data.as_bytes())
            .unwrap_or_default();
        let capacity = cell.output.capacity.value();

        balance.capacity = balance
            .capacity
            .checked_add(capacity)
            .ok_or_else(|| ErrorKind::ServerError.reason("capacity overflow"))?;
        let available = if cell.output.type_.is_none() && data.is_empty() {
            capacity
        } else {
            let occupied = Capacity::bytes(data.len())
                .and_then(|data_capacity| output.occupied_capacity(data_capacity))
                .map_err(|err| ErrorKind::ServerError.reason(err))?;
            capacity.saturating_sub(occupied.as_u64())
        };
        balance.available += available;

        if let (Some(type_script), Some(sudt)) = (output.type_().to_opt(), &self.config.scripts.sudt) {
            if let Some((key, token)) = sudt.token_of(&type_script) {
                let amount = parse_sudt_amount(data)?;
                let entry = balance.tokens.entry(key).or_insert_with(|| {
                    let currency = Currency {
                        symbol: token.symbol.clone(),
                        decimals: token.decimals,
                        metadata: None,
                    };
                    (currency, 0)
                });
                entry.1 = entry
                    .1
                    .checked_add(amount)
                    .ok_or_else(|| ErrorKind::SudtAmountInvalid.reason("amount overflow"))?;
            }
        }

        balance.coins.push(Coin {
            coin_identifier: CoinIdentifier {
                identifier: format_coin_identifier(
                    &cell.out_point.tx_hash,
                    cell.out_point.index.value(),
                ),
            },
            amount: Amount {
                value: capacity.to_string(),
                currency: ckb_currency(),
                metadata: None,
            },
        });
        Ok(())
    }
}

#[async_trait]
impl AccountRpc for AccountRpcImpl {
    async fn account_balance(
        &self,
        request: AccountBalanceRequest,
    ) -> Result<AccountBalanceResponse, Error> {
        check_network(&request.network_identifier, &self.config)?;
        let account = &request.account_identifier;
        debug!("account balance of {}", account.address);

        let address = Address::parse(&account.address)
            .map_err(|err| ErrorKind::AddressParseError.reason(err))?;
        if address.network() != self.config.network.address_network() {
            return Err(ErrorKind::AddressParseError.reason(format!(
                "{} is not a {} address",
                account.address, self.config.network
            )));
        }
        let lock_type = AccountMetadata::decode(account.metadata.as_ref())?
            .map_or(LockType::Secp256k1Blake160, |metadata| metadata.lock_type);
        let lock = json::Script::from(address.into_script());

        let mut balance = Balance::default();
        for cell in self.live_cells(lock.clone()).await? {
            let cell_lock: packed::Script = cell.output.lock.clone().into();
            if cell.output.lock != lock
                || self.config.scripts.lock_type_of(&cell_lock) != Some(lock_type)
            {
                continue;
            }
            self.add_cell(&mut balance, cell)?;
        }

        let tip = self
            .client
            .get_tip_header()
            .await
            .map_err(|err| node_error("get_tip_header", err))?;

        let mut balances = vec![Amount {
            value: balance.capacity.to_string(),
            currency: ckb_currency(),
            metadata: Some(
                AmountMetadata {
                    available_ckb_balance: balance.available,
                }
                .to_value()?,
            ),
        }];
        balances.extend(
            balance
                .tokens
                .into_values()
                .map(|(currency, amount)| Amount {
                    value: amount.to_string(),
                    currency,
                    metadata: None,
                }),
        );
        Ok(AccountBalanceResponse {
            block_identifier: block_identifier(&tip),
            balances,
            coins: balance.coins,
            metadata: None,
        })
    }
}
