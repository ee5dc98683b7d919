mod builder;

use ckb_crypto::secp::Privkey;
use ckb_rosetta_address::{blake160, Address, NetworkType};
use ckb_rosetta_app_config::{RosettaAppConfig, BUNDLED_CONFIG};
use ckb_rosetta_types::{
    constants::{ckb_currency, INPUT_OPERATION_TYPE, OUTPUT_OPERATION_TYPE},
    AccountIdentifier, Amount, CoinAction, CoinChange, CoinIdentifier, CurveType, Operation,
    OperationIdentifier, PublicKey, Signature, SignatureType, SigningPayload,
};
use ckb_types::{bytes::Bytes, packed, prelude::*, H256};

pub(crate) fn config() -> RosettaAppConfig {
    RosettaAppConfig::load_from_slice(BUNDLED_CONFIG.as_bytes()).expect("bundled config")
}

pub(crate) fn privkey(seed: u8) -> Privkey {
    Privkey::from_slice(&[seed; 32])
}

pub(crate) fn secp_lock(config: &RosettaAppConfig, privkey: &Privkey) -> packed::Script {
    let pubkey = privkey.pubkey().expect("pubkey");
    let args = blake160(&pubkey.serialize());
    config
        .scripts
        .secp256k1_blake160
        .build_script(Bytes::copy_from_slice(&args))
}

pub(crate) fn address_of(lock: packed::Script) -> String {
    Address::new(NetworkType::Mainnet, lock)
        .encode()
        .expect("encode address")
}

pub(crate) fn secp_address(config: &RosettaAppConfig, seed: u8) -> String {
    address_of(secp_lock(config, &privkey(seed)))
}

pub(crate) fn multisig_address(config: &RosettaAppConfig, seed: u8) -> String {
    let lock = config
        .scripts
        .secp256k1_blake160_multisig
        .build_script(Bytes::from(vec![seed; 20]));
    address_of(lock)
}

pub(crate) fn coin(seed: u8, index: u32) -> String {
    format!("0x{}:{}", hex::encode([seed; 32]), index)
}

fn amount(value: String) -> Amount {
    Amount {
        value,
        currency: ckb_currency(),
        metadata: None,
    }
}

pub(crate) fn input(index: i64, address: &str, value: i64, coin_identifier: &str) -> Operation {
    Operation {
        operation_identifier: OperationIdentifier {
            index,
            network_index: None,
        },
        related_operations: Vec::new(),
        type_: INPUT_OPERATION_TYPE.to_owned(),
        status: None,
        account: Some(AccountIdentifier::new(address.to_owned())),
        amount: Some(amount(value.to_string())),
        coin_change: Some(CoinChange {
            coin_identifier: CoinIdentifier {
                identifier: coin_identifier.to_owned(),
            },
            coin_action: CoinAction::CoinSpent,
        }),
        metadata: None,
    }
}

pub(crate) fn output(index: i64, address: &str, value: u64) -> Operation {
    Operation {
        operation_identifier: OperationIdentifier {
            index,
            network_index: None,
        },
        related_operations: Vec::new(),
        type_: OUTPUT_OPERATION_TYPE.to_owned(),
        status: None,
        account: Some(AccountIdentifier::new(address.to_owned())),
        amount: Some(amount(value.to_string())),
        coin_change: None,
        metadata: None,
    }
}

/// One input of 62 CKB paying 61 CKB, the rest is the fee.
pub(crate) fn transfer(config: &RosettaAppConfig) -> Vec<Operation> {
    vec![
        input(0, &secp_address(config, 1), -6_200_000_000, &coin(0xaa, 0)),
        output(1, &secp_address(config, 2), 6_100_000_000),
    ]
}

pub(crate) fn sign(privkey: &Privkey, payload: &SigningPayload) -> Signature {
    let message =
        H256::from_slice(&hex::decode(&payload.hex_bytes).expect("hex")).expect("message");
    let signature = privkey.sign_recoverable(&message).expect("sign");
    let pubkey = privkey.pubkey().expect("pubkey");
    Signature {
        signing_payload: payload.clone(),
        public_key: PublicKey {
            hex_bytes: hex::encode(pubkey.serialize()),
            curve_type: CurveType::Secp256k1,
        },
        signature_type: SignatureType::EcdsaRecovery,
        hex_bytes: hex::encode(signature.serialize()),
    }
}
