use ckb_jsonrpc_types::{CellDep, ScriptHashType};
use ckb_rosetta_types::LockType;
use ckb_types::{bytes::Bytes, core, packed, prelude::*, H256};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A deployed script and the cell deps a transaction needs to run it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScriptConfig {
    pub code_hash: H256,
    pub hash_type: ScriptHashType,
    #[serde(default)]
    pub cell_deps: Vec<CellDep>,
}

impl ScriptConfig {
    /// Whether `script` runs this code, whatever its args.
    pub fn matches(&self, script: &packed::Script) -> bool {
        script.code_hash() == self.code_hash.pack() && script.hash_type() == self.packed_hash_type()
    }

    pub fn build_script(&self, args: Bytes) -> packed::Script {
        packed::Script::new_builder()
            .code_hash(self.code_hash.pack())
            .hash_type(self.packed_hash_type())
            .args(args.pack())
            .build()
    }

    pub fn cell_deps(&self) -> Vec<packed::CellDep> {
        self.cell_deps.iter().cloned().map(Into::into).collect()
    }

    fn packed_hash_type(&self) -> packed::Byte {
        core::ScriptHashType::from(self.hash_type.clone()).into()
    }
}

/// A token tracked by `/account/balance`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TokenConfig {
    pub symbol: String,
    pub decimals: i32,
}

/// The sUDT type script and the tokens to report balances of, keyed by `0x` prefixed type args.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SudtConfig {
    pub code_hash: H256,
    pub hash_type: ScriptHashType,
    #[serde(default)]
    pub cell_deps: Vec<CellDep>,
    #[serde(default)]
    pub tokens: BTreeMap<String, TokenConfig>,
}

impl SudtConfig {
    /// The configured token whose type script is `script`.
    pub fn token_of(&self, script: &packed::Script) -> Option<(String, &TokenConfig)> {
        let hash_type: packed::Byte = core::ScriptHashType::from(self.hash_type.clone()).into();
        if script.code_hash() != self.code_hash.pack() || script.hash_type() != hash_type {
            return None;
        }
        let key = format!("0x{}", hex::encode(script.args().raw_data()));
        let token = self.tokens.get(&key)?;
        Some((key, token))
    }
}

/// Scripts of the chain, `[scripts]` in `rosetta.toml`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScriptsConfig {
    pub secp256k1_blake160: ScriptConfig,
    pub secp256k1_blake160_multisig: ScriptConfig,
    #[serde(default)]
    pub anyone_can_pay: Option<ScriptConfig>,
    #[serde(default)]
    pub sudt: Option<SudtConfig>,
}

impl ScriptsConfig {
    /// Resolves the lock family of a lock script, `None` for every unconfigured family.
    pub fn lock_type_of(&self, lock: &packed::Script) -> Option<LockType> {
        [
            LockType::Secp256k1Blake160,
            LockType::Secp256k1Blake160Multisig,
            LockType::AnyoneCanPay,
        ]
        .into_iter()
        .find(|lock_type| {
            self.lock_script_config(*lock_type)
                .map_or(false, |config| config.matches(lock))
        })
    }

    /// The configured script of a lock family, `None` when the optional family is absent.
    pub fn lock_script_config(&self, lock_type: LockType) -> Option<&ScriptConfig> {
        match lock_type {
            LockType::Secp256k1Blake160 => Some(&self.secp256k1_blake160),
            LockType::Secp256k1Blake160Multisig => Some(&self.secp256k1_blake160_multisig),
            LockType::AnyoneCanPay => self.anyone_can_pay.as_ref(),
        }
    }
}
