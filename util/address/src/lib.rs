//! CKB address encoding, as specified by RFC 0021.
//!
//! Four payload formats are understood when parsing:
//!
//! | format | layout | checksum |
//! |---|---|---|
//! | `0x00` full | code_hash, hash_type, args | bech32m |
//! | `0x01` short (deprecated) | code_hash_index, args | bech32 |
//! | `0x02` full data (deprecated) | code_hash, args | bech32 |
//! | `0x04` full type (deprecated) | code_hash, args | bech32 |
//!
//! Addresses are always generated in the full format.
use bech32::{primitives::decode::CheckedHrpstring, Bech32, Bech32m, Hrp};
use ckb_hash::blake2b_256;
use ckb_types::{bytes::Bytes, core::ScriptHashType, h256, packed, prelude::*, H256};
use std::fmt;

#[cfg(test)]
mod tests;

const PREFIX_MAINNET: Hrp = Hrp::parse_unchecked("ckb");
const PREFIX_TESTNET: Hrp = Hrp::parse_unchecked("ckt");

const FORMAT_FULL: u8 = 0x00;
const FORMAT_SHORT: u8 = 0x01;
const FORMAT_FULL_DATA: u8 = 0x02;
const FORMAT_FULL_TYPE: u8 = 0x04;

/// Code hash of the single signature lock, short format index `0x00`.
pub const SECP256K1_BLAKE160_SIGHASH_ALL_TYPE_HASH: H256 =
    h256!("0x9bd7e06f3ecf4be0f2fcd2188b23f1b9fcc88e5d4b65a8637b17723bbda3cce8");
/// Code hash of the legacy multisig lock, short format index `0x01`.
pub const SECP256K1_BLAKE160_MULTISIG_ALL_TYPE_HASH: H256 =
    h256!("0x5c5069eb0857efc65e1bca0c07df34c31663b3622fd3876c876320fc9634e2a8");
/// Code hash of the anyone-can-pay lock on mainnet, short format index `0x02`.
pub const ANYONE_CAN_PAY_MAINNET_TYPE_HASH: H256 =
    h256!("0xd369597ff47f29fbc0d47d2e3775370d1250b85140c670e4718af712983a2354");
/// Code hash of the anyone-can-pay lock on testnet, short format index `0x02`.
pub const ANYONE_CAN_PAY_TESTNET_TYPE_HASH: H256 =
    h256!("0x3419a1c09eb2567f6552ee7a8ecffd64155cffe0f1796e6e61ec088d740c1356");

/// Errors of address parsing.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AddressError {
    #[error("invalid bech32 string: {0}")]
    Encoding(String),
    #[error("unknown address prefix {0}")]
    UnknownPrefix(String),
    #[error("empty address payload")]
    EmptyPayload,
    #[error("unknown address format {0:#04x}")]
    UnknownFormat(u8),
    #[error("address format {format:#04x} must be encoded with {expected}")]
    ChecksumVariant { format: u8, expected: &'static str },
    #[error("invalid payload length {len} for address format {format:#04x}")]
    InvalidLength { format: u8, len: usize },
    #[error("unknown code hash index {0:#04x}")]
    UnknownCodeHashIndex(u8),
    #[error("invalid args length {len} for code hash index {index:#04x}")]
    InvalidArgs { index: u8, len: usize },
    #[error("invalid script hash type {0:#04x}")]
    InvalidHashType(u8),
}

/// The network an address belongs to, told apart by the human readable part.
#[derive(Hash, Eq, PartialEq, Debug, Clone, Copy)]
pub enum NetworkType {
    Mainnet,
    Testnet,
}

impl NetworkType {
    pub fn from_prefix(value: &str) -> Option<NetworkType> {
        if value.eq_ignore_ascii_case(PREFIX_MAINNET.as_str()) {
            Some(NetworkType::Mainnet)
        } else if value.eq_ignore_ascii_case(PREFIX_TESTNET.as_str()) {
            Some(NetworkType::Testnet)
        } else {
            None
        }
    }

    pub fn to_prefix(self) -> &'static str {
        match self {
            NetworkType::Mainnet => PREFIX_MAINNET.as_str(),
            NetworkType::Testnet => PREFIX_TESTNET.as_str(),
        }
    }

    fn hrp(self) -> Hrp {
        match self {
            NetworkType::Mainnet => PREFIX_MAINNET,
            NetworkType::Testnet => PREFIX_TESTNET,
        }
    }

    fn short_code_hash(self, index: u8) -> Option<(H256, std::ops::RangeInclusive<usize>)> {
        match (index, self) {
            (0x00, _) => Some((SECP256K1_BLAKE160_SIGHASH_ALL_TYPE_HASH, 20..=20)),
            (0x01, _) => Some((SECP256K1_BLAKE160_MULTISIG_ALL_TYPE_HASH, 20..=20)),
            (0x02, NetworkType::Mainnet) => Some((ANYONE_CAN_PAY_MAINNET_TYPE_HASH, 20..=22)),
            (0x02, NetworkType::Testnet) => Some((ANYONE_CAN_PAY_TESTNET_TYPE_HASH, 20..=22)),
            _ => None,
        }
    }
}

impl fmt::Display for NetworkType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_prefix())
    }
}

/// A lock script together with the network it is addressed on.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Address {
    network: NetworkType,
    script: packed::Script,
}

impl Address {
    pub fn new(network: NetworkType, script: packed::Script) -> Address {
        Address { network, script }
    }

    pub fn network(&self) -> NetworkType {
        self.network
    }

    /// The lock script this address stands for.
    pub fn script(&self) -> &packed::Script {
        &self.script
    }

    pub fn into_script(self) -> packed::Script {
        self.script
    }

    /// Decodes an address in any of the supported payload formats.
    pub fn parse(input: &str) -> Result<Address, AddressError> {
        let (checked, is_bech32m) = match CheckedHrpstring::new::<Bech32m>(input) {
            Ok(checked) => (checked, true),
            Err(_) => CheckedHrpstring::new::<Bech32>(input)
                .map(|checked| (checked, false))
                .map_err(|err| AddressError::Encoding(err.to_string()))?,
        };
        let prefix = checked.hrp().to_lowercase();
        let network =
            NetworkType::from_prefix(&prefix).ok_or(AddressError::UnknownPrefix(prefix))?;
        let payload: Vec<u8> = checked.byte_iter().collect();
        let (&format, body) = payload.split_first().ok_or(AddressError::EmptyPayload)?;

        let expected_bech32m = format == FORMAT_FULL;
        if expected_bech32m != is_bech32m {
            let expected = if expected_bech32m { "bech32m" } else { "bech32" };
            return Err(AddressError::ChecksumVariant { format, expected });
        }

        let script = match format {
            FORMAT_FULL => {
                if body.len() < 33 {
                    return Err(AddressError::InvalidLength {
                        format,
                        len: payload.len(),
                    });
                }
                let hash_type = body[32];
                if !matches!(hash_type, 0 | 1 | 2 | 4) {
                    return Err(AddressError::InvalidHashType(hash_type));
                }
                build_script(&body[..32], hash_type, &body[33..])
            }
            FORMAT_SHORT => {
                let (&index, args) = body.split_first().ok_or(AddressError::InvalidLength {
                    format,
                    len: payload.len(),
                })?;
                let (code_hash, args_len) = network
                    .short_code_hash(index)
                    .ok_or(AddressError::UnknownCodeHashIndex(index))?;
                if !args_len.contains(&args.len()) {
                    return Err(AddressError::InvalidArgs {
                        index,
                        len: args.len(),
                    });
                }
                build_script(
                    code_hash.as_bytes(),
                    ScriptHashType::Type.into(),
                    args,
                )
            }
            FORMAT_FULL_DATA | FORMAT_FULL_TYPE => {
                if body.len() < 32 {
                    return Err(AddressError::InvalidLength {
                        format,
                        len: payload.len(),
                    });
                }
                let hash_type = if format == FORMAT_FULL_DATA {
                    ScriptHashType::Data
                } else {
                    ScriptHashType::Type
                };
                build_script(&body[..32], hash_type.into(), &body[32..])
            }
            _ => return Err(AddressError::UnknownFormat(format)),
        };
        Ok(Address { network, script })
    }

    /// Encodes in the full format.
    pub fn encode(&self) -> Result<String, AddressError> {
        bech32::encode::<Bech32m>(self.network.hrp(), &self.full_payload())
            .map_err(|err| AddressError::Encoding(err.to_string()))
    }

    fn full_payload(&self) -> Vec<u8> {
        let args = self.script.args().raw_data();
        let mut payload = Vec::with_capacity(1 + 32 + 1 + args.len());
        payload.push(FORMAT_FULL);
        payload.extend_from_slice(self.script.code_hash().as_slice());
        payload.extend_from_slice(self.script.hash_type().as_slice());
        payload.extend_from_slice(&args);
        payload
    }
}

fn build_script(code_hash: &[u8], hash_type: u8, args: &[u8]) -> packed::Script {
    let mut hash = [0u8; 32];
    hash.copy_from_slice(code_hash);
    packed::Script::new_builder()
        .code_hash(packed::Byte32::new(hash))
        .hash_type(packed::Byte::new(hash_type))
        .args(Bytes::copy_from_slice(args).pack())
        .build()
}

/// The first 20 bytes of the CKB blake2b-256 digest, the args of a single signature lock.
pub fn blake160(data: &[u8]) -> [u8; 20] {
    let mut hash = [0u8; 20];
    hash.copy_from_slice(&blake2b_256(data)[..20]);
    hash
}
