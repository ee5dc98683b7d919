use ckb_crypto::secp::Pubkey;
use ckb_rosetta_address::{blake160, Address, NetworkType};
use ckb_rosetta_app_config::ScriptsConfig;
use ckb_rosetta_error::{Error, ErrorKind};
use ckb_rosetta_types::{AccountIdentifier, AccountMetadata, CurveType, LockType, PublicKey};
use ckb_types::bytes::Bytes;

/// The single signature account of a secp256k1 public key.
///
/// The lock args are the blake160 of the compressed key, whatever form the key is given in.
pub fn derive_account(
    public_key: &PublicKey,
    network: NetworkType,
    scripts: &ScriptsConfig,
) -> Result<AccountIdentifier, Error> {
    if public_key.curve_type != CurveType::Secp256k1 {
        return Err(ErrorKind::UnsupportedCurveType.reason(format!("{:?}", public_key.curve_type)));
    }
    let raw = hex::decode(public_key.hex_bytes.trim_start_matches("0x"))
        .map_err(|err| ErrorKind::InvalidPublicKey.reason(err))?;
    let pubkey = Pubkey::from_slice(&raw).map_err(|err| ErrorKind::InvalidPublicKey.reason(err))?;

    let args = blake160(&pubkey.serialize());
    let lock = scripts
        .secp256k1_blake160
        .build_script(Bytes::copy_from_slice(&args));
    let address = Address::new(network, lock)
        .encode()
        .map_err(|err| ErrorKind::AddressGenerationError.reason(err))?;
    let mut account = AccountIdentifier::new(address);
    account.metadata = Some(AccountMetadata::new(LockType::Secp256k1Blake160).to_value()?);
    Ok(account)
}
