use super::*;
use pretty_assertions::assert_eq;

const ARGS: [u8; 20] = [
    0xb3, 0x9b, 0xbc, 0x0b, 0x36, 0x73, 0xc7, 0xd3, 0x64, 0x50, 0xbc, 0x14, 0xcf, 0xcd, 0xad, 0x2d,
    0x55, 0x9c, 0x6c, 0x64,
];

fn secp_script(args: &[u8]) -> packed::Script {
    build_script(
        SECP256K1_BLAKE160_SIGHASH_ALL_TYPE_HASH.as_bytes(),
        ScriptHashType::Type.into(),
        args,
    )
}

fn encode<Ck: bech32::Checksum>(hrp: &str, payload: &[u8]) -> String {
    bech32::encode::<Ck>(Hrp::parse(hrp).unwrap(), payload).unwrap()
}

#[test]
fn test_parse_short_format() {
    let address = Address::parse("ckb1qyqt8xaupvm8837nv3gtc9x0ekkj64vud3jqfwyw5v").unwrap();
    assert_eq!(address.network(), NetworkType::Mainnet);
    assert_eq!(address.script(), &secp_script(&ARGS));
}

#[test]
fn test_full_format() {
    let full = "ckb1qzda0cr08m85hc8jlnfp3zer7xulejywt49kt2rr0vthywaa50xwsqdnnw7qkdnnclfkg59uzn8umtfd2kwxceqxwquc4";
    let address = Address::parse(full).unwrap();
    assert_eq!(address.script(), &secp_script(&ARGS));
    assert_eq!(address.encode().unwrap(), full);
}

#[test]
fn test_short_and_full_format_are_the_same_lock() {
    let short = Address::parse("ckb1qyqt8xaupvm8837nv3gtc9x0ekkj64vud3jqfwyw5v").unwrap();
    let full = Address::parse(&short.encode().unwrap()).unwrap();
    assert_eq!(short, full);
    assert_eq!(
        short.script().calc_script_hash(),
        full.script().calc_script_hash()
    );
}

#[test]
fn test_generate_testnet() {
    let address = Address::new(NetworkType::Testnet, secp_script(&[7u8; 20]));
    let encoded = address.encode().unwrap();
    assert!(encoded.starts_with("ckt1q"));
    assert_eq!(Address::parse(&encoded).unwrap(), address);
}

#[test]
fn test_encode_args_past_code_length() {
    // A bech32m string holds at most 1023 characters.
    let address = Address::new(NetworkType::Mainnet, secp_script(&[1u8; 1000]));
    assert!(matches!(address.encode(), Err(AddressError::Encoding(_))));
}

#[test]
fn test_parse_full_data_and_type_formats() {
    let mut payload = vec![FORMAT_FULL_DATA];
    payload.extend_from_slice(&[1u8; 32]);
    payload.extend_from_slice(&ARGS);
    let address = Address::parse(&encode::<Bech32>("ckt", &payload)).unwrap();
    assert_eq!(address.network(), NetworkType::Testnet);
    assert_eq!(address.script().hash_type().as_slice(), &[0]);
    assert_eq!(address.script().args().raw_data().as_ref(), &ARGS[..]);

    payload[0] = FORMAT_FULL_TYPE;
    let address = Address::parse(&encode::<Bech32>("ckt", &payload)).unwrap();
    assert_eq!(address.script().hash_type().as_slice(), &[1]);
}

#[test]
fn test_checksum_variant_must_match_format() {
    let address = Address::new(NetworkType::Mainnet, secp_script(&ARGS));
    let encoded = encode::<Bech32>("ckb", &address.full_payload());
    assert_eq!(
        Address::parse(&encoded),
        Err(AddressError::ChecksumVariant {
            format: FORMAT_FULL,
            expected: "bech32m"
        })
    );

    let mut payload = vec![FORMAT_SHORT, 0x00];
    payload.extend_from_slice(&ARGS);
    let encoded = encode::<Bech32m>("ckb", &payload);
    assert_eq!(
        Address::parse(&encoded),
        Err(AddressError::ChecksumVariant {
            format: FORMAT_SHORT,
            expected: "bech32"
        })
    );
}

#[test]
fn test_invalid_addresses() {
    assert!(matches!(
        Address::parse("ckb1qyqt8xaupvm8837nv3gtc9x0ekkj64vud3jqfwyw5w"),
        Err(AddressError::Encoding(_))
    ));
    assert!(matches!(
        Address::parse("not an address"),
        Err(AddressError::Encoding(_))
    ));

    let mut payload = vec![FORMAT_SHORT, 0x00];
    payload.extend_from_slice(&ARGS);
    assert_eq!(
        Address::parse(&encode::<Bech32>("bc", &payload)),
        Err(AddressError::UnknownPrefix("bc".to_owned()))
    );

    let mut payload = vec![FORMAT_SHORT, 0x03];
    payload.extend_from_slice(&ARGS);
    assert_eq!(
        Address::parse(&encode::<Bech32>("ckb", &payload)),
        Err(AddressError::UnknownCodeHashIndex(0x03))
    );

    let payload = vec![FORMAT_SHORT, 0x00, 1, 2, 3];
    assert_eq!(
        Address::parse(&encode::<Bech32>("ckb", &payload)),
        Err(AddressError::InvalidArgs { index: 0, len: 3 })
    );

    let mut payload = vec![FORMAT_FULL];
    payload.extend_from_slice(&[1u8; 32]);
    payload.push(3);
    assert_eq!(
        Address::parse(&encode::<Bech32m>("ckb", &payload)),
        Err(AddressError::InvalidHashType(3))
    );

    assert_eq!(
        Address::parse(&encode::<Bech32>("ckb", &[0x03, 0x00])),
        Err(AddressError::UnknownFormat(0x03))
    );
}

#[test]
fn test_anyone_can_pay_short_format_depends_on_network() {
    let mut payload = vec![FORMAT_SHORT, 0x02];
    payload.extend_from_slice(&ARGS);
    payload.push(9);
    let mainnet = Address::parse(&encode::<Bech32>("ckb", &payload)).unwrap();
    let testnet = Address::parse(&encode::<Bech32>("ckt", &payload)).unwrap();
    assert_eq!(
        mainnet.script().code_hash(),
        ANYONE_CAN_PAY_MAINNET_TYPE_HASH.pack()
    );
    assert_eq!(
        testnet.script().code_hash(),
        ANYONE_CAN_PAY_TESTNET_TYPE_HASH.pack()
    );
    assert_eq!(mainnet.script().args().raw_data().len(), 21);
}
