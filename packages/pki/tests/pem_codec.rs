//! Tests for single-block PEM encoding and decoding

use cryypt_pki::PkiError;
use cryypt_pki::pem_codec::{
    CERTIFICATE_LABEL, PRIVATE_KEY_LABEL, decode_block, decode_single, encode,
};

#[test]
fn test_encode_then_decode_single() {
    let payload = (0u8..=255).collect::<Vec<_>>();
    let encoded = encode(CERTIFICATE_LABEL, &payload);

    let block = decode_single(&encoded, CERTIFICATE_LABEL).unwrap();
    assert_eq!(block.label, CERTIFICATE_LABEL);
    assert_eq!(block.contents, payload);
}

#[test]
fn test_decode_single_rejects_input_without_block() {
    assert!(matches!(
        decode_single(b"", CERTIFICATE_LABEL),
        Err(PkiError::NoPemBlock)
    ));
    assert!(matches!(
        decode_single(b"just some text\n", CERTIFICATE_LABEL),
        Err(PkiError::NoPemBlock)
    ));
}

#[test]
fn test_decode_single_rejects_second_block() {
    let mut data = encode(CERTIFICATE_LABEL, b"first");
    data.extend(encode(CERTIFICATE_LABEL, b"second"));

    assert!(matches!(
        decode_single(&data, CERTIFICATE_LABEL),
        Err(PkiError::TrailingData)
    ));
}

#[test]
fn test_decode_single_rejects_wrong_label() {
    let data = encode(PRIVATE_KEY_LABEL, b"key bytes");

    match decode_single(&data, CERTIFICATE_LABEL) {
        Err(PkiError::UnexpectedBlockType { expected, found }) => {
            assert_eq!(expected, CERTIFICATE_LABEL);
            assert_eq!(found, PRIVATE_KEY_LABEL);
        }
        other => panic!("Expected UnexpectedBlockType error, got {other:?}"),
    }
}

#[test]
fn test_decode_block_accepts_any_label() {
    let data = encode("SOMETHING ELSE", b"payload");

    let block = decode_block(&data).unwrap();
    assert_eq!(block.label, "SOMETHING ELSE");
    assert_eq!(block.contents, b"payload");
}

#[test]
fn test_decode_block_rejects_invalid_base64() {
    let data = b"-----BEGIN CERTIFICATE-----\n@@@@\n-----END CERTIFICATE-----\n";

    assert!(matches!(decode_block(data), Err(PkiError::MalformedPem(_))));
}

#[test]
fn test_error_messages_name_the_labels() {
    let data = encode("RSA PRIVATE KEY", b"x");
    let err = decode_single(&data, CERTIFICATE_LABEL).unwrap_err();

    assert_eq!(
        err.to_string(),
        "expected PEM block type to be CERTIFICATE, but got 'RSA PRIVATE KEY'"
    );
}

#[test]
fn test_broken_second_block_is_trailing_data() {
    let mut data = encode(CERTIFICATE_LABEL, b"first");
    data.extend(b"-----BEGIN CERTIFICATE-----\n@@@@\n-----END CERTIFICATE-----\n");

    assert!(matches!(
        decode_single(&data, CERTIFICATE_LABEL),
        Err(PkiError::TrailingData)
    ));
}

#[test]
fn test_end_line_before_block_is_ignored() {
    let mut data = b"-----END CERTIFICATE-----\nleftover from a previous file\n".to_vec();
    data.extend(encode(CERTIFICATE_LABEL, b"payload"));

    let block = decode_single(&data, CERTIFICATE_LABEL).unwrap();
    assert_eq!(block.contents, b"payload");
}
