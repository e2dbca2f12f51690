//! Single-block PEM codec
//!
//! Wraps the `pem` crate with the strict rules used for certificate and key
//! files: an input must hold exactly one PEM block followed by nothing but
//! whitespace, and callers can require a specific block label. Text before
//! the first BEGIN line is ignored.

use pem::{EncodeConfig, LineEnding, Pem};

use crate::error::{PkiError, Result};

/// Label of an X.509 certificate block
pub const CERTIFICATE_LABEL: &str = "CERTIFICATE";
/// Label of an algorithm-agnostic PKCS#8 private key block
pub const PRIVATE_KEY_LABEL: &str = "PRIVATE KEY";
/// Label of a PKCS#1 RSA private key block
pub const RSA_PRIVATE_KEY_LABEL: &str = "RSA PRIVATE KEY";
/// Label of a SEC1 elliptic-curve private key block
pub const EC_PRIVATE_KEY_LABEL: &str = "EC PRIVATE KEY";
/// Label of a PKCS#8 Ed25519 private key block
pub const ED25519_PRIVATE_KEY_LABEL: &str = "ED25519 PRIVATE KEY";

const BEGIN_MARKER: &[u8] = b"-----BEGIN ";
const END_MARKER: &[u8] = b"-----END ";
const DASHES: &[u8] = b"-----";

/// A decoded PEM block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PemBlock {
    /// Block label, e.g. `CERTIFICATE`
    pub label: String,
    /// Raw binary payload
    pub contents: Vec<u8>,
}

impl From<Pem> for PemBlock {
    fn from(pem: Pem) -> Self {
        Self {
            label: pem.tag().to_string(),
            contents: pem.into_contents(),
        }
    }
}

/// Encode `payload` as a single PEM block labelled `label`
#[must_use]
pub fn encode(label: &str, payload: &[u8]) -> Vec<u8> {
    let block = Pem::new(label, payload);
    pem::encode_config(&block, EncodeConfig::new().set_line_ending(LineEnding::LF)).into_bytes()
}

/// Decode exactly one PEM block of any label
///
/// # Errors
///
/// Returns [`PkiError::NoPemBlock`] when the input holds no block,
/// [`PkiError::TrailingData`] when anything other than whitespace follows the
/// first block and [`PkiError::MalformedPem`] when the first block's armor is
/// broken. Trailing content is reported before the first block is decoded, so
/// a broken second block is still `TrailingData`.
pub fn decode_block(data: &[u8]) -> Result<PemBlock> {
    let Some(begin) = find(data, BEGIN_MARKER) else {
        return Err(PkiError::NoPemBlock);
    };
    let block = &data[begin..];
    let end = first_block_len(block).unwrap_or(block.len());
    if block[end..].iter().any(|b| !b.is_ascii_whitespace()) {
        return Err(PkiError::TrailingData);
    }
    Ok(pem::parse(&block[..end])?.into())
}

/// Decode exactly one PEM block and require its label to be `required_label`
///
/// # Errors
///
/// Everything [`decode_block`] returns, plus
/// [`PkiError::UnexpectedBlockType`] on a label mismatch.
pub fn decode_single(data: &[u8], required_label: &'static str) -> Result<PemBlock> {
    let block = decode_block(data)?;
    if block.label != required_label {
        return Err(PkiError::UnexpectedBlockType {
            expected: required_label,
            found: block.label,
        });
    }
    Ok(block)
}

/// Length of a block starting at its BEGIN line, up to the dashes closing its END line
fn first_block_len(block: &[u8]) -> Option<usize> {
    let end = find(block, END_MARKER)?;
    let after_label = end + END_MARKER.len();
    let close = find(&block[after_label..], DASHES)?;
    Some(after_label + close + DASHES.len())
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}
