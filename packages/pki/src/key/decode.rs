use const_oid::db::rfc5912::{
    ID_EC_PUBLIC_KEY, RSA_ENCRYPTION, SECP_256_R_1, SECP_384_R_1, SECP_521_R_1,
};
use const_oid::db::rfc8410::ID_ED_25519;
use pkcs8::PrivateKeyInfo;
use rsa::RsaPrivateKey;
use rsa::pkcs1::DecodeRsaPrivateKey;
use zeroize::Zeroizing;

use super::{EcPrivateKey, PrivateKey};
use crate::certificate::key_extraction::{algorithm_name, curve_name};
use crate::error::{PkiError, Result};
use crate::pem_codec::{self, PRIVATE_KEY_LABEL};

const PRIVATE_KEY_SUFFIX: &str = " PRIVATE KEY";

/// Decode a PEM-wrapped private key of unknown container and algorithm
///
/// The input must hold exactly one PEM block labelled `PRIVATE KEY` or
/// `<anything> PRIVATE KEY`. The label is not trusted to identify the
/// container; see [`decode_private_key_der`] for how the payload is decoded.
///
/// # Errors
///
/// Propagates PEM codec errors, returns [`PkiError::UnknownKeyHeader`] for a
/// label that does not name a private key, and whatever
/// [`decode_private_key_der`] returns for the payload.
pub fn decode_private_key(pem_data: &[u8]) -> Result<PrivateKey> {
    let block = pem_codec::decode_block(pem_data)?;
    if block.label != PRIVATE_KEY_LABEL && !block.label.ends_with(PRIVATE_KEY_SUFFIX) {
        return Err(PkiError::UnknownKeyHeader(block.label));
    }

    let der = Zeroizing::new(block.contents);
    decode_private_key_der(&der)
}

/// Decode a DER private key by trying the known containers in a fixed order
///
/// 1. PKCS#1 `RSAPrivateKey`
/// 2. PKCS#8 `PrivateKeyInfo` holding an RSA, P-256, P-384, P-521 or Ed25519 key
/// 3. SEC1 `ECPrivateKey` on P-256, P-384 or P-521
///
/// The first structurally valid parse wins.
///
/// # Errors
///
/// Returns [`PkiError::UnsupportedPkcs8KeyType`] when a valid PKCS#8
/// container holds another algorithm, and
/// [`PkiError::UnknownPrivateKeyFormat`] with the SEC1 failure when nothing
/// matches.
pub fn decode_private_key_der(der: &[u8]) -> Result<PrivateKey> {
    if let Some(key) = decode_pkcs1(der) {
        return Ok(key);
    }

    if let Some(key) = decode_pkcs8(der)? {
        return Ok(key);
    }

    decode_sec1(der).map_err(PkiError::UnknownPrivateKeyFormat)
}

pub(super) fn decode_pkcs1(der: &[u8]) -> Option<PrivateKey> {
    match RsaPrivateKey::from_pkcs1_der(der) {
        Ok(key) => Some(PrivateKey::Rsa(key)),
        Err(e) => {
            tracing::debug!("Not a PKCS#1 RSA private key: {e}");
            None
        }
    }
}

/// `Ok(None)` when `der` is not a usable PKCS#8 container
pub(super) fn decode_pkcs8(der: &[u8]) -> Result<Option<PrivateKey>> {
    let info = match PrivateKeyInfo::try_from(der) {
        Ok(info) => info,
        Err(e) => {
            tracing::debug!("Not a PKCS#8 private key: {e}");
            return Ok(None);
        }
    };

    let oid = info.algorithm.oid;
    let decoded = match oid {
        RSA_ENCRYPTION => RsaPrivateKey::try_from(info)
            .map(PrivateKey::Rsa)
            .map_err(|e| e.to_string()),
        ID_ED_25519 => ed25519_dalek::SigningKey::try_from(info)
            .map(PrivateKey::Ed25519)
            .map_err(|e| e.to_string()),
        ID_EC_PUBLIC_KEY => {
            let curve = info
                .algorithm
                .parameters_oid()
                .map_err(|e| PkiError::UnsupportedPkcs8KeyType(format!("ECDSA ({e})")))?;
            match curve {
                SECP_256_R_1 => p256::SecretKey::try_from(info)
                    .map(|key| PrivateKey::Ec(EcPrivateKey::P256(key)))
                    .map_err(|e| e.to_string()),
                SECP_384_R_1 => p384::SecretKey::try_from(info)
                    .map(|key| PrivateKey::Ec(EcPrivateKey::P384(key)))
                    .map_err(|e| e.to_string()),
                SECP_521_R_1 => p521::SecretKey::try_from(info)
                    .map(|key| PrivateKey::Ec(EcPrivateKey::P521(key)))
                    .map_err(|e| e.to_string()),
                _ => {
                    return Err(PkiError::UnsupportedPkcs8KeyType(format!(
                        "ECDSA {}",
                        curve_name(&curve)
                    )));
                }
            }
        }
        _ => {
            return Err(PkiError::UnsupportedPkcs8KeyType(format!(
                "{} ({oid})",
                algorithm_name(&oid)
            )));
        }
    };

    match decoded {
        Ok(key) => Ok(Some(key)),
        Err(e) => {
            tracing::debug!("PKCS#8 {} key payload rejected: {e}", algorithm_name(&oid));
            Ok(None)
        }
    }
}

/// SEC1 `ECPrivateKey`; the error carries the reason for diagnostics
pub(super) fn decode_sec1(der: &[u8]) -> std::result::Result<PrivateKey, String> {
    if let Ok(key) = p256::SecretKey::from_sec1_der(der) {
        return Ok(PrivateKey::Ec(EcPrivateKey::P256(key)));
    }

    if let Ok(key) = p384::SecretKey::from_sec1_der(der) {
        return Ok(PrivateKey::Ec(EcPrivateKey::P384(key)));
    }

    p521::SecretKey::from_sec1_der(der)
        .map(|key| PrivateKey::Ec(EcPrivateKey::P521(key)))
        .map_err(|e| format!("not a PKCS#1, PKCS#8 or SEC1 P-256/P-384/P-521 key ({e})"))
}
