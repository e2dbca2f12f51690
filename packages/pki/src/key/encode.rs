use pkcs8::EncodePrivateKey;
use rsa::pkcs1::EncodeRsaPrivateKey;
use zeroize::Zeroizing;

use super::{EcPrivateKey, PrivateKey};
use crate::error::{PkiError, Result};
use crate::pem_codec::{
    self, EC_PRIVATE_KEY_LABEL, ED25519_PRIVATE_KEY_LABEL, RSA_PRIVATE_KEY_LABEL,
};

/// Encode a private key as a single PEM block
///
/// EC keys are written as SEC1 under `EC PRIVATE KEY`, RSA keys as PKCS#1
/// under `RSA PRIVATE KEY` and Ed25519 keys as PKCS#8 under
/// `ED25519 PRIVATE KEY`.
///
/// # Errors
///
/// Returns [`PkiError::KeyEncoding`] if the key cannot be serialized to DER.
pub fn encode_private_key(key: &PrivateKey) -> Result<Vec<u8>> {
    let der = private_key_der(key)?;
    Ok(pem_codec::encode(pem_label(key), &der))
}

/// PEM label for the container [`private_key_der`] produces
fn pem_label(key: &PrivateKey) -> &'static str {
    match key {
        PrivateKey::Rsa(_) => RSA_PRIVATE_KEY_LABEL,
        PrivateKey::Ec(_) => EC_PRIVATE_KEY_LABEL,
        PrivateKey::Ed25519(_) => ED25519_PRIVATE_KEY_LABEL,
    }
}

/// Algorithm-specific DER encoding of a private key
pub(super) fn private_key_der(key: &PrivateKey) -> Result<Zeroizing<Vec<u8>>> {
    let encoding_failed = |e: &dyn std::fmt::Display| {
        PkiError::KeyEncoding(format!("{} private key: {e}", key.algorithm()))
    };

    match key {
        PrivateKey::Rsa(rsa_key) => rsa_key
            .to_pkcs1_der()
            .map(|doc| Zeroizing::new(doc.as_bytes().to_vec()))
            .map_err(|e| encoding_failed(&e)),
        PrivateKey::Ec(EcPrivateKey::P256(ec_key)) => {
            ec_key.to_sec1_der().map_err(|e| encoding_failed(&e))
        }
        PrivateKey::Ec(EcPrivateKey::P384(ec_key)) => {
            ec_key.to_sec1_der().map_err(|e| encoding_failed(&e))
        }
        PrivateKey::Ec(EcPrivateKey::P521(ec_key)) => {
            ec_key.to_sec1_der().map_err(|e| encoding_failed(&e))
        }
        PrivateKey::Ed25519(signing_key) => signing_key
            .to_pkcs8_der()
            .map(|doc| Zeroizing::new(doc.as_bytes().to_vec()))
            .map_err(|e| encoding_failed(&e)),
    }
}
