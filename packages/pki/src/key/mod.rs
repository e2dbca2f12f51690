//! Private key values and their PEM codec
//!
//! [`PrivateKey`] is a closed set of the supported algorithms. Encoding picks
//! the container and PEM label from the variant; decoding accepts any of the
//! PKCS#1, PKCS#8 and SEC1 containers under a `* PRIVATE KEY` label.

mod decode;
mod encode;

pub use decode::{decode_private_key, decode_private_key_der};
pub use encode::encode_private_key;

use std::fmt;

use pkcs8::EncodePublicKey;
use rustls_pki_types::{PrivateKeyDer, PrivatePkcs1KeyDer, PrivatePkcs8KeyDer, PrivateSec1KeyDer};

use crate::error::{PkiError, Result};

/// Elliptic-curve private key on one of the supported curves
#[derive(Debug, Clone)]
pub enum EcPrivateKey {
    /// NIST P-256
    P256(p256::SecretKey),
    /// NIST P-384
    P384(p384::SecretKey),
    /// NIST P-521
    P521(p521::SecretKey),
}

/// A private key of one of the supported algorithms
#[derive(Debug, Clone)]
pub enum PrivateKey {
    /// RSA key
    Rsa(rsa::RsaPrivateKey),
    /// Elliptic-curve key
    Ec(EcPrivateKey),
    /// Ed25519 key
    Ed25519(ed25519_dalek::SigningKey),
}

/// Algorithm of a [`PrivateKey`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAlgorithm {
    /// RSA
    Rsa,
    /// ECDSA over P-256
    EcdsaP256,
    /// ECDSA over P-384
    EcdsaP384,
    /// ECDSA over P-521
    EcdsaP521,
    /// Ed25519
    Ed25519,
}

impl fmt::Display for KeyAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Rsa => "RSA",
            Self::EcdsaP256 => "ECDSA P-256",
            Self::EcdsaP384 => "ECDSA P-384",
            Self::EcdsaP521 => "ECDSA P-521",
            Self::Ed25519 => "Ed25519",
        };
        f.write_str(name)
    }
}

impl PrivateKey {
    /// Algorithm of this key
    #[must_use]
    pub fn algorithm(&self) -> KeyAlgorithm {
        match self {
            Self::Rsa(_) => KeyAlgorithm::Rsa,
            Self::Ec(EcPrivateKey::P256(_)) => KeyAlgorithm::EcdsaP256,
            Self::Ec(EcPrivateKey::P384(_)) => KeyAlgorithm::EcdsaP384,
            Self::Ec(EcPrivateKey::P521(_)) => KeyAlgorithm::EcdsaP521,
            Self::Ed25519(_) => KeyAlgorithm::Ed25519,
        }
    }

    /// DER-encoded SubjectPublicKeyInfo of the public half
    ///
    /// # Errors
    ///
    /// Returns [`PkiError::KeyEncoding`] if the public key cannot be serialized.
    pub fn public_key_der(&self) -> Result<Vec<u8>> {
        let document = match self {
            Self::Rsa(key) => key.to_public_key().to_public_key_der(),
            Self::Ec(EcPrivateKey::P256(key)) => key.public_key().to_public_key_der(),
            Self::Ec(EcPrivateKey::P384(key)) => key.public_key().to_public_key_der(),
            Self::Ec(EcPrivateKey::P521(key)) => key.public_key().to_public_key_der(),
            Self::Ed25519(key) => key.verifying_key().to_public_key_der(),
        }
        .map_err(|e| PkiError::KeyEncoding(format!("{} public key: {e}", self.algorithm())))?;

        Ok(document.into_vec())
    }

    /// Convert into the rustls key container matching the PEM encoding
    ///
    /// # Errors
    ///
    /// Returns [`PkiError::KeyEncoding`] if the key cannot be serialized.
    pub fn to_private_key_der(&self) -> Result<PrivateKeyDer<'static>> {
        let der = encode::private_key_der(self)?.to_vec();
        Ok(match self {
            Self::Rsa(_) => PrivateKeyDer::Pkcs1(PrivatePkcs1KeyDer::from(der)),
            Self::Ec(_) => PrivateKeyDer::Sec1(PrivateSec1KeyDer::from(der)),
            Self::Ed25519(_) => PrivateKeyDer::Pkcs8(PrivatePkcs8KeyDer::from(der)),
        })
    }
}

impl TryFrom<&PrivateKeyDer<'_>> for PrivateKey {
    type Error = PkiError;

    fn try_from(der: &PrivateKeyDer<'_>) -> Result<Self> {
        match der {
            PrivateKeyDer::Pkcs1(key) => decode::decode_pkcs1(key.secret_pkcs1_der())
                .ok_or_else(|| PkiError::UnknownPrivateKeyFormat("invalid PKCS#1 key".into())),
            PrivateKeyDer::Pkcs8(key) => decode::decode_pkcs8(key.secret_pkcs8_der())?
                .ok_or_else(|| PkiError::UnknownPrivateKeyFormat("invalid PKCS#8 key".into())),
            PrivateKeyDer::Sec1(key) => decode::decode_sec1(key.secret_sec1_der())
                .map_err(PkiError::UnknownPrivateKeyFormat),
            _ => Err(PkiError::UnsupportedKeyType(
                "unrecognized PrivateKeyDer container".to_string(),
            )),
        }
    }
}
