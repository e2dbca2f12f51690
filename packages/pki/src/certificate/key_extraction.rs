//! Public key information extraction
//!
//! Maps SubjectPublicKeyInfo algorithm identifiers to readable names and
//! derives key sizes from the key data or curve parameters.

use const_oid::ObjectIdentifier;
use const_oid::db::rfc5912::{
    ID_DSA, ID_EC_PUBLIC_KEY, RSA_ENCRYPTION, SECP_224_R_1, SECP_256_R_1, SECP_384_R_1,
    SECP_521_R_1,
};
use const_oid::db::rfc8410::{ID_ED_448, ID_ED_25519, ID_X_448, ID_X_25519};
use der::{AnyRef, Decode};
use spki::SubjectPublicKeyInfoOwned;

/// Readable name for a public key algorithm OID
#[must_use]
pub fn algorithm_name(oid: &ObjectIdentifier) -> &'static str {
    match *oid {
        RSA_ENCRYPTION => "RSA",
        ID_DSA => "DSA",
        ID_EC_PUBLIC_KEY => "ECDSA",
        ID_X_25519 => "X25519",
        ID_X_448 => "X448",
        ID_ED_25519 => "Ed25519",
        ID_ED_448 => "Ed448",
        _ => "Unknown",
    }
}

/// Readable name for a named elliptic curve OID
#[must_use]
pub fn curve_name(oid: &ObjectIdentifier) -> &'static str {
    match *oid {
        SECP_224_R_1 => "P-224",
        SECP_256_R_1 => "P-256",
        SECP_384_R_1 => "P-384",
        SECP_521_R_1 => "P-521",
        _ => "unknown curve",
    }
}

/// Extract key algorithm name and size in bits from a SubjectPublicKeyInfo
#[must_use]
pub fn extract_key_info(spki: &SubjectPublicKeyInfoOwned) -> (String, Option<u32>) {
    let oid = &spki.algorithm.oid;
    let name = algorithm_name(oid).to_string();

    let size = match *oid {
        RSA_ENCRYPTION => spki.subject_public_key.as_bytes().and_then(rsa_modulus_bits),
        ID_EC_PUBLIC_KEY => spki
            .algorithm
            .parameters
            .as_ref()
            .and_then(|params| ObjectIdentifier::try_from(AnyRef::from(params)).ok())
            .and_then(|curve| match curve {
                SECP_224_R_1 => Some(224),
                SECP_256_R_1 => Some(256),
                SECP_384_R_1 => Some(384),
                SECP_521_R_1 => Some(521),
                _ => None,
            }),
        ID_X_25519 | ID_ED_25519 => Some(256),
        ID_X_448 | ID_ED_448 => Some(448),
        _ => None,
    };

    if size.is_none() {
        tracing::debug!("Could not determine key size for {name} ({oid})");
    }

    (name, size)
}

/// Modulus size of a PKCS#1 `RSAPublicKey`
fn rsa_modulus_bits(key_bytes: &[u8]) -> Option<u32> {
    let key = rsa::pkcs1::RsaPublicKey::from_der(key_bytes).ok()?;
    compute_bit_length(key.modulus.as_bytes())
}

/// Compute the bit length of a big-endian byte slice representing a positive integer
fn compute_bit_length(bytes: &[u8]) -> Option<u32> {
    let start = bytes.iter().position(|&b| b != 0)?;
    let effective = &bytes[start..];
    let high_bits = 8u32 - effective[0].leading_zeros();
    let rest_bits = u32::try_from((effective.len() - 1) * 8).ok()?;
    Some(high_bits + rest_bits)
}
