//! # Cyrup PKI Codec
//!
//! Certificate and private key handling for TLS key pairs.
//!
//! ## Features
//!
//! - **PEM Codec**: strict single-block PEM encoding and decoding
//! - **Certificates**: X.509 decoding into a structured [`ParsedCertificate`]
//! - **Private Keys**: RSA, ECDSA (P-256, P-384, P-521) and Ed25519 keys in PKCS#1,
//!   PKCS#8 or SEC1 containers
//! - **Trust**: chain verification against the system roots or a custom store
//! - **Key Pairs**: configuration values that load a certificate and its key
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use cryypt_pki::{KeyPair, is_trusted, key_matches_certificate};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let pair = KeyPair::pem_files("/etc/tls/cert.pem", "/etc/tls/key.pem");
//! let (certificate, key) = pair.load()?;
//!
//! assert!(key_matches_certificate(&certificate, &key)?);
//! println!("{} key, trusted: {}", key.algorithm(), is_trusted(&certificate));
//! # Ok(())
//! # }
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod certificate;
pub mod error;
pub mod key;
pub mod keypair;
pub mod pem_codec;
pub mod trust;

// Re-export core types
pub use certificate::{ParsedCertificate, decode_certificate, encode_certificate};
pub use error::{PkiError, Result};
pub use key::{
    EcPrivateKey, KeyAlgorithm, PrivateKey, decode_private_key, decode_private_key_der,
    encode_private_key,
};
pub use keypair::{
    FileReader, KeyPair, KeyPairFormat, ResourceReader, key_matches_certificate,
};
pub use pem_codec::PemBlock;
pub use trust::{TrustStore, is_trusted};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        KeyPair, ParsedCertificate, PkiError, PrivateKey, Result, TrustStore,
        decode_certificate, decode_private_key, encode_private_key, is_trusted,
    };
}
