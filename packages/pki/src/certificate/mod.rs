//! X.509 certificate decoding
//!
//! This module turns PEM or DER certificate data into a [`ParsedCertificate`]:
//!
//! - `parser`: PEM/DER entry points and the parsed certificate type
//! - `name_extraction`: distinguished name attribute extraction
//! - `details_extraction`: validity, `BasicConstraints` and SAN extraction
//! - `key_extraction`: public key algorithm and size extraction

pub mod details_extraction;
pub mod key_extraction;
pub mod name_extraction;
pub mod parser;

pub use parser::{ParsedCertificate, decode_certificate, encode_certificate};
