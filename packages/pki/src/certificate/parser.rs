//! Core certificate parsing operations
//!
//! Coordinates PEM unwrapping, DER decoding and the extraction helpers, and
//! returns structured certificate data.

use std::collections::HashMap;
use std::time::SystemTime;

use der::{Decode, Encode};
use x509_cert::Certificate as X509Certificate;

use super::details_extraction::extract_certificate_details;
use super::key_extraction::extract_key_info;
use super::name_extraction::extract_name_attributes;
use crate::error::{PkiError, Result};
use crate::pem_codec::{self, CERTIFICATE_LABEL};

/// A decoded X.509 certificate together with its DER encoding
#[derive(Debug, Clone)]
pub struct ParsedCertificate {
    /// Subject DN attributes keyed by short name (`CN`, `O`, ...)
    pub subject: HashMap<String, String>,
    /// Issuer DN attributes keyed by short name
    pub issuer: HashMap<String, String>,
    /// DNS names from the subject alternative name extension
    pub san_dns_names: Vec<String>,
    /// `BasicConstraints` CA flag
    pub is_ca: bool,
    /// Start of the validity window
    pub not_before: SystemTime,
    /// End of the validity window
    pub not_after: SystemTime,
    /// Serial number bytes, big-endian
    pub serial_number: Vec<u8>,
    /// Public key algorithm name, e.g. `RSA` or `ECDSA`
    pub key_algorithm: String,
    /// Public key size in bits when it can be determined
    pub key_size: Option<u32>,
    /// DER-encoded SubjectPublicKeyInfo
    pub public_key_der: Vec<u8>,
    der: Vec<u8>,
    x509: X509Certificate,
}

impl ParsedCertificate {
    /// Parse a certificate from its DER encoding
    ///
    /// # Errors
    ///
    /// Returns [`PkiError::MalformedCertificate`] if `der` is not a valid
    /// X.509 certificate.
    pub fn from_der(der: &[u8]) -> Result<Self> {
        let x509 = X509Certificate::from_der(der)
            .map_err(|e| PkiError::MalformedCertificate(format!("X.509 parsing failed: {e}")))?;

        let tbs = &x509.tbs_certificate;
        let public_key_der = tbs.subject_public_key_info.to_der().map_err(|e| {
            PkiError::MalformedCertificate(format!("Failed to encode public key: {e}"))
        })?;
        let (key_algorithm, key_size) = extract_key_info(&tbs.subject_public_key_info);
        let details = extract_certificate_details(&x509);

        Ok(Self {
            subject: extract_name_attributes(&tbs.subject),
            issuer: extract_name_attributes(&tbs.issuer),
            san_dns_names: details.san_dns_names,
            is_ca: details.is_ca,
            not_before: details.not_before,
            not_after: details.not_after,
            serial_number: tbs.serial_number.as_bytes().to_vec(),
            key_algorithm,
            key_size,
            public_key_der,
            der: der.to_vec(),
            x509,
        })
    }

    /// Subject common name, if present
    #[must_use]
    pub fn common_name(&self) -> Option<&str> {
        self.subject.get("CN").map(String::as_str)
    }

    /// DER encoding of the certificate
    #[must_use]
    pub fn der(&self) -> &[u8] {
        &self.der
    }

    /// The underlying x509-cert structure
    #[must_use]
    pub fn x509(&self) -> &X509Certificate {
        &self.x509
    }

    /// Re-encode the certificate as a single `CERTIFICATE` PEM block
    #[must_use]
    pub fn to_pem(&self) -> Vec<u8> {
        encode_certificate(&self.der)
    }
}

/// Decode a single PEM `CERTIFICATE` block into a [`ParsedCertificate`]
///
/// # Errors
///
/// Propagates PEM codec errors and returns
/// [`PkiError::MalformedCertificate`] if the payload is not valid X.509 DER.
pub fn decode_certificate(pem_data: &[u8]) -> Result<ParsedCertificate> {
    let block = pem_codec::decode_single(pem_data, CERTIFICATE_LABEL)?;
    ParsedCertificate::from_der(&block.contents)
}

/// Wrap certificate DER in a `CERTIFICATE` PEM block
#[must_use]
pub fn encode_certificate(der: &[u8]) -> Vec<u8> {
    pem_codec::encode(CERTIFICATE_LABEL, der)
}
