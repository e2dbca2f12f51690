//! Certificate and private key pairs loaded from configuration

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::certificate::{ParsedCertificate, decode_certificate};
use crate::error::{PkiError, Result};
use crate::key::{PrivateKey, decode_private_key};

/// Storage format name for PEM files on disk
pub const PEM_FILE_FORMAT: &str = "pem_file";

/// How the locations of a [`KeyPair`] are interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyPairFormat {
    /// Both locations are filesystem paths to PEM files
    #[default]
    PemFile,
}

impl FromStr for KeyPairFormat {
    type Err = PkiError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "" | PEM_FILE_FORMAT => Ok(Self::PemFile),
            other => Err(PkiError::UnsupportedFormat(other.to_string())),
        }
    }
}

impl fmt::Display for KeyPairFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PemFile => f.write_str(PEM_FILE_FORMAT),
        }
    }
}

/// Source of raw certificate and key bytes
pub trait ResourceReader {
    /// Read the full contents of `location`
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error if the resource cannot be read.
    fn read(&self, location: &str) -> std::io::Result<Vec<u8>>;
}

/// Reads resources from the local filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct FileReader;

impl ResourceReader for FileReader {
    fn read(&self, location: &str) -> std::io::Result<Vec<u8>> {
        std::fs::read(location)
    }
}

/// A certificate and its private key, as named in configuration
///
/// The certificate is the public half of the pair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyPair {
    /// Location of the PEM certificate
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub certificate: String,

    /// Location of the PEM private key
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub private_key: String,

    /// Storage format; empty means `pem_file`
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub format: String,
}

impl KeyPair {
    /// Key pair stored as two PEM files
    pub fn pem_files(certificate: impl Into<String>, private_key: impl Into<String>) -> Self {
        Self {
            certificate: certificate.into(),
            private_key: private_key.into(),
            format: PEM_FILE_FORMAT.to_string(),
        }
    }

    /// The parsed storage format
    ///
    /// # Errors
    ///
    /// Returns [`PkiError::UnsupportedFormat`] for an unrecognized format.
    pub fn storage_format(&self) -> Result<KeyPairFormat> {
        self.format.parse()
    }

    /// Load the certificate and key from the filesystem
    ///
    /// # Errors
    ///
    /// See [`KeyPair::load_with`].
    pub fn load(&self) -> Result<(ParsedCertificate, PrivateKey)> {
        self.load_with(&FileReader)
    }

    /// Load the certificate and key through `reader`
    ///
    /// The certificate is read before the key; a failed certificate read
    /// means the key location is never touched. Nothing is returned unless
    /// both halves decode.
    ///
    /// # Errors
    ///
    /// Returns [`PkiError::UnsupportedFormat`] before any read for an
    /// unrecognized format, [`PkiError::ResourceRead`] if a read fails, and
    /// propagates certificate and key decoding errors unchanged.
    pub fn load_with<R: ResourceReader + ?Sized>(
        &self,
        reader: &R,
    ) -> Result<(ParsedCertificate, PrivateKey)> {
        match self.storage_format()? {
            KeyPairFormat::PemFile => {
                tracing::debug!(
                    "Loading key pair from {} and {}",
                    self.certificate,
                    self.private_key
                );
                let cert_data = reader
                    .read(&self.certificate)
                    .map_err(|e| PkiError::resource_read(&self.certificate, e))?;
                let key_data = reader
                    .read(&self.private_key)
                    .map_err(|e| PkiError::resource_read(&self.private_key, e))?;
                decode_pair(&cert_data, &key_data)
            }
        }
    }

    /// Load the certificate and key from the filesystem using `tokio::fs`
    ///
    /// Same ordering and failure behavior as [`KeyPair::load_with`].
    ///
    /// # Errors
    ///
    /// See [`KeyPair::load_with`].
    pub async fn load_async(&self) -> Result<(ParsedCertificate, PrivateKey)> {
        match self.storage_format()? {
            KeyPairFormat::PemFile => {
                tracing::debug!(
                    "Loading key pair from {} and {} (async)",
                    self.certificate,
                    self.private_key
                );
                let cert_data = tokio::fs::read(&self.certificate)
                    .await
                    .map_err(|e| PkiError::resource_read(&self.certificate, e))?;
                let key_data = tokio::fs::read(&self.private_key)
                    .await
                    .map_err(|e| PkiError::resource_read(&self.private_key, e))?;
                decode_pair(&cert_data, &key_data)
            }
        }
    }
}

fn decode_pair(cert_data: &[u8], key_data: &[u8]) -> Result<(ParsedCertificate, PrivateKey)> {
    let certificate = decode_certificate(cert_data)?;
    let private_key = decode_private_key(key_data)?;
    tracing::debug!(
        "Loaded {} key for certificate {:?}",
        private_key.algorithm(),
        certificate.common_name()
    );
    Ok((certificate, private_key))
}

/// Whether `key` is the private half of `certificate`'s public key
///
/// # Errors
///
/// Returns [`PkiError::KeyEncoding`] if the key's public half cannot be
/// serialized.
pub fn key_matches_certificate(certificate: &ParsedCertificate, key: &PrivateKey) -> Result<bool> {
    Ok(key.public_key_der()? == certificate.public_key_der)
}
