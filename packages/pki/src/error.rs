//! Error types for certificate and private key handling

/// PKI codec errors
#[derive(Debug, thiserror::Error)]
pub enum PkiError {
    /// Input did not contain any PEM block
    #[error("no PEM block found")]
    NoPemBlock,

    /// Input contained more than a single PEM block
    #[error("input contained more than a single PEM block")]
    TrailingData,

    /// The PEM block carried a different label than required
    #[error("expected PEM block type to be {expected}, but got '{found}'")]
    UnexpectedBlockType {
        /// Label the caller asked for
        expected: &'static str,
        /// Label found in the input
        found: String,
    },

    /// PEM armor was present but could not be parsed
    #[error("malformed PEM data: {0}")]
    MalformedPem(#[from] pem::PemError),

    /// DER payload is not a valid X.509 certificate
    #[error("malformed certificate: {0}")]
    MalformedCertificate(String),

    /// PEM label does not name a private key
    #[error("unknown PEM header {0:?}")]
    UnknownKeyHeader(String),

    /// None of the known private key containers matched
    #[error("unknown private key type: {0}")]
    UnknownPrivateKeyFormat(String),

    /// PKCS#8 container holds an algorithm this crate does not handle
    #[error("found unknown private key type in PKCS#8 wrapping: {0}")]
    UnsupportedPkcs8KeyType(String),

    /// Key container or algorithm cannot be represented
    #[error("unsupported key type: {0}")]
    UnsupportedKeyType(String),

    /// Key material could not be serialized to DER
    #[error("private key encoding failed: {0}")]
    KeyEncoding(String),

    /// Key pair storage format is not recognized
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Reading a certificate or key resource failed
    #[error("failed to read {location}: {source}")]
    ResourceRead {
        /// Location that was being read
        location: String,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },
}

impl PkiError {
    /// Create a `resource_read` error for the given location
    pub fn resource_read(location: impl Into<String>, source: std::io::Error) -> Self {
        Self::ResourceRead {
            location: location.into(),
            source,
        }
    }
}

/// Result type for PKI operations
pub type Result<T> = std::result::Result<T, PkiError>;
