//! Certificate trust checking
//!
//! A certificate is trusted when it is itself one of the anchors of a
//! [`TrustStore`] and currently valid, or when webpki can build a verified
//! path from it to one of those anchors. Path verification uses default
//! options: current time, server-auth usage, no intermediates, no revocation
//! data and no hostname. It only asserts chain validity to a root, not
//! fitness for a particular peer.

use std::time::SystemTime;

use once_cell::sync::Lazy;
use rustls_pki_types::{CertificateDer, SignatureVerificationAlgorithm, TrustAnchor, UnixTime};
use webpki::{EndEntityCert, KeyUsage, anchor_from_trusted_cert};

use crate::certificate::ParsedCertificate;
use crate::error::{PkiError, Result};
use crate::pem_codec::{self, CERTIFICATE_LABEL};

static SUPPORTED_SIG_ALGS: &[&dyn SignatureVerificationAlgorithm] = &[
    webpki::ring::ECDSA_P256_SHA256,
    webpki::ring::ECDSA_P256_SHA384,
    webpki::ring::ECDSA_P384_SHA256,
    webpki::ring::ECDSA_P384_SHA384,
    webpki::ring::ED25519,
    webpki::ring::RSA_PKCS1_2048_8192_SHA256,
    webpki::ring::RSA_PKCS1_2048_8192_SHA384,
    webpki::ring::RSA_PKCS1_2048_8192_SHA512,
    webpki::ring::RSA_PSS_2048_8192_SHA256_LEGACY_KEY,
    webpki::ring::RSA_PSS_2048_8192_SHA384_LEGACY_KEY,
    webpki::ring::RSA_PSS_2048_8192_SHA512_LEGACY_KEY,
];

static SYSTEM_TRUST_STORE: Lazy<TrustStore> = Lazy::new(TrustStore::load_system);

/// A set of trust anchors certificates are verified against
#[derive(Debug, Clone, Default)]
pub struct TrustStore {
    roots: Vec<TrustAnchor<'static>>,
}

impl TrustStore {
    /// A store without any anchors; nothing verifies against it
    #[must_use]
    pub fn empty() -> Self {
        Self { roots: Vec::new() }
    }

    /// The process-wide system store, loaded on first use
    ///
    /// Holds the platform's native roots, or the bundled Mozilla roots when
    /// the platform store is unavailable or empty.
    #[must_use]
    pub fn system() -> &'static TrustStore {
        &SYSTEM_TRUST_STORE
    }

    fn load_system() -> Self {
        let native = rustls_native_certs::load_native_certs();
        for e in &native.errors {
            tracing::warn!("Failed to load platform certificates: {e}");
        }

        let mut store = Self::empty();
        let (valid, invalid) = store.add_parsable_certificates(native.certs);
        tracing::debug!("Loaded {valid} platform trust anchors ({invalid} ignored)");

        if store.is_empty() {
            tracing::warn!("No usable platform trust anchors, using bundled webpki roots");
            store
                .roots
                .extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());
        }

        store
    }

    /// Add every certificate that is usable as a trust anchor
    ///
    /// Returns the number of certificates added and the number ignored.
    pub fn add_parsable_certificates<'a>(
        &mut self,
        certs: impl IntoIterator<Item = CertificateDer<'a>>,
    ) -> (usize, usize) {
        let mut valid = 0;
        let mut invalid = 0;

        for cert in certs {
            match anchor_from_trusted_cert(&cert) {
                Ok(anchor) => {
                    self.roots.push(anchor.to_owned());
                    valid += 1;
                }
                Err(e) => {
                    tracing::trace!("Ignoring unusable trust anchor: {e}");
                    invalid += 1;
                }
            }
        }

        (valid, invalid)
    }

    /// Add a single DER-encoded root certificate
    ///
    /// # Errors
    ///
    /// Returns [`PkiError::MalformedCertificate`] if `der` cannot be used as
    /// a trust anchor.
    pub fn add_der(&mut self, der: &[u8]) -> Result<()> {
        let cert = CertificateDer::from(der);
        let anchor = anchor_from_trusted_cert(&cert).map_err(|e| {
            PkiError::MalformedCertificate(format!("not a usable trust anchor: {e}"))
        })?;
        self.roots.push(anchor.to_owned());
        Ok(())
    }

    /// Add a single PEM `CERTIFICATE` root
    ///
    /// # Errors
    ///
    /// Propagates PEM codec errors and the errors of [`TrustStore::add_der`].
    pub fn add_pem(&mut self, pem_data: &[u8]) -> Result<()> {
        let block = pem_codec::decode_single(pem_data, CERTIFICATE_LABEL)?;
        self.add_der(&block.contents)
    }

    /// Number of anchors in the store
    #[must_use]
    pub fn len(&self) -> usize {
        self.roots.len()
    }

    /// Whether the store has no anchors
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Whether `cert` is one of this store's anchors or chains to one
    #[must_use]
    pub fn is_trusted(&self, cert: &ParsedCertificate) -> bool {
        if self.contains(cert) {
            let now = SystemTime::now();
            let valid = cert.not_before <= now && now <= cert.not_after;
            if !valid {
                tracing::debug!(
                    "Anchor {:?} is outside its validity window",
                    cert.common_name()
                );
            }
            return valid;
        }

        match self.verify(cert) {
            Ok(()) => true,
            Err(e) => {
                tracing::debug!("Certificate {:?} is not trusted: {e}", cert.common_name());
                false
            }
        }
    }

    /// Whether `cert` is itself one of the anchors, by subject and public key
    fn contains(&self, cert: &ParsedCertificate) -> bool {
        let der = CertificateDer::from(cert.der());
        let Ok(anchor) = anchor_from_trusted_cert(&der) else {
            return false;
        };
        let subject: &[u8] = anchor.subject.as_ref();
        let spki: &[u8] = anchor.subject_public_key_info.as_ref();
        self.roots.iter().any(|root| {
            root.subject.as_ref() == subject && root.subject_public_key_info.as_ref() == spki
        })
    }

    fn verify(&self, cert: &ParsedCertificate) -> std::result::Result<(), webpki::Error> {
        let der = CertificateDer::from(cert.der());
        let end_entity = EndEntityCert::try_from(&der)?;
        end_entity
            .verify_for_usage(
                SUPPORTED_SIG_ALGS,
                &self.roots,
                &[],
                UnixTime::now(),
                KeyUsage::server_auth(),
                None,
                None,
            )
            .map(|_| ())
    }
}

/// Whether `cert` chains to a root of the system trust store
///
/// Never fails; every verification error yields `false`.
#[must_use]
pub fn is_trusted(cert: &ParsedCertificate) -> bool {
    TrustStore::system().is_trusted(cert)
}
