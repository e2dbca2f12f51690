//! Certificate details extraction
//!
//! Reads the validity window, `BasicConstraints` and DNS subject alternative
//! names out of an x509-cert certificate.

use std::time::SystemTime;

use const_oid::AssociatedOid;
use der::Decode;
use x509_cert::Certificate;
use x509_cert::ext::pkix::name::GeneralName;
use x509_cert::ext::pkix::{BasicConstraints, SubjectAltName};

/// Details pulled from the TBS certificate and its extensions
#[derive(Debug, Clone)]
pub struct CertificateDetails {
    /// Start of the validity window
    pub not_before: SystemTime,
    /// End of the validity window
    pub not_after: SystemTime,
    /// `BasicConstraints` CA flag
    pub is_ca: bool,
    /// DNS names from the subject alternative name extension
    pub san_dns_names: Vec<String>,
}

/// Extract certificate details using x509-cert
///
/// Extensions that fail to decode are skipped rather than failing the whole
/// certificate; the DER structure has already been validated at this point.
#[must_use]
pub fn extract_certificate_details(cert: &Certificate) -> CertificateDetails {
    let validity = &cert.tbs_certificate.validity;
    let mut details = CertificateDetails {
        not_before: validity.not_before.to_system_time(),
        not_after: validity.not_after.to_system_time(),
        is_ca: false,
        san_dns_names: Vec::new(),
    };

    let Some(extensions) = &cert.tbs_certificate.extensions else {
        return details;
    };

    for ext in extensions {
        if ext.extn_id == BasicConstraints::OID {
            match BasicConstraints::from_der(ext.extn_value.as_bytes()) {
                Ok(constraints) => details.is_ca = constraints.ca,
                Err(e) => tracing::warn!("Failed to decode BasicConstraints: {e}"),
            }
        } else if ext.extn_id == SubjectAltName::OID {
            match SubjectAltName::from_der(ext.extn_value.as_bytes()) {
                Ok(san) => {
                    details.san_dns_names = san
                        .0
                        .iter()
                        .filter_map(|name| match name {
                            GeneralName::DnsName(dns) => Some(dns.to_string()),
                            _ => None,
                        })
                        .collect();
                }
                Err(e) => tracing::warn!("Failed to decode SubjectAltName: {e}"),
            }
        }
    }

    details
}
