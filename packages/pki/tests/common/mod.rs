//! Shared fixtures for the integration tests

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use cryypt_pki::ResourceReader;
use once_cell::sync::Lazy;
use rcgen::{
    BasicConstraints, CertificateParams, DistinguishedName, DnType, ExtendedKeyUsagePurpose, IsCa,
    Issuer, KeyPair, KeyUsagePurpose,
};
use rsa::RsaPrivateKey;
use rsa::pkcs8::{EncodePrivateKey, LineEnding};

// RSA generation is slow, share one key across tests
static RSA_KEY: Lazy<RsaPrivateKey> = Lazy::new(|| {
    RsaPrivateKey::new(&mut rand::thread_rng(), 2048).expect("Failed to generate RSA key")
});

pub fn rsa_key() -> RsaPrivateKey {
    RSA_KEY.clone()
}

pub fn p256_key() -> p256::SecretKey {
    p256::SecretKey::random(&mut rand::thread_rng())
}

pub fn p384_key() -> p384::SecretKey {
    p384::SecretKey::random(&mut rand::thread_rng())
}

pub fn p521_key() -> p521::SecretKey {
    p521::SecretKey::random(&mut rand::thread_rng())
}

pub fn ed25519_key() -> ed25519_dalek::SigningKey {
    ed25519_dalek::SigningKey::from_bytes(&[0x42; 32])
}

fn distinguished_name(common_name: &str) -> DistinguishedName {
    let mut dn = DistinguishedName::new();
    dn.push(DnType::OrganizationName, "CRYYPT");
    dn.push(DnType::CommonName, common_name);
    dn
}

/// Self-signed leaf certificate for `localhost` with a fresh P-256 key
pub fn self_signed(common_name: &str) -> (rcgen::Certificate, KeyPair) {
    let mut params = CertificateParams::new(vec!["localhost".to_string()])
        .expect("Failed to create certificate parameters");
    params.distinguished_name = distinguished_name(common_name);

    let key_pair = KeyPair::generate().expect("Failed to generate key pair");
    let cert = params
        .self_signed(&key_pair)
        .expect("Failed to create self-signed certificate");
    (cert, key_pair)
}

/// Self-signed certificate whose key is the shared RSA fixture key
pub fn rsa_self_signed(common_name: &str) -> rcgen::Certificate {
    let pkcs8_pem = rsa_key()
        .to_pkcs8_pem(LineEnding::LF)
        .expect("Failed to encode RSA key");
    let key_pair = KeyPair::from_pem(&pkcs8_pem).expect("Failed to load RSA key pair");

    let mut params = CertificateParams::new(vec!["localhost".to_string()])
        .expect("Failed to create certificate parameters");
    params.distinguished_name = distinguished_name(common_name);
    params
        .self_signed(&key_pair)
        .expect("Failed to create RSA certificate")
}

/// A root CA and a server certificate it signed
pub struct TestChain {
    pub root: rcgen::Certificate,
    pub leaf: rcgen::Certificate,
    pub leaf_key: KeyPair,
}

pub fn ca_signed_chain() -> TestChain {
    let mut ca_params =
        CertificateParams::new(Vec::default()).expect("Failed to create CA params");
    ca_params.is_ca = IsCa::Ca(BasicConstraints::Unconstrained);
    ca_params.key_usages = vec![KeyUsagePurpose::KeyCertSign, KeyUsagePurpose::CrlSign];
    ca_params.distinguished_name = distinguished_name("CRYYPT Test Root");

    let ca_key = KeyPair::generate().expect("Failed to generate CA key");
    let root = ca_params
        .self_signed(&ca_key)
        .expect("Failed to create CA certificate");
    let issuer = Issuer::new(ca_params, ca_key);

    let mut leaf_params = CertificateParams::new(vec!["localhost".to_string()])
        .expect("Failed to create leaf params");
    leaf_params.distinguished_name = distinguished_name("CRYYPT Server");
    leaf_params.extended_key_usages = vec![ExtendedKeyUsagePurpose::ServerAuth];

    let leaf_key = KeyPair::generate().expect("Failed to generate leaf key");
    let leaf = leaf_params
        .signed_by(&leaf_key, &issuer)
        .expect("Failed to sign leaf certificate");

    TestChain {
        root,
        leaf,
        leaf_key,
    }
}

/// In-memory resource reader that records every location it is asked for
#[derive(Default)]
pub struct RecordingReader {
    files: HashMap<String, Vec<u8>>,
    reads: RefCell<Vec<String>>,
}

impl RecordingReader {
    pub fn with_file(mut self, location: &str, contents: impl Into<Vec<u8>>) -> Self {
        self.files.insert(location.to_string(), contents.into());
        self
    }

    pub fn reads(&self) -> Vec<String> {
        self.reads.borrow().clone()
    }
}

impl ResourceReader for RecordingReader {
    fn read(&self, location: &str) -> std::io::Result<Vec<u8>> {
        self.reads.borrow_mut().push(location.to_string());
        self.files.get(location).cloned().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::NotFound, location.to_string())
        })
    }
}

/// Log sink for a `tracing_subscriber::fmt` subscriber
#[derive(Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    /// Install a debug-level subscriber writing here for the current thread
    pub fn install(&self) -> tracing::subscriber::DefaultGuard {
        let sink = self.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || sink.clone())
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl std::io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
