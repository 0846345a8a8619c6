#![allow(dead_code)]
use josekit::jws::RS256;
use log::*;
use once_cell::sync::Lazy;
use payglocal_engine::{
    envelope::{DecryptionKey, VerifyingKey},
    EnvelopeKeys,
    KeyIds,
};

pub const MERCHANT_ID: &str = "testmerchant";
pub const PUBLIC_KEY_ID: &str = "kId-gateway-pub";
pub const PRIVATE_KEY_ID: &str = "kId-merchant-priv";

/// One RSA key pair stands in for both the gateway's and the merchant's keys. Generating them is slow, so every test
/// in a binary shares the same pair.
pub struct TestKeys {
    pub private_pem: String,
    pub public_pem: String,
}

static TEST_KEYS: Lazy<TestKeys> = Lazy::new(|| {
    let pair = RS256.generate_key_pair(2048).expect("Could not generate RSA key pair");
    let private_pem = String::from_utf8(pair.to_pem_private_key()).expect("PEM is ASCII");
    let public_pem = String::from_utf8(pair.to_pem_public_key()).expect("PEM is ASCII");
    debug!("🔑️ Generated test key pair");
    TestKeys { private_pem, public_pem }
});

pub fn prepare_test_env() {
    dotenvy::from_filename(".env.test").ok();
    let _ = env_logger::try_init();
}

pub fn test_keys() -> &'static TestKeys {
    &TEST_KEYS
}

pub fn envelope_keys() -> EnvelopeKeys {
    let keys = test_keys();
    EnvelopeKeys::from_pem(&keys.public_pem, &keys.private_pem).expect("Test keys are valid")
}

pub fn key_ids() -> KeyIds {
    KeyIds::new(MERCHANT_ID, PUBLIC_KEY_ID, PRIVATE_KEY_ID)
}

pub fn decryption_key() -> DecryptionKey {
    DecryptionKey::from_pem(&test_keys().private_pem).expect("Test keys are valid")
}

pub fn verifying_key() -> VerifyingKey {
    VerifyingKey::from_pem(&test_keys().public_pem).expect("Test keys are valid")
}
