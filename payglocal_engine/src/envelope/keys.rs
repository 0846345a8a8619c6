//! RSA key wrappers for both ends of the envelope protocol.
//!
//! The merchant holds a [`SigningKey`] (its own private key) and an [`EncryptionKey`] (the gateway's public key). The
//! gateway, and our tests, hold the matching [`DecryptionKey`] and [`VerifyingKey`]. All four are parsed from PEM
//! text, which is normalized first, so keys that have been mangled by environment variables still load. Anything that
//! is not an RSA key in PEM armour fails with [`EnvelopeError::KeyFormatError`].
use std::fmt;

use josekit::{
    jwe::{
        alg::rsaes::{RsaesJweDecrypter, RsaesJweEncrypter},
        RSA_OAEP_256,
    },
    jws::{
        alg::rsassa::{RsassaJwsSigner, RsassaJwsVerifier},
        RS256,
    },
};
use payglocal_common::normalize_pem;

use crate::envelope::EnvelopeError;

/// The gateway's RSA public key, used to wrap the content encryption key with RSA-OAEP-256.
#[derive(Debug, Clone)]
pub struct EncryptionKey {
    encrypter: RsaesJweEncrypter,
}

impl EncryptionKey {
    pub fn from_pem(pem: &str) -> Result<Self, EnvelopeError> {
        let pem = normalize_pem(pem)?;
        let encrypter = RSA_OAEP_256
            .encrypter_from_pem(pem.as_bytes())
            .map_err(|e| EnvelopeError::KeyFormatError(format!("Failed to load RSA public key. {e}")))?;
        Ok(Self { encrypter })
    }

    pub(crate) fn encrypter(&self) -> &RsaesJweEncrypter {
        &self.encrypter
    }
}

/// The merchant's RSA private key, used to sign digest objects with RS256.
#[derive(Clone)]
pub struct SigningKey {
    signer: RsassaJwsSigner,
}

impl SigningKey {
    pub fn from_pem(pem: &str) -> Result<Self, EnvelopeError> {
        let pem = normalize_pem(pem)?;
        let signer = RS256
            .signer_from_pem(pem.as_bytes())
            .map_err(|e| EnvelopeError::KeyFormatError(format!("Failed to load RSA private key. {e}")))?;
        Ok(Self { signer })
    }

    pub(crate) fn signer(&self) -> &RsassaJwsSigner {
        &self.signer
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SigningKey(****)")
    }
}

/// The private half of an [`EncryptionKey`]. Only the gateway has this in production.
#[derive(Clone)]
pub struct DecryptionKey {
    decrypter: RsaesJweDecrypter,
}

impl DecryptionKey {
    pub fn from_pem(pem: &str) -> Result<Self, EnvelopeError> {
        let pem = normalize_pem(pem)?;
        let decrypter = RSA_OAEP_256
            .decrypter_from_pem(pem.as_bytes())
            .map_err(|e| EnvelopeError::KeyFormatError(format!("Failed to load RSA private key. {e}")))?;
        Ok(Self { decrypter })
    }

    pub(crate) fn decrypter(&self) -> &RsaesJweDecrypter {
        &self.decrypter
    }
}

impl fmt::Debug for DecryptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DecryptionKey(****)")
    }
}

/// The public half of a [`SigningKey`], used to check RS256 signatures on digest tokens.
#[derive(Debug, Clone)]
pub struct VerifyingKey {
    verifier: RsassaJwsVerifier,
}

impl VerifyingKey {
    pub fn from_pem(pem: &str) -> Result<Self, EnvelopeError> {
        let pem = normalize_pem(pem)?;
        let verifier = RS256
            .verifier_from_pem(pem.as_bytes())
            .map_err(|e| EnvelopeError::KeyFormatError(format!("Failed to load RSA public key. {e}")))?;
        Ok(Self { verifier })
    }

    pub(crate) fn verifier(&self) -> &RsassaJwsVerifier {
        &self.verifier
    }
}
