//! # Token envelope
//!
//! Every call to the PayGlocal gateway is authenticated by a pair of compact tokens:
//!
//! 1. An **encrypted token** (JWE). The request payload is serialized to JSON and encrypted to the gateway's public
//!    key using RSA-OAEP-256 key wrapping and A128CBC-HS256 content encryption. This is sent as the request body.
//! 2. A **signed digest** (JWS). The SHA-256 hash of the encrypted token, base64 encoded, is wrapped in a small digest
//!    object and signed with the merchant's private key using RS256. This is sent in the `x-gl-token-external`
//!    header.
//!
//! Signing the digest rather than the token itself lets the gateway check the integrity of the first token before it
//! spends any effort decrypting it.
//!
//! Read-only calls (status checks) have no body. For those, the digest is computed over the literal request path
//! instead, see [`build_path_token`].
//!
//! ```text
//!   payload ──json──▶ JWE(RSA-OAEP-256, A128CBC-HS256) ──────────────▶ body
//!                          │
//!                          └─sha256─▶ {digest, digestAlgorithm, exp, iat} ──RS256──▶ x-gl-token-external
//! ```
//!
//! Construction is stateless. Both tokens are built fresh for each request, share one [`TokenTimes`], and are thrown
//! away afterwards.
mod errors;
mod headers;
mod inspect;
mod keys;

pub use errors::EnvelopeError;
pub use headers::{
    default_ttl,
    digest_of,
    DigestObject,
    EncryptionHeader,
    SignatureHeader,
    TokenTimes,
    CONTENT_ENCRYPTION_ALGORITHM,
    DEFAULT_TOKEN_TTL_MS,
    DIGEST_ALGORITHM,
    KEY_ENCRYPTION_ALGORITHM,
    SIGNATURE_ALGORITHM,
};
pub use inspect::{
    decode_protected_header,
    decode_unverified_digest,
    decrypt_token,
    segment_count,
    verify_signed_digest,
    VerifiedDigest,
};
pub use keys::{DecryptionKey, EncryptionKey, SigningKey, VerifyingKey};

use chrono::Duration;
use josekit::{jwe::JweHeader, jws::JwsHeader};
use log::*;
use serde::Serialize;

/// The two keys a merchant needs to build an envelope.
#[derive(Debug, Clone)]
pub struct EnvelopeKeys {
    /// The gateway's public key.
    pub encryption_key: EncryptionKey,
    /// The merchant's private key.
    pub signing_key: SigningKey,
}

impl EnvelopeKeys {
    pub fn new(encryption_key: EncryptionKey, signing_key: SigningKey) -> Self {
        Self { encryption_key, signing_key }
    }

    pub fn from_pem(gateway_public_key: &str, merchant_private_key: &str) -> Result<Self, EnvelopeError> {
        let encryption_key = EncryptionKey::from_pem(gateway_public_key)?;
        let signing_key = SigningKey::from_pem(merchant_private_key)?;
        Ok(Self { encryption_key, signing_key })
    }
}

/// Identifiers issued by the gateway during merchant onboarding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyIds {
    pub merchant_id: String,
    /// `kid` of the gateway public key.
    pub public_key_id: String,
    /// `kid` of the merchant private key.
    pub private_key_id: String,
}

impl KeyIds {
    pub fn new<S1, S2, S3>(merchant_id: S1, public_key_id: S2, private_key_id: S3) -> Self
    where
        S1: Into<String>,
        S2: Into<String>,
        S3: Into<String>,
    {
        Self { merchant_id: merchant_id.into(), public_key_id: public_key_id.into(), private_key_id: private_key_id.into() }
    }

    pub fn encryption_header(&self, times: TokenTimes) -> EncryptionHeader {
        EncryptionHeader::new(&self.public_key_id, &self.merchant_id, times)
    }

    pub fn signature_header(&self, times: TokenTimes) -> SignatureHeader {
        SignatureHeader::new(&self.private_key_id, &self.merchant_id, times)
    }
}

/// The pair of tokens that authenticates a single write call to the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Envelope {
    pub encrypted_token: String,
    pub signed_digest: String,
}

/// Serialize `payload` to JSON and encrypt it to the gateway's public key, returning a compact JWE.
pub fn build_encrypted_token<T: Serialize + ?Sized>(
    payload: &T,
    recipient_key: &EncryptionKey,
    header: &EncryptionHeader,
) -> Result<String, EnvelopeError> {
    let plaintext = serde_json::to_vec(payload)
        .map_err(|e| EnvelopeError::EncodingError(format!("Could not serialize the payload. {e}")))?;
    let token = encrypt(&plaintext, &header.to_jwe_header()?, recipient_key)?;
    trace!("🔐️ Encrypted {} payload bytes into a {} byte token for kid {}", plaintext.len(), token.len(), header.kid);
    Ok(token)
}

/// Hash `input` (an encrypted token, or a request path for reads), wrap the hash in a [`DigestObject`] and sign it
/// with RS256, returning a compact JWS.
pub fn build_signed_digest(
    input: &str,
    signing_key: &SigningKey,
    header: &SignatureHeader,
) -> Result<String, EnvelopeError> {
    let digest = DigestObject::new(input, header.times);
    let payload = serde_json::to_vec(&digest)
        .map_err(|e| EnvelopeError::EncodingError(format!("Could not serialize the digest object. {e}")))?;
    let token = sign(&payload, &header.to_jws_header()?, signing_key)?;
    trace!("🔏️ Signed digest {} for kid {}", digest.digest, header.kid);
    Ok(token)
}

fn encrypt(plaintext: &[u8], header: &JweHeader, key: &EncryptionKey) -> Result<String, EnvelopeError> {
    josekit::jwe::serialize_compact(plaintext, header, key.encrypter())
        .map_err(|e| EnvelopeError::EncryptionError(e.to_string()))
}

fn sign(payload: &[u8], header: &JwsHeader, key: &SigningKey) -> Result<String, EnvelopeError> {
    josekit::jws::serialize_compact(payload, header, key.signer()).map_err(|e| EnvelopeError::SigningError(e.to_string()))
}

/// Build both tokens for a write call. The two tokens share the same issued-at and expiry times.
pub fn build_envelope<T: Serialize + ?Sized>(
    payload: &T,
    keys: &EnvelopeKeys,
    ids: &KeyIds,
    ttl: Duration,
) -> Result<Envelope, EnvelopeError> {
    let times = TokenTimes::starting_now(ttl);
    build_envelope_at(payload, keys, ids, times)
}

/// As [`build_envelope`], but with explicit timestamps.
pub fn build_envelope_at<T: Serialize + ?Sized>(
    payload: &T,
    keys: &EnvelopeKeys,
    ids: &KeyIds,
    times: TokenTimes,
) -> Result<Envelope, EnvelopeError> {
    let encrypted_token = build_encrypted_token(payload, &keys.encryption_key, &ids.encryption_header(times))?;
    let signed_digest = build_signed_digest(&encrypted_token, &keys.signing_key, &ids.signature_header(times))?;
    debug!("✉️ Built envelope for merchant {} (expires at {})", ids.merchant_id, times.exp);
    Ok(Envelope { encrypted_token, signed_digest })
}

/// Build the signed digest for a read call, where the digest covers the request path (e.g.
/// `/gl/v1/payments/{gid}/status`) and there is no encrypted token.
pub fn build_path_token(path: &str, signing_key: &SigningKey, ids: &KeyIds, ttl: Duration) -> Result<String, EnvelopeError> {
    let times = TokenTimes::starting_now(ttl);
    let token = build_signed_digest(path, signing_key, &ids.signature_header(times))?;
    debug!("✉️ Built path token for {path} (expires at {})", times.exp);
    Ok(token)
}
