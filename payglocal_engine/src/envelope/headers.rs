use chrono::{Duration, Utc};
use josekit::{jwe::JweHeader, jws::JwsHeader};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};

use crate::envelope::EnvelopeError;

pub const KEY_ENCRYPTION_ALGORITHM: &str = "RSA-OAEP-256";
pub const CONTENT_ENCRYPTION_ALGORITHM: &str = "A128CBC-HS256";
pub const SIGNATURE_ALGORITHM: &str = "RS256";
pub const DIGEST_ALGORITHM: &str = "SHA-256";
/// Tokens are valid for five minutes unless configured otherwise.
pub const DEFAULT_TOKEN_TTL_MS: i64 = 300_000;

/// Issued-at and expiry timestamps, in milliseconds since the Unix epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenTimes {
    pub iat: i64,
    pub exp: i64,
}

impl TokenTimes {
    pub fn starting_now(ttl: Duration) -> Self {
        Self::starting_at(Utc::now().timestamp_millis(), ttl)
    }

    /// A zero or negative `ttl` is treated as "not configured" and replaced by [`DEFAULT_TOKEN_TTL_MS`], so `exp` is
    /// always strictly later than `iat`.
    pub fn starting_at(iat: i64, ttl: Duration) -> Self {
        let ttl_ms = match ttl.num_milliseconds() {
            ms if ms > 0 => ms,
            _ => DEFAULT_TOKEN_TTL_MS,
        };
        Self { iat, exp: iat + ttl_ms }
    }

    pub fn ttl_ms(&self) -> i64 {
        self.exp - self.iat
    }
}

pub fn default_ttl() -> Duration {
    Duration::milliseconds(DEFAULT_TOKEN_TTL_MS)
}

/// The variable part of the JWE protected header. `alg` and `enc` are fixed by the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptionHeader {
    /// Identifier of the gateway public key the payload is encrypted to.
    pub kid: String,
    /// The merchant id, sent as `issued-by`.
    pub issued_by: String,
    pub times: TokenTimes,
}

impl EncryptionHeader {
    pub fn new<S1: Into<String>, S2: Into<String>>(kid: S1, issued_by: S2, times: TokenTimes) -> Self {
        Self { kid: kid.into(), issued_by: issued_by.into(), times }
    }

    pub(crate) fn to_jwe_header(&self) -> Result<JweHeader, EnvelopeError> {
        let mut header = JweHeader::new();
        header.set_algorithm(KEY_ENCRYPTION_ALGORITHM);
        header.set_content_encryption(CONTENT_ENCRYPTION_ALGORITHM);
        header.set_key_id(&self.kid);
        let claims = [
            ("iat", Value::String(self.times.iat.to_string())),
            ("exp", Value::String(self.times.exp.to_string())),
            ("issued-by", Value::String(self.issued_by.clone())),
        ];
        for (name, value) in claims {
            header
                .set_claim(name, Some(value))
                .map_err(|e| EnvelopeError::EncodingError(format!("Invalid JWE header claim {name}. {e}")))?;
        }
        Ok(header)
    }
}

/// The variable part of the JWS protected header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureHeader {
    /// Identifier of the merchant private key that signs the digest.
    pub kid: String,
    pub merchant_id: String,
    pub times: TokenTimes,
}

impl SignatureHeader {
    pub fn new<S1: Into<String>, S2: Into<String>>(kid: S1, merchant_id: S2, times: TokenTimes) -> Self {
        Self { kid: kid.into(), merchant_id: merchant_id.into(), times }
    }

    pub(crate) fn to_jws_header(&self) -> Result<JwsHeader, EnvelopeError> {
        let mut header = JwsHeader::new();
        header.set_key_id(&self.kid);
        // The gateway expects the flags as the strings "true", not JSON booleans.
        let claims = [
            ("alg", Value::String(SIGNATURE_ALGORITHM.to_string())),
            ("issued-by", Value::String(self.merchant_id.clone())),
            ("x-gl-merchantId", Value::String(self.merchant_id.clone())),
            ("x-gl-enc", Value::String("true".to_string())),
            ("is-digested", Value::String("true".to_string())),
        ];
        for (name, value) in claims {
            header
                .set_claim(name, Some(value))
                .map_err(|e| EnvelopeError::EncodingError(format!("Invalid JWS header claim {name}. {e}")))?;
        }
        Ok(header)
    }
}

/// The payload of the signed digest token.
///
/// `exp` is serialized as a JSON number and `iat` as a string, matching what the gateway SDKs emit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DigestObject {
    pub digest: String,
    pub digest_algorithm: String,
    pub exp: i64,
    pub iat: String,
}

impl DigestObject {
    pub fn new(input: &str, times: TokenTimes) -> Self {
        Self {
            digest: digest_of(input),
            digest_algorithm: DIGEST_ALGORITHM.to_string(),
            exp: times.exp,
            iat: times.iat.to_string(),
        }
    }

    /// True if this digest was computed over `input`.
    pub fn covers(&self, input: &str) -> bool {
        self.digest_algorithm == DIGEST_ALGORITHM && self.digest == digest_of(input)
    }

    /// The issued-at time as a number, if the `iat` string is a valid integer.
    pub fn issued_at(&self) -> Option<i64> {
        self.iat.parse().ok()
    }
}

/// Standard, padded base64 of the SHA-256 hash of `input`.
pub fn digest_of(input: &str) -> String {
    let hash = Sha256::digest(input.as_bytes());
    base64::encode(hash)
}
