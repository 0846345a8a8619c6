//! The receiving side of the envelope protocol. The gateway does all of this for real; we need it to check our own
//! tokens, and the CLI uses the unverified header decoding to show what is inside a token.
use josekit::JoseHeader;
use serde_json::{Map, Value};

use crate::envelope::{DecryptionKey, DigestObject, EnvelopeError, VerifyingKey};

/// A digest object whose RS256 signature has been checked, along with the token's protected header.
#[derive(Debug, Clone)]
pub struct VerifiedDigest {
    pub digest: DigestObject,
    pub header: Map<String, Value>,
}

/// The number of dot-separated segments in a compact token. 5 for JWE, 3 for JWS.
pub fn segment_count(token: &str) -> usize {
    token.split('.').count()
}

/// Decode the protected header of a compact JWE or JWS **without** checking anything else.
pub fn decode_protected_header(token: &str) -> Result<Map<String, Value>, EnvelopeError> {
    let segments = segment_count(token);
    if segments != 3 && segments != 5 {
        return Err(EnvelopeError::MalformedToken(format!("Expected 3 or 5 segments, found {segments}")));
    }
    let first = token.split('.').next().unwrap_or_default();
    decode_json_segment(first)
}

/// Decode one base64url segment of a compact token as a JSON object.
pub(crate) fn decode_json_segment(segment: &str) -> Result<Map<String, Value>, EnvelopeError> {
    let bytes = base64::decode_config(segment, base64::URL_SAFE_NO_PAD)
        .map_err(|e| EnvelopeError::MalformedToken(format!("Segment is not base64url. {e}")))?;
    serde_json::from_slice::<Map<String, Value>>(&bytes)
        .map_err(|e| EnvelopeError::MalformedToken(format!("Segment is not a JSON object. {e}")))
}

/// Decrypt a compact JWE, returning the plaintext and the protected header.
pub fn decrypt_token(token: &str, key: &DecryptionKey) -> Result<(Vec<u8>, Map<String, Value>), EnvelopeError> {
    if segment_count(token) != 5 {
        return Err(EnvelopeError::MalformedToken("An encrypted token has exactly 5 segments".into()));
    }
    let (plaintext, header) =
        josekit::jwe::deserialize_compact(token, key.decrypter()).map_err(|e| EnvelopeError::DecryptionError(e.to_string()))?;
    Ok((plaintext, header.claims_set().clone()))
}

/// Verify the RS256 signature on a digest token and decode its payload.
///
/// This does not check the digest against anything, nor the expiry. Use [`DigestObject::covers`] for the former.
pub fn verify_signed_digest(token: &str, key: &VerifyingKey) -> Result<VerifiedDigest, EnvelopeError> {
    if segment_count(token) != 3 {
        return Err(EnvelopeError::MalformedToken("A signed digest has exactly 3 segments".into()));
    }
    let (payload, header) =
        josekit::jws::deserialize_compact(token, key.verifier()).map_err(|e| EnvelopeError::VerificationError(e.to_string()))?;
    let digest = serde_json::from_slice::<DigestObject>(&payload)
        .map_err(|e| EnvelopeError::EncodingError(format!("Token payload is not a digest object. {e}")))?;
    Ok(VerifiedDigest { digest, header: header.claims_set().clone() })
}

/// Decode the digest object in a signed digest **without** verifying the signature.
pub fn decode_unverified_digest(token: &str) -> Result<DigestObject, EnvelopeError> {
    let mut segments = token.split('.');
    let payload = match (segments.next(), segments.next(), segments.next(), segments.next()) {
        (Some(_), Some(payload), Some(_), None) => payload,
        _ => return Err(EnvelopeError::MalformedToken("A signed digest has exactly 3 segments".into())),
    };
    let claims = decode_json_segment(payload)?;
    serde_json::from_value::<DigestObject>(Value::Object(claims))
        .map_err(|e| EnvelopeError::EncodingError(format!("Token payload is not a digest object. {e}")))
}
