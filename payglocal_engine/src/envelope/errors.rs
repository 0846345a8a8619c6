use payglocal_common::PemError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum EnvelopeError {
    #[error("Invalid key format. {0}")]
    KeyFormatError(String),
    #[error("Could not encode the token contents. {0}")]
    EncodingError(String),
    #[error("Could not encrypt the payload. {0}")]
    EncryptionError(String),
    #[error("Could not sign the digest. {0}")]
    SigningError(String),
    #[error("The token is not a valid compact serialization. {0}")]
    MalformedToken(String),
    #[error("Could not decrypt the token. {0}")]
    DecryptionError(String),
    #[error("The token signature could not be verified. {0}")]
    VerificationError(String),
}

impl From<PemError> for EnvelopeError {
    fn from(e: PemError) -> Self {
        Self::KeyFormatError(e.to_string())
    }
}
