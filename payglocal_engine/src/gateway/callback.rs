//! Decoding of the `x-gl-token` the gateway posts to the merchant callback URL once a payment completes.
use log::*;
use serde_json::{Map, Value};
use thiserror::Error;
use url::Url;

use crate::envelope::segment_count;

/// The only status that means the customer paid.
pub const SUCCESS_STATUS: &str = "SENT_FOR_CAPTURE";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CallbackError {
    #[error("The callback token is empty")]
    EmptyToken,
    #[error("The callback token is not base64. {0}")]
    NotBase64(String),
    #[error("The callback token does not hold a JSON object. {0}")]
    NotJson(String),
    #[error("Invalid redirect URL. {0}")]
    InvalidRedirectUrl(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct CallbackToken {
    pub status: Option<String>,
    pub merchant_txn_id: Option<String>,
    pub gid: Option<String>,
    pub claims: Map<String, Value>,
}

impl CallbackToken {
    /// Decode a callback token. Both a bare base64 JSON document and a compact JWS are accepted. For a JWS, only the
    /// payload segment is decoded; the signature is **not** checked.
    pub fn decode(token: &str) -> Result<Self, CallbackError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(CallbackError::EmptyToken);
        }
        let bytes = if segment_count(token) == 3 {
            let payload = token.split('.').nth(1).unwrap_or_default();
            base64::decode_config(payload, base64::URL_SAFE_NO_PAD)
                .map_err(|e| CallbackError::NotBase64(e.to_string()))?
        } else {
            base64::decode(token)
                .or_else(|_| base64::decode_config(token, base64::URL_SAFE))
                .map_err(|e| CallbackError::NotBase64(e.to_string()))?
        };
        let claims = serde_json::from_slice::<Map<String, Value>>(&bytes)
            .map_err(|e| CallbackError::NotJson(e.to_string()))?;
        let text = |key: &str| claims.get(key).and_then(Value::as_str).filter(|s| !s.is_empty()).map(String::from);
        let status = text("status").or_else(|| text("txnStatus"));
        let merchant_txn_id = text("merchantTxnId");
        let gid = text("gid");
        debug!("📬️ Callback for {:?} / {:?} with status {:?}", merchant_txn_id, gid, status);
        Ok(Self { status, merchant_txn_id, gid, claims })
    }

    pub fn is_success(&self) -> bool {
        self.status.as_deref() == Some(SUCCESS_STATUS)
    }

    /// The page to send the customer to: `success_base` for a successful payment, `failure_base` otherwise, with
    /// `txnId` and `gid` query parameters appended.
    pub fn redirect_url(&self, success_base: &str, failure_base: &str) -> Result<Url, CallbackError> {
        let base = if self.is_success() { success_base } else { failure_base };
        let mut url = Url::parse(base).map_err(|e| CallbackError::InvalidRedirectUrl(format!("{base}: {e}")))?;
        url.query_pairs_mut()
            .append_pair("txnId", self.merchant_txn_id.as_deref().unwrap_or_default())
            .append_pair("gid", self.gid.as_deref().unwrap_or_default());
        Ok(url)
    }
}

#[cfg(test)]
mod test {
    use serde_json::json;

    use super::*;

    const SUCCESS_PAGE: &str = "https://shop.example/payment-success";
    const FAILURE_PAGE: &str = "https://shop.example/payment-failed";

    fn encode(value: &Value) -> String {
        base64::encode(value.to_string())
    }

    #[test]
    fn successful_callback() {
        let token = encode(&json!({"status": "SENT_FOR_CAPTURE", "merchantTxnId": "T1", "gid": "gl_1"}));
        let callback = CallbackToken::decode(&token).unwrap();
        assert!(callback.is_success());
        let url = callback.redirect_url(SUCCESS_PAGE, FAILURE_PAGE).unwrap();
        assert_eq!(url.as_str(), "https://shop.example/payment-success?txnId=T1&gid=gl_1");
    }

    #[test]
    fn txn_status_is_a_fallback() {
        let token = encode(&json!({"txnStatus": "SENT_FOR_CAPTURE", "merchantTxnId": "T2"}));
        let callback = CallbackToken::decode(&token).unwrap();
        assert_eq!(callback.status.as_deref(), Some("SENT_FOR_CAPTURE"));
        assert!(callback.gid.is_none());
    }

    #[test]
    fn anything_else_is_a_failure() {
        let token = encode(&json!({"status": "CUSTOMER_CANCELLED", "merchantTxnId": "T3", "gid": "gl_3"}));
        let callback = CallbackToken::decode(&token).unwrap();
        assert!(!callback.is_success());
        let url = callback.redirect_url(SUCCESS_PAGE, FAILURE_PAGE).unwrap();
        assert_eq!(url.as_str(), "https://shop.example/payment-failed?txnId=T3&gid=gl_3");
    }

    #[test]
    fn jws_payload_is_read() {
        let header = base64::encode_config(r#"{"alg":"RS256"}"#, base64::URL_SAFE_NO_PAD);
        let payload = base64::encode_config(
            json!({"status": "SENT_FOR_CAPTURE", "gid": "gl_4"}).to_string(),
            base64::URL_SAFE_NO_PAD,
        );
        let token = format!("{header}.{payload}.c2lnbmF0dXJl");
        let callback = CallbackToken::decode(&token).unwrap();
        assert!(callback.is_success());
        assert_eq!(callback.gid.as_deref(), Some("gl_4"));
    }

    #[test]
    fn garbage() {
        assert_eq!(CallbackToken::decode("  "), Err(CallbackError::EmptyToken));
        assert!(matches!(CallbackToken::decode("%%%"), Err(CallbackError::NotBase64(_))));
        assert!(matches!(CallbackToken::decode(&base64::encode("[1,2]")), Err(CallbackError::NotJson(_))));
        let callback = CallbackToken::decode(&encode(&json!({}))).unwrap();
        assert!(matches!(callback.redirect_url("not a url", "also not"), Err(CallbackError::InvalidRedirectUrl(_))));
    }
}
