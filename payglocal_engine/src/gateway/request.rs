use log::*;
use serde::Serialize;
use serde_json::Value;
use url::Url;

use crate::{
    envelope::{build_envelope, build_path_token},
    gateway::{GatewayConfig, GatewayError, GatewayOperation, HttpMethod},
    helpers::validate_payload,
};

pub const TOKEN_HEADER: &str = "x-gl-token-external";
pub const CONTENT_TYPE_HEADER: &str = "Content-Type";
pub const TOKEN_CONTENT_TYPE: &str = "text/plain";

/// A fully authenticated request, ready for whatever HTTP client the caller uses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GatewayRequest {
    #[serde(serialize_with = "serialize_method")]
    pub method: HttpMethod,
    pub url: Url,
    /// The encrypted token. `None` for reads.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    pub headers: Vec<(String, String)>,
}

fn serialize_method<S: serde::Serializer>(method: &HttpMethod, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(method)
}

impl GatewayRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.iter().find(|(k, _)| k.eq_ignore_ascii_case(name)).map(|(_, v)| v.as_str())
    }
}

impl GatewayConfig {
    /// Validate `payload` for `operation` and wrap it in the tokens the gateway expects.
    ///
    /// Writes get the encrypted payload as the body and the signed digest of that body in the token header. Reads
    /// (status checks) get only the token header, signed over the request path. Operations that address an existing
    /// transaction take its gid from the payload's `gid` field.
    pub fn prepare(&self, operation: GatewayOperation, payload: &Value) -> Result<GatewayRequest, GatewayError> {
        if self.validates_payloads() {
            validate_payload(payload, &operation.validation_rules())?;
        }
        let gid = gid_of(payload)?;
        let path = operation.path(gid.as_deref())?;
        let url = self.environment().url_for(&path)?;
        let request = if operation.signs_path() {
            let token = build_path_token(&path, &self.keys().signing_key, self.ids(), self.ttl())?;
            GatewayRequest { method: operation.method(), url, body: None, headers: vec![(TOKEN_HEADER.into(), token)] }
        } else {
            let envelope = build_envelope(payload, self.keys(), self.ids(), self.ttl())?;
            GatewayRequest {
                method: operation.method(),
                url,
                body: Some(envelope.encrypted_token),
                headers: vec![
                    (CONTENT_TYPE_HEADER.into(), TOKEN_CONTENT_TYPE.into()),
                    (TOKEN_HEADER.into(), envelope.signed_digest),
                ],
            }
        };
        info!("📦️ Prepared {} request: {} {}", operation, request.method, request.url);
        Ok(request)
    }

    /// Shortcut for a status check on `gid`.
    pub fn prepare_status(&self, gid: &str) -> Result<GatewayRequest, GatewayError> {
        self.prepare(GatewayOperation::Status, &serde_json::json!({ "gid": gid }))
    }
}

/// The payload's `gid`. Gateway ids are strings, but a bare number is accepted as its decimal text.
fn gid_of(payload: &Value) -> Result<Option<String>, GatewayError> {
    match payload.get("gid") {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(GatewayError::InvalidGid(format!("expected a string, found {other}"))),
    }
}
