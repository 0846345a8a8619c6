use cucumber::World;
use payglocal_engine::{Envelope, GatewayConfig, GatewayError, GatewayRequest};
use serde_json::Value;

use crate::support::{envelope_keys, key_ids};

#[derive(Debug, World)]
#[world(init = Self::new)]
pub struct EnvelopeWorld {
    pub config: GatewayConfig,
    pub payload: Option<Value>,
    pub envelope: Option<Envelope>,
    pub path_token: Option<String>,
    pub request: Option<GatewayRequest>,
    pub error: Option<GatewayError>,
}

impl EnvelopeWorld {
    pub fn new() -> Self {
        Self {
            config: GatewayConfig::new(key_ids(), envelope_keys()),
            payload: None,
            envelope: None,
            path_token: None,
            request: None,
            error: None,
        }
    }

    pub fn payload(&self) -> &Value {
        self.payload.as_ref().expect("No payload has been given")
    }

    pub fn envelope(&self) -> &Envelope {
        self.envelope.as_ref().expect("No envelope has been built")
    }

    pub fn request(&self) -> &GatewayRequest {
        self.request.as_ref().expect("No request has been prepared")
    }
}
