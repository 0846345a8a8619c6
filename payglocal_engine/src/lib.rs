//! PayGlocal Engine
//!
//! Builds the authenticated requests a merchant backend sends to the PayGlocal payment gateway. The gateway never sees
//! a plain JSON body: every payload is encrypted to the gateway's public key and accompanied by a signed digest of the
//! ciphertext, so the gateway can check who sent the request and that it was not altered before decrypting it.
//!
//! The library is divided into three sections:
//! 1. The token envelope ([`mod@envelope`]). Key parsing, construction of the encrypted token and signed digest, and the
//!    receiving-side operations (decrypt, verify) used to check them.
//! 2. Gateway request preparation ([`mod@gateway`]). Environments, operations and their endpoints, the merchant
//!    [`GatewayConfig`], and decoding of the callback token the gateway posts back after a payment.
//! 3. Helpers ([`mod@helpers`]). Payload validation rules and tolerant extraction of fields from gateway responses.
//!
//! There is no HTTP client here. [`GatewayConfig::prepare`] returns a [`GatewayRequest`] and the caller sends it with
//! whatever client it already uses.
pub mod envelope;
pub mod gateway;
pub mod helpers;

pub use envelope::{build_envelope, build_path_token, Envelope, EnvelopeError, EnvelopeKeys, KeyIds};
pub use gateway::{
    CallbackToken,
    GatewayConfig,
    GatewayEnvironment,
    GatewayError,
    GatewayOperation,
    GatewayRequest,
    HttpMethod,
};
