use chrono::Duration;
use cucumber::{gherkin::Step, given, then, when};
use payglocal_engine::{
    build_envelope,
    build_path_token,
    envelope::{decode_protected_header, decrypt_token, digest_of, segment_count, verify_signed_digest, SigningKey},
    EnvelopeError,
    GatewayError,
    GatewayOperation,
};
use serde_json::Value;

use crate::{
    cucumber::EnvelopeWorld,
    support::{decryption_key, verifying_key},
};

#[given(expr = "the payload")]
fn given_payload(world: &mut EnvelopeWorld, step: &Step) {
    let text = step.docstring.as_deref().expect("The payload step needs a docstring");
    world.payload = Some(serde_json::from_str(text).expect("Payload is not valid JSON"));
}

#[when(expr = "I build an envelope with a TTL of {int} ms")]
fn build(world: &mut EnvelopeWorld, ttl: i64) {
    let config = &world.config;
    let envelope = build_envelope(world.payload(), config.keys(), config.ids(), Duration::milliseconds(ttl))
        .expect("Error building envelope");
    world.envelope = Some(envelope);
}

#[when(expr = "I sign the path {string}")]
fn sign_path(world: &mut EnvelopeWorld, path: String) {
    let config = &world.config;
    let token = build_path_token(&path, &config.keys().signing_key, config.ids(), config.ttl()).expect("Error signing");
    world.path_token = Some(token);
}

#[when(expr = "I prepare a {word} request")]
fn prepare(world: &mut EnvelopeWorld, operation: String) {
    let operation = operation.parse::<GatewayOperation>().expect("Unknown operation");
    match world.config.prepare(operation, world.payload()) {
        Ok(request) => world.request = Some(request),
        Err(e) => world.error = Some(e),
    }
}

#[then(expr = "the encrypted token has {int} segments")]
fn encrypted_segments(world: &mut EnvelopeWorld, n: usize) {
    assert_eq!(segment_count(&world.envelope().encrypted_token), n);
}

#[then(expr = "the signed digest has {int} segments")]
fn signed_segments(world: &mut EnvelopeWorld, n: usize) {
    assert_eq!(segment_count(&world.envelope().signed_digest), n);
}

#[then(expr = "the encrypted token header field {string} is {string}")]
fn encrypted_header(world: &mut EnvelopeWorld, field: String, value: String) {
    let header = decode_protected_header(&world.envelope().encrypted_token).expect("Malformed token");
    assert_eq!(header.get(&field).and_then(Value::as_str), Some(value.as_str()));
}

#[then(expr = "the signed digest header field {string} is {string}")]
fn signed_header(world: &mut EnvelopeWorld, field: String, value: String) {
    let header = decode_protected_header(&world.envelope().signed_digest).expect("Malformed token");
    assert_eq!(header.get(&field).and_then(Value::as_str), Some(value.as_str()));
}

#[then(expr = "the encrypted token decrypts to the payload")]
fn decrypts(world: &mut EnvelopeWorld) {
    let (plaintext, _) = decrypt_token(&world.envelope().encrypted_token, &decryption_key()).expect("Decryption failed");
    let recovered = serde_json::from_slice::<Value>(&plaintext).expect("Plaintext is not JSON");
    assert_eq!(&recovered, world.payload());
}

#[then(expr = "the signed digest covers the encrypted token")]
fn digest_covers(world: &mut EnvelopeWorld) {
    let envelope = world.envelope();
    let verified = verify_signed_digest(&envelope.signed_digest, &verifying_key()).expect("Verification failed");
    assert_eq!(verified.digest.digest_algorithm, "SHA-256");
    assert!(verified.digest.covers(&envelope.encrypted_token));
}

#[then(expr = "both tokens expire {int} ms after they were issued")]
fn lifetimes(world: &mut EnvelopeWorld, ttl: i64) {
    let envelope = world.envelope();
    let header = decode_protected_header(&envelope.encrypted_token).expect("Malformed token");
    let number = |v: &Value| v.as_str().and_then(|s| s.parse::<i64>().ok()).expect("Not a numeric string");
    assert_eq!(number(&header["exp"]) - number(&header["iat"]), ttl);
    let verified = verify_signed_digest(&envelope.signed_digest, &verifying_key()).expect("Verification failed");
    assert_eq!(verified.digest.exp - verified.digest.issued_at().expect("iat is not a number"), ttl);
}

#[then(expr = "the path token digest is the SHA-256 of {string}")]
fn path_digest(world: &mut EnvelopeWorld, path: String) {
    let token = world.path_token.as_deref().expect("No path token");
    let verified = verify_signed_digest(token, &verifying_key()).expect("Verification failed");
    assert_eq!(verified.digest.digest, digest_of(&path));
}

#[then(expr = "loading the private key {string} fails with a key format error")]
fn bad_key(_world: &mut EnvelopeWorld, pem: String) {
    let err = SigningKey::from_pem(&pem).expect_err("Key should have been rejected");
    assert!(matches!(err, EnvelopeError::KeyFormatError(_)));
}

#[then(expr = "the request is a {word} to {string}")]
fn request_target(world: &mut EnvelopeWorld, method: String, url: String) {
    let request = world.request();
    assert_eq!(request.method.to_string(), method);
    assert_eq!(request.url.as_str(), url);
}

#[then(expr = "the request has a body")]
fn has_body(world: &mut EnvelopeWorld) {
    assert!(world.request().body.is_some());
}

#[then(expr = "the request has no body")]
fn has_no_body(world: &mut EnvelopeWorld) {
    assert!(world.request().body.is_none());
}

#[then(expr = "the request header {string} is {string}")]
fn request_header(world: &mut EnvelopeWorld, name: String, value: String) {
    assert_eq!(world.request().header(&name), Some(value.as_str()));
}

#[then(expr = "the request is rejected because {string} is missing")]
fn missing_field(world: &mut EnvelopeWorld, field: String) {
    match world.error.as_ref().expect("The request was not rejected") {
        GatewayError::ValidationError(e) => assert!(e.to_string().contains(&field), "{e}"),
        e => panic!("Unexpected error: {e}"),
    }
}
