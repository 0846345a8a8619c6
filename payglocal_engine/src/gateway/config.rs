use chrono::Duration;

use crate::{
    envelope::{default_ttl, EnvelopeKeys, KeyIds},
    gateway::GatewayEnvironment,
};

/// Everything needed to prepare authenticated requests for one merchant.
///
/// A `GatewayConfig` is immutable once built and can be shared between threads. Use [`GatewayConfig::new`] and the
/// `with_*` modifiers to construct one.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    ids: KeyIds,
    keys: EnvelopeKeys,
    ttl: Duration,
    environment: GatewayEnvironment,
    validate_payloads: bool,
}

impl GatewayConfig {
    pub fn new(ids: KeyIds, keys: EnvelopeKeys) -> Self {
        Self { ids, keys, ttl: default_ttl(), environment: GatewayEnvironment::default(), validate_payloads: true }
    }

    /// Token lifetime. A zero or negative duration selects the default of five minutes.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = if ttl > Duration::zero() { ttl } else { default_ttl() };
        self
    }

    pub fn with_environment(mut self, environment: GatewayEnvironment) -> Self {
        self.environment = environment;
        self
    }

    pub fn with_validation(mut self, validate_payloads: bool) -> Self {
        self.validate_payloads = validate_payloads;
        self
    }

    pub fn ids(&self) -> &KeyIds {
        &self.ids
    }

    pub fn keys(&self) -> &EnvelopeKeys {
        &self.keys
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn environment(&self) -> &GatewayEnvironment {
        &self.environment
    }

    pub fn validates_payloads(&self) -> bool {
        self.validate_payloads
    }
}
