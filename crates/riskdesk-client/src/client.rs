use crate::error::TransportError;
use crate::transport::Transport;
use riskdesk_core::{Domain, HealthCheck};
use serde::de::DeserializeOwned;
use std::marker::PhantomData;
use std::sync::Arc;

/// Typed reader for one domain endpoint. A single GET per call, no retries.
pub struct DomainClient<T> {
    domain: Domain,
    transport: Arc<dyn Transport>,
    _payload: PhantomData<fn() -> T>,
}

impl<T: DeserializeOwned> DomainClient<T> {
    pub fn new(domain: Domain, transport: Arc<dyn Transport>) -> Self {
        Self {
            domain,
            transport,
            _payload: PhantomData,
        }
    }

    pub fn domain(&self) -> Domain {
        self.domain
    }

    pub async fn fetch(&self) -> Result<T, TransportError> {
        let path = self.domain.path();
        let body = self.transport.get_json(path).await?;
        serde_json::from_value(body).map_err(|e| TransportError::decode(path, e))
    }
}

pub async fn check_health(transport: &dyn Transport) -> Result<HealthCheck, TransportError> {
    let body = transport.get_json("/health").await?;
    serde_json::from_value(body).map_err(|e| TransportError::decode("/health", e))
}
