use crate::error::TransportError;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;
use tokio::time::sleep;
use tracing::debug;

/// The network boundary. Non-2xx statuses, timeouts and unparseable bodies
/// all surface as [`TransportError`]. Implementations never retry.
#[async_trait]
pub trait Transport: Send + Sync {
    fn base_url(&self) -> &str;

    async fn get_json(&self, path: &str) -> Result<Value, TransportError>;

    async fn post_json(&self, path: &str, body: &Value) -> Result<Value, TransportError>;
}

pub struct HttpTransport {
    base_url: String,
    client: Client,
}

impl HttpTransport {
    pub fn new(base_url: &str, request_timeout: Duration) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(request_timeout)
            .build()
            .map_err(|e| TransportError::Network {
                path: String::new(),
                message: format!("building http client: {e}"),
            })?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn decode(path: &str, resp: reqwest::Response) -> Result<Value, TransportError> {
        let status = resp.status();
        if !status.is_success() {
            return Err(TransportError::Status {
                path: path.to_string(),
                status: status.as_u16(),
            });
        }
        let bytes = resp.bytes().await.map_err(|e| map_reqwest(path, e))?;
        serde_json::from_slice(&bytes).map_err(|e| TransportError::decode(path, e))
    }
}

fn map_reqwest(path: &str, e: reqwest::Error) -> TransportError {
    if e.is_timeout() {
        TransportError::Timeout {
            path: path.to_string(),
        }
    } else if let Some(status) = e.status() {
        TransportError::Status {
            path: path.to_string(),
            status: status.as_u16(),
        }
    } else {
        TransportError::Network {
            path: path.to_string(),
            message: e.to_string(),
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json(&self, path: &str) -> Result<Value, TransportError> {
        debug!("GET {}", self.url(path));
        let resp = self
            .client
            .get(self.url(path))
            .send()
            .await
            .map_err(|e| map_reqwest(path, e))?;
        Self::decode(path, resp).await
    }

    async fn post_json(&self, path: &str, body: &Value) -> Result<Value, TransportError> {
        debug!("POST {}", self.url(path));
        let resp = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(|e| map_reqwest(path, e))?;
        Self::decode(path, resp).await
    }
}

/// Scripted transport for tests and offline runs. Not a network client.
///
/// Each path answers with its configured response after its configured delay.
/// The response is captured when the call starts, so reconfiguring a route
/// does not affect calls already in flight.
#[derive(Default)]
pub struct InMemoryTransport {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    routes: HashMap<String, Result<Value, TransportError>>,
    delays: HashMap<String, Duration>,
    calls: HashMap<String, usize>,
    posted: Vec<(String, Value)>,
}

impl InMemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, path: &str, body: Value) {
        self.lock().routes.insert(path.to_string(), Ok(body));
    }

    pub fn fail(&self, path: &str, err: TransportError) {
        self.lock().routes.insert(path.to_string(), Err(err));
    }

    pub fn delay(&self, path: &str, by: Duration) {
        self.lock().delays.insert(path.to_string(), by);
    }

    pub fn clear_delays(&self) {
        self.lock().delays.clear();
    }

    pub fn calls(&self, path: &str) -> usize {
        self.lock().calls.get(path).copied().unwrap_or(0)
    }

    pub fn posted(&self) -> Vec<(String, Value)> {
        self.lock().posted.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    async fn answer(&self, path: &str) -> Result<Value, TransportError> {
        let (resp, delay) = {
            let mut inner = self.lock();
            *inner.calls.entry(path.to_string()).or_default() += 1;
            let resp = inner.routes.get(path).cloned().unwrap_or_else(|| {
                Err(TransportError::Status {
                    path: path.to_string(),
                    status: 404,
                })
            });
            (resp, inner.delays.get(path).copied())
        };
        if let Some(d) = delay {
            sleep(d).await;
        }
        resp
    }
}

#[async_trait]
impl Transport for InMemoryTransport {
    fn base_url(&self) -> &str {
        "memory://"
    }

    async fn get_json(&self, path: &str) -> Result<Value, TransportError> {
        self.answer(path).await
    }

    async fn post_json(&self, path: &str, body: &Value) -> Result<Value, TransportError> {
        self.lock().posted.push((path.to_string(), body.clone()));
        self.answer(path).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn unknown_route_is_404() {
        let t = InMemoryTransport::new();
        let err = t.get_json("/nope").await.unwrap_err();
        assert_eq!(
            err,
            TransportError::Status {
                path: "/nope".into(),
                status: 404
            }
        );
        assert_eq!(t.calls("/nope"), 1);
    }

    #[tokio::test]
    async fn post_records_body() {
        let t = InMemoryTransport::new();
        t.respond("/x", json!({"ok": true}));
        let v = t.post_json("/x", &json!({"a": 1})).await.unwrap();
        assert_eq!(v, json!({"ok": true}));
        assert_eq!(t.posted(), vec![("/x".to_string(), json!({"a": 1}))]);
    }

    #[test]
    fn http_transport_trims_trailing_slash() {
        let t = HttpTransport::new("http://localhost:8000/", Duration::from_secs(1)).unwrap();
        assert_eq!(t.base_url(), "http://localhost:8000");
        assert_eq!(t.url("/health"), "http://localhost:8000/health");
    }
}
