use super::{Disposition, Transport};
use crate::auth::Credential;
use crate::request::{Method, RequestDescriptor};
use crate::Result;
use async_trait::async_trait;
use reqwest::header::RETRY_AFTER;
use reqwest::StatusCode;
use std::time::Duration;
use tracing::debug;
use uuid::Uuid;

/// Configuration for the reqwest-backed transport.
#[derive(Debug, Clone)]
pub struct HttpTransportConfig {
    pub base_url: String,
    /// Per-request timeout; a stalled call classifies as a network error so it
    /// cannot starve the worker pool.
    pub request_timeout: Duration,
}

impl HttpTransportConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            request_timeout: Duration::from_secs(30),
        }
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(config: HttpTransportConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .pool_max_idle_per_host(32)
            .pool_idle_timeout(Some(Duration::from_secs(90)))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(
        &self,
        descriptor: &RequestDescriptor,
        credential: &Credential,
    ) -> Disposition {
        let url = format!("{}{}", self.base_url, descriptor.endpoint);

        let mut request = match descriptor.method {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
            Method::Put => self.client.put(&url),
            Method::Delete => self.client.delete(&url),
        };

        request = request.bearer_auth(credential.token());
        if !descriptor.params.is_empty() {
            request = request.query(&descriptor.params);
        }
        if let Some(body) = &descriptor.body {
            request = request.json(body);
        }

        // Correlation id for upstream log linkage; the server may ignore it.
        let request_id = Uuid::new_v4().to_string();
        request = request.header("x-request-id", &request_id);

        debug!(method = %descriptor.method, %url, %request_id, "dispatching request");

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                return Disposition::NetworkError {
                    message: e.to_string(),
                }
            }
        };

        classify(response).await
    }
}

/// Map a raw response onto the retry taxonomy.
async fn classify(response: reqwest::Response) -> Disposition {
    let status = response.status();

    if status.is_success() {
        let text = match response.text().await {
            Ok(text) => text,
            Err(e) => {
                return Disposition::NetworkError {
                    message: format!("failed to read response body: {e}"),
                }
            }
        };
        if text.trim().is_empty() {
            return Disposition::Success {
                status: status.as_u16(),
                body: serde_json::Value::Null,
            };
        }
        return match serde_json::from_str(&text) {
            Ok(body) => Disposition::Success {
                status: status.as_u16(),
                body,
            },
            // The upstream broke its own wire contract; treat as transient.
            Err(e) => Disposition::ServerError {
                status: status.as_u16(),
                message: format!("undecodable response body: {e}"),
            },
        };
    }

    if status == StatusCode::TOO_MANY_REQUESTS {
        let retry_after = response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.trim().parse::<u64>().ok())
            .map(Duration::from_secs);
        return Disposition::RateLimited {
            status: status.as_u16(),
            retry_after,
            message: error_message(status, response).await,
        };
    }

    if status.is_server_error() {
        return Disposition::ServerError {
            status: status.as_u16(),
            message: error_message(status, response).await,
        };
    }

    Disposition::ClientError {
        status: status.as_u16(),
        message: error_message(status, response).await,
    }
}

/// Pull the upstream error envelope's message when present, otherwise fall back
/// to the canonical reason phrase.
async fn error_message(status: StatusCode, response: reqwest::Response) -> String {
    let fallback = status
        .canonical_reason()
        .unwrap_or("unknown status")
        .to_string();

    match response.json::<serde_json::Value>().await {
        Ok(body) => body
            .get("error")
            .and_then(|e| e.get("message"))
            .and_then(|m| m.as_str())
            .map(str::to_string)
            .unwrap_or(fallback),
        Err(_) => fallback,
    }
}
