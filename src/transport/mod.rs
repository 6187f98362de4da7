//! # HTTP Transport Module
//!
//! Performs exactly one network call per invocation and classifies the raw
//! response into a [`Disposition`]. The classification is the sole input to the
//! retry policy — the transport itself never retries and never mutates shared
//! state.
//!
//! ## Key Components
//!
//! | Component | Description |
//! |-----------|-------------|
//! | [`Transport`] | Trait seam between the executor and the network |
//! | [`Disposition`] | Classified result of a single call |
//! | [`HttpTransport`] | reqwest-backed production implementation |

mod http;

pub use http::{HttpTransport, HttpTransportConfig};

use crate::auth::Credential;
use crate::request::RequestDescriptor;
use async_trait::async_trait;
use std::time::Duration;

/// Classified result of one network call.
#[derive(Debug, Clone)]
pub enum Disposition {
    /// 2xx with the payload decoded (an empty body decodes to `Null`).
    Success { status: u16, body: serde_json::Value },
    /// 429, carrying the server's retry hint when one was advertised.
    RateLimited {
        status: u16,
        retry_after: Option<Duration>,
        message: String,
    },
    /// 5xx — transient, retryable.
    ServerError { status: u16, message: String },
    /// Any other 4xx — the request itself is invalid; retrying cannot succeed.
    ClientError { status: u16, message: String },
    /// Connection or timeout failure before a status was obtained — retryable.
    NetworkError { message: String },
}

impl Disposition {
    pub fn status(&self) -> Option<u16> {
        match self {
            Disposition::Success { status, .. }
            | Disposition::RateLimited { status, .. }
            | Disposition::ServerError { status, .. }
            | Disposition::ClientError { status, .. } => Some(*status),
            Disposition::NetworkError { .. } => None,
        }
    }

    /// Server-advertised retry hint, if this was a rate-limit rejection.
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            Disposition::RateLimited { retry_after, .. } => *retry_after,
            _ => None,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Disposition::Success { .. })
    }
}

/// Seam between the batch executor and the network.
///
/// Implementations perform a single call with a per-request timeout and
/// classify everything — including transport-level failures — into a
/// [`Disposition`]; they never return an error.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(
        &self,
        descriptor: &RequestDescriptor,
        credential: &Credential,
    ) -> Disposition;
}
