//! # ticketing-client
//!
//! Core runtime for a command-line client of a remote ticketing/incident-management
//! REST API. The heart of the crate is the batched request executor: it takes a
//! large, variable-size set of independent HTTP requests ("set one attribute on
//! 500 users"), dispatches them through a bounded worker pool against a strictly
//! rate-limited upstream, retries transient failures, and reports per-request
//! success or failure without ever aborting the whole batch.
//!
//! ## Overview
//!
//! Callers describe each planned call as an immutable [`RequestDescriptor`] and
//! hand the ordered sequence to a [`BatchExecutor`]. The executor drives a fixed
//! pool of workers over a shared queue; every dispatch first clears the
//! [`resilience::RateGovernor`] (which enforces the upstream request ceiling and
//! honors server `Retry-After` signals), then goes through the
//! [`transport::Transport`] seam, and failed attempts are re-dispatched per the
//! [`resilience::RetryPolicy`]. The result is an order-preserving [`ResultSet`]:
//! exactly one [`Outcome`] per input descriptor, at the same index.
//!
//! Partial failure is the normal, expected state — the executor always runs every
//! descriptor to a terminal outcome and callers inspect the [`ResultSet`] to
//! decide how strict to be.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use ticketing_client::{
//!     BatchExecutor, Credential, RequestDescriptor,
//!     transport::{HttpTransport, HttpTransportConfig},
//! };
//!
//! #[tokio::main]
//! async fn main() -> ticketing_client::Result<()> {
//!     let credential = Credential::load("api")?;
//!     let transport = HttpTransport::new(HttpTransportConfig::new("https://api.example.com"))?;
//!
//!     let descriptors: Vec<RequestDescriptor> = (0..3)
//!         .map(|n| RequestDescriptor::get(format!("/users/U{n}")))
//!         .collect();
//!
//!     let results = BatchExecutor::new(Arc::new(transport))
//!         .run(descriptors, &credential)
//!         .await?;
//!
//!     for index in results.failed_indices() {
//!         eprintln!("request {index} failed: {}", results.formatted_error(index)?);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`request`] | Immutable request descriptors (method, path, params, body) |
//! | [`transport`] | HTTP execution and response classification |
//! | [`resilience`] | Rate governor and retry policy |
//! | [`batch`] | Bounded-concurrency batch executor and result set |
//! | [`auth`] | Credential loading (keyring, environment) |
//! | [`progress`] | Optional coarse-grained progress reporting |

pub mod auth;
pub mod batch;
pub mod progress;
pub mod request;
pub mod resilience;
pub mod transport;

// Re-export main types for convenience
pub use auth::Credential;
pub use batch::{BatchExecutor, BatchOptions, ErrorKind, Outcome, ResultSet};
pub use progress::{noop_sink, NoopProgressSink, ProgressSink};
pub use request::{Method, RequestDescriptor};
pub use resilience::{RateGovernor, RateGovernorConfig, RetryConfig, RetryPolicy};
pub use transport::{Disposition, HttpTransport, HttpTransportConfig, Transport};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::Error;
