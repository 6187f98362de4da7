//! # Batch Execution Module
//!
//! The orchestrator at the heart of the crate: consumes an ordered sequence of
//! request descriptors, dispatches them through a bounded worker pool governed
//! by the rate budget and retry policy, and produces an order-preserving result
//! set.
//!
//! ## Key Components
//!
//! | Component | Description |
//! |-----------|-------------|
//! | [`BatchExecutor`] | Bounded worker pool over a shared descriptor queue |
//! | [`BatchOptions`] | Concurrency, retry, and rate-budget configuration |
//! | [`ResultSet`] | Order-preserving outcomes with failure/payload queries |
//! | [`Outcome`] | Terminal result recorded for one descriptor |
//!
//! ## Semantics
//!
//! - Exactly one [`Outcome`] per input descriptor, at the same index. Workers
//!   complete in arbitrary real-time order; only the final index alignment is
//!   guaranteed.
//! - Individual failures never abort the batch. Every descriptor runs to a
//!   terminal state (success or give-up) before `run` returns; partial failure
//!   is the normal, expected state. There is no global success/failure return —
//!   callers inspect the [`ResultSet`].
//! - Concurrency is bounded: at no point are more than the configured number of
//!   network calls in flight.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use ticketing_client::batch::{BatchExecutor, BatchOptions};
//! use ticketing_client::transport::{HttpTransport, HttpTransportConfig};
//! use ticketing_client::{Credential, RequestDescriptor};
//!
//! # async fn demo() -> ticketing_client::Result<()> {
//! let transport = HttpTransport::new(HttpTransportConfig::new("https://api.example.com"))?;
//! let executor = BatchExecutor::with_options(
//!     Arc::new(transport),
//!     BatchOptions::new().with_concurrency(10),
//! );
//!
//! let descriptors = vec![RequestDescriptor::get("/users/U1")];
//! let results = executor.run(descriptors, &Credential::new("token")).await?;
//! assert_eq!(results.len(), 1);
//! # Ok(())
//! # }
//! ```

mod executor;
mod result;

pub use executor::{BatchExecutor, BatchOptions};
pub use result::{ErrorKind, Outcome, ResultSet};
