//! # Resilience Module
//!
//! The two defensive layers between the batch executor and a strictly
//! rate-limited upstream.
//!
//! ## Key Components
//!
//! | Component | Description |
//! |-----------|-------------|
//! | [`rate_governor`] | Fixed-window request budget honoring server `Retry-After` signals |
//! | [`retry`] | Pure retry decision: exponential backoff with jitter, capped attempts |
//!
//! The governor is the only mutable state shared across workers; it is created
//! per batch run and discarded afterwards, so no budget leaks between command
//! invocations. The retry policy is a pure function of (classification,
//! attempt count) and is testable in isolation.

pub mod rate_governor;
pub mod retry;

pub use rate_governor::{RateGovernor, RateGovernorConfig};
pub use retry::{Decision, RetryConfig, RetryPolicy};
