use crate::transport::Disposition;
use rand::Rng;
use std::time::Duration;

/// Configuration for retry behavior.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Total tries per descriptor, including the first. A descriptor that keeps
    /// failing transiently terminates after exactly this many network calls.
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
    /// Random jitter on top of the backoff, to keep workers from
    /// resynchronizing after a shared rate-limit rejection.
    pub jitter: bool,
}

impl RetryConfig {
    pub fn new() -> Self {
        Self {
            max_attempts: 4,
            base_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(20),
            jitter: true,
        }
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn with_base_delay(mut self, base_delay: Duration) -> Self {
        self.base_delay = base_delay;
        self
    }

    pub fn with_max_delay(mut self, max_delay: Duration) -> Self {
        self.max_delay = max_delay;
        self
    }

    pub fn with_jitter(mut self, jitter: bool) -> Self {
        self.jitter = jitter;
        self
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// What to do after a failed attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Retry { delay: Duration },
    GiveUp,
}

/// Pure retry decision function: (classification, attempt count) in,
/// retry-or-give-up out. No clock, no shared state.
pub struct RetryPolicy {
    config: RetryConfig,
}

impl RetryPolicy {
    pub fn new(config: RetryConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RetryConfig {
        &self.config
    }

    /// Decide the next step after `attempt` tries have been made.
    ///
    /// Client errors give up immediately: the request itself is invalid and
    /// retrying cannot succeed. For a rate-limit rejection the server's hint
    /// floors the computed delay regardless of the backoff formula.
    pub fn decide(&self, disposition: &Disposition, attempt: u32) -> Decision {
        let retry_after = match disposition {
            Disposition::Success { .. } | Disposition::ClientError { .. } => {
                return Decision::GiveUp
            }
            Disposition::RateLimited { retry_after, .. } => *retry_after,
            Disposition::ServerError { .. } | Disposition::NetworkError { .. } => None,
        };

        if attempt >= self.config.max_attempts {
            return Decision::GiveUp;
        }

        let mut delay = self.backoff(attempt);
        if let Some(hint) = retry_after {
            if hint > delay {
                delay = hint;
            }
        }
        Decision::Retry { delay }
    }

    /// Exponential backoff: base doubling per attempt, capped, plus jitter.
    fn backoff(&self, attempt: u32) -> Duration {
        let base = self.config.base_delay.as_millis() as u64;
        let cap = self.config.max_delay.as_millis() as u64;

        // attempt is 1-based; the first retry waits the base delay.
        let exponent = attempt.saturating_sub(1).min(16);
        let mut delay = base.saturating_mul(1u64 << exponent);
        if delay > cap {
            delay = cap;
        }

        if self.config.jitter && delay > 0 {
            let spread = delay / 4;
            if spread > 0 {
                delay += rand::rng().random_range(0..=spread);
            }
        }

        Duration::from_millis(delay)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> RetryPolicy {
        RetryPolicy::new(RetryConfig::new().with_jitter(false))
    }

    fn server_error() -> Disposition {
        Disposition::ServerError {
            status: 503,
            message: "Service Unavailable".into(),
        }
    }

    #[test]
    fn test_client_error_gives_up_immediately() {
        let d = Disposition::ClientError {
            status: 404,
            message: "Not Found".into(),
        };
        assert_eq!(policy().decide(&d, 1), Decision::GiveUp);
    }

    #[test]
    fn test_backoff_doubles_per_attempt() {
        let p = policy();
        let first = match p.decide(&server_error(), 1) {
            Decision::Retry { delay } => delay,
            Decision::GiveUp => panic!("expected retry"),
        };
        let second = match p.decide(&server_error(), 2) {
            Decision::Retry { delay } => delay,
            Decision::GiveUp => panic!("expected retry"),
        };
        assert_eq!(first, Duration::from_millis(500));
        assert_eq!(second, Duration::from_millis(1000));
    }

    #[test]
    fn test_backoff_is_capped() {
        let p = RetryPolicy::new(
            RetryConfig::new()
                .with_jitter(false)
                .with_max_attempts(20)
                .with_max_delay(Duration::from_secs(2)),
        );
        match p.decide(&server_error(), 10) {
            Decision::Retry { delay } => assert_eq!(delay, Duration::from_secs(2)),
            Decision::GiveUp => panic!("expected retry"),
        }
    }

    #[test]
    fn test_gives_up_at_max_attempts() {
        let p = policy();
        assert!(matches!(p.decide(&server_error(), 3), Decision::Retry { .. }));
        assert_eq!(p.decide(&server_error(), 4), Decision::GiveUp);
        assert_eq!(p.decide(&server_error(), 5), Decision::GiveUp);
    }

    #[test]
    fn test_server_hint_floors_delay() {
        let d = Disposition::RateLimited {
            status: 429,
            retry_after: Some(Duration::from_secs(45)),
            message: "Too Many Requests".into(),
        };
        match policy().decide(&d, 1) {
            Decision::Retry { delay } => assert!(delay >= Duration::from_secs(45)),
            Decision::GiveUp => panic!("expected retry"),
        }
    }

    #[test]
    fn test_short_hint_does_not_lower_backoff() {
        let d = Disposition::RateLimited {
            status: 429,
            retry_after: Some(Duration::from_millis(1)),
            message: "Too Many Requests".into(),
        };
        match policy().decide(&d, 2) {
            Decision::Retry { delay } => assert_eq!(delay, Duration::from_millis(1000)),
            Decision::GiveUp => panic!("expected retry"),
        }
    }

    #[test]
    fn test_network_error_is_retryable() {
        let d = Disposition::NetworkError {
            message: "connection reset".into(),
        };
        assert!(matches!(policy().decide(&d, 1), Decision::Retry { .. }));
    }

    #[test]
    fn test_jitter_stays_within_spread() {
        let p = RetryPolicy::new(RetryConfig::new());
        for _ in 0..50 {
            match p.decide(&server_error(), 1) {
                Decision::Retry { delay } => {
                    assert!(delay >= Duration::from_millis(500));
                    assert!(delay <= Duration::from_millis(625));
                }
                Decision::GiveUp => panic!("expected retry"),
            }
        }
    }
}
