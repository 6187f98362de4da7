use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

/// Configuration for the fixed-window request budget.
#[derive(Debug, Clone)]
pub struct RateGovernorConfig {
    /// Maximum requests per window. The upstream ceiling is subject to change,
    /// so this is configuration rather than a constant.
    pub ceiling: u32,
    pub window: Duration,
}

impl RateGovernorConfig {
    pub fn new() -> Self {
        Self {
            ceiling: 900,
            window: Duration::from_secs(60),
        }
    }

    pub fn with_ceiling(mut self, ceiling: u32) -> Self {
        self.ceiling = ceiling;
        self
    }

    pub fn with_window(mut self, window: Duration) -> Self {
        self.window = window;
        self
    }
}

impl Default for RateGovernorConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug)]
struct WindowState {
    window_start: Instant,
    issued: u32,
    /// Absolute cool-down deadline raised by server 429 signals.
    cooldown_until: Option<Instant>,
}

/// Tracks remaining capacity against the upstream rate limit.
///
/// The governor never errors; it only ever delays. It is the single piece of
/// mutable state shared across batch workers, guarded by one mutex with one
/// critical section per reservation or update. Lifecycle is per batch run —
/// nothing persists across invocations.
pub struct RateGovernor {
    cfg: RateGovernorConfig,
    state: Mutex<WindowState>,
}

impl RateGovernor {
    pub fn new(cfg: RateGovernorConfig) -> Self {
        let state = Mutex::new(WindowState {
            window_start: Instant::now(),
            issued: 0,
            cooldown_until: None,
        });
        Self { cfg, state }
    }

    /// Ask how long the caller must wait before it is safe to dispatch.
    ///
    /// A zero return means a slot was consumed from the current window and the
    /// caller may issue the request now. A nonzero return consumes nothing; the
    /// caller sleeps that long and asks again.
    pub async fn reserve(&self) -> Duration {
        let mut st = self.state.lock().await;
        let now = Instant::now();

        if let Some(until) = st.cooldown_until {
            if until > now {
                return until.duration_since(now);
            }
            st.cooldown_until = None;
        }

        if now.duration_since(st.window_start) >= self.cfg.window {
            st.window_start = now;
            st.issued = 0;
        }

        if st.issued < self.cfg.ceiling {
            st.issued += 1;
            return Duration::ZERO;
        }

        // Window exhausted: wait out the remainder.
        self.cfg.window - now.duration_since(st.window_start)
    }

    /// Raise the cool-down to at least the server-advertised hint.
    ///
    /// The server's signal is authoritative: it always overrides the governor's
    /// own estimate, but never shortens an already-longer cool-down.
    pub async fn apply_retry_after(&self, hint: Duration) {
        let mut st = self.state.lock().await;
        let until = Instant::now() + hint;
        st.cooldown_until = Some(match st.cooldown_until {
            Some(current) if current > until => current,
            _ => until,
        });
    }
}
