use crate::{Error, Result};
use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// Failure classification carried in a terminal outcome.
///
/// A retry-exhausted descriptor keeps the *last observed* classification; the
/// exhaustion itself is visible through [`Outcome::Failure`]'s attempt count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    RateLimited,
    Server,
    Client,
    Network,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorKind::RateLimited => "rate limited",
            ErrorKind::Server => "server error",
            ErrorKind::Client => "client error",
            ErrorKind::Network => "network error",
        };
        f.write_str(s)
    }
}

/// Terminal result recorded for one descriptor.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Success {
        status: u16,
        body: Value,
    },
    Failure {
        /// Absent when no HTTP status was obtained (network failure).
        status: Option<u16>,
        kind: ErrorKind,
        message: String,
        /// Number of network calls made before giving up.
        attempts: u32,
    },
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success { .. })
    }

    pub fn is_failure(&self) -> bool {
        !self.is_success()
    }
}

/// The aggregated, order-preserving output of one batch run.
///
/// Immutable after construction. Outcome `i` always corresponds to input
/// descriptor `i`; callers map indices back to their domain objects to report
/// which user or service a failure belongs to.
#[derive(Debug)]
pub struct ResultSet {
    outcomes: Vec<Outcome>,
}

impl ResultSet {
    pub(crate) fn new(outcomes: Vec<Outcome>) -> Self {
        Self { outcomes }
    }

    pub fn outcomes(&self) -> &[Outcome] {
        &self.outcomes
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Indices whose terminal outcome is a failure, ascending.
    pub fn failed_indices(&self) -> Vec<usize> {
        self.outcomes
            .iter()
            .enumerate()
            .filter(|(_, o)| o.is_failure())
            .map(|(i, _)| i)
            .collect()
    }

    /// Successful payloads in original order, failures skipped.
    pub fn successful_payloads(&self) -> Vec<&Value> {
        self.outcomes
            .iter()
            .filter_map(|o| match o {
                Outcome::Success { body, .. } => Some(body),
                Outcome::Failure { .. } => None,
            })
            .collect()
    }

    /// Human-readable error for a failed index.
    ///
    /// Errors if `index` is out of range or did not fail — asking for the
    /// error of a success is a programming mistake, not a batch condition.
    pub fn formatted_error(&self, index: usize) -> Result<String> {
        match self.outcomes.get(index) {
            Some(Outcome::Failure {
                status,
                kind,
                message,
                attempts,
            }) => {
                let noun = if *attempts == 1 { "attempt" } else { "attempts" };
                Ok(match status {
                    Some(code) => {
                        format!("HTTP {code} ({kind}): {message} (after {attempts} {noun})")
                    }
                    None => format!("{kind}: {message} (after {attempts} {noun})"),
                })
            }
            _ => Err(Error::NotAFailure { index }),
        }
    }

    pub fn success_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    pub fn failure_count(&self) -> usize {
        self.outcomes.len() - self.success_count()
    }

    pub fn all_succeeded(&self) -> bool {
        self.failure_count() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> ResultSet {
        ResultSet::new(vec![
            Outcome::Success {
                status: 200,
                body: json!({"user": {"id": "U1"}}),
            },
            Outcome::Failure {
                status: Some(404),
                kind: ErrorKind::Client,
                message: "Not Found".into(),
                attempts: 1,
            },
            Outcome::Success {
                status: 200,
                body: json!({"user": {"id": "U3"}}),
            },
            Outcome::Failure {
                status: None,
                kind: ErrorKind::Network,
                message: "connection timed out".into(),
                attempts: 4,
            },
        ])
    }

    #[test]
    fn test_failed_indices_ascending() {
        assert_eq!(sample().failed_indices(), vec![1, 3]);
    }

    #[test]
    fn test_successful_payloads_preserve_order() {
        let set = sample();
        let payloads = set.successful_payloads();
        assert_eq!(payloads.len(), 2);
        assert_eq!(payloads[0]["user"]["id"], "U1");
        assert_eq!(payloads[1]["user"]["id"], "U3");
    }

    #[test]
    fn test_formatted_error_includes_status_kind_message() {
        let text = sample().formatted_error(1).unwrap();
        assert!(text.contains("404"));
        assert!(text.contains("client error"));
        assert!(text.contains("Not Found"));
        assert!(text.contains("1 attempt"));
    }

    #[test]
    fn test_formatted_error_without_status() {
        let text = sample().formatted_error(3).unwrap();
        assert!(text.starts_with("network error"));
        assert!(text.contains("4 attempts"));
    }

    #[test]
    fn test_formatted_error_rejects_success_index() {
        assert!(matches!(
            sample().formatted_error(0),
            Err(Error::NotAFailure { index: 0 })
        ));
    }

    #[test]
    fn test_formatted_error_rejects_out_of_range() {
        assert!(sample().formatted_error(99).is_err());
    }

    #[test]
    fn test_counts() {
        let set = sample();
        assert_eq!(set.len(), 4);
        assert_eq!(set.success_count(), 2);
        assert_eq!(set.failure_count(), 2);
        assert!(!set.all_succeeded());
    }
}
