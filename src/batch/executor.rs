use super::result::{ErrorKind, Outcome, ResultSet};
use crate::auth::Credential;
use crate::progress::{noop_sink, ProgressSink};
use crate::request::RequestDescriptor;
use crate::resilience::{Decision, RateGovernor, RateGovernorConfig, RetryConfig, RetryPolicy};
use crate::transport::{Disposition, Transport};
use crate::{Error, Result};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Options for one batch run.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Worker pool size. Tuned so that worker count times typical request
    /// latency stays under the rate ceiling.
    pub concurrency: usize,
    pub retry: RetryConfig,
    pub rate: RateGovernorConfig,
    /// Human-readable activity description for progress reporting.
    pub description: Option<String>,
}

impl BatchOptions {
    pub fn new() -> Self {
        Self {
            concurrency: 10,
            retry: RetryConfig::default(),
            rate: RateGovernorConfig::default(),
            description: None,
        }
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_rate(mut self, rate: RateGovernorConfig) -> Self {
        self.rate = rate;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Dispatches an ordered sequence of descriptors through a bounded worker pool.
///
/// Workers share one queue (an atomic cursor over the descriptor slice) and one
/// pre-sized outcome slot array; each index is written exactly once. The rate
/// governor and retry policy are created per run and discarded with it.
pub struct BatchExecutor {
    transport: Arc<dyn Transport>,
    options: BatchOptions,
    progress: Arc<dyn ProgressSink>,
}

impl BatchExecutor {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            options: BatchOptions::default(),
            progress: noop_sink(),
        }
    }

    pub fn with_options(transport: Arc<dyn Transport>, options: BatchOptions) -> Self {
        Self {
            transport,
            options,
            progress: noop_sink(),
        }
    }

    pub fn with_progress(mut self, progress: Arc<dyn ProgressSink>) -> Self {
        self.progress = progress;
        self
    }

    pub fn options(&self) -> &BatchOptions {
        &self.options
    }

    /// Run every descriptor to a terminal outcome.
    ///
    /// Never aborts on individual failures; the only error conditions are
    /// structural (an empty batch, a descriptor with an empty endpoint).
    pub async fn run(
        &self,
        descriptors: Vec<RequestDescriptor>,
        credential: &Credential,
    ) -> Result<ResultSet> {
        if descriptors.is_empty() {
            return Err(Error::invalid_batch("empty descriptor list"));
        }
        if let Some(i) = descriptors.iter().position(|d| d.endpoint.is_empty()) {
            return Err(Error::invalid_batch(format!(
                "descriptor {i} has an empty endpoint"
            )));
        }

        let total = descriptors.len();
        let description = self
            .options
            .description
            .clone()
            .unwrap_or_else(|| format!("executing {total} requests"));
        info!(total, concurrency = self.options.concurrency, "{description}");
        self.progress.begin(&description, total);

        let descriptors = Arc::new(descriptors);
        let governor = Arc::new(RateGovernor::new(self.options.rate.clone()));
        let policy = Arc::new(RetryPolicy::new(self.options.retry.clone()));
        let cursor = Arc::new(AtomicUsize::new(0));
        let completed = Arc::new(AtomicUsize::new(0));
        let (tx, mut rx) = mpsc::unbounded_channel::<(usize, Outcome)>();

        let workers = self.options.concurrency.max(1).min(total);
        let mut handles = Vec::with_capacity(workers);
        for _ in 0..workers {
            let descriptors = Arc::clone(&descriptors);
            let transport = Arc::clone(&self.transport);
            let governor = Arc::clone(&governor);
            let policy = Arc::clone(&policy);
            let cursor = Arc::clone(&cursor);
            let completed = Arc::clone(&completed);
            let progress = Arc::clone(&self.progress);
            let credential = credential.clone();
            let tx = tx.clone();

            handles.push(tokio::spawn(async move {
                loop {
                    let index = cursor.fetch_add(1, Ordering::SeqCst);
                    if index >= descriptors.len() {
                        break;
                    }
                    let outcome = run_one(
                        &descriptors[index],
                        index,
                        &credential,
                        transport.as_ref(),
                        &governor,
                        &policy,
                    )
                    .await;
                    if tx.send((index, outcome)).is_err() {
                        break;
                    }
                    let done = completed.fetch_add(1, Ordering::SeqCst) + 1;
                    progress.update(done, descriptors.len());
                }
            }));
        }
        drop(tx);

        // One slot per descriptor; workers never produce the same index twice.
        let mut slots: Vec<Option<Outcome>> = (0..total).map(|_| None).collect();
        while let Some((index, outcome)) = rx.recv().await {
            slots[index] = Some(outcome);
        }

        for handle in handles {
            handle.await.map_err(|e| Error::Worker {
                message: e.to_string(),
            })?;
        }

        let outcomes = slots
            .into_iter()
            .enumerate()
            .map(|(i, slot)| {
                slot.ok_or_else(|| Error::Worker {
                    message: format!("no outcome recorded for descriptor {i}"),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        self.progress.finish(total);
        Ok(ResultSet::new(outcomes))
    }
}

/// Drive a single descriptor to its terminal outcome:
/// Pending -> Dispatched -> {Succeeded | RetryScheduled -> Dispatched | Failed}.
async fn run_one(
    descriptor: &RequestDescriptor,
    index: usize,
    credential: &Credential,
    transport: &dyn Transport,
    governor: &RateGovernor,
    policy: &RetryPolicy,
) -> Outcome {
    let mut attempts = 0u32;
    loop {
        attempts += 1;

        loop {
            let wait = governor.reserve().await;
            if wait.is_zero() {
                break;
            }
            debug!(index, wait_ms = wait.as_millis() as u64, "holding for rate budget");
            tokio::time::sleep(wait).await;
        }

        match transport.execute(descriptor, credential).await {
            Disposition::Success { status, body } => {
                debug!(index, status, attempts, "request succeeded");
                return Outcome::Success { status, body };
            }
            failed => {
                // The server's rate signal outranks our local estimate; feed it
                // to the governor so every worker backs off, not just this one.
                if let Some(hint) = failed.retry_after() {
                    governor.apply_retry_after(hint).await;
                }

                match policy.decide(&failed, attempts) {
                    Decision::Retry { delay } => {
                        debug!(
                            index,
                            attempts,
                            delay_ms = delay.as_millis() as u64,
                            status = failed.status(),
                            "retry scheduled"
                        );
                        tokio::time::sleep(delay).await;
                    }
                    Decision::GiveUp => {
                        warn!(index, attempts, status = failed.status(), "request failed terminally");
                        return terminal_failure(failed, attempts);
                    }
                }
            }
        }
    }
}

fn terminal_failure(disposition: Disposition, attempts: u32) -> Outcome {
    match disposition {
        // Unreachable in practice: successes return before the policy runs.
        Disposition::Success { status, body } => Outcome::Success { status, body },
        Disposition::RateLimited {
            status, message, ..
        } => Outcome::Failure {
            status: Some(status),
            kind: ErrorKind::RateLimited,
            message,
            attempts,
        },
        Disposition::ServerError { status, message } => Outcome::Failure {
            status: Some(status),
            kind: ErrorKind::Server,
            message,
            attempts,
        },
        Disposition::ClientError { status, message } => Outcome::Failure {
            status: Some(status),
            kind: ErrorKind::Client,
            message,
            attempts,
        },
        Disposition::NetworkError { message } => Outcome::Failure {
            status: None,
            kind: ErrorKind::Network,
            message,
            attempts,
        },
    }
}
