//! Retry executor for ledger operations
//!
//! Bounded attempts with a fixed delay. Failures are classified by the
//! status code they carry: codes on the allow-list are retried, any other
//! code fails at once, and errors without a code are not touched.

use crate::metrics::RetryMetrics;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::future::Future;
use std::time::Duration;
use tonic::Code;
use tracing::{error, info, warn};

/// Retry configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Total attempts, counted from 1
    pub attempt_limit: u32,
    /// Delay between attempts
    pub delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            attempt_limit: 3,
            delay_ms: 2000, // 2 seconds
        }
    }
}

impl RetryConfig {
    /// Delay between attempts
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

/// Status codes treated as transient
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryableCodes {
    codes: Vec<Code>,
}

impl Default for RetryableCodes {
    fn default() -> Self {
        Self::new([
            // Participant initialization order can expose this briefly
            Code::Unimplemented,
            Code::Unavailable,
            Code::NotFound,
            Code::AlreadyExists,
            Code::FailedPrecondition,
            Code::DeadlineExceeded,
            Code::Aborted,
            Code::Unauthenticated,
            // Expired token
            Code::PermissionDenied,
        ])
    }
}

impl RetryableCodes {
    /// Allow-list of exactly `codes`
    pub fn new(codes: impl IntoIterator<Item = Code>) -> Self {
        Self {
            codes: codes.into_iter().collect(),
        }
    }

    /// Whether `code` is retryable
    pub fn contains(&self, code: Code) -> bool {
        self.codes.contains(&code)
    }
}

/// Errors that may carry a transport status code
pub trait StatusCode {
    /// The code, if this is a transport failure
    fn status_code(&self) -> Option<Code>;
}

impl StatusCode for crate::Error {
    fn status_code(&self) -> Option<Code> {
        crate::Error::status_code(self)
    }
}

impl StatusCode for tonic::Status {
    fn status_code(&self) -> Option<Code> {
        Some(self.code())
    }
}

/// Retry policy
#[derive(Debug, Clone, Default)]
pub struct RetryPolicy {
    config: RetryConfig,
    codes: RetryableCodes,
    metrics: Option<RetryMetrics>,
}

impl RetryPolicy {
    /// Policy with the default allow-list
    pub fn new(config: RetryConfig) -> Self {
        Self::with_codes(config, RetryableCodes::default())
    }

    /// Policy with a custom allow-list
    pub fn with_codes(config: RetryConfig, codes: RetryableCodes) -> Self {
        Self {
            config,
            codes,
            metrics: None,
        }
    }

    /// Count attempts, retries and failures in `metrics`
    pub fn with_metrics(mut self, metrics: RetryMetrics) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Configuration in use
    pub fn config(&self) -> &RetryConfig {
        &self.config
    }

    /// Run `operation` until it succeeds, fails fatally, or attempts run out
    ///
    /// On exhaustion the last failure is returned as is.
    pub async fn execute<F, Fut, T, E>(&self, operation: F, operation_name: &str) -> Result<T, E>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: StatusCode + Display,
    {
        let attempt_limit = self.config.attempt_limit.max(1);
        let mut attempt = 0;

        loop {
            attempt += 1;
            if let Some(metrics) = &self.metrics {
                metrics.record_attempt(operation_name);
            }

            let e = match operation().await {
                Ok(result) => {
                    if attempt > 1 {
                        info!(
                            "Operation {} succeeded on attempt {}/{}",
                            operation_name, attempt, attempt_limit
                        );
                    }
                    return Ok(result);
                }
                Err(e) => e,
            };

            let Some(code) = e.status_code() else {
                return Err(e);
            };

            if !self.codes.contains(code) {
                error!("Non-retryable error for {} ({:?}): {}", operation_name, code, e);
                self.record_failure(operation_name);
                return Err(e);
            }

            if attempt >= attempt_limit {
                info!(
                    "Limit on number of attempts ({}) exhausted for {}, not retrying",
                    attempt_limit, operation_name
                );
                self.record_failure(operation_name);
                return Err(e);
            }

            warn!(
                "Attempt {}/{} failed for {} ({:?}): {}, retrying after {:?}",
                attempt,
                attempt_limit,
                operation_name,
                code,
                e,
                self.config.delay()
            );
            if let Some(metrics) = &self.metrics {
                metrics.record_retry(operation_name);
            }

            tokio::time::sleep(self.config.delay()).await;
        }
    }

    fn record_failure(&self, operation_name: &str) {
        if let Some(metrics) = &self.metrics {
            metrics.record_failure(operation_name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;
    use tokio::time::Instant;

    fn policy() -> RetryPolicy {
        RetryPolicy::new(RetryConfig::default())
    }

    #[test]
    fn test_default_allow_list() {
        let codes = RetryableCodes::default();
        assert!(codes.contains(Code::Unavailable));
        assert!(codes.contains(Code::Unimplemented));
        assert!(codes.contains(Code::PermissionDenied));
        assert!(!codes.contains(Code::InvalidArgument));
        assert!(!codes.contains(Code::Internal));
    }

    #[tokio::test(start_paused = true)]
    async fn test_succeeds_after_two_retryable_failures() {
        let calls = Arc::new(AtomicU32::new(0));
        let start = Instant::now();

        let result = policy()
            .execute(
                || {
                    let calls = calls.clone();
                    async move {
                        match calls.fetch_add(1, Ordering::SeqCst) {
                            0 | 1 => Err(Error::from(tonic::Status::unavailable("starting"))),
                            _ => Ok("done"),
                        }
                    }
                },
                "test",
            )
            .await;

        assert_eq!(result.unwrap(), "done");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        // Two delays of two seconds each
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_secs(4) && elapsed < Duration::from_secs(6));
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhaustion_surfaces_last_error() {
        let calls = Arc::new(AtomicU32::new(0));

        let result: Result<(), Error> = policy()
            .execute(
                || {
                    let calls = calls.clone();
                    async move {
                        let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
                        Err(Error::from(tonic::Status::aborted(format!("attempt {}", n))))
                    }
                },
                "test",
            )
            .await;

        match result {
            Err(Error::Transport(status)) => {
                assert_eq!(status.code(), Code::Aborted);
                assert_eq!(status.message(), "attempt 3");
            }
            other => panic!("expected transport error, got {:?}", other),
        }
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_fatal_code_fails_without_delay() {
        let calls = Arc::new(AtomicU32::new(0));
        let start = Instant::now();

        let result: Result<(), Error> = policy()
            .execute(
                || {
                    let calls = calls.clone();
                    async move {
                        calls.fetch_add(1, Ordering::SeqCst);
                        Err(Error::from(tonic::Status::invalid_argument("bad")))
                    }
                },
                "test",
            )
            .await;

        assert_eq!(result.unwrap_err().status_code(), Some(Code::InvalidArgument));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(start.elapsed() < Duration::from_millis(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_non_transport_errors_propagate() {
        let calls = Arc::new(AtomicU32::new(0));

        let result: Result<(), Error> = policy()
            .execute(
                || {
                    let calls = calls.clone();
                    async move {
                        calls.fetch_add(1, Ordering::SeqCst);
                        Err(Error::UnsupportedArity(21))
                    }
                },
                "test",
            )
            .await;

        assert!(matches!(result, Err(Error::UnsupportedArity(21))));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_injected_allow_list() {
        let calls = Arc::new(AtomicU32::new(0));
        let config = RetryConfig {
            attempt_limit: 2,
            delay_ms: 10,
        };
        let policy = RetryPolicy::with_codes(config, RetryableCodes::new([Code::Internal]));

        let result: Result<(), tonic::Status> = policy
            .execute(
                || {
                    let calls = calls.clone();
                    async move {
                        calls.fetch_add(1, Ordering::SeqCst);
                        Err(tonic::Status::internal("flaky"))
                    }
                },
                "test",
            )
            .await;

        assert_eq!(result.unwrap_err().code(), Code::Internal);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_metrics_count_attempts() {
        let metrics = RetryMetrics::new().unwrap();
        let policy = policy().with_metrics(metrics.clone());
        let calls = Arc::new(AtomicU32::new(0));

        let _ = policy
            .execute(
                || {
                    let calls = calls.clone();
                    async move {
                        match calls.fetch_add(1, Ordering::SeqCst) {
                            0 => Err(Error::from(tonic::Status::unavailable("starting"))),
                            _ => Ok(()),
                        }
                    }
                },
                "submit",
            )
            .await;

        assert_eq!(metrics.attempts("submit"), 2);
        assert_eq!(metrics.retries("submit"), 1);
        assert_eq!(metrics.failures("submit"), 0);
    }
}
