//! Metrics collection for observability
//!
//! Prometheus counters for the retry executor, labelled by operation.
//!
//! # Metrics
//!
//! - `ledger_client_attempts_total` - Calls made, including retries
//! - `ledger_client_retries_total` - Retryable failures followed by another attempt
//! - `ledger_client_failures_total` - Operations that gave up, fatally or on exhaustion

use prometheus::{IntCounterVec, Opts, Registry};
use std::fmt;
use std::sync::Arc;

/// Retry metrics collector
#[derive(Clone)]
pub struct RetryMetrics {
    /// Attempts per operation
    pub attempts_total: IntCounterVec,

    /// Retries per operation
    pub retries_total: IntCounterVec,

    /// Final failures per operation
    pub failures_total: IntCounterVec,

    /// Prometheus registry
    pub registry: Arc<Registry>,
}

impl RetryMetrics {
    /// Create new collector with its own registry
    pub fn new() -> prometheus::Result<Self> {
        let registry = Arc::new(Registry::new());

        let attempts_total = counter_vec(
            &registry,
            "ledger_client_attempts_total",
            "Total number of ledger call attempts",
        )?;
        let retries_total = counter_vec(
            &registry,
            "ledger_client_retries_total",
            "Total number of retried ledger calls",
        )?;
        let failures_total = counter_vec(
            &registry,
            "ledger_client_failures_total",
            "Total number of failed ledger operations",
        )?;

        Ok(Self {
            attempts_total,
            retries_total,
            failures_total,
            registry,
        })
    }

    /// Record a call attempt
    pub fn record_attempt(&self, operation: &str) {
        self.attempts_total.with_label_values(&[operation]).inc();
    }

    /// Record a retry
    pub fn record_retry(&self, operation: &str) {
        self.retries_total.with_label_values(&[operation]).inc();
    }

    /// Record a final failure
    pub fn record_failure(&self, operation: &str) {
        self.failures_total.with_label_values(&[operation]).inc();
    }

    /// Attempts recorded for `operation`
    pub fn attempts(&self, operation: &str) -> u64 {
        self.attempts_total.with_label_values(&[operation]).get()
    }

    /// Retries recorded for `operation`
    pub fn retries(&self, operation: &str) -> u64 {
        self.retries_total.with_label_values(&[operation]).get()
    }

    /// Failures recorded for `operation`
    pub fn failures(&self, operation: &str) -> u64 {
        self.failures_total.with_label_values(&[operation]).get()
    }

    /// Get metrics registry
    pub fn registry(&self) -> &Registry {
        &self.registry
    }
}

impl fmt::Debug for RetryMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetryMetrics").finish_non_exhaustive()
    }
}

fn counter_vec(registry: &Registry, name: &str, help: &str) -> prometheus::Result<IntCounterVec> {
    let counter = IntCounterVec::new(Opts::new(name, help), &["operation"])?;
    registry.register(Box::new(counter.clone()))?;
    Ok(counter)
}
