//! Per-locale translation counters.
//!
//! One `TranslationMetrics` is created for each locale of a run, so counts
//! never bleed between locales. Counters are atomic so a parallel pipeline
//! could share one instance.

use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Debug, Default)]
pub struct TranslationMetrics {
    /// Outbound provider calls (every attempt counts)
    api_calls: AtomicUsize,

    /// Provider calls that returned an error or timed out
    api_failures: AtomicUsize,

    /// Leaves left in the source language after retries ran out
    soft_failures: AtomicUsize,

    /// Translations whose placeholders or markup differ from the source
    placeholder_mismatches: AtomicUsize,
}

impl TranslationMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_api_call(&self) {
        self.api_calls.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_api_failure(&self) {
        self.api_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_soft_failure(&self) {
        self.soft_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_placeholder_mismatch(&self) {
        self.placeholder_mismatches.fetch_add(1, Ordering::Relaxed);
    }

    pub fn api_calls(&self) -> usize {
        self.api_calls.load(Ordering::Relaxed)
    }

    pub fn api_failures(&self) -> usize {
        self.api_failures.load(Ordering::Relaxed)
    }

    pub fn soft_failures(&self) -> usize {
        self.soft_failures.load(Ordering::Relaxed)
    }

    pub fn placeholder_mismatches(&self) -> usize {
        self.placeholder_mismatches.load(Ordering::Relaxed)
    }

    /// Snapshot of the counters.
    pub fn report(&self) -> MetricsReport {
        let calls = self.api_calls();
        let failures = self.api_failures();
        let api_success_rate = if calls > 0 {
            (calls.saturating_sub(failures) as f64 / calls as f64) * 100.0
        } else {
            0.0
        };

        MetricsReport {
            api_calls: calls,
            api_failures: failures,
            api_success_rate,
            soft_failures: self.soft_failures(),
            placeholder_mismatches: self.placeholder_mismatches(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsReport {
    pub api_calls: usize,
    pub api_failures: usize,
    /// Percentage of calls that succeeded (0-100)
    pub api_success_rate: f64,
    pub soft_failures: usize,
    pub placeholder_mismatches: usize,
}
