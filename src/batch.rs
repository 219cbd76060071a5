//! Batch orchestration across locales.
//!
//! Each locale runs the same pipeline: dry leaf count, live translation with
//! progress reporting, then merge-write into its destination catalog. A
//! locale that fails is recorded and the batch moves on to the next one.

use crate::document::{Document, DocumentError};
use crate::locales::LocaleTarget;
use crate::merge::merge_and_write;
use crate::metrics::TranslationMetrics;
use crate::progress::{format_duration, ProgressTracker};
use crate::provider::{ProviderError, TranslationClient};
use crate::rate_limit::RateLimiter;
use crate::retry::{RetryConfig, RetryPolicy};
use crate::walker::{collect_units, count_leaves, walk};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::sync::Notify;
use tokio::time::sleep;
use tracing::{debug, error, info, warn};

/// Where a locale is in its pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocaleState {
    Pending,
    DryCounting,
    Translating,
    Merging,
    Completed,
    Failed,
}

impl fmt::Display for LocaleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LocaleState::Pending => "pending",
            LocaleState::DryCounting => "dry counting",
            LocaleState::Translating => "translating",
            LocaleState::Merging => "merging",
            LocaleState::Completed => "completed",
            LocaleState::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Run parameters shared by every locale of a batch.
#[derive(Debug, Clone)]
pub struct BatchSettings {
    /// Directory holding `<code>.json` destination catalogs
    pub messages_dir: PathBuf,
    pub retry: RetryConfig,
    /// Minimum spacing between provider calls
    pub rate_limit_delay: Duration,
    /// Pause between two locales
    pub inter_locale_cooldown: Duration,
    /// Progress event step, in percent
    pub progress_granularity: u32,
    /// Upper bound for a single provider call
    pub call_timeout: Duration,
}

impl Default for BatchSettings {
    fn default() -> Self {
        Self {
            messages_dir: PathBuf::from("messages"),
            retry: RetryConfig::default(),
            rate_limit_delay: Duration::from_millis(150),
            inter_locale_cooldown: Duration::from_secs(3),
            progress_granularity: 10,
            call_timeout: Duration::from_secs(30),
        }
    }
}

/// Outcome of one locale.
#[derive(Debug, Clone, PartialEq)]
pub struct RunResult {
    pub locale: String,
    pub display_name: String,
    /// `Completed` or `Failed`
    pub state: LocaleState,
    pub success: bool,
    pub total_leaves: usize,
    /// Leaves that now hold a provider translation (blank leaves included)
    pub translated_count: usize,
    /// Leaves left in the source language after retries ran out
    pub soft_failure_count: usize,
    pub elapsed: Duration,
    pub error_detail: Option<String>,
}

impl RunResult {
    fn failed(target: &LocaleTarget, elapsed: Duration, detail: String) -> Self {
        Self {
            locale: target.code.clone(),
            display_name: target.display_name.clone(),
            state: LocaleState::Failed,
            success: false,
            total_leaves: 0,
            translated_count: 0,
            soft_failure_count: 0,
            elapsed,
            error_detail: Some(detail),
        }
    }

    /// Written, but some leaves fell back to source text.
    pub fn needs_review(&self) -> bool {
        self.success && self.soft_failure_count > 0
    }
}

/// Ordered per-locale results plus run totals.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub results: Vec<RunResult>,
    pub elapsed: Duration,
}

impl RunSummary {
    pub fn all_succeeded(&self) -> bool {
        self.results.iter().all(|result| result.success)
    }

    pub fn total_translated(&self) -> usize {
        self.results.iter().map(|result| result.translated_count).sum()
    }

    pub fn total_soft_failures(&self) -> usize {
        self.results.iter().map(|result| result.soft_failure_count).sum()
    }

    /// Completed with every leaf translated.
    pub fn clean(&self) -> Vec<&RunResult> {
        self.results
            .iter()
            .filter(|result| result.success && result.soft_failure_count == 0)
            .collect()
    }

    /// Completed, but with fallback-to-source leaves.
    pub fn needs_review(&self) -> Vec<&RunResult> {
        self.results.iter().filter(|result| result.needs_review()).collect()
    }

    /// Failed outright; these need a full rerun.
    pub fn failed(&self) -> Vec<&RunResult> {
        self.results.iter().filter(|result| !result.success).collect()
    }

    /// Emit the end-of-run report.
    pub fn log(&self) {
        info!("==================== Translation summary ====================");
        for result in &self.results {
            if !result.success {
                error!(
                    "✗ {} ({}): {}",
                    result.locale,
                    result.display_name,
                    result.error_detail.as_deref().unwrap_or("unknown error")
                );
            } else if result.needs_review() {
                warn!(
                    "⚠ {} ({}): {}/{} leaves translated, {} left in source language - review needed ({})",
                    result.locale,
                    result.display_name,
                    result.translated_count,
                    result.total_leaves,
                    result.soft_failure_count,
                    format_duration(result.elapsed)
                );
            } else {
                info!(
                    "✓ {} ({}): {} leaves translated ({})",
                    result.locale,
                    result.display_name,
                    result.translated_count,
                    format_duration(result.elapsed)
                );
            }
        }

        info!(
            "{} clean, {} need review, {} failed",
            self.clean().len(),
            self.needs_review().len(),
            self.failed().len()
        );
        info!(
            "Total: {} leaves translated, {} soft failures, elapsed {}",
            self.total_translated(),
            self.total_soft_failures(),
            format_duration(self.elapsed)
        );

        let failed: Vec<&str> = self.failed().iter().map(|r| r.locale.as_str()).collect();
        if !failed.is_empty() {
            error!("Rerun needed for: {}", failed.join(", "));
        }
    }
}

/// Leaf count for one locale, without translating anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DryRunReport {
    pub locale: String,
    pub total_leaves: usize,
    /// Set when the destination catalog could not be loaded
    pub destination_error: Option<String>,
}

/// Coarse cancellation, checked before each locale and each leaf.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<CancelState>);

#[derive(Debug, Default)]
struct CancelState {
    cancelled: AtomicBool,
    notify: Notify,
}

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.cancelled.store(true, Ordering::SeqCst);
        self.0.notify.notify_waiters();
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.cancelled.load(Ordering::SeqCst)
    }

    /// Resolves once `cancel` has been called.
    pub async fn cancelled(&self) {
        loop {
            let notified = self.0.notify.notified();
            if self.is_cancelled() {
                return;
            }
            notified.await;
        }
    }
}

#[derive(Debug, Error)]
enum LocaleFailure {
    #[error(transparent)]
    Document(#[from] DocumentError),

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("cancelled")]
    Cancelled,
}

struct LocaleOutcome {
    total_leaves: usize,
    soft_failures: usize,
}

/// Sequences translation of a source catalog into every locale target.
pub struct BatchOrchestrator<C> {
    client: C,
    policy: RetryPolicy,
    settings: BatchSettings,
    cancel: CancelFlag,
}

impl<C: TranslationClient> BatchOrchestrator<C> {
    pub fn new(client: C, settings: BatchSettings) -> Self {
        let policy = RetryPolicy::new(
            settings.retry.clone(),
            settings.call_timeout,
            RateLimiter::new(settings.rate_limit_delay),
        );

        Self {
            client,
            policy,
            settings,
            cancel: CancelFlag::new(),
        }
    }

    /// Use an externally controlled cancellation flag.
    pub fn with_cancel_flag(mut self, cancel: CancelFlag) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn settings(&self) -> &BatchSettings {
        &self.settings
    }

    /// Destination catalog for a locale.
    pub fn destination_path(&self, target: &LocaleTarget) -> PathBuf {
        destination_path(&self.settings.messages_dir, target)
    }

    /// Translate `source_path` (or its `subtree_key` entry) into every target.
    ///
    /// Only a source catalog that cannot be loaded, or lacks the subtree key,
    /// fails the whole run. Everything that goes wrong for a single locale is
    /// recorded in that locale's `RunResult`.
    pub async fn run(
        &self,
        targets: &[LocaleTarget],
        source_path: &Path,
        subtree_key: Option<&str>,
    ) -> Result<RunSummary, DocumentError> {
        let started = Instant::now();
        let source = load_source(source_path, subtree_key)?;

        info!(
            "Translating {} from {} into {} locale(s)",
            subtree_key.unwrap_or("all keys"),
            source_path.display(),
            targets.len()
        );

        let mut results = Vec::with_capacity(targets.len());
        for (index, target) in targets.iter().enumerate() {
            if index > 0 && !self.cancel.is_cancelled() {
                self.cool_down(target).await;
            }

            if self.cancel.is_cancelled() {
                warn!("[{}] Skipped: run cancelled", target.code);
                results.push(RunResult::failed(
                    target,
                    Duration::ZERO,
                    "cancelled before start".to_string(),
                ));
                continue;
            }

            results.push(self.run_locale(target, &source, subtree_key).await);
        }

        let summary = RunSummary {
            results,
            elapsed: started.elapsed(),
        };
        summary.log();
        Ok(summary)
    }

    async fn cool_down(&self, next: &LocaleTarget) {
        let cooldown = self.settings.inter_locale_cooldown;
        if cooldown.is_zero() {
            return;
        }
        debug!("Cooling down {:?} before {}", cooldown, next.code);
        tokio::select! {
            _ = sleep(cooldown) => {}
            _ = self.cancel.cancelled() => debug!("Cooldown interrupted by cancellation"),
        }
    }

    async fn run_locale(
        &self,
        target: &LocaleTarget,
        source: &Document,
        subtree_key: Option<&str>,
    ) -> RunResult {
        let started = Instant::now();
        let mut state = LocaleState::Pending;
        info!("[{}] Starting {}", target.code, target.display_name);

        match self
            .translate_locale(target, source, subtree_key, &mut state)
            .await
        {
            Ok(outcome) => RunResult {
                locale: target.code.clone(),
                display_name: target.display_name.clone(),
                state: LocaleState::Completed,
                success: true,
                total_leaves: outcome.total_leaves,
                translated_count: outcome.total_leaves - outcome.soft_failures,
                soft_failure_count: outcome.soft_failures,
                elapsed: started.elapsed(),
                error_detail: None,
            },
            Err(e) => {
                error!("[{}] Failed while {}: {}", target.code, state, e);
                RunResult::failed(target, started.elapsed(), format!("{} (while {})", e, state))
            }
        }
    }

    async fn translate_locale(
        &self,
        target: &LocaleTarget,
        source: &Document,
        subtree_key: Option<&str>,
        state: &mut LocaleState,
    ) -> Result<LocaleOutcome, LocaleFailure> {
        let destination = self.destination_path(target);

        advance(target, state, LocaleState::DryCounting);
        // Reject an unreadable destination before spending provider calls on it
        Document::load(&destination)?;
        let total_leaves = count_leaves(source);
        info!("[{}] {} leaves to translate", target.code, total_leaves);

        advance(target, state, LocaleState::Translating);
        let units = collect_units(source);
        let metrics = TranslationMetrics::new();
        let mut progress = ProgressTracker::new(total_leaves, self.settings.progress_granularity);
        let mut translations = Vec::with_capacity(units.len());

        for unit in &units {
            if self.cancel.is_cancelled() {
                return Err(LocaleFailure::Cancelled);
            }

            let soft_failures_before = metrics.soft_failures();
            let text = self
                .policy
                .try_translate(&self.client, &unit.source, &target.provider_code, &metrics)
                .await?;
            if metrics.soft_failures() > soft_failures_before {
                warn!("[{}] {} left in source language", target.code, unit.dotted_path());
            }
            translations.push(text);

            if let Some(event) = progress.record_leaf() {
                info!("[{}] {}", target.code, event);
            }
        }

        let mut translated_leaves = translations.into_iter();
        let translated = walk(source, |text, _| {
            translated_leaves.next().unwrap_or_else(|| text.to_string())
        });

        advance(target, state, LocaleState::Merging);
        merge_and_write(&destination, subtree_key, translated)?;

        let report = metrics.report();
        info!(
            "[{}] Wrote {} ({} provider calls, {:.1}% succeeded, {} placeholder warnings)",
            target.code,
            destination.display(),
            report.api_calls,
            report.api_success_rate,
            report.placeholder_mismatches
        );

        Ok(LocaleOutcome {
            total_leaves,
            soft_failures: report.soft_failures,
        })
    }
}

/// Count leaves and check every destination without calling the provider.
pub fn dry_run(
    targets: &[LocaleTarget],
    source_path: &Path,
    subtree_key: Option<&str>,
    messages_dir: &Path,
) -> Result<Vec<DryRunReport>, DocumentError> {
    let source = load_source(source_path, subtree_key)?;
    let total_leaves = count_leaves(&source);

    let reports = targets
        .iter()
        .map(|target| {
            let destination_error = Document::load(&destination_path(messages_dir, target))
                .err()
                .map(|e| e.to_string());
            match &destination_error {
                Some(e) => warn!("[{}] {}", target.code, e),
                None => info!("[{}] {} leaves would be translated", target.code, total_leaves),
            }
            DryRunReport {
                locale: target.code.clone(),
                total_leaves,
                destination_error,
            }
        })
        .collect();

    Ok(reports)
}

/// `<messages_dir>/<code>.json`
pub fn destination_path(messages_dir: &Path, target: &LocaleTarget) -> PathBuf {
    messages_dir.join(format!("{}.json", target.code))
}

fn advance(target: &LocaleTarget, state: &mut LocaleState, next: LocaleState) {
    debug!("[{}] {} -> {}", target.code, state, next);
    *state = next;
}

/// Load the source catalog, narrowed to `subtree_key` when given.
fn load_source(path: &Path, subtree_key: Option<&str>) -> Result<Document, DocumentError> {
    let document = Document::load(path)?;
    match subtree_key {
        None => Ok(document),
        Some(key) => document
            .get(key)
            .cloned()
            .ok_or_else(|| DocumentError::MissingSubtree {
                path: path.to_path_buf(),
                key: key.to_string(),
            }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use std::sync::atomic::AtomicUsize;
    use tempfile::TempDir;

    /// Appends the target code to every string.
    struct SuffixClient {
        calls: AtomicUsize,
    }

    impl SuffixClient {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl TranslationClient for SuffixClient {
        async fn translate(&self, text: &str, target_code: &str) -> Result<String, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(format!("{} [{}]", text, target_code))
        }
    }

    /// Cancels the batch after a fixed number of calls.
    struct CancellingClient {
        cancel: CancelFlag,
        after: usize,
        calls: AtomicUsize,
    }

    impl TranslationClient for CancellingClient {
        async fn translate(&self, text: &str, _target_code: &str) -> Result<String, ProviderError> {
            if self.calls.fetch_add(1, Ordering::SeqCst) + 1 >= self.after {
                self.cancel.cancel();
            }
            Ok(text.to_string())
        }
    }

    fn fast_settings(dir: &Path) -> BatchSettings {
        BatchSettings {
            messages_dir: dir.to_path_buf(),
            retry: RetryConfig::from_schedule(2, vec![Duration::from_millis(1)]),
            rate_limit_delay: Duration::ZERO,
            inter_locale_cooldown: Duration::ZERO,
            progress_granularity: 50,
            call_timeout: Duration::from_secs(5),
        }
    }

    fn write_json(path: &Path, value: serde_json::Value) {
        fs::write(path, serde_json::to_string_pretty(&value).expect("json")).expect("write");
    }

    fn setup(dir: &Path, locales: &[&str]) -> PathBuf {
        let source = dir.join("en.json");
        write_json(
            &source,
            json!({
                "marketing": {"hero": {"title": "Welcome", "count": 3}, "cta": "Go"},
                "app": {"nav": "Home"}
            }),
        );
        for code in locales {
            write_json(&dir.join(format!("{}.json", code)), json!({"app": {"nav": "keep"}}));
        }
        source
    }

    fn targets(codes: &[&str]) -> Vec<LocaleTarget> {
        codes.iter().map(|c| LocaleTarget::new(c, c, c)).collect()
    }

    #[test]
    fn test_locale_state_display() {
        assert_eq!(LocaleState::DryCounting.to_string(), "dry counting");
        assert_eq!(LocaleState::Merging.to_string(), "merging");
    }

    #[tokio::test]
    async fn test_run_translates_subtree_and_keeps_siblings() {
        let dir = TempDir::new().expect("tempdir");
        let source = setup(dir.path(), &["es"]);
        let orchestrator = BatchOrchestrator::new(SuffixClient::new(), fast_settings(dir.path()));

        let summary = orchestrator
            .run(&targets(&["es"]), &source, Some("marketing"))
            .await
            .expect("run");

        assert!(summary.all_succeeded());
        assert_eq!(summary.results[0].state, LocaleState::Completed);
        assert_eq!(summary.results[0].total_leaves, 2);
        assert_eq!(summary.total_translated(), 2);

        let written = Document::load(&dir.path().join("es.json")).expect("load");
        assert_eq!(
            written,
            Document::from(json!({
                "app": {"nav": "keep"},
                "marketing": {"hero": {"title": "Welcome [es]", "count": 3}, "cta": "Go [es]"}
            }))
        );
    }

    #[tokio::test]
    async fn test_run_without_subtree_translates_every_key() {
        let dir = TempDir::new().expect("tempdir");
        let source = setup(dir.path(), &["fr"]);
        let orchestrator = BatchOrchestrator::new(SuffixClient::new(), fast_settings(dir.path()));

        let summary = orchestrator
            .run(&targets(&["fr"]), &source, None)
            .await
            .expect("run");

        assert_eq!(summary.results[0].translated_count, 3);
        let written = Document::load(&dir.path().join("fr.json")).expect("load");
        assert_eq!(
            written.get("app"),
            Some(&Document::from(json!({"nav": "Home [fr]"})))
        );
    }

    #[tokio::test]
    async fn test_missing_source_subtree_fails_run() {
        let dir = TempDir::new().expect("tempdir");
        let source = setup(dir.path(), &["es"]);
        let orchestrator = BatchOrchestrator::new(SuffixClient::new(), fast_settings(dir.path()));

        let err = orchestrator
            .run(&targets(&["es"]), &source, Some("pricing"))
            .await
            .unwrap_err();
        assert!(matches!(err, DocumentError::MissingSubtree { .. }));
    }

    #[tokio::test]
    async fn test_missing_destination_fails_before_translating() {
        let dir = TempDir::new().expect("tempdir");
        let source = setup(dir.path(), &[]);
        let client = SuffixClient::new();
        let orchestrator = BatchOrchestrator::new(client, fast_settings(dir.path()));

        let summary = orchestrator
            .run(&targets(&["de"]), &source, Some("marketing"))
            .await
            .expect("run");

        let result = &summary.results[0];
        assert!(!result.success);
        assert_eq!(result.state, LocaleState::Failed);
        assert!(result
            .error_detail
            .as_deref()
            .expect("detail")
            .contains("while dry counting"));
        assert_eq!(orchestrator.client.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_cancellation_skips_remaining_locales_without_writing() {
        let dir = TempDir::new().expect("tempdir");
        let source = setup(dir.path(), &["es", "fr"]);
        let cancel = CancelFlag::new();
        let client = CancellingClient {
            cancel: cancel.clone(),
            after: 1,
            calls: AtomicUsize::new(0),
        };
        let orchestrator =
            BatchOrchestrator::new(client, fast_settings(dir.path())).with_cancel_flag(cancel);

        let summary = orchestrator
            .run(&targets(&["es", "fr"]), &source, Some("marketing"))
            .await
            .expect("run");

        assert_eq!(summary.results.len(), 2);
        assert!(summary.failed().len() == 2);
        assert!(summary.results[0]
            .error_detail
            .as_deref()
            .expect("detail")
            .contains("cancelled"));
        assert_eq!(
            summary.results[1].error_detail.as_deref(),
            Some("cancelled before start")
        );

        // The interrupted locale keeps its previous, valid contents
        let es = Document::load(&dir.path().join("es.json")).expect("still valid");
        assert!(es.get("marketing").is_none());
    }

    #[tokio::test]
    async fn test_rejected_provider_fails_locale_without_writing() {
        struct RejectingClient;
        impl TranslationClient for RejectingClient {
            async fn translate(&self, _text: &str, _target: &str) -> Result<String, ProviderError> {
                Err(ProviderError::Rejected("401 Unauthorized".to_string()))
            }
        }

        let dir = TempDir::new().expect("tempdir");
        let source = setup(dir.path(), &[]);
        let destination = dir.path().join("es.json");
        let before = "{\"marketing\": {\"cta\": \"Vamos\"}}";
        fs::write(&destination, before).expect("write");

        let orchestrator = BatchOrchestrator::new(RejectingClient, fast_settings(dir.path()));
        let summary = orchestrator
            .run(&targets(&["es"]), &source, Some("marketing"))
            .await
            .expect("run");

        let result = &summary.results[0];
        assert!(!result.success);
        assert_eq!(result.state, LocaleState::Failed);
        let detail = result.error_detail.as_deref().expect("detail");
        assert!(detail.contains("401 Unauthorized"), "{}", detail);
        assert!(detail.contains("while translating"), "{}", detail);
        assert_eq!(fs::read_to_string(&destination).expect("read"), before);
    }

    #[tokio::test]
    async fn test_cooldown_only_between_locales() {
        let dir = TempDir::new().expect("tempdir");
        let source = setup(dir.path(), &["es", "fr"]);
        let mut settings = fast_settings(dir.path());
        settings.inter_locale_cooldown = Duration::from_millis(80);
        let orchestrator = BatchOrchestrator::new(SuffixClient::new(), settings);

        let single = Instant::now();
        orchestrator
            .run(&targets(&["es"]), &source, Some("marketing"))
            .await
            .expect("run");
        assert!(single.elapsed() < Duration::from_millis(80));

        let pair = Instant::now();
        orchestrator
            .run(&targets(&["es", "fr"]), &source, Some("marketing"))
            .await
            .expect("run");
        assert!(pair.elapsed() >= Duration::from_millis(80));
    }

    #[tokio::test]
    async fn test_cancel_interrupts_cooldown() {
        let dir = TempDir::new().expect("tempdir");
        let source = setup(dir.path(), &["es", "fr"]);
        let mut settings = fast_settings(dir.path());
        settings.inter_locale_cooldown = Duration::from_secs(30);
        let cancel = CancelFlag::new();
        let orchestrator =
            BatchOrchestrator::new(SuffixClient::new(), settings).with_cancel_flag(cancel.clone());

        tokio::spawn(async move {
            sleep(Duration::from_millis(50)).await;
            cancel.cancel();
        });

        let started = Instant::now();
        let summary = orchestrator
            .run(&targets(&["es", "fr"]), &source, Some("marketing"))
            .await
            .expect("run");

        assert!(started.elapsed() < Duration::from_secs(5));
        assert!(summary.results[0].success);
        assert_eq!(
            summary.results[1].error_detail.as_deref(),
            Some("cancelled before start")
        );
    }

    #[tokio::test]
    async fn test_cancelled_resolves_after_cancel() {
        let cancel = CancelFlag::new();
        let waiter = cancel.clone();
        let handle = tokio::spawn(async move { waiter.cancelled().await });

        cancel.cancel();
        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .expect("resolved")
            .expect("join");
        assert!(cancel.is_cancelled());
    }

    #[test]
    fn test_dry_run_reports_counts_and_bad_destinations() {
        let dir = TempDir::new().expect("tempdir");
        let source = setup(dir.path(), &["es"]);
        fs::write(dir.path().join("fr.json"), "not json").expect("write");
        let reports = dry_run(&targets(&["es", "fr"]), &source, Some("marketing"), dir.path())
            .expect("dry run");

        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].total_leaves, 2);
        assert!(reports[0].destination_error.is_none());
        assert!(reports[1].destination_error.is_some());
    }

    #[test]
    fn test_summary_classification() {
        let completed = |code: &str, soft: usize| RunResult {
            locale: code.to_string(),
            display_name: code.to_string(),
            state: LocaleState::Completed,
            success: true,
            total_leaves: 10,
            translated_count: 10 - soft,
            soft_failure_count: soft,
            elapsed: Duration::from_secs(1),
            error_detail: None,
        };
        let summary = RunSummary {
            results: vec![
                completed("es", 0),
                completed("fr", 2),
                RunResult::failed(
                    &LocaleTarget::new("de", "de", "German"),
                    Duration::ZERO,
                    "boom".to_string(),
                ),
            ],
            elapsed: Duration::from_secs(3),
        };

        assert!(!summary.all_succeeded());
        assert_eq!(summary.clean().len(), 1);
        assert_eq!(summary.needs_review()[0].locale, "fr");
        assert_eq!(summary.failed()[0].locale, "de");
        assert_eq!(summary.total_translated(), 18);
        assert_eq!(summary.total_soft_failures(), 2);
    }
}
