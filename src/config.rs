use crate::batch::BatchSettings;
use crate::retry::RetryConfig;
use anyhow::{bail, Context, Result};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    // Catalog files
    pub source_file: PathBuf,
    pub messages_dir: PathBuf,
    pub subtree_key: Option<String>,
    pub locales_file: Option<PathBuf>,

    // Retry / pacing
    pub max_attempts: u32,
    pub backoff_schedule: Vec<Duration>,
    pub rate_limit_delay: Duration,
    pub inter_locale_cooldown: Duration,
    pub translate_timeout: Duration,

    // Reporting
    pub progress_granularity: u32,

    // OpenAI
    pub openai_api_key: Option<String>,
    pub openai_model: String,
    pub openai_api_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let backoff_schedule = match std::env::var("BACKOFF_SCHEDULE_MS") {
            Ok(raw) => parse_schedule_ms(&raw).context("BACKOFF_SCHEDULE_MS is invalid")?,
            Err(_) => default_backoff_schedule(),
        };

        Ok(Self {
            // Catalog files
            source_file: std::env::var("SOURCE_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("messages/en.json")),
            messages_dir: std::env::var("MESSAGES_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("messages")),
            subtree_key: std::env::var("SUBTREE_KEY")
                .ok()
                .filter(|key| !key.trim().is_empty()),
            locales_file: std::env::var("LOCALES_FILE").ok().map(PathBuf::from),

            // Retry / pacing
            max_attempts: std::env::var("MAX_ATTEMPTS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3u32)
                .max(1),
            backoff_schedule,
            rate_limit_delay: Duration::from_millis(
                std::env::var("RATE_LIMIT_DELAY_MS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(150),
            ),
            inter_locale_cooldown: Duration::from_millis(
                std::env::var("INTER_LOCALE_COOLDOWN_MS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(3000),
            ),
            translate_timeout: Duration::from_secs(
                std::env::var("TRANSLATE_TIMEOUT_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(30),
            ),

            // Reporting
            progress_granularity: std::env::var("PROGRESS_GRANULARITY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10u32)
                .clamp(1, 100),

            // OpenAI
            openai_api_key: std::env::var("OPENAI_API_KEY")
                .ok()
                .filter(|key| !key.is_empty()),
            openai_model: std::env::var("OPENAI_MODEL")
                .unwrap_or_else(|_| "gpt-4o-mini".to_string()),
            openai_api_url: std::env::var("OPENAI_API_URL")
                .unwrap_or_else(|_| "https://api.openai.com/v1/chat/completions".to_string()),
        })
    }

    /// API key, required for anything that talks to the provider.
    pub fn require_api_key(&self) -> Result<&str> {
        self.openai_api_key
            .as_deref()
            .context("OPENAI_API_KEY not set")
    }

    pub fn batch_settings(&self) -> BatchSettings {
        BatchSettings {
            messages_dir: self.messages_dir.clone(),
            retry: RetryConfig::from_schedule(self.max_attempts, self.backoff_schedule.clone()),
            rate_limit_delay: self.rate_limit_delay,
            inter_locale_cooldown: self.inter_locale_cooldown,
            progress_granularity: self.progress_granularity,
            call_timeout: self.translate_timeout,
        }
    }
}

fn default_backoff_schedule() -> Vec<Duration> {
    vec![
        Duration::from_millis(1000),
        Duration::from_millis(2000),
        Duration::from_millis(4000),
    ]
}

/// Parse a comma-separated list of milliseconds, e.g. "500, 1000,2000".
fn parse_schedule_ms(raw: &str) -> Result<Vec<Duration>> {
    let mut schedule = Vec::new();
    for part in raw.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let millis: u64 = part
            .parse()
            .with_context(|| format!("'{}' is not a number of milliseconds", part))?;
        schedule.push(Duration::from_millis(millis));
    }
    if schedule.is_empty() {
        bail!("backoff schedule is empty");
    }
    Ok(schedule)
}
