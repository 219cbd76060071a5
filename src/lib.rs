//! Bulk translation of nested JSON message catalogs.
//!
//! A baseline catalog (or one top-level section of it) is walked leaf by
//! leaf, each string is translated for every configured locale, and the
//! result is merged into that locale's existing catalog without touching
//! the other sections.

pub mod batch;
pub mod config;
pub mod document;
pub mod locales;
pub mod merge;
pub mod metrics;
pub mod openai;
pub mod progress;
pub mod provider;
pub mod rate_limit;
pub mod retry;
pub mod validator;
pub mod walker;

pub use batch::{BatchOrchestrator, BatchSettings, CancelFlag, LocaleState, RunResult, RunSummary};
pub use document::{Document, DocumentError};
pub use locales::{LocaleTable, LocaleTarget};
pub use provider::{ProviderError, TranslationClient};
