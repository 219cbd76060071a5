//! Locale table: the ordered list of translation destinations.
//!
//! The table is an explicit value passed into the orchestrator. It comes
//! either from the built-in defaults or from a JSON file, and its order is
//! the order locales are processed in.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// One configured translation destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocaleTarget {
    /// Catalog code, also the destination file stem (e.g. "es", "zh")
    pub code: String,

    /// Code handed to the translation provider (e.g. "es", "zh-CN")
    pub provider_code: String,

    /// Human-readable name for logs (e.g. "Spanish")
    pub display_name: String,
}

impl LocaleTarget {
    pub fn new(code: &str, provider_code: &str, display_name: &str) -> Self {
        Self {
            code: code.to_string(),
            provider_code: provider_code.to_string(),
            display_name: display_name.to_string(),
        }
    }
}

/// Ordered, validated set of locale targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleTable {
    targets: Vec<LocaleTarget>,
}

impl LocaleTable {
    /// Build a table, rejecting empty lists, blank codes and duplicates.
    pub fn new(targets: Vec<LocaleTarget>) -> Result<Self> {
        if targets.is_empty() {
            bail!("Locale table is empty");
        }

        let mut seen = HashSet::new();
        for target in &targets {
            if target.code.trim().is_empty() || target.provider_code.trim().is_empty() {
                bail!("Locale entry {:?} has a blank code", target.display_name);
            }
            if !seen.insert(target.code.as_str()) {
                bail!("Duplicate locale code: '{}'", target.code);
            }
        }

        Ok(Self { targets })
    }

    /// The built-in table.
    pub fn builtin() -> Self {
        Self {
            targets: default_locales(),
        }
    }

    /// Load a table from a JSON array of `{code, provider_code, display_name}`.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read locales file {}", path.display()))?;
        let targets: Vec<LocaleTarget> = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse locales file {}", path.display()))?;
        Self::new(targets)
    }

    /// Get a locale target by its catalog code.
    pub fn get_by_code(&self, code: &str) -> Option<&LocaleTarget> {
        self.targets.iter().find(|target| target.code == code)
    }

    /// Narrow the table to one locale when `code` is given.
    pub fn select(&self, code: Option<&str>) -> Result<Vec<LocaleTarget>> {
        match code {
            None => Ok(self.targets.clone()),
            Some(code) => match self.get_by_code(code) {
                Some(target) => Ok(vec![target.clone()]),
                None => bail!(
                    "Unknown locale code: '{}' (configured: {})",
                    code,
                    self.codes().join(", ")
                ),
            },
        }
    }

    pub fn targets(&self) -> &[LocaleTarget] {
        &self.targets
    }

    pub fn codes(&self) -> Vec<&str> {
        self.targets.iter().map(|target| target.code.as_str()).collect()
    }
}

/// Default locale targets, in processing order.
fn default_locales() -> Vec<LocaleTarget> {
    vec![
        LocaleTarget::new("es", "es", "Spanish"),
        LocaleTarget::new("fr", "fr", "French"),
        LocaleTarget::new("de", "de", "German"),
        LocaleTarget::new("it", "it", "Italian"),
        LocaleTarget::new("pt", "pt", "Portuguese"),
        LocaleTarget::new("nl", "nl", "Dutch"),
        LocaleTarget::new("pl", "pl", "Polish"),
        LocaleTarget::new("ja", "ja", "Japanese"),
        LocaleTarget::new("ko", "ko", "Korean"),
        LocaleTarget::new("zh", "zh-CN", "Chinese (Simplified)"),
        LocaleTarget::new("ar", "ar", "Arabic"),
        LocaleTarget::new("hi", "hi", "Hindi"),
        LocaleTarget::new("ru", "ru", "Russian"),
        LocaleTarget::new("tr", "tr", "Turkish"),
        LocaleTarget::new("sv", "sv", "Swedish"),
    ]
}
