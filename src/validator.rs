//! Placeholder and markup preservation checks.
//!
//! Catalog strings carry ICU placeholders (`{name}`, `{count, plural, ...}`),
//! rich-text tags (`<b>`, `<link>`) and URLs that must survive translation
//! untouched. A lost placeholder breaks message formatting at runtime, so it
//! is reported as an error; markup and URL drift are warnings.

use regex::Regex;
use std::sync::OnceLock;

/// Validation report containing errors and warnings about a translation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }
}

pub struct PlaceholderValidator;

static TAG_REGEX: OnceLock<Regex> = OnceLock::new();
static URL_REGEX: OnceLock<Regex> = OnceLock::new();

impl PlaceholderValidator {
    /// Compare the protected elements of `original` and `translated`.
    ///
    /// Order is ignored; translations may legitimately move a placeholder.
    pub fn validate(original: &str, translated: &str) -> ValidationReport {
        let mut report = ValidationReport::default();

        let orig_placeholders = sorted(Self::extract_placeholders(original));
        let trans_placeholders = sorted(Self::extract_placeholders(translated));
        if orig_placeholders != trans_placeholders {
            report.errors.push(format!(
                "Placeholder mismatch: original has {:?}, translation has {:?}",
                orig_placeholders, trans_placeholders
            ));
        }

        let orig_tags = sorted(Self::extract_tags(original));
        let trans_tags = sorted(Self::extract_tags(translated));
        if orig_tags != trans_tags {
            report.warnings.push(format!(
                "Tag mismatch: original has {:?}, translation has {:?}",
                orig_tags, trans_tags
            ));
        }

        let orig_urls = sorted(Self::extract_urls(original));
        let trans_urls = sorted(Self::extract_urls(translated));
        if orig_urls != trans_urls {
            report.warnings.push(format!(
                "URL mismatch: original has {} URLs, translation has {} URLs",
                orig_urls.len(),
                trans_urls.len()
            ));
        }

        report
    }

    /// Names of top-level ICU arguments.
    ///
    /// Nested braces (plural/select branches) are skipped since their
    /// contents are translatable text, not argument names.
    fn extract_placeholders(text: &str) -> Vec<String> {
        let mut names = Vec::new();
        let mut depth = 0usize;
        let mut chars = text.chars().peekable();

        while let Some(c) = chars.next() {
            match c {
                '{' => {
                    if depth == 0 {
                        let mut name = String::new();
                        while let Some(&next) = chars.peek() {
                            if next.is_alphanumeric() || next == '_' {
                                name.push(next);
                                chars.next();
                            } else if next.is_whitespace() && name.is_empty() {
                                chars.next();
                            } else {
                                break;
                            }
                        }
                        if !name.is_empty() {
                            names.push(name);
                        }
                    }
                    depth += 1;
                }
                '}' => depth = depth.saturating_sub(1),
                _ => {}
            }
        }

        names
    }

    /// Opening and closing tag tokens such as `<b>` and `</b>`.
    fn extract_tags(text: &str) -> Vec<String> {
        let regex = TAG_REGEX
            .get_or_init(|| Regex::new(r"</?([A-Za-z][A-Za-z0-9_-]*)[^<>]*?/?>").expect("tag regex"));

        regex
            .captures_iter(text)
            .filter_map(|cap| {
                let whole = cap.get(0)?.as_str();
                let name = cap.get(1)?.as_str();
                Some(if whole.starts_with("</") {
                    format!("</{}>", name)
                } else {
                    format!("<{}>", name)
                })
            })
            .collect()
    }

    fn extract_urls(text: &str) -> Vec<String> {
        let regex = URL_REGEX.get_or_init(|| Regex::new(r"https?://[^\s)\]<>]+").expect("url regex"));

        regex
            .find_iter(text)
            .map(|m| m.as_str().to_string())
            .collect()
    }
}

fn sorted(mut items: Vec<String>) -> Vec<String> {
    items.sort();
    items
}
