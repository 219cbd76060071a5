//! The translation capability seam.

use std::future::Future;
use std::time::Duration;
use thiserror::Error;

/// Failure reported by a translation provider for a single string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    /// Network failure, 5xx, 429 or an unusable answer
    #[error("transient provider failure: {0}")]
    Transient(String),

    /// The call exceeded its time budget
    #[error("translation timed out after {0:?}")]
    Timeout(Duration),

    /// The provider refused the request outright (bad key, bad request)
    #[error("provider rejected the request: {0}")]
    Rejected(String),
}

impl ProviderError {
    /// Rejections are final; everything else is worth another attempt.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, ProviderError::Rejected(_))
    }
}

/// Translates one string into one target language.
///
/// For non-empty input and a supported target, a successful call returns a
/// string (which may equal the input).
pub trait TranslationClient {
    fn translate(
        &self,
        text: &str,
        target_code: &str,
    ) -> impl Future<Output = Result<String, ProviderError>> + Send;
}
