use crate::provider::{ProviderError, TranslationClient};
use serde::{Deserialize, Serialize};

/// OpenAI Chat Completion request for translation
#[derive(Debug, Serialize)]
struct TranslationRequest {
    model: String,
    messages: Vec<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reasoning_effort: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Message,
}

/// Check if a model is a reasoning model that doesn't support temperature
fn is_reasoning_model(model: &str) -> bool {
    model.starts_with("gpt-5")
        || model.starts_with("o1")
        || model.starts_with("o3")
        || model.starts_with("o4")
}

/// Build the system prompt for translating one catalog string
fn build_translation_system_prompt(target_code: &str) -> String {
    format!(
        r#"You are a professional software localizer. Translate the user's text from English into the language identified by the BCP 47 code "{}".

## Translation Rules

### DO NOT translate or alter:
- ICU message placeholders and their argument names (e.g., {{name}}, {{count, plural, one {{...}} other {{...}}}})
- HTML or rich-text tags (e.g., <b>, </b>, <link>, <br/>)
- URLs and email addresses
- Product and brand names

### DO translate:
- All user-facing words, including the text inside plural and select branches

### Output:
- Return ONLY the translated text, without quotes, explanations or notes
- Keep punctuation, capitalization style and line breaks equivalent to the original
- If the text is already appropriate in the target language, return it unchanged"#,
        target_code
    )
}

/// Chat-completions translation client
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
    api_url: String,
}

impl OpenAiClient {
    pub fn new(
        http: reqwest::Client,
        api_key: impl Into<String>,
        model: impl Into<String>,
        api_url: impl Into<String>,
    ) -> Self {
        Self {
            http,
            api_key: api_key.into(),
            model: model.into(),
            api_url: api_url.into(),
        }
    }

    fn build_request(&self, text: &str, target_code: &str) -> TranslationRequest {
        // Reasoning models don't support temperature - use reasoning_effort instead
        let is_reasoning = is_reasoning_model(&self.model);

        TranslationRequest {
            model: self.model.clone(),
            messages: vec![
                Message {
                    role: "system".to_string(),
                    content: build_translation_system_prompt(target_code),
                },
                Message {
                    role: "user".to_string(),
                    content: text.to_string(),
                },
            ],
            temperature: if is_reasoning { None } else { Some(0.2) },
            reasoning_effort: if is_reasoning {
                Some("low".to_string())
            } else {
                None
            },
        }
    }
}

impl TranslationClient for OpenAiClient {
    async fn translate(&self, text: &str, target_code: &str) -> Result<String, ProviderError> {
        let request = self.build_request(text, target_code);

        let response = self
            .http
            .post(&self.api_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                ProviderError::Transient(format!("Failed to send request to OpenAI API: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|e| format!("<failed to read body: {}>", e));
            let message = format!("OpenAI API error ({}): {}", status, body);

            // Retry 429 (rate limit) and 5xx errors, other 4xx are final
            return Err(if status.as_u16() == 429 || status.is_server_error() {
                ProviderError::Transient(message)
            } else {
                ProviderError::Rejected(message)
            });
        }

        let chat_response: ChatResponse = response.json().await.map_err(|e| {
            ProviderError::Transient(format!("Failed to parse OpenAI translation response: {}", e))
        })?;

        let translated = chat_response
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| {
                ProviderError::Transient("OpenAI translation response contained no choices".to_string())
            })?;

        if translated.trim().is_empty() {
            return Err(ProviderError::Transient(
                "OpenAI returned an empty translation".to_string(),
            ));
        }

        Ok(keep_surrounding_whitespace(text, &translated))
    }
}

/// Re-apply the source's leading/trailing whitespace to a trimmed answer.
///
/// Models routinely add or drop a trailing newline; catalogs care.
fn keep_surrounding_whitespace(source: &str, translated: &str) -> String {
    let core = translated.trim();
    let leading = &source[..source.len() - source.trim_start().len()];
    let trailing = &source[source.trim_end().len()..];
    format!("{}{}{}", leading, core, trailing)
}
