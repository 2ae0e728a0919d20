//! Core `Translator` trait and `GoogleTranslator` implementation.
//!
//! `GoogleTranslator` calls the unauthenticated `translate_a/single` endpoint
//! with `client=gtx`.  The response is a loosely-typed nested array whose
//! `[0][0][0]` element carries the translated string; anything else is a
//! parse failure.  One request per call — no retry, no caching.  A failed
//! translation is surfaced to the caller and never touches session state.

use async_trait::async_trait;
use thiserror::Error;

use crate::config::TranslateConfig;

// ---------------------------------------------------------------------------
// TranslateError
// ---------------------------------------------------------------------------

/// Errors that can occur during a translation call.
#[derive(Debug, Error)]
pub enum TranslateError {
    /// HTTP transport or connection error.
    #[error("translation request failed: {0}")]
    Request(String),

    /// The request did not complete within the configured timeout.
    #[error("translation request timed out")]
    Timeout,

    /// The response body did not have the expected nested-array shape.
    #[error("failed to parse translation response: {0}")]
    Parse(String),

    /// The endpoint answered but the translated string was empty.
    #[error("translation returned an empty result")]
    EmptyResponse,
}

impl From<reqwest::Error> for TranslateError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            TranslateError::Timeout
        } else {
            TranslateError::Request(e.to_string())
        }
    }
}

// ---------------------------------------------------------------------------
// Translator trait
// ---------------------------------------------------------------------------

/// Async trait for text translation backends.
///
/// Implementors must be `Send + Sync` so they can be shared across tasks
/// (e.g. wrapped in `Arc<dyn Translator>`).
///
/// # Contract
///
/// - `text` must be non-empty; callers guard before invoking.
/// - One request/response per call; the implementation performs no retries.
#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate `text` into the language named by `target_lang`.
    async fn translate(&self, text: &str, target_lang: &str) -> Result<String, TranslateError>;
}

// Compile-time assertion: Box<dyn Translator> must be constructible.
const _: fn() = || {
    fn _assert_object_safe(_: Box<dyn Translator>) {}
};

// ---------------------------------------------------------------------------
// GoogleTranslator
// ---------------------------------------------------------------------------

/// Calls the `translate_a/single` endpoint (`client=gtx`).
///
/// All connection details (`base_url`, `source_lang`, `timeout_secs`) come
/// exclusively from the [`TranslateConfig`] passed to
/// [`GoogleTranslator::from_config`].
pub struct GoogleTranslator {
    client: reqwest::Client,
    config: TranslateConfig,
}

impl GoogleTranslator {
    /// Build a `GoogleTranslator` from application config.
    ///
    /// The HTTP client is pre-configured with the per-request timeout from
    /// `config.timeout_secs`.  A default (no-timeout) client is used as a
    /// last-resort fallback if the builder fails (should never happen in
    /// practice).
    pub fn from_config(config: &TranslateConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            config: config.clone(),
        }
    }
}

/// Pull the translated string out of the nested-array response.
///
/// The wire shape is `[[["<translated>", "<original>", …], …], …]`; any
/// deviation is a [`TranslateError::Parse`].
fn extract_translation(json: &serde_json::Value) -> Result<String, TranslateError> {
    let translated = json[0][0][0]
        .as_str()
        .ok_or_else(|| TranslateError::Parse("missing [0][0][0] string".into()))?
        .trim()
        .to_string();

    if translated.is_empty() {
        return Err(TranslateError::EmptyResponse);
    }

    Ok(translated)
}

#[async_trait]
impl Translator for GoogleTranslator {
    async fn translate(&self, text: &str, target_lang: &str) -> Result<String, TranslateError> {
        let url = format!("{}/translate_a/single", self.config.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("client", "gtx"),
                ("sl", self.config.source_lang.as_str()),
                ("tl", target_lang),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await?;

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| TranslateError::Parse(e.to_string()))?;

        extract_translation(&json)
    }
}

// ---------------------------------------------------------------------------
// MockTranslator  (test-only)
// ---------------------------------------------------------------------------

/// A test double that answers without any network access.
///
/// Records every `(text, target_lang)` pair it receives so tests can assert
/// how often — and with what — the controller called it.
#[cfg(test)]
pub struct MockTranslator {
    response: MockResponse,
    calls: std::sync::Mutex<Vec<(String, String)>>,
}

#[cfg(test)]
enum MockResponse {
    /// Always return this fixed string.
    Fixed(String),
    /// Return `"<text>:<target_lang>"` — lets tests tell responses apart.
    Echo,
    /// Always fail with a request error.
    Fail,
}

#[cfg(test)]
impl MockTranslator {
    /// Create a mock that always returns `Ok(text)`.
    pub fn ok(text: impl Into<String>) -> Self {
        Self {
            response: MockResponse::Fixed(text.into()),
            calls: std::sync::Mutex::new(Vec::new()),
        }
    }

    /// Create a mock that returns `"<text>:<target_lang>"`.
    pub fn echo() -> Self {
        Self {
            response: MockResponse::Echo,
            calls: std::sync::Mutex::new(Vec::new()),
        }
    }

    /// Create a mock that always fails.
    pub fn failing() -> Self {
        Self {
            response: MockResponse::Fail,
            calls: std::sync::Mutex::new(Vec::new()),
        }
    }

    /// All `(text, target_lang)` pairs seen so far.
    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[cfg(test)]
#[async_trait]
impl Translator for MockTranslator {
    async fn translate(&self, text: &str, target_lang: &str) -> Result<String, TranslateError> {
        self.calls
            .lock()
            .unwrap()
            .push((text.to_string(), target_lang.to_string()));

        match &self.response {
            MockResponse::Fixed(s) => Ok(s.clone()),
            MockResponse::Echo => Ok(format!("{text}:{target_lang}")),
            MockResponse::Fail => Err(TranslateError::Request("connection refused".into())),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // --- extract_translation ---

    #[test]
    fn extracts_translated_string() {
        let body = json!([[["hello world", "hola mundo", null, null, 10]], null, "es"]);
        assert_eq!(extract_translation(&body).unwrap(), "hello world");
    }

    #[test]
    fn trims_surrounding_whitespace() {
        let body = json!([[["  hello  ", "hola", null]]]);
        assert_eq!(extract_translation(&body).unwrap(), "hello");
    }

    #[test]
    fn object_body_is_parse_error() {
        let body = json!({ "error": "quota" });
        assert!(matches!(
            extract_translation(&body),
            Err(TranslateError::Parse(_))
        ));
    }

    #[test]
    fn empty_array_is_parse_error() {
        let body = json!([]);
        assert!(matches!(
            extract_translation(&body),
            Err(TranslateError::Parse(_))
        ));
    }

    #[test]
    fn non_string_leaf_is_parse_error() {
        let body = json!([[[42]]]);
        assert!(matches!(
            extract_translation(&body),
            Err(TranslateError::Parse(_))
        ));
    }

    #[test]
    fn empty_string_is_empty_response() {
        let body = json!([[["   "]]]);
        assert!(matches!(
            extract_translation(&body),
            Err(TranslateError::EmptyResponse)
        ));
    }

    // --- GoogleTranslator construction ---

    #[test]
    fn from_config_builds_without_panic() {
        let _translator = GoogleTranslator::from_config(&TranslateConfig::default());
    }

    /// Verify that `GoogleTranslator` is object-safe (usable as `dyn Translator`).
    #[test]
    fn translator_is_object_safe() {
        let translator: Box<dyn Translator> =
            Box::new(GoogleTranslator::from_config(&TranslateConfig::default()));
        drop(translator);
    }

    // --- MockTranslator ---

    #[tokio::test]
    async fn mock_records_calls() {
        let mock = MockTranslator::ok("hello world");
        let out = mock.translate("hola mundo", "en").await.unwrap();
        assert_eq!(out, "hello world");
        assert_eq!(mock.calls(), vec![("hola mundo".into(), "en".into())]);
    }

    #[tokio::test]
    async fn mock_echo_distinguishes_targets() {
        let mock = MockTranslator::echo();
        assert_eq!(mock.translate("hola", "fr").await.unwrap(), "hola:fr");
        assert_eq!(mock.translate("hola", "de").await.unwrap(), "hola:de");
    }

    #[tokio::test]
    async fn mock_failing_returns_request_error() {
        let mock = MockTranslator::failing();
        assert!(matches!(
            mock.translate("hola", "en").await,
            Err(TranslateError::Request(_))
        ));
    }
}
