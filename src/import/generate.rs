//! Structured extraction service
//!
//! Renders the embedded prompt template with the catalog and campus
//! vocabulary, then asks a generative model to return the import payload as
//! JSON. The shipped client talks to the Gemini `generateContent` REST
//! endpoint.

use rust_embed::Embed;
use serde_json::Value;
use tera::Tera;

use crate::core::config::Config;
use crate::import::ImportError;

#[derive(Embed)]
#[folder = "templates/"]
struct EmbeddedTemplates;

const PROMPT_TEMPLATE: &str = "import_prompt.tera";

/// Render the extraction prompt for a document's text
pub fn render_prompt(document_text: &str, config: &Config) -> Result<String, ImportError> {
    let file = EmbeddedTemplates::get(PROMPT_TEMPLATE)
        .ok_or(ImportError::MissingAsset(PROMPT_TEMPLATE))?;
    let template = std::str::from_utf8(&file.data)
        .map_err(|err| ImportError::Parse(err.to_string()))?
        .to_string();

    let items: Vec<&str> = config.catalog.items().collect();
    let mut context = tera::Context::new();
    context.insert("items", &items.join(", "));
    context.insert("campuses", &config.campuses.join(", "));
    context.insert("document_text", document_text);

    Ok(Tera::one_off(&template, &context, false)?)
}

pub trait StructuredExtractor {
    /// Turn a prompt into the structured JSON payload
    fn extract(&self, prompt: &str) -> Result<Value, ImportError>;
}

/// Client for the Gemini `generateContent` endpoint
pub struct GeminiExtractor {
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiExtractor {
    const BASE_URL: &'static str = "https://generativelanguage.googleapis.com/v1beta";

    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: model.into(),
            base_url: Self::BASE_URL.to_string(),
        }
    }

    /// Build a client from the configured credential variable, if set
    pub fn from_env(config: &Config) -> Option<Self> {
        let api_key = std::env::var(&config.extraction.api_key_env).ok()?;
        if api_key.trim().is_empty() {
            return None;
        }
        Some(Self::new(api_key, config.extraction.model.clone()))
    }

    #[cfg(test)]
    fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        )
    }
}

impl StructuredExtractor for GeminiExtractor {
    fn extract(&self, prompt: &str) -> Result<Value, ImportError> {
        let body = serde_json::json!({
            "contents": [{"parts": [{"text": prompt}]}],
            "generationConfig": {"responseMimeType": "application/json"},
        });

        let response = ureq::post(&self.endpoint())
            .set("Content-Type", "application/json")
            .send_json(body)
            .map_err(|err| ImportError::Http(err.to_string()))?;

        let envelope: Value = response
            .into_json()
            .map_err(|err| ImportError::Parse(err.to_string()))?;

        let text = envelope
            .pointer("/candidates/0/content/parts/0/text")
            .and_then(Value::as_str)
            .ok_or_else(|| {
                ImportError::Parse("response carries no candidate text".to_string())
            })?;

        serde_json::from_str(text.trim())
            .map_err(|err| ImportError::Parse(format!("candidate text is not JSON: {err}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_carries_vocabulary_and_document() {
        let config = Config::with_defaults();
        let prompt = render_prompt("REQ 17: two reams of paper", &config).unwrap();

        assert!(prompt.contains("A4 Paper"));
        assert!(prompt.contains("Campus1"));
        assert!(prompt.contains("REQ 17: two reams of paper"));
        assert!(prompt.contains("YYYY-MM-DD"));
    }

    #[test]
    fn test_from_env_requires_a_non_empty_credential() {
        let mut config = Config::with_defaults();
        config.extraction.api_key_env = "SIT_TEST_MISSING_KEY".to_string();
        assert!(GeminiExtractor::from_env(&config).is_none());
    }

    #[test]
    fn test_endpoint_includes_model_and_key() {
        let client = GeminiExtractor::new("secret", "gemini-2.5-flash")
            .with_base_url("http://localhost:1");
        assert_eq!(
            client.endpoint(),
            "http://localhost:1/models/gemini-2.5-flash:generateContent?key=secret"
        );
    }
}
