use reqwest::blocking::Client;
use serde_json::json;
use tracing::debug;

use crate::error::{Error, Result};

pub const DEFAULT_TEXT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_TEXT_MODEL: &str = "gemini-2.5-flash";

/// One prompt in, one completion out. Exactly one outbound call per
/// invocation and no retries.
pub trait TextGateway {
    fn generate_text(&self, prompt: &str) -> Result<String>;
}

impl<T: TextGateway + ?Sized> TextGateway for &T {
    fn generate_text(&self, prompt: &str) -> Result<String> {
        (**self).generate_text(prompt)
    }
}

/// Renders a text-generation failure the way it is shown in place of model
/// output.
pub fn failure_text(err: &Error) -> String {
    format!("Text generation error: {err}")
}

/// Gemini `generateContent` client. The model is fixed at construction.
#[derive(Clone)]
pub struct GeminiClient {
    http: Client,
    endpoint: String,
    model: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(
        http: Client,
        endpoint: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
            model: model.into(),
            api_key: api_key.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

impl TextGateway for GeminiClient {
    fn generate_text(&self, prompt: &str) -> Result<String> {
        let url = format!(
            "{}/models/{}:generateContent",
            self.endpoint.trim_end_matches('/'),
            self.model
        );
        let body = json!({
            "contents": [
                { "parts": [ { "text": prompt } ] }
            ]
        });
        debug!(model = %self.model, prompt_chars = prompt.len(), "sending generateContent");

        let response = self
            .http
            .post(url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()?;
        let status = response.status();
        let text = response.text()?;
        if !status.is_success() {
            return Err(Error::Status {
                status: status.as_u16(),
                body: text,
            });
        }
        extract_candidate_text(&text)
    }
}

fn extract_candidate_text(payload: &str) -> Result<String> {
    let value: serde_json::Value = serde_json::from_str(payload)?;

    let mut parts = Vec::new();
    let first_candidate_parts = value
        .get("candidates")
        .and_then(|candidates| candidates.as_array())
        .and_then(|candidates| candidates.first())
        .and_then(|candidate| candidate.get("content"))
        .and_then(|content| content.get("parts"))
        .and_then(|parts| parts.as_array());
    if let Some(candidate_parts) = first_candidate_parts {
        for part in candidate_parts {
            if let Some(text) = part.get("text").and_then(|t| t.as_str()) {
                let trimmed = text.trim();
                if !trimmed.is_empty() {
                    parts.push(trimmed.to_string());
                }
            }
        }
    }

    if parts.is_empty() {
        return Err(Error::Malformed(format!(
            "response missing candidate text: {}",
            truncate_preview(payload, 1000)
        )));
    }
    Ok(parts.join("\n"))
}

fn truncate_preview(input: &str, max: usize) -> String {
    if input.len() <= max {
        return input.to_string();
    }
    let mut end = max;
    while end > 0 && !input.is_char_boundary(end) {
        end -= 1;
    }
    let mut out = input[..end].to_string();
    out.push_str("...");
    out
}
