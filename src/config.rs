use std::fmt;

use serde::Deserialize;

use crate::arxiv::DEFAULT_ARXIV_ENDPOINT;
use crate::chunk::DEFAULT_CHUNK_WORDS;
use crate::error::{Error, Result};
use crate::gateway::image::DEFAULT_IMAGE_ENDPOINT;
use crate::gateway::text::{DEFAULT_TEXT_ENDPOINT, DEFAULT_TEXT_MODEL};
use crate::intent::DEFAULT_IMAGE_KEYWORDS;

/// Operator settings, usually read from a YAML file. Every field has a
/// default so a partial file (or none at all) is valid.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub user_agent: String,
    pub text: TextSettings,
    pub image: ImageSettings,
    pub search: SearchSettings,
    pub intent: IntentSettings,
    pub summarize: SummarizeSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            user_agent: format!("agents-lab/{}", env!("CARGO_PKG_VERSION")),
            text: TextSettings::default(),
            image: ImageSettings::default(),
            search: SearchSettings::default(),
            intent: IntentSettings::default(),
            summarize: SummarizeSettings::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TextSettings {
    pub endpoint: String,
    pub model: String,
}

impl Default for TextSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_TEXT_ENDPOINT.to_string(),
            model: DEFAULT_TEXT_MODEL.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ImageSettings {
    pub endpoint: String,
}

impl Default for ImageSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_IMAGE_ENDPOINT.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    pub endpoint: String,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ARXIV_ENDPOINT.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct IntentSettings {
    pub image_keywords: Vec<String>,
}

impl Default for IntentSettings {
    fn default() -> Self {
        Self {
            image_keywords: DEFAULT_IMAGE_KEYWORDS
                .iter()
                .map(|keyword| keyword.to_string())
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SummarizeSettings {
    /// Maximum words per chunk handed to a single summary call.
    pub max_words: usize,
}

impl Default for SummarizeSettings {
    fn default() -> Self {
        Self {
            max_words: DEFAULT_CHUNK_WORDS,
        }
    }
}

/// API secrets supplied by the operator for one session.
#[derive(Clone, Default)]
pub struct Credentials {
    text_api_key: Option<String>,
    image_token: Option<String>,
}

impl Credentials {
    /// Blank values count as absent.
    pub fn new(text_api_key: Option<String>, image_token: Option<String>) -> Self {
        Self {
            text_api_key: non_blank(text_api_key),
            image_token: non_blank(image_token),
        }
    }

    pub fn text_api_key(&self) -> Result<&str> {
        self.text_api_key
            .as_deref()
            .ok_or_else(Error::missing_text_key)
    }

    /// Empty when absent; the image gateway reports the missing token itself.
    pub fn image_token(&self) -> &str {
        self.image_token.as_deref().unwrap_or("")
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("text_api_key", &self.text_api_key.as_ref().map(|_| "***"))
            .field("image_token", &self.image_token.as_ref().map(|_| "***"))
            .finish()
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}
