use std::fmt;

pub const DEFAULT_IMAGE_KEYWORDS: &[&str] =
    &["image", "picture", "photo", "draw", "generate an image"];

/// Which model a prompt is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    Text,
    Image,
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Intent::Text => f.write_str("Text"),
            Intent::Image => f.write_str("Image"),
        }
    }
}

/// Keyword router: a prompt mentioning any image keyword, anywhere and in
/// any case, is an image request. Everything else is text.
#[derive(Debug, Clone)]
pub struct IntentClassifier {
    keywords: Vec<String>,
}

impl Default for IntentClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_IMAGE_KEYWORDS)
    }
}

impl IntentClassifier {
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        // an empty keyword would match every prompt
        let keywords = keywords
            .into_iter()
            .map(|keyword| keyword.as_ref().trim().to_lowercase())
            .filter(|keyword| !keyword.is_empty())
            .collect();
        Self { keywords }
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn classify(&self, text: &str) -> Intent {
        let lowered = text.to_lowercase();
        if self
            .keywords
            .iter()
            .any(|keyword| lowered.contains(keyword.as_str()))
        {
            Intent::Image
        } else {
            Intent::Text
        }
    }
}

/// Classifies with the default keyword set.
pub fn classify(text: &str) -> Intent {
    IntentClassifier::default().classify(text)
}
