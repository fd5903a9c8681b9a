use thiserror::Error;

/// Errors raised at component boundaries.
///
/// Gateways return these instead of folding failures into their success
/// value; the dispatcher and summarizer decide how to surface them.
#[derive(Debug, Error)]
pub enum Error {
    #[error("No {provider} {credential} provided.")]
    MissingCredential {
        provider: &'static str,
        credential: &'static str,
    },

    #[error("Error {status}: {body}")]
    Status { status: u16, body: String },

    #[error("request failed: {}", with_sources(.0))]
    Http(#[from] reqwest::Error),

    #[error("malformed response: {0}")]
    Malformed(String),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("image decode failed: {0}")]
    Image(#[from] image::ImageError),

    #[error("feed parse failed: {0}")]
    Feed(#[from] feed_rs::parser::ParseFeedError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn missing_text_key() -> Self {
        Error::MissingCredential {
            provider: "Gemini",
            credential: "API key",
        }
    }

    pub fn missing_image_token() -> Self {
        Error::MissingCredential {
            provider: "Hugging Face",
            credential: "token",
        }
    }

    pub fn is_missing_credential(&self) -> bool {
        matches!(self, Error::MissingCredential { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;

// reqwest keeps the useful part (connection refused, timed out, bad URL) in
// the source chain; its own Display is just the kind and URL.
fn with_sources(err: &dyn std::error::Error) -> String {
    let mut out = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !out.contains(&text) {
            out.push_str(": ");
            out.push_str(&text);
        }
        source = cause.source();
    }
    out
}
