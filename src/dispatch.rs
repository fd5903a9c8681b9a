use tracing::info;

use crate::error::Result;
use crate::gateway::image::{GeneratedImage, ImageGateway};
use crate::gateway::text::{failure_text, TextGateway};
use crate::intent::{Intent, IntentClassifier};

/// What one routed request produced. Content and error are never both set.
#[derive(Debug)]
pub enum DispatchResult {
    Text {
        content: Option<String>,
        error: Option<String>,
    },
    Image {
        image: Option<GeneratedImage>,
        error: Option<String>,
    },
}

impl DispatchResult {
    pub fn from_text(result: Result<String>) -> Self {
        match result {
            Ok(content) => DispatchResult::Text {
                content: Some(content),
                error: None,
            },
            Err(err) => DispatchResult::Text {
                content: None,
                error: Some(failure_text(&err)),
            },
        }
    }

    pub fn from_image(result: Result<GeneratedImage>) -> Self {
        match result {
            Ok(image) => DispatchResult::Image {
                image: Some(image),
                error: None,
            },
            Err(err) => DispatchResult::Image {
                image: None,
                error: Some(err.to_string()),
            },
        }
    }

    pub fn intent(&self) -> Intent {
        match self {
            DispatchResult::Text { .. } => Intent::Text,
            DispatchResult::Image { .. } => Intent::Image,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            DispatchResult::Text { error, .. } | DispatchResult::Image { error, .. } => {
                error.as_deref()
            }
        }
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            DispatchResult::Text { content, .. } => content.as_deref(),
            DispatchResult::Image { .. } => None,
        }
    }

    pub fn image(&self) -> Option<&GeneratedImage> {
        match self {
            DispatchResult::Image { image, .. } => image.as_ref(),
            DispatchResult::Text { .. } => None,
        }
    }
}

/// Routes a prompt to exactly one gateway.
pub struct Dispatcher<T, I> {
    classifier: IntentClassifier,
    text: T,
    image: I,
}

impl<T: TextGateway, I: ImageGateway> Dispatcher<T, I> {
    pub fn new(classifier: IntentClassifier, text: T, image: I) -> Self {
        Self {
            classifier,
            text,
            image,
        }
    }

    pub fn handle(&self, user_text: &str, image_credential: &str) -> DispatchResult {
        let intent = self.classifier.classify(user_text);
        info!(%intent, "dispatching request");
        match intent {
            Intent::Text => DispatchResult::from_text(self.text.generate_text(user_text)),
            Intent::Image => {
                DispatchResult::from_image(self.image.generate_image(user_text, image_credential))
            }
        }
    }
}
