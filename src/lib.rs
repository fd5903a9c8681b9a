pub mod arxiv;
pub mod chunk;
pub mod config;
pub mod digest;
pub mod dispatch;
pub mod error;
pub mod gateway;
pub mod intent;
pub mod lab;
pub mod report;
pub mod scrape;
pub mod summarize;

pub use arxiv::{ArxivClient, Paper, PaperSearch};
pub use chunk::{chunk_text, Chunks};
pub use config::{Credentials, Settings};
pub use digest::{DigestEntry, ResearchDigest};
pub use dispatch::{DispatchResult, Dispatcher};
pub use error::{Error, Result};
pub use gateway::{GeminiClient, GeneratedImage, HuggingFaceClient, ImageGateway, TextGateway};
pub use intent::{classify, Intent, IntentClassifier};
pub use lab::Lab;
pub use scrape::{PageFetcher, WebTextExtractor};
pub use summarize::{LongSummary, Summarizer};
