//! Gateways each wrap exactly one external model API behind a narrow
//! call/result contract.

pub mod image;
pub mod text;

pub use self::image::{GeneratedImage, HuggingFaceClient, ImageGateway};
pub use self::text::{GeminiClient, TextGateway};
