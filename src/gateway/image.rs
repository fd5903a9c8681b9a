use std::fmt;
use std::fs;
use std::path::Path;
use std::time::Duration;

use image::{DynamicImage, ImageFormat};
use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use reqwest::StatusCode;
use serde_json::json;
use tracing::{debug, info};

use crate::error::{Error, Result};

pub const DEFAULT_IMAGE_ENDPOINT: &str =
    "https://router.huggingface.co/hf-inference/models/stabilityai/stable-diffusion-xl-base-1.0";
pub const IMAGE_TIMEOUT: Duration = Duration::from_secs(90);

/// A decoded raster together with the encoded bytes it came from.
#[derive(Clone)]
pub struct GeneratedImage {
    encoded: Vec<u8>,
    format: ImageFormat,
    image: DynamicImage,
}

impl GeneratedImage {
    /// Decodes PNG (or any other enabled format) bytes.
    pub fn decode(encoded: Vec<u8>) -> Result<Self> {
        let format = image::guess_format(&encoded)?;
        let image = image::load_from_memory_with_format(&encoded, format)?;
        Ok(Self {
            encoded,
            format,
            image,
        })
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn format(&self) -> ImageFormat {
        self.format
    }

    pub fn encoded(&self) -> &[u8] {
        &self.encoded
    }

    /// Writes the encoded bytes exactly as received.
    pub fn save(&self, path: &Path) -> Result<()> {
        fs::write(path, &self.encoded)?;
        Ok(())
    }
}

impl fmt::Debug for GeneratedImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeneratedImage")
            .field("format", &self.format)
            .field("width", &self.width())
            .field("height", &self.height())
            .field("bytes", &self.encoded.len())
            .finish()
    }
}

/// Prompt plus caller-supplied credential in, decoded image out.
pub trait ImageGateway {
    fn generate_image(&self, prompt: &str, credential: &str) -> Result<GeneratedImage>;
}

impl<T: ImageGateway + ?Sized> ImageGateway for &T {
    fn generate_image(&self, prompt: &str, credential: &str) -> Result<GeneratedImage> {
        (**self).generate_image(prompt, credential)
    }
}

/// Hugging Face inference router client for a fixed diffusion model.
#[derive(Clone)]
pub struct HuggingFaceClient {
    http: Client,
    endpoint: String,
}

impl HuggingFaceClient {
    pub fn new(http: Client, endpoint: impl Into<String>) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
        }
    }
}

impl ImageGateway for HuggingFaceClient {
    fn generate_image(&self, prompt: &str, credential: &str) -> Result<GeneratedImage> {
        if credential.is_empty() {
            return Err(Error::missing_image_token());
        }
        info!(endpoint = %self.endpoint, "requesting image");

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(credential)
            .header(ACCEPT, "image/png")
            .json(&json!({ "inputs": prompt }))
            .timeout(IMAGE_TIMEOUT)
            .send()?;
        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text()?;
            return Err(Error::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes()?;
        debug!(bytes = bytes.len(), "decoding image response");
        GeneratedImage::decode(bytes.to_vec())
    }
}
