//! Image → natural-language description via the vision model.

use crate::llm::{ChatMessage, CompletionClient, CompletionError};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::DynamicImage;
use std::io::Cursor;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, instrument};

pub const CAPTION_INSTRUCTION: &str = "Describe this clothing item in detail.";

#[derive(Debug, Error)]
pub enum CaptionError {
    #[error("Failed to encode image for transport: {0}")]
    Encode(#[from] image::ImageError),
    #[error("Vision completion failed: {0}")]
    Completion(#[from] CompletionError),
}

#[async_trait::async_trait]
pub trait Captioning: Send + Sync {
    async fn caption(&self, image: &DynamicImage) -> Result<String, CaptionError>;
}

pub struct Captioner {
    client: Arc<CompletionClient>,
    model: String,
}

impl Captioner {
    pub fn new(client: Arc<CompletionClient>, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }

    /// Re-encode as JPEG for transport. JPEG has no alpha channel, so the
    /// image is flattened to RGB first.
    fn encode_jpeg(image: &DynamicImage) -> Result<String, image::ImageError> {
        let mut buffer = Cursor::new(Vec::new());
        image
            .to_rgb8()
            .write_to(&mut buffer, image::ImageFormat::Jpeg)?;
        Ok(STANDARD.encode(buffer.into_inner()))
    }
}

#[async_trait::async_trait]
impl Captioning for Captioner {
    #[instrument(skip(self, image))]
    async fn caption(&self, image: &DynamicImage) -> Result<String, CaptionError> {
        let encoded = Self::encode_jpeg(image)?;
        let data_uri = format!("data:image/jpeg;base64,{encoded}");

        let messages = vec![ChatMessage::user_with_image(CAPTION_INSTRUCTION, data_uri)];
        let description = self.client.complete(&self.model, messages).await?;
        info!(chars = description.len(), "generated image description");
        Ok(description)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_jpeg_flattens_alpha_and_round_trips() {
        let image = DynamicImage::new_rgba8(4, 4);
        let encoded = Captioner::encode_jpeg(&image).unwrap();
        let bytes = STANDARD.decode(encoded).unwrap();
        // JPEG magic bytes
        assert_eq!(&bytes[..2], &[0xFF, 0xD8]);
    }
}
