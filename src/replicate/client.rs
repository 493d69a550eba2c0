use crate::{
    config::ReplicateConfig,
    error::{Result, StickerError},
    generator::StickerGenerator,
    models::{
        GenerationSettings, Prediction, PredictionInput, PredictionRequest, PredictionStatus,
    },
    replicate::transport::{HttpTransport, PredictionTransport},
};
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

pub const MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;

const API_KEY_PREFIX: &str = "r8_";
const NEGATIVE_PROMPT: &str = "blurry, low quality, distorted, text, watermark";

/// Client for the asynchronous predictions API. Bound to one API key for its
/// whole lifetime; construct a new client to change keys. Calls share no
/// mutable state, so independent generations may run concurrently on one
/// instance.
pub struct ReplicateClient {
    config: ReplicateConfig,
    transport: Arc<dyn PredictionTransport>,
}

impl ReplicateClient {
    pub fn new(config: ReplicateConfig) -> Self {
        let transport = Arc::new(HttpTransport::new(config.api_base.clone()));
        Self { config, transport }
    }

    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self::new(ReplicateConfig::new().with_api_key(api_key))
    }

    /// Swap the HTTP transport for another implementation of the seam.
    pub fn with_transport(
        config: ReplicateConfig,
        transport: Arc<dyn PredictionTransport>,
    ) -> Self {
        Self { config, transport }
    }

    /// Submits the image and settings as a prediction job and polls it to a
    /// terminal state. Returns the first output reference on success.
    pub async fn generate_chibi_sticker(
        &self,
        image: &[u8],
        settings: &GenerationSettings,
    ) -> Result<String> {
        self.generate_chibi_sticker_with_cancel(image, settings, &CancellationToken::new())
            .await
    }

    /// Like [`generate_chibi_sticker`](Self::generate_chibi_sticker), but the
    /// polling loop stops with `StickerError::Cancelled` once `cancel` fires.
    /// The token is checked at the top of every tick and raced against the
    /// inter-tick wait.
    pub async fn generate_chibi_sticker_with_cancel(
        &self,
        image: &[u8],
        settings: &GenerationSettings,
        cancel: &CancellationToken,
    ) -> Result<String> {
        let api_key = self.validated_api_key()?;

        if image.len() > MAX_IMAGE_BYTES {
            return Err(StickerError::Validation(
                "Image is too large. Use an image smaller than 10MB".into(),
            ));
        }

        let data_uri = encode_data_uri(image)?;
        let request = PredictionRequest {
            version: self.config.model_version.clone(),
            input: PredictionInput {
                image: data_uri,
                style: settings.style_prompt(),
                negative_prompt: NEGATIVE_PROMPT.into(),
            },
        };

        log::info!(
            "Submitting prediction with model: {}",
            self.config.model_version
        );

        let prediction = self.transport.create_prediction(api_key, &request).await?;
        log::debug!("Prediction {} accepted, polling for completion", prediction.id);

        self.poll_for_completion(api_key, prediction, cancel).await
    }

    fn validated_api_key(&self) -> Result<&str> {
        let api_key = match self.config.api_key.as_deref() {
            Some(key) if !key.is_empty() => key,
            _ => return Err(StickerError::Config("API key is required".into())),
        };
        if !api_key.starts_with(API_KEY_PREFIX) {
            return Err(StickerError::Config(format!(
                "Invalid API key format. Replicate API keys start with \"{}\"",
                API_KEY_PREFIX
            )));
        }
        Ok(api_key)
    }

    async fn poll_for_completion(
        &self,
        api_key: &str,
        submitted: Prediction,
        cancel: &CancellationToken,
    ) -> Result<String> {
        // A job observed terminal is never polled again, including one that
        // finished within the submission response itself.
        if let Some(outcome) = terminal_outcome(&submitted) {
            return outcome;
        }

        let mut attempts = 0;
        while attempts < self.config.max_poll_attempts {
            if cancel.is_cancelled() {
                return Err(StickerError::Cancelled("generation cancelled".into()));
            }

            let prediction = self.transport.get_prediction(api_key, &submitted.id).await?;
            if let Some(outcome) = terminal_outcome(&prediction) {
                return outcome;
            }

            tokio::select! {
                _ = cancel.cancelled() => {
                    return Err(StickerError::Cancelled("generation cancelled".into()));
                }
                _ = tokio::time::sleep(self.config.poll_interval) => {}
            }
            attempts += 1;
        }

        log::warn!(
            "Prediction {} still pending after {} attempts, giving up",
            submitted.id,
            self.config.max_poll_attempts
        );
        Err(StickerError::Timeout("generation timeout".into()))
    }
}

#[async_trait]
impl StickerGenerator for ReplicateClient {
    async fn generate_chibi_sticker(
        &self,
        image: &[u8],
        settings: &GenerationSettings,
    ) -> Result<String> {
        ReplicateClient::generate_chibi_sticker(self, image, settings).await
    }
}

fn terminal_outcome(prediction: &Prediction) -> Option<Result<String>> {
    match prediction.status {
        PredictionStatus::Succeeded => Some(
            prediction
                .output
                .as_ref()
                .and_then(|output| output.first().cloned())
                .ok_or_else(|| {
                    StickerError::Unknown("prediction succeeded but returned no output".into())
                }),
        ),
        PredictionStatus::Failed => Some(Err(StickerError::Generation(
            prediction
                .error
                .clone()
                .unwrap_or_else(|| "generation failed".into()),
        ))),
        _ => None,
    }
}

/// Encodes the image as a self-describing data URI. The MIME type is sniffed
/// from magic numbers; bytes that match no supported format fail validation.
pub fn encode_data_uri(image: &[u8]) -> Result<String> {
    let mime = sniff_image_mime(image).ok_or_else(|| {
        StickerError::Validation(
            "Unreadable image data. Use a PNG, JPEG, GIF or WebP file".into(),
        )
    })?;
    Ok(format!("data:{};base64,{}", mime, BASE64.encode(image)))
}

fn sniff_image_mime(bytes: &[u8]) -> Option<&'static str> {
    if bytes.starts_with(&[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a]) {
        Some("image/png")
    } else if bytes.starts_with(&[0xff, 0xd8, 0xff]) {
        Some("image/jpeg")
    } else if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
        Some("image/gif")
    } else if bytes.len() >= 12 && bytes.starts_with(b"RIFF") && &bytes[8..12] == b"WEBP" {
        Some("image/webp")
    } else {
        None
    }
}
