use crate::{error::Result, models::GenerationSettings};
use async_trait::async_trait;

/// Backend seam shared by the polling client and the stand-in generator, so
/// callers stay agnostic to which backend is wired in.
#[async_trait]
pub trait StickerGenerator: Send + Sync {
    async fn generate_chibi_sticker(
        &self,
        image: &[u8],
        settings: &GenerationSettings,
    ) -> Result<String>;
}
