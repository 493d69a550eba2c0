use crate::{error::Result, models::GeneratedImage};
use async_trait::async_trait;

/// Most recent generations a store keeps; the oldest entry is evicted first.
pub const HISTORY_CAPACITY: usize = 10;

/// Key-value persistence contract consumed by the client's callers: the
/// cached API key plus a bounded, newest-first generation history. The
/// generation core writes to it after success and never reads it mid-flight.
#[async_trait]
pub trait StickerStore: Send + Sync {
    async fn get_api_key(&self) -> Result<Option<String>>;

    async fn save_api_key(&self, api_key: &str) -> Result<()>;

    async fn clear_api_key(&self) -> Result<()>;

    /// Prepends the record; history holds at most [`HISTORY_CAPACITY`]
    /// entries.
    async fn save_generated_image(&self, record: GeneratedImage) -> Result<()>;

    /// Newest first.
    async fn generated_images(&self) -> Result<Vec<GeneratedImage>>;
}
