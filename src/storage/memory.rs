use crate::{
    error::Result,
    models::GeneratedImage,
    storage::traits::{StickerStore, HISTORY_CAPACITY},
};
use async_trait::async_trait;
use std::sync::Mutex;

/// In-memory [`StickerStore`] backend.
pub struct MemoryStore {
    state: Mutex<MemoryState>,
}

#[derive(Default)]
struct MemoryState {
    api_key: Option<String>,
    history: Vec<GeneratedImage>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(MemoryState::default()),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StickerStore for MemoryStore {
    async fn get_api_key(&self) -> Result<Option<String>> {
        Ok(self.state.lock().unwrap().api_key.clone())
    }

    async fn save_api_key(&self, api_key: &str) -> Result<()> {
        self.state.lock().unwrap().api_key = Some(api_key.to_string());
        Ok(())
    }

    async fn clear_api_key(&self) -> Result<()> {
        self.state.lock().unwrap().api_key = None;
        Ok(())
    }

    async fn save_generated_image(&self, record: GeneratedImage) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.history.insert(0, record);
        state.history.truncate(HISTORY_CAPACITY);
        Ok(())
    }

    async fn generated_images(&self) -> Result<Vec<GeneratedImage>> {
        Ok(self.state.lock().unwrap().history.clone())
    }
}
