pub mod config;
pub mod error;
pub mod generator;
pub mod logger;
pub mod mock;
pub mod models;
pub mod replicate;
pub mod storage;

pub use config::ReplicateConfig;
pub use error::{Result, StickerError};
pub use generator::StickerGenerator;
pub use mock::MockChibiGenerator;
pub use models::{
    ArtStyle, Emotion, GeneratedImage, GenerationSettings, Prediction, PredictionStatus,
    StickerStyle,
};
pub use replicate::{HttpTransport, PredictionTransport, ReplicateClient, MAX_IMAGE_BYTES};
pub use storage::{MemoryStore, StickerStore, HISTORY_CAPACITY};
