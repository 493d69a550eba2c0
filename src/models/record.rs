use crate::models::GenerationSettings;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One entry of the caller-owned generation history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedImage {
    pub id: String,
    pub url: String,
    /// Wall-clock milliseconds since the Unix epoch.
    pub timestamp: i64,
    pub settings: GenerationSettings,
}

impl GeneratedImage {
    pub fn new(url: impl Into<String>, settings: GenerationSettings) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            url: url.into(),
            timestamp: chrono::Utc::now().timestamp_millis(),
            settings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ArtStyle, StickerStyle};

    #[test]
    fn new_stamps_id_and_timestamp() {
        let settings = GenerationSettings::new(StickerStyle::FullBody, ArtStyle::Chibi);
        let record = GeneratedImage::new("https://cdn.example/a.png", settings);
        assert!(!record.id.is_empty());
        assert!(record.timestamp > 0);
        assert_eq!(record.url, "https://cdn.example/a.png");
    }

    #[test]
    fn records_round_trip_through_json() {
        let settings = GenerationSettings::new(StickerStyle::FaceOnly, ArtStyle::Anime);
        let record = GeneratedImage::new("https://cdn.example/b.png", settings);
        let json = serde_json::to_string(&record).unwrap();
        let back: GeneratedImage = serde_json::from_str(&json).unwrap();
        assert_eq!(record, back);
    }
}
