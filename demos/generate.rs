use chibigen::{
    ArtStyle, GeneratedImage, GenerationSettings, MemoryStore, MockChibiGenerator,
    ReplicateClient, ReplicateConfig, StickerGenerator, StickerStore, StickerStyle,
};
use std::env;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    match dotenv::dotenv() {
        Ok(_) => log::info!(".env file loaded"),
        Err(_) => log::warn!("No .env file found, using system environment variables"),
    }
    chibigen::logger::init()?;

    let image_path = env::args()
        .nth(1)
        .unwrap_or_else(|| "subject.png".to_string());
    let image = std::fs::read(&image_path)?;
    let settings = GenerationSettings::new(StickerStyle::FullBody, ArtStyle::Chibi);

    let config = ReplicateConfig::from_env();
    let generator: Box<dyn StickerGenerator> = if config.api_key.is_some() {
        Box::new(ReplicateClient::new(config))
    } else {
        log::warn!("REPLICATE_API_KEY not set, falling back to the mock generator");
        Box::new(MockChibiGenerator::new())
    };

    let url = generator.generate_chibi_sticker(&image, &settings).await?;
    log::info!("Sticker ready: {}", url);

    let store = MemoryStore::new();
    store
        .save_generated_image(GeneratedImage::new(url, settings))
        .await?;
    log::info!(
        "History now holds {} record(s)",
        store.generated_images().await?.len()
    );

    Ok(())
}
