use crate::{
    error::Result,
    generator::StickerGenerator,
    models::{Emotion, GenerationSettings},
};
use async_trait::async_trait;
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::sync::Mutex;
use std::time::Duration;

/// Fixed pool of sample references the stand-in draws from.
pub const SAMPLE_POOL: [&str; 9] = [
    // Happy expressions
    "https://images.pexels.com/photos/8923533/pexels-photo-8923533.jpeg?auto=compress&cs=tinysrgb&w=400",
    "https://images.pexels.com/photos/8923534/pexels-photo-8923534.jpeg?auto=compress&cs=tinysrgb&w=400",
    "https://images.pexels.com/photos/8923535/pexels-photo-8923535.jpeg?auto=compress&cs=tinysrgb&w=400",
    // Different emotions
    "https://images.pexels.com/photos/8923536/pexels-photo-8923536.jpeg?auto=compress&cs=tinysrgb&w=400",
    "https://images.pexels.com/photos/8923537/pexels-photo-8923537.jpeg?auto=compress&cs=tinysrgb&w=400",
    "https://images.pexels.com/photos/8923538/pexels-photo-8923538.jpeg?auto=compress&cs=tinysrgb&w=400",
    // More variations
    "https://images.pexels.com/photos/8923539/pexels-photo-8923539.jpeg?auto=compress&cs=tinysrgb&w=400",
    "https://images.pexels.com/photos/8923540/pexels-photo-8923540.jpeg?auto=compress&cs=tinysrgb&w=400",
    "https://images.pexels.com/photos/8923541/pexels-photo-8923541.jpeg?auto=compress&cs=tinysrgb&w=400",
];

/// Deterministic stand-in for the remote client: same contract, simulated
/// latency, no network. Ignores the image content and never fails.
pub struct MockChibiGenerator {
    rng: Mutex<StdRng>,
    min_delay: Duration,
    max_delay: Duration,
    emotion_set_delay: Duration,
}

impl MockChibiGenerator {
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    /// Seeded random source for reproducible runs.
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        Self {
            rng: Mutex::new(rng),
            min_delay: Duration::from_millis(1500),
            max_delay: Duration::from_millis(2500),
            emotion_set_delay: Duration::from_secs(2),
        }
    }

    /// Overrides the simulated latency; tests pass zero.
    pub fn with_latency(
        mut self,
        min_delay: Duration,
        max_delay: Duration,
        emotion_set_delay: Duration,
    ) -> Self {
        self.min_delay = min_delay;
        self.max_delay = max_delay;
        self.emotion_set_delay = emotion_set_delay;
        self
    }

    /// Waits a randomized delay, then returns one reference drawn uniformly
    /// from the sample pool.
    pub async fn generate_chibi_sticker(
        &self,
        _image: &[u8],
        _settings: &GenerationSettings,
    ) -> Result<String> {
        let (delay, index) = {
            let mut rng = self.rng.lock().unwrap();
            let spread = self.max_delay.saturating_sub(self.min_delay).as_millis() as u64;
            let jitter = if spread == 0 {
                Duration::ZERO
            } else {
                Duration::from_millis(rng.gen_range(0..spread))
            };
            (self.min_delay + jitter, rng.gen_range(0..SAMPLE_POOL.len()))
        };

        tokio::time::sleep(delay).await;
        log::debug!("Mock generator served pool entry {}", index);
        Ok(SAMPLE_POOL[index].to_string())
    }

    /// Waits a fixed delay, then returns one reference per entry of
    /// [`Emotion::VARIANT_SET`], in that order, so callers can zip the two.
    pub async fn generate_emotion_set(
        &self,
        _image: &[u8],
        _settings: &GenerationSettings,
    ) -> Result<Vec<String>> {
        tokio::time::sleep(self.emotion_set_delay).await;
        Ok(Emotion::VARIANT_SET
            .iter()
            .enumerate()
            .map(|(index, _)| SAMPLE_POOL[index].to_string())
            .collect())
    }
}

impl Default for MockChibiGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StickerGenerator for MockChibiGenerator {
    async fn generate_chibi_sticker(
        &self,
        image: &[u8],
        settings: &GenerationSettings,
    ) -> Result<String> {
        MockChibiGenerator::generate_chibi_sticker(self, image, settings).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ArtStyle, StickerStyle};
    use pretty_assertions::assert_eq;

    fn fast(generator: MockChibiGenerator) -> MockChibiGenerator {
        generator.with_latency(Duration::ZERO, Duration::ZERO, Duration::ZERO)
    }

    fn settings() -> GenerationSettings {
        GenerationSettings::new(StickerStyle::FaceOnly, ArtStyle::Chibi)
    }

    #[tokio::test]
    async fn single_sticker_comes_from_the_pool() {
        let generator = fast(MockChibiGenerator::new());
        let url = generator
            .generate_chibi_sticker(b"ignored", &settings())
            .await
            .unwrap();
        assert!(SAMPLE_POOL.contains(&url.as_str()));
    }

    #[tokio::test]
    async fn seeded_generators_repeat_their_sequence() {
        let first = fast(MockChibiGenerator::with_seed(42));
        let second = fast(MockChibiGenerator::with_seed(42));

        for _ in 0..5 {
            let a = first
                .generate_chibi_sticker(b"ignored", &settings())
                .await
                .unwrap();
            let b = second
                .generate_chibi_sticker(b"ignored", &settings())
                .await
                .unwrap();
            assert_eq!(a, b);
        }
    }

    #[tokio::test]
    async fn emotion_set_is_six_references_in_fixed_order() {
        let generator = fast(MockChibiGenerator::with_seed(7));

        for _ in 0..3 {
            let set = generator
                .generate_emotion_set(b"ignored", &settings())
                .await
                .unwrap();
            assert_eq!(set.len(), Emotion::VARIANT_SET.len());
            let expected: Vec<String> =
                SAMPLE_POOL[..6].iter().map(|url| url.to_string()).collect();
            assert_eq!(set, expected);
        }
    }
}
