use std::env;
use std::time::Duration;

pub const DEFAULT_API_BASE: &str = "https://api.replicate.com/v1";
pub const DEFAULT_MODEL_VERSION: &str = "fofr/chibi-character:latest";
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);
pub const DEFAULT_MAX_POLL_ATTEMPTS: u32 = 60;

#[derive(Debug, Clone)]
pub struct ReplicateConfig {
    pub api_key: Option<String>,
    pub api_base: String,
    pub model_version: String,
    pub poll_interval: Duration,
    pub max_poll_attempts: u32,
}

impl Default for ReplicateConfig {
    fn default() -> Self {
        ReplicateConfig {
            api_key: None,
            api_base: DEFAULT_API_BASE.to_string(),
            model_version: DEFAULT_MODEL_VERSION.to_string(),
            poll_interval: DEFAULT_POLL_INTERVAL,
            max_poll_attempts: DEFAULT_MAX_POLL_ATTEMPTS,
        }
    }
}

impl ReplicateConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let api_key = env::var("REPLICATE_API_KEY")
            .or_else(|_| env::var("REPLICATE_API_TOKEN"))
            .ok()
            .filter(|key| !key.trim().is_empty());
        let api_base = env::var("REPLICATE_API_BASE")
            .ok()
            .map(|base| base.trim().trim_end_matches('/').to_string())
            .filter(|base| !base.is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());

        ReplicateConfig {
            api_key,
            api_base,
            ..Self::default()
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_model_version(mut self, model_version: impl Into<String>) -> Self {
        self.model_version = model_version.into();
        self
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn with_max_poll_attempts(mut self, attempts: u32) -> Self {
        self.max_poll_attempts = attempts;
        self
    }
}
