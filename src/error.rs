use thiserror::Error;

/// One variant per failure kind so callers can branch on the kind itself,
/// never on message text.
#[derive(Debug, Error)]
pub enum StickerError {
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Authentication error: {0}")]
    Auth(String),
    #[error("Billing error: {0}")]
    Billing(String),
    #[error("Rate limit error: {0}")]
    RateLimit(String),
    #[error("Network error: {0}")]
    Network(String),
    #[error("Generation error: {0}")]
    Generation(String),
    #[error("Timeout error: {0}")]
    Timeout(String),
    #[error("Cancelled: {0}")]
    Cancelled(String),
    #[error("I/O error: {0}")]
    Io(String),
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<std::io::Error> for StickerError {
    fn from(err: std::io::Error) -> Self {
        StickerError::Io(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, StickerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_the_kind() {
        let err = StickerError::Config("API key is required".into());
        assert_eq!(err.to_string(), "Configuration error: API key is required");
    }

    #[test]
    fn io_errors_convert() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.png");
        let err: StickerError = io.into();
        assert!(matches!(err, StickerError::Io(msg) if msg.contains("missing.png")));
    }
}
