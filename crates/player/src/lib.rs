pub mod embed;
pub mod session;

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum PlayerError {
    #[error("invalid id: {0}")]
    InvalidId(String),
    #[error("retries exhausted after {0} attempts")]
    RetriesExhausted(u32),
    #[error("player is not in a failed state")]
    NotFailed,
}

/// Embed player configuration.
#[derive(Debug, Clone)]
pub struct PlayerConfig {
    pub embed_host: String,
    pub max_retries: u32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            embed_host: "vidapi.site".to_string(),
            max_retries: 3,
        }
    }
}
