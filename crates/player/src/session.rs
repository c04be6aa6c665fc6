use tracing::{info, warn};

use crate::embed::cache_busted;
use crate::{PlayerConfig, PlayerError};

/// Source of cache-busting timestamps.
pub trait Clock: Send + Sync {
    fn now_millis(&self) -> i64;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerState {
    Loading,
    Playing,
    /// Load failed; a retry is still allowed.
    Failed,
    /// Load failed with no retries left. The only action is closing the player.
    Exhausted,
}

/// Load/retry bookkeeping for one embedded player.
pub struct PlayerSession<C: Clock = SystemClock> {
    original_url: String,
    current_url: String,
    state: PlayerState,
    retry_count: u32,
    max_retries: u32,
    failed_url: Option<String>,
    clock: C,
}

impl PlayerSession<SystemClock> {
    pub fn new(url: impl Into<String>, config: &PlayerConfig) -> Self {
        Self::with_clock(url, config, SystemClock)
    }
}

impl<C: Clock> PlayerSession<C> {
    pub fn with_clock(url: impl Into<String>, config: &PlayerConfig, clock: C) -> Self {
        let url = url.into();
        Self {
            current_url: url.clone(),
            original_url: url,
            state: PlayerState::Loading,
            retry_count: 0,
            max_retries: config.max_retries,
            failed_url: None,
            clock,
        }
    }

    pub fn state(&self) -> PlayerState {
        self.state
    }

    pub fn current_url(&self) -> &str {
        &self.current_url
    }

    pub fn retry_count(&self) -> u32 {
        self.retry_count
    }

    pub fn failed_url(&self) -> Option<&str> {
        self.failed_url.as_deref()
    }

    pub fn can_retry(&self) -> bool {
        self.retry_count < self.max_retries
    }

    pub fn loaded(&mut self) {
        info!(url = %self.current_url, "video player loaded");
        self.state = PlayerState::Playing;
    }

    pub fn load_failed(&mut self) -> PlayerState {
        warn!(url = %self.current_url, retry = self.retry_count, "video player failed to load");
        self.failed_url = Some(self.current_url.clone());
        self.state = if self.can_retry() {
            PlayerState::Failed
        } else {
            PlayerState::Exhausted
        };
        self.state
    }

    /// Reloads with a fresh `_t` parameter on the original URL and returns the new `src`.
    pub fn retry(&mut self) -> Result<&str, PlayerError> {
        match self.state {
            PlayerState::Failed => {}
            PlayerState::Exhausted => {
                return Err(PlayerError::RetriesExhausted(self.retry_count));
            }
            PlayerState::Loading | PlayerState::Playing => return Err(PlayerError::NotFailed),
        }
        if !self.can_retry() {
            self.state = PlayerState::Exhausted;
            return Err(PlayerError::RetriesExhausted(self.retry_count));
        }

        self.retry_count += 1;
        self.current_url = cache_busted(&self.original_url, self.clock.now_millis());
        self.state = PlayerState::Loading;
        Ok(&self.current_url)
    }

    /// Starts over for a different URL.
    pub fn reset(&mut self, url: impl Into<String>) {
        let url = url.into();
        self.current_url = url.clone();
        self.original_url = url;
        self.state = PlayerState::Loading;
        self.retry_count = 0;
        self.failed_url = None;
    }

    pub fn status_line(&self) -> String {
        format!("Retry count: {}/{}", self.retry_count, self.max_retries)
    }
}
