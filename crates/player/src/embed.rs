use reelgate_core::types::MediaKind;
use reelgate_core::validation::is_valid_id;
use tracing::warn;
use url::Url;

use crate::{PlayerConfig, PlayerError};

/// What the embedded player should load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbedTarget {
    Movie { id: u64 },
    Episode { show_id: u64, season: u32, episode: u32 },
}

impl EmbedTarget {
    pub fn movie(id: &str) -> Result<Self, PlayerError> {
        Ok(Self::Movie { id: parse_id(id)? })
    }

    pub fn episode(show_id: &str, season: u32, episode: u32) -> Result<Self, PlayerError> {
        Ok(Self::Episode {
            show_id: parse_id(show_id)?,
            season,
            episode,
        })
    }

    pub fn kind(&self) -> MediaKind {
        match self {
            Self::Movie { .. } => MediaKind::Movie,
            Self::Episode { .. } => MediaKind::Tv,
        }
    }
}

fn parse_id(id: &str) -> Result<u64, PlayerError> {
    if !is_valid_id(id) {
        return Err(PlayerError::InvalidId(id.to_string()));
    }
    id.parse()
        .map_err(|_| PlayerError::InvalidId(id.to_string()))
}

/// iframe `src` for the target on the configured embed host.
pub fn embed_url(config: &PlayerConfig, target: EmbedTarget) -> String {
    let base = format!("https://{}/embed/{}/", config.embed_host, target.kind());
    match target {
        EmbedTarget::Movie { id } => format!("{base}?id={id}"),
        EmbedTarget::Episode {
            show_id,
            season,
            episode,
        } => format!("{base}?id={show_id}&season={season}&episode={episode}"),
    }
}

/// Appends the `_t` cache-busting parameter.
pub fn cache_busted(url: &str, timestamp_ms: i64) -> String {
    let sep = if url.contains('?') { '&' } else { '?' };
    format!("{url}{sep}_t={timestamp_ms}")
}

/// URLs on the embed host pass through untouched; anything else must be
/// https and comes back normalized. Rejected URLs become an empty string.
pub fn sanitize_url(raw: &str, embed_host: &str) -> String {
    let parsed = match Url::parse(raw) {
        Ok(u) => u,
        Err(e) => {
            warn!(url = raw, error = %e, "invalid URL");
            return String::new();
        }
    };

    if parsed.host_str() == Some(embed_host) {
        return raw.to_string();
    }

    if parsed.scheme() != "https" {
        warn!(url = raw, "only https URLs are allowed");
        return String::new();
    }

    parsed.to_string()
}
