use std::time::Duration;

use anyhow::{Context, bail};
use url::Url;

const DEFAULT_BIND: &str = "0.0.0.0:8787";
const DEFAULT_EMBED_HOST: &str = "vidapi.site";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Process configuration, read from `REELGATE_*` environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub tmdb_token: String,
    pub tmdb_base_url: Option<Url>,
    pub embed_host: String,
    pub upstream_timeout: Duration,
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let tmdb_token = match lookup("REELGATE_TMDB_TOKEN") {
            Some(t) if !t.trim().is_empty() => t,
            _ => bail!("REELGATE_TMDB_TOKEN must be set"),
        };

        let tmdb_base_url = lookup("REELGATE_TMDB_BASE_URL")
            .map(|v| Url::parse(&v))
            .transpose()
            .context("REELGATE_TMDB_BASE_URL is not a valid URL")?;

        let upstream_timeout = lookup("REELGATE_UPSTREAM_TIMEOUT_SECS")
            .map(|v| v.parse::<u64>())
            .transpose()
            .context("REELGATE_UPSTREAM_TIMEOUT_SECS must be a number of seconds")?
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Ok(Self {
            bind_addr: lookup("REELGATE_BIND").unwrap_or_else(|| DEFAULT_BIND.to_string()),
            tmdb_token,
            tmdb_base_url,
            embed_host: lookup("REELGATE_EMBED_HOST")
                .unwrap_or_else(|| DEFAULT_EMBED_HOST.to_string()),
            upstream_timeout: Duration::from_secs(upstream_timeout),
        })
    }
}
