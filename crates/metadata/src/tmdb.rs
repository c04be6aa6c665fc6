//! TMDB (The Movie Database) upstream client.
//!
//! Uses TMDB API v3 with a v4 read access token sent as a bearer credential:
//! https://developer.themoviedb.org/docs

use std::time::Duration;

use tracing::debug;
use url::Url;

use crate::MetadataError;
use crate::provider::MetadataProvider;

const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3/";
const DEFAULT_USER_AGENT: &str = concat!("reelgate/", env!("CARGO_PKG_VERSION"));
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

pub struct TmdbClient {
    base_url: Url,
    api_token: String,
    client: reqwest::Client,
}

/// Builder for `TmdbClient`.
#[derive(Debug, Default)]
pub struct TmdbClientBuilder {
    base_url: Option<Url>,
    api_token: Option<String>,
    user_agent: Option<String>,
    timeout: Option<Duration>,
}

impl TmdbClientBuilder {
    /// Overrides the API root. A trailing slash is added if missing.
    #[must_use]
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    #[must_use]
    pub fn api_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(token.into());
        self
    }

    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn build(self) -> Result<TmdbClient, MetadataError> {
        let api_token = self
            .api_token
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| MetadataError::Config("api token is required".into()))?;

        let mut base_url = match self.base_url {
            Some(url) => url,
            None => Url::parse(DEFAULT_BASE_URL)
                .map_err(|e| MetadataError::Config(format!("invalid base URL: {e}")))?,
        };
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = reqwest::Client::builder()
            .user_agent(self.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT))
            .timeout(self.timeout.unwrap_or(DEFAULT_TIMEOUT))
            .build()
            .map_err(|e| MetadataError::Config(format!("build HTTP client: {e}")))?;

        Ok(TmdbClient {
            base_url,
            api_token,
            client,
        })
    }
}

impl TmdbClient {
    pub fn builder() -> TmdbClientBuilder {
        TmdbClientBuilder::default()
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, MetadataError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| MetadataError::Config(format!("invalid path {path}: {e}")))
    }
}

#[async_trait::async_trait]
impl MetadataProvider for TmdbClient {
    fn name(&self) -> &str {
        "tmdb"
    }

    async fn fetch(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> Result<serde_json::Value, MetadataError> {
        let url = self.endpoint(path)?;

        let mut req = self
            .client
            .get(url)
            .bearer_auth(&self.api_token)
            .header(reqwest::header::ACCEPT, "application/json");
        if !query.is_empty() {
            req = req.query(query);
        }
        let req = req
            .build()
            .map_err(|e| MetadataError::Network(e.to_string()))?;

        debug!(url = %req.url(), "TMDB request");

        let resp = self
            .client
            .execute(req)
            .await
            .map_err(|e| MetadataError::Network(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp
                .text()
                .await
                .unwrap_or_else(|_| String::from("<failed to read body>"));
            return Err(MetadataError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        resp.json()
            .await
            .map_err(|e| MetadataError::Decode(format!("parse JSON: {e}")))
    }
}
