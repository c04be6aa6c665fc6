//! Path table for the `/api/*` proxy.
//!
//! Incoming paths are normalized by replacing numeric segments with
//! placeholders, then looked up by pattern. Each pattern maps to exactly one
//! upstream call.

use regex::Regex;
use std::sync::LazyLock;

static SEASON_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/[0-9]+/season/[0-9]+").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    TrendingMovies,
    PopularMovies,
    TrendingShows,
    PopularShows,
    SearchMovies,
    SearchShows,
    MovieDetails,
    SimilarMovies,
    ShowDetails,
    SimilarShows,
    SeasonDetails,
}

impl Endpoint {
    pub const ALL: [Endpoint; 11] = [
        Self::TrendingMovies,
        Self::PopularMovies,
        Self::TrendingShows,
        Self::PopularShows,
        Self::SearchMovies,
        Self::SearchShows,
        Self::MovieDetails,
        Self::SimilarMovies,
        Self::ShowDetails,
        Self::SimilarShows,
        Self::SeasonDetails,
    ];

    pub fn pattern(self) -> &'static str {
        match self {
            Self::TrendingMovies => "/api/trending/movie/week",
            Self::PopularMovies => "/api/movie/popular",
            Self::TrendingShows => "/api/trending/tv/week",
            Self::PopularShows => "/api/tv/popular",
            Self::SearchMovies => "/api/search/movie",
            Self::SearchShows => "/api/search/tv",
            Self::MovieDetails => "/api/movie/:id",
            Self::SimilarMovies => "/api/movie/:id/similar",
            Self::ShowDetails => "/api/tv/:id",
            Self::SimilarShows => "/api/tv/:id/similar",
            Self::SeasonDetails => "/api/tv/:id/season/:seasonNumber",
        }
    }

    pub fn from_pattern(pattern: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|e| e.pattern() == pattern)
    }

    /// Search endpoints pass the caller's query string through.
    pub fn forwards_query(self) -> bool {
        matches!(self, Self::SearchMovies | Self::SearchShows)
    }

    /// Upstream path for a request path that already matched this endpoint.
    fn upstream_path(self, path: &str) -> String {
        let parts: Vec<&str> = path.split('/').collect();
        let at = |i: usize| parts.get(i).copied().unwrap_or_default();
        match self {
            Self::TrendingMovies => "/trending/movie/week".to_string(),
            Self::PopularMovies => "/movie/popular".to_string(),
            Self::TrendingShows => "/trending/tv/week".to_string(),
            Self::PopularShows => "/tv/popular".to_string(),
            Self::SearchMovies => "/search/movie".to_string(),
            Self::SearchShows => "/search/tv".to_string(),
            Self::MovieDetails => format!("/movie/{}", parts.last().copied().unwrap_or_default()),
            Self::SimilarMovies => format!("/movie/{}/similar", at(3)),
            Self::ShowDetails => format!("/tv/{}", parts.last().copied().unwrap_or_default()),
            Self::SimilarShows => format!("/tv/{}/similar", at(3)),
            Self::SeasonDetails => format!("/tv/{}/season/{}", at(3), at(5)),
        }
    }
}

/// Outcome of a successful lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub endpoint: Endpoint,
    pub pattern: String,
    pub upstream_path: String,
}

/// Replaces every all-digit segment with `:id`.
pub fn normalize_path(path: &str) -> String {
    path.split('/')
        .map(|seg| {
            if !seg.is_empty() && seg.bytes().all(|b| b.is_ascii_digit()) {
                ":id"
            } else {
                seg
            }
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Rewrites the first `/<digits>/season/<digits>` run, if any.
fn normalize_season_path(path: &str) -> Option<String> {
    if !path.contains("/season/") {
        return None;
    }
    Some(
        SEASON_RE
            .replacen(path, 1, "/:id/season/:seasonNumber")
            .into_owned(),
    )
}

/// Maps a request path to its upstream call.
///
/// Season paths are tried with their dedicated rewrite first. Returns the
/// generic normalized pattern in `Err` when nothing matches, for error reporting.
pub fn resolve(path: &str) -> Result<Resolved, String> {
    if let Some(pattern) = normalize_season_path(path) {
        if let Some(endpoint) = Endpoint::from_pattern(&pattern) {
            return Ok(Resolved {
                endpoint,
                upstream_path: endpoint.upstream_path(path),
                pattern,
            });
        }
    }

    let pattern = normalize_path(path);
    match Endpoint::from_pattern(&pattern) {
        Some(endpoint) => Ok(Resolved {
            endpoint,
            upstream_path: endpoint.upstream_path(path),
            pattern,
        }),
        None => Err(pattern),
    }
}

pub fn available_endpoints() -> Vec<String> {
    Endpoint::ALL
        .iter()
        .map(|e| e.pattern().to_string())
        .collect()
}
