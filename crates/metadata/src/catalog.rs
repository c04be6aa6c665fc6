//! Typed catalog operations used by the browser-facing client.
//!
//! Every operation swallows failures: the error is logged and an empty
//! listing (or `None`) is returned so a page can still render.

use std::sync::Arc;

use reelgate_core::types::{
    Episode, Movie, MovieDetails, Page, Season, SeasonDetails, Show, ShowDetails,
};
use reelgate_core::validation::is_valid_search_query;
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::MetadataError;
use crate::provider::MetadataProvider;

/// The four listings shown on the landing page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HomeFeed {
    pub trending_movies: Page<Movie>,
    pub popular_movies: Page<Movie>,
    pub trending_shows: Page<Show>,
    pub popular_shows: Page<Show>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchResults {
    pub movies: Vec<Movie>,
    pub shows: Vec<Show>,
}

#[derive(Clone)]
pub struct Catalog {
    provider: Arc<dyn MetadataProvider>,
}

impl Catalog {
    pub fn new(provider: Arc<dyn MetadataProvider>) -> Self {
        Self { provider }
    }

    async fn fetch_as<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> Result<T, MetadataError> {
        let data = self.provider.fetch(path, query).await?;
        serde_json::from_value(data).map_err(|e| MetadataError::Decode(format!("{path}: {e}")))
    }

    async fn page_or_empty<T: DeserializeOwned>(
        &self,
        what: &str,
        path: &str,
        query: &[(String, String)],
    ) -> Page<T> {
        match self.fetch_as(path, query).await {
            Ok(page) => page,
            Err(e) => {
                warn!(error = %e, path, "failed to fetch {what}");
                Page::empty()
            }
        }
    }

    pub async fn trending_movies(&self) -> Page<Movie> {
        self.page_or_empty("trending movies", "/trending/movie/week", &[])
            .await
    }

    pub async fn popular_movies(&self) -> Page<Movie> {
        self.page_or_empty("popular movies", "/movie/popular", &[])
            .await
    }

    pub async fn trending_shows(&self) -> Page<Show> {
        self.page_or_empty("trending shows", "/trending/tv/week", &[])
            .await
    }

    pub async fn popular_shows(&self) -> Page<Show> {
        self.page_or_empty("popular shows", "/tv/popular", &[]).await
    }

    /// Movie search. Queries that fail validation are never sent upstream.
    pub async fn search_movies(&self, query: &str) -> Page<Movie> {
        if !is_valid_search_query(query) {
            return Page::empty();
        }
        self.page_or_empty(
            "movie search",
            "/search/movie",
            &[("query".to_string(), query.to_string())],
        )
        .await
    }

    pub async fn search_shows(&self, query: &str) -> Page<Show> {
        if !is_valid_search_query(query) {
            return Page::empty();
        }
        self.page_or_empty(
            "show search",
            "/search/tv",
            &[("query".to_string(), query.to_string())],
        )
        .await
    }

    pub async fn movie_details(&self, movie_id: u64) -> Option<MovieDetails> {
        self.fetch_as(&format!("/movie/{movie_id}"), &[])
            .await
            .inspect_err(|e| warn!(error = %e, movie_id, "failed to fetch movie details"))
            .ok()
    }

    pub async fn similar_movies(&self, movie_id: u64) -> Page<Movie> {
        self.page_or_empty("similar movies", &format!("/movie/{movie_id}/similar"), &[])
            .await
    }

    pub async fn show_details(&self, show_id: u64) -> Option<ShowDetails> {
        self.fetch_as(&format!("/tv/{show_id}"), &[])
            .await
            .inspect_err(|e| warn!(error = %e, show_id, "failed to fetch show details"))
            .ok()
    }

    pub async fn similar_shows(&self, show_id: u64) -> Page<Show> {
        self.page_or_empty("similar shows", &format!("/tv/{show_id}/similar"), &[])
            .await
    }

    /// Season list, read off the show detail record.
    pub async fn show_seasons(&self, show_id: u64) -> Vec<Season> {
        self.show_details(show_id)
            .await
            .map(|d| d.seasons)
            .unwrap_or_default()
    }

    pub async fn season_episodes(&self, show_id: u64, season_number: u32) -> Vec<Episode> {
        match self
            .fetch_as::<SeasonDetails>(&format!("/tv/{show_id}/season/{season_number}"), &[])
            .await
        {
            Ok(season) => season.episodes,
            Err(e) => {
                warn!(error = %e, show_id, season_number, "failed to fetch season episodes");
                Vec::new()
            }
        }
    }

    /// Fetches all four landing-page listings concurrently.
    pub async fn home_feed(&self) -> HomeFeed {
        let (trending_movies, popular_movies, trending_shows, popular_shows) = tokio::join!(
            self.trending_movies(),
            self.popular_movies(),
            self.trending_shows(),
            self.popular_shows(),
        );
        HomeFeed {
            trending_movies,
            popular_movies,
            trending_shows,
            popular_shows,
        }
    }

    /// Runs movie and show search side by side. Blank queries return nothing.
    pub async fn search_all(&self, query: &str) -> SearchResults {
        if query.trim().is_empty() {
            return SearchResults::default();
        }
        let (movies, shows) = tokio::join!(self.search_movies(query), self.search_shows(query));
        SearchResults {
            movies: movies.results,
            shows: shows.results,
        }
    }
}
