// src/catalog.rs — TMDB catalog client (blocking; runs on worker threads)
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;
use tracing::warn;

use crate::config::AppConfig;

const USER_AGENT: &str = concat!("cinewave/", env!("CARGO_PKG_VERSION"));
const HTTP_TIMEOUT: Duration = Duration::from_secs(20);

pub type Result<T> = std::result::Result<T, CatalogError>;

/// Shared flag fired when a newer query supersedes an in-flight fetch.
///
/// Blocking requests cannot be interrupted mid-transfer; the token is checked
/// before the request goes out and again before the body is decoded, and the
/// UI thread additionally discards results tagged with a stale generation.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn fire(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_fired(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

#[derive(Debug, Error)]
pub enum CatalogError {
    /// Superseded by a newer request; callers drop these silently.
    #[error("request cancelled")]
    Cancelled,
    #[error("transport error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unexpected HTTP status {0}")]
    Status(reqwest::StatusCode),
    /// A fetch worker went away without reporting a result.
    #[error("fetch worker lost")]
    Lost,
}

// ---- wire records (pass-through of TMDB fields) ----

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Movie {
    pub id: u32,
    pub title: String,
    #[serde(default)]
    pub overview: String,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub release_date: String,
    #[serde(default)]
    pub vote_average: f32,
    #[serde(default)]
    pub genre_ids: Vec<u32>,
    #[serde(default)]
    pub popularity: f32,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Genre {
    pub id: u32,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MovieDetails {
    pub id: u32,
    pub title: String,
    #[serde(default)]
    pub overview: String,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub release_date: String,
    #[serde(default)]
    pub vote_average: f32,
    #[serde(default)]
    pub popularity: f32,
    #[serde(default)]
    pub genres: Vec<Genre>,
    pub runtime: Option<u32>,
    #[serde(default)]
    pub status: String,
    pub tagline: Option<String>,
    #[serde(default)]
    pub budget: u64,
    #[serde(default)]
    pub revenue: u64,
}

/// Standard paginated envelope: `{page, results, total_pages, total_results}`.
#[derive(Debug, Clone, Deserialize)]
pub struct MoviePage {
    pub page: u32,
    pub results: Vec<Movie>,
    pub total_pages: u32,
    pub total_results: u32,
}

#[derive(Deserialize)]
struct GenreList {
    genres: Vec<Genre>,
}

// ---- query surface ----

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortKey {
    #[default]
    Popularity,
    NewestFirst,
    HighestRated,
}

impl SortKey {
    pub const fn as_param(self) -> &'static str {
        match self {
            Self::Popularity => "popularity.desc",
            Self::NewestFirst => "primary_release_date.desc",
            Self::HighestRated => "vote_average.desc",
        }
    }

    pub fn from_param(s: &str) -> Option<Self> {
        match s {
            "popularity.desc" => Some(Self::Popularity),
            "primary_release_date.desc" => Some(Self::NewestFirst),
            "vote_average.desc" => Some(Self::HighestRated),
            _ => None,
        }
    }
}

#[derive(Clone, Debug)]
pub struct DiscoverQuery {
    pub page: u32,
    pub genre_id: Option<u32>,
    pub year: Option<i32>,
    pub min_rating: Option<f32>,
    pub sort: SortKey,
}

impl DiscoverQuery {
    /// Unset facets are omitted entirely, never sent as empty strings.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut p = vec![
            ("page", self.page.to_string()),
            ("include_adult", "false".to_string()),
            ("sort_by", self.sort.as_param().to_string()),
        ];
        if let Some(genre) = self.genre_id {
            p.push(("with_genres", genre.to_string()));
        }
        if let Some(year) = self.year {
            p.push(("primary_release_year", year.to_string()));
        }
        if let Some(rating) = self.min_rating {
            p.push(("vote_average.gte", rating.to_string()));
        }
        p
    }
}

#[derive(Clone, Debug)]
pub struct SearchQuery {
    pub query: String,
    pub page: u32,
    /// Forwarded as `primary_release_year`; whether the search endpoint
    /// honours it is an external contract we do not verify locally.
    pub year: Option<i32>,
}

impl SearchQuery {
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut p = vec![
            ("query", self.query.clone()),
            ("page", self.page.to_string()),
            ("include_adult", "false".to_string()),
        ];
        if let Some(year) = self.year {
            p.push(("primary_release_year", year.to_string()));
        }
        p
    }
}

// ---- client ----

#[derive(Clone)]
pub struct TmdbClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl TmdbClient {
    pub fn new(cfg: &AppConfig) -> Self {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(HTTP_TIMEOUT)
            .build()
            .unwrap_or_else(|e| {
                warn!("http client build failed ({e}); falling back to defaults");
                Client::new()
            });
        Self {
            client,
            api_key: cfg.api_key.clone(),
            base_url: cfg.base_url.clone(),
        }
    }

    fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
        cancel: &CancelToken,
    ) -> Result<T> {
        if cancel.is_fired() {
            return Err(CatalogError::Cancelled);
        }

        let url = format!("{}{}", self.base_url, path);
        let resp = self
            .client
            .get(&url)
            .query(&[("api_key", self.api_key.as_str())])
            .query(params)
            .send()?;

        if cancel.is_fired() {
            return Err(CatalogError::Cancelled);
        }

        let status = resp.status();
        if !status.is_success() {
            return Err(CatalogError::Status(status));
        }
        Ok(resp.json()?)
    }

    pub fn genres(&self, cancel: &CancelToken) -> Result<Vec<Genre>> {
        self.get_json::<GenreList>("/genre/movie/list", &[], cancel)
            .map(|list| list.genres)
    }

    pub fn discover(&self, query: &DiscoverQuery, cancel: &CancelToken) -> Result<MoviePage> {
        self.get_json("/discover/movie", &query.params(), cancel)
    }

    pub fn search(&self, query: &SearchQuery, cancel: &CancelToken) -> Result<MoviePage> {
        self.get_json("/search/movie", &query.params(), cancel)
    }

    pub fn details(&self, movie_id: u32, cancel: &CancelToken) -> Result<MovieDetails> {
        self.get_json(&format!("/movie/{movie_id}"), &[], cancel)
    }

    pub fn recommendations(&self, movie_id: u32, cancel: &CancelToken) -> Result<MoviePage> {
        self.get_json(&format!("/movie/{movie_id}/recommendations"), &[], cancel)
    }
}
