use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, error, warn};

use crate::media::{DetailOutcome, Genre, GenreId, Movie, MovieDetails, MovieId, MoviePage};
use crate::settings::AppSettings;

const IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p";
const DETAIL_APPENDS: &str = "credits,videos,similar";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("missing configuration: {0}")]
    MissingConfig(&'static str),
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("HTTP error! Status: {0}")]
    Status(StatusCode),
    #[error("could not decode response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("unexpected response format: {0}")]
    UnexpectedFormat(&'static str),
}

#[derive(Debug, Clone, Copy)]
pub enum ImageSize {
    Original,
    Poster,
    Profile,
    Logo,
    Thumb,
}

impl ImageSize {
    fn path_segment(self) -> &'static str {
        match self {
            ImageSize::Original => "original",
            ImageSize::Poster => "w500",
            ImageSize::Profile => "w185",
            ImageSize::Logo => "w92",
            ImageSize::Thumb => "w45",
        }
    }
}

pub fn image_url(path: &str, size: ImageSize) -> String {
    format!("{}/{}{}", IMAGE_BASE_URL, size.path_segment(), path)
}

pub async fn fetch_image_bytes(url: String) -> Result<Vec<u8>, String> {
    reqwest::get(&url)
        .await
        .map_err(|e| e.to_string())?
        .error_for_status()
        .map_err(|e| e.to_string())?
        .bytes()
        .await
        .map(|b| b.to_vec())
        .map_err(|e| e.to_string())
}

/// Read-only movie metadata source used by the listing and detail screens.
///
/// Every operation is total: failures are absorbed into an empty page, an empty
/// genre list, or a [`DetailOutcome`] other than `Found`.
#[async_trait]
pub trait MovieCatalog: Send + Sync {
    async fn trending(&self, page: u32) -> MoviePage;
    async fn by_genre(&self, genre_id: GenreId, page: u32) -> MoviePage;
    async fn search(&self, query: &str, page: u32) -> MoviePage;
    async fn genres(&self) -> Vec<Genre>;
    async fn movie_details(&self, id: MovieId) -> DetailOutcome;
}

#[derive(Debug, Deserialize)]
struct PagedResponse {
    results: Option<Vec<Movie>>,
    page: Option<u32>,
    total_pages: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct GenreListResponse {
    genres: Option<Vec<Genre>>,
}

#[derive(Clone)]
pub struct TmdbClient {
    api_key: Option<String>,
    base_url: Option<String>,
    language: Option<String>,
    http_client: reqwest::Client,
}

impl TmdbClient {
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            api_key: non_empty(api_key.into()),
            base_url: non_empty(base_url.into()),
            language: None,
            http_client: reqwest::Client::new(),
        }
    }

    pub fn from_settings(settings: &AppSettings) -> Self {
        if !settings.is_complete() {
            warn!("TMDB API key or base URL not configured; listings will stay empty");
        }
        Self::new(settings.api_key.clone(), settings.base_url.clone())
            .with_language(settings.language.clone())
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = non_empty(language.into());
        self
    }

    fn build_url(&self, endpoint: &str, params: &[(&str, String)]) -> Result<String, ApiError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(ApiError::MissingConfig("TMDB_API_KEY"))?;
        let base_url = self
            .base_url
            .as_deref()
            .ok_or(ApiError::MissingConfig("TMDB_BASE_URL"))?;

        let mut url = format!(
            "{}{}?api_key={}",
            base_url.trim_end_matches('/'),
            endpoint,
            urlencoding::encode(api_key)
        );
        if let Some(language) = &self.language {
            url.push_str("&language=");
            url.push_str(&urlencoding::encode(language));
        }
        for (key, value) in params {
            url.push('&');
            url.push_str(key);
            url.push('=');
            url.push_str(&urlencoding::encode(value));
        }
        Ok(url)
    }

    async fn fetch_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let url = self.build_url(endpoint, params)?;
        debug!(endpoint, "requesting TMDB");

        let response = self.http_client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status(status));
        }
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    async fn fetch_page(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> Result<MoviePage, ApiError> {
        let response: PagedResponse = self.fetch_json(endpoint, params).await?;
        let results = response
            .results
            .ok_or(ApiError::UnexpectedFormat("listing without a results array"))?;
        Ok(MoviePage {
            results,
            total_pages: response.total_pages.filter(|p| *p > 0).unwrap_or(1),
            current_page: response.page.filter(|p| *p > 0).unwrap_or(1),
        })
    }

    async fn fetch_details(&self, id: MovieId) -> Result<MovieDetails, ApiError> {
        self.fetch_json(
            &format!("/movie/{}", id),
            &[("append_to_response", DETAIL_APPENDS.to_string())],
        )
        .await
    }
}

#[async_trait]
impl MovieCatalog for TmdbClient {
    async fn trending(&self, page: u32) -> MoviePage {
        let params = [("page", page.max(1).to_string())];
        self.fetch_page("/trending/movie/week", &params)
            .await
            .unwrap_or_else(|e| {
                error!(page, "error fetching trending movies: {}", e);
                MoviePage::empty()
            })
    }

    async fn by_genre(&self, genre_id: GenreId, page: u32) -> MoviePage {
        let params = [
            ("with_genres", genre_id.to_string()),
            ("page", page.max(1).to_string()),
            ("sort_by", String::from("popularity.desc")),
        ];
        self.fetch_page("/discover/movie", &params)
            .await
            .unwrap_or_else(|e| {
                error!(genre_id, page, "error fetching movies for genre: {}", e);
                MoviePage::empty()
            })
    }

    async fn search(&self, query: &str, page: u32) -> MoviePage {
        let params = [
            ("query", query.to_string()),
            ("page", page.max(1).to_string()),
        ];
        self.fetch_page("/search/movie", &params)
            .await
            .unwrap_or_else(|e| {
                error!(query, page, "error searching movies: {}", e);
                MoviePage::empty()
            })
    }

    async fn genres(&self) -> Vec<Genre> {
        let response: Result<GenreListResponse, ApiError> =
            self.fetch_json("/genre/movie/list", &[]).await;
        match response {
            Ok(GenreListResponse {
                genres: Some(genres),
            }) => genres,
            Ok(_) => {
                error!("unexpected genre list response format");
                Vec::new()
            }
            Err(e) => {
                error!("error fetching genres: {}", e);
                Vec::new()
            }
        }
    }

    async fn movie_details(&self, id: MovieId) -> DetailOutcome {
        match self.fetch_details(id).await {
            Ok(details) => DetailOutcome::Found(Box::new(details)),
            Err(ApiError::Status(StatusCode::NOT_FOUND)) => {
                warn!(movie_id = id, "movie not found");
                DetailOutcome::NotFound
            }
            Err(e) => {
                error!(movie_id = id, "error fetching movie details: {}", e);
                DetailOutcome::Failed
            }
        }
    }
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
