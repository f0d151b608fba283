use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

use iced::widget::image::Handle;
use serde::Deserialize;

use crate::auth::AuthMessage;

pub type MovieId = u64;
pub type GenreId = u64;

fn cache_key(url: &str) -> String {
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    for byte in url.bytes() {
        hash ^= byte as u64;
        hash = hash.wrapping_mul(0x0100_0000_01b3);
    }
    format!("{:016x}", hash)
}

fn image_cache_dir() -> Option<PathBuf> {
    std::env::var("HOME").ok().map(|home| {
        PathBuf::from(home)
            .join(".cache")
            .join("cinedex")
            .join("images")
    })
}

#[derive(Debug, Clone, PartialEq)]
pub enum Page {
    Home,
    Movie(MovieId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DetailTab {
    #[default]
    Overview,
    CastAndCrew,
    Details,
}

impl DetailTab {
    pub const ALL: [DetailTab; 3] = [
        DetailTab::Overview,
        DetailTab::CastAndCrew,
        DetailTab::Details,
    ];
}

impl std::fmt::Display for DetailTab {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DetailTab::Overview => write!(f, "Overview"),
            DetailTab::CastAndCrew => write!(f, "Cast & Crew"),
            DetailTab::Details => write!(f, "Details"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Genre {
    pub id: GenreId,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Movie {
    pub id: MovieId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub overview: String,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub vote_average: f32,
    pub vote_count: Option<u64>,
    pub release_date: Option<String>,
    #[serde(default)]
    pub genre_ids: Vec<GenreId>,
}

impl Movie {
    pub fn release_year(&self) -> Option<&str> {
        release_year(self.release_date.as_deref())
    }
}

pub fn release_year(date: Option<&str>) -> Option<&str> {
    date.filter(|d| d.len() >= 4).and_then(|d| d.get(..4))
}

/// One page of a movie listing, normalized so both page counters are at least 1.
#[derive(Debug, Clone)]
pub struct MoviePage {
    pub results: Vec<Movie>,
    pub total_pages: u32,
    pub current_page: u32,
}

impl MoviePage {
    pub fn empty() -> Self {
        Self {
            results: Vec::new(),
            total_pages: 1,
            current_page: 1,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CastMember {
    pub id: u64,
    pub name: String,
    pub character: Option<String>,
    pub profile_path: Option<String>,
    pub cast_id: Option<u64>,
    pub order: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CrewMember {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub job: String,
    pub department: Option<String>,
    pub profile_path: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Credits {
    #[serde(default)]
    pub cast: Vec<CastMember>,
    #[serde(default)]
    pub crew: Vec<CrewMember>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProductionCompany {
    pub id: u64,
    pub name: String,
    pub logo_path: Option<String>,
    pub origin_country: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProductionCountry {
    pub iso_3166_1: String,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpokenLanguage {
    pub iso_639_1: String,
    pub english_name: Option<String>,
    #[serde(default)]
    pub name: String,
}

impl SpokenLanguage {
    pub fn display_name(&self) -> &str {
        match self.english_name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => &self.name,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CollectionRef {
    pub id: u64,
    pub name: String,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MovieList {
    #[serde(default)]
    pub results: Vec<Movie>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MovieDetails {
    pub id: MovieId,
    #[serde(default)]
    pub title: String,
    pub original_title: Option<String>,
    pub tagline: Option<String>,
    #[serde(default)]
    pub overview: String,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub vote_average: Option<f32>,
    pub vote_count: Option<u64>,
    pub release_date: Option<String>,
    pub runtime: Option<u32>,
    pub budget: Option<u64>,
    pub revenue: Option<u64>,
    pub status: Option<String>,
    pub homepage: Option<String>,
    pub imdb_id: Option<String>,
    pub original_language: Option<String>,
    pub popularity: Option<f64>,
    pub adult: Option<bool>,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub production_companies: Vec<ProductionCompany>,
    #[serde(default)]
    pub production_countries: Vec<ProductionCountry>,
    #[serde(default)]
    pub spoken_languages: Vec<SpokenLanguage>,
    pub belongs_to_collection: Option<CollectionRef>,
    #[serde(default)]
    pub credits: Credits,
    #[serde(default)]
    pub similar: MovieList,
}

impl MovieDetails {
    pub fn release_date(&self) -> Option<&str> {
        self.release_date.as_deref().filter(|d| !d.is_empty())
    }

    pub fn release_year(&self) -> Option<&str> {
        release_year(self.release_date())
    }

    pub fn tagline(&self) -> Option<&str> {
        self.tagline.as_deref().filter(|t| !t.is_empty())
    }

    pub fn homepage(&self) -> Option<&str> {
        self.homepage.as_deref().filter(|h| !h.is_empty())
    }

    pub fn imdb_id(&self) -> Option<&str> {
        self.imdb_id.as_deref().filter(|id| !id.is_empty())
    }

    pub fn alternate_title(&self) -> Option<&str> {
        self.original_title
            .as_deref()
            .filter(|original| !original.is_empty() && *original != self.title)
    }
}

#[derive(Debug, Clone)]
pub enum DetailOutcome {
    Found(Box<MovieDetails>),
    NotFound,
    Failed,
}

#[derive(Debug, Clone)]
pub enum DetailState {
    Loading(MovieId),
    Loaded(Box<MovieDetails>),
    NotFound,
    Failed,
}

#[derive(Debug, Clone, Default)]
pub struct ImageCache {
    cache: HashMap<String, Handle>,
    pending: HashSet<String>,
    cache_directory: Option<PathBuf>,
}

impl ImageCache {
    pub fn new() -> Self {
        let cache_directory = image_cache_dir();
        if let Some(ref dir) = cache_directory {
            if let Err(e) = std::fs::create_dir_all(dir) {
                tracing::warn!("image cache directory {} unavailable: {}", dir.display(), e);
            }
        }
        Self {
            cache: HashMap::new(),
            pending: HashSet::new(),
            cache_directory,
        }
    }

    pub fn get(&self, url: &str) -> Option<&Handle> {
        self.cache.get(url)
    }

    pub fn insert(&mut self, url: String, handle: Handle) {
        self.pending.remove(&url);
        self.cache.insert(url, handle);
    }

    pub fn forget(&mut self, url: &str) {
        self.pending.remove(url);
    }

    pub fn needs_fetch(&self, url: &str) -> bool {
        !self.cache.contains_key(url) && !self.pending.contains(url)
    }

    pub fn mark_pending(&mut self, url: String) {
        self.pending.insert(url);
    }

    pub fn get_cache_path(&self, url: &str) -> Option<PathBuf> {
        self.cache_directory
            .as_ref()
            .map(|dir| dir.join(cache_key(url)))
    }
}

#[derive(Debug, Clone)]
pub enum Message {
    NavigateTo(Page),
    SearchQueryChanged(String),
    SearchSubmit,
    ClearSearch,
    SelectGenre(Option<GenreId>),
    ToggleAllGenres,
    GenresLoaded(Vec<Genre>),
    ChangePage(u32),
    ListingLoaded(u64, MoviePage),
    RetryListing,
    OpenMovie(MovieId),
    DetailLoaded(MovieId, DetailOutcome),
    SelectDetailTab(DetailTab),
    LoadImage(String),
    ImageLoaded(String, Result<Handle, String>),
    ToggleTheme,
    OpenAuth,
    CloseAuth,
    Auth(AuthMessage),
    AuthCompleted(Result<String, String>),
    SignOut,
}

impl Message {
    /// User input aimed at the page underneath the sign-in overlay.
    pub fn is_page_action(&self) -> bool {
        matches!(
            self,
            Message::NavigateTo(_)
                | Message::SearchQueryChanged(_)
                | Message::SearchSubmit
                | Message::ClearSearch
                | Message::SelectGenre(_)
                | Message::ToggleAllGenres
                | Message::ChangePage(_)
                | Message::RetryListing
                | Message::OpenMovie(_)
                | Message::SelectDetailTab(_)
                | Message::ToggleTheme
                | Message::SignOut
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn movie_tolerates_sparse_payload() {
        let movie: Movie = serde_json::from_str(r#"{"id": 7, "title": "Heat"}"#).unwrap();
        assert_eq!(movie.id, 7);
        assert!(movie.poster_path.is_none());
        assert!(movie.genre_ids.is_empty());
        assert_eq!(movie.vote_average, 0.0);
    }

    #[test]
    fn details_default_nested_collections() {
        let details: MovieDetails =
            serde_json::from_str(r#"{"id": 1, "title": "Alien", "budget": 0}"#).unwrap();
        assert!(details.credits.cast.is_empty());
        assert!(details.similar.results.is_empty());
        assert_eq!(details.budget, Some(0));
        assert!(details.belongs_to_collection.is_none());
    }

    #[test]
    fn empty_strings_read_as_absent() {
        let details: MovieDetails = serde_json::from_str(
            r#"{"id": 1, "title": "Alien", "original_title": "Alien", "tagline": "", "homepage": "", "release_date": ""}"#,
        )
        .unwrap();
        assert!(details.tagline().is_none());
        assert!(details.homepage().is_none());
        assert!(details.release_date().is_none());
        assert!(details.alternate_title().is_none());
    }

    #[test]
    fn release_year_needs_four_digits() {
        assert_eq!(release_year(Some("2010-07-16")), Some("2010"));
        assert_eq!(release_year(Some("")), None);
        assert_eq!(release_year(None), None);
    }
}
