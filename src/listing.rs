use tracing::debug;

use crate::media::{Genre, GenreId, Movie, MoviePage};
use crate::tmdb::MovieCatalog;

pub const VISIBLE_GENRE_COUNT: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum QueryMode {
    #[default]
    Trending,
    Genre(GenreId),
    Search(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingRequest {
    pub seq: u64,
    pub mode: QueryMode,
    pub page: u32,
}

/// Tracks which listing is on screen and which response is allowed to replace it.
///
/// Every request handed out carries a fresh sequence number; only the response
/// to the most recent one is applied, so a slow page-2 fetch cannot overwrite a
/// newer search.
#[derive(Debug, Default)]
pub struct ListingController {
    mode: QueryMode,
    current_page: u32,
    total_pages: u32,
    movies: Vec<Movie>,
    genres: Vec<Genre>,
    latest_seq: u64,
    loading: bool,
}

impl ListingController {
    pub fn new() -> Self {
        Self {
            current_page: 1,
            total_pages: 1,
            ..Default::default()
        }
    }

    pub fn mode(&self) -> &QueryMode {
        &self.mode
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    pub fn genres(&self) -> &[Genre] {
        &self.genres
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_searching(&self) -> bool {
        matches!(self.mode, QueryMode::Search(_))
    }

    pub fn selected_genre(&self) -> Option<GenreId> {
        match self.mode {
            QueryMode::Genre(id) => Some(id),
            _ => None,
        }
    }

    pub fn search_term(&self) -> Option<&str> {
        match &self.mode {
            QueryMode::Search(term) => Some(term),
            _ => None,
        }
    }

    pub fn set_genres(&mut self, genres: Vec<Genre>) {
        self.genres = genres;
    }

    pub fn genre_name(&self, id: GenreId) -> Option<&str> {
        self.genres
            .iter()
            .find(|g| g.id == id)
            .map(|g| g.name.as_str())
    }

    pub fn visible_genres(&self, show_all: bool) -> &[Genre] {
        if show_all {
            &self.genres
        } else {
            &self.genres[..self.genres.len().min(VISIBLE_GENRE_COUNT)]
        }
    }

    pub fn has_hidden_genres(&self) -> bool {
        self.genres.len() > VISIBLE_GENRE_COUNT
    }

    /// The listing on first show.
    pub fn start(&mut self) -> ListingRequest {
        self.switch_mode(QueryMode::Trending)
    }

    /// `None` picks "All". Ignored while a search is active.
    pub fn select_genre(&mut self, genre: Option<GenreId>) -> Option<ListingRequest> {
        if self.is_searching() {
            debug!(?genre, "genre selection ignored during search");
            return None;
        }
        let mode = match genre {
            Some(id) => QueryMode::Genre(id),
            None => QueryMode::Trending,
        };
        Some(self.switch_mode(mode))
    }

    /// A blank term goes back to trending.
    pub fn submit_search(&mut self, term: &str) -> ListingRequest {
        let term = term.trim();
        if term.is_empty() {
            self.switch_mode(QueryMode::Trending)
        } else {
            self.switch_mode(QueryMode::Search(term.to_string()))
        }
    }

    pub fn clear_search(&mut self) -> ListingRequest {
        self.switch_mode(QueryMode::Trending)
    }

    pub fn change_page(&mut self, page: u32) -> ListingRequest {
        let page = page.clamp(1, self.total_pages.max(1));
        self.current_page = page;
        self.issue(page)
    }

    pub fn reload(&mut self) -> ListingRequest {
        self.issue(self.current_page)
    }

    /// Returns `false` when `seq` belongs to a superseded request.
    pub fn apply(&mut self, seq: u64, page: MoviePage) -> bool {
        if seq != self.latest_seq {
            debug!(seq, latest = self.latest_seq, "discarding stale listing response");
            return false;
        }
        self.movies = page.results;
        self.total_pages = page.total_pages.max(1);
        self.current_page = page.current_page.max(1);
        self.loading = false;
        true
    }

    pub fn title(&self) -> String {
        match &self.mode {
            QueryMode::Search(term) => format!("Search Results: \"{}\"", term),
            QueryMode::Genre(id) => match self.genre_name(*id) {
                Some(name) => format!("{} Movies", name),
                None => String::from("Movies by Genre"),
            },
            QueryMode::Trending => String::from("Trending Movies"),
        }
    }

    pub fn empty_message(&self) -> String {
        match &self.mode {
            QueryMode::Search(term) => {
                format!("No results for \"{}\". Try a different search term.", term)
            }
            QueryMode::Genre(_) => {
                String::from("No movies found for this genre. Try another genre.")
            }
            QueryMode::Trending => String::from("Unable to load movies. Please try again later."),
        }
    }

    fn switch_mode(&mut self, mode: QueryMode) -> ListingRequest {
        self.mode = mode;
        self.current_page = 1;
        self.issue(1)
    }

    fn issue(&mut self, page: u32) -> ListingRequest {
        self.latest_seq += 1;
        self.loading = true;
        ListingRequest {
            seq: self.latest_seq,
            mode: self.mode.clone(),
            page,
        }
    }
}

pub async fn fetch_listing<C>(catalog: &C, request: &ListingRequest) -> MoviePage
where
    C: MovieCatalog + ?Sized,
{
    match &request.mode {
        QueryMode::Trending => catalog.trending(request.page).await,
        QueryMode::Genre(id) => catalog.by_genre(*id, request.page).await,
        QueryMode::Search(term) => catalog.search(term, request.page).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::{DetailOutcome, MovieId};
    use async_trait::async_trait;
    use std::sync::Mutex;

    fn movie(id: u64, title: &str) -> Movie {
        serde_json::from_value(serde_json::json!({"id": id, "title": title})).unwrap()
    }

    fn page_of(titles: &[&str], current_page: u32, total_pages: u32) -> MoviePage {
        MoviePage {
            results: titles
                .iter()
                .enumerate()
                .map(|(i, t)| movie(i as u64 + 1, t))
                .collect(),
            total_pages,
            current_page,
        }
    }

    fn genres() -> Vec<Genre> {
        (1..=12)
            .map(|id| Genre {
                id,
                name: format!("Genre {}", id),
            })
            .collect()
    }

    #[derive(Default)]
    struct RecordingCatalog {
        calls: Mutex<Vec<String>>,
    }

    impl RecordingCatalog {
        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        fn record(&self, call: String) {
            self.calls.lock().unwrap().push(call);
        }
    }

    #[async_trait]
    impl MovieCatalog for RecordingCatalog {
        async fn trending(&self, page: u32) -> MoviePage {
            self.record(format!("trending:{}", page));
            page_of(&["Dune"], page, 5)
        }

        async fn by_genre(&self, genre_id: GenreId, page: u32) -> MoviePage {
            self.record(format!("genre:{}:{}", genre_id, page));
            page_of(&["Heat"], page, 5)
        }

        async fn search(&self, query: &str, page: u32) -> MoviePage {
            self.record(format!("search:{}:{}", query, page));
            page_of(&["Alien"], page, 5)
        }

        async fn genres(&self) -> Vec<Genre> {
            genres()
        }

        async fn movie_details(&self, _id: MovieId) -> DetailOutcome {
            DetailOutcome::NotFound
        }
    }

    #[test]
    fn mode_switches_reset_page_and_keep_one_filter() {
        let mut listing = ListingController::new();
        let request = listing.start();
        assert!(listing.apply(request.seq, page_of(&["Dune"], 1, 10)));
        listing.change_page(4);
        assert_eq!(listing.current_page(), 4);

        let request = listing.select_genre(Some(28)).unwrap();
        assert_eq!(request.page, 1);
        assert_eq!(listing.current_page(), 1);
        assert_eq!(listing.selected_genre(), Some(28));
        assert_eq!(listing.search_term(), None);

        let request = listing.submit_search("  alien ");
        assert_eq!(request.mode, QueryMode::Search(String::from("alien")));
        assert_eq!(request.page, 1);
        assert_eq!(listing.current_page(), 1);
        assert_eq!(listing.selected_genre(), None);
        assert_eq!(listing.search_term(), Some("alien"));
    }

    #[test]
    fn blank_search_returns_to_trending() {
        let mut listing = ListingController::new();
        listing.submit_search("heat");
        let request = listing.submit_search("   ");
        assert_eq!(request.mode, QueryMode::Trending);
        assert!(!listing.is_searching());

        listing.submit_search("heat");
        assert_eq!(listing.clear_search().mode, QueryMode::Trending);
    }

    #[test]
    fn genre_selection_ignored_while_searching() {
        let mut listing = ListingController::new();
        listing.submit_search("heat");
        assert_eq!(listing.select_genre(Some(12)), None);
        assert_eq!(listing.search_term(), Some("heat"));
    }

    #[test]
    fn selecting_all_goes_back_to_trending() {
        let mut listing = ListingController::new();
        listing.select_genre(Some(12));
        let request = listing.select_genre(None).unwrap();
        assert_eq!(request.mode, QueryMode::Trending);
    }

    #[test]
    fn page_change_keeps_mode_and_clamps() {
        let mut listing = ListingController::new();
        let request = listing.select_genre(Some(35)).unwrap();
        listing.apply(request.seq, page_of(&["Heat"], 1, 6));

        let request = listing.change_page(3);
        assert_eq!(request.mode, QueryMode::Genre(35));
        assert_eq!(request.page, 3);

        assert_eq!(listing.change_page(50).page, 6);
        assert_eq!(listing.change_page(0).page, 1);
    }

    #[test]
    fn stale_responses_are_discarded() {
        let mut listing = ListingController::new();
        let first = listing.start();
        let second = listing.submit_search("alien");
        assert!(second.seq > first.seq);

        assert!(!listing.apply(first.seq, page_of(&["Dune"], 1, 9)));
        assert!(listing.is_loading());
        assert!(listing.movies().is_empty());

        assert!(listing.apply(second.seq, page_of(&["Alien", "Aliens"], 1, 2)));
        assert!(!listing.is_loading());
        assert_eq!(listing.movies().len(), 2);
        assert_eq!(listing.total_pages(), 2);

        assert!(!listing.apply(first.seq, page_of(&["Dune"], 1, 9)));
        assert_eq!(listing.movies()[0].title, "Alien");
    }

    #[test]
    fn apply_adopts_server_page() {
        let mut listing = ListingController::new();
        let request = listing.change_page(1);
        listing.apply(request.seq, MoviePage::empty());
        assert_eq!(listing.current_page(), 1);
        assert_eq!(listing.total_pages(), 1);
        assert!(listing.movies().is_empty());
    }

    #[test]
    fn titles_use_fetched_genre_names() {
        let mut listing = ListingController::new();
        assert_eq!(listing.title(), "Trending Movies");

        listing.select_genre(Some(3));
        assert_eq!(listing.title(), "Movies by Genre");
        listing.set_genres(genres());
        assert_eq!(listing.title(), "Genre 3 Movies");

        listing.submit_search("alien");
        assert_eq!(listing.title(), "Search Results: \"alien\"");
        assert_eq!(
            listing.empty_message(),
            "No results for \"alien\". Try a different search term."
        );
    }

    #[test]
    fn genre_selector_shows_first_eight() {
        let mut listing = ListingController::new();
        assert!(listing.visible_genres(false).is_empty());
        listing.set_genres(genres());
        assert_eq!(listing.visible_genres(false).len(), VISIBLE_GENRE_COUNT);
        assert_eq!(listing.visible_genres(true).len(), 12);
        assert!(listing.has_hidden_genres());
    }

    #[tokio::test]
    async fn each_request_hits_exactly_one_endpoint() {
        let catalog = RecordingCatalog::default();
        let mut listing = ListingController::new();

        let request = listing.start();
        let page = fetch_listing(&catalog, &request).await;
        listing.apply(request.seq, page);

        let request = listing.select_genre(Some(28)).unwrap();
        let page = fetch_listing(&catalog, &request).await;
        listing.apply(request.seq, page);

        for request in [
            listing.change_page(2),
            listing.submit_search("alien"),
            listing.clear_search(),
        ] {
            fetch_listing(&catalog, &request).await;
        }

        assert_eq!(
            catalog.calls(),
            vec![
                "trending:1",
                "genre:28:1",
                "genre:28:2",
                "search:alien:1",
                "trending:1",
            ]
        );
    }

    #[tokio::test]
    async fn fetch_through_trait_object() {
        let catalog: std::sync::Arc<dyn MovieCatalog> =
            std::sync::Arc::new(RecordingCatalog::default());
        let mut listing = ListingController::new();
        let request = listing.submit_search("heat");
        let page = fetch_listing(catalog.as_ref(), &request).await;
        assert!(listing.apply(request.seq, page));
        assert_eq!(listing.movies()[0].title, "Alien");
    }
}
