use std::sync::Arc;

use iced::Task;
use tracing::{debug, info};

use crate::auth::{self, AuthForm, AuthMessage};
use crate::listing::{self, ListingRequest};
use crate::media::{
    DetailOutcome, DetailState, GenreId, Message, MovieDetails, MovieId, MoviePage, Page,
};
use crate::tmdb::{fetch_image_bytes, image_url, ImageSize};
use crate::Cinedex;

const SIMILAR_IMAGES: usize = crate::details::SIMILAR_LIMIT;

pub fn handle_message(app: &mut Cinedex, message: Message) -> Task<Message> {
    if app.auth_form.is_some() && message.is_page_action() {
        debug!(?message, "sign-in form open, ignoring page input");
        return Task::none();
    }

    match message {
        Message::NavigateTo(page) => handle_navigate(app, page),
        Message::SearchQueryChanged(query) => {
            app.search_query = query;
            Task::none()
        }
        Message::SearchSubmit => handle_search_submit(app),
        Message::ClearSearch => handle_clear_search(app),
        Message::SelectGenre(genre) => handle_select_genre(app, genre),
        Message::ToggleAllGenres => {
            app.show_all_genres = !app.show_all_genres;
            Task::none()
        }
        Message::GenresLoaded(genres) => {
            debug!(count = genres.len(), "genres loaded");
            app.listing.set_genres(genres);
            Task::none()
        }
        Message::ChangePage(page) => {
            let request = app.listing.change_page(page);
            fetch_listing(app, request)
        }
        Message::ListingLoaded(seq, page) => handle_listing_loaded(app, seq, page),
        Message::RetryListing => {
            let request = app.listing.reload();
            fetch_listing(app, request)
        }
        Message::OpenMovie(id) => Task::done(Message::NavigateTo(Page::Movie(id))),
        Message::DetailLoaded(id, outcome) => handle_detail_loaded(app, id, outcome),
        Message::SelectDetailTab(tab) => {
            app.detail_tab = tab;
            Task::none()
        }
        Message::LoadImage(url) => handle_load_image(app, url),
        Message::ImageLoaded(url, result) => handle_image_loaded(app, url, result),
        Message::ToggleTheme => {
            app.appearance = app.appearance.toggled();
            info!(dark_mode = app.appearance.dark_mode, "theme toggled");
            Task::none()
        }
        Message::OpenAuth => {
            app.auth_form = Some(AuthForm::default());
            Task::none()
        }
        Message::CloseAuth => {
            app.auth_form = None;
            Task::none()
        }
        Message::Auth(auth_message) => handle_auth_message(app, auth_message),
        Message::AuthCompleted(outcome) => handle_auth_completed(app, outcome),
        Message::SignOut => {
            if let Some(name) = app.signed_in_as.take() {
                info!("{} signed out", name);
            }
            Task::none()
        }
    }
}

pub fn fetch_listing(app: &Cinedex, request: ListingRequest) -> Task<Message> {
    debug!(seq = request.seq, mode = ?request.mode, page = request.page, "requesting listing");
    let catalog = Arc::clone(&app.catalog);
    let seq = request.seq;
    Task::perform(
        async move { listing::fetch_listing(catalog.as_ref(), &request).await },
        move |page| Message::ListingLoaded(seq, page),
    )
}

pub fn fetch_genres(app: &Cinedex) -> Task<Message> {
    let catalog = Arc::clone(&app.catalog);
    Task::perform(
        async move { catalog.genres().await },
        Message::GenresLoaded,
    )
}

fn handle_navigate(app: &mut Cinedex, page: Page) -> Task<Message> {
    app.current_page = page.clone();
    match page {
        Page::Home => {
            app.detail = None;
            Task::none()
        }
        Page::Movie(id) => {
            info!(movie_id = id, "opening movie");
            app.detail = Some(DetailState::Loading(id));
            app.detail_tab = Default::default();
            let catalog = Arc::clone(&app.catalog);
            Task::perform(
                async move { catalog.movie_details(id).await },
                move |outcome| Message::DetailLoaded(id, outcome),
            )
        }
    }
}

fn handle_search_submit(app: &mut Cinedex) -> Task<Message> {
    let request = app.listing.submit_search(&app.search_query);
    if !app.listing.is_searching() {
        app.search_query.clear();
    }
    app.current_page = Page::Home;
    app.detail = None;
    fetch_listing(app, request)
}

fn handle_clear_search(app: &mut Cinedex) -> Task<Message> {
    app.search_query.clear();
    let request = app.listing.clear_search();
    app.current_page = Page::Home;
    fetch_listing(app, request)
}

fn handle_select_genre(app: &mut Cinedex, genre: Option<GenreId>) -> Task<Message> {
    match app.listing.select_genre(genre) {
        Some(request) => fetch_listing(app, request),
        None => Task::none(),
    }
}

fn handle_listing_loaded(app: &mut Cinedex, seq: u64, page: MoviePage) -> Task<Message> {
    if !app.listing.apply(seq, page) {
        return Task::none();
    }
    debug!(
        count = app.listing.movies().len(),
        page = app.listing.current_page(),
        total = app.listing.total_pages(),
        "listing applied"
    );

    let urls: Vec<String> = app
        .listing
        .movies()
        .iter()
        .filter_map(|movie| movie.poster_path.as_deref())
        .map(|path| image_url(path, ImageSize::Poster))
        .collect();
    load_images(app, urls)
}

fn handle_detail_loaded(app: &mut Cinedex, id: MovieId, outcome: DetailOutcome) -> Task<Message> {
    let awaiting = matches!(app.detail, Some(DetailState::Loading(current)) if current == id)
        && app.current_page == Page::Movie(id);
    if !awaiting {
        debug!(movie_id = id, "discarding stale detail response");
        return Task::none();
    }

    match outcome {
        DetailOutcome::Found(details) => {
            let urls = detail_image_urls(&details);
            app.detail = Some(DetailState::Loaded(details));
            load_images(app, urls)
        }
        DetailOutcome::NotFound => {
            app.detail = Some(DetailState::NotFound);
            Task::none()
        }
        DetailOutcome::Failed => {
            app.detail = Some(DetailState::Failed);
            Task::none()
        }
    }
}

fn detail_image_urls(details: &MovieDetails) -> Vec<String> {
    let backdrop = details
        .backdrop_path
        .as_deref()
        .map(|path| image_url(path, ImageSize::Original));
    let poster = details
        .poster_path
        .as_deref()
        .map(|path| image_url(path, ImageSize::Poster));
    let (cast, _) = crate::details::top_cast(details);
    let profiles = cast
        .iter()
        .filter_map(|member| member.profile_path.as_deref())
        .map(|path| image_url(path, ImageSize::Profile));
    let logos = details
        .production_companies
        .iter()
        .filter_map(|company| company.logo_path.as_deref())
        .map(|path| image_url(path, ImageSize::Logo));
    let crew_thumbs = crate::details::key_crew(details)
        .into_iter()
        .filter_map(|member| member.profile_path.as_deref())
        .map(|path| image_url(path, ImageSize::Thumb));
    let collection = details
        .belongs_to_collection
        .as_ref()
        .and_then(|collection| collection.poster_path.as_deref())
        .map(|path| image_url(path, ImageSize::Logo));
    let similar = details
        .similar
        .results
        .iter()
        .take(SIMILAR_IMAGES)
        .filter_map(|movie| movie.poster_path.as_deref())
        .map(|path| image_url(path, ImageSize::Poster));

    backdrop
        .into_iter()
        .chain(poster)
        .chain(profiles)
        .chain(logos)
        .chain(crew_thumbs)
        .chain(collection)
        .chain(similar)
        .collect()
}

fn load_images(app: &Cinedex, urls: Vec<String>) -> Task<Message> {
    let tasks: Vec<Task<Message>> = urls
        .into_iter()
        .filter(|url| app.image_cache.needs_fetch(url))
        .map(|url| Task::done(Message::LoadImage(url)))
        .collect();
    Task::batch(tasks)
}

fn handle_load_image(app: &mut Cinedex, url: String) -> Task<Message> {
    if !app.image_cache.needs_fetch(&url) {
        return Task::none();
    }
    app.image_cache.mark_pending(url.clone());
    let cache_path = app.image_cache.get_cache_path(&url);

    Task::perform(
        async move {
            if let Some(ref path) = cache_path {
                if let Ok(bytes) = tokio::fs::read(path).await {
                    return (url, Ok(bytes));
                }
            }
            let result = fetch_image_bytes(url.clone()).await;
            if let (Ok(bytes), Some(path)) = (&result, &cache_path) {
                if let Err(e) = tokio::fs::write(path, bytes).await {
                    debug!("could not cache {}: {}", path.display(), e);
                }
            }
            (url, result)
        },
        |(url, result)| {
            Message::ImageLoaded(url, result.map(iced::widget::image::Handle::from_bytes))
        },
    )
}

fn handle_image_loaded(
    app: &mut Cinedex,
    url: String,
    result: Result<iced::widget::image::Handle, String>,
) -> Task<Message> {
    match result {
        Ok(handle) => app.image_cache.insert(url, handle),
        Err(e) => {
            debug!("image {} failed: {}", url, e);
            app.image_cache.forget(&url);
        }
    }
    Task::none()
}

fn handle_auth_message(app: &mut Cinedex, message: AuthMessage) -> Task<Message> {
    let Some(form) = app.auth_form.as_mut() else {
        return Task::none();
    };
    let Some(submission) = form.update(message) else {
        return Task::none();
    };
    let handler = Arc::clone(&app.auth_handler);
    Task::perform(
        async move { auth::submit(handler.as_ref(), submission).await },
        Message::AuthCompleted,
    )
}

fn handle_auth_completed(app: &mut Cinedex, outcome: Result<String, String>) -> Task<Message> {
    let Some(form) = app.auth_form.as_mut() else {
        return Task::none();
    };
    if form.finish(&outcome) {
        if let Ok(name) = outcome {
            info!("signed in as {}", name);
            app.signed_in_as = Some(name);
        }
        app.auth_form = None;
    }
    Task::none()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{AuthMode, DemoAuthHandler};
    use crate::listing::QueryMode;
    use crate::media::{Genre, Movie};
    use crate::theme::Appearance;
    use crate::tmdb::MovieCatalog;
    use async_trait::async_trait;

    struct EmptyCatalog;

    #[async_trait]
    impl MovieCatalog for EmptyCatalog {
        async fn trending(&self, _page: u32) -> MoviePage {
            MoviePage::empty()
        }
        async fn by_genre(&self, _genre_id: GenreId, _page: u32) -> MoviePage {
            MoviePage::empty()
        }
        async fn search(&self, _query: &str, _page: u32) -> MoviePage {
            MoviePage::empty()
        }
        async fn genres(&self) -> Vec<Genre> {
            Vec::new()
        }
        async fn movie_details(&self, _id: MovieId) -> DetailOutcome {
            DetailOutcome::NotFound
        }
    }

    fn app() -> Cinedex {
        let (app, _) = Cinedex::with_services(
            Arc::new(EmptyCatalog),
            Arc::new(DemoAuthHandler),
            Appearance::default(),
        );
        app
    }

    fn page_of(total_pages: u32, current_page: u32) -> MoviePage {
        MoviePage {
            results: vec![Movie {
                id: 1,
                title: String::from("Heat"),
                overview: String::new(),
                poster_path: None,
                backdrop_path: None,
                vote_average: 8.3,
                vote_count: None,
                release_date: None,
                genre_ids: Vec::new(),
            }],
            total_pages,
            current_page,
        }
    }

    #[test]
    fn search_submit_returns_home_on_first_page() {
        let mut app = app();
        let _ = handle_message(&mut app, Message::ListingLoaded(1, page_of(9, 1)));
        let _ = handle_message(&mut app, Message::ChangePage(4));
        let _ = handle_message(&mut app, Message::ListingLoaded(2, page_of(9, 4)));
        assert_eq!(app.listing.current_page(), 4);

        app.current_page = Page::Movie(1);
        let _ = handle_message(&mut app, Message::SearchQueryChanged(String::from(" heat ")));
        let _ = handle_message(&mut app, Message::SearchSubmit);
        assert_eq!(app.current_page, Page::Home);
        assert_eq!(app.listing.mode(), &QueryMode::Search(String::from("heat")));
        assert_eq!(app.listing.current_page(), 1);

        let _ = handle_message(&mut app, Message::ClearSearch);
        assert!(app.search_query.is_empty());
        assert_eq!(app.listing.mode(), &QueryMode::Trending);
    }

    #[test]
    fn stale_detail_response_is_ignored() {
        let mut app = app();
        let _ = handle_message(&mut app, Message::NavigateTo(Page::Movie(1)));
        let _ = handle_message(&mut app, Message::NavigateTo(Page::Movie(2)));

        let _ = handle_message(&mut app, Message::DetailLoaded(1, DetailOutcome::Failed));
        assert!(matches!(app.detail, Some(DetailState::Loading(2))));

        let _ = handle_message(&mut app, Message::DetailLoaded(2, DetailOutcome::NotFound));
        assert!(matches!(app.detail, Some(DetailState::NotFound)));

        let _ = handle_message(&mut app, Message::NavigateTo(Page::Home));
        assert!(app.detail.is_none());
    }

    #[test]
    fn auth_success_closes_form_and_remembers_user() {
        let mut app = app();
        let _ = handle_message(&mut app, Message::OpenAuth);
        let _ = handle_message(
            &mut app,
            Message::Auth(AuthMessage::SwitchMode(AuthMode::Signup)),
        );
        assert_eq!(app.auth_form.as_ref().map(|f| f.mode), Some(AuthMode::Signup));

        let _ = handle_message(&mut app, Message::AuthCompleted(Err(String::from("Taken"))));
        assert_eq!(
            app.auth_form.as_ref().and_then(|f| f.error.as_deref()),
            Some("Taken")
        );

        let _ = handle_message(&mut app, Message::AuthCompleted(Ok(String::from("Ada"))));
        assert!(app.auth_form.is_none());
        assert_eq!(app.signed_in_as.as_deref(), Some("Ada"));

        let _ = handle_message(&mut app, Message::SignOut);
        assert!(app.signed_in_as.is_none());
    }

    #[test]
    fn page_input_waits_while_auth_form_is_open() {
        let mut app = app();
        let _ = handle_message(&mut app, Message::ListingLoaded(1, page_of(9, 1)));
        let _ = handle_message(&mut app, Message::OpenAuth);

        let _ = handle_message(&mut app, Message::OpenMovie(1));
        let _ = handle_message(&mut app, Message::NavigateTo(Page::Movie(1)));
        let _ = handle_message(&mut app, Message::ChangePage(3));
        let _ = handle_message(&mut app, Message::SelectGenre(Some(28)));
        let _ = handle_message(&mut app, Message::ToggleTheme);
        assert_eq!(app.current_page, Page::Home);
        assert!(app.detail.is_none());
        assert_eq!(app.listing.current_page(), 1);
        assert_eq!(app.listing.mode(), &QueryMode::Trending);
        assert!(app.appearance.dark_mode);
        assert!(app.auth_form.is_some());

        let _ = handle_message(&mut app, Message::CloseAuth);
        let _ = handle_message(&mut app, Message::ChangePage(3));
        assert_eq!(app.listing.current_page(), 3);
        assert!(app.listing.is_loading());
    }

    #[test]
    fn theme_toggle_is_local() {
        let mut app = app();
        assert!(app.appearance.dark_mode);
        let _ = handle_message(&mut app, Message::ToggleTheme);
        assert!(!app.appearance.dark_mode);
    }
}
