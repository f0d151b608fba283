mod auth;
mod cards;
mod components;
mod detail_page;
mod detail_sections;
mod details;
mod handlers;
mod home;
mod listing;
mod media;
mod pagination;
mod settings;
mod theme;
mod tmdb;

use std::sync::Arc;

use iced::widget::{column, container, scrollable, stack};
use iced::{Element, Font, Length, Size, Task, Theme};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use auth::{AuthForm, AuthHandler, DemoAuthHandler};
use listing::ListingController;
use media::{DetailState, DetailTab, ImageCache, Message, Page};
use settings::AppSettings;
use theme::Appearance;
use tmdb::{MovieCatalog, TmdbClient};

pub struct Cinedex {
    pub catalog: Arc<dyn MovieCatalog>,
    pub auth_handler: Arc<dyn AuthHandler>,
    pub appearance: Appearance,
    pub current_page: Page,
    pub listing: ListingController,
    pub search_query: String,
    pub show_all_genres: bool,
    pub detail: Option<DetailState>,
    pub detail_tab: DetailTab,
    pub image_cache: ImageCache,
    pub auth_form: Option<AuthForm>,
    pub signed_in_as: Option<String>,
}

impl Cinedex {
    fn new() -> (Self, Task<Message>) {
        let settings = AppSettings::load();
        let catalog: Arc<dyn MovieCatalog> = Arc::new(TmdbClient::from_settings(&settings));
        let auth_handler: Arc<dyn AuthHandler> = Arc::new(DemoAuthHandler);
        Self::with_services(catalog, auth_handler, Appearance::new(settings.dark_mode))
    }

    /// Builds the app around the given services and kicks off the first
    /// trending listing and the genre list.
    pub fn with_services(
        catalog: Arc<dyn MovieCatalog>,
        auth_handler: Arc<dyn AuthHandler>,
        appearance: Appearance,
    ) -> (Self, Task<Message>) {
        let mut app = Self {
            catalog,
            auth_handler,
            appearance,
            current_page: Page::Home,
            listing: ListingController::new(),
            search_query: String::new(),
            show_all_genres: false,
            detail: None,
            detail_tab: DetailTab::default(),
            image_cache: ImageCache::new(),
            auth_form: None,
            signed_in_as: None,
        };

        let request = app.listing.start();
        let tasks = Task::batch([
            handlers::fetch_listing(&app, request),
            handlers::fetch_genres(&app),
        ]);
        (app, tasks)
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        handlers::handle_message(self, message)
    }

    fn view(&self) -> Element<'_, Message> {
        let palette = self.appearance.palette();

        let page = match self.current_page {
            Page::Home => self.view_home(palette),
            Page::Movie(_) => self.view_detail_page(palette),
        };

        let body = scrollable(page)
            .direction(scrollable::Direction::Vertical(
                scrollable::Scrollbar::new().width(0).scroller_width(0),
            ))
            .width(Length::Fill)
            .height(Length::Fill)
            .style(components::hidden_scrollbar_style);

        let background = palette.background;
        let main_content = container(column![self.view_navbar(palette), body])
            .width(Length::Fill)
            .height(Length::Fill)
            .style(move |_theme| container::Style {
                background: Some(iced::Background::Color(background)),
                ..Default::default()
            });

        if let Some(ref form) = self.auth_form {
            return stack![main_content, self.view_auth_overlay(form, palette)]
                .width(Length::Fill)
                .height(Length::Fill)
                .into();
        }

        main_content.into()
    }

    fn theme(&self) -> Theme {
        self.appearance.iced_theme()
    }
}

const DEFAULT_LOG_FILTER: &str = "info,wgpu_core=warn,wgpu_hal=warn,naga=warn";

fn log_filter(env_var: &str) -> EnvFilter {
    EnvFilter::try_from_env(env_var).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(EnvFilter::DEFAULT_ENV))
        .with_target(false)
        .compact()
        .init();
}

fn main() -> iced::Result {
    // Must run before init_tracing: .env may set RUST_LOG.
    let dotenv = dotenvy::dotenv();
    init_tracing();
    match dotenv {
        Ok(path) => info!("Loaded environment from {:?}", path),
        Err(e) => warn!("No .env file loaded ({}) - relying on environment", e),
    }

    iced::application(Cinedex::new, Cinedex::update, Cinedex::view)
        .title("Cinedex")
        .theme(Cinedex::theme)
        .window_size(Size::new(1280.0, 800.0))
        .font(iced_fonts::BOOTSTRAP_FONT_BYTES)
        .default_font(Font::DEFAULT)
        .run()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_filter_reads_values_from_env_file() {
        let path = std::env::temp_dir().join(format!("cinedex-{}.env", std::process::id()));
        std::fs::write(&path, "CINEDEX_TEST_LOG=debug\n").unwrap();
        dotenvy::from_path(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(log_filter("CINEDEX_TEST_LOG").to_string(), "debug");
    }

    #[test]
    fn log_filter_falls_back_without_variable() {
        let fallback = log_filter("CINEDEX_UNSET_LOG_FILTER").to_string();
        assert!(fallback.contains("wgpu_core=warn"));
    }
}
