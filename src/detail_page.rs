use iced::widget::{button, column, container, row, text, Column, Row, Space};
use iced::{Border, Color, Element, Length, Padding};

use crate::components::{
    bold_text, chip_style, icon, skeleton_block, surface_style, ICON_ARROW_LEFT, ICON_FILM,
    ICON_GLOBE, ICON_STAR_FILL,
};
use crate::details::{
    country_names, format_date, format_money, format_rating, format_runtime, format_vote_count,
    release_status, ReleaseStatus, SIMILAR_LIMIT,
};
use crate::media::{DetailState, DetailTab, Message, MovieDetails, Page};
use crate::theme::{Palette, RATING_GOLD, STATUS_BLUE, STATUS_GREEN};
use crate::tmdb::ImageSize;
use crate::Cinedex;

const BACKDROP_HEIGHT: f32 = 360.0;
const POSTER_WIDTH: f32 = 300.0;
const POSTER_HEIGHT: f32 = 450.0;
const SIMILAR_WIDTH: f32 = 170.0;
const SIMILAR_HEIGHT: f32 = 255.0;

fn status_color(status: &ReleaseStatus, palette: Palette) -> Color {
    match status {
        ReleaseStatus::ComingSoon => STATUS_BLUE,
        ReleaseStatus::NowPlaying => STATUS_GREEN,
        ReleaseStatus::Released => palette.accent,
        ReleaseStatus::Other(_) | ReleaseStatus::Unknown => palette.surface_raised,
    }
}

impl Cinedex {
    pub fn view_detail_page(&self, palette: Palette) -> Element<'_, Message> {
        match self.detail {
            None | Some(DetailState::Loading(_)) => self.view_detail_skeleton(palette),
            Some(DetailState::NotFound) => self.view_notice(
                palette,
                String::from("Movie not found"),
                Some(String::from(
                    "The movie you're looking for doesn't exist or has been removed.",
                )),
                Some(("Back to Home", Message::NavigateTo(Page::Home))),
            ),
            Some(DetailState::Failed) => self.view_notice(
                palette,
                String::from("Failed to load movie details"),
                Some(String::from("Please try again later.")),
                Some(("Back to Home", Message::NavigateTo(Page::Home))),
            ),
            Some(DetailState::Loaded(ref details)) => self.view_movie_details(details, palette),
        }
    }

    fn view_detail_skeleton(&self, palette: Palette) -> Element<'_, Message> {
        let text_lines = column![
            skeleton_block(palette, 420.0, 40.0),
            skeleton_block(palette, 260.0, 18.0),
            skeleton_block(palette, Length::Fill, 14.0),
            skeleton_block(palette, Length::Fill, 14.0),
            skeleton_block(palette, 380.0, 14.0),
        ]
        .spacing(16)
        .width(Length::Fill);

        column![
            skeleton_block(palette, Length::Fill, BACKDROP_HEIGHT),
            row![skeleton_block(palette, POSTER_WIDTH, POSTER_HEIGHT), text_lines]
                .spacing(32)
                .padding(Padding::new(32.0).left(48.0).right(48.0)),
        ]
        .width(Length::Fill)
        .into()
    }

    fn view_movie_details<'a>(
        &'a self,
        details: &'a MovieDetails,
        palette: Palette,
    ) -> Element<'a, Message> {
        let today = chrono::Local::now().date_naive();
        let status = release_status(details, today);

        let body = row![
            self.view_detail_sidebar(details, palette),
            column![
                self.view_title_block(details, palette),
                self.view_detail_tabs(palette),
                self.view_detail_tab_content(details, palette),
            ]
            .spacing(24)
            .width(Length::Fill),
        ]
        .spacing(32)
        .padding(Padding::new(32.0).left(48.0).right(48.0));

        let mut page = column![self.view_backdrop(details, &status, palette), body]
            .spacing(8)
            .width(Length::Fill);

        if let Some(similar) = self.view_similar_movies(details, palette) {
            page = page.push(
                container(similar)
                    .padding(Padding::new(16.0).left(48.0).right(48.0).bottom(48.0)),
            );
        }

        page.into()
    }

    fn view_backdrop<'a>(
        &'a self,
        details: &'a MovieDetails,
        status: &ReleaseStatus,
        palette: Palette,
    ) -> Element<'a, Message> {
        let back = button(
            row![icon(ICON_ARROW_LEFT).size(14), text("Back to Home").size(14)]
                .spacing(8)
                .align_y(iced::Alignment::Center),
        )
        .padding(Padding::new(8.0).left(16.0).right(16.0))
        .style(move |_theme, status| {
            let alpha = if matches!(status, button::Status::Hovered) {
                0.75
            } else {
                0.55
            };
            button::Style {
                background: Some(iced::Background::Color(Color::from_rgba(
                    0.0, 0.0, 0.0, alpha,
                ))),
                text_color: Color::WHITE,
                border: Border::default().rounded(999),
                ..Default::default()
            }
        })
        .on_press(Message::NavigateTo(Page::Home));

        let badge_color = status_color(status, palette);
        let badge = container(text(status.to_string()).size(13).color(Color::WHITE))
            .padding(Padding::new(6.0).left(14.0).right(14.0))
            .style(move |_theme| container::Style {
                background: Some(iced::Background::Color(badge_color)),
                border: Border::default().rounded(999),
                ..Default::default()
            });

        let overlay = container(
            row![back, Space::new().width(Length::Fill), badge].align_y(iced::Alignment::Center),
        )
        .width(Length::Fill)
        .padding(24);

        let Some(handle) = self.cached_image(details.backdrop_path.as_deref(), ImageSize::Original)
        else {
            return overlay.into();
        };

        let background = palette.background;
        let fade = container(Space::new().width(Length::Fill).height(Length::Fill))
            .width(Length::Fill)
            .height(Length::Fill)
            .style(move |_theme| container::Style {
                background: Some(iced::Background::Gradient(iced::Gradient::Linear(
                    iced::gradient::Linear::new(std::f32::consts::PI)
                        .add_stop(0.0, Color::from_rgba(0.0, 0.0, 0.0, 0.1))
                        .add_stop(1.0, background),
                ))),
                ..Default::default()
            });

        iced::widget::stack![
            iced::widget::image(handle)
                .width(Length::Fill)
                .height(Length::Fixed(BACKDROP_HEIGHT))
                .content_fit(iced::ContentFit::Cover),
            fade,
            overlay,
        ]
        .width(Length::Fill)
        .height(Length::Fixed(BACKDROP_HEIGHT))
        .into()
    }

    fn view_detail_sidebar<'a>(
        &'a self,
        details: &'a MovieDetails,
        palette: Palette,
    ) -> Element<'a, Message> {
        let poster = Self::image_or_placeholder(
            self.cached_image(details.poster_path.as_deref(), ImageSize::Poster),
            POSTER_WIDTH,
            POSTER_HEIGHT,
            12.0,
            palette,
            ICON_FILM,
        );

        let score = row![
            icon(ICON_STAR_FILL).size(22).color(RATING_GOLD),
            bold_text(format_rating(details.vote_average), 24, palette.text),
            text("/10").size(14).color(palette.text_muted),
        ]
        .spacing(8)
        .align_y(iced::Alignment::Center);
        let mut rating = column![score].spacing(4);
        if let Some(votes) = details.vote_count {
            rating = rating.push(
                text(format_vote_count(votes))
                    .size(12)
                    .color(palette.text_muted),
            );
        }

        let stat = |label: &'static str, value: String| {
            row![
                text(label).size(13).color(palette.text_muted),
                Space::new().width(Length::Fill),
                text(value).size(13).color(palette.text),
            ]
            .spacing(12)
        };

        let mut stats = Column::new().spacing(10).push(rating);
        if details.budget.is_some_and(|b| b > 0) {
            stats = stats.push(stat("Budget", format_money(details.budget)));
        }
        if details.revenue.is_some_and(|r| r > 0) {
            stats = stats.push(stat("Revenue", format_money(details.revenue)));
        }
        if let Some(runtime) = details.runtime.filter(|r| *r > 0) {
            stats = stats.push(stat("Runtime", format_runtime(runtime)));
        }
        if details.release_date().is_some() {
            stats = stats.push(stat("Release Date", format_date(details.release_date())));
        }
        if let Some(countries) = country_names(details) {
            stats = stats.push(stat("Country", countries));
        }
        if let Some(homepage) = details.homepage() {
            stats = stats.push(
                row![
                    icon(ICON_GLOBE).size(13).color(palette.accent),
                    text(homepage).size(12).color(palette.accent),
                ]
                .spacing(6)
                .align_y(iced::Alignment::Center),
            );
        }

        column![
            poster,
            container(stats)
                .width(Length::Fixed(POSTER_WIDTH))
                .padding(16)
                .style(surface_style(palette, 12.0)),
        ]
        .spacing(16)
        .width(Length::Fixed(POSTER_WIDTH))
        .into()
    }

    fn view_title_block<'a>(
        &'a self,
        details: &'a MovieDetails,
        palette: Palette,
    ) -> Element<'a, Message> {
        let title = bold_text(&details.title, 36, palette.text).shaping(text::Shaping::Advanced);
        let mut heading = row![title].spacing(12).align_y(iced::Alignment::End);
        if let Some(year) = details.release_year() {
            heading = heading.push(
                text(format!("({})", year))
                    .size(24)
                    .color(palette.text_muted),
            );
        }

        let mut block = column![heading].spacing(10);
        if let Some(original) = details.alternate_title() {
            block = block.push(
                text(format!("Original title: {}", original))
                    .size(14)
                    .color(palette.text_muted)
                    .shaping(text::Shaping::Advanced),
            );
        }
        if let Some(tagline) = details.tagline() {
            block = block.push(
                text(format!("\"{}\"", tagline))
                    .size(17)
                    .color(palette.text_muted)
                    .font(iced::Font {
                        style: iced::font::Style::Italic,
                        ..Default::default()
                    }),
            );
        }
        if !details.genres.is_empty() {
            let pills: Vec<Element<Message>> = details
                .genres
                .iter()
                .map(|genre| {
                    container(text(&genre.name).size(13).color(palette.text))
                        .padding(Padding::new(4.0).left(12.0).right(12.0))
                        .style(move |_theme| container::Style {
                            background: Some(iced::Background::Color(palette.surface_raised)),
                            border: Border::default().rounded(999),
                            ..Default::default()
                        })
                        .into()
                })
                .collect();
            block = block.push(Row::with_children(pills).spacing(8).wrap());
        }

        block.into()
    }

    fn view_detail_tabs(&self, palette: Palette) -> Element<'_, Message> {
        let tabs: Vec<Element<Message>> = DetailTab::ALL
            .into_iter()
            .map(|tab| {
                button(container(text(tab.to_string()).size(15)).center_x(Length::Fill))
                    .width(Length::Fill)
                    .padding(Padding::new(10.0).left(16.0).right(16.0))
                    .style(chip_style(palette, self.detail_tab == tab))
                    .on_press(Message::SelectDetailTab(tab))
                    .into()
            })
            .collect();

        Row::with_children(tabs).spacing(8).width(Length::Fill).into()
    }

    fn view_similar_movies<'a>(
        &'a self,
        details: &'a MovieDetails,
        palette: Palette,
    ) -> Option<Element<'a, Message>> {
        if details.similar.results.is_empty() {
            return None;
        }

        let cards: Vec<Element<Message>> = details
            .similar
            .results
            .iter()
            .take(SIMILAR_LIMIT)
            .map(|movie| {
                let poster = Self::image_or_placeholder(
                    self.cached_image(movie.poster_path.as_deref(), ImageSize::Poster),
                    SIMILAR_WIDTH,
                    SIMILAR_HEIGHT,
                    8.0,
                    palette,
                    ICON_FILM,
                );
                let caption = column![
                    text(&movie.title)
                        .size(14)
                        .color(palette.text)
                        .shaping(text::Shaping::Advanced),
                    row![
                        icon(ICON_STAR_FILL).size(12).color(RATING_GOLD),
                        text(format_rating(Some(movie.vote_average)))
                            .size(12)
                            .color(palette.text_muted),
                    ]
                    .spacing(4)
                    .align_y(iced::Alignment::Center),
                ]
                .spacing(4)
                .width(Length::Fixed(SIMILAR_WIDTH));

                button(column![poster, caption].spacing(8))
                    .padding(0)
                    .style(button::text)
                    .on_press(Message::OpenMovie(movie.id))
                    .into()
            })
            .collect();

        Some(
            column![
                bold_text("Similar Movies", 22, palette.text),
                Row::with_children(cards).spacing(20),
            ]
            .spacing(16)
            .into(),
        )
    }
}
