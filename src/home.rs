use iced::widget::{button, column, container, row, text, Row, Space};
use iced::{Element, Length, Padding};

use crate::components::{
    bold_text, chip_style, ghost_button_style, icon, ICON_ARROW_LEFT,
    ICON_CHEVRON_LEFT, ICON_CHEVRON_RIGHT,
};
use crate::listing::QueryMode;
use crate::media::Message;
use crate::pagination::{pagination_window, PageControl};
use crate::theme::Palette;
use crate::Cinedex;

const SKELETON_CARDS: usize = 10;

impl Cinedex {
    pub fn view_home(&self, palette: Palette) -> Element<'_, Message> {
        let mut content = column![].spacing(28).width(Length::Fill);

        if !self.listing.is_searching() {
            content = content.push(self.view_genre_selector(palette));
        }
        content = content.push(self.view_listing_header(palette));
        content = content.push(self.view_listing_body(palette));
        if !self.listing.is_loading() {
            if let Some(pagination) = self.view_pagination(palette) {
                content = content.push(pagination);
            }
        }

        container(content)
            .width(Length::Fill)
            .padding(Padding::new(32.0).left(48.0).right(48.0).bottom(48.0))
            .into()
    }

    fn view_genre_selector(&self, palette: Palette) -> Element<'_, Message> {
        let selected = self.listing.selected_genre();

        let chip = |label: String, genre, active: bool| {
            button(text(label).size(14))
                .padding(Padding::new(8.0).left(16.0).right(16.0))
                .style(chip_style(palette, active))
                .on_press(Message::SelectGenre(genre))
        };

        let mut chips = Row::new()
            .spacing(8)
            .push(chip(String::from("All"), None, selected.is_none()));
        for genre in self.listing.visible_genres(self.show_all_genres) {
            chips = chips.push(chip(
                genre.name.clone(),
                Some(genre.id),
                selected == Some(genre.id),
            ));
        }
        if self.listing.has_hidden_genres() {
            let label = if self.show_all_genres { "Less" } else { "More" };
            chips = chips.push(
                button(text(label).size(14).color(palette.accent))
                    .padding(Padding::new(8.0).left(12.0).right(12.0))
                    .style(ghost_button_style(palette))
                    .on_press(Message::ToggleAllGenres),
            );
        }

        chips.wrap().into()
    }

    fn view_listing_header(&self, palette: Palette) -> Element<'_, Message> {
        let title = bold_text(self.listing.title(), 28, palette.text);

        let mut header = row![title, Space::new().width(Length::Fill)]
            .spacing(16)
            .align_y(iced::Alignment::Center);

        if self.listing.is_searching() {
            header = header.push(
                button(
                    row![
                        icon(ICON_ARROW_LEFT).size(14),
                        text("Back to Trending").size(14)
                    ]
                    .spacing(8)
                    .align_y(iced::Alignment::Center),
                )
                .padding(Padding::new(8.0).left(14.0).right(14.0))
                .style(ghost_button_style(palette))
                .on_press(Message::ClearSearch),
            );
        }

        header.into()
    }

    fn view_listing_body(&self, palette: Palette) -> Element<'_, Message> {
        if self.listing.is_loading() {
            return self.view_skeleton_grid(palette, SKELETON_CARDS);
        }

        if self.listing.movies().is_empty() {
            let action = match self.listing.mode() {
                QueryMode::Trending => Some(("Try again", Message::RetryListing)),
                QueryMode::Search(_) => Some(("Back to Trending", Message::ClearSearch)),
                QueryMode::Genre(_) => Some(("Show all movies", Message::SelectGenre(None))),
            };
            return self.view_notice(
                palette,
                String::from("No movies found"),
                Some(self.listing.empty_message()),
                action,
            );
        }

        self.view_movie_grid(self.listing.movies(), palette)
    }

    fn view_pagination(&self, palette: Palette) -> Option<Element<'_, Message>> {
        let window = pagination_window(self.listing.current_page(), self.listing.total_pages())?;

        let controls: Vec<Element<Message>> = window
            .controls()
            .into_iter()
            .map(|control| match control {
                PageControl::Previous { target, enabled } => button(
                    row![icon(ICON_CHEVRON_LEFT).size(12), text("Previous").size(14)]
                        .spacing(6)
                        .align_y(iced::Alignment::Center),
                )
                .padding(Padding::new(8.0).left(12.0).right(12.0))
                .style(chip_style(palette, false))
                .on_press_maybe(enabled.then_some(Message::ChangePage(target)))
                .into(),
                PageControl::Page { number, active: true } => {
                    button(text(number.to_string()).size(14))
                        .padding(Padding::new(8.0).left(14.0).right(14.0))
                        .style(chip_style(palette, true))
                        .into()
                }
                PageControl::Page { number, .. } => button(text(number.to_string()).size(14))
                    .padding(Padding::new(8.0).left(14.0).right(14.0))
                    .style(chip_style(palette, false))
                    .on_press(Message::ChangePage(number))
                    .into(),
                PageControl::Ellipsis => text("...").size(14).color(palette.text_muted).into(),
                PageControl::Next { target, enabled } => button(
                    row![text("Next").size(14), icon(ICON_CHEVRON_RIGHT).size(12)]
                        .spacing(6)
                        .align_y(iced::Alignment::Center),
                )
                .padding(Padding::new(8.0).left(12.0).right(12.0))
                .style(chip_style(palette, false))
                .on_press_maybe(enabled.then_some(Message::ChangePage(target)))
                .into(),
            })
            .collect();

        let summary = text(format!(
            "Page {} of {}",
            window.current_page, window.total_pages
        ))
        .size(13)
        .color(palette.text_muted);

        Some(
            column![
                Row::with_children(controls)
                    .spacing(6)
                    .align_y(iced::Alignment::Center),
                summary
            ]
            .spacing(10)
            .align_x(iced::Alignment::Center)
            .width(Length::Fill)
            .into(),
        )
    }
}
