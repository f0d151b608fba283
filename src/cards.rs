use iced::widget::image::Handle;
use iced::widget::{column, container, row, text, Column, Row, Space};
use iced::{Border, Color, Element, Length, Shadow};

use crate::components::{bold_text, icon, skeleton_block, ICON_FILM, ICON_STAR_FILL};
use crate::details::format_rating;
use crate::media::{Message, Movie};
use crate::theme::{Palette, RATING_GOLD};
use crate::tmdb::{image_url, ImageSize};
use crate::Cinedex;

pub const CARD_WIDTH: f32 = 180.0;
pub const POSTER_HEIGHT: f32 = 270.0;
pub const CARDS_PER_ROW: usize = 5;

fn rounded_style(radius: f32, bg: Option<Color>) -> container::Style {
    container::Style {
        background: bg.map(iced::Background::Color),
        border: Border {
            radius: radius.into(),
            ..Default::default()
        },
        ..Default::default()
    }
}

impl Cinedex {
    pub fn cached_image(&self, path: Option<&str>, size: ImageSize) -> Option<Handle> {
        let url = image_url(path?, size);
        self.image_cache.get(&url).cloned()
    }

    pub fn image_or_placeholder<'a>(
        handle: Option<Handle>,
        width: f32,
        height: f32,
        radius: f32,
        palette: Palette,
        placeholder: char,
    ) -> Element<'a, Message> {
        match handle {
            Some(h) => container(
                iced::widget::image(h)
                    .width(Length::Fixed(width))
                    .height(Length::Fixed(height))
                    .content_fit(iced::ContentFit::Cover),
            )
            .style(move |_| rounded_style(radius, None))
            .into(),
            None => container(
                icon(placeholder)
                    .size(width.min(height) / 4.0)
                    .color(palette.text_muted),
            )
            .width(Length::Fixed(width))
            .height(Length::Fixed(height))
            .center_x(Length::Fixed(width))
            .center_y(Length::Fixed(height))
            .style(move |_| rounded_style(radius, Some(palette.surface_raised)))
            .into(),
        }
    }

    pub fn view_movie_card<'a>(
        &'a self,
        movie: &'a Movie,
        palette: Palette,
    ) -> Element<'a, Message> {
        let poster = Self::image_or_placeholder(
            self.cached_image(movie.poster_path.as_deref(), ImageSize::Poster),
            CARD_WIDTH,
            POSTER_HEIGHT,
            8.0,
            palette,
            ICON_FILM,
        );

        let rating = row![
            icon(ICON_STAR_FILL).size(12).color(RATING_GOLD),
            text(format_rating(Some(movie.vote_average)))
                .size(12)
                .color(palette.text_muted),
        ]
        .spacing(4)
        .align_y(iced::Alignment::Center);

        let meta = row![
            text(movie.release_year().unwrap_or("N/A"))
                .size(12)
                .color(palette.text_muted),
            Space::new().width(Length::Fill),
            rating,
        ]
        .align_y(iced::Alignment::Center);

        let info = column![
            bold_text(&movie.title, 14, palette.text).shaping(text::Shaping::Advanced),
            meta
        ]
        .spacing(6)
        .padding(10);

        let card = container(column![poster, info])
            .width(Length::Fixed(CARD_WIDTH))
            .style(move |_theme| container::Style {
                background: Some(iced::Background::Color(palette.surface)),
                border: Border {
                    color: palette.border,
                    width: 1.0,
                    radius: 8.0.into(),
                },
                shadow: Shadow {
                    color: Color::from_rgba(0.0, 0.0, 0.0, 0.3),
                    offset: iced::Vector::new(0.0, 4.0),
                    blur_radius: 8.0,
                },
                ..Default::default()
            });

        iced::widget::mouse_area(card)
            .interaction(iced::mouse::Interaction::Pointer)
            .on_press(Message::OpenMovie(movie.id))
            .into()
    }

    pub fn view_movie_grid<'a>(
        &'a self,
        movies: &'a [Movie],
        palette: Palette,
    ) -> Element<'a, Message> {
        let rows: Vec<Element<Message>> = movies
            .chunks(CARDS_PER_ROW)
            .map(|chunk| {
                let cards: Vec<Element<Message>> = chunk
                    .iter()
                    .map(|movie| self.view_movie_card(movie, palette))
                    .collect();
                Row::with_children(cards)
                    .spacing(20)
                    .align_y(iced::Alignment::Start)
                    .into()
            })
            .collect();

        Column::with_children(rows)
            .spacing(20)
            .width(Length::Fill)
            .into()
    }

    pub fn view_skeleton_grid(&self, palette: Palette, count: usize) -> Element<'_, Message> {
        let cards: Vec<Element<Message>> = (0..count)
            .map(|_| {
                column![
                    skeleton_block(palette, CARD_WIDTH, POSTER_HEIGHT),
                    skeleton_block(palette, CARD_WIDTH * 0.8, 14.0),
                    skeleton_block(palette, CARD_WIDTH * 0.4, 12.0),
                ]
                .spacing(8)
                .into()
            })
            .collect();

        let rows: Vec<Element<Message>> = chunk_elements(cards, CARDS_PER_ROW)
            .into_iter()
            .map(|chunk| Row::with_children(chunk).spacing(20).into())
            .collect();

        Column::with_children(rows)
            .spacing(20)
            .width(Length::Fill)
            .into()
    }
}

fn chunk_elements<T>(items: Vec<T>, size: usize) -> Vec<Vec<T>> {
    let mut chunks = Vec::new();
    let mut current = Vec::with_capacity(size);
    for item in items {
        current.push(item);
        if current.len() == size {
            chunks.push(std::mem::replace(&mut current, Vec::with_capacity(size)));
        }
    }
    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

#[cfg(test)]
mod tests {
    use super::chunk_elements;

    #[test]
    fn chunks_keep_order_and_remainder() {
        let chunks = chunk_elements((1..=7).collect::<Vec<i32>>(), 3);
        assert_eq!(chunks, vec![vec![1, 2, 3], vec![4, 5, 6], vec![7]]);
        assert!(chunk_elements(Vec::<u8>::new(), 3).is_empty());
    }
}
