use iced::widget::{column, container, row, text, Column, Row};
use iced::{Element, Length, Padding};

use crate::components::{bold_text, icon, surface_style, ICON_FILM, ICON_PERSON_FILL};
use crate::details::{
    collection_url, country_names, directors, format_date, format_money, imdb_url, key_crew,
    language_name, plural, spoken_language_names, top_cast, writers,
};
use crate::media::{CrewMember, DetailTab, Message, MovieDetails};
use crate::theme::Palette;
use crate::tmdb::ImageSize;
use crate::Cinedex;

const CAST_PER_ROW: usize = 4;
const CAST_WIDTH: f32 = 140.0;
const CAST_HEIGHT: f32 = 210.0;

fn labeled<'a>(label: &'a str, value: String, palette: Palette) -> Element<'a, Message> {
    column![
        text(label).size(12).color(palette.text_muted),
        text(value)
            .size(15)
            .color(palette.text)
            .shaping(text::Shaping::Advanced),
    ]
    .spacing(4)
    .width(Length::FillPortion(1))
    .into()
}

fn info_group<'a>(
    title: &'a str,
    entries: Vec<Element<'a, Message>>,
    palette: Palette,
) -> Element<'a, Message> {
    let mut group = Column::new()
        .spacing(14)
        .push(bold_text(title, 16, palette.text));
    for pair in chunk_pairs(entries) {
        group = group.push(Row::with_children(pair).spacing(16));
    }
    container(group)
        .width(Length::Fill)
        .padding(16)
        .style(surface_style(palette, 10.0))
        .into()
}

fn chunk_pairs<T>(items: Vec<T>) -> Vec<Vec<T>> {
    let mut pairs = Vec::with_capacity(items.len().div_ceil(2));
    let mut iter = items.into_iter();
    while let Some(first) = iter.next() {
        let mut pair = vec![first];
        pair.extend(iter.next());
        pairs.push(pair);
    }
    pairs
}

impl Cinedex {
    pub fn view_detail_tab_content<'a>(
        &'a self,
        details: &'a MovieDetails,
        palette: Palette,
    ) -> Element<'a, Message> {
        match self.detail_tab {
            DetailTab::Overview => self.view_overview_tab(details, palette),
            DetailTab::CastAndCrew => self.view_cast_tab(details, palette),
            DetailTab::Details => self.view_info_tab(details, palette),
        }
    }

    fn view_overview_tab<'a>(
        &'a self,
        details: &'a MovieDetails,
        palette: Palette,
    ) -> Element<'a, Message> {
        let mut content = Column::new().spacing(24);

        content = content.push(if details.overview.is_empty() {
            Element::from(
                text("No overview available.")
                    .size(15)
                    .color(palette.text_muted),
            )
        } else {
            column![
                bold_text("Synopsis", 20, palette.text),
                text(&details.overview)
                    .size(16)
                    .color(palette.text)
                    .shaping(text::Shaping::Advanced),
            ]
            .spacing(10)
            .into()
        });

        let directors = directors(details);
        let writers = writers(details);
        if !directors.is_empty() || !writers.is_empty() {
            let mut people = Row::new().spacing(32);
            if !directors.is_empty() {
                people = people.push(Self::view_people_list(
                    plural("Director", directors.len()),
                    &directors,
                    false,
                    palette,
                ));
            }
            if !writers.is_empty() {
                people = people.push(Self::view_people_list(
                    plural("Writer", writers.len()),
                    &writers,
                    true,
                    palette,
                ));
            }
            content = content.push(
                column![bold_text("Key People", 18, palette.text), people].spacing(12),
            );
        }

        if !details.production_companies.is_empty() {
            let companies: Vec<Element<Message>> = details
                .production_companies
                .iter()
                .map(|company| {
                    let logo: Element<Message> = match self
                        .cached_image(company.logo_path.as_deref(), ImageSize::Logo)
                    {
                        Some(handle) => iced::widget::image(handle)
                            .width(Length::Fixed(48.0))
                            .height(Length::Fixed(24.0))
                            .content_fit(iced::ContentFit::Contain)
                            .into(),
                        None => icon(ICON_FILM).size(18).color(palette.text_muted).into(),
                    };
                    container(
                        row![logo, text(&company.name).size(14).color(palette.text)]
                            .spacing(10)
                            .align_y(iced::Alignment::Center),
                    )
                    .padding(Padding::new(8.0).left(12.0).right(12.0))
                    .style(surface_style(palette, 8.0))
                    .into()
                })
                .collect();
            content = content.push(
                column![
                    bold_text("Production Companies", 18, palette.text),
                    Row::with_children(companies).spacing(10).wrap(),
                ]
                .spacing(12),
            );
        }

        content.into()
    }

    fn view_people_list<'a>(
        title: String,
        people: &[&'a CrewMember],
        with_job: bool,
        palette: Palette,
    ) -> Element<'a, Message> {
        let mut list = column![row![
            icon(ICON_FILM).size(14).color(palette.accent),
            bold_text(title, 15, palette.text),
        ]
        .spacing(8)
        .align_y(iced::Alignment::Center)]
        .spacing(6);

        for person in people {
            let line = if with_job {
                format!("{} ({})", person.name, person.job)
            } else {
                person.name.clone()
            };
            list = list.push(text(line).size(14).color(palette.text_muted));
        }
        list.width(Length::FillPortion(1)).into()
    }

    fn view_cast_tab<'a>(
        &'a self,
        details: &'a MovieDetails,
        palette: Palette,
    ) -> Element<'a, Message> {
        let mut content = Column::new().spacing(28);
        let (cast, remaining) = top_cast(details);

        if cast.is_empty() {
            content = content.push(
                text("No cast information available.")
                    .size(15)
                    .color(palette.text_muted),
            );
        } else {
            let mut section = column![row![
                icon(ICON_PERSON_FILL).size(18).color(palette.accent),
                bold_text("Cast", 20, palette.text),
            ]
            .spacing(8)
            .align_y(iced::Alignment::Center)]
            .spacing(14);

            for chunk in cast.chunks(CAST_PER_ROW) {
                let cards: Vec<Element<Message>> = chunk
                    .iter()
                    .map(|person| {
                        let photo = Self::image_or_placeholder(
                            self.cached_image(person.profile_path.as_deref(), ImageSize::Profile),
                            CAST_WIDTH,
                            CAST_HEIGHT,
                            8.0,
                            palette,
                            ICON_PERSON_FILL,
                        );
                        column![
                            photo,
                            text(&person.name)
                                .size(14)
                                .color(palette.text)
                                .shaping(text::Shaping::Advanced),
                            text(person.character.as_deref().unwrap_or(""))
                                .size(12)
                                .color(palette.text_muted)
                                .shaping(text::Shaping::Advanced),
                        ]
                        .spacing(4)
                        .width(Length::Fixed(CAST_WIDTH))
                        .into()
                    })
                    .collect();
                section = section.push(Row::with_children(cards).spacing(16));
            }

            if remaining > 0 {
                section = section.push(
                    text(format!("+{} more cast members", remaining))
                        .size(13)
                        .color(palette.text_muted),
                );
            }
            content = content.push(section);
        }

        let crew = key_crew(details);
        if !crew.is_empty() {
            let entries: Vec<Element<Message>> = crew
                .into_iter()
                .map(|person| {
                    let avatar = Self::image_or_placeholder(
                        self.cached_image(person.profile_path.as_deref(), ImageSize::Thumb),
                        40.0,
                        40.0,
                        20.0,
                        palette,
                        ICON_FILM,
                    );
                    row![
                        avatar,
                        column![
                            text(&person.name).size(14).color(palette.text),
                            text(&person.job).size(12).color(palette.text_muted),
                        ]
                        .spacing(2),
                    ]
                    .spacing(10)
                    .align_y(iced::Alignment::Center)
                    .width(Length::FillPortion(1))
                    .into()
                })
                .collect();

            let mut section = column![row![
                icon(ICON_FILM).size(18).color(palette.accent),
                bold_text("Key Crew", 20, palette.text),
            ]
            .spacing(8)
            .align_y(iced::Alignment::Center)]
            .spacing(14);
            for pair in chunk_pairs(entries) {
                section = section.push(Row::with_children(pair).spacing(16));
            }
            content = content.push(section);
        }

        content.into()
    }

    fn view_info_tab<'a>(
        &'a self,
        details: &'a MovieDetails,
        palette: Palette,
    ) -> Element<'a, Message> {
        let mut general = Vec::new();
        if let Some(code) = details.original_language.as_deref().filter(|c| !c.is_empty()) {
            general.push(labeled("Original Language", language_name(code), palette));
        }
        if let Some(popularity) = details.popularity {
            general.push(labeled("Popularity Score", format!("{:.2}", popularity), palette));
        }
        if let Some(status) = details.status.as_deref().filter(|s| !s.is_empty()) {
            general.push(labeled("Status", status.to_string(), palette));
        }
        if let Some(adult) = details.adult {
            let answer = if adult { "Yes" } else { "No" };
            general.push(labeled("Adult Content", answer.to_string(), palette));
        }

        let mut production = Vec::new();
        if details.budget.is_some_and(|b| b > 0) {
            production.push(labeled("Budget", format_money(details.budget), palette));
        }
        if details.revenue.is_some_and(|r| r > 0) {
            production.push(labeled("Revenue", format_money(details.revenue), palette));
        }
        if let Some(countries) = country_names(details) {
            production.push(labeled("Production Countries", countries, palette));
        }

        let mut dates = Vec::new();
        if details.release_date().is_some() {
            dates.push(labeled("Release Date", format_date(details.release_date()), palette));
        }
        dates.push(labeled("TMDB ID", details.id.to_string(), palette));
        if let Some(imdb_id) = details.imdb_id() {
            dates.push(labeled(
                "IMDB ID",
                format!("{} ({})", imdb_id, imdb_url(imdb_id)),
                palette,
            ));
        }
        if let Some(languages) = spoken_language_names(details) {
            dates.push(labeled("Spoken Languages", languages, palette));
        }

        let mut content =
            column![bold_text("Additional Information", 20, palette.text)].spacing(16);
        for (title, entries) in [
            ("General", general),
            ("Production Details", production),
            ("Dates & IDs", dates),
        ] {
            if !entries.is_empty() {
                content = content.push(info_group(title, entries, palette));
            }
        }

        if let Some(collection) = details.belongs_to_collection.as_ref() {
            let cover = Self::image_or_placeholder(
                self.cached_image(collection.poster_path.as_deref(), ImageSize::Logo),
                64.0,
                96.0,
                6.0,
                palette,
                ICON_FILM,
            );
            let info = column![
                bold_text(&collection.name, 16, palette.text),
                text(format!("View Collection on TMDB: {}", collection_url(collection.id)))
                    .size(13)
                    .color(palette.accent),
            ]
            .spacing(6);
            content = content.push(
                container(
                    column![
                        bold_text("Collection Information", 16, palette.text),
                        row![cover, info].spacing(16).align_y(iced::Alignment::Center),
                    ]
                    .spacing(14),
                )
                .width(Length::Fill)
                .padding(16)
                .style(surface_style(palette, 10.0)),
            );
        }

        content.into()
    }
}

#[cfg(test)]
mod tests {
    use super::chunk_pairs;

    #[test]
    fn pairs_up_entries() {
        assert_eq!(chunk_pairs(vec![1, 2, 3]), vec![vec![1, 2], vec![3]]);
        assert_eq!(chunk_pairs(vec![1, 2]), vec![vec![1, 2]]);
        assert!(chunk_pairs(Vec::<u8>::new()).is_empty());
    }
}
