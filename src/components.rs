use iced::widget::{button, column, container, row, scrollable, text, text_input, Space};
use iced::{Border, Color, Element, Length, Padding, Shadow};

use crate::auth::AuthForm;
use crate::media::{Message, Page};
use crate::theme::Palette;
use crate::Cinedex;

pub const ICON_ARROW_LEFT: char = '\u{F12F}';
pub const ICON_CHEVRON_LEFT: char = '\u{F284}';
pub const ICON_CHEVRON_RIGHT: char = '\u{F285}';
pub const ICON_FILM: char = '\u{F3A9}';
pub const ICON_GLOBE: char = '\u{F3EF}';
pub const ICON_INFO_CIRCLE: char = '\u{F431}';
pub const ICON_PERSON_FILL: char = '\u{F4DA}';
pub const ICON_SEARCH: char = '\u{F52A}';
pub const ICON_STAR_FILL: char = '\u{F586}';
pub const ICON_X_LG: char = '\u{F659}';

pub fn icon(icon_char: char) -> iced::widget::Text<'static> {
    text(icon_char.to_string()).font(iced::Font {
        family: iced::font::Family::Name("bootstrap-icons"),
        ..Default::default()
    })
}

pub fn bold_text(s: impl ToString, size: u32, color: Color) -> iced::widget::Text<'static> {
    text(s.to_string())
        .size(size)
        .color(color)
        .font(iced::Font {
            weight: iced::font::Weight::Bold,
            ..Default::default()
        })
}

fn hidden_rail() -> scrollable::Rail {
    scrollable::Rail {
        background: None,
        border: Border::default(),
        scroller: scrollable::Scroller {
            background: iced::Background::Color(Color::TRANSPARENT),
            border: Border::default(),
        },
    }
}

pub fn hidden_scrollbar_style(
    _theme: &iced::Theme,
    _status: scrollable::Status,
) -> scrollable::Style {
    scrollable::Style {
        container: container::Style::default(),
        vertical_rail: hidden_rail(),
        horizontal_rail: hidden_rail(),
        gap: None,
        auto_scroll: scrollable::AutoScroll {
            background: iced::Background::Color(Color::TRANSPARENT),
            border: Border::default(),
            shadow: Shadow::default(),
            icon: Color::TRANSPARENT,
        },
    }
}

/// Filled accent button, as used for primary actions.
pub fn accent_button_style(
    palette: Palette,
) -> impl Fn(&iced::Theme, button::Status) -> button::Style {
    move |_theme, status| {
        let background = match status {
            button::Status::Hovered | button::Status::Pressed => palette.accent_hover,
            button::Status::Disabled => palette.surface_raised,
            button::Status::Active => palette.accent,
        };
        let text_color = match status {
            button::Status::Disabled => palette.text_muted,
            _ => palette.on_accent,
        };
        button::Style {
            background: Some(iced::Background::Color(background)),
            text_color,
            border: Border::default().rounded(8),
            shadow: Shadow::default(),
            snap: false,
        }
    }
}

/// Rounded pill, accent-filled while `active`.
pub fn chip_style(
    palette: Palette,
    active: bool,
) -> impl Fn(&iced::Theme, button::Status) -> button::Style {
    move |_theme, status| {
        let (background, text_color) = match (active, status) {
            (true, _) => (palette.accent, palette.on_accent),
            (false, button::Status::Hovered) => (palette.surface_raised, palette.text),
            (false, button::Status::Disabled) => (palette.surface, palette.text_muted),
            (false, _) => (palette.surface, palette.text),
        };
        button::Style {
            background: Some(iced::Background::Color(background)),
            text_color,
            border: Border {
                color: if active { palette.accent } else { palette.border },
                width: 1.0,
                radius: 999.0.into(),
            },
            shadow: Shadow::default(),
            snap: false,
        }
    }
}

pub fn ghost_button_style(
    palette: Palette,
) -> impl Fn(&iced::Theme, button::Status) -> button::Style {
    move |_theme, status| {
        let background = match status {
            button::Status::Hovered => palette.surface_raised,
            _ => Color::TRANSPARENT,
        };
        button::Style {
            background: Some(iced::Background::Color(background)),
            text_color: palette.text,
            border: Border::default().rounded(8),
            shadow: Shadow::default(),
            snap: false,
        }
    }
}

pub fn surface_style(palette: Palette, radius: f32) -> impl Fn(&iced::Theme) -> container::Style {
    move |_theme| container::Style {
        background: Some(iced::Background::Color(palette.surface)),
        border: Border {
            color: palette.border,
            width: 1.0,
            radius: radius.into(),
        },
        ..Default::default()
    }
}

pub fn skeleton_style(palette: Palette, radius: f32) -> impl Fn(&iced::Theme) -> container::Style {
    move |_theme| container::Style {
        background: Some(iced::Background::Color(palette.skeleton)),
        border: Border {
            radius: radius.into(),
            ..Default::default()
        },
        ..Default::default()
    }
}

pub fn skeleton_block<'a>(
    palette: Palette,
    width: impl Into<Length>,
    height: f32,
) -> Element<'a, Message> {
    container(Space::new().width(width).height(height))
        .style(skeleton_style(palette, 4.0))
        .into()
}

impl Cinedex {
    pub fn view_navbar(&self, palette: Palette) -> Element<'_, Message> {
        let logo = button(
            row![
                icon(ICON_FILM).size(22).color(palette.accent),
                bold_text("Cinedex", 24, palette.text),
            ]
            .spacing(8)
            .align_y(iced::Alignment::Center),
        )
        .padding(0)
        .style(button::text)
        .on_press(Message::NavigateTo(Page::Home));

        let right_section = row![
            self.view_search_bar(palette),
            self.view_theme_toggle(palette),
            self.view_account_button(palette),
        ]
        .spacing(16)
        .align_y(iced::Alignment::Center);

        let header_content = row![logo, Space::new().width(Length::Fill), right_section]
            .padding(Padding::new(16.0).left(48.0).right(48.0))
            .align_y(iced::Alignment::Center);

        container(header_content)
            .width(Length::Fill)
            .height(Length::Fixed(72.0))
            .style(move |_theme| container::Style {
                background: Some(iced::Background::Color(palette.surface)),
                border: Border {
                    color: palette.border,
                    width: 1.0,
                    radius: 0.0.into(),
                },
                ..Default::default()
            })
            .into()
    }

    pub fn view_search_bar(&self, palette: Palette) -> Element<'_, Message> {
        let search_icon = icon(ICON_SEARCH).size(14).color(palette.text_muted);

        let search_input = text_input("Search movies...", &self.search_query)
            .on_input(Message::SearchQueryChanged)
            .on_submit(Message::SearchSubmit)
            .padding(8)
            .width(Length::Fixed(220.0))
            .style(move |_theme, _status| text_input::Style {
                background: iced::Background::Color(Color::TRANSPARENT),
                border: Border::default(),
                icon: palette.text_muted,
                placeholder: palette.text_muted,
                value: palette.text,
                selection: palette.accent,
            });

        let mut search_content = row![search_icon, search_input]
            .spacing(8)
            .align_y(iced::Alignment::Center);

        if !self.search_query.is_empty() {
            search_content = search_content.push(
                button(icon(ICON_X_LG).size(12).color(palette.text_muted))
                    .padding(4)
                    .style(button::text)
                    .on_press(Message::ClearSearch),
            );
        }

        container(search_content)
            .padding(Padding::new(4.0).left(12.0).right(8.0))
            .style(move |_theme| container::Style {
                background: Some(iced::Background::Color(palette.surface_raised)),
                border: Border {
                    color: palette.border,
                    width: 1.0,
                    radius: 24.0.into(),
                },
                ..Default::default()
            })
            .into()
    }

    fn view_theme_toggle(&self, palette: Palette) -> Element<'_, Message> {
        button(text(self.appearance.toggle_label()).size(13).color(palette.text))
            .padding(Padding::new(8.0).left(12.0).right(12.0))
            .style(ghost_button_style(palette))
            .on_press(Message::ToggleTheme)
            .into()
    }

    fn view_account_button(&self, palette: Palette) -> Element<'_, Message> {
        match self.signed_in_as {
            Some(ref name) => row![
                icon(ICON_PERSON_FILL).size(16).color(palette.text),
                text(name).size(14).color(palette.text),
                button(text("Sign out").size(13))
                    .padding(Padding::new(8.0).left(12.0).right(12.0))
                    .style(ghost_button_style(palette))
                    .on_press(Message::SignOut),
            ]
            .spacing(8)
            .align_y(iced::Alignment::Center)
            .into(),
            None => button(text("Sign In").size(14))
                .padding(Padding::new(8.0).left(16.0).right(16.0))
                .style(accent_button_style(palette))
                .on_press(Message::OpenAuth)
                .into(),
        }
    }

    pub fn view_auth_overlay<'a>(
        &'a self,
        form: &'a AuthForm,
        palette: Palette,
    ) -> Element<'a, Message> {
        let close = button(icon(ICON_X_LG).size(16).color(palette.text_muted))
            .padding(8)
            .style(button::text)
            .on_press(Message::CloseAuth);

        let card = column![
            row![Space::new().width(Length::Fill), close],
            form.view(palette).map(Message::Auth),
        ]
        .width(Length::Shrink);

        let backdrop = iced::widget::mouse_area(
            container(Space::new().width(Length::Fill).height(Length::Fill))
                .width(Length::Fill)
                .height(Length::Fill)
                .style(move |_theme| container::Style {
                    background: Some(iced::Background::Color(palette.overlay)),
                    ..Default::default()
                }),
        )
        .on_press(Message::CloseAuth);

        // Idle interaction keeps presses on the card from reaching the backdrop.
        let centered_card = container(
            iced::widget::mouse_area(card).interaction(iced::mouse::Interaction::Idle),
        )
        .width(Length::Fill)
        .height(Length::Fill)
        .center_x(Length::Fill)
        .center_y(Length::Fill);

        iced::widget::stack![backdrop, centered_card]
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    /// Centered message with an optional action, for empty and error states.
    pub fn view_notice<'a>(
        &'a self,
        palette: Palette,
        title: String,
        detail: Option<String>,
        action: Option<(&'static str, Message)>,
    ) -> Element<'a, Message> {
        let mut content = column![
            icon(ICON_INFO_CIRCLE).size(40).color(palette.text_muted),
            bold_text(title, 22, palette.text),
        ]
        .spacing(12)
        .align_x(iced::Alignment::Center);

        if let Some(detail) = detail {
            content = content.push(text(detail).size(15).color(palette.text_muted));
        }
        if let Some((label, message)) = action {
            content = content.push(
                button(text(label).size(15))
                    .padding(Padding::new(10.0).left(20.0).right(20.0))
                    .style(accent_button_style(palette))
                    .on_press(message),
            );
        }

        container(content)
            .width(Length::Fill)
            .padding(64)
            .center_x(Length::Fill)
            .into()
    }
}
