use iced::Color;

pub const ACCENT_RED: Color = Color::from_rgb(0.898, 0.035, 0.078);
pub const ACCENT_RED_HOVER: Color = Color::from_rgb(0.7, 0.02, 0.06);
pub const RATING_GOLD: Color = Color::from_rgb(0.96, 0.77, 0.09);
pub const STATUS_GREEN: Color = Color::from_rgb(0.13, 0.6, 0.33);
pub const STATUS_BLUE: Color = Color::from_rgb(0.15, 0.45, 0.85);

/// Colors for one appearance, handed to every view that draws.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub background: Color,
    pub surface: Color,
    pub surface_raised: Color,
    pub border: Color,
    pub text: Color,
    pub text_muted: Color,
    pub accent: Color,
    pub accent_hover: Color,
    pub on_accent: Color,
    pub skeleton: Color,
    pub overlay: Color,
}

impl Palette {
    pub const DARK: Palette = Palette {
        background: Color::from_rgb(0.067, 0.067, 0.067),
        surface: Color::from_rgb(0.12, 0.12, 0.13),
        surface_raised: Color::from_rgb(0.18, 0.18, 0.2),
        border: Color::from_rgb(0.25, 0.25, 0.27),
        text: Color::WHITE,
        text_muted: Color::from_rgb(0.64, 0.64, 0.68),
        accent: ACCENT_RED,
        accent_hover: ACCENT_RED_HOVER,
        on_accent: Color::WHITE,
        skeleton: Color::from_rgb(0.22, 0.22, 0.24),
        overlay: Color::from_rgba(0.0, 0.0, 0.0, 0.6),
    };

    pub const LIGHT: Palette = Palette {
        background: Color::from_rgb(0.97, 0.97, 0.98),
        surface: Color::WHITE,
        surface_raised: Color::from_rgb(0.93, 0.93, 0.95),
        border: Color::from_rgb(0.85, 0.85, 0.88),
        text: Color::from_rgb(0.07, 0.09, 0.15),
        text_muted: Color::from_rgb(0.42, 0.45, 0.5),
        accent: ACCENT_RED,
        accent_hover: ACCENT_RED_HOVER,
        on_accent: Color::WHITE,
        skeleton: Color::from_rgb(0.88, 0.88, 0.9),
        overlay: Color::from_rgba(0.0, 0.0, 0.0, 0.35),
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Appearance {
    pub dark_mode: bool,
}

impl Default for Appearance {
    fn default() -> Self {
        Self { dark_mode: true }
    }
}

impl Appearance {
    pub fn new(dark_mode: bool) -> Self {
        Self { dark_mode }
    }

    pub fn toggled(self) -> Self {
        Self {
            dark_mode: !self.dark_mode,
        }
    }

    pub fn palette(self) -> Palette {
        if self.dark_mode {
            Palette::DARK
        } else {
            Palette::LIGHT
        }
    }

    pub fn iced_theme(self) -> iced::Theme {
        if self.dark_mode {
            iced::Theme::Dark
        } else {
            iced::Theme::Light
        }
    }

    pub fn toggle_label(self) -> &'static str {
        if self.dark_mode {
            "Light mode"
        } else {
            "Dark mode"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggling_flips_palette_and_theme() {
        let dark = Appearance::default();
        assert!(dark.dark_mode);
        assert_eq!(dark.palette(), Palette::DARK);
        assert_eq!(dark.iced_theme(), iced::Theme::Dark);

        let light = dark.toggled();
        assert!(!light.dark_mode);
        assert_eq!(light.palette(), Palette::LIGHT);
        assert_eq!(light.iced_theme(), iced::Theme::Light);
        assert_eq!(light.toggled(), dark);
    }

    #[test]
    fn palettes_keep_readable_text() {
        assert_ne!(Palette::DARK.text, Palette::DARK.background);
        assert_ne!(Palette::LIGHT.text, Palette::LIGHT.background);
        assert_eq!(Appearance::new(false).toggle_label(), "Dark mode");
    }
}
