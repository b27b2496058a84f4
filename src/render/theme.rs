use ratatui::style::Color;

/// Colour scheme for the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

/// Colours used by the renderer for one theme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub text: Color,
    pub label: Color,
    pub muted: Color,
    pub border: Color,
    pub empty: Color,
    pub head: Color,
    pub body: Color,
    /// Snake colour while a power-up is running
    pub invincible: Color,
    pub food: Color,
    pub bomb: Color,
    pub power_up: Color,
    pub alert: Color,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    pub fn palette(self) -> Palette {
        match self {
            Theme::Dark => Palette {
                text: Color::White,
                label: Color::Yellow,
                muted: Color::Gray,
                border: Color::White,
                empty: Color::DarkGray,
                head: Color::Cyan,
                body: Color::Green,
                invincible: Color::LightMagenta,
                food: Color::Red,
                bomb: Color::LightYellow,
                power_up: Color::LightBlue,
                alert: Color::Red,
            },
            Theme::Light => Palette {
                text: Color::Black,
                label: Color::Blue,
                muted: Color::DarkGray,
                border: Color::Black,
                empty: Color::Gray,
                head: Color::Blue,
                body: Color::Green,
                invincible: Color::Magenta,
                food: Color::Red,
                bomb: Color::Black,
                power_up: Color::Cyan,
                alert: Color::Red,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_round_trips() {
        assert_eq!(Theme::default(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
        assert_eq!(Theme::Dark.toggled().toggled(), Theme::Dark);
    }

    #[test]
    fn test_palettes_differ() {
        assert_ne!(Theme::Dark.palette(), Theme::Light.palette());
        assert_eq!(Theme::Light.name(), "light");
    }
}
