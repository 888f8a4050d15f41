use ratatui::style::Color;

use reader_core::config::ThemeSettings;

// Tokyonight-inspired palette; tweak these to change header/footer colors.
const TN_BG_ALT: Color = Color::Rgb(31, 35, 53); // #1f2335
const TN_BG_STRONG: Color = Color::Rgb(65, 72, 104); // #414868
const TN_FG: Color = Color::Rgb(192, 202, 245); // #c0caf5
const TN_BLUE: Color = Color::Rgb(122, 162, 247); // #7aa2f7

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub header_bg: Color,
    pub header_fg: Color,
    pub footer_bg: Color,
    pub footer_fg: Color,
    pub text_fg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            header_bg: TN_BG_ALT,
            header_fg: TN_FG,
            footer_bg: TN_BG_STRONG,
            footer_fg: TN_BLUE,
            text_fg: Color::Reset,
        }
    }
}

impl Theme {
    /// Starts from a named preset, then applies individual color overrides.
    /// Unknown names and colors are ignored.
    pub fn from_settings(settings: &ThemeSettings) -> Self {
        let mut theme = settings
            .name
            .as_deref()
            .and_then(Theme::preset)
            .unwrap_or_default();
        let overrides = [
            (&settings.header_bg, &mut theme.header_bg),
            (&settings.header_fg, &mut theme.header_fg),
            (&settings.footer_bg, &mut theme.footer_bg),
            (&settings.footer_fg, &mut theme.footer_fg),
            (&settings.text_fg, &mut theme.text_fg),
        ];
        for (value, slot) in overrides {
            if let Some(color) = value.as_deref().and_then(parse_color) {
                *slot = color;
            }
        }
        theme
    }

    pub fn preset(name: &str) -> Option<Self> {
        let theme = match name.to_lowercase().as_str() {
            "gruvbox" => Theme {
                header_bg: Color::Yellow,
                header_fg: Color::Black,
                footer_bg: Color::Green,
                footer_fg: Color::Black,
                text_fg: Color::Reset,
            },
            "dracula" => Theme {
                header_bg: Color::Magenta,
                header_fg: Color::White,
                footer_bg: Color::Blue,
                footer_fg: Color::White,
                text_fg: Color::Reset,
            },
            "tokyonight" => Theme::default(),
            "plain" => Theme {
                header_bg: Color::Reset,
                header_fg: Color::Reset,
                footer_bg: Color::Reset,
                footer_fg: Color::Reset,
                text_fg: Color::Reset,
            },
            _ => return None,
        };
        Some(theme)
    }
}

/// Accepts the basic color names and `#rrggbb`.
pub fn parse_color(s: &str) -> Option<Color> {
    let s = s.trim();
    if let Some(hex) = s.strip_prefix('#') {
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        return Some(Color::Rgb(channel(0)?, channel(2)?, channel(4)?));
    }
    match s.to_lowercase().as_str() {
        "black" => Some(Color::Black),
        "red" => Some(Color::Red),
        "green" => Some(Color::Green),
        "yellow" => Some(Color::Yellow),
        "blue" => Some(Color::Blue),
        "magenta" => Some(Color::Magenta),
        "cyan" => Some(Color::Cyan),
        "white" => Some(Color::White),
        "gray" | "darkgray" => Some(Color::DarkGray),
        "default" | "reset" => Some(Color::Reset),
        _ => None,
    }
}
