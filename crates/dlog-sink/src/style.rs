//! crates/dlog-sink/src/style.rs
//! Namespace display styles and color token parsing.

use std::fmt;
use std::str::FromStr;

use anstyle::{AnsiColor, Color, RgbColor};

/// Error produced when a color token cannot be interpreted.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum StyleError {
    /// The token is neither a hex color nor a known ANSI color name.
    #[error("invalid color token '{0}': expected #rgb, #rrggbb, or an ANSI color name")]
    InvalidColor(String),
}

/// A parsed color token.
///
/// Namespaces store their color as the raw token the caller supplied so the
/// CSS-like style string reproduces it verbatim. Terminal sinks parse the
/// token into a [`ColorToken`] when they need an ANSI escape sequence.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ColorToken {
    /// 24-bit color written as `#rgb` or `#rrggbb`.
    Rgb(u8, u8, u8),
    /// One of the sixteen standard terminal colors, written by name.
    Ansi(AnsiColor),
}

impl ColorToken {
    /// Converts the token into an [`anstyle::Color`].
    #[must_use]
    pub const fn to_color(self) -> Color {
        match self {
            Self::Rgb(r, g, b) => Color::Rgb(RgbColor(r, g, b)),
            Self::Ansi(color) => Color::Ansi(color),
        }
    }
}

impl From<ColorToken> for Color {
    fn from(token: ColorToken) -> Self {
        token.to_color()
    }
}

impl FromStr for ColorToken {
    type Err = StyleError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let trimmed = token.trim();
        let invalid = || StyleError::InvalidColor(token.to_owned());

        if let Some(hex) = trimmed.strip_prefix('#') {
            return parse_hex(hex).ok_or_else(invalid);
        }

        let name = trimmed.to_ascii_lowercase().replace(['_', ' '], "-");
        let color = match name.as_str() {
            "black" => AnsiColor::Black,
            "red" => AnsiColor::Red,
            "green" => AnsiColor::Green,
            "yellow" => AnsiColor::Yellow,
            "blue" => AnsiColor::Blue,
            "magenta" | "purple" => AnsiColor::Magenta,
            "cyan" => AnsiColor::Cyan,
            "white" => AnsiColor::White,
            "gray" | "grey" | "bright-black" => AnsiColor::BrightBlack,
            "bright-red" => AnsiColor::BrightRed,
            "bright-green" => AnsiColor::BrightGreen,
            "bright-yellow" => AnsiColor::BrightYellow,
            "bright-blue" => AnsiColor::BrightBlue,
            "bright-magenta" => AnsiColor::BrightMagenta,
            "bright-cyan" => AnsiColor::BrightCyan,
            "bright-white" => AnsiColor::BrightWhite,
            _ => return Err(invalid()),
        };
        Ok(Self::Ansi(color))
    }
}

fn parse_hex(hex: &str) -> Option<ColorToken> {
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }

    match hex.len() {
        3 => {
            let mut channels = hex
                .chars()
                .map(|c| c.to_digit(16).map(|nibble| (nibble * 17) as u8));
            let r = channels.next()??;
            let g = channels.next()??;
            let b = channels.next()??;
            Some(ColorToken::Rgb(r, g, b))
        }
        6 => {
            let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
            Some(ColorToken::Rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
        }
        _ => None,
    }
}

/// Display style attached to a namespace: a color token and a size token.
///
/// The tokens are stored verbatim. [`css`](Self::css) renders them into the
/// `color: <c>; font-size: <s>` style string used by sinks that understand
/// CSS-like styling, while [`ansi`](Self::ansi) derives a terminal style from
/// the color token alone. Size tokens have no terminal rendering.
///
/// # Examples
///
/// ```
/// use dlog_sink::Style;
///
/// let style = Style::new("#007ACC", "8pt");
/// assert_eq!(style.css(), "color: #007ACC; font-size: 8pt");
/// assert!(style.ansi().get_fg_color().is_some());
/// ```
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Style {
    color: String,
    size: String,
}

impl Style {
    /// Creates a style from a color token and a size token.
    pub fn new(color: impl Into<String>, size: impl Into<String>) -> Self {
        Self {
            color: color.into(),
            size: size.into(),
        }
    }

    /// Returns the color token.
    #[must_use]
    pub fn color(&self) -> &str {
        &self.color
    }

    /// Returns the size token.
    #[must_use]
    pub fn size(&self) -> &str {
        &self.size
    }

    /// Replaces the color token.
    pub fn set_color(&mut self, color: impl Into<String>) {
        self.color = color.into();
    }

    /// Replaces the size token.
    pub fn set_size(&mut self, size: impl Into<String>) {
        self.size = size.into();
    }

    /// Renders the CSS-like style string.
    #[must_use]
    pub fn css(&self) -> String {
        format!("color: {}; font-size: {}", self.color, self.size)
    }

    /// Parses the color token.
    pub fn color_token(&self) -> Result<ColorToken, StyleError> {
        self.color.parse()
    }

    /// Derives a terminal style from the color token.
    ///
    /// Unparseable tokens yield an empty style so output stays readable.
    #[must_use]
    pub fn ansi(&self) -> anstyle::Style {
        match self.color_token() {
            Ok(token) => anstyle::Style::new().fg_color(Some(token.to_color())),
            Err(_) => anstyle::Style::new(),
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "color: {}; font-size: {}", self.color, self.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_six_digit_hex() {
        assert_eq!(
            "#63666A".parse::<ColorToken>(),
            Ok(ColorToken::Rgb(0x63, 0x66, 0x6A))
        );
        assert_eq!(
            "#00a499".parse::<ColorToken>(),
            Ok(ColorToken::Rgb(0x00, 0xA4, 0x99))
        );
    }

    #[test]
    fn parses_three_digit_hex() {
        assert_eq!(
            "#fff".parse::<ColorToken>(),
            Ok(ColorToken::Rgb(255, 255, 255))
        );
        assert_eq!("#a0c".parse::<ColorToken>(), Ok(ColorToken::Rgb(170, 0, 204)));
    }

    #[test]
    fn parses_ansi_names_case_insensitively() {
        assert_eq!(
            "Red".parse::<ColorToken>(),
            Ok(ColorToken::Ansi(AnsiColor::Red))
        );
        assert_eq!(
            "bright_cyan".parse::<ColorToken>(),
            Ok(ColorToken::Ansi(AnsiColor::BrightCyan))
        );
        assert_eq!(
            " grey ".parse::<ColorToken>(),
            Ok(ColorToken::Ansi(AnsiColor::BrightBlack))
        );
    }

    #[test]
    fn rejects_malformed_tokens() {
        for token in ["", "#", "#12", "#12345", "#gggggg", "#1234567", "chartreuse"] {
            assert_eq!(
                token.parse::<ColorToken>(),
                Err(StyleError::InvalidColor(token.to_owned())),
                "{token:?} should be rejected"
            );
        }
    }

    #[test]
    fn css_renders_both_tokens() {
        let style = Style::new("#CC3300", "12pt");
        assert_eq!(style.css(), "color: #CC3300; font-size: 12pt");
        assert_eq!(style.to_string(), style.css());
    }

    #[test]
    fn ansi_uses_rgb_foreground() {
        let style = Style::new("#007ACC", "8pt");
        assert_eq!(
            style.ansi().get_fg_color(),
            Some(Color::Rgb(RgbColor(0x00, 0x7A, 0xCC)))
        );
    }

    #[test]
    fn ansi_falls_back_to_plain_for_unknown_colors() {
        let style = Style::new("rebeccapurple", "8pt");
        assert_eq!(style.ansi(), anstyle::Style::new());
    }

    #[test]
    fn setters_replace_tokens() {
        let mut style = Style::new("red", "8pt");
        style.set_color("blue");
        style.set_size("10pt");
        assert_eq!(style.color(), "blue");
        assert_eq!(style.size(), "10pt");
    }

    #[test]
    fn invalid_color_error_names_token() {
        let error = "nope".parse::<ColorToken>().unwrap_err();
        assert!(error.to_string().contains("'nope'"));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn style_serde_roundtrip() {
        let style = Style::new("#33CC33", "8pt");
        let json = serde_json::to_string(&style).unwrap();
        let decoded: Style = serde_json::from_str(&json).unwrap();
        assert_eq!(style, decoded);
    }
}
