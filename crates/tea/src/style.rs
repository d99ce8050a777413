//! Terminal text styling.
//!
//! A declarative [`Style`] builder over ANSI SGR sequences: foreground
//! and background colors (hex or 256-color index), plus the handful of
//! attributes a dashboard needs. Styles render line by line so colored
//! blocks survive embedding in larger layouts.

use std::fmt::Write as _;

use unicode_width::UnicodeWidthStr;

/// A terminal color.
///
/// Accepts a hex string ("#ff5faf") or a 256-color palette index ("205").
///
/// # Example
///
/// ```rust
/// use tea::{Color, Style};
///
/// let accent = Style::new().foreground(Color::new("#04b575"));
/// assert!(accent.render("ok").contains("38;2;4;181;117"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Color(pub String);

impl Color {
    /// Create a color from a hex string or palette index.
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Parse as 24-bit RGB, if the value is a hex string.
    pub fn as_rgb(&self) -> Option<(u8, u8, u8)> {
        let hex = self.0.strip_prefix('#')?;
        if hex.len() != 6 {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some((r, g, b))
    }

    /// Parse as a 256-color palette index, if the value is numeric.
    pub fn as_ansi(&self) -> Option<u8> {
        self.0.parse().ok()
    }

    /// SGR parameters selecting this color as the foreground.
    fn fg_params(&self) -> Option<String> {
        if let Some((r, g, b)) = self.as_rgb() {
            Some(format!("38;2;{r};{g};{b}"))
        } else {
            self.as_ansi().map(|n| format!("38;5;{n}"))
        }
    }

    /// SGR parameters selecting this color as the background.
    fn bg_params(&self) -> Option<String> {
        if let Some((r, g, b)) = self.as_rgb() {
            Some(format!("48;2;{r};{g};{b}"))
        } else {
            self.as_ansi().map(|n| format!("48;5;{n}"))
        }
    }
}

impl From<&str> for Color {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// A composable text style.
///
/// Build a style once, render many strings with it. A style with no
/// attributes set renders text unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Style {
    bold: bool,
    faint: bool,
    italic: bool,
    underline: bool,
    reverse: bool,
    foreground: Option<Color>,
    background: Option<Color>,
}

impl Style {
    /// Create an empty style.
    pub fn new() -> Self {
        Self::default()
    }

    /// Render text in bold.
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Render text faint/dim.
    pub fn faint(mut self) -> Self {
        self.faint = true;
        self
    }

    /// Render text in italics.
    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    /// Underline text.
    pub fn underline(mut self) -> Self {
        self.underline = true;
        self
    }

    /// Swap foreground and background.
    pub fn reverse(mut self) -> Self {
        self.reverse = true;
        self
    }

    /// Set the foreground color.
    pub fn foreground(mut self, color: impl Into<Color>) -> Self {
        self.foreground = Some(color.into());
        self
    }

    /// Set the background color.
    pub fn background(mut self, color: impl Into<Color>) -> Self {
        self.background = Some(color.into());
        self
    }

    /// Whether the style sets any attribute at all.
    pub fn is_plain(&self) -> bool {
        *self == Self::default()
    }

    /// Render text with this style, styling each line separately.
    pub fn render(&self, text: &str) -> String {
        let mut start = String::new();
        if self.bold {
            start.push_str("\x1b[1m");
        }
        if self.faint {
            start.push_str("\x1b[2m");
        }
        if self.italic {
            start.push_str("\x1b[3m");
        }
        if self.underline {
            start.push_str("\x1b[4m");
        }
        if self.reverse {
            start.push_str("\x1b[7m");
        }
        if let Some(params) = self.foreground.as_ref().and_then(Color::fg_params) {
            let _ = write!(start, "\x1b[{params}m");
        }
        if let Some(params) = self.background.as_ref().and_then(Color::bg_params) {
            let _ = write!(start, "\x1b[{params}m");
        }

        if start.is_empty() {
            return text.to_string();
        }

        text.split('\n')
            .map(|line| format!("{start}{line}\x1b[0m"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Strip ANSI escape sequences from a string.
pub fn strip_ansi(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c == '\x1b' {
            // Skip over a CSI sequence up to its final byte.
            for e in chars.by_ref() {
                if e.is_ascii_alphabetic() {
                    break;
                }
            }
        } else {
            out.push(c);
        }
    }
    out
}

/// Display width of a string, ignoring ANSI escape sequences.
pub fn width(s: &str) -> usize {
    strip_ansi(s).width()
}
