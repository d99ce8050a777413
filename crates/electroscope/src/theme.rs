//! Color theme for the dashboard.
//!
//! One dark palette plus a plain variant for `NO_COLOR` terminals. The
//! plain theme keeps attribute-only styles (bold, faint, reverse) so
//! the layout stays legible without color.

use tea::{Color, Style};

use crate::data::DispatchStatus;

/// Semantic colors and derived styles.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Primary accent.
    pub primary: Option<Color>,
    /// Muted/secondary text.
    pub muted: Option<Color>,
    /// Success states.
    pub success: Option<Color>,
    /// Errors and failures.
    pub error: Option<Color>,
    /// Warnings and cancellations.
    pub warning: Option<Color>,
    /// Informational / running states.
    pub info: Option<Color>,
}

impl Theme {
    /// The default dark palette.
    #[must_use]
    pub fn dark() -> Self {
        Self {
            primary: Some(Color::new("#7dc4e4")),
            muted: Some(Color::new("#6e738d")),
            success: Some(Color::new("#a6da95")),
            error: Some(Color::new("#ed8796")),
            warning: Some(Color::new("#eed49f")),
            info: Some(Color::new("#8aadf4")),
        }
    }

    /// Attribute-only theme for terminals without color.
    #[must_use]
    pub fn plain() -> Self {
        Self {
            primary: None,
            muted: None,
            success: None,
            error: None,
            warning: None,
            info: None,
        }
    }

    fn colored(color: Option<&Color>) -> Style {
        color
            .map_or_else(Style::new, |c| Style::new().foreground(c.clone()))
    }

    /// Title text.
    #[must_use]
    pub fn title_style(&self) -> Style {
        Self::colored(self.primary.as_ref()).bold()
    }

    /// Secondary text.
    #[must_use]
    pub fn muted_style(&self) -> Style {
        if self.muted.is_none() {
            return Style::new().faint();
        }
        Self::colored(self.muted.as_ref())
    }

    /// Success text.
    #[must_use]
    pub fn success_style(&self) -> Style {
        Self::colored(self.success.as_ref())
    }

    /// Error text.
    #[must_use]
    pub fn error_style(&self) -> Style {
        Self::colored(self.error.as_ref()).bold()
    }

    /// Warning text.
    #[must_use]
    pub fn warning_style(&self) -> Style {
        Self::colored(self.warning.as_ref())
    }

    /// Informational text.
    #[must_use]
    pub fn info_style(&self) -> Style {
        Self::colored(self.info.as_ref())
    }

    /// Style for a dispatch status badge.
    #[must_use]
    pub fn status_style(&self, status: DispatchStatus) -> Style {
        match status {
            DispatchStatus::Completed => self.success_style(),
            DispatchStatus::Running => self.info_style(),
            DispatchStatus::Failed => self.error_style(),
            DispatchStatus::Cancelled => self.warning_style(),
            DispatchStatus::NewObject => self.muted_style(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_theme_adds_no_color_codes() {
        let theme = Theme::plain();
        let rendered = theme.success_style().render("ok");
        assert!(!rendered.contains("38;2;"));
        assert!(!rendered.contains("38;5;"));
    }

    #[test]
    fn test_plain_muted_keeps_faint_attribute() {
        let rendered = Theme::plain().muted_style().render("x");
        assert!(rendered.contains("\x1b[2m"));
    }

    #[test]
    fn test_dark_theme_colors_statuses() {
        let theme = Theme::dark();
        let failed = theme.status_style(DispatchStatus::Failed).render("FAILED");
        let completed = theme
            .status_style(DispatchStatus::Completed)
            .render("COMPLETED");
        assert!(failed.contains("38;2;"));
        assert_ne!(failed, completed);
    }
}
