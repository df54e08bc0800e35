use crossterm::style::{Color, Stylize};

use crate::ui::theme::colors;

/// Semantic color roles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Success,
    Error,
    Warning,
    Info,
    Dim,
}

impl Tone {
    fn color(self) -> Color {
        match self {
            Tone::Success => colors::SUCCESS,
            Tone::Error => colors::ERROR,
            Tone::Warning => colors::WARNING,
            Tone::Info => colors::INFO,
            Tone::Dim => colors::DIM,
        }
    }
}

/// Apply a tone, or return the text untouched when color is off.
pub fn paint(text: &str, tone: Tone, supports_color: bool) -> String {
    if supports_color {
        format!("{}", text.with(tone.color()))
    } else {
        text.to_string()
    }
}

pub fn paint_bold(text: &str, tone: Tone, supports_color: bool) -> String {
    if supports_color {
        format!("{}", text.with(tone.color()).bold())
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paint_without_color_returns_plain_text() {
        assert_eq!(paint("ok", Tone::Success, false), "ok");
    }

    #[test]
    fn paint_with_color_includes_ansi_escape() {
        assert!(paint_bold("no", Tone::Error, true).contains("\u{1b}["));
    }
}
