use crossterm::style::Stylize;

use crate::ui::theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    Success,
    Error,
    Warning,
    Stage,
    Skipped,
    Arrow,
    Build,
    Run,
    Quick,
    Doctor,
    Clean,
}

impl Icon {
    pub fn render(&self, supports_unicode: bool) -> &'static str {
        use theme::{icons as u, icons_ascii as a};
        let (unicode, ascii) = match self {
            Icon::Success => (u::SUCCESS, a::SUCCESS),
            Icon::Error => (u::ERROR, a::ERROR),
            Icon::Warning => (u::WARNING, a::WARNING),
            Icon::Stage => (u::STAGE, a::STAGE),
            Icon::Skipped => (u::SKIPPED, a::SKIPPED),
            Icon::Arrow => (u::ARROW, a::ARROW),
            Icon::Build => (u::BUILD, a::BUILD),
            Icon::Run => (u::RUN, a::RUN),
            Icon::Quick => (u::QUICK, a::QUICK),
            Icon::Doctor => (u::DOCTOR, a::DOCTOR),
            Icon::Clean => (u::CLEAN, a::CLEAN),
        };
        if supports_unicode {
            unicode
        } else {
            ascii
        }
    }

    pub fn colored(&self, supports_color: bool, supports_unicode: bool) -> String {
        let s = self.render(supports_unicode);
        if !supports_color {
            return s.to_string();
        }
        let color = match self {
            Icon::Success => theme::colors::SUCCESS,
            Icon::Error => theme::colors::ERROR,
            Icon::Warning => theme::colors::WARNING,
            Icon::Skipped | Icon::Arrow => theme::colors::DIM,
            Icon::Stage | Icon::Build | Icon::Run | Icon::Quick | Icon::Doctor | Icon::Clean => {
                theme::colors::INFO
            }
        };
        format!("{}", s.with(color))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn icon_renders_ascii_when_unicode_unsupported() {
        assert_eq!(Icon::Success.render(false), "[OK]");
        assert_eq!(Icon::Build.render(false), "[BUILD]");
    }

    #[test]
    fn icon_without_color_has_no_escape() {
        assert_eq!(Icon::Error.colored(false, true), "✗");
    }
}
