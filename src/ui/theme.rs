use crossterm::style::Color;

/// Design tokens for the terminal UI.
///
/// Only five semantic colors; every icon and border glyph comes from here.
pub mod colors {
    use super::Color;

    pub const SUCCESS: Color = Color::Green;
    pub const ERROR: Color = Color::Red;
    pub const WARNING: Color = Color::Yellow;
    pub const INFO: Color = Color::Cyan;
    pub const DIM: Color = Color::DarkGrey;
}

pub mod icons {
    pub const SUCCESS: &str = "✓";
    pub const ERROR: &str = "✗";
    pub const WARNING: &str = "⚠";
    pub const STAGE: &str = "●";
    pub const SKIPPED: &str = "○";
    pub const ARROW: &str = "↳";

    // Command identifiers (used in headers).
    pub const BUILD: &str = "🔨";
    pub const RUN: &str = "🚀";
    pub const QUICK: &str = "⚡";
    pub const DOCTOR: &str = "🩺";
    pub const CLEAN: &str = "🧹";
}

pub mod icons_ascii {
    pub const SUCCESS: &str = "[OK]";
    pub const ERROR: &str = "[FAIL]";
    pub const WARNING: &str = "[WARN]";
    pub const STAGE: &str = "[..]";
    pub const SKIPPED: &str = "[--]";
    pub const ARROW: &str = "->";

    pub const BUILD: &str = "[BUILD]";
    pub const RUN: &str = "[RUN]";
    pub const QUICK: &str = "[QUICK]";
    pub const DOCTOR: &str = "[DOCTOR]";
    pub const CLEAN: &str = "[CLEAN]";
}

/// Box corners and edges: `[top-left, top-right, bottom-left, bottom-right, horizontal, vertical]`
pub const BORDERS: [&str; 6] = ["╭", "╮", "╰", "╯", "─", "│"];
pub const BORDERS_ASCII: [&str; 6] = ["+", "+", "+", "+", "-", "|"];

pub fn borders(unicode: bool) -> [&'static str; 6] {
    if unicode {
        BORDERS
    } else {
        BORDERS_ASCII
    }
}
