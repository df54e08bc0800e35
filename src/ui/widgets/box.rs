use std::borrow::Cow;

use unicode_width::UnicodeWidthStr;

use crate::ui::primitives::text::{paint, Tone};
use crate::ui::theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoxStyle {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

impl BoxStyle {
    fn tone(self) -> Tone {
        match self {
            BoxStyle::Info => Tone::Info,
            BoxStyle::Success => Tone::Success,
            BoxStyle::Warning => Tone::Warning,
            BoxStyle::Error => Tone::Error,
        }
    }
}

#[derive(Debug, Clone)]
enum Row {
    Text(String),
    Pair(String, String),
    Blank,
}

/// Bordered block of lines; `label: value` pairs are aligned on the colon.
#[derive(Debug, Default, Clone)]
pub struct Box {
    title: Option<String>,
    rows: Vec<Row>,
    style: BoxStyle,
}

impl Box {
    pub fn with_title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    pub fn style(mut self, style: BoxStyle) -> Self {
        self.style = style;
        self
    }

    pub fn add_line(&mut self, line: impl Into<String>) {
        let line = line.into();
        for part in line.lines() {
            self.rows.push(Row::Text(part.to_string()));
        }
    }

    pub fn add_pair(&mut self, label: impl Into<String>, value: impl Into<String>) {
        self.rows.push(Row::Pair(label.into(), value.into()));
    }

    pub fn add_empty(&mut self) {
        self.rows.push(Row::Blank);
    }

    pub fn render(&self, supports_color: bool, supports_unicode: bool) -> String {
        let label_width = self
            .rows
            .iter()
            .filter_map(|r| match r {
                Row::Pair(label, _) => Some(visible_width(label)),
                _ => None,
            })
            .max()
            .unwrap_or(0);

        let mut lines: Vec<String> = self.title.iter().cloned().collect();
        for row in &self.rows {
            lines.push(match row {
                Row::Text(text) => text.clone(),
                Row::Pair(label, value) => {
                    let pad = label_width - visible_width(label);
                    format!("{label}:{} {value}", " ".repeat(pad))
                }
                Row::Blank => String::new(),
            });
        }

        let inner = lines.iter().map(|l| visible_width(l)).max().unwrap_or(0) + 2;
        let [tl, tr, bl, br, h, v] = theme::borders(supports_unicode);
        let edge = |s: &str| paint(s, self.style.tone(), supports_color);

        let mut out = edge(&format!("{tl}{}{tr}", h.repeat(inner)));
        out.push('\n');
        for line in &lines {
            let pad = inner - 1 - visible_width(line);
            out.push_str(&format!("{} {line}{}{}\n", edge(v), " ".repeat(pad), edge(v)));
        }
        out.push_str(&edge(&format!("{bl}{}{br}", h.repeat(inner))));
        out.push('\n');
        out
    }
}

/// Display width ignoring ANSI escape sequences
pub fn visible_width(s: &str) -> usize {
    strip_ansi(s).width()
}

fn strip_ansi(s: &str) -> Cow<'_, str> {
    if !s.contains('\u{1b}') {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len());
    let mut in_escape = false;
    for c in s.chars() {
        match (in_escape, c) {
            (false, '\u{1b}') => in_escape = true,
            (false, c) => out.push(c),
            (true, c) if c.is_ascii_alphabetic() => in_escape = false,
            (true, _) => {}
        }
    }
    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pairs_align_on_the_colon() {
        let mut b = Box::with_title("Build");
        b.add_pair("Groups", "2");
        b.add_pair("Archive", "_build/app.resource");
        let rendered = b.render(false, false);

        assert!(rendered.contains("| Groups:  2"));
        assert!(rendered.contains("| Archive: _build/app.resource"));
    }

    #[test]
    fn rows_have_equal_width_with_wide_glyphs() {
        let mut b = Box::with_title("✓ 完成");
        b.add_line("ascii only");
        let rendered = b.render(false, true);

        let widths: Vec<usize> = rendered.lines().map(|l| l.width()).collect();
        assert!(widths.windows(2).all(|w| w[0] == w[1]), "{rendered}");
    }

    #[test]
    fn colored_border_does_not_change_alignment() {
        let mut b = Box::with_title("title");
        b.add_line("x");
        let plain = b.render(false, true);
        let colored = b.render(true, true);

        let plain_widths: Vec<usize> = plain.lines().map(visible_width).collect();
        let colored_widths: Vec<usize> = colored.lines().map(visible_width).collect();
        assert_eq!(plain_widths, colored_widths);
    }
}
