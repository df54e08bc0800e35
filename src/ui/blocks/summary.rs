use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::{paint, paint_bold, Tone};
use crate::ui::widgets::r#box::{Box, BoxStyle};

#[derive(Debug, Clone)]
pub struct ResultSummary {
    title: String,
    success: bool,
    rows: Vec<(String, String)>,
    warnings: Vec<String>,
    next_step: Option<String>,
}

impl ResultSummary {
    pub fn success(title: impl Into<String>) -> Self {
        Self::new(title.into(), true)
    }

    pub fn failure(title: impl Into<String>) -> Self {
        Self::new(title.into(), false)
    }

    fn new(title: String, success: bool) -> Self {
        Self {
            title,
            success,
            rows: Vec::new(),
            warnings: Vec::new(),
            next_step: None,
        }
    }

    pub fn add_row(&mut self, label: impl Into<String>, value: impl ToString) {
        self.rows.push((label.into(), value.to_string()));
    }

    pub fn add_warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    pub fn with_next_step(&mut self, hint: impl Into<String>) {
        self.next_step = Some(hint.into());
    }

    pub fn render(&self, supports_color: bool, supports_unicode: bool) -> String {
        let (style, icon, tone) = if self.success {
            (BoxStyle::Success, Icon::Success, Tone::Success)
        } else {
            (BoxStyle::Error, Icon::Error, Tone::Error)
        };

        let header = format!(
            "{} {}",
            icon.colored(supports_color, supports_unicode),
            paint_bold(&self.title, tone, supports_color)
        );
        let mut b = Box::with_title(header).style(style);

        if !self.rows.is_empty() {
            b.add_empty();
            for (label, value) in &self.rows {
                b.add_pair(label.as_str(), value.as_str());
            }
        }

        if !self.warnings.is_empty() {
            b.add_empty();
            for warning in &self.warnings {
                b.add_line(format!(
                    "{} {}",
                    Icon::Warning.colored(supports_color, supports_unicode),
                    warning
                ));
            }
        }

        if let Some(next_step) = &self.next_step {
            b.add_empty();
            b.add_line(format!(
                "{} {} {}",
                Icon::Arrow.colored(supports_color, supports_unicode),
                paint("Next:", Tone::Dim, supports_color),
                next_step
            ));
        }

        b.render(supports_color, supports_unicode)
    }
}
