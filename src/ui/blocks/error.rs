use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::{paint_bold, Tone};
use crate::ui::widgets::r#box::{Box, BoxStyle};

/// A failed stage with its message, optional detail lines and fixes
#[derive(Debug, Clone)]
pub struct ErrorBlock {
    stage: String,
    message: String,
    details: Vec<String>,
    fixes: Vec<String>,
}

impl ErrorBlock {
    pub fn new(stage: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            stage: stage.into(),
            message: message.into(),
            details: Vec::new(),
            fixes: Vec::new(),
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.details.push(detail.into());
        self
    }

    pub fn with_fix(mut self, fix: impl Into<String>) -> Self {
        self.fixes.push(fix.into());
        self
    }

    pub fn render(&self, supports_color: bool, supports_unicode: bool) -> String {
        let title = format!(
            "{} {}",
            Icon::Error.colored(supports_color, supports_unicode),
            paint_bold(
                &format!("ERROR in {} stage", self.stage),
                Tone::Error,
                supports_color
            )
        );
        let mut b = Box::with_title(title).style(BoxStyle::Error);
        b.add_empty();
        b.add_line(self.message.clone());

        if !self.details.is_empty() {
            b.add_empty();
            for detail in &self.details {
                b.add_line(format!("  {detail}"));
            }
        }

        if !self.fixes.is_empty() {
            b.add_empty();
            for fix in &self.fixes {
                b.add_line(format!("FIX: {fix}"));
            }
        }

        b.render(supports_color, supports_unicode)
    }
}
