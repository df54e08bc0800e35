use crate::ui::terminal::{detect_capabilities, TerminalCapabilities};
use hatch::config::{ColorMode, OutputConfig, Verbosity};
use hatch::presentation::ColorWhen;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiContext {
    pub json: bool,
    /// Print every tool invocation
    pub verbose: bool,
    /// Suppress progress lines; errors and summaries still print
    pub quiet: bool,
    pub caps: TerminalCapabilities,
    pub color: bool,
    pub unicode: bool,
}

impl UiContext {
    pub fn new(
        json: bool,
        verbose: u8,
        cli_color: Option<ColorWhen>,
        output: &OutputConfig,
    ) -> Self {
        Self::from_caps(json, verbose, cli_color, output, detect_capabilities())
    }

    pub(crate) fn from_caps(
        json: bool,
        verbose: u8,
        cli_color: Option<ColorWhen>,
        output: &OutputConfig,
        caps: TerminalCapabilities,
    ) -> Self {
        let color = match cli_color {
            Some(ColorWhen::Never) => false,
            Some(ColorWhen::Always) => true,
            Some(ColorWhen::Auto) | None => match output.color {
                ColorMode::Never => false,
                ColorMode::Always => true,
                ColorMode::Auto => caps.supports_color && !caps.is_ci,
            },
        };

        Self {
            json,
            verbose: verbose > 0 || output.verbosity == Verbosity::Verbose,
            quiet: verbose == 0 && output.verbosity == Verbosity::Quiet,
            caps,
            color: color && !json,
            unicode: output.unicode && caps.supports_unicode,
        }
    }
}
