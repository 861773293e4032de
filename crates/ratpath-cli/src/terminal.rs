//! Terminal styling and color detection for text output.

/// ANSI escape codes used by the text renderers.
pub mod colors {
    /// Reset all styling.
    pub const RESET: &str = "\x1b[0m";
    /// Bold reverse yellow for cheese badges.
    pub const TAG_CHEESE: &str = "\x1b[1;7;33m";
    /// Bright bold white for emphasis (vertices, totals).
    pub const WHITE_BOLD: &str = "\x1b[1;97m";
    /// Cyan for actions.
    pub const CYAN: &str = "\x1b[36m";
    /// Green for distances and densities above the uniform share.
    pub const GREEN: &str = "\x1b[32m";
    /// Orange (256-color) for warnings such as an early stop.
    pub const ORANGE: &str = "\x1b[38;5;208m";
}

/// Resolved color codes, either ANSI sequences or empty strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorPalette {
    pub reset: &'static str,
    pub tag_cheese: &'static str,
    pub white_bold: &'static str,
    pub cyan: &'static str,
    pub green: &'static str,
    pub orange: &'static str,
}

impl ColorPalette {
    #[must_use]
    pub const fn colored() -> Self {
        Self {
            reset: colors::RESET,
            tag_cheese: colors::TAG_CHEESE,
            white_bold: colors::WHITE_BOLD,
            cyan: colors::CYAN,
            green: colors::GREEN,
            orange: colors::ORANGE,
        }
    }

    #[must_use]
    pub const fn plain() -> Self {
        Self {
            reset: "",
            tag_cheese: "",
            white_bold: "",
            cyan: "",
            green: "",
            orange: "",
        }
    }

    /// `colored()` when the terminal accepts ANSI codes, `plain()` otherwise.
    #[must_use]
    pub fn detect() -> Self {
        if supports_color() {
            Self::colored()
        } else {
            Self::plain()
        }
    }
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self::detect()
    }
}

/// Check if the terminal supports ANSI color codes.
///
/// Respects the `NO_COLOR` environment variable (https://no-color.org/) and
/// the `TERM=dumb` convention.
#[must_use]
pub fn supports_color() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if let Ok(term) = std::env::var("TERM") {
        if term.eq_ignore_ascii_case("dumb") {
            return false;
        }
    }
    true
}
