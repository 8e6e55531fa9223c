//! Terminal styling helpers.
//!
//! Colour is opt-out: the `NO_COLOR` convention and `TERM=dumb` both disable
//! ANSI sequences.

/// ANSI escape codes used by the text renderers.
pub mod colors {
    pub const RESET: &str = "\x1b[0m";
    /// Bold reverse green for the START tag.
    pub const TAG_START: &str = "\x1b[1;7;32m";
    /// Bold reverse magenta for the GOAL tag.
    pub const TAG_GOAL: &str = "\x1b[1;7;35m";
    pub const WHITE_BOLD: &str = "\x1b[1;97m";
    pub const GRAY: &str = "\x1b[90m";
    pub const GREEN: &str = "\x1b[32m";
}

/// Resolved colour codes, either ANSI sequences or empty strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorPalette {
    pub reset: &'static str,
    pub tag_start: &'static str,
    pub tag_goal: &'static str,
    pub white_bold: &'static str,
    pub gray: &'static str,
    pub green: &'static str,
}

impl ColorPalette {
    #[must_use]
    pub const fn colored() -> Self {
        Self {
            reset: colors::RESET,
            tag_start: colors::TAG_START,
            tag_goal: colors::TAG_GOAL,
            white_bold: colors::WHITE_BOLD,
            gray: colors::GRAY,
            green: colors::GREEN,
        }
    }

    #[must_use]
    pub const fn plain() -> Self {
        Self {
            reset: "",
            tag_start: "",
            tag_goal: "",
            white_bold: "",
            gray: "",
            green: "",
        }
    }

    /// Palette matching the current terminal's capabilities.
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

/// Whether ANSI colour output should be used.
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

/// Human-friendly distance: metres below one kilometre, otherwise kilometres
/// with two decimals.
///
/// ```
/// # use geowalk_cli::terminal::format_distance;
/// assert_eq!(format_distance(0.1334), "133 m");
/// assert_eq!(format_distance(1.2057), "1.21 km");
/// ```
#[must_use]
pub fn format_distance(km: f64) -> String {
    if km < 1.0 {
        format!("{:.0} m", km * 1000.0)
    } else {
        format!("{km:.2} km")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_palette_is_empty() {
        let palette = ColorPalette::plain();
        assert!(palette.reset.is_empty());
        assert!(palette.tag_start.is_empty());
    }

    #[test]
    fn distances_switch_units_at_one_kilometre() {
        assert_eq!(format_distance(0.0), "0 m");
        assert_eq!(format_distance(0.25), "250 m");
        assert_eq!(format_distance(1.0), "1.00 km");
        assert_eq!(format_distance(12.5), "12.50 km");
    }
}
