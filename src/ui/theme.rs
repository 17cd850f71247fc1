//! Theme management and ANSI escape sequence generation.
//!
//! This module defines the color scheme system for the application,
//! supporting built-in themes (Catppuccin variants) and custom themes loaded
//! from TOML files. It provides utilities for converting hex colors to ANSI
//! escape sequences.
//!
//! # Built-in Themes
//!
//! - `catppuccin-mocha`: Dark theme with warm tones (default)
//! - `catppuccin-latte`: Light theme with soft pastels
//!
//! # TOML Format
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! header_fg = "#cdd6f4"
//! selection_fg = "#1e1e2e"
//! selection_bg = "#f5c2e7"
//! text_normal = "#cdd6f4"
//! text_dim = "#6c7086"
//! border = "#45475a"
//! accent = "#89b4fa"
//! match_highlight_fg = "#1e1e2e"
//! match_highlight_bg = "#f9e2af"
//! error_fg = "#f38ba8"
//! success_fg = "#a6e3a1"
//! assistant_fg = "#94e2d5"
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Color scheme configuration for UI rendering.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Theme {
    /// Human-readable theme name.
    pub name: String,
    /// Color palette for all UI elements.
    pub colors: ThemeColors,
}

/// Color definitions for all UI elements.
///
/// All colors are specified as hex strings (e.g., "#cdd6f4"). Optional fields
/// default to `None`, allowing themes to opt out of certain styling.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ThemeColors {
    /// Header text color.
    pub header_fg: String,
    /// Optional header background color.
    #[serde(default)]
    pub header_bg: Option<String>,

    /// Selected row foreground color.
    pub selection_fg: String,
    /// Selected row background color.
    pub selection_bg: String,

    /// Normal text color.
    pub text_normal: String,
    /// Dimmed text color (footer, secondary info).
    pub text_dim: String,

    /// Border and separator line color.
    pub border: String,

    /// Accent color for focused fields, active filters, and page numbers.
    pub accent: String,

    /// Fuzzy match highlight foreground.
    pub match_highlight_fg: String,
    /// Fuzzy match highlight background.
    pub match_highlight_bg: String,

    /// Validation errors and failure banners.
    pub error_fg: String,
    /// Success notices (book finished, draft created).
    pub success_fg: String,

    /// Assistant message color in the chat transcript.
    pub assistant_fg: String,
}

impl Theme {
    /// Loads a built-in theme by name.
    ///
    /// Supported names: `catppuccin-mocha`, `catppuccin-latte`.
    ///
    /// Returns `None` if the theme name is unknown.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "catppuccin-mocha" => Some(Self {
                name: "catppuccin-mocha".to_string(),
                colors: ThemeColors {
                    header_fg: "#cdd6f4".to_string(),
                    header_bg: None,
                    selection_fg: "#1e1e2e".to_string(),
                    selection_bg: "#f5c2e7".to_string(),
                    text_normal: "#cdd6f4".to_string(),
                    text_dim: "#6c7086".to_string(),
                    border: "#45475a".to_string(),
                    accent: "#89b4fa".to_string(),
                    match_highlight_fg: "#1e1e2e".to_string(),
                    match_highlight_bg: "#f9e2af".to_string(),
                    error_fg: "#f38ba8".to_string(),
                    success_fg: "#a6e3a1".to_string(),
                    assistant_fg: "#94e2d5".to_string(),
                },
            }),
            "catppuccin-latte" => Some(Self {
                name: "catppuccin-latte".to_string(),
                colors: ThemeColors {
                    header_fg: "#4c4f69".to_string(),
                    header_bg: None,
                    selection_fg: "#eff1f5".to_string(),
                    selection_bg: "#ea76cb".to_string(),
                    text_normal: "#4c4f69".to_string(),
                    text_dim: "#9ca0b0".to_string(),
                    border: "#bcc0cc".to_string(),
                    accent: "#1e66f5".to_string(),
                    match_highlight_fg: "#eff1f5".to_string(),
                    match_highlight_bg: "#df8e1d".to_string(),
                    error_fg: "#d20f39".to_string(),
                    success_fg: "#40a02b".to_string(),
                    assistant_fg: "#179299".to_string(),
                },
            }),
            _ => None,
        }
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or the TOML content
    /// cannot be parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let contents =
            fs::read_to_string(path).map_err(|e| format!("Failed to read theme file: {e}"))?;

        toml::from_str(&contents).map_err(|e| format!("Failed to parse theme TOML: {e}"))
    }

    /// Converts a hex color to RGB tuple.
    ///
    /// Strips the `#` prefix if present, validates length, and parses hex
    /// digits. Returns `(255, 255, 255)` (white) on parse errors.
    fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
        let hex = hex.trim_start_matches('#').trim();

        if hex.len() != 6 {
            return (255, 255, 255);
        }

        let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(255);
        let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(255);
        let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(255);

        (r, g, b)
    }

    /// Generates an ANSI 24-bit foreground color escape sequence
    /// (`\x1b[38;2;r;g;bm`).
    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    /// Generates an ANSI 24-bit background color escape sequence
    /// (`\x1b[48;2;r;g;bm`).
    #[must_use]
    pub fn bg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[48;2;{r};{g};{b}m")
    }

    /// Returns the ANSI bold escape sequence (`\x1b[1m`).
    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    /// Returns the ANSI dim escape sequence (`\x1b[2m`).
    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{001b}[2m"
    }

    /// Returns the ANSI reset escape sequence (`\x1b[0m`).
    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }
}

impl Default for Theme {
    /// Returns the default theme (Catppuccin Mocha).
    fn default() -> Self {
        Self::from_name("catppuccin-mocha").expect("built-in theme is always present")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_themes_resolve() {
        assert!(Theme::from_name("catppuccin-mocha").is_some());
        assert!(Theme::from_name("catppuccin-latte").is_some());
        assert!(Theme::from_name("unknown").is_none());
    }

    #[test]
    fn fg_converts_hex() {
        assert_eq!(Theme::fg("#ffffff"), "\u{001b}[38;2;255;255;255m");
        assert_eq!(Theme::fg("000000"), "\u{001b}[38;2;0;0;0m");
    }

    #[test]
    fn malformed_hex_falls_back_to_white() {
        assert_eq!(Theme::fg("#zzz"), "\u{001b}[38;2;255;255;255m");
    }

    #[test]
    fn theme_round_trips_through_toml() {
        let theme = Theme::default();
        let serialized = toml::to_string(&theme).unwrap();
        let parsed: Theme = toml::from_str(&serialized).unwrap();
        assert_eq!(parsed.name, theme.name);
        assert_eq!(parsed.colors.accent, theme.colors.accent);
    }
}
