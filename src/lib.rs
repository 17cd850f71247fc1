//! LearnBooks: a terminal front-end prototype for an educational reading
//! platform.
//!
//! LearnBooks lets students browse a book library, read page by page, and
//! ask a (simulated) AI assistant about what they are reading; teachers get
//! a management dashboard with aggregate engagement numbers. Every backend
//! interaction goes through mock service adapters with simulated latency,
//! so the whole experience runs offline while the UI exercises its real
//! loading, typing, and error paths.
//!
//! # Architecture
//!
//! The crate follows a layered architecture pattern:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Terminal shim (main.rs)                            │  ← Entry point
//! │  - crossterm event stream, raw mode, key mapping    │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling, view routing                     │
//! │  - Action dispatching                               │
//! │  - Per-screen state (library, chat, reader, forms)  │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Service Layer │   │ Worker Layer  │
//! │ (ui/)         │   │ (services/)   │   │ (worker/)     │
//! │ - Rendering   │   │ - Port traits │   │ - Async calls │
//! │ - Theming     │   │ - Mock impls  │   │ - Channels    │
//! │ - Components  │   │               │   │               │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Infrastructure & Domain Layers                     │
//! │  - Platform paths (infrastructure/)                 │
//! │  - Error types (domain/error)                       │
//! │  - Book, identity, message models (domain/)         │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │  ← Optional
//! │  - OpenTelemetry tracing                            │
//! │  - File-based OTLP export                           │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: Application state machine with event/action model
//! - [`domain`]: Core domain types (books, identities, messages, errors)
//! - [`services`]: Port traits and the mock adapters behind them
//! - [`worker`]: Backend worker task and its message protocol
//! - [`ui`]: Terminal rendering with theme support
//! - [`infrastructure`]: Platform paths
//! - [`observability`]: OpenTelemetry tracing (file-exported OTLP)
//!
//! # Example
//!
//! ```rust
//! use learnbooks::{handle_event, initialize, Config, Event};
//!
//! let mut state = initialize(&Config::default());
//! let (should_render, actions) = handle_event(&mut state, &Event::Quit)?;
//! assert!(!should_render);
//! assert!(!actions.is_empty());
//! # Ok::<(), learnbooks::LearnBooksError>(())
//! ```

#![allow(clippy::multiple_crate_versions)]

pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod services;
pub mod ui;
pub mod worker;

pub use app::{handle_event, Action, AppState, Event, InputMode, Screen, View};
pub use domain::{LearnBooksError, Result};
pub use ui::Theme;

use serde::Deserialize;

/// Application configuration, loaded from `<config_dir>/config.toml`.
///
/// All fields are optional; an absent or unreadable file yields the
/// defaults.
///
/// ```toml
/// theme = "catppuccin-latte"
/// # theme_file = "/path/to/theme.toml"
/// trace_level = "debug"
/// mock_latency = true
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Built-in theme name. Ignored if `theme_file` is set.
    #[serde(rename = "theme")]
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file. Takes precedence over `theme`.
    pub theme_file: Option<String>,

    /// Tracing level for OpenTelemetry spans (`trace` through `error`).
    /// `RUST_LOG` overrides this. Default: `info`.
    pub trace_level: Option<String>,

    /// Whether the mock services simulate network latency. Turning this off
    /// makes every interaction instant, which is mostly useful when
    /// developing screens.
    pub mock_latency: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme_name: None,
            theme_file: None,
            trace_level: None,
            mock_latency: true,
        }
    }
}

impl Config {
    /// Loads the configuration file, falling back to defaults.
    ///
    /// A missing file is normal (first run); a malformed file is reported
    /// via tracing and otherwise treated the same way.
    #[must_use]
    pub fn load() -> Self {
        let path = infrastructure::paths::config_file();
        match std::fs::read_to_string(&path) {
            Ok(contents) => toml::from_str(&contents).unwrap_or_else(|e| {
                tracing::debug!(path = %path.display(), error = %e, "malformed config file, using defaults");
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }
}

/// Initializes the application state from configuration.
///
/// Resolves the theme (custom file, then built-in name, then default) and
/// returns a fresh signed-out [`AppState`]. Tracing is initialized
/// separately via [`observability::init_tracing`].
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!("initializing learnbooks");

    let theme = config.theme_file.as_ref().map_or_else(
        || {
            config.theme_name.as_ref().map_or_else(
                Theme::default,
                |theme_name| {
                    Theme::from_name(theme_name).unwrap_or_else(|| {
                        tracing::debug!(theme_name = %theme_name, "unknown theme, using default");
                        Theme::default()
                    })
                },
            )
        },
        |theme_file| {
            Theme::from_file(theme_file).unwrap_or_else(|e| {
                tracing::debug!(theme_file = %theme_file, error = %e, "failed to load theme file, using default");
                Theme::default()
            })
        },
    );

    AppState::new(theme)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_keeps_latency_on() {
        let config = Config::default();
        assert!(config.mock_latency);
        assert!(config.theme_name.is_none());
    }

    #[test]
    fn config_parses_partial_toml() {
        let config: Config = toml::from_str("theme = \"catppuccin-latte\"").unwrap();
        assert_eq!(config.theme_name.as_deref(), Some("catppuccin-latte"));
        assert!(config.mock_latency);
    }

    #[test]
    fn initialize_honors_theme_name() {
        let config = Config {
            theme_name: Some("catppuccin-latte".to_string()),
            ..Default::default()
        };
        let state = initialize(&config);
        assert_eq!(state.theme.name, "catppuccin-latte");
    }

    #[test]
    fn initialize_falls_back_on_unknown_theme() {
        let config = Config {
            theme_name: Some("no-such-theme".to_string()),
            ..Default::default()
        };
        let state = initialize(&config);
        assert_eq!(state.theme.name, "catppuccin-mocha");
    }
}
