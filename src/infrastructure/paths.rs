//! Filesystem locations for configuration and application data.
//!
//! Follows the platform conventions exposed by the `dirs` crate:
//! `~/.local/share/learnbooks` for data (trace files) and
//! `~/.config/learnbooks` for configuration on Linux.

use std::path::PathBuf;

const APP_DIR: &str = "learnbooks";

/// Returns the data directory for trace output and other generated files.
///
/// Falls back to the current directory if the platform data directory
/// cannot be determined.
#[must_use]
pub fn data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}

/// Returns the configuration directory.
#[must_use]
pub fn config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}

/// Path of the main configuration file.
#[must_use]
pub fn config_file() -> PathBuf {
    config_dir().join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dirs_end_with_app_name() {
        assert!(data_dir().ends_with(APP_DIR));
        assert!(config_dir().ends_with(APP_DIR));
        assert_eq!(config_file().file_name().unwrap(), "config.toml");
    }
}
