//! Infrastructure layer for filesystem and environment interactions.

pub mod paths;

pub use paths::{config_dir, config_file, data_dir};
