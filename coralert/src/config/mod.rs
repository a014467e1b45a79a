//! Configuration.
//!
//! Settings live in an INI file at [`config_file_path`]. Every key is
//! optional; anything missing keeps its default. Keys with a fixed name are
//! addressable as `section.key` through [`ConfigKey`] (used by the CLI's
//! `config get/set`). Per-dataset staleness thresholds go in dynamic
//! `[staleness.<dataset>]` sections.

mod file;
mod keys;
mod paths;

pub use file::{ConfigError, ConfigFile};
pub use keys::ConfigKey;
pub use paths::{config_directory, config_file_path, default_log_directory, default_store_directory};
