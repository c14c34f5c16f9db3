//! Config module.
//! Provides configuration types, default paths, JSON loading, and validation.

pub mod json;
pub mod paths;
pub mod types;
mod validate;

pub use json::{load_config, load_config_from_path};
pub use paths::default_lock_path;
pub use types::{Config, LogLevel, LoggingConfig, OnConflict};
pub use validate::validate_roots;

/// Template used when no config file is given.
pub const FOLDER_TEMPLATE_DEFAULT: &str = "{{Year}}/{{Month}}";
/// File name of the single-instance marker placed in the user's home directory.
pub const LOCK_FILE_NAME: &str = ".framefold.lock";
