//! Optional `.lex.json` settings for a translation directory.
mod loader;
mod types;

pub use loader::{
    SETTINGS_FILE_NAME,
    load_from_directory,
};
pub use types::{
    ConfigError,
    LexSettings,
    ValidationError,
};
