//! Error types for translation lookups.

use std::path::{
    Path,
    PathBuf,
};

use thiserror::Error;

use crate::config::ConfigError;
use crate::format::FormatError;

/// Errors that may occur while resolving locale files or looking up keys
#[derive(Error, Debug)]
pub enum LexError {
    /// No usable locale file, or the resolved file disappeared before a lookup.
    ///
    /// `locale` is set when resolution failed; `searched` is then the candidate
    /// file for that locale, whose parent is the directory searched.
    /// When it is `None`, `searched` is the file that could not be opened.
    #[error("{}", describe_missing_file(searched, locale.as_deref()))]
    FileNotFound { searched: PathBuf, locale: Option<String> },

    /// The whole file was scanned without a `key::` line
    #[error("Key not found: '{key}'")]
    KeyNotFound { key: String },

    /// Interpolation of the stored value against the supplied arguments failed
    #[error("Failed to format translation: {0}")]
    Format(#[from] FormatError),

    /// The locale file exists but could not be read
    #[error("Failed to read translation file: {0}")]
    Io(#[from] std::io::Error),

    /// The `.lex.json` settings file is invalid
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Category of a [`LexError`], for callers that only need to branch on the kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    FileNotFound,
    KeyNotFound,
    Format,
    Io,
    Config,
}

impl LexError {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::FileNotFound { .. } => ErrorKind::FileNotFound,
            Self::KeyNotFound { .. } => ErrorKind::KeyNotFound,
            Self::Format(_) => ErrorKind::Format,
            Self::Io(_) => ErrorKind::Io,
            Self::Config(_) => ErrorKind::Config,
        }
    }

    /// Resolution failure for `locale` inside `directory`.
    pub(crate) fn no_locale_file(directory: &Path, locale: &str, extension: &str) -> Self {
        Self::FileNotFound {
            searched: directory.join(format!("{locale}.{extension}")),
            locale: Some(locale.to_string()),
        }
    }

    /// The resolved file could not be opened at lookup time.
    pub(crate) fn missing_file(path: &Path) -> Self {
        Self::FileNotFound { searched: path.to_path_buf(), locale: None }
    }
}

/// Builds the human-readable message for [`LexError::FileNotFound`].
fn describe_missing_file(searched: &Path, locale: Option<&str>) -> String {
    match locale {
        Some(locale) => {
            // `extension()` would miss "<empty locale>.lex", so strip the locale instead
            let extension = searched
                .file_name()
                .and_then(|name| name.to_str())
                .and_then(|name| name.strip_prefix(locale))
                .and_then(|rest| rest.strip_prefix('.'))
                .unwrap_or_default();
            let directory = searched.parent().unwrap_or(searched);
            format!(
                "No .{extension} file found for locale '{locale}' in '{}'",
                directory.display()
            )
        }
        None => format!("File not found: {}", searched.display()),
    }
}

#[cfg(test)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;

    /// `FileNotFound`: locale resolution failure names the locale and directory
    #[rstest]
    fn no_locale_file_message() {
        let err = LexError::no_locale_file(Path::new("/srv/lang"), "de", "lex");

        assert_that!(err.to_string(), eq("No .lex file found for locale 'de' in '/srv/lang'"));
        assert_that!(err.kind(), eq(ErrorKind::FileNotFound));
    }

    /// `FileNotFound`: vanished file names the path
    #[rstest]
    fn missing_file_message() {
        let err = LexError::missing_file(Path::new("/srv/lang/fr.lex"));

        assert_that!(err.to_string(), eq("File not found: /srv/lang/fr.lex"));
        assert_that!(err.kind(), eq(ErrorKind::FileNotFound));
    }

    /// `KeyNotFound`: message quotes the key
    #[rstest]
    fn key_not_found_message() {
        let err = LexError::KeyNotFound { key: "welcome".to_string() };

        assert_that!(err.to_string(), eq("Key not found: 'welcome'"));
        assert_that!(err.kind(), eq(ErrorKind::KeyNotFound));
    }

    /// `Format`: converted from `FormatError`
    #[rstest]
    fn format_error_converts() {
        let err: LexError = FormatError::IncompleteFormat.into();

        assert_that!(err.kind(), eq(ErrorKind::Format));
    }
}
