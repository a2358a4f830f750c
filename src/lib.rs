//! lex-i18n
//!
//! Translation-string lookup over flat per-locale `.lex` files (`KEY::VALUE` per line),
//! with a single fallback locale, a per-key cache and positional `%`-style formatting.
//!
//! ```
//! use lex_i18n::{ErrorKind, TranslationStore};
//!
//! let dir = tempfile::tempdir().unwrap();
//! std::fs::write(dir.path().join("en.lex"), "welcome::Hello, %s!\n").unwrap();
//! std::fs::write(dir.path().join("fr.lex"), "welcome::Bonjour, %s !\n").unwrap();
//!
//! let mut store = TranslationStore::new(dir.path(), Some("fr")).unwrap();
//! assert_eq!(store.get("welcome", &["Lex".into()]).unwrap(), "Bonjour, Lex !");
//!
//! // no de.lex: falls back to en
//! store.reload(Some("de")).unwrap();
//! assert_eq!(store.locale(), "en");
//! assert_eq!(store.get("welcome", &["Lex".into()]).unwrap(), "Hello, Lex!");
//!
//! let err = store.get("missing", &[]).unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::KeyNotFound);
//! ```

pub mod config;
pub mod error;
pub mod format;
pub mod locale;
pub mod store;
mod test_utils;

pub use config::LexSettings;
pub use error::{
    ErrorKind,
    LexError,
};
pub use format::{
    FormatArg,
    FormatError,
};
pub use store::TranslationStore;
