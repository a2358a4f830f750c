//! Translation store: locale resolution, line-scanning lookup and a per-key cache.
//!
//! # Invariants
//!
//! 1. **Resolved path exists when computed**: construction and [`TranslationStore::reload`]
//!    either select an existing file or fail.
//! 2. **Only hits are cached**: a key enters the cache only after it was found in the
//!    resolved file. Misses are never cached, so a key added to the file later is
//!    picked up without a reload.
//! 3. **Reload clears the cache**: unconditionally, even when the resolved path does not
//!    change.
//!
//! The store is plain owned state. Lookups take `&mut self` to fill the cache, so
//! sharing a store across threads needs external synchronization.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fmt;
use std::fs::File;
use std::io::{
    BufRead,
    BufReader,
};
use std::path::{
    Path,
    PathBuf,
};

use crate::config::{
    self,
    ConfigError,
    LexSettings,
};
use crate::error::LexError;
use crate::format::{
    FormatArg,
    interpolate,
};
use crate::locale;

/// Separator between key and value in a record.
pub const KEY_DELIMITER: &str = "::";

/// Lookup store for one translation directory.
#[derive(Debug, Clone)]
pub struct TranslationStore {
    /// Directory containing the locale files
    directory: PathBuf,
    /// Active locale code
    locale: String,
    /// File selected for `locale`; `None` after a failed reload
    resolved_path: Option<PathBuf>,
    /// Key to unformatted value, for keys found in `resolved_path`
    cache: HashMap<String, String>,
    /// Fallback locale, extension and environment variable
    settings: LexSettings,
}

impl TranslationStore {
    /// Creates a store with the default settings (`en` fallback, `.lex` files, `LANG`).
    ///
    /// With no `locale` (or an empty one) the locale is detected from the environment.
    ///
    /// # Errors
    /// [`LexError::FileNotFound`] when neither the locale file nor `en.lex` exists.
    pub fn new(directory: impl Into<PathBuf>, locale: Option<&str>) -> Result<Self, LexError> {
        Self::with_settings(directory, locale, LexSettings::default())
    }

    /// Creates a store, reading `.lex.json` from `directory` when present.
    pub fn open(directory: impl Into<PathBuf>, locale: Option<&str>) -> Result<Self, LexError> {
        let directory = directory.into();
        let settings = config::load_from_directory(&directory)?.unwrap_or_default();
        Self::with_settings(directory, locale, settings)
    }

    /// Creates a store with explicit settings.
    ///
    /// # Errors
    /// - [`LexError::Config`] when `settings` fail validation
    /// - [`LexError::FileNotFound`] when no usable locale file exists
    pub fn with_settings(
        directory: impl Into<PathBuf>,
        locale: Option<&str>,
        settings: LexSettings,
    ) -> Result<Self, LexError> {
        settings.validate().map_err(ConfigError::ValidationErrors)?;

        let locale = match locale.filter(|l| !l.is_empty()) {
            Some(locale) => locale.to_string(),
            None => locale::detect_locale(&settings.locale_env_var, &settings.fallback_locale),
        };

        let mut store = Self {
            directory: directory.into(),
            locale,
            resolved_path: None,
            cache: HashMap::new(),
            settings,
        };
        store.resolve()?;
        Ok(store)
    }

    /// Looks up `key` and interpolates `args` into its value.
    ///
    /// With no `args` the stored value is returned as is, placeholders included.
    ///
    /// # Examples
    /// ```
    /// use lex_i18n::TranslationStore;
    ///
    /// let dir = tempfile::tempdir().unwrap();
    /// std::fs::write(dir.path().join("en.lex"), "welcome::Hello, %s!\n").unwrap();
    ///
    /// let mut store = TranslationStore::new(dir.path(), Some("en")).unwrap();
    /// assert_eq!(store.get("welcome", &["World".into()]).unwrap(), "Hello, World!");
    /// assert_eq!(store.get("welcome", &[]).unwrap(), "Hello, %s!");
    /// ```
    ///
    /// # Errors
    /// - [`LexError::KeyNotFound`] when no line starts with `key::`
    /// - [`LexError::FileNotFound`] when the resolved file is gone, or the last reload failed
    /// - [`LexError::Format`] when `args` do not match the placeholders
    /// - [`LexError::Io`] when the file cannot be read as UTF-8 text
    pub fn get(&mut self, key: &str, args: &[FormatArg]) -> Result<String, LexError> {
        let value = self.lookup(key)?;
        if args.is_empty() {
            return Ok(value.to_string());
        }
        Ok(interpolate(value, args)?)
    }

    /// Switches to `locale` (when given and non-empty), clears the cache and
    /// re-resolves the locale file.
    ///
    /// Without a `locale` the current one is kept; the environment is not read again.
    ///
    /// # Errors
    /// [`LexError::FileNotFound`] when no usable locale file exists. The store then
    /// fails every lookup until a later reload succeeds.
    pub fn reload(&mut self, locale: Option<&str>) -> Result<(), LexError> {
        if let Some(locale) = locale.filter(|l| !l.is_empty()) {
            self.locale = locale.to_string();
        }
        self.cache.clear();
        tracing::debug!(locale = %self.locale, "Reloading translations");
        self.resolve()
    }

    /// Active locale code.
    #[must_use]
    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Directory searched for locale files.
    #[must_use]
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Currently selected locale file, `None` after a failed reload.
    #[must_use]
    pub fn resolved_path(&self) -> Option<&Path> {
        self.resolved_path.as_deref()
    }

    /// Number of cached keys.
    #[must_use]
    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }

    /// Settings the store was created with.
    #[must_use]
    pub const fn settings(&self) -> &LexSettings {
        &self.settings
    }

    /// Runs file resolution for the current locale, possibly replacing it with the fallback.
    fn resolve(&mut self) -> Result<(), LexError> {
        self.resolved_path = None;
        let resolved = locale::resolve_locale_file(&self.directory, &self.locale, &self.settings)?;
        self.locale = resolved.locale;
        self.resolved_path = Some(resolved.path);
        Ok(())
    }

    /// Returns the cached value for `key`, scanning the resolved file on a miss.
    fn lookup(&mut self, key: &str) -> Result<&str, LexError> {
        let value = match self.cache.entry(key.to_string()) {
            Entry::Occupied(entry) => {
                tracing::debug!(key, "Cache hit");
                entry.into_mut()
            }
            Entry::Vacant(entry) => {
                let Some(path) = self.resolved_path.as_deref() else {
                    return Err(LexError::no_locale_file(
                        &self.directory,
                        &self.locale,
                        &self.settings.file_extension,
                    ));
                };
                entry.insert(scan_for_key(path, key)?)
            }
        };
        Ok(value)
    }
}

impl fmt::Display for TranslationStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TranslationStore(locale={:?}, cached={})", self.locale, self.cache.len())
    }
}

/// Scans `path` line by line for the first record starting with `key::`.
///
/// The line is trimmed, then split once on the first delimiter.
fn scan_for_key(path: &Path, key: &str) -> Result<String, LexError> {
    tracing::debug!(key, path = %path.display(), "Scanning locale file");

    let file = File::open(path).map_err(|err| {
        if err.kind() == std::io::ErrorKind::NotFound {
            tracing::warn!(path = %path.display(), "Resolved locale file no longer exists");
            LexError::missing_file(path)
        } else {
            LexError::Io(err)
        }
    })?;

    let prefix = format!("{key}{KEY_DELIMITER}");
    for line in BufReader::new(file).lines() {
        let line = line?;
        if line.starts_with(&prefix) {
            let value = line
                .trim()
                .split_once(KEY_DELIMITER)
                .map_or_else(String::new, |(_, value)| value.to_string());
            return Ok(value);
        }
    }

    Err(LexError::KeyNotFound { key: key.to_string() })
}
