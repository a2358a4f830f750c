//! Locale detection and locale file resolution.

use std::path::{
    Path,
    PathBuf,
};

use crate::config::LexSettings;
use crate::error::LexError;

/// Derives a locale code from an indicator such as `fr_FR.UTF-8`.
///
/// Takes the first two characters; an absent indicator yields `default`.
///
/// # Examples
/// ```
/// use lex_i18n::locale::locale_from_indicator;
///
/// assert_eq!(locale_from_indicator(Some("ja_JP.UTF-8"), "en"), "ja");
/// assert_eq!(locale_from_indicator(None, "en"), "en");
/// ```
#[must_use]
pub fn locale_from_indicator(indicator: Option<&str>, default: &str) -> String {
    indicator.map_or_else(|| default.to_string(), |value| value.chars().take(2).collect())
}

/// Reads `env_var` once and derives the locale code from it.
///
/// A variable that is unset or not valid Unicode counts as absent.
#[must_use]
pub fn detect_locale(env_var: &str, default: &str) -> String {
    let indicator = std::env::var(env_var).ok();
    let locale = locale_from_indicator(indicator.as_deref(), default);
    tracing::debug!(env_var, ?indicator, %locale, "Detected locale");
    locale
}

/// Outcome of locale file resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLocale {
    /// Locale actually selected; the fallback locale when the requested file is missing.
    pub locale: String,
    /// Path of the selected locale file.
    pub path: PathBuf,
}

/// Path of the file for `locale` inside `directory`.
#[must_use]
pub fn locale_file_path(directory: &Path, locale: &str, extension: &str) -> PathBuf {
    directory.join(format!("{locale}.{extension}"))
}

/// Selects the file for `locale`, falling back to the fallback locale's file.
///
/// Both existence checks run on every call.
///
/// # Errors
/// [`LexError::FileNotFound`] when neither file exists.
pub fn resolve_locale_file(
    directory: &Path,
    locale: &str,
    settings: &LexSettings,
) -> Result<ResolvedLocale, LexError> {
    let candidate = locale_file_path(directory, locale, &settings.file_extension);
    if candidate.is_file() {
        tracing::debug!(locale, path = %candidate.display(), "Resolved locale file");
        return Ok(ResolvedLocale { locale: locale.to_string(), path: candidate });
    }

    let fallback =
        locale_file_path(directory, &settings.fallback_locale, &settings.file_extension);
    if fallback.is_file() {
        tracing::info!(
            requested = locale,
            fallback = %settings.fallback_locale,
            "Locale file not found, using fallback"
        );
        return Ok(ResolvedLocale { locale: settings.fallback_locale.clone(), path: fallback });
    }

    Err(LexError::no_locale_file(directory, locale, &settings.file_extension))
}
