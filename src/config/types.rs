use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "fileExtension")
    pub field_path: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Numbered list of validation errors, one per line.
fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Settings read from `.lex.json` in the translation directory.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LexSettings {
    /// Locale used when the requested locale has no file.
    pub fallback_locale: String,

    /// Locale file extension, without the leading dot.
    pub file_extension: String,

    /// Environment variable holding the default locale indicator (e.g. `ja_JP.UTF-8`).
    pub locale_env_var: String,
}

impl Default for LexSettings {
    fn default() -> Self {
        Self {
            fallback_locale: "en".to_string(),
            file_extension: "lex".to_string(),
            locale_env_var: "LANG".to_string(),
        }
    }
}

/// Whether `value` would escape the translation directory when joined to it.
fn has_path_separator(value: &str) -> bool {
    value.contains(['/', '\\'])
}

impl LexSettings {
    /// # Errors
    /// - Required field is empty
    /// - Extension with a leading dot
    /// - Path separators in the extension or fallback locale
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.fallback_locale.is_empty() {
            errors.push(ValidationError::new(
                "fallbackLocale",
                "The fallback locale cannot be empty. Example: \"en\"",
            ));
        } else if has_path_separator(&self.fallback_locale) {
            errors.push(ValidationError::new(
                "fallbackLocale",
                format!(
                    "The fallback locale '{}' must not contain path separators",
                    self.fallback_locale
                ),
            ));
        }

        if self.file_extension.is_empty() {
            errors.push(ValidationError::new(
                "fileExtension",
                "The extension cannot be empty. Example: \"lex\"",
            ));
        } else if self.file_extension.starts_with('.') {
            errors.push(ValidationError::new(
                "fileExtension",
                format!(
                    "Specify the extension without the leading dot, e.g. \"{}\"",
                    self.file_extension.trim_start_matches('.')
                ),
            ));
        } else if has_path_separator(&self.file_extension) {
            errors.push(ValidationError::new(
                "fileExtension",
                format!(
                    "The extension '{}' must not contain path separators",
                    self.file_extension
                ),
            ));
        }

        if self.locale_env_var.is_empty() {
            errors.push(ValidationError::new(
                "localeEnvVar",
                "The variable name cannot be empty. Example: \"LANG\"",
            ));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::expect_used, clippy::panic)]
mod tests {
    use googletest::prelude::*;
    use rstest::*;

    use super::*;

    #[rstest]
    fn validate_valid_settings() {
        let settings = LexSettings::default();

        assert_that!(settings.validate(), ok(anything()));
    }

    #[rstest]
    fn deserialize_partial_settings() {
        let json = r#"{"fallbackLocale": "ja"}"#;

        let settings: LexSettings = serde_json::from_str(json).unwrap();

        assert_that!(settings.fallback_locale, eq("ja"));
        assert_that!(settings.file_extension, eq("lex"));
        assert_that!(settings.locale_env_var, eq("LANG"));
    }

    #[rstest]
    fn deserialize_empty_settings() {
        let json = "{}";

        let settings: LexSettings = serde_json::from_str(json).unwrap();

        assert_that!(settings, eq(&LexSettings::default()));
    }

    #[rstest]
    fn validate_invalid_fallback_locale_empty() {
        let settings = LexSettings { fallback_locale: String::new(), ..LexSettings::default() };
        let result = settings.validate();

        assert_that!(
            result,
            err(elements_are![all![
                field!(ValidationError.field_path, eq("fallbackLocale")),
                field!(ValidationError.message, contains_substring("cannot be empty"))
            ]])
        );
    }

    #[rstest]
    #[case("../en")]
    #[case("en\\..")]
    fn validate_invalid_fallback_locale_path(#[case] locale: &str) {
        let settings = LexSettings { fallback_locale: locale.to_string(), ..LexSettings::default() };
        let result = settings.validate();

        assert_that!(
            result,
            err(elements_are![all![
                field!(ValidationError.field_path, eq("fallbackLocale")),
                field!(ValidationError.message, contains_substring("path separators"))
            ]])
        );
    }

    #[rstest]
    fn validate_invalid_extension_leading_dot() {
        let settings = LexSettings { file_extension: ".lex".to_string(), ..LexSettings::default() };
        let result = settings.validate();

        assert_that!(
            result,
            err(elements_are![all![
                field!(ValidationError.field_path, eq("fileExtension")),
                field!(ValidationError.message, contains_substring("without the leading dot")),
                field!(ValidationError.message, contains_substring("\"lex\""))
            ]])
        );
    }

    #[rstest]
    fn validate_invalid_locale_env_var_empty() {
        let settings = LexSettings { locale_env_var: String::new(), ..LexSettings::default() };
        let result = settings.validate();

        assert_that!(
            result,
            err(elements_are![field!(ValidationError.field_path, eq("localeEnvVar"))])
        );
    }

    #[rstest]
    fn config_error_validation_errors_format() {
        let settings = LexSettings {
            fallback_locale: String::new(),
            file_extension: String::new(),
            ..LexSettings::default()
        };

        let validation_result = settings.validate();
        let errors = validation_result.unwrap_err();
        let config_error = ConfigError::ValidationErrors(errors);

        let error_message = format!("{config_error}");
        assert_that!(error_message, contains_substring("Configuration validation failed"));
        assert_that!(error_message, contains_substring("1. fallbackLocale"));
        assert_that!(error_message, contains_substring("2. fileExtension"));
        assert_that!(error_message, contains_substring("cannot be empty"));
    }
}
