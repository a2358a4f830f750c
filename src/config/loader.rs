//! 設定ファイルの読み込み関数

use std::path::Path;

use super::{
    ConfigError,
    LexSettings,
};

/// 設定ファイル名
pub const SETTINGS_FILE_NAME: &str = ".lex.json";

/// 翻訳ディレクトリから設定を読み込む
///
/// `.lex.json` ファイルを探して読み込み、バリデーションする
///
/// # Arguments
/// * `directory` - 翻訳ファイルを格納するディレクトリ
///
/// # Returns
/// - `Ok(Some(settings))`: 設定ファイルが見つかり、読み込みとバリデーションに成功
/// - `Ok(None)`: 設定ファイルが見つからない
/// - `Err(ConfigError)`: ファイル読み込み・パース・バリデーションエラー
///
/// # Errors
/// - ファイル読み込みエラー
/// - JSON パースエラー
/// - バリデーションエラー
pub fn load_from_directory(directory: &Path) -> Result<Option<LexSettings>, ConfigError> {
    let config_path = directory.join(SETTINGS_FILE_NAME);

    if !config_path.is_file() {
        tracing::debug!("Configuration file not found: {:?}", config_path);
        return Ok(None);
    }

    tracing::debug!("Loading configuration from: {:?}", config_path);

    let content = std::fs::read_to_string(&config_path)?;
    let settings: LexSettings = serde_json::from_str(&content)?;
    settings.validate().map_err(ConfigError::ValidationErrors)?;

    Ok(Some(settings))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::fs;

    use rstest::rstest;
    use tempfile::TempDir;

    use super::*;

    /// `load_from_directory`: 設定ファイルが存在する場合
    #[rstest]
    fn test_load_from_directory_with_valid_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_content = r#"{"fallbackLocale": "ja", "fileExtension": "txt"}"#;
        fs::write(temp_dir.path().join(SETTINGS_FILE_NAME), config_content).unwrap();

        let result = load_from_directory(temp_dir.path());

        assert!(result.is_ok());
        let settings = result.unwrap().unwrap();
        assert_eq!(settings.fallback_locale, "ja");
        assert_eq!(settings.file_extension, "txt");
        assert_eq!(settings.locale_env_var, "LANG");
    }

    /// `load_from_directory`: 設定ファイルが存在しない場合
    #[rstest]
    fn test_load_from_directory_no_config_file() {
        let temp_dir = TempDir::new().unwrap();

        let result = load_from_directory(temp_dir.path());

        assert!(result.is_ok());
        assert!(result.unwrap().is_none());
    }

    /// `load_from_directory`: JSON パースエラー
    #[rstest]
    fn test_load_from_directory_invalid_json() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(SETTINGS_FILE_NAME), "invalid json").unwrap();

        let result = load_from_directory(temp_dir.path());

        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    /// `load_from_directory`: バリデーションエラー
    #[rstest]
    fn test_load_from_directory_invalid_settings() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(SETTINGS_FILE_NAME), r#"{"fileExtension": ".lex"}"#)
            .unwrap();

        let result = load_from_directory(temp_dir.path());

        assert!(matches!(result, Err(ConfigError::ValidationErrors(errors)) if errors.len() == 1));
    }
}
