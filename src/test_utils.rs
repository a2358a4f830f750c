//! テスト用ユーティリティ関数
//!
//! 複数のテストモジュールで使用される共通のヘルパー関数を提供します。
#![cfg(test)]
#![allow(clippy::unwrap_used)]

use std::path::Path;

use tempfile::TempDir;

/// ロケールファイルを書き込む（既存の内容は上書き）
///
/// # Arguments
/// * `dir` - 翻訳ファイルを格納するディレクトリ
/// * `locale` - ロケールコード（例: "en", "fr"）
/// * `content` - ファイルの内容（`KEY::VALUE` 形式の行）
pub(crate) fn write_locale(dir: &Path, locale: &str, content: &str) {
    std::fs::write(dir.join(format!("{locale}.lex")), content).unwrap();
}

/// テスト用の翻訳ディレクトリを作成する
///
/// # Arguments
/// * `files` - ロケールコードとファイル内容の組
///
/// # Returns
/// 作成された一時ディレクトリ（drop 時に削除される）
pub(crate) fn lang_dir(files: &[(&str, &str)]) -> TempDir {
    let dir = TempDir::new().unwrap();
    for (locale, content) in files {
        write_locale(dir.path(), locale, content);
    }
    dir
}
