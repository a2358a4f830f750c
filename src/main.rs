//! Demo harness: prints a few translations from a `.lex` directory.
//!
//! Usage: `lex [LANG_DIR]` (defaults to `./lang`). Set `RUST_LOG=debug` to trace lookups.
#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::path::PathBuf;
use std::process::ExitCode;

use lex_i18n::{
    LexError,
    TranslationStore,
};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let lang_dir = std::env::args().nth(1).map_or_else(|| PathBuf::from("lang"), PathBuf::from);

    match run(lang_dir) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("[ERROR] {err}");
            ExitCode::FAILURE
        }
    }
}

/// Looks up the demo keys, then reloads into English.
fn run(lang_dir: PathBuf) -> Result<(), LexError> {
    let mut store = TranslationStore::open(lang_dir, None)?;
    tracing::debug!(%store, "Store ready");

    println!("{}", store.get("welcome", &["LEX".into()])?);
    println!("{}", store.get("modules_available", &[])?);
    println!("{}", store.get("error_file", &["foo.txt".into()])?);

    store.reload(Some("en"))?;
    println!("{}", store.get("welcome", &["LEX".into()])?);

    Ok(())
}
