//! CLI contract tests.

use std::fs;
use std::path::PathBuf;

fn main_source() -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("src/main.rs");
    let source_result = fs::read_to_string(&path);
    assert!(source_result.is_ok());
    match source_result {
        Ok(source) => source,
        Err(err) => panic!("main source should load from {}: {err}", path.display()),
    }
}

#[test]
fn main_defines_primary_subcommands() {
    let source = main_source();
    assert!(source.contains("Start"));
    assert!(source.contains("History"));
}

#[test]
fn bot_token_never_lives_in_source() {
    let source = main_source();
    assert!(
        source.contains("bot_token_env"),
        "token must be resolved through the configured env var"
    );
}
