//! Layering order: embedded defaults < files (in order) < overrides

use mdstrip_config::{Loader, OutputFormat};
use mdstrip_core::{Mode, Operation};
use std::fs;
use tempfile::TempDir;

fn write_config(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("config file to be written");
    path
}

#[test]
fn file_overrides_defaults() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        "mdstrip.toml",
        "[cleaning]\nmode = \"standard-markdown\"\n\n[output]\nstats = true\n",
    );

    let config = Loader::new().with_file(&path).build().unwrap();
    assert_eq!(config.cleaning.mode, Mode::StandardMarkdown);
    assert!(config.output.stats);
    // untouched keys keep their defaults
    assert_eq!(config.output.format, OutputFormat::Text);
    assert!(!config.custom.strip_links);
}

#[test]
fn later_files_win() {
    let dir = TempDir::new().unwrap();
    let first = write_config(&dir, "first.toml", "[custom]\nstrip_links = false\n");
    let second = write_config(
        &dir,
        "second.toml",
        "[custom]\nstrip_links = true\nstrip_headers = false\n",
    );

    let config = Loader::new()
        .with_file(&first)
        .with_file(&second)
        .build()
        .unwrap();
    assert!(config.custom.strip_links);
    assert!(!config.custom.strip_headers);
}

#[test]
fn overrides_beat_files() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "mdstrip.toml", "[cleaning]\nmode = \"custom\"\n");

    let config = Loader::new()
        .with_file(&path)
        .with_mode(Mode::PlainText)
        .unwrap()
        .build()
        .unwrap();
    assert_eq!(config.cleaning.mode, Mode::PlainText);
}

#[test]
fn switch_overrides_file_table() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        "mdstrip.toml",
        "[custom]\nstrip_links = true\nstrip_headers = true\n",
    );

    let config = Loader::new()
        .with_file(&path)
        .enable(Operation::StripHeaders, false)
        .unwrap()
        .build()
        .unwrap();
    assert!(config.custom.strip_links);
    assert!(!config.custom.strip_headers);
    assert!(!config.custom.strip_markdown_emphasis);
}

#[test]
fn missing_optional_file_is_ignored() {
    let dir = TempDir::new().unwrap();
    let config = Loader::new()
        .with_optional_file(dir.path().join("absent.toml"))
        .build()
        .unwrap();
    assert_eq!(config.cleaning.mode, Mode::PlainText);
}

#[test]
fn missing_required_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let result = Loader::new()
        .with_file(dir.path().join("absent.toml"))
        .build();
    assert!(result.is_err());
}

#[test]
fn invalid_toml_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "broken.toml", "[cleaning\nmode = ");
    assert!(Loader::new().with_file(&path).build().is_err());
}
