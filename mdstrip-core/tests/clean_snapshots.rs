//! Snapshot tests over a realistic documentation page
//!
//! `fixtures/quickstart.mdx` mixes front matter, MDX components, comments,
//! fenced and inline code, emphasis, lists, images and links.

use mdstrip_core::{Cleaner, DocumentLoader, Mode, Operation, OptionSet};
use std::path::PathBuf;

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn clean_fixture(mode: Mode, options: &OptionSet) -> String {
    let loader = DocumentLoader::from_path(fixture_path("quickstart.mdx"))
        .expect("fixture to be readable");
    loader
        .clean(&Cleaner::new(mode, options))
        .expect("fixture to clean")
}

#[test]
fn test_plain_text() {
    let cleaned = clean_fixture(Mode::PlainText, &OptionSet::none());
    insta::assert_snapshot!("plain_text", cleaned);
}

#[test]
fn test_standard_markdown() {
    let cleaned = clean_fixture(Mode::StandardMarkdown, &OptionSet::none());
    insta::assert_snapshot!("standard_markdown", cleaned);
}

#[test]
fn test_custom_tags_and_links() {
    let options = OptionSet::none()
        .with(Operation::StripXmlHtmlTags, true)
        .with(Operation::StripLinks, true)
        .with(Operation::StripImages, true)
        .with(Operation::CollapseWhitespace, true);
    let cleaned = clean_fixture(Mode::Custom, &options);
    insta::assert_snapshot!("custom_tags_and_links", cleaned);
}

#[test]
fn test_plain_text_report() {
    let loader = DocumentLoader::from_path(fixture_path("quickstart.mdx")).unwrap();
    let cleaner = Cleaner::new(Mode::PlainText, &OptionSet::none());
    let (cleaned, report) = loader.clean_with_report(&cleaner).unwrap();

    assert_eq!(report.cleaned_chars, cleaned.chars().count());
    assert_eq!(
        report.original_chars,
        loader.source().chars().count()
    );
    assert!(report.reduction_percent > 30.0);
    assert!(report.tokens_saved() > 0);
}
