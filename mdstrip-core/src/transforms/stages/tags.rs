//! XML/HTML tag removal stage

use crate::transforms::Runnable;
use once_cell::sync::Lazy;
use regex::Regex;

static TAG_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").unwrap());

/// Removes tag markers such as `<Tip>`, `</CodeGroup>` or `<br/>`.
///
/// Text between tags is kept. A `<` with no closing `>` after it, and the
/// empty `<>`, are not tags and stay in place.
///
/// One `replace_all` is enough. A tag runs to the first `>` after its `<`, so
/// whatever is left between two removed tags holds no `>` that could close a
/// new one.
pub struct StripTags;

impl StripTags {
    pub fn new() -> Self {
        StripTags
    }
}

impl Default for StripTags {
    fn default() -> Self {
        Self::new()
    }
}

impl Runnable<String, String> for StripTags {
    fn run(&self, input: String) -> String {
        TAG_REGEX.replace_all(&input, "").into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strip(input: &str) -> String {
        StripTags::new().run(input.to_string())
    }

    #[test]
    fn test_keeps_enclosed_text() {
        assert_eq!(strip("<b>hi</b>"), "hi");
        assert_eq!(
            strip("<Tip>Use the <code>--force</code> flag</Tip>"),
            "Use the --force flag"
        );
    }

    #[test]
    fn test_tags_with_attributes_and_newlines() {
        assert_eq!(
            strip("<CodeGroup\n  title=\"Example\"\n>body</CodeGroup>"),
            "body"
        );
        assert_eq!(strip("line<br/>break"), "linebreak");
    }

    #[test]
    fn test_stray_angle_brackets_survive() {
        assert_eq!(strip("<unclosed"), "<unclosed");
        assert_eq!(strip("a >= b"), "a >= b");
        assert_eq!(strip("<>"), "<>");
    }

    #[test]
    fn test_one_pass_is_stable() {
        assert_eq!(strip("<<b>i>x"), "i>x");
        assert_eq!(strip("<a<b>c>d"), "c>d");
        let nested = format!("{}a{}", "<".repeat(10_000), ">".repeat(10_000));
        assert_eq!(strip(&nested), ">".repeat(9_999));
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(strip(""), "");
    }
}
