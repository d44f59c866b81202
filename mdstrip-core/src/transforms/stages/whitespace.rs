//! Whitespace collapsing stage
//!
//! Removing spans leaves holes: empty lines where a code block was, trailing
//! spaces where a tag was. This stage tidies them up:
//!
//! - trailing whitespace is trimmed from every line
//! - a run of blank lines becomes a single blank line
//! - blank lines at the start and end of the document are dropped
//!
//! Lines are joined with `\n`, so `\r\n` input comes out with `\n` endings.
//! Leading indentation is never touched.

use crate::transforms::Runnable;

/// Collapses blank-line runs and trims trailing whitespace.
pub struct CollapseWhitespace;

impl CollapseWhitespace {
    pub fn new() -> Self {
        CollapseWhitespace
    }
}

impl Default for CollapseWhitespace {
    fn default() -> Self {
        Self::new()
    }
}

impl Runnable<String, String> for CollapseWhitespace {
    fn run(&self, input: String) -> String {
        collapse_whitespace(&input)
    }
}

/// The function behind [`CollapseWhitespace`].
pub fn collapse_whitespace(text: &str) -> String {
    let mut lines: Vec<&str> = Vec::new();
    let mut previous_blank = false;

    for line in text.lines() {
        let line = line.trim_end();
        let blank = line.is_empty();
        if blank && (lines.is_empty() || previous_blank) {
            continue;
        }
        previous_blank = blank;
        lines.push(line);
    }

    while lines.last() == Some(&"") {
        lines.pop();
    }

    lines.join("\n")
}
