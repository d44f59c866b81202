//! HTML comment removal stage

use crate::transforms::Runnable;

const OPEN: &str = "<!--";
const CLOSE: &str = "-->";

/// Removes `<!-- ... -->` comments, including multi-line ones.
///
/// An unterminated `<!--` is left as literal text. Comments do not nest: a
/// comment ends at the first `-->` after its opener.
pub struct StripComments;

impl StripComments {
    pub fn new() -> Self {
        StripComments
    }
}

impl Default for StripComments {
    fn default() -> Self {
        Self::new()
    }
}

impl Runnable<String, String> for StripComments {
    fn run(&self, input: String) -> String {
        strip_comments(&input)
    }
}

/// Single left-to-right pass over an output buffer.
///
/// A comment is dropped the moment its `-->` lands in the buffer, so text on
/// both sides of it is already joined when the next opener is looked for.
/// `<!<!--a-->--b-->` therefore goes away in one pass.
fn strip_comments(text: &str) -> String {
    let mut output = String::with_capacity(text.len());
    let mut open: Option<usize> = None;

    for ch in text.chars() {
        output.push(ch);
        match open {
            None if output.ends_with(OPEN) => open = Some(output.len() - OPEN.len()),
            // `<!-->` is an opener followed by `>`, not a closed comment
            Some(start)
                if output.ends_with(CLOSE)
                    && output.len() - CLOSE.len() >= start + OPEN.len() =>
            {
                output.truncate(start);
                open = None;
            }
            _ => {}
        }
    }

    output
}
