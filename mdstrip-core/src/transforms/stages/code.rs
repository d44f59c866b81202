//! Code removal stage
//!
//! Code is usually the most token-expensive part of a prompt, so both fenced
//! blocks and inline spans go away together with their content.
//!
//! - Fenced blocks run from a ```` ``` ```` to the next ```` ``` ````. A fence
//!   that is never closed swallows the rest of the document.
//! - Inline spans open with a run of N backticks and close at the next run of
//!   exactly N backticks on the same line. Runs without a partner are literal.

use crate::transforms::Runnable;

const FENCE: &str = "```";

/// Removes fenced code blocks and inline code spans.
pub struct StripCodeBlocks;

impl StripCodeBlocks {
    pub fn new() -> Self {
        StripCodeBlocks
    }
}

impl Default for StripCodeBlocks {
    fn default() -> Self {
        Self::new()
    }
}

impl Runnable<String, String> for StripCodeBlocks {
    fn run(&self, input: String) -> String {
        strip_inline_spans(&strip_fences(&input))
    }
}

/// Remove fenced blocks in one pass.
///
/// Works like comment removal: the block is cut from the buffer as soon as
/// its closing fence is written, so backticks on either side meet before the
/// next fence is looked for. At most two backticks can remain in a row.
fn strip_fences(text: &str) -> String {
    let mut output = String::with_capacity(text.len());
    let mut open: Option<usize> = None;

    for ch in text.chars() {
        output.push(ch);
        if ch != '`' || !output.ends_with(FENCE) {
            continue;
        }
        let fence_start = output.len() - FENCE.len();
        match open {
            None => open = Some(fence_start),
            Some(start) if fence_start >= start + FENCE.len() => {
                output.truncate(start);
                open = None;
            }
            Some(_) => {}
        }
    }

    if let Some(start) = open {
        output.truncate(start);
    }
    output
}

/// Remove inline code spans.
///
/// Opening and closing runs are maximal, so the characters on both sides of a
/// removed span are never backticks and no new run can form. One pass is
/// enough.
fn strip_inline_spans(text: &str) -> String {
    let bytes = text.as_bytes();
    let mut output = String::with_capacity(text.len());
    let mut copied = 0;
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'`' {
            i += 1;
            continue;
        }

        let open_len = run_length(bytes, i);
        match find_closing_run(bytes, i + open_len, open_len) {
            Some(span_end) => {
                output.push_str(&text[copied..i]);
                i = span_end;
                copied = span_end;
            }
            None => i += open_len,
        }
    }

    output.push_str(&text[copied..]);
    output
}

/// Number of consecutive backticks starting at `start`.
fn run_length(bytes: &[u8], start: usize) -> usize {
    bytes[start..].iter().take_while(|b| **b == b'`').count()
}

/// End offset of the first run of exactly `len` backticks at or after `from`,
/// looking no further than the end of the line.
fn find_closing_run(bytes: &[u8], from: usize, len: usize) -> Option<usize> {
    let mut j = from;
    while j < bytes.len() && bytes[j] != b'\n' {
        if bytes[j] == b'`' {
            let run = run_length(bytes, j);
            if run == len {
                return Some(j + run);
            }
            j += run;
        } else {
            j += 1;
        }
    }
    None
}
