//! Markdown syntax stage
//!
//! One stage covers the five Markdown operations, each keeping the text a
//! marker decorates:
//!
//! - headers: `## Title` becomes `Title`
//! - horizontal rules: `---`, `* * *`, `___` lines become empty
//! - emphasis: blockquote markers, list bullets and the `*` / `_` / `~`
//!   delimiters
//! - images: `![alt](url)` goes away entirely
//! - links: `[label](url)` becomes `label`
//!
//! They share a stage because they feed each other: dropping `**` can turn
//! `**#** x` into a header, and dropping a link can leave a bullet at the
//! start of a line. Handling them together lets every line be finished in a
//! bounded number of scans.
//!
//! Everything is line-local. A stray `*` on one line never pairs with one on
//! the next, and a `\r` before the newline is left where it was.

use crate::mode::{Operation, OptionSet};
use crate::transforms::Runnable;

/// Removes the enabled Markdown constructs, line by line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StripMarkdown {
    pub headers: bool,
    pub rules: bool,
    pub emphasis: bool,
    pub images: bool,
    pub links: bool,
}

impl StripMarkdown {
    /// All five constructs.
    pub fn new() -> Self {
        StripMarkdown {
            headers: true,
            rules: true,
            emphasis: true,
            images: true,
            links: true,
        }
    }

    /// The constructs `options` enables.
    pub fn from_options(options: &OptionSet) -> Self {
        StripMarkdown {
            headers: options.get(Operation::StripHeaders),
            rules: options.get(Operation::StripHorizontalRules),
            emphasis: options.get(Operation::StripMarkdownEmphasis),
            images: options.get(Operation::StripImages),
            links: options.get(Operation::StripLinks),
        }
    }

    /// True when no construct is enabled.
    pub fn is_empty(&self) -> bool {
        *self == StripMarkdown::default()
    }

    fn clean_line(&self, line: &str) -> String {
        let rest = self.strip_line_prefix(line);
        let inline = self.strip_inline(rest);
        if inline == rest {
            return inline;
        }
        self.strip_line_prefix(&inline).to_string()
    }

    /// Peel rules, blockquotes, bullets and header markers off the front of
    /// `line`, in any order and any number.
    ///
    /// Indentation is only dropped together with a marker.
    fn strip_line_prefix<'a>(&self, line: &'a str) -> &'a str {
        let rule = if self.rules { rule_suffixes(line) } else { None };
        let mut rest = 0;

        loop {
            if matches!(rule, Some((lo, hi)) if lo <= rest && rest <= hi) {
                return "";
            }

            let marker = rest + leading_whitespace(&line[rest..]);
            let tail = &line[marker..];

            if self.emphasis {
                if let Some(after) = tail.strip_prefix('>') {
                    let space = after
                        .chars()
                        .next()
                        .filter(|c| c.is_whitespace())
                        .map_or(0, char::len_utf8);
                    rest = marker + 1 + space;
                    continue;
                }

                let mut chars = tail.chars();
                if let (Some('*' | '+' | '-'), Some(next)) = (chars.next(), chars.next()) {
                    if next.is_whitespace() {
                        rest = marker + 1 + leading_whitespace(&tail[1..]);
                        continue;
                    }
                }
            }

            if self.headers {
                let hashes = tail.bytes().take(7).take_while(|b| *b == b'#').count();
                if (1..=6).contains(&hashes) {
                    let after = &tail[hashes..];
                    // `#hashtag` is not a header
                    if after.chars().next().map_or(true, char::is_whitespace) {
                        rest = marker + hashes + leading_whitespace(after);
                        continue;
                    }
                }
            }

            return &line[rest..];
        }
    }

    fn strip_inline(&self, line: &str) -> String {
        let mut text = if self.emphasis {
            strip_emphasis_delimiters(line)
        } else {
            line.to_string()
        };
        if (self.images || self.links) && text.contains('[') {
            text = self.strip_brackets(&text);
        }
        text
    }

    /// Resolve `[label](url)` and `![alt](url)` in one scan.
    ///
    /// A label holds no brackets, parentheses or newlines of its own, and a
    /// url holds no `)`. Constructs are reduced the moment their `)` is seen,
    /// so a reduced link can become the label of an enclosing one:
    /// `[[a](x)](y)` becomes `a`. A link's `[` is marked dead rather than
    /// removed, which keeps the recorded positions of enclosing brackets
    /// valid.
    fn strip_brackets(&self, line: &str) -> String {
        let mut buffer = Buffer::with_capacity(line.len());
        let mut opens: Vec<usize> = Vec::new();
        let mut pending: Option<(usize, usize)> = None;
        let mut url: Option<(usize, usize)> = None;

        for c in line.chars() {
            if let Some((open, close)) = url {
                if c == ')' {
                    url = None;
                    let bang = buffer.previous_live(open).filter(|&i| buffer.chars[i] == '!');
                    match bang {
                        Some(bang) if self.images => {
                            buffer.truncate(bang);
                            continue;
                        }
                        None if self.links => {
                            if close == open + 1 {
                                buffer.truncate(open);
                            } else {
                                buffer.dead[open] = true;
                                buffer.truncate(close);
                            }
                            continue;
                        }
                        _ => opens.clear(),
                    }
                }
                buffer.push(c);
                continue;
            }

            if let Some((open, close)) = pending.take() {
                if c == '(' {
                    opens.pop();
                    url = Some((open, close));
                    buffer.push(c);
                    continue;
                }
                opens.clear();
            }

            match c {
                '[' => opens.push(buffer.len()),
                ']' => {
                    if let Some(&open) = opens.last() {
                        pending = Some((open, buffer.len()));
                    }
                }
                '(' | ')' => opens.clear(),
                _ => {}
            }
            buffer.push(c);
        }

        buffer.into_string()
    }
}

impl Runnable<String, String> for StripMarkdown {
    fn run(&self, input: String) -> String {
        if self.is_empty() {
            return input;
        }

        let mut output = String::with_capacity(input.len());
        for (index, segment) in input.split('\n').enumerate() {
            if index > 0 {
                output.push('\n');
            }
            let (line, cr) = match segment.strip_suffix('\r') {
                Some(line) => (line, "\r"),
                None => (segment, ""),
            };
            output.push_str(&self.clean_line(line));
            output.push_str(cr);
        }
        output
    }
}

/// Characters of one line plus a tombstone per character.
struct Buffer {
    chars: Vec<char>,
    dead: Vec<bool>,
}

impl Buffer {
    fn with_capacity(capacity: usize) -> Self {
        Buffer {
            chars: Vec::with_capacity(capacity),
            dead: Vec::with_capacity(capacity),
        }
    }

    fn len(&self) -> usize {
        self.chars.len()
    }

    fn push(&mut self, c: char) {
        self.chars.push(c);
        self.dead.push(false);
    }

    /// Cut at `len`, then drop dead characters left at the end.
    fn truncate(&mut self, len: usize) {
        self.chars.truncate(len);
        self.dead.truncate(len);
        while self.dead.last() == Some(&true) {
            self.chars.pop();
            self.dead.pop();
        }
    }

    fn previous_live(&self, index: usize) -> Option<usize> {
        (0..index).rev().find(|&i| !self.dead[i])
    }

    fn into_string(self) -> String {
        self.chars
            .into_iter()
            .zip(self.dead)
            .filter(|(_, dead)| !dead)
            .map(|(c, _)| c)
            .collect()
    }
}

/// Byte length of the leading whitespace of `text`.
fn leading_whitespace(text: &str) -> usize {
    text.len() - text.trim_start().len()
}

/// Byte offsets `(lo, hi)` such that `line[i..]` is a horizontal rule exactly
/// when `lo <= i <= hi`.
///
/// A rule is at least three of the same `-`, `*` or `_` with nothing but
/// whitespace around them.
fn rule_suffixes(line: &str) -> Option<(usize, usize)> {
    let mut marker = None;
    let mut count = 0;
    let mut lo = 0;
    let mut hi = None;

    for (i, c) in line.char_indices().rev() {
        if c.is_whitespace() {
            continue;
        }
        let expected = *marker.get_or_insert(c);
        if !matches!(expected, '-' | '*' | '_') {
            return None;
        }
        if c != expected {
            lo = i + c.len_utf8();
            break;
        }
        count += 1;
        if count == 3 {
            hi = Some(i);
        }
    }

    hi.map(|hi| (lo, hi))
}

/// Drop emphasis delimiters, pairing each kind left to right.
///
/// `*` and `~` always count. `_` only counts when it is not inside a word,
/// so `snake_case_name` survives. When a kind has an odd count, the last
/// delimiter of that kind stays.
fn strip_emphasis_delimiters(line: &str) -> String {
    if !line.contains(['*', '~', '_']) {
        return line.to_string();
    }

    let chars: Vec<char> = line.chars().collect();
    let in_word = |i: Option<usize>| {
        i.and_then(|i| chars.get(i))
            .map_or(false, |c| c.is_alphanumeric())
    };

    let mut delimiters: [Vec<usize>; 3] = Default::default();
    for (i, &c) in chars.iter().enumerate() {
        let kind = match c {
            '*' => 0,
            '~' => 1,
            '_' if !(in_word(i.checked_sub(1)) && in_word(Some(i + 1))) => 2,
            _ => continue,
        };
        delimiters[kind].push(i);
    }

    let mut dropped = vec![false; chars.len()];
    for positions in &delimiters {
        let paired = positions.len() - positions.len() % 2;
        for &i in &positions[..paired] {
            dropped[i] = true;
        }
    }

    chars
        .into_iter()
        .zip(dropped)
        .filter(|(_, dropped)| !dropped)
        .map(|(c, _)| c)
        .collect()
}
