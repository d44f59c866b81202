//! Size reduction report
//!
//! Token counts are a crude estimate at four characters per token, good
//! enough to tell how much a prompt shrank without pulling in a tokenizer.

use serde::Serialize;
use std::fmt;

/// Characters per estimated token.
pub const CHARS_PER_TOKEN: usize = 4;

/// How much a cleaning run removed. Lengths are in characters, not bytes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CleanReport {
    pub original_chars: usize,
    pub cleaned_chars: usize,
    pub chars_removed: usize,
    /// Percentage of the original removed, `0.0` for empty input.
    pub reduction_percent: f64,
    pub original_tokens_estimate: usize,
    pub cleaned_tokens_estimate: usize,
}

impl CleanReport {
    pub fn new(original: &str, cleaned: &str) -> Self {
        let original_chars = original.chars().count();
        let cleaned_chars = cleaned.chars().count();
        let chars_removed = original_chars.saturating_sub(cleaned_chars);
        let reduction_percent = if original_chars > 0 {
            chars_removed as f64 / original_chars as f64 * 100.0
        } else {
            0.0
        };

        CleanReport {
            original_chars,
            cleaned_chars,
            chars_removed,
            reduction_percent,
            original_tokens_estimate: estimate_tokens(original_chars),
            cleaned_tokens_estimate: estimate_tokens(cleaned_chars),
        }
    }

    pub fn tokens_saved(&self) -> usize {
        self.original_tokens_estimate
            .saturating_sub(self.cleaned_tokens_estimate)
    }
}

impl fmt::Display for CleanReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Reduction: {:.1}% | Chars removed: {} | Tokens: ~{} -> ~{}",
            self.reduction_percent,
            self.chars_removed,
            self.original_tokens_estimate,
            self.cleaned_tokens_estimate
        )
    }
}

/// Estimated tokens for `chars` characters, rounded up.
pub fn estimate_tokens(chars: usize) -> usize {
    chars.div_ceil(CHARS_PER_TOKEN)
}
