//! The text cleaner
//!
//! [`clean`] is the whole contract: text, mode and options in, cleaned text
//! out. [`Cleaner`] is the same thing with the mode resolved and the pipeline
//! built up front, for callers that clean many documents with one setting.
//!
//! The only failure is input larger than the configured limit, which is
//! rejected before any work is done.

use crate::mode::{Mode, OptionSet};
use crate::report::CleanReport;
use crate::transforms::standard::{build_pipeline, TextTransform, PLAIN_TEXT, STANDARD_MARKDOWN};
use std::fmt;

/// Default input limit: 16 MiB.
pub const DEFAULT_MAX_INPUT_BYTES: usize = 16 * 1024 * 1024;

/// Upper bound on pipeline passes per [`Cleaner::clean`] call.
///
/// One pass can leave work for the next when a deletion in a later stage
/// joins text an earlier stage already scanned (`<!-**-x-->`). Inputs seen
/// in practice settle within three passes.
pub const MAX_PASSES: usize = 8;

/// Error that can occur while cleaning
#[derive(Debug, Clone, PartialEq)]
pub enum CleanError {
    /// Input exceeds the cleaner's byte limit
    InputTooLarge { len: usize, limit: usize },
}

impl fmt::Display for CleanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CleanError::InputTooLarge { len, limit } => write!(
                f,
                "Input too large: {} bytes exceeds the limit of {} bytes",
                len, limit
            ),
        }
    }
}

impl std::error::Error for CleanError {}

/// Clean `text` with `mode`, falling back to `options` for [`Mode::Custom`].
///
/// Uses the default input limit.
pub fn clean(text: &str, mode: Mode, options: &OptionSet) -> Result<String, CleanError> {
    Cleaner::new(mode, options).clean(text)
}

enum Pipeline {
    Preset(&'static TextTransform),
    Built(TextTransform),
}

impl Pipeline {
    fn transform(&self) -> &TextTransform {
        match self {
            Pipeline::Preset(transform) => *transform,
            Pipeline::Built(transform) => transform,
        }
    }
}

/// A reusable cleaner for one mode / option combination.
pub struct Cleaner {
    mode: Mode,
    options: OptionSet,
    max_input_bytes: usize,
    pipeline: Pipeline,
}

impl Cleaner {
    /// Resolve `mode` against `options` and build the pipeline.
    pub fn new(mode: Mode, options: &OptionSet) -> Self {
        let options = mode.resolve(options);
        log::debug!("cleaner mode={} options={:?}", mode, options);

        let pipeline = match mode {
            Mode::PlainText => Pipeline::Preset(&*PLAIN_TEXT),
            Mode::StandardMarkdown => Pipeline::Preset(&*STANDARD_MARKDOWN),
            Mode::Custom => Pipeline::Built(build_pipeline(&options)),
        };

        Cleaner {
            mode,
            options,
            max_input_bytes: DEFAULT_MAX_INPUT_BYTES,
            pipeline,
        }
    }

    /// Replace the input limit.
    pub fn with_max_input_bytes(mut self, limit: usize) -> Self {
        self.max_input_bytes = limit;
        self
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// The options that actually run, after preset resolution.
    pub fn options(&self) -> &OptionSet {
        &self.options
    }

    pub fn max_input_bytes(&self) -> usize {
        self.max_input_bytes
    }

    /// Clean `text`.
    ///
    /// The pipeline is rerun until its output stops changing, which makes
    /// `clean(clean(t)) == clean(t)`. Stages only delete characters, so an
    /// unchanged length means an unchanged text. Every pass is linear and
    /// there are at most [`MAX_PASSES`] of them.
    pub fn clean(&self, text: &str) -> Result<String, CleanError> {
        self.clean_counting_passes(text).map(|(cleaned, _)| cleaned)
    }

    pub(crate) fn clean_counting_passes(&self, text: &str) -> Result<(String, usize), CleanError> {
        if text.len() > self.max_input_bytes {
            log::warn!(
                "rejecting input of {} bytes (limit {})",
                text.len(),
                self.max_input_bytes
            );
            return Err(CleanError::InputTooLarge {
                len: text.len(),
                limit: self.max_input_bytes,
            });
        }

        let transform = self.pipeline.transform();
        let mut current = text.to_string();
        let mut passes = 0;
        loop {
            let before = current.len();
            current = transform.run(current);
            passes += 1;
            if current.len() == before {
                break;
            }
            if passes == MAX_PASSES {
                log::debug!("stopping after {} passes", passes);
                break;
            }
        }

        log::trace!(
            "cleaned {} -> {} bytes in {} pass(es)",
            text.len(),
            current.len(),
            passes
        );
        Ok((current, passes))
    }

    /// Clean `text` and report how much was removed.
    pub fn clean_with_report(&self, text: &str) -> Result<(String, CleanReport), CleanError> {
        let cleaned = self.clean(text)?;
        let report = CleanReport::new(text, &cleaned);
        Ok((cleaned, report))
    }
}

impl fmt::Debug for Cleaner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cleaner")
            .field("mode", &self.mode)
            .field("options", &self.options)
            .field("max_input_bytes", &self.max_input_bytes)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mode::Operation;

    #[test]
    fn test_clean_tags_plain_text() {
        assert_eq!(
            clean("<b>hi</b>", Mode::PlainText, &OptionSet::default()).unwrap(),
            "hi"
        );
    }

    #[test]
    fn test_clean_empty_input() {
        for mode in Mode::ALL {
            assert_eq!(clean("", mode, &OptionSet::all()).unwrap(), "");
        }
    }

    #[test]
    fn test_custom_uses_caller_options() {
        let options = OptionSet::none().with(Operation::StripLinks, true);
        assert_eq!(
            clean("**[OpenAI](https://openai.com)**", Mode::Custom, &options).unwrap(),
            "**OpenAI**"
        );
    }

    #[test]
    fn test_cleaner_reports_resolved_options() {
        let cleaner = Cleaner::new(Mode::StandardMarkdown, &OptionSet::all());
        assert_eq!(cleaner.mode(), Mode::StandardMarkdown);
        assert!(!cleaner.options().strip_markdown_emphasis);
        assert!(cleaner.options().strip_xml_html_tags);
    }

    #[test]
    fn test_input_too_large() {
        let cleaner = Cleaner::new(Mode::PlainText, &OptionSet::none()).with_max_input_bytes(4);
        assert_eq!(cleaner.max_input_bytes(), 4);
        assert_eq!(cleaner.clean("abcd").unwrap(), "abcd");
        assert_eq!(
            cleaner.clean("abcde").unwrap_err(),
            CleanError::InputTooLarge { len: 5, limit: 4 }
        );
    }

    #[test]
    fn test_error_display() {
        let err = CleanError::InputTooLarge { len: 10, limit: 5 };
        assert_eq!(
            err.to_string(),
            "Input too large: 10 bytes exceeds the limit of 5 bytes"
        );
    }

    #[test]
    fn test_clean_with_report() {
        let cleaner = Cleaner::new(Mode::PlainText, &OptionSet::none());
        let (cleaned, report) = cleaner.clean_with_report("<i>abcd</i>").unwrap();
        assert_eq!(cleaned, "abcd");
        assert_eq!(report.chars_removed, 7);
    }

    #[test]
    fn test_clean_is_idempotent() {
        let cleaner = Cleaner::new(Mode::PlainText, &OptionSet::none());
        let once = cleaner.clean("*`x`a*").unwrap();
        assert_eq!(once, "a");
        assert_eq!(cleaner.clean(&once).unwrap(), once);
    }

    #[test]
    fn test_cross_stage_leftovers_take_another_pass() {
        let options = OptionSet::none()
            .with(Operation::StripComments, true)
            .with(Operation::StripMarkdownEmphasis, true);
        let cleaner = Cleaner::new(Mode::Custom, &options);
        // the comment only exists once `**` is gone
        let (cleaned, passes) = cleaner.clean_counting_passes("a<!-**-x-->b").unwrap();
        assert_eq!(cleaned, "ab");
        assert_eq!(passes, 3);
    }

    #[test]
    fn test_deep_nesting_settles_in_two_passes() {
        let depth = 2_000;
        let cleaner = Cleaner::new(Mode::PlainText, &OptionSet::none());
        let inputs = [
            format!("{}a{}", "*".repeat(depth), "*".repeat(depth)),
            format!("{}a{}", "[".repeat(depth), "](x)".repeat(depth)),
            format!("{}--a-->{}", "<!".repeat(depth), "--b-->".repeat(depth)),
            format!("{}x", "# > ".repeat(depth)),
        ];
        for input in &inputs {
            let (_, passes) = cleaner.clean_counting_passes(input).unwrap();
            assert!(passes <= 2, "{} passes", passes);
        }
    }

    #[test]
    fn test_cleaner_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Cleaner>();
    }
}
