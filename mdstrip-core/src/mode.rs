//! Cleaning modes and strip option sets
//!
//! A [`Mode`] picks which strip operations run. The two preset modes map to a
//! fixed [`OptionSet`] through [`Mode::preset`]; [`Mode::Custom`] has no preset
//! and uses whatever the caller supplies.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How aggressively a document is cleaned.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    /// Strip everything: tags, code, Markdown syntax. Returns pure text.
    #[default]
    PlainText,
    /// Strip tags, comments and code but keep Markdown headers, lists and links.
    StandardMarkdown,
    /// Caller decides every operation.
    Custom,
}

impl Mode {
    /// Every mode, in the order they are presented to users.
    pub const ALL: [Mode; 3] = [Mode::PlainText, Mode::StandardMarkdown, Mode::Custom];

    /// Name used on the command line and in configuration files.
    pub fn name(self) -> &'static str {
        match self {
            Mode::PlainText => "plain-text",
            Mode::StandardMarkdown => "standard-markdown",
            Mode::Custom => "custom",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Mode::PlainText => "Plain Text",
            Mode::StandardMarkdown => "Standard Markdown Only",
            Mode::Custom => "Custom",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Mode::PlainText => {
                "Removes XML tags, comments, code blocks and Markdown formatting. Returns pure text."
            }
            Mode::StandardMarkdown => {
                "Removes XML tags (like <Tip>), comments and code but keeps Markdown headers, lists and links."
            }
            Mode::Custom => "Runs only the strip operations you switch on.",
        }
    }

    /// The fixed option set implied by this mode, or `None` for [`Mode::Custom`].
    pub fn preset(self) -> Option<OptionSet> {
        match self {
            Mode::PlainText => Some(OptionSet::all()),
            Mode::StandardMarkdown => Some(OptionSet {
                strip_code_blocks: true,
                strip_xml_html_tags: true,
                strip_comments: true,
                collapse_whitespace: true,
                ..OptionSet::none()
            }),
            Mode::Custom => None,
        }
    }

    /// Resolve the options that actually run. Presets win over `options`.
    pub fn resolve(self, options: &OptionSet) -> OptionSet {
        self.preset().unwrap_or(*options)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown mode or operation name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownNameError {
    pub kind: &'static str,
    pub name: String,
}

impl fmt::Display for UnknownNameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown {}: '{}'", self.kind, self.name)
    }
}

impl std::error::Error for UnknownNameError {}

impl FromStr for Mode {
    type Err = UnknownNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Mode::ALL
            .into_iter()
            .find(|mode| mode.name() == s)
            .ok_or_else(|| UnknownNameError {
                kind: "mode",
                name: s.to_string(),
            })
    }
}

/// A single strip operation that can be switched on or off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    StripMarkdownEmphasis,
    StripHeaders,
    StripLinks,
    StripImages,
    StripHorizontalRules,
    StripCodeBlocks,
    StripXmlHtmlTags,
    StripComments,
    CollapseWhitespace,
}

impl Operation {
    pub const ALL: [Operation; 9] = [
        Operation::StripMarkdownEmphasis,
        Operation::StripHeaders,
        Operation::StripLinks,
        Operation::StripImages,
        Operation::StripHorizontalRules,
        Operation::StripCodeBlocks,
        Operation::StripXmlHtmlTags,
        Operation::StripComments,
        Operation::CollapseWhitespace,
    ];

    /// Field name in [`OptionSet`] and in configuration files.
    pub fn name(self) -> &'static str {
        match self {
            Operation::StripMarkdownEmphasis => "strip_markdown_emphasis",
            Operation::StripHeaders => "strip_headers",
            Operation::StripLinks => "strip_links",
            Operation::StripImages => "strip_images",
            Operation::StripHorizontalRules => "strip_horizontal_rules",
            Operation::StripCodeBlocks => "strip_code_blocks",
            Operation::StripXmlHtmlTags => "strip_xml_html_tags",
            Operation::StripComments => "strip_comments",
            Operation::CollapseWhitespace => "collapse_whitespace",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Operation {
    type Err = UnknownNameError;

    /// Accepts both `strip_links` and `strip-links`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.replace('-', "_");
        Operation::ALL
            .into_iter()
            .find(|op| op.name() == normalized)
            .ok_or_else(|| UnknownNameError {
                kind: "operation",
                name: s.to_string(),
            })
    }
}

/// Which strip operations are enabled.
///
/// Missing fields deserialize as `false`, so a configuration only needs to
/// name the operations it turns on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OptionSet {
    pub strip_markdown_emphasis: bool,
    pub strip_headers: bool,
    pub strip_links: bool,
    pub strip_images: bool,
    pub strip_horizontal_rules: bool,
    pub strip_code_blocks: bool,
    pub strip_xml_html_tags: bool,
    pub strip_comments: bool,
    pub collapse_whitespace: bool,
}

impl OptionSet {
    /// Every operation disabled.
    pub fn none() -> Self {
        OptionSet::default()
    }

    /// Every operation enabled.
    pub fn all() -> Self {
        let mut options = OptionSet::none();
        for op in Operation::ALL {
            options.set(op, true);
        }
        options
    }

    pub fn get(&self, op: Operation) -> bool {
        *self.field(op)
    }

    pub fn set(&mut self, op: Operation, enabled: bool) {
        *self.field_mut(op) = enabled;
    }

    /// Builder-style [`OptionSet::set`].
    pub fn with(mut self, op: Operation, enabled: bool) -> Self {
        self.set(op, enabled);
        self
    }

    /// Enabled operations, in pipeline-independent declaration order.
    pub fn enabled(&self) -> Vec<Operation> {
        Operation::ALL
            .into_iter()
            .filter(|op| self.get(*op))
            .collect()
    }

    fn field(&self, op: Operation) -> &bool {
        match op {
            Operation::StripMarkdownEmphasis => &self.strip_markdown_emphasis,
            Operation::StripHeaders => &self.strip_headers,
            Operation::StripLinks => &self.strip_links,
            Operation::StripImages => &self.strip_images,
            Operation::StripHorizontalRules => &self.strip_horizontal_rules,
            Operation::StripCodeBlocks => &self.strip_code_blocks,
            Operation::StripXmlHtmlTags => &self.strip_xml_html_tags,
            Operation::StripComments => &self.strip_comments,
            Operation::CollapseWhitespace => &self.collapse_whitespace,
        }
    }

    fn field_mut(&mut self, op: Operation) -> &mut bool {
        match op {
            Operation::StripMarkdownEmphasis => &mut self.strip_markdown_emphasis,
            Operation::StripHeaders => &mut self.strip_headers,
            Operation::StripLinks => &mut self.strip_links,
            Operation::StripImages => &mut self.strip_images,
            Operation::StripHorizontalRules => &mut self.strip_horizontal_rules,
            Operation::StripCodeBlocks => &mut self.strip_code_blocks,
            Operation::StripXmlHtmlTags => &mut self.strip_xml_html_tags,
            Operation::StripComments => &mut self.strip_comments,
            Operation::CollapseWhitespace => &mut self.collapse_whitespace,
        }
    }
}
