//! Standard pipeline assembly
//!
//! [`build_pipeline`] turns an [`OptionSet`] into a `Transform<String, String>`
//! that runs the enabled stages in [`PIPELINE_ORDER`]. Tags and comments go
//! first and whitespace last, so no stage wastes time on text an earlier
//! stage already removed. The two preset pipelines are built once and shared
//! as statics.

use crate::mode::{Mode, Operation, OptionSet};
use crate::transforms::stages::{
    CollapseWhitespace, StripCodeBlocks, StripComments, StripMarkdown, StripTags,
};
use crate::transforms::Transform;
use once_cell::sync::Lazy;

/// Type alias for a text cleaning transform
pub type TextTransform = Transform<String, String>;

/// Order in which enabled operations run.
pub const PIPELINE_ORDER: [Operation; 9] = [
    Operation::StripComments,
    Operation::StripXmlHtmlTags,
    Operation::StripCodeBlocks,
    Operation::StripHeaders,
    Operation::StripHorizontalRules,
    Operation::StripMarkdownEmphasis,
    Operation::StripImages,
    Operation::StripLinks,
    Operation::CollapseWhitespace,
];

/// Enabled operations of `options`, in the order they run.
pub fn stage_plan(options: &OptionSet) -> Vec<Operation> {
    PIPELINE_ORDER
        .into_iter()
        .filter(|op| options.get(*op))
        .collect()
}

/// Build the pipeline for `options`. With nothing enabled it is the identity.
///
/// The five Markdown operations sit next to each other in [`PIPELINE_ORDER`]
/// and share one [`StripMarkdown`] stage.
pub fn build_pipeline(options: &OptionSet) -> TextTransform {
    let plan = stage_plan(options);
    log::debug!(
        "building pipeline: [{}]",
        plan.iter()
            .map(|op| op.name())
            .collect::<Vec<_>>()
            .join(", ")
    );

    let mut pipeline: TextTransform = Transform::from_fn(|text: String| text);
    let mut markdown_added = false;
    for op in plan {
        pipeline = match op {
            Operation::StripComments => pipeline.then(StripComments::new()),
            Operation::StripXmlHtmlTags => pipeline.then(StripTags::new()),
            Operation::StripCodeBlocks => pipeline.then(StripCodeBlocks::new()),
            Operation::CollapseWhitespace => pipeline.then(CollapseWhitespace::new()),
            _ if markdown_added => pipeline,
            _ => {
                markdown_added = true;
                pipeline.then(StripMarkdown::from_options(options))
            }
        };
    }
    pipeline
}

/// Every stage: the `plain-text` mode.
pub static PLAIN_TEXT: Lazy<TextTransform> =
    Lazy::new(|| build_pipeline(&OptionSet::all()));

/// Tags, comments, code and whitespace: the `standard-markdown` mode.
pub static STANDARD_MARKDOWN: Lazy<TextTransform> = Lazy::new(|| {
    let options = Mode::StandardMarkdown.preset().unwrap_or_default();
    build_pipeline(&options)
});
