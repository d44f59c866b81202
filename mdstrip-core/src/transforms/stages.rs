//! Individual strip stages
//!
//! This module contains the individual stages that can be composed into pipelines.
//! Each stage implements `Runnable<String, String>` and only ever deletes
//! characters: a stage returns either its input unchanged or something
//! strictly shorter.
//!
//! Every stage finishes in a single left-to-right pass over its input.

pub mod code;
pub mod comments;
pub mod markdown;
pub mod tags;
pub mod whitespace;

pub use code::StripCodeBlocks;
pub use comments::StripComments;
pub use markdown::StripMarkdown;
pub use tags::StripTags;
pub use whitespace::CollapseWhitespace;
