//! # mdstrip-core
//!
//! Strips formatting out of text bound for a language model prompt: HTML/XML
//! tags, comments, code, Markdown syntax, links. Less formatting means fewer
//! tokens for the same meaning.
//!
//! ```rust,ignore
//! use mdstrip_core::{clean, Mode, OptionSet};
//!
//! let text = clean("<Tip>**Use** `npm`</Tip>", Mode::PlainText, &OptionSet::none())?;
//! assert_eq!(text, "Use");
//! ```
//!
//! ## Layout
//!
//! - [`mode`]: modes, option sets and the preset lookup
//! - [`transforms`]: the stage pipeline (`Runnable`, `Transform`, stages)
//! - [`cleaner`]: the `clean` entry point and the reusable [`Cleaner`]
//! - [`report`]: size reduction numbers
//! - [`loader`]: reading documents from files, readers and strings

pub mod cleaner;
pub mod loader;
pub mod mode;
pub mod report;
pub mod transforms;

pub use cleaner::{clean, CleanError, Cleaner, DEFAULT_MAX_INPUT_BYTES, MAX_PASSES};
pub use loader::{DocumentLoader, LoaderError};
pub use mode::{Mode, Operation, OptionSet, UnknownNameError};
pub use report::CleanReport;
pub use transforms::stages::whitespace::collapse_whitespace;
