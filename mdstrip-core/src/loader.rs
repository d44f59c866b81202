//! Document loading utilities
//!
//! `DocumentLoader` reads source text from a file, a reader or a string and
//! runs a cleaner or a raw transform over it. The CLI and the tests share it.
//!
//! ```rust,ignore
//! let cleaner = Cleaner::new(Mode::PlainText, &OptionSet::none());
//! let text = DocumentLoader::from_path("prompt.md")?.clean(&cleaner)?;
//! ```
//!
//! Reads are bounded. `from_path` and `from_reader` stop at
//! [`DEFAULT_MAX_INPUT_BYTES`]; the `*_with_limit` variants take the limit of
//! the cleaner that will run, so an oversized input is rejected before it is
//! held in memory.

use crate::cleaner::{CleanError, Cleaner, DEFAULT_MAX_INPUT_BYTES};
use crate::report::CleanReport;
use crate::transforms::Transform;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Error that can occur when loading documents
#[derive(Debug, Clone)]
pub enum LoaderError {
    /// IO error when reading the source
    IoError(String),
    /// A reader produced more than the byte limit
    InputTooLarge { limit: usize },
    /// Cleaning rejected the document
    CleanError(CleanError),
}

impl std::fmt::Display for LoaderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoaderError::IoError(msg) => write!(f, "IO error: {}", msg),
            LoaderError::InputTooLarge { limit } => {
                write!(f, "Input too large: more than {} bytes", limit)
            }
            LoaderError::CleanError(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for LoaderError {}

impl From<std::io::Error> for LoaderError {
    fn from(err: std::io::Error) -> Self {
        LoaderError::IoError(err.to_string())
    }
}

impl From<CleanError> for LoaderError {
    fn from(err: CleanError) -> Self {
        LoaderError::CleanError(err)
    }
}

/// Source text plus cleaning shortcuts
#[derive(Debug, Clone)]
pub struct DocumentLoader {
    source: String,
}

impl DocumentLoader {
    /// Load from a file path
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, LoaderError> {
        Self::from_path_with_limit(path, DEFAULT_MAX_INPUT_BYTES)
    }

    /// Load from a file path, refusing files larger than `limit` bytes.
    ///
    /// The file size is checked before anything is read.
    pub fn from_path_with_limit<P: AsRef<Path>>(
        path: P,
        limit: usize,
    ) -> Result<Self, LoaderError> {
        let file = File::open(path)?;
        let len = file.metadata()?.len();
        if len > limit as u64 {
            return Err(CleanError::InputTooLarge {
                len: usize::try_from(len).unwrap_or(usize::MAX),
                limit,
            }
            .into());
        }
        Self::from_reader_with_limit(file, limit)
    }

    /// Load everything a reader yields, typically stdin
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, LoaderError> {
        Self::from_reader_with_limit(reader, DEFAULT_MAX_INPUT_BYTES)
    }

    /// Load what a reader yields, failing once it goes past `limit` bytes.
    pub fn from_reader_with_limit<R: Read>(
        reader: R,
        limit: usize,
    ) -> Result<Self, LoaderError> {
        let mut bytes = Vec::new();
        reader
            .take((limit as u64).saturating_add(1))
            .read_to_end(&mut bytes)?;
        if bytes.len() > limit {
            log::warn!("input exceeds the limit of {} bytes", limit);
            return Err(LoaderError::InputTooLarge { limit });
        }

        let source = String::from_utf8(bytes)
            .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))?;
        Ok(DocumentLoader { source })
    }

    /// Load from a string
    pub fn from_string<S: Into<String>>(source: S) -> Self {
        DocumentLoader {
            source: source.into(),
        }
    }

    /// Run a raw transform on the source, bypassing size checks
    pub fn with<O: 'static>(&self, transform: &Transform<String, O>) -> O {
        transform.run(self.source.clone())
    }

    /// Clean the source
    pub fn clean(&self, cleaner: &Cleaner) -> Result<String, LoaderError> {
        Ok(cleaner.clean(&self.source)?)
    }

    /// Clean the source and report the reduction
    pub fn clean_with_report(
        &self,
        cleaner: &Cleaner,
    ) -> Result<(String, CleanReport), LoaderError> {
        Ok(cleaner.clean_with_report(&self.source)?)
    }

    /// Get the raw source string
    pub fn source(&self) -> &str {
        &self.source
    }
}
