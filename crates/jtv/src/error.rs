//! JTV decoding error types.

use std::path::PathBuf;

use thiserror::Error;

/// Crate-specific result type.
pub type Result<T> = std::result::Result<T, JtvError>;

/// Byte-level format violations in a `.pdt` or `.ndx` block.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// The title block does not start with the JTV 3.x signature
    #[error("invalid JTV signature")]
    BadMagic,

    /// A length or count field points past the end of the block
    #[error("truncated {context}: need {needed} bytes, {available} available")]
    Truncated {
        context: &'static str,
        needed: usize,
        available: usize,
    },
}

impl FormatError {
    pub(crate) fn truncated(context: &'static str, needed: usize, available: usize) -> Self {
        Self::Truncated {
            context,
            needed,
            available,
        }
    }
}

/// Errors that can occur while converting an archive.
#[derive(Error, Debug)]
pub enum JtvError {
    /// The archive could not be opened or is not a zip container.
    /// `path` is `None` for archives read from memory.
    #[error("cannot open archive{}: {source}", describe_path(.path))]
    ArchiveOpen {
        path: Option<PathBuf>,
        #[source]
        source: zip::result::ZipError,
    },

    /// Reading an entry from an opened archive failed
    #[error("archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// An entry holds malformed JTV data
    #[error("{entry}: {source}")]
    Format {
        entry: String,
        #[source]
        source: FormatError,
    },

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

fn describe_path(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|path| format!(" {}", path.display()))
        .unwrap_or_default()
}

impl JtvError {
    /// Attach the archive entry name to a decoder error.
    pub fn format(entry: impl Into<String>, source: FormatError) -> Self {
        Self::Format {
            entry: entry.into(),
            source,
        }
    }

    /// Returns the underlying format violation, if any.
    pub fn as_format_error(&self) -> Option<&FormatError> {
        match self {
            Self::Format { source, .. } => Some(source),
            _ => None,
        }
    }
}
