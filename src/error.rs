//! Structured error types for the composer.
//!
//! Errors are layered the way the pipeline is: a [`PathError`] describes what
//! went wrong inside one path-data string, an [`IconError`] says which part of
//! one SVG document was unusable, and a [`ComposeError`] names the icon (base
//! or overlay) the problem came from.

use std::fmt;

use thiserror::Error;

/// A grammar violation inside a path-data string.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PathError {
    /// The text could not be split into commands and numbers.
    #[error("malformed path data at offset {offset}: {reason}")]
    MalformedPathData { offset: usize, reason: String },
    /// A command ran out of operands before the string ended.
    #[error("path data ended early: '{command}' needs {expected} numbers")]
    TruncatedPathData { command: char, expected: usize },
    /// A letter that is not a path command.
    #[error("unsupported path command '{0}'")]
    UnsupportedPathCommand(char),
}

/// Why a single SVG document could not be turned into a `ParsedIcon`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum IconError {
    #[error("invalid viewBox: {0}")]
    InvalidViewBox(String),
    #[error("no <path> elements found")]
    NoPathElements,
    #[error("XML error: {0}")]
    Xml(String),
    #[error("path #{index}: {source}")]
    Path {
        index: usize,
        #[source]
        source: PathError,
    },
}

/// Which of the two input icons an error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconRole {
    Base,
    Overlay,
}

impl fmt::Display for IconRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IconRole::Base => write!(f, "base"),
            IconRole::Overlay => write!(f, "overlay"),
        }
    }
}

/// The unified error type returned by the public compose API.
#[derive(Debug, Error)]
pub enum ComposeError {
    /// One of the input documents failed to parse.
    #[error("{role} icon: {source}")]
    Icon {
        role: IconRole,
        #[source]
        source: IconError,
    },
    /// A user-supplied option is out of range. Raised before any geometry work.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
    /// The JSON options file could not be read as `ComposeOptions`.
    #[error("failed to parse options: {0}")]
    Config(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ComposeError {
    pub(crate) fn icon(role: IconRole) -> impl FnOnce(IconError) -> ComposeError {
        move |source| ComposeError::Icon { role, source }
    }
}

/// A failure inside the polygon-boolean capability. Never fatal: the
/// composer reports it as a notice and falls back to the even-odd cut-out.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("polygon operation failed: {0}")]
    Operation(String),
    #[error(transparent)]
    Path(#[from] PathError),
}
