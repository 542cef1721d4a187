//! Error types for the bowl builder.
//!
//! None of these are fatal inside a running session: bad colors fall back to
//! white text, storage failures are logged, and input/session errors become
//! a status line.

use std::io;
use std::path::PathBuf;

/// A display color that is not a `#RRGGBB` string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ColorError {
    #[error("color {0:?} does not start with '#'")]
    MissingHash(String),

    #[error("color {0:?} must have exactly six hex digits")]
    BadLength(String),

    #[error("color {0:?} contains a non-hex digit")]
    NotHex(String),
}

/// Durable storage failures.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage io error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("storage file {path} is not a JSON object of strings: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode order: {0}")]
    Encode(#[from] serde_json::Error),
}

/// A command line typed by the user that could not be understood.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("empty input")]
    Empty,

    #[error("unrecognized command {0:?}, type ? for help")]
    Unrecognized(String),

    #[error("{0:?} is not a number")]
    BadNumber(String),

    #[error("numbers start at 1")]
    ZeroIndex,

    #[error("unknown category {0:?}")]
    UnknownCategory(String),
}

/// A well-formed command that does not apply in the current state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("no menu item #{0}")]
    NoSuchItem(usize),

    #[error("no order line #{0}")]
    NoSuchLine(usize),

    #[error("choose a portion (l/n/h) or cancel first")]
    ModalOpen,

    #[error("nothing is waiting for a portion")]
    NoPendingChoice,
}
