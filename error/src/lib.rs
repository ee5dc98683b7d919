//! Underlying error types used over ckb-rosetta crates.
//!
//! Every failure surfaced by the Rosetta API is an [`Error`]: an [`ErrorKind`] from the static
//! taxonomy below plus optional details describing the concrete cause. The taxonomy itself is
//! immutable data; it is also served verbatim by `/network/options`.

mod kind;
pub mod util;

pub use kind::ErrorKind;

use std::fmt;

/// The error value returned by every fallible operation of the adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    kind: ErrorKind,
    details: Option<String>,
}

impl Error {
    /// Returns the taxonomy entry of this error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the attached cause, if any.
    pub fn details(&self) -> Option<&str> {
        self.details.as_deref()
    }

    /// Shortcut of `self.kind().code()`.
    pub fn code(&self) -> i32 {
        self.kind.code()
    }

    /// Shortcut of `self.kind().retriable()`.
    pub fn retriable(&self) -> bool {
        self.kind.retriable()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.details {
            Some(ref details) => write!(f, "{}: {}", self.kind, details),
            None => write!(f, "{}", self.kind),
        }
    }
}

impl std::error::Error for Error {}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Error {
            kind,
            details: None,
        }
    }
}

impl ErrorKind {
    /// Creates an error of this kind with the upstream cause attached as details.
    pub fn reason<S: fmt::Display>(self, reason: S) -> Error {
        Error {
            kind: self,
            details: Some(reason.to_string()),
        }
    }
}
