//! Error enum
use std::fmt;
use std::io;

#[derive(Debug)]
pub enum Error {
    /// A CSV row with the wrong column count, or a small column
    /// outside its allowed value set.
    BadRecord { row: u64, cause: String },
    /// A `)` with no matching `(`, or a nested `(`, in a town being
    /// expanded. The grammar is flat.
    UnbalancedParens { row: u64 },
    /// End of input while a continuation run was still open.
    IncompleteEntry,
    /// The underlying reader failed.
    UnderlyingIO { cause: io::Error },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::BadRecord { row, cause } => write!(f, "bad record at row {}: {}", row, cause),
            Error::UnbalancedParens { row } => {
                write!(f, "unbalanced parentheses in town at row {}", row)
            }
            Error::IncompleteEntry => write!(f, "incomplete entry at end of input"),
            Error::UnderlyingIO { cause } => write!(f, "read error: {}", cause),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::UnderlyingIO { cause } => Some(cause),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Error {
        Error::UnderlyingIO { cause: e }
    }
}

impl From<csv::Error> for Error {
    fn from(e: csv::Error) -> Error {
        let row = e.position().map_or(0, |p| p.line());
        let cause = e.to_string();
        match e.into_kind() {
            csv::ErrorKind::Io(inner) => Error::UnderlyingIO { cause: inner },
            _ => Error::BadRecord { row, cause },
        }
    }
}
