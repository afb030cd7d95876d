use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse { line: usize, kind: ParseErrorKind },
    #[error("Missing required section: {0}")]
    MissingSection(String),
    #[error("Unexpected end of file while reading {expected}")]
    UnexpectedEof { expected: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    #[error("Invalid integer '{value}'")]
    InvalidInt { value: String },
    #[error("Invalid float '{value}'")]
    InvalidFloat { value: String },
    #[error("Expected at least {expected} columns, found {found}")]
    MissingColumns { expected: usize, found: usize },
}

impl ParseError {
    pub(crate) fn at(line: usize, kind: ParseErrorKind) -> Self {
        Self::Parse { line, kind }
    }

    pub(crate) fn eof(expected: impl Into<String>) -> Self {
        Self::UnexpectedEof {
            expected: expected.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum WriteError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Failed to read coordinate stream: {0}")]
    Coordinates(#[from] ParseError),
    #[error(
        "Coordinate stream declares {declared} atoms but the topology expects {expected}"
    )]
    AtomCountMismatch { declared: usize, expected: usize },
    #[error("Atom mismatch on line {line} of the coordinate stream: found '{found}', expected '{expected}'")]
    SymbolMismatch {
        line: usize,
        found: String,
        expected: String,
    },
    #[error("The system has no coordinate stream to read positions from")]
    MissingCoordinates,
}
