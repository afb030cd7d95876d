use super::error::{ParseError, ParseErrorKind};
use std::io::BufRead;
use std::str::FromStr;

/// Line-by-line reader that remembers the 1-based number of the last line returned.
pub(crate) struct LineReader<'a, R> {
    inner: &'a mut R,
    line: usize,
}

impl<'a, R: BufRead> LineReader<'a, R> {
    pub fn new(inner: &'a mut R) -> Self {
        Self { inner, line: 0 }
    }

    /// Number of the most recently returned line; 0 before the first read.
    pub fn line(&self) -> usize {
        self.line
    }

    /// Next line without its terminator, or `None` at end of input.
    pub fn next_line(&mut self) -> Result<Option<String>, ParseError> {
        let mut buf = String::new();
        if self.inner.read_line(&mut buf)? == 0 {
            return Ok(None);
        }
        self.line += 1;
        let trimmed = buf.trim_end_matches(['\n', '\r']).len();
        buf.truncate(trimmed);
        Ok(Some(buf))
    }

    /// Like [`next_line`](Self::next_line), treating end of input as an error.
    pub fn expect_line(&mut self, expected: &str) -> Result<String, ParseError> {
        self.next_line()?.ok_or_else(|| ParseError::eof(expected))
    }

    pub fn skip(&mut self, count: usize) -> Result<(), ParseError> {
        for _ in 0..count {
            if self.next_line()?.is_none() {
                break;
            }
        }
        Ok(())
    }
}

/// Whitespace-separated tokens of a line, checked for a minimum column count.
pub(crate) fn columns(line: &str, line_num: usize, expected: usize) -> Result<Vec<&str>, ParseError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() < expected {
        return Err(ParseError::at(
            line_num,
            ParseErrorKind::MissingColumns {
                expected,
                found: tokens.len(),
            },
        ));
    }
    Ok(tokens)
}

pub(crate) fn parse_int<T: FromStr>(value: &str, line_num: usize) -> Result<T, ParseError> {
    value.parse().map_err(|_| {
        ParseError::at(
            line_num,
            ParseErrorKind::InvalidInt {
                value: value.to_string(),
            },
        )
    })
}

pub(crate) fn parse_float(value: &str, line_num: usize) -> Result<f64, ParseError> {
    value.parse().map_err(|_| {
        ParseError::at(
            line_num,
            ParseErrorKind::InvalidFloat {
                value: value.to_string(),
            },
        )
    })
}
