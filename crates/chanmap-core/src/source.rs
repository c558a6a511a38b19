//! Logical line reader for map files.
//!
//! `#` starts a comment that runs to end of line. Lines that are empty once
//! the comment and surrounding whitespace are removed are skipped. The same
//! filtering applies to header and data lines.

use std::{
    io::{self, BufRead},
    str::SplitWhitespace,
};

/// Remove a trailing `#` comment and surrounding whitespace.
#[must_use]
pub fn strip_comment(raw: &str) -> &str {
    let body = match raw.find('#') {
        Some(at) => &raw[..at],
        None => raw,
    };

    body.trim()
}

///
/// LogicalLine
/// A retained (non-comment, non-blank) line and its 1-based physical line number.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LogicalLine {
    pub number: usize,
    pub text: String,
}

impl LogicalLine {
    /// Whitespace-separated tokens of the line.
    pub fn tokens(&self) -> SplitWhitespace<'_> {
        self.text.split_whitespace()
    }
}

///
/// LogicalLines
///

pub struct LogicalLines<R> {
    lines: io::Lines<R>,
    number: usize,
}

impl<R: BufRead> LogicalLines<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            number: 0,
        }
    }

    /// Physical line number of the last line read, retained or not.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.number
    }
}

impl<R: BufRead> Iterator for LogicalLines<R> {
    type Item = io::Result<LogicalLine>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let raw = match self.lines.next()? {
                Ok(raw) => raw,
                Err(err) => return Some(Err(err)),
            };
            self.number += 1;

            let text = strip_comment(&raw);
            if text.is_empty() {
                continue;
            }

            return Some(Ok(LogicalLine {
                number: self.number,
                text: text.to_string(),
            }));
        }
    }
}
