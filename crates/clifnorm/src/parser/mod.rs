//! CLIF parser

pub mod clif;
pub mod sexpr;

use thiserror::Error;

// Re-export main parsing functions and types
pub use clif::{parse_clif, parse_clif_file, ClifDocument};

/// Syntax error in CLIF text, with a 1-based position
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message} at line {line}, column {column}")]
pub struct ParseError {
    pub message: String,
    pub line: usize,
    pub column: usize,
}

impl ParseError {
    /// Error at byte `offset` of `input`
    pub fn at(input: &str, offset: usize, message: impl Into<String>) -> Self {
        let offset = offset.min(input.len());
        let before = input.get(..offset).unwrap_or(input);
        let line = before.matches('\n').count() + 1;
        let column = match before.rfind('\n') {
            Some(newline) => before[newline + 1..].chars().count() + 1,
            None => before.chars().count() + 1,
        };
        ParseError {
            message: message.into(),
            line,
            column,
        }
    }
}
