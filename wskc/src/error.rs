// error.rs

use crate::token::Token;
use thiserror::Error;

/// Unified compiler error. Every failure propagates up to the CLI
/// boundary, which reports it and exits non-zero.
#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("[line {line}] Error: Unexpected character '{ch}'.")]
    UnexpectedChar { line: usize, ch: char },

    #[error("[line {line}] Error: Unterminated string.")]
    UnterminatedString { line: usize },

    #[error("[line {line}] Error at '{lexeme}': {message}")]
    Syntax {
        line: usize,
        lexeme: String,
        message: &'static str,
    },

    #[error("Unexpected end of file")]
    UnexpectedEof,
}

impl Error {
    pub fn syntax(token: &Token, message: &'static str) -> Self {
        Error::Syntax {
            line: token.line,
            lexeme: token.lexeme.clone(),
            message,
        }
    }
}
