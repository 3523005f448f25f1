//! Lexer
//!
//!     Turns raw document text into a lazy stream of [`Token`]s. This is the first stage of
//!     loading a MOON document.
//!
//! Normalization
//!
//!     Before scanning, the text is normalized:
//!         1. Leading whitespace is stripped. If nothing is left the input is rejected.
//!         2. A leading byte-order mark is removed.
//!         3. CRLF and bare CR line endings become LF.
//!
//!     Token positions refer to the normalized text.
//!
//! Scanning
//!
//!     Raw scanning is delegated to logos, see [base_tokenization]. This module wraps it into an
//!     iterator that tracks positions (1-based character offset, line and column) and terminates
//!     the stream with exactly one end-of-input token, which carries an empty literal and sits one
//!     character past the last character of the text.

pub mod base_tokenization;

use crate::moon::error::{Error, LexError};
use crate::moon::token::{Token, TokenKind};
use base_tokenization::RawToken;
use logos::Logos;

const BOM: char = '\u{feff}';

/// Normalize raw document text, see the module docs.
pub fn normalize(raw: &str) -> Result<String, LexError> {
    let stripped = raw.trim_start();
    if stripped.is_empty() {
        return Err(LexError::EmptyInput);
    }

    let stripped = stripped.strip_prefix(BOM).unwrap_or(stripped);

    Ok(stripped.replace("\r\n", "\n").replace('\r', "\n"))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Position {
    offset: usize,
    line: usize,
    column: usize,
}

impl Position {
    fn start() -> Self {
        Position {
            offset: 1,
            line: 1,
            column: 1,
        }
    }

    fn advance_over(&mut self, text: &str) {
        for ch in text.chars() {
            self.offset += 1;
            if ch == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
    }
}

/// Lazy token stream over a normalized copy of the document.
#[derive(Debug)]
pub struct Lexer {
    source: String,
    byte: usize,
    position: Position,
    finished: bool,
}

impl Lexer {
    pub fn new(text: &str) -> Result<Self, Error> {
        Ok(Lexer {
            source: normalize(text)?,
            byte: 0,
            position: Position::start(),
            finished: false,
        })
    }

    fn token(&self, start: Position, kind: TokenKind, text: &str) -> Token {
        Token::new(start.offset, start.line, start.column, kind, text)
    }
}

impl Iterator for Lexer {
    type Item = Result<Token, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let start = self.position;
        let rest = &self.source[self.byte..];
        let mut raw = RawToken::lexer(rest);

        let Some(result) = raw.next() else {
            self.finished = true;
            return Some(Ok(self.token(start, TokenKind::Eof, "")));
        };

        match result {
            Ok(kind) => {
                let text = raw.slice();
                let token = Token::new(start.offset, start.line, start.column, kind.into(), text);
                self.byte += raw.span().end;
                self.position.advance_over(text);
                tracing::trace!(%token, "lexed");
                Some(Ok(token))
            }
            Err(()) => {
                self.finished = true;
                Some(Err(LexError::UnrecognizedInput {
                    line: start.line,
                    column: start.column,
                }
                .into()))
            }
        }
    }
}

impl std::iter::FusedIterator for Lexer {}

/// Tokenize a whole document eagerly.
pub fn tokenize(text: &str) -> Result<Vec<Token>, Error> {
    Lexer::new(text)?.collect()
}
