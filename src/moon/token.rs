//! Lexical tokens
//!
//! A token is the smallest unit the lexer hands to the event parser. Every token carries the
//! position of its first character: a 1-based character offset into the normalized source, a
//! 1-based line and a 1-based column.

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    Eof,
    Tab,
    Space,
    Newline,
    Word,
    Comment,
    Comma,
    Colon,
    Quote,
    DoubleQuote,
}

impl TokenKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Eof => "eof",
            TokenKind::Tab => "tab",
            TokenKind::Space => "space",
            TokenKind::Newline => "newline",
            TokenKind::Word => "word",
            TokenKind::Comment => "comment",
            TokenKind::Comma => "comma",
            TokenKind::Colon => "colon",
            TokenKind::Quote => "quote",
            TokenKind::DoubleQuote => "d_quote",
        }
    }

    /// Space or tab.
    pub fn is_blank(&self) -> bool {
        matches!(self, TokenKind::Space | TokenKind::Tab)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub offset: usize,
    pub line: usize,
    pub column: usize,
    pub kind: TokenKind,
    pub text: String,
}

impl Token {
    pub fn new(
        offset: usize,
        line: usize,
        column: usize,
        kind: TokenKind,
        text: impl Into<String>,
    ) -> Self {
        Token {
            offset,
            line,
            column,
            kind,
            text: text.into(),
        }
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<Token '{}' type: '{}' at line {} column {}>",
            self.text.escape_debug(),
            self.kind.as_str(),
            self.line,
            self.column
        )
    }
}
