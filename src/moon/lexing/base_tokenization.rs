//! Base tokenization implementation for the moon lexer
//!
//! Raw scanning is done entirely by logos. The patterns encode the word rule of the format: a
//! word runs until one of the single-character tokens (space, tab, newline, comma, colon, single
//! or double quote). A `/` only starts a comment when a token starts with it and the next
//! character is `/` or `*`; anywhere else it is an ordinary word character, so `a//b` is a word.

use crate::moon::token::TokenKind;
use logos::Logos;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawToken {
    #[token(" ")]
    Space,

    #[token("\t")]
    Tab,

    #[token("\n")]
    Newline,

    #[token(",")]
    Comma,

    #[token(":")]
    Colon,

    #[token("'")]
    Quote,

    #[token("\"")]
    DoubleQuote,

    // `// ...` up to, not including, the newline
    #[regex(r"//[^\n]*")]
    LineComment,

    // `/* ... */` including the closing marker
    #[token("/*", block_comment)]
    BlockComment,

    #[regex(r#"[^ \t\n,:'"/][^ \t\n,:'"]*"#)]
    #[regex(r#"/([^ \t\n,:'"/*][^ \t\n,:'"]*)?"#)]
    Word,
}

/// Extends a `/*` match through the first `*/`, or to the end of input when it is never closed.
fn block_comment(lex: &mut logos::Lexer<RawToken>) -> bool {
    let end = match lex.remainder().find("*/") {
        Some(end) => end + 2,
        None => lex.remainder().len(),
    };
    lex.bump(end);
    true
}

impl From<RawToken> for TokenKind {
    fn from(raw: RawToken) -> Self {
        match raw {
            RawToken::Space => TokenKind::Space,
            RawToken::Tab => TokenKind::Tab,
            RawToken::Newline => TokenKind::Newline,
            RawToken::Comma => TokenKind::Comma,
            RawToken::Colon => TokenKind::Colon,
            RawToken::Quote => TokenKind::Quote,
            RawToken::DoubleQuote => TokenKind::DoubleQuote,
            RawToken::LineComment | RawToken::BlockComment => TokenKind::Comment,
            RawToken::Word => TokenKind::Word,
        }
    }
}
