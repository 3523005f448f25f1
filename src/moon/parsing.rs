//! Event parser
//!
//! Turns the token stream into structural events. The top level only knows how blocks start:
//! blank lines, whitespace and comments are skipped, a word must name a registered construct,
//! and the end of input closes the document. The interior of each block is produced by the
//! construct's own [`ConstructParser`], pulled one event at a time.

use crate::moon::cursor::Cursor;
use crate::moon::error::{Error, ParseError};
use crate::moon::event::Event;
use crate::moon::hooks::{ConstructParser, HookRegistry};
use crate::moon::token::{Token, TokenKind};

enum State {
    TopLevel,
    Interior {
        name: String,
        parser: Box<dyn ConstructParser>,
    },
    Finished,
}

pub struct EventParser<'a> {
    tokens: Cursor<'a, Token>,
    registry: &'a HookRegistry,
    state: State,
}

impl<'a> EventParser<'a> {
    pub fn new(tokens: Cursor<'a, Token>, registry: &'a HookRegistry) -> Self {
        EventParser {
            tokens,
            registry,
            state: State::TopLevel,
        }
    }

    fn top_level(&mut self) -> Result<Event, Error> {
        loop {
            let token = self
                .tokens
                .read()?
                .cloned()
                .ok_or(ParseError::UnexpectedEof)?;

            match token.kind {
                TokenKind::Space | TokenKind::Tab | TokenKind::Newline | TokenKind::Comment => {
                    self.tokens.advance()?;
                }
                TokenKind::Eof => {
                    self.state = State::Finished;
                    return Ok(Event::document_end());
                }
                TokenKind::Word => {
                    let Some(hook) = self.registry.construct(&token.text) else {
                        return Err(ParseError::UnknownConstruct {
                            name: token.text,
                            line: token.line,
                            column: token.column,
                        }
                        .into());
                    };
                    tracing::debug!(construct = %token.text, line = token.line, "construct start");
                    self.state = State::Interior {
                        name: token.text.clone(),
                        parser: hook.parser(),
                    };
                    return Ok(Event::construct_start(token.text));
                }
                _ => return Err(ParseError::unexpected(&token, "construct name").into()),
            }
        }
    }

    fn step(&mut self) -> Result<Option<Event>, Error> {
        match &mut self.state {
            State::Finished => Ok(None),
            State::TopLevel => self.top_level().map(Some),
            State::Interior { name, parser } => {
                match parser.next_event(&mut self.tokens, self.registry)? {
                    Some(event) => Ok(Some(event)),
                    None => {
                        let end = Event::construct_end(std::mem::take(name));
                        self.state = State::TopLevel;
                        Ok(Some(end))
                    }
                }
            }
        }
    }
}

impl Iterator for EventParser<'_> {
    type Item = Result<Event, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        let result = self.step();
        if result.is_err() {
            self.state = State::Finished;
        }
        result.transpose()
    }
}

impl std::iter::FusedIterator for EventParser<'_> {}
