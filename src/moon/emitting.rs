//! Emitter
//!
//! Last dumping stage: renders the event stream as text fragments. Each block is one fragment
//! written by its construct hook; consecutive blocks are separated by a fragment holding a single
//! newline, which leaves one blank line between them. Concatenating the fragments gives the
//! document text.

use crate::moon::cursor::Cursor;
use crate::moon::error::{EmitError, Error};
use crate::moon::event::{Event, EventKind};
use crate::moon::hooks::HookRegistry;

const SEPARATOR: &str = "\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Start,
    Construct,
    Separator,
    Finished,
}

pub struct Emitter<'a> {
    events: Cursor<'a, Event>,
    registry: &'a HookRegistry,
    state: State,
}

impl<'a> Emitter<'a> {
    pub fn new(events: Cursor<'a, Event>, registry: &'a HookRegistry) -> Self {
        Emitter {
            events,
            registry,
            state: State::Start,
        }
    }

    fn construct(&mut self) -> Result<String, Error> {
        let start = self
            .events
            .read()?
            .cloned()
            .ok_or(EmitError::PrematureEnd)?;
        let hook = self
            .registry
            .construct(start.text())
            .ok_or_else(|| EmitError::UnknownConstruct(start.text().to_string()))?;

        let mut text = String::new();
        hook.emit(&mut self.events, &mut text)?;

        self.state = match self.events.peek()? {
            Some(event) if event.is(EventKind::ConstructStart) => State::Separator,
            Some(event) if event.is(EventKind::DocumentEnd) => State::Finished,
            Some(event) => return Err(EmitError::UnexpectedEvent(event.to_string()).into()),
            None => return Err(EmitError::PrematureEnd.into()),
        };
        Ok(text)
    }

    fn step(&mut self) -> Result<Option<String>, Error> {
        loop {
            match self.state {
                State::Finished => return Ok(None),
                State::Start => {
                    let event = self.events.read()?.ok_or(EmitError::PrematureEnd)?;
                    self.state = match event.kind {
                        EventKind::DocumentEnd => State::Finished,
                        EventKind::ConstructStart => State::Construct,
                        _ => return Err(EmitError::UnexpectedEvent(event.to_string()).into()),
                    };
                }
                State::Construct => return self.construct().map(Some),
                State::Separator => {
                    self.events.advance()?;
                    self.state = State::Construct;
                    return Ok(Some(SEPARATOR.to_string()));
                }
            }
        }
    }
}

impl Iterator for Emitter<'_> {
    type Item = Result<String, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        let result = self.step();
        if result.is_err() {
            self.state = State::Finished;
        }
        result.transpose()
    }
}

impl std::iter::FusedIterator for Emitter<'_> {}
