//! The `@object` construct
//!
//! Grammar:
//!
//! ```text
//! @object <identifier>
//!     <key>: <value>
//!     <key>: <value>
//! ```
//!
//! The identifier is the first word after the construct name, on the same line. Every following
//! word starts a field: optional blanks, a colon, then raw text up to the end of the line or a
//! comment, trimmed. Indentation is not significant when reading; emitted text always indents
//! fields by four spaces.
//!
//! There is no closing delimiter. The block ends at end of input or at the first word that is a
//! registered construct name, which then starts the next block.
//!
//! An object maps to a `Value::Object` of field name to resolved scalar.

use crate::moon::ast::{ConstructNode, KeyValueNode, Node};
use crate::moon::cursor::Cursor;
use crate::moon::error::{
    ComposeError, ConstructError, EmitError, Error, ParseError, RepresentError, SerializeError,
};
use crate::moon::event::{Event, EventKind};
use crate::moon::hooks::{ConstructHook, ConstructParser, HookRegistry};
use crate::moon::token::{Token, TokenKind};
use crate::moon::value::{Map, Value, ValueKind};

const NAME: &str = "@object";
const INDENT: &str = "    ";

#[derive(Debug, Clone, Copy, Default)]
pub struct ObjectHook;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    Identifier,
    Fields,
    Value,
    Done,
}

/// Parse routine for one object block.
#[derive(Debug)]
pub struct ObjectParser {
    state: ParseState,
}

fn current(tokens: &mut Cursor<'_, Token>) -> Result<Token, Error> {
    tokens
        .read()?
        .cloned()
        .ok_or_else(|| ParseError::UnexpectedEof.into())
}

fn next_token(tokens: &mut Cursor<'_, Token>) -> Result<Token, Error> {
    tokens
        .advance()?
        .cloned()
        .ok_or_else(|| ParseError::UnexpectedEof.into())
}

/// First token at or after the cursor that is not skipped.
fn skip_while(
    tokens: &mut Cursor<'_, Token>,
    skip: impl Fn(TokenKind) -> bool,
) -> Result<Token, Error> {
    let mut token = current(tokens)?;
    while skip(token.kind) {
        token = next_token(tokens)?;
    }
    Ok(token)
}

impl ObjectParser {
    pub fn new() -> Self {
        ObjectParser {
            state: ParseState::Identifier,
        }
    }

    fn identifier(&mut self, tokens: &mut Cursor<'_, Token>) -> Result<Event, Error> {
        next_token(tokens)?;
        let token = skip_while(tokens, |kind| kind.is_blank() || kind == TokenKind::Comment)?;
        if !token.is(TokenKind::Word) {
            return Err(ParseError::unexpected(&token, "identifier").into());
        }

        next_token(tokens)?;
        self.state = ParseState::Fields;
        Ok(Event::identifier(token.text))
    }

    fn field(
        &mut self,
        tokens: &mut Cursor<'_, Token>,
        registry: &HookRegistry,
    ) -> Result<Option<Event>, Error> {
        let token = skip_while(tokens, |kind| {
            kind.is_blank() || matches!(kind, TokenKind::Newline | TokenKind::Comment)
        })?;

        match token.kind {
            TokenKind::Eof => Ok(None),
            TokenKind::Word if registry.has(&token.text) => Ok(None),
            TokenKind::Word => {
                self.state = ParseState::Value;
                Ok(Some(Event::key(token.text)))
            }
            _ => Err(ParseError::unexpected(&token, "field key").into()),
        }
    }

    fn value(&mut self, tokens: &mut Cursor<'_, Token>) -> Result<Event, Error> {
        next_token(tokens)?;
        let colon = skip_while(tokens, |kind| kind.is_blank())?;
        if !colon.is(TokenKind::Colon) {
            return Err(ParseError::unexpected(&colon, "':'").into());
        }

        let mut text = String::new();
        let mut token = next_token(tokens)?;
        while !matches!(
            token.kind,
            TokenKind::Newline | TokenKind::Comment | TokenKind::Eof
        ) {
            text.push_str(&token.text);
            token = next_token(tokens)?;
        }

        self.state = ParseState::Fields;
        Ok(Event::value(text.trim()))
    }
}

impl Default for ObjectParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ConstructParser for ObjectParser {
    fn next_event(
        &mut self,
        tokens: &mut Cursor<'_, Token>,
        registry: &HookRegistry,
    ) -> Result<Option<Event>, Error> {
        let event = match self.state {
            ParseState::Identifier => Some(self.identifier(tokens)?),
            ParseState::Fields => self.field(tokens, registry)?,
            ParseState::Value => Some(self.value(tokens)?),
            ParseState::Done => None,
        };
        if event.is_none() {
            self.state = ParseState::Done;
        }
        Ok(event)
    }
}

/// Next event or the given end-of-stream error.
fn advance_event<E: Into<Error>>(
    events: &mut Cursor<'_, Event>,
    end: impl FnOnce() -> E,
) -> Result<Event, Error> {
    match events.advance()? {
        Some(event) => Ok(event.clone()),
        None => Err(end().into()),
    }
}

impl ConstructHook for ObjectHook {
    fn name(&self) -> &str {
        NAME
    }

    fn represents(&self) -> &[ValueKind] {
        &[ValueKind::Object]
    }

    fn parser(&self) -> Box<dyn ConstructParser> {
        Box::new(ObjectParser::new())
    }

    fn compose(&self, events: &mut Cursor<'_, Event>) -> Result<ConstructNode, Error> {
        let identifier = advance_event(events, || ComposeError::UnexpectedEnd)?;
        if !identifier.is(EventKind::Identifier) {
            return Err(ComposeError::UnexpectedEvent {
                found: identifier.to_string(),
                expected: "identifier",
            }
            .into());
        }

        let mut children: Vec<Node> = Vec::new();
        loop {
            let event = advance_event(events, || ComposeError::UnexpectedEnd)?;
            match event.kind {
                EventKind::Key => {
                    let value = advance_event(events, || ComposeError::UnexpectedEnd)?;
                    if !value.is(EventKind::Value) {
                        return Err(ComposeError::UnexpectedEvent {
                            found: value.to_string(),
                            expected: "value",
                        }
                        .into());
                    }
                    children.push(KeyValueNode::scalar(event.text(), value.text()).into());
                }
                EventKind::ConstructEnd if event.text() == NAME => break,
                _ => {
                    return Err(ComposeError::UnexpectedEvent {
                        found: event.to_string(),
                        expected: "key or end of object",
                    }
                    .into())
                }
            }
        }

        Ok(ConstructNode::new(NAME, identifier.text(), children))
    }

    fn construct(&self, node: &ConstructNode, registry: &HookRegistry) -> Result<Value, Error> {
        let mut fields = Map::new();
        for child in &node.children {
            let Node::KeyValue(pair) = child else {
                return Err(ConstructError::UnexpectedNode(child.to_string()).into());
            };
            let Node::Scalar(scalar) = pair.value.as_ref() else {
                return Err(ConstructError::NotImplemented("nested field values").into());
            };
            if fields.contains_key(&pair.key.value) {
                return Err(ConstructError::DuplicateKey {
                    identifier: node.identifier.clone(),
                    key: pair.key.value.clone(),
                }
                .into());
            }
            fields.insert(pair.key.value.clone(), registry.resolve_scalar(&scalar.value));
        }
        Ok(Value::Object(fields))
    }

    fn represent(
        &self,
        identifier: &str,
        value: &Value,
        registry: &HookRegistry,
    ) -> Result<ConstructNode, Error> {
        let Value::Object(fields) = value else {
            return Err(RepresentError::InvalidObject {
                construct: NAME.to_string(),
                identifier: identifier.to_string(),
                kind: ValueKind::of(value),
            }
            .into());
        };

        let mut children: Vec<Node> = Vec::with_capacity(fields.len());
        for (key, field) in fields {
            let Some(text) = registry.represent_scalar(field) else {
                return Err(RepresentError::UnrepresentableValue {
                    field: key.clone(),
                    kind: ValueKind::of(field),
                }
                .into());
            };
            children.push(KeyValueNode::scalar(key, text).into());
        }
        Ok(ConstructNode::new(NAME, identifier, children))
    }

    fn serialize(&self, node: &ConstructNode) -> Result<Vec<Event>, Error> {
        let mut events = Vec::with_capacity(1 + 2 * node.children.len());
        events.push(Event::identifier(&node.identifier));
        for child in &node.children {
            let Node::KeyValue(pair) = child else {
                return Err(SerializeError::UnexpectedNode(child.to_string()).into());
            };
            let Node::Scalar(scalar) = pair.value.as_ref() else {
                return Err(SerializeError::UnexpectedNode(pair.value.to_string()).into());
            };
            events.push(Event::key(&pair.key.value));
            events.push(Event::value(&scalar.value));
        }
        Ok(events)
    }

    fn emit(&self, events: &mut Cursor<'_, Event>, out: &mut String) -> Result<(), Error> {
        let identifier = advance_event(events, || EmitError::PrematureEnd)?;
        if !identifier.is(EventKind::Identifier) {
            return Err(EmitError::UnexpectedEvent(identifier.to_string()).into());
        }
        out.push_str(&format!("{NAME} {}\n", identifier.text()));

        loop {
            let event = advance_event(events, || EmitError::PrematureEnd)?;
            match event.kind {
                EventKind::Key => {
                    let value = advance_event(events, || EmitError::PrematureEnd)?;
                    if !value.is(EventKind::Value) {
                        return Err(EmitError::UnexpectedEvent(value.to_string()).into());
                    }
                    out.push_str(&format!("{INDENT}{}: {}\n", event.text(), value.text()));
                }
                EventKind::ConstructEnd if event.text() == NAME => return Ok(()),
                _ => return Err(EmitError::UnexpectedEvent(event.to_string()).into()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moon::lexing::Lexer;
    use serde_json::json;

    fn interior(text: &str) -> Result<Vec<Event>, Error> {
        let registry = HookRegistry::with_defaults();
        let mut tokens = Cursor::new(Lexer::new(text)?);
        tokens.read()?;
        let mut parser = ObjectParser::new();
        let mut events = Vec::new();
        while let Some(event) = parser.next_event(&mut tokens, &registry)? {
            events.push(event);
        }
        Ok(events)
    }

    #[test]
    fn test_parse_identifier_and_fields() {
        let events = interior("@object me\n  name: Alex  \n\tage : 30").unwrap();
        assert_eq!(
            events,
            vec![
                Event::identifier("me"),
                Event::key("name"),
                Event::value("Alex"),
                Event::key("age"),
                Event::value("30"),
            ]
        );
    }

    #[test]
    fn test_value_keeps_inner_punctuation_and_stops_at_comment() {
        let events = interior("@object me\nwhen: 12:30, 'ok' // note").unwrap();
        assert_eq!(events[2], Event::value("12:30, 'ok'"));
    }

    #[test]
    fn test_block_ends_at_next_construct_name() {
        let registry = HookRegistry::with_defaults();
        let mut tokens = Cursor::new(Lexer::new("@object a\nk: v\n@object b").unwrap());
        tokens.read().unwrap();
        let mut parser = ObjectParser::new();
        while parser.next_event(&mut tokens, &registry).unwrap().is_some() {}
        assert_eq!(tokens.read().unwrap().map(|t| t.text.as_str()), Some("@object"));
        assert_eq!(parser.next_event(&mut tokens, &registry).unwrap(), None);
    }

    #[test]
    fn test_identifier_must_be_on_directive_line() {
        let err = interior("@object\nme").unwrap_err();
        assert!(matches!(
            err,
            Error::Parse(ParseError::UnexpectedToken {
                expected: "identifier",
                line: 1,
                column: 8,
                ..
            })
        ));
    }

    #[test]
    fn test_missing_colon() {
        let err = interior("@object me key\n").unwrap_err();
        assert!(matches!(
            err,
            Error::Parse(ParseError::UnexpectedToken { expected: "':'", .. })
        ));
    }

    #[test]
    fn test_construct_detects_duplicate_keys() {
        let node = ConstructNode::new(
            NAME,
            "me",
            vec![
                KeyValueNode::scalar("a", "1").into(),
                KeyValueNode::scalar("a", "2").into(),
            ],
        );
        let err = ObjectHook
            .construct(&node, &HookRegistry::with_defaults())
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Construct(ConstructError::DuplicateKey { .. })
        ));
    }

    #[test]
    fn test_construct_rejects_nested_values() {
        let nested = ConstructNode::new(NAME, "inner", Vec::new());
        let node = ConstructNode::new(
            NAME,
            "me",
            vec![KeyValueNode::new("a", nested.into()).into()],
        );
        let err = ObjectHook
            .construct(&node, &HookRegistry::with_defaults())
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Construct(ConstructError::NotImplemented(_))
        ));
    }

    #[test]
    fn test_represent_rejects_nested_fields() {
        let err = ObjectHook
            .represent("me", &json!({"a": {"b": 1}}), &HookRegistry::with_defaults())
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Represent(RepresentError::UnrepresentableValue {
                kind: ValueKind::Object,
                ..
            })
        ));
    }

    #[test]
    fn test_emit_writes_indented_fields() {
        let mut events = Cursor::from_items(vec![
            Event::construct_start(NAME),
            Event::identifier("me"),
            Event::key("key1"),
            Event::value("value1"),
            Event::construct_end(NAME),
        ]);
        events.read().unwrap();
        let mut out = String::new();
        ObjectHook.emit(&mut events, &mut out).unwrap();
        assert_eq!(out, "@object me\n    key1: value1\n");
        assert_eq!(events.read().unwrap(), Some(&Event::construct_end(NAME)));
    }
}
