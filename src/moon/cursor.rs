//! One-item lookahead reader shared by every pipeline stage
//!
//! Stages never index or rewind their input. They see it through three operations:
//!
//!     - `read`: the current item, pulling the first one on demand.
//!     - `peek`: the item after the current one, cached until the cursor advances.
//!     - `advance`: promote the cached lookahead (or pull a fresh item) to current.
//!
//! The source is a fallible iterator, since every upstream stage is itself lazy and may fail.
//! An upstream error is returned as-is; running out of items is reported as `Ok(None)` and each
//! stage turns that into its own "unexpected end" error.

use crate::moon::error::Error;

pub struct Cursor<'a, T> {
    source: Box<dyn Iterator<Item = Result<T, Error>> + 'a>,
    current: Option<T>,
    lookahead: Option<T>,
}

impl<'a, T> Cursor<'a, T> {
    pub fn new<I>(source: I) -> Self
    where
        I: IntoIterator<Item = Result<T, Error>>,
        I::IntoIter: 'a,
    {
        Cursor {
            source: Box::new(source.into_iter()),
            current: None,
            lookahead: None,
        }
    }

    /// Cursor over a sequence that cannot fail, e.g. a prepared list of events.
    pub fn from_items<I>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: 'a,
        T: 'a,
    {
        Self::new(items.into_iter().map(Ok))
    }

    fn pull(&mut self) -> Result<Option<T>, Error> {
        self.source.next().transpose()
    }

    /// Current item, without advancing.
    pub fn read(&mut self) -> Result<Option<&T>, Error> {
        if self.current.is_none() {
            self.current = match self.lookahead.take() {
                Some(item) => Some(item),
                None => self.pull()?,
            };
        }
        Ok(self.current.as_ref())
    }

    /// Item after the current one. Repeated calls return the same item until `advance`.
    pub fn peek(&mut self) -> Result<Option<&T>, Error> {
        if self.lookahead.is_none() {
            self.lookahead = self.pull()?;
        }
        Ok(self.lookahead.as_ref())
    }

    /// Move to the next item and return it. `Ok(None)` once the source is exhausted.
    pub fn advance(&mut self) -> Result<Option<&T>, Error> {
        self.current = match self.lookahead.take() {
            Some(item) => Some(item),
            None => self.pull()?,
        };
        Ok(self.current.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moon::error::ParseError;

    #[test]
    fn test_read_pulls_first_item_lazily() {
        let mut cursor = Cursor::from_items(vec![1, 2, 3]);
        assert_eq!(cursor.read().unwrap(), Some(&1));
        assert_eq!(cursor.read().unwrap(), Some(&1));
    }

    #[test]
    fn test_peek_is_idempotent_until_advance() {
        let mut cursor = Cursor::from_items(vec![1, 2, 3]);
        cursor.read().unwrap();
        assert_eq!(cursor.peek().unwrap(), Some(&2));
        assert_eq!(cursor.peek().unwrap(), Some(&2));
        assert_eq!(cursor.advance().unwrap(), Some(&2));
        assert_eq!(cursor.read().unwrap(), Some(&2));
        assert_eq!(cursor.peek().unwrap(), Some(&3));
    }

    #[test]
    fn test_peek_before_read_is_promoted_by_read() {
        let mut cursor = Cursor::from_items(vec!['a', 'b']);
        assert_eq!(cursor.peek().unwrap(), Some(&'a'));
        assert_eq!(cursor.read().unwrap(), Some(&'a'));
        assert_eq!(cursor.advance().unwrap(), Some(&'b'));
    }

    #[test]
    fn test_exhaustion_is_reported_as_none() {
        let mut cursor = Cursor::from_items(vec![1]);
        assert_eq!(cursor.read().unwrap(), Some(&1));
        assert_eq!(cursor.peek().unwrap(), None);
        assert_eq!(cursor.advance().unwrap(), None);
        assert_eq!(cursor.read().unwrap(), None);
    }

    #[test]
    fn test_empty_source() {
        let mut cursor: Cursor<'_, u8> = Cursor::from_items(Vec::new());
        assert_eq!(cursor.read().unwrap(), None);
    }

    #[test]
    fn test_upstream_error_is_propagated_unchanged() {
        let source = vec![Ok(1), Err(Error::from(ParseError::UnexpectedEof))];
        let mut cursor = Cursor::new(source);
        assert_eq!(cursor.read().unwrap(), Some(&1));
        let err = cursor.advance().unwrap_err();
        assert!(matches!(err, Error::Parse(ParseError::UnexpectedEof)));
    }
}
