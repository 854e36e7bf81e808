/// Bidirectional cursor over an immutable character sequence.
///
/// The position may wander outside the input; every accessor answers `None`
/// there instead of indexing out of bounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reader {
    chars: Vec<char>,
    pos: isize,
}

impl Reader {
    pub fn new(input: &str) -> Self {
        Self {
            chars: input.chars().collect(),
            pos: 0,
        }
    }

    pub fn position(&self) -> isize {
        self.pos
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    fn get(&self, index: isize) -> Option<char> {
        let index = usize::try_from(index).ok()?;
        self.chars.get(index).copied()
    }

    pub fn current(&self) -> Option<char> {
        self.get(self.pos)
    }

    /// Moves forward by `amount` and returns the new current character.
    pub fn advance(&mut self, amount: isize) -> Option<char> {
        self.pos = self.pos.saturating_add(amount);
        self.current()
    }

    /// Moves backward by `amount` and returns the new current character.
    pub fn retreat(&mut self, amount: isize) -> Option<char> {
        self.pos = self.pos.saturating_sub(amount);
        self.current()
    }

    pub fn peek(&self, offset: isize) -> Option<char> {
        self.get(self.pos.saturating_add(offset))
    }

    /// Positive indices are absolute; zero and negative ones are taken
    /// relative to (behind) the current position.
    pub fn absolute_at(&self, index: isize) -> Option<char> {
        if index > 0 {
            self.get(index)
        } else {
            self.get(self.pos.saturating_add(index))
        }
    }

    pub fn consume_while(&mut self, mut predicate: impl FnMut(char) -> bool) -> String {
        let mut consumed = String::new();
        while let Some(c) = self.current().filter(|&c| predicate(c)) {
            consumed.push(c);
            self.pos += 1;
        }
        consumed
    }

    pub fn skip_while(&mut self, mut predicate: impl FnMut(char) -> bool) {
        while self.current().is_some_and(&mut predicate) {
            self.pos += 1;
        }
    }

    /// Consumes the rest of the current whitespace-delimited token.
    pub fn token(&mut self) -> String {
        self.consume_while(|c| !c.is_whitespace())
    }

    pub fn at_token_end(&self) -> bool {
        self.current().is_none_or(char::is_whitespace)
    }
}

#[cfg(test)]
mod tests {
    use super::Reader;

    #[test]
    fn accessors_answer_none_out_of_bounds() {
        let mut reader = Reader::new("ab");
        assert_eq!(reader.current(), Some('a'));
        assert_eq!(reader.peek(1), Some('b'));
        assert_eq!(reader.peek(2), None);
        assert_eq!(reader.retreat(1), None);
        assert_eq!(reader.position(), -1);
        assert_eq!(reader.peek(1), Some('a'));
        assert_eq!(reader.advance(3), None);
        assert_eq!(reader.retreat(1), Some('b'));
    }

    #[test]
    fn absolute_at_is_relative_for_non_positive_indices() {
        let mut reader = Reader::new("abcd");
        reader.advance(2);
        assert_eq!(reader.absolute_at(3), Some('d'));
        assert_eq!(reader.absolute_at(0), Some('c'));
        assert_eq!(reader.absolute_at(-2), Some('a'));
        assert_eq!(reader.absolute_at(-3), None);
        assert_eq!(reader.absolute_at(9), None);
    }

    #[test]
    fn consume_while_stops_at_first_mismatch() {
        let mut reader = Reader::new("name=value");
        assert_eq!(reader.consume_while(|c| c != '='), "name");
        assert_eq!(reader.current(), Some('='));
        assert_eq!(reader.consume_while(|_| false), "");
        assert_eq!(reader.position(), 4);
    }

    #[test]
    fn loops_terminate_on_always_true_predicate() {
        let mut reader = Reader::new("xyz");
        assert_eq!(reader.consume_while(|_| true), "xyz");
        assert_eq!(reader.current(), None);

        let mut reader = Reader::new("   tail");
        reader.skip_while(char::is_whitespace);
        assert_eq!(reader.token(), "tail");
        assert!(reader.at_token_end());
    }
}
