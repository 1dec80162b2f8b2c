use std::collections::VecDeque;

/// FIFO queue of pending move tokens.
///
/// Tokens are stored as text and parsed only when dispatched, so that an
/// unrecognized token is reported at the point where it would have run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MoveQueue {
    tokens: VecDeque<String>,
}
impl MoveQueue {
    /// Constructs an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends tokens to the tail of the queue.
    pub fn enqueue<S: Into<String>>(&mut self, tokens: impl IntoIterator<Item = S>) {
        self.tokens.extend(tokens.into_iter().map(Into::into));
    }
    /// Discards all pending tokens and replaces them with `tokens`.
    pub fn replace<S: Into<String>>(&mut self, tokens: impl IntoIterator<Item = S>) {
        self.tokens.clear();
        self.enqueue(tokens);
    }
    /// Discards all pending tokens.
    pub fn clear(&mut self) {
        self.tokens.clear();
    }

    /// Returns the number of pending tokens.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }
    /// Returns whether there are no pending tokens.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
    /// Returns the token that will be dispatched next.
    pub fn front(&self) -> Option<&str> {
        self.tokens.front().map(String::as_str)
    }
    /// Iterates over pending tokens from head to tail.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(String::as_str)
    }

    pub(crate) fn pop_front(&mut self) -> Option<String> {
        self.tokens.pop_front()
    }
    pub(crate) fn push_front(&mut self, token: String) {
        self.tokens.push_front(token);
    }
}
