//! Whitespace token reader over a line-oriented input stream.

use std::collections::VecDeque;
use std::io::BufRead;

use super::parser::ProtocolError;

/// Yields integer tokens from a `BufRead`, pulling lines on demand.
pub struct TokenReader<R> {
    input: R,
    pending: VecDeque<String>,
    line: String,
}

impl<R: BufRead> TokenReader<R> {
    pub fn new(input: R) -> Self {
        TokenReader {
            input,
            pending: VecDeque::new(),
            line: String::new(),
        }
    }

    /// Pulls lines until a token is buffered. Returns false at end of input.
    fn fill(&mut self) -> Result<bool, ProtocolError> {
        while self.pending.is_empty() {
            self.line.clear();
            if self.input.read_line(&mut self.line)? == 0 {
                return Ok(false);
            }
            self.pending
                .extend(self.line.split_whitespace().map(str::to_string));
        }
        Ok(true)
    }

    /// Returns the next token, or `None` at end of input.
    pub fn next_token(&mut self) -> Result<Option<String>, ProtocolError> {
        if !self.fill()? {
            return Ok(None);
        }
        Ok(self.pending.pop_front())
    }

    /// Returns true once no tokens remain. Blank trailing lines are skipped.
    pub fn at_end(&mut self) -> Result<bool, ProtocolError> {
        Ok(!self.fill()?)
    }

    /// Reads the next token as a signed integer.
    pub fn next_i64(&mut self) -> Result<i64, ProtocolError> {
        let token = self.next_token()?.ok_or(ProtocolError::EndOfInput)?;
        token
            .parse::<i64>()
            .map_err(|_| ProtocolError::InvalidInteger(token))
    }
}
