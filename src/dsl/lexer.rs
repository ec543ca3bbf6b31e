//! Lexer for the state machine DSL.
//!
//! Converts source text into located [`Token`]s, one at a time. Newlines are
//! significant; spaces and tabs are not. A `#` that is the first
//! non-blank character of a line starts a comment running to the end of that
//! line. A `#` anywhere else is an unknown character.

use super::error::CompileError;
use super::token::{Location, Token, TokenKind};

pub struct Lexer {
    source: String,
    cursor: Location,
    eof: Option<Token>,
}

impl Lexer {
    pub fn new(source: &str) -> Self {
        Self {
            source: source.to_string(),
            cursor: Location::START,
            eof: None,
        }
    }

    /// Position of the next unread character.
    pub fn current_cursor(&self) -> Location {
        self.cursor
    }

    /// Produce the next token.
    ///
    /// Once end-of-input has been returned, every later call returns the same
    /// end-of-input token and the cursor does not move.
    pub fn next_token(&mut self) -> Result<Token, CompileError> {
        if let Some(eof) = &self.eof {
            return Ok(eof.clone());
        }

        if self.cursor.col == 1 {
            self.skip_comment();
        }
        self.skip_whitespace();

        let start = self.cursor;
        let token = match self.peek() {
            None => {
                // The end-of-input sentinel occupies one position past the content.
                self.cursor = start + 1;
                let token = Token::new("", TokenKind::Eof, start, self.cursor);
                self.eof = Some(token.clone());
                token
            }
            Some(ch) => match TokenKind::from_char(ch) {
                Some(kind) => {
                    self.advance();
                    Token::new(char::from(ch), kind, start, start + 1)
                }
                None if ch.is_ascii_alphanumeric() => self.lex_word(start),
                None => {
                    let character = self
                        .source
                        .get(start.offset..)
                        .and_then(|rest| rest.chars().next())
                        .unwrap_or(char::from(ch));
                    return Err(CompileError::lexical(character, start));
                }
            },
        };

        tracing::trace!(kind = ?token.kind, text = %token.text.escape_debug(), at = %token.start, "token");
        Ok(token)
    }

    /// Lex the whole source, up to and including the end-of-input token.
    pub fn tokenize(&mut self) -> Result<Vec<Token>, CompileError> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let done = token.is(TokenKind::Eof);
            tokens.push(token);
            if done {
                return Ok(tokens);
            }
        }
    }

    fn peek(&self) -> Option<u8> {
        self.source.as_bytes().get(self.cursor.offset).copied()
    }

    fn advance(&mut self) {
        match self.peek() {
            Some(b'\n') => {
                self.cursor.offset += 1;
                self.cursor.line += 1;
                self.cursor.col = 1;
            }
            Some(_) => {
                self.cursor.offset += 1;
                self.cursor.col += 1;
            }
            None => {}
        }
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(b' ' | b'\t')) {
            self.advance();
        }
    }

    /// Called at the first column of a line only.
    fn skip_comment(&mut self) {
        self.skip_whitespace();
        if self.peek() == Some(b'#') {
            while !matches!(self.peek(), None | Some(b'\n')) {
                self.advance();
            }
        }
    }

    fn lex_word(&mut self, start: Location) -> Token {
        while self.peek().is_some_and(|c| c.is_ascii_alphanumeric()) {
            self.advance();
        }
        let text = &self.source[start.offset..self.cursor.offset];
        let kind = TokenKind::keyword(text).unwrap_or(TokenKind::Ident);
        Token::new(text, kind, start, self.cursor)
    }
}
