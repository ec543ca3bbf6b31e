//! Token types for the state machine DSL lexer.

use std::fmt;
use std::ops::Add;

use serde::Serialize;

/// A position in the source text.
///
/// `offset` is a 0-based byte offset; `line` and `col` are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Location {
    pub offset: usize,
    pub line: usize,
    pub col: usize,
}

impl Location {
    /// The location of the first character of a source.
    pub const START: Location = Location {
        offset: 0,
        line: 1,
        col: 1,
    };

    pub fn new(offset: usize, line: usize, col: usize) -> Self {
        Self { offset, line, col }
    }
}

impl Default for Location {
    fn default() -> Self {
        Self::START
    }
}

/// Advances offset and column by `n` on the same line.
impl Add<usize> for Location {
    type Output = Location;

    fn add(self, n: usize) -> Location {
        Location {
            offset: self.offset + n,
            line: self.line,
            col: self.col + n,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

/// A token produced by the lexer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub text: String,
    pub kind: TokenKind,
    pub start: Location,
    pub end: Location,
}

impl Token {
    pub fn new(text: impl Into<String>, kind: TokenKind, start: Location, end: Location) -> Self {
        Self {
            text: text.into(),
            kind,
            start,
            end,
        }
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Eof | TokenKind::Newline => write!(f, "{}", self.kind),
            _ => write!(f, "{} '{}'", self.kind, self.text),
        }
    }
}

/// The kind of token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenKind {
    // Special
    Eof,
    Newline,

    // Punctuation
    Or,           // |
    LeftBracket,  // [
    RightBracket, // ]
    Comma,        // ,
    Dash,         // -
    LeftParen,    // (
    RightParen,   // )
    Star,         // *
    Colon,        // :

    Ident,

    // Section keywords
    States,
    Symbols,
    Transitions,

    // Contextual keywords
    R,
    L,
    X,
    P,
}

/// The reserved-word table. Matching is exact and case-sensitive.
pub const KEYWORDS: &[(&str, TokenKind)] = &[
    ("STATES", TokenKind::States),
    ("SYMBOLS", TokenKind::Symbols),
    ("TRANSITIONS", TokenKind::Transitions),
    ("R", TokenKind::R),
    ("L", TokenKind::L),
    ("X", TokenKind::X),
    ("P", TokenKind::P),
];

impl TokenKind {
    /// Look up an alphanumeric run in the reserved-word table.
    pub fn keyword(text: &str) -> Option<TokenKind> {
        KEYWORDS
            .iter()
            .find(|(word, _)| *word == text)
            .map(|&(_, kind)| kind)
    }

    pub fn is_keyword(self) -> bool {
        KEYWORDS.iter().any(|&(_, kind)| kind == self)
    }

    /// Kinds that are recognised from a single character.
    pub fn from_char(ch: u8) -> Option<TokenKind> {
        let kind = match ch {
            b'|' => TokenKind::Or,
            b'[' => TokenKind::LeftBracket,
            b']' => TokenKind::RightBracket,
            b',' => TokenKind::Comma,
            b'-' => TokenKind::Dash,
            b'(' => TokenKind::LeftParen,
            b')' => TokenKind::RightParen,
            b'*' => TokenKind::Star,
            b':' => TokenKind::Colon,
            b'\n' => TokenKind::Newline,
            _ => return None,
        };
        Some(kind)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TokenKind::Eof => "end of input",
            TokenKind::Newline => "newline",
            TokenKind::Or => "'|'",
            TokenKind::LeftBracket => "'['",
            TokenKind::RightBracket => "']'",
            TokenKind::Comma => "','",
            TokenKind::Dash => "'-'",
            TokenKind::LeftParen => "'('",
            TokenKind::RightParen => "')'",
            TokenKind::Star => "'*'",
            TokenKind::Colon => "':'",
            TokenKind::Ident => "identifier",
            TokenKind::States => "STATES",
            TokenKind::Symbols => "SYMBOLS",
            TokenKind::Transitions => "TRANSITIONS",
            TokenKind::R => "R",
            TokenKind::L => "L",
            TokenKind::X => "X",
            TokenKind::P => "P",
        };
        f.write_str(s)
    }
}
