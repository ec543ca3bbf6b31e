//! Error types for the DSL compiler.

use thiserror::Error;

use super::token::{Location, Token, TokenKind};

/// An error that aborts compilation of a program.
///
/// Both kinds are terminal: there is no partial [`Program`](super::ast::Program)
/// and no partial dispatch table once one is raised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    /// The lexer met a character outside the DSL alphabet.
    #[error("{location}: unknown character {character:?}")]
    Lexical { character: char, location: Location },

    /// A required token was absent.
    #[error("{}: expected {expected}, found {found}", found.start)]
    Syntax { expected: TokenKind, found: Token },
}

impl CompileError {
    pub fn lexical(character: char, location: Location) -> Self {
        Self::Lexical {
            character,
            location,
        }
    }

    pub fn syntax(expected: TokenKind, found: Token) -> Self {
        Self::Syntax { expected, found }
    }

    /// Where the diagnostic points.
    pub fn location(&self) -> Location {
        match self {
            Self::Lexical { location, .. } => *location,
            Self::Syntax { found, .. } => found.start,
        }
    }

    pub fn is_lexical(&self) -> bool {
        matches!(self, Self::Lexical { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lexical_display() {
        let err = CompileError::lexical('#', Location::new(40, 4, 5));
        assert_eq!(err.to_string(), "4:5: unknown character '#'");
        assert_eq!(err.location(), Location::new(40, 4, 5));
        assert!(err.is_lexical());
    }

    #[test]
    fn syntax_display() {
        let found = Token::new(
            "\n",
            TokenKind::Newline,
            Location::new(12, 1, 13),
            Location::new(13, 1, 14),
        );
        let err = CompileError::syntax(TokenKind::LeftBracket, found);
        assert_eq!(err.to_string(), "1:13: expected '[', found newline");
        assert!(!err.is_lexical());
    }
}
