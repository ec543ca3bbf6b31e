//! Parser for the state machine DSL.
//!
//! Recursive descent over the token stream with a two-token buffer
//! (`current` and `peek`) refilled from the [`Lexer`]. The first
//! mismatch aborts the parse; there is no recovery.
//!
//! ```text
//! Program            := StatesSection NEWLINE SymbolsSection NEWLINE TransitionsSection EOF
//! StatesSection      := "STATES" ":" StateList
//! StateList          := (IDENT ",")* "[" IDENT "]" ("," IDENT)*
//! SymbolsSection     := "SYMBOLS" ":" IDENT ("," IDENT)*
//! TransitionsSection := "TRANSITIONS" ":" NEWLINE TransitionList
//! Transition         := IDENT "," Condition "," ActionList "," IDENT
//! Condition          := "*" | Symbol ("|" Symbol)*
//! ActionList         := Action ("-" Action)*
//! Action             := "R" | "L" | "X" | "P" "(" Symbol ")"
//! Symbol             := IDENT | "X"
//! ```

use super::ast::*;
use super::error::CompileError;
use super::lexer::Lexer;
use super::token::{Token, TokenKind};

pub struct Parser {
    lexer: Lexer,
    current: Token,
    peek: Token,
}

impl Parser {
    /// Prime the lookahead buffer with the first two tokens.
    pub fn new(mut lexer: Lexer) -> Result<Self, CompileError> {
        let current = lexer.next_token()?;
        let peek = lexer.next_token()?;
        Ok(Self {
            lexer,
            current,
            peek,
        })
    }

    /// Parse a whole program, which must be followed by end-of-input.
    pub fn compile_program(mut self) -> Result<Program, CompileError> {
        self.skip_newlines()?;

        let (states, initial_state) = self.parse_states_section()?;
        tracing::debug!(count = states.len(), initial = %initial_state, "parsed states");
        self.expect(TokenKind::Newline)?;
        self.skip_newlines()?;

        let symbols = self.parse_symbols_section()?;
        tracing::debug!(count = symbols.len(), "parsed symbols");
        self.expect(TokenKind::Newline)?;
        self.skip_newlines()?;

        let transitions = self.parse_transitions_section()?;
        tracing::debug!(count = transitions.len(), "parsed transitions");
        self.skip_newlines()?;

        self.expect(TokenKind::Eof)?;

        Ok(Program {
            states,
            initial_state,
            symbols,
            transitions,
        })
    }

    fn parse_states_section(&mut self) -> Result<(Vec<String>, String), CompileError> {
        self.expect(TokenKind::States)?;
        self.expect(TokenKind::Colon)?;
        self.parse_state_list()
    }

    /// Returns every listed state in order, bracketed one included, plus the
    /// bracketed one on its own.
    fn parse_state_list(&mut self) -> Result<(Vec<String>, String), CompileError> {
        let mut states = Vec::new();

        // `IDENT ,` pairs before the bracket. A trailing identifier with no
        // comma is left for the bracket check to reject.
        while self.check(TokenKind::Ident) && self.check_peek(TokenKind::Comma) {
            states.push(self.advance()?.text);
            self.advance()?;
        }

        self.expect(TokenKind::LeftBracket)?;
        let initial_state = self.expect(TokenKind::Ident)?.text;
        self.expect(TokenKind::RightBracket)?;
        states.push(initial_state.clone());

        while self.try_consume(TokenKind::Comma)?.is_some() {
            states.push(self.expect(TokenKind::Ident)?.text);
        }

        Ok((states, initial_state))
    }

    fn parse_symbols_section(&mut self) -> Result<Vec<String>, CompileError> {
        self.expect(TokenKind::Symbols)?;
        self.expect(TokenKind::Colon)?;
        self.parse_symbol_list()
    }

    fn parse_symbol_list(&mut self) -> Result<Vec<String>, CompileError> {
        let mut symbols = vec![self.expect(TokenKind::Ident)?.text];
        while self.try_consume(TokenKind::Comma)?.is_some() {
            symbols.push(self.expect(TokenKind::Ident)?.text);
        }
        Ok(symbols)
    }

    fn parse_transitions_section(&mut self) -> Result<Vec<Transition>, CompileError> {
        self.expect(TokenKind::Transitions)?;
        self.expect(TokenKind::Colon)?;
        self.expect(TokenKind::Newline)?;
        self.skip_newlines()?;

        let mut transitions = Vec::new();
        // The list ends at the first token that cannot start a transition.
        while self.check(TokenKind::Ident) {
            transitions.push(self.parse_transition()?);
            if self.check(TokenKind::Eof) {
                break;
            }
            self.expect(TokenKind::Newline)?;
            self.skip_newlines()?;
        }
        Ok(transitions)
    }

    fn parse_transition(&mut self) -> Result<Transition, CompileError> {
        let match_state = self.expect(TokenKind::Ident)?.text;
        self.expect(TokenKind::Comma)?;
        let condition = self.parse_condition()?;
        self.expect(TokenKind::Comma)?;
        let steps = self.parse_action_list()?;
        self.expect(TokenKind::Comma)?;
        let target_state = self.expect(TokenKind::Ident)?.text;

        Ok(Transition {
            match_state,
            condition,
            steps,
            target_state,
        })
    }

    fn parse_condition(&mut self) -> Result<Condition, CompileError> {
        if self.try_consume(TokenKind::Star)?.is_some() {
            return Ok(Condition::Wildcard);
        }

        let mut symbols = vec![self.expect_symbol()?];
        while self.try_consume(TokenKind::Or)?.is_some() {
            symbols.push(self.expect_symbol()?);
        }
        Ok(Condition::AnyOf { symbols })
    }

    fn parse_action_list(&mut self) -> Result<Vec<ActionStep>, CompileError> {
        let mut steps = vec![self.parse_action()?];
        while self.try_consume(TokenKind::Dash)?.is_some() {
            steps.push(self.parse_action()?);
        }
        Ok(steps)
    }

    fn parse_action(&mut self) -> Result<ActionStep, CompileError> {
        let step = match self.current.kind {
            TokenKind::R => ActionStep::MoveRight,
            TokenKind::L => ActionStep::MoveLeft,
            TokenKind::X => ActionStep::NoOp,
            TokenKind::P => {
                self.advance()?;
                self.expect(TokenKind::LeftParen)?;
                let symbol = self.expect_symbol()?;
                self.expect(TokenKind::RightParen)?;
                return Ok(ActionStep::Print { symbol });
            }
            _ => return Err(CompileError::syntax(TokenKind::R, self.current.clone())),
        };
        self.advance()?;
        Ok(step)
    }

    /// A tape symbol: an identifier or the blank `X`.
    fn expect_symbol(&mut self) -> Result<String, CompileError> {
        match self.current.kind {
            TokenKind::Ident | TokenKind::X => Ok(self.advance()?.text),
            _ => Err(CompileError::syntax(TokenKind::Ident, self.current.clone())),
        }
    }

    // ── Token buffer ───────────────────────────────────────────────

    /// Shift the buffer by one token and return the token shifted out.
    fn advance(&mut self) -> Result<Token, CompileError> {
        let next = self.lexer.next_token()?;
        let peek = std::mem::replace(&mut self.peek, next);
        Ok(std::mem::replace(&mut self.current, peek))
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.current.is(kind)
    }

    fn check_peek(&self, kind: TokenKind) -> bool {
        self.peek.is(kind)
    }

    /// Consume the current token if it has the given kind.
    fn try_consume(&mut self, kind: TokenKind) -> Result<Option<Token>, CompileError> {
        if self.check(kind) {
            self.advance().map(Some)
        } else {
            Ok(None)
        }
    }

    /// Consume the current token, which must have the given kind.
    fn expect(&mut self, kind: TokenKind) -> Result<Token, CompileError> {
        match self.try_consume(kind)? {
            Some(token) => Ok(token),
            None => Err(CompileError::syntax(kind, self.current.clone())),
        }
    }

    fn skip_newlines(&mut self) -> Result<(), CompileError> {
        while self.try_consume(TokenKind::Newline)?.is_some() {}
        Ok(())
    }
}
