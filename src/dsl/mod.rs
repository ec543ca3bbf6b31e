//! DSL compiler: source text → tokens → [`Program`] → [`DispatchTable`].

pub mod ast;
pub mod compile;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod token;
pub mod validate;

pub use ast::*;
pub use compile::{DispatchEntry, DispatchTable};
pub use error::CompileError;
pub use token::{Location, Token, TokenKind};
pub use validate::{validate, ValidationIssue};

use lexer::Lexer;
use parser::Parser;

/// The DSL compiler.
///
/// Each call owns its input and output; independent compilations share no state.
pub struct Compiler;

impl Compiler {
    /// Lex source text into tokens, ending with end-of-input.
    pub fn tokenize(source: &str) -> Result<Vec<Token>, CompileError> {
        Lexer::new(source).tokenize()
    }

    /// Parse DSL source into a Program.
    pub fn parse(source: &str) -> Result<Program, CompileError> {
        Parser::new(Lexer::new(source))?.compile_program()
    }

    /// Parse and compile DSL source into a DispatchTable.
    pub fn compile(source: &str) -> Result<DispatchTable, CompileError> {
        let program = Self::parse(source)?;
        Ok(compile::compile(program))
    }
}
