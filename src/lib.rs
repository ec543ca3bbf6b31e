//! smc: a compiler for a small Turing-machine description language.
//!
//! Source text is lexed, parsed into a [`dsl::Program`], and resolved into a
//! deterministic [`dsl::DispatchTable`] for an external executor.

pub mod config;
pub mod dsl;
pub mod emit;
pub mod logging;
