//! Declaration checks for a parsed [`Program`].
//!
//! Opt-in only. Table compilation accepts undeclared names and gives them
//! fresh indices; this pass reports them without changing anything.

use std::collections::HashSet;

use thiserror::Error;

use super::ast::*;

/// A name used in a transition but missing from its section.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationIssue {
    #[error("transition {index}: {role} state '{name}' is not declared in STATES")]
    UndeclaredState {
        index: usize,
        role: StateRole,
        name: String,
    },

    #[error("transition {index}: symbol '{name}' is not declared in SYMBOLS")]
    UndeclaredSymbol { index: usize, name: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateRole {
    Match,
    Target,
}

impl std::fmt::Display for StateRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StateRole::Match => f.write_str("match"),
            StateRole::Target => f.write_str("target"),
        }
    }
}

/// Report every undeclared name, in declaration order. Transition indices
/// are 1-based.
pub fn validate(program: &Program) -> Vec<ValidationIssue> {
    let states: HashSet<&str> = program.states.iter().map(String::as_str).collect();
    let symbols: HashSet<&str> = program
        .symbols
        .iter()
        .map(String::as_str)
        .chain([BLANK_SYMBOL])
        .collect();

    let mut issues = Vec::new();
    for (i, transition) in program.transitions.iter().enumerate() {
        let index = i + 1;
        if !states.contains(transition.match_state.as_str()) {
            issues.push(ValidationIssue::UndeclaredState {
                index,
                role: StateRole::Match,
                name: transition.match_state.clone(),
            });
        }

        let conditioned: &[String] = match &transition.condition {
            Condition::Wildcard => &[],
            Condition::AnyOf { symbols } => symbols.as_slice(),
        };
        let printed = transition.steps.iter().filter_map(|step| match step {
            ActionStep::Print { symbol } => Some(symbol),
            _ => None,
        });
        for name in conditioned.iter().chain(printed) {
            if !symbols.contains(name.as_str()) {
                issues.push(ValidationIssue::UndeclaredSymbol {
                    index,
                    name: name.clone(),
                });
            }
        }

        if !states.contains(transition.target_state.as_str()) {
            issues.push(ValidationIssue::UndeclaredState {
                index,
                role: StateRole::Target,
                name: transition.target_state.clone(),
            });
        }
    }
    issues
}
