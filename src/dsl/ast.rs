//! Parse tree for the state machine DSL.
//!
//! `Display` on these types renders DSL surface syntax, so a printed
//! [`Program`] parses back to an equal value.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Name of the implicit blank tape symbol.
pub const BLANK_SYMBOL: &str = "X";

/// A complete DSL program.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Program {
    /// Every state name in declaration order. Repeats are kept.
    pub states: Vec<String>,
    pub initial_state: String,
    pub symbols: Vec<String>,
    pub transitions: Vec<Transition>,
}

/// A single transition rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    pub match_state: String,
    pub condition: Condition,
    pub steps: Vec<ActionStep>,
    pub target_state: String,
}

/// Predicate on the symbol under the head.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Condition {
    /// `*`: any symbol, the blank included.
    Wildcard,
    /// `a|b|X`: exactly the listed symbols.
    AnyOf { symbols: Vec<String> },
}

/// One atomic effect of a transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ActionStep {
    MoveRight,
    MoveLeft,
    /// `X` in action position. Not a write of the blank symbol.
    NoOp,
    Print { symbol: String },
}

impl Condition {
    pub fn any_of<S: Into<String>>(symbols: impl IntoIterator<Item = S>) -> Self {
        Condition::AnyOf {
            symbols: symbols.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_wildcard(&self) -> bool {
        matches!(self, Condition::Wildcard)
    }
}

impl ActionStep {
    pub fn print(symbol: impl Into<String>) -> Self {
        ActionStep::Print {
            symbol: symbol.into(),
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Condition::Wildcard => f.write_str("*"),
            Condition::AnyOf { symbols } => f.write_str(&symbols.join("|")),
        }
    }
}

impl fmt::Display for ActionStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionStep::MoveRight => f.write_str("R"),
            ActionStep::MoveLeft => f.write_str("L"),
            ActionStep::NoOp => f.write_str("X"),
            ActionStep::Print { symbol } => write!(f, "P({symbol})"),
        }
    }
}

/// Writes `R-L-P(a)`.
pub(crate) fn write_steps(f: &mut fmt::Formatter<'_>, steps: &[ActionStep]) -> fmt::Result {
    for (i, step) in steps.iter().enumerate() {
        if i > 0 {
            f.write_str("-")?;
        }
        write!(f, "{step}")?;
    }
    Ok(())
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},", self.match_state, self.condition)?;
        write_steps(f, &self.steps)?;
        write!(f, ",{}", self.target_state)
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("STATES: ")?;
        // Only the first occurrence of the initial state gets brackets;
        // later repeats stay plain so the list re-parses identically.
        let mut bracketed = false;
        for (i, state) in self.states.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            if !bracketed && *state == self.initial_state {
                bracketed = true;
                write!(f, "[{state}]")?;
            } else {
                f.write_str(state)?;
            }
        }
        writeln!(f)?;
        writeln!(f, "SYMBOLS: {}", self.symbols.join(", "))?;
        writeln!(f, "TRANSITIONS:")?;
        for transition in &self.transitions {
            writeln!(f, "{transition}")?;
        }
        Ok(())
    }
}
