//! Transition-table compiler: resolves a [`Program`] into a [`DispatchTable`].
//!
//! Overlapping rules are settled without errors:
//!
//! 1. a rule naming specific symbols (`a|b`) outranks a wildcard (`*`) rule,
//! 2. among rules of equal rank the first declared wins.
//!
//! Every `(symbol, state)` cell is either assigned exactly once or absent.

use std::collections::btree_map::{self, BTreeMap};
use std::fmt;

use rustc_hash::FxHashMap;
use serde::{Serialize, Serializer};

use super::ast::*;

/// The resolved action for one `(symbol, state)` cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DispatchEntry {
    pub steps: Vec<ActionStep>,
    pub target_state: usize,
}

/// Name ↔ index mapping, indices in first-occurrence order.
#[derive(Debug, Clone, Default)]
struct NameIndex {
    names: Vec<String>,
    index: FxHashMap<String, usize>,
}

impl NameIndex {
    fn intern(&mut self, name: &str) -> usize {
        if let Some(&idx) = self.index.get(name) {
            return idx;
        }
        let idx = self.names.len();
        self.names.push(name.to_string());
        self.index.insert(name.to_string(), idx);
        idx
    }

    fn get(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }
}

/// A deterministic dispatch table keyed by `(symbol_index, state_index)`.
#[derive(Debug, Clone)]
pub struct DispatchTable {
    symbols: NameIndex,
    states: NameIndex,
    initial_state: usize,
    cells: BTreeMap<(usize, usize), DispatchEntry>,
}

impl DispatchTable {
    /// The entry for a cell, or `None` when no rule applies.
    pub fn get(&self, symbol: usize, state: usize) -> Option<&DispatchEntry> {
        self.cells.get(&(symbol, state))
    }

    /// Look a cell up by names.
    pub fn lookup(&self, symbol: &str, state: &str) -> Option<&DispatchEntry> {
        self.get(self.symbol_index(symbol)?, self.state_index(state)?)
    }

    pub fn symbol_index(&self, name: &str) -> Option<usize> {
        self.symbols.get(name)
    }

    pub fn state_index(&self, name: &str) -> Option<usize> {
        self.states.get(name)
    }

    /// Symbol names by index. Declared symbols come first, then the blank,
    /// then any names first seen in transitions.
    pub fn symbols(&self) -> &[String] {
        &self.symbols.names
    }

    pub fn states(&self) -> &[String] {
        &self.states.names
    }

    pub fn symbol_count(&self) -> usize {
        self.symbols.names.len()
    }

    pub fn state_count(&self) -> usize {
        self.states.names.len()
    }

    pub fn initial_state(&self) -> usize {
        self.initial_state
    }

    /// Present cells ordered by `(symbol_index, state_index)`.
    pub fn cells(&self) -> btree_map::Iter<'_, (usize, usize), DispatchEntry> {
        self.cells.iter()
    }

    /// Number of present cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Compile a parsed program into its dispatch table.
///
/// Total over every syntactically valid program. Names used in transitions
/// but never declared are given fresh indices rather than rejected.
pub fn compile(program: Program) -> DispatchTable {
    let Program {
        states,
        initial_state,
        symbols,
        transitions,
    } = program;

    let mut symbol_index = NameIndex::default();
    for symbol in &symbols {
        symbol_index.intern(symbol);
    }
    symbol_index.intern(BLANK_SYMBOL);
    // What a wildcard covers: the declared alphabet plus the blank.
    let wildcard_cover = symbol_index.names.clone();

    let mut state_index = NameIndex::default();
    for state in &states {
        state_index.intern(state);
    }
    let initial_state = state_index.intern(&initial_state);

    // Stable: specific rules keep their order, wildcards keep theirs.
    let (specific, wildcards): (Vec<_>, Vec<_>) = transitions
        .into_iter()
        .partition(|t| !t.condition.is_wildcard());

    let mut cells = BTreeMap::new();
    for transition in specific.iter().chain(&wildcards) {
        let covered: &[String] = match &transition.condition {
            Condition::Wildcard => &wildcard_cover,
            Condition::AnyOf { symbols } => symbols,
        };

        for symbol in covered {
            let key = (
                symbol_index.intern(symbol),
                state_index.intern(&transition.match_state),
            );
            match cells.entry(key) {
                btree_map::Entry::Vacant(cell) => {
                    cell.insert(DispatchEntry {
                        steps: transition.steps.clone(),
                        target_state: state_index.intern(&transition.target_state),
                    });
                }
                btree_map::Entry::Occupied(_) => {
                    tracing::debug!(
                        symbol = %symbol,
                        state = %transition.match_state,
                        rule = %transition,
                        "cell already assigned, rule shadowed"
                    );
                }
            }
        }
    }

    tracing::debug!(
        cells = cells.len(),
        symbols = symbol_index.names.len(),
        states = state_index.names.len(),
        "compiled dispatch table"
    );

    DispatchTable {
        symbols: symbol_index,
        states: state_index,
        initial_state,
        cells,
    }
}

#[derive(Serialize)]
struct TableView<'a> {
    symbols: &'a [String],
    states: &'a [String],
    initial_state: &'a str,
    cells: Vec<CellView<'a>>,
}

#[derive(Serialize)]
struct CellView<'a> {
    symbol: &'a str,
    state: &'a str,
    steps: &'a [ActionStep],
    target: &'a str,
}

impl Serialize for DispatchTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let symbols = self.symbols();
        let states = self.states();
        TableView {
            symbols,
            states,
            initial_state: &states[self.initial_state],
            cells: self
                .cells()
                .map(|(&(symbol, state), entry)| CellView {
                    symbol: &symbols[symbol],
                    state: &states[state],
                    steps: &entry.steps,
                    target: &states[entry.target_state],
                })
                .collect(),
        }
        .serialize(serializer)
    }
}

impl fmt::Display for DispatchTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (&(symbol, state), entry) in self.cells() {
            write!(f, "{}, {} -> ", self.symbols()[symbol], self.states()[state])?;
            write_steps(f, &entry.steps)?;
            writeln!(f, ", {}", self.states()[entry.target_state])?;
        }
        Ok(())
    }
}
