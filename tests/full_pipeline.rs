//! Full pipeline integration tests: DSL source → Program → DispatchTable.
//!
//! The small stepper below plays the part of the external executor: it only
//! reads the compiled table and treats an absent cell as a halt.

use std::collections::BTreeMap;

use pretty_assertions::assert_eq;
use smc::dsl::compile::compile;
use smc::dsl::{
    validate, ActionStep, CompileError, Compiler, Condition, DispatchTable, Location, TokenKind,
    BLANK_SYMBOL,
};
use smc::emit::{render_program, render_table, EmitFormat};

const BINARY_INCREMENT: &str = include_str!("../demos/binary_increment.sm");
const SHADOWED: &str = include_str!("../demos/shadowed.sm");

/// Run `table` on `input` until `halt` is reached or no rule applies.
fn run(table: &DispatchTable, input: &str, halt: &str, max_steps: usize) -> (String, String) {
    let mut tape: BTreeMap<i64, String> = input
        .chars()
        .enumerate()
        .map(|(i, c)| (i as i64, c.to_string()))
        .collect();
    let mut head = 0i64;
    let mut state = table.initial_state();

    for _ in 0..max_steps {
        if table.states()[state] == halt {
            break;
        }
        let symbol = tape
            .get(&head)
            .cloned()
            .unwrap_or_else(|| BLANK_SYMBOL.to_string());
        let Some(sym_idx) = table.symbol_index(&symbol) else {
            break;
        };
        let Some(entry) = table.get(sym_idx, state) else {
            break;
        };
        for step in &entry.steps {
            match step {
                ActionStep::MoveRight => head += 1,
                ActionStep::MoveLeft => head -= 1,
                ActionStep::NoOp => {}
                ActionStep::Print { symbol } => {
                    tape.insert(head, symbol.clone());
                }
            }
        }
        state = entry.target_state;
    }

    let contents: String = tape
        .values()
        .filter(|s| s.as_str() != BLANK_SYMBOL)
        .map(String::as_str)
        .collect();
    (contents, table.states()[state].clone())
}

// =============================================================================
// Demo programs
// =============================================================================

#[test]
fn binary_increment_parses() {
    let program = Compiler::parse(BINARY_INCREMENT).unwrap();
    assert_eq!(program.states, vec!["right", "carry", "done"]);
    assert_eq!(program.initial_state, "right");
    assert_eq!(program.symbols, vec!["o", "1"]);
    assert_eq!(program.transitions.len(), 5);
    assert_eq!(program.transitions[0].condition, Condition::any_of(["o", "1"]));
    assert_eq!(
        program.transitions[2].steps,
        vec![ActionStep::print("o"), ActionStep::MoveLeft]
    );
    assert!(validate(&program).is_empty());
}

#[test]
fn binary_increment_table() {
    let table = Compiler::compile(BINARY_INCREMENT).unwrap();
    assert_eq!(table.symbols(), ["o", "1", "X"]);
    assert_eq!(table.states(), ["right", "carry", "done"]);
    // right: 3 cells, carry: 3 cells, done: 3 cells via the wildcard
    assert_eq!(table.len(), 9);
}

#[test]
fn binary_increment_runs() {
    let table = Compiler::compile(BINARY_INCREMENT).unwrap();
    assert_eq!(run(&table, "1o1", "done", 100), ("11o".to_string(), "done".to_string()));
    assert_eq!(run(&table, "11", "done", 100), ("1oo".to_string(), "done".to_string()));
    assert_eq!(run(&table, "o", "done", 100), ("1".to_string(), "done".to_string()));
}

#[test]
fn shadowed_rules_resolve_deterministically() {
    let table = Compiler::compile(SHADOWED).unwrap();
    let text = render_table(&table, EmitFormat::Text).unwrap();
    assert_eq!(text, "b, a -> R, c\nz, a -> L, d\nX, a -> L, d\n");
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn minimal_program_end_to_end() {
    let program = Compiler::parse("STATES: [a]\nSYMBOLS: e\nTRANSITIONS:\na,*,X,a\n").unwrap();
    assert_eq!(program.states, vec!["a"]);
    assert_eq!(program.initial_state, "a");
    assert_eq!(program.symbols, vec!["e"]);
    assert_eq!(program.transitions.len(), 1);
    assert_eq!(program.transitions[0].condition, Condition::Wildcard);
    assert_eq!(program.transitions[0].steps, vec![ActionStep::NoOp]);

    let table = compile(program);
    assert_eq!(table.len(), 2);
    for symbol in ["e", "X"] {
        let entry = table.lookup(symbol, "a").unwrap();
        assert_eq!(entry.steps, vec![ActionStep::NoOp]);
        assert_eq!(entry.target_state, table.state_index("a").unwrap());
    }
}

#[test]
fn misplaced_hash_is_a_lexical_error() {
    let src = "STATES: [a]\nSYMBOLS: e\nTRANSITIONS:\na,e,X,a # not a comment\n";
    let err = Compiler::compile(src).unwrap_err();
    assert_eq!(err, CompileError::lexical('#', Location::new(44, 4, 9)));
}

#[test]
fn missing_bracketed_state_is_a_syntax_error() {
    let err = Compiler::parse("STATES: a, b\nSYMBOLS: e\nTRANSITIONS:\n").unwrap_err();
    match err {
        CompileError::Syntax { expected, .. } => assert_eq!(expected, TokenKind::LeftBracket),
        other => panic!("expected syntax error, got {other:?}"),
    }
}

#[test]
fn wildcard_fallback_around_specific_rule() {
    let src = "STATES: [a], c, d\nSYMBOLS: b, k, m\nTRANSITIONS:\na,b,R,c\na,*,L,d\n";
    let table = Compiler::compile(src).unwrap();
    let c = table.state_index("c").unwrap();
    let d = table.state_index("d").unwrap();
    assert_eq!(table.lookup("b", "a").unwrap().target_state, c);
    assert_eq!(table.lookup("b", "a").unwrap().steps, vec![ActionStep::MoveRight]);
    for symbol in ["k", "m", "X"] {
        assert_eq!(table.lookup(symbol, "a").unwrap().target_state, d);
        assert_eq!(table.lookup(symbol, "a").unwrap().steps, vec![ActionStep::MoveLeft]);
    }
}

#[test]
fn alternatives_cover_each_symbol() {
    let program = Compiler::parse("STATES: [s]\nSYMBOLS: o, 1\nTRANSITIONS:\ns,o|1,R,s\n").unwrap();
    assert_eq!(program.transitions[0].condition, Condition::any_of(["o", "1"]));
    let table = compile(program);
    assert!(table.lookup("o", "s").is_some());
    assert!(table.lookup("1", "s").is_some());
    assert!(table.lookup("X", "s").is_none());
}

#[test]
fn program_json_is_structured() {
    let program = Compiler::parse(BINARY_INCREMENT).unwrap();
    let json = render_program(&program, EmitFormat::Json).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["initial_state"], "right");
    assert_eq!(value["transitions"][4]["condition"]["kind"], "wildcard");
}
