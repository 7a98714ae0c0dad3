// Test code uses unwrap for clarity - panics provide good test failure messages
#![allow(clippy::unwrap_used)]

//! End-to-end runs through parse, compile, and eval with a small scope
//! of host builtins.

use std::rc::Rc;

use cord_compile::Scope;
use cord_eval::{Builtin, Value};
use cord_ir::SourceFile;
use cordc::pipeline::{self, Outcome};
use pretty_assertions::assert_eq;

/// A scope with just enough builtins to exercise programs.
fn test_scope() -> Scope {
    let add = Builtin::new("+", |ev: &mut cord_eval::Evaluator| {
        let (Some(Value::Int(b)), Some(Value::Int(a))) = (ev.pop(), ev.pop()) else {
            return false;
        };
        ev.push(Value::Int(a.wrapping_add(b)));
        true
    });
    let dup = Builtin::new("dup", |ev: &mut cord_eval::Evaluator| {
        let Some(top) = ev.peek().cloned() else {
            return false;
        };
        ev.push(top);
        true
    });
    let shuf = Builtin::new("shuf", |ev: &mut cord_eval::Evaluator| {
        let Some(Value::Shuffle(shuffle)) = ev.pop() else {
            return false;
        };
        let mut ins = Vec::with_capacity(shuffle.in_count() as usize);
        for _ in 0..shuffle.in_count() {
            match ev.pop() {
                Some(value) => ins.push(value),
                None => return false,
            }
        }
        ins.reverse();
        for &index in shuffle.out() {
            ev.push(ins[index as usize].clone());
        }
        true
    });
    let abort = Builtin::new("abort", |_: &mut cord_eval::Evaluator| false);

    Scope::new()
        .with_builtin(add)
        .with_builtin(dup)
        .with_builtin(shuf)
        .with_builtin(abort)
}

fn run(src: &str) -> Outcome {
    let file = Rc::new(SourceFile::from_source(src));
    pipeline::run(&file, test_scope()).unwrap()
}

fn run_err(src: &str) -> String {
    let file = Rc::new(SourceFile::from_source(src));
    let diagnostic = pipeline::run(&file, test_scope()).unwrap_err();
    diagnostic.message().to_owned()
}

fn stack(outcome: &Outcome) -> Vec<Value> {
    outcome.evaluator.stack().iter().cloned().collect()
}

#[test]
fn arithmetic() {
    let outcome = run("2 3 +");
    assert!(outcome.finished);
    assert_eq!(stack(&outcome), vec![Value::Int(5)]);
}

#[test]
fn char_escape_literal() {
    let outcome = run(r"'\x41'");
    assert_eq!(stack(&outcome), vec![Value::Char(0x41)]);
}

#[test]
fn definition_and_call() {
    let outcome = run("double: dup +\n4 double");
    assert!(outcome.finished);
    assert_eq!(stack(&outcome), vec![Value::Int(8)]);
}

#[test]
fn shuffle_swaps() {
    let outcome = run("1 2 {a b -- b a} shuf");
    assert_eq!(stack(&outcome), vec![Value::Int(2), Value::Int(1)]);
}

#[test]
fn abort_stops_evaluation() {
    let outcome = run("1 abort 2");
    assert!(!outcome.finished);
    assert_eq!(stack(&outcome), vec![Value::Int(1)]);
}

#[test]
fn undefined_word_is_an_error() {
    assert_eq!(run_err("2 3 frobnicate"), "frobnicate is undefined");
}

#[test]
fn definitions_land_in_the_outcome_scope() {
    let outcome = run("triple: dup dup + +");
    assert!(outcome.scope.lookup("triple").is_some());
    assert!(stack(&outcome).is_empty());
}

#[test]
fn nested_definitions_by_indentation() {
    let outcome = run("quad:\n  double: dup +\n  double double\n3 quad");
    assert_eq!(stack(&outcome), vec![Value::Int(12)]);
}

#[test]
fn lists_are_data() {
    let outcome = run("[1 2 +]");
    let values = stack(&outcome);
    assert_eq!(values.len(), 1);
    let Value::List(list) = &values[0] else {
        panic!("expected a list, got {:?}", values[0]);
    };
    assert_eq!(list.len(), 3);
}

#[test]
fn scope_threads_across_runs() {
    let file = Rc::new(SourceFile::from_source("incr: 1 +"));
    let outcome = pipeline::run(&file, test_scope()).unwrap();
    let file = Rc::new(SourceFile::from_source("41 incr"));
    let outcome = pipeline::run(&file, outcome.scope).unwrap();
    assert_eq!(stack(&outcome), vec![Value::Int(42)]);
}
