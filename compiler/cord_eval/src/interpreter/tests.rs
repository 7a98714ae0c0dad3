use std::cell::Cell;
use std::rc::Rc;

use pretty_assertions::assert_eq;

use crate::builtin::Builtin;
use crate::list::List;
use crate::value::{FnDef, Value};
use crate::Evaluator;

fn ints(values: &[i64]) -> List {
    List::from_values(values.iter().copied().map(Value::Int).collect())
}

fn stack_ints(evaluator: &Evaluator) -> Vec<i64> {
    evaluator
        .stack()
        .iter()
        .map(|v| match v {
            Value::Int(i) => *i,
            other => panic!("expected int, got {other}"),
        })
        .collect()
}

#[test]
fn data_pushes_in_order() {
    let mut evaluator = Evaluator::new();
    assert!(evaluator.run(ints(&[1, 2, 3])));
    assert_eq!(stack_ints(&evaluator), vec![1, 2, 3]);
}

#[test]
fn builtin_runs_against_the_stack() {
    let add = Builtin::new("+", |w: &mut Evaluator| {
        let (Some(Value::Int(b)), Some(Value::Int(a))) = (w.pop(), w.pop()) else {
            return false;
        };
        w.push(Value::Int(a + b));
        true
    });

    let ctrl = List::from_values(vec![
        Value::Int(1),
        Value::Int(2),
        Value::Builtin(add),
    ]);
    let mut evaluator = Evaluator::new();
    assert!(evaluator.run(ctrl));
    assert_eq!(stack_ints(&evaluator), vec![3]);
}

#[test]
fn builtin_false_aborts_immediately() {
    let abort = Builtin::new("abort", |_: &mut Evaluator| false);
    let ctrl = List::from_values(vec![
        Value::Int(1),
        Value::Builtin(abort),
        Value::Int(2),
    ]);
    let mut evaluator = Evaluator::new();
    assert!(!evaluator.run(ctrl));
    // Whatever ran before the abort is still visible.
    assert_eq!(stack_ints(&evaluator), vec![1]);
}

#[test]
fn call_resumes_continuation() {
    let f = Rc::new(FnDef::new("f", ints(&[10, 11])));
    let ctrl = List::from_values(vec![Value::Fn(f), Value::Int(20)]);
    let mut evaluator = Evaluator::new();
    assert!(evaluator.run(ctrl));
    assert_eq!(stack_ints(&evaluator), vec![10, 11, 20]);
}

#[test]
fn nested_calls_unwind_in_order() {
    let inner = Rc::new(FnDef::new("inner", ints(&[2])));
    let outer = Rc::new(FnDef::new(
        "outer",
        List::from_values(vec![Value::Int(1), Value::Fn(inner), Value::Int(3)]),
    ));
    let ctrl = List::from_values(vec![Value::Fn(outer), Value::Int(4)]);
    let mut evaluator = Evaluator::new();
    assert!(evaluator.run(ctrl));
    assert_eq!(stack_ints(&evaluator), vec![1, 2, 3, 4]);
}

/// A builtin that records the nest depth at the moment it runs.
fn probe(depth: &Rc<Cell<usize>>) -> Rc<Builtin> {
    let depth = Rc::clone(depth);
    Builtin::new("probe", move |w: &mut Evaluator| {
        depth.set(w.depth());
        true
    })
}

#[test]
fn tail_calls_do_not_grow_the_nest() {
    let depth = Rc::new(Cell::new(usize::MAX));
    let f = Rc::new(FnDef::new(
        "f",
        List::from_values(vec![Value::Builtin(probe(&depth))]),
    ));
    // Each body's call sits in tail position.
    let g = Rc::new(FnDef::new("g", List::from_values(vec![Value::Fn(f)])));
    let h = Rc::new(FnDef::new("h", List::from_values(vec![Value::Fn(g)])));

    let mut evaluator = Evaluator::new();
    assert!(evaluator.run(List::from_values(vec![Value::Fn(h)])));
    assert_eq!(depth.get(), 0);
}

#[test]
fn non_tail_calls_park_continuations() {
    let depth = Rc::new(Cell::new(usize::MAX));
    let f = Rc::new(FnDef::new(
        "f",
        List::from_values(vec![Value::Builtin(probe(&depth))]),
    ));
    let g = Rc::new(FnDef::new(
        "g",
        List::from_values(vec![Value::Fn(f), Value::Int(1)]),
    ));

    let mut evaluator = Evaluator::new();
    assert!(evaluator.run(List::from_values(vec![Value::Fn(g), Value::Int(2)])));
    assert_eq!(depth.get(), 2);
    assert_eq!(stack_ints(&evaluator), vec![1, 2]);
}

#[test]
fn evaluator_reuse_accumulates_stack() {
    let mut evaluator = Evaluator::new();
    assert!(evaluator.run(ints(&[1])));
    assert!(evaluator.run(ints(&[2])));
    assert_eq!(stack_ints(&evaluator), vec![1, 2]);
}
