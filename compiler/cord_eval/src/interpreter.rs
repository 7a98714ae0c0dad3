//! The evaluator.
//!
//! Evaluation walks a control list of values. Plain data is pushed onto
//! the value stack, builtins run host code, and a function call swaps the
//! control list for the function's body after parking the remaining
//! continuation on the nest stack. Because the continuation of a call in
//! tail position is empty, it is not parked at all, so tail calls run in
//! constant nest depth.

use cord_stack::Stack;
use tracing::trace;

use crate::list::List;
use crate::value::Value;

#[derive(Debug, Default)]
pub struct Evaluator {
    ctrl: List,
    stack: Stack<Value>,
    nest: Stack<List>,
}

impl Evaluator {
    pub fn new() -> Self {
        Evaluator::default()
    }

    /// Run a control list to completion. Returns `false` if a builtin
    /// aborted evaluation; the stacks are left as the builtin saw them.
    pub fn run(&mut self, ctrl: List) -> bool {
        self.ctrl = ctrl;

        loop {
            while let Some(value) = self.ctrl.pop() {
                match value {
                    Value::Builtin(builtin) => {
                        trace!(name = builtin.name(), "builtin");
                        if !builtin.call(self) {
                            return false;
                        }
                    }
                    Value::Fn(fndef) => {
                        trace!(name = fndef.name(), "call");
                        self.enter(fndef.body().clone());
                    }
                    value => self.stack.push(value),
                }
            }

            match self.nest.pop() {
                Some(cont) => self.ctrl = cont,
                None => return true,
            }
        }
    }

    /// Switch to a new control list, parking the current one unless the
    /// call is in tail position.
    pub fn enter(&mut self, body: List) {
        if !self.ctrl.is_empty() {
            let cont = std::mem::replace(&mut self.ctrl, body);
            self.nest.push(cont);
        } else {
            self.ctrl = body;
        }
    }

    /// The value stack, for builtins.
    pub fn stack(&self) -> &Stack<Value> {
        &self.stack
    }

    pub fn push(&mut self, value: Value) {
        self.stack.push(value);
    }

    pub fn pop(&mut self) -> Option<Value> {
        self.stack.pop()
    }

    pub fn peek(&self) -> Option<&Value> {
        self.stack.peek()
    }

    /// Current nesting depth, one per suspended continuation.
    pub fn depth(&self) -> usize {
        self.nest.len()
    }
}

#[cfg(test)]
mod tests;
