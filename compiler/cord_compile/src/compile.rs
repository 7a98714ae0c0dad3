//! Lowering token trees to control lists.
//!
//! The compiler walks a parsed token tree and produces the [`List`] of
//! values the evaluator runs. Literals lower one-to-one. A word is
//! resolved against the current scope and replaced by the value it names,
//! so the output contains no names at all. A definition compiles its body
//! in the scope as of the `:`, then binds the result; it emits nothing
//! into the output. Nested list literals are lowered with an explicit
//! frame stack.

use std::mem;
use std::rc::Rc;
use std::slice;

use cord_diagnostic::Diagnostic;
use cord_eval::{FnDef, List, Value};
use cord_ir::{ParseBlock, ParseToken, SourceFile, TokenKind};
use cord_stack::{ensure_sufficient_stack, Stack};
use tracing::trace;

use crate::scope::{Binding, Def, Scope};

/// Compile top-level tokens against `scope`, returning the control list
/// and the scope including any definitions the tokens made.
pub fn compile(
    file: &Rc<SourceFile>,
    tokens: &[ParseToken],
    scope: Scope,
) -> Result<(List, Scope), Diagnostic> {
    let mut compiler = Compiler::new(scope);
    let ctrl = compiler.compile(file, tokens)?;
    Ok((ctrl, compiler.into_scope()))
}

pub struct Compiler {
    scope: Scope,
}

struct Frame<'t> {
    rest: slice::Iter<'t, ParseToken>,
    out: Vec<Value>,
}

impl Compiler {
    pub fn new(scope: Scope) -> Self {
        Compiler { scope }
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    pub fn into_scope(self) -> Scope {
        self.scope
    }

    pub fn compile(
        &mut self,
        file: &Rc<SourceFile>,
        tokens: &[ParseToken],
    ) -> Result<List, Diagnostic> {
        let mut cur = tokens.iter();
        let mut out: Vec<Value> = Vec::new();
        let mut frames: Stack<Frame<'_>> = Stack::new();

        loop {
            let Some(token) = cur.next() else {
                match frames.pop() {
                    Some(frame) => {
                        let items = List::from_values(out);
                        out = frame.out;
                        out.push(Value::List(items));
                        cur = frame.rest;
                        continue;
                    }
                    None => break,
                }
            };

            match &token.kind {
                TokenKind::Word => {
                    let name = file.text(token.span);
                    match self.scope.lookup(&name) {
                        Some(binding) => out.push(binding.value()),
                        None => {
                            return Err(Diagnostic::error(
                                Rc::clone(file),
                                token.span,
                                format!("{name} is undefined"),
                            ));
                        }
                    }
                }
                TokenKind::List(items) => {
                    frames.push(Frame {
                        rest: mem::replace(&mut cur, items.iter()),
                        out: mem::take(&mut out),
                    });
                }
                TokenKind::Block(block) => self.define(file, block)?,
                TokenKind::Int(i) => out.push(Value::Int(*i)),
                TokenKind::Float(x) => out.push(Value::Float(*x)),
                TokenKind::Char(c) => out.push(Value::Char(*c)),
                TokenKind::Str(bytes) => out.push(Value::Str(Rc::clone(bytes))),
                TokenKind::Shuffle(shuffle) => out.push(Value::Shuffle(Rc::clone(shuffle))),
                // Structural tokens never reach the compiler.
                TokenKind::Empty | TokenKind::Indent(_) | TokenKind::Op(_) => {}
            }
        }

        Ok(List::from_values(out))
    }

    /// Compile a definition body in the scope as of its `:` and bind the
    /// name. The snapshot is the body's own scope, so definitions nested
    /// in the body resolve, but the name itself does not; recursion needs
    /// a builtin.
    fn define(&mut self, file: &Rc<SourceFile>, block: &ParseBlock) -> Result<(), Diagnostic> {
        let mut inner = Compiler::new(self.scope.clone());
        let body = ensure_sufficient_stack(|| inner.compile(file, &block.body))?;

        let name = file.text(block.head.span).into_owned();
        trace!(name = %name, "define");
        let fndef = Rc::new(FnDef::new(name, body));
        let binding = Rc::new(Binding::new(Def::Fn(fndef), inner.into_scope()));
        self.scope = self.scope.insert(binding);
        Ok(())
    }
}
