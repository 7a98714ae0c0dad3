//! Host-provided primitives.
//!
//! The language core defines no operations of its own; everything a
//! program can *do* comes from builtins registered by the embedder. A
//! builtin returning `false` aborts evaluation immediately.

use std::fmt;
use std::rc::Rc;

use crate::interpreter::Evaluator;

pub struct Builtin {
    name: Rc<str>,
    run: Box<dyn Fn(&mut Evaluator) -> bool>,
}

impl Builtin {
    pub fn new(
        name: impl Into<Rc<str>>,
        run: impl Fn(&mut Evaluator) -> bool + 'static,
    ) -> Rc<Builtin> {
        Rc::new(Builtin { name: name.into(), run: Box::new(run) })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn call(&self, evaluator: &mut Evaluator) -> bool {
        (self.run)(evaluator)
    }
}

impl fmt::Debug for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Builtin").field("name", &self.name).finish_non_exhaustive()
    }
}
