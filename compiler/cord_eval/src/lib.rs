//! The Cord runtime.
//!
//! Holds the value model ([`Value`], persistent [`List`]s, [`Builtin`]s,
//! [`FnDef`]s) and the [`Evaluator`], a continuation-stack machine over
//! compiled control lists. The compiler lowers token trees into these
//! values; embedders supply the builtins that give programs behavior.

mod builtin;
mod interpreter;
mod list;
mod value;

pub use builtin::Builtin;
pub use interpreter::Evaluator;
pub use list::List;
pub use value::{FnDef, Value};
