//! The Cord compiler.
//!
//! Resolves every word in a parsed token tree against a persistent
//! [`Scope`] and lowers the tree to the control [`List`] the evaluator
//! runs. Definitions bind eagerly with a snapshot of their compile-time
//! scope, which gives the language lexical scoping without a runtime
//! environment.
//!
//! [`List`]: cord_eval::List

mod compile;
mod scope;

pub use compile::{compile, Compiler};
pub use scope::{Binding, Def, Scope};
