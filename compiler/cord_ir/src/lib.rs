//! Core front-end types for the Cord language.
//!
//! This crate sits at the bottom of the dependency graph and holds the
//! types every other compiler crate shares:
//!
//! - [`Span`] — compact byte-offset source spans
//! - [`SourceFile`] — a loaded source with line/column lookup
//! - [`ParseToken`] / [`TokenKind`] — the lexer/parser token tree
//! - [`Shuffle`] — stack-permutation diagrams (`{a b -- b a}`)
//! - [`chars`] — the generalized UTF-8 codec shared by lexer and runtime

pub mod chars;
mod shuffle;
mod source;
mod span;
mod token;

pub use shuffle::Shuffle;
pub use source::SourceFile;
pub use span::Span;
pub use token::{Op, ParseBlock, ParseToken, TokenKind};
