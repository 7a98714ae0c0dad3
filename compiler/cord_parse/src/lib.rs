//! Indentation-sensitive structuring parser for Cord.
//!
//! Turns a [`SourceFile`] into a tree of [`ParseToken`]s: definitions
//! (`name: body`, closed by dedent or `;`) become [`TokenKind::Block`]
//! and bracketed literals become [`TokenKind::List`]. The first malformed
//! construct aborts the parse with a [`Diagnostic`].
//!
//! [`SourceFile`]: cord_ir::SourceFile
//! [`ParseToken`]: cord_ir::ParseToken
//! [`TokenKind::Block`]: cord_ir::TokenKind::Block
//! [`TokenKind::List`]: cord_ir::TokenKind::List
//! [`Diagnostic`]: cord_diagnostic::Diagnostic

mod parser;

pub use parser::parse;
