//! Byte-level scanning for Cord source.
//!
//! The lexer turns bytes into [`ParseToken`]s but does not structure
//! them; nesting of definitions and lists is the parser's job. It is
//! position-based: callers hold a byte offset into the [`SourceFile`] and
//! advance it by each returned token's span.
//!
//! [`ParseToken`]: cord_ir::ParseToken
//! [`SourceFile`]: cord_ir::SourceFile

mod cursor;
mod scan;

pub use scan::Lexer;
