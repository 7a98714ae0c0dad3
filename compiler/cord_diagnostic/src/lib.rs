//! Diagnostic and error reporting for the Cord compiler.
//!
//! Every fatal condition — lexical, syntactic, or name-resolution — is
//! reported as one [`Diagnostic`]: a source file, the offending span, and a
//! message. Rendering follows the compatibility format
//!
//! ```text
//! <path>:<line>:<col>: error: <message>
//!  <ln#> | <context with the span highlighted>
//! ```
//!
//! with a right-aligned 5-character line-number gutter and a `| `
//! separator. Highlights spanning several source lines continue with one
//! gutter line per source line.

mod diagnostic;

pub use diagnostic::Diagnostic;
