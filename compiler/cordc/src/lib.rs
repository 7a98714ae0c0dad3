//! The Cord driver library.
//!
//! Backs the `cord` binary and gives embedders a one-call pipeline:
//! [`input::load`] a file, then [`pipeline::run`] it against a
//! [`Scope`] holding the host's builtins.
//!
//! [`Scope`]: cord_compile::Scope

pub mod input;
pub mod pipeline;
