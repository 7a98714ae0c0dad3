//! Stack-permutation ("shuffle") diagrams.
//!
//! A shuffle literal `{a b -- b a}` names the operands consumed from the
//! stack and the order they are pushed back. After parsing, the names are
//! gone: what remains is the input count and, for each output, the
//! positional index of the input it copies. `{a b -- b a}` is therefore
//! `in_count = 2, out = [1, 0]`, and an output name with no matching input
//! is dropped from `out` entirely.

use std::fmt;

use smallvec::SmallVec;

/// Output indices rarely exceed a handful of entries; keep them inline.
pub type OutIndices = SmallVec<[u32; 8]>;

/// A compiled stack-permutation diagram.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Shuffle {
    /// Number of operands consumed from the stack.
    pub in_count: u32,
    /// For each operand pushed back, the position (0 = deepest consumed
    /// operand) of the input it copies.
    pub out: OutIndices,
}

impl Shuffle {
    /// Create a shuffle from its input count and output indices.
    pub fn new(in_count: u32, out: impl IntoIterator<Item = u32>) -> Self {
        Shuffle {
            in_count,
            out: out.into_iter().collect(),
        }
    }

    /// Number of operands consumed.
    pub fn in_count(&self) -> u32 {
        self.in_count
    }

    /// The output index list.
    pub fn out(&self) -> &[u32] {
        &self.out
    }
}

impl fmt::Display for Shuffle {
    /// Prints the diagram with positional names, e.g. `{0 1 -- 1 0}`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for i in 0..self.in_count {
            write!(f, "{i} ")?;
        }
        write!(f, "--")?;
        for &out in &self.out {
            write!(f, " {out}")?;
        }
        write!(f, "}}")
    }
}
