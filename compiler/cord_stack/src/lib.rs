//! Stack support for the Cord compiler.
//!
//! Cord encodes unbounded structural depth — nested list literals, nested
//! definitions, deep call chains — with explicit heap-allocated stacks of
//! frames instead of native recursion. [`Stack`] is that frame stack: a
//! growable buffer with a deliberate grow/shrink policy, used for the
//! parser's indent/token/base/list stacks and the evaluator's operand and
//! continuation stacks.
//!
//! The one remaining native recursion point (compiling nested definition
//! bodies) is guarded by [`ensure_sufficient_stack`], which grows the host
//! stack on demand.

/// Minimum stack space to keep available (100KB red zone).
///
/// If less than this amount remains, we'll grow the stack.
const RED_ZONE: usize = 100 * 1024;

/// Stack space to allocate when growing (1MB).
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Ensure sufficient native stack space is available before executing `f`.
///
/// If the remaining stack is below the red zone threshold, this allocates
/// additional stack space before calling `f`, preventing overflow in
/// recursive code paths (deeply nested definitions).
#[inline]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

/// A growable frame stack.
///
/// Push beyond capacity grows the buffer to `2 × (len + 1)` slots; popping
/// or dropping down to a quarter of capacity shrinks it to
/// `(len + capacity) / 2`. Growth always reallocates to at least the new
/// used size, and shrinking preserves every retained frame. Allocation
/// failure aborts the process — out of memory is unrecoverable here.
#[derive(Clone, Debug)]
pub struct Stack<T> {
    items: Vec<T>,
}

impl<T> Default for Stack<T> {
    fn default() -> Self {
        Stack::new()
    }
}

impl<T> Stack<T> {
    /// Create an empty stack.
    pub fn new() -> Self {
        Stack { items: Vec::new() }
    }

    /// Create an empty stack with space for `cap` frames.
    pub fn with_capacity(cap: usize) -> Self {
        Stack {
            items: Vec::with_capacity(cap),
        }
    }

    /// Number of frames on the stack.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the stack is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Current capacity in frames.
    pub fn capacity(&self) -> usize {
        self.items.capacity()
    }

    /// Push a frame, growing the buffer if it is full.
    pub fn push(&mut self, item: T) {
        if self.items.len() == self.items.capacity() {
            let target = 2 * (self.items.len() + 1);
            self.items.reserve_exact(target - self.items.len());
        }
        self.items.push(item);
    }

    /// The top frame, without removing it.
    pub fn peek(&self) -> Option<&T> {
        self.items.last()
    }

    /// Mutable access to the top frame.
    pub fn peek_mut(&mut self) -> Option<&mut T> {
        self.items.last_mut()
    }

    /// The frame `n` below the top (`peek_n(0)` is the top frame).
    pub fn peek_n(&self, n: usize) -> Option<&T> {
        self.items.len().checked_sub(n + 1).map(|i| &self.items[i])
    }

    /// Remove and return the top frame.
    pub fn pop(&mut self) -> Option<T> {
        let item = self.items.pop();
        self.maybe_shrink();
        item
    }

    /// Drop the top `n` frames.
    pub fn drop_n(&mut self, n: usize) {
        let keep = self.items.len().saturating_sub(n);
        self.items.truncate(keep);
        self.maybe_shrink();
    }

    /// All frames, bottom first.
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// Iterate over frames, bottom first.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    fn maybe_shrink(&mut self) {
        let cap = self.items.capacity();
        if self.items.len() <= cap / 4 {
            self.items.shrink_to((self.items.len() + cap) / 2);
        }
    }
}

impl<'a, T> IntoIterator for &'a Stack<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests;
