//! Random-access byte view over a source buffer.
//!
//! Scanning in Cord is position-based rather than stream-based: the
//! structuring parser owns the position and asks the lexer for the token
//! at a given offset, so the cursor is a shared view instead of a mutable
//! iterator. Reads past the end yield `0`, which doubles as the
//! end-of-input sentinel throughout the scanner (a NUL byte in the input
//! terminates scanning the same way).

/// Characters that end a token: whitespace, brackets, comments, `:`, `;`.
const DELIMS: &[u8] = b"(){}[]#:;";

#[derive(Clone, Copy)]
pub(crate) struct Cursor<'a> {
    src: &'a [u8],
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(src: &'a [u8]) -> Self {
        Cursor { src }
    }

    /// The byte at `at`, or `0` past the end.
    #[inline]
    pub(crate) fn byte(&self, at: usize) -> u8 {
        self.src.get(at).copied().unwrap_or(0)
    }

    #[inline]
    pub(crate) fn slice(&self, start: usize, end: usize) -> &'a [u8] {
        let end = end.min(self.src.len());
        let start = start.min(end);
        &self.src[start..end]
    }

    /// Bytes from `at` to the end.
    #[inline]
    pub(crate) fn tail(&self, at: usize) -> &'a [u8] {
        &self.src[at.min(self.src.len())..]
    }

    /// True at the end of input or at an embedded NUL.
    #[inline]
    pub(crate) fn at_end(&self, at: usize) -> bool {
        self.byte(at) == 0
    }

    #[inline]
    pub(crate) fn is_space(&self, at: usize) -> bool {
        is_space(self.byte(at))
    }

    /// True where a token must stop: end of input, whitespace, or one of
    /// the delimiter characters.
    #[inline]
    pub(crate) fn is_delim(&self, at: usize) -> bool {
        let b = self.byte(at);
        b == 0 || is_space(b) || DELIMS.contains(&b)
    }
}

/// ASCII whitespace including vertical tab, which
/// [`u8::is_ascii_whitespace`] excludes.
#[inline]
pub(crate) fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\x0b' | b'\x0c' | b'\r')
}
