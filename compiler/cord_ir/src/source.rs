//! Loaded source files.
//!
//! A [`SourceFile`] owns the raw bytes of one compilation unit and answers
//! the position queries diagnostics need: 1-based line/column for a byte
//! offset and the extent of the line containing an offset.
//!
//! Sources are kept as bytes, not `str`: Cord's text encoding is a
//! generalized UTF-8 (codepoints up to `0x1F_FFFF`), and only character and
//! string literals are validated during scanning.

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use memchr::{memchr, memrchr};

use crate::Span;

/// One loaded source file: an optional path (for diagnostics) and the
/// raw source bytes.
#[derive(Clone, Debug)]
pub struct SourceFile {
    path: Option<PathBuf>,
    src: Vec<u8>,
}

impl SourceFile {
    /// Create a source file read from `path`.
    pub fn new(path: impl Into<PathBuf>, src: Vec<u8>) -> Self {
        SourceFile {
            path: Some(path.into()),
            src,
        }
    }

    /// Create a pathless in-memory source (tests, embedding).
    pub fn from_source(src: impl Into<Vec<u8>>) -> Self {
        SourceFile {
            path: None,
            src: src.into(),
        }
    }

    /// Path the source was loaded from, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// The raw source bytes.
    pub fn src(&self) -> &[u8] {
        &self.src
    }

    /// Length of the source in bytes.
    pub fn len(&self) -> usize {
        self.src.len()
    }

    /// Check if the source is empty.
    pub fn is_empty(&self) -> bool {
        self.src.is_empty()
    }

    /// The bytes covered by `span`.
    pub fn slice(&self, span: Span) -> &[u8] {
        &self.src[span.to_range()]
    }

    /// The text covered by `span`, with invalid sequences replaced.
    pub fn text(&self, span: Span) -> Cow<'_, str> {
        String::from_utf8_lossy(self.slice(span))
    }

    /// 1-based line and column of the byte at `pos`.
    ///
    /// The column counts bytes from the start of the line, so it is exact
    /// for ASCII and byte-accurate (not codepoint-accurate) otherwise.
    pub fn line_col(&self, pos: usize) -> (usize, usize) {
        let pos = pos.min(self.src.len());
        let line = memchr::memchr_iter(b'\n', &self.src[..pos]).count() + 1;
        let col = pos - self.line_start(pos) + 1;
        (line, col)
    }

    /// Byte offset of the start of the line containing `pos`.
    pub fn line_start(&self, pos: usize) -> usize {
        let pos = pos.min(self.src.len());
        memrchr(b'\n', &self.src[..pos]).map_or(0, |nl| nl + 1)
    }

    /// Byte offset just past the last content byte of the line containing
    /// `pos` (the position of the terminating `\n`, or end of file).
    pub fn line_end(&self, pos: usize) -> usize {
        let pos = pos.min(self.src.len());
        memchr(b'\n', &self.src[pos..]).map_or(self.src.len(), |nl| pos + nl)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn line_col_is_one_based() {
        let file = SourceFile::from_source("ab\ncd\nef");
        assert_eq!(file.line_col(0), (1, 1));
        assert_eq!(file.line_col(1), (1, 2));
        assert_eq!(file.line_col(3), (2, 1));
        assert_eq!(file.line_col(7), (3, 2));
    }

    #[test]
    fn line_bounds() {
        let file = SourceFile::from_source("ab\ncd\nef");
        assert_eq!(file.line_start(4), 3);
        assert_eq!(file.line_end(4), 5);
        // Last line has no terminating newline.
        assert_eq!(file.line_start(7), 6);
        assert_eq!(file.line_end(7), 8);
    }

    #[test]
    fn line_col_clamps_past_end() {
        let file = SourceFile::from_source("ab");
        assert_eq!(file.line_col(100), (1, 3));
    }

    #[test]
    fn slice_and_text() {
        let file = SourceFile::from_source("hello world");
        assert_eq!(file.slice(Span::new(0, 5)), b"hello");
        assert_eq!(file.text(Span::new(6, 11)), "world");
    }
}
