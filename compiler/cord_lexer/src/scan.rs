//! The token scanner.
//!
//! [`Lexer`] is position-based: the structuring parser asks for the token
//! starting at a byte offset and advances by the token's span. Three entry
//! points cover the grammar's layers:
//!
//! - [`Lexer::empty`] consumes whitespace and comments, stopping early at
//!   a newline whose next line is non-empty so indentation survives
//! - [`Lexer::indent`] consumes a newline plus leading whitespace and
//!   reports the new line's indentation
//! - [`Lexer::token`] scans one token: an op, a numeral, a character or
//!   string literal, a shuffle diagram, or a word
//!
//! Every malformed token is a fatal [`Diagnostic`]; scanning does not
//! resynchronize.

use std::rc::Rc;

use cord_diagnostic::Diagnostic;
use cord_ir::chars;
use cord_ir::{Op, ParseToken, Shuffle, SourceFile, Span, TokenKind};

use crate::cursor::{is_space, Cursor};

/// Characters that may not begin a shuffle diagram member.
const SHUFFLE_ERRORS: &[u8] = b"{)]:;";

pub struct Lexer<'a> {
    file: &'a Rc<SourceFile>,
    cur: Cursor<'a>,
}

impl<'a> Lexer<'a> {
    pub fn new(file: &'a Rc<SourceFile>) -> Self {
        Lexer { file, cur: Cursor::new(file.src()) }
    }

    /// True at the end of input (or at an embedded NUL, which ends
    /// scanning the same way).
    pub fn at_end(&self, at: usize) -> bool {
        self.cur.at_end(at)
    }

    fn tok(&self, start: usize, end: usize, kind: TokenKind) -> ParseToken {
        ParseToken::new(Span::at(start, end), kind)
    }

    fn err(&self, start: usize, end: usize, message: impl Into<String>) -> Diagnostic {
        Diagnostic::error(Rc::clone(self.file), Span::at(start, end), message)
    }

    // Whitespace and comments

    /// Length of a `#` comment, including its terminating newline when
    /// present.
    fn line_comment_len(&self, at: usize) -> usize {
        let tail = self.cur.tail(at);
        match memchr::memchr2(b'\n', b'\0', tail) {
            Some(i) if tail[i] == b'\n' => i + 1,
            Some(i) => i,
            None => tail.len(),
        }
    }

    /// Length of a `(`..`)` comment. Nests; `#` inside skips to the end
    /// of the line, so an unpaired `)` in a line comment does not close
    /// the block.
    fn block_comment_len(&self, at: usize) -> Result<usize, Diagnostic> {
        let mut len = 1;
        let mut nest = 1usize;
        while nest > 0 {
            match self.cur.byte(at + len) {
                0 => return Err(self.err(at, at + 1, "Unmatched (")),
                b'(' => {
                    nest += 1;
                    len += 1;
                }
                b')' => {
                    nest -= 1;
                    len += 1;
                }
                b'#' => len += self.line_comment_len(at + len),
                _ => len += 1,
            }
        }
        Ok(len)
    }

    /// True when the rest of the line holds nothing but whitespace and
    /// comments. A `#` makes the line empty outright; bytes inside an
    /// open `(` count as comment text.
    pub fn is_line_empty(&self, at: usize) -> bool {
        let mut i = at;
        let mut nest = 0usize;
        loop {
            let b = self.cur.byte(i);
            if b == 0 || b == b'\n' {
                return true;
            }
            if b == b'#' {
                return true;
            } else if b == b'(' {
                nest += 1;
            } else if b == b')' {
                nest = nest.saturating_sub(1);
            } else if !is_space(b) && nest == 0 {
                return false;
            }
            i += 1;
        }
    }

    /// True at a newline that begins a non-empty line, which is where
    /// [`Lexer::empty`] must stop so the indentation gets tokenized.
    fn is_indent(&self, at: usize) -> bool {
        self.cur.byte(at) == b'\n' && !self.is_line_empty(at + 1)
    }

    /// Consume whitespace and comments. Stops at [`Lexer::is_indent`]
    /// positions and at the first real token byte.
    pub fn empty(&self, at: usize) -> Result<ParseToken, Diagnostic> {
        let mut len = 0;
        loop {
            let b = self.cur.byte(at + len);
            if b == b'#' {
                len += self.line_comment_len(at + len);
            } else if b == b'(' {
                len += self.block_comment_len(at + len)?;
            } else if self.is_indent(at + len) {
                break;
            } else if is_space(b) {
                len += 1;
            } else {
                break;
            }
        }
        Ok(self.tok(at, at + len, TokenKind::Empty))
    }

    /// Consume a run of whitespace (and any comments opened within it)
    /// and report the resulting indentation. When the run starts with a
    /// newline the newline itself does not count toward the indent.
    pub fn indent(&self, at: usize) -> ParseToken {
        let mut len = 0;
        let mut nest = 0usize;
        loop {
            let b = self.cur.byte(at + len);
            if b == 0 {
                break;
            }
            if b == b'(' {
                nest += 1;
            } else if b == b')' {
                nest = nest.saturating_sub(1);
            } else if !is_space(b) && nest == 0 {
                break;
            }
            len += 1;
        }
        let indent = len - usize::from(self.cur.byte(at) == b'\n');
        self.tok(at, at + len, TokenKind::Indent(indent))
    }

    // Dispatch

    /// Scan the token starting at `at`. The caller guarantees `at` is not
    /// at the end of input and sits on a token boundary (comments and
    /// non-indent whitespace already consumed).
    pub fn token(&self, at: usize) -> Result<ParseToken, Diagnostic> {
        let b = self.cur.byte(at);
        if is_space(b) {
            Ok(self.indent(at))
        } else if let Some(op) = Op::from_byte(b) {
            Ok(self.tok(at, at + 1, TokenKind::Op(op)))
        } else if self.is_binary(at) {
            self.binary(at)
        } else if self.is_hex(at) {
            self.hex(at)
        } else if self.is_decimal(at) {
            self.decimal(at)
        } else if b == b'\'' {
            self.char_lit(at)
        } else if b == b'"' {
            self.str_lit(at)
        } else if b == b'{' {
            self.shuffle(at)
        } else {
            Ok(self.tok(at, at + self.word_len(at), TokenKind::Word))
        }
    }

    // Words

    fn word_len(&self, at: usize) -> usize {
        let mut len = 1;
        while !self.cur.is_delim(at + len) {
            len += 1;
        }
        len
    }

    // Numerals

    fn sign_len(&self, at: usize) -> usize {
        usize::from(self.cur.byte(at) == b'-')
    }

    fn is_binary(&self, at: usize) -> bool {
        let at = at + self.sign_len(at);
        self.cur.byte(at) == b'0' && matches!(self.cur.byte(at + 1), b'b' | b'B')
    }

    fn is_hex(&self, at: usize) -> bool {
        let at = at + self.sign_len(at);
        self.cur.byte(at) == b'0' && matches!(self.cur.byte(at + 1), b'x' | b'X')
    }

    fn is_decimal(&self, at: usize) -> bool {
        let mut at = at + self.sign_len(at);
        if self.cur.byte(at) == b'.' {
            at += 1;
        }
        self.cur.byte(at).is_ascii_digit()
    }

    /// Error for a non-delimiter byte directly after a numeral,
    /// highlighting the whole trailing word.
    fn trailing_err(&self, at: usize, message: &str) -> Diagnostic {
        self.err(at, at + self.word_len(at), message)
    }

    fn binary(&self, at: usize) -> Result<ParseToken, Diagnostic> {
        let mut len = 2 + self.sign_len(at);
        let negative = self.cur.byte(at) == b'-';

        if self.cur.byte(at + len) == 0 {
            return Err(self.err(at, at + len, "Expected 0|1 in binary literal"));
        }

        let mut inum: i64 = 0;
        while matches!(self.cur.byte(at + len), b'0' | b'1') {
            inum = (inum << 1) | i64::from(self.cur.byte(at + len) - b'0');
            len += 1;
        }

        if !self.cur.is_delim(at + len) {
            return Err(self.trailing_err(at + len, "Expected 0|1 in binary literal"));
        }
        let inum = if negative { inum.wrapping_neg() } else { inum };
        Ok(self.tok(at, at + len, TokenKind::Int(inum)))
    }

    fn hex(&self, at: usize) -> Result<ParseToken, Diagnostic> {
        let mut len = 2 + self.sign_len(at);
        let negative = self.cur.byte(at) == b'-';

        if self.cur.byte(at + len) == 0 {
            return Err(self.err(at, at + len, "Expected 0-9|a-f|A-F in hexadecimal literal"));
        }

        let mut inum: i64 = 0;
        while is_nibble(self.cur.byte(at + len)) {
            inum = (inum << 4) | i64::from(nibble(self.cur.byte(at + len)));
            len += 1;
        }

        if !self.cur.is_delim(at + len) {
            return Err(
                self.trailing_err(at + len, "Expected 0-9|a-f|A-F in hexadecimal literal")
            );
        }
        let inum = if negative { inum.wrapping_neg() } else { inum };
        Ok(self.tok(at, at + len, TokenKind::Int(inum)))
    }

    fn decimal(&self, at: usize) -> Result<ParseToken, Diagnostic> {
        let mut len = self.sign_len(at);
        let negative = len > 0;

        let mut inum: i64 = 0;
        let mut right: i64 = 0;
        let mut dot = false;
        let mut place = 0u32;

        loop {
            let b = self.cur.byte(at + len);
            if b == b'.' {
                if dot {
                    return Err(
                        self.err(at + len, at + len + 1, "Expected only one . in number literal")
                    );
                }
                dot = true;
            } else if b.is_ascii_digit() {
                if dot {
                    right = right.wrapping_mul(10).wrapping_add(i64::from(b - b'0'));
                    place += 1;
                } else {
                    inum = inum.wrapping_mul(10).wrapping_add(i64::from(b - b'0'));
                }
            } else {
                break;
            }
            len += 1;
        }

        if !self.cur.is_delim(at + len) {
            return Err(self.trailing_err(at + len, "Expected 0-9|. in number literal"));
        }

        if !dot {
            let inum = if negative { inum.wrapping_neg() } else { inum };
            return Ok(self.tok(at, at + len, TokenKind::Int(inum)));
        }

        #[allow(clippy::cast_precision_loss)]
        let mut fnum = right as f64;
        for _ in 0..place {
            fnum /= 10.0;
        }
        #[allow(clippy::cast_precision_loss)]
        {
            fnum += inum as f64;
        }
        let fnum = if negative { -fnum } else { fnum };
        Ok(self.tok(at, at + len, TokenKind::Float(fnum)))
    }

    // Character escapes and bare characters, shared by character and
    // string literals.

    /// Scan one character at `at` inside a literal. Returns the codepoint
    /// and consumed byte count.
    fn char_bare(&self, at: usize) -> Result<(u32, usize), Diagnostic> {
        if self.cur.byte(at) != b'\\' {
            return self.utf8(at);
        }
        match self.cur.byte(at + 1) {
            b'x' | b'X' | b'u' | b'U' => self.hex_esc(at),
            b'0'..=b'9' => self.dec_esc(at),
            b'a' => Ok((0x07, 2)),
            b'b' => Ok((0x08, 2)),
            b'e' => Ok((0x1b, 2)),
            b'f' => Ok((0x0c, 2)),
            b'n' => Ok((u32::from(b'\n'), 2)),
            b'r' => Ok((u32::from(b'\r'), 2)),
            b't' => Ok((u32::from(b'\t'), 2)),
            b'v' => Ok((0x0b, 2)),
            other => Ok((u32::from(other), 2)),
        }
    }

    /// `\xHH` (up to 2 nibbles) or `\uHHHHHH` (up to 6). At least one
    /// nibble is required; the value may not exceed the character
    /// ceiling.
    fn hex_esc(&self, at: usize) -> Result<(u32, usize), Diagnostic> {
        let max_nibbles = match self.cur.byte(at + 1) {
            b'x' | b'X' => 2,
            _ => 6,
        };
        let mut len = 2;

        if self.cur.byte(at + len) == 0 {
            return Err(self.err(at, at + len, "Unexpected end of file in character escape"));
        } else if !is_nibble(self.cur.byte(at + len)) {
            return Err(self.err(
                at + len,
                at + len + 1,
                "Expected 0-9|a-f|A-F in hex character escape",
            ));
        }

        let mut cnum: u32 = 0;
        for _ in 0..max_nibbles {
            let b = self.cur.byte(at + len);
            if !is_nibble(b) {
                break;
            }
            cnum = (cnum << 4) | u32::from(nibble(b));
            len += 1;
        }

        if cnum > chars::CHAR_MAX {
            return Err(self.err(
                at,
                at + len,
                format!(
                    "Value of character escape {cnum} exceeds max character value {}",
                    chars::CHAR_MAX
                ),
            ));
        }
        Ok((cnum, len))
    }

    /// `\DDD`: up to 3 decimal digits, a byte value at most 255.
    fn dec_esc(&self, at: usize) -> Result<(u32, usize), Diagnostic> {
        let mut len = 1;
        let mut cnum: u32 = 0;
        for _ in 0..3 {
            let b = self.cur.byte(at + len);
            if !b.is_ascii_digit() {
                break;
            }
            cnum = 10 * cnum + u32::from(b - b'0');
            len += 1;
        }

        if cnum > 255 {
            return Err(self.err(
                at,
                at + len,
                format!("Character escape value {cnum} exceeds maximum byte value 255"),
            ));
        }
        Ok((cnum, len))
    }

    fn utf8(&self, at: usize) -> Result<(u32, usize), Diagnostic> {
        let bytes = self.cur.tail(at);
        match chars::decode_width(bytes) {
            Ok(width) => Ok((chars::read(bytes, width), width)),
            Err(report) => {
                use std::fmt::Write as _;
                let mut message = String::from("Invalid UTF-8 sequence:");
                for b in &bytes[..report.min(bytes.len())] {
                    let _ = write!(message, " \\x{b:02x}");
                }
                Err(self.err(at, at + report, message))
            }
        }
    }

    // Character literals

    fn char_lit(&self, at: usize) -> Result<ParseToken, Diagnostic> {
        let mut len = 1;
        if self.cur.byte(at + len) == 0 {
            return Err(self.err(at, at + len, "Unexpected end of file in character literal"));
        }

        let (cnum, clen) = self.char_bare(at + len)?;
        len += clen;

        if self.cur.byte(at + len) == 0 {
            return Err(self.err(at, at + len, "Unexpected end of file in character literal"));
        } else if self.cur.byte(at + len) != b'\'' {
            return Err(self.err(at + len, at + len + 1, "Expected ' after character literal"));
        }
        len += 1;
        Ok(self.tok(at, at + len, TokenKind::Char(cnum)))
    }

    // String literals

    fn str_lit(&self, at: usize) -> Result<ParseToken, Diagnostic> {
        let mut len = 1;
        let mut bytes: Vec<u8> = Vec::new();
        let mut utf8 = [0u8; 4];

        while self.cur.byte(at + len) != b'"' {
            if self.cur.byte(at + len) == 0 {
                return Err(self.err(at, at + len, "Unexpected end of file in string literal"));
            }
            let (cnum, clen) = self.char_bare(at + len)?;
            len += clen;
            let width = chars::encode(cnum, &mut utf8);
            bytes.extend_from_slice(&utf8[..width]);
        }
        len += 1;
        Ok(self.tok(at, at + len, TokenKind::Str(Rc::from(bytes))))
    }

    // Shuffle diagrams

    fn is_pivot(&self, at: usize) -> bool {
        self.cur.byte(at) == b'-' && self.cur.byte(at + 1) == b'-'
    }

    fn shuffle_member_len(&self, at: usize) -> usize {
        let mut len = 1;
        while !self.cur.is_delim(at + len) && !self.is_pivot(at + len) {
            len += 1;
        }
        len
    }

    fn shuffle_member(&self, at: usize) -> Result<usize, Diagnostic> {
        if SHUFFLE_ERRORS.contains(&self.cur.byte(at)) {
            return Err(self.err(at, at + 1, "Invalid character in shuffle diagram"));
        }
        Ok(self.shuffle_member_len(at))
    }

    fn shuffle(&self, at: usize) -> Result<ParseToken, Diagnostic> {
        let mut len = 1;
        len += self.empty_len(at + len)?;

        let mut ins: Vec<&[u8]> = Vec::new();
        while !self.is_pivot(at + len) {
            if self.cur.byte(at + len) == 0 {
                return Err(self.err(at, at + len, "Unexpected end of file in shuffle diagram"));
            }
            let mlen = self.shuffle_member(at + len)?;
            ins.push(self.cur.slice(at + len, at + len + mlen));
            len += mlen;
            len += self.empty_len(at + len)?;
        }

        len += 2;
        len += self.empty_len(at + len)?;

        let mut out: Vec<u32> = Vec::new();
        while self.cur.byte(at + len) != b'}' {
            if self.cur.byte(at + len) == 0 {
                return Err(self.err(at, at + len, "Unexpected end of file in shuffle diagram"));
            }
            let mlen = self.shuffle_member(at + len)?;
            let name = self.cur.slice(at + len, at + len + mlen);
            // Output names with no matching input are dropped.
            if let Some(index) = ins.iter().position(|member| *member == name) {
                out.push(u32::try_from(index).unwrap_or(u32::MAX));
            }
            len += mlen;
            len += self.empty_len(at + len)?;
        }
        len += 1;

        let shuffle = Shuffle::new(u32::try_from(ins.len()).unwrap_or(u32::MAX), out);
        Ok(self.tok(at, at + len, TokenKind::Shuffle(Rc::new(shuffle))))
    }

    fn empty_len(&self, at: usize) -> Result<usize, Diagnostic> {
        Ok(self.empty(at)?.span.len() as usize)
    }
}

#[inline]
fn is_nibble(b: u8) -> bool {
    b.is_ascii_hexdigit()
}

#[inline]
fn nibble(b: u8) -> u8 {
    match b {
        b'a'..=b'f' => b - b'a' + 10,
        b'A'..=b'F' => b - b'A' + 10,
        _ => b - b'0',
    }
}
