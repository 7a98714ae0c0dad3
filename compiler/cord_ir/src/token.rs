//! Parse tokens.
//!
//! The lexer produces flat tokens (literals, words, ops, indentation); the
//! structuring pass folds them into a tree by replacing bracketed runs with
//! [`TokenKind::List`] and named definitions with [`TokenKind::Block`].
//! That token tree is the compiler's whole input.

use std::rc::Rc;

use crate::{Shuffle, Span};

/// The four structural operator tokens.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Op {
    /// `[` — opens a list literal.
    ListOpen,
    /// `]` — closes a list literal.
    ListClose,
    /// `:` — turns the pending word into a definition head.
    Define,
    /// `;` — closes the innermost open definition.
    End,
}

impl Op {
    /// The operator for a source byte, if it is one.
    pub fn from_byte(byte: u8) -> Option<Op> {
        match byte {
            b'[' => Some(Op::ListOpen),
            b']' => Some(Op::ListClose),
            b':' => Some(Op::Define),
            b';' => Some(Op::End),
            _ => None,
        }
    }
}

/// Token payload.
#[derive(Clone, Debug, PartialEq)]
pub enum TokenKind {
    /// Whitespace and comments. Never emitted into the token tree.
    Empty,
    /// A newline followed by a non-empty line; payload is the new line's
    /// indentation.
    Indent(usize),
    /// One of `[ ] : ;`.
    Op(Op),
    /// Integer literal.
    Int(i64),
    /// Float literal.
    Float(f64),
    /// Character literal; a codepoint, at most `0x1F_FFFF`.
    Char(u32),
    /// String literal, decoded and re-encoded as generalized UTF-8.
    Str(Rc<[u8]>),
    /// Shuffle diagram literal.
    Shuffle(Rc<Shuffle>),
    /// An identifier; its text is the token's span in the source.
    Word,
    /// A bracketed list literal's contents.
    List(Vec<ParseToken>),
    /// A named definition `name: body`.
    Block(Box<ParseBlock>),
}

/// One token: a span into the source plus its payload.
#[derive(Clone, Debug, PartialEq)]
pub struct ParseToken {
    pub span: Span,
    pub kind: TokenKind,
}

impl ParseToken {
    /// Create a token.
    pub fn new(span: Span, kind: TokenKind) -> Self {
        ParseToken { span, kind }
    }

    /// Check if this is a word token.
    pub fn is_word(&self) -> bool {
        matches!(self.kind, TokenKind::Word)
    }

    /// Check if this is an operator token.
    pub fn is_op(&self) -> bool {
        matches!(self.kind, TokenKind::Op(_))
    }
}

/// A named definition: the head word naming it and its body tokens.
#[derive(Clone, Debug, PartialEq)]
pub struct ParseBlock {
    /// The defining word; its span is the definition's name.
    pub head: ParseToken,
    /// The tokens of the body, in source order.
    pub body: Vec<ParseToken>,
}

impl ParseBlock {
    /// Create a block from its head word and body.
    pub fn new(head: ParseToken, body: Vec<ParseToken>) -> Self {
        ParseBlock { head, body }
    }

    /// Span covering the head through the last body token.
    pub fn span(&self) -> Span {
        self.body
            .last()
            .map_or(self.head.span, |tail| self.head.span.merge(tail.span))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn op_from_byte() {
        assert_eq!(Op::from_byte(b'['), Some(Op::ListOpen));
        assert_eq!(Op::from_byte(b']'), Some(Op::ListClose));
        assert_eq!(Op::from_byte(b':'), Some(Op::Define));
        assert_eq!(Op::from_byte(b';'), Some(Op::End));
        assert_eq!(Op::from_byte(b'x'), None);
    }

    #[test]
    fn block_span_covers_body() {
        let head = ParseToken::new(Span::new(0, 3), TokenKind::Word);
        let body = vec![
            ParseToken::new(Span::new(5, 6), TokenKind::Int(1)),
            ParseToken::new(Span::new(7, 8), TokenKind::Int(2)),
        ];
        let block = ParseBlock::new(head.clone(), body);
        assert_eq!(block.span(), Span::new(0, 8));

        let empty = ParseBlock::new(head, Vec::new());
        assert_eq!(empty.span(), Span::new(0, 3));
    }
}
