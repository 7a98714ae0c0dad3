//! The structuring pass.
//!
//! The parser walks the source one scanned token at a time and resolves
//! the two nesting constructs into a token tree:
//!
//! - `name: body` definitions, closed by a dedent back to (or past) the
//!   indentation of the line holding the `:`, or early by `;`
//! - `[ ... ]` list literals, whose contents ignore indentation
//!
//! Nesting is tracked with explicit stacks rather than recursion, so
//! depth is bounded by memory, not the call stack. A word is held pending
//! rather than emitted, because a following `:` turns it into a
//! definition head; anything other than a `:` flushes it to the output in
//! source order.

use std::mem;
use std::rc::Rc;

use cord_diagnostic::Diagnostic;
use cord_ir::{Op, ParseBlock, ParseToken, SourceFile, Span, TokenKind};
use cord_lexer::Lexer;
use cord_stack::Stack;
use tracing::trace;

/// Parse a whole source file into its top-level token list.
pub fn parse(file: &Rc<SourceFile>) -> Result<Vec<ParseToken>, Diagnostic> {
    Parser::new(file).run()
}

struct Parser<'a> {
    file: &'a Rc<SourceFile>,
    lexer: Lexer<'a>,
    pos: usize,

    /// Indentation of the current line.
    indent: usize,
    /// Indentation recorded by each open definition.
    indent_stack: Stack<usize>,

    /// Held tokens: definition heads, `[` markers, and at most one
    /// pending word above `base`.
    token_stack: Stack<ParseToken>,
    /// Token stack depth at which the current nesting level starts.
    base: usize,
    base_stack: Stack<usize>,

    /// Output of the current nesting level; enclosing levels are parked
    /// on `out_stack`.
    out: Vec<ParseToken>,
    out_stack: Stack<Vec<ParseToken>>,
}

impl<'a> Parser<'a> {
    fn new(file: &'a Rc<SourceFile>) -> Self {
        Parser {
            file,
            lexer: Lexer::new(file),
            pos: 0,
            indent: 0,
            indent_stack: Stack::new(),
            token_stack: Stack::new(),
            base: 0,
            base_stack: Stack::new(),
            out: Vec::new(),
            out_stack: Stack::new(),
        }
    }

    fn run(mut self) -> Result<Vec<ParseToken>, Diagnostic> {
        if self.lexer.is_line_empty(0) {
            let empty = self.lexer.empty(0)?;
            self.pos += empty.span.len() as usize;
        }
        let first = self.lexer.indent(self.pos);
        self.skip(&first)?;
        if let TokenKind::Indent(indent) = first.kind {
            self.handle_indent(indent);
        }

        while !self.lexer.at_end(self.pos) {
            let token = self.lexer.token(self.pos)?;
            self.skip(&token)?;
            self.handle_token(token)?;
        }

        self.flush();
        while self.is_dedent(0) {
            self.handle_dedent();
        }

        if !self.out_stack.is_empty() {
            let span = self
                .token_stack
                .as_slice()
                .iter()
                .rev()
                .find(|t| matches!(t.kind, TokenKind::Op(Op::ListOpen)))
                .map_or(Span::DUMMY, |t| t.span);
            return Err(Diagnostic::error(Rc::clone(self.file), span, "Unmatched ["));
        }
        Ok(self.out)
    }

    /// Advance past a token and the whitespace and comments after it.
    fn skip(&mut self, token: &ParseToken) -> Result<(), Diagnostic> {
        self.pos += token.span.len() as usize;
        let empty = self.lexer.empty(self.pos)?;
        self.pos += empty.span.len() as usize;
        Ok(())
    }

    fn handle_token(&mut self, token: ParseToken) -> Result<(), Diagnostic> {
        match token.kind {
            TokenKind::Empty => Ok(()),
            TokenKind::Indent(indent) => {
                self.handle_indent(indent);
                Ok(())
            }
            TokenKind::Op(Op::ListOpen) => {
                self.handle_list_open(token);
                Ok(())
            }
            TokenKind::Op(Op::ListClose) => self.handle_list_close(&token),
            TokenKind::Op(Op::Define) => self.handle_def(&token),
            TokenKind::Op(Op::End) => {
                self.handle_end();
                Ok(())
            }
            TokenKind::Word => {
                self.flush();
                self.token_stack.push(token);
                Ok(())
            }
            _ => {
                // Literals go straight to the output, after any pending
                // word so source order is preserved.
                self.flush();
                self.out.push(token);
                Ok(())
            }
        }
    }

    /// Emit the pending word, if one is held above the current base.
    fn flush(&mut self) {
        if self.token_stack.len() == self.base {
            return;
        }
        if let Some(token) = self.token_stack.pop() {
            self.out.push(token);
        }
    }

    /// True when a line at `indent` closes the innermost open definition.
    /// A `[` on top of the token stack shields everything inside a list
    /// from indentation.
    fn is_dedent(&self, indent: usize) -> bool {
        let Some(open) = self.indent_stack.peek() else {
            return false;
        };
        match self.token_stack.peek() {
            None => false,
            Some(top) if top.is_op() => false,
            Some(_) => indent <= *open,
        }
    }

    fn handle_dedent(&mut self) {
        self.flush();
        self.indent_stack.pop();
        if let Some(base) = self.base_stack.pop() {
            self.base = base;
        }

        // The head word sits just below the popped base; both are
        // guaranteed by the `:` that opened this definition.
        let Some(head) = self.token_stack.pop() else {
            return;
        };
        let body = mem::replace(&mut self.out, self.out_stack.pop().unwrap_or_default());

        let block = ParseBlock::new(head, body);
        let span = block.span();
        trace!(name = %self.file.text(block.head.span), "close definition");
        self.out.push(ParseToken::new(span, TokenKind::Block(Box::new(block))));
    }

    fn handle_indent(&mut self, indent: usize) {
        while self.is_dedent(indent) {
            self.handle_dedent();
        }
        self.indent = indent;
    }

    fn handle_list_open(&mut self, token: ParseToken) {
        self.flush();
        self.token_stack.push(token);
        self.push_base();
        self.out_stack.push(mem::take(&mut self.out));
    }

    fn handle_list_close(&mut self, token: &ParseToken) -> Result<(), Diagnostic> {
        self.flush();

        // A `]` force-closes definitions still open inside the list.
        while self.is_dedent(0) {
            self.handle_dedent();
        }

        let open = match self.token_stack.peek() {
            Some(top) if matches!(top.kind, TokenKind::Op(Op::ListOpen)) => top.span,
            _ => {
                return Err(Diagnostic::error(
                    Rc::clone(self.file),
                    token.span,
                    "Unmatched ]",
                ));
            }
        };
        self.token_stack.pop();
        if let Some(base) = self.base_stack.pop() {
            self.base = base;
        }

        let items = mem::replace(&mut self.out, self.out_stack.pop().unwrap_or_default());
        let span = open.merge(token.span);
        trace!(items = items.len(), "close list");
        self.out.push(ParseToken::new(span, TokenKind::List(items)));
        Ok(())
    }

    fn handle_def(&mut self, token: &ParseToken) -> Result<(), Diagnostic> {
        if self.token_stack.len() == self.base {
            return Err(Diagnostic::error(
                Rc::clone(self.file),
                token.span,
                "Expected identifier before :",
            ));
        }

        trace!(indent = self.indent, "open definition");
        self.indent_stack.push(self.indent);
        self.push_base();
        self.out_stack.push(mem::take(&mut self.out));
        Ok(())
    }

    /// `;` closes the innermost definition early; stray `;` is ignored.
    fn handle_end(&mut self) {
        if self.is_dedent(0) {
            self.handle_dedent();
        }
    }

    fn push_base(&mut self) {
        self.base_stack.push(self.base);
        self.base = self.token_stack.len();
    }
}
