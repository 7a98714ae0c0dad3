//! Diagnostic values and their terminal rendering.

use std::fmt::Write as _;
use std::io::IsTerminal;
use std::rc::Rc;

use cord_ir::{SourceFile, Span};

/// ANSI color codes for terminal output.
mod colors {
    pub const ERROR: &str = "\x1b[1;31m"; // Bold red
    pub const RESET: &str = "\x1b[0m";
}

/// A fatal compiler diagnostic: where, and what went wrong.
///
/// The first diagnostic aborts the run; there is no recovery or
/// resynchronization, so a diagnostic never carries child notes.
#[derive(Clone, Debug)]
pub struct Diagnostic {
    file: Rc<SourceFile>,
    span: Span,
    message: String,
}

impl Diagnostic {
    /// Create a diagnostic highlighting `span` in `file`.
    pub fn error(file: Rc<SourceFile>, span: Span, message: impl Into<String>) -> Self {
        Diagnostic {
            file,
            span,
            message: message.into(),
        }
    }

    /// The highlighted span.
    pub fn span(&self) -> Span {
        self.span
    }

    /// The diagnostic message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Render to the compatibility format, with optional ANSI colors.
    pub fn render(&self, with_colors: bool) -> String {
        let file = &self.file;
        let start = self.span.start as usize;
        let end = self.span.end as usize;
        let (mut line_no, col_no) = file.line_col(start);

        let mut out = String::new();
        if let Some(path) = file.path() {
            let _ = write!(out, "{}:", path.display());
        }
        let _ = write!(out, "{line_no}:{col_no}: ");
        self.push_colored(&mut out, "error: ", with_colors);
        out.push_str(&self.message);
        out.push('\n');

        // Context line up to the highlight.
        push_gutter(&mut out, line_no);
        out.push_str(&text(file, file.line_start(start), start));

        // The highlight itself, continuing the gutter across line breaks.
        let mut pos = start;
        loop {
            let line_end = file.line_end(pos);
            if line_end < end {
                self.push_colored(&mut out, &text(file, pos, line_end), with_colors);
                out.push('\n');
                line_no += 1;
                push_gutter(&mut out, line_no);
                pos = line_end + 1;
            } else {
                self.push_colored(&mut out, &text(file, pos, end), with_colors);
                break;
            }
        }

        // Rest of the last highlighted line.
        out.push_str(&text(file, end, file.line_end(end)));
        out.push('\n');
        out
    }

    /// Render to standard error, with colors when it is a terminal.
    pub fn emit(&self) {
        let with_colors = std::io::stderr().is_terminal();
        eprint!("{}", self.render(with_colors));
    }

    fn push_colored(&self, out: &mut String, segment: &str, with_colors: bool) {
        if with_colors && !segment.is_empty() {
            out.push_str(colors::ERROR);
            out.push_str(segment);
            out.push_str(colors::RESET);
        } else {
            out.push_str(segment);
        }
    }
}

/// Right-aligned 5-character line number gutter with `| ` separator.
fn push_gutter(out: &mut String, line_no: usize) {
    let _ = write!(out, " {line_no:>5} | ");
}

fn text(file: &SourceFile, start: usize, end: usize) -> String {
    file.text(Span::at(start, end)).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn file(src: &str) -> Rc<SourceFile> {
        Rc::new(SourceFile::from_source(src))
    }

    #[test]
    fn single_line_render() {
        let diag = Diagnostic::error(file("1 2 frob +\n"), Span::new(4, 8), "frob is undefined");
        assert_eq!(
            diag.render(false),
            "1:5: error: frob is undefined\n     1 | 1 2 frob +\n"
        );
    }

    #[test]
    fn path_prefix_and_later_line() {
        let src = Rc::new(SourceFile::new("demo.cord", b"ok\nbad word\n".to_vec()));
        let diag = Diagnostic::error(src, Span::new(3, 6), "bad is undefined");
        assert_eq!(
            diag.render(false),
            "demo.cord:2:1: error: bad is undefined\n     2 | bad word\n"
        );
    }

    #[test]
    fn multi_line_highlight_continues_gutter() {
        let diag = Diagnostic::error(file("a (never\nclosed\n"), Span::new(2, 3), "Unmatched (");
        // The highlight itself is one character; context stays on one line.
        assert_eq!(
            diag.render(false),
            "1:3: error: Unmatched (\n     1 | a (never\n"
        );

        let diag = Diagnostic::error(file("x yy\nzz w\n"), Span::new(2, 7), "spans two lines");
        assert_eq!(
            diag.render(false),
            "1:3: error: spans two lines\n     1 | x yy\n     2 | zz w\n"
        );
    }

    #[test]
    fn colors_wrap_highlight_only() {
        let diag = Diagnostic::error(file("oops\n"), Span::new(0, 4), "msg");
        let rendered = diag.render(true);
        assert!(rendered.contains("\x1b[1;31merror: \x1b[0m"));
        assert!(rendered.contains("\x1b[1;31moops\x1b[0m"));
    }

    #[test]
    fn gutter_is_five_wide() {
        let src = "\n".repeat(120) + "boom\n";
        let diag = Diagnostic::error(file(&src), Span::new(120, 124), "msg");
        let rendered = diag.render(false);
        assert!(rendered.contains("\n   121 | boom\n"));
    }
}
