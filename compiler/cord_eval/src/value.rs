//! Runtime values.

use std::fmt;
use std::rc::Rc;

use cord_ir::chars;
use cord_ir::Shuffle;

use crate::builtin::Builtin;
use crate::list::List;

/// One stack or list element. Cheap to clone: compound values hold
/// reference-counted payloads.
#[derive(Clone, Debug)]
pub enum Value {
    Nil,
    Int(i64),
    Float(f64),
    /// A codepoint, at most `0x1F_FFFF`.
    Char(u32),
    /// Generalized UTF-8 bytes; not necessarily valid `str` data.
    Str(Rc<[u8]>),
    Shuffle(Rc<Shuffle>),
    List(List),
    Builtin(Rc<Builtin>),
    Fn(Rc<FnDef>),
}

/// A compiled definition: its source name and compiled body.
#[derive(Debug)]
pub struct FnDef {
    name: Rc<str>,
    body: List,
}

impl FnDef {
    pub fn new(name: impl Into<Rc<str>>, body: List) -> Self {
        FnDef { name: name.into(), body }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn body(&self) -> &List {
        &self.body
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Int(a), Value::Int(b)) => a == b,
            #[allow(clippy::float_cmp)]
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Char(a), Value::Char(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Shuffle(a), Value::Shuffle(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            // Functions and builtins compare by identity.
            (Value::Builtin(a), Value::Builtin(b)) => Rc::ptr_eq(a, b),
            (Value::Fn(a), Value::Fn(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "nil"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Char(c) => write!(f, "{}", fmt_char(*c)),
            Value::Str(bytes) => write!(f, "\"{}\"", fmt_str_bare(bytes)),
            Value::Shuffle(shuffle) => write!(f, "{shuffle}"),
            Value::List(list) => write!(f, "{list}"),
            Value::Builtin(builtin) => write!(f, "{}", builtin.name()),
            Value::Fn(fndef) => write!(f, "{}", fndef.name()),
        }
    }
}

/// Render a character the way it could be written in source: quoted,
/// with a quote itself escaped.
fn fmt_char(cnum: u32) -> String {
    if cnum == u32::from(b'\'') {
        return "'\\''".to_string();
    }
    let mut out = String::from('\'');
    chars::escape_char(cnum, &mut out);
    out.push('\'');
    out
}

/// Render string contents with escapes; a `"` needs one, every other
/// byte defers to the character escaping rules.
fn fmt_str_bare(bytes: &[u8]) -> String {
    let mut out = String::new();
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        if b == b'"' {
            out.push_str("\\\"");
            i += 1;
        } else if b < 0x80 {
            chars::escape_char(u32::from(b), &mut out);
            i += 1;
        } else {
            match chars::decode_width(&bytes[i..]) {
                Ok(width) => {
                    chars::escape_char(chars::read(&bytes[i..], width), &mut out);
                    i += width;
                }
                Err(bad) => {
                    use std::fmt::Write as _;
                    for byte in &bytes[i..(i + bad).min(bytes.len())] {
                        let _ = write!(out, "\\x{byte:02x}");
                    }
                    i += bad;
                }
            }
        }
    }
    out
}
