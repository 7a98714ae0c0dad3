//! Persistent singly-linked lists.
//!
//! Lists are immutable and structurally shared: consing allocates one
//! node whose tail is the existing list, and popping clones the head
//! value while the original list survives untouched. Sharing is why the
//! evaluator can hold a function body as its control list while the same
//! body sits in any number of other values.

use std::fmt;
use std::rc::Rc;

use crate::value::Value;

#[derive(Debug, PartialEq)]
pub struct ListNode {
    head: Value,
    tail: List,
}

/// A possibly-empty persistent list. Cloning is one reference count.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct List(Option<Rc<ListNode>>);

impl List {
    pub fn new() -> Self {
        List(None)
    }

    pub fn cons(head: Value, tail: List) -> List {
        List(Some(Rc::new(ListNode { head, tail })))
    }

    /// Build a list holding `values` in order.
    pub fn from_values(values: Vec<Value>) -> List {
        let mut list = List::new();
        for value in values.into_iter().rev() {
            list = List::cons(value, list);
        }
        list
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }

    pub fn head(&self) -> Option<&Value> {
        self.0.as_ref().map(|node| &node.head)
    }

    /// Advance past the head, returning a clone of it. The popped-from
    /// list may be shared, so the head is cloned rather than moved.
    pub fn pop(&mut self) -> Option<Value> {
        let node = self.0.take()?;
        let value = node.head.clone();
        *self = node.tail.clone();
        Some(value)
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter { next: self.0.as_deref() }
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }
}

pub struct Iter<'a> {
    next: Option<&'a ListNode>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Value;

    fn next(&mut self) -> Option<&'a Value> {
        let node = self.next?;
        self.next = node.tail.0.as_deref();
        Some(&node.head)
    }
}

impl<'a> IntoIterator for &'a List {
    type Item = &'a Value;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

impl FromIterator<Value> for List {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        List::from_values(iter.into_iter().collect())
    }
}

impl fmt::Display for List {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        let mut first = true;
        for value in self {
            if !first {
                write!(f, " ")?;
            }
            write!(f, "{value}")?;
            first = false;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn from_values_keeps_order() {
        let list = List::from_values(vec![Value::Int(1), Value::Int(2), Value::Int(3)]);
        let items: Vec<_> = list.iter().cloned().collect();
        assert_eq!(items, vec![Value::Int(1), Value::Int(2), Value::Int(3)]);
    }

    #[test]
    fn pop_leaves_shared_list_intact() {
        let list = List::from_values(vec![Value::Int(1), Value::Int(2)]);
        let mut walker = list.clone();
        assert_eq!(walker.pop(), Some(Value::Int(1)));
        assert_eq!(walker.pop(), Some(Value::Int(2)));
        assert_eq!(walker.pop(), None);
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn display() {
        let list = List::from_values(vec![Value::Int(1), Value::Nil]);
        assert_eq!(list.to_string(), "[1 nil]");
        assert_eq!(List::new().to_string(), "[]");
    }
}
