use super::*;
use pretty_assertions::assert_eq;

#[test]
fn push_pop_lifo() {
    let mut stack = Stack::new();
    stack.push(1);
    stack.push(2);
    stack.push(3);
    assert_eq!(stack.len(), 3);
    assert_eq!(stack.peek(), Some(&3));
    assert_eq!(stack.pop(), Some(3));
    assert_eq!(stack.pop(), Some(2));
    assert_eq!(stack.pop(), Some(1));
    assert_eq!(stack.pop(), None);
    assert!(stack.is_empty());
}

#[test]
fn growth_covers_new_len() {
    let mut stack = Stack::with_capacity(1);
    for i in 0..100 {
        stack.push(i);
        assert!(stack.capacity() >= stack.len());
    }
    assert_eq!(stack.len(), 100);
    assert_eq!(stack.as_slice()[0], 0);
    assert_eq!(stack.as_slice()[99], 99);
}

#[test]
fn shrink_after_drop_preserves_frames() {
    let mut stack = Stack::new();
    for i in 0..256 {
        stack.push(i);
    }
    let grown = stack.capacity();

    // Drop to well under a quarter of capacity; the buffer must shrink
    // while keeping the frames below the new top intact.
    stack.drop_n(240);
    assert!(stack.capacity() < grown);
    assert!(stack.capacity() >= stack.len());
    assert_eq!(stack.len(), 16);
    assert_eq!(stack.as_slice(), (0..16).collect::<Vec<_>>().as_slice());
}

#[test]
fn drop_n_past_bottom_clears() {
    let mut stack = Stack::new();
    stack.push("a");
    stack.drop_n(10);
    assert!(stack.is_empty());
}

#[test]
fn peek_n_counts_down_from_top() {
    let mut stack = Stack::new();
    stack.push('a');
    stack.push('b');
    stack.push('c');
    assert_eq!(stack.peek_n(0), Some(&'c'));
    assert_eq!(stack.peek_n(2), Some(&'a'));
    assert_eq!(stack.peek_n(3), None);
}

#[test]
fn peek_mut_edits_top() {
    let mut stack = Stack::new();
    stack.push(vec![1]);
    if let Some(top) = stack.peek_mut() {
        top.push(2);
    }
    assert_eq!(stack.pop(), Some(vec![1, 2]));
}

#[test]
fn deep_recursion_guard() {
    fn depth(n: u64) -> u64 {
        ensure_sufficient_stack(|| if n == 0 { 0 } else { depth(n - 1) + 1 })
    }
    // Would overflow a default thread stack without growth.
    assert_eq!(depth(200_000), 200_000);
}
