// Copyright (c) 2025 Pueo Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Node implementation for the Koa Ternary Search Tree.
//!
//! Every node matches a single character at a single depth. The three child
//! links are atomic pointer slots that only ever move from null to a node
//! owned by the tree, so once a reader observes a non-null link it may follow
//! it for as long as the tree itself is borrowed.

use std::hash::Hash;
use std::ptr;
use std::sync::atomic::{AtomicPtr, Ordering};
use std::sync::Arc;

use hashbrown::HashSet;
use parking_lot::RwLock;

/// A node in the Koa Ternary Search Tree.
///
/// # Type Parameters
///
/// * `R` - Type of the records attached to words ending at this node.
#[derive(Debug)]
pub(super) struct Node<R> {
    /// The character this node matches at its depth
    pub(super) ch: char,

    /// Records whose indexed word ends exactly at this node
    pub(super) items: RwLock<HashSet<Arc<R>>>,

    /// Sibling holding a smaller character at the same depth
    pub(super) left: AtomicPtr<Node<R>>,

    /// Continuation to the next character position
    pub(super) down: AtomicPtr<Node<R>>,

    /// Sibling holding a greater character at the same depth
    pub(super) right: AtomicPtr<Node<R>>,
}

impl<R> Node<R> {
    /// Creates a detached node for `ch` with no records and no children.
    pub(super) fn new(ch: char) -> Self {
        Self {
            ch,
            items: RwLock::new(HashSet::new()),
            left: AtomicPtr::new(ptr::null_mut()),
            down: AtomicPtr::new(ptr::null_mut()),
            right: AtomicPtr::new(ptr::null_mut()),
        }
    }
}

impl<R: Eq + Hash> Node<R> {
    /// Builds an unpublished chain of nodes spelling `chars` along `down`
    /// links, with `item` attached to the last node.
    ///
    /// Returns the head of the chain, or null when `chars` is empty. The
    /// caller owns the chain until it is installed into a link.
    pub(super) fn chain(chars: &[char], item: Arc<R>) -> *mut Node<R> {
        let Some((last, rest)) = chars.split_last() else {
            return ptr::null_mut();
        };

        let mut tail = Node::new(*last);
        tail.items.get_mut().insert(item);
        let mut head = Box::into_raw(Box::new(tail));

        for &ch in rest.iter().rev() {
            let mut node = Node::new(ch);
            *node.down.get_mut() = head;
            head = Box::into_raw(Box::new(node));
        }

        head
    }

    /// Adds `item` to this node's record set.
    ///
    /// Returns `true` if the record was not already present.
    pub(super) fn add_item(&self, item: Arc<R>) -> bool {
        self.items.write().insert(item)
    }

    /// Copies this node's records into `out`.
    pub(super) fn collect_into(&self, out: &mut HashSet<Arc<R>>) {
        let items = self.items.read();
        if !items.is_empty() {
            out.extend(items.iter().cloned());
        }
    }
}

/// Follows a child link, returning the node it points to if one is installed.
///
/// Only links belonging to a live tree may be passed here.
pub(super) fn follow<R>(link: &AtomicPtr<Node<R>>) -> Option<&Node<R>> {
    let ptr = link.load(Ordering::Acquire);
    // SAFETY: links are written once, from null to a node allocated with
    // `Box::into_raw` and owned by the tree. Nodes are only freed when the
    // tree is dropped, which requires exclusive access, so the node outlives
    // the shared borrow of the link.
    unsafe { ptr.as_ref() }
}

/// Frees `root` and every node reachable from it.
///
/// Uses an explicit stack so the teardown depth does not depend on word
/// length or sibling chain length.
///
/// # Safety
///
/// `root` must be null or a node obtained from `Box::into_raw` that no other
/// thread can reach, and whose descendants are likewise exclusively owned.
///
/// # Returns
///
/// The number of nodes freed.
pub(super) unsafe fn free_subtree<R>(root: *mut Node<R>) -> usize {
    let mut stack = vec![root];
    let mut freed = 0;

    while let Some(ptr) = stack.pop() {
        if ptr.is_null() {
            continue;
        }

        // SAFETY: guaranteed by the caller for `root`, and inherited by every
        // child since each node has exactly one parent link.
        let mut node = unsafe { Box::from_raw(ptr) };
        stack.push(*node.left.get_mut());
        stack.push(*node.down.get_mut());
        stack.push(*node.right.get_mut());
        freed += 1;
    }

    freed
}
