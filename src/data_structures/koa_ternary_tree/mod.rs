// Copyright (c) 2025 Pueo Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Koa Ternary Search Tree Implementation
//!
//! This module provides a concurrent ternary search tree mapping words to
//! sets of records, with prefix lookups returning every record attached to a
//! word that extends the prefix.
//!
//! # Concurrency Safety
//!
//! * **Create-if-absent links**: every child link is an `AtomicPtr` that only
//!   moves from null to a node. Inserters that find a null link build a
//!   candidate chain for the rest of the word and install it with a single
//!   compare-and-swap. A losing inserter frees its candidate and continues
//!   through the node that won.
//!
//! * **Per-node record sets**: records live in a small `RwLock`-guarded set
//!   on the node where their word ends. There is no lock over the tree as a
//!   whole.
//!
//! * **Reclamation**: nodes are never removed while the tree is alive, so
//!   readers never observe freed memory. Teardown happens in `Drop`.

mod node;

#[cfg(test)]
mod tests;

use std::cmp;
use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;
use std::ptr;
use std::sync::atomic::{AtomicPtr, AtomicUsize, Ordering};
use std::sync::Arc;

use hashbrown::HashSet;

use node::Node;

/// Outcome of trying to install a candidate chain into an empty link.
enum Install<'a, R> {
    /// The candidate is now part of the tree and carries the record.
    Installed,
    /// Another inserter filled the link first.
    Lost(&'a Node<R>),
}

/// KoaTernaryTree is a concurrent ternary search tree for prefix lookups.
///
/// Words are stored one character per node. Nodes at the same depth form a
/// binary search tree over their characters through `left` and `right`
/// links, while `down` continues to the next character.
///
/// # Type Parameters
///
/// * `R` - Type of the records attached to words. Records are shared as
///   `Arc<R>` and compared by value.
pub struct KoaTernaryTree<R> {
    /// Root of the top level, null until the first insertion
    root: AtomicPtr<Node<R>>,

    /// Number of installed nodes
    node_count: AtomicUsize,

    /// The tree owns its nodes
    _owns: PhantomData<Box<Node<R>>>,
}

impl<R> KoaTernaryTree<R> {
    /// Creates a new empty `KoaTernaryTree`.
    pub fn new() -> Self {
        Self {
            root: AtomicPtr::new(ptr::null_mut()),
            node_count: AtomicUsize::new(0),
            _owns: PhantomData,
        }
    }

    /// Returns whether nothing has been inserted yet.
    pub fn is_empty(&self) -> bool {
        self.root.load(Ordering::Acquire).is_null()
    }

    /// Returns the number of nodes in the tree.
    ///
    /// Note that in a concurrent environment this value may be immediately outdated.
    pub fn node_count(&self) -> usize {
        self.node_count.load(Ordering::Relaxed)
    }
}

impl<R: Eq + Hash> KoaTernaryTree<R> {
    /// Attaches `item` to `word`.
    ///
    /// An empty word is ignored. Existing nodes and records are never
    /// replaced, so concurrent inserts of different words, or of the same
    /// word for different records, all take effect.
    ///
    /// # Arguments
    ///
    /// * `word` - The word to index. Stored as given, without normalization.
    /// * `item` - The record to attach to the word.
    ///
    /// # Returns
    ///
    /// `true` if the record was newly attached to this word, `false` if it
    /// was already present or the word was empty.
    pub fn insert(&self, word: &str, item: Arc<R>) -> bool {
        let chars: Vec<char> = word.chars().collect();
        if chars.is_empty() {
            return false;
        }

        let mut link = &self.root;
        let mut idx = 0;

        loop {
            let node = match node::follow(link) {
                Some(node) => node,
                None => match self.install(link, &chars[idx..], &item) {
                    Install::Installed => return true,
                    Install::Lost(node) => node,
                },
            };

            match chars[idx].cmp(&node.ch) {
                cmp::Ordering::Less => link = &node.left,
                cmp::Ordering::Greater => link = &node.right,
                cmp::Ordering::Equal if idx + 1 == chars.len() => return node.add_item(item),
                cmp::Ordering::Equal => {
                    idx += 1;
                    link = &node.down;
                }
            }
        }
    }

    /// Installs a chain for `chars` into `link` if the link is still empty.
    fn install<'a>(
        &'a self,
        link: &'a AtomicPtr<Node<R>>,
        chars: &[char],
        item: &Arc<R>,
    ) -> Install<'a, R> {
        let candidate = Node::chain(chars, Arc::clone(item));

        match link.compare_exchange(
            ptr::null_mut(),
            candidate,
            Ordering::AcqRel,
            Ordering::Acquire,
        ) {
            Ok(_) => {
                self.node_count.fetch_add(chars.len(), Ordering::Relaxed);
                Install::Installed
            }
            Err(_) => {
                // SAFETY: the candidate was never published, so this thread
                // still owns every node in it.
                unsafe { node::free_subtree(candidate) };
                match node::follow(link) {
                    Some(existing) => Install::Lost(existing),
                    // A link never returns to null once set.
                    None => unreachable!("compare_exchange failed against a null link"),
                }
            }
        }
    }

    /// Returns every record attached to a word that starts with `prefix`.
    ///
    /// A word equal to `prefix` counts as a match. An empty prefix, or one
    /// that no stored word starts with, yields an empty set.
    ///
    /// # Arguments
    ///
    /// * `prefix` - The prefix to search for, compared character by character.
    pub fn prefix_matches(&self, prefix: &str) -> HashSet<Arc<R>> {
        let mut matches = HashSet::new();
        let Some(terminal) = self.find_node(prefix) else {
            return matches;
        };

        terminal.collect_into(&mut matches);

        // Visit left, then down, then right below the prefix.
        let mut stack: Vec<&Node<R>> = node::follow(&terminal.down).into_iter().collect();
        while let Some(node) = stack.pop() {
            node.collect_into(&mut matches);
            stack.extend(
                [&node.right, &node.down, &node.left]
                    .into_iter()
                    .filter_map(|link| node::follow(link)),
            );
        }

        matches
    }

    /// Descends to the node holding the last character of `word`.
    fn find_node(&self, word: &str) -> Option<&Node<R>> {
        let mut chars = word.chars();
        let mut target = chars.next()?;
        let mut node = node::follow(&self.root)?;

        loop {
            match target.cmp(&node.ch) {
                cmp::Ordering::Less => node = node::follow(&node.left)?,
                cmp::Ordering::Greater => node = node::follow(&node.right)?,
                cmp::Ordering::Equal => match chars.next() {
                    Some(next) => {
                        target = next;
                        node = node::follow(&node.down)?;
                    }
                    None => return Some(node),
                },
            }
        }
    }
}

impl<R> Default for KoaTernaryTree<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> fmt::Debug for KoaTernaryTree<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KoaTernaryTree")
            .field("node_count", &self.node_count())
            .field("is_empty", &self.is_empty())
            .finish()
    }
}

impl<R> Drop for KoaTernaryTree<R> {
    fn drop(&mut self) {
        let root = std::mem::replace(self.root.get_mut(), ptr::null_mut());
        // SAFETY: `&mut self` guarantees no reader or inserter is active, and
        // every node below the root is owned by exactly one link.
        unsafe { node::free_subtree(root) };
    }
}
