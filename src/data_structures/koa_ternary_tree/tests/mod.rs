// Copyright (c) 2025 Pueo Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Unit, property-based and concurrency tests for the Koa Ternary Search Tree.


use std::sync::Arc;

use test_case::test_case;

use super::KoaTernaryTree;

/// Builds a tree holding the given `(word, record)` pairs.
fn tree_with(pairs: &[(&str, u32)]) -> KoaTernaryTree<u32> {
    let tree = KoaTernaryTree::new();
    for (word, record) in pairs {
        tree.insert(word, Arc::new(*record));
    }
    tree
}

/// Collects the records of a prefix lookup into a sorted vector.
fn sorted_matches(tree: &KoaTernaryTree<u32>, prefix: &str) -> Vec<u32> {
    let mut found: Vec<u32> = tree.prefix_matches(prefix).iter().map(|r| **r).collect();
    found.sort_unstable();
    found
}

#[test]
fn test_tree_basic_operations() {
    let tree = KoaTernaryTree::new();
    assert!(tree.is_empty());
    assert_eq!(tree.node_count(), 0);

    assert!(tree.insert("matrix", Arc::new(1u32)));
    assert!(!tree.is_empty());
    assert_eq!(tree.node_count(), 6);

    assert_eq!(sorted_matches(&tree, "matrix"), vec![1]);
    assert_eq!(sorted_matches(&tree, "mat"), vec![1]);
    assert_eq!(sorted_matches(&tree, "m"), vec![1]);
    assert!(tree.prefix_matches("matrixes").is_empty());
    assert!(tree.prefix_matches("x").is_empty());
}

#[test]
fn test_empty_word_is_ignored() {
    let tree = KoaTernaryTree::new();

    assert!(!tree.insert("", Arc::new(1u32)));
    assert!(tree.is_empty());
    assert!(tree.prefix_matches("").is_empty());

    tree.insert("a", Arc::new(2u32));
    assert!(tree.prefix_matches("").is_empty());
}

#[test]
fn test_duplicate_insert() {
    let tree = KoaTernaryTree::new();

    assert!(tree.insert("the", Arc::new(1u32)));
    assert!(!tree.insert("the", Arc::new(1u32)));
    assert!(tree.insert("the", Arc::new(2u32)));
    assert_eq!(tree.node_count(), 3);

    assert_eq!(sorted_matches(&tree, "the"), vec![1, 2]);
}

#[test]
fn test_shared_prefixes_and_siblings() {
    let tree = tree_with(&[
        ("the", 1),
        ("then", 2),
        ("there", 3),
        ("matrix", 4),
        ("reloaded", 5),
        ("revolutions", 6),
        ("a", 7),
        ("zoo", 8),
    ]);

    assert_eq!(sorted_matches(&tree, "the"), vec![1, 2, 3]);
    assert_eq!(sorted_matches(&tree, "then"), vec![2]);
    assert_eq!(sorted_matches(&tree, "ther"), vec![3]);
    assert_eq!(sorted_matches(&tree, "re"), vec![5, 6]);
    assert_eq!(sorted_matches(&tree, "rev"), vec![6]);
    assert_eq!(sorted_matches(&tree, "a"), vec![7]);
    assert_eq!(sorted_matches(&tree, "z"), vec![8]);
    assert!(tree.prefix_matches("thx").is_empty());
    assert!(tree.prefix_matches("b").is_empty());
}

#[test]
fn test_prefix_of_word_ending_midway() {
    // "man" ends on a node that also continues to "mango".
    let tree = tree_with(&[("man", 1), ("mango", 2), ("manx", 3)]);

    assert_eq!(sorted_matches(&tree, "man"), vec![1, 2, 3]);
    assert_eq!(sorted_matches(&tree, "mang"), vec![2]);
    assert!(tree.prefix_matches("mana").is_empty());
}

#[test_case("a" ; "single char")]
#[test_case("café" ; "multi byte")]
#[test_case("2" ; "digit")]
#[test_case("saga:" ; "punctuation")]
fn test_exact_word_is_found(word: &str) {
    let tree = tree_with(&[(word, 42)]);
    assert_eq!(sorted_matches(&tree, word), vec![42]);
}

#[test]
fn test_very_long_word() {
    let word = "ab".repeat(50_000);
    let tree = KoaTernaryTree::new();

    assert!(tree.insert(&word, Arc::new(9u32)));
    assert_eq!(tree.node_count(), word.len());
    assert_eq!(sorted_matches(&tree, &word[..70_001]), vec![9]);

    // Dropping must not recurse once per character.
    drop(tree);
}

#[test]
fn test_records_shared_between_words() {
    let tree = KoaTernaryTree::new();
    let record = Arc::new(String::from("The Matrix"));

    tree.insert("the", Arc::clone(&record));
    tree.insert("matrix", Arc::clone(&record));
    assert_eq!(Arc::strong_count(&record), 3);

    let found = tree.prefix_matches("t");
    assert!(found.contains(&record));

    drop(found);
    drop(tree);
    assert_eq!(Arc::strong_count(&record), 1);
}
