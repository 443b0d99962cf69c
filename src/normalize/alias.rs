//! Static alias table mapping paraphrased problem titles to LeetCode titles.
//!
//! Keys and values are lowercase with single spaces. A value must never be a
//! key itself, otherwise normalization would stop being idempotent.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Alternate phrasing -> canonical LeetCode title.
const ALIAS_PAIRS: &[(&str, &str)] = &[
    // Arrays & Hashing
    ("duplicate integer", "contains duplicate"),
    ("is anagram", "valid anagram"),
    ("two integer sum", "two sum"),
    ("anagram groups", "group anagrams"),
    ("top k elements in list", "top k frequent elements"),
    ("string encode and decode", "encode and decode strings"),
    ("products of array discluding self", "product of array except self"),
    ("products of array except self", "product of array except self"),
    // Two Pointers
    ("is palindrome", "valid palindrome"),
    ("two integer sum ii", "two sum ii input array is sorted"),
    ("three integer sum", "3sum"),
    ("max water container", "container with most water"),
    // Sliding Window
    ("buy and sell crypto", "best time to buy and sell stock"),
    (
        "longest substring without duplicates",
        "longest substring without repeating characters",
    ),
    (
        "longest repeating substring with replacement",
        "longest repeating character replacement",
    ),
    ("permutation string", "permutation in string"),
    ("minimum window with characters", "minimum window substring"),
    // Stack
    ("validate parentheses", "valid parentheses"),
    ("minimum stack", "min stack"),
    // Binary Search
    ("search 2d matrix", "search a 2d matrix"),
    ("eating bananas", "koko eating bananas"),
    ("find target in rotated sorted array", "search in rotated sorted array"),
    // Linked List
    ("reverse a linked list", "reverse linked list"),
    ("merge two sorted linked lists", "merge two sorted lists"),
    ("reorder linked list", "reorder list"),
    (
        "remove node from end of linked list",
        "remove nth node from end of list",
    ),
    (
        "copy linked list with random pointer",
        "copy list with random pointer",
    ),
    ("linked list cycle detection", "linked list cycle"),
    ("merge k sorted linked lists", "merge k sorted lists"),
    // Trees
    ("same binary tree", "same tree"),
    ("subtree of a binary tree", "subtree of another tree"),
    (
        "lowest common ancestor in binary search tree",
        "lowest common ancestor of a binary search tree",
    ),
    ("valid binary search tree", "validate binary search tree"),
    ("kth smallest integer in bst", "kth smallest element in a bst"),
    (
        "binary tree from preorder and inorder traversal",
        "construct binary tree from preorder and inorder traversal",
    ),
    // Graphs / DP
    ("count number of islands", "number of islands"),
    ("islands and treasure", "walls and gates"),
    ("rotting fruit", "rotting oranges"),
    (
        "count connected components",
        "number of connected components in an undirected graph",
    ),
    ("valid tree", "graph valid tree"),
    ("longest increasing path in matrix", "longest increasing path in a matrix"),
    ("count paths", "unique paths"),
    ("count squares", "detect squares"),
];

/// Process-wide alias table, built once on first use.
pub static ALIAS_TABLE: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| ALIAS_PAIRS.iter().copied().collect());

/// Returns the canonical title for an alias key, if one is registered.
#[must_use]
pub fn lookup_alias(key: &str) -> Option<&'static str> {
    ALIAS_TABLE.get(key).copied()
}

/// Iterates all `(alias, canonical)` pairs in declaration order.
pub fn alias_pairs() -> impl Iterator<Item = (&'static str, &'static str)> {
    ALIAS_PAIRS.iter().copied()
}
