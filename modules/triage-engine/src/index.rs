//! AVL-balanced ordered index.
//!
//! Backs id lookups and the ascending-id listing. Every insert rebalances on
//! the way back up, so height stays within about 1.44 log2(n) and both
//! `lookup` and `insert` are O(log n).

use std::cmp::Ordering;

type Link<K, V> = Option<Box<Node<K, V>>>;

#[derive(Debug)]
struct Node<K, V> {
    key: K,
    value: V,
    height: i32,
    left: Link<K, V>,
    right: Link<K, V>,
}

impl<K, V> Node<K, V> {
    fn leaf(key: K, value: V) -> Self {
        Self {
            key,
            value,
            height: 1,
            left: None,
            right: None,
        }
    }

    fn balance(&self) -> i32 {
        height(&self.left) - height(&self.right)
    }

    fn update_height(&mut self) {
        self.height = 1 + height(&self.left).max(height(&self.right));
    }
}

fn height<K, V>(link: &Link<K, V>) -> i32 {
    link.as_ref().map_or(0, |n| n.height)
}

/// AVL tree mapping ordered keys to values.
///
/// Insertion recurses down one root-to-leaf path; AVL height stays within
/// ~1.44·log2(n), so even adversarially sorted inserts keep the recursion
/// shallow. There is no delete.
#[derive(Debug)]
pub struct BalancedIndex<K, V> {
    root: Link<K, V>,
    len: usize,
}

impl<K, V> Default for BalancedIndex<K, V> {
    fn default() -> Self {
        Self { root: None, len: 0 }
    }
}

impl<K: Ord, V> BalancedIndex<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Height of the tree; 0 when empty.
    pub fn height(&self) -> i32 {
        height(&self.root)
    }

    /// Insert `value` under `key`. An existing key has its value replaced
    /// without any structural change.
    pub fn insert(&mut self, key: K, value: V) {
        let mut added = false;
        self.root = Some(Self::insert_at(self.root.take(), key, value, &mut added));
        if added {
            self.len += 1;
        }
    }

    /// Value stored under `key`, or `None` if absent.
    pub fn lookup(&self, key: &K) -> Option<&V> {
        let mut cursor = self.root.as_deref();
        while let Some(node) = cursor {
            cursor = match key.cmp(&node.key) {
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
                Ordering::Equal => return Some(&node.value),
            };
        }
        None
    }

    /// Values in ascending key order. Each call starts a fresh walk.
    pub fn in_order(&self) -> InOrder<'_, K, V> {
        let mut iter = InOrder { stack: Vec::new() };
        iter.push_left_spine(self.root.as_deref());
        iter
    }

    fn insert_at(link: Link<K, V>, key: K, value: V, added: &mut bool) -> Box<Node<K, V>> {
        let Some(mut node) = link else {
            *added = true;
            return Box::new(Node::leaf(key, value));
        };

        match key.cmp(&node.key) {
            Ordering::Less => {
                node.left = Some(Self::insert_at(node.left.take(), key, value, added));
            }
            Ordering::Greater => {
                node.right = Some(Self::insert_at(node.right.take(), key, value, added));
            }
            Ordering::Equal => {
                node.value = value;
                return node;
            }
        }

        node.update_height();
        rebalance(node)
    }
}

/// Restore |balance| <= 1 at `node` after an insert below it.
fn rebalance<K, V>(mut node: Box<Node<K, V>>) -> Box<Node<K, V>> {
    let balance = node.balance();

    if balance > 1 {
        // Left-right: straighten the left child first.
        if node.left.as_ref().is_some_and(|l| l.balance() < 0) {
            node.left = node.left.take().map(rotate_left);
        }
        return rotate_right(node);
    }

    if balance < -1 {
        // Right-left mirror.
        if node.right.as_ref().is_some_and(|r| r.balance() > 0) {
            node.right = node.right.take().map(rotate_right);
        }
        return rotate_left(node);
    }

    node
}

fn rotate_right<K, V>(mut y: Box<Node<K, V>>) -> Box<Node<K, V>> {
    let Some(mut x) = y.left.take() else {
        return y;
    };
    y.left = x.right.take();
    y.update_height();
    x.right = Some(y);
    x.update_height();
    x
}

fn rotate_left<K, V>(mut x: Box<Node<K, V>>) -> Box<Node<K, V>> {
    let Some(mut y) = x.right.take() else {
        return x;
    };
    x.right = y.left.take();
    x.update_height();
    y.left = Some(x);
    y.update_height();
    y
}

/// Lazy in-order walk over a [`BalancedIndex`], driven by an explicit stack.
pub struct InOrder<'a, K, V> {
    stack: Vec<&'a Node<K, V>>,
}

impl<'a, K, V> InOrder<'a, K, V> {
    fn push_left_spine(&mut self, mut cursor: Option<&'a Node<K, V>>) {
        while let Some(node) = cursor {
            self.stack.push(node);
            cursor = node.left.as_deref();
        }
    }
}

impl<'a, K, V> Iterator for InOrder<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right.as_deref());
        Some(&node.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Walks every node, checking stored heights and AVL balance.
    /// Returns the subtree height.
    fn audit<K, V>(link: &Link<K, V>) -> i32 {
        let Some(node) = link else { return 0 };
        let left = audit(&node.left);
        let right = audit(&node.right);
        assert_eq!(node.height, 1 + left.max(right), "stale height");
        assert!((left - right).abs() <= 1, "balance factor {} out of range", left - right);
        node.height
    }

    fn keys_in_order<V>(index: &BalancedIndex<i64, V>) -> Vec<i64> {
        fn walk<V>(link: &Link<i64, V>, out: &mut Vec<i64>) {
            if let Some(node) = link {
                walk(&node.left, out);
                out.push(node.key);
                walk(&node.right, out);
            }
        }
        let mut out = Vec::new();
        walk(&index.root, &mut out);
        out
    }

    #[test]
    fn empty_index_finds_nothing() {
        let index: BalancedIndex<u32, &str> = BalancedIndex::new();
        assert!(index.is_empty());
        assert_eq!(index.lookup(&1), None);
        assert_eq!(index.in_order().count(), 0);
        assert_eq!(index.height(), 0);
    }

    #[test]
    fn ascending_inserts_rotate_left() {
        let mut index = BalancedIndex::new();
        for k in [1, 2, 3] {
            index.insert(k, k * 10);
        }
        let root = index.root.as_ref().unwrap();
        assert_eq!(root.key, 2);
        assert_eq!(root.left.as_ref().unwrap().key, 1);
        assert_eq!(root.right.as_ref().unwrap().key, 3);
    }

    #[test]
    fn descending_inserts_rotate_right() {
        let mut index = BalancedIndex::new();
        for k in [3, 2, 1] {
            index.insert(k, ());
        }
        assert_eq!(index.root.as_ref().unwrap().key, 2);
        assert_eq!(index.height(), 2);
    }

    #[test]
    fn left_right_case_double_rotates() {
        let mut index = BalancedIndex::new();
        for k in [30, 10, 20] {
            index.insert(k, ());
        }
        let root = index.root.as_ref().unwrap();
        assert_eq!(root.key, 20);
        assert_eq!(root.left.as_ref().unwrap().key, 10);
        assert_eq!(root.right.as_ref().unwrap().key, 30);
    }

    #[test]
    fn right_left_case_double_rotates() {
        let mut index = BalancedIndex::new();
        for k in [10, 30, 20] {
            index.insert(k, ());
        }
        let root = index.root.as_ref().unwrap();
        assert_eq!(root.key, 20);
        assert_eq!(root.left.as_ref().unwrap().key, 10);
        assert_eq!(root.right.as_ref().unwrap().key, 30);
    }

    #[test]
    fn equal_key_overwrites_value_only() {
        let mut index = BalancedIndex::new();
        for k in 1..=7 {
            index.insert(k, "old");
        }
        let height = index.height();
        index.insert(4, "new");
        assert_eq!(index.len(), 7);
        assert_eq!(index.height(), height);
        assert_eq!(index.lookup(&4), Some(&"new"));
        assert_eq!(index.root.as_ref().unwrap().key, 4);
    }

    #[test]
    fn sorted_inserts_stay_logarithmic() {
        let mut index = BalancedIndex::new();
        for k in 0..100_000u32 {
            index.insert(k, k);
        }
        audit(&index.root);
        // 1.44 * log2(100_001) ~= 24
        assert!(index.height() <= 24, "height {}", index.height());
        assert_eq!(index.lookup(&99_999), Some(&99_999));
    }

    #[test]
    fn in_order_is_restartable() {
        let mut index = BalancedIndex::new();
        for k in [5, 3, 8, 1, 4] {
            index.insert(k, k);
        }
        let first: Vec<_> = index.in_order().copied().collect();
        let second: Vec<_> = index.in_order().copied().collect();
        assert_eq!(first, vec![1, 3, 4, 5, 8]);
        assert_eq!(first, second);
    }

    proptest! {
        #[test]
        fn stays_sorted_and_balanced_after_every_insert(keys in prop::collection::vec(-500i64..500, 0..200)) {
            let mut index = BalancedIndex::new();
            for &k in &keys {
                index.insert(k, k * 2);
                audit(&index.root);
            }

            let walked = keys_in_order(&index);
            prop_assert!(walked.windows(2).all(|w| w[0] < w[1]));

            let values: Vec<i64> = index.in_order().copied().collect();
            prop_assert_eq!(values, walked.iter().map(|k| k * 2).collect::<Vec<_>>());
            prop_assert_eq!(index.len(), walked.len());

            for k in &keys {
                prop_assert_eq!(index.lookup(k), Some(&(k * 2)));
            }
            prop_assert_eq!(index.lookup(&1_000), None);
        }
    }
}
