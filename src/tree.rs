//! An ordered dictionary implemented with an AVL tree.

use std::cmp::{self, Ordering};
use std::collections::VecDeque;
use std::fmt;
use std::mem;

use log::trace;

/// An ordered dictionary implemented with an AVL tree.
///
/// Every node owns its children exclusively, so rotations move subtrees
/// around instead of copying or aliasing them.
///
/// ```
/// use avl_hash::AvlTree;
/// let mut tree = AvlTree::new();
/// tree.insert(10, "ten");
/// tree.insert(20, "twenty");
/// tree.insert(30, "thirty");
/// assert_eq!(tree.search(&20), Some(&"twenty"));
/// assert_eq!(tree.level_order(), vec![20, 10, 30]);
/// tree.delete(&20);
/// assert!(tree.search(&20).is_none());
/// ```
#[derive(Clone)]
pub struct AvlTree<K, V> {
    root: Link<K, V>,
    num_nodes: usize,
}

#[derive(Clone)]
struct Node<K, V> {
    key: K,
    value: V,
    left: Link<K, V>,
    right: Link<K, V>,
    height: usize,
}

type Link<K, V> = Option<Box<Node<K, V>>>;

impl<K: Ord, V> AvlTree<K, V> {
    /// Creates an empty tree.
    /// No memory is allocated until the first item is inserted.
    pub fn new() -> Self {
        Self {
            root: None,
            num_nodes: 0,
        }
    }

    /// Returns true if the tree contains no elements.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Returns the number of elements in the tree.
    pub fn len(&self) -> usize {
        self.num_nodes
    }

    /// Returns the height of the tree.
    /// An empty tree has height 0, a single node has height 1.
    pub fn height(&self) -> usize {
        height(&self.root)
    }

    /// Clears the tree, deallocating all memory.
    pub fn clear(&mut self) {
        self.root = None;
        self.num_nodes = 0;
    }

    /// Returns a reference to the value corresponding to the key.
    pub fn search(&self, key: &K) -> Option<&V> {
        self.find(key).map(|node| &node.value)
    }

    /// Returns a mutable reference to the value corresponding to the key.
    pub fn search_mut(&mut self, key: &K) -> Option<&mut V> {
        let mut current = self.root.as_deref_mut();
        while let Some(node) = current {
            match key.cmp(&node.key) {
                Ordering::Equal => return Some(&mut node.value),
                Ordering::Less => current = node.left.as_deref_mut(),
                Ordering::Greater => current = node.right.as_deref_mut(),
            }
        }
        None
    }

    /// Returns true if the tree contains a value for the key.
    pub fn contains_key(&self, key: &K) -> bool {
        self.find(key).is_some()
    }

    /// Inserts a key-value pair into the tree.
    ///
    /// If the key is already present its value is replaced in place and the
    /// tree shape is left untouched.
    /// Returns whether a new key was added.
    pub fn insert(&mut self, key: K, value: V) -> bool {
        let inserted = Self::insert_into(&mut self.root, key, value);
        if inserted {
            self.num_nodes += 1;
        }
        inserted
    }

    /// Removes a key from the tree.
    /// Returns the value at the key if the key was previously in the tree.
    pub fn delete(&mut self, key: &K) -> Option<V> {
        let removed = Self::delete_from(&mut self.root, key);
        if removed.is_some() {
            debug_assert!(self.num_nodes >= 1);
            self.num_nodes -= 1;
        }
        removed
    }

    /// Returns the keys in ascending order.
    pub fn inorder(&self) -> Vec<K>
    where
        K: Clone,
    {
        let mut keys = Vec::with_capacity(self.num_nodes);
        self.traverse_in_order(|key, _| keys.push(key.clone()));
        keys
    }

    /// Returns the keys level by level, starting at the root.
    pub fn level_order(&self) -> Vec<K>
    where
        K: Clone,
    {
        let mut keys = Vec::with_capacity(self.num_nodes);
        self.traverse_level_order(|key, _| keys.push(key.clone()));
        keys
    }

    /// Calls `f` for every key-value pair in ascending key order.
    pub fn traverse_in_order<F: FnMut(&K, &V)>(&self, mut f: F) {
        let mut stack = Vec::with_capacity(self.height());
        let mut current = self.root.as_deref();
        loop {
            while let Some(node) = current {
                stack.push(node);
                current = node.left.as_deref();
            }
            match stack.pop() {
                None => break,
                Some(node) => {
                    f(&node.key, &node.value);
                    current = node.right.as_deref();
                }
            }
        }
    }

    /// Calls `f` for every key-value pair in breadth-first order.
    /// Nodes on the same level are visited left to right.
    pub fn traverse_level_order<F: FnMut(&K, &V)>(&self, mut f: F) {
        let mut queue = VecDeque::new();
        if let Some(root) = self.root.as_deref() {
            queue.push_back(root);
        }
        while let Some(node) = queue.pop_front() {
            f(&node.key, &node.value);
            if let Some(left) = node.left.as_deref() {
                queue.push_back(left);
            }
            if let Some(right) = node.right.as_deref() {
                queue.push_back(right);
            }
        }
    }

    /// Asserts ordering, cached heights, AVL balance and node count.
    #[cfg(any(test, feature = "consistency_check"))]
    pub fn check_consistency(&self) {
        let mut num_nodes = 0;
        if let Some(root) = self.root.as_deref() {
            Self::check_node(root, None, None, &mut num_nodes);
        }
        assert_eq!(num_nodes, self.num_nodes);
    }

    #[cfg(any(test, feature = "consistency_check"))]
    fn check_node(
        node: &Node<K, V>,
        lower: Option<&K>,
        upper: Option<&K>,
        num_nodes: &mut usize,
    ) -> usize {
        // Check key lies strictly within the bounds of its ancestors
        if let Some(lower) = lower {
            assert!(*lower < node.key);
        }
        if let Some(upper) = upper {
            assert!(node.key < *upper);
        }

        let left_height = node.left.as_deref().map_or(0, |left_ptr| {
            Self::check_node(left_ptr, lower, Some(&node.key), num_nodes)
        });
        let right_height = node.right.as_deref().map_or(0, |right_ptr| {
            Self::check_node(right_ptr, Some(&node.key), upper, num_nodes)
        });

        // Check height
        assert_eq!(node.height, 1 + cmp::max(left_height, right_height));

        // Check AVL condition (nearly balance)
        assert!(left_height <= right_height + 1);
        assert!(right_height <= left_height + 1);

        *num_nodes += 1;
        node.height
    }

    fn find(&self, key: &K) -> Option<&Node<K, V>> {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            current = match key.cmp(&node.key) {
                Ordering::Equal => break,
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
            }
        }
        current
    }

    fn insert_into(link: &mut Link<K, V>, key: K, value: V) -> bool {
        let node = match link {
            None => {
                *link = Some(Node::create(key, value));
                return true;
            }
            Some(node) => node,
        };
        let inserted = match key.cmp(&node.key) {
            Ordering::Less => Self::insert_into(&mut node.left, key, value),
            Ordering::Greater => Self::insert_into(&mut node.right, key, value),
            Ordering::Equal => {
                node.value = value;
                return false;
            }
        };
        if inserted {
            Self::rebalance(link);
        }
        inserted
    }

    fn delete_from(link: &mut Link<K, V>, key: &K) -> Option<V> {
        let node = link.as_mut()?;
        let removed = match key.cmp(&node.key) {
            Ordering::Less => Self::delete_from(&mut node.left, key),
            Ordering::Greater => Self::delete_from(&mut node.right, key),
            Ordering::Equal => Self::unlink_node(link),
        };
        if removed.is_some() {
            Self::rebalance(link);
        }
        removed
    }

    /// Removes the node at `link` from the tree and returns its value.
    ///
    /// A node with two children takes over key and value of its in-order
    /// successor, which is then unlinked from the right sub tree instead.
    fn unlink_node(link: &mut Link<K, V>) -> Option<V> {
        let node = link.as_mut()?;
        if node.left.is_some() && node.right.is_some() {
            let (min_key, min_value) = Self::unlink_min(&mut node.right)?;
            trace!("replacing node with two children by its in-order successor");
            node.key = min_key;
            return Some(mem::replace(&mut node.value, min_value));
        }

        // Node to-unlink is stem or leaf, splice in its only child
        let mut node = link.take()?;
        *link = node.left.take().or_else(|| node.right.take());
        Some(node.value)
    }

    /// Unlinks the smallest node of the sub tree at `link`, rebalancing on the way back up.
    fn unlink_min(link: &mut Link<K, V>) -> Option<(K, V)> {
        let node = link.as_mut()?;
        if node.left.is_some() {
            let min = Self::unlink_min(&mut node.left);
            Self::rebalance(link);
            return min;
        }

        // Smallest node has no left child
        let mut node = link.take()?;
        *link = node.right.take();
        Some((node.key, node.value))
    }

    /// Restores AVL condition (balance) at given node if necessary and adjusts height.
    /// Resulting balance will be +1, 0 or -1 height difference between left and right subtree.
    /// Initial balance must not exceed +2 or -2, which always holds after a single update.
    fn rebalance(link: &mut Link<K, V>) {
        let node = match link.as_mut() {
            None => return,
            Some(node) => node,
        };
        node.adjust_height();
        let balance = node.balance_factor();
        debug_assert!((-2..=2).contains(&balance));
        if balance > 1 {
            // Left heavy, rebalance right
            if balance_factor(&node.left) < 0 {
                trace!("left-right rotation at height {}", node.height);
                Self::rotate_left(&mut node.left);
            } else {
                trace!("left-left rotation at height {}", node.height);
            }
            Self::rotate_right(link);
        } else if balance < -1 {
            // Right heavy, rebalance left
            if balance_factor(&node.right) > 0 {
                trace!("right-left rotation at height {}", node.height);
                Self::rotate_right(&mut node.right);
            } else {
                trace!("right-right rotation at height {}", node.height);
            }
            Self::rotate_left(link);
        }
    }

    fn rotate_left(link: &mut Link<K, V>) {
        if let Some(mut node) = link.take() {
            match node.right.take() {
                Some(mut right_ptr) => {
                    node.right = right_ptr.left.take();
                    // Demoted node first, its height feeds into the new root
                    node.adjust_height();
                    right_ptr.left = Some(node);
                    right_ptr.adjust_height();
                    *link = Some(right_ptr);
                }
                None => *link = Some(node),
            }
        }
    }

    fn rotate_right(link: &mut Link<K, V>) {
        if let Some(mut node) = link.take() {
            match node.left.take() {
                Some(mut left_ptr) => {
                    node.left = left_ptr.right.take();
                    node.adjust_height();
                    left_ptr.right = Some(node);
                    left_ptr.adjust_height();
                    *link = Some(left_ptr);
                }
                None => *link = Some(node),
            }
        }
    }
}

impl<K: Ord, V> Default for AvlTree<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord + fmt::Debug, V: fmt::Debug> fmt::Debug for AvlTree<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        self.traverse_in_order(|key, value| {
            map.entry(key, value);
        });
        map.finish()
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for AvlTree<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<K: Ord, V> Extend<(K, V)> for AvlTree<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K, V> Node<K, V> {
    fn create(key: K, value: V) -> Box<Self> {
        Box::new(Node {
            key,
            value,
            left: None,
            right: None,
            height: 1,
        })
    }

    fn adjust_height(&mut self) {
        self.height = 1 + cmp::max(height(&self.left), height(&self.right));
    }

    fn balance_factor(&self) -> isize {
        height(&self.left) as isize - height(&self.right) as isize
    }
}

fn height<K, V>(link: &Link<K, V>) -> usize {
    link.as_ref().map_or(0, |node| node.height)
}

fn balance_factor<K, V>(link: &Link<K, V>) -> isize {
    link.as_ref().map_or(0, |node| node.balance_factor())
}
