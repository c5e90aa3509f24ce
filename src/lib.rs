//! An ordered dictionary implemented with an AVL tree, and a fixed-size
//! telephone book hash table using linear probing with chaining.
//!
//! ```
//! use avl_hash::{AvlTree, CollisionPolicy, HashTable};
//!
//! let mut tree = AvlTree::new();
//! tree.insert(3, String::from("three"));
//! tree.insert(2, String::from("two"));
//! tree.insert(1, String::from("one"));
//! assert_eq!(tree.level_order(), vec![2, 1, 3]);
//! tree.delete(&2);
//! assert_eq!(tree.inorder(), vec![1, 3]);
//!
//! let mut table = HashTable::default();
//! table.insert("Advait", 10005, CollisionPolicy::WithReplacement).unwrap();
//! assert_eq!(table.search("Advait").map(|r| r.telephone()), Some(10005));
//! ```

mod error;
mod hash_table;
pub mod logger;
mod tree;

pub use error::{HashTableError, Result};
pub use hash_table::{CollisionPolicy, HashTable, Lookup, Record, DEFAULT_CAPACITY};
pub use tree::AvlTree;
