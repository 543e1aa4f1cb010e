//! An ordered set backed by a self-balancing AVL tree.
//!
//! The set keeps unique elements under a caller-supplied total order and guarantees
//! logarithmic height across any sequence of insertions and removals.
//!
//! # Examples
//!
//! ```
//! use avl_collections::avl_tree::AvlSet;
//! use avl_collections::AvlError;
//!
//! let mut set = AvlSet::new();
//! set.insert(3).unwrap();
//! set.insert(1).unwrap();
//!
//! assert_eq!(set.insert(3), Err(AvlError::DuplicateKey));
//! assert_eq!(set.iter().collect::<Vec<&u32>>(), vec![&1, &3]);
//! assert_eq!(set.remove(&2), Err(AvlError::NotFound));
//! ```

pub mod avl_tree;
pub mod comparator;
mod error;

pub use crate::comparator::{Comparator, NaturalOrder};
pub use crate::error::{AvlError, Result};
