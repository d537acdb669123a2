//! An ordered set of unique values on top of an AVL tree.
//!
//! Nodes own their children and keep a non-owning link to their parent, so
//! cursors and iterators step between neighbours without a path stack.
//! Every node caches the height and size of its subtree, which keeps
//! `len` constant-time and order statistics logarithmic.

#[cfg(test)]
extern crate quickcheck;
#[cfg(test)]
#[macro_use(quickcheck)]
extern crate quickcheck_macros;

mod iterator;
pub mod set;
mod support;
mod tree;

pub use iterator::{Cursor, IntoIter, Iter};
pub use set::AvlTreeSet;
