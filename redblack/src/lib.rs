//! An ordered associative container over values that carry a string ordering
//! key, backed by a red-black tree.
//!
//! The container never inspects a stored value beyond [`Keyed::key`]; adding,
//! finding and removing run in O(log n) and iteration yields values in
//! ascending key order. The [`export`] module renders trees for inspection
//! (Graphviz, plain key listings) without the core performing any I/O itself.

#![deny(rust_2018_idioms)]
#![deny(unsafe_op_in_unsafe_fn)]

pub mod export;
pub mod red_black_tree;

pub use red_black_tree::{Iter, Keyed, RedBlackTree};
