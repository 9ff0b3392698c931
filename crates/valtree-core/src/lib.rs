//! # valtree-core
//!
//! Ordered trees of scalar values (32-bit integers, 64-bit reals, byte
//! strings) and a compact binary format that stores them exactly.
//!
//! A tree is written as a pre-order sequence of length-prefixed *segments*,
//! one per node, each carrying the node's kind, its direct child count and
//! its payload. Reading the segments back in the same order rebuilds an
//! identical tree.
//!
//! ## Quick start
//!
//! ```rust
//! use valtree_core::{decode, encode, Node};
//!
//! let tree = Node::int(8)
//!     + (Node::string("bar") + Node::real(2.015))
//!     + Node::string("baz");
//! assert_eq!(tree.to_text(), "(int 8(string bar(real 2.015000)string baz))");
//!
//! let bytes = encode(&tree).unwrap();
//! let back = decode(&bytes).unwrap();
//! assert!(back.is_equal(&tree));
//! ```
//!
//! ## Modules
//!
//! - [`value`] — scalar payloads and the kind ↔ signature mapping
//! - [`node`] — tree nodes, traversal, the `+` merge operator, statistics
//! - [`text`] — canonical text (the equality witness) and outline rendering
//! - [`segment`] — the on-wire segment header
//! - [`writer`] — tree → bytes
//! - [`reader`] — bytes → tree
//! - [`store`] — save/load trees to files
//! - [`error`] — error types

pub mod error;
pub mod node;
pub mod reader;
pub mod segment;
pub mod store;
pub mod text;
pub mod value;
pub mod writer;

pub use error::{Result, TreeError};
pub use node::{Node, TreeStats};
pub use reader::{decode, read_tree, TreeReader};
pub use store::{load, load_or_empty, save};
pub use value::{Kind, Value};
pub use writer::{encode, write_tree, TreeWriter};
