//! Tree nodes: one scalar [`Value`] plus an ordered list of owned children.
//!
//! Every node owns its children outright, so a tree is a plain value with a
//! single owner and no back-references. Nodes are only ever grown by
//! appending children; the value is fixed at construction.
//!
//! The [`Value::Invalid`] node doubles as the "empty tree" marker. It is the
//! identity of the merge operator (`+`) and is kept a leaf by construction:
//! [`Node::add_child`] refuses to give it children, and empty children are
//! never stored.

use std::borrow::Cow;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::ops::Add;

use serde::Serialize;

use crate::error::{Result, TreeError};
use crate::segment::HEADER_LEN;
use crate::value::{Kind, Value};

/// A tree node.
pub struct Node {
    value: Value,
    children: Vec<Node>,
}

impl Node {
    /// Build a leaf holding `value`. `Value::Invalid` gives the empty tree.
    pub fn new(value: Value) -> Self {
        Self {
            value,
            children: Vec::new(),
        }
    }

    /// The empty-tree marker.
    pub fn empty() -> Self {
        Self::new(Value::Invalid)
    }

    pub fn int(n: i32) -> Self {
        Self::new(Value::Int(n))
    }

    pub fn real(r: f64) -> Self {
        Self::new(Value::Real(r))
    }

    pub fn string(bytes: impl Into<Vec<u8>>) -> Self {
        Self::new(Value::String(bytes.into()))
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn kind(&self) -> Kind {
        self.value.kind()
    }

    /// This node's payload as written on the wire.
    pub fn raw_bytes(&self) -> Cow<'_, [u8]> {
        self.value.raw_bytes()
    }

    /// True for the empty-tree marker.
    pub fn is_empty(&self) -> bool {
        matches!(self.value, Value::Invalid)
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn children_count(&self) -> usize {
        self.children.len()
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Append `child` after the existing children and return `self` for
    /// chaining.
    ///
    /// Appending the empty tree is a no-op. Appending anything else to the
    /// empty tree fails with [`TreeError::ChildOfEmpty`]; use the `+`
    /// operator when the empty tree should be absorbed instead.
    pub fn add_child(&mut self, child: Node) -> Result<&mut Self> {
        if child.is_empty() {
            return Ok(self);
        }
        if self.is_empty() {
            return Err(TreeError::ChildOfEmpty);
        }
        self.children.push(child);
        Ok(self)
    }

    /// Unchecked append used by the reader, which never produces an empty
    /// parent.
    pub(crate) fn push_child(&mut self, child: Node) {
        debug_assert!(!self.is_empty() && !child.is_empty());
        self.children.push(child);
    }

    /// Depth-first walk: `on_enter` runs before a node's children are
    /// visited, `on_exit` after. Children are visited in insertion order.
    ///
    /// The walk keeps its own work stack, so arbitrarily deep trees do not
    /// grow the call stack.
    pub fn traverse<'a, E, X>(&'a self, mut on_enter: E, mut on_exit: X)
    where
        E: FnMut(&'a Node),
        X: FnMut(&'a Node),
    {
        enum Step<'n> {
            Enter(&'n Node),
            Exit(&'n Node),
        }

        let mut stack = vec![Step::Enter(self)];
        while let Some(step) = stack.pop() {
            match step {
                Step::Enter(node) => {
                    on_enter(node);
                    stack.push(Step::Exit(node));
                    stack.extend(node.children.iter().rev().map(Step::Enter));
                }
                Step::Exit(node) => on_exit(node),
            }
        }
    }

    /// Summary counts over the whole tree.
    pub fn stats(&self) -> TreeStats {
        let mut stats = TreeStats::default();
        let depth = Cell::new(0usize);
        self.traverse(
            |node| {
                if node.is_empty() {
                    return;
                }
                depth.set(depth.get() + 1);
                stats.nodes += 1;
                if node.is_leaf() {
                    stats.leaves += 1;
                }
                stats.max_depth = stats.max_depth.max(depth.get());
                let payload = node.value.payload_len();
                stats.payload_bytes += payload;
                if payload > 0 {
                    stats.encoded_bytes += HEADER_LEN + payload;
                }
            },
            |node| {
                if !node.is_empty() {
                    depth.set(depth.get() - 1);
                }
            },
        );
        stats
    }
}

impl Drop for Node {
    // Drain descendants into a flat list so dropping a deep tree does not
    // recurse once per level.
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}

impl Clone for Node {
    // Rebuilt through `traverse` with a stack of partially copied parents,
    // like the reader, so deep trees clone without recursion.
    fn clone(&self) -> Self {
        let open: RefCell<Vec<Node>> = RefCell::new(Vec::new());
        let done = RefCell::new(None);
        self.traverse(
            |node| {
                let mut copy = Node::new(node.value.clone());
                copy.children.reserve_exact(node.children.len());
                open.borrow_mut().push(copy);
            },
            |_| {
                let mut open = open.borrow_mut();
                if let Some(copy) = open.pop() {
                    match open.last_mut() {
                        Some(parent) => parent.children.push(copy),
                        None => *done.borrow_mut() = Some(copy),
                    }
                }
            },
        );
        done.into_inner().unwrap_or_default()
    }
}

/// Prints the canonical text form, e.g. `Node((int 1(int 2)))`.
impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Node({})", self.to_text())
    }
}

impl Default for Node {
    fn default() -> Self {
        Self::empty()
    }
}

/// Merge: `parent + child` appends `child` to `parent`.
///
/// The empty tree is absorbed on either side: `empty + x` is `x` and
/// `x + empty` is `x`. The operator is left-associative, so `a + b + c`
/// gives `a` two children while `a + (b + c)` nests `c` under `b`.
impl Add for Node {
    type Output = Node;

    fn add(mut self, child: Node) -> Node {
        if self.is_empty() {
            return child;
        }
        if !child.is_empty() {
            self.children.push(child);
        }
        self
    }
}

impl From<Value> for Node {
    fn from(value: Value) -> Self {
        Node::new(value)
    }
}

impl From<i32> for Node {
    fn from(n: i32) -> Self {
        Node::int(n)
    }
}

impl From<f64> for Node {
    fn from(r: f64) -> Self {
        Node::real(r)
    }
}

impl From<&str> for Node {
    fn from(s: &str) -> Self {
        Node::string(s)
    }
}

impl From<String> for Node {
    fn from(s: String) -> Self {
        Node::string(s)
    }
}

/// Shape and size figures for a tree. The empty tree reports all zeros.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TreeStats {
    pub nodes: usize,
    pub leaves: usize,
    /// Number of nodes on the longest root-to-leaf path.
    pub max_depth: usize,
    pub payload_bytes: usize,
    /// Size of the segment stream the writer would produce.
    pub encoded_bytes: usize,
}
