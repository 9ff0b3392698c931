//! Text renderings of a tree.
//!
//! The canonical form is the equality witness: two trees are equal exactly
//! when their canonical renderings match. Each node contributes its value
//! text, and a non-leaf wraps its children in parentheses. Children are
//! concatenated without a separator, so the whole tree `42 → [100, 333]`
//! renders as `(int 42(int 100int 333))` and the empty tree as `()`.
//!
//! The outline form is for people: one node per line, indented two spaces
//! per level.

use std::cell::{Cell, RefCell};
use std::fmt;

use crate::node::Node;

/// Deepest level that [`Node::to_outline`] still indents.
pub const OUTLINE_MAX_INDENT: usize = 32;

impl Node {
    /// Canonical rendering. Non-UTF-8 string bytes are replaced lossily; use
    /// [`Node::is_equal`] rather than comparing these strings.
    pub fn to_text(&self) -> String {
        String::from_utf8_lossy(&self.canonical_bytes()).into_owned()
    }

    /// Structural and value equality, defined as equal canonical renderings.
    pub fn is_equal(&self, other: &Node) -> bool {
        self.canonical_bytes() == other.canonical_bytes()
    }

    /// Indented one-node-per-line rendering, newline terminated.
    ///
    /// Indentation stops growing after [`OUTLINE_MAX_INDENT`] levels; deeper
    /// lines carry their depth as a `[depth] ` prefix instead, which keeps the
    /// output linear in the number of nodes.
    pub fn to_outline(&self) -> String {
        if self.is_empty() {
            return "()\n".to_string();
        }
        let out = RefCell::new(String::new());
        let depth = Cell::new(0usize);
        self.traverse(
            |node| {
                let mut out = out.borrow_mut();
                let level = depth.get();
                for _ in 0..level.min(OUTLINE_MAX_INDENT) {
                    out.push_str("  ");
                }
                if level > OUTLINE_MAX_INDENT {
                    out.push_str(&format!("[{level}] "));
                }
                out.push_str(&node.value().data_text());
                out.push('\n');
                depth.set(depth.get() + 1);
            },
            |_| depth.set(depth.get() - 1),
        );
        out.into_inner()
    }

    fn canonical_bytes(&self) -> Vec<u8> {
        let out = RefCell::new(vec![b'(']);
        self.traverse(
            |node| {
                let mut out = out.borrow_mut();
                node.value().write_data_text(&mut out);
                if !node.is_leaf() {
                    out.push(b'(');
                }
            },
            |node| {
                if !node.is_leaf() {
                    out.borrow_mut().push(b')');
                }
            },
        );
        let mut out = out.into_inner();
        out.push(b')');
        out
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.is_equal(other)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}
