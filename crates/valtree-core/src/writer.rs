//! Segment writer: converts a [`Node`] tree into its binary form.
//!
//! The writer walks the tree in pre-order and emits one segment per node
//! (see [`crate::segment`]). Parents precede their descendants and siblings
//! keep insertion order; the reader relies on nothing else to rebuild the
//! shape.
//!
//! The empty tree is never written, so encoding it yields zero bytes. A
//! non-empty kind with a zero-length payload (the empty string) would be
//! indistinguishable from that marker on the wire and is rejected with
//! [`TreeError::EmptyPayload`] before any byte is written.
//!
//! # Example
//! ```
//! use valtree_core::{encode, Node};
//! let tree = Node::int(42) + Node::int(-100);
//! let bytes = encode(&tree).unwrap();
//! assert_eq!(bytes.len(), 2 * (9 + 4));
//! ```

use std::io::Write;

use crate::error::{Result, TreeError};
use crate::node::Node;
use crate::segment::{SegmentHeader, HEADER_LEN};
use crate::value::Kind;

/// Encode a tree into a fresh byte buffer.
pub fn encode(tree: &Node) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(tree.stats().encoded_bytes);
    write_tree(&mut out, tree)?;
    Ok(out)
}

/// Encode a tree onto any [`Write`] sink.
pub fn write_tree<W: Write>(writer: &mut W, tree: &Node) -> Result<()> {
    TreeWriter::new(writer).write(tree)
}

/// Streams segments onto an underlying writer and counts the bytes emitted.
pub struct TreeWriter<W> {
    inner: W,
    written: u64,
}

impl<W: Write> TreeWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner, written: 0 }
    }

    /// Write every segment of `tree`. Nothing is written if the tree holds a
    /// value that cannot be encoded.
    pub fn write(&mut self, tree: &Node) -> Result<()> {
        check_encodable(tree)?;

        let start = self.written;
        let mut segments = 0usize;
        let mut outcome = Ok(());
        tree.traverse(
            |node| {
                if outcome.is_err() {
                    return;
                }
                match self.write_segment(node) {
                    Ok(true) => segments += 1,
                    Ok(false) => {}
                    Err(e) => outcome = Err(e),
                }
            },
            |_| {},
        );
        outcome?;

        tracing::debug!(
            segments,
            bytes = self.written - start,
            "tree encoded"
        );
        Ok(())
    }

    /// Total bytes written through this writer so far.
    pub fn bytes_written(&self) -> u64 {
        self.written
    }

    pub fn into_inner(self) -> W {
        self.inner
    }

    /// Emit one node's segment. Returns `false` for the empty marker, which
    /// has no segment.
    fn write_segment(&mut self, node: &Node) -> Result<bool> {
        let value = node.value();
        if value.kind() == Kind::Invalid {
            return Ok(false);
        }
        let payload = value.raw_bytes();
        let header = SegmentHeader {
            signature: value.kind().signature(),
            children_count: wire_len("children count", node.children_count())?,
            data_size: wire_len("payload length", payload.len())?,
        };
        header.write_to(&mut self.inner)?;
        self.inner.write_all(&payload)?;
        self.written += (HEADER_LEN + payload.len()) as u64;
        Ok(true)
    }
}

/// Reject trees the wire format cannot represent, before anything is
/// written.
pub(crate) fn check_encodable(tree: &Node) -> Result<()> {
    let mut outcome = Ok(());
    tree.traverse(
        |node| {
            if outcome.is_err() || node.is_empty() {
                return;
            }
            let value = node.value();
            outcome = if value.payload_len() == 0 {
                Err(TreeError::EmptyPayload { kind: value.kind() })
            } else {
                wire_len("children count", node.children_count())
                    .and_then(|_| wire_len("payload length", value.payload_len()))
                    .map(|_| ())
            };
        },
        |_| {},
    );
    outcome
}

fn wire_len(what: &'static str, len: usize) -> Result<i32> {
    i32::try_from(len).map_err(|_| TreeError::TooLarge { what, len })
}
