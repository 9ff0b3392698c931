//! Segment reader: rebuilds a [`Node`] tree from its binary form.
//!
//! The reader is the structural inverse of [`crate::writer`]. It reads one
//! segment, builds the node, then reads exactly `children_count` child trees
//! and appends them in order. Shape comes entirely from the counts embedded
//! in the stream; there is no lookahead.
//!
//! # Key design decisions
//!
//! - **Iterative**: partially built parents live on an explicit stack, so a
//!   deep stream cannot exhaust the call stack.
//! - **Empty marker**: zero available bytes at the root, or any header with
//!   `data_size <= 0`, is the empty tree. In a child slot it consumes the
//!   slot and is absorbed, matching the `+` operator.
//! - **Strict on corruption**: short headers or payloads, missing children,
//!   unknown signatures and mis-sized fixed payloads are errors. Nothing is
//!   ever guessed or zero-filled.
//! - **Bounded allocation**: payloads are read through [`Read::take`], so a
//!   corrupt `data_size` cannot force a huge up-front allocation.

use std::io::{self, Read};

use crate::error::{Result, TreeError};
use crate::node::Node;
use crate::segment::{SegmentHeader, HEADER_LEN};
use crate::value::{Kind, Value};

/// Decode a complete byte buffer. Bytes left over after the root tree are an
/// error.
pub fn decode(bytes: &[u8]) -> Result<Node> {
    let mut reader = TreeReader::new(bytes);
    let tree = reader.read()?;
    if reader.offset() < bytes.len() as u64 {
        return Err(TreeError::TrailingBytes {
            offset: reader.offset(),
        });
    }
    Ok(tree)
}

/// Decode one tree from any [`Read`] source. Bytes after the tree are left
/// unread.
pub fn read_tree<R: Read>(reader: &mut R) -> Result<Node> {
    TreeReader::new(reader).read()
}

/// A node whose children are still being read.
struct Frame {
    node: Node,
    remaining: usize,
}

/// Pulls segments from an underlying reader, tracking the byte offset for
/// error reports.
pub struct TreeReader<R> {
    inner: R,
    offset: u64,
}

impl<R: Read> TreeReader<R> {
    pub fn new(inner: R) -> Self {
        Self { inner, offset: 0 }
    }

    /// Bytes consumed so far.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn into_inner(self) -> R {
        self.inner
    }

    /// Read one complete tree.
    pub fn read(&mut self) -> Result<Node> {
        let start = self.offset;
        let Some(mut current) = self.read_segment(false)? else {
            tracing::debug!(bytes = self.offset - start, "empty tree decoded");
            return Ok(Node::empty());
        };

        let mut segments = 1usize;
        let mut parents: Vec<Frame> = Vec::new();
        loop {
            if current.remaining > 0 {
                current.remaining -= 1;
                if let Some(child) = self.read_segment(true)? {
                    segments += 1;
                    parents.push(current);
                    current = child;
                }
                continue;
            }
            match parents.pop() {
                Some(mut parent) => {
                    parent.node.push_child(current.node);
                    current = parent;
                }
                None => {
                    tracing::debug!(segments, bytes = self.offset - start, "tree decoded");
                    return Ok(current.node);
                }
            }
        }
    }

    /// Read one segment. `None` means the empty marker: a header with no
    /// payload, or a clean end of input at the root.
    fn read_segment(&mut self, in_child_slot: bool) -> Result<Option<Frame>> {
        let offset = self.offset;
        let mut buf = [0u8; HEADER_LEN];
        let got = self.fill(&mut buf)?;
        if got == 0 && !in_child_slot {
            return Ok(None);
        }
        if got < HEADER_LEN {
            return Err(TreeError::TruncatedInput {
                offset,
                needed: HEADER_LEN as u64,
                available: got as u64,
            });
        }

        let header = SegmentHeader::from_bytes(&buf);
        let kind = Kind::from_signature(header.signature).ok_or(TreeError::UnknownSignature {
            signature: header.signature,
            offset,
        })?;
        if header.is_empty_marker() {
            return Ok(None);
        }
        if header.children_count < 0 {
            return Err(TreeError::InvalidChildCount {
                count: header.children_count,
                offset,
            });
        }

        let size = header.data_size as usize;
        if let Some(expected) = kind.fixed_payload_len() {
            if expected != size {
                return Err(TreeError::PayloadSize {
                    kind,
                    expected,
                    actual: header.data_size,
                    offset,
                });
            }
        }

        let payload = self.read_payload(size)?;
        Ok(Some(Frame {
            node: Node::new(Value::from_payload(kind, payload)),
            remaining: header.children_count as usize,
        }))
    }

    fn read_payload(&mut self, size: usize) -> Result<Vec<u8>> {
        let offset = self.offset;
        let mut payload = Vec::new();
        let got = self
            .inner
            .by_ref()
            .take(size as u64)
            .read_to_end(&mut payload)?;
        self.offset += got as u64;
        if got < size {
            return Err(TreeError::TruncatedInput {
                offset,
                needed: size as u64,
                available: got as u64,
            });
        }
        Ok(payload)
    }

    /// Read until `buf` is full or the input ends; returns the bytes read.
    fn fill(&mut self, buf: &mut [u8]) -> Result<usize> {
        let mut filled = 0;
        while filled < buf.len() {
            match self.inner.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
        self.offset += filled as u64;
        Ok(filled)
    }
}
