//! File storage for trees.
//!
//! Thin wrappers around the segment writer and reader over buffered file
//! handles. Handles are scoped to each call and closed on every return path.
//!
//! [`load`] reports an unopenable file as [`TreeError::IoUnavailable`], so a
//! missing file is distinguishable from a file holding the empty tree.
//! [`load_or_empty`] keeps the forgiving behavior for callers that only want
//! a tree.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use crate::error::{Result, TreeError};
use crate::node::Node;
use crate::reader::TreeReader;
use crate::writer::{check_encodable, TreeWriter};

/// Write `tree` to `path`, creating or truncating the file.
///
/// A tree the writer would reject fails before the file is opened, so an
/// existing file at `path` is left untouched.
pub fn save(path: impl AsRef<Path>, tree: &Node) -> Result<()> {
    let path = path.as_ref();
    check_encodable(tree)?;
    let file = File::create(path).map_err(|source| TreeError::IoUnavailable {
        path: path.to_path_buf(),
        source,
    })?;

    let mut writer = TreeWriter::new(BufWriter::new(file));
    writer.write(tree)?;
    let bytes = writer.bytes_written();
    writer.into_inner().flush()?;

    tracing::debug!(path = %path.display(), bytes, "tree saved");
    Ok(())
}

/// Read the tree stored at `path`. The whole file must be one tree.
pub fn load(path: impl AsRef<Path>) -> Result<Node> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| TreeError::IoUnavailable {
        path: path.to_path_buf(),
        source,
    })?;

    let mut reader = TreeReader::new(BufReader::new(file));
    let tree = reader.read()?;
    let consumed = reader.offset();
    if reader.into_inner().read(&mut [0u8; 1])? != 0 {
        return Err(TreeError::TrailingBytes { offset: consumed });
    }

    tracing::debug!(path = %path.display(), bytes = consumed, "tree loaded");
    Ok(tree)
}

/// Like [`load`], but any failure yields the empty tree after logging a
/// warning.
pub fn load_or_empty(path: impl AsRef<Path>) -> Node {
    let path = path.as_ref();
    load(path).unwrap_or_else(|e| {
        tracing::warn!(path = %path.display(), error = %e, "load failed, using empty tree");
        Node::empty()
    })
}
