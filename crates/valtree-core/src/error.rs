//! Error types for tree construction, encoding, decoding and file storage.

use std::path::PathBuf;

use thiserror::Error;

use crate::value::Kind;

/// Errors that can occur while building, encoding, decoding or storing a tree.
#[derive(Error, Debug)]
pub enum TreeError {
    /// The file could not be opened for reading or writing.
    #[error("cannot open {}: {source}", path.display())]
    IoUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A read or write failed after the stream was opened.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The stream ended before a declared header, payload or child was read.
    /// `offset` is the byte position where the missing data should start.
    #[error("truncated input at byte {offset}: needed {needed} bytes, {available} available")]
    TruncatedInput {
        offset: u64,
        needed: u64,
        available: u64,
    },

    /// The signature byte does not name any known kind.
    #[error("unknown segment signature {signature:#04x} at byte {offset}")]
    UnknownSignature { signature: u8, offset: u64 },

    /// A fixed-size payload (int, real) was declared with the wrong length,
    /// or the empty marker carried a payload.
    #[error("{kind} segment at byte {offset} declares {actual} payload bytes, expected {expected}")]
    PayloadSize {
        kind: Kind,
        expected: usize,
        actual: i32,
        offset: u64,
    },

    #[error("negative children count {count} at byte {offset}")]
    InvalidChildCount { count: i32, offset: u64 },

    /// `decode` finished the root tree but the buffer holds more bytes.
    #[error("unexpected trailing bytes after tree at byte {offset}")]
    TrailingBytes { offset: u64 },

    /// A non-empty kind with a zero-length payload cannot be told apart from
    /// the empty marker on the wire.
    #[error("cannot encode an empty {kind} payload")]
    EmptyPayload { kind: Kind },

    /// A length or count does not fit the 32-bit signed wire field.
    #[error("{what} of {len} does not fit in a segment field")]
    TooLarge { what: &'static str, len: usize },

    #[error("the empty tree cannot have children")]
    ChildOfEmpty,
}

/// Convenience alias used throughout valtree-core.
pub type Result<T> = std::result::Result<T, TreeError>;
