//! Segment header layout.
//!
//! Each node is stored as one segment:
//!
//! ```text
//! signature: u8 | children_count: i32 LE | data_size: i32 LE | data: [u8; data_size]
//! ```
//!
//! `children_count` is the number of direct children, whose segments follow
//! immediately in pre-order. There is no end-of-children marker. A
//! `data_size` of zero or less denotes the empty tree.

use std::io::{self, Write};

use byteorder::{ByteOrder, LittleEndian, WriteBytesExt};

/// Bytes in a segment header (signature + two `i32` fields).
pub const HEADER_LEN: usize = 1 + 4 + 4;

/// The fixed-size prefix of a segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentHeader {
    pub signature: u8,
    pub children_count: i32,
    pub data_size: i32,
}

impl SegmentHeader {
    /// True when the header carries no payload and therefore stands for the
    /// empty tree.
    pub fn is_empty_marker(&self) -> bool {
        self.data_size <= 0
    }

    pub fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_u8(self.signature)?;
        writer.write_i32::<LittleEndian>(self.children_count)?;
        writer.write_i32::<LittleEndian>(self.data_size)?;
        Ok(())
    }

    pub fn from_bytes(buf: &[u8; HEADER_LEN]) -> Self {
        Self {
            signature: buf[0],
            children_count: LittleEndian::read_i32(&buf[1..5]),
            data_size: LittleEndian::read_i32(&buf[5..9]),
        }
    }
}
