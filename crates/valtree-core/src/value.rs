//! Scalar payloads carried by tree nodes, and the kind ↔ signature mapping.
//!
//! A node holds exactly one [`Value`]. The wire format tags each segment with
//! a one-byte signature derived from the value's [`Kind`]; payload bytes are
//! always little-endian so streams are portable between hosts.

use std::borrow::Cow;
use std::fmt;

use byteorder::{ByteOrder, LittleEndian};
use serde::Serialize;

/// Size of an `Int` payload on the wire.
pub const INT_PAYLOAD_LEN: usize = 4;
/// Size of a `Real` payload on the wire.
pub const REAL_PAYLOAD_LEN: usize = 8;

/// The closed set of value kinds, without their payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Invalid,
    Int,
    Real,
    String,
}

impl Kind {
    /// Signature byte written at the start of every segment of this kind.
    pub fn signature(self) -> u8 {
        match self {
            Kind::Invalid => b'e',
            Kind::Int => b'i',
            Kind::Real => b'r',
            Kind::String => b's',
        }
    }

    /// Inverse of [`Kind::signature`]. Unknown bytes map to `None`; the reader
    /// turns that into an error rather than guessing.
    pub fn from_signature(signature: u8) -> Option<Kind> {
        match signature {
            b'e' => Some(Kind::Invalid),
            b'i' => Some(Kind::Int),
            b'r' => Some(Kind::Real),
            b's' => Some(Kind::String),
            _ => None,
        }
    }

    /// Payload length for kinds whose size is fixed by type.
    /// `Invalid` carries no payload, `String` is variable.
    pub fn fixed_payload_len(self) -> Option<usize> {
        match self {
            Kind::Invalid => Some(0),
            Kind::Int => Some(INT_PAYLOAD_LEN),
            Kind::Real => Some(REAL_PAYLOAD_LEN),
            Kind::String => None,
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Kind::Invalid => "invalid",
            Kind::Int => "int",
            Kind::Real => "real",
            Kind::String => "string",
        })
    }
}

/// A node's scalar payload.
///
/// Strings are raw bytes: they are not required to be UTF-8 and carry no
/// terminator.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// The empty-tree marker. Has no payload.
    Invalid,
    Int(i32),
    Real(f64),
    String(Vec<u8>),
}

impl Value {
    pub fn kind(&self) -> Kind {
        match self {
            Value::Invalid => Kind::Invalid,
            Value::Int(_) => Kind::Int,
            Value::Real(_) => Kind::Real,
            Value::String(_) => Kind::String,
        }
    }

    /// The payload exactly as it appears in a segment's data field.
    pub fn raw_bytes(&self) -> Cow<'_, [u8]> {
        match self {
            Value::Invalid => Cow::Borrowed(&[]),
            Value::Int(n) => {
                let mut buf = [0u8; INT_PAYLOAD_LEN];
                LittleEndian::write_i32(&mut buf, *n);
                Cow::Owned(buf.to_vec())
            }
            Value::Real(r) => {
                let mut buf = [0u8; REAL_PAYLOAD_LEN];
                LittleEndian::write_f64(&mut buf, *r);
                Cow::Owned(buf.to_vec())
            }
            Value::String(bytes) => Cow::Borrowed(bytes),
        }
    }

    /// Length of [`Value::raw_bytes`] without materializing it.
    pub fn payload_len(&self) -> usize {
        match self {
            Value::String(bytes) => bytes.len(),
            other => other.kind().fixed_payload_len().unwrap_or(0),
        }
    }

    /// Rebuild a value from a segment payload. The caller has already checked
    /// that fixed-size kinds got the right number of bytes.
    pub(crate) fn from_payload(kind: Kind, payload: Vec<u8>) -> Value {
        match kind {
            Kind::Invalid => Value::Invalid,
            Kind::Int => Value::Int(LittleEndian::read_i32(&payload)),
            Kind::Real => Value::Real(LittleEndian::read_f64(&payload)),
            Kind::String => Value::String(payload),
        }
    }

    /// Append the value's text form (`int 42`, `real 7.500000`, `string abc`,
    /// nothing for `Invalid`) to `out`.
    pub(crate) fn write_data_text(&self, out: &mut Vec<u8>) {
        match self {
            Value::Invalid => {}
            Value::Int(n) => out.extend_from_slice(format!("int {n}").as_bytes()),
            // NaN prints lowercase with its sign, like the infinities.
            Value::Real(r) if r.is_nan() => {
                let text: &[u8] = if r.is_sign_negative() { b"real -nan" } else { b"real nan" };
                out.extend_from_slice(text);
            }
            Value::Real(r) => out.extend_from_slice(format!("real {r:.6}").as_bytes()),
            Value::String(bytes) => {
                out.extend_from_slice(b"string ");
                out.extend_from_slice(bytes);
            }
        }
    }

    /// Text form of the payload alone, lossily decoded for display.
    pub fn data_text(&self) -> String {
        let mut out = Vec::new();
        self.write_data_text(&mut out);
        String::from_utf8_lossy(&out).into_owned()
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(n)
    }
}

impl From<f64> for Value {
    fn from(r: f64) -> Self {
        Value::Real(r)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.as_bytes().to_vec())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s.into_bytes())
    }
}

impl From<Vec<u8>> for Value {
    fn from(bytes: Vec<u8>) -> Self {
        Value::String(bytes)
    }
}
