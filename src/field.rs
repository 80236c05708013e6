//! The [`Field`] contract shared by every codec.
//!
//! A field is a stateless codec for one kind of [`Value`]. It reports how many bytes a value
//! needs, writes a value at an explicit offset and reads one back, returning the number of bytes
//! it consumed so the caller can advance its own cursor. No field keeps position state between
//! calls.
//!
//! The trait is object safe: [`Struct`](crate::Struct) stores fields as `Arc<dyn Field>`, and so
//! do arrays for their element codec. Implement it to plug a custom encoding into a struct:
//!
//! ```
//! use schemabuf::{CodecError, Decoded, Field, Record, Value, F32};
//!
//! /// Two big-endian f32s, decoded as `{x, y}`.
//! #[derive(Debug)]
//! struct Vector2;
//!
//! impl Field for Vector2 {
//!     fn min_size(&self) -> usize {
//!         8
//!     }
//!
//!     fn size(&self, _value: &Value) -> Result<usize, CodecError> {
//!         Ok(8)
//!     }
//!
//!     fn serialize(
//!         &self,
//!         buf: &mut [u8],
//!         offset: usize,
//!         value: &Value,
//!     ) -> Result<usize, CodecError> {
//!         let point = value.as_record().ok_or(CodecError::TypeMismatch {
//!             expected: "record",
//!             found: value.kind(),
//!         })?;
//!         let x = point.get("x").ok_or_else(|| CodecError::MissingField("x".into()))?;
//!         let y = point.get("y").ok_or_else(|| CodecError::MissingField("y".into()))?;
//!         Ok(F32.serialize(buf, offset, x)? + F32.serialize(buf, offset + 4, y)?)
//!     }
//!
//!     fn deserialize(&self, buf: &[u8], offset: usize) -> Result<Decoded, CodecError> {
//!         let x = F32.deserialize(buf, offset)?;
//!         let y = F32.deserialize(buf, offset + x.length)?;
//!         let mut point = Record::new();
//!         point.insert("x".to_string(), x.value);
//!         point.insert("y".to_string(), y.value);
//!         Ok(Decoded::new(Value::Record(point), x.length + y.length))
//!     }
//! }
//! ```

use crate::codec::CodecError;
use crate::value::Value;
use std::fmt;
use std::sync::Arc;

/// Shared handle to a field codec.
pub type FieldRef = Arc<dyn Field>;

/// A decoded value and the number of bytes it occupied.
#[derive(Debug, Clone, PartialEq)]
pub struct Decoded {
    pub value: Value,
    pub length: usize,
}

impl Decoded {
    pub fn new(value: Value, length: usize) -> Self {
        Decoded { value, length }
    }
}

/// Codec for one value kind.
///
/// `serialize` must write exactly `size(value)` bytes, and `deserialize` must consume exactly
/// the bytes `serialize` wrote for the same value.
pub trait Field: fmt::Debug + Send + Sync {
    /// Smallest encoding of this field: the fixed size of a scalar, the prefix of a dynamic field.
    fn min_size(&self) -> usize;

    /// Number of bytes `value` occupies once encoded.
    fn size(&self, value: &Value) -> Result<usize, CodecError>;

    /// Writes `value` at `offset` and returns the number of bytes written.
    fn serialize(&self, buf: &mut [u8], offset: usize, value: &Value) -> Result<usize, CodecError>;

    /// Reads a value at `offset`.
    fn deserialize(&self, buf: &[u8], offset: usize) -> Result<Decoded, CodecError>;

    /// Number of bytes the encoded value at `offset` occupies.
    ///
    /// The default decodes the value; built-in fields override it to skip without allocating.
    fn extent(&self, buf: &[u8], offset: usize) -> Result<usize, CodecError> {
        self.deserialize(buf, offset).map(|d| d.length)
    }
}

impl<F: Field + ?Sized> Field for Arc<F> {
    fn min_size(&self) -> usize {
        (**self).min_size()
    }
    fn size(&self, value: &Value) -> Result<usize, CodecError> {
        (**self).size(value)
    }
    fn serialize(&self, buf: &mut [u8], offset: usize, value: &Value) -> Result<usize, CodecError> {
        (**self).serialize(buf, offset, value)
    }
    fn deserialize(&self, buf: &[u8], offset: usize) -> Result<Decoded, CodecError> {
        (**self).deserialize(buf, offset)
    }
    fn extent(&self, buf: &[u8], offset: usize) -> Result<usize, CodecError> {
        (**self).extent(buf, offset)
    }
}

pub(crate) fn mismatch(expected: &'static str, found: &Value) -> CodecError {
    CodecError::TypeMismatch {
        expected,
        found: found.kind(),
    }
}
