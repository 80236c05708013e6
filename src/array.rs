//! Length-prefixed homogeneous array field.
//!
//! Layout: `[count][element 0][element 1]...`, each element encoded by the inner field right
//! after the previous one. The inner field can itself be an array or a string, so nested
//! layouts such as `array<array<bool>>` need nothing special. Counts above the prefix maximum
//! are truncated on the wire, the same way strings are.

use crate::codec::{CodecError, LengthPrefix};
use crate::field::{mismatch, Decoded, Field, FieldRef};
use crate::value::Value;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct ArrayField {
    prefix: LengthPrefix,
    inner: FieldRef,
}

impl ArrayField {
    pub fn new(prefix: LengthPrefix, inner: impl Field + 'static) -> Self {
        Self::with_shared(prefix, Arc::new(inner))
    }

    /// Array over an already shared element codec.
    pub fn with_shared(prefix: LengthPrefix, inner: FieldRef) -> Self {
        ArrayField { prefix, inner }
    }

    /// Up to 255 elements.
    pub fn short(inner: impl Field + 'static) -> Self {
        Self::new(LengthPrefix::Short, inner)
    }

    /// Up to 65535 elements.
    pub fn long(inner: impl Field + 'static) -> Self {
        Self::new(LengthPrefix::Long, inner)
    }

    pub fn prefix(&self) -> LengthPrefix {
        self.prefix
    }

    pub fn inner(&self) -> &FieldRef {
        &self.inner
    }

    fn elements<'a>(&self, value: &'a Value) -> Result<&'a [Value], CodecError> {
        match value {
            Value::List(items) => Ok(items),
            other => Err(mismatch("list", other)),
        }
    }
}

impl Field for ArrayField {
    fn min_size(&self) -> usize {
        self.prefix.width()
    }

    fn size(&self, value: &Value) -> Result<usize, CodecError> {
        self.elements(value)?.iter().try_fold(self.prefix.width(), |acc, item| {
            Ok::<_, CodecError>(acc + self.inner.size(item)?)
        })
    }

    fn serialize(&self, buf: &mut [u8], offset: usize, value: &Value) -> Result<usize, CodecError> {
        let items = self.elements(value)?;
        let mut pos = offset + self.prefix.write(buf, offset, items.len())?;
        for item in items {
            pos += self.inner.serialize(buf, pos, item)?;
        }
        Ok(pos - offset)
    }

    fn deserialize(&self, buf: &[u8], offset: usize) -> Result<Decoded, CodecError> {
        let count = self.prefix.read(buf, offset)?;
        let mut pos = offset + self.prefix.width();
        let mut items = Vec::with_capacity(count);
        for _ in 0..count {
            let d = self.inner.deserialize(buf, pos)?;
            pos += d.length;
            items.push(d.value);
        }
        Ok(Decoded::new(Value::List(items), pos - offset))
    }

    fn extent(&self, buf: &[u8], offset: usize) -> Result<usize, CodecError> {
        let count = self.prefix.read(buf, offset)?;
        let mut pos = offset + self.prefix.width();
        for _ in 0..count {
            pos += self.inner.extent(buf, pos)?;
        }
        Ok(pos - offset)
    }
}
