//! Struct engine: a named, ordered list of fields encoded back to back.
//!
//! The wire form of a struct is the concatenation of its fields in declaration order, with no
//! header, names or tags. Producer and consumer must agree on the same declaration; a buffer
//! read with a different struct decodes to garbage or fails with
//! [`CodecError::OutOfBounds`].

use crate::codec::CodecError;
use crate::field::{Field, FieldRef};
use crate::value::{Record, Value};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, trace};

#[derive(Debug, Clone)]
pub struct NamedField {
    pub name: String,
    pub field: FieldRef,
}

/// An immutable record layout. Cloning shares the field codecs.
#[derive(Debug, Clone)]
pub struct Struct {
    fields: Vec<NamedField>,
}

/// Collects fields in declaration order; duplicate names are rejected by [`StructBuilder::build`].
#[derive(Debug, Default)]
pub struct StructBuilder {
    fields: Vec<NamedField>,
}

impl StructBuilder {
    pub fn field(self, name: impl Into<String>, field: impl Field + 'static) -> Self {
        self.shared(name, Arc::new(field))
    }

    /// Adds a field codec that is shared with other structs.
    pub fn shared(mut self, name: impl Into<String>, field: FieldRef) -> Self {
        self.fields.push(NamedField {
            name: name.into(),
            field,
        });
        self
    }

    pub fn build(self) -> Result<Struct, CodecError> {
        Struct::new(self.fields)
    }
}

impl Struct {
    pub fn builder() -> StructBuilder {
        StructBuilder::default()
    }

    pub fn new(fields: Vec<NamedField>) -> Result<Self, CodecError> {
        let mut seen = HashSet::with_capacity(fields.len());
        for f in &fields {
            if !seen.insert(f.name.as_str()) {
                return Err(CodecError::DuplicateField(f.name.clone()));
            }
        }
        debug!(fields = fields.len(), "struct built");
        Ok(Struct { fields })
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Field names in wire order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// Smallest buffer any record of this struct can need: empty strings and arrays.
    pub fn min_size(&self) -> usize {
        self.fields.iter().map(|f| f.field.min_size()).sum()
    }

    /// Encoded size of `record`.
    pub fn size(&self, record: &Record) -> Result<usize, CodecError> {
        let mut total = 0;
        for f in &self.fields {
            let v = lookup(record, &f.name)?;
            total += f
                .field
                .size(v)
                .map_err(|e| CodecError::in_field(&f.name, e))?;
        }
        Ok(total)
    }

    /// Encodes `record` into a freshly allocated buffer of exactly [`Struct::size`] bytes.
    pub fn serialize(&self, record: &Record) -> Result<Vec<u8>, CodecError> {
        let mut out = vec![0u8; self.size(record)?];
        self.serialize_into(&mut out, record, 0)?;
        Ok(out)
    }

    /// Encodes `record` at `offset` and returns the number of bytes written.
    pub fn serialize_into(
        &self,
        buf: &mut [u8],
        record: &Record,
        offset: usize,
    ) -> Result<usize, CodecError> {
        let mut pos = offset;
        for f in &self.fields {
            let v = lookup(record, &f.name)?;
            pos += f
                .field
                .serialize(buf, pos, v)
                .map_err(|e| CodecError::in_field(&f.name, e))?;
        }
        trace!(offset, written = pos - offset, "struct serialized");
        Ok(pos - offset)
    }

    /// Decodes a record at `offset`.
    pub fn deserialize(&self, buf: &[u8], offset: usize) -> Result<Record, CodecError> {
        self.deserialize_with_length(buf, offset).map(|(record, _)| record)
    }

    /// Decodes a record at `offset` and returns it with the number of bytes consumed.
    pub fn deserialize_with_length(
        &self,
        buf: &[u8],
        offset: usize,
    ) -> Result<(Record, usize), CodecError> {
        let mut out = Record::with_capacity(self.fields.len());
        let mut pos = offset;
        for f in &self.fields {
            let d = f
                .field
                .deserialize(buf, pos)
                .map_err(|e| CodecError::in_field(&f.name, e))?;
            pos += d.length;
            out.insert(f.name.clone(), d.value);
        }
        trace!(offset, consumed = pos - offset, "struct deserialized");
        Ok((out, pos - offset))
    }

    /// Bytes occupied by the encoded record at `offset`, without decoding it.
    pub fn extent(&self, buf: &[u8], offset: usize) -> Result<usize, CodecError> {
        let mut pos = offset;
        for f in &self.fields {
            pos += f
                .field
                .extent(buf, pos)
                .map_err(|e| CodecError::in_field(&f.name, e))?;
        }
        Ok(pos - offset)
    }
}

fn lookup<'a>(record: &'a Record, name: &str) -> Result<&'a Value, CodecError> {
    record
        .get(name)
        .ok_or_else(|| CodecError::MissingField(name.to_string()))
}
