//! Error type, byte order and bounds-checked buffer primitives shared by every field codec.
//!
//! All multi-byte values are big-endian. Reads and writes check the buffer bounds at the
//! point of access and report [`CodecError::OutOfBounds`] instead of panicking; nothing is
//! pre-validated, so a failing write may leave earlier bytes of the same pass written.

use byteorder::{BigEndian, ByteOrder};
use tracing::warn;

/// Byte order of every multi-byte field on the wire.
pub type Order = BigEndian;

#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("Out of bounds: {needed} byte(s) at offset {offset}, buffer is {len} bytes")]
    OutOfBounds {
        offset: usize,
        needed: usize,
        len: usize,
    },
    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },
    #[error("Missing field: {0}")]
    MissingField(String),
    #[error("Duplicate field: {0}")]
    DuplicateField(String),
    #[error("field {name}: {source}")]
    Field {
        name: String,
        #[source]
        source: Box<CodecError>,
    },
}

impl CodecError {
    pub(crate) fn in_field(name: &str, err: CodecError) -> Self {
        CodecError::Field {
            name: name.to_string(),
            source: Box::new(err),
        }
    }
}

/// Width of the count that precedes a string's characters or an array's elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthPrefix {
    /// One byte, up to 255.
    Short,
    /// Two bytes, up to 65535.
    Long,
}

impl LengthPrefix {
    pub const fn width(self) -> usize {
        match self {
            LengthPrefix::Short => 1,
            LengthPrefix::Long => 2,
        }
    }

    /// Largest count the prefix can represent.
    pub const fn max(self) -> usize {
        match self {
            LengthPrefix::Short => u8::MAX as usize,
            LengthPrefix::Long => u16::MAX as usize,
        }
    }

    /// Writes `count`, truncated to the prefix width when it does not fit.
    pub fn write(self, buf: &mut [u8], offset: usize, count: usize) -> Result<usize, CodecError> {
        if count > self.max() {
            warn!(
                count,
                max = self.max(),
                offset,
                "length prefix overflow, count truncated on the wire"
            );
        }
        match self {
            LengthPrefix::Short => write_u8(buf, offset, count as u8)?,
            LengthPrefix::Long => write_u16(buf, offset, count as u16)?,
        }
        Ok(self.width())
    }

    pub fn read(self, buf: &[u8], offset: usize) -> Result<usize, CodecError> {
        Ok(match self {
            LengthPrefix::Short => read_u8(buf, offset)? as usize,
            LengthPrefix::Long => read_u16(buf, offset)? as usize,
        })
    }
}

/// Returns `buf[offset..offset + needed]` range bounds, or `OutOfBounds`.
fn span(len: usize, offset: usize, needed: usize) -> Result<std::ops::Range<usize>, CodecError> {
    match offset.checked_add(needed) {
        Some(end) if end <= len => Ok(offset..end),
        _ => Err(CodecError::OutOfBounds {
            offset,
            needed,
            len,
        }),
    }
}

pub(crate) fn bytes(buf: &[u8], offset: usize, needed: usize) -> Result<&[u8], CodecError> {
    let r = span(buf.len(), offset, needed)?;
    Ok(&buf[r])
}

pub(crate) fn bytes_mut(
    buf: &mut [u8],
    offset: usize,
    needed: usize,
) -> Result<&mut [u8], CodecError> {
    let r = span(buf.len(), offset, needed)?;
    Ok(&mut buf[r])
}

/// Fails with `OutOfBounds` unless `needed` bytes are addressable at `offset`.
pub(crate) fn ensure(buf: &[u8], offset: usize, needed: usize) -> Result<(), CodecError> {
    span(buf.len(), offset, needed).map(|_| ())
}

pub(crate) fn read_u8(buf: &[u8], offset: usize) -> Result<u8, CodecError> {
    Ok(bytes(buf, offset, 1)?[0])
}
pub(crate) fn read_u16(buf: &[u8], offset: usize) -> Result<u16, CodecError> {
    Ok(Order::read_u16(bytes(buf, offset, 2)?))
}
pub(crate) fn read_i16(buf: &[u8], offset: usize) -> Result<i16, CodecError> {
    Ok(Order::read_i16(bytes(buf, offset, 2)?))
}
pub(crate) fn read_u32(buf: &[u8], offset: usize) -> Result<u32, CodecError> {
    Ok(Order::read_u32(bytes(buf, offset, 4)?))
}
pub(crate) fn read_i32(buf: &[u8], offset: usize) -> Result<i32, CodecError> {
    Ok(Order::read_i32(bytes(buf, offset, 4)?))
}
pub(crate) fn read_f32(buf: &[u8], offset: usize) -> Result<f32, CodecError> {
    Ok(Order::read_f32(bytes(buf, offset, 4)?))
}
pub(crate) fn read_f64(buf: &[u8], offset: usize) -> Result<f64, CodecError> {
    Ok(Order::read_f64(bytes(buf, offset, 8)?))
}

pub(crate) fn write_u8(buf: &mut [u8], offset: usize, v: u8) -> Result<(), CodecError> {
    bytes_mut(buf, offset, 1)?[0] = v;
    Ok(())
}
pub(crate) fn write_u16(buf: &mut [u8], offset: usize, v: u16) -> Result<(), CodecError> {
    Order::write_u16(bytes_mut(buf, offset, 2)?, v);
    Ok(())
}
pub(crate) fn write_i16(buf: &mut [u8], offset: usize, v: i16) -> Result<(), CodecError> {
    Order::write_i16(bytes_mut(buf, offset, 2)?, v);
    Ok(())
}
pub(crate) fn write_u32(buf: &mut [u8], offset: usize, v: u32) -> Result<(), CodecError> {
    Order::write_u32(bytes_mut(buf, offset, 4)?, v);
    Ok(())
}
pub(crate) fn write_i32(buf: &mut [u8], offset: usize, v: i32) -> Result<(), CodecError> {
    Order::write_i32(bytes_mut(buf, offset, 4)?, v);
    Ok(())
}
pub(crate) fn write_f32(buf: &mut [u8], offset: usize, v: f32) -> Result<(), CodecError> {
    Order::write_f32(bytes_mut(buf, offset, 4)?, v);
    Ok(())
}
pub(crate) fn write_f64(buf: &mut [u8], offset: usize, v: f64) -> Result<(), CodecError> {
    Order::write_f64(bytes_mut(buf, offset, 8)?, v);
    Ok(())
}
