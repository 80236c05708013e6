//! Length-prefixed string field.
//!
//! Layout: `[count][one byte per character]`, where the count is one byte
//! ([`LengthPrefix::Short`]) or two ([`LengthPrefix::Long`]). Each character is stored as the low
//! byte of its code point, so only the Latin-1 range round-trips; decoding maps every byte back
//! to the character with that code point.
//!
//! Counts above the prefix maximum are truncated on the wire while every character is still
//! written. Keeping strings within [`LengthPrefix::max`] is the caller's job.

use crate::codec::{self, CodecError, LengthPrefix};
use crate::field::{mismatch, Decoded, Field};
use crate::value::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StringField {
    prefix: LengthPrefix,
}

impl StringField {
    pub const fn new(prefix: LengthPrefix) -> Self {
        StringField { prefix }
    }

    /// Up to 255 characters.
    pub const fn short() -> Self {
        Self::new(LengthPrefix::Short)
    }

    /// Up to 65535 characters.
    pub const fn long() -> Self {
        Self::new(LengthPrefix::Long)
    }

    pub fn prefix(&self) -> LengthPrefix {
        self.prefix
    }
}

impl Field for StringField {
    fn min_size(&self) -> usize {
        self.prefix.width()
    }

    fn size(&self, value: &Value) -> Result<usize, CodecError> {
        match value {
            Value::String(s) => Ok(self.prefix.width() + s.chars().count()),
            other => Err(mismatch("string", other)),
        }
    }

    fn serialize(&self, buf: &mut [u8], offset: usize, value: &Value) -> Result<usize, CodecError> {
        let s = match value {
            Value::String(s) => s,
            other => return Err(mismatch("string", other)),
        };
        let count = s.chars().count();
        let width = self.prefix.write(buf, offset, count)?;
        let body = codec::bytes_mut(buf, offset + width, count)?;
        for (slot, c) in body.iter_mut().zip(s.chars()) {
            *slot = c as u32 as u8;
        }
        Ok(width + count)
    }

    fn deserialize(&self, buf: &[u8], offset: usize) -> Result<Decoded, CodecError> {
        let count = self.prefix.read(buf, offset)?;
        let width = self.prefix.width();
        let body = codec::bytes(buf, offset + width, count)?;
        let s: String = body.iter().map(|&b| char::from(b)).collect();
        Ok(Decoded::new(Value::String(s), width + count))
    }

    fn extent(&self, buf: &[u8], offset: usize) -> Result<usize, CodecError> {
        let count = self.prefix.read(buf, offset)?;
        let width = self.prefix.width();
        codec::ensure(buf, offset + width, count)?;
        Ok(width + count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_string_layout() {
        let f = StringField::short();
        let v = Value::from("Admin");
        let mut buf = vec![0u8; f.size(&v).unwrap()];
        assert_eq!(f.serialize(&mut buf, 0, &v).unwrap(), 6);
        assert_eq!(buf, b"\x05Admin");
        assert_eq!(f.deserialize(&buf, 0).unwrap(), Decoded::new(v, 6));
        assert_eq!(f.extent(&buf, 0).unwrap(), 6);
    }

    #[test]
    fn long_string_uses_two_byte_prefix() {
        let f = StringField::long();
        let text = "x".repeat(300);
        let v = Value::String(text.clone());
        let mut buf = vec![0u8; f.size(&v).unwrap()];
        assert_eq!(buf.len(), 302);
        f.serialize(&mut buf, 0, &v).unwrap();
        assert_eq!(&buf[..2], &[0x01, 0x2C]);
        assert_eq!(f.deserialize(&buf, 0).unwrap().value.as_str(), Some(text.as_str()));
    }

    #[test]
    fn long_prefix_limit() {
        let f = StringField::long();
        assert_eq!(f.prefix(), LengthPrefix::Long);

        let v = Value::String("a".repeat(65535));
        let mut buf = vec![0u8; f.size(&v).unwrap()];
        assert_eq!(f.serialize(&mut buf, 0, &v).unwrap(), 65537);
        assert_eq!(&buf[..2], &[0xFF, 0xFF]);
        assert_eq!(f.deserialize(&buf, 0).unwrap(), Decoded::new(v, 65537));

        // One more character wraps the count to zero.
        let v = Value::String("a".repeat(65536));
        let mut buf = vec![0u8; f.size(&v).unwrap()];
        assert_eq!(buf.len(), 65538);
        assert_eq!(f.serialize(&mut buf, 0, &v).unwrap(), 65538);
        assert_eq!(&buf[..2], &[0, 0]);
        assert_eq!(f.deserialize(&buf, 0).unwrap(), Decoded::new(Value::from(""), 2));
        assert_eq!(f.extent(&buf, 0).unwrap(), 2);
    }

    #[test]
    fn latin1_round_trips_and_wider_chars_keep_low_byte() {
        let f = StringField::short();
        let mut buf = [0u8; 8];
        f.serialize(&mut buf, 0, &Value::from("café")).unwrap();
        assert_eq!(f.deserialize(&buf, 0).unwrap().value, Value::from("café"));

        // U+0141 keeps only 0x41.
        f.serialize(&mut buf, 0, &Value::from("\u{141}")).unwrap();
        assert_eq!(&buf[..2], &[1, 0x41]);
        assert_eq!(f.deserialize(&buf, 0).unwrap().value, Value::from("A"));
    }

    #[test]
    fn empty_string_is_prefix_only() {
        let f = StringField::long();
        let mut buf = [0xAAu8; 2];
        assert_eq!(f.serialize(&mut buf, 0, &Value::from("")).unwrap(), 2);
        assert_eq!(buf, [0, 0]);
        assert_eq!(f.deserialize(&buf, 0).unwrap(), Decoded::new(Value::from(""), 2));
    }

    #[test]
    fn truncated_body_fails() {
        let buf = [3u8, b'a', b'b'];
        assert!(matches!(
            StringField::short().deserialize(&buf, 0),
            Err(CodecError::OutOfBounds { offset: 1, needed: 3, len: 3 })
        ));
        assert!(StringField::short().extent(&buf, 0).is_err());
    }
}
