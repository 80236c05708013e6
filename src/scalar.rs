//! Fixed-size field codecs: integers, floats and booleans.
//!
//! Integers are two's-complement and floats IEEE-754, both big-endian. A boolean is written as
//! `0xFF` (true) or `0x00` (false) and read back as true for any byte above `0x55`.

use crate::codec::{self, CodecError};
use crate::field::{mismatch, Decoded, Field};
use crate::value::Value;

/// Bytes above this decode as `true`.
pub const BOOL_THRESHOLD: u8 = 0x55;
pub const BOOL_TRUE: u8 = 0xFF;
pub const BOOL_FALSE: u8 = 0x00;

macro_rules! scalar_field {
    (
        $(#[$doc:meta])*
        $name:ident, $variant:ident, $kind:literal, $size:expr, $read:path, $write:path
    ) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
        pub struct $name;

        impl $name {
            pub const SIZE: usize = $size;
        }

        impl Field for $name {
            fn min_size(&self) -> usize {
                Self::SIZE
            }

            fn size(&self, value: &Value) -> Result<usize, CodecError> {
                match value {
                    Value::$variant(_) => Ok(Self::SIZE),
                    other => Err(mismatch($kind, other)),
                }
            }

            fn serialize(
                &self,
                buf: &mut [u8],
                offset: usize,
                value: &Value,
            ) -> Result<usize, CodecError> {
                match value {
                    Value::$variant(v) => {
                        $write(buf, offset, *v)?;
                        Ok(Self::SIZE)
                    }
                    other => Err(mismatch($kind, other)),
                }
            }

            fn deserialize(&self, buf: &[u8], offset: usize) -> Result<Decoded, CodecError> {
                let v = $read(buf, offset)?;
                Ok(Decoded::new(Value::$variant(v), Self::SIZE))
            }

            fn extent(&self, buf: &[u8], offset: usize) -> Result<usize, CodecError> {
                codec::ensure(buf, offset, Self::SIZE)?;
                Ok(Self::SIZE)
            }
        }
    };
}

fn read_i8(buf: &[u8], offset: usize) -> Result<i8, CodecError> {
    codec::read_u8(buf, offset).map(|b| b as i8)
}

fn write_i8(buf: &mut [u8], offset: usize, v: i8) -> Result<(), CodecError> {
    codec::write_u8(buf, offset, v as u8)
}

fn read_bool(buf: &[u8], offset: usize) -> Result<bool, CodecError> {
    codec::read_u8(buf, offset).map(|b| b > BOOL_THRESHOLD)
}

fn write_bool(buf: &mut [u8], offset: usize, v: bool) -> Result<(), CodecError> {
    codec::write_u8(buf, offset, if v { BOOL_TRUE } else { BOOL_FALSE })
}

scalar_field!(
    /// Signed 8-bit integer.
    I8, I8, "i8", 1, read_i8, write_i8
);
scalar_field!(
    /// Unsigned 8-bit integer.
    U8, U8, "u8", 1, codec::read_u8, codec::write_u8
);
scalar_field!(
    /// Signed 16-bit integer.
    I16, I16, "i16", 2, codec::read_i16, codec::write_i16
);
scalar_field!(
    /// Unsigned 16-bit integer.
    U16, U16, "u16", 2, codec::read_u16, codec::write_u16
);
scalar_field!(
    /// Signed 32-bit integer.
    I32, I32, "i32", 4, codec::read_i32, codec::write_i32
);
scalar_field!(
    /// Unsigned 32-bit integer.
    U32, U32, "u32", 4, codec::read_u32, codec::write_u32
);
scalar_field!(
    /// Single-precision float.
    F32, F32, "f32", 4, codec::read_f32, codec::write_f32
);
scalar_field!(
    /// Double-precision float, 8 bytes on the wire.
    F64, F64, "f64", 8, codec::read_f64, codec::write_f64
);
scalar_field!(
    /// Boolean, one byte.
    Bool, Bool, "bool", 1, read_bool, write_bool
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bool_decode_threshold() {
        let cases = [
            (0x00u8, false),
            (0x55, false),
            (0x56, true),
            (0x01, false),
            (0xFF, true),
            (0x80, true),
        ];
        for (byte, expected) in cases {
            let d = Bool.deserialize(&[byte], 0).unwrap();
            assert_eq!(d.value, Value::Bool(expected), "byte {:#04x}", byte);
            assert_eq!(d.length, 1);
        }
    }

    #[test]
    fn bool_encode_sentinels() {
        let mut buf = [0x12u8; 2];
        Bool.serialize(&mut buf, 0, &Value::Bool(true)).unwrap();
        Bool.serialize(&mut buf, 1, &Value::Bool(false)).unwrap();
        assert_eq!(buf, [0xFF, 0x00]);
    }

    #[test]
    fn integers_are_big_endian() {
        let mut buf = [0u8; 4];
        assert_eq!(I32.serialize(&mut buf, 0, &Value::I32(123_456_789)).unwrap(), 4);
        assert_eq!(buf, 123_456_789i32.to_be_bytes());
        assert_eq!(I32.deserialize(&buf, 0).unwrap().value, Value::I32(123_456_789));

        assert_eq!(U32.serialize(&mut buf, 0, &Value::U32(2_000_000_000)).unwrap(), 4);
        assert_eq!(U32.deserialize(&buf, 0).unwrap().value, Value::U32(2_000_000_000));

        let mut two = [0u8; 2];
        I16.serialize(&mut two, 0, &Value::I16(-420)).unwrap();
        assert_eq!(two, (-420i16).to_be_bytes());
    }

    #[test]
    fn f64_size_matches_encoding() {
        let mut buf = [0u8; 8];
        let v = Value::F64(std::f64::consts::PI);
        assert_eq!(F64.size(&v).unwrap(), 8);
        assert_eq!(F64.serialize(&mut buf, 0, &v).unwrap(), 8);
        assert_eq!(F64.deserialize(&buf, 0).unwrap(), Decoded::new(v, 8));
    }

    #[test]
    fn wrong_variant_is_rejected() {
        let mut buf = [0u8; 1];
        assert!(matches!(
            U8.serialize(&mut buf, 0, &Value::I8(1)),
            Err(CodecError::TypeMismatch { expected: "u8", found: "i8" })
        ));
        assert!(I16.size(&Value::Bool(true)).is_err());
    }

    #[test]
    fn write_past_end_fails() {
        let mut buf = [0u8; 3];
        assert!(matches!(
            U32.serialize(&mut buf, 0, &Value::U32(1)),
            Err(CodecError::OutOfBounds { .. })
        ));
        assert!(F32.extent(&buf, 0).is_err());
        assert_eq!(U16.extent(&buf, 1).unwrap(), 2);
    }
}
