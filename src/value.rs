//! Runtime values for encoding/decoding (codec representation).

use std::collections::HashMap;

/// A record: field name to value. Built by the caller for serialize, produced by deserialize.
pub type Record = HashMap<String, Value>;

/// A single value carried by a field.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    I8(i8),
    U8(u8),
    I16(i16),
    U16(u16),
    I32(i32),
    U32(u32),
    F32(f32),
    F64(f64),
    Bool(bool),
    String(String),
    List(Vec<Value>),
    /// Compound value for custom fields (e.g. a 2D point encoded as two floats).
    Record(Record),
}

impl Value {
    /// Variant name, as reported in type mismatch errors.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::I8(_) => "i8",
            Value::U8(_) => "u8",
            Value::I16(_) => "i16",
            Value::U16(_) => "u16",
            Value::I32(_) => "i32",
            Value::U32(_) => "u32",
            Value::F32(_) => "f32",
            Value::F64(_) => "f64",
            Value::Bool(_) => "bool",
            Value::String(_) => "string",
            Value::List(_) => "list",
            Value::Record(_) => "record",
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::I8(x) => Some(*x as i64),
            Value::I16(x) => Some(*x as i64),
            Value::I32(x) => Some(*x as i64),
            Value::U8(x) => Some(*x as i64),
            Value::U16(x) => Some(*x as i64),
            Value::U32(x) => Some(*x as i64),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Value::U8(x) => Some(*x as u64),
            Value::U16(x) => Some(*x as u64),
            Value::U32(x) => Some(*x as u64),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::F32(x) => Some(*x as f64),
            Value::F64(x) => Some(*x),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Value::Record(m) => Some(m),
            _ => None,
        }
    }
}

macro_rules! impl_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::$variant(v)
                }
            }
        )*
    };
}

impl_from!(
    i8 => I8,
    u8 => U8,
    i16 => I16,
    u16 => U16,
    i32 => I32,
    u32 => U32,
    f32 => F32,
    f64 => F64,
    bool => Bool,
    String => String,
    Record => Record,
);

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::List(v.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_vec_becomes_nested_list() {
        let v = Value::from(vec![vec![true, false], vec![]]);
        let rows = v.as_list().expect("list");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].as_list().map(|r| r.len()), Some(2));
        assert_eq!(rows[1].as_list().map(|r| r.len()), Some(0));
    }

    #[test]
    fn accessors_match_variants() {
        assert_eq!(Value::from(-5i16).as_i64(), Some(-5));
        assert_eq!(Value::from(-5i16).as_u64(), None);
        assert_eq!(Value::from(3.5f32).as_f64(), Some(3.5));
        assert_eq!(Value::from("abc").as_str(), Some("abc"));
        assert_eq!(Value::from(true).kind(), "bool");
        assert_eq!(Value::from(true).as_bool(), Some(true));
        assert_eq!(Value::from(1u8).as_bool(), None);
    }
}
