//! # schemabuf — schema-driven binary records
//!
//! Declare a record as an ordered list of named fields and get a codec that turns a
//! [`Record`] into one flat byte buffer and back. There is no header, no field name and no type
//! tag on the wire: both sides must share the same declaration.
//!
//! ## Field types
//!
//! - Scalars: [`I8`], [`U8`], [`I16`], [`U16`], [`I32`], [`U32`], [`F32`], [`F64`], [`Bool`]
//!   (big-endian; `bool` is `0xFF`/`0x00`, read back as true above `0x55`)
//! - [`StringField::short`] / [`StringField::long`]: 1 or 2 byte length, one byte per character
//! - [`ArrayField::short`] / [`ArrayField::long`]: 1 or 2 byte count, any element field (nesting
//!   allowed)
//! - Anything implementing [`Field`]
//!
//! ## Example
//!
//! ```
//! use schemabuf::{ArrayField, Record, StringField, Struct, Value, I8};
//!
//! let person = Struct::builder()
//!     .field("name", StringField::short())
//!     .field("roles", ArrayField::short(StringField::short()))
//!     .field("health", I8)
//!     .build()?;
//!
//! let mut record = Record::new();
//! record.insert("name".to_string(), Value::from("John Doe"));
//! record.insert("roles".to_string(), Value::from(vec!["Admin", "Enjoyer"]));
//! record.insert("health".to_string(), Value::I8(100));
//!
//! let bytes = person.serialize(&record)?;
//! assert_eq!(bytes.len(), person.size(&record)?);
//! assert_eq!(person.deserialize(&bytes, 0)?, record);
//! # Ok::<(), schemabuf::CodecError>(())
//! ```
//!
//! ## Schema text
//!
//! The same layouts can be written as text and parsed with [`parse`]:
//!
//! ```text
//! struct Person {
//!     name: string;
//!     roles: array<string>;
//!     health: i8;
//! }
//! ```
//!
//! ## Limits
//!
//! Length prefixes are not validated: a string or array longer than its prefix can count is
//! written with a truncated count. Strings only round-trip in the Latin-1 range.

pub mod array;
pub mod ast;
pub mod codec;
pub mod field;
pub mod parser;
pub mod scalar;
pub mod schema;
pub mod string;
pub mod structure;
pub mod value;

pub use array::ArrayField;
pub use codec::{CodecError, LengthPrefix};
pub use field::{Decoded, Field, FieldRef};
pub use scalar::{Bool, F32, F64, I16, I32, I8, U16, U32, U8};
pub use schema::{parse, parse_file, parse_with_custom, Schema, SchemaError};
pub use string::StringField;
pub use structure::{NamedField, Struct, StructBuilder};
pub use value::{Record, Value};
