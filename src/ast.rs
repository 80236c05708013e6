//! Abstract Syntax Tree for the schema text.

use crate::codec::LengthPrefix;

/// Root of a parsed schema: struct declarations in source order.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaDecl {
    pub structs: Vec<StructDecl>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StructDecl {
    pub name: String,
    pub fields: Vec<FieldDecl>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldDecl {
    pub name: String,
    pub type_spec: TypeSpec,
}

/// Field type as written in the schema.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeSpec {
    /// Built-in scalar or string name, or a caller-registered custom type.
    Named(String),
    /// `array<T>` (short prefix) or `long_array<T>` (long prefix).
    Array(LengthPrefix, Box<TypeSpec>),
}
