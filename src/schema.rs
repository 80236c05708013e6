//! Schema text front end: turns parsed struct declarations into [`Struct`] codecs.
//!
//! Built-in type names are `i8 u8 i16 u16 i32 u32 f32 f64 bool string long_string`, plus
//! `array<T>` and `long_array<T>`. Any other name must be supplied by the caller through
//! [`parse_with_custom`], which is how custom [`Field`] implementations reach schema text.

use crate::array::ArrayField;
use crate::ast::{SchemaDecl, StructDecl, TypeSpec};
use crate::codec::CodecError;
use crate::field::{Field, FieldRef};
use crate::parser::parse_decls;
use crate::scalar::{Bool, F32, F64, I16, I32, I8, U16, U32, U8};
use crate::string::StringField;
use crate::structure::{NamedField, Struct};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Unknown type {type_name} in {struct_name}.{field}")]
    UnknownType {
        struct_name: String,
        field: String,
        type_name: String,
    },
    #[error("Duplicate struct name: {0}")]
    DuplicateStruct(String),
    #[error("struct {name}: {source}")]
    Struct {
        name: String,
        #[source]
        source: CodecError,
    },
    #[error("IO: {0}")]
    Io(#[from] std::io::Error),
}

/// Named structs resolved from schema text.
#[derive(Debug, Clone)]
pub struct Schema {
    structs: Vec<(String, Struct)>,
    by_name: HashMap<String, usize>,
}

impl Schema {
    /// Builds every declared struct, looking unknown type names up in `custom`.
    pub fn resolve(
        decl: SchemaDecl,
        custom: &HashMap<String, FieldRef>,
    ) -> Result<Self, SchemaError> {
        let mut structs = Vec::with_capacity(decl.structs.len());
        let mut by_name = HashMap::new();
        for (i, s) in decl.structs.into_iter().enumerate() {
            if by_name.insert(s.name.clone(), i).is_some() {
                return Err(SchemaError::DuplicateStruct(s.name));
            }
            let built = build_struct(&s, custom)?;
            structs.push((s.name, built));
        }
        debug!(structs = structs.len(), "schema resolved");
        Ok(Schema { structs, by_name })
    }

    pub fn get(&self, name: &str) -> Option<&Struct> {
        self.by_name.get(name).map(|&i| &self.structs[i].1)
    }

    /// Struct names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.structs.iter().map(|(n, _)| n.as_str())
    }

    pub fn len(&self) -> usize {
        self.structs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.structs.is_empty()
    }
}

/// Parses schema text using only the built-in types.
pub fn parse(source: &str) -> Result<Schema, SchemaError> {
    parse_with_custom(source, &HashMap::new())
}

/// Parses schema text; type names not built in are resolved from `custom`.
pub fn parse_with_custom(
    source: &str,
    custom: &HashMap<String, FieldRef>,
) -> Result<Schema, SchemaError> {
    let decl = parse_decls(source).map_err(SchemaError::Parse)?;
    Schema::resolve(decl, custom)
}

/// Reads and parses a schema file using only the built-in types.
pub fn parse_file(path: impl AsRef<Path>) -> Result<Schema, SchemaError> {
    let source = std::fs::read_to_string(path)?;
    parse(&source)
}

fn build_struct(s: &StructDecl, custom: &HashMap<String, FieldRef>) -> Result<Struct, SchemaError> {
    let mut fields = Vec::with_capacity(s.fields.len());
    for f in &s.fields {
        let field = build_field(&f.type_spec, custom).ok_or_else(|| SchemaError::UnknownType {
            struct_name: s.name.clone(),
            field: f.name.clone(),
            type_name: leaf_name(&f.type_spec).to_string(),
        })?;
        fields.push(NamedField {
            name: f.name.clone(),
            field,
        });
    }
    Struct::new(fields).map_err(|source| SchemaError::Struct {
        name: s.name.clone(),
        source,
    })
}

/// `None` when a type name is neither built in nor registered.
fn build_field(spec: &TypeSpec, custom: &HashMap<String, FieldRef>) -> Option<FieldRef> {
    match spec {
        TypeSpec::Named(name) => builtin(name).or_else(|| custom.get(name).cloned()),
        TypeSpec::Array(prefix, elem) => {
            let inner = build_field(elem, custom)?;
            let array: FieldRef = Arc::new(ArrayField::with_shared(*prefix, inner));
            Some(array)
        }
    }
}

fn builtin(name: &str) -> Option<FieldRef> {
    fn shared(f: impl Field + 'static) -> Option<FieldRef> {
        let f: FieldRef = Arc::new(f);
        Some(f)
    }
    match name {
        "i8" => shared(I8),
        "u8" => shared(U8),
        "i16" => shared(I16),
        "u16" => shared(U16),
        "i32" => shared(I32),
        "u32" => shared(U32),
        "f32" => shared(F32),
        "f64" => shared(F64),
        "bool" => shared(Bool),
        "string" => shared(StringField::short()),
        "long_string" => shared(StringField::long()),
        _ => None,
    }
}

fn leaf_name(spec: &TypeSpec) -> &str {
    match spec {
        TypeSpec::Named(name) => name,
        TypeSpec::Array(_, elem) => leaf_name(elem),
    }
}
