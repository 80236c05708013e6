//! Parse schema text into AST using PEST.

use crate::ast::*;
use crate::codec::LengthPrefix;
use pest::Parser;
use pest_derive::Parser as PestParser;

#[derive(PestParser)]
#[grammar = "grammar.pest"]
struct SchemaParser;

/// Parse schema source into AST.
pub fn parse_decls(source: &str) -> Result<SchemaDecl, String> {
    let pairs = SchemaParser::parse(Rule::schema, source).map_err(|e| e.to_string())?;
    let pair = pairs.into_iter().next().ok_or("Empty parse")?;
    build_schema(pair)
}

fn build_schema(pair: pest::iterators::Pair<Rule>) -> Result<SchemaDecl, String> {
    let mut structs = Vec::new();
    for inner in pair.into_inner() {
        if inner.as_rule() == Rule::struct_def {
            structs.push(build_struct(inner)?);
        }
    }
    Ok(SchemaDecl { structs })
}

fn build_struct(pair: pest::iterators::Pair<Rule>) -> Result<StructDecl, String> {
    let mut name = String::new();
    let mut fields = Vec::new();
    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::ident => name = inner.as_str().to_string(),
            Rule::field_def => fields.push(build_field(inner)?),
            _ => {}
        }
    }
    if name.is_empty() {
        return Err("struct: missing name".to_string());
    }
    Ok(StructDecl { name, fields })
}

fn build_field(pair: pest::iterators::Pair<Rule>) -> Result<FieldDecl, String> {
    let mut it = pair.into_inner();
    let name = it.next().ok_or("field: missing name")?.as_str().to_string();
    let type_pair = it.next().ok_or("field: missing type")?;
    let type_spec = build_type_spec(type_pair)?;
    Ok(FieldDecl { name, type_spec })
}

fn build_type_spec(pair: pest::iterators::Pair<Rule>) -> Result<TypeSpec, String> {
    let inner = pair.into_inner().next().ok_or("Empty type_spec")?;
    match inner.as_rule() {
        Rule::ident => Ok(TypeSpec::Named(inner.as_str().to_string())),
        Rule::array_type => {
            let mut it = inner.into_inner();
            let kind = it.next().ok_or("array: missing kind")?;
            let prefix = match kind.as_str() {
                "long_array" => LengthPrefix::Long,
                _ => LengthPrefix::Short,
            };
            let elem = it.next().ok_or("array: missing element type")?;
            Ok(TypeSpec::Array(prefix, Box::new(build_type_spec(elem)?)))
        }
        r => Err(format!("unexpected type_spec child: {:?}", r)),
    }
}
