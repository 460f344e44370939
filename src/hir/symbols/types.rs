//! Symbol table types.
//!
//! Names are unique within each map. A later declaration with the same name
//! replaces the earlier one but keeps its original slot in declaration order.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use crate::base::Position;

/// A typed input (or table field) declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputDecl {
    /// Declared type without the `?` marker (`int`, `text[]`, `enum`).
    #[serde(rename = "type")]
    pub ty: String,
    /// `?` after the type: the value may be null.
    pub nullable: bool,
    /// `?` after the name: the caller may omit it.
    pub optional: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filters: Option<Vec<SmolStr>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub line: u32,
    pub column: u32,
}

impl InputDecl {
    /// Required only when neither nullable nor optional.
    pub fn is_required(&self) -> bool {
        !self.nullable && !self.optional
    }

    pub fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }
}

/// A `stack` variable. Keys carry the `$` sigil.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VarDecl {
    /// Inferred from a literal `value`, otherwise `any`.
    #[serde(rename = "type")]
    pub ty: String,
    pub nullable: bool,
    pub optional: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub line: u32,
    pub column: u32,
}

impl VarDecl {
    pub fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }
}

/// Declared inputs and stack variables of one document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolTable {
    #[serde(rename = "input")]
    pub inputs: IndexMap<String, InputDecl>,
    #[serde(rename = "var")]
    pub vars: IndexMap<String, VarDecl>,
    /// Table `schema` fields (db scheme only).
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub fields: IndexMap<String, InputDecl>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(&self, name: &str) -> Option<&InputDecl> {
        self.inputs.get(name)
    }

    /// Look up a variable; the `$` sigil is optional.
    pub fn var(&self, name: &str) -> Option<&VarDecl> {
        if name.starts_with('$') {
            self.vars.get(name)
        } else {
            self.vars.get(format!("${}", name).as_str())
        }
    }

    pub fn field(&self, name: &str) -> Option<&InputDecl> {
        self.fields.get(name)
    }

    /// Inputs a caller must supply, in declaration order.
    pub fn required_inputs(&self) -> impl Iterator<Item = (&str, &InputDecl)> {
        self.inputs
            .iter()
            .filter(|(_, decl)| decl.is_required())
            .map(|(name, decl)| (name.as_str(), decl))
    }

    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty() && self.vars.is_empty() && self.fields.is_empty()
    }
}
