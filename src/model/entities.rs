// Fri Oct 16 2026 - Alex

use super::class::{Access, Parameter};
use super::types::TypeId;
use super::ClassId;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnumMember {
    /// Scoped enumerators carry the enum's name: `Color::Red`
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Enum {
    pub name: String,
    pub qualified_name: String,
    pub nspace: String,
    pub parent: Option<ClassId>,
    pub access: Access,
    pub is_scoped: bool,
    pub file_name: Option<String>,
    pub members: Vec<EnumMember>,
}

impl Enum {
    pub fn member_names(&self) -> impl Iterator<Item = &str> {
        self.members.iter().map(|m| m.name.as_str())
    }
}

/// Free function
#[derive(Debug, Clone, Serialize)]
pub struct Function {
    pub name: String,
    pub qualified_name: String,
    pub nspace: String,
    pub return_type: TypeId,
    pub parameters: Vec<Parameter>,
    pub file_name: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Typedef {
    pub name: String,
    pub qualified_name: String,
    pub nspace: String,
    pub parent: Option<ClassId>,
    /// Fully resolved target of the alias
    pub underlying: TypeId,
    pub file_name: Option<String>,
}
