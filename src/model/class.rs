// Fri Oct 16 2026 - Alex

use super::types::{TypeId, TypeRegistry};
use super::ClassId;
use bitflags::bitflags;
use itertools::Itertools;
use serde::Serialize;
use std::fmt;

/// Member/class visibility
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Access {
    #[default]
    Public,
    Protected,
    Private,
}

impl fmt::Display for Access {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Public => "public",
            Self::Protected => "protected",
            Self::Private => "private",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum ClassKind {
    #[default]
    Class,
    Struct,
    Union,
    Namespace,
}

/// One entry of a class's base list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BaseClassSpecifier {
    pub base: ClassId,
    pub access: Access,
    pub is_virtual: bool,
}

bitflags! {
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
    pub struct MethodFlags: u32 {
        const STATIC = 1 << 0;
        const VIRTUAL = 1 << 1;
        const PURE_VIRTUAL = 1 << 2;
        const CONST = 1 << 3;
        const EXPLICIT = 1 << 4;
        const DELETED = 1 << 5;
        const CONSTRUCTOR = 1 << 6;
        const DESTRUCTOR = 1 << 7;
        const CONVERSION = 1 << 8;
        const SIGNAL = 1 << 9;
        const SLOT = 1 << 10;
        const PROPERTY_READ = 1 << 11;
        const PROPERTY_WRITE = 1 << 12;
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Parameter {
    pub name: String,
    pub ty: TypeId,
    /// Default argument source text, qualified where it could be resolved
    pub default_value: Option<String>,
}

impl Parameter {
    pub fn new(name: &str, ty: TypeId) -> Self {
        Self {
            name: name.to_string(),
            ty,
            default_value: None,
        }
    }

    pub fn with_default(mut self, value: String) -> Self {
        self.default_value = Some(value);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Method {
    pub owner: ClassId,
    pub name: String,
    pub return_type: TypeId,
    pub access: Access,
    pub parameters: Vec<Parameter>,
    pub flags: MethodFlags,
}

impl Method {
    pub fn new(owner: ClassId, name: &str, return_type: TypeId, access: Access) -> Self {
        Self {
            owner,
            name: name.to_string(),
            return_type,
            access,
            parameters: Vec::new(),
            flags: MethodFlags::empty(),
        }
    }

    pub fn is_constructor(&self) -> bool {
        self.flags.contains(MethodFlags::CONSTRUCTOR)
    }

    pub fn is_destructor(&self) -> bool {
        self.flags.contains(MethodFlags::DESTRUCTOR)
    }

    pub fn is_virtual(&self) -> bool {
        self.flags.contains(MethodFlags::VIRTUAL)
    }

    pub fn is_pure_virtual(&self) -> bool {
        self.flags.contains(MethodFlags::PURE_VIRTUAL)
    }

    pub fn is_static(&self) -> bool {
        self.flags.contains(MethodFlags::STATIC)
    }

    pub fn is_const(&self) -> bool {
        self.flags.contains(MethodFlags::CONST)
    }

    pub fn is_deleted(&self) -> bool {
        self.flags.contains(MethodFlags::DELETED)
    }

    pub fn is_property_accessor(&self) -> bool {
        self.flags
            .intersects(MethodFlags::PROPERTY_READ | MethodFlags::PROPERTY_WRITE)
    }

    /// `name(T1, T2) const`
    pub fn signature(&self, types: &TypeRegistry) -> String {
        let params = self.parameters.iter().map(|p| types.spelling(p.ty)).join(", ");
        let mut signature = format!("{}({})", self.name, params);
        if self.is_const() {
            signature.push_str(" const");
        }
        signature
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Field {
    pub owner: ClassId,
    pub name: String,
    pub ty: TypeId,
    pub access: Access,
    pub is_static: bool,
    pub is_mutable: bool,
}

/// A class, struct, union or namespace
#[derive(Debug, Clone, Default, Serialize)]
pub struct Class {
    pub name: String,
    pub qualified_name: String,
    /// Innermost enclosing namespace, empty at global scope
    pub nspace: String,
    /// Enclosing class or namespace entity
    pub parent: Option<ClassId>,
    pub kind: ClassKind,
    pub access: Access,
    pub is_forward_decl: bool,
    pub is_template: bool,
    pub file_name: Option<String>,
    pub bases: Vec<BaseClassSpecifier>,
    pub methods: Vec<Method>,
    pub fields: Vec<Field>,
}

impl Class {
    pub fn new(name: &str, qualified_name: &str, kind: ClassKind, is_forward_decl: bool) -> Self {
        Self {
            name: name.to_string(),
            qualified_name: qualified_name.to_string(),
            kind,
            is_forward_decl,
            ..Default::default()
        }
    }

    pub fn namespace(name: &str, qualified_name: &str) -> Self {
        Self::new(name, qualified_name, ClassKind::Namespace, false)
    }

    /// Members and bases are only meaningful when this is true
    pub fn has_definition(&self) -> bool {
        !self.is_forward_decl
    }

    pub fn is_namespace(&self) -> bool {
        self.kind == ClassKind::Namespace
    }

    pub fn base_classes(&self) -> &[BaseClassSpecifier] {
        &self.bases
    }

    pub fn find_methods<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Method> + 'a {
        self.methods.iter().filter(move |m| m.name == name)
    }

    pub fn find_field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn is_abstract(&self) -> bool {
        self.methods.iter().any(Method::is_pure_virtual)
    }

    /// `ns::Outer::Inner` becomes `ns__Outer__Inner`
    pub fn mangled_name(&self) -> String {
        self.qualified_name.replace("::", "__")
    }
}

impl fmt::Display for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.qualified_name)
    }
}
