// Fri Oct 16 2026 - Alex

pub mod error;
pub mod index;
pub mod types;

pub use error::TreeError;
pub use index::{DeclIndex, Indexed, Scope};
pub use types::{Qualifiers, RawTemplateArg, RawType};

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Declaration tree of one parsed header, as emitted by the front end
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TranslationUnit {
    /// Header the tree was produced from
    pub file: String,
    #[serde(default)]
    pub decls: Vec<Decl>,
}

impl TranslationUnit {
    pub fn new(file: &str) -> Self {
        Self {
            file: file.to_string(),
            decls: Vec::new(),
        }
    }

    pub fn with_decl(mut self, decl: Decl) -> Self {
        self.decls.push(decl);
        self
    }

    pub fn from_json(json: &str) -> Result<Self, TreeError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self, TreeError> {
        let content = fs::read_to_string(path).map_err(|source| TreeError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content).map_err(|e| match e {
            TreeError::Decode(source) => TreeError::Malformed {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })
    }

    pub fn index(&self) -> DeclIndex<'_> {
        DeclIndex::build(self)
    }
}

/// Closed set of declaration kinds the front end reports
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Decl {
    Record(RecordDecl),
    Namespace(NamespaceDecl),
    Enum(EnumDecl),
    Typedef(TypedefDecl),
    Function(FunctionDecl),
}

impl Decl {
    pub fn qualified_name(&self) -> &str {
        match self {
            Self::Record(d) => &d.qualified_name,
            Self::Namespace(d) => &d.qualified_name,
            Self::Enum(d) => &d.qualified_name,
            Self::Typedef(d) => &d.qualified_name,
            Self::Function(d) => &d.qualified_name,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLocation {
    pub file: String,
    #[serde(default)]
    pub line: u32,
    #[serde(default)]
    pub column: u32,
}

impl SourceLocation {
    pub fn new(file: &str, line: u32) -> Self {
        Self {
            file: file.to_string(),
            line,
            column: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TagKind {
    #[default]
    Class,
    Struct,
    Union,
}

/// Access as spelled in the source; `None` for declarations outside a class
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessSpecifier {
    Public,
    Protected,
    Private,
    #[default]
    None,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordDecl {
    pub name: String,
    pub qualified_name: String,
    pub tag: TagKind,
    pub access: AccessSpecifier,
    pub location: Option<SourceLocation>,
    pub is_definition: bool,
    /// Primary template or partial specialization with unresolved parameters
    pub is_dependent: bool,
    /// Concrete instantiation of a class template
    pub is_specialization: bool,
    pub bases: Vec<BaseSpecifier>,
    pub methods: Vec<MethodDecl>,
    pub fields: Vec<FieldDecl>,
    /// Message text of every `static_assert` in the class body
    pub static_asserts: Vec<String>,
    /// Nested declarations
    pub decls: Vec<Decl>,
}

impl RecordDecl {
    pub fn new(qualified_name: &str, tag: TagKind) -> Self {
        Self {
            name: last_segment(qualified_name).to_string(),
            qualified_name: qualified_name.to_string(),
            tag,
            is_definition: true,
            ..Default::default()
        }
    }

    pub fn forward(qualified_name: &str, tag: TagKind) -> Self {
        Self {
            is_definition: false,
            ..Self::new(qualified_name, tag)
        }
    }

    pub fn with_base(mut self, base: BaseSpecifier) -> Self {
        self.bases.push(base);
        self
    }

    pub fn with_method(mut self, method: MethodDecl) -> Self {
        self.methods.push(method);
        self
    }

    pub fn with_field(mut self, field: FieldDecl) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_static_assert(mut self, message: &str) -> Self {
        self.static_asserts.push(message.to_string());
        self
    }

    pub fn with_decl(mut self, decl: Decl) -> Self {
        self.decls.push(decl);
        self
    }

    pub fn with_location(mut self, location: SourceLocation) -> Self {
        self.location = Some(location);
        self
    }

    pub fn dependent(mut self) -> Self {
        self.is_dependent = true;
        self
    }

    pub fn specialization(mut self) -> Self {
        self.is_specialization = true;
        self
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BaseSpecifier {
    #[serde(rename = "type")]
    pub ty: RawType,
    #[serde(default)]
    pub access: AccessSpecifier,
    #[serde(default)]
    pub is_virtual: bool,
}

impl BaseSpecifier {
    pub fn new(ty: RawType, access: AccessSpecifier) -> Self {
        Self {
            ty,
            access,
            is_virtual: false,
        }
    }

    pub fn with_virtual(mut self) -> Self {
        self.is_virtual = true;
        self
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MethodKind {
    #[default]
    Normal,
    Constructor,
    Destructor,
    Conversion,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MethodDecl {
    pub name: String,
    pub kind: MethodKind,
    pub access: AccessSpecifier,
    pub return_type: RawType,
    pub params: Vec<ParamDecl>,
    pub is_virtual: bool,
    pub is_pure: bool,
    pub is_static: bool,
    pub is_const: bool,
    pub is_explicit: bool,
    pub is_deleted: bool,
    /// Annotation attributes attached by framework macros
    pub attributes: Vec<String>,
    pub location: Option<SourceLocation>,
}

impl MethodDecl {
    pub fn new(name: &str, return_type: RawType) -> Self {
        Self {
            name: name.to_string(),
            access: AccessSpecifier::Public,
            return_type,
            ..Default::default()
        }
    }

    pub fn constructor(class_name: &str) -> Self {
        Self {
            kind: MethodKind::Constructor,
            ..Self::new(class_name, RawType::void())
        }
    }

    pub fn destructor(class_name: &str) -> Self {
        Self {
            kind: MethodKind::Destructor,
            ..Self::new(&format!("~{}", class_name), RawType::void())
        }
    }

    pub fn conversion(target: RawType) -> Self {
        Self {
            kind: MethodKind::Conversion,
            ..Self::new("operator", target)
        }
    }

    pub fn with_access(mut self, access: AccessSpecifier) -> Self {
        self.access = access;
        self
    }

    pub fn with_param(mut self, param: ParamDecl) -> Self {
        self.params.push(param);
        self
    }

    pub fn with_attribute(mut self, attribute: &str) -> Self {
        self.attributes.push(attribute.to_string());
        self
    }

    pub fn with_virtual(mut self) -> Self {
        self.is_virtual = true;
        self
    }

    pub fn with_pure(mut self) -> Self {
        self.is_virtual = true;
        self.is_pure = true;
        self
    }

    pub fn with_static(mut self) -> Self {
        self.is_static = true;
        self
    }

    pub fn with_const(mut self) -> Self {
        self.is_const = true;
        self
    }

    pub fn with_explicit(mut self) -> Self {
        self.is_explicit = true;
        self
    }

    pub fn with_deleted(mut self) -> Self {
        self.is_deleted = true;
        self
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParamDecl {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub ty: RawType,
    #[serde(default)]
    pub default: Option<DefaultArg>,
}

impl ParamDecl {
    pub fn new(name: &str, ty: RawType) -> Self {
        Self {
            name: name.to_string(),
            ty,
            default: None,
        }
    }

    pub fn with_default(mut self, default: DefaultArg) -> Self {
        self.default = Some(default);
        self
    }
}

/// Default argument expression: its printed text plus the declarations it names
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DefaultArg {
    pub text: String,
    #[serde(default)]
    pub references: Vec<DeclRef>,
}

impl DefaultArg {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            references: Vec::new(),
        }
    }

    pub fn with_reference(mut self, spelling: &str, target: &str) -> Self {
        self.references.push(DeclRef {
            spelling: spelling.to_string(),
            target: target.to_string(),
        });
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclRef {
    /// Name as written in the expression
    pub spelling: String,
    /// Fully qualified name of the referenced declaration
    pub target: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldDecl {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: RawType,
    pub access: AccessSpecifier,
    pub is_static: bool,
    pub is_mutable: bool,
    pub location: Option<SourceLocation>,
}

impl FieldDecl {
    pub fn new(name: &str, ty: RawType) -> Self {
        Self {
            name: name.to_string(),
            ty,
            access: AccessSpecifier::Public,
            ..Default::default()
        }
    }

    pub fn with_access(mut self, access: AccessSpecifier) -> Self {
        self.access = access;
        self
    }

    pub fn with_static(mut self) -> Self {
        self.is_static = true;
        self
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EnumDecl {
    pub name: String,
    pub qualified_name: String,
    pub access: AccessSpecifier,
    pub is_definition: bool,
    pub is_scoped: bool,
    pub members: Vec<EnumConstantDecl>,
    pub location: Option<SourceLocation>,
}

impl EnumDecl {
    pub fn new(qualified_name: &str) -> Self {
        Self {
            name: last_segment(qualified_name).to_string(),
            qualified_name: qualified_name.to_string(),
            is_definition: true,
            ..Default::default()
        }
    }

    pub fn scoped(mut self) -> Self {
        self.is_scoped = true;
        self
    }

    pub fn forward(mut self) -> Self {
        self.is_definition = false;
        self
    }

    pub fn with_member(mut self, name: &str, value: i64) -> Self {
        self.members.push(EnumConstantDecl {
            name: name.to_string(),
            value: Some(value),
        });
        self
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnumConstantDecl {
    pub name: String,
    /// Evaluated initializer, when the front end could fold it
    #[serde(default)]
    pub value: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TypedefDecl {
    pub name: String,
    pub qualified_name: String,
    pub underlying: RawType,
    pub access: AccessSpecifier,
    pub location: Option<SourceLocation>,
}

impl TypedefDecl {
    pub fn new(qualified_name: &str, underlying: RawType) -> Self {
        Self {
            name: last_segment(qualified_name).to_string(),
            qualified_name: qualified_name.to_string(),
            underlying,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FunctionDecl {
    pub name: String,
    pub qualified_name: String,
    pub return_type: RawType,
    pub params: Vec<ParamDecl>,
    pub is_deleted: bool,
    pub attributes: Vec<String>,
    pub location: Option<SourceLocation>,
}

impl FunctionDecl {
    pub fn new(qualified_name: &str, return_type: RawType) -> Self {
        Self {
            name: last_segment(qualified_name).to_string(),
            qualified_name: qualified_name.to_string(),
            return_type,
            ..Default::default()
        }
    }

    pub fn with_param(mut self, param: ParamDecl) -> Self {
        self.params.push(param);
        self
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NamespaceDecl {
    pub name: String,
    pub qualified_name: String,
    pub decls: Vec<Decl>,
    pub location: Option<SourceLocation>,
}

impl NamespaceDecl {
    pub fn new(qualified_name: &str) -> Self {
        Self {
            name: last_segment(qualified_name).to_string(),
            qualified_name: qualified_name.to_string(),
            ..Default::default()
        }
    }

    pub fn with_decl(mut self, decl: Decl) -> Self {
        self.decls.push(decl);
        self
    }
}

/// Unqualified part of a `::` separated name
pub fn last_segment(qualified_name: &str) -> &str {
    qualified_name
        .rsplit("::")
        .next()
        .unwrap_or(qualified_name)
}

/// Enclosing scope of a `::` separated name, empty at global scope
pub fn scope_prefix(qualified_name: &str) -> &str {
    qualified_name
        .rfind("::")
        .map(|pos| &qualified_name[..pos])
        .unwrap_or("")
}
