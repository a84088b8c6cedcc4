// Fri Oct 16 2026 - Alex

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Qualifiers {
    #[serde(default)]
    pub is_const: bool,
    #[serde(default)]
    pub is_volatile: bool,
}

impl Qualifiers {
    pub fn constant() -> Self {
        Self {
            is_const: true,
            is_volatile: false,
        }
    }
}

/// Type as written in the declaration tree, before canonicalization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RawType {
    Builtin {
        name: String,
        #[serde(default)]
        qualifiers: Qualifiers,
    },
    Record {
        name: String,
        #[serde(default)]
        template_args: Vec<RawTemplateArg>,
        #[serde(default)]
        qualifiers: Qualifiers,
    },
    Enum {
        name: String,
        #[serde(default)]
        qualifiers: Qualifiers,
    },
    /// Reference to an alias together with what the alias stands for
    Typedef {
        name: String,
        underlying: Box<RawType>,
        #[serde(default)]
        qualifiers: Qualifiers,
    },
    /// Qualifiers apply to the pointer itself
    Pointer {
        pointee: Box<RawType>,
        #[serde(default)]
        qualifiers: Qualifiers,
    },
    LvalueReference {
        pointee: Box<RawType>,
    },
    RvalueReference {
        pointee: Box<RawType>,
    },
    ConstantArray {
        element: Box<RawType>,
        size: u64,
    },
    Function {
        return_type: Box<RawType>,
        #[serde(default)]
        params: Vec<RawType>,
    },
    TemplateParam {
        name: String,
        #[serde(default)]
        qualifiers: Qualifiers,
    },
    /// Any other type that depends on a template parameter (`typename T::value_type`)
    Dependent {
        spelling: String,
    },
    /// Unnamed struct/union/enum used inline
    Anonymous {
        #[serde(default)]
        qualifiers: Qualifiers,
    },
}

impl Default for RawType {
    fn default() -> Self {
        Self::void()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RawTemplateArg {
    Type {
        #[serde(rename = "type")]
        ty: RawType,
    },
    Integral {
        value: i64,
        /// Qualified enum name when the parameter is of enumeration type
        #[serde(default)]
        enum_name: Option<String>,
    },
}

impl RawType {
    pub fn void() -> Self {
        Self::builtin("void")
    }

    pub fn builtin(name: &str) -> Self {
        Self::Builtin {
            name: name.to_string(),
            qualifiers: Qualifiers::default(),
        }
    }

    pub fn record(name: &str) -> Self {
        Self::Record {
            name: name.to_string(),
            template_args: Vec::new(),
            qualifiers: Qualifiers::default(),
        }
    }

    pub fn specialization(name: &str, template_args: Vec<RawTemplateArg>) -> Self {
        Self::Record {
            name: name.to_string(),
            template_args,
            qualifiers: Qualifiers::default(),
        }
    }

    pub fn enumeration(name: &str) -> Self {
        Self::Enum {
            name: name.to_string(),
            qualifiers: Qualifiers::default(),
        }
    }

    pub fn typedef(name: &str, underlying: RawType) -> Self {
        Self::Typedef {
            name: name.to_string(),
            underlying: Box::new(underlying),
            qualifiers: Qualifiers::default(),
        }
    }

    pub fn pointer(pointee: RawType) -> Self {
        Self::Pointer {
            pointee: Box::new(pointee),
            qualifiers: Qualifiers::default(),
        }
    }

    pub fn reference(pointee: RawType) -> Self {
        Self::LvalueReference {
            pointee: Box::new(pointee),
        }
    }

    pub fn rvalue_reference(pointee: RawType) -> Self {
        Self::RvalueReference {
            pointee: Box::new(pointee),
        }
    }

    pub fn array(element: RawType, size: u64) -> Self {
        Self::ConstantArray {
            element: Box::new(element),
            size,
        }
    }

    pub fn function(return_type: RawType, params: Vec<RawType>) -> Self {
        Self::Function {
            return_type: Box::new(return_type),
            params,
        }
    }

    pub fn template_param(name: &str) -> Self {
        Self::TemplateParam {
            name: name.to_string(),
            qualifiers: Qualifiers::default(),
        }
    }

    pub fn anonymous() -> Self {
        Self::Anonymous {
            qualifiers: Qualifiers::default(),
        }
    }

    /// Adds `const` at this level; references, arrays and functions carry no qualifiers
    pub fn with_const(mut self) -> Self {
        if let Some(qualifiers) = self.qualifiers_mut() {
            qualifiers.is_const = true;
        }
        self
    }

    pub fn with_volatile(mut self) -> Self {
        if let Some(qualifiers) = self.qualifiers_mut() {
            qualifiers.is_volatile = true;
        }
        self
    }

    pub fn qualifiers(&self) -> Qualifiers {
        match self {
            Self::Builtin { qualifiers, .. }
            | Self::Record { qualifiers, .. }
            | Self::Enum { qualifiers, .. }
            | Self::Typedef { qualifiers, .. }
            | Self::Pointer { qualifiers, .. }
            | Self::TemplateParam { qualifiers, .. }
            | Self::Anonymous { qualifiers } => *qualifiers,
            Self::LvalueReference { .. }
            | Self::RvalueReference { .. }
            | Self::ConstantArray { .. }
            | Self::Function { .. }
            | Self::Dependent { .. } => Qualifiers::default(),
        }
    }

    fn qualifiers_mut(&mut self) -> Option<&mut Qualifiers> {
        match self {
            Self::Builtin { qualifiers, .. }
            | Self::Record { qualifiers, .. }
            | Self::Enum { qualifiers, .. }
            | Self::Typedef { qualifiers, .. }
            | Self::Pointer { qualifiers, .. }
            | Self::TemplateParam { qualifiers, .. }
            | Self::Anonymous { qualifiers } => Some(qualifiers),
            Self::LvalueReference { .. }
            | Self::RvalueReference { .. }
            | Self::ConstantArray { .. }
            | Self::Function { .. }
            | Self::Dependent { .. } => None,
        }
    }

    /// Whether anything inside this type still names a template parameter
    pub fn is_dependent(&self) -> bool {
        match self {
            Self::TemplateParam { .. } | Self::Dependent { .. } => true,
            Self::Builtin { .. } | Self::Enum { .. } | Self::Anonymous { .. } => false,
            Self::Record { template_args, .. } => template_args.iter().any(|arg| match arg {
                RawTemplateArg::Type { ty } => ty.is_dependent(),
                RawTemplateArg::Integral { .. } => false,
            }),
            Self::Typedef { underlying, .. } => underlying.is_dependent(),
            Self::Pointer { pointee, .. }
            | Self::LvalueReference { pointee }
            | Self::RvalueReference { pointee } => pointee.is_dependent(),
            Self::ConstantArray { element, .. } => element.is_dependent(),
            Self::Function {
                return_type,
                params,
            } => return_type.is_dependent() || params.iter().any(RawType::is_dependent),
        }
    }
}
