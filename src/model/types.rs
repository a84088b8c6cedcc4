// Fri Oct 16 2026 - Alex

use super::{ClassId, EnumId, TypedefId};
use indexmap::IndexSet;
use itertools::Itertools;
use serde::Serialize;
use std::hash::{Hash, Hasher};
use std::mem::{self, Discriminant};

/// Handle into the [`TypeRegistry`]; equal handles mean structurally equal types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TypeId(pub(crate) usize);

impl TypeId {
    /// Reserved entry for types that cannot be represented (anonymous aggregates)
    pub const INVALID: TypeId = TypeId(0);

    pub fn index(self) -> usize {
        self.0
    }

    pub fn is_valid(self) -> bool {
        self != Self::INVALID
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum TypeKind {
    #[default]
    Invalid,
    Builtin,
    Class(Option<ClassId>),
    Enum(Option<EnumId>),
    /// Alias kept by name instead of being flattened into its target
    Typedef(Option<TypedefId>),
    FunctionPointer,
}

impl TypeKind {
    /// Whether the entity this kind names (if any) is linked
    pub fn is_linked(&self) -> bool {
        !matches!(
            self,
            Self::Class(None) | Self::Enum(None) | Self::Typedef(None)
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct FunctionSignature {
    pub return_type: TypeId,
    pub params: Vec<TypeId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum TemplateArgument {
    Type(TypeId),
    /// Non-type argument, already spelled (literal or enumerator name)
    Value(String),
}

/// Canonical structural description of a C++ type.
///
/// Pointer constness is stored per level in declaration order, innermost level
/// first: `const char* const*` has `const_pointers == [true, false]` and a const leaf.
/// The entity a class/enum/typedef kind links to is not part of the identity, only
/// the kind of leaf is.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Type {
    pub name: String,
    pub kind: TypeKind,
    pub is_const: bool,
    pub is_volatile: bool,
    pub is_ref: bool,
    pub const_pointers: Vec<bool>,
    /// Pointer levels (same numbering as `const_pointers`) that are `volatile`
    pub volatile_pointers: Vec<usize>,
    pub array_lengths: Vec<u64>,
    pub function_pointer: Option<FunctionSignature>,
    pub template_args: Vec<TemplateArgument>,
    /// Alias this type was reached through; not part of the identity
    pub alias: Option<TypedefId>,
}

impl Type {
    pub fn invalid() -> Self {
        Self::default()
    }

    pub fn builtin(name: &str) -> Self {
        Self {
            name: name.to_string(),
            kind: TypeKind::Builtin,
            ..Default::default()
        }
    }

    pub fn class(name: &str, class: ClassId) -> Self {
        Self {
            name: name.to_string(),
            kind: TypeKind::Class(Some(class)),
            ..Default::default()
        }
    }

    pub fn with_pointer(mut self, is_const: bool) -> Self {
        self.const_pointers.push(is_const);
        self
    }

    pub fn with_const(mut self) -> Self {
        self.is_const = true;
        self
    }

    pub fn with_ref(mut self) -> Self {
        self.is_ref = true;
        self
    }

    pub fn pointer_depth(&self) -> usize {
        self.const_pointers.len()
    }

    pub fn is_const_pointer(&self, level: usize) -> bool {
        self.const_pointers.get(level).copied().unwrap_or(false)
    }

    pub fn is_volatile_pointer(&self, level: usize) -> bool {
        self.volatile_pointers.contains(&level)
    }

    pub fn is_valid(&self) -> bool {
        self.kind != TypeKind::Invalid
    }

    pub fn is_integral(&self) -> bool {
        self.kind == TypeKind::Builtin
    }

    pub fn is_function_pointer(&self) -> bool {
        self.function_pointer.is_some()
    }

    pub fn class_id(&self) -> Option<ClassId> {
        match self.kind {
            TypeKind::Class(class) => class,
            _ => None,
        }
    }

    pub fn enum_id(&self) -> Option<EnumId> {
        match self.kind {
            TypeKind::Enum(enumeration) => enumeration,
            _ => None,
        }
    }

    pub fn typedef_id(&self) -> Option<TypedefId> {
        match self.kind {
            TypeKind::Typedef(typedef) => typedef,
            _ => None,
        }
    }

    #[allow(clippy::type_complexity)]
    fn key(
        &self,
    ) -> (
        &str,
        Discriminant<TypeKind>,
        bool,
        bool,
        bool,
        &[bool],
        &[usize],
        &[u64],
        &Option<FunctionSignature>,
        &[TemplateArgument],
    ) {
        (
            &self.name,
            mem::discriminant(&self.kind),
            self.is_const,
            self.is_volatile,
            self.is_ref,
            &self.const_pointers,
            &self.volatile_pointers,
            &self.array_lengths,
            &self.function_pointer,
            &self.template_args,
        )
    }
}

impl PartialEq for Type {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Type {}

impl Hash for Type {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

/// Interning store for [`Type`]s; handle 0 is the invalid type
#[derive(Debug, Clone, Serialize)]
pub struct TypeRegistry {
    types: IndexSet<Type>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        let mut types = IndexSet::new();
        types.insert(Type::invalid());
        Self { types }
    }

    /// Returns the handle of the structurally equal entry, inserting `ty` if there is none.
    ///
    /// An existing entry whose entity was still unknown takes the link carried by `ty`.
    pub fn register(&mut self, ty: Type) -> TypeId {
        if !ty.is_valid() {
            return TypeId::INVALID;
        }
        let upgrade = match self.types.get_full(&ty) {
            Some((index, existing)) if !existing.kind.is_linked() && ty.kind.is_linked() => {
                Some((index, Type { kind: ty.kind, ..existing.clone() }))
            }
            Some((index, _)) => return TypeId(index),
            None => None,
        };
        match upgrade {
            Some((index, linked)) => {
                self.types.replace_full(linked);
                TypeId(index)
            }
            None => TypeId(self.types.insert_full(ty).0),
        }
    }

    /// Links every entry whose entity was unknown when it was registered; `resolve`
    /// maps such an entry to its linked kind. Returns how many entries changed.
    pub fn link_entities<F>(&mut self, resolve: F) -> usize
    where
        F: Fn(&Type) -> Option<TypeKind>,
    {
        let linked: Vec<Type> = self
            .types
            .iter()
            .filter(|ty| !ty.kind.is_linked())
            .filter_map(|ty| resolve(ty).map(|kind| Type { kind, ..ty.clone() }))
            .collect();
        let count = linked.len();
        for ty in linked {
            self.types.replace_full(ty);
        }
        count
    }

    pub fn lookup(&self, ty: &Type) -> Option<TypeId> {
        self.types.get_index_of(ty).map(TypeId)
    }

    pub fn get(&self, id: TypeId) -> &Type {
        // Handles are only minted by this registry, so they are always in range
        &self.types[id.0]
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.len() <= 1
    }

    pub fn iter(&self) -> impl Iterator<Item = (TypeId, &Type)> {
        self.types.iter().enumerate().map(|(i, ty)| (TypeId(i), ty))
    }

    /// C++ spelling of a registered type
    pub fn spelling(&self, id: TypeId) -> String {
        let ty = self.get(id);
        if let Some(signature) = &ty.function_pointer {
            let params = signature.params.iter().map(|p| self.spelling(*p)).join(", ");
            let stars = "*".repeat(ty.pointer_depth().max(1));
            return format!("{} ({})({})", self.spelling(signature.return_type), stars, params);
        }

        let mut out = String::new();
        if ty.is_const {
            out.push_str("const ");
        }
        if ty.is_volatile {
            out.push_str("volatile ");
        }
        out.push_str(&ty.name);
        if !ty.template_args.is_empty() {
            let args = ty
                .template_args
                .iter()
                .map(|arg| match arg {
                    TemplateArgument::Type(id) => self.spelling(*id),
                    TemplateArgument::Value(value) => value.clone(),
                })
                .join(", ");
            out.push('<');
            out.push_str(&args);
            if out.ends_with('>') {
                out.push(' ');
            }
            out.push('>');
        }
        for (level, is_const) in ty.const_pointers.iter().enumerate() {
            out.push('*');
            if *is_const {
                out.push_str(" const");
            }
            if ty.is_volatile_pointer(level) {
                out.push_str(" volatile");
            }
        }
        if ty.is_ref {
            out.push('&');
        }
        for length in &ty.array_lengths {
            out.push_str(&format!("[{}]", length));
        }
        out
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_structures_share_handle() {
        let mut registry = TypeRegistry::new();
        let a = registry.register(Type::builtin("char").with_const().with_pointer(false));
        let b = registry.register(Type::builtin("char").with_const().with_pointer(false));
        assert_eq!(a, b);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_any_field_difference_splits_handle() {
        let mut registry = TypeRegistry::new();
        let base = Type::builtin("int").with_pointer(false);
        let id = registry.register(base.clone());

        let variants = vec![
            Type { name: "long".to_string(), ..base.clone() },
            base.clone().with_const(),
            Type { is_volatile: true, ..base.clone() },
            base.clone().with_ref(),
            base.clone().with_pointer(false),
            Type { const_pointers: vec![true], ..base.clone() },
            Type { volatile_pointers: vec![0], ..base.clone() },
            Type { array_lengths: vec![4], ..base.clone() },
            Type {
                template_args: vec![TemplateArgument::Value("3".to_string())],
                ..base.clone()
            },
            Type {
                function_pointer: Some(FunctionSignature { return_type: id, params: vec![] }),
                ..base.clone()
            },
        ];
        for variant in variants {
            assert_ne!(registry.register(variant), id);
        }
    }

    #[test]
    fn test_alias_is_not_part_of_identity() {
        let mut registry = TypeRegistry::new();
        let plain = registry.register(Type::builtin("int"));
        let aliased = registry.register(Type {
            alias: Some(TypedefId(0)),
            ..Type::builtin("int")
        });
        assert_eq!(plain, aliased);
        assert_eq!(registry.get(plain).alias, None);
    }

    #[test]
    fn test_entity_link_is_not_part_of_identity() {
        let mut registry = TypeRegistry::new();
        let unknown = registry.register(Type {
            kind: TypeKind::Enum(None),
            ..Type::builtin("Color")
        });
        let known = registry.register(Type {
            kind: TypeKind::Enum(Some(EnumId(3))),
            ..Type::builtin("Color")
        });
        assert_eq!(unknown, known);
        assert_eq!(registry.get(unknown).enum_id(), Some(EnumId(3)));
        assert_eq!(registry.len(), 2);

        // Same name, different kind of leaf
        let class = registry.register(Type {
            kind: TypeKind::Class(None),
            ..Type::builtin("Color")
        });
        assert_ne!(class, known);
    }

    #[test]
    fn test_link_entities_after_the_fact() {
        let mut registry = TypeRegistry::new();
        let widget = registry.register(Type {
            kind: TypeKind::Class(None),
            ..Type::builtin("Widget")
        }.with_pointer(false));
        let linked = registry.link_entities(|ty| match ty.kind {
            TypeKind::Class(None) if ty.name == "Widget" => Some(TypeKind::Class(Some(ClassId(7)))),
            _ => None,
        });
        assert_eq!(linked, 1);
        assert_eq!(registry.get(widget).class_id(), Some(ClassId(7)));
        assert_eq!(registry.link_entities(|_| None), 0);
    }

    #[test]
    fn test_invalid_type_is_reserved() {
        let mut registry = TypeRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.register(Type::invalid()), TypeId::INVALID);
        assert!(!registry.get(TypeId::INVALID).is_valid());
    }

    #[test]
    fn test_spelling() {
        let mut registry = TypeRegistry::new();
        let string = registry.register(Type::builtin("char").with_const().with_pointer(false).with_pointer(true));
        assert_eq!(registry.spelling(string), "const char** const");

        let int = registry.register(Type::builtin("int"));
        let list = registry.register(Type {
            template_args: vec![TemplateArgument::Type(int)],
            ..Type::builtin("QList").with_const().with_ref()
        });
        assert_eq!(registry.spelling(list), "const QList<int>&");

        let void = registry.register(Type::builtin("void"));
        let callback = registry.register(Type {
            kind: TypeKind::FunctionPointer,
            function_pointer: Some(FunctionSignature { return_type: void, params: vec![int, int] }),
            const_pointers: vec![false],
            ..Default::default()
        });
        assert_eq!(registry.spelling(callback), "void (*)(int, int)");

        let port = registry.register(Type {
            volatile_pointers: vec![0],
            ..Type::builtin("int").with_pointer(true)
        });
        assert_eq!(registry.spelling(port), "int* const volatile");
    }
}
