// Fri Oct 16 2026 - Alex

pub mod class;
pub mod entities;
pub mod types;

pub use class::{Access, BaseClassSpecifier, Class, ClassKind, Field, Method, MethodFlags, Parameter};
pub use entities::{Enum, EnumMember, Function, Typedef};
pub use types::{FunctionSignature, TemplateArgument, Type, TypeId, TypeKind, TypeRegistry};

use indexmap::IndexMap;
use serde::Serialize;

macro_rules! entity_id {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
        pub struct $name(pub(crate) usize);

        impl $name {
            pub fn index(self) -> usize {
                self.0
            }
        }
    };
}

entity_id!(ClassId);
entity_id!(EnumId);
entity_id!(FunctionId);
entity_id!(TypedefId);

/// Arena of one named entity kind, keyed by qualified name
#[derive(Debug, Clone, Serialize)]
pub struct EntityStore<T> {
    entries: Vec<T>,
    #[serde(skip)]
    names: IndexMap<String, usize>,
}

impl<T> EntityStore<T> {
    fn new() -> Self {
        Self {
            entries: Vec::new(),
            names: IndexMap::new(),
        }
    }

    /// Inserts `entity` under `key` unless the key is taken; returns the slot either way
    fn insert(&mut self, key: &str, entity: T) -> (usize, bool) {
        if let Some(&slot) = self.names.get(key) {
            return (slot, false);
        }
        let slot = self.entries.len();
        self.entries.push(entity);
        self.names.insert(key.to_string(), slot);
        (slot, true)
    }

    fn find(&self, key: &str) -> Option<usize> {
        self.names.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Everything the translator learned about the parsed headers.
///
/// Entities are addressed by stable handles so a class can be referenced before it
/// is complete, and a forward declaration upgraded later is seen through every
/// handle taken earlier.
#[derive(Debug, Clone, Serialize)]
pub struct Model {
    pub types: TypeRegistry,
    classes: EntityStore<Class>,
    enums: EntityStore<Enum>,
    functions: EntityStore<Function>,
    typedefs: EntityStore<Typedef>,
}

impl Model {
    pub fn new() -> Self {
        Self {
            types: TypeRegistry::new(),
            classes: EntityStore::new(),
            enums: EntityStore::new(),
            functions: EntityStore::new(),
            typedefs: EntityStore::new(),
        }
    }

    /// Registers `class` under its qualified name, or returns the existing entry
    pub fn add_class(&mut self, class: Class) -> ClassId {
        let key = class.qualified_name.clone();
        ClassId(self.classes.insert(&key, class).0)
    }

    pub fn find_class(&self, qualified_name: &str) -> Option<ClassId> {
        self.classes.find(qualified_name).map(ClassId)
    }

    pub fn class(&self, id: ClassId) -> &Class {
        &self.classes.entries[id.0]
    }

    pub fn class_mut(&mut self, id: ClassId) -> &mut Class {
        &mut self.classes.entries[id.0]
    }

    pub fn class_by_name(&self, qualified_name: &str) -> Option<&Class> {
        self.find_class(qualified_name).map(|id| self.class(id))
    }

    pub fn classes(&self) -> impl Iterator<Item = (ClassId, &Class)> {
        self.classes.entries.iter().enumerate().map(|(i, c)| (ClassId(i), c))
    }

    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    pub fn add_enum(&mut self, enumeration: Enum) -> EnumId {
        let key = enumeration.qualified_name.clone();
        EnumId(self.enums.insert(&key, enumeration).0)
    }

    pub fn find_enum(&self, qualified_name: &str) -> Option<EnumId> {
        self.enums.find(qualified_name).map(EnumId)
    }

    pub fn enumeration(&self, id: EnumId) -> &Enum {
        &self.enums.entries[id.0]
    }

    pub fn enums(&self) -> impl Iterator<Item = (EnumId, &Enum)> {
        self.enums.entries.iter().enumerate().map(|(i, e)| (EnumId(i), e))
    }

    /// Functions are keyed by signature so overloads stay apart
    pub fn add_function(&mut self, signature: &str, function: Function) -> FunctionId {
        FunctionId(self.functions.insert(signature, function).0)
    }

    pub fn find_function(&self, signature: &str) -> Option<FunctionId> {
        self.functions.find(signature).map(FunctionId)
    }

    pub fn function(&self, id: FunctionId) -> &Function {
        &self.functions.entries[id.0]
    }

    pub fn functions(&self) -> impl Iterator<Item = (FunctionId, &Function)> {
        self.functions.entries.iter().enumerate().map(|(i, f)| (FunctionId(i), f))
    }

    pub fn add_typedef(&mut self, typedef: Typedef) -> TypedefId {
        let key = typedef.qualified_name.clone();
        TypedefId(self.typedefs.insert(&key, typedef).0)
    }

    pub fn find_typedef(&self, qualified_name: &str) -> Option<TypedefId> {
        self.typedefs.find(qualified_name).map(TypedefId)
    }

    pub fn typedef(&self, id: TypedefId) -> &Typedef {
        &self.typedefs.entries[id.0]
    }

    pub fn typedefs(&self) -> impl Iterator<Item = (TypedefId, &Typedef)> {
        self.typedefs.entries.iter().enumerate().map(|(i, t)| (TypedefId(i), t))
    }

    /// Points types registered before their class, enum or typedef was known at that entity
    pub fn link_types(&mut self) -> usize {
        let classes = &self.classes;
        let enums = &self.enums;
        let typedefs = &self.typedefs;
        self.types.link_entities(|ty| match ty.kind {
            TypeKind::Class(None) => classes.find(&ty.name).map(|slot| TypeKind::Class(Some(ClassId(slot)))),
            TypeKind::Enum(None) => enums.find(&ty.name).map(|slot| TypeKind::Enum(Some(EnumId(slot)))),
            TypeKind::Typedef(None) => typedefs
                .find(&ty.name)
                .map(|slot| TypeKind::Typedef(Some(TypedefId(slot)))),
            _ => None,
        })
    }

    pub fn stats(&self) -> ModelStats {
        ModelStats {
            classes: self.classes.len(),
            enums: self.enums.len(),
            functions: self.functions.len(),
            typedefs: self.typedefs.len(),
            types: self.types.len(),
        }
    }
}

impl Default for Model {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ModelStats {
    pub classes: usize,
    pub enums: usize,
    pub functions: usize,
    pub typedefs: usize,
    pub types: usize,
}
