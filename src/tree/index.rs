// Fri Oct 16 2026 - Alex

use super::{scope_prefix, Decl, EnumDecl, NamespaceDecl, RecordDecl, TranslationUnit, TypedefDecl};
use std::collections::{HashMap, HashSet};

/// Declaration that encloses another one
#[derive(Debug, Clone, Copy)]
pub enum Scope<'a> {
    Global,
    Namespace(&'a NamespaceDecl),
    Record(&'a RecordDecl),
}

#[derive(Debug)]
pub struct Indexed<'a, T> {
    pub decl: &'a T,
    pub scope: Scope<'a>,
}

impl<T> Clone for Indexed<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Indexed<'_, T> {}

/// Lookup of declarations by qualified name over one translation unit.
///
/// Records and enums resolve to their defining declaration when the unit has one,
/// otherwise to the first forward declaration seen.
#[derive(Debug, Default)]
pub struct DeclIndex<'a> {
    records: HashMap<&'a str, Indexed<'a, RecordDecl>>,
    namespaces: HashMap<&'a str, Indexed<'a, NamespaceDecl>>,
    enums: HashMap<&'a str, Indexed<'a, EnumDecl>>,
    typedefs: HashMap<&'a str, Indexed<'a, TypedefDecl>>,
    functions: HashSet<&'a str>,
    enumerators: HashMap<String, Option<i64>>,
}

impl<'a> DeclIndex<'a> {
    pub fn build(unit: &'a TranslationUnit) -> Self {
        let mut index = Self::default();
        for decl in &unit.decls {
            index.add(decl, Scope::Global);
        }
        index
    }

    fn add(&mut self, decl: &'a Decl, scope: Scope<'a>) {
        match decl {
            Decl::Record(record) => {
                if !record.qualified_name.is_empty() {
                    let replace = match self.records.get(record.qualified_name.as_str()) {
                        Some(existing) => !existing.decl.is_definition && record.is_definition,
                        None => true,
                    };
                    if replace {
                        self.records.insert(&record.qualified_name, Indexed { decl: record, scope });
                    }
                }
                for nested in &record.decls {
                    self.add(nested, Scope::Record(record));
                }
            }
            Decl::Namespace(namespace) => {
                if !namespace.qualified_name.is_empty() {
                    self.namespaces
                        .entry(&namespace.qualified_name)
                        .or_insert(Indexed { decl: namespace, scope });
                }
                for nested in &namespace.decls {
                    self.add(nested, Scope::Namespace(namespace));
                }
            }
            Decl::Enum(enumeration) => {
                if enumeration.qualified_name.is_empty() {
                    return;
                }
                let replace = match self.enums.get(enumeration.qualified_name.as_str()) {
                    Some(existing) => !existing.decl.is_definition && enumeration.is_definition,
                    None => true,
                };
                if replace {
                    self.enums.insert(&enumeration.qualified_name, Indexed { decl: enumeration, scope });
                }
                self.add_enumerators(enumeration);
            }
            Decl::Typedef(typedef) => {
                self.typedefs
                    .entry(&typedef.qualified_name)
                    .or_insert(Indexed { decl: typedef, scope });
            }
            Decl::Function(function) => {
                self.functions.insert(&function.qualified_name);
            }
        }
    }

    fn add_enumerators(&mut self, enumeration: &'a EnumDecl) {
        let enclosing = scope_prefix(&enumeration.qualified_name);
        for member in &enumeration.members {
            self.enumerators.insert(
                format!("{}::{}", enumeration.qualified_name, member.name),
                member.value,
            );
            // Unscoped enumerators are also visible in the enclosing scope
            if !enumeration.is_scoped {
                self.enumerators
                    .insert(qualify(enclosing, &member.name), member.value);
            }
        }
    }

    pub fn record(&self, qualified_name: &str) -> Option<Indexed<'a, RecordDecl>> {
        self.records.get(qualified_name).copied()
    }

    pub fn namespace(&self, qualified_name: &str) -> Option<Indexed<'a, NamespaceDecl>> {
        self.namespaces.get(qualified_name).copied()
    }

    pub fn enumeration(&self, qualified_name: &str) -> Option<Indexed<'a, EnumDecl>> {
        self.enums.get(qualified_name).copied()
    }

    pub fn typedef(&self, qualified_name: &str) -> Option<Indexed<'a, TypedefDecl>> {
        self.typedefs.get(qualified_name).copied()
    }

    pub fn has_function(&self, qualified_name: &str) -> bool {
        self.functions.contains(qualified_name)
    }

    /// Whether any declaration of the unit carries this qualified name
    pub fn contains(&self, qualified_name: &str) -> bool {
        self.records.contains_key(qualified_name)
            || self.namespaces.contains_key(qualified_name)
            || self.enums.contains_key(qualified_name)
            || self.typedefs.contains_key(qualified_name)
            || self.functions.contains(qualified_name)
            || self.enumerators.contains_key(qualified_name)
    }

    /// Qualified spelling of the enumerator of `enum_name` whose value is `value`
    pub fn enumerator_name(&self, enum_name: &str, value: i64) -> Option<String> {
        let entry = self.enumeration(enum_name)?;
        let enumeration = entry.decl;
        let member = enumeration
            .members
            .iter()
            .find(|member| member.value == Some(value))?;
        if enumeration.is_scoped {
            Some(format!("{}::{}", enumeration.qualified_name, member.name))
        } else {
            Some(qualify(scope_prefix(&enumeration.qualified_name), &member.name))
        }
    }

    pub fn record_count(&self) -> usize {
        self.records.len()
    }
}

fn qualify(scope: &str, name: &str) -> String {
    if scope.is_empty() {
        name.to_string()
    } else {
        format!("{}::{}", scope, name)
    }
}
