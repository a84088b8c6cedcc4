// Sat Oct 17 2026 - Alex

mod class;
mod defaults;
mod entities;
pub mod metadata;
mod types;

use crate::model::{Access, ClassId, Model};
use crate::tree::{AccessSpecifier, Decl, DeclIndex, Scope, SourceLocation, TranslationUnit};
use std::collections::HashSet;
use thiserror::Error;

/// Reason a member or type was left out of the model
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Unsupported {
    #[error("type `{0}` depends on a template parameter")]
    Dependent(String),
    #[error("rvalue reference")]
    RvalueReference,
    #[error("reference below a pointer")]
    NestedReference,
    #[error("anonymous aggregate")]
    Anonymous,
}

#[derive(Debug, Clone)]
pub struct VisitorOptions {
    /// Honour framework annotations (signals, slots, property metadata)
    pub qt_mode: bool,
    /// Flatten uses of an alias into the structure of its target
    pub resolve_typedefs: bool,
    /// Aliases that keep their own name even when typedefs are resolved
    pub not_to_be_resolved: Vec<String>,
}

impl VisitorOptions {
    pub fn with_qt_mode(mut self, enabled: bool) -> Self {
        self.qt_mode = enabled;
        self
    }

    pub fn with_resolve_typedefs(mut self, enabled: bool) -> Self {
        self.resolve_typedefs = enabled;
        self
    }

    pub fn with_not_to_be_resolved(mut self, names: Vec<String>) -> Self {
        self.not_to_be_resolved = names;
        self
    }

    /// Whether a use of `alias` is flattened into its target
    pub fn resolves(&self, alias: &str) -> bool {
        self.resolve_typedefs && !self.not_to_be_resolved.iter().any(|name| name == alias)
    }
}

impl Default for VisitorOptions {
    fn default() -> Self {
        Self {
            qt_mode: false,
            resolve_typedefs: true,
            not_to_be_resolved: vec!["FILE".to_string()],
        }
    }
}

/// Counters of what a walk registered and dropped
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VisitStats {
    pub declarations: usize,
    pub skipped_methods: usize,
    pub skipped_fields: usize,
    pub skipped_functions: usize,
}

/// Walks one declaration tree and registers what it finds into a [`Model`].
///
/// Registration is reentrant: a class pulls in its bases, enclosing scopes and every
/// class its members mention. A class being registered is already present in the
/// model (and in `registering`), which is what stops self-referential structures
/// from recursing forever.
pub struct DeclarationVisitor<'a, 'm> {
    unit: &'a TranslationUnit,
    index: DeclIndex<'a>,
    model: &'m mut Model,
    options: VisitorOptions,
    registering: HashSet<String>,
    stats: VisitStats,
}

impl<'a, 'm> DeclarationVisitor<'a, 'm> {
    pub fn new(unit: &'a TranslationUnit, model: &'m mut Model) -> Self {
        Self {
            unit,
            index: unit.index(),
            model,
            options: VisitorOptions::default(),
            registering: HashSet::new(),
            stats: VisitStats::default(),
        }
    }

    pub fn with_options(mut self, options: VisitorOptions) -> Self {
        self.options = options;
        self
    }

    pub fn stats(&self) -> VisitStats {
        self.stats
    }

    /// Registers every named declaration of `unit`
    pub fn visit(&mut self) -> VisitStats {
        let unit = self.unit;
        log::debug!("visiting {} ({} top-level declarations)", unit.file, unit.decls.len());
        for decl in &unit.decls {
            self.visit_decl(decl);
        }
        self.stats
    }

    fn visit_decl(&mut self, decl: &'a Decl) {
        self.stats.declarations += 1;
        match decl {
            Decl::Record(record) => {
                // Nothing can bind to an unnamed record
                if !record.name.is_empty() {
                    self.register_class(&record.qualified_name);
                }
                for nested in &record.decls {
                    self.visit_decl(nested);
                }
            }
            Decl::Namespace(namespace) => {
                if !namespace.name.is_empty() {
                    self.register_namespace(&namespace.qualified_name);
                }
                for nested in &namespace.decls {
                    self.visit_decl(nested);
                }
            }
            Decl::Enum(enumeration) => {
                if !enumeration.name.is_empty() {
                    self.register_enum(&enumeration.qualified_name);
                }
            }
            Decl::Typedef(typedef) => {
                self.register_typedef(typedef);
            }
            Decl::Function(function) => {
                if !function.name.is_empty() {
                    self.register_function(function);
                }
            }
        }
    }

    /// Header a declaration comes from; the unit's own header when the front end gave no location
    fn file_of(&self, location: &Option<SourceLocation>) -> Option<String> {
        match location {
            Some(location) => Some(location.file.clone()),
            None if self.unit.file.is_empty() => None,
            None => Some(self.unit.file.clone()),
        }
    }

    /// Innermost enclosing namespace name and parent entity of a declaration
    fn resolve_scope(&mut self, scope: Scope<'a>) -> (String, Option<ClassId>) {
        match scope {
            Scope::Global => (String::new(), None),
            Scope::Namespace(namespace) => {
                let parent = self.register_namespace(&namespace.qualified_name);
                (namespace.qualified_name.clone(), parent)
            }
            Scope::Record(record) => match self.register_class(&record.qualified_name) {
                Some(parent) => (self.model.class(parent).nspace.clone(), Some(parent)),
                None => (String::new(), None),
            },
        }
    }
}

pub(crate) fn to_access(access: AccessSpecifier) -> Access {
    match access {
        AccessSpecifier::Public | AccessSpecifier::None => Access::Public,
        AccessSpecifier::Protected => Access::Protected,
        AccessSpecifier::Private => Access::Private,
    }
}

/// Translates every unit into one shared model
pub fn translate<'a, I>(units: I, model: &mut Model, options: VisitorOptions) -> VisitStats
where
    I: IntoIterator<Item = &'a TranslationUnit>,
{
    let mut total = VisitStats::default();
    for unit in units {
        let stats = DeclarationVisitor::new(unit, model)
            .with_options(options.clone())
            .visit();
        total.declarations += stats.declarations;
        total.skipped_methods += stats.skipped_methods;
        total.skipped_fields += stats.skipped_fields;
        total.skipped_functions += stats.skipped_functions;
    }
    let linked = model.link_types();
    if linked > 0 {
        log::debug!("linked {} types to entities defined after their first use", linked);
    }
    total
}

#[cfg(test)]
mod tests;
