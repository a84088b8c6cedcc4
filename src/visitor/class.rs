// Sat Oct 17 2026 - Alex

use super::{metadata, to_access, DeclarationVisitor, Unsupported};
use crate::model::{
    Access, BaseClassSpecifier, Class, ClassId, ClassKind, Field, Method, MethodFlags, Parameter,
    Type,
};
use crate::tree::{FieldDecl, Indexed, MethodDecl, MethodKind, RawType, RecordDecl, TagKind};
use std::collections::HashMap;

impl<'a, 'm> DeclarationVisitor<'a, 'm> {
    /// Registers the class `qualified_name`, pulling in its definition when this unit has one.
    ///
    /// Returns `None` when neither the model nor the unit knows the name.
    pub(crate) fn register_class(&mut self, qualified_name: &str) -> Option<ClassId> {
        let existing = self.model.find_class(qualified_name);
        if let Some(id) = existing {
            if self.registering.contains(qualified_name) || self.model.class(id).has_definition() {
                return Some(id);
            }
        }

        let Some(entry) = self.index.record(qualified_name) else {
            if existing.is_none() {
                log::debug!("no declaration for class {}", qualified_name);
            }
            return existing;
        };
        if existing.is_some() && !entry.decl.is_definition {
            // Still only forward declared here
            return existing;
        }

        self.registering.insert(qualified_name.to_string());
        let id = self.declare_class(entry, existing);
        if entry.decl.is_definition {
            self.populate_class(id, entry.decl);
        }
        self.registering.remove(qualified_name);
        Some(id)
    }

    pub(crate) fn register_namespace(&mut self, qualified_name: &str) -> Option<ClassId> {
        if let Some(id) = self.model.find_class(qualified_name) {
            return Some(id);
        }
        let entry = self.index.namespace(qualified_name)?;
        let namespace = entry.decl;

        let id = self
            .model
            .add_class(Class::namespace(&namespace.name, &namespace.qualified_name));
        let (nspace, parent) = self.resolve_scope(entry.scope);
        let file_name = self.file_of(&namespace.location);
        let class = self.model.class_mut(id);
        class.nspace = nspace;
        class.parent = parent;
        class.file_name = file_name;
        Some(id)
    }

    /// Creates the entry, or upgrades an existing forward declaration in place
    fn declare_class(&mut self, entry: Indexed<'a, RecordDecl>, existing: Option<ClassId>) -> ClassId {
        let decl = entry.decl;
        let kind = match decl.tag {
            TagKind::Class => ClassKind::Class,
            TagKind::Struct => ClassKind::Struct,
            TagKind::Union => ClassKind::Union,
        };

        let id = match existing {
            Some(id) => {
                log::debug!("completing forward declaration of {}", decl.qualified_name);
                id
            }
            None => self.model.add_class(Class::new(
                &decl.name,
                &decl.qualified_name,
                kind,
                !decl.is_definition,
            )),
        };

        let (nspace, parent) = self.resolve_scope(entry.scope);
        let file_name = self.file_of(&decl.location);
        let class = self.model.class_mut(id);
        class.kind = kind;
        class.is_forward_decl = !decl.is_definition;
        class.is_template = decl.is_dependent || decl.is_specialization;
        class.access = to_access(decl.access);
        class.nspace = nspace;
        class.parent = parent;
        class.file_name = file_name;
        id
    }

    fn populate_class(&mut self, id: ClassId, decl: &'a RecordDecl) {
        // Dependent templates only keep what resolves without instantiation
        if !decl.is_dependent {
            self.register_bases(id, decl);
        }

        // Must run before method flags are derived
        let accessors = if self.options.qt_mode {
            metadata::accessor_attributes(decl)
        } else {
            HashMap::new()
        };

        for method in &decl.methods {
            match self.register_method(id, method, &accessors) {
                Ok(method) => self.model.class_mut(id).methods.push(method),
                Err(reason) => {
                    self.stats.skipped_methods += 1;
                    log::debug!("skipping {}::{}: {}", decl.qualified_name, method.name, reason);
                }
            }
        }

        for field in &decl.fields {
            match self.register_field(id, field) {
                Ok(field) => self.model.class_mut(id).fields.push(field),
                Err(reason) => {
                    self.stats.skipped_fields += 1;
                    log::debug!("dropping field {}::{}: {}", decl.qualified_name, field.name, reason);
                }
            }
        }
    }

    fn register_bases(&mut self, id: ClassId, decl: &'a RecordDecl) {
        for base in &decl.bases {
            let Some(name) = base_record_name(&base.ty) else {
                log::debug!("ignoring non-class base of {}", decl.qualified_name);
                continue;
            };
            match self.register_class(name) {
                Some(base_id) => self.model.class_mut(id).bases.push(BaseClassSpecifier {
                    base: base_id,
                    access: to_access(base.access),
                    is_virtual: base.is_virtual,
                }),
                None => log::debug!("base {} of {} is unknown", name, decl.qualified_name),
            }
        }
    }

    fn register_method(
        &mut self,
        owner: ClassId,
        decl: &'a MethodDecl,
        accessors: &HashMap<String, Vec<&'static str>>,
    ) -> Result<Method, Unsupported> {
        let return_type = match decl.kind {
            MethodKind::Constructor => {
                let class = self.model.class(owner);
                let ty = Type::class(&class.qualified_name, owner).with_pointer(false);
                self.model.types.register(ty)
            }
            _ => self.register_type(&decl.return_type)?,
        };
        if !return_type.is_valid() {
            return Err(Unsupported::Anonymous);
        }

        let name = match decl.kind {
            MethodKind::Conversion => format!("operator {}", self.model.types.spelling(return_type)),
            _ => decl.name.clone(),
        };
        // A deleted method must never look callable
        let access = if decl.is_deleted {
            Access::Private
        } else {
            to_access(decl.access)
        };

        let mut method = Method::new(owner, &name, return_type, access);
        method.flags = self.method_flags(decl, accessors);

        for param in &decl.params {
            let ty = self.register_type(&param.ty)?;
            if !ty.is_valid() {
                return Err(Unsupported::Anonymous);
            }
            let mut parameter = Parameter::new(&param.name, ty);
            if let Some(default) = &param.default {
                parameter = parameter.with_default(self.resolve_default(default));
            }
            method.parameters.push(parameter);
        }
        Ok(method)
    }

    fn method_flags(
        &self,
        decl: &MethodDecl,
        accessors: &HashMap<String, Vec<&'static str>>,
    ) -> MethodFlags {
        let mut flags = MethodFlags::empty();
        flags.set(MethodFlags::CONSTRUCTOR, decl.kind == MethodKind::Constructor);
        flags.set(MethodFlags::DESTRUCTOR, decl.kind == MethodKind::Destructor);
        flags.set(MethodFlags::CONVERSION, decl.kind == MethodKind::Conversion);
        flags.set(MethodFlags::EXPLICIT, decl.is_explicit);
        flags.set(MethodFlags::CONST, decl.is_const);
        flags.set(MethodFlags::VIRTUAL, decl.is_virtual || decl.is_pure);
        flags.set(MethodFlags::PURE_VIRTUAL, decl.is_pure);
        flags.set(MethodFlags::STATIC, decl.is_static);
        flags.set(MethodFlags::DELETED, decl.is_deleted);

        if self.options.qt_mode {
            for attribute in &decl.attributes {
                flags |= metadata::attribute_flag(attribute);
            }
            if let Some(derived) = accessors.get(&decl.name) {
                for attribute in derived {
                    flags |= metadata::attribute_flag(attribute);
                }
            }
        }
        flags
    }

    fn register_field(&mut self, owner: ClassId, decl: &'a FieldDecl) -> Result<Field, Unsupported> {
        if decl.name.is_empty() {
            return Err(Unsupported::Anonymous);
        }
        let ty = self.register_type(&decl.ty)?;
        if !ty.is_valid() {
            return Err(Unsupported::Anonymous);
        }
        Ok(Field {
            owner,
            name: decl.name.clone(),
            ty,
            access: to_access(decl.access),
            is_static: decl.is_static,
            is_mutable: decl.is_mutable,
        })
    }
}

/// Class named by a base specifier, looking through aliases
fn base_record_name(ty: &RawType) -> Option<&str> {
    match ty {
        RawType::Record { name, .. } if !ty.is_dependent() && !name.is_empty() => Some(name),
        RawType::Typedef { underlying, .. } => base_record_name(underlying),
        _ => None,
    }
}
