// Sat Oct 17 2026 - Alex

use super::{to_access, DeclarationVisitor, Unsupported};
use crate::model::{Enum, EnumId, EnumMember, Function, FunctionId, Parameter, Typedef, TypedefId};
use crate::tree::{scope_prefix, FunctionDecl, TypedefDecl};
use itertools::Itertools;

impl<'a, 'm> DeclarationVisitor<'a, 'm> {
    /// Registers a defined enum; forward declarations alone produce nothing
    pub(crate) fn register_enum(&mut self, qualified_name: &str) -> Option<EnumId> {
        if let Some(id) = self.model.find_enum(qualified_name) {
            return Some(id);
        }
        let entry = self.index.enumeration(qualified_name)?;
        let decl = entry.decl;
        if !decl.is_definition {
            return None;
        }

        let (nspace, parent) = self.resolve_scope(entry.scope);
        let members = decl
            .members
            .iter()
            .map(|member| EnumMember {
                name: if decl.is_scoped {
                    format!("{}::{}", decl.name, member.name)
                } else {
                    member.name.clone()
                },
            })
            .collect();
        let enumeration = Enum {
            name: decl.name.clone(),
            qualified_name: decl.qualified_name.clone(),
            nspace,
            parent,
            access: to_access(decl.access),
            is_scoped: decl.is_scoped,
            file_name: self.file_of(&decl.location),
            members,
        };
        Some(self.model.add_enum(enumeration))
    }

    pub(crate) fn register_typedef(&mut self, decl: &'a TypedefDecl) -> Option<TypedefId> {
        if decl.qualified_name.is_empty() {
            return None;
        }
        if let Some(id) = self.model.find_typedef(&decl.qualified_name) {
            return Some(id);
        }
        if decl.underlying.is_dependent() {
            log::debug!("skipping dependent typedef {}", decl.qualified_name);
            return None;
        }

        let underlying = match self.register_type(&decl.underlying) {
            Ok(id) if id.is_valid() => id,
            Ok(_) => return None,
            Err(reason) => {
                log::debug!("skipping typedef {}: {}", decl.qualified_name, reason);
                return None;
            }
        };
        // Resolving the target may already have created the entry
        if let Some(id) = self.model.find_typedef(&decl.qualified_name) {
            return Some(id);
        }

        let (nspace, parent) = match self.index.typedef(&decl.qualified_name) {
            Some(entry) => self.resolve_scope(entry.scope),
            None => (scope_prefix(&decl.qualified_name).to_string(), None),
        };
        let typedef = Typedef {
            name: decl.name.clone(),
            qualified_name: decl.qualified_name.clone(),
            nspace,
            parent,
            underlying,
            file_name: self.file_of(&decl.location),
        };
        Some(self.model.add_typedef(typedef))
    }

    pub(crate) fn register_function(&mut self, decl: &'a FunctionDecl) -> Option<FunctionId> {
        if decl.is_deleted {
            return None;
        }
        match self.build_function(decl) {
            Ok(id) => Some(id),
            Err(reason) => {
                self.stats.skipped_functions += 1;
                log::debug!("skipping function {}: {}", decl.qualified_name, reason);
                None
            }
        }
    }

    fn build_function(&mut self, decl: &'a FunctionDecl) -> Result<FunctionId, Unsupported> {
        let return_type = self.register_type(&decl.return_type)?;
        if !return_type.is_valid() {
            return Err(Unsupported::Anonymous);
        }
        let mut parameters = Vec::with_capacity(decl.params.len());
        for param in &decl.params {
            let ty = self.register_type(&param.ty)?;
            if !ty.is_valid() {
                return Err(Unsupported::Anonymous);
            }
            let mut parameter = Parameter::new(&param.name, ty);
            if let Some(default) = &param.default {
                parameter = parameter.with_default(self.resolve_default(default));
            }
            parameters.push(parameter);
        }

        let signature = format!(
            "{}({})",
            decl.qualified_name,
            parameters.iter().map(|p| self.model.types.spelling(p.ty)).join(", ")
        );
        if let Some(id) = self.model.find_function(&signature) {
            return Ok(id);
        }

        let nspace = scope_prefix(&decl.qualified_name);
        if !nspace.is_empty() {
            self.register_namespace(nspace);
        }
        let function = Function {
            name: decl.name.clone(),
            qualified_name: decl.qualified_name.clone(),
            nspace: nspace.to_string(),
            return_type,
            parameters,
            file_name: self.file_of(&decl.location),
        };
        Ok(self.model.add_function(&signature, function))
    }
}
