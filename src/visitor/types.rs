// Sat Oct 17 2026 - Alex

use super::{DeclarationVisitor, Unsupported};
use crate::model::{FunctionSignature, TemplateArgument, Type, TypeId, TypeKind, Typedef, TypedefId};
use crate::tree::{last_segment, scope_prefix, Qualifiers, RawTemplateArg, RawType};

/// Modifiers peeled off a type before its leaf is classified
#[derive(Debug, Default)]
struct Declarator {
    is_ref: bool,
    /// Innermost level first
    pointers: Vec<Qualifiers>,
    array_lengths: Vec<u64>,
}

impl Declarator {
    fn const_levels(&self) -> Vec<bool> {
        self.pointers.iter().map(|level| level.is_const).collect()
    }

    /// Volatile levels, numbered from `first` upwards
    fn volatile_levels(&self, first: usize) -> Vec<usize> {
        self.pointers
            .iter()
            .enumerate()
            .filter(|(_, level)| level.is_volatile)
            .map(|(i, _)| first + i)
            .collect()
    }
}

impl<'a, 'm> DeclarationVisitor<'a, 'm> {
    /// Canonicalizes `raw` and interns it.
    ///
    /// Anonymous aggregates map to [`TypeId::INVALID`]; shapes the model cannot carry
    /// (rvalue references, dependent types) are reported so the caller can skip the
    /// member that uses them.
    pub(crate) fn register_type(&mut self, raw: &RawType) -> Result<TypeId, Unsupported> {
        let mut declarator = Declarator::default();
        let mut current = match raw {
            RawType::LvalueReference { pointee } => {
                declarator.is_ref = true;
                pointee.as_ref()
            }
            RawType::RvalueReference { .. } => return Err(Unsupported::RvalueReference),
            other => other,
        };

        // Outermost level first while walking down
        let mut outer_pointers = Vec::new();
        let mut signature = None;
        loop {
            match current {
                RawType::Pointer {
                    pointee,
                    qualifiers,
                } => {
                    outer_pointers.push(*qualifiers);
                    if let RawType::Function {
                        return_type,
                        params,
                    } = pointee.as_ref()
                    {
                        signature = Some(self.register_signature(return_type, params)?);
                        break;
                    }
                    current = &**pointee;
                }
                RawType::ConstantArray { element, size } => {
                    declarator.array_lengths.push(*size);
                    current = &**element;
                }
                RawType::LvalueReference { .. } | RawType::RvalueReference { .. } => {
                    return Err(Unsupported::NestedReference)
                }
                _ => break,
            }
        }
        outer_pointers.reverse();
        declarator.pointers = outer_pointers;

        if let Some(signature) = signature {
            return Ok(self.register_function_pointer(signature, declarator));
        }

        let (mut ty, qualifiers) = match current {
            RawType::Builtin { name, qualifiers } => (Type::builtin(name), *qualifiers),
            RawType::Record {
                name,
                template_args,
                qualifiers,
            } => {
                if name.is_empty() {
                    return Ok(TypeId::INVALID);
                }
                let class = self.register_class(name);
                let mut args = Vec::with_capacity(template_args.len());
                for arg in template_args {
                    args.push(self.register_template_argument(arg)?);
                }
                let ty = Type {
                    name: name.clone(),
                    kind: TypeKind::Class(class),
                    template_args: args,
                    ..Default::default()
                };
                (ty, *qualifiers)
            }
            RawType::Enum { name, qualifiers } => {
                if name.is_empty() {
                    return Ok(TypeId::INVALID);
                }
                let ty = Type {
                    name: name.clone(),
                    kind: TypeKind::Enum(self.register_enum(name)),
                    ..Default::default()
                };
                (ty, *qualifiers)
            }
            RawType::Typedef {
                name,
                underlying,
                qualifiers,
            } => {
                if self.options.resolves(name) {
                    return self.compose_alias(name, underlying, *qualifiers, declarator);
                }
                let ty = Type {
                    name: name.clone(),
                    kind: TypeKind::Typedef(self.keep_alias(name, underlying)?),
                    ..Default::default()
                };
                (ty, *qualifiers)
            }
            RawType::Function {
                return_type,
                params,
            } => {
                let signature = self.register_signature(return_type, params)?;
                return Ok(self.register_function_pointer(signature, declarator));
            }
            RawType::TemplateParam { name, .. } => return Err(Unsupported::Dependent(name.clone())),
            RawType::Dependent { spelling } => return Err(Unsupported::Dependent(spelling.clone())),
            RawType::Anonymous { .. } => return Ok(TypeId::INVALID),
            RawType::Pointer { .. }
            | RawType::ConstantArray { .. }
            | RawType::LvalueReference { .. }
            | RawType::RvalueReference { .. } => unreachable!("declarator layers are peeled above"),
        };

        ty.is_const = qualifiers.is_const;
        ty.is_volatile = qualifiers.is_volatile;
        ty.is_ref = declarator.is_ref;
        ty.const_pointers = declarator.const_levels();
        ty.volatile_pointers = declarator.volatile_levels(0);
        ty.array_lengths = declarator.array_lengths;
        Ok(self.model.types.register(ty))
    }

    fn register_function_pointer(&mut self, signature: FunctionSignature, declarator: Declarator) -> TypeId {
        self.model.types.register(Type {
            kind: TypeKind::FunctionPointer,
            function_pointer: Some(signature),
            is_ref: declarator.is_ref,
            const_pointers: declarator.const_levels(),
            volatile_pointers: declarator.volatile_levels(0),
            array_lengths: declarator.array_lengths,
            ..Default::default()
        })
    }

    fn register_signature(
        &mut self,
        return_type: &RawType,
        params: &[RawType],
    ) -> Result<FunctionSignature, Unsupported> {
        let return_type = self.register_type(return_type)?;
        if !return_type.is_valid() {
            return Err(Unsupported::Anonymous);
        }
        let mut signature = FunctionSignature {
            return_type,
            params: Vec::with_capacity(params.len()),
        };
        for param in params {
            let id = self.register_type(param)?;
            if !id.is_valid() {
                return Err(Unsupported::Anonymous);
            }
            signature.params.push(id);
        }
        Ok(signature)
    }

    fn register_template_argument(&mut self, arg: &RawTemplateArg) -> Result<TemplateArgument, Unsupported> {
        match arg {
            RawTemplateArg::Type { ty } => {
                let id = self.register_type(ty)?;
                if !id.is_valid() {
                    return Err(Unsupported::Anonymous);
                }
                Ok(TemplateArgument::Type(id))
            }
            RawTemplateArg::Integral {
                value,
                enum_name: Some(enum_name),
            } => {
                self.register_enum(enum_name);
                let spelled = self
                    .index
                    .enumerator_name(enum_name, *value)
                    .unwrap_or_else(|| value.to_string());
                Ok(TemplateArgument::Value(spelled))
            }
            RawTemplateArg::Integral { value, .. } => Ok(TemplateArgument::Value(value.to_string())),
        }
    }

    /// Flattens a use of an alias into one structure: the alias's own modifiers wrap
    /// those of its target, so `IntPtr*` with `typedef int* IntPtr` is `int**`.
    fn compose_alias(
        &mut self,
        name: &str,
        underlying: &RawType,
        qualifiers: Qualifiers,
        declarator: Declarator,
    ) -> Result<TypeId, Unsupported> {
        let target = self.register_type(underlying)?;
        if !target.is_valid() {
            return Ok(TypeId::INVALID);
        }
        let alias = self.register_alias(name, target);

        let base = self.model.types.get(target);
        let mut ty = base.clone();
        ty.alias = None;
        // `const IntPtr` qualifies the pointer, not the int
        match ty.const_pointers.len().checked_sub(1) {
            Some(outermost) => {
                ty.const_pointers[outermost] |= qualifiers.is_const;
                if qualifiers.is_volatile && !ty.volatile_pointers.contains(&outermost) {
                    ty.volatile_pointers.push(outermost);
                }
            }
            None => {
                ty.is_const |= qualifiers.is_const;
                ty.is_volatile |= qualifiers.is_volatile;
            }
        }
        let alias_depth = ty.const_pointers.len();
        ty.const_pointers.extend(declarator.const_levels());
        ty.volatile_pointers.extend(declarator.volatile_levels(alias_depth));
        ty.array_lengths = declarator
            .array_lengths
            .into_iter()
            .chain(base.array_lengths.iter().copied())
            .collect();
        ty.is_ref |= declarator.is_ref;
        if ty.name != name {
            ty.alias = alias;
        }
        Ok(self.model.types.register(ty))
    }

    /// Typedef entity behind a use of `name` that stays spelled by its alias
    fn keep_alias(&mut self, name: &str, underlying: &RawType) -> Result<Option<TypedefId>, Unsupported> {
        if underlying.is_dependent() {
            return Err(Unsupported::Dependent(name.to_string()));
        }
        if let Some(id) = self.model.find_typedef(name) {
            return Ok(Some(id));
        }
        match self.register_type(underlying)? {
            target if target.is_valid() => Ok(self.register_alias(name, target)),
            _ => Ok(None),
        }
    }

    /// Typedef entity for `name`, created from the use site when the unit has no declaration for it
    fn register_alias(&mut self, name: &str, target: TypeId) -> Option<TypedefId> {
        if let Some(id) = self.model.find_typedef(name) {
            return Some(id);
        }
        if let Some(entry) = self.index.typedef(name) {
            return self.register_typedef(entry.decl);
        }
        Some(self.model.add_typedef(Typedef {
            name: last_segment(name).to_string(),
            qualified_name: name.to_string(),
            nspace: scope_prefix(name).to_string(),
            parent: None,
            underlying: target,
            file_name: None,
        }))
    }
}
