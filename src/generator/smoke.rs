// Sat Oct 17 2026 - Alex

use super::dispatch::{render_chain, ClassIndex, DispatchTable, InheritanceList};
use super::{GenerateContext, GenerateError, Generator};
use crate::hierarchy::HierarchyClosure;
use crate::model::{ClassId, ClassKind, Model};
use crate::output::OutputUnit;
use rayon::prelude::*;
use std::collections::BTreeSet;
use std::fmt::Write;

pub const DATA_FILE: &str = "smokedata.cpp";

const BANNER: &str = "//Auto-generated by smokegen. DO NOT EDIT.";

/// Emits per-class binding stubs in `parts` shards plus the shared cast/inheritance tables
#[derive(Debug, Clone, Default)]
pub struct SmokeGenerator;

impl SmokeGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Splits `classes` into `parts` contiguous groups whose sizes differ by at most one
    pub fn shard(classes: &[ClassId], parts: usize) -> Vec<&[ClassId]> {
        if parts == 0 {
            return Vec::new();
        }
        let base = classes.len() / parts;
        let extra = classes.len() % parts;
        let mut shards = Vec::with_capacity(parts);
        let mut start = 0;
        for i in 0..parts {
            let len = base + usize::from(i < extra);
            shards.push(&classes[start..start + len]);
            start += len;
        }
        shards
    }

    fn render_shard(model: &Model, module: &str, classes: &[ClassId]) -> String {
        let includes: BTreeSet<&str> = classes
            .iter()
            .filter_map(|id| model.class(*id).file_name.as_deref())
            .collect();

        let mut out = String::new();
        let _ = writeln!(out, "{}", BANNER);
        let _ = writeln!(out, "#include <smoke.h>");
        let _ = writeln!(out, "#include <{}_smoke.h>", module);
        for include in includes {
            let _ = writeln!(out, "#include <{}>", include);
        }
        out.push('\n');

        for id in classes {
            let class = model.class(*id);
            // Namespaces and unions cannot be derived from
            if matches!(class.kind, ClassKind::Namespace | ClassKind::Union) {
                continue;
            }
            let _ = writeln!(out, "class x_{} : public {} {{", class.mangled_name(), class.qualified_name);
            let _ = writeln!(out, "    SmokeBinding* _binding;");
            let _ = writeln!(out, "}};");
            out.push('\n');
        }
        out
    }

    fn render_data(
        model: &Model,
        context: &GenerateContext,
        index: &ClassIndex,
        table: &DispatchTable,
        inheritance: &InheritanceList,
    ) -> String {
        let module = &context.module;
        let mut out = String::new();
        for header in context.header_names() {
            let _ = writeln!(out, "#include <{}>", header);
        }
        let _ = writeln!(out);
        let _ = writeln!(out, "#include <smoke.h>");
        let _ = writeln!(out, "#include <{}_smoke.h>", module);
        let _ = writeln!(out);

        let _ = writeln!(out, "// Class table: name, external, offset into {}_inheritanceList", module);
        let _ = writeln!(out, "static Smoke::Class {}_classes[] = {{", module);
        let _ = writeln!(out, "    {{ 0L, false, 0 }},\t//0 (no class)");
        for (i, id) in index.iter() {
            let offset = inheritance.offset_of(i).unwrap_or(0);
            let _ = writeln!(
                out,
                "    {{ \"{}\", false, {} }},\t//{}",
                model.class(id).qualified_name,
                offset,
                i
            );
        }
        let _ = writeln!(out, "}};");
        let _ = writeln!(out);

        let _ = writeln!(
            out,
            "static void *{}_cast(void *xptr, Smoke::Index from, Smoke::Index to) {{",
            module
        );
        let _ = writeln!(out, "  switch(from) {{");
        for switch in table.switches() {
            let _ = writeln!(
                out,
                "    case {}:   //{}",
                switch.source,
                model.class(switch.class).qualified_name
            );
            let _ = writeln!(out, "      switch(to) {{");
            for case in &switch.cases {
                let _ = writeln!(
                    out,
                    "        case {}: return {};",
                    case.target,
                    render_chain(model, &case.chain)
                );
            }
            let _ = writeln!(out, "        default: return xptr;");
            let _ = writeln!(out, "      }}");
        }
        let _ = writeln!(out, "    default: return xptr;");
        let _ = writeln!(out, "  }}");
        let _ = writeln!(out, "}}");
        let _ = writeln!(out);

        let _ = writeln!(out, "// Group of Indexes (0 separated) used as super class lists.");
        let _ = writeln!(out, "// Classes with super classes have an index into this array.");
        let _ = writeln!(out, "static Smoke::Index {}_inheritanceList[] = {{", module);
        let _ = writeln!(out, "    0,\t// 0: (no super class)");
        for (offset, bases) in inheritance.groups() {
            let names: Vec<&str> = bases
                .iter()
                .map(|i| model.class(index.classes()[i - 1]).qualified_name.as_str())
                .collect();
            let mut line = String::from("    ");
            for base in bases {
                let _ = write!(line, "{}, ", base);
            }
            let _ = writeln!(out, "{}0,\t// {}: {}", line, offset, names.join(", "));
        }
        let _ = writeln!(out, "}};");
        out
    }
}

impl Generator for SmokeGenerator {
    fn name(&self) -> &str {
        "smoke"
    }

    fn generate(&self, model: &Model, context: &GenerateContext) -> Result<Vec<OutputUnit>, GenerateError> {
        if context.parts == 0 {
            return Err(GenerateError::InvalidContext("parts must be at least 1".to_string()));
        }

        let index = ClassIndex::build(model, &context.classes);
        log::info!("indexed {} classes for module {}", index.len(), context.module);

        let closure = HierarchyClosure::new(model);
        let table = DispatchTable::build(&closure, &index);
        let inheritance = InheritanceList::build(&closure, &index);

        let shards = Self::shard(index.classes(), context.parts);
        let mut units: Vec<OutputUnit> = shards
            .par_iter()
            .enumerate()
            .map(|(i, classes)| OutputUnit {
                file_name: format!("x_{}.cpp", i + 1),
                contents: Self::render_shard(model, &context.module, classes),
            })
            .collect();
        log::debug!("rendered {} shards", units.len());

        units.push(OutputUnit {
            file_name: DATA_FILE.to_string(),
            contents: Self::render_data(model, context, &index, &table, &inheritance),
        });
        Ok(units)
    }
}
