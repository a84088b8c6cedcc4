// Sat Oct 17 2026 - Alex

use crate::hierarchy::HierarchyClosure;
use crate::model::{ClassId, Model};
use std::collections::{BTreeMap, HashMap, HashSet};

/// Dense 1-based numbering of the classes a backend emits, in qualified-name order
#[derive(Debug, Clone, Default)]
pub struct ClassIndex {
    order: Vec<ClassId>,
    indices: HashMap<ClassId, usize>,
}

impl ClassIndex {
    /// Numbers the `selected` classes; an empty selection means every emittable class.
    ///
    /// Unknown names and classes without a definition get no index.
    pub fn build(model: &Model, selected: &[String]) -> Self {
        let mut by_name: BTreeMap<&str, ClassId> = BTreeMap::new();
        if selected.is_empty() {
            for (id, class) in model.classes() {
                if class.has_definition() && !class.is_template && !class.is_namespace() {
                    by_name.insert(&class.qualified_name, id);
                }
            }
        } else {
            for name in selected {
                match model.find_class(name) {
                    Some(id) if model.class(id).has_definition() => {
                        by_name.insert(&model.class(id).qualified_name, id);
                    }
                    Some(_) => log::warn!("{} is only forward declared, not indexing it", name),
                    None => log::warn!("selected class {} is not in the model", name),
                }
            }
        }

        let order: Vec<ClassId> = by_name.into_values().collect();
        let indices = order.iter().enumerate().map(|(i, id)| (*id, i + 1)).collect();
        Self { order, indices }
    }

    pub fn index_of(&self, id: ClassId) -> Option<usize> {
        self.indices.get(&id).copied()
    }

    /// `(index, class)` pairs in index order
    pub fn iter(&self) -> impl Iterator<Item = (usize, ClassId)> + '_ {
        self.order.iter().enumerate().map(|(i, id)| (i + 1, *id))
    }

    pub fn classes(&self) -> &[ClassId] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// One `case` of a cast switch: how to turn a pointer to the source class into one to `target`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CastCase {
    pub target: usize,
    /// Classes the pointer passes through, source first and target last
    pub chain: Vec<ClassId>,
}

#[derive(Debug, Clone)]
pub struct CastSwitch {
    pub source: usize,
    pub class: ClassId,
    pub cases: Vec<CastCase>,
}

/// Pointer-adjustment mapping between every indexed class and its indexed relatives.
///
/// Pairs without a case leave the pointer unchanged.
#[derive(Debug, Clone, Default)]
pub struct DispatchTable {
    switches: Vec<CastSwitch>,
}

impl DispatchTable {
    pub fn build(closure: &HierarchyClosure<'_>, index: &ClassIndex) -> Self {
        let switches = index
            .iter()
            .map(|(source, class)| CastSwitch {
                source,
                class,
                cases: Self::cases_for(closure, index, source, class),
            })
            .collect();
        Self { switches }
    }

    fn cases_for(
        closure: &HierarchyClosure<'_>,
        index: &ClassIndex,
        source: usize,
        class: ClassId,
    ) -> Vec<CastCase> {
        // A namespace is not a type, so no pointer to it can be cast
        if closure.model().class(class).is_namespace() {
            return Vec::new();
        }
        let mut cases = Vec::new();
        // A repeated ancestor keeps its first route so case labels stay unique
        let mut seen = HashSet::new();

        for path in closure.ancestor_paths(class).iter() {
            let Some(&ancestor) = path.last() else {
                continue;
            };
            let Some(target) = index.index_of(ancestor) else {
                continue;
            };
            if seen.insert(target) {
                let mut chain = Vec::with_capacity(path.len() + 1);
                chain.push(class);
                chain.extend_from_slice(path);
                cases.push(CastCase { target, chain });
            }
        }

        seen.insert(source);
        cases.push(CastCase {
            target: source,
            chain: vec![class],
        });

        for &descendant in closure.descendants(class).iter() {
            let Some(target) = index.index_of(descendant) else {
                continue;
            };
            if !seen.insert(target) {
                continue;
            }
            if let Some(mut chain) = closure.path_between(descendant, class) {
                chain.reverse();
                cases.push(CastCase { target, chain });
            }
        }
        cases
    }

    pub fn switches(&self) -> &[CastSwitch] {
        &self.switches
    }

    /// Chain used to cast from index `from` to index `to`; `None` means the pointer is returned as is
    pub fn cast(&self, from: usize, to: usize) -> Option<&[ClassId]> {
        let switch = self.switches.get(from.checked_sub(1)?)?;
        switch
            .cases
            .iter()
            .find(|case| case.target == to)
            .map(|case| case.chain.as_slice())
    }
}

/// `(void*)(Target*)(Middle*)(Source*)xptr`
pub fn render_chain(model: &Model, chain: &[ClassId]) -> String {
    let mut expression = String::from("xptr");
    for class in chain {
        expression = format!("({}*){}", model.class(*class).qualified_name, expression);
    }
    format!("(void*){}", expression)
}

/// Flat array of direct-base index groups, each terminated by 0.
///
/// Entry 0 is the shared empty group; identical base lists share one group.
#[derive(Debug, Clone)]
pub struct InheritanceList {
    entries: Vec<usize>,
    /// Group offset per indexed class, in index order
    offsets: Vec<usize>,
    groups: Vec<(usize, Vec<usize>)>,
}

impl InheritanceList {
    pub fn build(closure: &HierarchyClosure<'_>, index: &ClassIndex) -> Self {
        let model = closure.model();
        let mut list = Self {
            entries: vec![0],
            offsets: Vec::with_capacity(index.len()),
            groups: Vec::new(),
        };
        let mut known: HashMap<Vec<usize>, usize> = HashMap::new();

        for (_, class) in index.iter() {
            let bases: Vec<usize> = if closure.participates(class) {
                model
                    .class(class)
                    .base_classes()
                    .iter()
                    .filter(|base| closure.participates(base.base))
                    .filter_map(|base| index.index_of(base.base))
                    .collect()
            } else {
                Vec::new()
            };

            if bases.is_empty() {
                list.offsets.push(0);
                continue;
            }
            let offset = match known.get(&bases) {
                Some(&offset) => offset,
                None => {
                    let offset = list.entries.len();
                    list.entries.extend_from_slice(&bases);
                    list.entries.push(0);
                    list.groups.push((offset, bases.clone()));
                    known.insert(bases, offset);
                    offset
                }
            };
            list.offsets.push(offset);
        }
        list
    }

    pub fn entries(&self) -> &[usize] {
        &self.entries
    }

    /// Offset of the base group of the class with 1-based `index`
    pub fn offset_of(&self, index: usize) -> Option<usize> {
        self.offsets.get(index.checked_sub(1)?).copied()
    }

    /// Non-empty groups as `(offset, base indices)`
    pub fn groups(&self) -> &[(usize, Vec<usize>)] {
        &self.groups
    }
}
