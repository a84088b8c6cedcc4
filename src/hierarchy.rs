// Sat Oct 17 2026 - Alex

use crate::model::{ClassId, Model};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// Chain of classes from a direct base up to one ancestor, both ends included
pub type AncestorPath = Vec<ClassId>;

/// Transitive base/derived relationships over a frozen [`Model`].
///
/// Only complete, non-template, non-namespace classes take part. Results are cached
/// per class for the lifetime of the engine and never invalidated, so the model must
/// not change while it is alive (the borrow enforces that).
pub struct HierarchyClosure<'m> {
    model: &'m Model,
    paths: RwLock<HashMap<ClassId, Arc<Vec<AncestorPath>>>>,
    descendants: RwLock<HashMap<ClassId, Arc<Vec<ClassId>>>>,
}

impl<'m> HierarchyClosure<'m> {
    pub fn new(model: &'m Model) -> Self {
        Self {
            model,
            paths: RwLock::new(HashMap::new()),
            descendants: RwLock::new(HashMap::new()),
        }
    }

    pub fn model(&self) -> &'m Model {
        self.model
    }

    /// Whether `id` contributes edges to the closure
    pub fn participates(&self, id: ClassId) -> bool {
        let class = self.model.class(id);
        class.has_definition() && !class.is_template && !class.is_namespace()
    }

    /// One path per ancestor occurrence, depth first: a base, then everything above it.
    ///
    /// A class reached twice (diamond) appears once per route.
    pub fn ancestor_paths(&self, id: ClassId) -> Arc<Vec<AncestorPath>> {
        let mut stack = Vec::new();
        self.collect_paths(id, &mut stack)
    }

    fn collect_paths(&self, id: ClassId, stack: &mut Vec<ClassId>) -> Arc<Vec<AncestorPath>> {
        let cached = self.paths.read().get(&id).cloned();
        if let Some(paths) = cached {
            return paths;
        }

        let mut paths = Vec::new();
        if self.participates(id) {
            stack.push(id);
            for base in self.model.class(id).base_classes() {
                let base = base.base;
                if !self.participates(base) {
                    continue;
                }
                if stack.contains(&base) {
                    log::warn!(
                        "inheritance cycle through {}",
                        self.model.class(base).qualified_name
                    );
                    continue;
                }
                paths.push(vec![base]);
                for upper in self.collect_paths(base, stack).iter() {
                    let mut path = Vec::with_capacity(upper.len() + 1);
                    path.push(base);
                    path.extend_from_slice(upper);
                    paths.push(path);
                }
            }
            stack.pop();
        }

        let paths = Arc::new(paths);
        self.paths.write().insert(id, paths.clone());
        paths
    }

    /// Every ancestor in depth-first order; duplicates kept
    pub fn ancestors(&self, id: ClassId) -> Vec<ClassId> {
        self.ancestor_paths(id)
            .iter()
            .filter_map(|path| path.last().copied())
            .collect()
    }

    pub fn is_ancestor(&self, ancestor: ClassId, of: ClassId) -> bool {
        self.ancestor_paths(of)
            .iter()
            .any(|path| path.last() == Some(&ancestor))
    }

    /// Every class whose ancestors include `id`, in registration order
    pub fn descendants(&self, id: ClassId) -> Arc<Vec<ClassId>> {
        let cached = self.descendants.read().get(&id).cloned();
        if let Some(descendants) = cached {
            return descendants;
        }

        let descendants: Vec<ClassId> = if self.participates(id) {
            self.model
                .classes()
                .map(|(candidate, _)| candidate)
                .filter(|candidate| *candidate != id && self.is_ancestor(id, *candidate))
                .collect()
        } else {
            Vec::new()
        };

        let descendants = Arc::new(descendants);
        self.descendants.write().insert(id, descendants.clone());
        descendants
    }

    /// First route from `descendant` up to `ancestor`, both ends included
    pub fn path_between(&self, descendant: ClassId, ancestor: ClassId) -> Option<Vec<ClassId>> {
        self.ancestor_paths(descendant)
            .iter()
            .find(|path| path.last() == Some(&ancestor))
            .map(|path| {
                let mut chain = Vec::with_capacity(path.len() + 1);
                chain.push(descendant);
                chain.extend_from_slice(path);
                chain
            })
    }

    pub fn cached_classes(&self) -> usize {
        self.paths.read().len()
    }
}
