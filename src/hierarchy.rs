//! Hierarchy resolution
//!
//! Resolves every class into a [`ClassMetrics`] through a registry keyed by
//! (className, classPath). Resolution is recursive (a parent is always
//! finalized before its children classify) and memoized: the driver visits
//! classes in pre-order, but ancestor lookups invoke `resolve` out of that
//! order, so the registry hit path is required for correctness, not a cache.

use std::collections::{HashMap, HashSet};

use thiserror::Error;

use crate::properties::{PropertyBucket, PropertyKind, classify};
use crate::semantic::{ClassId, Program};

/// Errors that abort the analysis with no partial result
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("unsupported multiple inheritance: class '{class}' has {count} base types")]
    UnsupportedInheritance { class: String, count: usize },
}

/// Registry identity of a class: name plus `file:line:col` declaration path
/// (empty when the declaration site is undeterminable)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClassKey {
    pub name: String,
    pub path: String,
}

/// Resolved per-class metrics
#[derive(Debug, Clone)]
pub struct ClassMetrics {
    pub class_name: String,
    pub class_path: String,
    /// Empty for a root class
    pub parent_class_name: String,
    pub depth_of_inheritance: usize,
    /// Incremented by each direct child as it resolves, exactly once per
    /// distinct child
    pub number_of_children: usize,
    pub methods: PropertyBucket,
    pub attributes: PropertyBucket,
}

/// Owns the registry for one or more analysis runs over the same arena.
/// Classes live in insertion (resolution) order; the registry maps identity
/// to arena index, so parent references never form cyclic object graphs.
#[derive(Debug, Default)]
pub struct HierarchyResolver {
    index: HashMap<ClassKey, usize>,
    classes: Vec<ClassMetrics>,
    /// Keys currently being resolved, guarding against name-resolution
    /// cycles across files
    visiting: HashSet<ClassKey>,
}

impl HierarchyResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolved classes in resolution order
    pub fn classes(&self) -> &[ClassMetrics] {
        &self.classes
    }

    pub fn into_classes(self) -> Vec<ClassMetrics> {
        self.classes
    }

    /// Resolve `class` into its metrics entry, returning the arena index.
    ///
    /// Idempotent: a registry hit returns the existing entry with no side
    /// effects. A class with two or more base types fails the whole analysis.
    pub fn resolve(&mut self, program: &Program, class: ClassId) -> Result<usize, AnalysisError> {
        let decl = program.class(class);
        let key = ClassKey {
            name: decl.name.clone(),
            path: decl.path_string(),
        };
        if let Some(&idx) = self.index.get(&key) {
            return Ok(idx);
        }

        let bases = program.base_classes(class);
        if bases.len() >= 2 {
            return Err(AnalysisError::UnsupportedInheritance {
                class: decl.name.clone(),
                count: bases.len(),
            });
        }

        // Parent first: classification below needs its union finalized.
        let parent_idx = match bases.first().and_then(|base| base.target) {
            Some(parent_id) => {
                let parent_decl = program.class(parent_id);
                let parent_key = ClassKey {
                    name: parent_decl.name.clone(),
                    path: parent_decl.path_string(),
                };
                if self.visiting.contains(&parent_key) {
                    // Cross-file name collision produced a cycle; valid
                    // Python cannot. Treat this class as a root.
                    None
                } else {
                    self.visiting.insert(key.clone());
                    let resolved = self.resolve(program, parent_id);
                    self.visiting.remove(&key);
                    Some(resolved?)
                }
            }
            None => None,
        };

        let (parent_name, depth) = match parent_idx {
            Some(p) => (
                self.classes[p].class_name.clone(),
                self.classes[p].depth_of_inheritance + 1,
            ),
            None => (String::new(), 0),
        };

        let symbols = program.visible_properties(class);
        let methods = classify(
            PropertyKind::Method,
            parent_idx.map(|p| &self.classes[p].methods),
            &symbols,
            class,
        );
        let attributes = classify(
            PropertyKind::Attribute,
            parent_idx.map(|p| &self.classes[p].attributes),
            &symbols,
            class,
        );

        if let Some(p) = parent_idx {
            self.classes[p].number_of_children += 1;
        }

        let idx = self.classes.len();
        self.classes.push(ClassMetrics {
            class_name: key.name.clone(),
            class_path: key.path.clone(),
            parent_class_name: parent_name,
            depth_of_inheritance: depth,
            number_of_children: 0,
            methods,
            attributes,
        });
        self.index.insert(key, idx);
        Ok(idx)
    }
}
