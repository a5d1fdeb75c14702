//! Property classification
//!
//! Partitions the property symbols visible on a class into own, inherited,
//! and overridden sets relative to the parent's already-finalized union, and
//! counts private members independently of that partition.

use crate::semantic::{ClassId, PropertySymbol, SourceLocation};

/// Which bucket a classification pass feeds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyKind {
    /// Method-shaped declarations
    Method,
    /// Field-, parameter-, and accessor-shaped declarations
    Attribute,
}

/// A classified property
#[derive(Debug, Clone)]
pub struct PropertyRecord {
    pub name: String,
    pub location: SourceLocation,
}

/// Per-class, per-kind classification result
#[derive(Debug, Clone, Default)]
pub struct PropertyBucket {
    /// Not present on the parent
    pub own: Vec<PropertyRecord>,
    /// Present on the parent and surfaced unchanged from an ancestor
    pub inherited: Vec<PropertyRecord>,
    /// Present on the parent and redeclared by this class
    pub overridden: Vec<PropertyRecord>,
    /// Private-marked members, tracked independently of the three sets
    pub private_count: usize,
}

impl PropertyBucket {
    /// Whether any of the three sets contains `name`
    pub fn contains(&self, name: &str) -> bool {
        self.own.iter().chain(&self.inherited).chain(&self.overridden).any(|r| r.name == name)
    }

    /// |own| + |inherited| + |overridden| + privateCount.
    ///
    /// A property that is both private and present in one of the three sets
    /// is counted twice. Faithful to the original metric definitions; see
    /// the regression test below before changing.
    pub fn len(&self) -> usize {
        self.own.len() + self.inherited.len() + self.overridden.len() + self.private_count
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Classify the visible symbols of `current` for one property kind.
///
/// `parent` is the same-kind bucket of the already-resolved parent, or `None`
/// for a root class. Symbols without a declaration, and symbols whose shape
/// does not match `kind`, are skipped entirely.
pub fn classify(
    kind: PropertyKind,
    parent: Option<&PropertyBucket>,
    symbols: &[PropertySymbol],
    current: ClassId,
) -> PropertyBucket {
    let mut bucket = PropertyBucket::default();

    for symbol in symbols {
        let Some(decl) = &symbol.declaration else {
            continue;
        };
        let method_kind = kind == PropertyKind::Method;
        if decl.shape.is_method_shaped() != method_kind {
            continue;
        }

        if decl.private {
            bucket.private_count += 1;
        }

        let record = PropertyRecord {
            name: symbol.name.clone(),
            location: decl.location.clone(),
        };
        let in_parent = parent.is_some_and(|p| p.contains(&symbol.name));
        if !in_parent {
            bucket.own.push(record);
        } else if decl.declaring_class != current {
            bucket.inherited.push(record);
        } else {
            bucket.overridden.push(record);
        }
    }

    bucket
}
