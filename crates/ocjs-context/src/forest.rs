//! Per-unit forest of class implementations.

use crate::arena::ContextArena;
use crate::base::NodeIndex;
use crate::node::{ClassData, ContextKind, MethodData};
use ocjs_common::SkipDiagnostic;

/// Result of building one translation unit.
///
/// The forest owns its arena; nothing in it refers to another unit.
#[derive(Clone, Debug, Default)]
pub struct Forest {
    pub arena: ContextArena,
    /// Top-level class implementations in input order.
    pub classes: Vec<NodeIndex>,
    /// Everything the builder left out, in input order.
    pub skips: Vec<SkipDiagnostic>,
}

impl Forest {
    pub fn new() -> Forest {
        Forest {
            arena: ContextArena::new(),
            classes: Vec::new(),
            skips: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn class_data(&self, class: NodeIndex) -> Option<&ClassData> {
        match self.arena.kind(class)? {
            ContextKind::ClassImplementation(data) => Some(data),
            _ => None,
        }
    }

    pub fn method_data(&self, method: NodeIndex) -> Option<&MethodData> {
        match self.arena.kind(method)? {
            ContextKind::MethodDeclaration(data) => Some(data),
            _ => None,
        }
    }

    /// First top-level implementation with the given name.
    pub fn find_class(&self, name: &str) -> Option<NodeIndex> {
        self.classes
            .iter()
            .copied()
            .find(|&class| self.class_data(class).is_some_and(|data| data.name == name))
    }

    /// All methods of all classes, in rendering order.
    pub fn methods(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.classes
            .iter()
            .filter_map(|&class| self.class_data(class))
            .flat_map(|data| data.methods.iter().copied())
    }

    pub fn method_count(&self) -> usize {
        self.methods().count()
    }
}
