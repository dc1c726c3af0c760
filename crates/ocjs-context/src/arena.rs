//! Context arena: node storage and chain linking.

use crate::base::NodeIndex;
use crate::node::{ContextKind, ContextNode};
use ocjs_common::limits::INITIAL_ARENA_CAPACITY;

/// Owns every node of one translation unit.
#[derive(Clone, Debug, Default)]
pub struct ContextArena {
    nodes: Vec<ContextNode>,
}

impl ContextArena {
    pub fn new() -> ContextArena {
        ContextArena {
            nodes: Vec::with_capacity(INITIAL_ARENA_CAPACITY),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Add a detached node. `parent` is fixed for the node's lifetime.
    ///
    /// Returns `NONE` without storing anything once the arena is full.
    pub fn add(&mut self, kind: ContextKind, parent: NodeIndex) -> NodeIndex {
        let index = index_for_len(self.nodes.len());
        if index.is_none() {
            tracing::warn!(len = self.nodes.len(), "context arena is full");
            return index;
        }
        self.nodes.push(ContextNode::new(kind, parent));
        index
    }

    #[inline]
    pub fn get(&self, index: NodeIndex) -> Option<&ContextNode> {
        if index.is_none() {
            return None;
        }
        self.nodes.get(index.0 as usize)
    }

    #[inline]
    pub fn get_mut(&mut self, index: NodeIndex) -> Option<&mut ContextNode> {
        if index.is_none() {
            return None;
        }
        self.nodes.get_mut(index.0 as usize)
    }

    #[inline]
    pub fn kind(&self, index: NodeIndex) -> Option<&ContextKind> {
        self.get(index).map(|node| &node.kind)
    }

    #[inline]
    pub fn next(&self, index: NodeIndex) -> NodeIndex {
        self.get(index).map_or(NodeIndex::NONE, ContextNode::next)
    }

    #[inline]
    pub fn previous(&self, index: NodeIndex) -> NodeIndex {
        self.get(index).map_or(NodeIndex::NONE, ContextNode::previous)
    }

    #[inline]
    pub fn parent(&self, index: NodeIndex) -> NodeIndex {
        self.get(index).map_or(NodeIndex::NONE, ContextNode::parent)
    }

    /// Link `node` immediately after `cursor`.
    ///
    /// When `cursor` already has a successor, `node` is spliced in between and
    /// takes the old successor as its own `next`. `node` must be detached.
    /// Returns false when either index is unknown or `node` is already linked.
    pub fn insert_after(&mut self, cursor: NodeIndex, node: NodeIndex) -> bool {
        if cursor == node || self.get(cursor).is_none() {
            return false;
        }
        match self.get(node) {
            Some(n) if n.next.is_none() && n.previous.is_none() => {}
            _ => return false,
        }

        let old_next = self.next(cursor);
        if let Some(old) = self.get_mut(old_next) {
            old.previous = node;
        }
        if let Some(new) = self.get_mut(node) {
            new.previous = cursor;
            new.next = old_next;
        }
        if let Some(cur) = self.get_mut(cursor) {
            cur.next = node;
        }

        tracing::trace!(
            cursor = cursor.0,
            node = node.0,
            spliced = old_next.is_some(),
            "linked context node"
        );
        true
    }

    /// Iterate the nodes following `head` in its chain, excluding `head`.
    pub fn successors(&self, head: NodeIndex) -> Successors<'_> {
        Successors {
            arena: self,
            current: self.next(head),
        }
    }
}

/// Index the next node would get, or `NONE` when it would collide with the
/// sentinel or exceed `u32`.
fn index_for_len(len: usize) -> NodeIndex {
    match u32::try_from(len) {
        Ok(raw) if raw < NodeIndex::NONE.0 => NodeIndex(raw),
        _ => NodeIndex::NONE,
    }
}

/// Iterator over a statement chain.
pub struct Successors<'a> {
    arena: &'a ContextArena,
    current: NodeIndex,
}

impl<'a> Iterator for Successors<'a> {
    type Item = (NodeIndex, &'a ContextNode);

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.current;
        let node = self.arena.get(index)?;
        self.current = node.next;
        Some((index, node))
    }
}

#[cfg(test)]
#[path = "../tests/linking_tests.rs"]
mod tests;
