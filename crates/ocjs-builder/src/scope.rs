//! Explicit scope stack.
//!
//! Each open method body or block is one frame. Closing a branch block restores
//! the cursor to the frame's `resume_at` node, so statements that follow a
//! conditional continue the conditional's chain rather than its branch.

use ocjs_context::NodeIndex;
use smallvec::SmallVec;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ScopeKind {
    Method,
    /// Branch block of a conditional.
    Block,
    /// Bare `{ ... }`; its statements stay in the enclosing chain.
    Inline,
    /// Block entered with nowhere to attach it; consumed by its exit only.
    Detached,
    /// Block past the nesting limit, or nested in one; its statements are dropped.
    Suppressed,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ScopeFrame {
    pub kind: ScopeKind,
    /// Node heading the scope's statement chain.
    pub head: NodeIndex,
    /// Cursor position once the scope is closed.
    pub resume_at: NodeIndex,
}

#[derive(Clone, Debug, Default)]
pub struct ScopeStack {
    frames: SmallVec<[ScopeFrame; 8]>,
}

impl ScopeStack {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn push(&mut self, frame: ScopeFrame) {
        self.frames.push(frame);
    }

    /// Head of the innermost attached scope.
    pub fn current_head(&self) -> NodeIndex {
        self.frames
            .iter()
            .rev()
            .find(|frame| !matches!(frame.kind, ScopeKind::Detached | ScopeKind::Suppressed))
            .map_or(NodeIndex::NONE, |frame| frame.head)
    }

    /// Whether statements are currently being dropped.
    #[inline]
    pub fn is_suppressed(&self) -> bool {
        self.frames
            .last()
            .is_some_and(|frame| frame.kind == ScopeKind::Suppressed)
    }

    /// Pop the innermost frame if it is a block; method frames stay open.
    pub fn pop_block(&mut self) -> Option<ScopeFrame> {
        match self.frames.last() {
            Some(frame) if frame.kind != ScopeKind::Method => self.frames.pop(),
            _ => None,
        }
    }

    pub fn clear(&mut self) {
        self.frames.clear();
    }
}
