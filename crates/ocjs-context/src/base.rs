//! Arena addressing.

/// Index of a node in a [`ContextArena`](crate::ContextArena).
///
/// `NodeIndex::NONE` stands for a missing node: an unset link or a null
/// sub-context produced by an unresolved expression.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeIndex(pub u32);

impl NodeIndex {
    pub const NONE: NodeIndex = NodeIndex(u32::MAX);

    #[inline]
    pub const fn is_none(self) -> bool {
        self.0 == u32::MAX
    }

    #[inline]
    pub const fn is_some(self) -> bool {
        !self.is_none()
    }

    /// `None` for `NodeIndex::NONE`, otherwise the index itself.
    #[inline]
    pub const fn to_option(self) -> Option<NodeIndex> {
        if self.is_none() { None } else { Some(self) }
    }
}

impl Default for NodeIndex {
    fn default() -> Self {
        Self::NONE
    }
}

impl From<Option<NodeIndex>> for NodeIndex {
    fn from(value: Option<NodeIndex>) -> Self {
        value.unwrap_or(Self::NONE)
    }
}
