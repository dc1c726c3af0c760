//! Context tree intermediate representation.
//!
//! A context tree captures class, method, statement and expression structure
//! independently of the source grammar. Nodes live in a per-unit
//! [`ContextArena`] and refer to each other by [`NodeIndex`]:
//!
//! - `next` owns the following statement in the same scope
//! - `previous` and `parent` are plain back-references with no ownership
//! - sub-contexts (receivers, conditions, initializers, arguments) are detached
//!   nodes referenced from their owner's payload
//!
//! A [`Forest`] is the result of building one translation unit: the arena plus
//! its top-level class implementations.

pub mod base;
pub use base::NodeIndex;

pub mod node;
pub use node::{
    CallData, ClassData, ConditionalData, ContextKind, ContextNode, Dispatch, ElseClause,
    MessageSendData, MethodData, VariableData,
};

pub mod arena;
pub use arena::{ContextArena, Successors};

pub mod forest;
pub use forest::Forest;
