//! Centralized limits and thresholds for the converter.
//!
//! Both the builder and the printer recurse over expression trees supplied by
//! the source analyzer. The analyzer is trusted to deliver well-formed input,
//! but pathological nesting must still not overflow the stack.

/// Maximum nesting depth for expression resolution in the tree builder.
///
/// A sub-expression nested deeper than this resolves to a null sub-context
/// and is recorded as `SkipReason::ExpressionTooDeep`.
///
/// ```objc
/// [[[[[[self a] b] c] d] e] f];   // depth 6
/// ```
pub const MAX_EXPR_RESOLVE_DEPTH: u32 = 256;

/// Maximum number of open blocks inside one method body.
///
/// A block opened beyond this depth is recorded as `SkipReason::BlockTooDeep`
/// and everything inside it, nested blocks included, is dropped.
pub const MAX_BLOCK_NESTING: u32 = 256;

/// Maximum nesting depth the printer follows before eliding a sub-context.
///
/// Covers the class and method levels, full block nesting, and a statement's
/// expression plus one call continuation, so anything the builder accepted is
/// printed in full.
pub const MAX_RENDER_DEPTH: u32 = 1024;

const _: () = assert!(MAX_RENDER_DEPTH > MAX_BLOCK_NESTING + 2 * MAX_EXPR_RESOLVE_DEPTH + 8);

/// Initial capacity for a unit's context arena.
pub const INITIAL_ARENA_CAPACITY: usize = 256;

/// Initial capacity of the printer's output buffer.
pub const INITIAL_OUTPUT_CAPACITY: usize = 4096;
