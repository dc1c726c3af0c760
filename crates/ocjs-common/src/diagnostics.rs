//! Skip diagnostics.
//!
//! The tree builder never fails: every problem it meets is a local skip.
//! Skips are recorded so callers can report what was left out of a script.

use serde::Serialize;

/// Why the builder ignored part of its input.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, thiserror::Error)]
pub enum SkipReason {
    #[error("source span is invalid")]
    InvalidSourceSpan,
    #[error("declaration is compiler-synthesized")]
    ImplicitDeclaration,
    #[error("node does not originate in user source")]
    NonUserSource,
    #[error("method has no resolvable return type")]
    UnresolvedReturnType,
    #[error("block exit without a matching block entry")]
    UnmatchedBlockExit,
    #[error("expression kind is not recognized")]
    UnresolvedExpressionKind,
    #[error("statement arrived outside of any method body")]
    DetachedStatement,
    #[error("expression nesting exceeds the resolver depth limit")]
    ExpressionTooDeep,
    #[error("block nesting exceeds the builder depth limit")]
    BlockTooDeep,
}

/// A recorded skip: the reason plus a short description of what was skipped.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SkipDiagnostic {
    pub reason: SkipReason,
    pub subject: String,
}

impl SkipDiagnostic {
    pub fn new(reason: SkipReason, subject: impl Into<String>) -> Self {
        Self {
            reason,
            subject: subject.into(),
        }
    }
}

impl std::fmt::Display for SkipDiagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "skipped {}: {}", self.subject, self.reason)
    }
}
