//! Builder options and the user-source filter.

use crate::events::{Origin, SourceInfo};
use ocjs_common::SkipReason;

/// Xcode ships the platform SDK headers under this prefix.
pub const DEFAULT_SYSTEM_PREFIX: &str = "/Applications/Xcode.app/";

#[derive(Clone, Debug)]
pub struct BuilderOptions {
    /// Files under any of these prefixes are treated as system source.
    pub system_path_prefixes: Vec<String>,
}

impl Default for BuilderOptions {
    fn default() -> Self {
        Self {
            system_path_prefixes: vec![DEFAULT_SYSTEM_PREFIX.to_string()],
        }
    }
}

impl BuilderOptions {
    /// Whether a node originates in user-authored source.
    ///
    /// A node the analyzer marked as system source never is. A known but empty
    /// spelling file has no user location either.
    pub fn is_user_source(&self, source: &SourceInfo) -> bool {
        if source.origin == Origin::System {
            return false;
        }
        match source.file.as_deref() {
            None => true,
            Some("") => false,
            Some(file) => !self
                .system_path_prefixes
                .iter()
                .any(|prefix| file.starts_with(prefix.as_str())),
        }
    }

    /// First reason a node with this metadata must be skipped, if any.
    pub fn classify(&self, source: &SourceInfo) -> Option<SkipReason> {
        if !source.span_valid {
            Some(SkipReason::InvalidSourceSpan)
        } else if source.implicit {
            Some(SkipReason::ImplicitDeclaration)
        } else if !self.is_user_source(source) {
            Some(SkipReason::NonUserSource)
        } else {
            None
        }
    }
}
