//! Subscriber setup for drivers embedding the converter.
//!
//! `OCJS_LOG` (or `RUST_LOG` when it is unset) holds the filter directives and
//! `OCJS_LOG_FORMAT` picks how events are written to stderr:
//!
//! - `text` (default): one line per event
//! - `tree`: indented span tree, useful for following one unit through
//!   `convert_unit_script` into the builder and printer spans
//! - `json`: one object per event, for collecting skip diagnostics
//!
//! ```bash
//! OCJS_LOG="ocjs_builder=debug" OCJS_LOG_FORMAT=json ocjs-driver Foo.m
//! ```

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, fmt};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Tree,
    Json,
}

impl LogFormat {
    /// Unknown names fall back to `Text`.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "tree" => Self::Tree,
            "json" => Self::Json,
            _ => Self::Text,
        }
    }
}

/// Resolved logging settings, kept apart from the process environment so
/// drivers can build one from their own flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TracingConfig {
    pub directives: String,
    pub format: LogFormat,
}

impl TracingConfig {
    pub fn new(directives: impl Into<String>, format: LogFormat) -> Self {
        Self {
            directives: directives.into(),
            format,
        }
    }

    /// `None` when no filter is configured: logging stays off.
    pub fn from_vars(
        ocjs_log: Option<&str>,
        rust_log: Option<&str>,
        format: Option<&str>,
    ) -> Option<Self> {
        let directives = ocjs_log.or(rust_log)?;
        let format = format.map(LogFormat::parse).unwrap_or_default();
        Some(Self::new(directives, format))
    }

    pub fn from_env() -> Option<Self> {
        let ocjs_log = std::env::var("OCJS_LOG").ok();
        let rust_log = std::env::var("RUST_LOG").ok();
        let format = std::env::var("OCJS_LOG_FORMAT").ok();
        Self::from_vars(ocjs_log.as_deref(), rust_log.as_deref(), format.as_deref())
    }

    /// Invalid directives are dropped rather than rejected.
    pub fn filter(&self) -> EnvFilter {
        EnvFilter::builder().parse_lossy(&self.directives)
    }

    /// Install as the global subscriber. Returns `false` if one is already set.
    pub fn install(&self) -> bool {
        let filter = self.filter();
        match self.format {
            LogFormat::Tree => Registry::default()
                .with(filter)
                .with(
                    tracing_tree::HierarchicalLayer::new(2)
                        .with_writer(std::io::stderr)
                        .with_indent_lines(true)
                        .with_targets(true),
                )
                .try_init()
                .is_ok(),
            LogFormat::Json => Registry::default()
                .with(filter)
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .try_init()
                .is_ok(),
            LogFormat::Text => Registry::default()
                .with(filter)
                .with(fmt::layer().with_writer(std::io::stderr))
                .try_init()
                .is_ok(),
        }
    }
}

/// Install a subscriber from the environment. Does nothing when neither
/// `OCJS_LOG` nor `RUST_LOG` is set or a subscriber already exists.
pub fn init_tracing() -> bool {
    let Some(config) = TracingConfig::from_env() else {
        return false;
    };
    let installed = config.install();
    if installed {
        tracing::debug!(
            directives = %config.directives,
            format = ?config.format,
            "tracing installed"
        );
    }
    installed
}

#[cfg(test)]
#[path = "../tests/tracing_config_tests.rs"]
mod tests;
