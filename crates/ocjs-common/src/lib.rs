//! Common types and utilities for the ocjs converter.
//!
//! This crate provides the pieces shared by every ocjs crate:
//! - Centralized limits (`limits`)
//! - Skip diagnostics recorded while building a context forest (`SkipReason`, `SkipDiagnostic`)
//! - Selector mangling (`mangle_selector`, `demangle_selector`)

// Centralized limits and thresholds
pub mod limits;

// Skip taxonomy for the tree builder
pub mod diagnostics;
pub use diagnostics::{SkipDiagnostic, SkipReason};

// Selector-style name mangling
pub mod mangle;
pub use mangle::{demangle_selector, mangle_selector};
