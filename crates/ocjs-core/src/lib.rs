//! ocjs converts Objective-C style class implementations into scripts that a
//! live-patching runtime evaluates in place of the original methods.
//!
//! A source analyzer walks one translation unit and reports what it sees as a
//! stream of [`SyntaxEvent`]s. The converter runs in two passes:
//!
//! 1. [`build_forest`] turns the event stream into a context [`Forest`]
//! 2. [`render`] prints the forest as script text
//!
//! [`convert_units`] runs both passes over many units in parallel.

pub mod config;
pub use config::ConvertOptions;

pub mod parallel;
pub use parallel::{
    ConversionStats, TranslationUnit, UnitScript, convert_unit_script, convert_units,
    join_scripts, load_units_from_json,
};

pub mod tracing_config;
pub use tracing_config::init_tracing;

pub use ocjs_builder::{
    BuilderOptions, Expr, Origin, SendTarget, SourceInfo, SyntaxEvent, SyntaxId, TreeBuilder,
};
pub use ocjs_common::{SkipDiagnostic, SkipReason, demangle_selector, mangle_selector};
pub use ocjs_context::{ContextKind, Forest, NodeIndex};
pub use ocjs_emitter::{ContextPrinter, PrinterOptions};

/// Build the context forest of one unit with default options.
pub fn build_forest(events: impl IntoIterator<Item = SyntaxEvent>) -> Forest {
    ocjs_builder::build_forest(events, &BuilderOptions::default())
}

/// Render a forest with default options.
pub fn render(forest: &Forest) -> String {
    ocjs_emitter::render(forest, &PrinterOptions::default())
}

/// Build and render one unit.
pub fn convert_unit(
    events: impl IntoIterator<Item = SyntaxEvent>,
    options: &ConvertOptions,
) -> String {
    let forest = ocjs_builder::build_forest(events, &options.builder_options());
    ocjs_emitter::render(&forest, &options.printer_options())
}
