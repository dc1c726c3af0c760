//! Multi-unit conversion.
//!
//! Every translation unit gets its own builder, forest and printer, so units
//! are converted on the rayon pool with no shared mutable state. Results keep
//! the input order.

use crate::config::ConvertOptions;
use anyhow::{Context, Result};
use ocjs_builder::{BuilderOptions, SyntaxEvent, TreeBuilder};
use ocjs_common::SkipDiagnostic;
use ocjs_emitter::PrinterOptions;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Recorded event stream of one source file.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationUnit {
    pub name: String,
    #[serde(default)]
    pub events: Vec<SyntaxEvent>,
}

impl TranslationUnit {
    pub fn new(name: impl Into<String>, events: Vec<SyntaxEvent>) -> Self {
        Self {
            name: name.into(),
            events,
        }
    }
}

/// Rendered script of one unit, with what the builder left out.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitScript {
    pub name: String,
    pub script: String,
    pub classes: usize,
    pub methods: usize,
    pub skips: Vec<SkipDiagnostic>,
}

/// Convert a single unit.
#[tracing::instrument(level = "debug", skip_all, fields(unit = %unit.name))]
pub fn convert_unit_script(
    unit: &TranslationUnit,
    builder_options: &BuilderOptions,
    printer_options: &PrinterOptions,
) -> UnitScript {
    let mut builder = TreeBuilder::new(builder_options.clone());
    for event in &unit.events {
        builder.handle(event);
    }
    let forest = builder.finish();
    let script = ocjs_emitter::render(&forest, printer_options);

    tracing::debug!(
        classes = forest.classes.len(),
        methods = forest.method_count(),
        skips = forest.skips.len(),
        "converted unit"
    );
    UnitScript {
        name: unit.name.clone(),
        script,
        classes: forest.classes.len(),
        methods: forest.method_count(),
        skips: forest.skips,
    }
}

/// Convert all units in parallel, preserving input order.
pub fn convert_units(units: &[TranslationUnit], options: &ConvertOptions) -> Vec<UnitScript> {
    let builder_options = options.builder_options();
    let printer_options = options.printer_options();
    units
        .par_iter()
        .map(|unit| convert_unit_script(unit, &builder_options, &printer_options))
        .collect()
}

/// Concatenate unit scripts in order. Units that produced no text are left out.
pub fn join_scripts(scripts: &[UnitScript]) -> String {
    let mut output = String::new();
    for script in scripts.iter().filter(|s| !s.script.is_empty()) {
        if !output.is_empty() {
            output.push('\n');
        }
        output.push_str(&script.script);
    }
    output
}

/// Decode a JSON array of recorded translation units.
pub fn load_units_from_json(json: &str) -> Result<Vec<TranslationUnit>> {
    serde_json::from_str(json).context("failed to decode translation units")
}

/// Totals over a conversion run.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ConversionStats {
    pub units: usize,
    pub classes: usize,
    pub methods: usize,
    pub skips: usize,
}

impl ConversionStats {
    pub fn from_scripts(scripts: &[UnitScript]) -> Self {
        scripts.iter().fold(Self::default(), |stats, script| Self {
            units: stats.units + 1,
            classes: stats.classes + script.classes,
            methods: stats.methods + script.methods,
            skips: stats.skips + script.skips.len(),
        })
    }
}

impl std::fmt::Display for ConversionStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} units, {} classes, {} methods, {} skipped",
            self.units, self.classes, self.methods, self.skips
        )
    }
}
