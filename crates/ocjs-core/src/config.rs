//! Converter configuration.
//!
//! Options are read from camelCase JSON; every field is optional:
//!
//! ```json
//! { "systemPathPrefixes": ["/Applications/Xcode.app/", "/opt/sdk/"], "indentWidth": 2 }
//! ```

use anyhow::{Context, Result, bail};
use ocjs_builder::BuilderOptions;
use ocjs_builder::options::DEFAULT_SYSTEM_PREFIX;
use ocjs_emitter::PrinterOptions;
use ocjs_emitter::options::{DEFAULT_INDENT_WIDTH, DEFAULT_MODULE_LOOKUP, DEFAULT_NATIVE_CALL};
use serde::{Deserialize, Serialize};

/// Indentation wider than this is almost certainly a unit mix-up.
const MAX_INDENT_WIDTH: u32 = 16;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct ConvertOptions {
    /// Files under these prefixes are platform headers, never converted.
    pub system_path_prefixes: Vec<String>,
    pub indent_width: u32,
    /// Function used to look a class up by name for class-side sends.
    pub module_lookup: String,
    /// Function used to invoke a native C function by name.
    pub native_call: String,
    pub emit_annotations: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            system_path_prefixes: vec![DEFAULT_SYSTEM_PREFIX.to_string()],
            indent_width: DEFAULT_INDENT_WIDTH,
            module_lookup: DEFAULT_MODULE_LOOKUP.to_string(),
            native_call: DEFAULT_NATIVE_CALL.to_string(),
            emit_annotations: true,
        }
    }
}

impl ConvertOptions {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let options: Self =
            serde_json::from_str(json).context("failed to parse converter options")?;
        options.validate()?;
        Ok(options)
    }

    pub fn validate(&self) -> Result<()> {
        if self.indent_width > MAX_INDENT_WIDTH {
            bail!(
                "indentWidth {} exceeds the maximum of {MAX_INDENT_WIDTH}",
                self.indent_width
            );
        }
        if self.module_lookup.is_empty() {
            bail!("moduleLookup must not be empty");
        }
        if self.native_call.is_empty() {
            bail!("nativeCall must not be empty");
        }
        Ok(())
    }

    pub fn builder_options(&self) -> BuilderOptions {
        BuilderOptions {
            system_path_prefixes: self.system_path_prefixes.clone(),
        }
    }

    pub fn printer_options(&self) -> PrinterOptions {
        PrinterOptions {
            indent_width: self.indent_width,
            module_lookup: self.module_lookup.clone(),
            native_call: self.native_call.clone(),
            emit_annotations: self.emit_annotations,
        }
    }
}

#[cfg(test)]
#[path = "../tests/config_tests.rs"]
mod tests;
