//! Printer configuration.

/// Default lookup used for class-side sends: `require('Foo')`.
pub const DEFAULT_MODULE_LOOKUP: &str = "require";
/// Default primitive that invokes a native function by name.
pub const DEFAULT_NATIVE_CALL: &str = "callCFunction";
pub const DEFAULT_INDENT_WIDTH: u32 = 4;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PrinterOptions {
    /// Spaces per indentation level.
    pub indent_width: u32,
    pub module_lookup: String,
    pub native_call: String,
    /// Emit `// @patch <text>` above annotated methods.
    pub emit_annotations: bool,
}

impl Default for PrinterOptions {
    fn default() -> Self {
        Self {
            indent_width: DEFAULT_INDENT_WIDTH,
            module_lookup: DEFAULT_MODULE_LOOKUP.to_string(),
            native_call: DEFAULT_NATIVE_CALL.to_string(),
            emit_annotations: true,
        }
    }
}
