//! Indentation-aware output buffer.

use ocjs_common::limits::INITIAL_OUTPUT_CAPACITY;
use std::fmt::{Display, Write as _};

#[derive(Debug)]
pub struct SourceWriter {
    output: String,
    indent_unit: String,
    indent_level: u32,
}

impl SourceWriter {
    pub fn new(indent_width: u32) -> Self {
        Self {
            output: String::with_capacity(INITIAL_OUTPUT_CAPACITY),
            indent_unit: " ".repeat(indent_width as usize),
            indent_level: 0,
        }
    }

    #[inline]
    pub fn write(&mut self, s: &str) {
        self.output.push_str(s);
    }

    #[inline]
    pub fn write_char(&mut self, ch: char) {
        self.output.push(ch);
    }

    /// Write a value through its `Display` form.
    pub fn write_display(&mut self, value: impl Display) {
        // Writing into a String cannot fail.
        let _ = write!(self.output, "{value}");
    }

    pub fn write_line(&mut self) {
        self.output.push('\n');
    }

    pub fn write_indent(&mut self) {
        for _ in 0..self.indent_level {
            self.output.push_str(&self.indent_unit);
        }
    }

    pub const fn increase_indent(&mut self) {
        self.indent_level += 1;
    }

    pub const fn decrease_indent(&mut self) {
        if self.indent_level > 0 {
            self.indent_level -= 1;
        }
    }

    #[inline]
    pub const fn indent_level(&self) -> u32 {
        self.indent_level
    }

    /// Bytes written so far.
    #[inline]
    pub fn len(&self) -> usize {
        self.output.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.output.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.output
    }

    pub fn finish(self) -> String {
        self.output
    }
}

#[cfg(test)]
#[path = "../tests/source_writer_tests.rs"]
mod tests;
