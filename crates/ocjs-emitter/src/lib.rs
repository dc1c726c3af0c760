//! Script emission for ocjs context forests.
//!
//! Rendering is a single downward pass over an immutable [`Forest`]. It keeps
//! no state beyond the output buffer, so independent forests can be rendered
//! concurrently.
//!
//! [`Forest`]: ocjs_context::Forest

pub mod options;
pub use options::PrinterOptions;

pub mod source_writer;
pub use source_writer::SourceWriter;

mod printer;
pub use printer::{ContextPrinter, render};
