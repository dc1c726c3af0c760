//! Tree builder for the ocjs converter.
//!
//! The source analyzer walks a translation unit and reports what it sees as an
//! ordered stream of [`SyntaxEvent`]s carrying only scalar metadata. The
//! [`TreeBuilder`] turns that stream into a [`Forest`] of class, method and
//! statement chains:
//!
//! ```text
//! EnterClass(Foo)
//!   EnterMethod(bar:)          -> ClassImplementation Foo
//!     Expression([self baz])        MethodDeclaration bar -> MessageSend baz
//!   ExitMethod
//! ExitClass
//! ```
//!
//! Nothing in the builder fails. Problems are recorded as skips on the forest
//! and the rest of the unit is still converted.

pub mod events;
pub use events::{Expr, Origin, SendTarget, SourceInfo, SyntaxEvent, SyntaxId};

pub mod options;
pub use options::BuilderOptions;

pub mod scope;

mod builder;
mod resolve;
pub use builder::{TreeBuilder, build_forest};

pub use ocjs_context::Forest;
