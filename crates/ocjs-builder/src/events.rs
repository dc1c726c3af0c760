//! Syntax events delivered by the source analyzer.
//!
//! Events carry names, flags and literal values only, never handles into the
//! analyzer's own syntax tree. Name and selector resolution as well as the
//! static/instance dispatch decision are made by the analyzer before an event
//! is emitted.
//!
//! All types serialize to tagged camelCase JSON so recorded streams can be
//! replayed:
//!
//! ```json
//! { "event": "enterMethod", "className": "Foo", "selector": "bar:",
//!   "isStatic": false, "params": ["a"], "returnType": "void" }
//! ```

use serde::{Deserialize, Serialize};

/// Opaque identity of a syntax node in the analyzer's tree.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SyntaxId(pub u64);

/// Where the analyzer found a node.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Origin {
    #[default]
    User,
    /// Platform or SDK headers.
    System,
}

/// Source metadata attached to declarations and statements.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SourceInfo {
    /// Spelling file, when the analyzer knows it.
    pub file: Option<String>,
    pub origin: Origin,
    /// False when the node's begin or end location is invalid.
    pub span_valid: bool,
    /// Compiler-synthesized declaration, e.g. a property accessor.
    pub implicit: bool,
}

impl Default for SourceInfo {
    fn default() -> Self {
        Self {
            file: None,
            origin: Origin::User,
            span_valid: true,
            implicit: false,
        }
    }
}

impl SourceInfo {
    pub fn in_file(file: impl Into<String>) -> Self {
        Self {
            file: Some(file.into()),
            ..Self::default()
        }
    }

    pub fn system() -> Self {
        Self {
            origin: Origin::System,
            ..Self::default()
        }
    }

    pub fn invalid_span() -> Self {
        Self {
            span_valid: false,
            ..Self::default()
        }
    }

    pub fn implicit() -> Self {
        Self {
            implicit: true,
            ..Self::default()
        }
    }
}

/// Receiver side of a message send.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "dispatch", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum SendTarget {
    /// `[Foo alloc]`
    Static { class_name: String },
    /// `[self baz]`
    Instance { receiver: Box<Expr> },
}

/// Expression tree as resolved by the analyzer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Expr {
    MessageSend {
        id: SyntaxId,
        target: SendTarget,
        selector: String,
        #[serde(default)]
        args: Vec<Expr>,
    },
    Call {
        id: SyntaxId,
        name: String,
        #[serde(default)]
        fixed_args: Vec<Expr>,
        #[serde(default)]
        variadic_args: Vec<Expr>,
        return_type: String,
    },
    /// Implicit or explicit cast; transparent to conversion.
    Cast { operand: Box<Expr> },
    /// Reference to a declared name; only the name is carried.
    Identifier { name: String },
    StringLiteral { value: String },
    IntegerLiteral { value: i64 },
    FloatingLiteral { value: f64 },
    /// Expression kind the analyzer has no mapping for.
    Unsupported { kind: String },
}

impl Expr {
    pub fn ident(name: impl Into<String>) -> Self {
        Self::Identifier { name: name.into() }
    }

    pub fn string(value: impl Into<String>) -> Self {
        Self::StringLiteral {
            value: value.into(),
        }
    }

    pub const fn int(value: i64) -> Self {
        Self::IntegerLiteral { value }
    }

    pub const fn float(value: f64) -> Self {
        Self::FloatingLiteral { value }
    }

    pub fn cast(operand: Self) -> Self {
        Self::Cast {
            operand: Box::new(operand),
        }
    }

    /// Instance send: `[receiver selector]`.
    pub fn send(id: u64, receiver: Self, selector: impl Into<String>, args: Vec<Self>) -> Self {
        Self::MessageSend {
            id: SyntaxId(id),
            target: SendTarget::Instance {
                receiver: Box::new(receiver),
            },
            selector: selector.into(),
            args,
        }
    }

    /// Class send: `[ClassName selector]`.
    pub fn class_send(
        id: u64,
        class_name: impl Into<String>,
        selector: impl Into<String>,
        args: Vec<Self>,
    ) -> Self {
        Self::MessageSend {
            id: SyntaxId(id),
            target: SendTarget::Static {
                class_name: class_name.into(),
            },
            selector: selector.into(),
            args,
        }
    }

    pub fn call(
        id: u64,
        name: impl Into<String>,
        fixed_args: Vec<Self>,
        variadic_args: Vec<Self>,
        return_type: impl Into<String>,
    ) -> Self {
        Self::Call {
            id: SyntaxId(id),
            name: name.into(),
            fixed_args,
            variadic_args,
            return_type: return_type.into(),
        }
    }

    /// Syntax identity of sends and calls, after looking through casts.
    pub fn syntax_id(&self) -> Option<SyntaxId> {
        match self {
            Self::MessageSend { id, .. } | Self::Call { id, .. } => Some(*id),
            Self::Cast { operand } => operand.syntax_id(),
            _ => None,
        }
    }

    pub fn kind_name(&self) -> &str {
        match self {
            Self::MessageSend { .. } => "message send",
            Self::Call { .. } => "call",
            Self::Cast { .. } => "cast",
            Self::Identifier { .. } => "identifier",
            Self::StringLiteral { .. } => "string literal",
            Self::IntegerLiteral { .. } => "integer literal",
            Self::FloatingLiteral { .. } => "floating literal",
            Self::Unsupported { kind } => kind,
        }
    }
}

/// One step of the analyzer's traversal.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum SyntaxEvent {
    /// `@implementation Foo`
    EnterClass {
        name: String,
        #[serde(default)]
        source: SourceInfo,
    },
    ExitClass,
    /// `- (void)bar:(id)a {`
    EnterMethod {
        class_name: String,
        selector: String,
        #[serde(default)]
        is_static: bool,
        #[serde(default)]
        params: Vec<String>,
        /// `None` when the analyzer could not resolve the return type.
        #[serde(default)]
        return_type: Option<String>,
        /// Patch annotation (`__attribute__((annotate(...)))`) on the method.
        #[serde(default)]
        annotation: Option<String>,
        #[serde(default)]
        source: SourceInfo,
    },
    ExitMethod,
    /// `id x = init;`
    VariableDeclaration {
        name: String,
        #[serde(default)]
        init: Option<Expr>,
        #[serde(default)]
        source: SourceInfo,
    },
    /// Expression statement, or a visit of an expression nested in one.
    Expression {
        expr: Expr,
        #[serde(default)]
        source: SourceInfo,
    },
    /// `if (condition)`; the branch bodies follow as blocks.
    EnterConditional {
        condition: Expr,
        #[serde(default)]
        has_else: bool,
        #[serde(default)]
        source: SourceInfo,
    },
    EnterBlock,
    ExitBlock,
}

impl SyntaxEvent {
    pub fn enter_class(name: impl Into<String>) -> Self {
        Self::EnterClass {
            name: name.into(),
            source: SourceInfo::default(),
        }
    }

    pub fn enter_method(
        class_name: impl Into<String>,
        selector: impl Into<String>,
        is_static: bool,
        params: &[&str],
    ) -> Self {
        Self::EnterMethod {
            class_name: class_name.into(),
            selector: selector.into(),
            is_static,
            params: params.iter().map(|p| (*p).to_string()).collect(),
            return_type: Some("void".to_string()),
            annotation: None,
            source: SourceInfo::default(),
        }
    }

    pub fn variable(name: impl Into<String>, init: Option<Expr>) -> Self {
        Self::VariableDeclaration {
            name: name.into(),
            init,
            source: SourceInfo::default(),
        }
    }

    pub fn expression(expr: Expr) -> Self {
        Self::Expression {
            expr,
            source: SourceInfo::default(),
        }
    }

    pub fn conditional(condition: Expr, has_else: bool) -> Self {
        Self::EnterConditional {
            condition,
            has_else,
            source: SourceInfo::default(),
        }
    }
}
