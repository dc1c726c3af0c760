//! Context node kinds and payloads.
//!
//! The kind set is closed: the printer matches exhaustively over
//! [`ContextKind`], so adding a kind forces every rendering site to be updated.

use crate::base::NodeIndex;
use smallvec::SmallVec;

/// Argument lists rarely exceed a handful of entries.
pub type ArgList = SmallVec<[NodeIndex; 4]>;

/// A node of the context tree.
///
/// Sibling links are only changed through [`ContextArena`](crate::ContextArena)
/// linking methods; `parent` is fixed when the node is created.
#[derive(Clone, Debug)]
pub struct ContextNode {
    pub kind: ContextKind,
    pub(crate) next: NodeIndex,
    pub(crate) previous: NodeIndex,
    pub(crate) parent: NodeIndex,
}

impl ContextNode {
    pub(crate) fn new(kind: ContextKind, parent: NodeIndex) -> Self {
        Self {
            kind,
            next: NodeIndex::NONE,
            previous: NodeIndex::NONE,
            parent,
        }
    }

    /// Following statement in the same scope.
    #[inline]
    pub fn next(&self) -> NodeIndex {
        self.next
    }

    /// Preceding node in the same chain (non-owning).
    #[inline]
    pub fn previous(&self) -> NodeIndex {
        self.previous
    }

    /// Node control returns to when the scope this node opened is closed.
    #[inline]
    pub fn parent(&self) -> NodeIndex {
        self.parent
    }

    /// Short kind name for logs and diagnostics.
    pub fn kind_name(&self) -> &'static str {
        self.kind.name()
    }
}

#[derive(Clone, Debug)]
pub enum ContextKind {
    /// `@implementation Foo`
    ClassImplementation(ClassData),
    /// `- (void)bar:(id)a { ... }`; heads its own body chain
    MethodDeclaration(MethodData),
    /// `NSInteger x = 1;`
    VariableDeclaration(VariableData),
    /// `[self baz]`, `[Foo alloc]`
    MessageSend(MessageSendData),
    /// `if (cond) { ... } else { ... }`
    Conditional(ConditionalData),
    /// `{ ... }`; heads its own body chain
    CompoundBlock,
    StringLiteral(String),
    IntegerLiteral(i64),
    FloatingLiteral(f64),
    /// `NSLog(@"%d", x)`
    FunctionCall(CallData),
}

impl ContextKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::ClassImplementation(_) => "ClassImplementation",
            Self::MethodDeclaration(_) => "MethodDeclaration",
            Self::VariableDeclaration(_) => "VariableDeclaration",
            Self::MessageSend(_) => "MessageSend",
            Self::Conditional(_) => "Conditional",
            Self::CompoundBlock => "CompoundBlock",
            Self::StringLiteral(_) => "StringLiteral",
            Self::IntegerLiteral(_) => "IntegerLiteral",
            Self::FloatingLiteral(_) => "FloatingLiteral",
            Self::FunctionCall(_) => "FunctionCall",
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct ClassData {
    pub name: String,
    /// Owned methods in declaration order.
    pub methods: Vec<NodeIndex>,
}

#[derive(Clone, Debug, Default)]
pub struct MethodData {
    pub class_name: String,
    /// Mangled selector.
    pub name: String,
    pub is_static: bool,
    pub params: Vec<String>,
    /// Patch annotation attached to the method in source, if any.
    pub annotation: Option<String>,
}

#[derive(Clone, Debug)]
pub struct VariableData {
    pub name: String,
    /// Initializer sub-context, `NONE` when the declaration has none.
    pub init: NodeIndex,
}

/// How a message is dispatched.
#[derive(Clone, Debug, PartialEq)]
pub enum Dispatch {
    /// Class-side send, routed through a lookup of the class by name.
    Static { class_name: String },
    /// Instance send to the rendered receiver sub-context.
    Instance { receiver: NodeIndex },
}

#[derive(Clone, Debug)]
pub struct MessageSendData {
    pub dispatch: Dispatch,
    /// Mangled selector.
    pub selector: String,
    pub args: ArgList,
}

impl MessageSendData {
    #[inline]
    pub fn is_static(&self) -> bool {
        matches!(self.dispatch, Dispatch::Static { .. })
    }
}

/// State of a conditional's else clause.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum ElseClause {
    /// Source has no else clause.
    #[default]
    Absent,
    /// Source has an else clause whose block has not been attached yet.
    Pending,
    /// Else block attached.
    Attached(NodeIndex),
}

impl ElseClause {
    #[inline]
    pub fn is_present(self) -> bool {
        !matches!(self, Self::Absent)
    }

    #[inline]
    pub fn block(self) -> NodeIndex {
        match self {
            Self::Attached(block) => block,
            Self::Absent | Self::Pending => NodeIndex::NONE,
        }
    }
}

#[derive(Clone, Debug)]
pub struct ConditionalData {
    pub condition: NodeIndex,
    pub then_block: NodeIndex,
    pub else_clause: ElseClause,
}

impl ConditionalData {
    /// Whether another branch block can still be attached.
    pub fn accepts_block(&self) -> bool {
        self.then_block.is_none() || self.else_clause == ElseClause::Pending
    }
}

#[derive(Clone, Debug)]
pub struct CallData {
    pub name: String,
    pub fixed_args: ArgList,
    /// Recorded for completeness; the printer reads variadic arguments from the
    /// statement chain instead.
    pub variadic_args: ArgList,
    pub return_type: String,
}
