//! Event-driven construction of a context forest.

use crate::events::{SourceInfo, SyntaxEvent, SyntaxId};
use crate::options::BuilderOptions;
use crate::scope::{ScopeFrame, ScopeKind, ScopeStack};
use ocjs_common::limits::MAX_BLOCK_NESTING;
use ocjs_common::{SkipDiagnostic, SkipReason, mangle_selector};
use ocjs_context::{
    ClassData, ConditionalData, ContextKind, ElseClause, Forest, MethodData, NodeIndex,
    VariableData,
};
use rustc_hash::FxHashSet;

/// Build the forest for one translation unit.
#[tracing::instrument(level = "debug", skip_all)]
pub fn build_forest(
    events: impl IntoIterator<Item = SyntaxEvent>,
    options: &BuilderOptions,
) -> Forest {
    let mut builder = TreeBuilder::new(options.clone());
    for event in events {
        builder.handle(&event);
    }
    builder.finish()
}

/// Consumes syntax events for one translation unit.
///
/// The builder keeps a single cursor: the most recently linked node, where the
/// next statement attaches. Statements are linked with the append-after-current
/// rule, see [`ContextArena::insert_after`](ocjs_context::ContextArena::insert_after).
pub struct TreeBuilder {
    pub(crate) forest: Forest,
    options: BuilderOptions,
    active_class: NodeIndex,
    cursor: NodeIndex,
    scopes: ScopeStack,
    /// Sends and calls already converted as sub-expressions.
    pub(crate) converted: FxHashSet<SyntaxId>,
    /// Open class/method entries inside a skipped class or method.
    ignored_depth: u32,
}

impl TreeBuilder {
    pub fn new(options: BuilderOptions) -> TreeBuilder {
        TreeBuilder {
            forest: Forest::new(),
            options,
            active_class: NodeIndex::NONE,
            cursor: NodeIndex::NONE,
            scopes: ScopeStack::new(),
            converted: FxHashSet::default(),
            ignored_depth: 0,
        }
    }

    #[inline]
    pub fn cursor(&self) -> NodeIndex {
        self.cursor
    }

    #[inline]
    pub fn active_class(&self) -> NodeIndex {
        self.active_class
    }

    #[inline]
    pub fn scope_depth(&self) -> usize {
        self.scopes.depth()
    }

    pub fn forest(&self) -> &Forest {
        &self.forest
    }

    /// Finish the unit. Scopes still open simply stay unterminated.
    pub fn finish(self) -> Forest {
        if !self.scopes.is_empty() {
            tracing::debug!(
                open_scopes = self.scopes.depth(),
                "event stream ended inside an open scope"
            );
        }
        self.forest
    }

    /// Process one event. Returns the node it created and linked, if any.
    pub fn handle(&mut self, event: &SyntaxEvent) -> NodeIndex {
        if self.ignored_depth > 0 {
            self.track_ignored(event);
            return NodeIndex::NONE;
        }

        match event {
            SyntaxEvent::EnterClass { name, source } => self.enter_class(name, source),
            SyntaxEvent::ExitClass => {
                self.active_class = NodeIndex::NONE;
                self.close_body();
                NodeIndex::NONE
            }
            SyntaxEvent::EnterMethod {
                class_name,
                selector,
                is_static,
                params,
                return_type,
                annotation,
                source,
            } => self.enter_method(
                class_name,
                selector,
                *is_static,
                params,
                return_type.as_deref(),
                annotation.as_deref(),
                source,
            ),
            SyntaxEvent::ExitMethod => {
                self.close_body();
                NodeIndex::NONE
            }
            SyntaxEvent::VariableDeclaration { name, init, source } => {
                let subject = format!("variable {name}");
                if !self.accepts_statement(source, &subject) {
                    return NodeIndex::NONE;
                }
                let init = init
                    .as_ref()
                    .map_or(NodeIndex::NONE, |expr| self.resolve_expr(expr, 0));
                let node = self.forest.arena.add(
                    ContextKind::VariableDeclaration(VariableData {
                        name: name.clone(),
                        init,
                    }),
                    NodeIndex::NONE,
                );
                self.link(node)
            }
            SyntaxEvent::Expression { expr, source } => {
                if !self.accepts_statement(source, expr.kind_name()) {
                    return NodeIndex::NONE;
                }
                if let Some(id) = expr.syntax_id()
                    && self.converted.contains(&id)
                {
                    tracing::trace!(id = id.0, "expression already converted");
                    return NodeIndex::NONE;
                }
                let node = self.resolve_expr(expr, 0);
                if node.is_none() {
                    return NodeIndex::NONE;
                }
                self.link(node)
            }
            SyntaxEvent::EnterConditional {
                condition,
                has_else,
                source,
            } => {
                if !self.accepts_statement(source, "conditional") {
                    return NodeIndex::NONE;
                }
                let condition = self.resolve_expr(condition, 0);
                let else_clause = if *has_else {
                    ElseClause::Pending
                } else {
                    ElseClause::Absent
                };
                let node = self.forest.arena.add(
                    ContextKind::Conditional(ConditionalData {
                        condition,
                        then_block: NodeIndex::NONE,
                        else_clause,
                    }),
                    NodeIndex::NONE,
                );
                self.link(node)
            }
            SyntaxEvent::EnterBlock => self.enter_block(),
            SyntaxEvent::ExitBlock => {
                self.exit_block();
                NodeIndex::NONE
            }
        }
    }

    fn enter_class(&mut self, name: &str, source: &SourceInfo) -> NodeIndex {
        if let Some(reason) = self.options.classify(source) {
            self.skip(reason, format!("class {name}"));
            self.ignored_depth = 1;
            return NodeIndex::NONE;
        }

        let class = self.forest.arena.add(
            ContextKind::ClassImplementation(ClassData {
                name: name.to_string(),
                methods: Vec::new(),
            }),
            NodeIndex::NONE,
        );
        if class.is_none() {
            return class;
        }
        self.forest.classes.push(class);
        self.active_class = class;
        self.close_body();
        tracing::debug!(class = name, "entered class implementation");
        class
    }

    fn enter_method(
        &mut self,
        class_name: &str,
        selector: &str,
        is_static: bool,
        params: &[String],
        return_type: Option<&str>,
        annotation: Option<&str>,
        source: &SourceInfo,
    ) -> NodeIndex {
        let sigil = if is_static { '+' } else { '-' };
        let subject = format!("method {sigil}[{class_name} {selector}]");

        let reason = self.options.classify(source).or_else(|| {
            return_type
                .is_none_or(str::is_empty)
                .then_some(SkipReason::UnresolvedReturnType)
        });
        if let Some(reason) = reason {
            // The cursor stays where it was; the body is ignored up to ExitMethod.
            self.skip(reason, subject);
            self.ignored_depth = 1;
            return NodeIndex::NONE;
        }

        let class = self.class_for_method(class_name);
        if class.is_none() {
            return class;
        }
        let method = self.forest.arena.add(
            ContextKind::MethodDeclaration(MethodData {
                class_name: class_name.to_string(),
                name: mangle_selector(selector),
                is_static,
                params: params.to_vec(),
                annotation: annotation.map(str::to_string),
            }),
            NodeIndex::NONE,
        );
        if method.is_none() {
            return method;
        }
        if let Some(ContextKind::ClassImplementation(data)) = self
            .forest
            .arena
            .get_mut(class)
            .map(|node| &mut node.kind)
        {
            data.methods.push(method);
        }

        self.scopes.clear();
        self.scopes.push(ScopeFrame {
            kind: ScopeKind::Method,
            head: method,
            resume_at: NodeIndex::NONE,
        });
        self.cursor = method;
        tracing::debug!(%subject, "entered method body");
        method
    }

    /// Active implementation, or one named after the method's owning class.
    fn class_for_method(&mut self, class_name: &str) -> NodeIndex {
        if self.active_class.is_some() {
            return self.active_class;
        }
        if let Some(existing) = self.forest.find_class(class_name) {
            self.active_class = existing;
            return existing;
        }
        tracing::debug!(class = class_name, "method outside an implementation");
        let class = self.forest.arena.add(
            ContextKind::ClassImplementation(ClassData {
                name: class_name.to_string(),
                methods: Vec::new(),
            }),
            NodeIndex::NONE,
        );
        if class.is_some() {
            self.forest.classes.push(class);
            self.active_class = class;
        }
        class
    }

    fn enter_block(&mut self) -> NodeIndex {
        // The method frame is the bottom of the stack.
        let nesting = self.scopes.depth().saturating_sub(1);
        if self.scopes.is_suppressed() || nesting >= MAX_BLOCK_NESTING as usize {
            if !self.scopes.is_suppressed() {
                self.skip(SkipReason::BlockTooDeep, format!("block at depth {nesting}"));
            }
            self.scopes.push(ScopeFrame {
                kind: ScopeKind::Suppressed,
                head: NodeIndex::NONE,
                resume_at: NodeIndex::NONE,
            });
            return NodeIndex::NONE;
        }

        if self.cursor.is_none() {
            self.skip(SkipReason::DetachedStatement, "block");
            self.scopes.push(ScopeFrame {
                kind: ScopeKind::Detached,
                head: NodeIndex::NONE,
                resume_at: NodeIndex::NONE,
            });
            return NodeIndex::NONE;
        }

        let conditional = self.cursor;
        let branch_slot = match self.forest.arena.kind(conditional) {
            Some(ContextKind::Conditional(data)) if data.accepts_block() => true,
            _ => false,
        };

        if branch_slot {
            let block = self
                .forest
                .arena
                .add(ContextKind::CompoundBlock, conditional);
            if let Some(ContextKind::Conditional(data)) = self
                .forest
                .arena
                .get_mut(conditional)
                .map(|node| &mut node.kind)
            {
                if data.then_block.is_none() {
                    data.then_block = block;
                } else {
                    data.else_clause = ElseClause::Attached(block);
                }
            }
            self.scopes.push(ScopeFrame {
                kind: ScopeKind::Block,
                head: block,
                resume_at: conditional,
            });
            self.cursor = block;
            tracing::trace!(block = block.0, conditional = conditional.0, "entered branch block");
            return block;
        }

        // Bare `{ ... }`: declarations are function-scoped in the output, so
        // the block's statements continue the current chain.
        self.scopes.push(ScopeFrame {
            kind: ScopeKind::Inline,
            head: self.scopes.current_head(),
            resume_at: NodeIndex::NONE,
        });
        NodeIndex::NONE
    }

    fn exit_block(&mut self) {
        match self.scopes.pop_block() {
            Some(frame)
                if matches!(
                    frame.kind,
                    ScopeKind::Detached | ScopeKind::Inline | ScopeKind::Suppressed
                ) => {}
            Some(frame) => {
                self.cursor = frame.resume_at;
                tracing::trace!(cursor = self.cursor.0, "exited block");
            }
            None => self.skip(SkipReason::UnmatchedBlockExit, "block exit"),
        }
    }

    fn close_body(&mut self) {
        self.scopes.clear();
        self.cursor = NodeIndex::NONE;
    }

    /// Events inside a skipped class or method only track nesting.
    fn track_ignored(&mut self, event: &SyntaxEvent) {
        match event {
            SyntaxEvent::EnterClass { .. } | SyntaxEvent::EnterMethod { .. } => {
                self.ignored_depth += 1;
            }
            SyntaxEvent::ExitClass | SyntaxEvent::ExitMethod => {
                self.ignored_depth -= 1;
            }
            _ => {}
        }
    }

    fn accepts_statement(&mut self, source: &SourceInfo, subject: &str) -> bool {
        if self.scopes.is_suppressed() {
            return false;
        }
        if let Some(reason) = self.options.classify(source) {
            self.skip(reason, subject);
            return false;
        }
        if self.cursor.is_none() {
            self.skip(SkipReason::DetachedStatement, subject);
            return false;
        }
        true
    }

    fn link(&mut self, node: NodeIndex) -> NodeIndex {
        if self.forest.arena.insert_after(self.cursor, node) {
            self.cursor = node;
            node
        } else {
            NodeIndex::NONE
        }
    }

    pub(crate) fn skip(&mut self, reason: SkipReason, subject: impl Into<String>) {
        let diagnostic = SkipDiagnostic::new(reason, subject);
        tracing::debug!(%diagnostic, "skip");
        self.forest.skips.push(diagnostic);
    }
}

#[cfg(test)]
#[path = "../tests/scope_tests.rs"]
mod tests;
