//! Context printer.
//!
//! Statement kinds and expression kinds render through separate entry points:
//! `emit_statement` writes a full indented line (or block), `emit_expression`
//! writes inline text only. A node without an expression form renders as
//! nothing in expression position, as does a null sub-context.

use crate::options::PrinterOptions;
use crate::source_writer::SourceWriter;
use ocjs_common::limits::MAX_RENDER_DEPTH;
use ocjs_context::{
    CallData, ConditionalData, ContextKind, Dispatch, ElseClause, Forest, MessageSendData,
    NodeIndex, VariableData,
};

/// Render every class of `forest`, in input order.
#[tracing::instrument(level = "debug", skip_all, fields(classes = forest.classes.len()))]
pub fn render(forest: &Forest, options: &PrinterOptions) -> String {
    let mut printer = ContextPrinter::new(forest, options);
    printer.emit_forest();
    printer.finish()
}

pub struct ContextPrinter<'a> {
    forest: &'a Forest,
    options: &'a PrinterOptions,
    writer: SourceWriter,
    depth: u32,
}

impl<'a> ContextPrinter<'a> {
    pub fn new(forest: &'a Forest, options: &'a PrinterOptions) -> Self {
        Self {
            forest,
            options,
            writer: SourceWriter::new(options.indent_width),
            depth: 0,
        }
    }

    /// Inline rendering of a single node with default options.
    pub fn emit_to_string(forest: &Forest, node: NodeIndex) -> String {
        let options = PrinterOptions::default();
        let mut printer = ContextPrinter::new(forest, &options);
        printer.emit_expression(node);
        printer.finish()
    }

    pub fn finish(self) -> String {
        self.writer.finish()
    }

    pub fn emit_forest(&mut self) {
        let forest = self.forest;
        for (i, &class) in forest.classes.iter().enumerate() {
            if i > 0 {
                self.writer.write_line();
            }
            self.emit_statement(class);
        }
    }

    /// Emit `node` as one or more complete lines at the current indentation.
    pub fn emit_statement(&mut self, node: NodeIndex) {
        let forest = self.forest;
        let Some(kind) = forest.arena.kind(node) else {
            return;
        };
        if !self.enter() {
            return;
        }

        match kind {
            ContextKind::ClassImplementation(data) => {
                self.writer.write_indent();
                self.writer.write("class ");
                self.writer.write(&data.name);
                self.writer.write(" {");
                self.writer.write_line();
                self.writer.increase_indent();
                for (i, &method) in data.methods.iter().enumerate() {
                    if i > 0 {
                        self.writer.write_line();
                    }
                    self.emit_statement(method);
                }
                self.writer.decrease_indent();
                self.writer.write_indent();
                self.writer.write("}");
                self.writer.write_line();
            }
            ContextKind::MethodDeclaration(data) => {
                if self.options.emit_annotations
                    && let Some(annotation) = &data.annotation
                {
                    self.writer.write_indent();
                    self.writer.write("// @patch ");
                    self.writer.write(annotation);
                    self.writer.write_line();
                }
                self.writer.write_indent();
                if data.is_static {
                    self.writer.write("static ");
                }
                self.writer.write(&data.name);
                self.writer.write("(");
                self.writer.write(&data.params.join(", "));
                self.writer.write(") {");
                self.writer.write_line();
                self.emit_body(node);
                self.writer.write_indent();
                self.writer.write("}");
                self.writer.write_line();
            }
            ContextKind::VariableDeclaration(data) => self.emit_variable(data),
            ContextKind::Conditional(data) => self.emit_conditional(data),
            ContextKind::CompoundBlock => {
                self.writer.write_indent();
                self.writer.write("{");
                self.writer.write_line();
                self.emit_body(node);
                self.writer.write_indent();
                self.writer.write("}");
                self.writer.write_line();
            }
            ContextKind::MessageSend(_)
            | ContextKind::StringLiteral(_)
            | ContextKind::IntegerLiteral(_)
            | ContextKind::FloatingLiteral(_)
            | ContextKind::FunctionCall(_) => {
                self.writer.write_indent();
                self.emit_expression(node);
                self.writer.write(";");
                self.writer.write_line();
            }
        }

        self.leave();
    }

    /// Emit the inline form of `node`. Null sub-contexts write nothing.
    pub fn emit_expression(&mut self, node: NodeIndex) {
        let forest = self.forest;
        let Some(kind) = forest.arena.kind(node) else {
            return;
        };
        if !self.enter() {
            return;
        }

        match kind {
            ContextKind::MessageSend(data) => self.emit_send(data),
            ContextKind::StringLiteral(value) => self.writer.write(value),
            ContextKind::IntegerLiteral(value) => self.writer.write_display(value),
            ContextKind::FloatingLiteral(value) => self.writer.write_display(value),
            ContextKind::FunctionCall(data) => self.emit_call(node, data),
            ContextKind::ClassImplementation(_)
            | ContextKind::MethodDeclaration(_)
            | ContextKind::VariableDeclaration(_)
            | ContextKind::Conditional(_)
            | ContextKind::CompoundBlock => {}
        }

        self.leave();
    }

    /// Statements chained after `head`, one indentation level deeper.
    fn emit_body(&mut self, head: NodeIndex) {
        let forest = self.forest;
        self.writer.increase_indent();
        for (stmt, _) in forest.arena.successors(head) {
            self.emit_statement(stmt);
        }
        self.writer.decrease_indent();
    }

    fn emit_variable(&mut self, data: &VariableData) {
        self.writer.write_indent();
        self.writer.write("var ");
        self.writer.write(&data.name);
        if data.init.is_some() {
            self.writer.write(" = ");
            self.emit_expression(data.init);
        }
        self.writer.write(";");
        self.writer.write_line();
    }

    fn emit_conditional(&mut self, data: &ConditionalData) {
        self.writer.write_indent();
        self.writer.write("if (");
        self.emit_expression(data.condition);
        self.writer.write(") {");
        self.writer.write_line();
        if data.then_block.is_some() {
            self.emit_body(data.then_block);
        }
        self.writer.write_indent();

        match data.else_clause {
            ElseClause::Absent => self.writer.write("}"),
            ElseClause::Pending => {
                self.writer.write("} else {");
                self.writer.write_line();
                self.writer.write_indent();
                self.writer.write("}");
            }
            ElseClause::Attached(block) => {
                self.writer.write("} else {");
                self.writer.write_line();
                self.emit_body(block);
                self.writer.write_indent();
                self.writer.write("}");
            }
        }
        self.writer.write_line();
    }

    fn emit_send(&mut self, data: &MessageSendData) {
        match &data.dispatch {
            Dispatch::Static { class_name } => {
                self.writer.write(&self.options.module_lookup);
                self.writer.write("('");
                self.writer.write(class_name);
                self.writer.write("').");
            }
            Dispatch::Instance { receiver } => {
                let before = self.writer.len();
                self.emit_expression(*receiver);
                if self.writer.len() > before {
                    self.writer.write_char('.');
                }
            }
        }
        self.writer.write(&data.selector);
        self.writer.write("(");
        self.emit_comma_separated(&data.args);
        self.writer.write(")");
    }

    /// `callCFunction('name', [fixed], [continuation], 'RetType')`.
    ///
    /// The continuation list is taken from the nodes chained after the call,
    /// not from `variadic_args`; those nodes still render as statements of the
    /// enclosing body afterwards. Only one level is expanded: a call inside a
    /// continuation is written with an empty continuation of its own.
    fn emit_call(&mut self, node: NodeIndex, data: &CallData) {
        let forest = self.forest;
        self.emit_call_head(data);
        let mut first = true;
        for (next, next_node) in forest.arena.successors(node) {
            if !has_expression_form(&next_node.kind) {
                continue;
            }
            if !first {
                self.writer.write(", ");
            }
            match &next_node.kind {
                ContextKind::FunctionCall(chained) => {
                    if self.enter() {
                        self.emit_call_head(chained);
                        self.emit_call_tail(chained);
                        self.leave();
                    }
                }
                _ => self.emit_expression(next),
            }
            first = false;
        }
        self.emit_call_tail(data);
    }

    /// Everything up to and including the continuation's opening bracket.
    fn emit_call_head(&mut self, data: &CallData) {
        self.writer.write(&self.options.native_call);
        self.writer.write("('");
        self.writer.write(&data.name);
        self.writer.write("', [");
        self.emit_comma_separated(&data.fixed_args);
        self.writer.write("], [");
    }

    fn emit_call_tail(&mut self, data: &CallData) {
        self.writer.write("], '");
        self.writer.write(&data.return_type);
        self.writer.write("')");
    }

    fn emit_comma_separated(&mut self, nodes: &[NodeIndex]) {
        for (i, &node) in nodes.iter().enumerate() {
            if i > 0 {
                self.writer.write(", ");
            }
            self.emit_expression(node);
        }
    }

    fn enter(&mut self) -> bool {
        if self.depth >= MAX_RENDER_DEPTH {
            tracing::debug!(depth = self.depth, "render depth limit reached");
            return false;
        }
        self.depth += 1;
        true
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }
}

fn has_expression_form(kind: &ContextKind) -> bool {
    matches!(
        kind,
        ContextKind::MessageSend(_)
            | ContextKind::StringLiteral(_)
            | ContextKind::IntegerLiteral(_)
            | ContextKind::FloatingLiteral(_)
            | ContextKind::FunctionCall(_)
    )
}
