//! Recursive expression resolution.
//!
//! Sub-expressions become detached nodes referenced from their owner. Every
//! converted send or call is remembered by syntax id so the analyzer's later
//! top-level visit of the same node is a no-op.

use crate::builder::TreeBuilder;
use crate::events::{Expr, SendTarget};
use ocjs_common::SkipReason;
use ocjs_common::limits::MAX_EXPR_RESOLVE_DEPTH;
use ocjs_common::mangle_selector;
use ocjs_context::node::ArgList;
use ocjs_context::{CallData, ContextKind, Dispatch, MessageSendData, NodeIndex};

impl TreeBuilder {
    /// Convert `expr` into a detached node. Returns `NONE` for a null sub-context.
    pub(crate) fn resolve_expr(&mut self, expr: &Expr, depth: u32) -> NodeIndex {
        if depth > MAX_EXPR_RESOLVE_DEPTH {
            self.skip(SkipReason::ExpressionTooDeep, expr.kind_name().to_string());
            return NodeIndex::NONE;
        }

        let kind = match expr {
            Expr::Cast { operand } => return self.resolve_expr(operand, depth + 1),
            Expr::Identifier { name } => ContextKind::StringLiteral(name.clone()),
            Expr::StringLiteral { value } => ContextKind::StringLiteral(value.clone()),
            Expr::IntegerLiteral { value } => ContextKind::IntegerLiteral(*value),
            Expr::FloatingLiteral { value } => ContextKind::FloatingLiteral(*value),
            Expr::MessageSend {
                id,
                target,
                selector,
                args,
            } => {
                let dispatch = match target {
                    SendTarget::Static { class_name } => Dispatch::Static {
                        class_name: class_name.clone(),
                    },
                    SendTarget::Instance { receiver } => Dispatch::Instance {
                        receiver: self.resolve_expr(receiver, depth + 1),
                    },
                };
                let args = self.resolve_args(args, depth);
                self.converted.insert(*id);
                ContextKind::MessageSend(MessageSendData {
                    dispatch,
                    selector: mangle_selector(selector),
                    args,
                })
            }
            Expr::Call {
                id,
                name,
                fixed_args,
                variadic_args,
                return_type,
            } => {
                let fixed_args = self.resolve_args(fixed_args, depth);
                let variadic_args = self.resolve_args(variadic_args, depth);
                self.converted.insert(*id);
                ContextKind::FunctionCall(CallData {
                    name: name.clone(),
                    fixed_args,
                    variadic_args,
                    return_type: return_type.clone(),
                })
            }
            Expr::Unsupported { kind } => {
                self.skip(SkipReason::UnresolvedExpressionKind, kind.clone());
                return NodeIndex::NONE;
            }
        };

        self.forest.arena.add(kind, NodeIndex::NONE)
    }

    fn resolve_args(&mut self, args: &[Expr], depth: u32) -> ArgList {
        args.iter()
            .map(|arg| self.resolve_expr(arg, depth + 1))
            .collect()
    }
}
