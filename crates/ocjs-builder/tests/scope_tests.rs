use super::*;
use crate::events::Expr;

fn builder_in_method() -> TreeBuilder {
    let mut builder = TreeBuilder::new(BuilderOptions::default());
    builder.handle(&SyntaxEvent::enter_class("Foo"));
    builder.handle(&SyntaxEvent::enter_method("Foo", "bar", false, &[]));
    builder
}

#[test]
fn test_method_opens_single_scope() {
    let builder = builder_in_method();
    assert_eq!(builder.scope_depth(), 1);
    assert!(builder.cursor().is_some());
    assert_eq!(builder.active_class(), builder.forest().classes[0]);
}

#[test]
fn test_branch_block_restores_cursor_to_conditional() {
    let mut builder = builder_in_method();
    let cond = builder.handle(&SyntaxEvent::conditional(Expr::ident("flag"), false));
    let block = builder.handle(&SyntaxEvent::EnterBlock);
    assert_eq!(builder.cursor(), block);
    assert_eq!(builder.scope_depth(), 2);
    assert_eq!(builder.forest().arena.parent(block), cond);

    builder.handle(&SyntaxEvent::expression(Expr::int(1)));
    builder.handle(&SyntaxEvent::ExitBlock);
    assert_eq!(builder.cursor(), cond);
    assert_eq!(builder.scope_depth(), 1);
}

#[test]
fn test_unmatched_exit_keeps_cursor() {
    let mut builder = builder_in_method();
    let cond = builder.handle(&SyntaxEvent::conditional(Expr::ident("flag"), false));
    builder.handle(&SyntaxEvent::EnterBlock);
    builder.handle(&SyntaxEvent::ExitBlock);
    builder.handle(&SyntaxEvent::ExitBlock);
    builder.handle(&SyntaxEvent::ExitBlock);

    assert_eq!(builder.cursor(), cond);
    assert_eq!(builder.scope_depth(), 1);
    let unmatched = builder
        .forest()
        .skips
        .iter()
        .filter(|s| s.reason == SkipReason::UnmatchedBlockExit)
        .count();
    assert_eq!(unmatched, 2);
}

#[test]
fn test_detached_block_is_consumed_by_its_exit() {
    let mut builder = TreeBuilder::new(BuilderOptions::default());
    assert!(builder.handle(&SyntaxEvent::EnterBlock).is_none());
    assert_eq!(builder.scope_depth(), 1);
    builder.handle(&SyntaxEvent::ExitBlock);
    assert_eq!(builder.scope_depth(), 0);
    let reasons: Vec<_> = builder.forest().skips.iter().map(|s| s.reason).collect();
    assert_eq!(reasons, vec![SkipReason::DetachedStatement]);
}

#[test]
fn test_exit_method_closes_open_blocks() {
    let mut builder = builder_in_method();
    builder.handle(&SyntaxEvent::conditional(Expr::ident("flag"), false));
    builder.handle(&SyntaxEvent::EnterBlock);
    builder.handle(&SyntaxEvent::ExitMethod);
    assert_eq!(builder.scope_depth(), 0);
    assert!(builder.cursor().is_none());
}

#[test]
fn test_bare_block_keeps_cursor_on_last_statement() {
    let mut builder = builder_in_method();
    assert!(builder.handle(&SyntaxEvent::EnterBlock).is_none());
    assert_eq!(builder.scope_depth(), 2);
    let stmt = builder.handle(&SyntaxEvent::expression(Expr::int(1)));
    builder.handle(&SyntaxEvent::ExitBlock);
    assert_eq!(builder.cursor(), stmt);
    assert_eq!(builder.scope_depth(), 1);
}

#[test]
fn test_block_past_limit_drops_statements_until_exit() {
    let mut builder = builder_in_method();
    let limit = MAX_BLOCK_NESTING as usize;
    for _ in 0..limit {
        builder.handle(&SyntaxEvent::conditional(Expr::ident("flag"), false));
        builder.handle(&SyntaxEvent::EnterBlock);
    }
    let innermost = builder.handle(&SyntaxEvent::conditional(Expr::ident("flag"), false));
    assert!(innermost.is_some());

    assert!(builder.handle(&SyntaxEvent::EnterBlock).is_none());
    assert_eq!(builder.scope_depth(), limit + 2);
    assert_eq!(builder.cursor(), innermost);
    assert!(builder.handle(&SyntaxEvent::expression(Expr::int(1))).is_none());
    assert!(builder.handle(&SyntaxEvent::conditional(Expr::ident("flag"), false)).is_none());

    builder.handle(&SyntaxEvent::ExitBlock);
    assert_eq!(builder.cursor(), innermost);
    assert!(builder.handle(&SyntaxEvent::expression(Expr::int(2))).is_some());
}
