use ocjs_builder::{BuilderOptions, Expr, SyntaxEvent, build_forest};
use ocjs_context::{
    CallData, ClassData, ConditionalData, ContextKind, Dispatch, ElseClause, Forest,
    MessageSendData, MethodData, NodeIndex,
};
use ocjs_emitter::{ContextPrinter, PrinterOptions, render};

fn render_events(events: Vec<SyntaxEvent>) -> String {
    let forest = build_forest(events, &BuilderOptions::default());
    render(&forest, &PrinterOptions::default())
}

fn in_method(body: Vec<SyntaxEvent>) -> Vec<SyntaxEvent> {
    let mut events = vec![
        SyntaxEvent::enter_class("Foo"),
        SyntaxEvent::enter_method("Foo", "run", false, &[]),
    ];
    events.extend(body);
    events.push(SyntaxEvent::ExitMethod);
    events.push(SyntaxEvent::ExitClass);
    events
}

fn send(forest: &mut Forest, dispatch: Dispatch, selector: &str, args: &[NodeIndex]) -> NodeIndex {
    forest.arena.add(
        ContextKind::MessageSend(MessageSendData {
            dispatch,
            selector: selector.to_string(),
            args: args.iter().copied().collect(),
        }),
        NodeIndex::NONE,
    )
}

#[test]
fn test_round_trip_class_method_send() {
    let output = render_events(vec![
        SyntaxEvent::enter_class("Foo"),
        SyntaxEvent::enter_method("Foo", "bar:", false, &["a"]),
        SyntaxEvent::expression(Expr::send(1, Expr::ident("self"), "baz", vec![])),
        SyntaxEvent::ExitMethod,
        SyntaxEvent::ExitClass,
    ]);
    assert_eq!(
        output,
        "class Foo {\n    bar(a) {\n        self.baz();\n    }\n}\n"
    );
}

#[test]
fn test_static_and_instance_sends_differ_only_in_prefix() {
    let mut forest = Forest::new();
    let receiver = forest
        .arena
        .add(ContextKind::StringLiteral("self".to_string()), NodeIndex::NONE);
    let instance = send(
        &mut forest,
        Dispatch::Instance { receiver },
        "reload",
        &[],
    );
    let class_side = send(
        &mut forest,
        Dispatch::Static {
            class_name: "Cache".to_string(),
        },
        "reload",
        &[],
    );

    assert_eq!(
        ContextPrinter::emit_to_string(&forest, instance),
        "self.reload()"
    );
    assert_eq!(
        ContextPrinter::emit_to_string(&forest, class_side),
        "require('Cache').reload()"
    );
}

#[test]
fn test_send_arguments_and_null_receiver() {
    let mut forest = Forest::new();
    let one = forest.arena.add(ContextKind::IntegerLiteral(1), NodeIndex::NONE);
    let name = forest
        .arena
        .add(ContextKind::StringLiteral("@\"x\"".to_string()), NodeIndex::NONE);
    let call = send(
        &mut forest,
        Dispatch::Instance {
            receiver: NodeIndex::NONE,
        },
        "set_forKey",
        &[one, name],
    );
    assert_eq!(
        ContextPrinter::emit_to_string(&forest, call),
        "set_forKey(1, @\"x\")"
    );
}

#[test]
fn test_literals_and_null_sub_context() {
    let mut forest = Forest::new();
    let int = forest.arena.add(ContextKind::IntegerLiteral(-42), NodeIndex::NONE);
    let float = forest
        .arena
        .add(ContextKind::FloatingLiteral(3.25), NodeIndex::NONE);
    let string = forest
        .arena
        .add(ContextKind::StringLiteral("raw text".to_string()), NodeIndex::NONE);

    assert_eq!(ContextPrinter::emit_to_string(&forest, int), "-42");
    assert_eq!(ContextPrinter::emit_to_string(&forest, float), "3.25");
    assert_eq!(ContextPrinter::emit_to_string(&forest, string), "raw text");
    assert_eq!(ContextPrinter::emit_to_string(&forest, NodeIndex::NONE), "");
}

#[test]
fn test_variable_declarations() {
    let output = render_events(in_method(vec![
        SyntaxEvent::variable("x", Some(Expr::int(3))),
        SyntaxEvent::variable("y", None),
        SyntaxEvent::variable(
            "z",
            Some(Expr::Unsupported {
                kind: "BlockExpr".to_string(),
            }),
        ),
    ]));
    assert!(output.contains("        var x = 3;\n"));
    assert!(output.contains("        var y;\n"));
    assert!(output.contains("        var z;\n"));
}

#[test]
fn test_conditional_then_only_has_no_else() {
    let output = render_events(in_method(vec![
        SyntaxEvent::conditional(Expr::ident("flag"), false),
        SyntaxEvent::EnterBlock,
        SyntaxEvent::expression(Expr::int(1)),
        SyntaxEvent::ExitBlock,
    ]));
    assert!(output.contains("        if (flag) {\n            1;\n        }\n"));
    assert!(!output.contains("else"));
}

#[test]
fn test_conditional_with_both_branches_in_order() {
    let output = render_events(in_method(vec![
        SyntaxEvent::conditional(Expr::ident("flag"), true),
        SyntaxEvent::EnterBlock,
        SyntaxEvent::expression(Expr::int(1)),
        SyntaxEvent::ExitBlock,
        SyntaxEvent::EnterBlock,
        SyntaxEvent::expression(Expr::int(2)),
        SyntaxEvent::ExitBlock,
        SyntaxEvent::expression(Expr::int(3)),
    ]));
    assert!(output.contains(
        "        if (flag) {\n            1;\n        } else {\n            2;\n        }\n        3;\n"
    ));
}

#[test]
fn test_pending_else_renders_empty_else() {
    let output = render_events(in_method(vec![
        SyntaxEvent::conditional(Expr::ident("flag"), true),
        SyntaxEvent::EnterBlock,
        SyntaxEvent::ExitBlock,
    ]));
    assert!(output.contains("        if (flag) {\n        } else {\n        }\n"));
}

#[test]
fn test_conditional_without_then_block() {
    let mut forest = Forest::new();
    let cond = forest.arena.add(
        ContextKind::Conditional(ConditionalData {
            condition: NodeIndex::NONE,
            then_block: NodeIndex::NONE,
            else_clause: ElseClause::Absent,
        }),
        NodeIndex::NONE,
    );
    let class = forest.arena.add(
        ContextKind::ClassImplementation(ClassData {
            name: "Foo".to_string(),
            methods: Vec::new(),
        }),
        NodeIndex::NONE,
    );
    let method = forest.arena.add(
        ContextKind::MethodDeclaration(MethodData {
            class_name: "Foo".to_string(),
            name: "run".to_string(),
            ..MethodData::default()
        }),
        NodeIndex::NONE,
    );
    if let Some(ContextKind::ClassImplementation(data)) =
        forest.arena.get_mut(class).map(|n| &mut n.kind)
    {
        data.methods.push(method);
    }
    forest.classes.push(class);
    assert!(forest.arena.insert_after(method, cond));

    let output = render(&forest, &PrinterOptions::default());
    assert_eq!(
        output,
        "class Foo {\n    run() {\n        if () {\n        }\n    }\n}\n"
    );
}

#[test]
fn test_static_method_marker_and_methods_separated() {
    let output = render_events(vec![
        SyntaxEvent::enter_class("Foo"),
        SyntaxEvent::enter_method("Foo", "shared", true, &[]),
        SyntaxEvent::ExitMethod,
        SyntaxEvent::enter_method("Foo", "doSomething:withValue:", false, &["a", "b"]),
        SyntaxEvent::ExitMethod,
        SyntaxEvent::ExitClass,
    ]);
    assert_eq!(
        output,
        "class Foo {\n    static shared() {\n    }\n\n    doSomething_withValue(a, b) {\n    }\n}\n"
    );
}

#[test]
fn test_annotation_comment() {
    let mut method = SyntaxEvent::enter_method("Foo", "fix", false, &[]);
    if let SyntaxEvent::EnterMethod { annotation, .. } = &mut method {
        *annotation = Some("crash-1024".to_string());
    }
    let events = vec![
        SyntaxEvent::enter_class("Foo"),
        method,
        SyntaxEvent::ExitMethod,
        SyntaxEvent::ExitClass,
    ];
    let forest = build_forest(events, &BuilderOptions::default());

    let with = render(&forest, &PrinterOptions::default());
    assert!(with.contains("    // @patch crash-1024\n    fix() {\n"));

    let options = PrinterOptions {
        emit_annotations: false,
        ..PrinterOptions::default()
    };
    let without = render(&forest, &options);
    assert!(!without.contains("@patch"));
}

#[test]
fn test_call_reads_continuation_from_chain() {
    let output = render_events(in_method(vec![
        SyntaxEvent::expression(Expr::call(
            1,
            "NSLog",
            vec![Expr::string("@\"%d\"")],
            vec![Expr::int(9)],
            "void",
        )),
        SyntaxEvent::variable("x", Some(Expr::int(1))),
        SyntaxEvent::expression(Expr::int(5)),
    ]));
    assert!(output.contains(
        "        callCFunction('NSLog', [@\"%d\"], [5], 'void');\n        var x = 1;\n        5;\n"
    ));
}

fn log_calls(count: usize) -> Vec<SyntaxEvent> {
    (0..count)
        .map(|i| {
            SyntaxEvent::expression(Expr::call(
                i as u64,
                "NSLog",
                vec![Expr::string("x")],
                vec![],
                "void",
            ))
        })
        .collect()
}

#[test]
fn test_chained_calls_expand_one_level() {
    let output = render_events(in_method(log_calls(3)));
    let head = "callCFunction('NSLog', [x], [], 'void')";
    assert_eq!(
        output,
        format!(
            "class Foo {{\n    run() {{\n        \
             callCFunction('NSLog', [x], [{head}, {head}], 'void');\n        \
             callCFunction('NSLog', [x], [{head}], 'void');\n        \
             {head};\n    }}\n}}\n"
        )
    );
}

#[test]
fn test_consecutive_calls_grow_polynomially() {
    for count in [8_usize, 32, 64] {
        let output = render_events(in_method(log_calls(count)));
        // One statement per call, plus each call once in every earlier continuation.
        let expected = count + count * (count - 1) / 2;
        assert_eq!(output.matches("callCFunction(").count(), expected);
        assert_eq!(output.lines().count(), count + 4);
    }
}

#[test]
fn test_custom_lookup_names_and_indent() {
    let mut forest = Forest::new();
    let lookup = send(
        &mut forest,
        Dispatch::Static {
            class_name: "Foo".to_string(),
        },
        "new",
        &[],
    );
    let call = forest.arena.add(
        ContextKind::FunctionCall(CallData {
            name: "abs".to_string(),
            fixed_args: [lookup].into_iter().collect(),
            variadic_args: Default::default(),
            return_type: "int".to_string(),
        }),
        NodeIndex::NONE,
    );
    let options = PrinterOptions {
        indent_width: 2,
        module_lookup: "lookupClass".to_string(),
        native_call: "invokeNative".to_string(),
        emit_annotations: true,
    };
    let mut printer = ContextPrinter::new(&forest, &options);
    printer.emit_expression(call);
    assert_eq!(
        printer.finish(),
        "invokeNative('abs', [lookupClass('Foo').new()], [], 'int')"
    );
}

#[test]
fn test_nested_receiver_chain() {
    let inner = Expr::class_send(2, "Foo", "shared", vec![]);
    let outer = Expr::send(1, inner.clone(), "reload:", vec![Expr::float(0.5)]);
    let output = render_events(in_method(vec![
        SyntaxEvent::expression(outer),
        SyntaxEvent::expression(inner),
    ]));
    assert!(output.contains("        require('Foo').shared().reload(0.5);\n"));
    assert_eq!(output.matches("shared").count(), 1);
}

#[test]
fn test_skipped_methods_emit_nothing() {
    let mut untyped = SyntaxEvent::enter_method("Foo", "gone", false, &[]);
    if let SyntaxEvent::EnterMethod { return_type, .. } = &mut untyped {
        *return_type = None;
    }
    let output = render_events(vec![
        SyntaxEvent::enter_class("Foo"),
        SyntaxEvent::enter_method("Foo", "kept", false, &[]),
        SyntaxEvent::ExitMethod,
        untyped,
        SyntaxEvent::expression(Expr::int(1)),
        SyntaxEvent::ExitMethod,
        SyntaxEvent::ExitClass,
    ]);
    assert!(output.contains("kept()"));
    assert!(!output.contains("gone"));
    assert!(!output.contains("1;"));
}

#[test]
fn test_empty_forest_renders_empty_text() {
    assert_eq!(render(&Forest::new(), &PrinterOptions::default()), "");
}

#[test]
fn test_classes_separated_by_blank_line() {
    let output = render_events(vec![
        SyntaxEvent::enter_class("A"),
        SyntaxEvent::ExitClass,
        SyntaxEvent::enter_class("B"),
        SyntaxEvent::ExitClass,
    ]);
    assert_eq!(output, "class A {\n}\n\nclass B {\n}\n");
}
