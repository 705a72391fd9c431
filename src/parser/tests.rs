//! Unit tests for the parser module.
//!
//! This module contains tests for parsing various language constructs including:
//! - Operator precedence and associativity
//! - Arrow functions versus parenthesized expressions
//! - `async` as a keyword and as an identifier
//! - Optional chaining, `new` and tagged templates
//! - Destructuring declarations and error positions
//! - Automatic semicolon insertion
//! - Classes, object members and their modifier rules
//! - Import and export declarations

use crate::{
    ast::{
        ast::{Expression, NodeKind, Pattern, Statement},
        declarations::{ClassElement, ExportDefaultKind, ImportClause, MethodKind, VariableKind},
        expressions::{Argument, ArrowBody, BinaryOperator, ObjectMember},
        patterns::ObjectPatternMember,
        statements::{ForTarget, Program},
        visitor::{walk, NodeRef, Visitor},
    },
    errors::errors::{Error, ErrorImpl},
};

use super::parser::{Parser, MAX_DEPTH};

fn parse(source: &str) -> Program {
    match Parser::with_file(source, "test.js").parse() {
        Ok(program) => program,
        Err(error) => panic!("failed to parse {:?}: {}", source, error),
    }
}

fn parse_error(source: &str) -> Error {
    match Parser::new(source).parse() {
        Ok(program) => panic!("expected {:?} to fail, got {:?}", source, program),
        Err(error) => error,
    }
}

/// The expression of a program holding a single expression statement.
fn expression(source: &str) -> Expression {
    let program = parse(source);
    assert_eq!(program.body.len(), 1, "expected one statement in {:?}", source);
    match program.body.into_iter().next() {
        Some(Statement::Expression(statement)) => statement.expression,
        other => panic!("expected an expression statement, got {:?}", other),
    }
}

fn number(expression: &Expression) -> f64 {
    match expression {
        Expression::Number(literal) => literal.value,
        other => panic!("expected a number, got {:?}", other),
    }
}

fn identifier_name(expression: &Expression) -> &str {
    match expression {
        Expression::Identifier(identifier) => &identifier.name,
        other => panic!("expected an identifier, got {:?}", other),
    }
}

fn arrow_body_kind(body: &ArrowBody) -> NodeKind {
    match body {
        ArrowBody::Block(_) => NodeKind::BlockStatement,
        ArrowBody::Expression(expression) => expression.kind(),
    }
}

struct KindCounter {
    kind: NodeKind,
    count: usize,
}

impl<'a> Visitor<'a> for KindCounter {
    fn enter(&mut self, node: NodeRef<'a>) {
        if node.kind() == self.kind {
            self.count += 1;
        }
    }
}

fn count_kind(program: &Program, kind: NodeKind) -> usize {
    let mut counter = KindCounter { kind, count: 0 };
    walk(NodeRef::Program(program), &mut counter);
    counter.count
}

// PRECEDENCE

#[test]
fn test_multiplication_binds_tighter_than_addition() {
    let Expression::Binary(add) = expression("2 + 3 * 4") else {
        panic!("expected a binary expression");
    };

    assert_eq!(add.operator, BinaryOperator::Add);
    assert_eq!(number(&add.left), 2.0);
    let Expression::Binary(multiply) = add.right.as_ref() else {
        panic!("expected the right side to be a product");
    };
    assert_eq!(multiply.operator, BinaryOperator::Multiply);
    assert_eq!(number(&multiply.left), 3.0);
    assert_eq!(number(&multiply.right), 4.0);
}

#[test]
fn test_exponent_is_right_associative() {
    let Expression::Binary(outer) = expression("2 ** 3 ** 2") else {
        panic!("expected a binary expression");
    };

    assert_eq!(outer.operator, BinaryOperator::Exponent);
    assert_eq!(number(&outer.left), 2.0);
    let Expression::Binary(inner) = outer.right.as_ref() else {
        panic!("expected the right side to be an exponent");
    };
    assert_eq!(number(&inner.left), 3.0);
    assert_eq!(number(&inner.right), 2.0);
}

#[test]
fn test_subtraction_is_left_associative() {
    let Expression::Binary(outer) = expression("1 - 2 - 3") else {
        panic!("expected a binary expression");
    };

    assert_eq!(outer.operator, BinaryOperator::Subtract);
    assert_eq!(number(&outer.right), 3.0);
    let Expression::Binary(inner) = outer.left.as_ref() else {
        panic!("expected the left side to be a difference");
    };
    assert_eq!(number(&inner.left), 1.0);
    assert_eq!(number(&inner.right), 2.0);
}

#[test]
fn test_mixed_precedence_levels() {
    // a || (b && ((c | d) == e))
    let Expression::Logical(or) = expression("a || b && c | d == e") else {
        panic!("expected a logical expression");
    };
    assert_eq!(identifier_name(&or.left), "a");

    let Expression::Logical(and) = or.right.as_ref() else {
        panic!("expected `&&` on the right");
    };
    let Expression::Binary(bitwise_or) = and.right.as_ref() else {
        panic!("expected `|` under `&&`");
    };
    assert_eq!(bitwise_or.operator, BinaryOperator::BitwiseOr);
    let Expression::Binary(equals) = bitwise_or.right.as_ref() else {
        panic!("expected `==` under `|`");
    };
    assert_eq!(equals.operator, BinaryOperator::Equals);
}

#[test]
fn test_unary_and_conditional() {
    let Expression::Conditional(conditional) = expression("!a ? -b : typeof c") else {
        panic!("expected a conditional expression");
    };

    assert_eq!(conditional.test.kind(), NodeKind::UnaryExpression);
    assert_eq!(conditional.consequent.kind(), NodeKind::UnaryExpression);
    assert_eq!(conditional.alternate.kind(), NodeKind::UnaryExpression);
}

#[test]
fn test_assignment_is_right_associative() {
    let Expression::Assignment(outer) = expression("a = b += 1") else {
        panic!("expected an assignment");
    };

    assert!(matches!(outer.left.as_ref(), Pattern::Identifier(_)));
    assert_eq!(outer.right.kind(), NodeKind::AssignmentExpression);
}

#[test]
fn test_invalid_assignment_target() {
    let error = parse_error("a + b = 1");
    assert_eq!(*error.get_internal(), ErrorImpl::InvalidAssignmentTarget);
    assert_eq!(error.get_position().index, 0);

    let error = parse_error("1++");
    assert_eq!(*error.get_internal(), ErrorImpl::InvalidAssignmentTarget);
}

// ARROWS & PARENTHESES

#[test]
fn test_parenthesized_arrow_function() {
    let Expression::Arrow(arrow) = expression("(a, b) => a") else {
        panic!("expected an arrow function");
    };

    assert!(!arrow.is_async);
    assert_eq!(arrow.params.len(), 2);
    assert!(arrow
        .params
        .iter()
        .all(|param| matches!(param, Pattern::Identifier(_))));
    assert!(matches!(arrow.body, ArrowBody::Expression(_)));
}

#[test]
fn test_parenthesized_sequence() {
    let Expression::Sequence(sequence) = expression("(a, b)") else {
        panic!("expected a sequence expression");
    };

    assert_eq!(sequence.expressions.len(), 2);
    assert_eq!(identifier_name(&sequence.expressions[0]), "a");
    assert_eq!(identifier_name(&sequence.expressions[1]), "b");
}

#[test]
fn test_parentheses_produce_no_node() {
    let Expression::Binary(product) = expression("(1 + 2) * 3") else {
        panic!("expected a binary expression");
    };

    assert_eq!(product.left.kind(), NodeKind::BinaryExpression);
}

#[test]
fn test_arrow_parameter_forms() {
    let Expression::Arrow(arrow) = expression("({a, b = 1}, [c], ...rest) => { return a; }") else {
        panic!("expected an arrow function");
    };

    assert_eq!(arrow.params.len(), 3);
    assert_eq!(arrow.params[0].kind(), NodeKind::ObjectPattern);
    assert_eq!(arrow.params[1].kind(), NodeKind::ArrayPattern);
    assert_eq!(arrow.params[2].kind(), NodeKind::RestElement);
    assert!(matches!(arrow.body, ArrowBody::Block(_)));
}

#[test]
fn test_single_identifier_arrow() {
    let Expression::Arrow(arrow) = expression("x => x * 2") else {
        panic!("expected an arrow function");
    };

    assert_eq!(arrow.params.len(), 1);
    assert_eq!(arrow_body_kind(&arrow.body), NodeKind::BinaryExpression);
}

#[test]
fn test_empty_parentheses_require_arrow() {
    let error = parse_error("()");
    assert_eq!(error.get_error_name(), "UnexpectedToken");
}

#[test]
fn test_arrow_cannot_follow_line_break() {
    assert!(Parser::new("(a)\n=> a").parse().is_err());
}

#[test]
fn test_wrapped_arrow_parameter_is_rejected() {
    for source in ["((a)) => 1", "(b, (a)) => 1", "((a, b)) => 1"] {
        let error = parse_error(source);
        assert_eq!(error.get_internal(), &ErrorImpl::InvalidAssignmentTarget, "source: {}", source);
    }

    let error = parse_error("(b, (a)) => 1");
    assert_eq!(error.get_position().column, 5);
}

#[test]
fn test_wrapped_items_outside_arrows() {
    assert_eq!(expression("((a)) + 1;").kind(), NodeKind::BinaryExpression);
    assert_eq!(expression("f((a), b);").kind(), NodeKind::CallExpression);
    assert_eq!(expression("((a), b);").kind(), NodeKind::SequenceExpression);

    let Expression::Arrow(arrow) = expression("(a = (1), [b]) => a;") else {
        panic!("expected an arrow function");
    };
    assert_eq!(arrow.params.len(), 2);
}

#[test]
fn test_arrow_with_member_parameter_is_invalid() {
    let error = parse_error("(a.b) => 1");
    assert_eq!(*error.get_internal(), ErrorImpl::InvalidAssignmentTarget);
}

// ASYNC

#[test]
fn test_async_function_declaration() {
    let program = parse("async function f(){}");

    let Statement::FunctionDeclaration(function) = &program.body[0] else {
        panic!("expected a function declaration");
    };
    assert!(function.is_async);
    assert!(function.is_declaration());
    assert_eq!(function.id.as_ref().map(|id| id.name.as_str()), Some("f"));
}

#[test]
fn test_async_as_identifier() {
    let Expression::Assignment(assignment) = expression("async = 1") else {
        panic!("expected an assignment");
    };

    let Pattern::Identifier(target) = assignment.left.as_ref() else {
        panic!("expected an identifier target");
    };
    assert_eq!(target.name, "async");
}

#[test]
fn test_async_arrow_functions() {
    let Expression::Arrow(arrow) = expression("async (a) => await a") else {
        panic!("expected an async arrow");
    };
    assert!(arrow.is_async);
    assert_eq!(arrow_body_kind(&arrow.body), NodeKind::AwaitExpression);

    let Expression::Arrow(arrow) = expression("async x => x") else {
        panic!("expected an async arrow");
    };
    assert!(arrow.is_async);
}

#[test]
fn test_call_to_function_named_async() {
    let Expression::Call(call) = expression("async(a, b)") else {
        panic!("expected a call");
    };

    assert_eq!(identifier_name(&call.callee), "async");
    assert_eq!(call.arguments.len(), 2);
}

#[test]
fn test_await_is_identifier_outside_async() {
    let program = parse("var await = 1; async function f() { await g(); }");
    assert_eq!(count_kind(&program, NodeKind::AwaitExpression), 1);
}

#[test]
fn test_nested_function_does_not_inherit_async() {
    // `await` inside the inner non-async function is a plain identifier again.
    let program = parse("async function f() { function g() { return await; } }");
    assert_eq!(count_kind(&program, NodeKind::AwaitExpression), 0);
}

// LEFT-HAND SIDE

#[test]
fn test_optional_chain_wrapped_once() {
    let program = parse("a?.b?.c()");
    assert_eq!(count_kind(&program, NodeKind::ChainExpression), 1);

    let Statement::Expression(statement) = &program.body[0] else {
        panic!("expected an expression statement");
    };
    let Expression::Chain(chain) = &statement.expression else {
        panic!("expected the chain at the top");
    };
    assert_eq!(chain.expression.kind(), NodeKind::CallExpression);
}

#[test]
fn test_plain_member_chain_is_not_wrapped() {
    let program = parse("a.b[c](d).e");
    assert_eq!(count_kind(&program, NodeKind::ChainExpression), 0);
    assert_eq!(count_kind(&program, NodeKind::MemberExpression), 3);
}

#[test]
fn test_optional_chain_under_new_is_rejected() {
    let error = parse_error("new a?.b()");
    assert_eq!(error.get_error_name(), "UnexpectedTokenDetailed");
    assert_eq!(error.get_position().index, 5);
}

#[test]
fn test_new_binds_to_member_chain() {
    let Expression::Call(call) = expression("new a.b(1)(2)") else {
        panic!("expected a call of the constructed value");
    };

    let Expression::New(new) = call.callee.as_ref() else {
        panic!("expected a new expression as callee");
    };
    assert_eq!(new.callee.kind(), NodeKind::MemberExpression);
    assert_eq!(new.arguments.len(), 1);
}

#[test]
fn test_new_without_arguments() {
    let Expression::New(new) = expression("new Foo") else {
        panic!("expected a new expression");
    };
    assert!(new.arguments.is_empty());
}

#[test]
fn test_spread_arguments() {
    let Expression::Call(call) = expression("f(a, ...b)") else {
        panic!("expected a call");
    };
    assert!(matches!(call.arguments[1], Argument::Spread(_)));
}

#[test]
fn test_tagged_template() {
    let Expression::TaggedTemplate(tagged) = expression("tag`a${b}c`") else {
        panic!("expected a tagged template");
    };
    assert_eq!(identifier_name(&tagged.tag), "tag");
    assert_eq!(tagged.quasi.quasis.len(), 2);
}

#[test]
fn test_tagged_template_in_optional_chain_is_rejected() {
    assert!(Parser::new("a?.b`c`").parse().is_err());
}

// LITERALS

#[test]
fn test_template_with_object_substitution() {
    let Expression::Template(template) = expression("`a${ {x:1} }b`") else {
        panic!("expected a template literal");
    };

    assert_eq!(template.quasis.len(), 2);
    assert_eq!(template.expressions.len(), 1);
    assert_eq!(template.quasis[0].cooked, "a");
    assert!(!template.quasis[0].tail);
    assert_eq!(template.quasis[1].cooked, "b");
    assert!(template.quasis[1].tail);
    assert_eq!(template.expressions[0].kind(), NodeKind::ObjectExpression);
}

#[test]
fn test_array_holes_and_spread() {
    let Expression::Array(array) = expression("[1, , ...x]") else {
        panic!("expected an array");
    };

    assert_eq!(array.elements.len(), 3);
    assert!(array.elements[1].is_none());
    assert!(matches!(array.elements[2], Some(Argument::Spread(_))));
}

#[test]
fn test_object_members() {
    let Expression::Object(object) = expression("({ a, b: 1, [c]: 2, d() {}, get e() { return 1; }, ...f })") else {
        panic!("expected an object");
    };

    assert_eq!(object.properties.len(), 6);
    let ObjectMember::Property(shorthand) = &object.properties[0] else {
        panic!("expected a property");
    };
    assert!(shorthand.shorthand);
    let ObjectMember::Property(computed) = &object.properties[2] else {
        panic!("expected a property");
    };
    assert!(computed.computed);
    let ObjectMember::Method(method) = &object.properties[3] else {
        panic!("expected a method");
    };
    assert_eq!(method.kind, NodeKind::ObjectMethodDefinition);
    let ObjectMember::Method(getter) = &object.properties[4] else {
        panic!("expected an accessor");
    };
    assert_eq!(getter.kind, NodeKind::ObjectAccessor);
    assert_eq!(getter.method, MethodKind::Get);
    assert!(matches!(object.properties[5], ObjectMember::Spread(_)));
}

#[test]
fn test_modifier_words_as_property_names() {
    let Expression::Object(object) = expression("({ get: 1, set() {}, async: 2 })") else {
        panic!("expected an object");
    };
    assert_eq!(object.properties.len(), 3);
    assert!(matches!(object.properties[1], ObjectMember::Method(_)));
}

// DECLARATIONS & PATTERNS

#[test]
fn test_destructuring_declaration() {
    let program = parse("let {a, b: {c, j}} = dd, b = 100");

    let Statement::VariableDeclaration(declaration) = &program.body[0] else {
        panic!("expected a variable declaration");
    };
    assert_eq!(declaration.keyword, VariableKind::Let);
    assert_eq!(declaration.declarations.len(), 2);

    let Pattern::Object(pattern) = &declaration.declarations[0].id else {
        panic!("expected an object pattern");
    };
    let ObjectPatternMember::Property(nested) = &pattern.properties[1] else {
        panic!("expected a pattern property");
    };
    assert_eq!(nested.value.kind(), NodeKind::ObjectPattern);
    assert!(matches!(declaration.declarations[1].id, Pattern::Identifier(_)));
}

#[test]
fn test_truncated_pattern_errors_at_end_of_input() {
    let source = "let {a, b: {c, j";
    let error = parse_error(source);

    assert_eq!(error.get_position().index, source.len());
    assert!(!error.is_internal());
}

#[test]
fn test_const_requires_initializer() {
    let error = parse_error("const a;");
    assert_eq!(error.get_error_name(), "UnexpectedToken");
}

#[test]
fn test_function_with_defaults_and_rest() {
    let program = parse("function f(a, b = 2, ...c) { return a + b; }");
    let Statement::FunctionDeclaration(function) = &program.body[0] else {
        panic!("expected a function declaration");
    };

    assert_eq!(function.params.len(), 3);
    assert_eq!(function.params[1].kind(), NodeKind::AssignmentPattern);
    assert_eq!(function.params[2].kind(), NodeKind::RestElement);
}

#[test]
fn test_rest_parameter_must_be_last() {
    assert!(Parser::new("function f(...a, b) {}").parse().is_err());
}

#[test]
fn test_generator_and_yield() {
    let program = parse("function* g() { yield 1; yield* other(); yield; }");
    assert_eq!(count_kind(&program, NodeKind::YieldExpression), 3);

    let Statement::FunctionDeclaration(function) = &program.body[0] else {
        panic!("expected a function declaration");
    };
    assert!(function.is_generator);
}

#[test]
fn test_destructuring_assignment() {
    let Expression::Assignment(assignment) = expression("[a, b.c] = [1, 2]") else {
        panic!("expected an assignment");
    };
    let Pattern::Array(pattern) = assignment.left.as_ref() else {
        panic!("expected an array pattern");
    };
    assert!(matches!(pattern.elements[1], Some(Pattern::Member(_))));
}

// STATEMENTS

#[test]
fn test_control_flow_statements() {
    let program = parse(
        "if (a) b(); else { c(); }\n\
         while (x) x--;\n\
         do { y++ } while (y < 10)\n\
         for (let i = 0; i < 10; i++) {}\n\
         for (;;) break;\n\
         switch (k) { case 1: f(); break; default: g(); }\n\
         try { risky(); } catch (e) { handle(e); } finally { done(); }\n\
         try {} catch {}\n\
         outer: for (;;) { continue outer; }\n\
         debugger;\n\
         ;",
    );

    let kinds: Vec<NodeKind> = program.iter().map(|statement| statement.kind()).collect();
    assert_eq!(
        kinds,
        vec![
            NodeKind::IfStatement,
            NodeKind::WhileStatement,
            NodeKind::DoWhileStatement,
            NodeKind::ForStatement,
            NodeKind::ForStatement,
            NodeKind::SwitchStatement,
            NodeKind::TryStatement,
            NodeKind::TryStatement,
            NodeKind::LabeledStatement,
            NodeKind::DebuggerStatement,
            NodeKind::EmptyStatement,
        ]
    );
}

#[test]
fn test_for_in_and_for_of() {
    let program = parse("for (const k in obj) {} for (x of xs) {} for ([a, b] of pairs) {}");

    let Statement::ForIn(for_in) = &program.body[0] else {
        panic!("expected for-in");
    };
    assert!(matches!(for_in.left, ForTarget::VariableDeclaration(_)));

    let Statement::ForOf(for_of) = &program.body[1] else {
        panic!("expected for-of");
    };
    assert!(matches!(for_of.left, ForTarget::Pattern(Pattern::Identifier(_))));

    let Statement::ForOf(destructured) = &program.body[2] else {
        panic!("expected for-of");
    };
    assert!(matches!(destructured.left, ForTarget::Pattern(Pattern::Array(_))));
}

#[test]
fn test_in_operator_inside_for_head_parentheses() {
    let program = parse("for (var i = (a in b); i; ) {}");
    assert_eq!(program.body[0].kind(), NodeKind::ForStatement);
}

#[test]
fn test_switch_with_two_defaults_is_rejected() {
    assert!(Parser::new("switch (a) { default: default: }").parse().is_err());
}

#[test]
fn test_try_without_handler_is_rejected() {
    assert!(Parser::new("try {}").parse().is_err());
}

#[test]
fn test_unterminated_block() {
    let error = parse_error("function f() { return 1;");
    assert_eq!(error.get_position().index, 24);
}

// AUTOMATIC SEMICOLON INSERTION

#[test]
fn test_statements_separated_by_line_breaks() {
    let program = parse("let a = 1\nlet b = 2\na + b");
    assert_eq!(program.body.len(), 3);
}

#[test]
fn test_missing_semicolon_on_same_line() {
    let error = parse_error("let a = 1 let b = 2");
    assert_eq!(error.get_position().index, 10);
}

#[test]
fn test_return_argument_does_not_cross_line_break() {
    let program = parse("function f() { return\n42 }");
    let Statement::FunctionDeclaration(function) = &program.body[0] else {
        panic!("expected a function declaration");
    };

    assert_eq!(function.body.body.len(), 2);
    let Statement::Return(statement) = &function.body.body[0] else {
        panic!("expected a return statement");
    };
    assert!(statement.argument.is_none());
}

#[test]
fn test_postfix_update_does_not_cross_line_break() {
    let program = parse("a\n++b");
    assert_eq!(program.body.len(), 2);

    let Statement::Expression(second) = &program.body[1] else {
        panic!("expected an expression statement");
    };
    let Expression::Update(update) = &second.expression else {
        panic!("expected an update expression");
    };
    assert!(update.prefix);
}

#[test]
fn test_throw_rejects_line_break() {
    assert!(Parser::new("throw\nerror").parse().is_err());
}

#[test]
fn test_break_label_does_not_cross_line_break() {
    let program = parse("loop: for (;;) { break\nloop }");
    assert_eq!(count_kind(&program, NodeKind::BreakStatement), 1);
    assert_eq!(count_kind(&program, NodeKind::ExpressionStatement), 1);
}

#[test]
fn test_async_before_line_break_is_identifier() {
    let program = parse("async\nfunction f() {}");
    assert_eq!(program.body.len(), 2);
    assert_eq!(program.body[0].kind(), NodeKind::ExpressionStatement);
    assert_eq!(program.body[1].kind(), NodeKind::FunctionDeclaration);
}

// CLASSES

#[test]
fn test_class_members() {
    let program = parse(
        "class A extends B {\n\
           #count = 0;\n\
           static instances;\n\
           constructor(x) { super(x); }\n\
           get count() { return this.#count; }\n\
           set count(value) { this.#count = value; }\n\
           static async *items() {}\n\
           has(o) { return #count in o; }\n\
         }",
    );

    let Statement::ClassDeclaration(class) = &program.body[0] else {
        panic!("expected a class declaration");
    };
    assert!(class.is_declaration());
    assert!(class.super_class.is_some());

    let kinds: Vec<NodeKind> = class
        .body
        .body
        .iter()
        .map(|element| match element {
            ClassElement::Method(method) => method.kind,
            ClassElement::Property(_) => NodeKind::ClassProperty,
        })
        .collect();
    assert_eq!(
        kinds,
        vec![
            NodeKind::ClassProperty,
            NodeKind::ClassProperty,
            NodeKind::ClassConstructor,
            NodeKind::ClassAccessor,
            NodeKind::ClassAccessor,
            NodeKind::ClassMethodDefinition,
            NodeKind::ClassMethodDefinition,
        ]
    );

    let ClassElement::Method(items) = &class.body.body[5] else {
        panic!("expected a method");
    };
    assert!(items.is_static);
    assert!(items.value.is_async);
    assert!(items.value.is_generator);
}

#[test]
fn test_constructor_only_special_in_classes() {
    let Expression::Object(object) = expression("({ constructor() {} })") else {
        panic!("expected an object");
    };
    let ObjectMember::Method(method) = &object.properties[0] else {
        panic!("expected a method");
    };
    assert_eq!(method.kind, NodeKind::ObjectMethodDefinition);
    assert_eq!(method.method, MethodKind::Method);
}

#[test]
fn test_string_named_constructor() {
    let program = parse("class A { 'constructor'() {} ['constructor']() {} }");
    let Statement::ClassDeclaration(class) = &program.body[0] else {
        panic!("expected a class declaration");
    };

    let kinds: Vec<NodeKind> = class
        .body
        .body
        .iter()
        .map(|element| match element {
            ClassElement::Method(method) => method.kind,
            ClassElement::Property(_) => NodeKind::ClassProperty,
        })
        .collect();
    assert_eq!(kinds, vec![NodeKind::ClassConstructor, NodeKind::ClassMethodDefinition]);
}

#[test]
fn test_static_constructor_is_a_method() {
    let program = parse("class A { static constructor() {} }");
    let Statement::ClassDeclaration(class) = &program.body[0] else {
        panic!("expected a class declaration");
    };
    let ClassElement::Method(method) = &class.body.body[0] else {
        panic!("expected a method");
    };
    assert_eq!(method.kind, NodeKind::ClassMethodDefinition);
}

#[test]
fn test_invalid_member_modifiers() {
    for source in [
        "class A { async get x() {} }",
        "class A { get *x() {} }",
        "class A { get x(a) {} }",
        "class A { set x() {} }",
        "class A { async constructor() {} }",
        "({ get x(a) {} })",
    ] {
        let error = parse_error(source);
        assert_eq!(error.get_error_name(), "InvalidModifiers", "{}", source);
    }
}

#[test]
fn test_private_name_outside_class_is_rejected() {
    assert!(Parser::new("a.#b").parse().is_err());
}

#[test]
fn test_anonymous_class_expression() {
    let Expression::Class(class) = expression("(class {})") else {
        panic!("expected a class expression");
    };
    assert!(class.id.is_none());
    assert!(!class.is_declaration());
}

#[test]
fn test_super_requires_access() {
    assert!(Parser::new("class A extends B { m() { super; } }").parse().is_err());
}

// MODULES

#[test]
fn test_import_forms() {
    let program = parse(
        "import 'side-effect';\n\
         import a from 'a';\n\
         import * as ns from 'ns';\n\
         import { b, c as d } from 'bc';\n\
         import e, * as f from 'ef';\n\
         import g, { h } from 'gh';",
    );

    let specifier_counts: Vec<usize> = program
        .iter()
        .map(|statement| match statement {
            Statement::ImportDeclaration(import) => import.specifiers.len(),
            other => panic!("expected an import, got {:?}", other),
        })
        .collect();
    assert_eq!(specifier_counts, vec![0, 1, 1, 2, 2, 2]);

    let Statement::ImportDeclaration(named) = &program.body[3] else {
        panic!("expected an import");
    };
    let ImportClause::Named(renamed) = &named.specifiers[1] else {
        panic!("expected a named specifier");
    };
    assert_eq!(renamed.imported.name, "c");
    assert_eq!(renamed.local.name, "d");
    assert_eq!(named.source.value, "bc");
}

#[test]
fn test_export_forms() {
    let program = parse(
        "export const a = 1;\n\
         export function f() {}\n\
         export async function g() {}\n\
         export class C {}\n\
         export { a as b, f };\n\
         export { x } from 'x';\n\
         export * from 'all';\n\
         export * as ns from 'ns';\n\
         export default function () {}",
    );

    let kinds: Vec<NodeKind> = program.iter().map(|statement| statement.kind()).collect();
    assert_eq!(
        kinds,
        vec![
            NodeKind::ExportNamedDeclaration,
            NodeKind::ExportNamedDeclaration,
            NodeKind::ExportNamedDeclaration,
            NodeKind::ExportNamedDeclaration,
            NodeKind::ExportNamedDeclaration,
            NodeKind::ExportNamedDeclaration,
            NodeKind::ExportAllDeclaration,
            NodeKind::ExportAllDeclaration,
            NodeKind::ExportDefaultDeclaration,
        ]
    );

    let Statement::ExportDefaultDeclaration(default) = &program.body[8] else {
        panic!("expected a default export");
    };
    let ExportDefaultKind::Function(function) = &default.declaration else {
        panic!("expected a default function");
    };
    assert!(function.id.is_none());
    assert!(function.is_declaration());
}

#[test]
fn test_export_default_expression() {
    let program = parse("export default a + b;");
    let Statement::ExportDefaultDeclaration(default) = &program.body[0] else {
        panic!("expected a default export");
    };
    assert!(matches!(
        default.declaration,
        ExportDefaultKind::Expression(Expression::Binary(_))
    ));
}

#[test]
fn test_import_outside_top_level_is_rejected() {
    let error = parse_error("function f() { import a from 'a'; }");
    assert_eq!(error.get_error_name(), "UnexpectedTokenDetailed");

    assert!(Parser::new("{ export const a = 1; }").parse().is_err());
}

// SPANS

#[test]
fn test_program_and_statement_spans() {
    let source = "let x = 1;\nfoo(x);";
    let program = parse(source);

    assert_eq!(program.span.start.index, 0);
    assert_eq!(program.span.end.index, source.len());
    assert_eq!(program.body[0].get_span().end.index, 10);
    assert_eq!(program.body[1].get_span().start.row, 2);
}

#[test]
fn test_binary_span_covers_operands() {
    let Expression::Binary(binary) = expression("  a   *   b  ") else {
        panic!("expected a binary expression");
    };
    assert_eq!(binary.span.start.index, 2);
    assert_eq!(binary.span.end.index, 11);
}

// NESTING

/// Runs `check` on a thread whose stack fits the deepest accepted nesting
/// in an unoptimized build.
fn with_large_stack(check: impl FnOnce() + Send + 'static) {
    let handle = std::thread::Builder::new()
        .stack_size(256 * 1024 * 1024)
        .spawn(check)
        .unwrap();
    if let Err(panic) = handle.join() {
        std::panic::resume_unwind(panic);
    }
}

fn nested_source(open: &str, inner: &str, close: &str, depth: usize) -> String {
    format!("{}{}{}", open.repeat(depth), inner, close.repeat(depth))
}

#[test]
fn test_nesting_beyond_limit_is_rejected() {
    with_large_stack(|| {
        let depth = MAX_DEPTH * 2;
        for source in [
            nested_source("(", "1", ")", depth) + ";",
            nested_source("[", "1", "]", depth) + ";",
            nested_source("{", "", "}", depth),
            nested_source("({ a: ", "1", " })", depth) + ";",
            "!".repeat(depth) + "a;",
            "a = ".repeat(depth) + "1;",
            nested_source("if (a) ", "b;", "", depth),
            nested_source("function f() { ", "", " }", depth),
        ] {
            let error = parse_error(&source);
            assert_eq!(
                error.get_internal(),
                &ErrorImpl::NestingTooDeep { limit: MAX_DEPTH },
                "source starts with {:?}",
                &source[..8]
            );
        }
    });
}

#[test]
fn test_nested_patterns_beyond_limit_are_rejected() {
    with_large_stack(|| {
        let source = format!("let {} = a;", nested_source("[", "x", "]", MAX_DEPTH * 2));
        let error = parse_error(&source);
        assert_eq!(error.get_error_name(), "NestingTooDeep");
        assert!(!error.is_lexical());
    });
}

#[test]
fn test_moderate_nesting_parses() {
    with_large_stack(|| {
        let depth = MAX_DEPTH / 4;
        let program = parse(&(nested_source("(", "1", ")", depth) + ";"));
        assert_eq!(program.body.len(), 1);

        let program = parse(&(nested_source("[", "1", "]", depth) + ";"));
        assert_eq!(count_kind(&program, NodeKind::ArrayExpression), depth);

        let program = parse(&nested_source("{", "a;", "}", depth));
        assert_eq!(count_kind(&program, NodeKind::BlockStatement), depth);
    });
}

#[test]
fn test_long_operator_chains_are_not_nesting() {
    with_large_stack(|| {
        let length = MAX_DEPTH * 40;
        let source = vec!["1"; length].join(" + ") + ";";
        let program = parse(&source);
        assert_eq!(count_kind(&program, NodeKind::BinaryExpression), length - 1);

        let source = vec!["a"; length].join(".") + ";";
        let program = parse(&source);
        assert_eq!(count_kind(&program, NodeKind::MemberExpression), length - 1);
    });
}
