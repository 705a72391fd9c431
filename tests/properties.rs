//! Property tests over generated programs.

use proptest::prelude::*;

use jsparse::{
    ast::{
        ast::{Expression, NodeKind, Statement},
        visitor::{walk, NodeRef, Visitor},
    },
    parse_program,
};

// ===================
// Strategies
// ===================

/// Identifiers carry a `v_` prefix so they never collide with a keyword.
fn identifier_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9]{0,6}".prop_map(|name| format!("v_{name}"))
}

fn operator_strategy() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec![
        "+", "-", "*", "/", "%", "**", "<", ">", "<=", ">=", "==", "!=", "===", "!==", "&", "|",
        "^", "<<", ">>", ">>>", "&&", "||",
    ])
}

/// An infix expression paired with the number of operators it contains.
fn expression_strategy() -> impl Strategy<Value = (String, usize)> {
    let leaf = prop_oneof![
        (0u32..100000).prop_map(|value| (value.to_string(), 0)),
        identifier_strategy().prop_map(|name| (name, 0)),
    ];

    leaf.prop_recursive(5, 48, 2, |inner| {
        prop_oneof![
            (inner.clone(), operator_strategy(), inner.clone()).prop_map(
                |((left, left_count), operator, (right, right_count))| {
                    (format!("{left} {operator} {right}"), left_count + right_count + 1)
                }
            ),
            inner.prop_map(|(expression, count)| (format!("({expression})"), count)),
        ]
    })
}

// ===================
// Property Test Functions
// ===================

#[derive(Default)]
struct OperatorCounter {
    operators: usize,
}

impl<'a> Visitor<'a> for OperatorCounter {
    fn enter(&mut self, node: NodeRef<'a>) {
        if matches!(node.kind(), NodeKind::BinaryExpression | NodeKind::LogicalExpression) {
            self.operators += 1;
        }
    }
}

/// Children lie inside their parent and follow each other without overlap.
fn check_span_order(node: NodeRef<'_>) -> Result<(), TestCaseError> {
    let span = node.span();
    prop_assert!(span.start.index <= span.end.index);

    let children = node.children();
    for pair in children.windows(2) {
        prop_assert!(
            pair[0].span().end.index <= pair[1].span().start.index,
            "{} overlaps {}",
            pair[0].kind(),
            pair[1].kind()
        );
    }
    for child in children {
        prop_assert!(span.contains(child.span()), "{} escapes {}", child.kind(), node.kind());
        check_span_order(child)?;
    }
    Ok(())
}

/// Every generated expression parses into exactly one node per operator;
/// parentheses add none.
fn check_expression_parses(source: &str, operators: usize) -> Result<(), TestCaseError> {
    let program = parse_program(&format!("{source};"));
    let program = match program {
        Ok(program) => program,
        Err(err) => return Err(TestCaseError::fail(format!("`{source}` failed: {err}"))),
    };

    prop_assert_eq!(program.body.len(), 1);
    let mut counter = OperatorCounter::default();
    walk(NodeRef::Program(&program), &mut counter);
    prop_assert_eq!(counter.operators, operators);

    check_span_order(NodeRef::Program(&program))
}

/// Declarations on separate lines need no semicolons.
fn check_line_separated_statements(lines: &[(String, String)]) -> Result<(), TestCaseError> {
    let source = lines
        .iter()
        .map(|(name, expression)| format!("let {name} = {expression}"))
        .collect::<Vec<_>>()
        .join("\n");

    let program = parse_program(&source);
    prop_assert!(program.is_ok(), "`{}` failed: {:?}", source, program.as_ref().err());
    let program = program.unwrap();

    prop_assert_eq!(program.body.len(), lines.len());
    for statement in &program.body {
        prop_assert!(matches!(statement, Statement::VariableDeclaration(_)));
    }
    Ok(())
}

fn check_string_value(text: &str) -> Result<(), TestCaseError> {
    let program = parse_program(&format!("'{text}';")).unwrap();
    let Statement::Expression(statement) = &program.body[0] else {
        return Err(TestCaseError::fail("expected an expression statement"));
    };
    let Expression::String(literal) = &statement.expression else {
        return Err(TestCaseError::fail("expected a string literal"));
    };

    prop_assert_eq!(&literal.value, text);
    prop_assert_eq!(&literal.raw, &format!("'{text}'"));
    Ok(())
}

fn check_number_value(value: u32) -> Result<(), TestCaseError> {
    let program = parse_program(&format!("{value};")).unwrap();
    let Statement::Expression(statement) = &program.body[0] else {
        return Err(TestCaseError::fail("expected an expression statement"));
    };
    let Expression::Number(literal) = &statement.expression else {
        return Err(TestCaseError::fail("expected a number literal"));
    };

    prop_assert_eq!(literal.value, value as f64);
    Ok(())
}

fn check_serialization_is_stable(source: &str) -> Result<(), TestCaseError> {
    let first = serde_json::to_string(&parse_program(source).unwrap()).unwrap();
    let second = serde_json::to_string(&parse_program(source).unwrap()).unwrap();
    prop_assert_eq!(first, second);
    Ok(())
}

// ===================
// Proptest Wrappers
// ===================

proptest! {
    #[test]
    fn expressions_parse((source, operators) in expression_strategy()) {
        check_expression_parses(&source, operators)?;
    }

    #[test]
    fn line_separated_statements(
        lines in prop::collection::vec(
            (identifier_strategy(), expression_strategy().prop_map(|(source, _)| source)),
            1..6,
        )
    ) {
        check_line_separated_statements(&lines)?;
    }

    #[test]
    fn string_values(text in "[a-zA-Z0-9 _]{0,24}") {
        check_string_value(&text)?;
    }

    #[test]
    fn number_values(value in any::<u32>()) {
        check_number_value(value)?;
    }

    #[test]
    fn serialization_is_stable((source, _) in expression_strategy()) {
        check_serialization_is_stable(&format!("let v = {source};"))?;
    }
}
