use crate::{ast::ast::NodeKind, parse_program};

use super::binder::{bind, NodeId};

#[test]
fn test_program_is_root() {
    let program = parse_program("let a = 1;").unwrap();
    let table = bind(&program);

    let root = table.node(NodeId(0)).unwrap();
    assert_eq!(root.kind, NodeKind::Program);
    assert_eq!(root.parent, None);
    assert_eq!(table.parent_of(NodeId(0)), None);
}

#[test]
fn test_preorder_ids_and_parents() {
    // Program > VariableDeclaration > VariableDeclarator > (Identifier, NumberLiteral)
    let program = parse_program("let a = 1;").unwrap();
    let table = bind(&program);

    let kinds: Vec<NodeKind> = table.iter().map(|(_, node)| node.kind).collect();
    assert_eq!(
        kinds,
        vec![
            NodeKind::Program,
            NodeKind::VariableDeclaration,
            NodeKind::VariableDeclarator,
            NodeKind::Identifier,
            NodeKind::NumberLiteral,
        ]
    );

    assert_eq!(table.parent_of(NodeId(1)), Some(NodeId(0)));
    assert_eq!(table.parent_of(NodeId(2)), Some(NodeId(1)));
    assert_eq!(table.parent_of(NodeId(3)), Some(NodeId(2)));
    assert_eq!(table.parent_of(NodeId(4)), Some(NodeId(2)));
}

#[test]
fn test_ancestors_reach_program() {
    let program = parse_program("function f() { return a + b; }").unwrap();
    let table = bind(&program);

    let (deepest, _) = table
        .iter()
        .filter(|(_, node)| node.kind == NodeKind::Identifier)
        .last()
        .unwrap();
    let ancestors = table.ancestors(deepest);

    assert_eq!(ancestors.last(), Some(&NodeId(0)));
    let kinds: Vec<NodeKind> = ancestors
        .iter()
        .map(|id| table.node(*id).unwrap().kind)
        .collect();
    assert_eq!(kinds[0], NodeKind::BinaryExpression);
    assert!(kinds.contains(&NodeKind::ReturnStatement));
    assert!(kinds.contains(&NodeKind::FunctionDeclaration));
}

#[test]
fn test_every_child_span_within_parent() {
    let source = "class A { m(x = [1, 2]) { return `${x}`; } }\nfor (const k of A) label: { break label; }";
    let program = parse_program(source).unwrap();
    let table = bind(&program);

    for (id, node) in table.iter() {
        if let Some(parent) = table.parent_of(id) {
            let parent = table.node(parent).unwrap();
            assert!(
                parent.span.contains(&node.span),
                "{:?} {:?} escapes {:?} {:?}",
                node.kind,
                node.span,
                parent.kind,
                parent.span
            );
        }
    }
}

#[test]
fn test_binding_is_repeatable() {
    let program = parse_program("a?.b(c, ...d);").unwrap();

    let first = bind(&program);
    let second = bind(&program);

    assert_eq!(first, second);
    assert!(!first.is_empty());
    assert_eq!(first.len(), second.len());
}

#[test]
fn test_shorthand_default_binds_name_once() {
    let program = parse_program("({ a = 1 });").unwrap();
    let table = bind(&program);

    let kinds: Vec<NodeKind> = table.iter().map(|(_, node)| node.kind).collect();
    assert_eq!(
        kinds,
        vec![
            NodeKind::Program,
            NodeKind::ExpressionStatement,
            NodeKind::ObjectExpression,
            NodeKind::Property,
            NodeKind::AssignmentExpression,
            NodeKind::Identifier,
            NodeKind::NumberLiteral,
        ]
    );
    assert_eq!(table.parent_of(NodeId(5)), Some(NodeId(4)));
}
