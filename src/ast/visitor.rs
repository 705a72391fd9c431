//! Generic tree traversal.
//!
//! [`NodeRef`] is a borrowed view of any node. [`walk`] drives a depth-first,
//! pre-order traversal calling [`Visitor::enter`] before a node's children and
//! [`Visitor::leave`] after them. Children are visited in the order their
//! fields are declared; absent optional children and array holes are skipped.

use crate::Span;

use super::{
    ast::{Expression, NodeKind, Pattern, Statement},
    declarations::{
        Class, ClassBody, ClassElement, ClassProperty, ExportDefaultKind, ExportSpecifier, Function,
        ImportClause, MethodDefinition, VariableDeclaration, VariableDeclarator,
    },
    expressions::{
        Argument, ArrowBody, Identifier, ObjectMember, ObjectProperty, SpreadElement,
        StringLiteral, TemplateElement, TemplateLiteral,
    },
    patterns::{ObjectPatternMember, ObjectPatternProperty, RestElement},
    statements::{BlockStatement, CatchClause, ForInit, ForTarget, Program, SwitchCase},
};

#[derive(Debug, Clone, Copy)]
pub enum NodeRef<'a> {
    Program(&'a Program),
    Statement(&'a Statement),
    Expression(&'a Expression),
    Pattern(&'a Pattern),
    Identifier(&'a Identifier),
    StringLiteral(&'a StringLiteral),
    Template(&'a TemplateLiteral),
    TemplateElement(&'a TemplateElement),
    Spread(&'a SpreadElement),
    Property(&'a ObjectProperty),
    Method(&'a MethodDefinition),
    Function(&'a Function),
    Class(&'a Class),
    ClassBody(&'a ClassBody),
    ClassProperty(&'a ClassProperty),
    Block(&'a BlockStatement),
    SwitchCase(&'a SwitchCase),
    CatchClause(&'a CatchClause),
    VariableDeclaration(&'a VariableDeclaration),
    VariableDeclarator(&'a VariableDeclarator),
    PatternProperty(&'a ObjectPatternProperty),
    Rest(&'a RestElement),
    ImportClause(&'a ImportClause),
    ExportSpecifier(&'a ExportSpecifier),
}

impl<'a> NodeRef<'a> {
    pub fn kind(&self) -> NodeKind {
        match self {
            NodeRef::Program(_) => NodeKind::Program,
            NodeRef::Statement(statement) => statement.kind(),
            NodeRef::Expression(expression) => expression.kind(),
            NodeRef::Pattern(pattern) => pattern.kind(),
            NodeRef::Identifier(_) => NodeKind::Identifier,
            NodeRef::StringLiteral(_) => NodeKind::StringLiteral,
            NodeRef::Template(_) => NodeKind::TemplateLiteral,
            NodeRef::TemplateElement(_) => NodeKind::TemplateElement,
            NodeRef::Spread(_) => NodeKind::SpreadElement,
            NodeRef::Property(_) => NodeKind::Property,
            NodeRef::Method(method) => method.kind,
            NodeRef::Function(function) => function.kind,
            NodeRef::Class(class) => class.kind,
            NodeRef::ClassBody(_) => NodeKind::ClassBody,
            NodeRef::ClassProperty(_) => NodeKind::ClassProperty,
            NodeRef::Block(_) => NodeKind::BlockStatement,
            NodeRef::SwitchCase(_) => NodeKind::SwitchCase,
            NodeRef::CatchClause(_) => NodeKind::CatchClause,
            NodeRef::VariableDeclaration(_) => NodeKind::VariableDeclaration,
            NodeRef::VariableDeclarator(_) => NodeKind::VariableDeclarator,
            NodeRef::PatternProperty(_) => NodeKind::ObjectPatternProperty,
            NodeRef::Rest(_) => NodeKind::RestElement,
            NodeRef::ImportClause(ImportClause::Default(_)) => NodeKind::ImportDefaultSpecifier,
            NodeRef::ImportClause(ImportClause::Namespace(_)) => NodeKind::ImportNamespaceSpecifier,
            NodeRef::ImportClause(ImportClause::Named(_)) => NodeKind::ImportSpecifier,
            NodeRef::ExportSpecifier(_) => NodeKind::ExportSpecifier,
        }
    }

    pub fn span(&self) -> &'a Span {
        match *self {
            NodeRef::Program(node) => &node.span,
            NodeRef::Statement(node) => node.get_span(),
            NodeRef::Expression(node) => node.get_span(),
            NodeRef::Pattern(node) => node.get_span(),
            NodeRef::Identifier(node) => &node.span,
            NodeRef::StringLiteral(node) => &node.span,
            NodeRef::Template(node) => &node.span,
            NodeRef::TemplateElement(node) => &node.span,
            NodeRef::Spread(node) => &node.span,
            NodeRef::Property(node) => &node.span,
            NodeRef::Method(node) => &node.span,
            NodeRef::Function(node) => &node.span,
            NodeRef::Class(node) => &node.span,
            NodeRef::ClassBody(node) => &node.span,
            NodeRef::ClassProperty(node) => &node.span,
            NodeRef::Block(node) => &node.span,
            NodeRef::SwitchCase(node) => &node.span,
            NodeRef::CatchClause(node) => &node.span,
            NodeRef::VariableDeclaration(node) => &node.span,
            NodeRef::VariableDeclarator(node) => &node.span,
            NodeRef::PatternProperty(node) => &node.span,
            NodeRef::Rest(node) => &node.span,
            NodeRef::ImportClause(ImportClause::Default(node)) => &node.span,
            NodeRef::ImportClause(ImportClause::Namespace(node)) => &node.span,
            NodeRef::ImportClause(ImportClause::Named(node)) => &node.span,
            NodeRef::ExportSpecifier(node) => &node.span,
        }
    }

    /// The direct children of this node, in field order.
    pub fn children(&self) -> Vec<NodeRef<'a>> {
        let mut children = Vec::new();
        match *self {
            NodeRef::Program(program) => {
                children.extend(program.body.iter().map(NodeRef::Statement));
            }
            NodeRef::Statement(statement) => statement_children(statement, &mut children),
            NodeRef::Expression(expression) => expression_children(expression, &mut children),
            NodeRef::Pattern(pattern) => pattern_children(pattern, &mut children),
            NodeRef::Identifier(_) | NodeRef::StringLiteral(_) | NodeRef::TemplateElement(_) => {}
            NodeRef::Template(template) => template_children(template, &mut children),
            NodeRef::Spread(spread) => children.push(NodeRef::Expression(&spread.argument)),
            NodeRef::Property(property) => match (&property.value, property.shorthand) {
                // `{ a = 1 }` holds the name once, as the assignment's target.
                (Expression::Assignment(_), true) => {
                    children.push(NodeRef::Expression(&property.value))
                }
                // `{ a }` shares one name between key and value.
                (_, true) => children.push(NodeRef::Expression(&property.key)),
                (_, false) => {
                    children.push(NodeRef::Expression(&property.key));
                    children.push(NodeRef::Expression(&property.value));
                }
            },
            NodeRef::Method(method) => {
                children.push(NodeRef::Expression(&method.key));
                children.push(NodeRef::Function(&method.value));
            }
            NodeRef::Function(function) => function_children(function, &mut children),
            NodeRef::Class(class) => class_children(class, &mut children),
            NodeRef::ClassBody(body) => {
                for element in &body.body {
                    children.push(match element {
                        ClassElement::Method(method) => NodeRef::Method(method),
                        ClassElement::Property(property) => NodeRef::ClassProperty(property),
                    });
                }
            }
            NodeRef::ClassProperty(property) => {
                children.push(NodeRef::Expression(&property.key));
                if let Some(value) = &property.value {
                    children.push(NodeRef::Expression(value));
                }
            }
            NodeRef::Block(block) => children.extend(block.body.iter().map(NodeRef::Statement)),
            NodeRef::SwitchCase(case) => {
                if let Some(test) = &case.test {
                    children.push(NodeRef::Expression(test));
                }
                children.extend(case.consequent.iter().map(NodeRef::Statement));
            }
            NodeRef::CatchClause(clause) => {
                if let Some(param) = &clause.param {
                    children.push(NodeRef::Pattern(param));
                }
                children.push(NodeRef::Block(&clause.body));
            }
            NodeRef::VariableDeclaration(declaration) => {
                children.extend(declaration.declarations.iter().map(NodeRef::VariableDeclarator));
            }
            NodeRef::VariableDeclarator(declarator) => {
                children.push(NodeRef::Pattern(&declarator.id));
                if let Some(init) = &declarator.init {
                    children.push(NodeRef::Expression(init));
                }
            }
            NodeRef::PatternProperty(property) => {
                if !property.shorthand {
                    children.push(NodeRef::Expression(&property.key));
                }
                children.push(NodeRef::Pattern(&property.value));
            }
            NodeRef::Rest(rest) => children.push(NodeRef::Pattern(&rest.argument)),
            NodeRef::ImportClause(ImportClause::Named(specifier)) => {
                // `import { a }` reuses one name for both sides.
                if specifier.imported.span != specifier.local.span {
                    children.push(NodeRef::Identifier(&specifier.imported));
                }
                children.push(NodeRef::Identifier(&specifier.local));
            }
            NodeRef::ImportClause(clause) => children.push(NodeRef::Identifier(clause.local())),
            NodeRef::ExportSpecifier(specifier) => {
                children.push(NodeRef::Identifier(&specifier.local));
                if specifier.exported.span != specifier.local.span {
                    children.push(NodeRef::Identifier(&specifier.exported));
                }
            }
        }
        children
    }
}

fn statement_children<'a>(statement: &'a Statement, children: &mut Vec<NodeRef<'a>>) {
    match statement {
        Statement::Expression(node) => children.push(NodeRef::Expression(&node.expression)),
        Statement::Block(node) => children.extend(node.body.iter().map(NodeRef::Statement)),
        Statement::Empty(_) | Statement::Debugger(_) => {}
        Statement::Return(node) => {
            if let Some(argument) = &node.argument {
                children.push(NodeRef::Expression(argument));
            }
        }
        Statement::Labeled(node) => {
            children.push(NodeRef::Identifier(&node.label));
            children.push(NodeRef::Statement(&node.body));
        }
        Statement::Break(node) => children.extend(node.label.as_ref().map(NodeRef::Identifier)),
        Statement::Continue(node) => children.extend(node.label.as_ref().map(NodeRef::Identifier)),
        Statement::If(node) => {
            children.push(NodeRef::Expression(&node.test));
            children.push(NodeRef::Statement(&node.consequent));
            if let Some(alternate) = &node.alternate {
                children.push(NodeRef::Statement(alternate));
            }
        }
        Statement::Switch(node) => {
            children.push(NodeRef::Expression(&node.discriminant));
            children.extend(node.cases.iter().map(NodeRef::SwitchCase));
        }
        Statement::Throw(node) => children.push(NodeRef::Expression(&node.argument)),
        Statement::Try(node) => {
            children.push(NodeRef::Block(&node.block));
            children.extend(node.handler.as_ref().map(NodeRef::CatchClause));
            children.extend(node.finalizer.as_ref().map(NodeRef::Block));
        }
        Statement::While(node) => {
            children.push(NodeRef::Expression(&node.test));
            children.push(NodeRef::Statement(&node.body));
        }
        Statement::DoWhile(node) => {
            children.push(NodeRef::Statement(&node.body));
            children.push(NodeRef::Expression(&node.test));
        }
        Statement::For(node) => {
            match &node.init {
                Some(ForInit::VariableDeclaration(declaration)) => {
                    children.push(NodeRef::VariableDeclaration(declaration))
                }
                Some(ForInit::Expression(expression)) => children.push(NodeRef::Expression(expression)),
                None => {}
            }
            children.extend(node.test.as_ref().map(NodeRef::Expression));
            children.extend(node.update.as_ref().map(NodeRef::Expression));
            children.push(NodeRef::Statement(&node.body));
        }
        Statement::ForIn(node) => {
            for_target_child(&node.left, children);
            children.push(NodeRef::Expression(&node.right));
            children.push(NodeRef::Statement(&node.body));
        }
        Statement::ForOf(node) => {
            for_target_child(&node.left, children);
            children.push(NodeRef::Expression(&node.right));
            children.push(NodeRef::Statement(&node.body));
        }
        Statement::VariableDeclaration(node) => {
            children.extend(node.declarations.iter().map(NodeRef::VariableDeclarator));
        }
        Statement::FunctionDeclaration(function) => function_children(function, children),
        Statement::ClassDeclaration(class) => class_children(class, children),
        Statement::ImportDeclaration(node) => {
            children.extend(node.specifiers.iter().map(NodeRef::ImportClause));
            children.push(NodeRef::StringLiteral(&node.source));
        }
        Statement::ExportNamedDeclaration(node) => {
            if let Some(declaration) = &node.declaration {
                children.push(NodeRef::Statement(declaration));
            }
            children.extend(node.specifiers.iter().map(NodeRef::ExportSpecifier));
            children.extend(node.source.as_ref().map(NodeRef::StringLiteral));
        }
        Statement::ExportDefaultDeclaration(node) => children.push(match &node.declaration {
            ExportDefaultKind::Function(function) => NodeRef::Function(function),
            ExportDefaultKind::Class(class) => NodeRef::Class(class),
            ExportDefaultKind::Expression(expression) => NodeRef::Expression(expression),
        }),
        Statement::ExportAllDeclaration(node) => {
            children.extend(node.exported.as_ref().map(NodeRef::Identifier));
            children.push(NodeRef::StringLiteral(&node.source));
        }
    }
}

fn for_target_child<'a>(target: &'a ForTarget, children: &mut Vec<NodeRef<'a>>) {
    children.push(match target {
        ForTarget::VariableDeclaration(declaration) => NodeRef::VariableDeclaration(declaration),
        ForTarget::Pattern(pattern) => NodeRef::Pattern(pattern),
    });
}

fn argument_child(argument: &Argument) -> NodeRef<'_> {
    match argument {
        Argument::Expression(expression) => NodeRef::Expression(expression),
        Argument::Spread(spread) => NodeRef::Spread(spread),
    }
}

fn template_children<'a>(template: &'a TemplateLiteral, children: &mut Vec<NodeRef<'a>>) {
    children.extend(template.quasis.iter().map(NodeRef::TemplateElement));
    children.extend(template.expressions.iter().map(NodeRef::Expression));
}

fn function_children<'a>(function: &'a Function, children: &mut Vec<NodeRef<'a>>) {
    children.extend(function.id.as_ref().map(NodeRef::Identifier));
    children.extend(function.params.iter().map(NodeRef::Pattern));
    children.push(NodeRef::Block(&function.body));
}

fn class_children<'a>(class: &'a Class, children: &mut Vec<NodeRef<'a>>) {
    children.extend(class.id.as_ref().map(NodeRef::Identifier));
    if let Some(super_class) = &class.super_class {
        children.push(NodeRef::Expression(super_class));
    }
    children.push(NodeRef::ClassBody(&class.body));
}

fn expression_children<'a>(expression: &'a Expression, children: &mut Vec<NodeRef<'a>>) {
    match expression {
        Expression::Number(_)
        | Expression::String(_)
        | Expression::Boolean(_)
        | Expression::Null(_)
        | Expression::Identifier(_)
        | Expression::PrivateName(_)
        | Expression::This(_)
        | Expression::Super(_) => {}
        Expression::Template(template) => template_children(template, children),
        Expression::Array(node) => {
            children.extend(node.elements.iter().flatten().map(argument_child));
        }
        Expression::Object(node) => {
            for member in &node.properties {
                children.push(match member {
                    ObjectMember::Property(property) => NodeRef::Property(property),
                    ObjectMember::Method(method) => NodeRef::Method(method),
                    ObjectMember::Spread(spread) => NodeRef::Spread(spread),
                });
            }
        }
        Expression::Function(function) => function_children(function, children),
        Expression::Arrow(node) => {
            children.extend(node.params.iter().map(NodeRef::Pattern));
            children.push(match &node.body {
                ArrowBody::Block(block) => NodeRef::Block(block),
                ArrowBody::Expression(expression) => NodeRef::Expression(expression),
            });
        }
        Expression::Class(class) => class_children(class, children),
        Expression::Unary(node) => children.push(NodeRef::Expression(&node.argument)),
        Expression::Update(node) => children.push(NodeRef::Expression(&node.argument)),
        Expression::Binary(node) => {
            children.push(NodeRef::Expression(&node.left));
            children.push(NodeRef::Expression(&node.right));
        }
        Expression::Logical(node) => {
            children.push(NodeRef::Expression(&node.left));
            children.push(NodeRef::Expression(&node.right));
        }
        Expression::Conditional(node) => {
            children.push(NodeRef::Expression(&node.test));
            children.push(NodeRef::Expression(&node.consequent));
            children.push(NodeRef::Expression(&node.alternate));
        }
        Expression::Assignment(node) => {
            children.push(NodeRef::Pattern(&node.left));
            children.push(NodeRef::Expression(&node.right));
        }
        Expression::Sequence(node) => children.extend(node.expressions.iter().map(NodeRef::Expression)),
        Expression::Await(node) => children.push(NodeRef::Expression(&node.argument)),
        Expression::Yield(node) => {
            if let Some(argument) = &node.argument {
                children.push(NodeRef::Expression(argument));
            }
        }
        Expression::Member(node) => {
            children.push(NodeRef::Expression(&node.object));
            children.push(NodeRef::Expression(&node.property));
        }
        Expression::Call(node) => {
            children.push(NodeRef::Expression(&node.callee));
            children.extend(node.arguments.iter().map(argument_child));
        }
        Expression::New(node) => {
            children.push(NodeRef::Expression(&node.callee));
            children.extend(node.arguments.iter().map(argument_child));
        }
        Expression::Chain(node) => children.push(NodeRef::Expression(&node.expression)),
        Expression::TaggedTemplate(node) => {
            children.push(NodeRef::Expression(&node.tag));
            children.push(NodeRef::Template(&node.quasi));
        }
    }
}

fn pattern_children<'a>(pattern: &'a Pattern, children: &mut Vec<NodeRef<'a>>) {
    match pattern {
        Pattern::Identifier(_) => {}
        Pattern::Object(node) => {
            for member in &node.properties {
                children.push(match member {
                    ObjectPatternMember::Property(property) => NodeRef::PatternProperty(property),
                    ObjectPatternMember::Rest(rest) => NodeRef::Rest(rest),
                });
            }
        }
        Pattern::Array(node) => children.extend(node.elements.iter().flatten().map(NodeRef::Pattern)),
        Pattern::Assignment(node) => {
            children.push(NodeRef::Pattern(&node.left));
            children.push(NodeRef::Expression(&node.right));
        }
        Pattern::Rest(node) => children.push(NodeRef::Pattern(&node.argument)),
        Pattern::Member(node) => {
            children.push(NodeRef::Expression(&node.object));
            children.push(NodeRef::Expression(&node.property));
        }
    }
}

/// Callbacks invoked by [`walk`].
pub trait Visitor<'a> {
    fn enter(&mut self, _node: NodeRef<'a>) {}

    fn leave(&mut self, _node: NodeRef<'a>) {}
}

enum Step<'a> {
    Enter(NodeRef<'a>),
    Leave(NodeRef<'a>),
}

/// Walks `node` and everything below it. The traversal keeps its own stack,
/// so arbitrarily deep trees (long operator chains) do not recurse.
pub fn walk<'a, V: Visitor<'a> + ?Sized>(node: NodeRef<'a>, visitor: &mut V) {
    let mut stack = vec![Step::Enter(node)];

    while let Some(step) = stack.pop() {
        match step {
            Step::Enter(node) => {
                visitor.enter(node);
                stack.push(Step::Leave(node));
                stack.extend(node.children().into_iter().rev().map(Step::Enter));
            }
            Step::Leave(node) => visitor.leave(node),
        }
    }
}
