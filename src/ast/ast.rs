use std::fmt::Display;

use serde::Serialize;

use crate::Span;

use super::{
    declarations::{
        Class, ExportAllDeclaration, ExportDefaultDeclaration, ExportNamedDeclaration, Function,
        ImportDeclaration, VariableDeclaration,
    },
    expressions::{
        ArrayExpression, ArrowFunctionExpression, AssignmentExpression, AwaitExpression,
        BinaryExpression, BooleanLiteral, CallExpression, ChainExpression, ConditionalExpression,
        Identifier, LogicalExpression, MemberExpression, NewExpression, NullLiteral, NumberLiteral,
        ObjectExpression, PrivateName, SequenceExpression, StringLiteral, Super,
        TaggedTemplateExpression, TemplateLiteral, ThisExpression, UnaryExpression,
        UpdateExpression, YieldExpression,
    },
    patterns::{ArrayPattern, AssignmentPattern, ObjectPattern, RestElement},
    statements::{
        BlockStatement, BreakStatement, ContinueStatement, DebuggerStatement, DoWhileStatement,
        EmptyStatement, ExpressionStatement, ForInStatement, ForOfStatement, ForStatement,
        IfStatement, LabeledStatement, ReturnStatement, SwitchStatement, ThrowStatement,
        TryStatement, WhileStatement,
    },
};

/// Node Kinds
///
/// The discriminant of every node in the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum NodeKind {
    Program,

    // Literals
    NumberLiteral,
    StringLiteral,
    BooleanLiteral,
    NullLiteral,
    TemplateLiteral,
    TemplateElement,

    Identifier,
    PrivateName,
    ThisExpression,
    Super,

    // Composite expressions
    ArrayExpression,
    ObjectExpression,
    Property,
    ObjectMethodDefinition,
    ObjectAccessor,
    SpreadElement,
    FunctionExpression,
    ArrowFunctionExpression,
    ClassExpression,

    // Operator expressions
    UnaryExpression,
    UpdateExpression,
    BinaryExpression,
    LogicalExpression,
    ConditionalExpression,
    AssignmentExpression,
    SequenceExpression,
    AwaitExpression,
    YieldExpression,

    // Left-hand-side expressions
    MemberExpression,
    CallExpression,
    NewExpression,
    ChainExpression,
    TaggedTemplateExpression,

    // Patterns
    ObjectPattern,
    ObjectPatternProperty,
    ArrayPattern,
    AssignmentPattern,
    RestElement,

    // Statements
    ExpressionStatement,
    BlockStatement,
    EmptyStatement,
    DebuggerStatement,
    ReturnStatement,
    LabeledStatement,
    BreakStatement,
    ContinueStatement,
    IfStatement,
    SwitchStatement,
    SwitchCase,
    ThrowStatement,
    TryStatement,
    CatchClause,
    WhileStatement,
    DoWhileStatement,
    ForStatement,
    ForInStatement,
    ForOfStatement,

    // Declarations
    VariableDeclaration,
    VariableDeclarator,
    FunctionDeclaration,
    ClassDeclaration,
    ClassBody,
    ClassProperty,
    ClassConstructor,
    ClassMethodDefinition,
    ClassAccessor,

    // Module items
    ImportDeclaration,
    ImportSpecifier,
    ImportDefaultSpecifier,
    ImportNamespaceSpecifier,
    ExportNamedDeclaration,
    ExportSpecifier,
    ExportDefaultDeclaration,
    ExportAllDeclaration,
}

impl Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Expressions
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Expression {
    Number(NumberLiteral),
    String(StringLiteral),
    Boolean(BooleanLiteral),
    Null(NullLiteral),
    Template(TemplateLiteral),
    Identifier(Identifier),
    PrivateName(PrivateName),
    This(ThisExpression),
    Super(Super),
    Array(ArrayExpression),
    Object(ObjectExpression),
    Function(Box<Function>),
    Arrow(ArrowFunctionExpression),
    Class(Box<Class>),
    Unary(UnaryExpression),
    Update(UpdateExpression),
    Binary(BinaryExpression),
    Logical(LogicalExpression),
    Conditional(ConditionalExpression),
    Assignment(AssignmentExpression),
    Sequence(SequenceExpression),
    Await(AwaitExpression),
    Yield(YieldExpression),
    Member(MemberExpression),
    Call(CallExpression),
    New(NewExpression),
    Chain(ChainExpression),
    TaggedTemplate(TaggedTemplateExpression),
}

impl Expression {
    pub fn kind(&self) -> NodeKind {
        match self {
            Expression::Number(_) => NodeKind::NumberLiteral,
            Expression::String(_) => NodeKind::StringLiteral,
            Expression::Boolean(_) => NodeKind::BooleanLiteral,
            Expression::Null(_) => NodeKind::NullLiteral,
            Expression::Template(_) => NodeKind::TemplateLiteral,
            Expression::Identifier(_) => NodeKind::Identifier,
            Expression::PrivateName(_) => NodeKind::PrivateName,
            Expression::This(_) => NodeKind::ThisExpression,
            Expression::Super(_) => NodeKind::Super,
            Expression::Array(_) => NodeKind::ArrayExpression,
            Expression::Object(_) => NodeKind::ObjectExpression,
            Expression::Function(function) => function.kind,
            Expression::Arrow(_) => NodeKind::ArrowFunctionExpression,
            Expression::Class(class) => class.kind,
            Expression::Unary(_) => NodeKind::UnaryExpression,
            Expression::Update(_) => NodeKind::UpdateExpression,
            Expression::Binary(_) => NodeKind::BinaryExpression,
            Expression::Logical(_) => NodeKind::LogicalExpression,
            Expression::Conditional(_) => NodeKind::ConditionalExpression,
            Expression::Assignment(_) => NodeKind::AssignmentExpression,
            Expression::Sequence(_) => NodeKind::SequenceExpression,
            Expression::Await(_) => NodeKind::AwaitExpression,
            Expression::Yield(_) => NodeKind::YieldExpression,
            Expression::Member(_) => NodeKind::MemberExpression,
            Expression::Call(_) => NodeKind::CallExpression,
            Expression::New(_) => NodeKind::NewExpression,
            Expression::Chain(_) => NodeKind::ChainExpression,
            Expression::TaggedTemplate(_) => NodeKind::TaggedTemplateExpression,
        }
    }

    pub fn get_span(&self) -> &Span {
        match self {
            Expression::Number(node) => &node.span,
            Expression::String(node) => &node.span,
            Expression::Boolean(node) => &node.span,
            Expression::Null(node) => &node.span,
            Expression::Template(node) => &node.span,
            Expression::Identifier(node) => &node.span,
            Expression::PrivateName(node) => &node.span,
            Expression::This(node) => &node.span,
            Expression::Super(node) => &node.span,
            Expression::Array(node) => &node.span,
            Expression::Object(node) => &node.span,
            Expression::Function(node) => &node.span,
            Expression::Arrow(node) => &node.span,
            Expression::Class(node) => &node.span,
            Expression::Unary(node) => &node.span,
            Expression::Update(node) => &node.span,
            Expression::Binary(node) => &node.span,
            Expression::Logical(node) => &node.span,
            Expression::Conditional(node) => &node.span,
            Expression::Assignment(node) => &node.span,
            Expression::Sequence(node) => &node.span,
            Expression::Await(node) => &node.span,
            Expression::Yield(node) => &node.span,
            Expression::Member(node) => &node.span,
            Expression::Call(node) => &node.span,
            Expression::New(node) => &node.span,
            Expression::Chain(node) => &node.span,
            Expression::TaggedTemplate(node) => &node.span,
        }
    }
}

/// Statements, declarations and module items.
///
/// Import and export variants only appear directly in a `Program` body.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Statement {
    Expression(ExpressionStatement),
    Block(BlockStatement),
    Empty(EmptyStatement),
    Debugger(DebuggerStatement),
    Return(ReturnStatement),
    Labeled(LabeledStatement),
    Break(BreakStatement),
    Continue(ContinueStatement),
    If(IfStatement),
    Switch(SwitchStatement),
    Throw(ThrowStatement),
    Try(TryStatement),
    While(WhileStatement),
    DoWhile(DoWhileStatement),
    For(ForStatement),
    ForIn(ForInStatement),
    ForOf(ForOfStatement),
    VariableDeclaration(VariableDeclaration),
    FunctionDeclaration(Box<Function>),
    ClassDeclaration(Box<Class>),
    ImportDeclaration(ImportDeclaration),
    ExportNamedDeclaration(ExportNamedDeclaration),
    ExportDefaultDeclaration(ExportDefaultDeclaration),
    ExportAllDeclaration(ExportAllDeclaration),
}

impl Statement {
    pub fn kind(&self) -> NodeKind {
        match self {
            Statement::Expression(_) => NodeKind::ExpressionStatement,
            Statement::Block(_) => NodeKind::BlockStatement,
            Statement::Empty(_) => NodeKind::EmptyStatement,
            Statement::Debugger(_) => NodeKind::DebuggerStatement,
            Statement::Return(_) => NodeKind::ReturnStatement,
            Statement::Labeled(_) => NodeKind::LabeledStatement,
            Statement::Break(_) => NodeKind::BreakStatement,
            Statement::Continue(_) => NodeKind::ContinueStatement,
            Statement::If(_) => NodeKind::IfStatement,
            Statement::Switch(_) => NodeKind::SwitchStatement,
            Statement::Throw(_) => NodeKind::ThrowStatement,
            Statement::Try(_) => NodeKind::TryStatement,
            Statement::While(_) => NodeKind::WhileStatement,
            Statement::DoWhile(_) => NodeKind::DoWhileStatement,
            Statement::For(_) => NodeKind::ForStatement,
            Statement::ForIn(_) => NodeKind::ForInStatement,
            Statement::ForOf(_) => NodeKind::ForOfStatement,
            Statement::VariableDeclaration(_) => NodeKind::VariableDeclaration,
            Statement::FunctionDeclaration(function) => function.kind,
            Statement::ClassDeclaration(class) => class.kind,
            Statement::ImportDeclaration(_) => NodeKind::ImportDeclaration,
            Statement::ExportNamedDeclaration(_) => NodeKind::ExportNamedDeclaration,
            Statement::ExportDefaultDeclaration(_) => NodeKind::ExportDefaultDeclaration,
            Statement::ExportAllDeclaration(_) => NodeKind::ExportAllDeclaration,
        }
    }

    pub fn get_span(&self) -> &Span {
        match self {
            Statement::Expression(node) => &node.span,
            Statement::Block(node) => &node.span,
            Statement::Empty(node) => &node.span,
            Statement::Debugger(node) => &node.span,
            Statement::Return(node) => &node.span,
            Statement::Labeled(node) => &node.span,
            Statement::Break(node) => &node.span,
            Statement::Continue(node) => &node.span,
            Statement::If(node) => &node.span,
            Statement::Switch(node) => &node.span,
            Statement::Throw(node) => &node.span,
            Statement::Try(node) => &node.span,
            Statement::While(node) => &node.span,
            Statement::DoWhile(node) => &node.span,
            Statement::For(node) => &node.span,
            Statement::ForIn(node) => &node.span,
            Statement::ForOf(node) => &node.span,
            Statement::VariableDeclaration(node) => &node.span,
            Statement::FunctionDeclaration(node) => &node.span,
            Statement::ClassDeclaration(node) => &node.span,
            Statement::ImportDeclaration(node) => &node.span,
            Statement::ExportNamedDeclaration(node) => &node.span,
            Statement::ExportDefaultDeclaration(node) => &node.span,
            Statement::ExportAllDeclaration(node) => &node.span,
        }
    }

    pub fn is_module_item(&self) -> bool {
        matches!(
            self,
            Statement::ImportDeclaration(_)
                | Statement::ExportNamedDeclaration(_)
                | Statement::ExportDefaultDeclaration(_)
                | Statement::ExportAllDeclaration(_)
        )
    }
}

/// Binding and assignment targets.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Pattern {
    Identifier(Identifier),
    Object(ObjectPattern),
    Array(ArrayPattern),
    Assignment(AssignmentPattern),
    Rest(RestElement),
    /// Only valid as an assignment target, never in a binding position.
    Member(MemberExpression),
}

impl Pattern {
    pub fn kind(&self) -> NodeKind {
        match self {
            Pattern::Identifier(_) => NodeKind::Identifier,
            Pattern::Object(_) => NodeKind::ObjectPattern,
            Pattern::Array(_) => NodeKind::ArrayPattern,
            Pattern::Assignment(_) => NodeKind::AssignmentPattern,
            Pattern::Rest(_) => NodeKind::RestElement,
            Pattern::Member(_) => NodeKind::MemberExpression,
        }
    }

    pub fn get_span(&self) -> &Span {
        match self {
            Pattern::Identifier(node) => &node.span,
            Pattern::Object(node) => &node.span,
            Pattern::Array(node) => &node.span,
            Pattern::Assignment(node) => &node.span,
            Pattern::Rest(node) => &node.span,
            Pattern::Member(node) => &node.span,
        }
    }
}
