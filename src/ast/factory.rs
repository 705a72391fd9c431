//! Node construction.
//!
//! One function per node variant. Every function takes the already-parsed
//! children plus the node's span and returns the finished node; none of them
//! inspect tokens or fail. `Function` and `Class` are built generically and
//! then reshaped into their declaration or expression form.

use crate::Span;

use super::{
    ast::{Expression, NodeKind, Pattern, Statement},
    declarations::{
        Class, ClassBody, ClassElement, ClassProperty, ExportAllDeclaration, ExportDefaultDeclaration,
        ExportDefaultKind, ExportNamedDeclaration, ExportSpecifier, Function, ImportClause,
        ImportDeclaration, ImportDefaultSpecifier, ImportNamespaceSpecifier, ImportSpecifier,
        MethodDefinition, MethodKind, VariableDeclaration, VariableDeclarator, VariableKind,
    },
    expressions::{
        Argument, ArrayExpression, ArrowBody, ArrowFunctionExpression, AssignmentExpression,
        AssignmentOperator, AwaitExpression, BinaryExpression, BinaryOperator, BooleanLiteral,
        CallExpression, ChainExpression, ConditionalExpression, Identifier, LogicalExpression,
        LogicalOperator, MemberExpression, NewExpression, NullLiteral, NumberLiteral,
        ObjectExpression, ObjectMember, ObjectProperty, PrivateName, SequenceExpression,
        SpreadElement, StringLiteral, Super, TaggedTemplateExpression, TemplateElement,
        TemplateLiteral, ThisExpression, UnaryExpression, UnaryOperator, UpdateExpression,
        UpdateOperator, YieldExpression,
    },
    patterns::{ArrayPattern, AssignmentPattern, ObjectPattern, ObjectPatternMember, ObjectPatternProperty, RestElement},
    statements::{
        BlockStatement, BreakStatement, CatchClause, ContinueStatement, DebuggerStatement,
        DoWhileStatement, EmptyStatement, ExpressionStatement, ForInStatement, ForInit,
        ForOfStatement, ForStatement, ForTarget, IfStatement, LabeledStatement, Program,
        ReturnStatement, SwitchCase, SwitchStatement, ThrowStatement, TryStatement,
        WhileStatement,
    },
};

// LITERALS & NAMES

pub fn create_number(value: f64, raw: String, span: Span) -> Expression {
    Expression::Number(NumberLiteral { value, raw, span })
}

pub fn create_string_literal(value: String, raw: String, span: Span) -> StringLiteral {
    StringLiteral { value, raw, span }
}

pub fn create_boolean(value: bool, span: Span) -> Expression {
    Expression::Boolean(BooleanLiteral { value, span })
}

pub fn create_null(span: Span) -> Expression {
    Expression::Null(NullLiteral { span })
}

pub fn create_template_element(cooked: String, raw: String, tail: bool, span: Span) -> TemplateElement {
    TemplateElement {
        cooked,
        raw,
        tail,
        span,
    }
}

pub fn create_template_literal(
    quasis: Vec<TemplateElement>,
    expressions: Vec<Expression>,
    span: Span,
) -> TemplateLiteral {
    TemplateLiteral {
        quasis,
        expressions,
        span,
    }
}

pub fn create_identifier(name: String, span: Span) -> Identifier {
    Identifier { name, span }
}

pub fn create_private_name(name: String, span: Span) -> PrivateName {
    PrivateName { name, span }
}

pub fn create_this(span: Span) -> Expression {
    Expression::This(ThisExpression { span })
}

pub fn create_super(span: Span) -> Expression {
    Expression::Super(Super { span })
}

// COMPOUND EXPRESSIONS

pub fn create_spread(argument: Expression, span: Span) -> SpreadElement {
    SpreadElement {
        argument: Box::new(argument),
        span,
    }
}

pub fn create_array(elements: Vec<Option<Argument>>, span: Span) -> Expression {
    Expression::Array(ArrayExpression { elements, span })
}

pub fn create_object(properties: Vec<ObjectMember>, span: Span) -> Expression {
    Expression::Object(ObjectExpression { properties, span })
}

pub fn create_property(
    key: Expression,
    value: Expression,
    computed: bool,
    shorthand: bool,
    span: Span,
) -> ObjectProperty {
    ObjectProperty {
        key,
        value,
        computed,
        shorthand,
        span,
    }
}

pub fn create_arrow_function(
    params: Vec<Pattern>,
    body: ArrowBody,
    is_async: bool,
    span: Span,
) -> Expression {
    Expression::Arrow(ArrowFunctionExpression {
        params,
        body,
        is_async,
        span,
    })
}

// OPERATORS

pub fn create_unary(operator: UnaryOperator, argument: Expression, span: Span) -> Expression {
    Expression::Unary(UnaryExpression {
        operator,
        argument: Box::new(argument),
        span,
    })
}

pub fn create_update(
    operator: UpdateOperator,
    prefix: bool,
    argument: Expression,
    span: Span,
) -> Expression {
    Expression::Update(UpdateExpression {
        operator,
        prefix,
        argument: Box::new(argument),
        span,
    })
}

pub fn create_binary(
    operator: BinaryOperator,
    left: Expression,
    right: Expression,
    span: Span,
) -> Expression {
    Expression::Binary(BinaryExpression {
        operator,
        left: Box::new(left),
        right: Box::new(right),
        span,
    })
}

pub fn create_logical(
    operator: LogicalOperator,
    left: Expression,
    right: Expression,
    span: Span,
) -> Expression {
    Expression::Logical(LogicalExpression {
        operator,
        left: Box::new(left),
        right: Box::new(right),
        span,
    })
}

pub fn create_conditional(
    test: Expression,
    consequent: Expression,
    alternate: Expression,
    span: Span,
) -> Expression {
    Expression::Conditional(ConditionalExpression {
        test: Box::new(test),
        consequent: Box::new(consequent),
        alternate: Box::new(alternate),
        span,
    })
}

pub fn create_assignment(
    operator: AssignmentOperator,
    left: Pattern,
    right: Expression,
    span: Span,
) -> Expression {
    Expression::Assignment(AssignmentExpression {
        operator,
        left: Box::new(left),
        right: Box::new(right),
        span,
    })
}

pub fn create_sequence(expressions: Vec<Expression>, span: Span) -> Expression {
    Expression::Sequence(SequenceExpression { expressions, span })
}

pub fn create_await(argument: Expression, span: Span) -> Expression {
    Expression::Await(AwaitExpression {
        argument: Box::new(argument),
        span,
    })
}

pub fn create_yield(argument: Option<Expression>, delegate: bool, span: Span) -> Expression {
    Expression::Yield(YieldExpression {
        argument: argument.map(Box::new),
        delegate,
        span,
    })
}

// LEFT-HAND-SIDE

pub fn create_member(
    object: Expression,
    property: Expression,
    computed: bool,
    optional: bool,
    span: Span,
) -> MemberExpression {
    MemberExpression {
        object: Box::new(object),
        property: Box::new(property),
        computed,
        optional,
        span,
    }
}

pub fn create_call(
    callee: Expression,
    arguments: Vec<Argument>,
    optional: bool,
    span: Span,
) -> Expression {
    Expression::Call(CallExpression {
        callee: Box::new(callee),
        arguments,
        optional,
        span,
    })
}

pub fn create_new(callee: Expression, arguments: Vec<Argument>, span: Span) -> Expression {
    Expression::New(NewExpression {
        callee: Box::new(callee),
        arguments,
        span,
    })
}

pub fn create_chain(expression: Expression, span: Span) -> Expression {
    Expression::Chain(ChainExpression {
        expression: Box::new(expression),
        span,
    })
}

pub fn create_tagged_template(tag: Expression, quasi: TemplateLiteral, span: Span) -> Expression {
    Expression::TaggedTemplate(TaggedTemplateExpression {
        tag: Box::new(tag),
        quasi,
        span,
    })
}

// PATTERNS

pub fn create_object_pattern(properties: Vec<ObjectPatternMember>, span: Span) -> Pattern {
    Pattern::Object(ObjectPattern { properties, span })
}

pub fn create_object_pattern_property(
    key: Expression,
    value: Pattern,
    computed: bool,
    shorthand: bool,
    span: Span,
) -> ObjectPatternProperty {
    ObjectPatternProperty {
        key,
        value,
        computed,
        shorthand,
        span,
    }
}

pub fn create_array_pattern(elements: Vec<Option<Pattern>>, span: Span) -> Pattern {
    Pattern::Array(ArrayPattern { elements, span })
}

pub fn create_assignment_pattern(left: Pattern, right: Expression, span: Span) -> Pattern {
    Pattern::Assignment(AssignmentPattern {
        left: Box::new(left),
        right: Box::new(right),
        span,
    })
}

pub fn create_rest_element(argument: Pattern, span: Span) -> RestElement {
    RestElement {
        argument: Box::new(argument),
        span,
    }
}

// STATEMENTS

pub fn create_program(body: Vec<Statement>, span: Span) -> Program {
    Program { body, span }
}

pub fn create_block(body: Vec<Statement>, span: Span) -> BlockStatement {
    BlockStatement { body, span }
}

pub fn create_expression_statement(expression: Expression, span: Span) -> Statement {
    Statement::Expression(ExpressionStatement { expression, span })
}

pub fn create_empty_statement(span: Span) -> Statement {
    Statement::Empty(EmptyStatement { span })
}

pub fn create_debugger_statement(span: Span) -> Statement {
    Statement::Debugger(DebuggerStatement { span })
}

pub fn create_return(argument: Option<Expression>, span: Span) -> Statement {
    Statement::Return(ReturnStatement { argument, span })
}

pub fn create_labeled(label: Identifier, body: Statement, span: Span) -> Statement {
    Statement::Labeled(LabeledStatement {
        label,
        body: Box::new(body),
        span,
    })
}

pub fn create_break(label: Option<Identifier>, span: Span) -> Statement {
    Statement::Break(BreakStatement { label, span })
}

pub fn create_continue(label: Option<Identifier>, span: Span) -> Statement {
    Statement::Continue(ContinueStatement { label, span })
}

pub fn create_if(
    test: Expression,
    consequent: Statement,
    alternate: Option<Statement>,
    span: Span,
) -> Statement {
    Statement::If(IfStatement {
        test,
        consequent: Box::new(consequent),
        alternate: alternate.map(Box::new),
        span,
    })
}

pub fn create_switch(discriminant: Expression, cases: Vec<SwitchCase>, span: Span) -> Statement {
    Statement::Switch(SwitchStatement {
        discriminant,
        cases,
        span,
    })
}

pub fn create_switch_case(
    test: Option<Expression>,
    consequent: Vec<Statement>,
    span: Span,
) -> SwitchCase {
    SwitchCase {
        test,
        consequent,
        span,
    }
}

pub fn create_throw(argument: Expression, span: Span) -> Statement {
    Statement::Throw(ThrowStatement { argument, span })
}

pub fn create_try(
    block: BlockStatement,
    handler: Option<CatchClause>,
    finalizer: Option<BlockStatement>,
    span: Span,
) -> Statement {
    Statement::Try(TryStatement {
        block,
        handler,
        finalizer,
        span,
    })
}

pub fn create_catch_clause(param: Option<Pattern>, body: BlockStatement, span: Span) -> CatchClause {
    CatchClause { param, body, span }
}

pub fn create_while(test: Expression, body: Statement, span: Span) -> Statement {
    Statement::While(WhileStatement {
        test,
        body: Box::new(body),
        span,
    })
}

pub fn create_do_while(body: Statement, test: Expression, span: Span) -> Statement {
    Statement::DoWhile(DoWhileStatement {
        body: Box::new(body),
        test,
        span,
    })
}

pub fn create_for(
    init: Option<ForInit>,
    test: Option<Expression>,
    update: Option<Expression>,
    body: Statement,
    span: Span,
) -> Statement {
    Statement::For(ForStatement {
        init,
        test,
        update,
        body: Box::new(body),
        span,
    })
}

pub fn create_for_in(left: ForTarget, right: Expression, body: Statement, span: Span) -> Statement {
    Statement::ForIn(ForInStatement {
        left,
        right,
        body: Box::new(body),
        span,
    })
}

pub fn create_for_of(left: ForTarget, right: Expression, body: Statement, span: Span) -> Statement {
    Statement::ForOf(ForOfStatement {
        left,
        right,
        body: Box::new(body),
        span,
    })
}

// DECLARATIONS

pub fn create_variable_declaration(
    keyword: VariableKind,
    declarations: Vec<VariableDeclarator>,
    span: Span,
) -> VariableDeclaration {
    VariableDeclaration {
        keyword,
        declarations,
        span,
    }
}

pub fn create_variable_declarator(id: Pattern, init: Option<Expression>, span: Span) -> VariableDeclarator {
    VariableDeclarator { id, init, span }
}

/// Builds a function that is neither a declaration nor an expression yet.
/// Callers finish it with [`to_function_declaration`] or
/// [`to_function_expression`].
pub fn create_function(
    id: Option<Identifier>,
    params: Vec<Pattern>,
    body: BlockStatement,
    is_async: bool,
    is_generator: bool,
    span: Span,
) -> Function {
    Function {
        kind: NodeKind::FunctionExpression,
        id,
        params,
        body,
        is_async,
        is_generator,
        span,
    }
}

pub fn to_function_declaration(function: Function) -> Function {
    Function {
        kind: NodeKind::FunctionDeclaration,
        ..function
    }
}

pub fn to_function_expression(function: Function) -> Function {
    Function {
        kind: NodeKind::FunctionExpression,
        ..function
    }
}

/// Builds a class that is neither a declaration nor an expression yet.
pub fn create_class(
    id: Option<Identifier>,
    super_class: Option<Expression>,
    body: ClassBody,
    span: Span,
) -> Class {
    Class {
        kind: NodeKind::ClassExpression,
        id,
        super_class: super_class.map(Box::new),
        body,
        span,
    }
}

pub fn to_class_declaration(class: Class) -> Class {
    Class {
        kind: NodeKind::ClassDeclaration,
        ..class
    }
}

pub fn to_class_expression(class: Class) -> Class {
    Class {
        kind: NodeKind::ClassExpression,
        ..class
    }
}

pub fn create_class_body(body: Vec<ClassElement>, span: Span) -> ClassBody {
    ClassBody { body, span }
}

/// Picks the node kind for a method from where it lives and what it is.
pub fn method_node_kind(method: MethodKind, in_class: bool) -> NodeKind {
    match (in_class, method) {
        (true, MethodKind::Constructor) => NodeKind::ClassConstructor,
        (true, MethodKind::Method) => NodeKind::ClassMethodDefinition,
        (true, MethodKind::Get | MethodKind::Set) => NodeKind::ClassAccessor,
        (false, MethodKind::Get | MethodKind::Set) => NodeKind::ObjectAccessor,
        (false, _) => NodeKind::ObjectMethodDefinition,
    }
}

pub fn create_method_definition(
    key: Expression,
    computed: bool,
    method: MethodKind,
    is_static: bool,
    in_class: bool,
    value: Function,
    span: Span,
) -> MethodDefinition {
    MethodDefinition {
        kind: method_node_kind(method, in_class),
        key,
        computed,
        method,
        is_static,
        value: to_function_expression(value),
        span,
    }
}

pub fn create_class_property(
    key: Expression,
    computed: bool,
    value: Option<Expression>,
    is_static: bool,
    span: Span,
) -> ClassProperty {
    ClassProperty {
        key,
        computed,
        value,
        is_static,
        span,
    }
}

// MODULE ITEMS

pub fn create_import_declaration(
    specifiers: Vec<ImportClause>,
    source: StringLiteral,
    span: Span,
) -> Statement {
    Statement::ImportDeclaration(ImportDeclaration {
        specifiers,
        source,
        span,
    })
}

pub fn create_import_specifier(imported: Identifier, local: Identifier, span: Span) -> ImportClause {
    ImportClause::Named(ImportSpecifier {
        imported,
        local,
        span,
    })
}

pub fn create_import_default_specifier(local: Identifier, span: Span) -> ImportClause {
    ImportClause::Default(ImportDefaultSpecifier { local, span })
}

pub fn create_import_namespace_specifier(local: Identifier, span: Span) -> ImportClause {
    ImportClause::Namespace(ImportNamespaceSpecifier { local, span })
}

pub fn create_export_named(
    declaration: Option<Statement>,
    specifiers: Vec<ExportSpecifier>,
    source: Option<StringLiteral>,
    span: Span,
) -> Statement {
    Statement::ExportNamedDeclaration(ExportNamedDeclaration {
        declaration: declaration.map(Box::new),
        specifiers,
        source,
        span,
    })
}

pub fn create_export_specifier(local: Identifier, exported: Identifier, span: Span) -> ExportSpecifier {
    ExportSpecifier {
        local,
        exported,
        span,
    }
}

pub fn create_export_default(declaration: ExportDefaultKind, span: Span) -> Statement {
    Statement::ExportDefaultDeclaration(ExportDefaultDeclaration { declaration, span })
}

pub fn create_export_all(exported: Option<Identifier>, source: StringLiteral, span: Span) -> Statement {
    Statement::ExportAllDeclaration(ExportAllDeclaration {
        exported,
        source,
        span,
    })
}
