use serde::Serialize;

use crate::Span;

use super::{
    ast::{Expression, NodeKind, Pattern, Statement},
    expressions::{Identifier, StringLiteral},
    statements::BlockStatement,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum VariableKind {
    #[serde(rename = "var")]
    Var,
    #[serde(rename = "let")]
    Let,
    #[serde(rename = "const")]
    Const,
}

/// Variable Declaration
/// `keyword` is `var`, `let` or `const`; `declarations` is never empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub struct VariableDeclaration {
    pub keyword: VariableKind,
    pub declarations: Vec<VariableDeclarator>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub struct VariableDeclarator {
    pub id: Pattern,
    pub init: Option<Expression>,
    pub span: Span,
}

/// Function
/// Shared by `FunctionDeclaration` and `FunctionExpression`; `kind` holds
/// which of the two this node is.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Function {
    pub kind: NodeKind,
    pub id: Option<Identifier>,
    pub params: Vec<Pattern>,
    pub body: BlockStatement,
    pub is_async: bool,
    pub is_generator: bool,
    pub span: Span,
}

impl Function {
    pub fn is_declaration(&self) -> bool {
        self.kind == NodeKind::FunctionDeclaration
    }
}

/// Class
/// Shared by `ClassDeclaration` and `ClassExpression`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Class {
    pub kind: NodeKind,
    pub id: Option<Identifier>,
    pub super_class: Option<Box<Expression>>,
    pub body: ClassBody,
    pub span: Span,
}

impl Class {
    pub fn is_declaration(&self) -> bool {
        self.kind == NodeKind::ClassDeclaration
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub struct ClassBody {
    pub body: Vec<ClassElement>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ClassElement {
    /// Constructors, methods and accessors.
    Method(MethodDefinition),
    Property(ClassProperty),
}

impl ClassElement {
    pub fn get_span(&self) -> &Span {
        match self {
            ClassElement::Method(method) => &method.span,
            ClassElement::Property(property) => &property.span,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MethodKind {
    #[serde(rename = "constructor")]
    Constructor,
    #[serde(rename = "method")]
    Method,
    #[serde(rename = "get")]
    Get,
    #[serde(rename = "set")]
    Set,
}

/// Method Definition
/// A method, accessor or constructor in a class body or object literal.
/// `kind` is one of `ClassConstructor`, `ClassMethodDefinition`,
/// `ClassAccessor`, `ObjectMethodDefinition` or `ObjectAccessor`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MethodDefinition {
    pub kind: NodeKind,
    pub key: Expression,
    pub computed: bool,
    pub method: MethodKind,
    pub is_static: bool,
    pub value: Function,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub struct ClassProperty {
    pub key: Expression,
    pub computed: bool,
    pub value: Option<Expression>,
    pub is_static: bool,
    pub span: Span,
}

// MODULE ITEMS

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub struct ImportDeclaration {
    pub specifiers: Vec<ImportClause>,
    pub source: StringLiteral,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ImportClause {
    Default(ImportDefaultSpecifier),
    Namespace(ImportNamespaceSpecifier),
    Named(ImportSpecifier),
}

impl ImportClause {
    pub fn local(&self) -> &Identifier {
        match self {
            ImportClause::Default(specifier) => &specifier.local,
            ImportClause::Namespace(specifier) => &specifier.local,
            ImportClause::Named(specifier) => &specifier.local,
        }
    }
}

/// `imported as local`, or just `imported`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub struct ImportSpecifier {
    pub imported: Identifier,
    pub local: Identifier,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub struct ImportDefaultSpecifier {
    pub local: Identifier,
    pub span: Span,
}

/// `* as local`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub struct ImportNamespaceSpecifier {
    pub local: Identifier,
    pub span: Span,
}

/// Export Named Declaration
/// Either `declaration` is set (`export const x = 1`) or `specifiers`
/// lists the exported names, optionally re-exported from `source`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub struct ExportNamedDeclaration {
    pub declaration: Option<Box<Statement>>,
    pub specifiers: Vec<ExportSpecifier>,
    pub source: Option<StringLiteral>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub struct ExportSpecifier {
    pub local: Identifier,
    pub exported: Identifier,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ExportDefaultKind {
    Function(Function),
    Class(Class),
    Expression(Expression),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub struct ExportDefaultDeclaration {
    pub declaration: ExportDefaultKind,
    pub span: Span,
}

/// `export * from "m"` or `export * as name from "m"`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub struct ExportAllDeclaration {
    pub exported: Option<Identifier>,
    pub source: StringLiteral,
    pub span: Span,
}
