use serde::Serialize;

use crate::{lexer::tokens::TokenKind, Span};

use super::{ast::Expression, ast::Pattern, declarations::MethodDefinition, statements::BlockStatement};

// LITERALS

/// Number Literal
/// `raw` keeps the source spelling, `value` the decoded number.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub struct NumberLiteral {
    pub value: f64,
    pub raw: String,
    pub span: Span,
}

/// String Literal
/// `value` is the cooked string with escapes decoded.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub struct StringLiteral {
    pub value: String,
    pub raw: String,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub struct BooleanLiteral {
    pub value: bool,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub struct NullLiteral {
    pub span: Span,
}

/// Template Literal
/// `quasis` always holds one more element than `expressions`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub struct TemplateLiteral {
    pub quasis: Vec<TemplateElement>,
    pub expressions: Vec<Expression>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub struct TemplateElement {
    pub cooked: String,
    pub raw: String,
    pub tail: bool,
    pub span: Span,
}

// NAMES

/// Identifier
/// Also used for `undefined`, which is an ordinary binding.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub struct Identifier {
    pub name: String,
    pub span: Span,
}

/// Private Name
/// `name` excludes the leading `#`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub struct PrivateName {
    pub name: String,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub struct ThisExpression {
    pub span: Span,
}

/// Super
/// Only appears as the object of a member access or as a callee.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub struct Super {
    pub span: Span,
}

// COMPOUND

/// A call argument or array element that may be spread.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Argument {
    Expression(Expression),
    Spread(SpreadElement),
}

impl Argument {
    pub fn get_span(&self) -> &Span {
        match self {
            Argument::Expression(expression) => expression.get_span(),
            Argument::Spread(spread) => &spread.span,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub struct SpreadElement {
    pub argument: Box<Expression>,
    pub span: Span,
}

/// Array Expression
/// `None` entries are holes, as in `[1, , 2]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub struct ArrayExpression {
    pub elements: Vec<Option<Argument>>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub struct ObjectExpression {
    pub properties: Vec<ObjectMember>,
    pub span: Span,
}

/// A member of an object literal.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ObjectMember {
    Property(ObjectProperty),
    /// Methods and accessors, distinguished by `MethodDefinition::kind`.
    Method(MethodDefinition),
    Spread(SpreadElement),
}

impl ObjectMember {
    pub fn get_span(&self) -> &Span {
        match self {
            ObjectMember::Property(property) => &property.span,
            ObjectMember::Method(method) => &method.span,
            ObjectMember::Spread(spread) => &spread.span,
        }
    }
}

/// Object Property
/// `key: value`, or the shorthand `key` / `key = default`.
///
/// The shorthand default form is only meaningful once the enclosing object
/// is reinterpreted as a destructuring pattern.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename = "Property")]
pub struct ObjectProperty {
    pub key: Expression,
    pub value: Expression,
    pub computed: bool,
    pub shorthand: bool,
    pub span: Span,
}

/// Arrow Function Expression
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub struct ArrowFunctionExpression {
    pub params: Vec<Pattern>,
    pub body: ArrowBody,
    pub is_async: bool,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ArrowBody {
    Block(BlockStatement),
    Expression(Box<Expression>),
}

// OPERATORS

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UnaryOperator {
    #[serde(rename = "-")]
    Minus,
    #[serde(rename = "+")]
    Plus,
    #[serde(rename = "!")]
    Not,
    #[serde(rename = "~")]
    BitwiseNot,
    #[serde(rename = "typeof")]
    Typeof,
    #[serde(rename = "void")]
    Void,
    #[serde(rename = "delete")]
    Delete,
}

impl UnaryOperator {
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Dash => Some(UnaryOperator::Minus),
            TokenKind::Plus => Some(UnaryOperator::Plus),
            TokenKind::Not => Some(UnaryOperator::Not),
            TokenKind::Tilde => Some(UnaryOperator::BitwiseNot),
            TokenKind::Typeof => Some(UnaryOperator::Typeof),
            TokenKind::Void => Some(UnaryOperator::Void),
            TokenKind::Delete => Some(UnaryOperator::Delete),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UpdateOperator {
    #[serde(rename = "++")]
    Increment,
    #[serde(rename = "--")]
    Decrement,
}

impl UpdateOperator {
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::PlusPlus => Some(UpdateOperator::Increment),
            TokenKind::MinusMinus => Some(UpdateOperator::Decrement),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BinaryOperator {
    #[serde(rename = "==")]
    Equals,
    #[serde(rename = "!=")]
    NotEquals,
    #[serde(rename = "===")]
    StrictEquals,
    #[serde(rename = "!==")]
    StrictNotEquals,
    #[serde(rename = "<")]
    Less,
    #[serde(rename = "<=")]
    LessEquals,
    #[serde(rename = ">")]
    Greater,
    #[serde(rename = ">=")]
    GreaterEquals,
    #[serde(rename = "<<")]
    ShiftLeft,
    #[serde(rename = ">>")]
    ShiftRight,
    #[serde(rename = ">>>")]
    UnsignedShiftRight,
    #[serde(rename = "+")]
    Add,
    #[serde(rename = "-")]
    Subtract,
    #[serde(rename = "*")]
    Multiply,
    #[serde(rename = "/")]
    Divide,
    #[serde(rename = "%")]
    Modulo,
    #[serde(rename = "**")]
    Exponent,
    #[serde(rename = "&")]
    BitwiseAnd,
    #[serde(rename = "|")]
    BitwiseOr,
    #[serde(rename = "^")]
    BitwiseXor,
    #[serde(rename = "in")]
    In,
    #[serde(rename = "instanceof")]
    Instanceof,
}

impl BinaryOperator {
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        let operator = match kind {
            TokenKind::Equals => BinaryOperator::Equals,
            TokenKind::NotEquals => BinaryOperator::NotEquals,
            TokenKind::StrictEquals => BinaryOperator::StrictEquals,
            TokenKind::StrictNotEquals => BinaryOperator::StrictNotEquals,
            TokenKind::Less => BinaryOperator::Less,
            TokenKind::LessEquals => BinaryOperator::LessEquals,
            TokenKind::Greater => BinaryOperator::Greater,
            TokenKind::GreaterEquals => BinaryOperator::GreaterEquals,
            TokenKind::ShiftLeft => BinaryOperator::ShiftLeft,
            TokenKind::ShiftRight => BinaryOperator::ShiftRight,
            TokenKind::UnsignedShiftRight => BinaryOperator::UnsignedShiftRight,
            TokenKind::Plus => BinaryOperator::Add,
            TokenKind::Dash => BinaryOperator::Subtract,
            TokenKind::Star => BinaryOperator::Multiply,
            TokenKind::Slash => BinaryOperator::Divide,
            TokenKind::Percent => BinaryOperator::Modulo,
            TokenKind::StarStar => BinaryOperator::Exponent,
            TokenKind::Ampersand => BinaryOperator::BitwiseAnd,
            TokenKind::Pipe => BinaryOperator::BitwiseOr,
            TokenKind::Caret => BinaryOperator::BitwiseXor,
            TokenKind::In => BinaryOperator::In,
            TokenKind::Instanceof => BinaryOperator::Instanceof,
            _ => return None,
        };
        Some(operator)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LogicalOperator {
    #[serde(rename = "&&")]
    And,
    #[serde(rename = "||")]
    Or,
}

impl LogicalOperator {
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::And => Some(LogicalOperator::And),
            TokenKind::Or => Some(LogicalOperator::Or),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AssignmentOperator {
    #[serde(rename = "=")]
    Assign,
    #[serde(rename = "+=")]
    AddAssign,
    #[serde(rename = "-=")]
    SubtractAssign,
    #[serde(rename = "*=")]
    MultiplyAssign,
    #[serde(rename = "/=")]
    DivideAssign,
    #[serde(rename = "%=")]
    ModuloAssign,
    #[serde(rename = "**=")]
    ExponentAssign,
    #[serde(rename = "<<=")]
    ShiftLeftAssign,
    #[serde(rename = ">>=")]
    ShiftRightAssign,
    #[serde(rename = ">>>=")]
    UnsignedShiftRightAssign,
    #[serde(rename = "&=")]
    BitwiseAndAssign,
    #[serde(rename = "|=")]
    BitwiseOrAssign,
    #[serde(rename = "^=")]
    BitwiseXorAssign,
    #[serde(rename = "&&=")]
    AndAssign,
    #[serde(rename = "||=")]
    OrAssign,
}

impl AssignmentOperator {
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        let operator = match kind {
            TokenKind::Assignment => AssignmentOperator::Assign,
            TokenKind::PlusEquals => AssignmentOperator::AddAssign,
            TokenKind::MinusEquals => AssignmentOperator::SubtractAssign,
            TokenKind::StarEquals => AssignmentOperator::MultiplyAssign,
            TokenKind::SlashEquals => AssignmentOperator::DivideAssign,
            TokenKind::PercentEquals => AssignmentOperator::ModuloAssign,
            TokenKind::StarStarEquals => AssignmentOperator::ExponentAssign,
            TokenKind::ShiftLeftEquals => AssignmentOperator::ShiftLeftAssign,
            TokenKind::ShiftRightEquals => AssignmentOperator::ShiftRightAssign,
            TokenKind::UnsignedShiftRightEquals => AssignmentOperator::UnsignedShiftRightAssign,
            TokenKind::AmpersandEquals => AssignmentOperator::BitwiseAndAssign,
            TokenKind::PipeEquals => AssignmentOperator::BitwiseOrAssign,
            TokenKind::CaretEquals => AssignmentOperator::BitwiseXorAssign,
            TokenKind::AndEquals => AssignmentOperator::AndAssign,
            TokenKind::OrEquals => AssignmentOperator::OrAssign,
            _ => return None,
        };
        Some(operator)
    }
}

// OPERATOR EXPRESSIONS

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub struct UnaryExpression {
    pub operator: UnaryOperator,
    pub argument: Box<Expression>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub struct UpdateExpression {
    pub operator: UpdateOperator,
    pub prefix: bool,
    pub argument: Box<Expression>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub struct BinaryExpression {
    pub operator: BinaryOperator,
    pub left: Box<Expression>,
    pub right: Box<Expression>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub struct LogicalExpression {
    pub operator: LogicalOperator,
    pub left: Box<Expression>,
    pub right: Box<Expression>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub struct ConditionalExpression {
    pub test: Box<Expression>,
    pub consequent: Box<Expression>,
    pub alternate: Box<Expression>,
    pub span: Span,
}

/// Assignment Expression
/// The target has already been reinterpreted as a pattern.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub struct AssignmentExpression {
    pub operator: AssignmentOperator,
    pub left: Box<Pattern>,
    pub right: Box<Expression>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub struct SequenceExpression {
    pub expressions: Vec<Expression>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub struct AwaitExpression {
    pub argument: Box<Expression>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub struct YieldExpression {
    pub argument: Option<Box<Expression>>,
    pub delegate: bool,
    pub span: Span,
}

// LEFT-HAND-SIDE EXPRESSIONS

/// Member Expression
/// `object.property`, `object[property]`, `object.#private` and their
/// optional `?.` forms.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub struct MemberExpression {
    pub object: Box<Expression>,
    pub property: Box<Expression>,
    pub computed: bool,
    pub optional: bool,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub struct CallExpression {
    pub callee: Box<Expression>,
    pub arguments: Vec<Argument>,
    pub optional: bool,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub struct NewExpression {
    pub callee: Box<Expression>,
    pub arguments: Vec<Argument>,
    pub span: Span,
}

/// Chain Expression
/// Wraps a member/call chain that contains at least one `?.` link.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub struct ChainExpression {
    pub expression: Box<Expression>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub struct TaggedTemplateExpression {
    pub tag: Box<Expression>,
    pub quasi: TemplateLiteral,
    pub span: Span,
}
