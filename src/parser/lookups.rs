use std::collections::HashMap;

use crate::{
    ast::ast::{Expression, Statement},
    errors::errors::Error,
    lexer::tokens::TokenKind,
};

use super::{expr::*, functions::*, parser::Parser, stmt::*};

/// Binding powers, lowest first.
///
/// Only the binary operator levels are looked up while parsing; the others
/// name the layers the recursive descent handles directly.
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Debug)]
pub enum BindingPower {
    Default = 0,
    Comma = 1,
    Assignment = 2,
    Conditional = 3,
    LogicalOr = 4,
    LogicalAnd = 5,
    BitwiseOr = 6,
    BitwiseXor = 7,
    BitwiseAnd = 8,
    Equality = 9,
    Relational = 10,
    Shift = 11,
    Additive = 12,
    Multiplicative = 13,
    Exponent = 14,
    Unary = 15,
    Call = 16,
    Member = 17,
    Primary = 18,
}

impl BindingPower {
    pub fn precedence(self) -> u8 {
        self as u8
    }
}

/// Operators that group right to left when chained.
pub fn is_right_associative(kind: TokenKind) -> bool {
    kind == TokenKind::StarStar
}

pub type StmtHandler = fn(&mut Parser) -> Result<Statement, Error>;
pub type NUDHandler = fn(&mut Parser) -> Result<Expression, Error>;

pub fn create_token_lookups(parser: &mut Parser) {
    // Logical
    parser.binary(TokenKind::Or, BindingPower::LogicalOr);
    parser.binary(TokenKind::And, BindingPower::LogicalAnd);

    // Bitwise
    parser.binary(TokenKind::Pipe, BindingPower::BitwiseOr);
    parser.binary(TokenKind::Caret, BindingPower::BitwiseXor);
    parser.binary(TokenKind::Ampersand, BindingPower::BitwiseAnd);

    // Equality and relational
    parser.binary(TokenKind::Equals, BindingPower::Equality);
    parser.binary(TokenKind::NotEquals, BindingPower::Equality);
    parser.binary(TokenKind::StrictEquals, BindingPower::Equality);
    parser.binary(TokenKind::StrictNotEquals, BindingPower::Equality);
    parser.binary(TokenKind::Less, BindingPower::Relational);
    parser.binary(TokenKind::LessEquals, BindingPower::Relational);
    parser.binary(TokenKind::Greater, BindingPower::Relational);
    parser.binary(TokenKind::GreaterEquals, BindingPower::Relational);
    parser.binary(TokenKind::Instanceof, BindingPower::Relational);
    parser.binary(TokenKind::In, BindingPower::Relational);

    // Shifts
    parser.binary(TokenKind::ShiftLeft, BindingPower::Shift);
    parser.binary(TokenKind::ShiftRight, BindingPower::Shift);
    parser.binary(TokenKind::UnsignedShiftRight, BindingPower::Shift);

    // Additive, multiplicative and exponent
    parser.binary(TokenKind::Plus, BindingPower::Additive);
    parser.binary(TokenKind::Dash, BindingPower::Additive);
    parser.binary(TokenKind::Star, BindingPower::Multiplicative);
    parser.binary(TokenKind::Slash, BindingPower::Multiplicative);
    parser.binary(TokenKind::Percent, BindingPower::Multiplicative);
    parser.binary(TokenKind::StarStar, BindingPower::Exponent);

    // Literals and symbols
    parser.nud(TokenKind::Number, parse_number_expression);
    parser.nud(TokenKind::String, parse_string_expression);
    parser.nud(TokenKind::Boolean, parse_boolean_expression);
    parser.nud(TokenKind::Null, parse_null_expression);
    parser.nud(TokenKind::TemplateString, parse_template_expression);
    parser.nud(TokenKind::TemplateHead, parse_template_expression);
    parser.nud(TokenKind::Identifier, parse_identifier_expression);
    parser.nud(TokenKind::Undefined, parse_identifier_expression);
    parser.nud(TokenKind::Await, parse_identifier_expression);
    parser.nud(TokenKind::Yield, parse_identifier_expression);
    parser.nud(TokenKind::PrivateName, parse_private_name_expression);
    parser.nud(TokenKind::This, parse_this_expression);
    parser.nud(TokenKind::Super, parse_super_expression);
    parser.nud(TokenKind::OpenBracket, parse_array_expression);
    parser.nud(TokenKind::OpenCurly, parse_object_expression);
    parser.nud(TokenKind::OpenParen, parse_parenthesized_expression);
    parser.nud(TokenKind::Async, parse_async_expression);
    parser.nud(TokenKind::Function, parse_function_expression);
    parser.nud(TokenKind::Class, parse_class_expression);

    // Statements
    parser.stmt(TokenKind::Var, parse_variable_statement);
    parser.stmt(TokenKind::Let, parse_variable_statement);
    parser.stmt(TokenKind::Const, parse_variable_statement);
    parser.stmt(TokenKind::OpenCurly, parse_block_statement);
    parser.stmt(TokenKind::Semicolon, parse_empty_statement);
    parser.stmt(TokenKind::Debugger, parse_debugger_statement);
    parser.stmt(TokenKind::If, parse_if_statement);
    parser.stmt(TokenKind::For, parse_for_statement);
    parser.stmt(TokenKind::While, parse_while_statement);
    parser.stmt(TokenKind::Do, parse_do_while_statement);
    parser.stmt(TokenKind::Return, parse_return_statement);
    parser.stmt(TokenKind::Break, parse_break_statement);
    parser.stmt(TokenKind::Continue, parse_continue_statement);
    parser.stmt(TokenKind::Throw, parse_throw_statement);
    parser.stmt(TokenKind::Try, parse_try_statement);
    parser.stmt(TokenKind::Switch, parse_switch_statement);
    parser.stmt(TokenKind::Function, parse_function_declaration);
    parser.stmt(TokenKind::Class, parse_class_declaration);
}

// Lookup tables inside parser struct, so it's easier
pub type StmtLookup = HashMap<TokenKind, StmtHandler>;
pub type NUDLookup = HashMap<TokenKind, NUDHandler>;
pub type BPLookup = HashMap<TokenKind, BindingPower>;
