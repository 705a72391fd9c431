use log::trace;

use crate::{
    ast::{
        ast::{Expression, NodeKind, Pattern, Statement},
        declarations::{Class, ClassBody, ClassElement, Function, MethodDefinition, MethodKind},
        expressions::Identifier,
        factory::{
            create_block, create_class, create_class_body, create_class_property, create_function,
            create_identifier, create_method_definition, create_private_name,
            create_string_literal, to_class_declaration, to_class_expression,
            to_function_declaration, to_function_expression,
        },
        statements::BlockStatement,
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    Position, MK_SPAN,
};

use super::{
    expr::{
        parse_assignment_expression, parse_expression_allow_in, parse_lhs_expression,
        parse_number_expression,
    },
    parser::{Context, Parser},
    patterns::{is_binding_identifier, parse_binding_element, parse_binding_identifier, parse_rest_binding},
    stmt::parse_statement,
};

/// Parses `function`, an optional `*`, an optional name and the rest of the
/// function. `start` is where the function began, which is the `async`
/// keyword for async functions.
pub fn parse_function(
    parser: &mut Parser,
    start: Position,
    is_async: bool,
    require_name: bool,
) -> Result<Function, Error> {
    if parser.current_token_kind() != TokenKind::Function {
        return Err(parser.unreachable("function"));
    }
    parser.advance()?;

    let is_generator = parser.eat(TokenKind::Star)?;
    let id = if is_binding_identifier(parser) {
        Some(parse_binding_identifier(parser)?)
    } else if require_name {
        return Err(parser.unexpected_with("function declarations require a name"));
    } else {
        None
    };

    parse_function_rest(parser, start, id, is_async, is_generator)
}

/// Parses the parameter list and body shared by functions and methods.
fn parse_function_rest(
    parser: &mut Parser,
    start: Position,
    id: Option<Identifier>,
    is_async: bool,
    is_generator: bool,
) -> Result<Function, Error> {
    let context = Context {
        maybe_arrow: false,
        in_async: is_async,
        in_generator: is_generator,
        allow_in: true,
        ..parser.context()
    };

    parser.with_context(context, |parser| {
        let params = parse_formal_parameters(parser)?;
        let body = parse_function_body(parser)?;
        Ok(create_function(
            id,
            params,
            body,
            is_async,
            is_generator,
            MK_SPAN!(parser, start),
        ))
    })
}

pub fn parse_formal_parameters(parser: &mut Parser) -> Result<Vec<Pattern>, Error> {
    parser.expect(TokenKind::OpenParen)?;

    let mut params = vec![];
    while parser.current_token_kind() != TokenKind::CloseParen {
        if parser.current_token_kind() == TokenKind::Ellipsis {
            params.push(parse_rest_binding(parser)?);
            if parser.current_token_kind() != TokenKind::CloseParen {
                return Err(parser.unexpected_with("a rest parameter must be last"));
            }
            break;
        }

        params.push(parse_binding_element(parser)?);
        if parser.current_token_kind() != TokenKind::CloseParen {
            parser.expect(TokenKind::Comma)?;
        }
    }

    parser.expect(TokenKind::CloseParen)?;
    Ok(params)
}

/// Parses `{ statements }` for a function or arrow body.
pub fn parse_function_body(parser: &mut Parser) -> Result<BlockStatement, Error> {
    let start = parser.get_position();
    parser.expect(TokenKind::OpenCurly)?;

    let mut body = vec![];
    while parser.current_token_kind() != TokenKind::CloseCurly {
        if !parser.has_tokens() {
            return Err(parser.expected(TokenKind::CloseCurly));
        }
        body.push(parse_statement(parser)?);
    }

    parser.expect(TokenKind::CloseCurly)?;
    Ok(create_block(body, MK_SPAN!(parser, start)))
}

pub fn parse_function_declaration(parser: &mut Parser) -> Result<Statement, Error> {
    let start = parser.get_position();
    let is_async = parser.eat(TokenKind::Async)?;
    let function = parse_function(parser, start, is_async, true)?;
    Ok(Statement::FunctionDeclaration(Box::new(to_function_declaration(function))))
}

pub fn parse_function_expression(parser: &mut Parser) -> Result<Expression, Error> {
    let start = parser.get_position();
    let function = parse_function(parser, start, false, false)?;
    Ok(Expression::Function(Box::new(to_function_expression(function))))
}

pub fn parse_class_declaration(parser: &mut Parser) -> Result<Statement, Error> {
    let class = parse_class(parser, true)?;
    Ok(Statement::ClassDeclaration(Box::new(to_class_declaration(class))))
}

pub fn parse_class_expression(parser: &mut Parser) -> Result<Expression, Error> {
    let class = parse_class(parser, false)?;
    Ok(Expression::Class(Box::new(to_class_expression(class))))
}

pub fn parse_class(parser: &mut Parser, require_name: bool) -> Result<Class, Error> {
    let start = parser.get_position();
    parser.expect(TokenKind::Class)?;

    let id = if is_binding_identifier(parser) {
        Some(parse_binding_identifier(parser)?)
    } else if require_name {
        return Err(parser.unexpected_with("class declarations require a name"));
    } else {
        None
    };

    let super_class = if parser.eat(TokenKind::Extends)? {
        Some(parse_lhs_expression(parser)?)
    } else {
        None
    };

    let context = Context {
        maybe_arrow: false,
        in_class: true,
        allow_in: true,
        ..parser.context()
    };
    let body = parser.with_context(context, parse_class_body)?;

    Ok(create_class(id, super_class, body, MK_SPAN!(parser, start)))
}

fn parse_class_body(parser: &mut Parser) -> Result<ClassBody, Error> {
    let start = parser.get_position();
    parser.expect(TokenKind::OpenCurly)?;

    let mut body = vec![];
    while parser.current_token_kind() != TokenKind::CloseCurly {
        if parser.eat(TokenKind::Semicolon)? {
            continue;
        }
        if !parser.has_tokens() {
            return Err(parser.expected(TokenKind::CloseCurly));
        }

        let element = match parse_property_definition(parser, true)? {
            PropertyDefinition::Method(method) => ClassElement::Method(method),
            PropertyDefinition::Field(field) => parse_class_field(parser, field)?,
        };
        trace!(kind:? = element_kind(&element); "Parsed class element");
        body.push(element);
    }

    parser.expect(TokenKind::CloseCurly)?;
    Ok(create_class_body(body, MK_SPAN!(parser, start)))
}

fn element_kind(element: &ClassElement) -> NodeKind {
    match element {
        ClassElement::Method(method) => method.kind,
        ClassElement::Property(_) => NodeKind::ClassProperty,
    }
}

/// `key = value;` or `key;` in a class body.
fn parse_class_field(parser: &mut Parser, field: FieldHead) -> Result<ClassElement, Error> {
    let value = if parser.eat(TokenKind::Assignment)? {
        Some(parse_assignment_expression(parser)?)
    } else {
        None
    };
    let span = MK_SPAN!(parser, field.start);
    parser.consume_semicolon()?;

    Ok(ClassElement::Property(create_class_property(
        field.key,
        field.computed,
        value,
        field.is_static,
        span,
    )))
}

/// A property key with its modifiers, before the caller decides whether it
/// is a field, an object property or a shorthand.
pub struct FieldHead {
    pub key: Expression,
    pub computed: bool,
    pub is_static: bool,
    /// Set when the key could also be read as a shorthand identifier.
    pub shorthand: Option<Identifier>,
    pub start: Position,
}

pub enum PropertyDefinition {
    Method(MethodDefinition),
    Field(FieldHead),
}

/// Whether a modifier word is really the property name, as in `{ get: 1 }`
/// or `class { static() {} }`.
fn modifier_is_name(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::OpenParen
            | TokenKind::Colon
            | TokenKind::Comma
            | TokenKind::CloseCurly
            | TokenKind::Assignment
            | TokenKind::Semicolon
    )
}

/// Parses the modifiers, the key and, for methods, the whole method of a
/// class element or object literal member.
pub fn parse_property_definition(
    parser: &mut Parser,
    in_class: bool,
) -> Result<PropertyDefinition, Error> {
    let start = parser.get_position();

    let mut is_static = false;
    if in_class && parser.current_token().is_contextual("static") {
        let next = parser.lookahead()?;
        if !modifier_is_name(next.kind) {
            parser.advance()?;
            is_static = true;
        }
    }

    let mut is_async = false;
    if parser.current_token_kind() == TokenKind::Async {
        let next = parser.lookahead()?;
        if !next.newline_before && !modifier_is_name(next.kind) {
            parser.advance()?;
            is_async = true;
        }
    }

    let mut method = MethodKind::Method;
    let getter = parser.current_token().is_contextual("get");
    if getter || parser.current_token().is_contextual("set") {
        let next = parser.lookahead()?;
        if !modifier_is_name(next.kind) {
            if is_async {
                return Err(invalid_modifiers(start, "accessors cannot be async"));
            }
            parser.advance()?;
            method = if getter { MethodKind::Get } else { MethodKind::Set };
        }
    }

    let is_generator = parser.current_token_kind() == TokenKind::Star;
    if is_generator {
        if method != MethodKind::Method {
            return Err(invalid_modifiers(start, "accessors cannot be generators"));
        }
        parser.advance()?;
    }

    let shorthand_candidate = !in_class && is_binding_identifier(parser);
    let (key, computed) = parse_property_key(parser, in_class)?;

    let is_constructor = in_class
        && !is_static
        && !computed
        && match &key {
            Expression::Identifier(identifier) => identifier.name == "constructor",
            Expression::String(literal) => literal.value == "constructor",
            _ => false,
        };

    if parser.current_token_kind() != TokenKind::OpenParen {
        if is_async || is_generator || method != MethodKind::Method {
            return Err(parser.expected(TokenKind::OpenParen));
        }

        let shorthand = match (&key, shorthand_candidate) {
            (Expression::Identifier(identifier), true) => Some(identifier.clone()),
            _ => None,
        };
        return Ok(PropertyDefinition::Field(FieldHead {
            key,
            computed,
            is_static,
            shorthand,
            start,
        }));
    }

    if is_constructor {
        if is_async || is_generator {
            return Err(invalid_modifiers(
                start,
                "class constructors cannot be async or generators",
            ));
        }
        if method != MethodKind::Method {
            return Err(invalid_modifiers(start, "class constructors cannot be accessors"));
        }
        method = MethodKind::Constructor;
    }

    let value_start = parser.get_position();
    let value = parse_function_rest(parser, value_start, None, is_async, is_generator)?;

    match method {
        MethodKind::Get if !value.params.is_empty() => {
            return Err(invalid_modifiers(start, "getters cannot take parameters"));
        }
        MethodKind::Set if value.params.is_empty() => {
            return Err(invalid_modifiers(start, "setters must take a parameter"));
        }
        _ => {}
    }

    Ok(PropertyDefinition::Method(create_method_definition(
        key,
        computed,
        method,
        is_static,
        in_class,
        value,
        MK_SPAN!(parser, start),
    )))
}

fn invalid_modifiers(start: Position, message: &str) -> Error {
    Error::new(
        ErrorImpl::InvalidModifiers {
            message: message.to_string(),
        },
        start,
    )
}

/// Parses a property name: `[expression]`, a string, a number, a private
/// name in classes, or any word.
pub fn parse_property_key(parser: &mut Parser, in_class: bool) -> Result<(Expression, bool), Error> {
    match parser.current_token_kind() {
        TokenKind::OpenBracket => {
            parser.advance()?;
            let key = parse_expression_allow_in(parser)?;
            parser.expect(TokenKind::CloseBracket)?;
            Ok((key, true))
        }
        TokenKind::String => {
            let token = parser.advance()?;
            Ok((
                Expression::String(create_string_literal(token.value, token.raw, token.span)),
                false,
            ))
        }
        TokenKind::Number => Ok((parse_number_expression(parser)?, false)),
        TokenKind::PrivateName if in_class => {
            let token = parser.advance()?;
            Ok((Expression::PrivateName(create_private_name(token.value, token.span)), false))
        }
        kind if kind.is_word() => {
            let token = parser.advance()?;
            Ok((Expression::Identifier(create_identifier(token.value, token.span)), false))
        }
        _ => Err(parser.unexpected_with("expected a property name")),
    }
}
