//! Binding and assignment patterns.
//!
//! Patterns are parsed directly where only a pattern can appear (variable
//! declarations, parameters, `catch`). Where an expression turns out to be
//! a pattern only once `=` or `=>` is seen, the expression is converted
//! afterwards by [`expression_to_pattern`].

use crate::{
    ast::{
        ast::{Expression, Pattern},
        expressions::{Argument, AssignmentOperator, Identifier, ObjectMember, ObjectProperty},
        factory::{
            create_array_pattern, create_assignment_pattern, create_identifier,
            create_object_pattern, create_object_pattern_property, create_rest_element,
        },
        patterns::ObjectPatternMember,
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    Position, MK_SPAN,
};

use super::{
    expr::{parse_assignment_expression, ArgumentList},
    functions::parse_property_key,
    parser::Parser,
};

/// Whether the current token can name a binding here.
pub fn is_binding_identifier(parser: &Parser) -> bool {
    let context = parser.context();
    match parser.current_token_kind() {
        TokenKind::Identifier | TokenKind::Async | TokenKind::Undefined => true,
        TokenKind::Await => !context.in_async,
        TokenKind::Yield => !context.in_generator,
        _ => false,
    }
}

pub fn parse_binding_identifier(parser: &mut Parser) -> Result<Identifier, Error> {
    if !is_binding_identifier(parser) {
        return Err(parser.expected(TokenKind::Identifier));
    }

    let token = parser.advance()?;
    Ok(create_identifier(token.value, token.span))
}

/// An identifier, object pattern or array pattern.
pub fn parse_binding_target(parser: &mut Parser) -> Result<Pattern, Error> {
    match parser.current_token_kind() {
        TokenKind::OpenCurly => parser.nested(parse_object_pattern),
        TokenKind::OpenBracket => parser.nested(parse_array_pattern),
        _ => Ok(Pattern::Identifier(parse_binding_identifier(parser)?)),
    }
}

/// A binding target with an optional `= default`.
pub fn parse_binding_element(parser: &mut Parser) -> Result<Pattern, Error> {
    let start = parser.get_position();
    let target = parse_binding_target(parser)?;
    if !parser.eat(TokenKind::Assignment)? {
        return Ok(target);
    }

    let context = parser.allow_in_context();
    let default = parser.with_context(context, parse_assignment_expression)?;
    Ok(create_assignment_pattern(target, default, MK_SPAN!(parser, start)))
}

pub fn parse_rest_binding(parser: &mut Parser) -> Result<Pattern, Error> {
    let start = parser.get_position();
    parser.expect(TokenKind::Ellipsis)?;
    let argument = parse_binding_target(parser)?;
    Ok(Pattern::Rest(create_rest_element(argument, MK_SPAN!(parser, start))))
}

fn parse_object_pattern(parser: &mut Parser) -> Result<Pattern, Error> {
    let start = parser.get_position();
    parser.expect(TokenKind::OpenCurly)?;

    let mut properties = vec![];
    while parser.current_token_kind() != TokenKind::CloseCurly {
        let member_start = parser.get_position();
        if parser.eat(TokenKind::Ellipsis)? {
            let argument = Pattern::Identifier(parse_binding_identifier(parser)?);
            properties.push(ObjectPatternMember::Rest(create_rest_element(
                argument,
                MK_SPAN!(parser, member_start),
            )));
            if parser.current_token_kind() != TokenKind::CloseCurly {
                return Err(parser.unexpected_with("a rest element must be last"));
            }
            break;
        }

        let binding_key = is_binding_identifier(parser);
        let (key, computed) = parse_property_key(parser, false)?;

        let (value, shorthand) = if parser.eat(TokenKind::Colon)? {
            (parse_binding_element(parser)?, false)
        } else {
            let name = match (&key, binding_key) {
                (Expression::Identifier(identifier), true) => identifier.clone(),
                _ => return Err(parser.expected(TokenKind::Colon)),
            };
            let mut value = Pattern::Identifier(name);
            if parser.eat(TokenKind::Assignment)? {
                let context = parser.allow_in_context();
                let default = parser.with_context(context, parse_assignment_expression)?;
                value = create_assignment_pattern(value, default, MK_SPAN!(parser, member_start));
            }
            (value, true)
        };

        properties.push(ObjectPatternMember::Property(create_object_pattern_property(
            key,
            value,
            computed,
            shorthand,
            MK_SPAN!(parser, member_start),
        )));

        if parser.current_token_kind() != TokenKind::CloseCurly {
            parser.expect(TokenKind::Comma)?;
        }
    }

    parser.expect(TokenKind::CloseCurly)?;
    Ok(create_object_pattern(properties, MK_SPAN!(parser, start)))
}

fn parse_array_pattern(parser: &mut Parser) -> Result<Pattern, Error> {
    let start = parser.get_position();
    parser.expect(TokenKind::OpenBracket)?;

    let mut elements = vec![];
    while parser.current_token_kind() != TokenKind::CloseBracket {
        if parser.eat(TokenKind::Comma)? {
            elements.push(None);
            continue;
        }

        if parser.current_token_kind() == TokenKind::Ellipsis {
            elements.push(Some(parse_rest_binding(parser)?));
            if parser.current_token_kind() != TokenKind::CloseBracket {
                return Err(parser.unexpected_with("a rest element must be last"));
            }
            break;
        }

        elements.push(Some(parse_binding_element(parser)?));
        if parser.current_token_kind() != TokenKind::CloseBracket {
            parser.expect(TokenKind::Comma)?;
        }
    }

    parser.expect(TokenKind::CloseBracket)?;
    Ok(create_array_pattern(elements, MK_SPAN!(parser, start)))
}

// CONVERSION

fn invalid_target(position: Position) -> Error {
    Error::new(ErrorImpl::InvalidAssignmentTarget, position)
}

/// Reinterprets an already-parsed expression as a pattern.
///
/// With `binding` set the result must only bind names (arrow parameters);
/// otherwise member expressions are valid targets as well.
pub fn expression_to_pattern(expression: Expression, binding: bool) -> Result<Pattern, Error> {
    let start = expression.get_span().start;
    match expression {
        Expression::Identifier(identifier) => Ok(Pattern::Identifier(identifier)),
        Expression::Member(member) if !binding && !member.optional => Ok(Pattern::Member(member)),
        Expression::Array(array) => {
            let mut elements = Vec::with_capacity(array.elements.len());
            let count = array.elements.len();
            for (index, element) in array.elements.into_iter().enumerate() {
                let pattern = match element {
                    None => None,
                    Some(Argument::Spread(spread)) => {
                        if index + 1 != count {
                            return Err(invalid_target(spread.span.start));
                        }
                        let argument = expression_to_pattern(*spread.argument, binding)?;
                        Some(Pattern::Rest(create_rest_element(argument, spread.span)))
                    }
                    Some(Argument::Expression(element)) => Some(expression_to_pattern(element, binding)?),
                };
                elements.push(pattern);
            }
            Ok(create_array_pattern(elements, array.span))
        }
        Expression::Object(object) => {
            let count = object.properties.len();
            let mut properties = Vec::with_capacity(count);
            for (index, member) in object.properties.into_iter().enumerate() {
                let property = match member {
                    ObjectMember::Property(property) => property_to_pattern(property, binding)?,
                    ObjectMember::Spread(spread) => {
                        if index + 1 != count {
                            return Err(invalid_target(spread.span.start));
                        }
                        let argument = expression_to_pattern(*spread.argument, binding)?;
                        ObjectPatternMember::Rest(create_rest_element(argument, spread.span))
                    }
                    ObjectMember::Method(method) => return Err(invalid_target(method.span.start)),
                };
                properties.push(property);
            }
            Ok(create_object_pattern(properties, object.span))
        }
        Expression::Assignment(assignment) if assignment.operator == AssignmentOperator::Assign => {
            if binding {
                validate_binding(&assignment.left)?;
            }
            Ok(create_assignment_pattern(
                *assignment.left,
                *assignment.right,
                assignment.span,
            ))
        }
        _ => Err(invalid_target(start)),
    }
}

fn property_to_pattern(property: ObjectProperty, binding: bool) -> Result<ObjectPatternMember, Error> {
    let value = expression_to_pattern(property.value, binding)?;
    Ok(ObjectPatternMember::Property(create_object_pattern_property(
        property.key,
        value,
        property.computed,
        property.shorthand,
        property.span,
    )))
}

/// Rejects member expressions anywhere inside a binding pattern.
fn validate_binding(pattern: &Pattern) -> Result<(), Error> {
    match pattern {
        Pattern::Identifier(_) => Ok(()),
        Pattern::Member(member) => Err(invalid_target(member.span.start)),
        Pattern::Assignment(assignment) => validate_binding(&assignment.left),
        Pattern::Rest(rest) => validate_binding(&rest.argument),
        Pattern::Array(array) => array.elements.iter().flatten().try_for_each(validate_binding),
        Pattern::Object(object) => object.properties.iter().try_for_each(|member| match member {
            ObjectPatternMember::Property(property) => validate_binding(&property.value),
            ObjectPatternMember::Rest(rest) => validate_binding(&rest.argument),
        }),
    }
}

/// Converts a parenthesized list into arrow parameters. A parameter may
/// not sit in parentheses of its own.
pub fn arguments_to_params(list: ArgumentList) -> Result<Vec<Pattern>, Error> {
    if let Some(position) = list.wrapped_item {
        return Err(invalid_target(position));
    }

    let count = list.arguments.len();
    let mut params = Vec::with_capacity(count);

    for (index, argument) in list.arguments.into_iter().enumerate() {
        let param = match argument {
            Argument::Expression(expression) => expression_to_pattern(expression, true)?,
            Argument::Spread(spread) => {
                if index + 1 != count {
                    return Err(invalid_target(spread.span.start));
                }
                let argument = expression_to_pattern(*spread.argument, true)?;
                Pattern::Rest(create_rest_element(argument, spread.span))
            }
        };
        params.push(param);
    }

    Ok(params)
}

/// The target of a compound assignment: an identifier or a member access.
pub fn simple_assignment_target(expression: Expression) -> Result<Pattern, Error> {
    check_simple_target(&expression)?;
    match expression {
        Expression::Identifier(identifier) => Ok(Pattern::Identifier(identifier)),
        Expression::Member(member) => Ok(Pattern::Member(member)),
        other => Err(invalid_target(other.get_span().start)),
    }
}

/// The operand of `++`/`--` and the target of compound assignment must be
/// an identifier or a non-optional member access.
pub fn check_simple_target(expression: &Expression) -> Result<(), Error> {
    match expression {
        Expression::Identifier(_) => Ok(()),
        Expression::Member(member) if !member.optional => Ok(()),
        other => Err(invalid_target(other.get_span().start)),
    }
}
