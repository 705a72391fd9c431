use crate::{
    ast::{
        ast::{Expression, Pattern},
        expressions::{
            Argument, ArrowBody, AssignmentOperator, BinaryOperator, LogicalOperator, ObjectMember,
            TemplateElement, TemplateLiteral, UnaryOperator, UpdateOperator,
        },
        factory::{
            create_array, create_arrow_function, create_assignment, create_await, create_binary,
            create_boolean, create_call, create_chain, create_conditional, create_identifier,
            create_logical, create_member, create_new, create_null, create_number, create_object,
            create_private_name, create_property, create_sequence, create_spread,
            create_string_literal, create_super, create_tagged_template, create_template_element,
            create_template_literal, create_this, create_unary, create_update, create_yield,
        },
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
    Position, Span, MK_SPAN,
};

use super::{
    functions::{parse_function, parse_function_body, parse_property_definition, FieldHead, PropertyDefinition},
    lookups::{is_right_associative, BindingPower},
    parser::{Context, Parser},
    patterns::{
        arguments_to_params, check_simple_target, expression_to_pattern, is_binding_identifier,
        parse_binding_identifier, simple_assignment_target,
    },
};

/// Parses a comma-separated expression list, producing a
/// `SequenceExpression` when there is more than one.
pub fn parse_expression(parser: &mut Parser) -> Result<Expression, Error> {
    let start = parser.get_position();
    let first = parse_assignment_expression(parser)?;
    if parser.current_token_kind() != TokenKind::Comma {
        return Ok(first);
    }

    let mut expressions = vec![first];
    while parser.eat(TokenKind::Comma)? {
        expressions.push(parse_assignment_expression(parser)?);
    }

    Ok(create_sequence(expressions, MK_SPAN!(parser, start)))
}

/// Parses an expression inside brackets, where `in` is always an operator.
pub fn parse_expression_allow_in(parser: &mut Parser) -> Result<Expression, Error> {
    let context = parser.allow_in_context();
    parser.with_context(context, parse_expression)
}

pub fn parse_assignment_expression(parser: &mut Parser) -> Result<Expression, Error> {
    parser.nested(parse_assignment)
}

fn parse_assignment(parser: &mut Parser) -> Result<Expression, Error> {
    let start = parser.get_position();
    let kind = parser.current_token_kind();

    if kind == TokenKind::Yield && parser.context().in_generator {
        return parse_yield_expression(parser);
    }

    if starts_identifier_arrow(parser)? {
        let param = parse_binding_identifier(parser)?;
        return parse_arrow_function(parser, start, vec![Pattern::Identifier(param)], false);
    }

    if kind == TokenKind::Async {
        let next = parser.lookahead()?;
        if !next.newline_before {
            if next.kind == TokenKind::Identifier {
                parser.advance()?;
                let param = parse_binding_identifier(parser)?;
                return parse_arrow_function(parser, start, vec![Pattern::Identifier(param)], true);
            }
            if next.kind == TokenKind::OpenParen {
                parser.set_maybe_arrow();
            }
        }
    }

    if kind == TokenKind::OpenParen {
        parser.set_maybe_arrow();
    }

    let left = parse_conditional_expression(parser)?;
    if matches!(left, Expression::Arrow(_)) {
        return Ok(left);
    }

    let Some(operator) = AssignmentOperator::from_token(parser.current_token_kind()) else {
        return Ok(left);
    };

    let target = if operator == AssignmentOperator::Assign {
        expression_to_pattern(left, false)?
    } else {
        simple_assignment_target(left)?
    };
    parser.advance()?;
    let right = parse_assignment_expression(parser)?;

    Ok(create_assignment(operator, target, right, MK_SPAN!(parser, start)))
}

/// `x => ...` needs one token of lookahead past the identifier.
fn starts_identifier_arrow(parser: &mut Parser) -> Result<bool, Error> {
    if !is_binding_identifier(parser) {
        return Ok(false);
    }

    let next = parser.lookahead()?;
    Ok(next.kind == TokenKind::Arrow && !next.newline_before)
}

/// Parses `=> body` for parameters that have already been read.
fn parse_arrow_function(
    parser: &mut Parser,
    start: Position,
    params: Vec<Pattern>,
    is_async: bool,
) -> Result<Expression, Error> {
    if parser.current_token().newline_before {
        return Err(parser.unexpected_with("line break is not allowed before `=>`"));
    }
    parser.expect(TokenKind::Arrow)?;

    let context = Context {
        maybe_arrow: false,
        in_async: is_async,
        in_generator: false,
        ..parser.context()
    };

    let body = if parser.current_token_kind() == TokenKind::OpenCurly {
        let context = Context {
            allow_in: true,
            ..context
        };
        ArrowBody::Block(parser.with_context(context, parse_function_body)?)
    } else {
        ArrowBody::Expression(Box::new(
            parser.with_context(context, parse_assignment_expression)?,
        ))
    };

    Ok(create_arrow_function(params, body, is_async, MK_SPAN!(parser, start)))
}

fn parse_yield_expression(parser: &mut Parser) -> Result<Expression, Error> {
    let start = parser.get_position();
    parser.expect(TokenKind::Yield)?;

    let token = parser.current_token();
    let same_line = !token.newline_before;
    let delegate = same_line && token.kind == TokenKind::Star;
    let has_argument = same_line && !ends_yield(token.kind);

    if delegate {
        parser.advance()?;
    }

    let argument = if delegate || has_argument {
        Some(parse_assignment_expression(parser)?)
    } else {
        None
    };

    Ok(create_yield(argument, delegate, MK_SPAN!(parser, start)))
}

fn ends_yield(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::CloseParen
            | TokenKind::CloseBracket
            | TokenKind::CloseCurly
            | TokenKind::Comma
            | TokenKind::Semicolon
            | TokenKind::Colon
            | TokenKind::Question
            | TokenKind::In
            | TokenKind::TemplateMiddle
            | TokenKind::TemplateTail
            | TokenKind::EOF
    )
}

pub fn parse_conditional_expression(parser: &mut Parser) -> Result<Expression, Error> {
    let start = parser.get_position();
    let test = parse_binary_expression(parser)?;
    if matches!(test, Expression::Arrow(_)) || parser.current_token_kind() != TokenKind::Question {
        return Ok(test);
    }

    parser.advance()?;
    let context = parser.allow_in_context();
    let consequent = parser.with_context(context, parse_assignment_expression)?;
    parser.expect(TokenKind::Colon)?;
    let alternate = parse_assignment_expression(parser)?;

    Ok(create_conditional(test, consequent, alternate, MK_SPAN!(parser, start)))
}

/// Parses one unary operand and folds any following binary operators onto
/// it by precedence climbing.
pub fn parse_binary_expression(parser: &mut Parser) -> Result<Expression, Error> {
    let left = parse_unary_expression(parser)?;
    if matches!(left, Expression::Arrow(_)) {
        return Ok(left);
    }

    parse_binary_ops(parser, left, BindingPower::LogicalOr.precedence())
}

fn parse_binary_ops(
    parser: &mut Parser,
    mut left: Expression,
    min_precedence: u8,
) -> Result<Expression, Error> {
    while let Some(binding_power) = parser.get_binding_power(parser.current_token_kind()) {
        let precedence = binding_power.precedence();
        if precedence < min_precedence {
            break;
        }

        let operator = parser.advance()?.kind;
        let mut right = parse_unary_expression(parser)?;

        // Climb into tighter operators, or into an equal one that groups right.
        while let Some(next) = parser.get_binding_power(parser.current_token_kind()) {
            let next_precedence = next.precedence();
            let tighter = next_precedence > precedence;
            if !tighter
                && !(next_precedence == precedence
                    && is_right_associative(parser.current_token_kind()))
            {
                break;
            }

            let next_min = if tighter { precedence + 1 } else { precedence };
            right = parser.nested(|parser| parse_binary_ops(parser, right, next_min))?;
        }

        left = create_operator_expression(parser, operator, left, right)?;
    }

    Ok(left)
}

fn create_operator_expression(
    parser: &Parser,
    operator: TokenKind,
    left: Expression,
    right: Expression,
) -> Result<Expression, Error> {
    let span = MK_SPAN!(parser, left.get_span().start);

    if let Some(logical) = LogicalOperator::from_token(operator) {
        return Ok(create_logical(logical, left, right, span));
    }

    match BinaryOperator::from_token(operator) {
        Some(binary) => Ok(create_binary(binary, left, right, span)),
        None => Err(Error::new(
            ErrorImpl::Unreachable {
                message: format!("{} has a binding power but is not a binary operator", operator),
            },
            span.start,
        )),
    }
}

pub fn parse_unary_expression(parser: &mut Parser) -> Result<Expression, Error> {
    let start = parser.get_position();
    let kind = parser.current_token_kind();

    if let Some(operator) = UnaryOperator::from_token(kind) {
        parser.advance()?;
        let argument = parser.nested(parse_unary_expression)?;
        return Ok(create_unary(operator, argument, MK_SPAN!(parser, start)));
    }

    if let Some(operator) = UpdateOperator::from_token(kind) {
        parser.advance()?;
        let argument = parser.nested(parse_unary_expression)?;
        check_simple_target(&argument)?;
        return Ok(create_update(operator, true, argument, MK_SPAN!(parser, start)));
    }

    if kind == TokenKind::Await && parser.context().in_async {
        parser.advance()?;
        let argument = parser.nested(parse_unary_expression)?;
        return Ok(create_await(argument, MK_SPAN!(parser, start)));
    }

    parse_postfix_expression(parser)
}

fn parse_postfix_expression(parser: &mut Parser) -> Result<Expression, Error> {
    let start = parser.get_position();
    let expression = parse_lhs_expression(parser)?;
    if matches!(expression, Expression::Arrow(_)) {
        return Ok(expression);
    }

    let (kind, newline) = {
        let token = parser.current_token();
        (token.kind, token.newline_before)
    };

    match UpdateOperator::from_token(kind) {
        // `a\n++b` is `a; ++b`
        Some(operator) if !newline => {
            check_simple_target(&expression)?;
            parser.advance()?;
            Ok(create_update(operator, false, expression, MK_SPAN!(parser, start)))
        }
        _ => Ok(expression),
    }
}

/// Parses a primary or `new` expression followed by any run of member
/// accesses, calls, optional links and tagged templates.
///
/// If any link is optional the whole chain is wrapped in a single
/// `ChainExpression`.
pub fn parse_lhs_expression(parser: &mut Parser) -> Result<Expression, Error> {
    let start = parser.get_position();
    let mut expression = if parser.current_token_kind() == TokenKind::New {
        parse_new_expression(parser)?
    } else {
        parse_primary_expression(parser)?
    };

    if matches!(expression, Expression::Arrow(_)) {
        return Ok(expression);
    }

    let mut optional_chain = false;
    loop {
        expression = match parser.current_token_kind() {
            TokenKind::QuestionDot => {
                parser.advance()?;
                optional_chain = true;
                match parser.current_token_kind() {
                    TokenKind::OpenParen => {
                        let arguments = parse_arguments(parser)?;
                        create_call(expression, arguments, true, MK_SPAN!(parser, start))
                    }
                    TokenKind::OpenBracket => parse_computed_member(parser, expression, start, true)?,
                    TokenKind::TemplateString | TokenKind::TemplateHead => {
                        return Err(parser.unexpected_with(
                            "tagged templates cannot be used in an optional chain",
                        ));
                    }
                    _ => parse_static_member(parser, expression, start, true)?,
                }
            }
            TokenKind::Dot => {
                parser.advance()?;
                parse_static_member(parser, expression, start, false)?
            }
            TokenKind::OpenBracket => parse_computed_member(parser, expression, start, false)?,
            TokenKind::OpenParen => {
                let arguments = parse_arguments(parser)?;
                create_call(expression, arguments, false, MK_SPAN!(parser, start))
            }
            TokenKind::TemplateString | TokenKind::TemplateHead => {
                if optional_chain {
                    return Err(parser.unexpected_with(
                        "tagged templates cannot be used in an optional chain",
                    ));
                }
                let quasi = parse_template_literal(parser)?;
                create_tagged_template(expression, quasi, MK_SPAN!(parser, start))
            }
            _ => break,
        };
    }

    if optional_chain {
        expression = create_chain(expression, MK_SPAN!(parser, start));
    }

    Ok(expression)
}

/// `new` binds its argument list to the nearest member expression, so only
/// member accesses are consumed before the arguments.
fn parse_new_expression(parser: &mut Parser) -> Result<Expression, Error> {
    let start = parser.get_position();
    parser.expect(TokenKind::New)?;

    let callee_start = parser.get_position();
    let mut callee = if parser.current_token_kind() == TokenKind::New {
        parser.nested(parse_new_expression)?
    } else {
        parse_primary_expression(parser)?
    };

    loop {
        callee = match parser.current_token_kind() {
            TokenKind::Dot => {
                parser.advance()?;
                parse_static_member(parser, callee, callee_start, false)?
            }
            TokenKind::OpenBracket => parse_computed_member(parser, callee, callee_start, false)?,
            TokenKind::TemplateString | TokenKind::TemplateHead => {
                let quasi = parse_template_literal(parser)?;
                create_tagged_template(callee, quasi, MK_SPAN!(parser, callee_start))
            }
            TokenKind::QuestionDot => {
                return Err(parser.unexpected_with(
                    "optional chaining cannot appear in the callee of a new expression",
                ));
            }
            _ => break,
        };
    }

    let arguments = if parser.current_token_kind() == TokenKind::OpenParen {
        parse_arguments(parser)?
    } else {
        vec![]
    };

    Ok(create_new(callee, arguments, MK_SPAN!(parser, start)))
}

/// Parses the property after `.` or `?.`.
fn parse_static_member(
    parser: &mut Parser,
    object: Expression,
    start: Position,
    optional: bool,
) -> Result<Expression, Error> {
    let kind = parser.current_token_kind();
    let property = if kind == TokenKind::PrivateName {
        if !parser.context().in_class {
            return Err(parser.unexpected_with("private names are only valid inside a class body"));
        }
        let token = parser.advance()?;
        Expression::PrivateName(create_private_name(token.value, token.span))
    } else if kind.is_word() {
        let token = parser.advance()?;
        Expression::Identifier(create_identifier(token.value, token.span))
    } else {
        return Err(parser.unexpected_with("expected a property name"));
    };

    Ok(Expression::Member(create_member(
        object,
        property,
        false,
        optional,
        MK_SPAN!(parser, start),
    )))
}

fn parse_computed_member(
    parser: &mut Parser,
    object: Expression,
    start: Position,
    optional: bool,
) -> Result<Expression, Error> {
    parser.expect(TokenKind::OpenBracket)?;
    let property = parse_expression_allow_in(parser)?;
    parser.expect(TokenKind::CloseBracket)?;

    Ok(Expression::Member(create_member(
        object,
        property,
        true,
        optional,
        MK_SPAN!(parser, start),
    )))
}

pub fn parse_arguments(parser: &mut Parser) -> Result<Vec<Argument>, Error> {
    Ok(parse_argument_list(parser)?.arguments)
}

/// A `( ... )` list before it is known to be call arguments, a grouping or
/// arrow parameters.
#[derive(Debug)]
pub struct ArgumentList {
    pub arguments: Vec<Argument>,
    pub trailing_comma: bool,
    /// Start of the first item that sits in its own parentheses, as `(a)`
    /// does in `((a), b)`.
    pub wrapped_item: Option<Position>,
}

fn parse_argument_list(parser: &mut Parser) -> Result<ArgumentList, Error> {
    parser.expect(TokenKind::OpenParen)?;

    let context = parser.allow_in_context();
    let list = parser.with_context(context, |parser| {
        let mut list = ArgumentList {
            arguments: vec![],
            trailing_comma: false,
            wrapped_item: None,
        };
        while parser.current_token_kind() != TokenKind::CloseParen {
            let start = parser.get_position();
            let argument = parse_argument(parser)?;
            // Parentheses leave no node, so a wrapped item starts after its first token.
            if let Argument::Expression(expression) = &argument {
                if list.wrapped_item.is_none() && expression.get_span().start.index != start.index {
                    list.wrapped_item = Some(start);
                }
            }
            list.arguments.push(argument);

            if parser.current_token_kind() != TokenKind::CloseParen {
                parser.expect(TokenKind::Comma)?;
                list.trailing_comma = parser.current_token_kind() == TokenKind::CloseParen;
            }
        }
        Ok(list)
    })?;

    parser.expect(TokenKind::CloseParen)?;
    Ok(list)
}

fn parse_argument(parser: &mut Parser) -> Result<Argument, Error> {
    let start = parser.get_position();
    if parser.eat(TokenKind::Ellipsis)? {
        let argument = parse_assignment_expression(parser)?;
        return Ok(Argument::Spread(create_spread(argument, MK_SPAN!(parser, start))));
    }

    Ok(Argument::Expression(parse_assignment_expression(parser)?))
}

// PRIMARY EXPRESSIONS

pub fn parse_primary_expression(parser: &mut Parser) -> Result<Expression, Error> {
    let kind = parser.current_token_kind();
    let handler = match parser.get_nud_lookup().get(&kind) {
        Some(handler) => *handler,
        None => return Err(parser.unexpected()),
    };

    handler(parser)
}

pub fn parse_number_expression(parser: &mut Parser) -> Result<Expression, Error> {
    let token = parser.expect(TokenKind::Number)?;
    let value = token.value.parse::<f64>().map_err(|_| {
        Error::new(
            ErrorImpl::NumberParseError {
                token: token.raw.clone(),
            },
            token.span.start,
        )
    })?;

    Ok(create_number(value, token.raw, token.span))
}

pub fn parse_string_expression(parser: &mut Parser) -> Result<Expression, Error> {
    let token = parser.expect(TokenKind::String)?;
    Ok(Expression::String(create_string_literal(
        token.value,
        token.raw,
        token.span,
    )))
}

pub fn parse_boolean_expression(parser: &mut Parser) -> Result<Expression, Error> {
    let token = parser.expect(TokenKind::Boolean)?;
    Ok(create_boolean(token.value == "true", token.span))
}

pub fn parse_null_expression(parser: &mut Parser) -> Result<Expression, Error> {
    let token = parser.expect(TokenKind::Null)?;
    Ok(create_null(token.span))
}

/// Identifiers, including `undefined` and `await`/`yield` outside the
/// functions that make them keywords.
pub fn parse_identifier_expression(parser: &mut Parser) -> Result<Expression, Error> {
    let context = parser.context();
    match parser.current_token_kind() {
        TokenKind::Await if context.in_async => {
            return Err(parser.unexpected_with("`await` is a keyword inside async functions"));
        }
        TokenKind::Yield if context.in_generator => {
            return Err(parser.unexpected_with("`yield` is a keyword inside generators"));
        }
        _ => {}
    }

    let token = parser.advance()?;
    Ok(Expression::Identifier(create_identifier(token.value, token.span)))
}

/// `#name in object`
pub fn parse_private_name_expression(parser: &mut Parser) -> Result<Expression, Error> {
    if !parser.context().in_class {
        return Err(parser.unexpected_with("private names are only valid inside a class body"));
    }

    let token = parser.expect(TokenKind::PrivateName)?;
    if parser.current_token_kind() != TokenKind::In {
        return Err(parser.expected(TokenKind::In));
    }

    Ok(Expression::PrivateName(create_private_name(token.value, token.span)))
}

pub fn parse_this_expression(parser: &mut Parser) -> Result<Expression, Error> {
    let token = parser.expect(TokenKind::This)?;
    Ok(create_this(token.span))
}

pub fn parse_super_expression(parser: &mut Parser) -> Result<Expression, Error> {
    let token = parser.expect(TokenKind::Super)?;
    if !matches!(
        parser.current_token_kind(),
        TokenKind::OpenParen | TokenKind::Dot | TokenKind::OpenBracket
    ) {
        return Err(parser.unexpected_with("`super` must be followed by a call or property access"));
    }

    Ok(create_super(token.span))
}

pub fn parse_template_expression(parser: &mut Parser) -> Result<Expression, Error> {
    Ok(Expression::Template(parse_template_literal(parser)?))
}

/// Parses a template from its head token through its tail. The lexer has
/// already split it into head, middle and tail segments.
pub fn parse_template_literal(parser: &mut Parser) -> Result<TemplateLiteral, Error> {
    if !parser.current_token_kind().is_template_start() {
        return Err(parser.unreachable("template literal"));
    }

    let start = parser.get_position();
    let head = parser.advance()?;
    let mut quasis = vec![];
    let mut expressions = vec![];

    if head.kind == TokenKind::TemplateString {
        quasis.push(template_element(&head, true));
    } else {
        quasis.push(template_element(&head, false));
        loop {
            expressions.push(parse_expression_allow_in(parser)?);
            match parser.current_token_kind() {
                TokenKind::TemplateMiddle => {
                    let middle = parser.advance()?;
                    quasis.push(template_element(&middle, false));
                }
                TokenKind::TemplateTail => {
                    let tail = parser.advance()?;
                    quasis.push(template_element(&tail, true));
                    break;
                }
                _ => return Err(parser.unexpected_with("expected `}` to close the template substitution")),
            }
        }
    }

    Ok(create_template_literal(quasis, expressions, MK_SPAN!(parser, start)))
}

fn template_element(token: &Token, tail: bool) -> TemplateElement {
    create_template_element(
        token.value.clone(),
        template_raw(&token.raw),
        tail,
        token.span,
    )
}

/// Strips the leading `` ` `` or `}` and the trailing `${` or `` ` ``.
fn template_raw(raw: &str) -> String {
    let mut chars = raw.chars();
    chars.next();
    let body = chars.as_str();
    body.strip_suffix("${")
        .or_else(|| body.strip_suffix('`'))
        .unwrap_or(body)
        .to_string()
}

pub fn parse_array_expression(parser: &mut Parser) -> Result<Expression, Error> {
    let start = parser.get_position();
    parser.expect(TokenKind::OpenBracket)?;

    let context = parser.allow_in_context();
    let elements = parser.with_context(context, |parser| {
        let mut elements = vec![];
        while parser.current_token_kind() != TokenKind::CloseBracket {
            if parser.eat(TokenKind::Comma)? {
                elements.push(None);
                continue;
            }

            elements.push(Some(parse_argument(parser)?));
            if parser.current_token_kind() != TokenKind::CloseBracket {
                parser.expect(TokenKind::Comma)?;
            }
        }
        Ok(elements)
    })?;

    parser.expect(TokenKind::CloseBracket)?;
    Ok(create_array(elements, MK_SPAN!(parser, start)))
}

pub fn parse_object_expression(parser: &mut Parser) -> Result<Expression, Error> {
    let start = parser.get_position();
    parser.expect(TokenKind::OpenCurly)?;

    let context = parser.allow_in_context();
    let properties = parser.with_context(context, |parser| {
        let mut properties = vec![];
        while parser.current_token_kind() != TokenKind::CloseCurly {
            properties.push(parse_object_member(parser)?);
            if parser.current_token_kind() != TokenKind::CloseCurly {
                parser.expect(TokenKind::Comma)?;
            }
        }
        Ok(properties)
    })?;

    parser.expect(TokenKind::CloseCurly)?;
    Ok(create_object(properties, MK_SPAN!(parser, start)))
}

fn parse_object_member(parser: &mut Parser) -> Result<ObjectMember, Error> {
    let start = parser.get_position();
    if parser.eat(TokenKind::Ellipsis)? {
        let argument = parse_assignment_expression(parser)?;
        return Ok(ObjectMember::Spread(create_spread(argument, MK_SPAN!(parser, start))));
    }

    match parse_property_definition(parser, false)? {
        PropertyDefinition::Method(method) => Ok(ObjectMember::Method(method)),
        PropertyDefinition::Field(field) => parse_object_property(parser, field),
    }
}

/// Finishes `key: value`, `key` or `key = default` once the key is known.
fn parse_object_property(parser: &mut Parser, field: FieldHead) -> Result<ObjectMember, Error> {
    let FieldHead {
        key,
        computed,
        shorthand,
        start,
        ..
    } = field;

    if parser.eat(TokenKind::Colon)? {
        let value = parse_assignment_expression(parser)?;
        return Ok(ObjectMember::Property(create_property(
            key,
            value,
            computed,
            false,
            MK_SPAN!(parser, start),
        )));
    }

    let Some(name) = shorthand else {
        return Err(parser.expected(TokenKind::Colon));
    };

    let value = if parser.eat(TokenKind::Assignment)? {
        // Only valid once the object is read as a pattern.
        let default = parse_assignment_expression(parser)?;
        create_assignment(
            AssignmentOperator::Assign,
            Pattern::Identifier(name),
            default,
            MK_SPAN!(parser, start),
        )
    } else {
        Expression::Identifier(name)
    };

    Ok(ObjectMember::Property(create_property(
        key,
        value,
        false,
        true,
        MK_SPAN!(parser, start),
    )))
}

/// Parses `( ... )`, reading it as arrow parameters when `=>` follows and
/// the one-shot arrow flag was set for this primary expression.
pub fn parse_parenthesized_expression(parser: &mut Parser) -> Result<Expression, Error> {
    let maybe_arrow = parser.take_maybe_arrow();
    let start = parser.get_position();
    let list = parse_argument_list(parser)?;

    if maybe_arrow && parser.current_token_kind() == TokenKind::Arrow {
        let params = arguments_to_params(list)?;
        return parse_arrow_function(parser, start, params, false);
    }

    if list.trailing_comma {
        return Err(parser.expected(TokenKind::Arrow));
    }

    let mut expressions = Vec::with_capacity(list.arguments.len());
    for item in list.arguments {
        match item {
            Argument::Expression(expression) => expressions.push(expression),
            Argument::Spread(_) => return Err(parser.expected(TokenKind::Arrow)),
        }
    }

    if expressions.len() == 1 {
        if let Some(expression) = expressions.pop() {
            return Ok(expression);
        }
    }

    let span = match (expressions.first(), expressions.last()) {
        (Some(first), Some(last)) => Span::new(first.get_span().start, last.get_span().end),
        _ => return Err(parser.expected(TokenKind::Arrow)),
    };

    Ok(create_sequence(expressions, span))
}

/// `async` as an identifier, an async function expression, an async arrow
/// with parenthesized parameters, or a call to a function named `async`.
pub fn parse_async_expression(parser: &mut Parser) -> Result<Expression, Error> {
    let maybe_arrow = parser.take_maybe_arrow();
    let start = parser.get_position();
    let async_token = parser.expect(TokenKind::Async)?;

    let (kind, newline) = {
        let token = parser.current_token();
        (token.kind, token.newline_before)
    };
    let async_identifier = || {
        Expression::Identifier(create_identifier(
            async_token.value.clone(),
            async_token.span,
        ))
    };

    if newline {
        return Ok(async_identifier());
    }

    match kind {
        TokenKind::Function => {
            let function = parse_function(parser, start, true, false)?;
            Ok(Expression::Function(Box::new(function)))
        }
        TokenKind::OpenParen if maybe_arrow => {
            let list = parse_argument_list(parser)?;
            if parser.current_token_kind() == TokenKind::Arrow {
                let params = arguments_to_params(list)?;
                return parse_arrow_function(parser, start, params, true);
            }
            Ok(create_call(
                async_identifier(),
                list.arguments,
                false,
                MK_SPAN!(parser, start),
            ))
        }
        _ => Ok(async_identifier()),
    }
}
