use log::trace;

use crate::{
    ast::{
        ast::{Expression, Pattern, Statement},
        declarations::{VariableDeclaration, VariableKind},
        expressions::Identifier,
        factory::{
            create_block, create_break, create_catch_clause, create_continue,
            create_debugger_statement, create_do_while, create_empty_statement,
            create_expression_statement, create_for, create_for_in, create_for_of, create_if,
            create_labeled, create_return, create_switch, create_switch_case, create_throw,
            create_try, create_variable_declaration, create_variable_declarator, create_while,
        },
        statements::{BlockStatement, ForInit, ForTarget, SwitchCase},
    },
    errors::errors::Error,
    lexer::tokens::TokenKind,
    Position, MK_SPAN,
};

use super::{
    expr::{parse_assignment_expression, parse_expression, parse_expression_allow_in},
    functions::parse_function_declaration,
    parser::{Context, Parser},
    patterns::{
        expression_to_pattern, is_binding_identifier, parse_binding_identifier,
        parse_binding_target,
    },
};

/// Parses any statement that may appear inside a block or function body.
pub fn parse_statement(parser: &mut Parser) -> Result<Statement, Error> {
    parser.nested(parse_any_statement)
}

fn parse_any_statement(parser: &mut Parser) -> Result<Statement, Error> {
    let kind = parser.current_token_kind();
    trace!(token:? = kind; "Parsing statement");

    match kind {
        TokenKind::Import | TokenKind::Export => {
            return Err(parser.unexpected_with("import and export may only appear at the top level"));
        }
        TokenKind::Async => {
            let next = parser.lookahead()?;
            if next.kind == TokenKind::Function && !next.newline_before {
                return parse_function_declaration(parser);
            }
        }
        _ => {}
    }

    if is_binding_identifier(parser) && parser.lookahead()?.kind == TokenKind::Colon {
        return parse_labeled_statement(parser);
    }

    let handler = parser.get_stmt_lookup().get(&kind).copied();
    match handler {
        Some(handler) => handler(parser),
        None => parse_expression_statement(parser),
    }
}

pub fn parse_expression_statement(parser: &mut Parser) -> Result<Statement, Error> {
    let start = parser.get_position();
    let expression = parse_expression(parser)?;
    parser.consume_semicolon()?;

    Ok(create_expression_statement(expression, MK_SPAN!(parser, start)))
}

/// Parses `{ statements }`.
pub fn parse_block(parser: &mut Parser) -> Result<BlockStatement, Error> {
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

pub fn parse_block_statement(parser: &mut Parser) -> Result<Statement, Error> {
    Ok(Statement::Block(parse_block(parser)?))
}

pub fn parse_empty_statement(parser: &mut Parser) -> Result<Statement, Error> {
    let token = parser.expect(TokenKind::Semicolon)?;
    Ok(create_empty_statement(token.span))
}

pub fn parse_debugger_statement(parser: &mut Parser) -> Result<Statement, Error> {
    let start = parser.get_position();
    parser.expect(TokenKind::Debugger)?;
    parser.consume_semicolon()?;

    Ok(create_debugger_statement(MK_SPAN!(parser, start)))
}

// DECLARATIONS

pub fn parse_variable_statement(parser: &mut Parser) -> Result<Statement, Error> {
    let start = parser.get_position();
    let declaration = parse_variable_declaration(parser, false)?;
    parser.consume_semicolon()?;

    Ok(Statement::VariableDeclaration(VariableDeclaration {
        span: MK_SPAN!(parser, start),
        ..declaration
    }))
}

/// Parses `var`/`let`/`const` and its declarators, without the terminator.
///
/// In a `for` head the initializer may be left out even where it is
/// otherwise required, because `in`/`of` can follow instead.
pub fn parse_variable_declaration(
    parser: &mut Parser,
    in_for_head: bool,
) -> Result<VariableDeclaration, Error> {
    let start = parser.get_position();
    let keyword = match parser.current_token_kind() {
        TokenKind::Var => VariableKind::Var,
        TokenKind::Let => VariableKind::Let,
        TokenKind::Const => VariableKind::Const,
        _ => return Err(parser.unreachable("variable declaration")),
    };
    parser.advance()?;

    let mut declarations = vec![];
    loop {
        let declarator_start = parser.get_position();
        let id = parse_binding_target(parser)?;

        let init = if parser.eat(TokenKind::Assignment)? {
            Some(parse_assignment_expression(parser)?)
        } else {
            let loop_binding = in_for_head
                && (parser.current_token_kind() == TokenKind::In
                    || parser.current_token().is_contextual("of"));
            let destructuring = !matches!(id, Pattern::Identifier(_));
            if !loop_binding && (keyword == VariableKind::Const || destructuring) {
                return Err(parser.expected(TokenKind::Assignment));
            }
            None
        };

        declarations.push(create_variable_declarator(
            id,
            init,
            MK_SPAN!(parser, declarator_start),
        ));

        if !parser.eat(TokenKind::Comma)? {
            break;
        }
    }

    Ok(create_variable_declaration(
        keyword,
        declarations,
        MK_SPAN!(parser, start),
    ))
}

// CONTROL FLOW

pub fn parse_if_statement(parser: &mut Parser) -> Result<Statement, Error> {
    let start = parser.get_position();
    parser.expect(TokenKind::If)?;
    let test = parse_condition(parser)?;

    let consequent = parse_statement(parser)?;
    let alternate = if parser.eat(TokenKind::Else)? {
        Some(parse_statement(parser)?)
    } else {
        None
    };

    Ok(create_if(test, consequent, alternate, MK_SPAN!(parser, start)))
}

/// `( expression )` after `if`, `while` and `switch`.
fn parse_condition(parser: &mut Parser) -> Result<Expression, Error> {
    parser.expect(TokenKind::OpenParen)?;
    let test = parse_expression_allow_in(parser)?;
    parser.expect(TokenKind::CloseParen)?;
    Ok(test)
}

pub fn parse_while_statement(parser: &mut Parser) -> Result<Statement, Error> {
    let start = parser.get_position();
    parser.expect(TokenKind::While)?;
    let test = parse_condition(parser)?;
    let body = parse_statement(parser)?;

    Ok(create_while(test, body, MK_SPAN!(parser, start)))
}

pub fn parse_do_while_statement(parser: &mut Parser) -> Result<Statement, Error> {
    let start = parser.get_position();
    parser.expect(TokenKind::Do)?;
    let body = parse_statement(parser)?;
    parser.expect(TokenKind::While)?;
    let test = parse_condition(parser)?;
    // The `;` after `do ... while (x)` is optional even on the same line.
    parser.eat(TokenKind::Semicolon)?;

    Ok(create_do_while(body, test, MK_SPAN!(parser, start)))
}

/// Parses `for (init; test; update)`, `for (left in right)` and
/// `for (left of right)`.
pub fn parse_for_statement(parser: &mut Parser) -> Result<Statement, Error> {
    let start = parser.get_position();
    parser.expect(TokenKind::For)?;
    parser.expect(TokenKind::OpenParen)?;

    let head_context = Context {
        allow_in: false,
        maybe_arrow: false,
        ..parser.context()
    };

    let init = match parser.current_token_kind() {
        TokenKind::Semicolon => None,
        TokenKind::Var | TokenKind::Let | TokenKind::Const => Some(ForInit::VariableDeclaration(
            parser.with_context(head_context, |parser| parse_variable_declaration(parser, true))?,
        )),
        _ => Some(ForInit::Expression(
            parser.with_context(head_context, parse_expression)?,
        )),
    };

    let is_of = parser.current_token().is_contextual("of");
    let init = match init {
        Some(init) if is_of || parser.current_token_kind() == TokenKind::In => {
            return parse_for_in_of(parser, start, init, is_of);
        }
        init => init,
    };

    parser.expect(TokenKind::Semicolon)?;
    let test = parse_optional_expression(parser, TokenKind::Semicolon)?;
    parser.expect(TokenKind::Semicolon)?;
    let update = parse_optional_expression(parser, TokenKind::CloseParen)?;
    parser.expect(TokenKind::CloseParen)?;
    let body = parse_statement(parser)?;

    Ok(create_for(init, test, update, body, MK_SPAN!(parser, start)))
}

fn parse_for_in_of(
    parser: &mut Parser,
    start: Position,
    init: ForInit,
    is_of: bool,
) -> Result<Statement, Error> {
    let left = for_target(parser, init)?;
    parser.advance()?;
    let right = if is_of {
        let context = parser.allow_in_context();
        parser.with_context(context, parse_assignment_expression)?
    } else {
        parse_expression_allow_in(parser)?
    };
    parser.expect(TokenKind::CloseParen)?;
    let body = parse_statement(parser)?;

    let span = MK_SPAN!(parser, start);
    Ok(if is_of {
        create_for_of(left, right, body, span)
    } else {
        create_for_in(left, right, body, span)
    })
}

fn parse_optional_expression(
    parser: &mut Parser,
    terminator: TokenKind,
) -> Result<Option<Expression>, Error> {
    if parser.current_token_kind() == terminator {
        return Ok(None);
    }
    Ok(Some(parse_expression_allow_in(parser)?))
}

/// The left side of `for-in`/`for-of`: a single declarator without an
/// initializer, or an assignment target.
fn for_target(parser: &Parser, init: ForInit) -> Result<ForTarget, Error> {
    match init {
        ForInit::VariableDeclaration(declaration) => {
            let single = declaration.declarations.len() == 1
                && declaration.declarations.iter().all(|d| d.init.is_none());
            if !single {
                return Err(parser.unexpected_with(
                    "the left side of a for-in or for-of loop must declare a single binding without an initializer",
                ));
            }
            Ok(ForTarget::VariableDeclaration(declaration))
        }
        ForInit::Expression(expression) => Ok(ForTarget::Pattern(expression_to_pattern(expression, false)?)),
    }
}

pub fn parse_return_statement(parser: &mut Parser) -> Result<Statement, Error> {
    let start = parser.get_position();
    parser.expect(TokenKind::Return)?;

    let argument = if parser.current_token_kind() == TokenKind::Semicolon || parser.can_insert_semicolon() {
        None
    } else {
        Some(parse_expression_allow_in(parser)?)
    };
    parser.consume_semicolon()?;

    Ok(create_return(argument, MK_SPAN!(parser, start)))
}

pub fn parse_break_statement(parser: &mut Parser) -> Result<Statement, Error> {
    let start = parser.get_position();
    parser.expect(TokenKind::Break)?;
    let label = parse_jump_label(parser)?;
    parser.consume_semicolon()?;

    Ok(create_break(label, MK_SPAN!(parser, start)))
}

pub fn parse_continue_statement(parser: &mut Parser) -> Result<Statement, Error> {
    let start = parser.get_position();
    parser.expect(TokenKind::Continue)?;
    let label = parse_jump_label(parser)?;
    parser.consume_semicolon()?;

    Ok(create_continue(label, MK_SPAN!(parser, start)))
}

/// A label after `break`/`continue` must be on the same line.
fn parse_jump_label(parser: &mut Parser) -> Result<Option<Identifier>, Error> {
    if parser.current_token().newline_before || !is_binding_identifier(parser) {
        return Ok(None);
    }
    Ok(Some(parse_binding_identifier(parser)?))
}

pub fn parse_throw_statement(parser: &mut Parser) -> Result<Statement, Error> {
    let start = parser.get_position();
    parser.expect(TokenKind::Throw)?;

    if parser.current_token().newline_before {
        return Err(parser.unexpected_with("line break is not allowed after `throw`"));
    }
    let argument = parse_expression_allow_in(parser)?;
    parser.consume_semicolon()?;

    Ok(create_throw(argument, MK_SPAN!(parser, start)))
}

pub fn parse_try_statement(parser: &mut Parser) -> Result<Statement, Error> {
    let start = parser.get_position();
    parser.expect(TokenKind::Try)?;
    let block = parse_block(parser)?;

    let handler = if parser.current_token_kind() == TokenKind::Catch {
        let catch_start = parser.get_position();
        parser.advance()?;
        let param = if parser.eat(TokenKind::OpenParen)? {
            let param = parse_binding_target(parser)?;
            parser.expect(TokenKind::CloseParen)?;
            Some(param)
        } else {
            None
        };
        let body = parse_block(parser)?;
        Some(create_catch_clause(param, body, MK_SPAN!(parser, catch_start)))
    } else {
        None
    };

    let finalizer = if parser.eat(TokenKind::Finally)? {
        Some(parse_block(parser)?)
    } else {
        None
    };

    if handler.is_none() && finalizer.is_none() {
        return Err(parser.expected(TokenKind::Catch));
    }

    Ok(create_try(block, handler, finalizer, MK_SPAN!(parser, start)))
}

pub fn parse_switch_statement(parser: &mut Parser) -> Result<Statement, Error> {
    let start = parser.get_position();
    parser.expect(TokenKind::Switch)?;
    let discriminant = parse_condition(parser)?;
    parser.expect(TokenKind::OpenCurly)?;

    let mut cases = vec![];
    let mut seen_default = false;
    while parser.current_token_kind() != TokenKind::CloseCurly {
        if parser.current_token_kind() == TokenKind::Default {
            if seen_default {
                return Err(parser.unexpected_with("a switch may only have one default clause"));
            }
            seen_default = true;
        }
        cases.push(parse_switch_case(parser)?);
    }

    parser.expect(TokenKind::CloseCurly)?;
    Ok(create_switch(discriminant, cases, MK_SPAN!(parser, start)))
}

fn parse_switch_case(parser: &mut Parser) -> Result<SwitchCase, Error> {
    let start = parser.get_position();
    let test = match parser.current_token_kind() {
        TokenKind::Case => {
            parser.advance()?;
            Some(parse_expression_allow_in(parser)?)
        }
        TokenKind::Default => {
            parser.advance()?;
            None
        }
        _ => return Err(parser.expected(TokenKind::Case)),
    };
    parser.expect(TokenKind::Colon)?;

    let mut consequent = vec![];
    while !matches!(
        parser.current_token_kind(),
        TokenKind::Case | TokenKind::Default | TokenKind::CloseCurly | TokenKind::EOF
    ) {
        consequent.push(parse_statement(parser)?);
    }

    Ok(create_switch_case(test, consequent, MK_SPAN!(parser, start)))
}

/// `label: statement`
pub fn parse_labeled_statement(parser: &mut Parser) -> Result<Statement, Error> {
    let start = parser.get_position();
    let label = parse_binding_identifier(parser)?;
    parser.expect(TokenKind::Colon)?;
    let body = parse_statement(parser)?;

    Ok(create_labeled(label, body, MK_SPAN!(parser, start)))
}
