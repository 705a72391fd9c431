use log::trace;

use crate::{
    ast::{
        ast::Statement,
        declarations::{ExportDefaultKind, ExportSpecifier, ImportClause},
        expressions::{Identifier, StringLiteral},
        factory::{
            create_export_all, create_export_default, create_export_named,
            create_export_specifier, create_identifier, create_import_declaration,
            create_import_default_specifier, create_import_namespace_specifier,
            create_import_specifier, create_string_literal, to_class_declaration,
            to_function_declaration,
        },
    },
    errors::errors::Error,
    lexer::tokens::TokenKind,
    MK_SPAN,
};

use super::{
    expr::parse_assignment_expression,
    functions::{parse_class, parse_function},
    parser::Parser,
    patterns::{is_binding_identifier, parse_binding_identifier},
    stmt::{parse_statement, parse_variable_statement},
};

/// Parses one top-level item: an import, an export or a statement.
pub fn parse_module_item(parser: &mut Parser) -> Result<Statement, Error> {
    match parser.current_token_kind() {
        TokenKind::Import => parse_import_declaration(parser),
        TokenKind::Export => parse_export_declaration(parser),
        _ => parse_statement(parser),
    }
}

/// ```text
/// import "m";
/// import a from "m";
/// import * as ns from "m";
/// import { a, b as c } from "m";
/// import a, * as ns from "m";
/// import a, { b } from "m";
/// ```
fn parse_import_declaration(parser: &mut Parser) -> Result<Statement, Error> {
    let start = parser.get_position();
    parser.expect(TokenKind::Import)?;

    if parser.current_token_kind() == TokenKind::String {
        let source = parse_module_source(parser)?;
        parser.consume_semicolon()?;
        return Ok(create_import_declaration(vec![], source, MK_SPAN!(parser, start)));
    }

    let mut specifiers = vec![];
    let mut needs_more = true;
    if parser.current_token_kind() != TokenKind::Star
        && parser.current_token_kind() != TokenKind::OpenCurly
    {
        let local = parse_binding_identifier(parser)?;
        let span = local.span;
        specifiers.push(create_import_default_specifier(local, span));
        needs_more = parser.eat(TokenKind::Comma)?;
    }

    if needs_more {
        match parser.current_token_kind() {
            TokenKind::Star => specifiers.push(parse_import_namespace(parser)?),
            TokenKind::OpenCurly => specifiers.extend(parse_import_specifiers(parser)?),
            _ => return Err(parser.expected(TokenKind::OpenCurly)),
        }
    }

    parser.expect_contextual("from")?;
    let source = parse_module_source(parser)?;
    parser.consume_semicolon()?;

    trace!(specifiers = specifiers.len(); "Parsed import");
    Ok(create_import_declaration(specifiers, source, MK_SPAN!(parser, start)))
}

fn parse_import_namespace(parser: &mut Parser) -> Result<ImportClause, Error> {
    let start = parser.get_position();
    parser.expect(TokenKind::Star)?;
    parser.expect_contextual("as")?;
    let local = parse_binding_identifier(parser)?;

    Ok(create_import_namespace_specifier(local, MK_SPAN!(parser, start)))
}

fn parse_import_specifiers(parser: &mut Parser) -> Result<Vec<ImportClause>, Error> {
    parser.expect(TokenKind::OpenCurly)?;

    let mut specifiers = vec![];
    while parser.current_token_kind() != TokenKind::CloseCurly {
        let start = parser.get_position();
        let bindable = is_binding_identifier(parser);
        let imported = parse_module_export_name(parser)?;
        let local = if parser.current_token().is_contextual("as") {
            parser.advance()?;
            parse_binding_identifier(parser)?
        } else if bindable {
            imported.clone()
        } else {
            // `{ default }` would bind a reserved word.
            return Err(parser.unexpected_with("expected `as` to rename a reserved word"));
        };
        specifiers.push(create_import_specifier(imported, local, MK_SPAN!(parser, start)));

        if parser.current_token_kind() != TokenKind::CloseCurly {
            parser.expect(TokenKind::Comma)?;
        }
    }

    parser.expect(TokenKind::CloseCurly)?;
    Ok(specifiers)
}

/// ```text
/// export * from "m";
/// export * as ns from "m";
/// export default expression;
/// export default function () {}
/// export { a, b as c };
/// export { a } from "m";
/// export const a = 1;
/// ```
fn parse_export_declaration(parser: &mut Parser) -> Result<Statement, Error> {
    let start = parser.get_position();
    parser.expect(TokenKind::Export)?;

    match parser.current_token_kind() {
        TokenKind::Star => {
            parser.advance()?;
            let exported = if parser.current_token().is_contextual("as") {
                parser.advance()?;
                Some(parse_module_export_name(parser)?)
            } else {
                None
            };
            parser.expect_contextual("from")?;
            let source = parse_module_source(parser)?;
            parser.consume_semicolon()?;
            Ok(create_export_all(exported, source, MK_SPAN!(parser, start)))
        }
        TokenKind::Default => {
            parser.advance()?;
            let declaration = parse_export_default_declaration(parser)?;
            Ok(create_export_default(declaration, MK_SPAN!(parser, start)))
        }
        TokenKind::OpenCurly => {
            let specifiers = parse_export_specifiers(parser)?;
            let source = if parser.current_token().is_contextual("from") {
                parser.advance()?;
                Some(parse_module_source(parser)?)
            } else {
                None
            };
            parser.consume_semicolon()?;
            Ok(create_export_named(None, specifiers, source, MK_SPAN!(parser, start)))
        }
        TokenKind::Var | TokenKind::Let | TokenKind::Const => {
            let declaration = parse_variable_statement(parser)?;
            Ok(create_export_named(Some(declaration), vec![], None, MK_SPAN!(parser, start)))
        }
        TokenKind::Function | TokenKind::Class | TokenKind::Async => {
            let declaration = parse_statement(parser)?;
            if !matches!(
                declaration,
                Statement::FunctionDeclaration(_) | Statement::ClassDeclaration(_)
            ) {
                return Err(parser.unexpected_with("expected a declaration after `export`"));
            }
            Ok(create_export_named(Some(declaration), vec![], None, MK_SPAN!(parser, start)))
        }
        _ => Err(parser.unexpected_with("expected a declaration or export list after `export`")),
    }
}

/// The part after `export default`. Functions and classes may be
/// anonymous here and are declarations; anything else is an expression.
fn parse_export_default_declaration(parser: &mut Parser) -> Result<ExportDefaultKind, Error> {
    let start = parser.get_position();
    match parser.current_token_kind() {
        TokenKind::Function => {
            let function = parse_function(parser, start, false, false)?;
            return Ok(ExportDefaultKind::Function(to_function_declaration(function)));
        }
        TokenKind::Class => {
            let class = parse_class(parser, false)?;
            return Ok(ExportDefaultKind::Class(to_class_declaration(class)));
        }
        TokenKind::Async => {
            let next = parser.lookahead()?;
            if next.kind == TokenKind::Function && !next.newline_before {
                parser.advance()?;
                let function = parse_function(parser, start, true, false)?;
                return Ok(ExportDefaultKind::Function(to_function_declaration(function)));
            }
        }
        _ => {}
    }

    let expression = parse_assignment_expression(parser)?;
    parser.consume_semicolon()?;
    Ok(ExportDefaultKind::Expression(expression))
}

fn parse_export_specifiers(parser: &mut Parser) -> Result<Vec<ExportSpecifier>, Error> {
    parser.expect(TokenKind::OpenCurly)?;

    let mut specifiers = vec![];
    while parser.current_token_kind() != TokenKind::CloseCurly {
        let start = parser.get_position();
        let local = parse_module_export_name(parser)?;
        let exported = if parser.current_token().is_contextual("as") {
            parser.advance()?;
            parse_module_export_name(parser)?
        } else {
            local.clone()
        };
        specifiers.push(create_export_specifier(local, exported, MK_SPAN!(parser, start)));

        if parser.current_token_kind() != TokenKind::CloseCurly {
            parser.expect(TokenKind::Comma)?;
        }
    }

    parser.expect(TokenKind::CloseCurly)?;
    Ok(specifiers)
}

fn parse_module_source(parser: &mut Parser) -> Result<StringLiteral, Error> {
    let token = parser.expect(TokenKind::String)?;
    Ok(create_string_literal(token.value, token.raw, token.span))
}

/// Names in import and export lists may be any word, including `default`.
fn parse_module_export_name(parser: &mut Parser) -> Result<Identifier, Error> {
    if !parser.current_token_kind().is_word() {
        return Err(parser.expected(TokenKind::Identifier));
    }

    let token = parser.advance()?;
    Ok(create_identifier(token.value, token.span))
}
