//! Parser implementation for building the Abstract Syntax Tree.
//!
//! This module contains the main Parser struct. Parsing functions live in
//! the sibling modules and take `&mut Parser`; the parser itself only owns
//! the lexer, the current token and the parsing context.
//!
//! It maintains lookup tables for:
//! - Statement handlers, keyed by the statement's first token
//! - NUD (null denotation) handlers for primary expressions
//! - Binding powers for binary operator precedence

use std::{collections::HashMap, rc::Rc};

use log::{debug, trace};

use crate::{
    ast::{factory::create_program, statements::Program},
    errors::errors::{Error, ErrorImpl},
    lexer::{
        lexer::Lexer,
        tokens::{Token, TokenKind},
    },
    Position, Span, MK_TOKEN,
};

use super::{
    lookups::{
        create_token_lookups, BPLookup, BindingPower, NUDHandler, NUDLookup, StmtHandler,
        StmtLookup,
    },
    modules::parse_module_item,
};

/// How many nested expressions, statements and patterns the parser descends
/// into before giving up with [`ErrorImpl::NestingTooDeep`].
pub const MAX_DEPTH: usize = 128;

/// Flags that change how the grammar is read at the current point.
///
/// The context is a plain value: nested constructs swap in a modified copy
/// with [`Parser::with_context`] and the previous value is restored when
/// they finish.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Context {
    /// The next primary expression may be reinterpreted as arrow parameters.
    /// Consumed by the first primary expression that reads it.
    pub maybe_arrow: bool,
    /// `await` is a keyword.
    pub in_async: bool,
    /// `yield` is a keyword.
    pub in_generator: bool,
    /// Inside a class body; private names are allowed.
    pub in_class: bool,
    /// `in` is a binary operator. Cleared inside `for` heads.
    pub allow_in: bool,
}

impl Default for Context {
    fn default() -> Self {
        Context {
            maybe_arrow: false,
            in_async: false,
            in_generator: false,
            in_class: false,
            allow_in: true,
        }
    }
}

/// The main parser structure that maintains parsing state.
///
/// Tokens are pulled from the lexer one at a time. `token` is the current
/// token and `prev_end` is where the last consumed token ended, which is
/// what node spans end on.
pub struct Parser {
    lexer: Lexer,
    token: Token,
    prev_end: Position,
    context: Context,
    /// Current recursion depth, bounded by [`MAX_DEPTH`]
    depth: usize,
    /// The name of the source file being parsed
    file: Rc<String>,
    /// Lookup table for statement parsing handlers
    stmt_lookup: StmtLookup,
    /// Lookup table for primary expression handlers
    nud_lookup: NUDLookup,
    /// Lookup table for binary operator binding powers
    binding_power_lookup: BPLookup,
}

impl Parser {
    /// Creates a parser for `source`. Nothing is lexed until [`Parser::parse`].
    pub fn new(source: &str) -> Self {
        Parser::build(Lexer::new(source, None))
    }

    /// Creates a parser whose errors refer to `file`.
    pub fn with_file(source: &str, file: &str) -> Self {
        Parser::build(Lexer::new(source, Some(file.to_string())))
    }

    fn build(lexer: Lexer) -> Self {
        let file = lexer.file();
        let mut parser = Parser {
            lexer,
            token: MK_TOKEN!(
                TokenKind::EOF,
                String::new(),
                String::new(),
                Span::default(),
                false
            ),
            prev_end: Position::start(),
            context: Context::default(),
            depth: 0,
            file,
            stmt_lookup: HashMap::new(),
            nud_lookup: HashMap::new(),
            binding_power_lookup: HashMap::new(),
        };
        create_token_lookups(&mut parser);
        parser
    }

    /// Parses the whole source into a [`Program`].
    ///
    /// Parsing stops at the first error; there is no recovery.
    pub fn parse(mut self) -> Result<Program, Error> {
        debug!(file = self.file.as_str(), length = self.lexer.source().len(); "Parsing program");

        self.token = self.lexer.get_token()?.clone();
        let start = Position::start();

        let mut body = vec![];
        while self.has_tokens() {
            body.push(parse_module_item(&mut self)?);
        }

        let end = self.token.span.end;
        debug!(statements = body.len(); "Parsed program");
        Ok(create_program(body, Span::new(start, end)))
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> &Token {
        &self.token
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.token.kind
    }

    /// Advances to the next token and returns the previous token.
    pub fn advance(&mut self) -> Result<Token, Error> {
        let next = self.lexer.next_token()?.clone();
        let previous = std::mem::replace(&mut self.token, next);
        self.prev_end = previous.span.end;
        Ok(previous)
    }

    /// Consumes the current token if it is of `kind`.
    pub fn eat(&mut self, kind: TokenKind) -> Result<bool, Error> {
        if self.current_token_kind() == kind {
            self.advance()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Expects a token of the specified kind, with optional custom error.
    ///
    /// # Returns
    ///
    /// Returns Ok(Token) if the current token matches, otherwise returns an Error.
    pub fn expect_error(
        &mut self,
        expected_kind: TokenKind,
        error: Option<Error>,
    ) -> Result<Token, Error> {
        if self.current_token_kind() != expected_kind {
            return Err(error.unwrap_or_else(|| self.expected(expected_kind)));
        }

        self.advance()
    }

    /// Expects a token of the specified kind with default error message.
    pub fn expect(&mut self, expected_kind: TokenKind) -> Result<Token, Error> {
        self.expect_error(expected_kind, None)
    }

    /// Expects an identifier spelled `word`, such as `from` or `as`.
    pub fn expect_contextual(&mut self, word: &str) -> Result<Token, Error> {
        if !self.token.is_contextual(word) {
            return Err(self.unexpected_with(&format!("expected `{}`", word)));
        }

        self.advance()
    }

    /// Returns the token after the current one without consuming anything.
    pub fn lookahead(&mut self) -> Result<Token, Error> {
        let token = self.lexer.lookahead()?;
        trace!(current:? = self.token.kind, next:? = token.kind; "Lookahead");
        Ok(token)
    }

    /// Consumes a statement terminator.
    ///
    /// An explicit `;` is consumed. Otherwise the statement may also end
    /// before a `}`, at the end of input, or at a line break.
    pub fn consume_semicolon(&mut self) -> Result<(), Error> {
        if self.eat(TokenKind::Semicolon)? || self.can_insert_semicolon() {
            return Ok(());
        }

        Err(self.expected(TokenKind::Semicolon))
    }

    pub fn can_insert_semicolon(&self) -> bool {
        self.token.newline_before
            || matches!(
                self.current_token_kind(),
                TokenKind::CloseCurly | TokenKind::EOF
            )
    }

    /// Checks if there are more tokens to parse.
    pub fn has_tokens(&self) -> bool {
        self.current_token_kind() != TokenKind::EOF
    }

    /// Returns the start position of the current token.
    pub fn get_position(&self) -> Position {
        self.token.span.start
    }

    /// Returns where the last consumed token ended.
    pub fn prev_end(&self) -> Position {
        self.prev_end
    }

    pub fn context(&self) -> Context {
        self.context
    }

    /// The current context with `in` allowed and no pending arrow, for
    /// bracketed sub-expressions.
    pub fn allow_in_context(&self) -> Context {
        Context {
            allow_in: true,
            maybe_arrow: false,
            ..self.context
        }
    }

    /// Clears and returns the one-shot arrow flag.
    pub fn take_maybe_arrow(&mut self) -> bool {
        std::mem::take(&mut self.context.maybe_arrow)
    }

    pub fn set_maybe_arrow(&mut self) {
        self.context.maybe_arrow = true;
    }

    /// Runs `parse` with `context` in place, restoring the previous context
    /// afterwards whether or not `parse` succeeded.
    pub fn with_context<T>(
        &mut self,
        context: Context,
        parse: impl FnOnce(&mut Parser) -> Result<T, Error>,
    ) -> Result<T, Error> {
        let saved = std::mem::replace(&mut self.context, context);
        trace!(context:? = context; "Entering parse context");
        let result = parse(self);
        self.context = saved;
        result
    }

    /// Runs `parse` one nesting level deeper. Fails instead of recursing
    /// once [`MAX_DEPTH`] levels are open.
    pub fn nested<T>(
        &mut self,
        parse: impl FnOnce(&mut Parser) -> Result<T, Error>,
    ) -> Result<T, Error> {
        if self.depth >= MAX_DEPTH {
            debug!(depth = self.depth; "Nesting limit reached");
            return Err(Error::new(
                ErrorImpl::NestingTooDeep { limit: MAX_DEPTH },
                self.token.span.start,
            ));
        }

        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    /// Returns a reference to the statement lookup table.
    pub fn get_stmt_lookup(&self) -> &StmtLookup {
        &self.stmt_lookup
    }

    /// Returns a reference to the NUD (null denotation) lookup table.
    pub fn get_nud_lookup(&self) -> &NUDLookup {
        &self.nud_lookup
    }

    /// Returns the binding power of `kind` used as a binary operator here.
    ///
    /// `in` is not an operator while `allow_in` is cleared.
    pub fn get_binding_power(&self, kind: TokenKind) -> Option<BindingPower> {
        if kind == TokenKind::In && !self.context.allow_in {
            return None;
        }

        self.binding_power_lookup.get(&kind).copied()
    }

    /// Registers a binary operator and its binding power.
    pub fn binary(&mut self, kind: TokenKind, binding_power: BindingPower) {
        self.binding_power_lookup.insert(kind, binding_power);
    }

    /// Registers a null denotation (primary expression) handler for a token.
    pub fn nud(&mut self, kind: TokenKind, nud_fn: NUDHandler) {
        self.nud_lookup.insert(kind, nud_fn);
    }

    /// Registers a statement handler for a token.
    pub fn stmt(&mut self, kind: TokenKind, stmt_fn: StmtHandler) {
        self.stmt_lookup.insert(kind, stmt_fn);
    }

    /// An error for the current token, with no particular expectation.
    pub fn unexpected(&self) -> Error {
        Error::new(
            ErrorImpl::UnexpectedToken {
                expected: None,
                found: self.token.kind,
                token: self.token.value.clone(),
            },
            self.get_position(),
        )
    }

    /// An error for the current token when `kind` was required.
    pub fn expected(&self, kind: TokenKind) -> Error {
        Error::new(
            ErrorImpl::UnexpectedToken {
                expected: Some(kind),
                found: self.token.kind,
                token: self.token.value.clone(),
            },
            self.get_position(),
        )
    }

    /// An error for the current token with an explanation.
    pub fn unexpected_with(&self, message: &str) -> Error {
        Error::new(
            ErrorImpl::UnexpectedTokenDetailed {
                found: self.token.kind,
                token: self.token.value.clone(),
                message: message.to_string(),
            },
            self.get_position(),
        )
    }

    /// An internal error: a parse function was entered on a token it cannot
    /// start from.
    pub fn unreachable(&self, production: &str) -> Error {
        Error::new(
            ErrorImpl::Unreachable {
                message: format!(
                    "{} cannot start with {}",
                    production,
                    self.token.debug()
                ),
            },
            self.get_position(),
        )
    }
}
