use std::fmt::Display;

use thiserror::Error;

use crate::{lexer::tokens::TokenKind, Position};

/// Broad classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The source text could not be split into tokens.
    Lexical,
    /// The token stream does not match the grammar.
    Syntax,
    /// A parser invariant was violated; this is a bug in the parser itself.
    Internal,
}

#[derive(Error, Debug, Clone, PartialEq)]
#[error("{internal_error} at {position}")]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_internal(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn category(&self) -> ErrorCategory {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. }
            | ErrorImpl::UnterminatedString
            | ErrorImpl::UnterminatedTemplate
            | ErrorImpl::UnterminatedComment
            | ErrorImpl::InvalidEscape { .. }
            | ErrorImpl::NumberParseError { .. }
            | ErrorImpl::UnsupportedOperator { .. } => ErrorCategory::Lexical,
            ErrorImpl::UnexpectedToken { .. }
            | ErrorImpl::UnexpectedTokenDetailed { .. }
            | ErrorImpl::InvalidAssignmentTarget
            | ErrorImpl::InvalidModifiers { .. }
            | ErrorImpl::NestingTooDeep { .. } => ErrorCategory::Syntax,
            ErrorImpl::Unreachable { .. } => ErrorCategory::Internal,
        }
    }

    pub fn is_lexical(&self) -> bool {
        self.category() == ErrorCategory::Lexical
    }

    pub fn is_internal(&self) -> bool {
        self.category() == ErrorCategory::Internal
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ErrorImpl::UnterminatedString => "UnterminatedString",
            ErrorImpl::UnterminatedTemplate => "UnterminatedTemplate",
            ErrorImpl::UnterminatedComment => "UnterminatedComment",
            ErrorImpl::InvalidEscape { .. } => "InvalidEscape",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
            ErrorImpl::UnsupportedOperator { .. } => "UnsupportedOperator",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::UnexpectedTokenDetailed { .. } => "UnexpectedTokenDetailed",
            ErrorImpl::InvalidAssignmentTarget => "InvalidAssignmentTarget",
            ErrorImpl::InvalidModifiers { .. } => "InvalidModifiers",
            ErrorImpl::NestingTooDeep { .. } => "NestingTooDeep",
            ErrorImpl::Unreachable { .. } => "Unreachable",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => ErrorTip::None,
            ErrorImpl::UnterminatedString => {
                ErrorTip::Suggestion(String::from("String literal is missing its closing quote"))
            }
            ErrorImpl::UnterminatedTemplate => {
                ErrorTip::Suggestion(String::from("Template literal is missing its closing backtick"))
            }
            ErrorImpl::UnterminatedComment => {
                ErrorTip::Suggestion(String::from("Block comment is missing its closing `*/`"))
            }
            ErrorImpl::InvalidEscape { sequence } => {
                ErrorTip::Suggestion(format!("Invalid escape sequence `\\{}`", sequence))
            }
            ErrorImpl::NumberParseError { token } => ErrorTip::Suggestion(format!(
                "Invalid number: `{}`, only decimal literals are supported",
                token
            )),
            ErrorImpl::UnsupportedOperator { token } => {
                ErrorTip::Suggestion(format!("Operator `{}` is not supported", token))
            }
            ErrorImpl::UnexpectedToken {
                expected: Some(expected),
                token,
                ..
            } => ErrorTip::Suggestion(format!(
                "Unexpected token: `{}`, expected {}",
                token, expected
            )),
            ErrorImpl::UnexpectedToken {
                expected: None,
                token,
                ..
            } => ErrorTip::Suggestion(format!("Unexpected token: `{}`", token)),
            ErrorImpl::UnexpectedTokenDetailed { token, message, .. } => {
                ErrorTip::Suggestion(format!("Unexpected token: `{}`, {}", token, message))
            }
            ErrorImpl::InvalidAssignmentTarget => {
                ErrorTip::Suggestion(String::from("Invalid left-hand side in assignment"))
            }
            ErrorImpl::InvalidModifiers { message } => ErrorTip::Suggestion(message.clone()),
            ErrorImpl::NestingTooDeep { limit } => ErrorTip::Suggestion(format!(
                "Expressions and statements may nest at most {} levels deep",
                limit
            )),
            ErrorImpl::Unreachable { message } => ErrorTip::Suggestion(format!(
                "Internal parser error: {}. This is a bug in the parser",
                message
            )),
        }
    }
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("unrecognised token: {token:?}")]
    UnrecognisedToken { token: String },
    #[error("unterminated string literal")]
    UnterminatedString,
    #[error("unterminated template literal")]
    UnterminatedTemplate,
    #[error("unterminated block comment")]
    UnterminatedComment,
    #[error("invalid escape sequence: {sequence:?}")]
    InvalidEscape { sequence: String },
    #[error("error parsing number: {token:?}")]
    NumberParseError { token: String },
    #[error("unsupported operator: {token:?}")]
    UnsupportedOperator { token: String },
    #[error("unexpected token {found} ({token:?})")]
    UnexpectedToken {
        expected: Option<TokenKind>,
        found: TokenKind,
        token: String,
    },
    #[error("unexpected token {found} ({token:?}): {message}")]
    UnexpectedTokenDetailed {
        found: TokenKind,
        token: String,
        message: String,
    },
    #[error("invalid assignment target")]
    InvalidAssignmentTarget,
    #[error("invalid modifiers: {message}")]
    InvalidModifiers { message: String },
    #[error("nesting exceeds {limit} levels")]
    NestingTooDeep { limit: usize },
    #[error("unreachable: {message}")]
    Unreachable { message: String },
}
